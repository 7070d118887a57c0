//! Scrollable media list
//!
//! The body of every page view. The list's row offset is the page's scroll
//! position; the app converts it to scroll units for the header.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::models::{LoadingState, MediaItem};
use crate::ui::theme::{Palette, Role};

/// Media list state
#[derive(Debug, Default, Clone)]
pub struct BrowserView {
    /// Items to display
    pub items: Vec<MediaItem>,
    /// Currently selected index
    pub selected: usize,
    /// First visible row
    pub offset: usize,
    /// Rows visible at the last render
    pub viewport: usize,
}

impl BrowserView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace items and scroll back to the top
    pub fn set_items(&mut self, items: Vec<MediaItem>) {
        self.items = items;
        self.selected = 0;
        self.offset = 0;
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.selected < self.items.len().saturating_sub(1) {
            self.selected += 1;
            self.keep_selection_visible();
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    pub fn page_down(&mut self, page_size: usize) {
        let max_idx = self.items.len().saturating_sub(1);
        self.selected = (self.selected + page_size).min(max_idx);
        self.keep_selection_visible();
    }

    /// Jump to start
    pub fn home(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Jump to end
    pub fn end(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
        self.keep_selection_visible();
    }

    /// Scroll the viewport by `rows` (mouse wheel); selection follows if it
    /// would leave the view
    pub fn scroll_by(&mut self, rows: isize) {
        let max_offset = self.items.len().saturating_sub(self.viewport.max(1));
        self.offset = self.offset.saturating_add_signed(rows).min(max_offset);
        if self.selected < self.offset {
            self.selected = self.offset;
        } else if self.viewport > 0 && self.selected >= self.offset + self.viewport {
            self.selected = self.offset + self.viewport - 1;
        }
    }

    pub fn current(&self) -> Option<&MediaItem> {
        self.items.get(self.selected)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn keep_selection_visible(&mut self) {
        if self.viewport == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.viewport {
            self.offset = self.selected + 1 - self.viewport;
        }
    }

    /// Render the list with an overview panel for the selection
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        loading: &LoadingState,
        palette: &Palette,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.style(Role::Dimmed))
            .title(Span::styled(
                format!(" {} ({}) ", title, self.items.len()),
                palette.style(Role::Title),
            ));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        self.viewport = inner.height as usize;
        self.keep_selection_visible();

        if loading.is_loading() {
            frame.render_widget(
                Paragraph::new("⟳ Loading...")
                    .style(palette.style(Role::Loading))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        }
        if let Some(msg) = loading.message() {
            frame.render_widget(
                Paragraph::new(msg.to_string())
                    .style(palette.style(Role::Error))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        }
        if self.items.is_empty() {
            frame.render_widget(
                Paragraph::new("Nothing to show")
                    .style(palette.style(Role::Dimmed))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        }

        let rows: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.viewport)
            .map(|(i, item)| Self::render_item(item, i == self.selected, palette))
            .collect();
        frame.render_widget(List::new(rows).style(palette.style(Role::Text)), inner);

        if let Some(item) = self.current() {
            Self::render_overview(frame, chunks[1], item, palette);
        }
    }

    /// Format: ▸ Title (Year)  [TYPE] ★ 8.5
    fn render_item(item: &MediaItem, is_selected: bool, palette: &Palette) -> ListItem<'static> {
        let marker = if is_selected { "▸ " } else { "  " };
        let year_str = item.year.map(|y| format!(" ({})", y)).unwrap_or_default();

        let line = Line::from(vec![
            Span::styled(marker, palette.style(Role::Keybind)),
            Span::styled(
                item.title.clone(),
                if is_selected {
                    palette.style(Role::Selected)
                } else {
                    palette.style(Role::Text)
                },
            ),
            Span::styled(year_str, palette.style(Role::Year)),
            Span::raw(" "),
            Span::styled(format!("[{}]", item.media_type.badge()), palette.style(Role::Badge)),
            Span::raw(" "),
            Span::styled(format!("★ {:.1}", item.vote_average), palette.rating(item.vote_average)),
        ]);

        ListItem::new(line)
    }

    fn render_overview(frame: &mut Frame, area: Rect, item: &MediaItem, palette: &Palette) {
        let overview = if item.overview.is_empty() {
            "No overview available."
        } else {
            item.overview.as_str()
        };
        let text = vec![
            Line::from(Span::styled(item.title.clone(), palette.style(Role::Title))),
            Line::from(Span::styled(item.to_string(), palette.style(Role::Year))),
            Line::from(""),
            Line::from(Span::styled(overview.to_string(), palette.style(Role::Text))),
        ];
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(palette.style(Role::Dimmed)),
            ),
            area,
        );
    }
}
