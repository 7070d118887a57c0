//! Page views: Home, Tv and Search
//!
//! Each page is a media list fed by one TMDB listing. Pages know nothing
//! about the header; they only expose their scroll position.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::models::{LoadingState, MediaItem};
use crate::router::{Location, Route};
use crate::ui::browser::BrowserView;
use crate::ui::theme::{Palette, Role};

/// What a page needs fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    NowPlaying,
    PopularTv,
    Search(String),
}

impl PageRequest {
    /// Request backing a location; None for a search without a keyword
    pub fn for_location(location: &Location) -> Option<Self> {
        match Route::resolve(&location.path) {
            Route::Home => Some(PageRequest::NowPlaying),
            Route::Tv => Some(PageRequest::PopularTv),
            Route::Search => location
                .query_param("keyword")
                .filter(|k| !k.trim().is_empty())
                .map(PageRequest::Search),
        }
    }
}

/// State of one page view
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub list: BrowserView,
    pub loading: LoadingState,
    /// Location the current items were fetched for
    pub loaded_for: Option<String>,
}

impl PageState {
    pub fn begin_loading(&mut self, url: &str) {
        self.loading = LoadingState::Loading;
        self.loaded_for = Some(url.to_string());
    }

    pub fn set_items(&mut self, items: Vec<MediaItem>) {
        self.list.set_items(items);
        self.loading = LoadingState::Idle;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.loading = LoadingState::Error(msg.into());
    }

    /// Scroll offset in units: one row is `step` units
    pub fn scroll_offset(&self, step: u32) -> u32 {
        (self.list.offset as u32).saturating_mul(step)
    }
}

/// Draw the page for `route` into `area`
pub fn render_page(
    frame: &mut Frame,
    area: Rect,
    route: Route,
    location: &Location,
    page: &mut PageState,
    palette: &Palette,
) {
    let title = match route {
        Route::Search => match location.query_param("keyword") {
            Some(keyword) if !keyword.trim().is_empty() => format!("RESULTS FOR \"{}\"", keyword),
            _ => {
                render_search_hint(frame, area, palette);
                return;
            }
        },
        other => other.title().to_string(),
    };
    page.list.render(frame, area, &title, &page.loading, palette);
}

fn render_search_hint(frame: &mut Frame, area: Rect, palette: &Palette) {
    let hint = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Looking for something?", palette.style(Role::Title))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  /  ", palette.style(Role::Keybind)),
            Span::styled("Open the search field", palette.style(Role::Text)),
        ]),
        Line::from(vec![
            Span::styled("  ↵  ", palette.style(Role::Keybind)),
            Span::styled("Search", palette.style(Role::Text)),
        ]),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(hint, area);
}
