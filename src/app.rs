//! App state and core application logic
//!
//! Owns the router, the persistent header, the document event hub and
//! per-page state, and turns terminal input into state transitions.
//! Network fetches are requested here and performed by the event loop.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info, warn};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::events::{ClickEvent, Document};
use crate::models::MediaItem;
use crate::router::{Route, Router};
use crate::ui::header::{HeaderTarget, NavTarget, HEADER_HEIGHT};
use crate::ui::pages::{self, PageRequest, PageState};
use crate::ui::{Header, HeaderConfig, Palette, Role};

// =============================================================================
// Fetch plumbing
// =============================================================================

/// A listing the event loop should fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Location the result belongs to
    pub url: String,
    pub route: Route,
    pub request: PageRequest,
}

/// Completed fetch, sent back to the app
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub route: Route,
    pub outcome: Result<Vec<MediaItem>, String>,
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    pub router: Router,
    pub header: Header,
    pub document: Document,
    /// Global error message
    pub error: Option<String>,

    pub home: PageState,
    pub tv: PageState,
    pub search: PageState,

    palette: Palette,
    /// Scroll units per list row
    scroll_step: u32,
    /// Last offset reported to the header
    last_scroll: Option<u32>,
    outbox: Vec<FetchRequest>,
}

impl Default for App {
    fn default() -> Self {
        Self::new("/", HeaderConfig::default(), 100)
    }
}

impl App {
    /// Create the app at `url` with the header mounted
    pub fn new(url: &str, header_config: HeaderConfig, scroll_step: u32) -> Self {
        let palette = Palette::default();
        let mut app = Self {
            running: true,
            router: Router::new(url),
            header: Header::new(header_config, palette),
            document: Document::new(),
            error: None,
            home: PageState::default(),
            tv: PageState::default(),
            search: PageState::default(),
            palette,
            scroll_step: scroll_step.max(1),
            last_scroll: None,
            outbox: Vec::new(),
        };
        app.header.mount(&mut app.document);
        if let Some(keyword) = app.router.query_param("keyword") {
            app.header.input.set(keyword);
        }
        app.sync_page();
        app.notify_scroll();
        app
    }

    /// Quit the application and release document listeners
    pub fn quit(&mut self) {
        self.running = false;
        self.header.unmount(&mut self.document);
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub fn page(&self, route: Route) -> &PageState {
        match route {
            Route::Home => &self.home,
            Route::Tv => &self.tv,
            Route::Search => &self.search,
        }
    }

    pub fn page_mut(&mut self, route: Route) -> &mut PageState {
        match route {
            Route::Home => &mut self.home,
            Route::Tv => &mut self.tv,
            Route::Search => &mut self.search,
        }
    }

    fn current_page_mut(&mut self) -> &mut PageState {
        let route = self.router.route();
        self.page_mut(route)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Navigate to `url` and request its listing if needed
    pub fn navigate(&mut self, url: &str) {
        if self.router.navigate(url) {
            self.sync_page();
            self.notify_scroll();
        }
    }

    pub fn back(&mut self) -> bool {
        let moved = self.router.back();
        if moved {
            self.sync_page();
            self.notify_scroll();
        }
        moved
    }

    /// Queue a fetch for the current location unless it is already loaded
    fn sync_page(&mut self) {
        let url = self.router.location().to_string();
        let route = self.router.route();
        let Some(request) = PageRequest::for_location(self.router.location()) else {
            return;
        };
        let page = self.page_mut(route);
        if page.loaded_for.as_deref() == Some(url.as_str()) {
            return;
        }
        page.begin_loading(&url);
        debug!("Queued fetch {:?} for {}", request, url);
        self.outbox.push(FetchRequest { url, route, request });
    }

    /// Force a refetch of the current page
    pub fn reload(&mut self) {
        self.current_page_mut().loaded_for = None;
        self.sync_page();
    }

    /// Fetches queued since the last call
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Apply a finished fetch; results for a location the page has moved on
    /// from are dropped
    pub fn apply_fetch(&mut self, result: FetchResult) {
        let page = self.page_mut(result.route);
        if page.loaded_for.as_deref() != Some(result.url.as_str()) {
            debug!("Dropping stale result for {}", result.url);
            return;
        }
        match result.outcome {
            Ok(items) => {
                info!("Loaded {} items for {}", items.len(), result.url);
                page.set_items(items);
            }
            Err(msg) => {
                warn!("Fetch for {} failed: {}", result.url, msg);
                page.set_error(msg.clone());
                self.set_error(msg);
            }
        }
        self.notify_scroll();
    }

    // -------------------------------------------------------------------------
    // Scroll
    // -------------------------------------------------------------------------

    /// Current page scroll offset in units
    pub fn scroll_offset(&self) -> u32 {
        self.page(self.router.route()).scroll_offset(self.scroll_step)
    }

    /// Tell the header if the scroll offset changed since the last report
    fn notify_scroll(&mut self) {
        let offset = self.scroll_offset();
        if self.last_scroll != Some(offset) {
            self.last_scroll = Some(offset);
            self.header.on_scroll(offset);
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        let consumed = if self.header.is_search_open() {
            self.handle_search_key(key)
        } else {
            self.handle_normal_key(key)
        };
        self.notify_scroll();
        consumed
    }

    /// Keys while the search field is revealed
    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => self.header.close_search(),
            KeyCode::Enter => {
                if let Some(url) = self.header.submit_search() {
                    self.navigate(&url);
                }
            }
            KeyCode::Char(c) => self.header.input.insert(c),
            KeyCode::Backspace => self.header.input.backspace(),
            KeyCode::Delete => self.header.input.delete(),
            KeyCode::Left => self.header.input.cursor_left(),
            KeyCode::Right => self.header.input.cursor_right(),
            KeyCode::Home => self.header.input.cursor_home(),
            KeyCode::End => self.header.input.cursor_end(),
            _ => return false,
        }
        true
    }

    /// Keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('/') => {
                self.header.toggle_search();
            }
            KeyCode::Char('1') => self.navigate(NavTarget::Home.path()),
            KeyCode::Char('2') => self.navigate(NavTarget::Tv.path()),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Esc | KeyCode::Backspace => return self.back(),
            KeyCode::Up | KeyCode::Char('k') => self.current_page_mut().list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.current_page_mut().list.down(),
            KeyCode::PageUp => self.current_page_mut().list.page_up(10),
            KeyCode::PageDown => self.current_page_mut().list.page_down(10),
            KeyCode::Char('g') => self.current_page_mut().list.home(),
            KeyCode::Char('G') => self.current_page_mut().list.end(),
            _ => return false,
        }
        true
    }

    // -------------------------------------------------------------------------
    // Mouse Event Handling
    // -------------------------------------------------------------------------

    /// Handle mouse event: clicks, wheel and hover
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(position),
            MouseEventKind::ScrollDown => self.current_page_mut().list.scroll_by(1),
            MouseEventKind::ScrollUp => self.current_page_mut().list.scroll_by(-1),
            MouseEventKind::Moved => self.header.handle_hover(position),
            _ => {}
        }
        self.notify_scroll();
    }

    /// Element handlers first, then document listeners
    pub fn click(&mut self, position: Position) {
        self.error = None;
        if let Some(HeaderTarget::Link(target)) = self.header.handle_click(position) {
            self.navigate(target.path());
        }
        self.document.dispatch_click(&ClickEvent { position });
    }

    // -------------------------------------------------------------------------
    // Frame
    // -------------------------------------------------------------------------

    pub fn tick(&mut self, dt: Duration) {
        self.header.tick(dt);
    }

    /// Draw header, current page, status bar and any error popup
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(self.palette.style(Role::PageBackground)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.render(frame, chunks[0], &self.router);

        let route = self.router.route();
        let location = self.router.location().clone();
        let palette = self.palette;
        pages::render_page(frame, chunks[1], route, &location, self.page_mut(route), &palette);
        // Rendering may pull the viewport to the selection
        self.notify_scroll();

        self.render_status_bar(frame, chunks[2]);

        if let Some(error) = self.error.clone() {
            self.render_error_popup(frame, area, &error);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let p = &self.palette;
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.router.location()),
                Style::default().fg(p.white.light).bg(p.red),
            ),
            Span::styled(format!(" {:?} ", self.header.mode()), p.style(Role::StatusBar)),
            Span::raw(" │ "),
            Span::styled(" q:quit  /:search  1:home  2:tv  ESC:back ", p.style(Role::StatusBar)),
        ]);
        frame.render_widget(Paragraph::new(line).style(p.style(Role::StatusBar)), area);
    }

    fn render_error_popup(&self, frame: &mut Frame, area: Rect, error: &str) {
        let popup_width = 60.min(area.width.saturating_sub(4));
        let popup_height = 5;
        let popup_area = Rect {
            x: area.x + (area.width.saturating_sub(popup_width)) / 2,
            y: area.y + (area.height.saturating_sub(popup_height)) / 2,
            width: popup_width,
            height: popup_height.min(area.height),
        };

        frame.render_widget(Clear, popup_area);
        let popup = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(error.to_string(), self.palette.style(Role::Error))),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(self.palette.style(Role::Error))
                .title(Span::styled(" ✗ ERROR ", self.palette.style(Role::Error)))
                .style(self.palette.style(Role::PageBackground)),
        );
        frame.render_widget(popup, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;
    use crate::router::search_url;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn items(n: u64) -> Vec<MediaItem> {
        (0..n)
            .map(|i| MediaItem {
                id: i,
                media_type: MediaType::Movie,
                title: format!("Movie {}", i),
                year: None,
                overview: String::new(),
                poster_path: None,
                backdrop_path: None,
                vote_average: 6.0,
            })
            .collect()
    }

    #[test]
    fn test_new_app_mounts_header_and_queues_home() {
        let mut app = App::default();
        assert!(app.header.is_mounted());
        assert_eq!(app.document.listener_count(), 1);
        let requests = app.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].request, PageRequest::NowPlaying);
        assert!(app.home.loading.is_loading());
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_quit_unmounts_header() {
        let mut app = App::default();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.running);
        assert!(!app.header.is_mounted());
        assert_eq!(app.document.listener_count(), 0);
    }

    #[test]
    fn test_number_keys_navigate() {
        let mut app = App::default();
        app.take_requests();
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.router.route(), Route::Tv);
        assert_eq!(app.take_requests()[0].request, PageRequest::PopularTv);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.router.route(), Route::Home);
        // Home already requested, nothing new
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_search_typing_and_submit() {
        let mut app = App::default();
        app.take_requests();
        app.handle_key(key(KeyCode::Char('/')));
        assert!(app.header.is_search_open());

        for c in "alien".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        // 'q' typed into the field, not quitting
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.running);
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.router.location().to_string(), "/search?keyword=alien");
        let requests = app.take_requests();
        assert_eq!(requests[0].request, PageRequest::Search("alien".to_string()));

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.header.is_search_open());
    }

    #[test]
    fn test_stale_fetch_dropped() {
        let mut app = App::default();
        app.take_requests();

        app.navigate(&search_url("dune"));
        let dune = app.take_requests().remove(0);
        app.navigate(&search_url("alien"));
        let alien = app.take_requests().remove(0);

        app.apply_fetch(FetchResult {
            url: dune.url,
            route: dune.route,
            outcome: Ok(items(3)),
        });
        assert!(app.search.list.is_empty());
        assert!(app.search.loading.is_loading());

        app.apply_fetch(FetchResult {
            url: alien.url,
            route: alien.route,
            outcome: Ok(items(2)),
        });
        assert_eq!(app.search.list.len(), 2);
        assert!(!app.search.loading.is_loading());
    }

    #[test]
    fn test_fetch_error_sets_popup() {
        let mut app = App::default();
        let req = app.take_requests().remove(0);
        app.apply_fetch(FetchResult {
            url: req.url,
            route: req.route,
            outcome: Err("Invalid API key (401)".to_string()),
        });
        assert!(app.home.loading.is_error());
        assert_eq!(app.error.as_deref(), Some("Invalid API key (401)"));
        app.handle_key(key(KeyCode::Char('j')));
        assert!(app.error.is_none());
    }

    #[test]
    fn test_scroll_drives_navigation_mode() {
        let mut app = App::default();
        let req = app.take_requests().remove(0);
        app.apply_fetch(FetchResult {
            url: req.url,
            route: req.route,
            outcome: Ok(items(50)),
        });
        app.home.list.viewport = 10;

        let wheel = |kind| MouseEvent {
            kind,
            column: 10,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        for _ in 0..2 {
            app.handle_mouse(wheel(MouseEventKind::ScrollDown));
        }
        assert_eq!(app.scroll_offset(), 200);
        assert_eq!(app.header.mode(), crate::ui::NavigationMode::AtTop);

        app.handle_mouse(wheel(MouseEventKind::ScrollDown));
        assert_eq!(app.scroll_offset(), 300);
        assert_eq!(app.header.mode(), crate::ui::NavigationMode::Scrolled);

        app.handle_mouse(wheel(MouseEventKind::ScrollUp));
        assert_eq!(app.header.mode(), crate::ui::NavigationMode::AtTop);
    }
}
