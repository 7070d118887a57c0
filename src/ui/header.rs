//! Navigation header
//!
//! Fixed three-row bar at the top of every page:
//!
//! ```text
//!     NETFLIX    Home   Tv Shows                    ┌──────────────────────┐
//!                 ●                                 │ ⌕ Search for movie o │
//!                                                   └──────────────────────┘
//! ```
//!
//! It owns two independent state machines. [`NavigationMode`] follows the
//! page's scroll offset and drives the bar's background fill.
//! [`SearchPanelState`] is toggled by the search icon and forced closed by
//! any click outside the search region; that second path runs through a
//! document-level listener that lives exactly as long as the header is
//! mounted.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::events::{Document, ListenerId};
use crate::router::{self, Router};
use crate::ui::motion::{Easing, Keyframes, SharedLayout, Tween};
use crate::ui::search::SearchInput;
use crate::ui::theme::{blend, Palette, Role};

pub const HEADER_HEIGHT: u16 = 3;
pub const SEARCH_PLACEHOLDER: &str = "Search for movie or tv show...";
pub const SEARCH_ICON: &str = "⌕";
pub const LOGO_TEXT: &str = "NETFLIX";
pub const MARKER: &str = "●";

/// Layout id of the active-route marker, shared by both links
pub const MARKER_LAYOUT_ID: &str = "circle";

const PAD_X: u16 = 4;
const LOGO_MARGIN: u16 = 4;
const LINK_GAP: u16 = 3;
const INPUT_WIDTH: u16 = 34;

// =============================================================================
// Configuration
// =============================================================================

/// Presentation tuning for the header
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderConfig {
    /// Offsets strictly above this count as scrolled
    pub scroll_threshold: u32,
    pub background_duration: Duration,
    pub search_duration: Duration,
    pub marker_duration: Duration,
    pub link_hover_duration: Duration,
    pub logo_flicker_duration: Duration,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 250,
            background_duration: Duration::from_millis(300),
            search_duration: Duration::from_millis(300),
            marker_duration: Duration::from_millis(300),
            link_hover_duration: Duration::from_millis(300),
            logo_flicker_duration: Duration::from_millis(600),
        }
    }
}

// =============================================================================
// State Machines
// =============================================================================

/// Scroll classification of the page under the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
    #[default]
    AtTop,
    Scrolled,
}

impl NavigationMode {
    pub fn from_offset(offset: u32, threshold: u32) -> Self {
        if offset > threshold {
            NavigationMode::Scrolled
        } else {
            NavigationMode::AtTop
        }
    }

    /// Background fill opacity this mode animates toward
    pub fn background_opacity(&self) -> f32 {
        match self {
            NavigationMode::AtTop => 0.0,
            NavigationMode::Scrolled => 1.0,
        }
    }
}

/// Whether the search field is revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPanelState {
    #[default]
    Closed,
    Open,
}

impl SearchPanelState {
    pub fn is_open(&self) -> bool {
        matches!(self, SearchPanelState::Open)
    }

    pub fn toggled(&self) -> Self {
        match self {
            SearchPanelState::Closed => SearchPanelState::Open,
            SearchPanelState::Open => SearchPanelState::Closed,
        }
    }

    fn progress(&self) -> f32 {
        if self.is_open() {
            1.0
        } else {
            0.0
        }
    }
}

/// Panel state plus the screen area it occupies, shared with the
/// outside-click listener
#[derive(Debug, Default)]
struct SearchRegion {
    state: SearchPanelState,
    /// None until the first render places the region on screen
    area: Option<Rect>,
}

// =============================================================================
// Targets
// =============================================================================

/// Fixed navigation links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavTarget {
    Home,
    Tv,
}

impl NavTarget {
    pub const ALL: [NavTarget; 2] = [NavTarget::Home, NavTarget::Tv];

    pub fn path(&self) -> &'static str {
        match self {
            NavTarget::Home => "/",
            NavTarget::Tv => "/tv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NavTarget::Home => "Home",
            NavTarget::Tv => "Tv Shows",
        }
    }

    fn index(&self) -> usize {
        match self {
            NavTarget::Home => 0,
            NavTarget::Tv => 1,
        }
    }

    /// Home needs an exact match; Tv also covers its sub-paths
    pub fn is_active(&self, router: &Router) -> bool {
        match router.route_match(self.path()) {
            Some(m) => match self {
                NavTarget::Home => m.is_exact,
                NavTarget::Tv => true,
            },
            None => false,
        }
    }
}

/// Clickable parts of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTarget {
    Logo,
    Link(NavTarget),
    SearchIcon,
    SearchInput,
}

/// Screen rectangles from the last render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderLayout {
    pub bar: Rect,
    pub logo: Rect,
    pub links: [Rect; 2],
    pub icon: Rect,
    /// Revealed part of the input; zero-width while closed
    pub input: Rect,
}

// =============================================================================
// Header
// =============================================================================

pub struct Header {
    config: HeaderConfig,
    palette: Palette,

    mode: NavigationMode,
    background: Tween,

    panel: Rc<RefCell<SearchRegion>>,
    /// Panel state the reveal animations were last retargeted for
    animated_state: SearchPanelState,
    icon_shift: Tween,
    input_reveal: Tween,
    pub input: SearchInput,

    marker: SharedLayout,
    link_hover: [Tween; 2],
    hovered: Option<HeaderTarget>,
    logo: Keyframes,

    listener: Option<ListenerId>,
    layout: Option<HeaderLayout>,
}

impl std::fmt::Debug for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Header")
            .field("mode", &self.mode)
            .field("search", &self.search_state())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(HeaderConfig::default(), Palette::default())
    }
}

impl Header {
    pub fn new(config: HeaderConfig, palette: Palette) -> Self {
        let hover = || Tween::new(0.0, config.link_hover_duration, Easing::EaseInOut);
        Self {
            mode: NavigationMode::AtTop,
            background: Tween::new(0.0, config.background_duration, Easing::EaseOut),
            panel: Rc::new(RefCell::new(SearchRegion::default())),
            animated_state: SearchPanelState::Closed,
            icon_shift: Tween::new(0.0, config.search_duration, Easing::Linear),
            input_reveal: Tween::new(0.0, config.search_duration, Easing::Linear),
            input: SearchInput::new(),
            marker: SharedLayout::new(config.marker_duration, Easing::EaseInOut),
            link_hover: [hover(), hover()],
            hovered: None,
            logo: Keyframes::new(vec![0.0, 1.0, 0.0, 1.0], config.logo_flicker_duration),
            listener: None,
            layout: None,
            config,
            palette,
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Register the outside-click listener. Mounting twice is a no-op.
    pub fn mount(&mut self, document: &mut Document) {
        if self.listener.is_some() {
            return;
        }
        let panel = Rc::clone(&self.panel);
        let id = document.subscribe(move |event| {
            let mut region = panel.borrow_mut();
            let Some(area) = region.area else {
                return;
            };
            if !area.contains(event.position) && region.state.is_open() {
                debug!("Search panel closed by outside click at {:?}", event.position);
                region.state = SearchPanelState::Closed;
            }
        });
        info!("Header mounted");
        self.listener = Some(id);
    }

    /// Remove the outside-click listener
    pub fn unmount(&mut self, document: &mut Document) {
        if let Some(id) = self.listener.take() {
            document.unsubscribe(id);
            info!("Header unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    // -------------------------------------------------------------------------
    // Scroll
    // -------------------------------------------------------------------------

    /// Scroll notification from the page
    pub fn on_scroll(&mut self, offset: u32) -> NavigationMode {
        let mode = NavigationMode::from_offset(offset, self.config.scroll_threshold);
        if mode != self.mode {
            debug!("Navigation mode {:?} -> {:?} at offset {}", self.mode, mode, offset);
            self.mode = mode;
        }
        self.background.start(mode.background_opacity());
        mode
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// Current (possibly mid-animation) background fill opacity
    pub fn background_opacity(&self) -> f32 {
        self.background.value()
    }

    /// Bar fill: page black at the top, the lighter black tone once scrolled
    pub fn background_color(&self) -> Color {
        blend(
            self.palette.black.black,
            self.palette.black.light,
            self.background.value(),
        )
    }

    /// Link text colour, between idle and hovered tones
    pub fn link_color(&self, target: NavTarget) -> Color {
        blend(
            self.palette.fg(Role::NavLink),
            self.palette.fg(Role::NavLinkHover),
            self.link_hover[target.index()].value(),
        )
    }

    /// Brand mark colour; flickers against the bar fill while playing
    pub fn logo_color(&self) -> Color {
        blend(self.background_color(), self.palette.red, self.logo.value())
    }

    // -------------------------------------------------------------------------
    // Search panel
    // -------------------------------------------------------------------------

    pub fn search_state(&self) -> SearchPanelState {
        self.panel.borrow().state
    }

    pub fn is_search_open(&self) -> bool {
        self.search_state().is_open()
    }

    /// Icon click
    pub fn toggle_search(&mut self) -> SearchPanelState {
        let next = {
            let mut region = self.panel.borrow_mut();
            region.state = region.state.toggled();
            region.state
        };
        debug!("Search panel toggled to {:?}", next);
        self.sync_search_animation();
        next
    }

    pub fn close_search(&mut self) {
        self.panel.borrow_mut().state = SearchPanelState::Closed;
        self.sync_search_animation();
    }

    /// Area the outside-click test uses; None before the first render
    pub fn search_region(&self) -> Option<Rect> {
        self.panel.borrow().area
    }

    /// Search page URL for the typed query, if any
    pub fn submit_search(&self) -> Option<String> {
        self.input.submission().map(router::search_url)
    }

    /// Retarget the reveal animations if the panel changed underneath us
    fn sync_search_animation(&mut self) {
        let state = self.search_state();
        if state != self.animated_state {
            self.animated_state = state;
            self.icon_shift.start(state.progress());
            self.input_reveal.start(state.progress());
        }
    }

    pub fn input_reveal(&self) -> f32 {
        self.input_reveal.value()
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// Hit-test against the last rendered layout
    pub fn hit(&self, position: Position) -> Option<HeaderTarget> {
        let layout = self.layout.as_ref()?;
        if layout.icon.contains(position) {
            return Some(HeaderTarget::SearchIcon);
        }
        if layout.input.contains(position) {
            return Some(HeaderTarget::SearchInput);
        }
        if layout.logo.contains(position) {
            return Some(HeaderTarget::Logo);
        }
        NavTarget::ALL
            .into_iter()
            .find(|t| layout.links[t.index()].contains(position))
            .map(HeaderTarget::Link)
    }

    /// Element-level click handling; document listeners run afterwards
    pub fn handle_click(&mut self, position: Position) -> Option<HeaderTarget> {
        let target = self.hit(position);
        if target == Some(HeaderTarget::SearchIcon) {
            self.toggle_search();
        }
        target
    }

    /// Pointer movement: link hover colours and logo flicker
    pub fn handle_hover(&mut self, position: Position) {
        let target = self.hit(position);
        if target == self.hovered {
            return;
        }
        if target == Some(HeaderTarget::Logo) {
            self.logo.play();
        }
        for link in NavTarget::ALL {
            let hovered = target == Some(HeaderTarget::Link(link));
            self.link_hover[link.index()].start(if hovered { 1.0 } else { 0.0 });
        }
        self.hovered = target;
    }

    pub fn layout(&self) -> Option<&HeaderLayout> {
        self.layout.as_ref()
    }

    /// Current x of the shared active-route marker, if one is placed
    pub fn marker_x(&self) -> Option<f32> {
        self.marker.get(MARKER_LAYOUT_ID).map(|t| t.value())
    }

    // -------------------------------------------------------------------------
    // Frame
    // -------------------------------------------------------------------------

    /// Advance all animations by one frame
    pub fn tick(&mut self, dt: Duration) {
        self.sync_search_animation();
        self.background.tick(dt);
        self.icon_shift.tick(dt);
        self.input_reveal.tick(dt);
        self.marker.tick(dt);
        for tween in self.link_hover.iter_mut() {
            tween.tick(dt);
        }
        self.logo.tick(dt);
    }

    pub fn is_animating(&self) -> bool {
        !self.background.is_settled()
            || !self.icon_shift.is_settled()
            || !self.input_reveal.is_settled()
            || self.logo.is_playing()
            || self.link_hover.iter().any(|t| !t.is_settled())
            || self
                .marker
                .get(MARKER_LAYOUT_ID)
                .is_some_and(|t| !t.is_settled())
    }

    fn compute_layout(&self, area: Rect) -> HeaderLayout {
        let row = area.y + 1;
        let clip = |r: Rect| r.intersection(area);

        let logo_width = LOGO_TEXT.chars().count() as u16;
        let logo = Rect::new(area.x + PAD_X, row, logo_width, 1);

        let mut x = logo.right() + LOGO_MARGIN;
        let mut links = [Rect::default(); 2];
        for target in NavTarget::ALL {
            let width = target.label().chars().count() as u16;
            links[target.index()] = clip(Rect::new(x, row, width, 1));
            x += width + LINK_GAP;
        }

        let right = area.right().saturating_sub(PAD_X);
        let input_left = right.saturating_sub(INPUT_WIDTH);
        let revealed = (self.input_reveal.value() * INPUT_WIDTH as f32).round() as u16;
        let input = Rect::new(right.saturating_sub(revealed), area.y, revealed, HEADER_HEIGHT);

        let icon_home = right.saturating_sub(1);
        let icon_open = input_left + 2;
        let shift = (self.icon_shift.value() * icon_home.saturating_sub(icon_open) as f32).round() as u16;
        let icon = Rect::new(icon_home.saturating_sub(shift), row, 1, 1);

        HeaderLayout {
            bar: area,
            logo: clip(logo),
            links,
            icon: clip(icon),
            input: clip(input),
        }
    }

    /// Draw the header into `area` and record its layout and search region
    pub fn render(&mut self, frame: &mut Frame, area: Rect, router: &Router) {
        self.sync_search_animation();
        let layout = self.compute_layout(area);
        let palette = self.palette;
        let bg = self.background_color();

        frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

        // Brand mark
        frame.render_widget(
            Paragraph::new(Span::styled(LOGO_TEXT, palette.style(Role::Logo).fg(self.logo_color()))),
            layout.logo,
        );

        // Links, plus the shared marker under the active one
        let mut active_x = None;
        for target in NavTarget::ALL {
            let rect = layout.links[target.index()];
            frame.render_widget(
                Paragraph::new(Span::styled(target.label(), Style::default().fg(self.link_color(target)))),
                rect,
            );
            if target.is_active(router) {
                active_x = Some(rect.x as f32 + (rect.width / 2) as f32);
            }
        }
        match active_x {
            Some(x) => {
                let x = self.marker.place(MARKER_LAYOUT_ID, x).value().round() as u16;
                let marker = Rect::new(x, area.y + 2, 1, 1).intersection(area);
                frame.render_widget(
                    Paragraph::new(Span::styled(MARKER, palette.style(Role::ActiveMarker))),
                    marker,
                );
            }
            None => self.marker.remove(MARKER_LAYOUT_ID),
        }

        // Search field sits behind the icon
        if layout.input.width >= 2 {
            let open = self.is_search_open();
            let settled = self.input_reveal.is_settled();
            let line = if self.input.query.is_empty() && !(open && settled) {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(SEARCH_PLACEHOLDER, palette.style(Role::SearchPlaceholder)),
                ])
            } else if open && settled {
                let (before, after) = self.input.split_at_cursor();
                let mut spans = vec![Span::raw("  "), Span::raw(before.to_string())];
                spans.push(Span::styled("│", palette.style(Role::Keybind)));
                spans.push(Span::raw(after.to_string()));
                if self.input.query.is_empty() {
                    spans.push(Span::styled(SEARCH_PLACEHOLDER, palette.style(Role::SearchPlaceholder)));
                }
                Line::from(spans)
            } else {
                Line::from(vec![Span::raw("  "), Span::raw(self.input.query.clone())])
            };
            let field = Paragraph::new(line).style(palette.style(Role::SearchInput)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Plain)
                    .border_style(palette.style(Role::SearchInputBorder))
                    .style(palette.style(Role::SearchInput)),
            );
            frame.render_widget(field, layout.input);
        }

        frame.render_widget(
            Paragraph::new(Span::styled(SEARCH_ICON, palette.style(Role::SearchIcon))),
            layout.icon,
        );

        let region = if layout.input.width > 0 {
            layout.icon.union(layout.input)
        } else {
            layout.icon
        };
        self.panel.borrow_mut().area = Some(region);
        self.layout = Some(layout);
    }
}
