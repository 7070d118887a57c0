//! Navigation header behaviour
//!
//! Scroll classification, search panel toggling, outside-click closing,
//! listener lifecycle and the active-route marker.

use std::time::Duration;

use ratatui::{backend::TestBackend, layout::Position, layout::Rect, style::Color, Terminal};
use nomflix::events::{ClickEvent, Document};
use nomflix::router::Router;
use nomflix::ui::header::{HeaderTarget, NavTarget, HEADER_HEIGHT};
use nomflix::ui::theme::Palette;
use nomflix::ui::{Header, HeaderConfig, NavigationMode, SearchPanelState};
use nomflix::App;

const WIDTH: u16 = 120;

fn draw(header: &mut Header, router: &Router) {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEADER_HEIGHT)).unwrap();
    terminal
        .draw(|frame| header.render(frame, Rect::new(0, 0, WIDTH, HEADER_HEIGHT), router))
        .unwrap();
}

/// Header opened, animations finished and rendered so the region is known
fn opened_header(document: &mut Document, router: &Router) -> Header {
    let mut header = Header::default();
    header.mount(document);
    header.toggle_search();
    header.tick(Duration::from_secs(1));
    draw(&mut header, router);
    header
}

// =============================================================================
// Scroll
// =============================================================================

#[test]
fn test_threshold_is_exclusive() {
    let mut header = Header::default();
    assert_eq!(header.on_scroll(250), NavigationMode::AtTop);
    assert_eq!(header.on_scroll(251), NavigationMode::Scrolled);
}

#[test]
fn test_scroll_sequence_classification() {
    let mut header = Header::default();
    let modes: Vec<_> = [0, 100, 260, 400, 200]
        .into_iter()
        .map(|offset| header.on_scroll(offset))
        .collect();
    assert_eq!(
        modes,
        vec![
            NavigationMode::AtTop,
            NavigationMode::AtTop,
            NavigationMode::Scrolled,
            NavigationMode::Scrolled,
            NavigationMode::AtTop,
        ]
    );
}

#[test]
fn test_custom_threshold() {
    let config = HeaderConfig {
        scroll_threshold: 80,
        ..HeaderConfig::default()
    };
    let mut header = Header::new(config, Default::default());
    assert_eq!(header.on_scroll(100), NavigationMode::Scrolled);
}

#[test]
fn test_background_fades_in_over_duration() {
    let mut header = Header::default();
    assert_eq!(header.background_opacity(), 0.0);
    header.on_scroll(300);
    header.tick(Duration::from_millis(100));
    assert!(header.is_animating());
    header.tick(Duration::from_millis(250));
    assert_eq!(header.background_opacity(), 1.0);
    assert!(!header.is_animating());
}

// =============================================================================
// Search panel
// =============================================================================

#[test]
fn test_toggle_twice_returns_to_closed() {
    let mut header = Header::default();
    assert_eq!(header.search_state(), SearchPanelState::Closed);
    assert_eq!(header.toggle_search(), SearchPanelState::Open);
    assert_eq!(header.toggle_search(), SearchPanelState::Closed);
}

#[test]
fn test_outside_click_closes() {
    let mut document = Document::new();
    let router = Router::default();
    let mut header = opened_header(&mut document, &router);

    document.dispatch_click(&ClickEvent::new(1, 1));
    assert_eq!(header.search_state(), SearchPanelState::Closed);

    // Further outside clicks keep it closed
    document.dispatch_click(&ClickEvent::new(1, 1));
    assert!(!header.is_search_open());
    header.unmount(&mut document);
}

#[test]
fn test_click_inside_input_keeps_open() {
    let mut document = Document::new();
    let router = Router::default();
    let mut header = opened_header(&mut document, &router);

    let input = header.layout().unwrap().input;
    assert!(input.width > 0);
    let inside = Position::new(input.x + input.width / 2, input.y + 1);
    assert_eq!(header.handle_click(inside), Some(HeaderTarget::SearchInput));
    document.dispatch_click(&ClickEvent { position: inside });

    assert!(header.is_search_open());
    header.unmount(&mut document);
}

#[test]
fn test_icon_click_toggles_without_listener_interference() {
    let mut document = Document::new();
    let router = Router::default();
    let mut header = opened_header(&mut document, &router);

    let icon = header.layout().unwrap().icon;
    let on_icon = Position::new(icon.x, icon.y);
    header.handle_click(on_icon);
    document.dispatch_click(&ClickEvent { position: on_icon });
    assert!(!header.is_search_open());

    // Closed again: the icon sits back at the right edge
    header.tick(Duration::from_secs(1));
    draw(&mut header, &router);
    let icon = header.layout().unwrap().icon;
    let on_icon = Position::new(icon.x, icon.y);
    header.handle_click(on_icon);
    document.dispatch_click(&ClickEvent { position: on_icon });
    assert!(header.is_search_open());
    header.unmount(&mut document);
}

#[test]
fn test_unmount_deregisters_listener() {
    let mut document = Document::new();
    let router = Router::default();
    let mut header = opened_header(&mut document, &router);
    assert_eq!(document.listener_count(), 1);

    header.unmount(&mut document);
    assert!(!header.is_mounted());
    assert_eq!(document.listener_count(), 0);

    document.dispatch_click(&ClickEvent::new(1, 1));
    assert!(header.is_search_open());
}

#[test]
fn test_mount_is_idempotent() {
    let mut document = Document::new();
    let mut header = Header::default();
    header.mount(&mut document);
    header.mount(&mut document);
    assert_eq!(document.listener_count(), 1);
    header.unmount(&mut document);
    header.unmount(&mut document);
    assert_eq!(document.listener_count(), 0);
}

#[test]
fn test_submit_builds_search_url() {
    let mut header = Header::default();
    assert_eq!(header.submit_search(), None);
    header.input.set("  blade runner ");
    assert_eq!(
        header.submit_search().as_deref(),
        Some("/search?keyword=blade%20runner")
    );
}

// =============================================================================
// Active route
// =============================================================================

#[test]
fn test_active_link_per_route() {
    let cases = [
        ("/", true, false),
        ("/tv", false, true),
        ("/tv/detail/42", false, true),
        ("/search?keyword=dune", false, false),
        ("/tvshows", false, false),
    ];
    for (url, home, tv) in cases {
        let router = Router::new(url);
        assert_eq!(NavTarget::Home.is_active(&router), home, "home at {}", url);
        assert_eq!(NavTarget::Tv.is_active(&router), tv, "tv at {}", url);
    }
}

#[test]
fn test_marker_glides_between_links() {
    let mut header = Header::default();
    let mut router = Router::default();
    draw(&mut header, &router);

    let links = header.layout().unwrap().links;
    let center = |r: Rect| r.x as f32 + (r.width / 2) as f32;
    let home_x = center(links[0]);
    let tv_x = center(links[1]);
    assert_eq!(header.marker_x(), Some(home_x));

    router.navigate("/tv");
    draw(&mut header, &router);
    // Starts from where it was
    assert_eq!(header.marker_x(), Some(home_x));

    header.tick(Duration::from_millis(150));
    let mid = header.marker_x().unwrap();
    assert!(mid > home_x && mid < tv_x);

    header.tick(Duration::from_secs(1));
    assert_eq!(header.marker_x(), Some(tv_x));
}

#[test]
fn test_marker_hidden_on_search() {
    let mut header = Header::default();
    draw(&mut header, &Router::default());
    assert!(header.marker_x().is_some());

    draw(&mut header, &Router::new("/search?keyword=dune"));
    assert!(header.marker_x().is_none());
}

// =============================================================================
// Hover
// =============================================================================

fn grey_level(color: Color) -> u8 {
    match color {
        Color::Rgb(r, g, b) => {
            assert!(r == g && g == b, "link tones are greys: {:?}", color);
            g
        }
        other => panic!("expected RGB, got {:?}", other),
    }
}

#[test]
fn test_link_hover_eases_to_lighter_tone() {
    let palette = Palette::NOMFLIX;
    let mut header = Header::default();
    let router = Router::default();
    draw(&mut header, &router);
    assert_eq!(header.link_color(NavTarget::Tv), palette.white.darker);

    let tv = header.layout().unwrap().links[1];
    header.handle_hover(Position::new(tv.x + 1, tv.y));
    assert!(header.is_animating());

    let idle = grey_level(palette.white.darker) as u16;
    let hovered = grey_level(palette.white.lighter) as u16;
    header.tick(Duration::from_millis(200));
    let mid = grey_level(header.link_color(NavTarget::Tv)) as u16;
    assert!(mid > (idle + hovered) / 2 && mid < hovered, "mid-hover {}", mid);
    // The other link stays idle
    assert_eq!(header.link_color(NavTarget::Home), palette.white.darker);

    header.tick(Duration::from_secs(1));
    assert_eq!(header.link_color(NavTarget::Tv), palette.white.lighter);
    assert!(!header.is_animating());

    // Leaving fades back
    header.handle_hover(Position::new(0, 0));
    header.tick(Duration::from_secs(1));
    assert_eq!(header.link_color(NavTarget::Tv), palette.white.darker);
}

#[test]
fn test_logo_flickers_then_settles_red() {
    let palette = Palette::NOMFLIX;
    let mut header = Header::default();
    draw(&mut header, &Router::default());
    assert_eq!(header.logo_color(), palette.red);
    assert!(!header.is_animating());

    let logo = header.layout().unwrap().logo;
    header.handle_hover(Position::new(logo.x + 1, logo.y));
    assert!(header.is_animating());

    header.tick(Duration::from_millis(300));
    assert!(header.is_animating());
    header.tick(Duration::from_millis(400));
    assert!(!header.is_animating());
    assert_eq!(header.logo_color(), palette.red);

    // Staying on the logo does not replay it
    header.handle_hover(Position::new(logo.x + 2, logo.y));
    assert!(!header.is_animating());
}

// =============================================================================
// Through the app
// =============================================================================

#[test]
fn test_app_click_outside_closes_after_render() {
    let mut app = App::default();
    app.header.toggle_search();

    // No region yet: the listener ignores the click
    app.click(Position::new(0, 10));
    assert!(app.header.is_search_open());

    let mut terminal = Terminal::new(TestBackend::new(WIDTH, 30)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();

    app.click(Position::new(0, 10));
    assert!(!app.header.is_search_open());
}

#[test]
fn test_app_link_click_navigates() {
    let mut app = App::default();
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, 30)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();

    let tv = app.header.layout().unwrap().links[1];
    app.click(Position::new(tv.x, tv.y));
    assert_eq!(app.router.location().path, "/tv");
}
