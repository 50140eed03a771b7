use std::rc::Rc;

use coursemate_landing::surface::BODY;
use coursemate_landing::{
    CarouselState, CountdownState, Direction, LandingConfig, LandingPage, ManualScheduler,
    MemorySurface, RecordingSink,
};
use proptest::prelude::*;

struct Harness {
    page: LandingPage,
    surface: Rc<MemorySurface>,
    clock: ManualScheduler,
    sink: Rc<RecordingSink>,
}

fn harness() -> Harness {
    let config = LandingConfig::default();
    let surface = MemorySurface::with_targets([BODY, "countdown-timer", "features-wrapper"]);
    for i in 0..config.carousel.item_count {
        surface.insert(config.carousel.card_id(i));
        surface.insert(config.carousel.dot_id(i));
    }
    for section in &config.focus.sections {
        surface.insert(section.clone());
    }
    for modal in &config.modal.modals {
        surface.insert_with_marker(config.modal.container_id(modal), "hidden");
    }
    surface.insert_with_marker("mobile-menu", "hidden");
    surface.insert("mobile-menu-button");

    let surface = Rc::new(surface);
    let clock = ManualScheduler::new();
    let sink = Rc::new(RecordingSink::new());
    let page = LandingPage::new(config, surface.clone(), Rc::new(clock.clone()), sink.clone());
    page.start();
    Harness {
        page,
        surface,
        clock,
        sink,
    }
}

fn scroll_locked(surface: &MemorySurface) -> bool {
    surface.style(BODY, "overflow").as_deref() == Some("hidden")
}

#[test]
fn countdown_and_carousel_run_independently() {
    let h = harness();
    h.clock.advance(3_000);
    assert_eq!(h.page.time_left().render(), "23:59:56");
    assert_eq!(h.page.current_feature(), 1);
    assert_eq!(h.surface.text("countdown-timer").as_deref(), Some("23:59:56"));
}

#[test]
fn missing_countdown_display_does_not_affect_other_controllers() {
    let h = harness();
    h.surface.remove("countdown-timer");
    h.clock.advance(3_000);
    assert_eq!(h.page.current_feature(), 1);
    h.page.show_modal("demo");
    assert_eq!(h.page.open_modal().as_deref(), Some("demo"));
}

#[test]
fn dot_click_resets_auto_advance() {
    let h = harness();
    h.clock.advance(2_500);
    h.page.set_feature(4).unwrap();
    assert_eq!(
        h.surface.style("features-wrapper", "transform").as_deref(),
        Some("translateX(-1248px)")
    );
    h.clock.advance(2_999);
    assert_eq!(h.page.current_feature(), 4);
    h.clock.advance(1);
    assert_eq!(h.page.current_feature(), 5);
}

#[test]
fn section_focus_emits_one_view_per_transition() {
    let h = harness();
    h.page.section_visible("hero");
    h.sink.clear();
    h.page.section_visible("pricing");

    let views = h.sink.named("section_view");
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].property("section"), Some("pricing"));
    assert!(!h.surface.has_marker("hero", "focused"));
    assert!(h.surface.has_marker("pricing", "focused"));
    assert_eq!(h.page.focused_section().as_deref(), Some("pricing"));
}

#[test]
fn escape_closes_modals_and_ignores_other_keys() {
    let h = harness();
    h.page.key_pressed("Escape");
    assert_eq!(h.page.open_modal(), None);

    h.page.show_modal("login");
    h.page.key_pressed("Enter");
    assert_eq!(h.page.open_modal().as_deref(), Some("login"));
    h.page.key_pressed("Escape");
    assert_eq!(h.page.open_modal(), None);
    assert!(!scroll_locked(&h.surface));
}

#[test]
fn overlay_click_closes_its_modal() {
    let h = harness();
    h.page.watch_demo();
    assert!(scroll_locked(&h.surface));
    h.page.overlay_clicked("demo-modal");
    assert_eq!(h.page.open_modal(), None);
    assert!(!scroll_locked(&h.surface));
    assert_eq!(h.sink.named("demo_requested").len(), 1);
}

#[test]
fn claiming_the_offer_opens_signup() {
    let h = harness();
    h.page.claim_offer();
    assert_eq!(h.page.open_modal().as_deref(), Some("signup"));
    assert_eq!(h.sink.named("offer_claimed").len(), 1);

    let message = h.page.submit_signup("Ada", "ada@example.com");
    assert!(message.starts_with("🎉 Welcome to CourseMate, Ada!"));
    assert!(message.contains("ada@example.com"));
    assert_eq!(h.page.open_modal(), None);

    let attempts = h.sink.named("signup_attempt");
    assert_eq!(attempts.len(), 1);
    assert!(attempts[0].properties.get("password").is_none());
}

#[test]
fn login_submission_closes_the_modal() {
    let h = harness();
    h.page.show_modal("login");
    let message = h.page.submit_login("sam@example.com");
    assert_eq!(message, "Welcome back! Login attempt for: sam@example.com");
    assert_eq!(h.page.open_modal(), None);
    assert_eq!(h.sink.named("login_attempt")[0].property("email"), Some("sam@example.com"));
}

#[test]
fn navigation_closes_the_mobile_menu() {
    let h = harness();
    h.page.toggle_mobile_menu();
    assert!(h.page.is_mobile_menu_open());
    h.page.scroll_to_section("pricing");
    assert!(!h.page.is_mobile_menu_open());
    assert_eq!(h.surface.target("pricing").unwrap().scroll_requests, 1);
    assert!(h.surface.has_marker("mobile-menu", "hidden"));
}

#[test]
fn click_tracking_and_error_reporting() {
    let h = harness();
    h.page.track_button_click("Claim 50% off", Some("hero"));
    h.page.report_error(None, "app.wasm", 12);

    let click = &h.sink.named("button_click")[0];
    assert_eq!(click.property("button_text"), Some("Claim 50% off"));
    assert_eq!(click.property("section"), Some("hero"));

    let error = &h.sink.named("javascript_error")[0];
    assert_eq!(error.property("message"), Some("Unknown error"));
    assert_eq!(error.properties.get("lineno"), Some(&serde_json::Value::from(12)));
}

#[test]
fn teardown_cancels_every_timer() {
    let h = harness();
    h.page.show_modal("signup");
    assert!(h.page.is_running());
    h.page.teardown();
    assert!(!h.page.is_running());
    assert_eq!(h.clock.pending(), 0);

    let before = h.page.time_left();
    h.clock.advance(60_000);
    assert_eq!(h.page.time_left(), before);
    assert_eq!(h.page.current_feature(), 0);
}

#[test]
fn dropping_the_page_cancels_its_timers() {
    let h = harness();
    let clock = h.clock.clone();
    drop(h);
    assert_eq!(clock.pending(), 0);
    clock.advance(10_000);
}

proptest! {
    #[test]
    fn carousel_index_stays_in_range(
        count in 1usize..12,
        steps in prop::collection::vec(any::<bool>(), 0..64),
    ) {
        let mut state = CarouselState::new(count);
        for forward in steps {
            state.step(if forward { Direction::Next } else { Direction::Previous });
            prop_assert!(state.current_index() < count);
        }
        let start = state.current_index();
        for _ in 0..count {
            state.step(Direction::Next);
        }
        prop_assert_eq!(state.current_index(), start);
    }

    #[test]
    fn countdown_fields_stay_bounded(total in 0u32..86_400, ticks in 0usize..5_000) {
        let mut state = CountdownState::from_total_seconds(total).unwrap();
        for _ in 0..ticks {
            state = state.ticked(CountdownState::FULL);
            prop_assert!(state.hours <= 23 && state.minutes <= 59 && state.seconds <= 59);
        }
    }
}
