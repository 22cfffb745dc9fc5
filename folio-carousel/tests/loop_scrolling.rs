//! Free scrolling across copy boundaries.

use folio_carousel::carousel::{CarouselEvent, JumpReason};
use folio_carousel::{CarouselPhase, ViewportSampler};
use proptest::prelude::*;

#[path = "support/mod.rs"]
mod support;

use support::{
    PITCH, assert_seamless, loop_jumps, record_transitions, set_width, settled, settled_on,
};

#[test]
fn forward_scroll_loops_and_steps_one_item_at_a_time() {
    let n = 6;
    let mut sim = settled(n);
    let seen = record_transitions(&mut sim);

    // Further than the whole buffer could hold without relocating.
    sim.drag(4.0 * set_width(n) + 500.0, 10.0, 16);

    let events = sim.carousel_mut().drain_events();
    assert!(
        !loop_jumps(&events, JumpReason::Boundary).is_empty(),
        "expected at least one boundary loop-jump"
    );

    let seen = seen.borrow();
    assert!(seen.len() > n, "active index should cycle through every item");
    let mut prev = 0;
    for &next in seen.iter() {
        assert_eq!(next, (prev + 1) % n, "skipped from {prev} to {next}");
        prev = next;
    }
    let max = sim.strip().max_scroll_offset();
    assert!((0.0..=max).contains(&sim.offset()));
}

#[test]
fn backward_scroll_loops_and_steps_one_item_at_a_time() {
    let n = 6;
    let mut sim = settled(n);
    let seen = record_transitions(&mut sim);

    sim.drag(-(4.0 * set_width(n)), 10.0, 16);

    let events = sim.carousel_mut().drain_events();
    let jumps = loop_jumps(&events, JumpReason::Boundary);
    assert!(!jumps.is_empty());
    assert!(jumps.iter().all(|(from, to)| to > from));

    let seen = seen.borrow();
    let mut prev = 0;
    for &next in seen.iter() {
        assert_eq!(next, (prev + n - 1) % n, "skipped from {prev} to {next}");
        prev = next;
    }
}

#[test]
fn loop_jump_keeps_the_active_item_in_place() {
    let n = 6;
    let mut sim = settled(n);

    // Stop just short of the forward trigger (4.3 sets = 8359.2px).
    sim.drag(4460.0, 10.0, 16);
    assert_eq!(sim.offset(), 8348.0);
    assert_eq!(sim.carousel().active_index(), Some(2));
    assert!(
        loop_jumps(&sim.carousel_mut().drain_events(), JumpReason::Boundary)
            .is_empty()
    );

    let seen = record_transitions(&mut sim);
    sim.user_scroll_by(20.0);
    sim.advance_ms(100);

    let events = sim.carousel_mut().drain_events();
    let jumps = loop_jumps(&events, JumpReason::Boundary);
    assert_eq!(jumps, vec![(8368.0, set_width(n) + 592.0)]);
    assert_eq!(sim.carousel().active_index(), Some(2));
    assert_eq!(sim.leading_logical(), Some(2));
    assert!(seen.borrow().is_empty(), "loop-jump must not report a change");
}

// Two cards on a 2000px viewport: five copies would leave the home copy
// partly out of reach, so the buffer widens to nine.
const WIDE_VIEWPORT: f32 = 2000.0;

#[test]
fn wide_viewport_places_on_the_home_copy() {
    let sim = settled_on(2, WIDE_VIEWPORT);
    assert_eq!(sim.carousel().buffer().copies(), 9);
    assert_eq!(sim.offset(), 8.0 * PITCH);
    assert_eq!(sim.leading_logical(), Some(0));
}

#[test]
fn wide_viewport_forward_scroll_loops_seamlessly() {
    let n = 2;
    let mut sim = settled_on(n, WIDE_VIEWPORT);
    let seen = record_transitions(&mut sim);

    sim.drag(5.0 * set_width(n), 10.0, 16);

    let events = sim.carousel_mut().drain_events();
    let jumps = loop_jumps(&events, JumpReason::Boundary);
    assert!(!jumps.is_empty(), "forward free-scroll must loop");
    assert!(jumps.iter().all(|(from, to)| to < from));
    let max = sim.strip().max_scroll_offset();
    assert_seamless(&jumps, set_width(n), max);

    let mut prev = 0;
    for &next in seen.borrow().iter() {
        assert_eq!(next, (prev + 1) % n, "skipped from {prev} to {next}");
        prev = next;
    }
}

#[test]
fn wide_viewport_backward_jump_keeps_the_leading_item() {
    let n = 2;
    let mut sim = settled_on(n, WIDE_VIEWPORT);

    // 2592 - 2140 = 452px, just past the backward trigger at 453.6px.
    sim.drag(-2140.0, 10.0, 16);
    let before = sim.leading_logical();
    sim.advance_ms(100);

    let events = sim.carousel_mut().drain_events();
    let jumps = loop_jumps(&events, JumpReason::Boundary);
    assert_eq!(jumps, vec![(452.0, 5.0 * set_width(n) + 452.0)]);
    assert_eq!(sim.leading_logical(), before);
    assert_eq!(sim.carousel().active_index(), before);
}

#[test]
fn jump_is_suppressed_until_cooldown_ends() {
    let mut sim = settled(6);
    sim.drag(4480.0, 10.0, 16);
    assert!(matches!(sim.carousel().phase(), CarouselPhase::Jumping { .. }));

    // Scroll events inside the cooldown only update bookkeeping.
    sim.carousel_mut().on_scroll(100.0);
    assert!(sim.carousel().is_suppressed());

    sim.advance_ms(60);
    assert!(!sim.carousel().is_suppressed());
    let boundary = loop_jumps(&sim.carousel_mut().drain_events(), JumpReason::Boundary);
    assert_eq!(boundary.len(), 1);
}

#[test]
fn resting_in_an_outermost_copy_returns_home() {
    let n = 6;
    let mut sim = settled(n);
    let sw = set_width(n);

    // Inside copy 4, short of the forward trigger.
    sim.user_scroll_to(7900.0);
    sim.advance_ms(200);
    let events = sim.carousel_mut().drain_events();
    assert_eq!(
        loop_jumps(&events, JumpReason::Settle),
        vec![(7900.0, 2.0 * sw + (7900.0 - 4.0 * sw))]
    );
    assert_eq!(sim.carousel().active_index(), Some(0));

    // Inside copy 0, short of the backward trigger.
    sim.user_scroll_to(1500.0);
    sim.advance_ms(200);
    let events = sim.carousel_mut().drain_events();
    assert_eq!(
        loop_jumps(&events, JumpReason::Settle),
        vec![(1500.0, 2.0 * sw + 1500.0)]
    );
}

#[test]
fn resting_in_an_inner_copy_stays_put() {
    let mut sim = settled(6);
    sim.user_scroll_to(3.0 * set_width(6) + 40.0);
    sim.advance_ms(400);
    let events = sim.carousel_mut().drain_events();
    assert!(
        events
            .iter()
            .all(|e| !matches!(e, CarouselEvent::LoopJumped { .. }))
    );
    assert_eq!(sim.carousel().phase(), CarouselPhase::Idle);
}

#[test]
fn sub_pixel_jitter_is_not_activity() {
    let mut sim = settled(6);
    let before = sim.offset();
    sim.user_scroll_to(before + 0.4);
    assert_eq!(sim.carousel().phase(), CarouselPhase::Idle);
    assert_eq!(sim.carousel().pending_timers(), 0);
}

#[test]
fn partial_item_below_min_ratio_is_skipped() {
    let mut sim = settled(6);
    // Item 0 of the home copy shows 60px (20%); item 1 wins.
    sim.user_scroll_by(PITCH - 24.0 - 60.0);
    sim.advance_ms(20);
    assert_eq!(sim.carousel().active_index(), Some(1));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: away from the loop triggers, the active index is the leftmost
    /// sufficiently visible item.
    #[test]
    fn property_leftmost_visible_item_is_active(offset in 1362.0f32..8358.0) {
        let mut sim = settled(6);
        sim.user_scroll_to(offset);
        sim.advance_ms(20);
        prop_assert_eq!(sim.carousel().active_index(), sim.leading_logical());
    }
}
