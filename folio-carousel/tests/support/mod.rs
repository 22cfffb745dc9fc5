#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use folio_carousel::carousel::{CarouselEvent, JumpReason};
use folio_carousel::sim::{Simulation, UniformStrip};
use folio_carousel::{CarouselItem, RuntimeConfig};

pub const ITEM_WIDTH: f32 = 300.0;
pub const GAP: f32 = 24.0;
pub const PITCH: f32 = ITEM_WIDTH + GAP;
pub const VIEWPORT: f32 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: &'static str,
}

impl CarouselItem for Card {
    type Id = &'static str;

    fn id(&self) -> Self::Id {
        self.id
    }
}

pub fn cards(n: usize) -> Vec<Card> {
    const IDS: [&str; 8] = [
        "thribo", "portfolio", "tasks", "analytics", "chat", "notes", "weather", "budget",
    ];
    IDS.iter().take(n).map(|&id| Card { id }).collect()
}

pub fn set_width(n: usize) -> f32 {
    PITCH * n as f32
}

/// Carousel of `n` cards, laid out, with the initial placement cooldown over
/// and its events drained.
pub fn settled(n: usize) -> Simulation<Card> {
    let mut sim = fresh(n);
    sim.advance_ms(100);
    sim.carousel_mut().drain_events();
    sim
}

pub fn fresh(n: usize) -> Simulation<Card> {
    fresh_on(n, VIEWPORT)
}

/// Like [`fresh`] on a viewport `viewport` pixels wide.
pub fn fresh_on(n: usize, viewport: f32) -> Simulation<Card> {
    Simulation::new(
        cards(n),
        UniformStrip::new(ITEM_WIDTH, GAP, viewport),
        &RuntimeConfig::default(),
    )
}

pub fn settled_on(n: usize, viewport: f32) -> Simulation<Card> {
    let mut sim = fresh_on(n, viewport);
    sim.advance_ms(100);
    sim.carousel_mut().drain_events();
    sim
}

/// Attach a listener recording every reported active index.
pub fn record_transitions(sim: &mut Simulation<Card>) -> Rc<RefCell<Vec<usize>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    sim.carousel_mut()
        .set_active_index_listener(Some(Box::new(move |i| sink.borrow_mut().push(i))));
    seen
}

/// Every jump must land on the same position inside another copy, within
/// the scroll range.
pub fn assert_seamless(jumps: &[(f32, f32)], set_width: f32, max_scroll: f32) {
    for &(from, to) in jumps {
        let drift = (from.rem_euclid(set_width) - to.rem_euclid(set_width)).abs();
        assert!(drift < 0.01, "jump {from} -> {to} moved {drift}px within the set");
        assert!((0.0..=max_scroll).contains(&to), "jump {from} -> {to} out of range");
    }
}

pub fn loop_jumps(events: &[CarouselEvent], reason: JumpReason) -> Vec<(f32, f32)> {
    events
        .iter()
        .filter_map(|e| match e {
            CarouselEvent::LoopJumped { from, to, reason: r } if *r == reason => {
                Some((*from, *to))
            }
            _ => None,
        })
        .collect()
}
