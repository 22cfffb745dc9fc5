//! Cancellable one-shot timers
//!
//! Every delayed step of the carousel (frame evaluation, cooldowns, animation
//! frames, settle detection) is an explicit entry in a [`TimerQueue`]. A
//! cancelled token never fires, which is how stale work from a superseded
//! event is invalidated.

use std::time::{Duration, Instant};

/// Handle to a scheduled timer. Tokens are never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Coalesced scroll evaluation for the current frame.
    Frame,
    /// Step of an in-flight navigation tween.
    AnimationFrame,
    /// End of the suppression window after a loop-jump.
    JumpCooldown,
    /// Navigation animation has run its full duration.
    NavigationSettle,
    /// No organic scroll events for the settle window.
    ScrollSettle,
    /// Retry of the initial home-copy placement.
    InitialPlacement,
}

#[derive(Debug, Clone)]
struct Entry {
    deadline: Instant,
    token: TimerToken,
    kind: TimerKind,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_token: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire once `now + delay` is reached.
    pub fn schedule(&mut self, kind: TimerKind, now: Instant, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.entries.push(Entry {
            deadline: now + delay,
            token,
            kind,
        });
        token
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        self.entries.len() != before
    }

    /// Cancel the token held in `slot`, leaving `None` behind.
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerToken>) {
        if let Some(token) = slot.take() {
            self.cancel(token);
        }
    }

    /// Remove and return the earliest timer due at `now`. Ties fire in
    /// scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerToken, TimerKind)> {
        let (pos, _) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.token))?;
        let entry = self.entries.remove(pos);
        Some((entry.token, entry.kind))
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        let t0 = Instant::now();
        let late = q.schedule(TimerKind::NavigationSettle, t0, Duration::from_millis(600));
        let early = q.schedule(TimerKind::Frame, t0, Duration::from_millis(16));

        assert_eq!(q.pop_due(t0), None);

        let now = t0 + Duration::from_millis(700);
        assert_eq!(q.pop_due(now), Some((early, TimerKind::Frame)));
        assert_eq!(q.pop_due(now), Some((late, TimerKind::NavigationSettle)));
        assert!(q.is_empty());
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut q = TimerQueue::new();
        let t0 = Instant::now();
        let a = q.schedule(TimerKind::Frame, t0, Duration::ZERO);
        let b = q.schedule(TimerKind::ScrollSettle, t0, Duration::ZERO);
        assert_eq!(q.pop_due(t0).map(|(t, _)| t), Some(a));
        assert_eq!(q.pop_due(t0).map(|(t, _)| t), Some(b));
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut q = TimerQueue::new();
        let t0 = Instant::now();
        let token = q.schedule(TimerKind::JumpCooldown, t0, Duration::from_millis(50));
        let mut slot = Some(token);

        q.cancel_slot(&mut slot);

        assert!(slot.is_none());
        assert!(!q.cancel(token));
        assert_eq!(q.pop_due(t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn next_deadline_tracks_earliest() {
        let mut q = TimerQueue::new();
        let t0 = Instant::now();
        assert_eq!(q.next_deadline(), None);
        q.schedule(TimerKind::ScrollSettle, t0, Duration::from_millis(150));
        q.schedule(TimerKind::Frame, t0, Duration::from_millis(16));
        assert_eq!(q.next_deadline(), Some(t0 + Duration::from_millis(16)));
        assert_eq!(q.len(), 2);
    }
}
