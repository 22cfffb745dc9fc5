//! Events emitted by a carousel instance

/// Why the engine moved the offset instantly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpReason {
    /// Scrolled past the threshold into an outermost copy.
    Boundary,
    /// Came to rest inside an outermost copy.
    Settle,
    /// First layout placed the strip on the home copy.
    InitialPlacement,
    /// Shifted by whole sets before a navigation that targets an outermost copy.
    NavigationRebase,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    ActiveIndexChanged(usize),
    LoopJumped {
        from: f32,
        to: f32,
        reason: JumpReason,
    },
    NavigationStarted {
        logical_index: usize,
        absolute_index: usize,
        from: f32,
        to: f32,
    },
    NavigationSettled {
        logical_index: usize,
        offset: f32,
    },
}
