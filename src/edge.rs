//! Rising-edge detection for sampled boolean inputs.

/// Remembers the previous sample of a boolean signal and reports low-to-high
/// transitions.
///
/// An action gated on [`RisingEdge::update()`] fires exactly once per press:
/// on the first sample that reads `true` after one that read `false`. Holding
/// and releasing never fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RisingEdge {
    last: bool,
}

impl RisingEdge {
    /// Creates a detector whose previous sample is "not pressed".
    pub const fn new() -> Self {
        Self { last: false }
    }

    /// Feeds the current sample and returns whether it is a rising edge. The
    /// sample becomes the previous one for the next call.
    #[inline]
    pub fn update(&mut self, current: bool) -> bool {
        let rose = current && !self.last;
        self.last = current;
        rose
    }

    /// The previous sample.
    #[inline]
    pub fn last(&self) -> bool {
        self.last
    }
}
