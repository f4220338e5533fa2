use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use super::{time_since_start, Instant};

#[derive(Clone)]
#[repr(transparent)]
/// Represents an ongoing operation which could be cancelled in the future.
/// Inspired by contexts in the Go programming language.
///
/// # Concepts
///
/// Contexts have two important concepts: "cancellation" and "deadline". A
/// context can be cancelled by calling its [`Context::cancel()`] method; every
/// holder of a copy observes this through [`Context::is_done()`]. A "deadline"
/// marks the context done once the clock passed to [`Context::is_done_at()`]
/// reaches it, so a simulated clock can end an operation deterministically.
pub struct Context(Arc<ContextValue>);

struct ContextValue {
    deadline: Option<Instant>,
    name: Option<String>,
    cancelled: AtomicBool,
}

impl Context {
    #[inline]
    /// Creates a new global context (i.e., one which has no deadline).
    pub fn new_global() -> Self {
        Self::new_global_ext(None, None)
    }

    /// Construct a new global context, with additional options.
    pub fn new_global_ext(deadline: Option<Instant>, name: Option<String>) -> Self {
        Self(Arc::new(ContextValue {
            deadline,
            name,
            cancelled: AtomicBool::new(false),
        }))
    }

    /// Cancels a context. This is a no-op if the context is already cancelled.
    pub fn cancel(&self) {
        if self.0.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        log::debug!("Explicit cancel: {}", self.name());
    }

    /// Gets the name of the context.
    pub fn name(&self) -> &str {
        self.0.name.as_deref().unwrap_or("<anon>")
    }

    /// Gets the deadline of the context, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.0.deadline
    }

    /// Checks whether the context was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::Acquire)
    }

    #[inline]
    /// Checks whether the context is done according to the real clock.
    pub fn is_done(&self) -> bool {
        self.is_done_at(time_since_start())
    }

    /// Checks whether the context is done at time `now`: either it was
    /// cancelled, or its deadline is at or before `now`.
    pub fn is_done_at(&self, now: Instant) -> bool {
        self.is_cancelled() || self.0.deadline.map_or(false, |d| d <= now)
    }
}
