//! The stage trait: one processing unit occupying a call slot.
//!
//! Stages are the unit the external composer binds into a dispatcher's
//! call slots. They are deliberately synchronous: the hook contract is
//! run-to-completion with no suspension, blocking, or cancellation, so
//! there is no async seam here.

use crate::{frame::Frame, verdict::Verdict};

/// One bound processing unit in a dispatch chain.
///
/// A stage receives a reference to the unit of work and returns a verdict
/// from its flavor's closed vocabulary. It must not block or yield; the
/// entire chain for one frame completes before the next frame is
/// dispatched on that execution context.
///
/// Closures implement `Stage` directly:
///
/// ```
/// use kedja_core::{Stage, XdpVerdict};
///
/// let drop_all = |_frame: &Vec<u8>| XdpVerdict::Drop;
/// assert_eq!(drop_all.process(&vec![0u8; 64]), XdpVerdict::Drop);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Stage<{E}>`",
    label = "missing `Stage` implementation",
    note = "Stages must implement `process` for the frame type `{E}`."
)]
pub trait Stage<E: Frame>: Send + Sync + 'static {
    /// The verdict vocabulary this stage speaks.
    type Verdict: Verdict;

    /// Process one unit of work and return its verdict.
    fn process(&self, frame: &E) -> Self::Verdict;
}

/// A boxed, dynamically dispatched stage.
///
/// Call slots hold stages in this form so independently compiled stages
/// of different concrete types can occupy the same chain.
pub type BoxStage<E, V> = Box<dyn Stage<E, Verdict = V>>;

impl<E, V, F> Stage<E> for F
where
    E: Frame,
    V: Verdict,
    F: Fn(&E) -> V + Send + Sync + 'static,
{
    type Verdict = V;

    fn process(&self, frame: &E) -> V {
        self(frame)
    }
}

/// A zero-logic stage that always returns the flavor's accept verdict.
///
/// Used as an idle/detached placeholder attachment when no stage chain
/// should run. No state, no configuration dependency.
pub struct PassThrough<V> {
    _verdict: std::marker::PhantomData<fn() -> V>,
}

impl<V> PassThrough<V> {
    /// Create a new pass-through stage.
    pub const fn new() -> Self {
        Self {
            _verdict: std::marker::PhantomData,
        }
    }
}

impl<V> Default for PassThrough<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for PassThrough<V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E: Frame, V: Verdict> Stage<E> for PassThrough<V> {
    type Verdict = V;

    fn process(&self, _frame: &E) -> V {
        V::accept()
    }
}
