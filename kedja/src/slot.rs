//! Call slots.
//!
//! A slot is one call site in the chain. It is created unbound and stays
//! a stub until the composer binds real stage logic; an unbound slot is a
//! first-class state, not an implicit null. Rebinding a live slot is not
//! supported; replacing a stage means building a new dispatcher and
//! swapping the whole instance.

use kedja_core::{BoxStage, Frame, Stage, Verdict};

/// One call site in a dispatch chain.
pub enum Slot<E: Frame, V: Verdict> {
    /// No stage bound here; behaves as an identity stub returning the
    /// flavor's sentinel verdict.
    Stub,
    /// Externally supplied stage logic.
    Bound(BoxStage<E, V>),
}

impl<E: Frame, V: Verdict> Slot<E, V> {
    /// Bind a stage into a slot.
    pub fn bound<S>(stage: S) -> Self
    where
        S: Stage<E, Verdict = V>,
    {
        Slot::Bound(Box::new(stage))
    }

    /// Whether real stage logic is bound here.
    pub fn is_bound(&self) -> bool {
        matches!(self, Slot::Bound(_))
    }

    /// Run the slot against a possibly absent unit of work.
    ///
    /// An absent frame is a malformed unit of work: the slot hard-stops
    /// with the flavor's abort verdict and the stage is never consulted.
    pub(crate) fn run(&self, frame: Option<&E>) -> V {
        let Some(frame) = frame else {
            return V::abort();
        };
        match self {
            Slot::Stub => V::unbound(),
            Slot::Bound(stage) => stage.process(frame),
        }
    }
}

impl<E: Frame, V: Verdict> std::fmt::Debug for Slot<E, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Stub => f.write_str("Stub"),
            Slot::Bound(_) => f.write_str("Bound"),
        }
    }
}
