//! Composer-side assembly of a dispatcher.
//!
//! The builder is the single writer in the blob's write-once lifecycle:
//! it collects stages in priority order, derives the per-slot
//! continuation bitmasks, and freezes everything into the flavor's
//! configuration blob before the dispatcher sees its first frame.

use crate::{dispatcher::Dispatcher, proceed_on::ProceedOn, slot::Slot};
use kedja_core::{
    BoxStage, ChainConfig, ChainLayout, Frame, HookPoint, SLOT_CAPACITY, Stage, Verdict, Xdp,
};
use thiserror::Error;

/// Ordering key assigned to stages that don't specify one.
pub const DEFAULT_PRIORITY: u32 = 50;

/// Errors from assembling a dispatch chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// More stages were supplied than the chain has slots.
    #[error("chain capacity exceeded: {requested} stages, capacity {capacity}")]
    CapacityExceeded {
        /// Number of stages supplied.
        requested: usize,
        /// Fixed slot capacity of the chain.
        capacity: usize,
    },
}

struct SlotSpec<E: Frame, V: Verdict> {
    stage: BoxStage<E, V>,
    actions: u32,
    priority: u32,
    flags: u32,
}

/// Builds a [`Dispatcher`] for one hook attachment.
///
/// Stages are appended in the order they should run; the composer has
/// already decided priority order, and `run_priorities` entries are
/// recorded for external consumption but never re-evaluated at dispatch
/// time.
///
/// ```
/// use kedja::{DispatcherBuilder, ProceedOn};
/// use kedja::kedja_core::{Tc, TcVerdict};
///
/// let dispatcher = DispatcherBuilder::<Tc, Vec<u8>>::new()
///     .stage(|_: &Vec<u8>| TcVerdict::Pipe, ProceedOn::default())
///     .priority(40)
///     .stage(|_: &Vec<u8>| TcVerdict::Ok, ProceedOn::default())
///     .build()
///     .unwrap();
///
/// assert_eq!(dispatcher.num_enabled(), 2);
/// ```
pub struct DispatcherBuilder<P: HookPoint, E: Frame> {
    specs: Vec<SlotSpec<E, P::Verdict>>,
    frags: bool,
    compat_probe: bool,
}

impl<P: HookPoint, E: Frame> DispatcherBuilder<P, E> {
    /// Create an empty chain builder.
    pub fn new() -> Self {
        Self {
            specs: Vec::new(),
            frags: false,
            compat_probe: false,
        }
    }

    /// Append a stage with its chain-continuing verdict set.
    pub fn stage<S>(mut self, stage: S, proceed_on: ProceedOn<P::Verdict>) -> Self
    where
        S: Stage<E, Verdict = P::Verdict>,
    {
        self.specs.push(SlotSpec {
            stage: Box::new(stage),
            actions: proceed_on.mask(),
            priority: DEFAULT_PRIORITY,
            flags: 0,
        });
        self
    }

    /// Record the ordering key of the most recently appended stage.
    ///
    /// Informational only; slot order already reflects priority order.
    /// No effect before the first stage.
    pub fn priority(mut self, priority: u32) -> Self {
        if let Some(spec) = self.specs.last_mut() {
            spec.priority = priority;
        }
        self
    }

    /// Enable the eleventh, compatibility tier so loader tooling can
    /// probe the chain's structure. The compatibility slot never
    /// participates in the continuation decision.
    pub fn compat_probe(mut self) -> Self {
        self.compat_probe = true;
        self
    }

    /// Freeze the configuration and assemble the dispatcher.
    pub fn build(self) -> Result<Dispatcher<P, E>, BuildError> {
        if self.specs.len() > SLOT_CAPACITY {
            return Err(BuildError::CapacityExceeded {
                requested: self.specs.len(),
                capacity: SLOT_CAPACITY,
            });
        }

        let mut chain_call_actions = [0u32; SLOT_CAPACITY];
        let mut run_priorities = [DEFAULT_PRIORITY; SLOT_CAPACITY];
        let mut stage_flags = [0u32; SLOT_CAPACITY];

        let num_enabled = if self.compat_probe {
            (SLOT_CAPACITY + 1) as u8
        } else {
            self.specs.len() as u8
        };

        let mut slots: [Slot<E, P::Verdict>; SLOT_CAPACITY + 1] =
            std::array::from_fn(|_| Slot::Stub);

        for (index, spec) in self.specs.into_iter().enumerate() {
            chain_call_actions[index] = spec.actions;
            run_priorities[index] = spec.priority;
            stage_flags[index] = spec.flags;
            slots[index] = Slot::Bound(spec.stage);
        }

        let config = P::Config::assemble(ChainLayout {
            num_enabled,
            chain_call_actions,
            run_priorities,
            stage_flags,
            frags: self.frags,
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(hook = P::NAME, config = ?config, "assembled dispatcher config");

        Ok(Dispatcher::new(config, slots))
    }
}

impl<E: Frame> DispatcherBuilder<Xdp, E> {
    /// Mark the chain as handling multi-buffer (fragmented) frames.
    pub fn frags(mut self) -> Self {
        self.frags = true;
        self
    }

    /// Record behavior flags for the most recently appended stage.
    ///
    /// Stored opaquely in the blob's `program_flags`; the dispatcher
    /// itself never interprets them. No effect before the first stage.
    pub fn flags(mut self, flags: crate::flags::StageFlags) -> Self {
        if let Some(spec) = self.specs.last_mut() {
            spec.flags = flags.bits();
        }
        self
    }
}

impl<P: HookPoint, E: Frame> Default for DispatcherBuilder<P, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::StageFlags;
    use kedja_core::{ChainConfig, Tc, TcVerdict, Verdict, XdpVerdict};

    #[test]
    fn capacity_is_enforced() {
        let mut builder = DispatcherBuilder::<Tc, ()>::new();
        for _ in 0..11 {
            builder = builder.stage(|_: &()| TcVerdict::Pipe, ProceedOn::default());
        }
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::CapacityExceeded {
                requested: 11,
                capacity: SLOT_CAPACITY
            }
        );
    }

    #[test]
    fn blob_reflects_the_chain() {
        let dispatcher = DispatcherBuilder::<Xdp, ()>::new()
            .stage(|_: &()| XdpVerdict::Pass, ProceedOn::new([XdpVerdict::Pass]))
            .priority(10)
            .flags(StageFlags::FRAGS)
            .stage(|_: &()| XdpVerdict::Drop, ProceedOn::default())
            .build()
            .unwrap();

        let config = dispatcher.config();
        assert_eq!(config.num_enabled(), 2);
        assert_eq!(config.chain_call_actions()[0], 1 << XdpVerdict::Pass.chain_bit());
        assert_eq!(config.run_priorities()[0], 10);
        assert_eq!(config.run_priorities()[1], DEFAULT_PRIORITY);
        assert_eq!(config.program_flags()[0], StageFlags::FRAGS.bits());
        assert_eq!(config.program_flags()[1], 0);
        // Unconfigured slots stay all-stop.
        assert_eq!(config.chain_call_actions()[2], 0);
    }

    #[test]
    fn compat_probe_selects_the_eleventh_tier() {
        let dispatcher = DispatcherBuilder::<Tc, ()>::new()
            .compat_probe()
            .build()
            .unwrap();
        assert_eq!(dispatcher.num_enabled(), (SLOT_CAPACITY + 1) as u8);
        assert!(!dispatcher.slot(SLOT_CAPACITY).unwrap().is_bound());
    }

    #[test]
    fn frags_marker_lands_in_the_blob() {
        let dispatcher = DispatcherBuilder::<Xdp, ()>::new().frags().build().unwrap();
        assert!(dispatcher.config().is_frags());
    }
}
