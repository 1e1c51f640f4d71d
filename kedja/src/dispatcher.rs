//! The dispatch driver and its continuation protocol.

use crate::slot::Slot;
use kedja_core::{ChainConfig, Frame, HookPoint, SLOT_CAPACITY, Verdict};

/// A multi-stage dispatcher for one hook attachment.
///
/// The dispatcher walks its call slots in priority order, consulting the
/// continuation protocol after each stage:
///
/// 1. Read the number of active slots N from the frozen configuration.
/// 2. For slot *i* while *i* < N: run the slot, obtaining a verdict.
/// 3. If the verdict's bit is clear in `chain_call_actions[i]`, stop and
///    return that verdict.
/// 4. If all configured slots signaled "continue", or N was 0, return
///    the flavor's accept verdict, never the last stage's verdict.
///
/// An absent unit of work hard-stops at the first slot with the abort
/// verdict, bitmask ignored. When N indicates the eleventh tier, the
/// compatibility slot runs after the ten regular slots; its verdict is
/// discarded and never becomes the final verdict.
///
/// The walk is statically bounded: a fixed-capacity slot array, no
/// recursion, no dynamically sized dispatch table. The configuration is
/// written once at build time and only read here, so a `Dispatcher` can
/// be invoked concurrently from any number of execution contexts without
/// synchronization; replacing a stage means building a new dispatcher
/// and atomically swapping the instance.
pub struct Dispatcher<P: HookPoint, E: Frame> {
    config: P::Config,
    slots: [Slot<E, P::Verdict>; SLOT_CAPACITY + 1],
}

impl<P: HookPoint, E: Frame> Dispatcher<P, E> {
    pub(crate) fn new(config: P::Config, slots: [Slot<E, P::Verdict>; SLOT_CAPACITY + 1]) -> Self {
        Self { config, slots }
    }

    /// The frozen configuration blob this dispatcher reads.
    pub fn config(&self) -> &P::Config {
        &self.config
    }

    /// Number of active slots.
    pub fn num_enabled(&self) -> u8 {
        self.config.num_enabled()
    }

    /// Look at a call slot, including the compatibility slot at index
    /// [`SLOT_CAPACITY`].
    pub fn slot(&self, index: usize) -> Option<&Slot<E, P::Verdict>> {
        self.slots.get(index)
    }

    /// Dispatch one unit of work through the chain.
    ///
    /// `None` models a malformed/absent unit of work and yields the
    /// flavor's abort verdict from the first configured slot.
    pub fn dispatch(&self, frame: Option<&E>) -> P::Verdict {
        let enabled = usize::from(self.config.num_enabled());

        for (index, slot) in self.slots.iter().take(SLOT_CAPACITY).enumerate() {
            if enabled < index + 1 {
                return P::Verdict::accept();
            }

            let verdict = slot.run(frame);
            if frame.is_none() {
                // The slot aborted on a malformed unit of work; the
                // bitmask is not consulted.
                return verdict;
            }

            let mask = self.config.chain_call_actions()[index];
            let proceed = mask & (1u32 << verdict.chain_bit()) != 0;

            #[cfg(feature = "tracing")]
            tracing::trace!(
                hook = P::NAME,
                slot = index,
                verdict = %verdict,
                proceed,
                "stage verdict"
            );

            if !proceed {
                return verdict;
            }
        }

        if enabled > SLOT_CAPACITY {
            // Compatibility tier: keeps the probe slot reachable for
            // loaders checking structural compatibility. Its verdict is
            // discarded.
            let _ = self.slots[SLOT_CAPACITY].run(frame);
        }

        P::Verdict::accept()
    }
}

impl<P: HookPoint, E: Frame> std::fmt::Debug for Dispatcher<P, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("hook", &P::NAME)
            .field("config", &self.config)
            .field("slots", &self.slots)
            .finish()
    }
}
