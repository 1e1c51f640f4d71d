//! Per-slot behavior flags.

use bitflags::bitflags;

bitflags! {
    /// Behavior flags recorded per slot in the receive-hook blob's
    /// `program_flags`.
    ///
    /// Opaque to the dispatcher itself; carried for external consumers
    /// that inspect the frozen configuration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StageFlags: u32 {
        /// The stage handles multi-buffer (fragmented) frames.
        const FRAGS = 1;
    }
}
