//! Write-once configuration blobs.
//!
//! One blob per dispatcher instance, assembled by the composer before the
//! first unit of work arrives and frozen from then on. The dispatch
//! driver only ever reads it, so no locking is needed even when multiple
//! execution contexts run the same dispatcher concurrently.
//!
//! Both blob layouts are `#[repr(C)]` because they are an ABI: external
//! loader tooling reads the same layout to decide whether a dispatcher
//! build matches what it expects before binding stages to slots.

use crate::error::CompatError;

/// Number of regular call slots in a dispatch chain.
///
/// A deliberate ceiling balancing chain expressiveness against
/// verification cost. One extra compatibility slot exists beyond these.
pub const SLOT_CAPACITY: usize = 10;

/// Magic marker recorded in the receive-hook blob.
pub const XDP_DISPATCHER_MAGIC: u8 = 236;

/// Protocol version of the receive-hook dispatcher.
pub const XDP_DISPATCHER_VERSION: u8 = 2;

/// Protocol version of the classifier-hook dispatcher.
pub const TC_DISPATCHER_VERSION: u8 = 1;

/// Everything the composer hands to a flavor's blob constructor.
///
/// Flavors pick the fields they record; the classifier blob ignores the
/// per-stage flags and the frags marker.
#[derive(Debug, Clone, Copy)]
pub struct ChainLayout {
    /// Number of active slots; `SLOT_CAPACITY + 1` selects the
    /// compatibility tier.
    pub num_enabled: u8,
    /// Per-slot continuation bitmasks.
    pub chain_call_actions: [u32; SLOT_CAPACITY],
    /// Informational per-slot ordering keys; never re-evaluated at
    /// dispatch time.
    pub run_priorities: [u32; SLOT_CAPACITY],
    /// Per-slot behavior flags, opaque to the dispatcher.
    pub stage_flags: [u32; SLOT_CAPACITY],
    /// Whether the chain handles multi-buffer frames.
    pub frags: bool,
}

/// Read access the dispatch driver needs from a frozen blob.
pub trait ChainConfig: std::fmt::Debug + Send + Sync + 'static {
    /// Build the blob from a composer-assembled layout. Called exactly
    /// once, before any dispatch.
    fn assemble(layout: ChainLayout) -> Self;

    /// Number of active slots.
    fn num_enabled(&self) -> u8;

    /// Per-slot continuation bitmasks.
    fn chain_call_actions(&self) -> &[u32; SLOT_CAPACITY];

    /// Informational per-slot ordering keys.
    fn run_priorities(&self) -> &[u32; SLOT_CAPACITY];
}

/// Configuration blob of the network-receive dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct XdpDispatcherConfig {
    magic: u8,
    dispatcher_version: u8,
    num_progs_enabled: u8,
    is_xdp_frags: u8,
    chain_call_actions: [u32; SLOT_CAPACITY],
    run_priorities: [u32; SLOT_CAPACITY],
    program_flags: [u32; SLOT_CAPACITY],
}

impl XdpDispatcherConfig {
    /// Per-slot behavior flags, passed through for external consumption.
    pub fn program_flags(&self) -> &[u32; SLOT_CAPACITY] {
        &self.program_flags
    }

    /// Whether this dispatcher was composed with multi-buffer support.
    pub fn is_frags(&self) -> bool {
        self.is_xdp_frags != 0
    }

    /// Verify the magic/version markers so tooling can reject a
    /// mismatched dispatcher build before binding stages to slots.
    pub fn check_compat(&self) -> Result<(), CompatError> {
        if self.magic != XDP_DISPATCHER_MAGIC {
            return Err(CompatError::Magic {
                expected: XDP_DISPATCHER_MAGIC,
                found: self.magic,
            });
        }
        if self.dispatcher_version != XDP_DISPATCHER_VERSION {
            return Err(CompatError::Version {
                expected: XDP_DISPATCHER_VERSION,
                found: self.dispatcher_version,
            });
        }
        Ok(())
    }
}

impl ChainConfig for XdpDispatcherConfig {
    fn assemble(layout: ChainLayout) -> Self {
        Self {
            magic: XDP_DISPATCHER_MAGIC,
            dispatcher_version: XDP_DISPATCHER_VERSION,
            num_progs_enabled: layout.num_enabled,
            is_xdp_frags: u8::from(layout.frags),
            chain_call_actions: layout.chain_call_actions,
            run_priorities: layout.run_priorities,
            program_flags: layout.stage_flags,
        }
    }

    fn num_enabled(&self) -> u8 {
        self.num_progs_enabled
    }

    fn chain_call_actions(&self) -> &[u32; SLOT_CAPACITY] {
        &self.chain_call_actions
    }

    fn run_priorities(&self) -> &[u32; SLOT_CAPACITY] {
        &self.run_priorities
    }
}

/// Configuration blob of the traffic-classifier dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct TcDispatcherConfig {
    num_progs_enabled: u8,
    chain_call_actions: [u32; SLOT_CAPACITY],
    run_priorities: [u32; SLOT_CAPACITY],
}

impl ChainConfig for TcDispatcherConfig {
    fn assemble(layout: ChainLayout) -> Self {
        Self {
            num_progs_enabled: layout.num_enabled,
            chain_call_actions: layout.chain_call_actions,
            run_priorities: layout.run_priorities,
        }
    }

    fn num_enabled(&self) -> u8 {
        self.num_progs_enabled
    }

    fn chain_call_actions(&self) -> &[u32; SLOT_CAPACITY] {
        &self.chain_call_actions
    }

    fn run_priorities(&self) -> &[u32; SLOT_CAPACITY] {
        &self.run_priorities
    }
}
