//! Hook-point flavors.
//!
//! A hook point is the seam where a dispatcher attaches: it fixes the
//! verdict vocabulary, the configuration blob layout, and the metadata
//! external tooling checks before binding stages. Two flavors exist and
//! share one dispatcher design.

use crate::{
    config::{
        ChainConfig, TC_DISPATCHER_VERSION, TcDispatcherConfig, XDP_DISPATCHER_MAGIC,
        XDP_DISPATCHER_VERSION, XdpDispatcherConfig,
    },
    verdict::{TcVerdict, Verdict, XdpVerdict},
};

/// A hook flavor: ties together a verdict vocabulary, a configuration
/// blob layout, and version metadata.
pub trait HookPoint: Send + Sync + 'static {
    /// The verdict vocabulary at this hook point.
    type Verdict: Verdict;

    /// The configuration blob layout for this flavor.
    type Config: ChainConfig;

    /// Short flavor name, used in logs.
    const NAME: &'static str;

    /// Dispatcher protocol version recorded for compatibility probing.
    const VERSION: u8;
}

/// The network-receive hook flavor.
///
/// Runs in softirq-like context, once per incoming frame, before the
/// stack sees it.
#[derive(Debug, Clone, Copy)]
pub struct Xdp;

impl Xdp {
    /// Magic marker recorded in this flavor's configuration blob.
    pub const MAGIC: u8 = XDP_DISPATCHER_MAGIC;
}

impl HookPoint for Xdp {
    type Verdict = XdpVerdict;
    type Config = XdpDispatcherConfig;

    const NAME: &'static str = "xdp";
    const VERSION: u8 = XDP_DISPATCHER_VERSION;
}

/// The traffic-classifier hook flavor.
#[derive(Debug, Clone, Copy)]
pub struct Tc;

impl HookPoint for Tc {
    type Verdict = TcVerdict;
    type Config = TcDispatcherConfig;

    const NAME: &'static str = "tc";
    const VERSION: u8 = TC_DISPATCHER_VERSION;
}
