//! Verdict vocabularies and their continuation-bit mappings.
//!
//! Every stage and every dispatcher returns a verdict drawn from a small,
//! closed, flavor-specific vocabulary. The continuation protocol turns a
//! verdict into a bit position and tests it against the slot's
//! continuation bitmask; the verdict-to-bit mapping is deliberately part
//! of the verdict type because the two hook flavors disagree on it (see
//! [`TcVerdict`]).

use crate::error::ParseError;
use std::str::FromStr;

/// A closed-enumeration outcome value for one hook flavor.
///
/// The three distinguished verdicts every flavor must provide:
///
/// - [`accept`](Verdict::accept) - returned when the chain runs to
///   completion (or is empty); the hook's default disposition
/// - [`abort`](Verdict::abort) - the hard-stop a stage produces for a
///   malformed (absent) unit of work
/// - [`unbound`](Verdict::unbound) - the sentinel an unbound stub slot
///   returns, signaling "no real stage bound here"
pub trait Verdict:
    Copy + Eq + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// The default accept verdict for this flavor.
    fn accept() -> Self;

    /// The hard-stop verdict for a malformed unit of work.
    fn abort() -> Self;

    /// The sentinel verdict returned by unbound stub slots.
    fn unbound() -> Self;

    /// Bit position of this verdict in a continuation bitmask.
    ///
    /// The mapping is flavor-scoped: the receive hook uses the raw value
    /// directly, the classifier hook offsets it by one. Always below 32.
    fn chain_bit(self) -> u32;

    /// The raw wire value, as the surrounding hook machinery sees it.
    fn into_raw(self) -> i32;

    /// Parse a raw wire value back into the vocabulary.
    fn from_raw(raw: i32) -> Result<Self, ParseError>;

    /// The composer's default set of chain-continuing verdicts.
    fn default_proceed_on() -> &'static [Self];
}

/// Verdicts of the network-receive hook flavor.
///
/// Raw values match the receive hook's action vocabulary; the sentinel
/// occupies the reserved value 31. The continuation-bit mapping is the
/// identity on the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum XdpVerdict {
    /// Internal error; drop the frame and flag it.
    Aborted = 0,
    /// Silently drop the frame.
    Drop = 1,
    /// Pass the frame up the stack.
    Pass = 2,
    /// Transmit the frame back out the receiving interface.
    Tx = 3,
    /// Redirect the frame to another interface or queue.
    Redirect = 4,
    /// Sentinel returned by unbound dispatcher slots.
    DispatcherReturn = 31,
}

impl Verdict for XdpVerdict {
    fn accept() -> Self {
        XdpVerdict::Pass
    }

    fn abort() -> Self {
        XdpVerdict::Aborted
    }

    fn unbound() -> Self {
        XdpVerdict::DispatcherReturn
    }

    fn chain_bit(self) -> u32 {
        self as u32
    }

    fn into_raw(self) -> i32 {
        self as i32
    }

    fn from_raw(raw: i32) -> Result<Self, ParseError> {
        Ok(match raw {
            0 => XdpVerdict::Aborted,
            1 => XdpVerdict::Drop,
            2 => XdpVerdict::Pass,
            3 => XdpVerdict::Tx,
            4 => XdpVerdict::Redirect,
            31 => XdpVerdict::DispatcherReturn,
            other => return Err(ParseError::InvalidValue(other)),
        })
    }

    fn default_proceed_on() -> &'static [Self] {
        &[XdpVerdict::Pass, XdpVerdict::DispatcherReturn]
    }
}

impl FromStr for XdpVerdict {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "aborted" => XdpVerdict::Aborted,
            "drop" => XdpVerdict::Drop,
            "pass" => XdpVerdict::Pass,
            "tx" => XdpVerdict::Tx,
            "redirect" => XdpVerdict::Redirect,
            "dispatcher_return" => XdpVerdict::DispatcherReturn,
            other => return Err(ParseError::InvalidName(other.to_string())),
        })
    }
}

impl std::fmt::Display for XdpVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = match self {
            XdpVerdict::Aborted => "aborted",
            XdpVerdict::Drop => "drop",
            XdpVerdict::Pass => "pass",
            XdpVerdict::Tx => "tx",
            XdpVerdict::Redirect => "redirect",
            XdpVerdict::DispatcherReturn => "dispatcher_return",
        };
        write!(f, "{v}")
    }
}

/// Verdicts of the traffic-classifier hook flavor.
///
/// Valid classifier verdicts start at -1 (`Unspec`), which cannot index a
/// bit, so the continuation-bit mapping for this flavor is the raw value
/// plus one. The sentinel's raw value is 30 so that, after the offset,
/// it occupies bit 31 just like the receive flavor's sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TcVerdict {
    /// No verdict; defer to the next classifier.
    Unspec = -1,
    /// Terminate the chain and accept the frame.
    Ok = 0,
    /// Restart classification from the beginning.
    Reclassify = 1,
    /// Drop the frame.
    Shot = 2,
    /// Continue to the next action.
    Pipe = 3,
    /// The frame was consumed; stop processing.
    Stolen = 4,
    /// The frame was queued; stop processing.
    Queued = 5,
    /// Re-run classification on this frame.
    Repeat = 6,
    /// Redirect the frame to another interface.
    Redirect = 7,
    /// Drop the frame and signal an exception.
    Trap = 8,
    /// Sentinel returned by unbound dispatcher slots.
    DispatcherReturn = 30,
}

impl Verdict for TcVerdict {
    fn accept() -> Self {
        TcVerdict::Ok
    }

    fn abort() -> Self {
        TcVerdict::Shot
    }

    fn unbound() -> Self {
        TcVerdict::DispatcherReturn
    }

    // +1 offset: Unspec is -1 on the wire.
    fn chain_bit(self) -> u32 {
        (self as i32 + 1) as u32
    }

    fn into_raw(self) -> i32 {
        self as i32
    }

    fn from_raw(raw: i32) -> Result<Self, ParseError> {
        Ok(match raw {
            -1 => TcVerdict::Unspec,
            0 => TcVerdict::Ok,
            1 => TcVerdict::Reclassify,
            2 => TcVerdict::Shot,
            3 => TcVerdict::Pipe,
            4 => TcVerdict::Stolen,
            5 => TcVerdict::Queued,
            6 => TcVerdict::Repeat,
            7 => TcVerdict::Redirect,
            8 => TcVerdict::Trap,
            30 => TcVerdict::DispatcherReturn,
            other => return Err(ParseError::InvalidValue(other)),
        })
    }

    fn default_proceed_on() -> &'static [Self] {
        &[TcVerdict::Pipe, TcVerdict::DispatcherReturn]
    }
}

impl FromStr for TcVerdict {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "unspec" => TcVerdict::Unspec,
            "ok" => TcVerdict::Ok,
            "reclassify" => TcVerdict::Reclassify,
            "shot" => TcVerdict::Shot,
            "pipe" => TcVerdict::Pipe,
            "stolen" => TcVerdict::Stolen,
            "queued" => TcVerdict::Queued,
            "repeat" => TcVerdict::Repeat,
            "redirect" => TcVerdict::Redirect,
            "trap" => TcVerdict::Trap,
            "dispatcher_return" => TcVerdict::DispatcherReturn,
            other => return Err(ParseError::InvalidName(other.to_string())),
        })
    }
}

impl std::fmt::Display for TcVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = match self {
            TcVerdict::Unspec => "unspec",
            TcVerdict::Ok => "ok",
            TcVerdict::Reclassify => "reclassify",
            TcVerdict::Shot => "shot",
            TcVerdict::Pipe => "pipe",
            TcVerdict::Stolen => "stolen",
            TcVerdict::Queued => "queued",
            TcVerdict::Repeat => "repeat",
            TcVerdict::Redirect => "redirect",
            TcVerdict::Trap => "trap",
            TcVerdict::DispatcherReturn => "dispatcher_return",
        };
        write!(f, "{v}")
    }
}
