//! # kedja
//!
//! A fixed-capacity multi-stage dispatcher for packet hook points.
//!
//! A hook point admits exactly one attached program. Kedja multiplexes
//! that single attachment into an ordered chain of up to ten
//! independently supplied stages, each of which can short-circuit the
//! chain through a per-slot continuation bitmask. Two flavors share the
//! design: the network-receive hook and the traffic-classifier hook,
//! differing only in verdict vocabulary.
//!
//! This crate provides:
//! - **The dispatch driver**: [`Dispatcher`] and its continuation protocol
//! - **Composition**: [`DispatcherBuilder`], [`ProceedOn`], [`StageFlags`]
//! - **Call slots**: [`Slot`] with first-class unbound stubs
//! - **Testing utilities**: [`testing`]
//!
//! ```
//! use kedja::{DispatcherBuilder, ProceedOn};
//! use kedja::kedja_core::{Xdp, XdpVerdict};
//!
//! let dispatcher = DispatcherBuilder::<Xdp, Vec<u8>>::new()
//!     .stage(
//!         |frame: &Vec<u8>| if frame.len() > 1500 { XdpVerdict::Drop } else { XdpVerdict::Pass },
//!         ProceedOn::new([XdpVerdict::Pass]),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(dispatcher.dispatch(Some(&vec![0u8; 64])), XdpVerdict::Pass);
//! assert_eq!(dispatcher.dispatch(Some(&vec![0u8; 2000])), XdpVerdict::Drop);
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use kedja_core;

// Modules
mod builder;
mod dispatcher;
mod flags;
mod proceed_on;
mod slot;
pub mod testing;

pub use builder::{BuildError, DEFAULT_PRIORITY, DispatcherBuilder};
pub use dispatcher::Dispatcher;
pub use flags::StageFlags;
pub use proceed_on::ProceedOn;
pub use slot::Slot;
