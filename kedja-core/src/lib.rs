//! # kedja-core
//!
//! Core traits and configuration layout for the Kedja dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! stage implementations and loader tooling that don't need the full
//! `kedja` dispatch driver.
//!
//! # Concepts
//!
//! A **hook point** is a place in the packet path where exactly one program
//! can attach: the network-receive hook ([`Xdp`]) or the traffic-classifier
//! hook ([`Tc`]). Kedja multiplexes that single attachment into a fixed
//! chain of up to [`SLOT_CAPACITY`] independently supplied **stages**, each
//! of which returns a **verdict** and can short-circuit the chain.
//!
//! - [`Verdict`] - the closed, flavor-specific outcome vocabulary
//!   ([`XdpVerdict`], [`TcVerdict`]) and its continuation-bit mapping
//! - [`Stage`] - one processing unit occupying a call slot
//! - [`HookPoint`] - ties a flavor's verdict and configuration types together
//! - [`ChainConfig`] - the write-once configuration blob read by the driver
//!
//! # Error Types
//!
//! - [`ParseError`] - unrecognized verdict values or names
//! - [`CompatError`] - configuration blob metadata mismatches

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod config;
mod error;
mod frame;
mod hook_point;
mod stage;
mod verdict;

// Re-exports
pub use config::{
    ChainConfig, ChainLayout, SLOT_CAPACITY, TC_DISPATCHER_VERSION, TcDispatcherConfig,
    XDP_DISPATCHER_MAGIC, XDP_DISPATCHER_VERSION, XdpDispatcherConfig,
};
pub use error::{CompatError, ParseError};
pub use frame::Frame;
pub use hook_point::{HookPoint, Tc, Xdp};
pub use stage::{BoxStage, PassThrough, Stage};
pub use verdict::{TcVerdict, Verdict, XdpVerdict};
