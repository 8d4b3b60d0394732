//! Controller detection over a multiplexed row-scan bus.
//!
//! The [`Detector`] drives a [`ScanBus`]: it latches bank 0 of every socket,
//! classifies each (port, socket) pair, walks the bank chain of banked devices
//! to read their family signature, and samples button/axis state on demand.
//!
//! All bit-level layout lives in `padscan-protocol`; this crate only sequences
//! bus traffic.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod bus;
pub mod classify;
pub mod detector;
pub mod result;
pub mod scanner;
pub mod walker;

pub use bus::{Page, ScanBus};
pub use classify::{classify_basic, classify_signature, classify_socket};
pub use detector::Detector;
pub use result::DetectionResult;
pub use scanner::{scan_all_bank0, scan_socket};
pub use walker::{BankChain, walk_banks};
