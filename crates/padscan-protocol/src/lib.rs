//! Row-scan controller protocol: wire constants, bit tables and classification.
//!
//! Controllers on a shared scan bus are multiplexed over row-select codes.
//! Each (socket, row) pair answers with a 32-bit word whose bits are shared
//! between two ports; every port reads its own lanes out of that word through
//! a pair of single-bit masks (the *c-bit* and the *b-bit*) and a 4-bit axis
//! lane.
//!
//! This crate is intentionally I/O-free. It holds the pure parts of detection:
//! the code table, the per-port masks, the row store, the basic and signature
//! decode tables and the button/axis extraction helpers. Driving a real (or
//! simulated) bus lives in `padscan-detect`.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod decode;
pub mod ids;
pub mod readout;
pub mod rows;
pub mod types;

pub use decode::{
    ANALOG_BUTTONS, AnalogButton, AnalogPadState, ButtonState, SIXDPAD_BUTTONS, STDPAD_BUTTONS,
    SixAxis, SixDPadButton, SixDPadState, StdPadButton, StdPadState, assemble_axis, classify_rows,
    decode_signature, signature_nibble,
};
pub use ids::{
    MAX_BANK_SYNC_ATTEMPTS, REQUEST_FLAG, ROW_SELECT_CODES, axis_shift, b_bit_mask, c_bit_mask,
    reverse_lookup, select_word,
};
pub use readout::Readout;
pub use rows::RowStore;
pub use types::{Bank, ControllerType, Port, Row, Socket};

use thiserror::Error;

/// Errors raised when converting raw integers into protocol index types.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid port index: {0}")]
    InvalidPort(u8),

    #[error("Invalid socket index: {0}")]
    InvalidSocket(u8),

    #[error("Invalid row index: {0}")]
    InvalidRow(u8),

    #[error("Invalid bank index: {0}")]
    InvalidBank(u8),

    #[error("Unknown controller type code: {0}")]
    UnknownControllerType(u8),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Number of physical ports sharing the scan bus.
pub const MAX_PORT: usize = 2;
/// Number of device sockets multiplexed per port.
pub const MAX_SOCKET: usize = 4;
/// Number of row samples per (bank, socket).
pub const MAX_ROW: usize = 4;
/// Number of bank pages kept in the row store.
pub const MAX_BANK: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(MAX_PORT, 2);
        assert_eq!(MAX_SOCKET, 4);
        assert_eq!(MAX_ROW, 4);
        assert_eq!(MAX_BANK, 4);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ProtocolError::InvalidSocket(9).to_string(),
            "Invalid socket index: 9"
        );
        assert_eq!(
            ProtocolError::UnknownControllerType(42).to_string(),
            "Unknown controller type code: 42"
        );
    }
}
