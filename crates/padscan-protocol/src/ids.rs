//! Scan bus wire constants: row-select codes, request flag and per-port lanes.

#![deny(static_mut_refs)]

use crate::types::{Port, Row, Socket};

/// Flag OR'd into every row-select code written to the control register.
pub const REQUEST_FLAG: u16 = 0x8000;

/// Row-select codes, indexed by socket then row.
pub const ROW_SELECT_CODES: [[u8; 4]; 4] = [
    [0x7E, 0xBD, 0xDB, 0xE7],
    [0x00, 0x81, 0x42, 0xC3],
    [0x24, 0xA5, 0x66, 0x18],
    [0x99, 0x5A, 0x3C, 0xFF],
];

/// Number of checked bank-0 scans before the bank walker gives up.
pub const MAX_BANK_SYNC_ATTEMPTS: u8 = 10;

/// Bit positions inside a row word.
pub mod bits {
    pub const B0: u32 = 1 << 0;
    pub const B1: u32 = 1 << 1;
    pub const B2: u32 = 1 << 2;
    pub const B3: u32 = 1 << 3;

    pub const J0: u32 = 1 << 16;
    pub const J1: u32 = 1 << 17;
    pub const J2: u32 = 1 << 18;
    pub const J3: u32 = 1 << 19;
    pub const J4: u32 = 1 << 20;
    pub const J5: u32 = 1 << 21;
    pub const J6: u32 = 1 << 22;
    pub const J7: u32 = 1 << 23;
    pub const J8: u32 = 1 << 24;
    pub const J9: u32 = 1 << 25;
    pub const J10: u32 = 1 << 26;
    pub const J11: u32 = 1 << 27;
    pub const J12: u32 = 1 << 28;
    pub const J13: u32 = 1 << 29;
    pub const J14: u32 = 1 << 30;
    pub const J15: u32 = 1 << 31;
}

/// Control ("c-bit") lane of a port: chain/continuation and basic-type bits.
pub const fn c_bit_mask(port: Port) -> u32 {
    match port {
        Port::P0 => bits::B0,
        Port::P1 => bits::B2,
    }
}

/// Data ("b-bit") lane of a port: signature and banked button bits.
pub const fn b_bit_mask(port: Port) -> u32 {
    match port {
        Port::P0 => bits::B1,
        Port::P1 => bits::B3,
    }
}

/// Right shift that brings a port's 4-bit axis lane down to bits 0..3.
pub const fn axis_shift(port: Port) -> u32 {
    match port {
        Port::P0 => 24,
        Port::P1 => 28,
    }
}

/// Row-select code for a (socket, row) pair.
#[allow(clippy::indexing_slicing)]
pub const fn row_code(socket: Socket, row: Row) -> u8 {
    ROW_SELECT_CODES[socket.index()][row.index()]
}

/// Control-register word selecting `row` of `socket`.
pub const fn select_word(socket: Socket, row: Row) -> u16 {
    REQUEST_FLAG | row_code(socket, row) as u16
}

/// Find which (socket, row) a control-register word selects.
///
/// The request flag is ignored; returns `None` for codes outside the table.
pub fn reverse_lookup(word: u16) -> Option<(Socket, Row)> {
    let code = (word & 0x00FF) as u8;
    Socket::ALL.iter().find_map(|&socket| {
        Row::ALL
            .iter()
            .find(|&&row| row_code(socket, row) == code)
            .map(|&row| (socket, row))
    })
}
