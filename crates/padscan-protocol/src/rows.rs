//! Bank × socket × row store of raw scan words.

use crate::ids::{b_bit_mask, c_bit_mask};
use crate::types::{Bank, Port, Row, Socket};
use crate::{MAX_BANK, MAX_ROW, MAX_SOCKET};

/// Raw 32-bit words latched by the row scanner.
///
/// A word's meaning depends on the port whose masks are applied to it; the
/// store itself is port-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowStore {
    rows: [[[u32; MAX_ROW]; MAX_SOCKET]; MAX_BANK],
}

// Typed indices are bounded by their enum's arity.
#[allow(clippy::indexing_slicing)]
impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bank: Bank, socket: Socket, row: Row) -> u32 {
        self.rows[bank.index()][socket.index()][row.index()]
    }

    pub fn set(&mut self, bank: Bank, socket: Socket, row: Row, value: u32) {
        self.rows[bank.index()][socket.index()][row.index()] = value;
    }

    /// All four rows of one (bank, socket) pair.
    pub fn socket_rows(&self, bank: Bank, socket: Socket) -> [u32; MAX_ROW] {
        self.rows[bank.index()][socket.index()]
    }

    pub fn set_socket_rows(&mut self, bank: Bank, socket: Socket, values: [u32; MAX_ROW]) {
        self.rows[bank.index()][socket.index()] = values;
    }

    /// Whether the port's c-bit is set in the given word.
    pub fn c_bit(&self, port: Port, bank: Bank, socket: Socket, row: Row) -> bool {
        self.get(bank, socket, row) & c_bit_mask(port) != 0
    }

    /// Whether the port's b-bit is set in the given word.
    pub fn b_bit(&self, port: Port, bank: Bank, socket: Socket, row: Row) -> bool {
        self.get(bank, socket, row) & b_bit_mask(port) != 0
    }
}
