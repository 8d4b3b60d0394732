//! Bank walker for chained ("banked") devices.
//!
//! A banked device asserts its c-bit in row 0 while it is not on its first
//! page. The walker first re-scans bank 0 until that bit drops (the device is
//! back on page 0), then reads banks 1..3 until the bit drops again.

use crate::bus::ScanBus;
use crate::scanner::scan_socket;
use padscan_protocol::{Bank, MAX_BANK, MAX_BANK_SYNC_ATTEMPTS, Port, Row, RowStore, Socket};
use tracing::{debug, warn};

/// Successful bank walk: banks `0..len` hold the device's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankChain {
    len: u8,
}

impl BankChain {
    /// Number of banks read, 1..=4.
    pub fn bank_count(&self) -> u8 {
        self.len
    }

    /// Bank holding the last page of the chain (`len - 1`).
    pub fn last_bank(&self) -> Bank {
        match self.len {
            0 | 1 => Bank::B0,
            2 => Bank::B1,
            3 => Bank::B2,
            _ => Bank::B3,
        }
    }
}

/// Walk the bank chain of `socket` as seen through `port`'s c-bit.
///
/// Returns `None` when bank 0 never drops its continuation bit: after ten
/// checked scans an eleventh is issued and the walk gives up, bounding the
/// time spent on a socket that never settles.
pub fn walk_banks<B: ScanBus + ?Sized>(
    bus: &mut B,
    store: &mut RowStore,
    port: Port,
    socket: Socket,
) -> Option<BankChain> {
    let mut attempts: u8 = 0;
    loop {
        scan_socket(bus, store, socket, Bank::B0);
        attempts += 1;
        if attempts > MAX_BANK_SYNC_ATTEMPTS {
            warn!(
                port = port.index(),
                socket = socket.index(),
                attempts,
                "bank 0 never dropped its continuation bit"
            );
            return None;
        }
        if !store.c_bit(port, Bank::B0, socket, Row::R0) {
            break;
        }
    }

    let mut len = MAX_BANK as u8;
    for bank in [Bank::B1, Bank::B2, Bank::B3] {
        scan_socket(bus, store, socket, bank);
        if !store.c_bit(port, bank, socket, Row::R0) {
            len = bank.index() as u8;
            break;
        }
    }

    debug!(
        port = port.index(),
        socket = socket.index(),
        sync_attempts = attempts,
        banks = len,
        "bank chain read"
    );
    Some(BankChain { len })
}
