//! Row scanner: latches the four row words of one socket into a bank slot.

use crate::bus::ScanBus;
use padscan_protocol::{Bank, Row, RowStore, Socket, select_word};
use tracing::trace;

/// Scan all four rows of `socket` into `rows[bank][socket][0..3]`.
///
/// Each select is immediately followed by its read, in row order.
pub fn scan_socket<B: ScanBus + ?Sized>(
    bus: &mut B,
    store: &mut RowStore,
    socket: Socket,
    bank: Bank,
) {
    for row in Row::ALL {
        bus.write_select(select_word(socket, row));
        let value = bus.read_row();
        store.set(bank, socket, row, value);
    }
    trace!(
        socket = socket.index(),
        bank = bank.index(),
        rows = ?store.socket_rows(bank, socket),
        "scanned socket"
    );
}

/// Scan bank 0 of every socket, in socket order.
pub fn scan_all_bank0<B: ScanBus + ?Sized>(bus: &mut B, store: &mut RowStore) {
    for socket in Socket::ALL {
        scan_socket(bus, store, socket, Bank::B0);
    }
}
