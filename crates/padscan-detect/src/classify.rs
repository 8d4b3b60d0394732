//! Basic and banked-signature classification of a single socket.

use crate::bus::ScanBus;
use crate::walker::walk_banks;
use padscan_protocol::{
    Bank, ControllerType, Port, Row, RowStore, Socket, classify_rows, decode_signature,
    signature_nibble,
};
use tracing::debug;

/// Basic type from the c-bits of bank-0 rows 2 and 3.
///
/// Returns one of `StdPad`, `Rotary`, `Banked` or `ErrInvalid`.
pub fn classify_basic(store: &RowStore, port: Port, socket: Socket) -> ControllerType {
    classify_rows(
        store.c_bit(port, Bank::B0, socket, Row::R2),
        store.c_bit(port, Bank::B0, socket, Row::R3),
    )
}

/// Walk the bank chain and decode the family signature of its last bank.
pub fn classify_signature<B: ScanBus + ?Sized>(
    bus: &mut B,
    store: &mut RowStore,
    port: Port,
    socket: Socket,
) -> ControllerType {
    let Some(chain) = walk_banks(bus, store, port, socket) else {
        return ControllerType::ErrNoBank;
    };

    let nibble = signature_nibble(store, port, socket, chain.last_bank());
    let ty = decode_signature(nibble);
    debug!(
        port = port.index(),
        socket = socket.index(),
        signature = format_args!("{nibble:#x}"),
        kind = ty.name(),
        "banked signature decoded"
    );
    ty
}

/// Full classification of one socket: basic type, refined when banked.
pub fn classify_socket<B: ScanBus + ?Sized>(
    bus: &mut B,
    store: &mut RowStore,
    port: Port,
    socket: Socket,
) -> ControllerType {
    match classify_basic(store, port, socket) {
        ControllerType::Banked => classify_signature(bus, store, port, socket),
        basic => basic,
    }
}
