//! Port × socket matrix of detected controller types.

use padscan_protocol::{ControllerType, MAX_PORT, MAX_SOCKET, Port, Socket};
use serde::Serialize;

/// Result of one detection cycle. Fully recomputed every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DetectionResult {
    ports: [[ControllerType; MAX_SOCKET]; MAX_PORT],
}

// Typed indices are bounded by their enum's arity.
#[allow(clippy::indexing_slicing)]
impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, port: Port, socket: Socket) -> ControllerType {
        self.ports[port.index()][socket.index()]
    }

    pub fn set(&mut self, port: Port, socket: Socket, ty: ControllerType) {
        self.ports[port.index()][socket.index()] = ty;
    }

    /// All four sockets of a port, in socket order.
    pub fn port(&self, port: Port) -> [ControllerType; MAX_SOCKET] {
        self.ports[port.index()]
    }

    /// Every (port, socket, type) triple, port-major.
    pub fn iter(&self) -> impl Iterator<Item = (Port, Socket, ControllerType)> + '_ {
        Port::ALL.into_iter().flat_map(move |port| {
            Socket::ALL
                .into_iter()
                .map(move |socket| (port, socket, self.get(port, socket)))
        })
    }

    /// Self-test pattern driven by a frame counter instead of the bus.
    ///
    /// Port 0 socket `s` shows code `(frame >> (3 + s)) & 7`, port 1 shows the
    /// bitwise complement of the same field, so every code 0..7 scrolls past.
    pub fn demo_pattern(frame: u16) -> Self {
        let mut result = Self::new();
        for socket in Socket::ALL {
            let field = frame >> (3 + socket.index());
            result.set(Port::P0, socket, low_code(field));
            result.set(Port::P1, socket, low_code(!field));
        }
        result
    }
}

fn low_code(value: u16) -> ControllerType {
    ControllerType::ALL
        .get(usize::from(value & 0x7))
        .copied()
        .unwrap_or_default()
}
