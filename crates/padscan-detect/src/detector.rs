//! Detection context and per-cycle orchestration.

use crate::bus::ScanBus;
use crate::classify::{classify_basic, classify_signature, classify_socket};
use crate::result::DetectionResult;
use crate::scanner::scan_all_bank0;
use crate::walker::walk_banks;
use padscan_protocol::{
    AnalogPadState, Bank, ControllerType, Port, Row, RowStore, SixDPadState, Socket, StdPadState,
};
use tracing::{debug, warn};

/// Owns the bus, the row store, the detection matrix and the frame counter.
///
/// One `Detector` is one thread of control: `run_cycle` scans, classifies and
/// overwrites the previous result; nothing carries over between cycles except
/// whatever state the devices themselves keep.
pub struct Detector<B: ScanBus> {
    bus: B,
    rows: RowStore,
    result: DetectionResult,
    frame: u16,
}

impl<B: ScanBus> Detector<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            rows: RowStore::new(),
            result: DetectionResult::new(),
            frame: 0,
        }
    }

    /// One detection cycle: scan bank 0 of every socket, then classify.
    pub fn run_cycle(&mut self) -> &DetectionResult {
        self.scan_bank0();
        self.detect_all();
        self.frame = self.frame.wrapping_add(1);
        &self.result
    }

    /// Self-test cycle: show the frame-driven pattern, leave the bus alone.
    pub fn run_demo_cycle(&mut self) -> &DetectionResult {
        self.result = DetectionResult::demo_pattern(self.frame);
        self.frame = self.frame.wrapping_add(1);
        &self.result
    }

    /// Scan bank 0 of all sockets into the row store.
    pub fn scan_bank0(&mut self) {
        scan_all_bank0(&mut self.bus, &mut self.rows);
    }

    /// Classify every port from the current row store.
    ///
    /// When a port's mode bit (bank 0, socket 3, row 1) is high there is no
    /// socket fan-out on that port: socket 0 is a fixed standard pad, sockets
    /// 2 and 3 are empty, and only a banked device is looked for on socket 1.
    pub fn detect_all(&mut self) {
        for port in Port::ALL {
            let single_device = self.rows.c_bit(port, Bank::B0, Socket::S3, Row::R1);
            debug!(port = port.index(), single_device, "detecting port");

            if !single_device {
                for socket in Socket::ALL {
                    let ty = classify_socket(&mut self.bus, &mut self.rows, port, socket);
                    self.result.set(port, socket, ty);
                }
            } else {
                self.result.set(port, Socket::S0, ControllerType::StdPad);
                self.result.set(port, Socket::S2, ControllerType::Empty);
                self.result.set(port, Socket::S3, ControllerType::Empty);

                let ty = match classify_basic(&self.rows, port, Socket::S1) {
                    ControllerType::Banked => {
                        classify_signature(&mut self.bus, &mut self.rows, port, Socket::S1)
                    }
                    _ => ControllerType::Empty,
                };
                self.result.set(port, Socket::S1, ty);
            }
        }
    }

    pub fn result(&self) -> &DetectionResult {
        &self.result
    }

    /// Cycles run so far, wrapping at 16 bits.
    pub fn frame(&self) -> u16 {
        self.frame
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Standard pad buttons from the latest bank-0 scan. No bus traffic.
    pub fn sample_std_pad(&self, port: Port, socket: Socket) -> StdPadState {
        StdPadState::from_rows(&self.rows, port, socket)
    }

    /// Re-walk the bank chain and decode six axes plus buttons A..G.
    pub fn sample_six_dpad(&mut self, port: Port, socket: Socket) -> SixDPadState {
        self.refresh_banks(port, socket);
        SixDPadState::from_rows(&self.rows, port, socket)
    }

    /// Re-walk the bank chain and decode the analog pad buttons.
    pub fn sample_analog_buttons(&mut self, port: Port, socket: Socket) -> AnalogPadState {
        self.refresh_banks(port, socket);
        AnalogPadState::from_rows(&self.rows, port, socket)
    }

    fn refresh_banks(&mut self, port: Port, socket: Socket) {
        if walk_banks(&mut self.bus, &mut self.rows, port, socket).is_none() {
            warn!(
                port = port.index(),
                socket = socket.index(),
                "decoding from stale banks"
            );
        }
    }
}
