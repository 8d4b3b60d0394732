//! Bit decoding: basic-type table, bank signature and button/axis extraction.
//!
//! All functions are pure and allocation-free. Buttons are active-low: a
//! button reads as pressed when its masked bit is 0.

#![deny(static_mut_refs)]

use crate::ids::bits::{B0, B1, B2, B3, J8, J9, J10, J11, J12, J13, J14, J15};
use crate::ids::{axis_shift, b_bit_mask};
use crate::rows::RowStore;
use crate::types::{Bank, ControllerType, Port, Row, Socket};
use serde::Serialize;

/// Basic type from the c-bits of bank-0 rows 2 and 3.
pub const fn classify_rows(row2_c: bool, row3_c: bool) -> ControllerType {
    match (row2_c, row3_c) {
        (true, true) => ControllerType::StdPad,
        (true, false) => ControllerType::Rotary,
        (false, true) => ControllerType::Banked,
        (false, false) => ControllerType::ErrInvalid,
    }
}

/// Assemble the 4-bit family signature of a banked device.
///
/// Samples the port's b-bit in rows 3, 2, 1, 0 of `last_bank`, most
/// significant bit first.
pub fn signature_nibble(store: &RowStore, port: Port, socket: Socket, last_bank: Bank) -> u8 {
    Row::ALL.iter().rev().fold(0u8, |acc, &row| {
        (acc << 1) | u8::from(store.b_bit(port, last_bank, socket, row))
    })
}

/// Map a signature nibble to its device family. Bits above the nibble are ignored.
pub const fn decode_signature(nibble: u8) -> ControllerType {
    match nibble & 0x0F {
        0x7 => ControllerType::Head,
        0xD => ControllerType::Kbm,
        0xE => ControllerType::SixDPad,
        0xF => ControllerType::Analog,
        _ => ControllerType::ErrBankUnknown,
    }
}

/// Build an 8-bit axis value from two axis-lane nibbles.
///
/// The high nibble comes from `hi`, the low nibble from `lo`; both are taken
/// from the port's axis lane.
pub fn assemble_axis(
    store: &RowStore,
    port: Port,
    socket: Socket,
    hi: (Bank, Row),
    lo: (Bank, Row),
) -> u8 {
    let shift = axis_shift(port);
    let high = (store.get(hi.0, socket, hi.1) >> (shift - 4)) & 0xF0;
    let low = (store.get(lo.0, socket, lo.1) >> shift) & 0x0F;
    (high | low) as u8
}

/// Pressed state of one labelled button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ButtonState {
    pub label: char,
    pub pressed: bool,
}

/// Standard pad / keypad button: always read from bank 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdPadButton {
    pub label: char,
    pub row: Row,
    masks: [u32; 2],
}

impl StdPadButton {
    const fn new(label: char, row: Row, p0: u32, p1: u32) -> Self {
        Self {
            label,
            row,
            masks: [p0, p1],
        }
    }

    pub const fn mask(&self, port: Port) -> u32 {
        match port {
            Port::P0 => self.masks[0],
            Port::P1 => self.masks[1],
        }
    }
}

pub const STDPAD_BUTTON_COUNT: usize = 21;

/// D-pad, pause/option, fire buttons and the 12-key keypad.
pub const STDPAD_BUTTONS: [StdPadButton; STDPAD_BUTTON_COUNT] = [
    StdPadButton::new('^', Row::R0, J8, J12),
    StdPadButton::new('v', Row::R0, J9, J13),
    StdPadButton::new('<', Row::R0, J10, J14),
    StdPadButton::new('>', Row::R0, J11, J15),
    StdPadButton::new('P', Row::R0, B0, B2),
    StdPadButton::new('O', Row::R3, B1, B3),
    StdPadButton::new('C', Row::R2, B1, B3),
    StdPadButton::new('B', Row::R1, B1, B3),
    StdPadButton::new('A', Row::R0, B1, B3),
    StdPadButton::new('1', Row::R1, J11, J15),
    StdPadButton::new('2', Row::R2, J11, J15),
    StdPadButton::new('3', Row::R3, J11, J15),
    StdPadButton::new('4', Row::R1, J10, J14),
    StdPadButton::new('5', Row::R2, J10, J14),
    StdPadButton::new('6', Row::R3, J10, J14),
    StdPadButton::new('7', Row::R1, J9, J13),
    StdPadButton::new('8', Row::R2, J9, J13),
    StdPadButton::new('9', Row::R3, J9, J13),
    StdPadButton::new('*', Row::R1, J8, J12),
    StdPadButton::new('0', Row::R2, J8, J12),
    StdPadButton::new('#', Row::R3, J8, J12),
];

/// Six-axis pad button: read from the port's b-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SixDPadButton {
    pub label: char,
    pub bank: Bank,
    pub row: Row,
}

impl SixDPadButton {
    const fn new(label: char, bank: Bank, row: Row) -> Self {
        Self { label, bank, row }
    }
}

pub const SIXDPAD_BUTTON_COUNT: usize = 7;

pub const SIXDPAD_BUTTONS: [SixDPadButton; SIXDPAD_BUTTON_COUNT] = [
    SixDPadButton::new('A', Bank::B0, Row::R0),
    SixDPadButton::new('B', Bank::B0, Row::R1),
    SixDPadButton::new('C', Bank::B0, Row::R2),
    SixDPadButton::new('D', Bank::B0, Row::R3),
    SixDPadButton::new('E', Bank::B1, Row::R3),
    SixDPadButton::new('F', Bank::B1, Row::R2),
    SixDPadButton::new('G', Bank::B1, Row::R1),
];

/// Analog pad button: bank, row and a per-port mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalogButton {
    pub label: char,
    pub bank: Bank,
    pub row: Row,
    masks: [u32; 2],
}

impl AnalogButton {
    const fn new(label: char, bank: Bank, row: Row, p0: u32, p1: u32) -> Self {
        Self {
            label,
            bank,
            row,
            masks: [p0, p1],
        }
    }

    pub const fn mask(&self, port: Port) -> u32 {
        match port {
            Port::P0 => self.masks[0],
            Port::P1 => self.masks[1],
        }
    }
}

pub const ANALOG_BUTTON_COUNT: usize = 8;

pub const ANALOG_BUTTONS: [AnalogButton; ANALOG_BUTTON_COUNT] = [
    AnalogButton::new('^', Bank::B1, Row::R0, J8, J12),
    AnalogButton::new('v', Bank::B1, Row::R0, J9, J13),
    AnalogButton::new('<', Bank::B1, Row::R0, J10, J14),
    AnalogButton::new('>', Bank::B1, Row::R0, J11, J15),
    AnalogButton::new('A', Bank::B0, Row::R0, B1, B3),
    AnalogButton::new('B', Bank::B0, Row::R1, B1, B3),
    AnalogButton::new('C', Bank::B0, Row::R2, B1, B3),
    AnalogButton::new('D', Bank::B0, Row::R3, B1, B3),
];

fn is_pressed(word: u32, mask: u32) -> bool {
    word & mask == 0
}

/// Bit `i` set when `buttons[i]` is pressed.
fn pressed_mask(buttons: &[ButtonState]) -> u32 {
    buttons
        .iter()
        .enumerate()
        .filter(|(_, b)| b.pressed)
        .fold(0, |mask, (i, _)| mask | (1 << i))
}

/// Decoded standard pad buttons, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StdPadState {
    pub buttons: [ButtonState; STDPAD_BUTTON_COUNT],
}

impl StdPadState {
    pub fn from_rows(store: &RowStore, port: Port, socket: Socket) -> Self {
        let buttons = STDPAD_BUTTONS.map(|b| ButtonState {
            label: b.label,
            pressed: is_pressed(store.get(Bank::B0, socket, b.row), b.mask(port)),
        });
        Self { buttons }
    }

    pub fn is_pressed(&self, label: char) -> bool {
        self.buttons.iter().any(|b| b.label == label && b.pressed)
    }

    pub fn pressed_count(&self) -> usize {
        self.buttons.iter().filter(|b| b.pressed).count()
    }

    /// Pressed buttons as a bitmask in `STDPAD_BUTTONS` order.
    pub fn pressed_mask(&self) -> u32 {
        pressed_mask(&self.buttons)
    }
}

/// Six 8-bit axes of a banked six-axis pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SixAxis {
    pub x: i8,
    pub y: i8,
    pub z: u8,
    pub tx: i8,
    pub ty: i8,
    pub tz: u8,
}

impl SixAxis {
    /// Decode from banks 0..2. Each axis is (high nibble source, low nibble source).
    pub fn from_rows(store: &RowStore, port: Port, socket: Socket) -> Self {
        let axis = |hi, lo| assemble_axis(store, port, socket, hi, lo);
        Self {
            x: axis((Bank::B0, Row::R3), (Bank::B0, Row::R0)) as i8,
            y: axis((Bank::B1, Row::R3), (Bank::B0, Row::R1)) as i8,
            z: axis((Bank::B2, Row::R3), (Bank::B0, Row::R2)),
            tx: axis((Bank::B2, Row::R0), (Bank::B1, Row::R0)) as i8,
            ty: axis((Bank::B2, Row::R1), (Bank::B1, Row::R1)) as i8,
            tz: axis((Bank::B2, Row::R2), (Bank::B1, Row::R2)),
        }
    }
}

/// Decoded six-axis pad: axes plus buttons A..G.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SixDPadState {
    pub axes: SixAxis,
    pub buttons: [ButtonState; SIXDPAD_BUTTON_COUNT],
}

impl SixDPadState {
    pub fn from_rows(store: &RowStore, port: Port, socket: Socket) -> Self {
        let mask = b_bit_mask(port);
        let buttons = SIXDPAD_BUTTONS.map(|b| ButtonState {
            label: b.label,
            pressed: is_pressed(store.get(b.bank, socket, b.row), mask),
        });
        Self {
            axes: SixAxis::from_rows(store, port, socket),
            buttons,
        }
    }

    pub fn is_pressed(&self, label: char) -> bool {
        self.buttons.iter().any(|b| b.label == label && b.pressed)
    }

    pub fn pressed_mask(&self) -> u32 {
        pressed_mask(&self.buttons)
    }
}

/// Decoded analog pad buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalogPadState {
    pub buttons: [ButtonState; ANALOG_BUTTON_COUNT],
}

impl AnalogPadState {
    pub fn from_rows(store: &RowStore, port: Port, socket: Socket) -> Self {
        let buttons = ANALOG_BUTTONS.map(|b| ButtonState {
            label: b.label,
            pressed: is_pressed(store.get(b.bank, socket, b.row), b.mask(port)),
        });
        Self { buttons }
    }

    pub fn is_pressed(&self, label: char) -> bool {
        self.buttons.iter().any(|b| b.label == label && b.pressed)
    }

    pub fn pressed_mask(&self) -> u32 {
        pressed_mask(&self.buttons)
    }
}
