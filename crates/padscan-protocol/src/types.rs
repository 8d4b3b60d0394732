//! Index types and the controller type enumeration.
//!
//! Ports, sockets, rows and banks are closed enums so that every lookup into
//! the code table, the mask tables and the row store is in range by
//! construction.

use crate::{ProtocolError, ProtocolResult, Readout};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical connector group. Each port owns a private set of lanes inside
/// every shared row word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Port {
    P0,
    P1,
}

impl Port {
    pub const ALL: [Port; 2] = [Port::P0, Port::P1];

    pub const fn index(self) -> usize {
        match self {
            Port::P0 => 0,
            Port::P1 => 1,
        }
    }
}

impl TryFrom<u8> for Port {
    type Error = ProtocolError;

    fn try_from(value: u8) -> ProtocolResult<Self> {
        match value {
            0 => Ok(Port::P0),
            1 => Ok(Port::P1),
            other => Err(ProtocolError::InvalidPort(other)),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.index())
    }
}

/// Device slot multiplexed on the scan bus through its own row-select codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Socket {
    S0,
    S1,
    S2,
    S3,
}

impl Socket {
    pub const ALL: [Socket; 4] = [Socket::S0, Socket::S1, Socket::S2, Socket::S3];

    pub const fn index(self) -> usize {
        match self {
            Socket::S0 => 0,
            Socket::S1 => 1,
            Socket::S2 => 2,
            Socket::S3 => 3,
        }
    }
}

impl TryFrom<u8> for Socket {
    type Error = ProtocolError;

    fn try_from(value: u8) -> ProtocolResult<Self> {
        match value {
            0 => Ok(Socket::S0),
            1 => Ok(Socket::S1),
            2 => Ok(Socket::S2),
            3 => Ok(Socket::S3),
            other => Err(ProtocolError::InvalidSocket(other)),
        }
    }
}

impl fmt::Display for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.index())
    }
}

/// One of the four 32-bit samples taken per (bank, socket).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Row {
    R0,
    R1,
    R2,
    R3,
}

impl Row {
    pub const ALL: [Row; 4] = [Row::R0, Row::R1, Row::R2, Row::R3];

    pub const fn index(self) -> usize {
        match self {
            Row::R0 => 0,
            Row::R1 => 1,
            Row::R2 => 2,
            Row::R3 => 3,
        }
    }
}

impl TryFrom<u8> for Row {
    type Error = ProtocolError;

    fn try_from(value: u8) -> ProtocolResult<Self> {
        match value {
            0 => Ok(Row::R0),
            1 => Ok(Row::R1),
            2 => Ok(Row::R2),
            3 => Ok(Row::R3),
            other => Err(ProtocolError::InvalidRow(other)),
        }
    }
}

/// Page of extended device data. Bank 0 is read every cycle; higher banks
/// only while the device keeps its continuation bit asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bank {
    B0,
    B1,
    B2,
    B3,
}

impl Bank {
    pub const ALL: [Bank; 4] = [Bank::B0, Bank::B1, Bank::B2, Bank::B3];

    pub const fn index(self) -> usize {
        match self {
            Bank::B0 => 0,
            Bank::B1 => 1,
            Bank::B2 => 2,
            Bank::B3 => 3,
        }
    }
}

impl TryFrom<u8> for Bank {
    type Error = ProtocolError;

    fn try_from(value: u8) -> ProtocolResult<Self> {
        match value {
            0 => Ok(Bank::B0),
            1 => Ok(Bank::B1),
            2 => Ok(Bank::B2),
            3 => Ok(Bank::B3),
            other => Err(ProtocolError::InvalidBank(other)),
        }
    }
}

/// Kind of controller detected in a socket.
///
/// `Banked` is an intermediate verdict of the basic classifier and is always
/// refined by the signature classifier before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ControllerType {
    #[default]
    #[serde(rename = "NONE")]
    Empty,
    #[serde(rename = "STDPAD")]
    StdPad,
    #[serde(rename = "ROTARY")]
    Rotary,
    #[serde(rename = "BANKED")]
    Banked,
    #[serde(rename = "HEAD")]
    Head,
    #[serde(rename = "KBM")]
    Kbm,
    #[serde(rename = "SIXDPAD")]
    SixDPad,
    #[serde(rename = "ANALOG")]
    Analog,
    /// Bank 0 never dropped its continuation bit within the sync budget.
    #[serde(rename = "ERR_NO_BANK")]
    ErrNoBank,
    /// Bank chain was read but its signature nibble is not a known family.
    #[serde(rename = "ERR_BK_UKN")]
    ErrBankUnknown,
    /// Bank-0 rows 2/3 carry a combination outside the basic table.
    #[serde(rename = "ERR_INVALID")]
    ErrInvalid,
}

impl ControllerType {
    pub const ALL: [ControllerType; 11] = [
        ControllerType::Empty,
        ControllerType::StdPad,
        ControllerType::Rotary,
        ControllerType::Banked,
        ControllerType::Head,
        ControllerType::Kbm,
        ControllerType::SixDPad,
        ControllerType::Analog,
        ControllerType::ErrNoBank,
        ControllerType::ErrBankUnknown,
        ControllerType::ErrInvalid,
    ];

    /// Upper-case name shown next to each socket.
    pub const fn name(self) -> &'static str {
        match self {
            ControllerType::Empty => "NONE",
            ControllerType::StdPad => "STDPAD",
            ControllerType::Rotary => "ROTARY",
            ControllerType::Banked => "BANKED",
            ControllerType::Head => "HEAD",
            ControllerType::Kbm => "KBM",
            ControllerType::SixDPad => "SIXDPAD",
            ControllerType::Analog => "ANALOG",
            ControllerType::ErrNoBank => "ERR_NO_BANK",
            ControllerType::ErrBankUnknown => "ERR_BK_UKN",
            ControllerType::ErrInvalid => "ERR_INVALID",
        }
    }

    /// Raw numeric code, in declaration order.
    pub const fn code(self) -> u8 {
        match self {
            ControllerType::Empty => 0,
            ControllerType::StdPad => 1,
            ControllerType::Rotary => 2,
            ControllerType::Banked => 3,
            ControllerType::Head => 4,
            ControllerType::Kbm => 5,
            ControllerType::SixDPad => 6,
            ControllerType::Analog => 7,
            ControllerType::ErrNoBank => 8,
            ControllerType::ErrBankUnknown => 9,
            ControllerType::ErrInvalid => 10,
        }
    }

    pub const fn is_error(self) -> bool {
        matches!(
            self,
            ControllerType::ErrNoBank | ControllerType::ErrBankUnknown | ControllerType::ErrInvalid
        )
    }

    /// Whether the value may be stored as a final detection verdict.
    pub const fn is_final(self) -> bool {
        !matches!(self, ControllerType::Banked)
    }

    /// Which live readout accompanies this controller type.
    pub const fn readout(self) -> Readout {
        match self {
            ControllerType::StdPad => Readout::StdPadButtons,
            ControllerType::SixDPad => Readout::SixAxisPanel,
            ControllerType::Empty
            | ControllerType::Rotary
            | ControllerType::Banked
            | ControllerType::Head
            | ControllerType::Kbm
            | ControllerType::Analog
            | ControllerType::ErrNoBank
            | ControllerType::ErrBankUnknown
            | ControllerType::ErrInvalid => Readout::Blank,
        }
    }
}

impl TryFrom<u8> for ControllerType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> ProtocolResult<Self> {
        ControllerType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == value)
            .ok_or(ProtocolError::UnknownControllerType(value))
    }
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_types_try_from() {
        assert_eq!(Port::try_from(1), Ok(Port::P1));
        assert_eq!(Port::try_from(2), Err(ProtocolError::InvalidPort(2)));
        assert_eq!(Socket::try_from(3), Ok(Socket::S3));
        assert_eq!(Socket::try_from(4), Err(ProtocolError::InvalidSocket(4)));
        assert_eq!(Row::try_from(4), Err(ProtocolError::InvalidRow(4)));
        assert_eq!(Bank::try_from(0), Ok(Bank::B0));
        assert_eq!(Bank::try_from(4), Err(ProtocolError::InvalidBank(4)));
    }

    #[test]
    fn test_index_matches_position() {
        for (i, socket) in Socket::ALL.iter().enumerate() {
            assert_eq!(socket.index(), i);
        }
        for (i, row) in Row::ALL.iter().enumerate() {
            assert_eq!(row.index(), i);
        }
        for (i, bank) in Bank::ALL.iter().enumerate() {
            assert_eq!(bank.index(), i);
        }
    }

    #[test]
    fn test_controller_codes_round_trip() -> Result<(), ProtocolError> {
        for ty in ControllerType::ALL {
            assert_eq!(ControllerType::try_from(ty.code())?, ty);
        }
        assert_eq!(
            ControllerType::try_from(11),
            Err(ProtocolError::UnknownControllerType(11))
        );
        Ok(())
    }

    #[test]
    fn test_controller_names() {
        assert_eq!(ControllerType::Empty.name(), "NONE");
        assert_eq!(ControllerType::ErrBankUnknown.name(), "ERR_BK_UKN");
        assert_eq!(format!("{:<11}|", ControllerType::Kbm), "KBM        |");
    }

    #[test]
    fn test_only_banked_is_transient() {
        for ty in ControllerType::ALL {
            assert_eq!(ty.is_final(), ty != ControllerType::Banked);
        }
    }

    #[test]
    fn test_error_states() {
        let errors: Vec<_> = ControllerType::ALL
            .iter()
            .filter(|t| t.is_error())
            .copied()
            .collect();
        assert_eq!(
            errors,
            vec![
                ControllerType::ErrNoBank,
                ControllerType::ErrBankUnknown,
                ControllerType::ErrInvalid
            ]
        );
    }

    #[test]
    fn test_serde_uses_display_names() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&ControllerType::SixDPad)?;
        assert_eq!(json, "\"SIXDPAD\"");
        let back: ControllerType = serde_json::from_str("\"ERR_NO_BANK\"")?;
        assert_eq!(back, ControllerType::ErrNoBank);
        Ok(())
    }
}
