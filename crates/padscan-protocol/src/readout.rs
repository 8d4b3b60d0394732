//! Live readout attached to a detected controller type.

use serde::{Deserialize, Serialize};

/// Which panel a renderer draws under a socket's type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readout {
    /// Nothing beyond the type name.
    Blank,
    /// Keypad and d-pad button states from bank-0 rows.
    StdPadButtons,
    /// Six 8-bit axes and seven buttons spread over banks 0..2.
    SixAxisPanel,
}

impl Readout {
    pub fn is_blank(self) -> bool {
        matches!(self, Readout::Blank)
    }
}
