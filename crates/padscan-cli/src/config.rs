//! Run configuration and simulated bus fixture.
//!
//! A config file is YAML (`.yaml`/`.yml`) or JSON (`.json`):
//!
//! ```yaml
//! frames: 10
//! interval_ms: 16
//! demo: false
//! bus:
//!   sockets:
//!     1:
//!       - [0x2, 0x2, 0x2, 0x3]
//!       - [0x3, 0x2, 0x2, 0x3]
//! ```
//!
//! Each socket holds the pages its device answers with, one page per scan.

use std::collections::BTreeMap;
use std::path::Path;

use padscan_detect::Page;
use padscan_detect::bus::mock::MockScanBus;
use padscan_protocol::Socket;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Cycles to run; 0 runs until interrupted.
    pub frames: u64,
    /// Frame period in milliseconds; 0 runs cycles back to back.
    pub interval_ms: u64,
    /// Show the self-test pattern instead of scanning.
    pub demo: bool,
    pub bus: BusFixture,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frames: 1,
            interval_ms: 0,
            demo: false,
            bus: BusFixture::default(),
        }
    }
}

/// Devices attached to the simulated bus, keyed by socket index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusFixture {
    pub sockets: BTreeMap<u8, Vec<Page>>,
}

impl BusFixture {
    /// Build the simulated bus. Sockets without pages read idle.
    pub fn build(&self) -> Result<MockScanBus, CliError> {
        let mut bus = MockScanBus::new();
        for (&index, pages) in &self.sockets {
            let socket = Socket::try_from(index)?;
            if pages.is_empty() {
                return Err(CliError::InvalidConfiguration(format!(
                    "socket {index} has an empty page list"
                )));
            }
            debug!(socket = index, pages = pages.len(), "attaching device");
            bus.set_pages(socket, pages.clone());
        }
        Ok(bus)
    }
}

impl Config {
    /// Load a config file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Err(CliError::ConfigNotFound(path.display().to_string()));
        }

        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let config = match extension.as_deref() {
            Some("json") => serde_json::from_str(&text)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
            _ => {
                return Err(CliError::InvalidConfiguration(format!(
                    "unsupported config format: {}",
                    path.display()
                )));
            }
        };
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
