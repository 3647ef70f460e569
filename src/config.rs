//! Gateway process configuration rendering.
//!
//! The gateway server is configured with a JSON document naming its listen
//! address and, per device, the mapping from packet offsets to physical
//! output positions. [`crate::OpcClient::server_config`] renders this
//! document from the client's attached layout.

use serde::Serialize;

/// Top-level gateway configuration document.
#[derive(Debug, Serialize)]
pub struct ServerConfig {
    /// Host and port the gateway should listen on.
    pub listen: (String, u16),
    pub verbose: bool,
    pub devices: Vec<DeviceConfig>,
}

/// One `fadecandy`-typed device entry.
#[derive(Debug, Serialize)]
pub struct DeviceConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub dither: bool,
    pub interpolate: bool,
    /// Rows of `[channel, packet offset, line offset, pixel count]`.
    pub map: Vec<(u8, usize, usize, usize)>,
}

impl ServerConfig {
    /// Serialize to the JSON document the gateway consumes.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .expect("a configuration document always serializes")
    }
}
