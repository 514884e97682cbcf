use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::protocol::*;
use crate::Result;

const DEFAULT_INTERFACE: &str = "eth0";
const DEFAULT_MAC: MacAddr = MacAddr::from_bytes([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
const DEFAULT_ETHER_TYPE: EtherType = EtherType::new(0x0801);
const DEFAULT_PAYLOAD: [u8; 100] = [b'P'; 100];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transmit: TransmitConfig,
    pub frame: FrameConfig,
}

impl Config {
    pub fn from_json(config: &str) -> serde_json::Result<Self> {
        serde_json::from_str(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmitConfig {
    pub interface: String,

    /// Ask the NIC not to append the frame check sequence. Best effort.
    pub no_fcs: bool,
}

impl Default for TransmitConfig {
    fn default() -> Self {
        Self {
            interface: DEFAULT_INTERFACE.to_string(),
            no_fcs: false,
        }
    }
}

impl TransmitConfig {
    pub fn new(interface: &str) -> Self {
        Self {
            interface: interface.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub dst: MacAddr,
    pub src: MacAddr,
    pub ether_type: EtherType,
    pub payload: Vec<u8>,
    pub trailer: Option<Trailer>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            dst: DEFAULT_MAC,
            src: DEFAULT_MAC,
            ether_type: DEFAULT_ETHER_TYPE,
            payload: DEFAULT_PAYLOAD.to_vec(),
            trailer: None,
        }
    }
}

impl FrameConfig {
    pub fn build(&self) -> Result<Frame> {
        Frame::new(
            EthHeader::new(self.dst, self.src, self.ether_type),
            &self.payload,
            self.trailer,
        )
    }
}
