pub use crate::config::{Config, FrameConfig, TransmitConfig};
pub use crate::error::{Error, Field};
pub use crate::frame::Frame;
pub use crate::protocol::{EthHeader, EtherType, MacAddr, Trailer};
#[cfg(target_os = "linux")]
pub use crate::transmitter::Transmitter;
pub use crate::Result;
