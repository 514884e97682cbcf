use std::fmt::{Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const MAC_ADDR_LEN: usize = 6;
pub const ETHER_TYPE_LEN: usize = 2;
pub const HEADER_LEN: usize = 2 * MAC_ADDR_LEN + ETHER_TYPE_LEN;
pub const TRAILER_LEN: usize = 4;

/// Largest payload of a standard (non-jumbo) frame.
pub const MAX_PAYLOAD_LEN: usize = 1500;
pub const MAX_FRAME_LEN: usize = HEADER_LEN + MAX_PAYLOAD_LEN + TRAILER_LEN;

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddr {
    raw: [u8; MAC_ADDR_LEN],
}

impl MacAddr {
    pub const BROADCAST: Self = Self::from_bytes([0xff; MAC_ADDR_LEN]);

    #[inline(always)]
    pub const fn new() -> Self {
        Self::from_bytes([0; MAC_ADDR_LEN])
    }

    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; MAC_ADDR_LEN]) -> Self {
        Self { raw: bytes }
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> [u8; MAC_ADDR_LEN] {
        self.raw
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl Default for MacAddr {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MacAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.raw[0], self.raw[1], self.raw[2], self.raw[3], self.raw[4], self.raw[5]
        ))
    }
}

impl Debug for MacAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[{}]", self))
    }
}

impl FromStr for MacAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMacAddr(s.to_string());

        let mut raw = [0; MAC_ADDR_LEN];
        let mut octets = s.split(':');

        for byte in raw.iter_mut() {
            let octet = octets.next().ok_or_else(invalid)?;
            if octet.is_empty() || octet.len() > 2 {
                return Err(invalid());
            }
            *byte = u8::from_str_radix(octet, 16).map_err(|_| invalid())?;
        }

        if octets.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::from_bytes(raw))
    }
}

impl TryFrom<String> for MacAddr {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddr> for String {
    fn from(value: MacAddr) -> Self {
        value.to_string()
    }
}

/// Identifies the payload protocol. Any value is accepted; the constants
/// are only the common registered ones.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EtherType(u16);

impl EtherType {
    pub const IPV4: Self = Self(0x0800);
    pub const ARP: Self = Self(0x0806);
    pub const IPV6: Self = Self(0x86DD);

    #[inline(always)]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline(always)]
    pub const fn from_be_bytes(bytes: [u8; ETHER_TYPE_LEN]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    #[inline(always)]
    pub const fn to_be_bytes(self) -> [u8; ETHER_TYPE_LEN] {
        self.0.to_be_bytes()
    }

    #[inline(always)]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Debug for EtherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("EtherType({:#06x})", self.0))
    }
}

/// A pre-computed frame check sequence, appended verbatim.
///
/// The bytes go onto the wire in the order given; nothing here knows or
/// cares whether they hold a big- or little-endian CRC-32.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trailer([u8; TRAILER_LEN]);

impl Trailer {
    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; TRAILER_LEN]) -> Self {
        Self(bytes)
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> [u8; TRAILER_LEN] {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthHeader {
    pub dst: MacAddr,
    pub src: MacAddr,
    pub ether_ty: EtherType,
}

impl EthHeader {
    pub const fn new(dst: MacAddr, src: MacAddr, ether_ty: EtherType) -> Self {
        Self { dst, src, ether_ty }
    }

    /// Wire layout: dst, src, then the EtherType in network byte order.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0; HEADER_LEN];
        bytes[..MAC_ADDR_LEN].copy_from_slice(&self.dst.as_bytes());
        bytes[MAC_ADDR_LEN..2 * MAC_ADDR_LEN].copy_from_slice(&self.src.as_bytes());
        bytes[2 * MAC_ADDR_LEN..].copy_from_slice(&self.ether_ty.to_be_bytes());
        bytes
    }
}
