use std::fmt::Display;
use std::io;

use thiserror::Error;

/// A field of an Ethernet II frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Dst,
    Src,
    EtherType,
    Payload,
    Trailer,
}

impl Field {
    /// Human readable length requirement of the field.
    pub const fn expected(&self) -> &'static str {
        match self {
            Field::Dst | Field::Src => "6 bytes",
            Field::EtherType => "2 bytes",
            Field::Payload => "at most 1500 bytes",
            Field::Trailer => "4 bytes",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Dst => "dst",
            Field::Src => "src",
            Field::EtherType => "ethertype",
            Field::Payload => "payload",
            Field::Trailer => "trailer",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("`{field}` is {actual} bytes long, expected {}", .field.expected())]
    InvalidFieldLength { field: Field, actual: usize },

    #[error("invalid mac address '{0}'")]
    InvalidMacAddr(String),

    #[error("no permission to open a raw socket")]
    PermissionDenied(#[source] io::Error),

    #[error("interface '{0}' not found")]
    InterfaceNotFound(String),

    #[error("failed to bind to interface '{interface}'")]
    BindError {
        interface: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to transmit frame")]
    TransmitError(#[source] io::Error),

    #[error("transmitter is closed")]
    InvalidState,
}

impl Error {
    pub(crate) fn invalid_len(field: Field, actual: usize) -> Self {
        Error::InvalidFieldLength { field, actual }
    }
}
