use std::io;
use std::os::fd::OwnedFd;

use crate::config::TransmitConfig;
use crate::error::Error;
use crate::frame::Frame;
use crate::sys::{self, SocketOpts};
use crate::Result;

/// A link-layer raw socket bound to one network interface.
///
/// The socket is released by [`close`](Self::close) or, at the latest, when
/// the transmitter is dropped.
#[derive(Debug)]
pub struct Transmitter {
    fd: Option<OwnedFd>,
    interface: String,
    ifindex: u32,
    opts: SocketOpts,
}

impl Transmitter {
    pub fn open(interface: &str) -> Result<Self> {
        Self::open_with(&TransmitConfig::new(interface))
    }

    pub fn open_with(config: &TransmitConfig) -> Result<Self> {
        let interface = config.interface.as_str();

        // resolve the name first, it doesn't need any privilege
        let ifindex = sys::if_nametoindex(interface).map_err(|e| {
            log::debug!("failed to resolve interface '{}': {}", interface, e);
            Error::InterfaceNotFound(interface.to_string())
        })?;

        let fd = sys::packet_socket().map_err(|e| socket_error(interface, e))?;
        sys::bind_to_ifindex(&fd, ifindex).map_err(|e| bind_error(interface, e))?;

        let mut opts = SocketOpts::empty();
        opts.set(SocketOpts::NO_FCS, config.no_fcs);
        if let Err(e) = sys::set_opts(&fd, opts) {
            log::warn!("'{}' ignored socket options {:?}: {}", interface, opts, e);
            opts = SocketOpts::empty();
        }

        log::debug!("opened interface '{}' (index {})", interface, ifindex);

        let mut tx = Self::from_parts(fd, interface, ifindex);
        tx.opts = opts;
        Ok(tx)
    }

    fn from_parts(fd: OwnedFd, interface: &str, ifindex: u32) -> Self {
        Self {
            fd: Some(fd),
            interface: interface.to_string(),
            ifindex,
            opts: SocketOpts::empty(),
        }
    }

    /// Transmit the frame as a single link-layer unit. Nothing is retried.
    ///
    /// Devices that can't leave out the FCS reject every send with
    /// `EPROTONOSUPPORT` while `SO_NOFCS` is set. The frame never left the
    /// host then, so the hint is dropped for good and the frame goes out
    /// with a hardware FCS instead.
    pub fn send(&mut self, frame: &Frame) -> Result<()> {
        let fd = self.fd.as_ref().ok_or(Error::InvalidState)?;

        let sent = match sys::send(fd, frame.as_bytes()) {
            Err(e)
                if e.raw_os_error() == Some(libc::EPROTONOSUPPORT)
                    && self.opts.contains(SocketOpts::NO_FCS) =>
            {
                log::warn!("'{}' can't omit the FCS, sending with it", self.interface);
                sys::clear_opts(fd, SocketOpts::NO_FCS).map_err(Error::TransmitError)?;
                self.opts.remove(SocketOpts::NO_FCS);
                sys::send(fd, frame.as_bytes())
            }
            r => r,
        }
        .map_err(Error::TransmitError)?;
        if sent != frame.len() {
            return Err(Error::TransmitError(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("only {} of {} bytes were sent", sent, frame.len()),
            )));
        }

        log::debug!("sent {} bytes on '{}'", sent, self.interface);

        Ok(())
    }

    pub fn close(&mut self) {
        if self.fd.take().is_some() {
            log::debug!("closed interface '{}'", self.interface);
        }
    }

    pub fn is_open(&self) -> bool {
        self.fd.is_some()
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn ifindex(&self) -> u32 {
        self.ifindex
    }
}

impl Drop for Transmitter {
    fn drop(&mut self) {
        self.close();
    }
}

fn socket_error(interface: &str, source: io::Error) -> Error {
    match source.raw_os_error() {
        Some(libc::EPERM) | Some(libc::EACCES) => Error::PermissionDenied(source),
        _ => Error::BindError {
            interface: interface.to_string(),
            source,
        },
    }
}

fn bind_error(interface: &str, source: io::Error) -> Error {
    match source.raw_os_error() {
        Some(libc::ENODEV) => Error::InterfaceNotFound(interface.to_string()),
        _ => Error::BindError {
            interface: interface.to_string(),
            source,
        },
    }
}
