use std::ffi::CString;
use std::io;
use std::mem::size_of;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

use bitflags::bitflags;

// from <asm-generic/socket.h>, not exported by every libc target
const SO_NOFCS: libc::c_int = 43;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SocketOpts: u32 {
        const NO_FCS = 0b_0001;
    }
}

pub fn if_nametoindex(name: &str) -> io::Result<u32> {
    let name = CString::new(name).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let index = unsafe { libc::if_nametoindex(name.as_ptr()) };
    if index == 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(index)
}

/// Open a link-layer raw socket.
///
/// The protocol is left as 0, so no incoming frames are ever queued on it.
pub fn packet_socket() -> io::Result<OwnedFd> {
    let fd = unsafe { libc::socket(libc::AF_PACKET, libc::SOCK_RAW | libc::SOCK_CLOEXEC, 0) };
    if fd < 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

pub fn bind_to_ifindex(fd: &impl AsRawFd, ifindex: u32) -> io::Result<()> {
    let mut addr: libc::sockaddr_ll = unsafe { std::mem::zeroed() };
    addr.sll_family = libc::AF_PACKET as _;
    addr.sll_ifindex = ifindex as _;

    let ret = unsafe {
        libc::bind(
            fd.as_raw_fd(),
            (&addr as *const libc::sockaddr_ll).cast(),
            size_of::<libc::sockaddr_ll>() as _,
        )
    };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

pub fn set_opts(fd: &impl AsRawFd, opts: SocketOpts) -> io::Result<()> {
    if opts.contains(SocketOpts::NO_FCS) {
        set_int_opt(fd, libc::SOL_SOCKET, SO_NOFCS, 1)?;
    }

    Ok(())
}

pub fn clear_opts(fd: &impl AsRawFd, opts: SocketOpts) -> io::Result<()> {
    if opts.contains(SocketOpts::NO_FCS) {
        set_int_opt(fd, libc::SOL_SOCKET, SO_NOFCS, 0)?;
    }

    Ok(())
}

fn set_int_opt(
    fd: &impl AsRawFd,
    level: libc::c_int,
    name: libc::c_int,
    value: libc::c_int,
) -> io::Result<()> {
    let ret = unsafe {
        libc::setsockopt(
            fd.as_raw_fd(),
            level,
            name,
            (&value as *const libc::c_int).cast(),
            size_of::<libc::c_int>() as _,
        )
    };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

/// Returns the number of bytes the kernel accepted.
pub fn send(fd: &impl AsRawFd, buf: &[u8]) -> io::Result<usize> {
    let ret = unsafe { libc::send(fd.as_raw_fd(), buf.as_ptr().cast(), buf.len(), 0) };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(ret as usize)
}
