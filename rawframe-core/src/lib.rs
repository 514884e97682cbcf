#![allow(clippy::len_without_is_empty)]

pub mod config;
pub mod error;
pub mod frame;
pub mod prelude;
pub mod protocol;
#[cfg(target_os = "linux")]
pub mod sys;
#[cfg(target_os = "linux")]
pub mod transmitter;

pub type Result<T> = std::result::Result<T, crate::error::Error>;
