//! Process lifecycle concerns.

pub mod shutdown;

pub use shutdown::Shutdown;
