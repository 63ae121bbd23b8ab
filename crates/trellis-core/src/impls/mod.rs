//! Impls - in-memory implementations of the ports (headless platform).

pub mod memory_surface;
pub mod memory_transfer;

pub use self::memory_surface::MemorySurface;
pub use self::memory_transfer::MemoryTransfer;
