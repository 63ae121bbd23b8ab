//! Ports - 抽象化レイヤー
//!
//! Each trait stands in for something the platform provides: time, random
//! ids, an element tree to render into, and the drag transfer object.
//! In-memory implementations live in [`crate::impls`].

pub mod clock;
pub mod id_generator;
pub mod surface;
pub mod transfer;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::surface::{Element, InsertPosition, SharedSurface, Surface, SurfaceError};
pub use self::transfer::{DataTransfer, DropEffect};
