//! Layout Engine - Zone geometry and drag alignment
//!
//! This crate maps zone-relative element positions onto the page, snaps
//! dragged elements against their zone and against elements in other zones,
//! and clamps the result back inside the zone.

mod geometry;
pub mod coords;
mod snap;
mod drag;
mod error;

pub use geometry::*;
pub use snap::*;
pub use drag::*;
pub use error::*;
