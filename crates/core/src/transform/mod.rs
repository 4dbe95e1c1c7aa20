//! Gesture to timespan transforms. All functions here are pure.

pub mod mapper;
pub mod pan;
pub mod zoom;

pub use mapper::{MapError, PixelScale};
pub use pan::pan;
pub use zoom::zoom;
