//! # Geomark Surface
//!
//! Headless implementation of [`geomark_editor::MapSurface`].
//!
//! Keeps the base and edit layers in memory, projects features through a
//! Web Mercator viewport for hit-testing and fitting, and records every
//! call as a [`SurfaceEvent`]. Used by the CLI and by end-to-end tests.

pub mod extent;
pub mod headless;
pub mod projection;
pub mod viewport;

pub use extent::Extent;
pub use headless::{HeadlessSurface, SurfaceEvent, SurfaceOptions};
pub use projection::{from_lon_lat, to_lon_lat, Projected};
pub use viewport::{resolution_for_zoom, Viewport};
