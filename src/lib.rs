//! Deterministic sticker layout for stream overlays.
//!
//! Places a list of square items on a fixed-resolution canvas so they avoid
//! streamer-defined safe zones, stay inside the canvas, and barely overlap.
//! The same inputs always give the same placements, so a browser source can
//! poll and re-render without anything jumping around.
//!
//! Pure geometry: no rendering, no I/O, `no_std` compatible (needs `alloc`).
//!
//! # Modules
//!
//! - [`geometry`]: Rectangles, intersection, subtraction, overlap ratios
//! - [`hash`]: Seeded hash PRNG keyed by item id and position
//! - [`canvas`]: Canvas size, resolution presets, safe zones
//! - [`config`]: Every tunable constant, with builder methods
//! - [`density`]: Coarse coverage grid that spreads items out
//! - [`pocket`]: Carving free space into candidate regions
//! - [`select`]: Scoring and picking a pocket per item
//! - [`resolve`]: Safe-zone push-out and overlap search
//! - [`layout`]: The driver: sizing, placement loop, rotation, z-order
//!
//! # Example
//!
//! ```
//! use stickerlayout::{OverlayLayout, Resolution, SafeZone};
//!
//! let layout = OverlayLayout::new(Resolution::Hd720)
//!     .safe_zones(SafeZone::new(320.0, 180.0, 640.0, 360.0))
//!     .rotation(true);
//!
//! let first = layout.compute(&["heart", "star", "wave"]).unwrap();
//! let again = layout.compute(&["heart", "star", "wave"]).unwrap();
//! assert_eq!(first, again);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod logging;

// Tracing macros at the crate root, matching the no-op exports.
#[cfg(feature = "tracing")]
pub(crate) use logging::{debug, debug_span, trace, warn};

pub mod canvas;
pub mod config;
pub mod density;
pub mod geometry;
pub mod hash;
pub mod layout;
pub mod pocket;
pub mod resolve;
pub mod select;

#[cfg(feature = "svg")]
pub mod svg;

// Re-exports: the types most callers need
pub use canvas::{Canvas, Resolution, SafeZone, SafeZoneSet};
pub use config::LayoutConfig;
pub use density::DensityMap;
pub use geometry::Rect;
pub use hash::{SeedKey, random_from_hash};
pub use layout::{LayoutError, LayoutReport, OverlayLayout, Placement, SizeBounds};
pub use pocket::{Edge, Pocket, PocketKind, PocketPlan, build_pockets};
