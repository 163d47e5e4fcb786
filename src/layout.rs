//! Layout driver: sizing, the per-item placement loop, rotation, and draw order.
//!
//! A pass builds pockets around the safe zones, derives size bounds from the
//! free area and item count, then places items one at a time in input order.
//! Every pass owns its pockets, density grid, and placement list, so an
//! [`OverlayLayout`] can be shared across threads and polled repeatedly with
//! bit-identical results.
//!
//! # Example
//!
//! ```
//! use stickerlayout::{OverlayLayout, Resolution, SafeZone};
//!
//! let layout = OverlayLayout::new(Resolution::Hd1080)
//!     .safe_zones(SafeZone::new(480.0, 216.0, 960.0, 648.0));
//!
//! let placements = layout.compute(&["cat", "dog", "star"]).unwrap();
//! assert_eq!(placements.len(), 3);
//! assert_eq!(placements[0].id, "cat");
//! ```

#[cfg(not(feature = "std"))]
use alloc::{borrow::ToOwned, string::String, vec::Vec};
use core::fmt;
#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::canvas::{Canvas, SafeZoneSet};
use crate::config::LayoutConfig;
use crate::density::DensityMap;
use crate::geometry::{Rect, clamp};
use crate::hash::SeedKey;
use crate::pocket::{Pocket, build_pockets};
use crate::resolve::Resolver;
use crate::select::Selector;

/// Layout computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Canvas has zero width or height.
    ZeroCanvasDimension,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCanvasDimension => f.write_str("canvas width and height must be non-zero"),
        }
    }
}

impl core::error::Error for LayoutError {}

/// Item edge-length bounds for one pass.
///
/// Both bounds scale with the canvas's shortest side and shrink as the item
/// count grows. `base` is the size that would cover the configured fraction
/// of the free area if every item used it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeBounds {
    pub min: f64,
    pub max: f64,
    pub base: f64,
}

impl SizeBounds {
    /// Bounds with the default fill ratio and size floor.
    pub fn compute(canvas: Canvas, free_area: f64, count: usize) -> Self {
        Self::with_config(canvas, free_area, count, &LayoutConfig::default())
    }

    /// Bounds using `config.fill_ratio` and `config.min_size_floor`.
    pub fn with_config(canvas: Canvas, free_area: f64, count: usize, config: &LayoutConfig) -> Self {
        let s = canvas.shortest_side();
        let n = count.max(1) as f64;
        let crowd = 1.0 / n.sqrt();

        let max = s * (0.14 + 0.22 * crowd);
        let min = (s * (0.05 + 0.05 * crowd))
            .max(config.min_size_floor)
            .min(max);
        let base = clamp((free_area.max(0.0) * config.fill_ratio / n).sqrt(), min, max);
        Self { min, max, base }
    }

    /// Clamp `size` into `[min, max]`.
    pub fn clamp(&self, size: f64) -> f64 {
        clamp(size, self.min, self.max)
    }
}

/// Where one item goes. Items are squares; `rotation` is in degrees.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Placement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub rotation: f64,
    /// Draw order hint; higher draws in front.
    pub z_index: i32,
}

impl Placement {
    /// Footprint on the canvas, ignoring rotation.
    pub fn rect(&self) -> Rect {
        Rect::square(self.x, self.y, self.size)
    }
}

/// Everything a pass produced, for diagnostics and debug rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutReport {
    pub canvas: Canvas,
    /// In input order.
    pub placements: Vec<Placement>,
    /// Pocket state after the pass (usage counts included).
    pub pockets: Vec<Pocket>,
    /// Padded safe zones that were avoided.
    pub zones: Vec<Rect>,
    pub bounds: SizeBounds,
    /// The zones swallowed the canvas and were not avoided.
    pub safe_zones_ignored: bool,
    /// Input indices whose placement still overlaps a padded zone or an
    /// earlier item beyond the tolerance.
    pub best_effort: Vec<usize>,
}

impl LayoutReport {
    /// Whether item `index` was placed on a best-effort basis.
    pub fn is_best_effort(&self, index: usize) -> bool {
        self.best_effort.contains(&index)
    }
}

/// Sticker layout for one canvas.
///
/// Configure with the builder methods, then call [`compute`](Self::compute)
/// as often as needed. The same inputs always produce the same placements.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLayout {
    canvas: Canvas,
    safe_zones: SafeZoneSet,
    rotation: bool,
    config: LayoutConfig,
}

impl OverlayLayout {
    /// Layout for `canvas` with no safe zones, rotation on, default config.
    pub fn new(canvas: impl Into<Canvas>) -> Self {
        Self {
            canvas: canvas.into(),
            safe_zones: SafeZoneSet::none(),
            rotation: true,
            config: LayoutConfig::default(),
        }
    }

    /// Regions to keep clear.
    pub fn safe_zones(mut self, zones: impl Into<SafeZoneSet>) -> Self {
        self.safe_zones = zones.into();
        self
    }

    /// Tilt items by a few degrees. When off every rotation is 0.
    pub fn rotation(mut self, enabled: bool) -> Self {
        self.rotation = enabled;
        self
    }

    /// Replace the layout policy.
    pub fn config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Place `items` (stable identifiers), returning placements in input order.
    pub fn compute<S: AsRef<str>>(&self, items: &[S]) -> Result<Vec<Placement>, LayoutError> {
        self.compute_report(items).map(|report| report.placements)
    }

    /// Like [`compute`](Self::compute), with pocket, bound, and best-effort detail.
    pub fn compute_report<S: AsRef<str>>(&self, items: &[S]) -> Result<LayoutReport, LayoutError> {
        if !self.canvas.is_valid() {
            return Err(LayoutError::ZeroCanvasDimension);
        }
        let canvas = self.canvas;
        let config = &self.config;
        let _span = crate::debug_span!(
            "overlay_layout",
            width = canvas.width,
            height = canvas.height,
            items = items.len()
        )
        .entered();

        let plan = build_pockets(canvas, &self.safe_zones, config);
        let bounds = SizeBounds::with_config(canvas, plan.free_area, items.len(), config);
        crate::debug!(
            pockets = plan.pockets.len(),
            zones = plan.zones.len(),
            free_area = plan.free_area,
            min = bounds.min,
            max = bounds.max,
            base = bounds.base,
            "pocket plan built"
        );
        if plan.safe_zones_ignored {
            crate::warn!("safe zones cover the canvas; avoidance disabled for this pass");
        }

        let zones = plan.zones;
        let mut pockets = plan.pockets;
        let regions: Vec<Rect> = pockets.iter().map(|p| p.rect).collect();
        let mut density = DensityMap::new(canvas, config.density_cols, config.density_rows);
        let mut placed: Vec<Rect> = Vec::with_capacity(items.len());
        let mut placements: Vec<Placement> = Vec::with_capacity(items.len());
        let mut best_effort = Vec::new();

        let resolver = Resolver {
            canvas,
            zones: &zones,
            regions: &regions,
            config,
            min_size: bounds.min,
        };

        for (index, item) in items.iter().enumerate() {
            let id = item.as_ref();
            let seed = SeedKey::new(id, index);
            let (lo, hi) = config.scale_jitter;
            let desired = bounds.clamp(bounds.base * seed.range("-scale", lo, hi));

            let selector = Selector {
                canvas,
                density: &density,
                config,
                item_size: desired,
                min_size: bounds.min,
            };
            let slot = selector.select(&mut pockets, index, &seed);
            crate::trace!(index, pocket = %pockets[slot].kind, desired, "pocket chosen");

            let resolved = resolver.place(&pockets[slot], desired, &placed, &seed);
            if !resolved.fit.is_compliant(config.overlap_tolerance) {
                crate::warn!(
                    index,
                    id,
                    zone_overlap = resolved.fit.zone_overlap,
                    max_overlap = resolved.fit.max_overlap,
                    "best-effort placement"
                );
                best_effort.push(index);
            }

            let rect = resolved.rect;
            pockets[slot].record(&rect);
            density.apply(&rect);
            placed.push(rect);
            placements.push(Placement {
                id: id.to_owned(),
                x: rect.x,
                y: rect.y,
                size: rect.width,
                rotation: self.rotation_for(&seed),
                z_index: 0,
            });
        }

        assign_z_order(&mut placements, config.z_base);

        Ok(LayoutReport {
            canvas,
            placements,
            pockets,
            zones,
            bounds,
            safe_zones_ignored: plan.safe_zones_ignored,
            best_effort,
        })
    }

    /// Seeded tilt: upright with `upright_chance`, otherwise a signed
    /// magnitude from `rotation_range`.
    fn rotation_for(&self, seed: &SeedKey) -> f64 {
        if !self.rotation {
            return 0.0;
        }
        if seed.unit("-rotation-zero") < self.config.upright_chance {
            return 0.0;
        }
        let sign = if seed.unit("-rotation-sign") < 0.5 { -1.0 } else { 1.0 };
        let (lo, hi) = self.config.rotation_range;
        sign * seed.range("-rotation-mag", lo, hi)
    }
}

/// Larger items draw behind smaller ones; ties keep input order.
fn assign_z_order(placements: &mut [Placement], z_base: i32) {
    let mut order: Vec<usize> = (0..placements.len()).collect();
    order.sort_by(|&a, &b| {
        placements[b]
            .size
            .total_cmp(&placements[a].size)
            .then(a.cmp(&b))
    });
    for (rank, i) in order.into_iter().enumerate() {
        placements[i].z_index = z_base.saturating_add(rank as i32);
    }
}
