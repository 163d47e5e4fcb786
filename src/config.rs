//! Tunable layout policy.
//!
//! Every constant the engine uses lives here so pocket shaping, selection
//! weights, and retry budgets can be adjusted per overlay without touching
//! the algorithm.
//!
//! # Example
//!
//! ```
//! use stickerlayout::LayoutConfig;
//!
//! let config = LayoutConfig::default()
//!     .overlap_tolerance(0.05)
//!     .edge_bands(false);
//! assert_eq!(config.overlap_tolerance, 0.05);
//! assert!(!config.edge_bands);
//! ```

/// Layout policy. [`Default`] gives the tuned production values.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    // ── Pocket builder ──
    /// Inset from the canvas edges before pockets are carved.
    pub edge_margin: f64,
    /// Outward padding applied to every safe zone.
    pub zone_padding: f64,
    /// Regions this thin (on either axis) are discarded.
    pub sliver: f64,
    /// Split elongated regions into slices.
    pub subdivide: bool,
    /// Aspect ratio above which a region is sliced.
    pub subdivide_aspect: f64,
    /// Preferred slice edge length.
    pub target_cell: f64,
    /// Upper bound on slices per region.
    pub max_slices: usize,
    /// Largest gap between adjacent slices.
    pub slice_gap: f64,
    /// Gap as a fraction of slice length, when smaller than `slice_gap`.
    pub slice_gap_ratio: f64,
    /// Slices and edge-band pieces smaller than this square are dropped.
    pub min_pocket: f64,
    /// Add border strips that favour placement near the canvas edges.
    pub edge_bands: bool,
    /// Minimum edge band thickness.
    pub edge_band_min: f64,
    /// Edge band thickness as a fraction of the shorter canvas side.
    pub edge_band_ratio: f64,
    /// Static priority of edge band pockets.
    pub edge_band_priority: f64,

    // ── Sizing ──
    /// Fraction of free area items should cover in total.
    pub fill_ratio: f64,
    /// Per-item scale jitter range around the base size.
    pub scale_jitter: (f64, f64),
    /// Absolute floor for the minimum item size.
    pub min_size_floor: f64,

    // ── Density map ──
    pub density_cols: usize,
    pub density_rows: usize,

    // ── Selection ──
    /// Pick uniformly among this many best-scoring pockets.
    pub top_candidates: usize,

    // ── Resolution ──
    /// Largest acceptable overlap ratio between two items.
    pub overlap_tolerance: f64,
    /// Item capacity of a pocket as a fraction of its shorter side.
    pub pocket_fill: f64,
    /// Inward padding when positioning inside a pocket.
    pub pocket_inset: f64,
    /// Safe-zone push-out sweeps before the corner fallback.
    pub push_out_retries: usize,
    /// Ring search rounds per size.
    pub search_rounds: usize,
    /// Angular steps in each search ring.
    pub ring_steps: usize,
    /// Size multiplier applied between search passes.
    pub shrink_factor: f64,
    /// How many times an item may shrink.
    pub shrink_rounds: usize,
    /// Random samples in the last-resort search.
    pub fallback_samples: usize,

    // ── Output ──
    /// Z-index of the largest item; smaller items stack above it.
    pub z_base: i32,
    /// Chance that an item is drawn untilted.
    pub upright_chance: f64,
    /// Tilt magnitude range in degrees.
    pub rotation_range: (f64, f64),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            edge_margin: 28.0,
            zone_padding: 32.0,
            sliver: 32.0,
            subdivide: true,
            subdivide_aspect: 1.2,
            target_cell: 260.0,
            max_slices: 4,
            slice_gap: 22.0,
            slice_gap_ratio: 0.18,
            min_pocket: 60.0,
            edge_bands: true,
            edge_band_min: 110.0,
            edge_band_ratio: 0.18,
            edge_band_priority: 1.35,

            fill_ratio: 0.35,
            scale_jitter: (0.85, 1.15),
            min_size_floor: 16.0,

            density_cols: 4,
            density_rows: 3,

            top_candidates: 4,

            overlap_tolerance: 0.04,
            pocket_fill: 0.92,
            pocket_inset: 10.0,
            push_out_retries: 4,
            search_rounds: 4,
            ring_steps: 14,
            shrink_factor: 0.88,
            shrink_rounds: 3,
            fallback_samples: 42,

            z_base: 10,
            upright_chance: 0.1,
            rotation_range: (3.0, 13.0),
        }
    }
}

impl LayoutConfig {
    /// Set the overlap tolerance (ratio relative to the smaller item).
    pub fn overlap_tolerance(mut self, tolerance: f64) -> Self {
        self.overlap_tolerance = tolerance;
        self
    }

    /// Set the safe-zone padding.
    pub fn zone_padding(mut self, padding: f64) -> Self {
        self.zone_padding = padding;
        self
    }

    /// Set the canvas edge margin.
    pub fn edge_margin(mut self, margin: f64) -> Self {
        self.edge_margin = margin;
        self
    }

    /// Enable or disable edge band pockets.
    pub fn edge_bands(mut self, enabled: bool) -> Self {
        self.edge_bands = enabled;
        self
    }

    /// Enable or disable slicing of elongated regions.
    pub fn subdivide(mut self, enabled: bool) -> Self {
        self.subdivide = enabled;
        self
    }

    /// Set the density grid resolution.
    pub fn density_grid(mut self, cols: usize, rows: usize) -> Self {
        self.density_cols = cols;
        self.density_rows = rows;
        self
    }

    /// Set the retry budget of the overlap search.
    pub fn search_budget(mut self, rounds: usize, ring_steps: usize, shrink_rounds: usize) -> Self {
        self.search_rounds = rounds;
        self.ring_steps = ring_steps;
        self.shrink_rounds = shrink_rounds;
        self
    }

    /// Set the base z-index.
    pub fn z_base(mut self, base: i32) -> Self {
        self.z_base = base;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let c = LayoutConfig::default();
        assert!(c.scale_jitter.0 < c.scale_jitter.1);
        assert!(c.rotation_range.0 < c.rotation_range.1);
        assert!(c.shrink_factor > 0.0 && c.shrink_factor < 1.0);
        assert!(c.pocket_fill > 0.0 && c.pocket_fill <= 1.0);
        assert!(c.min_pocket > c.sliver);
    }

    #[test]
    fn builders_chain() {
        let c = LayoutConfig::default()
            .zone_padding(0.0)
            .edge_margin(12.0)
            .subdivide(false)
            .density_grid(8, 6)
            .search_budget(2, 8, 1)
            .z_base(100);
        assert_eq!(c.zone_padding, 0.0);
        assert_eq!(c.edge_margin, 12.0);
        assert!(!c.subdivide);
        assert_eq!((c.density_cols, c.density_rows), (8, 6));
        assert_eq!((c.search_rounds, c.ring_steps, c.shrink_rounds), (2, 8, 1));
        assert_eq!(c.z_base, 100);
    }
}
