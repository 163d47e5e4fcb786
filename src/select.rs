//! Pocket scoring and seeded selection.
//!
//! Each item scores every pocket on free space, usage history, priority,
//! direction, edge proximity, and density, then picks uniformly (but
//! deterministically) among the best few so consecutive items don't all
//! land in the same favourite pocket.

#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};
#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::canvas::Canvas;
use crate::config::LayoutConfig;
use crate::density::DensityMap;
use crate::geometry::clamp;
use crate::hash::SeedKey;
use crate::pocket::Pocket;

const FREE_AREA_WEIGHT: f64 = 2.5;
const USAGE_WEIGHT: f64 = 0.6;
const USAGE_EXPONENT: f64 = 1.15;
const AHEAD_WEIGHT: f64 = 0.5;
const SATURATION_WEIGHT: f64 = 1.2;
const DIRECTION_WEIGHT: f64 = 0.6;
const EDGE_WEIGHT: f64 = 0.4;
const DENSITY_WEIGHT: f64 = 0.8;
const JITTER: f64 = 0.15;

/// Placement bias, rotated per item so no pocket becomes a fixed favourite.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Top,
    Right,
    Bottom,
}

impl Direction {
    /// Direction for the item at `index`: left, top, right, bottom, repeating.
    pub fn for_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Left,
            1 => Self::Top,
            2 => Self::Right,
            _ => Self::Bottom,
        }
    }

    /// Unit vector in canvas space (y grows downward).
    pub fn vector(self) -> (f64, f64) {
        match self {
            Self::Left => (-1.0, 0.0),
            Self::Top => (0.0, -1.0),
            Self::Right => (1.0, 0.0),
            Self::Bottom => (0.0, 1.0),
        }
    }
}

/// Scores pockets for one item against the current pass state.
#[derive(Clone, Debug)]
pub struct Selector<'a> {
    pub canvas: Canvas,
    pub density: &'a DensityMap,
    pub config: &'a LayoutConfig,
    /// Desired edge length of the item being placed.
    pub item_size: f64,
    /// Smallest item edge the pass allows.
    pub min_size: f64,
}

impl Selector<'_> {
    /// Score of `pocket` (at position `slot` in the pocket list) for item `index`.
    ///
    /// Higher is better.
    pub fn score(
        &self,
        pocket: &Pocket,
        slot: usize,
        index: usize,
        pocket_count: usize,
        seed: &SeedKey,
    ) -> f64 {
        let canvas_area = self.canvas.area().max(1.0);
        let free = FREE_AREA_WEIGHT * pocket.free_area() / canvas_area;

        let usage = pocket.usage as f64;
        let size_scale = if pocket.max_size > 0.0 {
            clamp(self.item_size / pocket.max_size, 0.35, 1.5)
        } else {
            1.5
        };
        let usage_penalty = USAGE_WEIGHT * usage.powf(USAGE_EXPONENT) * size_scale;
        let expected = index as f64 / pocket_count.max(1) as f64;
        let ahead_penalty = AHEAD_WEIGHT * (usage - expected).max(0.0);
        let saturation_penalty = SATURATION_WEIGHT * pocket.saturation().min(1.5);

        let (px, py) = pocket.rect.center();
        let (cx, cy) = self.canvas.rect().center();
        let (dx, dy) = (px - cx, py - cy);
        let distance = (dx * dx + dy * dy).sqrt();
        let alignment = if distance < 1.0 {
            0.0
        } else {
            let (ux, uy) = Direction::for_index(index).vector();
            (dx * ux + dy * uy) / distance
        };

        let half_short = (self.canvas.shortest_side() / 2.0).max(1.0);
        let to_edge = px
            .min(self.canvas.width as f64 - px)
            .min(py)
            .min(self.canvas.height as f64 - py);
        let edge = 1.0 - clamp(to_edge / half_short, 0.0, 1.0);

        let density = 1.0 - self.density.sample(&pocket.rect);
        let jitter = seed.range(&format!("-pocket-{slot}"), 0.0, JITTER);

        free + pocket.priority - usage_penalty - ahead_penalty - saturation_penalty
            + DIRECTION_WEIGHT * alignment
            + EDGE_WEIGHT * edge
            + DENSITY_WEIGHT * density
            + jitter
    }

    /// Choose a pocket for item `index`, returning its position in `pockets`.
    ///
    /// Pockets too small for the minimum item size are skipped while any
    /// pocket can hold it. An empty list gets a full-canvas fallback pocket
    /// appended, which is then returned.
    pub fn select(&self, pockets: &mut Vec<Pocket>, index: usize, seed: &SeedKey) -> usize {
        if pockets.is_empty() {
            pockets.push(Pocket::fallback(self.canvas.rect()));
            return 0;
        }

        let fill = self.config.pocket_fill;
        let any_fits = pockets.iter().any(|p| p.capacity(fill) >= self.min_size);
        let pocket_count = pockets.len();
        let mut ranked: Vec<(usize, f64)> = pockets
            .iter()
            .enumerate()
            .filter(|(_, p)| !any_fits || p.capacity(fill) >= self.min_size)
            .map(|(slot, p)| (slot, self.score(p, slot, index, pocket_count, seed)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let top = self.config.top_candidates.max(1).min(ranked.len());
        ranked[seed.pick("-pocket-pick", top)].0
    }
}
