//! Partition the canvas into usable pockets.
//!
//! Padded safe zones are subtracted from the inset canvas, slivers are
//! discarded, elongated regions are sliced into cells, and border strips
//! ("edge bands") are added with a higher priority so items favour the
//! edges over the centre.
//!
//! ```text
//!     ┌──────────────────────────────────┐
//!     │ top band ······················· │
//!     │ ┌────┬────┬────┬────┐            │
//!     │ │ s0 │ s1 │ s2 │ s3 │  ← slices  │
//!     │ ├────┴────┴────┴────┤            │
//!     │ │ ▓▓▓ padded zone ▓▓│  regions   │
//!     │ └───────────────────┘            │
//!     └──────────────────────────────────┘
//! ```

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};
use core::fmt;

use crate::canvas::{Canvas, SafeZoneSet};
use crate::config::LayoutConfig;
use crate::geometry::{Rect, subtract_all, total_area};

/// Canvas border a band pocket hugs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

/// How a pocket was derived.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PocketKind {
    /// A free region left after subtracting safe zones.
    Region,
    /// One slice of a subdivided region.
    Slice { index: usize },
    /// A border strip.
    Edge(Edge),
    /// Synthetic pocket used when nothing else survives.
    Fallback,
}

impl fmt::Display for PocketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Region => f.write_str("region"),
            Self::Slice { index } => write!(f, "slice-{index}"),
            Self::Edge(Edge::Top) => f.write_str("edge-top"),
            Self::Edge(Edge::Bottom) => f.write_str("edge-bottom"),
            Self::Edge(Edge::Left) => f.write_str("edge-left"),
            Self::Edge(Edge::Right) => f.write_str("edge-right"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// A sub-region of the canvas items can be placed into.
///
/// `usage` and `used_area` are counters mutated during one layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Pocket {
    pub kind: PocketKind,
    pub rect: Rect,
    /// Largest item edge that fits (the pocket's shorter side).
    pub max_size: f64,
    /// Items placed into this pocket so far.
    pub usage: u32,
    /// Area claimed by those items, capped at the pocket's area.
    pub used_area: f64,
    /// Static weight from how the pocket was derived.
    pub priority: f64,
}

impl Pocket {
    /// A fresh, unused pocket.
    pub fn new(kind: PocketKind, rect: Rect, priority: f64) -> Self {
        Self {
            kind,
            rect,
            max_size: rect.min_side().max(0.0),
            usage: 0,
            used_area: 0.0,
            priority,
        }
    }

    /// Synthetic pocket spanning `rect`.
    pub fn fallback(rect: Rect) -> Self {
        Self::new(PocketKind::Fallback, rect, 1.0)
    }

    /// Largest item edge to place here, given the fill fraction.
    pub fn capacity(&self, fill: f64) -> f64 {
        self.max_size * fill
    }

    /// Area not yet claimed this pass.
    pub fn free_area(&self) -> f64 {
        (self.rect.area() - self.used_area).max(0.0)
    }

    /// Claimed fraction of the pocket's area.
    pub fn saturation(&self) -> f64 {
        let area = self.rect.area();
        if area <= 0.0 { 1.0 } else { self.used_area / area }
    }

    /// Count a placement against this pocket.
    pub fn record(&mut self, placed: &Rect) {
        self.usage += 1;
        self.used_area = (self.used_area + placed.area()).min(self.rect.area());
    }
}

/// Pockets for one layout pass plus the safe-zone geometry they were cut from.
#[derive(Clone, Debug, PartialEq)]
pub struct PocketPlan {
    pub pockets: Vec<Pocket>,
    /// Padded, active safe zones items must avoid. Empty when ignored.
    pub zones: Vec<Rect>,
    /// Canvas inset by the edge margin (the full canvas if that degenerates).
    pub base: Rect,
    /// Canvas area outside the padded zones.
    pub free_area: f64,
    /// The zones swallowed the whole canvas; avoidance is off for this pass.
    pub safe_zones_ignored: bool,
}

/// Build the pocket list for `canvas` around `safe_zones`.
pub fn build_pockets(canvas: Canvas, safe_zones: &SafeZoneSet, config: &LayoutConfig) -> PocketPlan {
    let canvas_rect = canvas.rect();
    let zones: Vec<Rect> = safe_zones
        .active_rects()
        .map(|z| z.expand(config.zone_padding))
        .filter(|z| z.intersect(&canvas_rect).is_some())
        .collect();

    let free = zones
        .iter()
        .fold(vec![canvas_rect], |acc, z| subtract_all(&acc, z));
    let free_area = total_area(&free);

    // Step 1: inset the canvas.
    let Some(base) = canvas_rect.inset(config.edge_margin) else {
        return PocketPlan {
            pockets: vec![Pocket::fallback(canvas_rect)],
            zones,
            base: canvas_rect,
            free_area,
            safe_zones_ignored: false,
        };
    };

    // Steps 2-3: subtract padded zones.
    let available = zones
        .iter()
        .fold(vec![base], |acc, z| subtract_all(&acc, z));

    // Step 4: drop slivers.
    let regions: Vec<Rect> = available
        .into_iter()
        .filter(|r| r.width > config.sliver && r.height > config.sliver)
        .collect();

    // Zones left nothing usable: ignore them for this pass.
    if regions.is_empty() && !zones.is_empty() {
        return PocketPlan {
            pockets: vec![Pocket::fallback(canvas_rect)],
            zones: Vec::new(),
            base,
            free_area: canvas.area(),
            safe_zones_ignored: true,
        };
    }

    // Step 5: weight by area, subdivide.
    let canvas_area = canvas.area();
    let mut pockets = Vec::new();
    for region in &regions {
        let priority = 1.0 + 0.5 * region.area() / canvas_area;
        subdivide(region, priority, config, &mut pockets);
    }

    // Step 6: edge bands.
    if config.edge_bands {
        push_edge_bands(&base, &zones, canvas, config, &mut pockets);
    }

    // Step 7: never return nothing.
    if pockets.is_empty() {
        pockets.push(Pocket::fallback(base));
    }

    PocketPlan {
        pockets,
        zones,
        base,
        free_area,
        safe_zones_ignored: false,
    }
}

/// Slice an elongated region along its long axis, or keep it whole.
fn subdivide(region: &Rect, priority: f64, config: &LayoutConfig, out: &mut Vec<Pocket>) {
    let wide = region.width > region.height * config.subdivide_aspect;
    let tall = region.height > region.width * config.subdivide_aspect;
    if !config.subdivide || !(wide || tall) {
        out.push(Pocket::new(PocketKind::Region, *region, priority));
        return;
    }

    let length = if wide { region.width } else { region.height };
    let count = ((length / config.target_cell).round() as usize).clamp(1, config.max_slices.max(1));
    if count == 1 {
        out.push(Pocket::new(PocketKind::Region, *region, priority));
        return;
    }

    let gap = config.slice_gap.min(config.slice_gap_ratio * length / count as f64);
    let slice_len = (length - gap * (count - 1) as f64) / count as f64;
    for index in 0..count {
        let offset = index as f64 * (slice_len + gap);
        let slice = if wide {
            Rect::new(region.x + offset, region.y, slice_len, region.height)
        } else {
            Rect::new(region.x, region.y + offset, region.width, slice_len)
        };
        if slice.width < config.min_pocket || slice.height < config.min_pocket {
            continue;
        }
        out.push(Pocket::new(PocketKind::Slice { index }, slice, priority - 0.05));
    }
}

/// Border strips of the base rect, minus the padded zones.
fn push_edge_bands(
    base: &Rect,
    zones: &[Rect],
    canvas: Canvas,
    config: &LayoutConfig,
    out: &mut Vec<Pocket>,
) {
    let thickness = config
        .edge_band_min
        .max(config.edge_band_ratio * canvas.shortest_side())
        .min(base.width / 2.0)
        .min(base.height / 2.0);

    for edge in Edge::ALL {
        let band = match edge {
            Edge::Top => Rect::new(base.x, base.y, base.width, thickness),
            Edge::Bottom => Rect::new(base.x, base.bottom() - thickness, base.width, thickness),
            Edge::Left => Rect::new(base.x, base.y, thickness, base.height),
            Edge::Right => Rect::new(base.right() - thickness, base.y, thickness, base.height),
        };
        let pieces = zones.iter().fold(vec![band], |acc, z| subtract_all(&acc, z));
        for piece in pieces {
            if piece.width <= config.sliver
                || piece.height <= config.sliver
                || piece.width < config.min_pocket
                || piece.height < config.min_pocket
            {
                continue;
            }
            out.push(Pocket::new(PocketKind::Edge(edge), piece, config.edge_band_priority));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SafeZone;

    fn count(plan: &PocketPlan, pred: impl Fn(&PocketKind) -> bool) -> usize {
        plan.pockets.iter().filter(|p| pred(&p.kind)).count()
    }

    // ── No safe zones ───────────────────────────────────────────────────

    #[test]
    fn open_1080p_slices_into_columns_plus_bands() {
        let plan = build_pockets(
            Canvas::new(1920, 1080),
            &SafeZoneSet::none(),
            &LayoutConfig::default(),
        );
        // Base 1864×1024 is wider than 1.2:1 → 4 columns.
        assert_eq!(count(&plan, |k| matches!(k, PocketKind::Slice { .. })), 4);
        assert_eq!(count(&plan, |k| matches!(k, PocketKind::Edge(_))), 4);
        assert!(!plan.safe_zones_ignored);
        assert_eq!(plan.free_area, 1920.0 * 1080.0);
        assert_eq!(plan.base, Rect::new(28.0, 28.0, 1864.0, 1024.0));
    }

    #[test]
    fn slices_leave_gaps_and_stay_in_region() {
        let plan = build_pockets(
            Canvas::new(1920, 1080),
            &SafeZoneSet::none(),
            &LayoutConfig::default().edge_bands(false),
        );
        let slices: Vec<_> = plan.pockets.iter().map(|p| p.rect).collect();
        assert_eq!(slices.len(), 4);
        for pair in slices.windows(2) {
            let gap = pair[1].x - pair[0].right();
            assert!((gap - 22.0).abs() < 1e-9, "gap {gap}");
            assert!(pair[0].intersect(&pair[1]).is_none());
        }
        for s in &slices {
            assert!(plan.base.contains(s));
        }
    }

    #[test]
    fn near_square_region_is_not_sliced() {
        let plan = build_pockets(
            Canvas::new(1000, 1000),
            &SafeZoneSet::none(),
            &LayoutConfig::default().edge_bands(false),
        );
        assert_eq!(plan.pockets.len(), 1);
        assert_eq!(plan.pockets[0].kind, PocketKind::Region);
        assert_eq!(plan.pockets[0].max_size, 944.0);
    }

    #[test]
    fn subdivide_off_keeps_whole_region() {
        let plan = build_pockets(
            Canvas::new(1920, 1080),
            &SafeZoneSet::none(),
            &LayoutConfig::default().subdivide(false).edge_bands(false),
        );
        assert_eq!(plan.pockets.len(), 1);
        assert_eq!(plan.pockets[0].rect, plan.base);
    }

    // ── Safe zones ──────────────────────────────────────────────────────

    #[test]
    fn centered_zone_pockets_avoid_padded_zone() {
        let zone = SafeZone::new(480.0, 216.0, 960.0, 648.0);
        let plan = build_pockets(
            Canvas::new(1920, 1080),
            &SafeZoneSet::from(zone),
            &LayoutConfig::default(),
        );
        let padded = zone.rect().expand(32.0);
        assert_eq!(plan.zones, vec![padded]);
        assert!(!plan.pockets.is_empty());
        for p in &plan.pockets {
            assert!(p.rect.intersect(&padded).is_none(), "{} {:?}", p.kind, p.rect);
        }
        assert!(count(&plan, |k| matches!(k, PocketKind::Edge(_))) >= 1);
        assert_eq!(plan.free_area, 1920.0 * 1080.0 - padded.area());
    }

    #[test]
    fn disabled_set_is_ignored() {
        let set = SafeZoneSet::from(SafeZone::new(0.0, 0.0, 1920.0, 1080.0)).enabled(false);
        let plan = build_pockets(Canvas::new(1920, 1080), &set, &LayoutConfig::default());
        assert!(plan.zones.is_empty());
        assert!(plan.pockets.len() > 1);
    }

    #[test]
    fn zone_outside_canvas_is_dropped() {
        let set = SafeZoneSet::from(SafeZone::new(5000.0, 5000.0, 100.0, 100.0));
        let plan = build_pockets(Canvas::new(1920, 1080), &set, &LayoutConfig::default());
        assert!(plan.zones.is_empty());
    }

    // ── Fallbacks ───────────────────────────────────────────────────────

    #[test]
    fn covering_zone_falls_back_to_full_canvas() {
        // 95% of 1280×720, centered.
        let zone = SafeZone::new(32.0, 18.0, 1216.0, 684.0);
        let plan = build_pockets(
            Canvas::new(1280, 720),
            &SafeZoneSet::from(zone),
            &LayoutConfig::default(),
        );
        assert_eq!(plan.pockets.len(), 1);
        assert_eq!(plan.pockets[0].kind, PocketKind::Fallback);
        assert_eq!(plan.pockets[0].rect, Rect::new(0.0, 0.0, 1280.0, 720.0));
        assert!(plan.safe_zones_ignored);
        assert!(plan.zones.is_empty());
    }

    #[test]
    fn edge_aligned_covering_zone_falls_back_to_full_canvas() {
        // 95% of 1280×720 against the left edge leaves a thin strip on the right.
        let zone = SafeZone::new(0.0, 0.0, 1216.0, 720.0);
        let plan = build_pockets(
            Canvas::new(1280, 720),
            &SafeZoneSet::from(zone),
            &LayoutConfig::default(),
        );
        assert_eq!(plan.pockets.len(), 1);
        assert_eq!(plan.pockets[0].kind, PocketKind::Fallback);
        assert_eq!(plan.pockets[0].rect, Rect::new(0.0, 0.0, 1280.0, 720.0));
        assert!(plan.safe_zones_ignored);
        assert!(plan.zones.is_empty());
    }

    #[test]
    fn zone_leaving_only_slivers_is_ignored() {
        // Leaves a 10px strip along the bottom of the base rect.
        let zone = SafeZone::new(0.0, 0.0, 1000.0, 530.0);
        let plan = build_pockets(
            Canvas::new(1000, 600),
            &SafeZoneSet::from(zone),
            &LayoutConfig::default(),
        );
        assert_eq!(plan.pockets.len(), 1);
        assert_eq!(plan.pockets[0].rect, Rect::new(0.0, 0.0, 1000.0, 600.0));
        assert!(plan.safe_zones_ignored);
    }

    #[test]
    fn sliver_base_without_zones_falls_back_to_base() {
        // Inset leaves 44×24, thinner than the sliver limit.
        let plan = build_pockets(Canvas::new(100, 80), &SafeZoneSet::none(), &LayoutConfig::default());
        assert_eq!(plan.pockets.len(), 1);
        assert_eq!(plan.pockets[0].kind, PocketKind::Fallback);
        assert_eq!(plan.pockets[0].rect, plan.base);
        assert!(!plan.safe_zones_ignored);
    }

    #[test]
    fn tiny_canvas_uses_full_canvas() {
        let plan = build_pockets(Canvas::new(40, 40), &SafeZoneSet::none(), &LayoutConfig::default());
        assert_eq!(plan.pockets.len(), 1);
        assert_eq!(plan.pockets[0].rect, Rect::new(0.0, 0.0, 40.0, 40.0));
    }

    // ── Pocket counters ─────────────────────────────────────────────────

    #[test]
    fn record_caps_used_area() {
        let mut p = Pocket::new(PocketKind::Region, Rect::new(0.0, 0.0, 100.0, 100.0), 1.0);
        p.record(&Rect::square(0.0, 0.0, 80.0));
        assert_eq!(p.usage, 1);
        assert_eq!(p.used_area, 6400.0);
        p.record(&Rect::square(0.0, 0.0, 80.0));
        assert_eq!(p.usage, 2);
        assert_eq!(p.used_area, 10000.0);
        assert_eq!(p.free_area(), 0.0);
        assert_eq!(p.saturation(), 1.0);
    }

    #[test]
    fn kind_names() {
        assert_eq!(PocketKind::Edge(Edge::Left).to_string(), "edge-left");
        assert_eq!(PocketKind::Slice { index: 2 }.to_string(), "slice-2");
        assert_eq!(PocketKind::Fallback.to_string(), "fallback");
    }
}
