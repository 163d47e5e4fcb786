//! Turn a chosen pocket into a concrete, mostly non-overlapping square.
//!
//! Placement runs in three stages, each a bounded best-effort search:
//!
//! 1. Seeded position inside the pocket, clamped to the canvas.
//! 2. [`keep_outside_safe_zones`](Resolver::keep_outside_safe_zones): push the
//!    square out of any padded zone it touches, shrinking into tight gaps.
//! 3. [`resolve_overlaps`](Resolver::resolve_overlaps): ring search around the
//!    candidate, then shrink and repeat, then random samples over free space.
//!
//! Nothing here fails. When no compliant square is found the least-bad one
//! is returned and its [`Fit`] says so.

#[cfg(not(feature = "std"))]
use alloc::format;
use core::f64::consts::TAU;
#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::canvas::Canvas;
use crate::config::LayoutConfig;
use crate::geometry::{Rect, clamp};
use crate::hash::SeedKey;
use crate::pocket::Pocket;

/// Clearance left between an escaped square and the zone it escaped.
const ESCAPE_GAP: f64 = 0.5;
/// First search ring radius, relative to the item size.
const RING_RADIUS: f64 = 1.1;
/// Ring radius multiplier between rounds.
const RING_DECAY: f64 = 0.7;
/// Angular jitter (radians) applied to each ring step.
const RING_ANGLE_JITTER: f64 = 0.2;
/// Radial jitter range applied to each ring step.
const RING_RADIUS_JITTER: (f64, f64) = (0.85, 1.15);

/// How well a candidate satisfies the placement constraints.
///
/// Candidates compare by zone overlap first, then by worst overlap ratio.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fit {
    /// Total area overlapping padded safe zones.
    pub zone_overlap: f64,
    /// Worst overlap ratio against any earlier placement.
    pub max_overlap: f64,
}

impl Fit {
    /// Whether `self` is strictly preferable to `other`.
    pub fn is_better_than(&self, other: &Fit) -> bool {
        if self.zone_overlap != other.zone_overlap {
            return self.zone_overlap < other.zone_overlap;
        }
        self.max_overlap < other.max_overlap
    }

    /// Clear of every zone and within the overlap tolerance.
    pub fn is_compliant(&self, tolerance: f64) -> bool {
        self.zone_overlap <= 0.0 && self.max_overlap <= tolerance
    }
}

/// A resolved square and how well it fits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolved {
    pub rect: Rect,
    pub fit: Fit,
}

/// Places items for one layout pass.
#[derive(Clone, Debug)]
pub struct Resolver<'a> {
    pub canvas: Canvas,
    /// Padded safe zones to keep clear of.
    pub zones: &'a [Rect],
    /// Free space sampled by the last-resort search. Empty means the canvas.
    pub regions: &'a [Rect],
    pub config: &'a LayoutConfig,
    /// Items never shrink below this edge length.
    pub min_size: f64,
}

impl Resolver<'_> {
    fn bounds(&self) -> (f64, f64) {
        (self.canvas.width as f64, self.canvas.height as f64)
    }

    /// Place an item of `desired` size into `pocket`, avoiding zones and `placed`.
    pub fn place(&self, pocket: &Pocket, desired: f64, placed: &[Rect], seed: &SeedKey) -> Resolved {
        let (w, h) = self.bounds();
        let size = desired
            .min(pocket.capacity(self.config.pocket_fill))
            .max(self.min_size)
            .min(w.min(h));
        let rect = self.offset_in_pocket(&pocket.rect, size, seed).clamp_within(w, h);
        let rect = self.keep_outside_safe_zones(rect);
        self.resolve_overlaps(rect, placed, seed)
    }

    /// Seeded square of `size` inside `pocket`, padded away from its edges.
    ///
    /// A pocket smaller than `size` centres the square on it.
    fn offset_in_pocket(&self, pocket: &Rect, size: f64, seed: &SeedKey) -> Rect {
        let axis = |start: f64, len: f64, tag: &str| {
            let slack = (len - size).max(0.0);
            let inset = self.config.pocket_inset.min(slack / 2.0);
            let lo = start + inset;
            let hi = start + len - size - inset;
            if hi <= lo {
                start + (len - size) / 2.0
            } else {
                seed.range(tag, lo, hi)
            }
        };
        Rect::square(
            axis(pocket.x, pocket.width, "-offset-x"),
            axis(pocket.y, pocket.height, "-offset-y"),
            size,
        )
    }

    /// Score a candidate against the zones and the earlier placements.
    pub fn fit(&self, rect: &Rect, placed: &[Rect]) -> Fit {
        Fit {
            zone_overlap: self.zone_overlap(rect),
            max_overlap: placed
                .iter()
                .map(|p| p.overlap_ratio(rect))
                .fold(0.0, f64::max),
        }
    }

    fn zone_overlap(&self, rect: &Rect) -> f64 {
        self.zones.iter().map(|z| z.overlap_area(rect)).sum()
    }

    fn hits_zone(&self, rect: &Rect) -> bool {
        self.zones.iter().any(|z| z.intersect(rect).is_some())
    }

    /// Push `rect` out of every padded safe zone it intersects.
    ///
    /// Each sweep visits the zones in order and escapes the square to the
    /// side that keeps it largest (ties: shortest move). After
    /// `push_out_retries` sweeps without success, the canvas corners and the
    /// position mirrored through the offending zone are tried, and the
    /// candidate with the least zone overlap wins. That result may still
    /// overlap.
    pub fn keep_outside_safe_zones(&self, rect: Rect) -> Rect {
        if self.zones.is_empty() {
            return rect;
        }
        let mut current = rect;
        for _ in 0..self.config.push_out_retries {
            let mut moved = false;
            for zone in self.zones {
                if zone.intersect(&current).is_none() {
                    continue;
                }
                if let Some(next) = self.escape(&current, zone) {
                    current = next;
                    moved = true;
                }
            }
            if !moved {
                break;
            }
        }
        if !self.hits_zone(&current) {
            return current;
        }
        self.corner_fallback(current)
    }

    /// Best of the four escapes from `zone`, or `None` when no side has room.
    fn escape(&self, rect: &Rect, zone: &Rect) -> Option<Rect> {
        let (w, h) = self.bounds();
        let size = rect.width;
        let floor = self.min_size.min(size);
        let (cx, cy) = rect.center();

        let gaps = [
            // Left, right, top, bottom.
            zone.x,
            w - zone.right(),
            zone.y,
            h - zone.bottom(),
        ];

        let mut best: Option<(Rect, f64)> = None;
        for (side, gap) in gaps.into_iter().enumerate() {
            let s = size.min(gap - ESCAPE_GAP);
            if s < floor || s <= 0.0 {
                continue;
            }
            let candidate = match side {
                0 => Rect::square(zone.x - ESCAPE_GAP - s, clamp(cy - s / 2.0, 0.0, h - s), s),
                1 => Rect::square(zone.right() + ESCAPE_GAP, clamp(cy - s / 2.0, 0.0, h - s), s),
                2 => Rect::square(clamp(cx - s / 2.0, 0.0, w - s), zone.y - ESCAPE_GAP - s, s),
                _ => Rect::square(clamp(cx - s / 2.0, 0.0, w - s), zone.bottom() + ESCAPE_GAP, s),
            };
            let (nx, ny) = candidate.center();
            let moved = ((nx - cx) * (nx - cx) + (ny - cy) * (ny - cy)).sqrt();
            let better = match best {
                None => true,
                Some((b, b_moved)) => s > b.width || (s == b.width && moved < b_moved),
            };
            if better {
                best = Some((candidate, moved));
            }
        }
        best.map(|(r, _)| r)
    }

    /// Corners and the zone-antipodal position; least total zone overlap wins.
    fn corner_fallback(&self, rect: Rect) -> Rect {
        let (w, h) = self.bounds();
        let s = rect.width;
        let (cx, cy) = rect.center();

        let worst = self
            .zones
            .iter()
            .max_by(|a, b| a.overlap_area(&rect).total_cmp(&b.overlap_area(&rect)));
        let antipodal = worst.map(|z| {
            let (zx, zy) = z.center();
            Rect::square_centered(2.0 * zx - cx, 2.0 * zy - cy, s).clamp_within(w, h)
        });

        let corners = [
            Rect::square(0.0, 0.0, s),
            Rect::square(w - s, 0.0, s),
            Rect::square(0.0, h - s, s),
            Rect::square(w - s, h - s, s),
        ];

        let mut best = rect;
        let mut best_overlap = self.zone_overlap(&rect);
        for candidate in corners.into_iter().map(|c| c.clamp_within(w, h)).chain(antipodal) {
            let overlap = self.zone_overlap(&candidate);
            if overlap < best_overlap {
                best = candidate;
                best_overlap = overlap;
            }
        }
        best
    }

    /// Move or shrink `rect` until its overlap with `placed` is within tolerance.
    ///
    /// Runs `search_rounds` ring searches with a decaying radius, then
    /// shrinks by `shrink_factor` and searches again, up to `shrink_rounds`
    /// times, then draws `fallback_samples` random squares over the free
    /// regions. Returns the first compliant candidate, or the best seen.
    pub fn resolve_overlaps(&self, rect: Rect, placed: &[Rect], seed: &SeedKey) -> Resolved {
        let tolerance = self.config.overlap_tolerance;
        let (w, h) = self.bounds();

        let mut best = Resolved {
            rect,
            fit: self.fit(&rect, placed),
        };
        if best.fit.is_compliant(tolerance) {
            return best;
        }

        let mut anchor = best;
        let mut size = rect.width;
        for pass in 0..=self.config.shrink_rounds {
            if pass > 0 {
                let next = (size * self.config.shrink_factor).max(self.min_size.min(size));
                if next >= size {
                    break;
                }
                size = next;
                let (cx, cy) = anchor.rect.center();
                let shrunk = self.keep_outside_safe_zones(
                    Rect::square_centered(cx, cy, size).clamp_within(w, h),
                );
                anchor = Resolved {
                    rect: shrunk,
                    fit: self.fit(&shrunk, placed),
                };
                if anchor.fit.is_better_than(&best.fit) {
                    best = anchor;
                }
                if best.fit.is_compliant(tolerance) {
                    return best;
                }
            }

            let mut radius = size * RING_RADIUS;
            for round in 0..self.config.search_rounds {
                let ring_best = self.search_ring(&anchor, size, radius, placed, seed, pass, round);
                if ring_best.fit.is_better_than(&best.fit) {
                    best = ring_best;
                }
                if best.fit.is_compliant(tolerance) {
                    return best;
                }
                anchor = ring_best;
                radius *= RING_DECAY;
            }
        }

        for sample in 0..self.config.fallback_samples {
            let candidate = self.keep_outside_safe_zones(self.sample_free(size, seed, sample));
            let fit = self.fit(&candidate, placed);
            if fit.is_better_than(&best.fit) {
                best = Resolved {
                    rect: candidate,
                    fit,
                };
            }
            if best.fit.is_compliant(tolerance) {
                break;
            }
        }
        best
    }

    /// Best of the anchor and a ring of cardinal plus jittered angular offsets.
    #[allow(clippy::too_many_arguments)]
    fn search_ring(
        &self,
        anchor: &Resolved,
        size: f64,
        radius: f64,
        placed: &[Rect],
        seed: &SeedKey,
        pass: usize,
        round: usize,
    ) -> Resolved {
        let (w, h) = self.bounds();
        let (cx, cy) = anchor.rect.center();
        let steps = self.config.ring_steps;
        let cardinal = [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)];

        let mut best = *anchor;
        for k in 0..cardinal.len() + steps {
            let (dx, dy) = if k < cardinal.len() {
                (cardinal[k].0 * radius, cardinal[k].1 * radius)
            } else {
                let step = k - cardinal.len();
                let tag = format!("-ring-{pass}-{round}-{step}");
                let angle = TAU * step as f64 / steps as f64
                    + seed.range(&tag, -RING_ANGLE_JITTER, RING_ANGLE_JITTER);
                let dist = radius
                    * seed.range(
                        &format!("{tag}-radius"),
                        RING_RADIUS_JITTER.0,
                        RING_RADIUS_JITTER.1,
                    );
                (angle.cos() * dist, angle.sin() * dist)
            };
            let candidate = self.keep_outside_safe_zones(
                Rect::square_centered(cx + dx, cy + dy, size).clamp_within(w, h),
            );
            let fit = self.fit(&candidate, placed);
            if fit.is_better_than(&best.fit) {
                best = Resolved {
                    rect: candidate,
                    fit,
                };
            }
        }
        best
    }

    /// Seeded square somewhere in the free regions, weighted by region area.
    fn sample_free(&self, size: f64, seed: &SeedKey, sample: usize) -> Rect {
        let (w, h) = self.bounds();
        let canvas = self.canvas.rect();
        let total: f64 = self.regions.iter().map(Rect::area).sum();

        let region = if total > 0.0 {
            let mut target = seed.range(&format!("-scatter-{sample}"), 0.0, total);
            let mut chosen = self.regions[self.regions.len() - 1];
            for r in self.regions {
                if target < r.area() {
                    chosen = *r;
                    break;
                }
                target -= r.area();
            }
            chosen
        } else {
            canvas
        };

        let axis = |start: f64, len: f64, tag: &str| {
            if len <= size {
                start + (len - size) / 2.0
            } else {
                seed.range(tag, start, start + len - size)
            }
        };
        Rect::square(
            axis(region.x, region.width, &format!("-scatter-{sample}-x")),
            axis(region.y, region.height, &format!("-scatter-{sample}-y")),
            size,
        )
        .clamp_within(w, h)
    }
}
