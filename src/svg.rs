//! SVG visualization of a layout pass.
//!
//! Draws the canvas, the padded safe zones, every pocket (labelled with its
//! kind), and the placements in z-order with their rotation applied.
//! Best-effort placements are outlined in red.
//!
//! # Example
//!
//! ```
//! use stickerlayout::{OverlayLayout, Resolution, SafeZone, svg::render_report_svg};
//!
//! let report = OverlayLayout::new(Resolution::Hd1080)
//!     .safe_zones(SafeZone::new(480.0, 216.0, 960.0, 648.0))
//!     .compute_report(&["a", "b", "c"])
//!     .unwrap();
//!
//! let svg = render_report_svg(&report);
//! // svg is a complete SVG document string
//! assert!(svg.starts_with("<svg"));
//! ```

#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::geometry::Rect;
use crate::layout::{LayoutReport, Placement};
use crate::pocket::PocketKind;

/// Maximum pixel width of the drawn canvas.
const MAX_PANEL_W: f64 = 960.0;
/// Maximum pixel height of the drawn canvas.
const MAX_PANEL_H: f64 = 540.0;
/// Horizontal margin.
const MARGIN_X: f64 = 30.0;
/// Top margin, above the title.
const MARGIN_TOP: f64 = 20.0;
/// Height of the title text area.
const LABEL_H: f64 = 22.0;

/// Render a complete SVG document for a [`LayoutReport`].
pub fn render_report_svg(report: &LayoutReport) -> String {
    let cw = report.canvas.width as f64;
    let ch = report.canvas.height as f64;
    let scale = if cw == 0.0 || ch == 0.0 {
        1.0
    } else {
        (MAX_PANEL_W / cw).min(MAX_PANEL_H / ch)
    };
    let (sw, sh) = (cw * scale, ch * scale);
    let total_w = sw + 2.0 * MARGIN_X;
    let total_h = MARGIN_TOP + LABEL_H + sh + MARGIN_TOP;
    let origin = (MARGIN_X, MARGIN_TOP + LABEL_H);

    let mut svg = String::with_capacity(8192);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    // Style, light/dark via prefers-color-scheme
    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .pocket-label { font-size: 9px; fill: #557; }
  .item-label { font-size: 10px; fill: #fff; }
  .canvas { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .zone { fill: #f2b8b8; fill-opacity: 0.5; stroke: #c55; stroke-width: 1; stroke-dasharray: 4,2; }
  .pocket { fill: none; stroke: #7baed0; stroke-width: 1; stroke-dasharray: 2,2; }
  .pocket-edge { fill: none; stroke: #8c8; stroke-width: 1; stroke-dasharray: 2,2; }
  .item { fill: #6ba3d6; fill-opacity: 0.85; stroke: #2c6faa; stroke-width: 1.5; }
  .item-best-effort { fill: #6ba3d6; fill-opacity: 0.85; stroke: #d22; stroke-width: 2.5; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .pocket-label { fill: #99b; }
    .canvas { fill: #2d2d2d; stroke: #555; }
    .zone { fill: #6a2a2a; stroke: #c77; }
    .item { fill: #3a72a4; stroke: #5a9fd4; }
    .item-best-effort { fill: #3a72a4; stroke: #f55; }
  }
</style>
"##);

    let mut title = format!(
        "Canvas  {}×{}  ·  {} items  ·  size {:.0}–{:.0}",
        report.canvas.width,
        report.canvas.height,
        report.placements.len(),
        report.bounds.min,
        report.bounds.max
    );
    if report.safe_zones_ignored {
        title.push_str("  ·  zones ignored");
    }
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label">{}</text>"#,
        MARGIN_X,
        MARGIN_TOP + 14.0,
        escape_xml(&title)
    ));
    svg.push('\n');

    push_rect(&mut svg, &Rect::new(0.0, 0.0, cw, ch), origin, scale, "canvas");

    for zone in &report.zones {
        // Padded zones may extend past the canvas; draw only the visible part.
        if let Some(visible) = zone.intersect(&Rect::new(0.0, 0.0, cw, ch)) {
            push_rect(&mut svg, &visible, origin, scale, "zone");
        }
    }

    for pocket in &report.pockets {
        let class = match pocket.kind {
            PocketKind::Edge(_) => "pocket-edge",
            _ => "pocket",
        };
        push_rect(&mut svg, &pocket.rect, origin, scale, class);
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" class="pocket-label">{} ({})</text>"#,
            origin.0 + pocket.rect.x * scale + 3.0,
            origin.1 + pocket.rect.y * scale + 10.0,
            pocket.kind,
            pocket.usage
        ));
        svg.push('\n');
    }

    // Back to front.
    let mut order: Vec<usize> = (0..report.placements.len()).collect();
    order.sort_by_key(|&i| (report.placements[i].z_index, i));
    for i in order {
        let class = if report.is_best_effort(i) {
            "item-best-effort"
        } else {
            "item"
        };
        push_placement(&mut svg, &report.placements[i], origin, scale, class);
    }

    svg.push_str("</svg>\n");
    svg
}

fn push_rect(svg: &mut String, r: &Rect, origin: (f64, f64), scale: f64, class: &str) {
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="{}"/>"#,
        origin.0 + r.x * scale,
        origin.1 + r.y * scale,
        r.width * scale,
        r.height * scale,
        class
    ));
    svg.push('\n');
}

/// A placement as a rotated group: square plus its id.
fn push_placement(svg: &mut String, p: &Placement, origin: (f64, f64), scale: f64, class: &str) {
    let x = origin.0 + p.x * scale;
    let y = origin.1 + p.y * scale;
    let s = p.size * scale;
    svg.push_str(&format!(
        r#"<g transform="rotate({:.2} {:.1} {:.1})" data-z="{}">"#,
        p.rotation,
        x + s / 2.0,
        y + s / 2.0,
        p.z_index
    ));
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="{}" rx="3"/>"#,
        x, y, s, s, class
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" class="item-label" text-anchor="middle">{}</text>"#,
        x + s / 2.0,
        y + s / 2.0 + 3.0,
        escape_xml(&p.id)
    ));
    svg.push_str("</g>\n");
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
