//! End-to-end layout scenarios: common overlay setups and their guarantees.

use stickerlayout::{
    Canvas, LayoutConfig, LayoutReport, OverlayLayout, PocketKind, Rect, Resolution, SafeZone,
    SafeZoneSet, SizeBounds,
};

const EPS: f64 = 1e-9;

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("sticker-{i:02}")).collect()
}

fn assert_contained(report: &LayoutReport) {
    let (w, h) = (report.canvas.width as f64, report.canvas.height as f64);
    for p in &report.placements {
        assert!(p.x >= -EPS && p.y >= -EPS, "{p:?} outside {w}×{h}");
        assert!(p.x + p.size <= w + EPS, "{p:?} outside {w}×{h}");
        assert!(p.y + p.size <= h + EPS, "{p:?} outside {w}×{h}");
    }
}

// ── Scenario 1: empty canvas, few items ─────────────────────────────────

#[test]
fn few_items_on_open_canvas() {
    let canvas = Canvas::new(1920, 1080);
    let report = OverlayLayout::new(canvas).compute_report(&ids(5)).unwrap();
    assert_eq!(report.placements.len(), 5);
    assert_contained(&report);

    let bounds = SizeBounds::compute(canvas, canvas.area(), 5);
    assert_eq!(report.bounds, bounds);
    for p in &report.placements {
        assert!(p.size >= bounds.min - EPS && p.size <= bounds.max + EPS, "{p:?}");
    }

    let rects: Vec<Rect> = report.placements.iter().map(|p| p.rect()).collect();
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(a.overlap_ratio(b) <= 0.05, "{a:?} vs {b:?}");
        }
    }
    assert!(report.best_effort.is_empty());
}

// ── Scenario 2: centred camera zone ─────────────────────────────────────

#[test]
fn centred_zone_is_avoided() {
    let zone = SafeZone::new(480.0, 216.0, 960.0, 648.0);
    let report = OverlayLayout::new(Resolution::Hd1080)
        .safe_zones(zone)
        .compute_report(&ids(10))
        .unwrap();
    assert_eq!(report.placements.len(), 10);
    assert_contained(&report);

    let padded = zone.rect().expand(32.0);
    assert_eq!(report.zones, vec![padded]);
    for p in &report.placements {
        assert!(p.rect().intersect(&padded).is_none(), "{p:?} overlaps {padded:?}");
    }
    assert!(
        report
            .pockets
            .iter()
            .any(|p| matches!(p.kind, PocketKind::Edge(_)))
    );
}

#[test]
fn disabled_zone_set_places_anywhere() {
    let zones = SafeZoneSet::new([SafeZone::new(480.0, 216.0, 960.0, 648.0)]).enabled(false);
    let report = OverlayLayout::new(Resolution::Hd1080)
        .safe_zones(zones)
        .compute_report(&ids(10))
        .unwrap();
    assert!(report.zones.is_empty());
    assert!(!report.safe_zones_ignored);
}

// ── Scenario 3: zone swallows the canvas ────────────────────────────────

#[test]
fn near_total_zone_falls_back_to_full_canvas() {
    // 95% of a 1280×720 canvas, centred.
    let zone = SafeZone::new(32.0, 18.0, 1216.0, 684.0);
    let report = OverlayLayout::new(Resolution::Hd720)
        .safe_zones(zone)
        .compute_report(&ids(8))
        .unwrap();
    assert!(report.safe_zones_ignored);
    assert_eq!(report.pockets.len(), 1);
    assert_eq!(report.pockets[0].kind, PocketKind::Fallback);
    assert_eq!(report.pockets[0].rect, Rect::new(0.0, 0.0, 1280.0, 720.0));
    assert_eq!(report.placements.len(), 8);
    assert_contained(&report);
}

#[test]
fn edge_aligned_near_total_zone_falls_back_to_full_canvas() {
    // 95% of the width, flush with the left edge.
    let zone = SafeZone::new(0.0, 0.0, 1216.0, 720.0);
    let report = OverlayLayout::new(Resolution::Hd720)
        .safe_zones(zone)
        .compute_report(&ids(8))
        .unwrap();
    assert!(report.safe_zones_ignored);
    assert_eq!(report.pockets.len(), 1);
    assert_eq!(report.pockets[0].rect, Rect::new(0.0, 0.0, 1280.0, 720.0));
    assert!(report.best_effort.is_empty());
    assert_contained(&report);

    // Items spread out instead of piling into the leftover strip.
    let xs: Vec<f64> = report.placements.iter().map(|p| p.x).collect();
    assert!(xs.iter().any(|&x| x < 640.0));
}

// ── Scenario 4: repeated polling ────────────────────────────────────────

#[test]
fn consecutive_polls_are_identical() {
    let layout = OverlayLayout::new(Resolution::Hd1080)
        .safe_zones(vec![
            SafeZone::new(1400.0, 700.0, 480.0, 340.0),
            SafeZone::new(40.0, 40.0, 400.0, 120.0),
        ]);
    let items = ids(24);
    let first = layout.compute(&items).unwrap();
    let second = layout.compute(&items).unwrap();
    assert_eq!(first, second);

    // A fresh but identical layout agrees too.
    let rebuilt = layout.clone().compute(&items).unwrap();
    assert_eq!(first, rebuilt);
}

#[test]
fn appending_an_item_keeps_the_others_seeded() {
    // Seeds depend on id and index, so rotation of existing items is stable.
    let layout = OverlayLayout::new(Resolution::Hd1080);
    let before = layout.compute(&ids(6)).unwrap();
    let after = layout.compute(&ids(7)).unwrap();
    for (a, b) in before.iter().zip(&after) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.rotation, b.rotation);
    }
}

// ── Common case: about two items per pocket ─────────────────────────────

fn assert_compliant(report: &LayoutReport) {
    assert!(report.best_effort.is_empty(), "flagged: {:?}", report.best_effort);
    let rects: Vec<Rect> = report.placements.iter().map(|p| p.rect()).collect();
    for (i, a) in rects.iter().enumerate() {
        for (j, b) in rects.iter().enumerate().skip(i + 1) {
            let ratio = a.overlap_ratio(b);
            assert!(ratio <= 0.05, "items {i} and {j} overlap {ratio}");
        }
    }
}

#[test]
fn sixteen_items_on_open_1080p_stay_apart() {
    let report = OverlayLayout::new(Resolution::Hd1080)
        .compute_report(&ids(16))
        .unwrap();
    assert_eq!(report.placements.len(), 16);
    assert_contained(&report);
    assert_compliant(&report);
}

#[test]
fn twenty_items_around_centred_zone_stay_apart() {
    let report = OverlayLayout::new(Resolution::Hd1080)
        .safe_zones(SafeZone::new(480.0, 216.0, 960.0, 648.0))
        .compute_report(&ids(20))
        .unwrap();
    assert_eq!(report.placements.len(), 20);
    assert_contained(&report);
    assert_compliant(&report);
    for p in &report.placements {
        assert!(report.zones.iter().all(|z| p.rect().intersect(z).is_none()), "{p:?}");
    }
}

// ── Scenario 5: crowding ────────────────────────────────────────────────

#[test]
fn crowded_four_pocket_layout_terminates() {
    let config = LayoutConfig::default().subdivide(false).edge_bands(false);
    let report = OverlayLayout::new(Resolution::Hd720)
        .safe_zones(SafeZone::new(440.0, 200.0, 400.0, 320.0))
        .config(config)
        .compute_report(&ids(60))
        .unwrap();
    assert_eq!(report.pockets.len(), 4);
    assert_eq!(report.placements.len(), 60);
    assert_contained(&report);
    let used: u32 = report.pockets.iter().map(|p| p.usage).sum();
    assert_eq!(used, 60);
}

#[test]
fn tiny_canvas_still_places_everything() {
    let report = OverlayLayout::new((48, 48)).compute_report(&ids(10)).unwrap();
    assert_eq!(report.placements.len(), 10);
    assert_contained(&report);
}

// ── Serialization ───────────────────────────────────────────────────────

#[cfg(feature = "serde")]
#[test]
fn placements_serialize_camel_case() {
    let placements = OverlayLayout::new(Resolution::Hd720)
        .compute(&["cat", "dog"])
        .unwrap();
    let json = serde_json::to_value(&placements).unwrap();
    let first = &json[0];
    assert_eq!(first["id"], "cat");
    assert!(first.get("zIndex").is_some());
    assert!(first.get("z_index").is_none());

    let back: Vec<stickerlayout::Placement> =
        serde_json::from_str(&serde_json::to_string(&placements).unwrap()).unwrap();
    assert_eq!(back.len(), 2);
    for (a, b) in placements.iter().zip(&back) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.z_index, b.z_index);
        assert!((a.x - b.x).abs() < 1e-9 && (a.size - b.size).abs() < 1e-9);
    }
}

#[cfg(feature = "serde")]
#[test]
fn safe_zone_enabled_defaults_to_true() {
    let zone: SafeZone =
        serde_json::from_str(r#"{"x":10,"y":20,"width":300,"height":200}"#).unwrap();
    assert!(zone.enabled);
    assert_eq!(zone.rect(), Rect::new(10.0, 20.0, 300.0, 200.0));
}
