//! Canvas dimensions, resolution presets, and safe zones.
//!
//! These are the inputs supplied by the surrounding dashboard: the overlay
//! resolution and the rectangles the streamer wants kept clear.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::geometry::Rect;

/// Overlay canvas in pixels. Immutable for a layout pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a new canvas.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The full canvas as a rect at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f64, self.height as f64)
    }

    /// Length of the shorter side in pixels.
    pub fn shortest_side(&self) -> f64 {
        self.width.min(self.height) as f64
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    /// Whether both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl From<(u32, u32)> for Canvas {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// Streamer-configured overlay resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Resolution {
    /// 1280×720.
    Hd720,
    /// 1920×1080.
    Hd1080,
    /// 3840×2160.
    Uhd2160,
    /// Arbitrary size.
    Custom { width: u32, height: u32 },
}

impl Resolution {
    /// Canvas dimensions for this resolution.
    pub const fn canvas(self) -> Canvas {
        match self {
            Self::Hd720 => Canvas::new(1280, 720),
            Self::Hd1080 => Canvas::new(1920, 1080),
            Self::Uhd2160 => Canvas::new(3840, 2160),
            Self::Custom { width, height } => Canvas::new(width, height),
        }
    }

    /// Match a canvas back to a preset, falling back to `Custom`.
    pub fn from_canvas(canvas: Canvas) -> Self {
        match (canvas.width, canvas.height) {
            (1280, 720) => Self::Hd720,
            (1920, 1080) => Self::Hd1080,
            (3840, 2160) => Self::Uhd2160,
            (width, height) => Self::Custom { width, height },
        }
    }
}

impl From<Resolution> for Canvas {
    fn from(resolution: Resolution) -> Self {
        resolution.canvas()
    }
}

/// A rectangle that placed items must keep clear of.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafeZone {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Disabled zones are ignored by the engine.
    #[cfg_attr(feature = "serde", serde(default = "enabled_by_default"))]
    pub enabled: bool,
}

#[cfg(feature = "serde")]
fn enabled_by_default() -> bool {
    true
}

impl SafeZone {
    /// An enabled zone.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            enabled: true,
        }
    }

    /// Set whether this zone is active.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Zone geometry as a rect.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Whether the engine should honour this zone: enabled, finite, non-empty.
    pub fn is_active(&self) -> bool {
        self.enabled && self.rect().is_usable()
    }
}

/// The safe zones for the active resolution.
///
/// `enabled` is a master switch; individual zones carry their own flag too.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafeZoneSet {
    pub enabled: bool,
    pub zones: Vec<SafeZone>,
}

impl Default for SafeZoneSet {
    fn default() -> Self {
        Self::none()
    }
}

impl SafeZoneSet {
    /// No safe zones.
    pub fn none() -> Self {
        Self {
            enabled: true,
            zones: Vec::new(),
        }
    }

    /// An enabled set of zones.
    pub fn new(zones: impl IntoIterator<Item = SafeZone>) -> Self {
        Self {
            enabled: true,
            zones: zones.into_iter().collect(),
        }
    }

    /// Toggle avoidance for the whole set.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Zones the engine should honour, as rects.
    pub fn active_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.zones
            .iter()
            .filter(move |z| self.enabled && z.is_active())
            .map(SafeZone::rect)
    }

    /// Whether any zone is active.
    pub fn has_active(&self) -> bool {
        self.active_rects().next().is_some()
    }
}

/// Legacy single-zone settings normalize to a one-element set.
impl From<SafeZone> for SafeZoneSet {
    fn from(zone: SafeZone) -> Self {
        Self::new([zone])
    }
}

impl From<Option<SafeZone>> for SafeZoneSet {
    fn from(zone: Option<SafeZone>) -> Self {
        zone.map_or_else(Self::none, Self::from)
    }
}

impl From<Vec<SafeZone>> for SafeZoneSet {
    fn from(zones: Vec<SafeZone>) -> Self {
        Self {
            enabled: true,
            zones,
        }
    }
}
