/// Integer division rounded half-up: `round(num / den)` with ties going up.
///
/// Every division in the layout geometry goes through this helper so that a preview client
/// and the server compositor land on the same pixel.
pub const fn round_div(num: u32, den: u32) -> u32 {
    debug_assert!(den > 0);
    ((2 * num as u64 + den as u64) / (2 * den as u64)) as u32
}

/// Half-up rounding for floating point values (`-0.5` rounds to `0`, `2.5` to `3`).
pub fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// A rectangle of the output canvas assigned to one photo tile.
///
/// Slots are only produced by the geometry resolver and always lie inside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SlotRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl SlotRect {
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub const fn right(self) -> u32 {
        self.left + self.width
    }

    pub const fn bottom(self) -> u32 {
        self.top + self.height
    }

    pub fn fits_within(self, width: u32, height: u32) -> bool {
        self.width > 0 && self.height > 0 && self.right() <= width && self.bottom() <= height
    }

    /// Same slot moved horizontally by `dx` pixels.
    pub const fn shifted_x(self, dx: u32) -> Self {
        Self {
            left: self.left + dx,
            ..self
        }
    }
}

/// A crop rectangle as supplied by a caller, in source-image pixel units.
///
/// Values are floating point because crop selections usually come from a scaled preview.
/// Nothing is guaranteed about them until they pass through
/// [`normalize_crop`](crate::normalize_crop).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// An integer region of a decoded source image, fully inside its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl From<PixelRect> for CropRect {
    fn from(r: PixelRect) -> Self {
        CropRect::new(
            f64::from(r.x),
            f64::from(r.y),
            f64::from(r.width),
            f64::from(r.height),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
