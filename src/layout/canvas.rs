use crate::foundation::error::{BoothError, BoothResult};

/// Geometry constants of the printed sheet.
///
/// The defaults describe a 4x6 inch sheet at 300 DPI in portrait orientation. The value is
/// passed explicitly to the geometry resolver so previews and tests can use their own copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    /// Print density written into the encoded output's metadata.
    pub dpi: u32,
    /// Margins of the dual-strip four-cut layout.
    pub strip: StripMargins,
    /// Margins of the grid-style layouts.
    pub grid: GridMargins,
    /// Photo area percent used when a request does not set one.
    pub default_photo_area_ratio: u32,
    /// Distance kept between a preset-anchored logo and the edges of its region.
    pub logo_inset: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StripMargins {
    /// Margin around both strips, on all four sides.
    pub outer: u32,
    /// Gap between the left and right strip (the cutting line runs through it).
    pub center_gap: u32,
    /// Vertical gap between stacked photos in a strip.
    pub photo_gap: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridMargins {
    pub horizontal: u32,
    pub vertical: u32,
    pub gap: u32,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1500,
            dpi: 300,
            strip: StripMargins::default(),
            grid: GridMargins::default(),
            default_photo_area_ratio: 85,
            logo_inset: 20,
        }
    }
}

impl Default for StripMargins {
    fn default() -> Self {
        Self {
            outer: 40,
            center_gap: 40,
            photo_gap: 15,
        }
    }
}

impl Default for GridMargins {
    fn default() -> Self {
        Self {
            horizontal: 40,
            vertical: 40,
            gap: 20,
        }
    }
}

impl CanvasSpec {
    /// Reject constants that would leave a layout without room for its slots.
    pub fn validate(&self) -> BoothResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BoothError::validation("canvas width/height must be > 0"));
        }
        if self.default_photo_area_ratio > 100 {
            return Err(BoothError::validation(
                "default photo area ratio must be within 0..=100",
            ));
        }

        let s = &self.strip;
        let strip_w = u64::from(self.width)
            .saturating_sub(2 * u64::from(s.outer) + u64::from(s.center_gap));
        let strip_h = u64::from(self.height)
            .saturating_sub(2 * u64::from(s.outer) + 3 * u64::from(s.photo_gap));
        if strip_w < 2 || strip_h < 4 {
            return Err(BoothError::validation(
                "strip margins leave no room for four-cut slots",
            ));
        }

        let g = &self.grid;
        let avail_w = u64::from(self.width)
            .saturating_sub(2 * u64::from(g.horizontal) + u64::from(g.gap));
        let avail_h = u64::from(self.height)
            .saturating_sub(2 * u64::from(g.vertical) + u64::from(g.gap));
        if avail_w < 2 || avail_h < 2 {
            return Err(BoothError::validation(
                "grid margins leave no room for grid slots",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/canvas.rs"]
mod tests;
