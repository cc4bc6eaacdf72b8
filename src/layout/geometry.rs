//! Slot geometry for every print layout.
//!
//! This is the single source of truth for where photos land on the sheet. The same integer
//! formulas feed the server compositor and the crop-ratio payload a preview client uses to
//! constrain its crop selection, so both sides agree on every slot to the pixel.
//!
//! All divisions round half-up ([`round_div`]).

use crate::{
    foundation::core::{SlotRect, round_div},
    foundation::error::{BoothError, BoothResult},
    layout::canvas::CanvasSpec,
    layout::kind::LayoutKind,
};

/// A vertical band of the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Region {
    pub top: u32,
    pub height: u32,
}

impl Region {
    pub const fn bottom(self) -> u32 {
        self.top + self.height
    }
}

/// One tile draw: photo `photo` is drawn into `rect`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Placement {
    pub photo: usize,
    pub rect: SlotRect,
}

/// Exact slot proportions as an integer pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub fn as_f64(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl From<SlotRect> for AspectRatio {
    fn from(s: SlotRect) -> Self {
        Self {
            width: s.width,
            height: s.height,
        }
    }
}

/// Resolved geometry of one layout on one canvas.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LayoutGeometry {
    pub layout: LayoutKind,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Photo area percent the geometry was resolved with (100 for layouts without a split).
    pub photo_area_ratio: u32,
    /// One slot per photo, in photo order.
    pub slots: Vec<SlotRect>,
    /// Every tile draw in z-order. Equal to `slots` except for the dual strip layout, which
    /// draws each photo twice.
    pub placements: Vec<Placement>,
    /// Height of the band reserved for photos, measured from the top of the canvas.
    pub photo_region_height: u32,
    /// Band that preset logo anchors resolve against.
    pub logo_region: Region,
    /// The two strips of the dual strip layout; empty otherwise.
    pub strips: Vec<SlotRect>,
}

impl LayoutGeometry {
    /// Verify that every slot and placement lies inside the canvas.
    pub fn check_bounds(&self) -> BoothResult<()> {
        let all = self
            .slots
            .iter()
            .chain(self.placements.iter().map(|p| &p.rect))
            .chain(self.strips.iter());
        for rect in all {
            if !rect.fits_within(self.canvas_width, self.canvas_height) {
                return Err(BoothError::validation(format!(
                    "layout '{}' slot {rect:?} does not fit a {}x{} canvas",
                    self.layout, self.canvas_width, self.canvas_height
                )));
            }
        }
        Ok(())
    }

    pub fn slot(&self, index: usize) -> BoothResult<SlotRect> {
        self.slots.get(index).copied().ok_or_else(|| {
            BoothError::validation(format!(
                "layout '{}' has {} slot(s), slot {index} requested",
                self.layout,
                self.slots.len()
            ))
        })
    }
}

/// Compute every slot of `layout` on the canvas described by `spec`.
///
/// `photo_area_ratio` (percent of the canvas height given to the photo) only affects
/// [`LayoutKind::SingleWithLogo`] and must then be within `1..=100`.
pub fn resolve_layout(
    spec: &CanvasSpec,
    layout: LayoutKind,
    photo_area_ratio: u32,
) -> BoothResult<LayoutGeometry> {
    spec.validate()?;
    let (w, h) = (spec.width, spec.height);

    let geometry = match layout {
        LayoutKind::Single => single(layout, w, h, h, 100),
        LayoutKind::SingleWithLogo => {
            if photo_area_ratio == 0 || photo_area_ratio > 100 {
                return Err(BoothError::validation(format!(
                    "photo area ratio must be within 1..=100, got {photo_area_ratio}"
                )));
            }
            let photo_h = round_div(h * photo_area_ratio, 100);
            single(layout, w, h, photo_h, photo_area_ratio)
        }
        LayoutKind::FourCutDualStrip => dual_strip(spec),
        LayoutKind::TwoByTwo => {
            let g = &spec.grid;
            let slot_w = round_div(w - 2 * g.horizontal - g.gap, 2);
            let slot_h = round_div(h - 2 * g.vertical - g.gap, 2);
            let col = [g.horizontal, g.horizontal + slot_w + g.gap];
            let row = [g.vertical, g.vertical + slot_h + g.gap];
            let slots = vec![
                SlotRect::new(col[0], row[0], slot_w, slot_h),
                SlotRect::new(col[1], row[0], slot_w, slot_h),
                SlotRect::new(col[0], row[1], slot_w, slot_h),
                SlotRect::new(col[1], row[1], slot_w, slot_h),
            ];
            grid(layout, spec, slots)
        }
        LayoutKind::VerticalTwo => {
            let g = &spec.grid;
            let avail_w = w - 2 * g.horizontal;
            let slot_h = round_div(h - 2 * g.vertical - g.gap, 2);
            let slots = vec![
                SlotRect::new(g.horizontal, g.vertical, avail_w, slot_h),
                SlotRect::new(g.horizontal, g.vertical + slot_h + g.gap, avail_w, slot_h),
            ];
            grid(layout, spec, slots)
        }
        LayoutKind::OnePlusTwo => {
            let g = &spec.grid;
            let avail_w = w - 2 * g.horizontal;
            let slot_h = round_div(h - 2 * g.vertical - g.gap, 2);
            let half_w = round_div(avail_w - g.gap, 2);
            let bottom = g.vertical + slot_h + g.gap;
            let slots = vec![
                SlotRect::new(g.horizontal, g.vertical, avail_w, slot_h),
                SlotRect::new(g.horizontal, bottom, half_w, slot_h),
                SlotRect::new(g.horizontal + half_w + g.gap, bottom, half_w, slot_h),
            ];
            grid(layout, spec, slots)
        }
    };

    geometry.check_bounds()?;
    tracing::debug!(
        layout = %layout,
        slots = geometry.slots.len(),
        placements = geometry.placements.len(),
        "resolved layout geometry"
    );
    Ok(geometry)
}

/// Aspect ratio a client-side cropper should enforce for photo `slot_index`.
///
/// Derived from the resolved slot itself, so it always matches the shape the compositor
/// resizes into. For [`LayoutKind::SingleWithLogo`] it follows the configured photo area
/// ratio.
pub fn crop_aspect_ratio(
    spec: &CanvasSpec,
    layout: LayoutKind,
    slot_index: usize,
    photo_area_ratio: u32,
) -> BoothResult<AspectRatio> {
    let geometry = resolve_layout(spec, layout, photo_area_ratio)?;
    geometry.slot(slot_index).map(AspectRatio::from)
}

/// Crop aspect ratios of every photo slot of `layout`, indexed by slot position.
pub fn crop_aspect_ratios(
    spec: &CanvasSpec,
    layout: LayoutKind,
    photo_area_ratio: u32,
) -> BoothResult<Vec<AspectRatio>> {
    let geometry = resolve_layout(spec, layout, photo_area_ratio)?;
    Ok(geometry.slots.into_iter().map(AspectRatio::from).collect())
}

fn single(
    layout: LayoutKind,
    w: u32,
    h: u32,
    photo_h: u32,
    photo_area_ratio: u32,
) -> LayoutGeometry {
    let slot = SlotRect::new(0, 0, w, photo_h);
    LayoutGeometry {
        layout,
        canvas_width: w,
        canvas_height: h,
        photo_area_ratio,
        slots: vec![slot],
        placements: vec![Placement {
            photo: 0,
            rect: slot,
        }],
        photo_region_height: photo_h,
        logo_region: Region {
            top: photo_h,
            height: h - photo_h,
        },
        strips: Vec::new(),
    }
}

fn dual_strip(spec: &CanvasSpec) -> LayoutGeometry {
    let (w, h) = (spec.width, spec.height);
    let s = &spec.strip;

    let strip_w = round_div(w - 2 * s.outer - s.center_gap, 2);
    let strip_h = h - 2 * s.outer;
    let slot_h = round_div(strip_h - 3 * s.photo_gap, 4);
    let right_dx = strip_w + s.center_gap;

    let left = SlotRect::new(s.outer, s.outer, strip_w, strip_h);
    let slots: Vec<SlotRect> = (0..4u32)
        .map(|i| SlotRect::new(s.outer, s.outer + i * (slot_h + s.photo_gap), strip_w, slot_h))
        .collect();

    let mut placements = Vec::with_capacity(8);
    for dx in [0, right_dx] {
        placements.extend(slots.iter().enumerate().map(|(photo, rect)| Placement {
            photo,
            rect: rect.shifted_x(dx),
        }));
    }

    LayoutGeometry {
        layout: LayoutKind::FourCutDualStrip,
        canvas_width: w,
        canvas_height: h,
        photo_area_ratio: 100,
        slots,
        placements,
        photo_region_height: h - s.outer,
        logo_region: Region {
            top: h - s.outer,
            height: s.outer,
        },
        strips: vec![left, left.shifted_x(right_dx)],
    }
}

fn grid(layout: LayoutKind, spec: &CanvasSpec, slots: Vec<SlotRect>) -> LayoutGeometry {
    let placements = slots
        .iter()
        .enumerate()
        .map(|(photo, &rect)| Placement { photo, rect })
        .collect();
    LayoutGeometry {
        layout,
        canvas_width: spec.width,
        canvas_height: spec.height,
        photo_area_ratio: 100,
        slots,
        placements,
        photo_region_height: spec.height,
        // Logos on grid layouts are free-floating overlays over the whole sheet.
        logo_region: Region {
            top: 0,
            height: spec.height,
        },
        strips: Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
