use std::borrow::Cow;

use image::{DynamicImage, RgbaImage, imageops::FilterType};

use crate::{
    foundation::core::{CropRect, SlotRect},
    photo::crop::{NormalizedCrop, normalize_crop},
};

/// Explicit clockwise rotation requested for a photo, on top of its stored orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Normalize any angle in degrees to a quarter turn.
    ///
    /// Negative angles rotate counter-clockwise. Angles that are not a multiple of 90 snap
    /// to the nearest quarter turn.
    pub fn from_degrees(degrees: i32) -> Self {
        let normalized = degrees.rem_euclid(360);
        if normalized % 90 != 0 {
            tracing::warn!(degrees, "rotation is not a multiple of 90, snapping");
        }
        match ((normalized + 45) / 90) % 4 {
            0 => Rotation::None,
            1 => Rotation::Cw90,
            2 => Rotation::Cw180,
            _ => Rotation::Cw270,
        }
    }

    pub const fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    pub fn apply<'a>(self, img: &'a DynamicImage) -> Cow<'a, DynamicImage> {
        match self {
            Rotation::None => Cow::Borrowed(img),
            Rotation::Cw90 => Cow::Owned(img.rotate90()),
            Rotation::Cw180 => Cow::Owned(img.rotate180()),
            Rotation::Cw270 => Cow::Owned(img.rotate270()),
        }
    }
}

impl From<i32> for Rotation {
    fn from(degrees: i32) -> Self {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(r: Rotation) -> Self {
        r.degrees()
    }
}

/// How a photo was resized into its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitMode {
    /// Stretch to the slot; used after an explicit crop, which already has the slot's shape.
    ExactFill,
    /// Preserve aspect ratio, scale to cover the slot and trim the overflow evenly.
    CoverCentered,
}

/// A photo resized to exactly one slot.
#[derive(Clone, Debug)]
pub struct PhotoTile {
    pub image: RgbaImage,
    pub fit: FitMode,
    pub crop: NormalizedCrop,
}

/// Rotate, crop and resize one photo into `slot`.
///
/// `photo` must already be upright (see [`decode_photo`](crate::decode_photo)). The crop is
/// interpreted in the coordinate space of the rotated photo.
pub fn render_tile(
    photo: &DynamicImage,
    crop: Option<&CropRect>,
    rotation: Rotation,
    slot: SlotRect,
    filter: FilterType,
) -> PhotoTile {
    let rotated = rotation.apply(photo);
    let normalized = normalize_crop(crop, rotated.width(), rotated.height());

    let (image, fit) = match normalized.rect {
        Some(r) => {
            let cropped = rotated.crop_imm(r.x, r.y, r.width, r.height);
            (
                resize_exact(&cropped, slot.width, slot.height, filter),
                FitMode::ExactFill,
            )
        }
        None => {
            let image = if (rotated.width(), rotated.height()) == (slot.width, slot.height) {
                rotated.to_rgba8()
            } else {
                rotated
                    .resize_to_fill(slot.width, slot.height, filter)
                    .to_rgba8()
            };
            (image, FitMode::CoverCentered)
        }
    };

    tracing::debug!(
        rotation = rotation.degrees(),
        ?fit,
        slot_w = slot.width,
        slot_h = slot.height,
        "rendered photo tile"
    );
    PhotoTile {
        image,
        fit,
        crop: normalized,
    }
}

fn resize_exact(img: &DynamicImage, width: u32, height: u32, filter: FilterType) -> RgbaImage {
    if (img.width(), img.height()) == (width, height) {
        img.to_rgba8()
    } else {
        img.resize_exact(width, height, filter).to_rgba8()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/photo/render.rs"]
mod tests;
