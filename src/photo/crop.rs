use crate::foundation::core::{CropRect, PixelRect, round_half_up};

/// Outcome of clamping a requested crop against a decoded source image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalizedCrop {
    /// The usable crop, or `None` to render the whole image.
    pub rect: Option<PixelRect>,
}

impl NormalizedCrop {
    pub const NONE: Self = Self { rect: None };

    pub fn has_valid_crop(&self) -> bool {
        self.rect.is_some()
    }
}

/// Clamp `crop` to a `src_w` x `src_h` source.
///
/// Malformed crops never fail the request: non-finite values, negative origins and
/// rectangles that end up without area are dropped (with a warning) and the photo is
/// rendered uncropped instead.
pub fn normalize_crop(crop: Option<&CropRect>, src_w: u32, src_h: u32) -> NormalizedCrop {
    let Some(crop) = crop else {
        return NormalizedCrop::NONE;
    };

    match clamp_crop(crop, src_w, src_h) {
        Ok(rect) => NormalizedCrop { rect: Some(rect) },
        Err(reason) => {
            tracing::warn!(
                ?crop,
                src_w,
                src_h,
                reason,
                "ignoring invalid crop, rendering whole image"
            );
            NormalizedCrop::NONE
        }
    }
}

fn clamp_crop(crop: &CropRect, src_w: u32, src_h: u32) -> Result<PixelRect, &'static str> {
    if src_w == 0 || src_h == 0 {
        return Err("source image has no pixels");
    }
    if ![crop.x, crop.y, crop.width, crop.height]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err("non-finite crop coordinates");
    }

    let (x, y) = (round_half_up(crop.x), round_half_up(crop.y));
    if x < 0 || y < 0 {
        return Err("negative crop origin");
    }

    let left = x.min(i64::from(src_w) - 1);
    let top = y.min(i64::from(src_h) - 1);
    let width = round_half_up(crop.width).min(i64::from(src_w) - left);
    let height = round_half_up(crop.height).min(i64::from(src_h) - top);
    if width <= 0 || height <= 0 {
        return Err("crop has no area");
    }

    // All four values are now within `0..=src` and fit in u32.
    Ok(PixelRect {
        x: left as u32,
        y: top as u32,
        width: width as u32,
        height: height as u32,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/photo/crop.rs"]
mod tests;
