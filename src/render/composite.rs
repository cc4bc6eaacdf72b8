use std::borrow::Cow;

use anyhow::anyhow;
use image::{Rgba, RgbaImage, imageops};

use crate::{
    foundation::color::BackgroundColor,
    foundation::error::BoothResult,
    layout::geometry::LayoutGeometry,
    layout::kind::LogoLayer,
    logo::render::LogoPass,
    photo::render::PhotoTile,
};

/// Everything the compositor layers onto the sheet.
pub struct CompositeInput<'a> {
    pub geometry: &'a LayoutGeometry,
    pub background: BackgroundColor,
    /// One tile per photo, in photo order; each sized to its slot.
    pub tiles: &'a [PhotoTile],
    pub logo: Option<&'a LogoPass>,
}

/// Assemble the final sheet.
///
/// Z-order, lowest first: background fill, logos that sit beneath photos, photo tiles,
/// logos that sit above photos. Photo tiles are made opaque against the background before
/// they are placed, so a logo reaching into a photo slot is always covered by the photo.
pub fn composite(input: &CompositeInput<'_>) -> BoothResult<RgbaImage> {
    let g = input.geometry;
    if input.tiles.len() != g.slots.len() {
        return Err(anyhow!(
            "internal error: {} photo tile(s) for {} slot(s)",
            input.tiles.len(),
            g.slots.len()
        )
        .into());
    }

    let mut canvas = RgbaImage::from_pixel(
        g.canvas_width,
        g.canvas_height,
        input.background.to_rgba(),
    );

    if let Some(pass) = input.logo.filter(|p| p.layer == LogoLayer::BeneathPhotos) {
        draw_logos(&mut canvas, pass);
    }

    for placement in &g.placements {
        let tile = input.tiles.get(placement.photo).ok_or_else(|| {
            anyhow!(
                "internal error: placement refers to missing photo {}",
                placement.photo
            )
        })?;
        let rect = placement.rect;
        if tile.image.dimensions() != (rect.width, rect.height) {
            return Err(anyhow!(
                "internal error: tile {}x{} does not match slot {rect:?}",
                tile.image.width(),
                tile.image.height()
            )
            .into());
        }
        let opaque = flatten_onto(&tile.image, input.background);
        imageops::replace(
            &mut canvas,
            opaque.as_ref(),
            i64::from(rect.left),
            i64::from(rect.top),
        );
    }

    if let Some(pass) = input.logo.filter(|p| p.layer == LogoLayer::AbovePhotos) {
        draw_logos(&mut canvas, pass);
    }

    Ok(canvas)
}

fn draw_logos(canvas: &mut RgbaImage, pass: &LogoPass) {
    for tile in &pass.tiles {
        imageops::overlay(canvas, &tile.image, tile.left, tile.top);
    }
}

/// `img` with every pixel blended over `bg`, borrowed unchanged when already opaque.
fn flatten_onto(img: &RgbaImage, bg: BackgroundColor) -> Cow<'_, RgbaImage> {
    if img.pixels().all(|p| p[3] == 255) {
        return Cow::Borrowed(img);
    }
    let mut out = img.clone();
    for px in out.pixels_mut() {
        *px = over_opaque(*px, bg);
    }
    Cow::Owned(out)
}

/// Straight-alpha `src` over an opaque backdrop.
fn over_opaque(src: Rgba<u8>, bg: BackgroundColor) -> Rgba<u8> {
    let a = u16::from(src[3]);
    let inv = 255 - a;
    let mix = |s: u8, d: u8| {
        add_sat_u8(mul_div255(u16::from(s), a), mul_div255(u16::from(d), inv))
    };
    Rgba([
        mix(src[0], bg.r),
        mix(src[1], bg.g),
        mix(src[2], bg.b),
        255,
    ])
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
