use image::{RgbaImage, imageops::FilterType};

use crate::{
    assets::decode::LogoSource,
    foundation::core::round_half_up,
    layout::geometry::{LayoutGeometry, Region},
    layout::kind::{LayoutKind, LogoLayer},
    logo::settings::{HorizontalAnchor, LogoPlacement, LogoSettings, VerticalAnchor},
};

/// A scaled logo and the canvas position of its top-left corner.
///
/// The position may be partly off-canvas; compositing clips it.
#[derive(Clone, Debug)]
pub struct LogoTile {
    pub image: RgbaImage,
    pub left: i64,
    pub top: i64,
}

/// All logo draws of one print, with the layer they belong to.
#[derive(Clone, Debug)]
pub struct LogoPass {
    pub layer: LogoLayer,
    pub tiles: Vec<LogoTile>,
}

/// Target logo size: `size_percent` of the canvas width, height proportional.
///
/// Logos are enlarged past their native resolution when the percentage asks for it. Extreme
/// aspect ratios saturate at `u32::MAX` rather than wrapping.
pub fn resolve_logo_size(native: (u32, u32), canvas_width: u32, size_percent: f64) -> (u32, u32) {
    let (nw, nh) = (f64::from(native.0.max(1)), f64::from(native.1.max(1)));
    let target_w = round_half_up(f64::from(canvas_width) * size_percent / 100.0).max(1);
    let target_h = round_half_up(nh * target_w as f64 / nw).max(1);
    (saturate_u32(target_w), saturate_u32(target_h))
}

fn saturate_u32(v: i64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

/// Top-left corner of a `logo_w` x `logo_h` logo placed by `placement`.
///
/// Preset anchors keep `inset` pixels from the canvas sides and from the edges of `region`;
/// custom coordinates name the logo center. The result keeps at least the horizontal edge
/// of the logo on the canvas (`left` within `[-logo_w, canvas_w]`) and `top` within
/// `[0, canvas_h]`. A logo is allowed to reach up out of its region.
pub fn resolve_logo_position(
    placement: &LogoPlacement,
    (logo_w, logo_h): (u32, u32),
    (canvas_w, canvas_h): (u32, u32),
    region: Region,
    inset: u32,
) -> (i64, i64) {
    let (lw, lh) = (i64::from(logo_w), i64::from(logo_h));
    let (cw, ch) = (i64::from(canvas_w), i64::from(canvas_h));
    let (rt, rh) = (i64::from(region.top), i64::from(region.height));
    let inset = i64::from(inset);

    let (left, top) = match *placement {
        LogoPlacement::Preset(anchor) => {
            let left = match anchor.horizontal {
                HorizontalAnchor::Left => inset,
                HorizontalAnchor::Center => half_up(cw - lw),
                HorizontalAnchor::Right => cw - lw - inset,
            };
            let top = match anchor.vertical {
                VerticalAnchor::Top => rt + inset,
                VerticalAnchor::Center => rt + half_up(rh - lh),
                VerticalAnchor::Bottom => rt + rh - lh - inset,
            };
            (left, top)
        }
        LogoPlacement::Custom {
            x_percent,
            y_percent,
        } => {
            let cx = canvas_w as f64 * x_percent / 100.0;
            let cy = rt as f64 + rh as f64 * y_percent / 100.0;
            (
                round_half_up(cx - lw as f64 / 2.0),
                round_half_up(cy - lh as f64 / 2.0),
            )
        }
    };

    (left.clamp(-lw, cw), top.clamp(0, ch))
}

/// Scale and place the logo for `geometry`'s layout.
///
/// Returns `None` when the layout has no logo layer or the logo cannot be rasterized; the
/// print then simply goes out without a logo.
pub fn render_logo(
    logo: &LogoSource,
    settings: &LogoSettings,
    geometry: &LayoutGeometry,
    inset: u32,
    filter: FilterType,
) -> Option<LogoPass> {
    let layer = geometry.layout.logo_layer();
    if layer == LogoLayer::None {
        tracing::debug!(layout = %geometry.layout, "layout draws no logo");
        return None;
    }

    let canvas = (geometry.canvas_width, geometry.canvas_height);
    let native = logo.native_size();

    let placed: Vec<((u32, u32), (i64, i64))> = if geometry.layout == LayoutKind::FourCutDualStrip
    {
        let band = geometry.logo_region;
        geometry
            .strips
            .iter()
            .filter_map(|strip| {
                let size = fit_within(native, (strip.width, band.height))?;
                let left =
                    i64::from(strip.left) + half_up(i64::from(strip.width) - i64::from(size.0));
                let top =
                    i64::from(band.top) + half_up(i64::from(band.height) - i64::from(size.1));
                Some((size, (left, top)))
            })
            .collect()
    } else {
        let size = resolve_logo_size(native, geometry.canvas_width, settings.size_percent);
        let pos = resolve_logo_position(
            &settings.placement,
            size,
            canvas,
            geometry.logo_region,
            inset,
        );
        vec![(size, pos)]
    };

    let mut tiles = Vec::with_capacity(placed.len());
    for ((w, h), (left, top)) in placed {
        match logo.rasterize(w, h, filter) {
            Ok(image) => tiles.push(LogoTile { image, left, top }),
            Err(e) => {
                tracing::warn!(error = %e, "logo could not be rasterized, skipping logo");
                return None;
            }
        }
    }
    if tiles.is_empty() {
        return None;
    }

    tracing::debug!(
        layout = %geometry.layout,
        ?layer,
        tiles = tiles.len(),
        "resolved logo placement"
    );
    Some(LogoPass { layer, tiles })
}

/// Largest aspect-preserving size of `native` inside `bounds`, or `None` if `bounds` is empty.
fn fit_within(native: (u32, u32), bounds: (u32, u32)) -> Option<(u32, u32)> {
    if bounds.0 == 0 || bounds.1 == 0 {
        return None;
    }
    let (nw, nh) = (f64::from(native.0.max(1)), f64::from(native.1.max(1)));
    let scale = (f64::from(bounds.0) / nw).min(f64::from(bounds.1) / nh);
    let w = round_half_up(nw * scale).clamp(1, i64::from(bounds.0));
    let h = round_half_up(nh * scale).clamp(1, i64::from(bounds.1));
    Some((w as u32, h as u32))
}

fn half_up(v: i64) -> i64 {
    round_half_up(v as f64 / 2.0)
}

#[cfg(test)]
#[path = "../../tests/unit/logo/render.rs"]
mod tests;
