use image::{DynamicImage, Rgba};

use super::*;
use crate::{CanvasSpec, LogoAnchor, resolve_layout};

const CANVAS: (u32, u32) = (1000, 1500);
const BAND: Region = Region {
    top: 1275,
    height: 225,
};

fn preset(s: &str) -> LogoPlacement {
    LogoPlacement::Preset(s.parse::<LogoAnchor>().unwrap())
}

fn raster_logo(w: u32, h: u32) -> LogoSource {
    LogoSource::Raster(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        w,
        h,
        Rgba([0, 200, 0, 255]),
    )))
}

#[test]
fn size_follows_canvas_width_and_allows_upscaling() {
    assert_eq!(resolve_logo_size((400, 100), 1000, 80.0), (800, 200));
    assert_eq!(resolve_logo_size((50, 50), 1000, 80.0), (800, 800));
    assert_eq!(resolve_logo_size((3, 1), 1000, 10.0), (100, 33));
}

#[test]
fn extreme_aspect_ratio_saturates_instead_of_wrapping() {
    assert_eq!(
        resolve_logo_size((1, 5_000_000), 1000, 100.0),
        (1000, u32::MAX)
    );
    assert_eq!(
        resolve_logo_size((1, 100_000), 1000, 100.0),
        (1000, 100_000_000)
    );
}

#[test]
fn oversized_raster_logo_is_skipped() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::SingleWithLogo, 85).unwrap();
    let pass = render_logo(
        &raster_logo(1, 100_000),
        &LogoSettings::new(preset("bottom-center"), 100.0).unwrap(),
        &g,
        20,
        FilterType::Triangle,
    );
    assert!(pass.is_none());
}

#[test]
fn preset_positions_inside_logo_band() {
    let size = (800, 200);
    let pos = |s: &str| resolve_logo_position(&preset(s), size, CANVAS, BAND, 20);
    assert_eq!(pos("bottom-center"), (100, 1280));
    assert_eq!(pos("top-left"), (20, 1295));
    assert_eq!(pos("top-right"), (180, 1295));
    // (225 - 200) / 2 = 12.5 rounds up to 13.
    assert_eq!(pos("center-center"), (100, 1288));
}

#[test]
fn custom_position_names_logo_center() {
    let p = LogoPlacement::Custom {
        x_percent: 50.0,
        y_percent: 50.0,
    };
    // center (500, 1275 + 112.5); top-left = center - (400, 100).
    assert_eq!(
        resolve_logo_position(&p, (800, 200), CANVAS, BAND, 20),
        (100, 1288)
    );
    let p = LogoPlacement::Custom {
        x_percent: 0.0,
        y_percent: 0.0,
    };
    assert_eq!(
        resolve_logo_position(&p, (100, 50), CANVAS, BAND, 20),
        (-50, 1250)
    );
}

#[test]
fn positions_are_clamped_to_canvas() {
    let far_left = LogoPlacement::Custom {
        x_percent: -100.0,
        y_percent: -1000.0,
    };
    assert_eq!(
        resolve_logo_position(&far_left, (200, 50), CANVAS, BAND, 20),
        (-200, 0)
    );
    let far_right = LogoPlacement::Custom {
        x_percent: 500.0,
        y_percent: 1000.0,
    };
    assert_eq!(
        resolve_logo_position(&far_right, (200, 50), CANVAS, BAND, 20),
        (1000, 1500)
    );
}

#[test]
fn tall_logo_may_reach_into_photo_region() {
    let (left, top) =
        resolve_logo_position(&preset("bottom-center"), (1000, 1000), CANVAS, BAND, 20);
    assert_eq!(left, 0);
    assert_eq!(top, 480);
    assert!(top < i64::from(BAND.top));
}

#[test]
fn single_layout_has_no_logo_pass() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::Single, 85).unwrap();
    let pass = render_logo(
        &raster_logo(10, 10),
        &LogoSettings::default(),
        &g,
        20,
        FilterType::Triangle,
    );
    assert!(pass.is_none());
}

#[test]
fn single_with_logo_draws_beneath_photo() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::SingleWithLogo, 85).unwrap();
    let pass = render_logo(
        &raster_logo(400, 100),
        &LogoSettings::default(),
        &g,
        20,
        FilterType::Triangle,
    )
    .unwrap();
    assert_eq!(pass.layer, LogoLayer::BeneathPhotos);
    assert_eq!(pass.tiles.len(), 1);
    let tile = &pass.tiles[0];
    assert_eq!(tile.image.dimensions(), (800, 200));
    assert_eq!((tile.left, tile.top), (100, 1280));
}

#[test]
fn dual_strip_gets_one_logo_per_strip() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::FourCutDualStrip, 85).unwrap();
    let pass = render_logo(
        &raster_logo(200, 40),
        &LogoSettings::default(),
        &g,
        20,
        FilterType::Triangle,
    )
    .unwrap();
    assert_eq!(pass.layer, LogoLayer::BeneathPhotos);
    assert_eq!(pass.tiles.len(), 2);
    // Fits the 440x40 bottom band of each strip, centered on the strip.
    assert_eq!(pass.tiles[0].image.dimensions(), (200, 40));
    assert_eq!((pass.tiles[0].left, pass.tiles[0].top), (160, 1460));
    assert_eq!((pass.tiles[1].left, pass.tiles[1].top), (640, 1460));
    assert_eq!(pass.tiles[0].image, pass.tiles[1].image);
}

#[test]
fn grid_layouts_draw_logo_above_photos() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::TwoByTwo, 85).unwrap();
    let settings = LogoSettings::new(preset("center-center"), 20.0).unwrap();
    let pass = render_logo(&raster_logo(100, 100), &settings, &g, 20, FilterType::Triangle)
        .unwrap();
    assert_eq!(pass.layer, LogoLayer::AbovePhotos);
    assert_eq!(pass.tiles[0].image.dimensions(), (200, 200));
    assert_eq!((pass.tiles[0].left, pass.tiles[0].top), (400, 650));
}
