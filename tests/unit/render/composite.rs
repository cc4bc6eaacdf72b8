use super::*;
use crate::{
    CanvasSpec, LayoutKind, LogoTile,
    photo::{crop::NormalizedCrop, render::FitMode},
    resolve_layout,
};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
const PINK: BackgroundColor = BackgroundColor::rgb(0xFF, 0xB6, 0xC1);

fn solid_tile(w: u32, h: u32, px: Rgba<u8>) -> PhotoTile {
    PhotoTile {
        image: RgbaImage::from_pixel(w, h, px),
        fit: FitMode::CoverCentered,
        crop: NormalizedCrop::NONE,
    }
}

fn tiles_for(g: &LayoutGeometry, px: Rgba<u8>) -> Vec<PhotoTile> {
    g.slots
        .iter()
        .map(|s| solid_tile(s.width, s.height, px))
        .collect()
}

fn logo_pass(layer: LogoLayer, w: u32, h: u32, left: i64, top: i64) -> LogoPass {
    LogoPass {
        layer,
        tiles: vec![LogoTile {
            image: RgbaImage::from_pixel(w, h, GREEN),
            left,
            top,
        }],
    }
}

#[test]
fn background_shows_in_margins_and_gaps() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::TwoByTwo, 85).unwrap();
    let tiles = tiles_for(&g, RED);
    let canvas = composite(&CompositeInput {
        geometry: &g,
        background: PINK,
        tiles: &tiles,
        logo: None,
    })
    .unwrap();

    assert_eq!(canvas.dimensions(), (1000, 1500));
    assert_eq!(*canvas.get_pixel(5, 5), PINK.to_rgba());
    // Vertical gap between the columns (x = 490..510).
    assert_eq!(*canvas.get_pixel(500, 300), PINK.to_rgba());
    for slot in &g.slots {
        assert_eq!(*canvas.get_pixel(slot.left, slot.top), RED);
        assert_eq!(*canvas.get_pixel(slot.right() - 1, slot.bottom() - 1), RED);
    }
}

#[test]
fn beneath_logo_is_covered_by_photo() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::SingleWithLogo, 85).unwrap();
    let tiles = tiles_for(&g, RED);
    // Logo reaches 75px up into the photo region.
    let logo = logo_pass(LogoLayer::BeneathPhotos, 800, 200, 100, 1200);
    let canvas = composite(&CompositeInput {
        geometry: &g,
        background: BackgroundColor::WHITE,
        tiles: &tiles,
        logo: Some(&logo),
    })
    .unwrap();

    assert_eq!(*canvas.get_pixel(500, 1250), RED);
    assert_eq!(*canvas.get_pixel(500, 1300), GREEN);
    assert_eq!(*canvas.get_pixel(10, 1300), BackgroundColor::WHITE.to_rgba());
}

#[test]
fn above_logo_covers_photo() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::TwoByTwo, 85).unwrap();
    let tiles = tiles_for(&g, RED);
    let logo = logo_pass(LogoLayer::AbovePhotos, 100, 100, 450, 700);
    let canvas = composite(&CompositeInput {
        geometry: &g,
        background: BackgroundColor::BLACK,
        tiles: &tiles,
        logo: Some(&logo),
    })
    .unwrap();
    assert_eq!(*canvas.get_pixel(460, 710), GREEN);
    assert_eq!(*canvas.get_pixel(500, 750), GREEN);
    assert_eq!(*canvas.get_pixel(440, 710), RED);
}

#[test]
fn transparent_photo_pixels_show_background_not_logo() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::SingleWithLogo, 85).unwrap();
    let tiles = tiles_for(&g, Rgba([255, 0, 0, 0]));
    let logo = logo_pass(LogoLayer::BeneathPhotos, 1000, 1500, 0, 0);
    let canvas = composite(&CompositeInput {
        geometry: &g,
        background: BackgroundColor::WHITE,
        tiles: &tiles,
        logo: Some(&logo),
    })
    .unwrap();
    assert_eq!(*canvas.get_pixel(500, 500), BackgroundColor::WHITE.to_rgba());
    assert_eq!(*canvas.get_pixel(500, 1400), GREEN);
}

#[test]
fn half_transparent_photo_blends_with_background() {
    assert_eq!(
        over_opaque(Rgba([255, 0, 0, 128]), BackgroundColor::BLACK),
        Rgba([128, 0, 0, 255])
    );
    assert_eq!(over_opaque(RED, BackgroundColor::WHITE), RED);
}

#[test]
fn dual_strip_right_strip_mirrors_left() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::FourCutDualStrip, 85).unwrap();
    let tiles: Vec<PhotoTile> = g
        .slots
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let shade = 40 * (i as u8 + 1);
            PhotoTile {
                image: RgbaImage::from_fn(s.width, s.height, |x, y| {
                    Rgba([shade, (x % 256) as u8, (y % 256) as u8, 255])
                }),
                fit: FitMode::CoverCentered,
                crop: NormalizedCrop::NONE,
            }
        })
        .collect();
    let canvas = composite(&CompositeInput {
        geometry: &g,
        background: PINK,
        tiles: &tiles,
        logo: None,
    })
    .unwrap();

    let (left, right) = (g.strips[0], g.strips[1]);
    let a = imageops::crop_imm(&canvas, left.left, left.top, left.width, left.height).to_image();
    let b = imageops::crop_imm(&canvas, right.left, right.top, right.width, right.height)
        .to_image();
    assert_eq!(a, b);
    // Gap between strips keeps the background.
    assert_eq!(*canvas.get_pixel(500, 700), PINK.to_rgba());
}

#[test]
fn tile_count_mismatch_is_an_error() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::VerticalTwo, 85).unwrap();
    let tiles = vec![solid_tile(920, 700, RED)];
    let res = composite(&CompositeInput {
        geometry: &g,
        background: BackgroundColor::BLACK,
        tiles: &tiles,
        logo: None,
    });
    assert!(res.is_err());
}

#[test]
fn tile_size_mismatch_is_an_error() {
    let g = resolve_layout(&CanvasSpec::default(), LayoutKind::Single, 85).unwrap();
    let tiles = vec![solid_tile(10, 10, RED)];
    let res = composite(&CompositeInput {
        geometry: &g,
        background: BackgroundColor::BLACK,
        tiles: &tiles,
        logo: None,
    });
    assert!(res.is_err());
}
