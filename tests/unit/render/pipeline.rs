use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use super::*;
use crate::render::settings::RenderThreading;

fn png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbaImage::from_pixel(w, h, Rgba(px))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn four_photos() -> Vec<PhotoInput> {
    [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [255, 255, 0, 255]]
        .into_iter()
        .map(|px| PhotoInput {
            bytes: png(60, 40, px),
            ..PhotoInput::default()
        })
        .collect()
}

#[test]
fn from_parts_rejects_mismatched_lists() {
    let photos = vec![vec![1u8], vec![2u8]];
    let err = RenderInput::from_parts(
        LayoutKind::VerticalTwo,
        photos.clone(),
        Some(vec![None]),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, BoothError::Validation(_)));

    let err = RenderInput::from_parts(
        LayoutKind::VerticalTwo,
        photos,
        None,
        Some(vec![0, 90, 180]),
    )
    .unwrap_err();
    assert!(matches!(err, BoothError::Validation(_)));
}

#[test]
fn from_parts_zips_crops_and_rotations() {
    let crop = CropRect::new(1.0, 2.0, 3.0, 4.0);
    let input = RenderInput::from_parts(
        LayoutKind::VerticalTwo,
        vec![vec![1u8], vec![2u8]],
        Some(vec![None, Some(crop)]),
        Some(vec![-90, 180]),
    )
    .unwrap();
    assert_eq!(input.photos[0].crop, None);
    assert_eq!(input.photos[1].crop, Some(crop));
    assert_eq!(input.photos[0].rotation, Rotation::Cw270);
    assert_eq!(input.photos[1].rotation, Rotation::Cw180);
}

#[test]
fn background_defaults_by_layout() {
    let single = RenderInput::new(LayoutKind::Single, Vec::new());
    assert_eq!(single.effective_background(), BackgroundColor::WHITE);
    let grid = RenderInput::new(LayoutKind::TwoByTwo, Vec::new());
    assert_eq!(grid.effective_background(), BackgroundColor::BLACK);
    let custom = grid.with_background(BackgroundColor::WHITE);
    assert_eq!(custom.effective_background(), BackgroundColor::WHITE);
}

#[test]
fn photo_count_is_checked_before_decoding() {
    let input = RenderInput::new(
        LayoutKind::TwoByTwo,
        vec![
            PhotoInput {
                bytes: b"not an image".to_vec(),
                ..PhotoInput::default()
            };
            3
        ],
    );
    let err = render_canvas(&input, &RenderSettings::default()).unwrap_err();
    assert!(matches!(
        err,
        BoothError::PhotoCountMismatch {
            layout: LayoutKind::TwoByTwo,
            expected: 4,
            actual: 3
        }
    ));
}

#[test]
fn undecodable_photo_names_its_index() {
    let mut photos = four_photos();
    photos[2].bytes = b"garbage".to_vec();
    let input = RenderInput::new(LayoutKind::TwoByTwo, photos);
    match render_canvas(&input, &RenderSettings::default()).unwrap_err() {
        BoothError::Decode(msg) => assert!(msg.starts_with("photo 2:"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn threading_modes_produce_identical_prints() {
    let input = RenderInput::new(LayoutKind::TwoByTwo, four_photos());
    let parallel = render_canvas(&input, &RenderSettings::default()).unwrap();

    let sequential = RenderSettings {
        threading: RenderThreading {
            parallel: false,
            threads: None,
        },
        ..RenderSettings::default()
    };
    assert_eq!(render_canvas(&input, &sequential).unwrap(), parallel);

    let pooled = RenderSettings {
        threading: RenderThreading {
            parallel: true,
            threads: Some(2),
        },
        ..RenderSettings::default()
    };
    assert_eq!(render_canvas(&input, &pooled).unwrap(), parallel);
}

#[test]
fn unreadable_logo_is_skipped() {
    let photo = PhotoInput {
        bytes: png(30, 20, [255, 0, 0, 255]),
        ..PhotoInput::default()
    };
    let input = RenderInput::new(LayoutKind::SingleWithLogo, vec![photo]);
    let without = render_canvas(&input, &RenderSettings::default()).unwrap();

    let with_bad_logo = input.with_logo(LogoInput {
        bytes: b"definitely not a logo".to_vec(),
        settings: LogoSettings::default(),
    });
    let out = render_canvas(&with_bad_logo, &RenderSettings::default()).unwrap();
    assert_eq!(out, without);
}
