use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    assets::decode::{decode_logo, decode_photo},
    foundation::{
        color::BackgroundColor,
        core::CropRect,
        error::{BoothError, BoothResult},
    },
    layout::{
        geometry::{LayoutGeometry, resolve_layout},
        kind::{LayoutKind, LogoLayer},
    },
    logo::{
        render::{LogoPass, render_logo},
        settings::LogoSettings,
    },
    photo::render::{PhotoTile, Rotation, render_tile},
    render::{
        composite::{CompositeInput, composite},
        encode::{EncodedImage, encode_canvas},
        settings::RenderSettings,
    },
};

/// One guest photo as submitted by the booth.
#[derive(Clone, Debug, Default)]
pub struct PhotoInput {
    /// Encoded image bytes (JPEG, PNG, ...).
    pub bytes: Vec<u8>,
    /// Crop in the coordinate space of the rotated photo.
    pub crop: Option<CropRect>,
    pub rotation: Rotation,
}

#[derive(Clone, Debug)]
pub struct LogoInput {
    /// Raster or SVG bytes.
    pub bytes: Vec<u8>,
    pub settings: LogoSettings,
}

/// A single print request.
#[derive(Clone, Debug)]
pub struct RenderInput {
    pub photos: Vec<PhotoInput>,
    pub layout: LayoutKind,
    /// `None` picks white for single-photo layouts and black otherwise.
    pub background: Option<BackgroundColor>,
    pub logo: Option<LogoInput>,
    /// Percent of the canvas height given to the photo in `SingleWithLogo`.
    /// `None` uses the canvas default.
    pub photo_area_ratio: Option<u32>,
}

impl RenderInput {
    pub fn new(layout: LayoutKind, photos: Vec<PhotoInput>) -> Self {
        Self {
            photos,
            layout,
            background: None,
            logo: None,
            photo_area_ratio: None,
        }
    }

    /// Zip parallel per-photo lists into [`PhotoInput`]s.
    ///
    /// `crops` and `rotations` are either absent or exactly as long as `photos`. Rotations are
    /// given in degrees.
    pub fn from_parts(
        layout: LayoutKind,
        photos: Vec<Vec<u8>>,
        crops: Option<Vec<Option<CropRect>>>,
        rotations: Option<Vec<i32>>,
    ) -> BoothResult<Self> {
        let n = photos.len();
        if let Some(c) = &crops
            && c.len() != n
        {
            return Err(BoothError::validation(format!(
                "crops has {} entries for {n} photo(s)",
                c.len()
            )));
        }
        if let Some(r) = &rotations
            && r.len() != n
        {
            return Err(BoothError::validation(format!(
                "rotations has {} entries for {n} photo(s)",
                r.len()
            )));
        }

        let mut crops = crops.map(Vec::into_iter);
        let mut rotations = rotations.map(Vec::into_iter);
        let photos = photos
            .into_iter()
            .map(|bytes| PhotoInput {
                bytes,
                crop: crops.as_mut().and_then(|c| c.next()).flatten(),
                rotation: rotations
                    .as_mut()
                    .and_then(|r| r.next())
                    .map(Rotation::from_degrees)
                    .unwrap_or_default(),
            })
            .collect();
        Ok(Self::new(layout, photos))
    }

    pub fn with_background(mut self, background: BackgroundColor) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_logo(mut self, logo: LogoInput) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn with_photo_area_ratio(mut self, ratio: u32) -> Self {
        self.photo_area_ratio = Some(ratio);
        self
    }

    /// Background actually painted for this request.
    pub fn effective_background(&self) -> BackgroundColor {
        self.background.unwrap_or(if self.layout.is_single_photo() {
            BackgroundColor::WHITE
        } else {
            BackgroundColor::BLACK
        })
    }
}

/// Render and encode one print.
#[tracing::instrument(skip_all, fields(layout = %input.layout, photos = input.photos.len()))]
pub fn render(input: &RenderInput, settings: &RenderSettings) -> BoothResult<EncodedImage> {
    let canvas = render_canvas(input, settings)?;
    encode_canvas(&canvas, settings)
}

/// Render one print without encoding it.
#[tracing::instrument(skip_all, fields(layout = %input.layout, photos = input.photos.len()))]
pub fn render_canvas(input: &RenderInput, settings: &RenderSettings) -> BoothResult<RgbaImage> {
    settings.validate()?;

    let expected = input.layout.required_photos();
    if input.photos.len() != expected {
        return Err(BoothError::PhotoCountMismatch {
            layout: input.layout,
            expected,
            actual: input.photos.len(),
        });
    }

    let ratio = input
        .photo_area_ratio
        .unwrap_or(settings.canvas.default_photo_area_ratio);
    let geometry = resolve_layout(&settings.canvas, input.layout, ratio)?;

    let tiles = render_tiles(&input.photos, &geometry, settings)?;
    let logo = input
        .logo
        .as_ref()
        .and_then(|logo| prepare_logo(logo, &geometry, settings));

    composite(&CompositeInput {
        geometry: &geometry,
        background: input.effective_background(),
        tiles: &tiles,
        logo: logo.as_ref(),
    })
}

fn render_tiles(
    photos: &[PhotoInput],
    geometry: &LayoutGeometry,
    settings: &RenderSettings,
) -> BoothResult<Vec<PhotoTile>> {
    let filter = settings.filter_type();
    let render_one = |(index, photo): (usize, &PhotoInput)| -> BoothResult<PhotoTile> {
        let slot = geometry.slot(index)?;
        let img = decode_photo(&photo.bytes).map_err(|e| match e {
            BoothError::Decode(msg) => BoothError::decode(format!("photo {index}: {msg}")),
            other => other,
        })?;
        Ok(render_tile(
            &img,
            photo.crop.as_ref(),
            photo.rotation,
            slot,
            filter,
        ))
    };

    if !settings.threading.parallel || photos.len() < 2 {
        return photos.iter().enumerate().map(render_one).collect();
    }

    let run = || {
        photos
            .par_iter()
            .enumerate()
            .map(render_one)
            .collect::<BoothResult<Vec<_>>>()
    };
    match settings.threading.threads {
        Some(n) => build_thread_pool(n)?.install(run),
        None => run(),
    }
}

fn prepare_logo(
    logo: &LogoInput,
    geometry: &LayoutGeometry,
    settings: &RenderSettings,
) -> Option<LogoPass> {
    if geometry.layout.logo_layer() == LogoLayer::None {
        return None;
    }
    let source = match decode_logo(&logo.bytes) {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!(error = %e, "logo could not be decoded, rendering without logo");
            return None;
        }
    };
    render_logo(
        &source,
        &logo.settings,
        geometry,
        settings.canvas.logo_inset,
        settings.filter_type(),
    )
}

fn build_thread_pool(threads: usize) -> BoothResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
