use std::{
    io::Cursor,
    sync::{Arc, OnceLock},
};

use image::{DynamicImage, ImageDecoder, ImageReader, RgbaImage, metadata::Orientation};

use crate::foundation::error::{BoothError, BoothResult};

/// Decode a source photo and bake in its stored orientation.
///
/// Camera and phone photos often keep their sensor orientation and only record the
/// intended rotation in metadata (EXIF `Orientation`). The returned image is upright, so
/// crop coordinates and slot geometry always refer to what the guest saw.
pub fn decode_photo(bytes: &[u8]) -> BoothResult<DynamicImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| BoothError::decode(format!("sniff photo format: {e}")))?;
    if reader.format().is_none() {
        return Err(BoothError::decode("unrecognized photo format"));
    }

    let mut decoder = reader
        .into_decoder()
        .map_err(|e| BoothError::decode(format!("open photo decoder: {e}")))?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder)
        .map_err(|e| BoothError::decode(format!("decode photo: {e}")))?;

    if orientation != Orientation::NoTransforms {
        tracing::debug!(?orientation, "applying stored photo orientation");
        img.apply_orientation(orientation);
    }
    if img.width() == 0 || img.height() == 0 {
        return Err(BoothError::decode("photo has no pixels"));
    }
    Ok(img)
}

/// Largest logo edge, in pixels, that will be rasterized.
pub const MAX_LOGO_DIM: u32 = 16_384;

/// A decoded logo, kept in its native representation until the target size is known.
#[derive(Clone)]
pub enum LogoSource {
    Raster(DynamicImage),
    /// Vector logos are rasterized directly at their final size.
    Svg(Arc<usvg::Tree>),
}

impl std::fmt::Debug for LogoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.native_size();
        match self {
            LogoSource::Raster(_) => write!(f, "LogoSource::Raster({w}x{h})"),
            LogoSource::Svg(_) => write!(f, "LogoSource::Svg({w}x{h})"),
        }
    }
}

impl LogoSource {
    /// Intrinsic size in pixels (SVG sizes rounded up).
    pub fn native_size(&self) -> (u32, u32) {
        match self {
            LogoSource::Raster(img) => (img.width(), img.height()),
            LogoSource::Svg(tree) => {
                let size = tree.size();
                (
                    size.width().ceil().max(1.0) as u32,
                    size.height().ceil().max(1.0) as u32,
                )
            }
        }
    }

    /// Produce straight-alpha RGBA pixels at exactly `width` x `height`.
    ///
    /// Sizes with an edge of zero or above [`MAX_LOGO_DIM`] are rejected.
    pub fn rasterize(
        &self,
        width: u32,
        height: u32,
        filter: image::imageops::FilterType,
    ) -> BoothResult<RgbaImage> {
        if width == 0 || height == 0 || width > MAX_LOGO_DIM || height > MAX_LOGO_DIM {
            return Err(BoothError::decode(format!(
                "logo raster size out of range: {width}x{height}"
            )));
        }
        match self {
            LogoSource::Raster(img) => Ok(img.resize_exact(width, height, filter).to_rgba8()),
            LogoSource::Svg(tree) => rasterize_svg(tree, width, height),
        }
    }
}

/// Decode logo bytes as a raster image, falling back to SVG.
pub fn decode_logo(bytes: &[u8]) -> BoothResult<LogoSource> {
    if image::guess_format(bytes).is_ok() {
        let img = image::load_from_memory(bytes)
            .map_err(|e| BoothError::decode(format!("decode logo: {e}")))?;
        if img.width() == 0 || img.height() == 0 {
            return Err(BoothError::decode("logo has no pixels"));
        }
        return Ok(LogoSource::Raster(img));
    }
    parse_svg(bytes).map(|tree| LogoSource::Svg(Arc::new(tree)))
}

pub fn parse_svg(bytes: &[u8]) -> BoothResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb: system_fontdb(),
        ..usvg::Options::default()
    };
    usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| BoothError::decode(format!("parse svg logo: {e}")))
}

/// System fonts for `<text>` in SVG logos, loaded once per process.
fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static FONTDB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTDB
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts for svg logos");
            Arc::new(db)
        })
        .clone()
}

fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> BoothResult<RgbaImage> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BoothError::decode("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied pixels; the compositor blends straight alpha.
    let mut straight = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        straight.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(width, height, straight)
        .ok_or_else(|| BoothError::decode("svg raster buffer size mismatch"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
