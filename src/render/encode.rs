use image::{
    ExtendedColorType, ImageEncoder, RgbImage, RgbaImage,
    buffer::ConvertBuffer,
    codecs::{
        jpeg::{JpegEncoder, PixelDensity},
        png::PngEncoder,
    },
};

use crate::{
    foundation::error::{BoothError, BoothResult},
    render::settings::{OutputFormat, RenderSettings},
};

/// A finished print, ready to be stored, streamed or handed to a printer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Encode the composited sheet.
///
/// JPEG output is written without chroma subsampling (the `image` baseline encoder always
/// stores full-resolution chroma), so flat backgrounds and logo edges print without
/// banding. The configured DPI is recorded in the JFIF header.
pub fn encode_canvas(canvas: &RgbaImage, settings: &RenderSettings) -> BoothResult<EncodedImage> {
    let (width, height) = canvas.dimensions();
    let mut bytes = Vec::new();

    match settings.format {
        OutputFormat::Jpeg => {
            let rgb: RgbImage = canvas.convert();
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, settings.jpeg_quality);
            let dpi = u16::try_from(settings.canvas.dpi).unwrap_or(u16::MAX);
            encoder.set_pixel_density(PixelDensity::dpi(dpi));
            encoder
                .encode_image(&rgb)
                .map_err(|e| BoothError::encode(format!("jpeg: {e}")))?;
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut bytes)
                .write_image(canvas.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(|e| BoothError::encode(format!("png: {e}")))?;
        }
    }

    tracing::debug!(
        format = ?settings.format,
        width,
        height,
        len = bytes.len(),
        "encoded print"
    );
    Ok(EncodedImage {
        bytes,
        width,
        height,
        format: settings.format,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
