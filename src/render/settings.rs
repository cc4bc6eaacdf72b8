use image::imageops::FilterType;

use crate::{
    foundation::error::{BoothError, BoothResult},
    layout::canvas::CanvasSpec,
};

/// Encoded output format of a print.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    pub const fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Resampling filter used for photo and logo resizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(f: ResizeFilter) -> Self {
        match f {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    /// Render the photo tiles of one print concurrently.
    pub parallel: bool,
    /// Size of a dedicated rayon pool. `None` uses the global pool.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Knobs of the render pipeline that are not part of a guest's request.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub format: OutputFormat,
    /// JPEG quality within `1..=100`.
    pub jpeg_quality: u8,
    pub filter: ResizeFilter,
    pub threading: RenderThreading,
    pub canvas: CanvasSpec,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            jpeg_quality: 100,
            filter: ResizeFilter::Lanczos3,
            threading: RenderThreading::default(),
            canvas: CanvasSpec::default(),
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> BoothResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(BoothError::validation(format!(
                "jpeg quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.threading.threads == Some(0) {
            return Err(BoothError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        self.canvas.validate()
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter.into()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/settings.rs"]
mod tests;
