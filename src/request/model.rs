use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::{
        color::BackgroundColor,
        core::CropRect,
        error::{BoothError, BoothResult},
    },
    layout::kind::LayoutKind,
    logo::settings::LogoSettings,
    render::settings::RenderSettings,
};

/// A print request as stored next to its photos.
///
/// ```json
/// {
///   "layout": "four-cut-dual-strip",
///   "photos": ["shots/1.jpg", "shots/2.jpg", "shots/3.jpg", "shots/4.jpg"],
///   "crops": [null, { "x": 10, "y": 0, "width": 800, "height": 625 }, null, null],
///   "rotations": [0, 90, 0, 0],
///   "background": "#FFB6C1",
///   "logo": { "path": "brand/logo.svg", "settings": { "position": "bottom-center", "size": 60 } },
///   "settings": { "format": "png" }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderRequest {
    pub layout: LayoutKind,
    /// Photo paths, relative to the request file.
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crops: Option<Vec<Option<CropRect>>>,
    /// Clockwise rotations in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotations: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_area_ratio: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<RenderSettings>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogoRef {
    pub path: String,
    #[serde(default)]
    pub settings: LogoSettings,
}

impl RenderRequest {
    /// Read and parse a request file.
    pub fn load(path: &Path) -> BoothResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open render request '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_reader(reader: impl std::io::Read) -> BoothResult<Self> {
        let req: Self = serde_json::from_reader(reader)
            .map_err(|e| BoothError::validation(format!("parse render request: {e}")))?;
        req.validate()?;
        Ok(req)
    }

    /// Structural checks that do not need any file contents.
    pub fn validate(&self) -> BoothResult<()> {
        let n = self.photos.len();
        if let Some(crops) = &self.crops
            && crops.len() != n
        {
            return Err(BoothError::validation(format!(
                "crops has {} entries for {n} photo(s)",
                crops.len()
            )));
        }
        if let Some(rotations) = &self.rotations
            && rotations.len() != n
        {
            return Err(BoothError::validation(format!(
                "rotations has {} entries for {n} photo(s)",
                rotations.len()
            )));
        }
        if let Some(ratio) = self.photo_area_ratio
            && !(1..=100).contains(&ratio)
        {
            return Err(BoothError::validation(format!(
                "photo_area_ratio must be within 1..=100, got {ratio}"
            )));
        }
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        Ok(())
    }

    /// Settings embedded in the request, or the defaults.
    pub fn render_settings(&self) -> RenderSettings {
        self.settings.clone().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/request/model.rs"]
mod tests;
