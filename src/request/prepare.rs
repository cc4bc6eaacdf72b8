use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{BoothError, BoothResult},
    render::pipeline::{LogoInput, RenderInput},
    request::model::RenderRequest,
};

impl RenderRequest {
    /// Read every referenced file under `root` and build the pipeline input.
    ///
    /// A missing photo fails the request. A missing logo is logged and the print is rendered
    /// without it.
    pub fn prepare(&self, root: impl AsRef<Path>) -> BoothResult<RenderInput> {
        let root = root.as_ref();
        let photos = self
            .photos
            .iter()
            .map(|p| read_bytes(root, p))
            .collect::<BoothResult<Vec<_>>>()?;

        let mut input = RenderInput::from_parts(
            self.layout,
            photos,
            self.crops.clone(),
            self.rotations.clone(),
        )?;
        input.background = self.background;
        input.photo_area_ratio = self.photo_area_ratio;

        if let Some(logo) = &self.logo {
            match read_bytes(root, &logo.path) {
                Ok(bytes) => {
                    input.logo = Some(LogoInput {
                        bytes,
                        settings: logo.settings,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        path = %logo.path,
                        error = %e,
                        "logo unavailable, rendering without logo"
                    );
                }
            }
        }
        Ok(input)
    }
}

fn read_bytes(root: &Path, source: &str) -> BoothResult<Vec<u8>> {
    let path: PathBuf = root.join(normalize_rel_path(source)?);
    std::fs::read(&path)
        .with_context(|| format!("read '{}'", path.display()))
        .map_err(BoothError::from)
}

/// Normalize a request-relative path: forward slashes, no `.`/empty segments, never
/// absolute and never escaping the request directory.
pub fn normalize_rel_path(source: &str) -> BoothResult<String> {
    let s = source.replace('\\', "/");
    if s.is_empty() {
        return Err(BoothError::validation("file path must be non-empty"));
    }
    if s.starts_with('/') || s.as_bytes().get(1) == Some(&b':') {
        return Err(BoothError::validation(format!(
            "file paths must be relative, got '{source}'"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        match part {
            "" | "." => continue,
            ".." => {
                return Err(BoothError::validation(format!(
                    "file paths must not contain '..', got '{source}'"
                )));
            }
            _ => out.push(part),
        }
    }
    if out.is_empty() {
        return Err(BoothError::validation("file path must contain a file name"));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/request/prepare.rs"]
mod tests;
