//! Printbooth turns a handful of guest photos into a finished 4x6 print.
//!
//! A print is produced by a single pure call:
//!
//! - Pick a [`LayoutKind`] and supply exactly the photos it needs
//! - Optionally add per-photo crops and rotations, a background color and an event logo
//! - [`render`] resolves the slot geometry, fits every photo into its slot, layers the logo
//!   and encodes the sheet
//!
//! The same geometry is exposed through [`resolve_layout`] and [`crop_aspect_ratios`] so a
//! preview or crop UI can lock its crop boxes to exactly the slots the renderer fills.
#![forbid(unsafe_code)]

pub mod assets;
pub mod foundation;
pub mod layout;
pub mod logo;
pub mod photo;
pub mod render;
pub mod request;

pub use crate::assets::decode::{LogoSource, decode_logo, decode_photo};
pub use crate::foundation::color::BackgroundColor;
pub use crate::foundation::core::{CropRect, PixelRect, SlotRect};
pub use crate::foundation::error::{BoothError, BoothResult};
pub use crate::layout::canvas::{CanvasSpec, GridMargins, StripMargins};
pub use crate::layout::geometry::{
    AspectRatio, LayoutGeometry, Placement, Region, crop_aspect_ratio, crop_aspect_ratios,
    resolve_layout,
};
pub use crate::layout::kind::{LayoutKind, LogoLayer};
pub use crate::logo::render::{LogoPass, LogoTile, render_logo};
pub use crate::logo::settings::{
    HorizontalAnchor, LogoAnchor, LogoPlacement, LogoSettings, VerticalAnchor,
};
pub use crate::photo::crop::{NormalizedCrop, normalize_crop};
pub use crate::photo::render::{FitMode, PhotoTile, Rotation, render_tile};
pub use crate::render::composite::{CompositeInput, composite};
pub use crate::render::encode::{EncodedImage, encode_canvas};
pub use crate::render::pipeline::{LogoInput, PhotoInput, RenderInput, render, render_canvas};
pub use crate::render::settings::{OutputFormat, RenderSettings, RenderThreading, ResizeFilter};
pub use crate::request::model::{LogoRef, RenderRequest};
