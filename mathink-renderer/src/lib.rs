//! # Mathink Renderer
//!
//! Turns a [`Drawing`](mathink_core::Drawing) into a fixed-size image for the
//! recognition service.
//!
//! ## Export Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Drawing ──► bounding box ──► crop surface  │
//! │                                   │         │
//! │  encoded ◄── encode ◄── letterbox ◄┘         │
//! ├─────────────────────────────────────────────┤
//! │            RasterBackend trait              │
//! │     (tiny-skia software rasterizer)         │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod encoded;
pub mod error;
pub mod export;
#[cfg(feature = "images")]
pub mod preprocess;
pub mod service;

pub use backend::{RasterBackend, SkiaBackend};
pub use encoded::{EncodedImage, ImageFormat};
pub use error::{RenderError, RenderResult};
pub use export::{DrawingExporter, ExportConfig, ExportWarning, ExportedImage, FitLayout};
#[cfg(feature = "images")]
pub use preprocess::{load_encoded, preprocess_photo, PreprocessConfig};
pub use service::{ExportService, ExportTicket};
