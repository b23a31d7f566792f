//! # fileconv
//!
//! Converts local files between document, image, audio, spreadsheet,
//! presentation and e-book formats. Outputs are written next to the input as
//! `<stem>_converted<ext>`.
//!
//! ## Example
//!
//! ```no_run
//! use fileconv::{CollisionPolicy, ConvertOptions, FileConverter};
//!
//! let options = ConvertOptions {
//!     collision: CollisionPolicy::KeepExisting,
//!     ..Default::default()
//! };
//!
//! let converter = FileConverter::new(options);
//! let outcome = converter.convert("report.docx", ".pdf").unwrap();
//! println!("{:?}", outcome.outputs);
//! ```

pub mod adapters;
pub mod converter;
pub mod core;
pub mod error;
pub mod format;
#[cfg(feature = "gui")]
pub mod gui;
pub mod media;
pub mod render;
pub mod selection;
pub mod tabular;

pub use converter::{ConversionOutcome, FileConverter};
pub use error::{Error, Result};
pub use format::{supported_targets, Conversion, Format, ImageKind, CONVERSION_TABLE};
pub use render::PdfLayout;
pub use selection::{ConversionRequest, Selection};

use std::path::PathBuf;

/// Options for file conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Resolution used when rendering PDF pages to images.
    pub dpi: f32,
    /// The `ffmpeg` executable used for MP3 encoding.
    pub ffmpeg: PathBuf,
    /// MP3 bitrate passed to ffmpeg.
    pub mp3_bitrate: String,
    /// What to do when the output file already exists.
    pub collision: CollisionPolicy,
    /// Page geometry for text rendered to PDF.
    pub layout: PdfLayout,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            dpi: 200.0,
            ffmpeg: PathBuf::from("ffmpeg"),
            mp3_bitrate: "192k".to_string(),
            collision: CollisionPolicy::Overwrite,
            layout: PdfLayout::default(),
        }
    }
}

/// Specifies how an existing output file is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Replace the previous output.
    #[default]
    Overwrite,
    /// Write to `_converted(2)`, `_converted(3)`, ... instead.
    KeepExisting,
}

// Python bindings (only when 'python' feature is enabled)
#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use pyo3::prelude::*;

    /// Converts a file and returns the written paths.
    #[pyfunction]
    fn convert_file(path: String, target: String) -> PyResult<Vec<String>> {
        let converter = FileConverter::with_defaults();
        converter
            .convert(&path, &target)
            .map(|outcome| {
                outcome
                    .outputs
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect()
            })
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))
    }

    /// Lists the target extensions available for a source extension.
    #[pyfunction]
    #[pyo3(name = "supported_targets")]
    fn py_supported_targets(ext: String) -> Vec<String> {
        supported_targets(&ext)
            .iter()
            .map(|f| f.extension().to_string())
            .collect()
    }

    /// A Python module implemented in Rust.
    #[pymodule]
    pub fn fileconv(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(convert_file, m)?)?;
        m.add_function(wrap_pyfunction!(py_supported_targets, m)?)?;
        Ok(())
    }
}
