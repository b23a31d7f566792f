//! Error types for fileconv.

use thiserror::Error;

/// Result type for fileconv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while validating or performing a conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// No input file was given, or it does not exist.
    #[error("Please select a valid file.")]
    NoFile,

    /// No target format was chosen.
    #[error("Please select a target format.")]
    NoFormat,

    /// The (source, target) pair is not in the conversion table.
    #[error("Conversion from {from} to {to} is not supported.")]
    Unsupported { from: String, to: String },

    /// Error occurred while parsing a DOCX file.
    #[error("Failed to parse DOCX file: {0}")]
    DocxParse(String),

    /// Error occurred while writing a DOCX file.
    #[error("Failed to write DOCX file: {0}")]
    DocxWrite(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Page rasterization failed (including a missing pdfium library).
    #[error("Failed to render PDF pages: {0}")]
    Raster(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Audio decoding or encoding failed.
    #[error("Audio error: {0}")]
    Audio(String),

    /// The ffmpeg executable could not be run or reported a failure.
    #[error("ffmpeg error: {0}")]
    Ffmpeg(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Error occurred while reading an EPUB file.
    #[error("Failed to read EPUB file: {0}")]
    Ebook(String),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error occurred during file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Title used when the error is shown in a dialog.
    pub fn title(&self) -> &'static str {
        match self {
            Error::NoFile => "No File",
            Error::NoFormat => "No Format",
            Error::Unsupported { .. } => "Error",
            _ => "Conversion Error",
        }
    }
}
