//! Known file formats, the conversion table and route resolution.

use std::fmt;
use std::path::Path;

/// A file format recognised by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Docx,
    Pdf,
    Jpg,
    Png,
    Mp4,
    Wav,
    Mp3,
    Txt,
    Xlsx,
    Csv,
    Pptx,
    Epub,
}

impl Format {
    /// Every known format, in conversion table order.
    pub const ALL: [Format; 12] = [
        Format::Docx,
        Format::Pdf,
        Format::Jpg,
        Format::Png,
        Format::Mp4,
        Format::Wav,
        Format::Mp3,
        Format::Txt,
        Format::Xlsx,
        Format::Csv,
        Format::Pptx,
        Format::Epub,
    ];

    /// Parses an extension such as `.PDF` or `pdf`.
    pub fn from_extension(ext: &str) -> Option<Format> {
        let ext = ext.trim();
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        match ext.as_str() {
            "docx" => Some(Format::Docx),
            "pdf" => Some(Format::Pdf),
            "jpg" | "jpeg" => Some(Format::Jpg),
            "png" => Some(Format::Png),
            "mp4" => Some(Format::Mp4),
            "wav" => Some(Format::Wav),
            "mp3" => Some(Format::Mp3),
            "txt" => Some(Format::Txt),
            "xlsx" => Some(Format::Xlsx),
            "csv" => Some(Format::Csv),
            "pptx" => Some(Format::Pptx),
            "epub" => Some(Format::Epub),
            _ => None,
        }
    }

    /// Format of a path, judged by its extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Format::from_extension)
    }

    /// Canonical extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Docx => ".docx",
            Format::Pdf => ".pdf",
            Format::Jpg => ".jpg",
            Format::Png => ".png",
            Format::Mp4 => ".mp4",
            Format::Wav => ".wav",
            Format::Mp3 => ".mp3",
            Format::Txt => ".txt",
            Format::Xlsx => ".xlsx",
            Format::Csv => ".csv",
            Format::Pptx => ".pptx",
            Format::Epub => ".epub",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Lowercased extension of a path including the dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Source format to the ordered list of targets it converts to.
pub const CONVERSION_TABLE: &[(Format, &[Format])] = &[
    (Format::Docx, &[Format::Pdf, Format::Txt]),
    (Format::Pdf, &[Format::Docx, Format::Jpg, Format::Png]),
    (Format::Jpg, &[Format::Pdf]),
    (Format::Png, &[Format::Pdf]),
    (Format::Mp4, &[Format::Mp3]),
    (Format::Wav, &[Format::Mp3]),
    (Format::Mp3, &[Format::Wav]),
    (Format::Txt, &[Format::Pdf]),
    (Format::Xlsx, &[Format::Csv]),
    (Format::Csv, &[Format::Xlsx]),
    (Format::Pptx, &[Format::Pdf]),
    (Format::Epub, &[Format::Pdf]),
];

/// Targets supported for a source extension; empty when the extension is unknown.
pub fn supported_targets(extension: &str) -> &'static [Format] {
    Format::from_extension(extension)
        .map(targets_for)
        .unwrap_or(&[])
}

/// Targets supported for a known source format.
pub fn targets_for(source: Format) -> &'static [Format] {
    CONVERSION_TABLE
        .iter()
        .find(|(from, _)| *from == source)
        .map(|(_, targets)| *targets)
        .unwrap_or(&[])
}

/// Raster image kinds produced from PDF pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpg,
    Png,
}

impl ImageKind {
    pub fn format(self) -> Format {
        match self {
            ImageKind::Jpg => Format::Jpg,
            ImageKind::Png => Format::Png,
        }
    }
}

/// A supported conversion route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    DocxToPdf,
    DocxToText,
    PdfToDocx,
    PdfToImages(ImageKind),
    ImageToPdf,
    AudioToMp3,
    Mp3ToWav,
    TextToPdf,
    XlsxToCsv,
    CsvToXlsx,
    PptxToPdf,
    EpubToPdf,
}

impl Conversion {
    /// Resolves a (source, target) pair to its route.
    pub fn resolve(source: Format, target: Format) -> Option<Conversion> {
        use Format::*;
        let route = match (source, target) {
            (Docx, Pdf) => Conversion::DocxToPdf,
            (Docx, Txt) => Conversion::DocxToText,
            (Pdf, Docx) => Conversion::PdfToDocx,
            (Pdf, Jpg) => Conversion::PdfToImages(ImageKind::Jpg),
            (Pdf, Png) => Conversion::PdfToImages(ImageKind::Png),
            (Jpg | Png, Pdf) => Conversion::ImageToPdf,
            (Mp4 | Wav, Mp3) => Conversion::AudioToMp3,
            (Mp3, Wav) => Conversion::Mp3ToWav,
            (Txt, Pdf) => Conversion::TextToPdf,
            (Xlsx, Csv) => Conversion::XlsxToCsv,
            (Csv, Xlsx) => Conversion::CsvToXlsx,
            (Pptx, Pdf) => Conversion::PptxToPdf,
            (Epub, Pdf) => Conversion::EpubToPdf,
            _ => return None,
        };
        Some(route)
    }

    /// Whether the route writes one output file per source page.
    pub fn is_paged(self) -> bool {
        matches!(self, Conversion::PdfToImages(_))
    }
}
