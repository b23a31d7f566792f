//! Conversion dispatcher: resolves a route and writes the output files.

mod output;

pub use self::output::OutputNamer;

use crate::adapters::{
    AstExtractor, DocxExtractor, EpubExtractor, PdfExtractor, PptxExtractor, TextExtractor,
};
use crate::format::{extension_of, Conversion, Format};
use crate::media::{self, Mp3Encoder};
use crate::render::{DocxRenderer, PdfRenderer, Renderer, TextRenderer};
use crate::{tabular, ConvertOptions, Error, Result};
use std::path::{Path, PathBuf};

/// Files written by one conversion, in page order for paged routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub outputs: Vec<PathBuf>,
}

/// Main converter struct that dispatches a file to its conversion route.
pub struct FileConverter {
    options: ConvertOptions,
}

impl FileConverter {
    /// Creates a new converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Creates a new converter with default options.
    pub fn with_defaults() -> Self {
        Self::new(ConvertOptions::default())
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converts `path` to the format named by `target` (e.g. `".pdf"` or `"pdf"`).
    ///
    /// Outputs are written next to the input. An unsupported pair writes
    /// nothing and returns [`Error::Unsupported`].
    pub fn convert<P: AsRef<Path>>(&self, path: P, target: &str) -> Result<ConversionOutcome> {
        let path = path.as_ref();
        let source = Format::from_path(path);
        let target_format = Format::from_extension(target);

        let (route, target_format) = match (source, target_format) {
            (Some(s), Some(t)) => match Conversion::resolve(s, t) {
                Some(route) => (route, t),
                None => return Err(unsupported(path, target)),
            },
            _ => return Err(unsupported(path, target)),
        };

        log::info!(
            "converting {} to {} via {:?}",
            path.display(),
            target_format,
            route
        );

        let namer = OutputNamer::new(
            path,
            target_format,
            route.is_paged(),
            self.options.collision,
        );
        let outputs = self.run(route, path, &namer)?;
        for output in &outputs {
            log::info!("wrote {}", output.display());
        }
        Ok(ConversionOutcome { outputs })
    }

    fn run(&self, route: Conversion, input: &Path, namer: &OutputNamer) -> Result<Vec<PathBuf>> {
        let output = namer.single();
        let pdf = PdfRenderer::new(self.options.layout.clone());
        match route {
            Conversion::PdfToImages(kind) => {
                return media::rasterize_pdf(input, kind, self.options.dpi, |page| namer.page(page));
            }
            Conversion::DocxToPdf => self.pipeline(&DocxExtractor, &pdf, input, &output)?,
            Conversion::DocxToText => self.pipeline(&DocxExtractor, &TextRenderer, input, &output)?,
            Conversion::PdfToDocx => self.pipeline(&PdfExtractor, &DocxRenderer, input, &output)?,
            Conversion::TextToPdf => self.pipeline(&TextExtractor, &pdf, input, &output)?,
            Conversion::PptxToPdf => self.pipeline(&PptxExtractor, &pdf, input, &output)?,
            Conversion::EpubToPdf => self.pipeline(&EpubExtractor, &pdf, input, &output)?,
            Conversion::ImageToPdf => media::image_to_pdf(input, &output)?,
            Conversion::AudioToMp3 => self.mp3_encoder().encode(input, &output)?,
            Conversion::Mp3ToWav => media::mp3_to_wav(input, &output)?,
            Conversion::XlsxToCsv => tabular::xlsx_to_csv(input, &output)?,
            Conversion::CsvToXlsx => tabular::csv_to_xlsx(input, &output)?,
        }
        Ok(vec![output])
    }

    fn pipeline(
        &self,
        extractor: &dyn AstExtractor,
        renderer: &dyn Renderer,
        input: &Path,
        output: &Path,
    ) -> Result<()> {
        let document = extractor.extract(input)?;
        log::debug!("extracted {} blocks", document.blocks.len());
        renderer.render(&document, output)
    }

    fn mp3_encoder(&self) -> Mp3Encoder {
        Mp3Encoder {
            ffmpeg: self.options.ffmpeg.clone(),
            bitrate: self.options.mp3_bitrate.clone(),
        }
    }
}

fn unsupported(path: &Path, target: &str) -> Error {
    let to = match Format::from_extension(target) {
        Some(format) => format.extension().to_string(),
        None => normalize_extension(target),
    };
    Error::Unsupported {
        from: extension_of(path),
        to,
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.is_empty() || ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}
