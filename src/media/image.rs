//! Image embedding into PDF and PDF page rasterization.

use crate::format::ImageKind;
use crate::render::PdfWriter;
use crate::{Error, Result};
use image::{DynamicImage, ImageFormat};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};

/// Writes a one-page PDF holding the whole image, converted to RGB.
pub fn image_to_pdf(input: &Path, output: &Path) -> Result<()> {
    let image = image::open(input)?.to_rgb8();
    log::debug!(
        "embedding {}x{} image from {}",
        image.width(),
        image.height(),
        input.display()
    );
    let mut writer = PdfWriter::new();
    writer.add_image_page(&image)?;
    writer.save(output)
}

fn bind_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Raster(format!("Failed to bind pdfium library: {e:?}")))?;
    Ok(Pdfium::new(bindings))
}

/// Renders every page of `input` at `dpi` and writes one image per page.
/// `page_path` maps a 1-based page number to its output path.
pub fn rasterize_pdf<F>(input: &Path, kind: ImageKind, dpi: f32, page_path: F) -> Result<Vec<PathBuf>>
where
    F: Fn(usize) -> PathBuf,
{
    let pdfium = bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_file(input, None)
        .map_err(|e| Error::Raster(format!("Failed to load PDF: {e:?}")))?;
    log::debug!("rasterizing {} pages at {} dpi", document.pages().len(), dpi);

    let scale = dpi / 72.0;
    let pages = document.pages().iter().map(|page| {
        let config = PdfRenderConfig::new().set_target_width((page.width().value * scale) as i32);
        page.render_with_config(&config)
            .map(|bitmap| bitmap.as_image())
            .map_err(|e| Error::Raster(format!("Failed to render page: {e:?}")))
    });

    write_page_images(pages, kind, page_path)
}

/// Saves rendered pages in order, numbering them from 1.
pub fn write_page_images<I, F>(pages: I, kind: ImageKind, page_path: F) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = Result<DynamicImage>>,
    F: Fn(usize) -> PathBuf,
{
    let mut written = Vec::new();
    for (index, page) in pages.into_iter().enumerate() {
        let path = page_path(index + 1);
        save_image(&page?, kind, &path)?;
        log::debug!("wrote page {} to {}", index + 1, path.display());
        written.push(path);
    }
    Ok(written)
}

fn save_image(image: &DynamicImage, kind: ImageKind, path: &Path) -> Result<()> {
    match kind {
        // JPEG has no alpha channel.
        ImageKind::Jpg => {
            DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(path, ImageFormat::Jpeg)?
        }
        ImageKind::Png => image.save_with_format(path, ImageFormat::Png)?,
    }
    Ok(())
}
