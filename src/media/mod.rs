//! Image and audio conversions that bypass the document AST.

pub mod audio;
pub mod image;

pub use self::audio::{mp3_to_wav, Mp3Encoder};
pub use self::image::{image_to_pdf, rasterize_pdf, write_page_images};
