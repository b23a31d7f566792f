use crate::format::Format;
use crate::CollisionPolicy;
use std::path::{Path, PathBuf};

/// Derives output paths next to an input file.
///
/// Single outputs are `<stem>_converted<ext>`, paged outputs
/// `<stem>_converted_<n><ext>` with `n` starting at 1.
#[derive(Debug, Clone)]
pub struct OutputNamer {
    dir: PathBuf,
    stem: String,
    marker: String,
    ext: &'static str,
}

impl OutputNamer {
    pub fn new(input: &Path, target: Format, paged: bool, policy: CollisionPolicy) -> Self {
        let dir = input.parent().map(Path::to_path_buf).unwrap_or_default();
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut namer = Self {
            dir,
            stem,
            marker: "_converted".to_string(),
            ext: target.extension(),
        };

        if policy == CollisionPolicy::KeepExisting {
            let mut n = 2;
            while namer.first_path(paged).exists() {
                namer.marker = format!("_converted({})", n);
                n += 1;
            }
        }
        namer
    }

    fn first_path(&self, paged: bool) -> PathBuf {
        if paged {
            self.page(1)
        } else {
            self.single()
        }
    }

    pub fn single(&self) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", self.stem, self.marker, self.ext))
    }

    pub fn page(&self, page: usize) -> PathBuf {
        self.dir
            .join(format!("{}{}_{}{}", self.stem, self.marker, page, self.ext))
    }
}
