//! Selection state behind the converter window.

use crate::converter::ConversionOutcome;
use crate::format::{extension_of, supported_targets, Format};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// A validated request ready for [`crate::FileConverter::convert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub path: PathBuf,
    pub target: Format,
}

/// Result of choosing a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChoice {
    pub targets: &'static [Format],
    /// Set when the file's extension has no conversions.
    pub warning: Option<String>,
}

/// The currently chosen source file and target format.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    path: Option<PathBuf>,
    targets: &'static [Format],
    target: Option<Format>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `path`, lists the targets for its extension and preselects the
    /// first one.
    pub fn choose_file(&mut self, path: impl Into<PathBuf>) -> FileChoice {
        let path = path.into();
        let ext = extension_of(&path);
        self.targets = supported_targets(&ext);
        self.target = self.targets.first().copied();
        self.path = Some(path);

        let warning = if self.targets.is_empty() {
            log::warn!("no supported conversions for '{}'", ext);
            Some(format!("No supported conversions for: {}", ext))
        } else {
            None
        };
        FileChoice {
            targets: self.targets,
            warning,
        }
    }

    pub fn set_target(&mut self, target: Option<Format>) {
        self.target = target;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn targets(&self) -> &'static [Format] {
        self.targets
    }

    pub fn target(&self) -> Option<Format> {
        self.target
    }

    /// Validates the selection. A missing or nonexistent file is reported
    /// before a missing target.
    pub fn request(&self) -> Result<ConversionRequest> {
        let path = match &self.path {
            Some(path) if !path.as_os_str().is_empty() && path.exists() => path.clone(),
            _ => return Err(Error::NoFile),
        };
        let target = self.target.ok_or(Error::NoFormat)?;
        Ok(ConversionRequest { path, target })
    }
}

/// Title of the dialog shown after a successful conversion.
pub const SUCCESS_TITLE: &str = "Success";

/// Title of the warning shown when a chosen file has no conversions.
pub const UNSUPPORTED_TITLE: &str = "Unsupported";

/// Body of the success dialog, one written path per line.
pub fn success_message(outcome: &ConversionOutcome) -> String {
    let paths: Vec<String> = outcome
        .outputs
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    format!("File converted and saved as:\n{}", paths.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_choose_file_lists_targets_and_preselects_first() {
        let mut selection = Selection::new();
        let choice = selection.choose_file("/tmp/report.DOCX");
        assert_eq!(choice.targets, &[Format::Pdf, Format::Txt]);
        assert_eq!(choice.warning, None);
        assert_eq!(selection.target(), Some(Format::Pdf));
    }

    #[test]
    fn test_unknown_extension_warns_with_empty_targets() {
        let mut selection = Selection::new();
        let choice = selection.choose_file("/tmp/archive.rar");
        assert!(choice.targets.is_empty());
        assert_eq!(
            choice.warning.as_deref(),
            Some("No supported conversions for: .rar")
        );
        assert_eq!(selection.target(), None);
    }

    #[test]
    fn test_request_without_file_is_no_file() {
        let selection = Selection::new();
        assert!(matches!(selection.request(), Err(Error::NoFile)));

        let mut selection = Selection::new();
        selection.choose_file("/definitely/missing/report.docx");
        assert!(matches!(selection.request(), Err(Error::NoFile)));

        let mut selection = Selection::new();
        selection.choose_file("");
        assert!(matches!(selection.request(), Err(Error::NoFile)));
    }

    #[test]
    fn test_request_without_target_is_no_format() {
        let path = std::env::temp_dir().join(format!("fileconv_sel_{}.txt", std::process::id()));
        std::fs::write(&path, "hello").expect("write");

        let mut selection = Selection::new();
        selection.choose_file(&path);
        selection.set_target(None);
        let err = selection.request().expect_err("no target");
        assert_eq!(err.to_string(), "Please select a target format.");

        selection.set_target(Some(Format::Pdf));
        let request = selection.request().expect("valid request");
        assert_eq!(
            request,
            ConversionRequest {
                path: path.clone(),
                target: Format::Pdf
            }
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_dialog_titles() {
        assert_eq!(SUCCESS_TITLE, "Success");
        assert_eq!(UNSUPPORTED_TITLE, "Unsupported");
    }

    #[test]
    fn test_success_message() {
        let outcome = ConversionOutcome {
            outputs: vec![PathBuf::from("/out/a_converted_1.png"), PathBuf::from("/out/a_converted_2.png")],
        };
        assert_eq!(
            success_message(&outcome),
            "File converted and saved as:\n/out/a_converted_1.png\n/out/a_converted_2.png"
        );
    }
}
