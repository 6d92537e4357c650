//! Text recognition over receipt images.
//!
//! Recognition itself is done by an external program; this module only
//! defines the interface the intake flow depends on and an adapter for the
//! Tesseract command line tool.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::Error;

/// Converts an image into free-form text.
///
/// The text has no guaranteed structure and may be empty. Implementations
/// should only return an error when recognition could not run at all, not
/// when the image simply contains no text.
pub trait TextRecognizer {
    /// Recognize the text in the image at `image_path`.
    fn recognize(&self, image_path: &Path) -> Result<String, Error>;
}

/// Runs `tesseract <image> stdout` and returns what it prints.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    program: PathBuf,
}

impl TesseractRecognizer {
    /// Use the Tesseract executable at `program`, which may be a bare name on `PATH`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image_path: &Path) -> Result<String, Error> {
        tracing::debug!("Running {:?} on {image_path:?}", self.program);

        let output = Command::new(&self.program)
            .arg(image_path)
            .arg("stdout")
            .output()
            .map_err(|error| {
                Error::Recognition(format!("could not run {:?}: {error}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Recognition(format!(
                "{:?} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tesseract_tests {
    use std::path::Path;

    use crate::{
        Error,
        recognizer::{TesseractRecognizer, TextRecognizer},
    };

    #[test]
    fn missing_program_is_a_recognition_error() {
        let recognizer = TesseractRecognizer::new("./definitely-not-a-real-ocr-program");

        let result = recognizer.recognize(Path::new("receipt.png"));

        assert!(matches!(result, Err(Error::Recognition(_))));
    }
}
