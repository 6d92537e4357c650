//! The managed directory that receipt images are copied into.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::Error;

/// The image file extensions accepted as receipts.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Copies receipt images into one directory owned by the application.
///
/// Images keep their original file name. Importing a file with the same name
/// as an existing receipt overwrites the existing image.
#[derive(Debug, Clone)]
pub struct ReceiptStorage {
    directory: PathBuf,
}

impl ReceiptStorage {
    /// Use `directory` for receipts, creating it if needed.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, Error> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|error| {
            Error::ImageCopy(format!("could not create {directory:?}: {error}"))
        })?;

        Ok(Self { directory })
    }

    /// The directory receipts are stored in.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Copy the selected image into the receipts directory.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NoImageSelected] if `selected` is `None`,
    /// - [Error::UnsupportedImageType] if the file is not a PNG or JPEG image,
    /// - or [Error::ImageCopy] if the file could not be copied.
    pub fn import(&self, selected: Option<&Path>) -> Result<PathBuf, Error> {
        let source = selected.ok_or(Error::NoImageSelected)?;

        let file_name = source
            .file_name()
            .ok_or_else(|| Error::UnsupportedImageType(source.to_string_lossy().into_owned()))?;

        if !is_supported_image(source) {
            return Err(Error::UnsupportedImageType(
                file_name.to_string_lossy().into_owned(),
            ));
        }

        let destination = self.directory.join(file_name);
        if destination.exists() {
            tracing::warn!("Overwriting existing receipt image {destination:?}");
        }

        fs::copy(source, &destination).map_err(|error| {
            Error::ImageCopy(format!("{source:?} -> {destination:?}: {error}"))
        })?;
        tracing::debug!("Copied receipt image {source:?} to {destination:?}");

        Ok(destination)
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(extension))
        })
}

#[cfg(test)]
mod receipt_storage_tests {
    use std::fs;

    use crate::{Error, receipt_storage::ReceiptStorage};

    #[test]
    fn new_creates_the_directory() {
        let root = tempfile::tempdir().unwrap();
        let directory = root.path().join("nested").join("receipts");

        let storage = ReceiptStorage::new(&directory).unwrap();

        assert!(directory.is_dir());
        assert_eq!(storage.directory(), directory);
    }

    #[test]
    fn import_copies_the_image() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("coffee.JPG");
        fs::write(&source, b"image bytes").unwrap();
        let storage = ReceiptStorage::new(root.path().join("receipts")).unwrap();

        let stored = storage.import(Some(source.as_path())).unwrap();

        assert_eq!(stored, root.path().join("receipts").join("coffee.JPG"));
        assert_eq!(fs::read(&stored).unwrap(), b"image bytes");
        assert!(source.exists());
    }

    #[test]
    fn import_overwrites_a_receipt_with_the_same_name() {
        let root = tempfile::tempdir().unwrap();
        let storage = ReceiptStorage::new(root.path().join("receipts")).unwrap();
        let first = root.path().join("a").join("receipt.png");
        let second = root.path().join("b").join("receipt.png");
        fs::create_dir_all(first.parent().unwrap()).unwrap();
        fs::create_dir_all(second.parent().unwrap()).unwrap();
        fs::write(&first, b"first").unwrap();
        fs::write(&second, b"second").unwrap();

        storage.import(Some(first.as_path())).unwrap();
        let stored = storage.import(Some(second.as_path())).unwrap();

        assert_eq!(fs::read(stored).unwrap(), b"second");
    }

    #[test]
    fn import_without_selection_fails() {
        let root = tempfile::tempdir().unwrap();
        let storage = ReceiptStorage::new(root.path()).unwrap();

        assert_eq!(storage.import(None), Err(Error::NoImageSelected));
    }

    #[test]
    fn import_rejects_other_file_types() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("notes.pdf");
        fs::write(&source, b"%PDF").unwrap();
        let storage = ReceiptStorage::new(root.path().join("receipts")).unwrap();

        assert_eq!(
            storage.import(Some(source.as_path())),
            Err(Error::UnsupportedImageType("notes.pdf".to_owned()))
        );
    }

    #[test]
    fn import_of_missing_file_fails() {
        let root = tempfile::tempdir().unwrap();
        let storage = ReceiptStorage::new(root.path().join("receipts")).unwrap();

        let result = storage.import(Some(root.path().join("missing.png").as_path()));

        assert!(matches!(result, Err(Error::ImageCopy(_))));
    }
}
