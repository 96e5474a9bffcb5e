//! Upload dialog for the feedback form.
//!
//! Trait-based so tests can inject a picker that returns fixture paths
//! instead of opening a native dialog. Decoding and skip-on-failure happen
//! in the session, not here: the picker only chooses paths.

use std::path::PathBuf;

/// Extensions offered by the image filter. An "All files" filter is kept as
/// an escape hatch for unusual extensions; undecodable picks are skipped
/// later with a notice.
pub const IMAGE_FILTER_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif", "ico",
];

pub trait FilePickerHandler {
    /// Opens the selection dialog and returns the chosen paths, empty when
    /// the dialog was dismissed.
    fn pick_images(&self) -> Vec<PathBuf>;
}

/// Native file dialog via the `rfd` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFilePicker;

impl FilePickerHandler for SystemFilePicker {
    fn pick_images(&self) -> Vec<PathBuf> {
        use rfd::FileDialog;

        let picked = FileDialog::new()
            .add_filter("Image", IMAGE_FILTER_EXTENSIONS)
            .add_filter("All files", &["*"])
            .set_title("Select image files")
            .pick_files()
            .unwrap_or_default();
        log::debug!("file dialog returned {} path(s)", picked.len());
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPickerEmpty;

    impl FilePickerHandler for MockPickerEmpty {
        fn pick_images(&self) -> Vec<PathBuf> {
            Vec::new()
        }
    }

    struct MockPickerWithFiles {
        paths: Vec<PathBuf>,
    }

    impl FilePickerHandler for MockPickerWithFiles {
        fn pick_images(&self) -> Vec<PathBuf> {
            self.paths.clone()
        }
    }

    #[test]
    fn mock_picker_empty_selects_nothing() {
        assert!(MockPickerEmpty.pick_images().is_empty());
    }

    #[test]
    fn mock_picker_returns_paths_in_order() {
        let picker = MockPickerWithFiles {
            paths: vec![PathBuf::from("/a.png"), PathBuf::from("/b.png")],
        };
        let picked = picker.pick_images();
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0], PathBuf::from("/a.png"));
    }

    #[test]
    fn picker_trait_is_object_safe() {
        fn accept(_picker: &dyn FilePickerHandler) {}
        accept(&MockPickerEmpty);
    }
}
