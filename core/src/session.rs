//! Session state for the windowed front-end.
//!
//! A [`FeedbackSession`] owns everything that was process-global in earlier
//! designs: the accumulating item list, the image-sequence counter, and the
//! `feedback` output directory. Owning them per session keeps concurrent
//! sessions (notably in tests) independent of each other.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::item::FeedbackItem;

/// Name of the image output directory created under the session base.
pub const FEEDBACK_DIR_NAME: &str = "feedback";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to create feedback directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a decodable image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to save image to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Result of asking the session whether a submit may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Neither accumulated items nor pending text: warn and stay open.
    NothingToSubmit,
    /// `total` items (accumulated plus pending text) await confirmation.
    NeedsConfirmation { total: usize },
}

/// One visual collection session: ordered item list, session-local image
/// counter, and the absolute `feedback` directory images are saved into.
#[derive(Debug)]
pub struct FeedbackSession {
    items: Vec<FeedbackItem>,
    feedback_dir: PathBuf,
    image_seq: u32,
}

impl FeedbackSession {
    /// Creates an empty session whose `feedback` subdirectory lives under
    /// `base`, creating the directory if needed.
    pub fn create(base: &Path) -> Result<Self, SessionError> {
        let dir = base.join(FEEDBACK_DIR_NAME);
        fs::create_dir_all(&dir).map_err(|source| SessionError::CreateDir {
            dir: dir.clone(),
            source,
        })?;
        // Items must reference absolute paths even when `base` is relative
        // (the usual case: the process working directory).
        let feedback_dir = std::path::absolute(&dir).map_err(|source| SessionError::CreateDir {
            dir: dir.clone(),
            source,
        })?;
        log::debug!("feedback session writing images under {feedback_dir:?}");
        Ok(Self {
            items: Vec::new(),
            feedback_dir,
            image_seq: 0,
        })
    }

    pub fn feedback_dir(&self) -> &Path {
        &self.feedback_dir
    }

    /// Items accepted so far, in insertion order.
    pub fn items(&self) -> &[FeedbackItem] {
        &self.items
    }

    /// Decodes `bytes` as an image, persists it as a PNG under the session
    /// directory, and appends an image item referencing the saved file.
    /// The file is written before the item becomes observable.
    pub fn accept_image_bytes(&mut self, bytes: &[u8]) -> Result<PathBuf, SessionError> {
        let decoded = image::load_from_memory(bytes).map_err(SessionError::Decode)?;
        let path = self.next_image_path();
        decoded
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|source| SessionError::Save {
                path: path.clone(),
                source,
            })?;
        self.items
            .push(FeedbackItem::image(path.display().to_string()));
        log::debug!("accepted image #{} -> {path:?}", self.image_seq);
        Ok(path)
    }

    /// Reads and accepts an image file picked by the user. A file that
    /// cannot be read or decoded is reported without touching session state.
    pub fn accept_image_file(&mut self, path: &Path) -> Result<PathBuf, SessionError> {
        let bytes = fs::read(path).map_err(|source| SessionError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.accept_image_bytes(&bytes)
    }

    /// Checks whether submitting with the given text-area draft would carry
    /// any items. The draft is counted but not yet appended; it becomes an
    /// item only in [`confirm_submit`](Self::confirm_submit), so declining
    /// the confirmation and submitting again cannot duplicate it.
    pub fn request_submit(&self, draft: &str) -> SubmitDecision {
        let total = self.items.len() + usize::from(!draft.trim().is_empty());
        if total == 0 {
            SubmitDecision::NothingToSubmit
        } else {
            SubmitDecision::NeedsConfirmation { total }
        }
    }

    /// Appends the trimmed draft (if non-empty) and hands the accumulated
    /// items to the caller, leaving the session empty.
    pub fn confirm_submit(&mut self, draft: &str) -> Vec<FeedbackItem> {
        let pending = draft.trim();
        if !pending.is_empty() {
            self.items.push(FeedbackItem::text(pending));
        }
        std::mem::take(&mut self.items)
    }

    /// Discards everything collected so far. Already-saved image files stay
    /// on disk but are no longer reported.
    pub fn cancel(&mut self) {
        log::debug!("session cancelled, dropping {} item(s)", self.items.len());
        self.items.clear();
    }

    fn next_image_path(&mut self) -> PathBuf {
        self.image_seq += 1;
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.feedback_dir
            .join(format!("feedback_image_{stamp}_{}.png", self.image_seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    fn tiny_png() -> Vec<u8> {
        use image::{ImageBuffer, Rgba};

        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let mut cursor = std::io::Cursor::new(Vec::new());
        img.write_to(&mut cursor, image::ImageFormat::Png)
            .expect("should encode test PNG");
        cursor.into_inner()
    }

    fn file_name(path: &Path) -> &str {
        path.file_name()
            .and_then(|n| n.to_str())
            .expect("saved path should have a utf-8 file name")
    }

    /// `feedback_image_<YYYYMMDD_HHMMSS>_<n>.png`
    fn assert_matches_naming(name: &str, seq: u32) {
        let stem = name
            .strip_prefix("feedback_image_")
            .expect("name should start with feedback_image_");
        let stem = stem.strip_suffix(".png").expect("name should end in .png");
        let mut parts = stem.split('_');
        let date = parts.next().expect("date part");
        let time = parts.next().expect("time part");
        let n = parts.next().expect("sequence part");
        assert!(parts.next().is_none(), "unexpected extra parts in {name}");
        assert_eq!(date.len(), 8, "date should be YYYYMMDD in {name}");
        assert_eq!(time.len(), 6, "time should be HHMMSS in {name}");
        assert!(
            date.chars().chain(time.chars()).all(|c| c.is_ascii_digit()),
            "timestamp should be digits in {name}"
        );
        assert_eq!(n, seq.to_string(), "sequence counter in {name}");
    }

    #[test]
    fn create_makes_feedback_directory() {
        let base = tempfile::tempdir().expect("tempdir");
        let session = FeedbackSession::create(base.path()).expect("session");
        assert!(session.feedback_dir().is_dir());
        assert!(session.feedback_dir().is_absolute());
        assert!(session.items().is_empty());
    }

    #[test]
    fn accepted_images_are_written_before_items_appear() {
        let base = tempfile::tempdir().expect("tempdir");
        let mut session = FeedbackSession::create(base.path()).expect("session");

        let first = session.accept_image_bytes(&tiny_png()).expect("first save");
        let second = session
            .accept_image_bytes(&tiny_png())
            .expect("second save");

        assert_ne!(first, second, "saved paths should be distinct");
        assert_matches_naming(file_name(&first), 1);
        assert_matches_naming(file_name(&second), 2);

        let items = session.items();
        assert_eq!(items.len(), 2);
        for item in items {
            assert_eq!(item.kind, ItemKind::Image);
            assert!(
                Path::new(&item.content).is_file(),
                "backing file should exist for {}",
                item.content
            );
            assert!(Path::new(&item.content).is_absolute());
        }
        assert_eq!(items[0].content, first.display().to_string());
        assert_eq!(items[1].content, second.display().to_string());
    }

    #[test]
    fn non_image_bytes_are_rejected_without_state_change() {
        let base = tempfile::tempdir().expect("tempdir");
        let mut session = FeedbackSession::create(base.path()).expect("session");

        let err = session.accept_image_bytes(b"definitely not an image");
        assert!(matches!(err, Err(SessionError::Decode(_))));
        assert!(session.items().is_empty());

        // A failed decode does not consume a sequence number.
        let saved = session.accept_image_bytes(&tiny_png()).expect("save");
        assert_matches_naming(file_name(&saved), 1);
    }

    #[test]
    fn accept_image_file_reads_from_disk() {
        let base = tempfile::tempdir().expect("tempdir");
        let source = base.path().join("upload.png");
        fs::write(&source, tiny_png()).expect("write upload fixture");

        let mut session = FeedbackSession::create(base.path()).expect("session");
        let saved = session.accept_image_file(&source).expect("accept");
        assert!(saved.is_file());
        assert_eq!(session.items().len(), 1);
    }

    #[test]
    fn accept_image_file_missing_path_is_read_error() {
        let base = tempfile::tempdir().expect("tempdir");
        let mut session = FeedbackSession::create(base.path()).expect("session");
        let err = session.accept_image_file(Path::new("/no/such/file.png"));
        assert!(matches!(err, Err(SessionError::ReadFile { .. })));
        assert!(session.items().is_empty());
    }

    #[test]
    fn submit_with_nothing_collected_is_rejected() {
        let base = tempfile::tempdir().expect("tempdir");
        let session = FeedbackSession::create(base.path()).expect("session");
        assert_eq!(session.request_submit(""), SubmitDecision::NothingToSubmit);
        assert_eq!(
            session.request_submit("   \n  "),
            SubmitDecision::NothingToSubmit
        );
    }

    #[test]
    fn submit_counts_pending_draft_and_images() {
        let base = tempfile::tempdir().expect("tempdir");
        let mut session = FeedbackSession::create(base.path()).expect("session");
        session.accept_image_bytes(&tiny_png()).expect("save");

        assert_eq!(
            session.request_submit("looks good"),
            SubmitDecision::NeedsConfirmation { total: 2 }
        );
        assert_eq!(
            session.request_submit(""),
            SubmitDecision::NeedsConfirmation { total: 1 }
        );
    }

    #[test]
    fn confirm_submit_appends_trimmed_draft_last() {
        let base = tempfile::tempdir().expect("tempdir");
        let mut session = FeedbackSession::create(base.path()).expect("session");
        session.accept_image_bytes(&tiny_png()).expect("save");

        let items = session.confirm_submit("  looks good  ");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, ItemKind::Image);
        assert_eq!(items[1].kind, ItemKind::Text);
        assert_eq!(items[1].content, "looks good");
        assert!(session.items().is_empty(), "session hands the list over");
    }

    #[test]
    fn declining_then_resubmitting_does_not_duplicate_text() {
        let base = tempfile::tempdir().expect("tempdir");
        let mut session = FeedbackSession::create(base.path()).expect("session");

        // First submit request: the draft is only counted, never appended.
        assert_eq!(
            session.request_submit("only once"),
            SubmitDecision::NeedsConfirmation { total: 1 }
        );
        assert!(session.items().is_empty());

        // The human declines, then submits again and confirms.
        assert_eq!(
            session.request_submit("only once"),
            SubmitDecision::NeedsConfirmation { total: 1 }
        );
        let items = session.confirm_submit("only once");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].content, "only once");
    }

    #[test]
    fn cancel_discards_items_but_keeps_files() {
        let base = tempfile::tempdir().expect("tempdir");
        let mut session = FeedbackSession::create(base.path()).expect("session");
        let saved = session.accept_image_bytes(&tiny_png()).expect("save");

        session.cancel();
        assert!(session.items().is_empty());
        assert!(saved.is_file(), "cancel leaves saved files on disk");
    }

    #[test]
    fn sessions_do_not_share_counters_or_directories() {
        let base_a = tempfile::tempdir().expect("tempdir a");
        let base_b = tempfile::tempdir().expect("tempdir b");
        let mut a = FeedbackSession::create(base_a.path()).expect("session a");
        let mut b = FeedbackSession::create(base_b.path()).expect("session b");

        let a1 = a.accept_image_bytes(&tiny_png()).expect("a1");
        let a2 = a.accept_image_bytes(&tiny_png()).expect("a2");
        let b1 = b.accept_image_bytes(&tiny_png()).expect("b1");

        assert_matches_naming(file_name(&a1), 1);
        assert_matches_naming(file_name(&a2), 2);
        // Session B starts its own counter at 1.
        assert_matches_naming(file_name(&b1), 1);
        assert_ne!(a.feedback_dir(), b.feedback_dir());
    }
}
