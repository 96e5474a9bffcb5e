//! The feedback form: state machine and rendering.
//!
//! All state transitions (paste, upload, submit, cancel, confirmation) are
//! plain methods on [`FeedbackForm`], exercised directly by tests; the
//! [`ui`](FeedbackForm::ui) method only wires them to egui widgets. The
//! form is generic over its clipboard and file-picker handlers so tests
//! run without a window, a system clipboard, or a native dialog.

use std::path::{Path, PathBuf};

use askback_core::{FeedbackItem, FeedbackSession, SubmitDecision};
use askback_input::clipboard::{ClipboardImagePayload, ClipboardProvider};

use crate::utils::file_picker::FilePickerHandler;
use crate::utils::paste_handler;

/// Non-fatal status line shown below the image controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

/// Action awaiting a yes/no confirmation modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirm {
    Submit { total: usize },
    Cancel,
}

/// Terminal state of the form.
#[derive(Debug)]
pub enum FormOutcome {
    Submitted(Vec<FeedbackItem>),
    Cancelled,
}

pub struct FeedbackForm<C: ClipboardProvider, F: FilePickerHandler> {
    session: FeedbackSession,
    summary: String,
    draft: String,
    notice: Option<Notice>,
    pending: Option<PendingConfirm>,
    outcome: Option<FormOutcome>,
    clipboard: C,
    file_picker: F,
}

impl<C: ClipboardProvider, F: FilePickerHandler> FeedbackForm<C, F> {
    pub fn new(session: FeedbackSession, summary: String, clipboard: C, file_picker: F) -> Self {
        Self {
            session,
            summary,
            draft: String::new(),
            notice: None,
            pending: None,
            outcome: None,
            clipboard,
            file_picker,
        }
    }

    pub fn items(&self) -> &[FeedbackItem] {
        self.session.items()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn has_outcome(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn take_outcome(&mut self) -> Option<FormOutcome> {
        self.outcome.take()
    }

    /// Paste button action. Returns whether an image was appended, so the
    /// caller (and tests) can distinguish a capture from a no-op.
    pub fn paste_from_clipboard(&mut self) -> bool {
        match self.clipboard.image_payload() {
            Ok(Some(payload)) => self.accept_payload(payload),
            Ok(None) => {
                self.notice = Some(Notice::Warning(
                    "Clipboard holds no image. Copy an image first.".to_owned(),
                ));
                false
            }
            Err(e) => {
                self.notice = Some(Notice::Error(format!("Could not read clipboard: {e}")));
                false
            }
        }
    }

    /// Upload button action: pick files, then accept each one.
    pub fn upload_images(&mut self) {
        let paths = self.file_picker.pick_images();
        if paths.is_empty() {
            return;
        }
        self.accept_files(&paths);
    }

    /// Accepts each path in order. A file that cannot be read or decoded is
    /// skipped with a notice; the rest of the selection still goes through.
    pub fn accept_files(&mut self, paths: &[PathBuf]) {
        let mut added = 0usize;
        let mut last_error = None;
        for path in paths {
            match self.session.accept_image_file(path) {
                Ok(saved) => {
                    log::debug!("accepted upload {path:?} as {saved:?}");
                    added += 1;
                }
                Err(e) => {
                    log::warn!("skipping upload {path:?}: {e}");
                    last_error = Some(format!("Skipped {}: {e}", path.display()));
                }
            }
        }
        self.notice = match last_error {
            Some(error) => Some(Notice::Error(error)),
            None if added > 0 => Some(Notice::Info(format!("Added {added} image(s)"))),
            None => None,
        };
    }

    /// Submit button action: warn and stay open when there is nothing to
    /// send, otherwise raise the confirmation modal. The draft is not
    /// appended until the human confirms.
    pub fn request_submit(&mut self) {
        match self.session.request_submit(&self.draft) {
            SubmitDecision::NothingToSubmit => {
                self.notice = Some(Notice::Warning(
                    "Please provide some feedback before submitting.".to_owned(),
                ));
            }
            SubmitDecision::NeedsConfirmation { total } => {
                self.pending = Some(PendingConfirm::Submit { total });
            }
        }
    }

    /// Cancel button action: always asks for confirmation first.
    pub fn request_cancel(&mut self) {
        self.pending = Some(PendingConfirm::Cancel);
    }

    pub fn confirm_pending(&mut self) {
        match self.pending.take() {
            Some(PendingConfirm::Submit { .. }) => {
                let items = self.session.confirm_submit(&self.draft);
                self.outcome = Some(FormOutcome::Submitted(items));
            }
            Some(PendingConfirm::Cancel) => {
                self.session.cancel();
                self.outcome = Some(FormOutcome::Cancelled);
            }
            None => {}
        }
    }

    pub fn decline_pending(&mut self) {
        self.pending = None;
    }

    /// Titlebar close: the window is going away, so treat it as a cancel
    /// without raising a modal the human can no longer answer.
    pub fn cancel_without_confirmation(&mut self) {
        self.session.cancel();
        self.outcome = Some(FormOutcome::Cancelled);
    }

    fn accept_payload(&mut self, payload: ClipboardImagePayload) -> bool {
        match self.session.accept_image_bytes(&payload.bytes) {
            Ok(saved) => {
                self.notice = Some(Notice::Info(format!("Added {}", display_name(&saved))));
                true
            }
            Err(e) => {
                self.notice = Some(Notice::Error(format!("Could not save pasted image: {e}")));
                false
            }
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Smart paste runs before any text widget sees this frame's events.
        let ctx = ui.ctx().clone();
        if let Some(payload) = paste_handler::shortcut_image_paste(&ctx, &self.clipboard) {
            self.accept_payload(payload);
        }

        ui.heading("Agent feedback request");
        ui.add_space(4.0);

        if !self.summary.is_empty() {
            ui.group(|ui| {
                ui.label(egui::RichText::new("Summary").strong());
                egui::ScrollArea::vertical()
                    .id_salt("summary")
                    .max_height(96.0)
                    .show(ui, |ui| {
                        ui.label(self.summary.as_str());
                    });
            });
            ui.add_space(4.0);
        }

        ui.label(egui::RichText::new("Your feedback").strong());
        ui.add(
            egui::TextEdit::multiline(&mut self.draft)
                .hint_text("Type feedback for the agent here")
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);

        ui.label(egui::RichText::new("Images").strong());
        let names = self.image_names();
        if names.is_empty() {
            ui.weak("No images attached yet");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("images")
                .max_height(120.0)
                .show(ui, |ui| {
                    for name in &names {
                        ui.label(format!("📎 {name}"));
                    }
                });
        }

        ui.horizontal(|ui| {
            if ui.button("📎 Upload images…").clicked() {
                self.upload_images();
            }
            if ui.button("📋 Paste image (Ctrl+V)").clicked() {
                self.paste_from_clipboard();
            }
        });

        if let Some(notice) = &self.notice {
            match notice {
                Notice::Info(text) => ui.weak(text),
                Notice::Warning(text) => ui.colored_label(egui::Color32::YELLOW, text),
                Notice::Error(text) => ui.colored_label(egui::Color32::RED, text),
            };
        }
        ui.weak(format!(
            "📁 Images are saved under {}",
            self.session.feedback_dir().display()
        ));

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("✅ Submit to agent").clicked() {
                self.request_submit();
            }
            if ui.button("❌ Cancel").clicked() {
                self.request_cancel();
            }
        });

        self.confirm_modal(&ctx);
    }

    fn confirm_modal(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.pending else {
            return;
        };
        let (title, question) = match pending {
            PendingConfirm::Submit { total } => (
                "Confirm submission",
                format!("Submit {total} feedback item(s) to the agent?"),
            ),
            PendingConfirm::Cancel => (
                "Confirm cancellation",
                "Discard all collected feedback?".to_owned(),
            ),
        };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(question);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        self.confirm_pending();
                    }
                    if ui.button("No").clicked() {
                        self.decline_pending();
                    }
                });
            });
    }

    fn image_names(&self) -> Vec<String> {
        self.session
            .items()
            .iter()
            .filter(|item| item.is_image())
            .map(|item| display_name(Path::new(&item.content)))
            .collect()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
