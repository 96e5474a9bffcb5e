//! eframe wiring for the feedback window.

use std::path::Path;

use askback_core::{FeedbackItem, FeedbackSession, SessionError};
use askback_input::clipboard::{ClipboardProvider, SystemClipboard};

use crate::form::{FeedbackForm, FormOutcome};
use crate::utils::file_picker::{FilePickerHandler, SystemFilePicker};

/// Configuration shared by both front-ends.
#[derive(Debug, Clone, Default)]
pub struct FrontendOptions {
    /// Agent-provided work summary, shown read-only. Empty means none.
    pub summary: String,
    /// Accepted for interface compatibility. No timer preempts an open
    /// window or a prompt loop; a human answering is never rushed.
    pub timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum VisualError {
    #[error("could not create the feedback session: {0}")]
    Session(#[from] SessionError),
    #[error("could not open the feedback window: {0}")]
    Window(String),
}

/// The eframe application: renders the form and reports the item list
/// through a channel once a terminal state is reached.
pub struct FeedbackApp<C: ClipboardProvider, F: FilePickerHandler> {
    form: FeedbackForm<C, F>,
    outcome_tx: flume::Sender<Vec<FeedbackItem>>,
    sent: bool,
}

impl<C: ClipboardProvider, F: FilePickerHandler> FeedbackApp<C, F> {
    pub fn new(form: FeedbackForm<C, F>, outcome_tx: flume::Sender<Vec<FeedbackItem>>) -> Self {
        Self {
            form,
            outcome_tx,
            sent: false,
        }
    }

    fn finish(&mut self, ctx: &egui::Context, items: Vec<FeedbackItem>) {
        if self.sent {
            return;
        }
        self.sent = true;
        // Bounded(1) and sent once; a failed send only means the caller
        // went away, in which case there is nobody to report to anyway.
        drop(self.outcome_tx.try_send(items));
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl<C: ClipboardProvider, F: FilePickerHandler> eframe::App for FeedbackApp<C, F> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Titlebar close without submit/cancel counts as a cancel; the
        // window is going away either way, so no confirmation modal.
        if ctx.input(|i| i.viewport().close_requested()) && !self.sent {
            self.form.cancel_without_confirmation();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.form.ui(ui);
        });

        if let Some(outcome) = self.form.take_outcome() {
            let items = match outcome {
                FormOutcome::Submitted(items) => items,
                FormOutcome::Cancelled => Vec::new(),
            };
            self.finish(ctx, items);
        }
    }
}

/// Opens the feedback window over the current working directory and blocks
/// until the human submits or cancels.
///
/// Errors cover the two environment failures a caller can degrade from:
/// the session directory being uncreatable and the window failing to open
/// (missing display/GL libraries).
pub fn run_visual(opts: &FrontendOptions) -> Result<Vec<FeedbackItem>, VisualError> {
    let session = FeedbackSession::create(Path::new("."))?;
    let form = FeedbackForm::new(
        session,
        opts.summary.clone(),
        SystemClipboard,
        SystemFilePicker,
    );
    let (outcome_tx, outcome_rx) = flume::bounded(1);
    let app = FeedbackApp::new(form, outcome_tx);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 700.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Agent feedback request",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| VisualError::Window(e.to_string()))?;

    // The app sends exactly once before closing; an empty result here means
    // the window was torn down without reaching a terminal state.
    Ok(outcome_rx.try_recv().unwrap_or_default())
}
