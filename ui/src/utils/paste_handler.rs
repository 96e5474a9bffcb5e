//! Smart-paste handling for the feedback form.
//!
//! The paste shortcut (Ctrl+V / Cmd+V) is overloaded: when the clipboard
//! holds an image the form captures it, otherwise the focused text area
//! keeps its ordinary text-paste behavior. The decision has to be made
//! before the text widgets consume the frame's events.

use askback_input::clipboard::{ClipboardImagePayload, ClipboardProvider};

/// Returns the clipboard image payload when the paste shortcut fired this
/// frame and `clipboard` holds an image. In that case the frame's pending
/// text-paste events are dropped so the image capture is the only effect;
/// with a non-image clipboard the events are left alone and the text area
/// pastes as usual.
pub fn shortcut_image_paste<C: ClipboardProvider>(
    ctx: &egui::Context,
    clipboard: &C,
) -> Option<ClipboardImagePayload> {
    if !paste_shortcut_pressed(ctx) {
        return None;
    }

    match clipboard.image_payload() {
        Ok(Some(payload)) => {
            log::debug!(
                "paste shortcut captured clipboard image ({}, {} bytes)",
                payload.mime_type,
                payload.bytes.len()
            );
            suppress_text_paste(ctx);
            Some(payload)
        }
        Ok(None) => None,
        Err(e) => {
            log::warn!("paste shortcut could not read clipboard: {e}");
            None
        }
    }
}

/// Ctrl+V on Windows/Linux, Cmd+V on macOS.
fn paste_shortcut_pressed(ctx: &egui::Context) -> bool {
    ctx.input(|i| {
        i.events.iter().any(|event| {
            matches!(
                event,
                egui::Event::Key {
                    key: egui::Key::V,
                    pressed: true,
                    modifiers,
                    ..
                } if modifiers.command
            )
        })
    })
}

fn suppress_text_paste(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events
            .retain(|event| !matches!(event, egui::Event::Paste(_)));
    });
}
