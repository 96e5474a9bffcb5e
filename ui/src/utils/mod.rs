pub mod file_picker;
pub mod paste_handler;
