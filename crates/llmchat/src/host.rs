//! The capabilities llmchat needs from an editor.
//!
//! Everything editor specific lives behind [`EditorHost`]: prompting for text,
//! reading the selection and file metadata, opening result buffers, and
//! reporting errors. Hosts are only ever touched from the interactive context
//! that owns the [`crate::session::Session`].

use crate::prelude::*;
use llmchat_core::exchange::FileMetadata;

pub trait EditorHost {
    type Buffer: ResultBuffer;

    /// Ask the user for a line of text. `None` means the prompt was dismissed.
    fn prompt_text(&mut self, caption: &str) -> Result<Option<String>>;

    /// Text of every selection region in the active document, in order.
    fn current_selection(&self) -> Vec<String>;

    fn current_file_metadata(&self) -> FileMetadata;

    /// Open a new, empty buffer that is independent of the active document.
    fn create_result_buffer(&mut self) -> Result<Self::Buffer>;

    /// Blocking, modal-style error notification.
    fn show_error(&mut self, message: &str);
}

/// A scratch buffer that receives a rendered response.
pub trait ResultBuffer {
    fn set_name(&mut self, name: &str);

    fn set_syntax(&mut self, syntax: &str);

    /// Append text. Fails once the buffer is read-only.
    fn insert(&mut self, text: &str) -> Result<()>;

    /// Freeze the buffer. No edits are accepted afterwards.
    fn set_read_only(&mut self) -> Result<()>;

    fn is_read_only(&self) -> bool;
}
