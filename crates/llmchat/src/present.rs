use crate::host::{EditorHost, ResultBuffer};
use crate::prelude::*;
use llmchat_core::exchange::{render_response, CommandKind, Response, RESULT_SYNTAX};

/// Show a response in a new read-only buffer titled after the command.
pub fn present<H: EditorHost>(host: &mut H, kind: CommandKind, response: &Response) -> Result<()> {
    let mut buffer = host
        .create_result_buffer()
        .context("Failed to open a result buffer")?;

    buffer.set_name(kind.title());
    buffer.set_syntax(RESULT_SYNTAX);
    buffer.insert(&render_response(kind, response))?;
    buffer.set_read_only()?;

    if !buffer.is_read_only() {
        return Err(eyre!("Result buffer '{}' is still editable", kind.title()));
    }

    log::debug!("presented {kind} response in '{}'", kind.title());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use llmchat_core::exchange::FileMetadata;

    /// A buffer that ignores requests to become read-only.
    struct StubbornBuffer;

    impl ResultBuffer for StubbornBuffer {
        fn set_name(&mut self, _name: &str) {}

        fn set_syntax(&mut self, _syntax: &str) {}

        fn insert(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }

        fn set_read_only(&mut self) -> Result<()> {
            Ok(())
        }

        fn is_read_only(&self) -> bool {
            false
        }
    }

    struct StubbornHost;

    impl EditorHost for StubbornHost {
        type Buffer = StubbornBuffer;

        fn prompt_text(&mut self, _caption: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn current_selection(&self) -> Vec<String> {
            vec![]
        }

        fn current_file_metadata(&self) -> FileMetadata {
            FileMetadata::default()
        }

        fn create_result_buffer(&mut self) -> Result<Self::Buffer> {
            Ok(StubbornBuffer)
        }

        fn show_error(&mut self, _message: &str) {}
    }

    #[test]
    fn test_buffer_that_stays_editable_is_an_error() {
        let err = present(&mut StubbornHost, CommandKind::Explain, &Response::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Result buffer 'Code Explanation' is still editable"
        );
    }
}
