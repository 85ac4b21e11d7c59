use super::error::ExchangeError;
use super::types::{CommandKind, Response};

/// Syntax assigned to every result buffer.
pub const RESULT_SYNTAX: &str = "Markdown";

/// Render a response into the markdown shown in the result buffer.
///
/// Fields are interpolated as-is; nothing is escaped.
pub fn render_response(kind: CommandKind, response: &Response) -> String {
    match kind {
        CommandKind::Chat => format!(
            "# {}\n\n**Query:** {}\n\n**Response:**\n\n{}\n\n---\n\n*Generated at {}*",
            kind.title(),
            response.query,
            response.response,
            response.timestamp
        ),
        CommandKind::Explain => format!(
            "# {}\n\n{}\n\n---\n\n*Generated at {}*",
            kind.title(),
            response.response,
            response.timestamp
        ),
    }
}

/// Message shown to the user when an invocation fails.
pub fn error_message(kind: CommandKind, error: &ExchangeError) -> String {
    match (kind, error) {
        (_, ExchangeError::UserInput(message)) => message.clone(),
        (CommandKind::Chat, ExchangeError::WorkerExecution { stderr, .. }) => {
            format!("LLM Chat Error: {stderr}")
        }
        (CommandKind::Chat, error) => format!("Error running LLM chat: {error}"),
        (CommandKind::Explain, error) => format!("Error: {error}"),
    }
}
