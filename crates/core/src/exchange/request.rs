use super::types::{FileMetadata, Request};

const SYNTAX_SUFFIX: &str = ".sublime-syntax";

/// Derive the short syntax name sent to the worker from a host syntax setting.
///
/// `Packages/Python/Python.sublime-syntax` becomes `Python`.
pub fn syntax_name(setting: &str) -> String {
    let file = setting.rsplit('/').next().unwrap_or_default();
    file.replace(SYNTAX_SUFFIX, "")
}

/// Text of the first non-empty selection region, or an empty string.
pub fn selected_text(regions: &[String]) -> String {
    regions
        .iter()
        .find(|region| !region.is_empty())
        .cloned()
        .unwrap_or_default()
}

/// Wrap selected code in the instruction sent by "Explain Selected Code".
pub fn explain_query(code: &str) -> String {
    format!("Please explain this code:\n\n```\n{code}\n```")
}

/// Build the request for an "Ask LLM" invocation.
///
/// Returns `None` when the query is blank; such queries are never dispatched.
pub fn build_chat_request(query: &str, context: &str, metadata: &FileMetadata) -> Option<Request> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    Some(Request {
        query: query.to_string(),
        context: context.to_string(),
        file_path: metadata.file_path.clone().unwrap_or_default(),
        file_syntax: metadata
            .syntax
            .as_deref()
            .map(syntax_name)
            .unwrap_or_default(),
    })
}

/// Build the request for an "Explain Selected Code" invocation.
///
/// Returns `None` when nothing is selected. Whitespace-only selections are
/// still explained.
pub fn build_explain_request(selection: &str, metadata: &FileMetadata) -> Option<Request> {
    if selection.is_empty() {
        return None;
    }

    Some(Request {
        query: explain_query(selection),
        context: String::new(),
        file_path: metadata.file_path.clone().unwrap_or_default(),
        file_syntax: metadata
            .syntax
            .as_deref()
            .map(syntax_name)
            .unwrap_or_default(),
    })
}
