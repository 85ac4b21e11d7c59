pub mod error;
pub mod render;
pub mod request;
pub mod response;
pub mod types;

pub use error::ExchangeError;
pub use render::{error_message, render_response, RESULT_SYNTAX};
pub use request::{
    build_chat_request, build_explain_request, explain_query, selected_text, syntax_name,
};
pub use response::{encode_request, parse_response};
pub use types::{CommandKind, FileMetadata, Request, Response};
