/// Every way a single invocation can end without a result buffer.
///
/// None of these are retried. Worker-originated variants are produced off the
/// interactive context and handed back to it for display.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The user gave nothing to work with (e.g. no selection to explain).
    #[error("{0}")]
    UserInput(String),

    /// The worker process could not be started.
    #[error("{0}")]
    WorkerLaunch(String),

    /// The worker ran and exited non-zero. The message is its stderr, verbatim.
    #[error("{stderr}")]
    WorkerExecution { code: Option<i32>, stderr: String },

    /// The worker exited zero but stdout was not a response record.
    #[error("{0}")]
    ResponseFormat(String),
}

impl ExchangeError {
    /// Short machine-friendly name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ExchangeError::UserInput(_) => "user_input",
            ExchangeError::WorkerLaunch(_) => "worker_launch",
            ExchangeError::WorkerExecution { .. } => "worker_execution",
            ExchangeError::ResponseFormat(_) => "response_format",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_execution_message_is_stderr_verbatim() {
        let err = ExchangeError::WorkerExecution {
            code: Some(1),
            stderr: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "rate limited");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ExchangeError::UserInput(String::new()).kind(), "user_input");
        assert_eq!(
            ExchangeError::ResponseFormat(String::new()).kind(),
            "response_format"
        );
    }
}
