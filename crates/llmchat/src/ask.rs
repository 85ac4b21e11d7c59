use crate::host::EditorHost;
use crate::invoker::ProcessInvoker;
use crate::prelude::{eprintln, *};
use crate::session::Session;
use crate::terminal::{HostArgs, TerminalHost};
use std::sync::Arc;

#[derive(Debug, clap::Parser)]
#[command(name = "ask")]
#[command(about = "Ask the LLM a question, using the selection as context")]
pub struct App {
    /// Question to ask. Repeat to send several questions at once; reads stdin when omitted
    #[clap(short, long = "query")]
    pub queries: Vec<String>,

    #[clap(flatten)]
    pub host: HostArgs,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let invoker = ProcessInvoker::new(global.plugin_dir()?);

    if global.verbose {
        eprintln!("Plugin directory: {}", invoker.plugin_dir().display());
        eprintln!("Worker script: {}", invoker.script_path().display());
        eprintln!();
    }

    let host = TerminalHost::from_args(app.host, app.queries)?;
    let prompts = host.queued().max(1);
    let mut session = Session::new(host, Arc::new(invoker));

    ask_all(&mut session, prompts).await
}

/// Prompt `prompts` times, then wait for every dispatched question.
async fn ask_all<H: EditorHost>(session: &mut Session<H>, prompts: usize) -> Result<()> {
    for _ in 0..prompts {
        session.ask()?;
    }

    log::debug!("waiting for {} request(s)", session.outstanding());
    session.drain().await;
    log::debug!("{} request(s) failed", session.failures());

    session.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::Invoke;
    use llmchat_core::exchange::{ExchangeError, Request, Response};

    struct RateLimited;

    impl Invoke for RateLimited {
        fn invoke(&self, _request: &Request) -> std::result::Result<Response, ExchangeError> {
            Err(ExchangeError::WorkerExecution {
                code: Some(1),
                stderr: "rate limited".to_string(),
            })
        }
    }

    struct Echo;

    impl Invoke for Echo {
        fn invoke(&self, request: &Request) -> std::result::Result<Response, ExchangeError> {
            Ok(Response {
                query: request.query.clone(),
                response: "ok".to_string(),
                timestamp: "now".to_string(),
            })
        }
    }

    fn terminal(queries: &[&str]) -> TerminalHost {
        let queries = queries.iter().map(|q| q.to_string()).collect();
        TerminalHost::from_args(HostArgs::default(), queries).unwrap()
    }

    #[tokio::test]
    async fn test_failed_worker_fails_the_command() {
        let mut session = Session::new(terminal(&["a", "b"]), Arc::new(RateLimited));

        let err = ask_all(&mut session, 2).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::RequestsFailed(2))
        ));
    }

    #[tokio::test]
    async fn test_blank_query_exits_cleanly() {
        let mut session = Session::new(terminal(&["   "]), Arc::new(RateLimited));

        ask_all(&mut session, 1).await.unwrap();
        assert_eq!(session.failures(), 0);
    }

    #[tokio::test]
    async fn test_dismissed_prompt_exits_cleanly() {
        // A default host never reads stdin, so every prompt is dismissed.
        let mut session = Session::new(TerminalHost::default(), Arc::new(RateLimited));

        ask_all(&mut session, 1).await.unwrap();
        assert_eq!(session.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_successful_questions_exit_cleanly() {
        let mut session = Session::new(terminal(&["a", "b"]), Arc::new(Echo));

        ask_all(&mut session, 2).await.unwrap();
        assert_eq!(session.outstanding(), 0);
    }
}
