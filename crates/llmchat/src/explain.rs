use crate::host::EditorHost;
use crate::invoker::ProcessInvoker;
use crate::prelude::{eprintln, *};
use crate::session::Session;
use crate::terminal::{HostArgs, TerminalHost};
use std::sync::Arc;

#[derive(Debug, clap::Parser)]
#[command(name = "explain")]
#[command(about = "Explain the selected code")]
pub struct App {
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

    let host = TerminalHost::from_args(app.host, vec![])?;
    let mut session = Session::new(host, Arc::new(invoker));

    explain_selection(&mut session).await
}

/// Explain the host's selection and wait for the answer.
async fn explain_selection<H: EditorHost>(session: &mut Session<H>) -> Result<()> {
    // An empty selection has already been shown to the user.
    if session.explain().is_ok() {
        log::debug!("waiting for {} request(s)", session.outstanding());
        session.drain().await;
    }
    log::debug!("{} request(s) failed", session.failures());

    session.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::Invoke;
    use llmchat_core::exchange::{ExchangeError, Request, Response};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Invoke for Counting {
        fn invoke(&self, _request: &Request) -> std::result::Result<Response, ExchangeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ExchangeError::ResponseFormat("expected value".to_string()));
            }
            Ok(Response {
                response: "it prints".to_string(),
                ..Default::default()
            })
        }
    }

    fn terminal(selection: &[&str]) -> TerminalHost {
        let args = HostArgs {
            selections: selection.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        TerminalHost::from_args(args, vec![]).unwrap()
    }

    #[tokio::test]
    async fn test_no_selection_fails_without_calling_worker() {
        let invoker = Arc::new(Counting::default());
        let mut session = Session::new(terminal(&[]), invoker.clone());

        let err = explain_selection(&mut session).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::RequestsFailed(1))
        ));
        assert_eq!(invoker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_worker_error_fails_the_command() {
        let invoker = Arc::new(Counting {
            fail: true,
            ..Default::default()
        });
        let mut session = Session::new(terminal(&["print(1)"]), invoker.clone());

        assert!(explain_selection(&mut session).await.is_err());
        assert_eq!(invoker.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_explained_selection_exits_cleanly() {
        let invoker = Arc::new(Counting::default());
        let mut session = Session::new(terminal(&["", "print(1)"]), invoker.clone());

        explain_selection(&mut session).await.unwrap();
        assert_eq!(invoker.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.outstanding(), 0);
    }
}
