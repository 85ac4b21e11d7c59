//! The interactive context.
//!
//! A [`Session`] owns the editor host and is driven by a single task. Every
//! request gets its own worker thread; outcomes come back over a channel and
//! are only presented from [`Session::drain`], so the host is never touched
//! concurrently. Dispatching does not need a runtime, only draining does.

use crate::host::EditorHost;
use crate::invoker::Invoke;
use crate::prelude::*;
use crate::present::present;
use llmchat_core::exchange::{
    build_chat_request, build_explain_request, error_message, selected_text, CommandKind,
    ExchangeError, FileMetadata, Request, Response,
};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use tokio::sync::mpsc;

const ASK_CAPTION: &str = "Ask LLM:";
const NOTHING_SELECTED: &str = "Please select some code to explain";

/// Outcome of one dispatched invocation, delivered back to the session.
#[derive(Debug)]
struct Completion {
    kind: CommandKind,
    outcome: std::result::Result<Response, ExchangeError>,
}

pub struct Session<H: EditorHost> {
    host: H,
    invoker: Arc<dyn Invoke>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    outstanding: usize,
    failures: usize,
}

impl<H: EditorHost> Session<H> {
    pub fn new(host: H, invoker: Arc<dyn Invoke>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            host,
            invoker,
            tx,
            rx,
            outstanding: 0,
            failures: 0,
        }
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Invocations dispatched but not yet delivered.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Invocations that ended in an error shown to the user.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Turn the failure count into the command's result.
    ///
    /// Errors have already been shown through the host; this only decides the
    /// exit status.
    pub fn finish(&self) -> Result<()> {
        match self.failures {
            0 => Ok(()),
            n => Err(Error::RequestsFailed(n).into()),
        }
    }

    /// "Ask LLM": prompt for a query and use the current selection as context.
    ///
    /// Returns whether a request was dispatched.
    pub fn ask(&mut self) -> Result<bool> {
        let Some(query) = self.host.prompt_text(ASK_CAPTION)? else {
            return Ok(false);
        };

        let context = selected_text(&self.host.current_selection());
        let metadata = self.host.current_file_metadata();

        Ok(self.submit_query(&query, &context, &metadata))
    }

    /// Dispatch a chat request. Blank queries are dropped without feedback.
    ///
    /// Returns whether a request was dispatched.
    pub fn submit_query(&mut self, query: &str, context: &str, metadata: &FileMetadata) -> bool {
        match build_chat_request(query, context, metadata) {
            Some(request) => {
                self.dispatch(CommandKind::Chat, request);
                true
            }
            None => {
                log::debug!("ignoring blank query");
                false
            }
        }
    }

    /// "Explain Selected Code" using the host's current selection.
    pub fn explain(&mut self) -> std::result::Result<(), ExchangeError> {
        let selection = selected_text(&self.host.current_selection());
        let metadata = self.host.current_file_metadata();
        self.explain_selection(&selection, &metadata)
    }

    /// Dispatch an explanation of `selected`.
    ///
    /// An empty selection is reported to the user right away and never reaches
    /// the worker.
    pub fn explain_selection(
        &mut self,
        selected: &str,
        metadata: &FileMetadata,
    ) -> std::result::Result<(), ExchangeError> {
        let Some(request) = build_explain_request(selected, metadata) else {
            let err = ExchangeError::UserInput(NOTHING_SELECTED.to_string());
            self.report(CommandKind::Explain, &err);
            return Err(err);
        };

        self.dispatch(CommandKind::Explain, request);
        Ok(())
    }

    fn dispatch(&mut self, kind: CommandKind, request: Request) {
        log::info!("dispatching {kind} request ({} bytes)", request.query.len());

        self.outstanding += 1;
        let invoker = Arc::clone(&self.invoker);
        let worker_tx = self.tx.clone();

        let spawned = thread::Builder::new()
            .name(f!("llmchat-{kind}"))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| invoker.invoke(&request)))
                    .unwrap_or_else(|payload| {
                        Err(ExchangeError::WorkerLaunch(f!(
                            "worker thread panicked: {}",
                            panic_message(&*payload)
                        )))
                    });
                // The receiver lives as long as the session; a send error means it is gone.
                let _ = worker_tx.send(Completion { kind, outcome });
            });

        if let Err(e) = spawned {
            let outcome = Err(ExchangeError::WorkerLaunch(e.to_string()));
            let _ = self.tx.send(Completion { kind, outcome });
        }
    }

    /// Present every outstanding result, in completion order.
    pub async fn drain(&mut self) {
        while self.outstanding > 0 {
            let Some(completion) = self.rx.recv().await else {
                break;
            };
            self.outstanding -= 1;
            self.deliver(completion);
        }
    }

    fn deliver(&mut self, completion: Completion) {
        let Completion { kind, outcome } = completion;

        match outcome {
            Ok(response) => {
                if let Err(e) = present(&mut self.host, kind, &response) {
                    self.failures += 1;
                    self.host.show_error(&f!("{e:#}"));
                }
            }
            Err(err) => self.report(kind, &err),
        }
    }

    fn report(&mut self, kind: CommandKind, err: &ExchangeError) {
        log::warn!("{kind} request failed ({}): {err}", err.kind());
        self.failures += 1;
        self.host.show_error(&error_message(kind, err));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
