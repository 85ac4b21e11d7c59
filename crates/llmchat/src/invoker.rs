use duct::cmd;
use llmchat_core::exchange::{encode_request, parse_response, ExchangeError, Request, Response};
use std::path::{Path, PathBuf};

/// Interpreter used to run the worker script, resolved from `PATH`.
pub const WORKER_PROGRAM: &str = "node";

/// Worker script, relative to the plugin directory.
pub const WORKER_SCRIPT: &str = "llm_chat.js";

/// Runs one request/response exchange with the worker.
///
/// Implementations block until the exchange is over, so they must only be
/// called off the interactive context.
pub trait Invoke: Send + Sync {
    fn invoke(&self, request: &Request) -> Result<Response, ExchangeError>;
}

/// Launches the worker script as a child process for every request.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    program: String,
    plugin_dir: PathBuf,
}

impl ProcessInvoker {
    pub fn new(plugin_dir: impl Into<PathBuf>) -> Self {
        Self::with_program(WORKER_PROGRAM, plugin_dir)
    }

    /// Use a different interpreter for the worker script.
    pub fn with_program(program: impl Into<String>, plugin_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            plugin_dir: plugin_dir.into(),
        }
    }

    pub fn plugin_dir(&self) -> &Path {
        &self.plugin_dir
    }

    pub fn script_path(&self) -> PathBuf {
        self.plugin_dir.join(WORKER_SCRIPT)
    }

    fn resolve_program(&self) -> Result<PathBuf, ExchangeError> {
        which::which(&self.program)
            .map_err(|e| ExchangeError::WorkerLaunch(format!("{}: {}", self.program, e)))
    }

    fn resolve_script(&self) -> Result<PathBuf, ExchangeError> {
        let script = self.script_path();
        script.canonicalize().map_err(|e| {
            ExchangeError::WorkerLaunch(format!("{}: {}", script.display(), e))
        })
    }
}

impl Invoke for ProcessInvoker {
    fn invoke(&self, request: &Request) -> Result<Response, ExchangeError> {
        let input = encode_request(request)?;
        let program = self.resolve_program()?;
        let script = self.resolve_script()?;

        log::debug!(
            "launching {} {} in {}",
            program.display(),
            script.display(),
            self.plugin_dir.display()
        );

        let output = cmd(program, [script])
            .dir(&self.plugin_dir)
            .stdin_bytes(input)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|e| ExchangeError::WorkerLaunch(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            log::warn!("worker exited with {}", output.status);
            return Err(ExchangeError::WorkerExecution {
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| ExchangeError::ResponseFormat(e.to_string()))?;

        log::debug!("worker returned {} bytes", stdout.len());

        parse_response(&stdout)
    }
}
