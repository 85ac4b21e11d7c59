use crate::prelude::*;
use clap::Parser;
use std::path::PathBuf;

mod ask;
mod error;
mod explain;
mod host;
mod invoker;
mod prelude;
mod present;
mod session;
mod terminal;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Ask a language model about your code through an external worker script"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Directory the plugin is installed in. The worker script is looked up here.
    #[clap(long, env = "LLMCHAT_PLUGIN_DIR", global = true)]
    plugin_dir: Option<PathBuf>,

    /// Whether to display additional information.
    #[clap(long, env = "LLMCHAT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    /// The configured plugin directory, or the directory holding this executable.
    pub fn plugin_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.plugin_dir {
            return Ok(dir.clone());
        }

        let exe = std::env::current_exe().context("Failed to get current executable path")?;
        exe.parent()
            .map(|dir| dir.to_path_buf())
            .ok_or_eyre("Executable has no parent directory")
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Ask the LLM a question, using the selection as context
    Ask(crate::ask::App),

    /// Explain the selected code
    Explain(crate::explain::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Ask(sub_app) => crate::ask::run(sub_app, app.global).await,
        SubCommands::Explain(sub_app) => crate::explain::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
