use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "xtasks")]
#[command(about = "Run project tasks using rust instead of scripts")]
pub struct App {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Builds the plugin binary and installs it next to the worker script
    Install(InstallArgs),
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Name of the binary to install (defaults to "llmchat")
    #[arg(short, long, default_value = "llmchat")]
    pub name: String,

    /// Plugin directory to install into (defaults to ~/.local/share/llmchat)
    #[arg(short, long, env = "LLMCHAT_PLUGIN_DIR")]
    pub path: Option<String>,
}
