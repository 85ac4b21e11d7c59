use crate::cli;
use color_eyre::eyre::{eyre, Result};
use duct::cmd;
use std::env;
use std::path::PathBuf;

/// Worker script the plugin binary launches from its install directory.
const WORKER_SCRIPT: &str = "llm_chat.js";

pub fn install(args: &cli::InstallArgs) -> Result<()> {
    println!("Building {} in release mode...", args.name);

    // Build the binary for the current target
    cmd!("cargo", "build", "--bin", &args.name, "--release").run()?;

    // Determine plugin directory
    let plugin_dir = if let Some(path) = &args.path {
        PathBuf::from(path)
    } else {
        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| eyre!("Could not determine home directory"))?;
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("llmchat")
    };

    if !plugin_dir.exists() {
        println!("Creating directory: {}", plugin_dir.display());
        std::fs::create_dir_all(&plugin_dir)?;
    }

    let binary_name = &args.name;
    let source_path = PathBuf::from("target").join("release").join(binary_name);
    let dest_path = plugin_dir.join(binary_name);

    println!("Installing {} to {}", binary_name, dest_path.display());

    std::fs::copy(&source_path, &dest_path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&dest_path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&dest_path, perms)?;
    }

    println!(
        "✓ Successfully installed {} to {}",
        binary_name,
        dest_path.display()
    );

    // The binary looks for the worker next to itself
    let worker = plugin_dir.join(WORKER_SCRIPT);
    if !worker.exists() {
        println!("\nNote: {} was not found.", worker.display());
        println!("Copy the worker script there before running {binary_name}.");
    }

    if cmd!("node", "--version").stdout_null().run().is_err() {
        println!("\nNote: `node` is not on your PATH. The worker script needs it to run.");
    }

    Ok(())
}
