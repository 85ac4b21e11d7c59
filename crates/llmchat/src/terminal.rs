//! Editor host backed by the terminal.
//!
//! The "active document" is described on the command line, queries come from
//! flags or stdin, and result buffers are printed to stdout or written as
//! read-only markdown files.

use crate::host::{EditorHost, ResultBuffer};
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use llmchat_core::exchange::FileMetadata;
use std::collections::VecDeque;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, clap::Args)]
pub struct HostArgs {
    /// Selected text in the active document. Repeat for multiple regions
    #[clap(long = "selection")]
    pub selections: Vec<String>,

    /// Read an additional selection region from a file
    #[clap(long)]
    pub selection_file: Option<PathBuf>,

    /// Path of the active document
    #[clap(long)]
    pub file: Option<String>,

    /// Syntax setting of the active document (e.g. Packages/Python/Python.sublime-syntax)
    #[clap(long)]
    pub syntax: Option<String>,

    /// Write each result to a new read-only markdown file in this directory
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct TerminalHost {
    queries: VecDeque<String>,
    interactive: bool,
    selection: Vec<String>,
    metadata: FileMetadata,
    output_dir: Option<PathBuf>,
}

impl TerminalHost {
    /// Build a host from CLI arguments.
    ///
    /// When `queries` is empty, prompts read a line from stdin instead.
    pub fn from_args(args: HostArgs, queries: Vec<String>) -> Result<Self> {
        let mut selection = args.selections;
        if let Some(path) = &args.selection_file {
            let text = fs::read_to_string(path)
                .with_context(|| f!("Failed to read selection from '{}'", path.display()))?;
            selection.push(text);
        }

        if let Some(dir) = &args.output_dir {
            fs::create_dir_all(dir)
                .with_context(|| f!("Failed to create output directory '{}'", dir.display()))?;
        }

        Ok(Self {
            interactive: queries.is_empty(),
            queries: queries.into(),
            selection,
            metadata: FileMetadata {
                file_path: args.file,
                syntax: args.syntax,
            },
            output_dir: args.output_dir,
        })
    }

    /// Number of prompts that will be answered without reading stdin.
    pub fn queued(&self) -> usize {
        self.queries.len()
    }
}

impl EditorHost for TerminalHost {
    type Buffer = TerminalBuffer;

    fn prompt_text(&mut self, caption: &str) -> Result<Option<String>> {
        if let Some(query) = self.queries.pop_front() {
            return Ok(Some(query));
        }
        if !self.interactive {
            return Ok(None);
        }
        // Only the first prompt reads stdin.
        self.interactive = false;

        anstream::eprint!("{} ", caption.bold());
        std::io::stderr().flush()?;

        let mut line = String::new();
        let bytes_read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read query from stdin")?;

        if bytes_read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn current_selection(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn current_file_metadata(&self) -> FileMetadata {
        self.metadata.clone()
    }

    fn create_result_buffer(&mut self) -> Result<Self::Buffer> {
        Ok(TerminalBuffer {
            output_dir: self.output_dir.clone(),
            ..Default::default()
        })
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }
}

/// A result buffer that is published when it becomes read-only.
#[derive(Debug, Default)]
pub struct TerminalBuffer {
    name: String,
    syntax: String,
    text: String,
    read_only: bool,
    output_dir: Option<PathBuf>,
    path: Option<PathBuf>,
}

impl TerminalBuffer {
    /// Where the buffer was written, when an output directory is configured.
    #[cfg(test)]
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    fn file_prefix(&self) -> String {
        let slug: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();
        f!("{}-", slug.trim_matches('-'))
    }

    fn file_suffix(&self) -> &'static str {
        match self.syntax.as_str() {
            "Markdown" => ".md",
            _ => ".txt",
        }
    }

    fn write_file(&mut self, dir: &Path) -> Result<()> {
        let mut file = tempfile::Builder::new()
            .prefix(&self.file_prefix())
            .suffix(self.file_suffix())
            .tempfile_in(dir)
            .with_context(|| f!("Failed to create result file in '{}'", dir.display()))?;

        file.write_all(self.text.as_bytes())
            .context("Failed to write result file")?;

        let (_, path) = file.keep().context("Failed to keep result file")?;

        let mut permissions = fs::metadata(&path)?.permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).context("Failed to make result file read-only")?;

        println!("{} {}", f!("{}:", self.name).green().bold(), path.display());
        self.path = Some(path);

        Ok(())
    }
}

impl ResultBuffer for TerminalBuffer {
    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn set_syntax(&mut self, syntax: &str) {
        self.syntax = syntax.to_string();
    }

    fn insert(&mut self, text: &str) -> Result<()> {
        if self.read_only {
            return Err(Error::ReadOnlyBuffer(self.name.clone()).into());
        }
        self.text.push_str(text);
        Ok(())
    }

    fn set_read_only(&mut self) -> Result<()> {
        if self.read_only {
            return Ok(());
        }
        self.read_only = true;

        match self.output_dir.clone() {
            Some(dir) => self.write_file(&dir),
            None => {
                println!("{}", f!("─── {} ───", self.name).cyan().bold());
                println!("{}", self.text);
                println!();
                Ok(())
            }
        }
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}
