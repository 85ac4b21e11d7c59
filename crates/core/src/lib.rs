//! Core library for llmchat
//!
//! This crate implements the **Functional Core** of the llmchat plugin,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The llmchat project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`llmchat_core`** (this crate): Pure transformation functions with zero I/O
//! - **`llmchat`**: Editor host, worker process launch, and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No process spawning, no terminal output, no editor state
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`exchange`]: The request/response contract with the external worker script,
//!   the result buffer templates, and the error taxonomy shared by both crates.
//!
//! # Example Usage
//!
//! ```rust
//! use llmchat_core::exchange::{parse_response, render_response, CommandKind};
//!
//! let response = parse_response(r#"{"query":"hi","response":"hello","timestamp":"now"}"#)
//!     .unwrap();
//! let text = render_response(CommandKind::Chat, &response);
//!
//! assert!(text.starts_with("# LLM Response"));
//! assert!(text.contains("hello"));
//! ```

pub mod exchange;
