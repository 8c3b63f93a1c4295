//! # openwebui-chat-export
//!
//! A small desktop tool that converts [Open WebUI](https://openwebui.com)
//! chat-history JSON exports into per-conversation plain-text transcripts.
//!
//! ## What it does
//!
//! Open WebUI's "Export All Chats" produces a single JSON document holding one
//! or more conversations, each with its messages spread across `chat.messages`
//! and `chat.history.messages`. This tool walks that document and writes one
//! `.txt` file per conversation that has any messages: a title header, one
//! line per message (optional local-time timestamp, role, content) and a
//! trailing separator.
//!
//! The input file is never modified.
//!
//! ## Usage
//!
//! Launch the binary, pick (or drop) the exported `.json` file, choose an
//! output directory (defaults to `converted_chats`) and hit convert. The form
//! can be prefilled from the command line:
//!
//! ```sh
//! openwebui-chat-export ~/Downloads/all-chats-export.json --out-dir ~/notes/chats
//! ```
//!
//! Preferences can be persisted in `~/.config/openwebui-chat-export/config.toml`.
//!
//! ## Compatibility
//!
//! The export schema is undocumented and loosely shaped; every field is
//! treated as optional, and a conversation that cannot be decoded is counted
//! as a failure and logged rather than aborting the run.

pub mod app;
pub mod error;
pub mod export;
pub mod importer;
pub mod renderer;
pub mod utils;

pub use error::ExportError;
pub use export::{ExportConfig, ExportSummary, execute};
