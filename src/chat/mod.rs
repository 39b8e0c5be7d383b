//! Chat application module for interactive conversations with the
//! assistant service.
//!
//! This module provides the session layer of the terminal chat client built
//! on top of the banter client library. It supports:
//!
//! - A single-request send cycle with optimistic local history
//! - Server-suggested quick-reply actions
//! - Slash commands for session control
//! - Configurable endpoint, user id, and profile
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Session context, send cycle, and service interaction
//! - [`actions`]: Suggested-action presentation and activation
//! - [`commands`]: Slash command parsing and handling

mod actions;
mod commands;
mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use actions::{ActionOutcome, ActionTray};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::{ChatSession, SessionContext, SessionStats, TurnOutcome};
