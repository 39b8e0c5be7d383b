//! Interactive chat application for conversing with the assistant service.
//!
//! This binary provides a REPL interface for chatting with a remote
//! conversational assistant over its HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage against a locally running service
//! banter-chat
//!
//! # Point at a different deployment
//! banter-chat --endpoint https://assistant.example.com/api/v1/
//!
//! # Identify as a specific user with a school profile
//! banter-chat --user 42 --school-id 7 --school-name "Hillside Elementary"
//!
//! # Disable colors (useful for piping output)
//! banter-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/action <n>` (or `/n`) - Activate a suggested action
//! - `/clear` - Clear conversation history
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use banter::ChatClient;
use banter::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, SessionStats,
    help_text, parse_command,
};

/// Main entry point for the banter-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("banter-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = ChatClient::with_options(
        Some(config.endpoint.clone()),
        Some(config.timeout),
    )?;
    let mut session = ChatSession::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    println!("banter chat (endpoint: {})", session.stats().endpoint);
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let readline = rl.readline("> ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            session.clear_history();
                            renderer.info("Conversation cleared.");
                        }
                        ChatCommand::Actions => {
                            if session.actions().is_empty() {
                                renderer.info("No suggested actions right now.");
                            } else {
                                let actions = session.actions().actions().to_vec();
                                renderer.actions(&actions);
                            }
                        }
                        ChatCommand::Action(position) => {
                            session.activate(position, &mut renderer).await;
                        }
                        ChatCommand::Session => {
                            let stats = session.stats();
                            println!("    User id: {}", stats.user_id);
                            println!("    Session id: {}", stats.session_id);
                        }
                        ChatCommand::Stats => {
                            print_stats(&session.stats());
                        }
                        ChatCommand::Health => match session.health().await {
                            Ok(health) if health.is_ok() => {
                                renderer.info("Service is up.");
                            }
                            Ok(health) => {
                                renderer.info(&format!("Service reports: {}", health.status));
                            }
                            Err(err) => {
                                renderer.info(&format!("Health check failed: {}", err));
                            }
                        },
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.info(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send through the full cycle. Failures
                // are rendered inside; nothing to handle here.
                session.send(line, &mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.info(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats(stats: &SessionStats) {
    println!("    Session Statistics:");
    println!("      Endpoint: {}", stats.endpoint);
    println!("      User id: {}", stats.user_id);
    println!("      Session id: {}", stats.session_id);
    println!("      Messages in history: {}", stats.message_count);
    println!(
        "      Turns: {} completed / {} failed",
        stats.turns, stats.failed_turns
    );
    println!("      Suggested actions on offer: {}", stats.pending_actions);
}
