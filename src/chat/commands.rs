//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the service.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the service.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Clear the conversation history.
    Clear,

    /// List the suggested actions currently on offer.
    Actions,

    /// Activate the suggested action at a 1-based position.
    Action(usize),

    /// Show the session identifiers.
    Session,

    /// Display session statistics.
    Stats,

    /// Probe the service health endpoint.
    Health,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use banter::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/action 2").is_some());
/// assert!(parse_command("Tell me more").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    // Bare "/2" is shorthand for "/action 2".
    if let Ok(position) = command.parse::<usize>() {
        return Some(parse_action_position(&command, position, argument));
    }

    let result = match command.as_str() {
        "clear" => ChatCommand::Clear,
        "actions" => ChatCommand::Actions,
        "action" | "use" => match argument {
            Some(arg) => match arg.parse::<usize>() {
                Ok(position) if position >= 1 => ChatCommand::Action(position),
                _ => ChatCommand::Invalid("/action expects a position, e.g. /action 1".to_string()),
            },
            None => ChatCommand::Invalid("/action requires a position".to_string()),
        },
        "session" => ChatCommand::Session,
        "stats" | "status" => ChatCommand::Stats,
        "health" => ChatCommand::Health,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_action_position(command: &str, position: usize, argument: Option<&str>) -> ChatCommand {
    if argument.is_some() {
        return ChatCommand::Invalid(format!("/{} takes no argument", command));
    }
    if position >= 1 {
        ChatCommand::Action(position)
    } else {
        ChatCommand::Invalid("Action positions start at 1".to_string())
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /actions               List the current suggested actions
  /action <n>            Activate suggested action n (shorthand: /n)
  /clear                 Clear conversation history
  /session               Show the user and session identifiers
  /stats                 Show session statistics
  /health                Check whether the assistant service is up
  /help                  Show this help message
  /quit                  Exit the chat"#
}
