//! Output rendering for the chat transcript.
//!
//! This module provides the renderer trait and a plain-text implementation
//! used by the terminal front-end. Transcript entries are role-tagged; the
//! terminal's natural scroll keeps the newest entry in view.

use std::io::{self, Stdout, Write};

use crate::types::{MessageRole, SuggestedAction};

/// ANSI escape code for dim text (used for system notices).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for italic text (used for system notices).
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the user label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for the assistant label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for suggested actions).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering transcript output.
///
/// This abstraction allows for different rendering strategies: plain text
/// with ANSI styling, unstyled text for piping, or a recording sink in
/// tests.
pub trait Renderer: Send {
    /// Append a transcript message attributed to the given role.
    ///
    /// The text is treated as literal content; it is never interpreted as
    /// markup, regardless of where it came from.
    fn message(&mut self, role: MessageRole, text: &str);

    /// Append a system-styled notice.
    ///
    /// Unlike [`message`](Renderer::message), the text is trusted styling
    /// input; only the client itself composes notices (e.g. for activated
    /// link actions).
    fn notice(&mut self, text: &str);

    /// Display the suggested actions for the current turn.
    ///
    /// An empty slice clears the display and renders nothing.
    fn actions(&mut self, actions: &[SuggestedAction]);

    /// Append a failure message, attributed to the assistant.
    fn error(&mut self, text: &str);

    /// Print session-control feedback outside the transcript.
    fn info(&mut self, text: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Flushes stdout so each block is visible as soon as it is rendered.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn role_label(role: MessageRole) -> &'static str {
        match role {
            MessageRole::User => "You",
            MessageRole::Assistant => "Assistant",
            MessageRole::System => "system",
        }
    }

    fn label_color(role: MessageRole) -> &'static str {
        match role {
            MessageRole::User => ANSI_CYAN,
            MessageRole::Assistant => ANSI_GREEN,
            MessageRole::System => ANSI_DIM,
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn message(&mut self, role: MessageRole, text: &str) {
        let label = Self::role_label(role);
        if self.use_color {
            let color = Self::label_color(role);
            println!("{color}{label}:{ANSI_RESET} {text}");
        } else {
            println!("{label}: {text}");
        }
        self.flush();
    }

    fn notice(&mut self, text: &str) {
        if self.use_color {
            println!("{ANSI_DIM}{ANSI_ITALIC}{text}{ANSI_RESET}");
        } else {
            println!("[{text}]");
        }
        self.flush();
    }

    fn actions(&mut self, actions: &[SuggestedAction]) {
        for (index, action) in actions.iter().enumerate() {
            let number = index + 1;
            if self.use_color {
                println!(
                    "  {ANSI_YELLOW}[{number}]{ANSI_RESET} {}",
                    action.text_label()
                );
            } else {
                println!("  [{number}] {}", action.text_label());
            }
        }
        self.flush();
    }

    fn error(&mut self, text: &str) {
        if self.use_color {
            println!("{ANSI_GREEN}Assistant:{ANSI_RESET} {ANSI_RED}{text}{ANSI_RESET}");
        } else {
            println!("Assistant: {text}");
        }
        self.flush();
    }

    fn info(&mut self, text: &str) {
        println!("{text}");
        self.flush();
    }
}
