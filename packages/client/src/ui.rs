//! UI utilities for the client.

use std::io::Write;

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// `/quit` or `/exit`: leave the session
    Quit,
    /// Anything else is sent to the hub
    Message(String),
}

/// Interpret a console line; blank lines yield `None`
pub fn parse_input(line: &str) -> Option<InputCommand> {
    let line = line.trim();
    match line {
        "" => None,
        "/quit" | "/exit" => Some(InputCommand::Quit),
        _ => Some(InputCommand::Message(line.to_string())),
    }
}

/// Redisplay the prompt after printing a received event
pub fn redisplay_prompt(identity: &str) {
    print!("{}> ", identity);
    std::io::stdout().flush().ok();
}
