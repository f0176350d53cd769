//! Command parser for the : command system

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Sidebar shortcuts
    Home,
    Create,
    Profile,
    Link(String),

    // Router
    Go(String),
    Back,

    Copy,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        "home" | "dashboard" => Command::Home,
        "create" | "start" | "new" => Command::Create,
        "profile" | "me" => Command::Profile,
        "link" | "select" => match args {
            Some(name) => Command::Link(name),
            None => Command::Unknown(input.to_string()),
        },

        "go" | "open" => match args {
            Some(path) => Command::Go(path),
            None => Command::Unknown(input.to_string()),
        },
        "back" => Command::Back,

        "copy" | "yank" => Command::Copy,
        "quit" | "q" | "exit" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}
