//! Parsing of lines typed at the interactive prompt.

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Free-text service query.
    Query(String),
    /// `:N`, a 1-based preset position.
    Preset(usize),
    /// `:e <attribute_id>`
    ToggleEvidence(String),
    /// `:r`
    Reset,
    /// `:q`
    Quit,
    /// `:?` or `:help`
    Help,
    /// Blank line; nothing to submit.
    Empty,
    /// Unrecognized `:` command.
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(cmd) = line.strip_prefix(':') else {
        return Input::Query(line.to_string());
    };

    let mut parts = cmd.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match head {
        "q" | "quit" | "exit" => Input::Quit,
        "r" | "reset" => Input::Reset,
        "?" | "h" | "help" => Input::Help,
        "e" | "evidence" if !arg.is_empty() => Input::ToggleEvidence(arg.to_string()),
        _ => match head.parse::<usize>() {
            Ok(n) => Input::Preset(n),
            Err(_) => Input::Unknown(line.to_string()),
        },
    }
}
