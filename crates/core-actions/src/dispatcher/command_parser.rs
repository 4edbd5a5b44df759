//! Pure classification of accumulated command text.
//!
//! No side effects here; the dispatcher turns the variants into session
//! mutations. Unrecognized and incomplete commands are distinct variants so
//! callers can log them apart, but both are treated as no-ops.

/// A classified command-line entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// `q!` - discard and end the session.
    Quit,
    /// `w` - save.
    Write,
    /// `wq` - save and end the session.
    WriteQuit,
    /// `find <needle>` - the needle is the verbatim remainder after the
    /// keyword and one space; it may contain spaces.
    Find { needle: String },
    /// `replace <needle> <replacement>` - the first two whitespace-separated
    /// tokens after the keyword; extra tokens are ignored.
    Replace { needle: String, replacement: String },
    /// A known keyword with missing or empty arguments.
    Malformed { reason: &'static str },
    /// Anything else; no recognized effect.
    Unknown(String),
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        match raw {
            "q!" => return ParsedCommand::Quit,
            "w" => return ParsedCommand::Write,
            "wq" => return ParsedCommand::WriteQuit,
            _ => {}
        }
        if let Some(rest) = raw.strip_prefix("find ") {
            if rest.is_empty() {
                return ParsedCommand::Malformed {
                    reason: "find: missing needle",
                };
            }
            return ParsedCommand::Find {
                needle: rest.to_string(),
            };
        }
        if let Some(rest) = raw.strip_prefix("replace ") {
            let mut tokens = rest.split_whitespace();
            return match (tokens.next(), tokens.next()) {
                (Some(needle), Some(replacement)) => ParsedCommand::Replace {
                    needle: needle.to_string(),
                    replacement: replacement.to_string(),
                },
                _ => ParsedCommand::Malformed {
                    reason: "replace: expected needle and replacement",
                },
            };
        }
        ParsedCommand::Unknown(raw.to_string())
    }
}
