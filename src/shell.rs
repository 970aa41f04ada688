//! Interactive shell: command parsing, execution, and listing rendering.
//!
//! Thin plumbing over the session operation set. Everything here is pure
//! string-in/string-out so the binary only has to own the read loop and the
//! persistence path.

use crate::error::FsError;
use crate::session::{CursorMove, Listing, Session};
use owo_colors::OwoColorize;

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewFile(String),
    Copy(String),
    Paste,
    Remove(String),
    MkDir(String),
    /// `cd <name>`; the name `..` moves to the parent.
    ChangeDir(String),
    List,
    Save,
    Exit,
}

/// What the read loop should do after executing a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Keep looping, optionally showing a message first.
    Continue(Option<String>),
    /// Persist the tree and keep running.
    Save,
    /// Persist the tree and leave the loop.
    Exit,
}

/// Parse one input line. Everything after the command word belongs to the
/// name, so names with embedded spaces work.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, Some(rest.trim_start())),
        None => (trimmed, None),
    };

    match word {
        "newfile" => named(rest, word, Command::NewFile),
        "copy" => named(rest, word, Command::Copy),
        "remove" => named(rest, word, Command::Remove),
        "mkdir" => named(rest, word, Command::MkDir),
        "cd" => named(rest, word, Command::ChangeDir),
        "paste" => bare(rest, word, Command::Paste),
        "ls" => bare(rest, word, Command::List),
        "save" => bare(rest, word, Command::Save),
        "exit" => bare(rest, word, Command::Exit),
        _ => Err(format!("Invalid command '{}'.", word)),
    }
}

fn named(
    rest: Option<&str>,
    word: &str,
    build: impl FnOnce(String) -> Command,
) -> Result<Command, String> {
    match rest {
        Some(name) if !name.is_empty() => Ok(build(name.to_owned())),
        _ => Err(format!("usage: {} <name>", word)),
    }
}

fn bare(rest: Option<&str>, word: &str, command: Command) -> Result<Command, String> {
    match rest {
        None | Some("") => Ok(command),
        Some(_) => Err(format!("usage: {}", word)),
    }
}

/// Apply one command to the session. Persistence itself is left to the
/// caller, which owns the state-file path.
pub fn execute(session: &mut Session, command: &Command) -> Step {
    match command {
        Command::NewFile(name) => reply(
            session
                .create_file(name)
                .map(|_| format!("File '{}' created successfully.", name)),
        ),
        Command::Copy(name) => reply(
            session
                .copy(name)
                .map(|_| format!("File '{}' copied to clipboard.", name)),
        ),
        Command::Paste => reply(
            session
                .paste()
                .map(|_| "Pasted clipboard file into current directory.".to_string()),
        ),
        Command::Remove(name) => reply(
            session
                .remove_file(name)
                .map(|_| format!("File '{}' removed from current directory.", name)),
        ),
        Command::MkDir(name) => reply(
            session
                .make_directory(name)
                .map(|_| format!("New directory '{}' created and moved into it.", name)),
        ),
        Command::ChangeDir(name) if name == ".." => {
            let message = match session.change_directory_up() {
                CursorMove::Moved => format!(
                    "Moved to parent directory '{}'.",
                    session.current_directory_name()
                ),
                CursorMove::AlreadyAtRoot => "Already in the root directory.".to_string(),
            };
            Step::Continue(Some(message))
        }
        Command::ChangeDir(name) => reply(
            session
                .change_directory_into(name)
                .map(|_| format!("Moved to directory '{}'.", name)),
        ),
        Command::List => Step::Continue(None),
        Command::Save => Step::Save,
        Command::Exit => Step::Exit,
    }
}

fn reply(result: Result<String, FsError>) -> Step {
    Step::Continue(Some(match result {
        Ok(message) => message,
        Err(err) => format!("{}.", err),
    }))
}

/// Render a directory snapshot the way the shell displays it.
pub fn render_listing(listing: &Listing, color: bool) -> String {
    let mut out = format!("now - {}\n", listing.directory);
    for file in &listing.files {
        out.push_str(&format!("|--- {}\n", file));
    }
    for dir in &listing.directories {
        if color {
            out.push_str(&format!("|--- {} {}\n", "<DIR>".cyan(), dir));
        } else {
            out.push_str(&format!("|--- <DIR> {}\n", dir));
        }
    }
    out
}
