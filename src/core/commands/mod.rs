//! Command parsing and execution.
//!
//! This module provides:
//! - `Command` enum for parsed builtins
//! - `CommandResult` for command execution results
//! - `execute_command` for running a command against the scripted world
//!
//! # Architecture
//!
//! A command line is split into a name and arguments, parsed into the
//! `Command` enum, then executed via `execute_command`. Execution reads the
//! filesystem and session but never mutates them; requested changes come
//! back as an [`Effect`] for the interpreter to apply.

mod execute;
pub mod filters;
mod result;

pub use execute::{ExecContext, execute_command};
pub use result::{CommandResult, Effect};

use std::fmt;

use filters::parse_count;

use crate::config::DEFAULT_HEAD_TAIL_LINES;

// =============================================================================
// Path Argument Type
// =============================================================================

/// A path argument passed to a command (e.g., `cd foo`, `cat bar.md`).
///
/// The path is stored as typed; resolution against the working directory
/// happens during execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathArg(String);

impl PathArg {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&String> for PathArg {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl PartialEq<&str> for PathArg {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Subcommands
// =============================================================================

/// `git` subcommands with scripted transcripts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GitCommand {
    Status,
    Log,
    Add,
    /// Commit message, if one was given
    Commit(Option<String>),
    Diff,
    Unknown(String),
}

impl GitCommand {
    fn parse(args: &[String]) -> Option<Self> {
        let (sub, rest) = args.split_first()?;
        Some(match sub.as_str() {
            "status" => Self::Status,
            "log" => Self::Log,
            "add" => Self::Add,
            "commit" => Self::Commit(commit_message(rest)),
            "diff" => Self::Diff,
            other => Self::Unknown(other.to_string()),
        })
    }
}

/// Message from `git commit -m <msg>` or `git commit <msg>`.
fn commit_message(args: &[String]) -> Option<String> {
    let words = match args.split_first() {
        Some((flag, rest)) if flag == "-m" => rest,
        _ => args,
    };
    let message = words.join(" ");
    let message = message.trim_matches(|c: char| c == '"' || c == '\'');
    (!message.is_empty()).then(|| message.to_string())
}

/// `npm` subcommands with scripted transcripts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NpmCommand {
    List,
    Install,
    Start,
    Test,
    Unknown(String),
}

impl NpmCommand {
    fn parse(args: &[String]) -> Option<Self> {
        Some(match args.first()?.as_str() {
            "list" | "ls" => Self::List,
            "install" => Self::Install,
            "start" => Self::Start,
            "test" => Self::Test,
            other => Self::Unknown(other.to_string()),
        })
    }
}

/// File management commands that only acknowledge their arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileOp {
    Mkdir,
    Touch,
    Rm,
    Cp,
    Mv,
}

// =============================================================================
// Command Enum
// =============================================================================

/// Parsed terminal command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help(Option<String>),
    Ls {
        path: Option<PathArg>,
        all: bool,
        long: bool,
    },
    Cd(Option<PathArg>),
    Pwd,
    Clear,
    Echo(String),
    Date,
    Cat(Option<PathArg>),
    Head {
        file: Option<PathArg>,
        count: usize,
    },
    Tail {
        file: Option<PathArg>,
        count: usize,
    },
    Grep {
        pattern: Option<String>,
        file: Option<PathArg>,
    },
    Git(Option<GitCommand>),
    Npm(Option<NpmCommand>),
    Curl(Option<String>),
    Ps,
    Whoami,
    Uname {
        all: bool,
    },
    Which(Option<String>),
    Wc(Option<PathArg>),
    FileOp(FileOp, Vec<String>),
    History,
    Unknown(String),
}

impl Command {
    /// All builtin names.
    pub fn names() -> &'static [&'static str] {
        &[
            "cat", "cd", "clear", "cp", "curl", "date", "echo", "git", "grep", "head", "help",
            "history", "ls", "mkdir", "mv", "npm", "ps", "pwd", "rm", "tail", "touch", "uname",
            "wc", "which", "whoami",
        ]
    }

    /// One-line usage for `help <name>`.
    pub fn usage(name: &str) -> Option<&'static str> {
        Some(match name {
            "cat" => "cat <file> - Print file contents",
            "cd" => "cd <dir> - Change the working directory",
            "clear" => "clear - Clear all blocks from the screen",
            "cp" => "cp <src> <dest> - Copy a file",
            "curl" => "curl <url> - Make an HTTP request",
            "date" => "date - Print the current date and time",
            "echo" => "echo [text...] - Print text",
            "git" => "git <status|log|add|commit|diff> - Inspect the repository",
            "grep" => "grep <pattern> <file> - Print lines containing pattern",
            "head" => "head <file> [n] - Print the first n lines (default 10)",
            "help" => "help [command] - Show available commands",
            "history" => "history - Show command history",
            "ls" => "ls [-a] [-l] [path] - List directory contents",
            "mkdir" => "mkdir <dir> - Create a directory",
            "mv" => "mv <src> <dest> - Move a file",
            "npm" => "npm <list|install|start|test> - Manage packages",
            "ps" => "ps - List running processes",
            "pwd" => "pwd - Print the working directory",
            "rm" => "rm <file> - Remove a file",
            "tail" => "tail <file> [n] - Print the last n lines (default 10)",
            "touch" => "touch <file> - Create a file",
            "uname" => "uname [-a] - Print system information",
            "wc" => "wc <file> - Count lines, words and characters",
            "which" => "which <command> - Locate a command",
            "whoami" => "whoami - Print the current user",
            "!" | "!!" => "!<n> / !! - Re-run a command from history",
            _ => return None,
        })
    }

    /// Parse command from name and arguments.
    ///
    /// Names are case-sensitive, as in a real shell.
    pub fn parse(name: &str, args: &[String]) -> Self {
        match name {
            "help" => Self::Help(args.first().cloned()),
            "ls" => parse_ls(args),
            "cd" => Self::Cd(args.first().map(PathArg::from)),
            "pwd" => Self::Pwd,
            "clear" => Self::Clear,
            "echo" => Self::Echo(args.join(" ")),
            "date" => Self::Date,
            "cat" => Self::Cat(args.first().map(PathArg::from)),
            "head" => {
                let (file, count) = parse_file_and_count(args);
                Self::Head { file, count }
            }
            "tail" => {
                let (file, count) = parse_file_and_count(args);
                Self::Tail { file, count }
            }
            "grep" => Self::Grep {
                pattern: args.first().cloned(),
                file: args.get(1).map(PathArg::from),
            },
            "git" => Self::Git(GitCommand::parse(args)),
            "npm" => Self::Npm(NpmCommand::parse(args)),
            "curl" => Self::Curl(args.first().cloned()),
            "ps" => Self::Ps,
            "whoami" => Self::Whoami,
            "uname" => Self::Uname {
                all: args.first().is_some_and(|a| a == "-a"),
            },
            "which" => Self::Which(args.first().cloned()),
            "wc" => Self::Wc(args.first().map(PathArg::from)),
            "mkdir" => Self::FileOp(FileOp::Mkdir, args.to_vec()),
            "touch" => Self::FileOp(FileOp::Touch, args.to_vec()),
            "rm" => Self::FileOp(FileOp::Rm, args.to_vec()),
            "cp" => Self::FileOp(FileOp::Cp, args.to_vec()),
            "mv" => Self::FileOp(FileOp::Mv, args.to_vec()),
            "history" => Self::History,
            _ => Self::Unknown(name.to_string()),
        }
    }
}

/// `ls` flags may be combined (`-la`) or spelled out (`--all`, `--long`).
fn parse_ls(args: &[String]) -> Command {
    let mut all = false;
    let mut long = false;
    let mut path = None;

    for arg in args {
        match arg.as_str() {
            "--all" => all = true,
            "--long" => long = true,
            flags if flags.starts_with('-') && flags.len() > 1 => {
                all |= flags.contains('a');
                long |= flags.contains('l');
            }
            _ if path.is_none() => path = Some(PathArg::from(arg)),
            _ => {}
        }
    }

    Command::Ls { path, all, long }
}

/// `head`/`tail` accept `<file> [n]`, `-n <n>`, `-<n>` and `-n<n>` in any order.
fn parse_file_and_count(args: &[String]) -> (Option<PathArg>, usize) {
    let mut file = None;
    let mut count = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "-n" {
            count = iter.next().map(|n| parse_count(n));
        } else if arg.starts_with('-') {
            count = Some(parse_count(arg));
        } else if file.is_none() {
            file = Some(PathArg::from(arg));
        } else if count.is_none() {
            count = Some(parse_count(arg));
        }
    }

    (file, count.unwrap_or(DEFAULT_HEAD_TAIL_LINES))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_ls() {
        assert!(matches!(
            Command::parse("ls", &[]),
            Command::Ls {
                path: None,
                all: false,
                long: false
            }
        ));
        assert!(matches!(
            Command::parse("ls", &args(&["app"])),
            Command::Ls { path: Some(ref p), all: false, long: false } if *p == "app"
        ));
        assert!(matches!(
            Command::parse("ls", &args(&["-la", "/etc"])),
            Command::Ls { path: Some(ref p), all: true, long: true } if *p == "/etc"
        ));
        assert!(matches!(
            Command::parse("ls", &args(&["--all"])),
            Command::Ls {
                path: None,
                all: true,
                long: false
            }
        ));
        assert!(matches!(
            Command::parse("ls", &args(&["-l", "--all"])),
            Command::Ls {
                all: true,
                long: true,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_cd() {
        assert!(matches!(Command::parse("cd", &[]), Command::Cd(None)));
        assert!(matches!(
            Command::parse("cd", &args(&["/home"])),
            Command::Cd(Some(ref p)) if *p == "/home"
        ));
    }

    #[test]
    fn test_parse_head_counts() {
        let cases: [(&[&str], usize); 6] = [
            (&["f"], 10),
            (&["f", "5"], 5),
            (&["f", "-5"], 5),
            (&["f", "-n5"], 5),
            (&["-n", "3", "f"], 3),
            (&["f", "0"], 10),
        ];
        for (input, expected) in cases {
            match Command::parse("head", &args(input)) {
                Command::Head { file, count } => {
                    assert_eq!(file, Some(PathArg::new("f")), "{:?}", input);
                    assert_eq!(count, expected, "{:?}", input);
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        assert!(matches!(
            Command::parse("tail", &[]),
            Command::Tail {
                file: None,
                count: 10
            }
        ));
    }

    #[test]
    fn test_parse_grep() {
        assert!(matches!(
            Command::parse("grep", &args(&["fn", "main.rs"])),
            Command::Grep { pattern: Some(ref p), file: Some(ref f) } if p == "fn" && *f == "main.rs"
        ));
        assert!(matches!(
            Command::parse("grep", &args(&["fn"])),
            Command::Grep { file: None, .. }
        ));
    }

    #[test]
    fn test_parse_git() {
        assert!(matches!(Command::parse("git", &[]), Command::Git(None)));
        assert!(matches!(
            Command::parse("git", &args(&["status"])),
            Command::Git(Some(GitCommand::Status))
        ));
        assert!(matches!(
            Command::parse("git", &args(&["push"])),
            Command::Git(Some(GitCommand::Unknown(ref s))) if s == "push"
        ));
        assert_eq!(
            Command::parse("git", &args(&["commit", "-m", "\"fix", "typo\""])),
            Command::Git(Some(GitCommand::Commit(Some("fix typo".into()))))
        );
        assert_eq!(
            Command::parse("git", &args(&["commit"])),
            Command::Git(Some(GitCommand::Commit(None)))
        );
    }

    #[test]
    fn test_parse_npm() {
        assert!(matches!(
            Command::parse("npm", &args(&["ls"])),
            Command::Npm(Some(NpmCommand::List))
        ));
        assert!(matches!(
            Command::parse("npm", &args(&["run"])),
            Command::Npm(Some(NpmCommand::Unknown(ref s))) if s == "run"
        ));
        assert!(matches!(Command::parse("npm", &[]), Command::Npm(None)));
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(
            Command::parse("echo", &args(&["a", "b"])),
            Command::Echo("a b".into())
        );
        assert_eq!(
            Command::parse("uname", &args(&["-a"])),
            Command::Uname { all: true }
        );
        assert_eq!(
            Command::parse("cp", &args(&["a"])),
            Command::FileOp(FileOp::Cp, args(&["a"]))
        );
        assert_eq!(Command::parse("help", &[]), Command::Help(None));
    }

    #[test]
    fn test_parse_case_sensitive() {
        assert!(matches!(
            Command::parse("LS", &[]),
            Command::Unknown(ref c) if c == "LS"
        ));
    }

    #[test]
    fn test_every_name_has_usage() {
        for name in Command::names() {
            assert!(Command::usage(name).is_some(), "{}", name);
            assert!(!matches!(Command::parse(name, &[]), Command::Unknown(_)));
        }
    }
}
