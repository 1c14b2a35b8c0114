//! Command execution logic.
//!
//! Contains the `execute_command` function that runs parsed commands
//! against the scripted filesystem and transcripts and returns results.

use chrono::{DateTime, Local};

use crate::config::{BIN_DIR, HELP_TEXT, TerminalConfig};
use crate::core::scripts::{Scripts, to_lines};
use crate::core::VirtualFs;
use crate::models::DirectoryEntry;
use crate::utils::{format_date, format_timestamp};

use super::filters::{self, WordCount};
use super::{Command, CommandResult, FileOp, GitCommand, NpmCommand, PathArg};

/// Everything a command may read while it runs.
#[derive(Clone, Copy, Debug)]
pub struct ExecContext<'a> {
    pub fs: &'a VirtualFs,
    pub scripts: &'a Scripts,
    pub config: &'a TerminalConfig,
    /// Working directory the command was submitted in
    pub cwd: &'a str,
    /// Previously submitted lines, oldest first
    pub history: &'a [String],
    /// Wall-clock time of submission
    pub now: &'a DateTime<Local>,
}

/// Execute a parsed command and return output lines.
///
/// This function has no side effects. Changes to the session (working
/// directory, clearing blocks) are returned as an effect.
pub fn execute_command(cmd: Command, ctx: &ExecContext<'_>) -> CommandResult {
    match cmd {
        Command::Help(topic) => execute_help(topic),
        Command::Ls { path, all, long } => execute_ls(path, all, long, ctx),
        Command::Cd(path) => execute_cd(path, ctx),
        Command::Pwd => CommandResult::line(ctx.cwd),
        Command::Clear => CommandResult::clear(),
        Command::Echo(text) => CommandResult::line(text),
        Command::Date => CommandResult::line(format_timestamp(ctx.now)),
        Command::Cat(file) => execute_cat(file, ctx),
        Command::Head { file, count } => execute_head_tail("head", file, count, ctx),
        Command::Tail { file, count } => execute_head_tail("tail", file, count, ctx),
        Command::Grep { pattern, file } => execute_grep(pattern, file, ctx),
        Command::Git(sub) => execute_git(sub, ctx),
        Command::Npm(sub) => execute_npm(sub, ctx.scripts),
        Command::Curl(url) => execute_curl(url),
        Command::Ps => CommandResult::output(ctx.scripts.ps(&ctx.config.user)),
        Command::Whoami => CommandResult::line(ctx.config.user.as_str()),
        Command::Uname { all } => {
            if all {
                CommandResult::line(format!(
                    "Linux {} 6.1.0-generic #1 SMP x86_64 GNU/Linux",
                    ctx.config.hostname
                ))
            } else {
                CommandResult::line("Linux")
            }
        }
        Command::Which(name) => execute_which(name, ctx.fs),
        Command::Wc(file) => execute_wc(file, ctx),
        Command::FileOp(op, args) => execute_file_op(op, &args),
        Command::History => execute_history(ctx.history),
        Command::Unknown(name) => {
            CommandResult::line(format!("bash: {}: command not found", name))
        }
    }
}

// =============================================================================
// File Lookup
// =============================================================================

/// Outcome of resolving a file operand.
enum Lookup<'a> {
    File(&'a DirectoryEntry),
    Directory(String),
    Missing(String),
}

fn lookup<'a>(path: &PathArg, ctx: &ExecContext<'a>) -> Lookup<'a> {
    let abs = ctx.fs.resolve_path(ctx.cwd, path.as_str());
    if ctx.fs.is_directory(&abs) {
        return Lookup::Directory(abs);
    }
    match ctx.fs.resolve_entry(&abs) {
        Some(entry) if entry.is_dir => Lookup::Directory(abs),
        Some(entry) => Lookup::File(entry),
        None => Lookup::Missing(abs),
    }
}

// =============================================================================
// Builtins
// =============================================================================

fn execute_help(topic: Option<String>) -> CommandResult {
    match topic {
        None => CommandResult::output(to_lines(HELP_TEXT)),
        Some(name) => match Command::usage(&name) {
            Some(usage) => CommandResult::line(usage),
            None => CommandResult::line(format!("help: no help topics match '{}'", name)),
        },
    }
}

/// Execute `ls` command.
fn execute_ls(path: Option<PathArg>, all: bool, long: bool, ctx: &ExecContext<'_>) -> CommandResult {
    let target = path.as_ref().map(PathArg::as_str).unwrap_or(".");
    let resolved = ctx.fs.resolve_path(ctx.cwd, target);

    let listing: Vec<&DirectoryEntry> = if ctx.fs.is_directory(&resolved) {
        let entries = ctx.fs.list_entries(&resolved);
        if entries.is_empty() {
            return CommandResult::line("");
        }
        entries.iter().filter(|e| all || !e.is_hidden()).collect()
    } else {
        match ctx.fs.resolve_entry(&resolved) {
            // Listed as a directory but never populated
            Some(entry) if entry.is_dir => return CommandResult::line(""),
            Some(entry) => {
                let name = target.to_string();
                return CommandResult::line(if long {
                    long_line(entry, &name, ctx)
                } else {
                    name
                });
            }
            None => {
                return CommandResult::line(format!(
                    "ls: cannot access '{}': No such file or directory",
                    target
                ));
            }
        }
    };

    let output = listing
        .into_iter()
        .map(|entry| {
            if long {
                long_line(entry, &entry.display_name(), ctx)
            } else {
                entry.display_name()
            }
        })
        .collect();
    CommandResult::output(output)
}

/// One `ls -l` row: permissions, links, owner, group, size, date, name.
fn long_line(entry: &DirectoryEntry, name: &str, ctx: &ExecContext<'_>) -> String {
    format!(
        "{} 1 {} {} {:>8} {} {}",
        entry.permissions(),
        ctx.config.user,
        ctx.config.user,
        entry.display_size(),
        format_date(ctx.now),
        name
    )
}

/// Execute `cd` command.
fn execute_cd(path: Option<PathArg>, ctx: &ExecContext<'_>) -> CommandResult {
    let Some(path) = path else {
        return CommandResult::line("cd: missing operand");
    };

    let resolved = ctx.fs.resolve_path(ctx.cwd, path.as_str());
    if ctx.fs.is_directory(&resolved) {
        return CommandResult::change_dir(resolved);
    }

    match ctx.fs.resolve_entry(&resolved) {
        Some(entry) if !entry.is_dir => {
            CommandResult::line(format!("cd: not a directory: {}", path))
        }
        _ => CommandResult::line(format!("cd: no such file or directory: {}", path)),
    }
}

/// Execute `cat` command.
fn execute_cat(file: Option<PathArg>, ctx: &ExecContext<'_>) -> CommandResult {
    let Some(file) = file else {
        return CommandResult::line("cat: missing file operand");
    };

    match lookup(&file, ctx) {
        Lookup::File(entry) => CommandResult::output(filters::content_lines(entry.text())),
        Lookup::Directory(abs) => CommandResult::line(format!("cat: {}: Is a directory", abs)),
        Lookup::Missing(abs) => {
            CommandResult::line(format!("cat: {}: No such file or directory", abs))
        }
    }
}

/// Execute `head` or `tail`.
fn execute_head_tail(
    name: &str,
    file: Option<PathArg>,
    count: usize,
    ctx: &ExecContext<'_>,
) -> CommandResult {
    let Some(file) = file else {
        return CommandResult::line(format!("{}: missing file operand", name));
    };

    match lookup(&file, ctx) {
        Lookup::File(entry) if name == "tail" => {
            CommandResult::output(filters::tail(entry.text(), count))
        }
        Lookup::File(entry) => CommandResult::output(filters::head(entry.text(), count)),
        Lookup::Directory(abs) => {
            CommandResult::line(format!("{}: error reading '{}': Is a directory", name, abs))
        }
        Lookup::Missing(abs) => CommandResult::line(format!(
            "{}: cannot open '{}' for reading: No such file or directory",
            name, abs
        )),
    }
}

/// Execute `grep` command.
fn execute_grep(
    pattern: Option<String>,
    file: Option<PathArg>,
    ctx: &ExecContext<'_>,
) -> CommandResult {
    let (Some(pattern), Some(file)) = (pattern, file) else {
        return CommandResult::line("grep: missing arguments");
    };

    match lookup(&file, ctx) {
        Lookup::File(entry) => CommandResult::output(filters::grep(entry.text(), &pattern)),
        Lookup::Directory(abs) => CommandResult::line(format!("grep: {}: Is a directory", abs)),
        Lookup::Missing(abs) => {
            CommandResult::line(format!("grep: {}: No such file or directory", abs))
        }
    }
}

/// Execute `wc` command.
fn execute_wc(file: Option<PathArg>, ctx: &ExecContext<'_>) -> CommandResult {
    let Some(file) = file else {
        return CommandResult::line("wc: missing file operand");
    };

    match lookup(&file, ctx) {
        Lookup::File(entry) => {
            CommandResult::line(format!("{} {}", WordCount::of(entry.text()), file))
        }
        Lookup::Directory(abs) => CommandResult::line(format!("wc: {}: Is a directory", abs)),
        Lookup::Missing(abs) => {
            CommandResult::line(format!("wc: {}: No such file or directory", abs))
        }
    }
}

/// Execute `git` subcommands.
fn execute_git(sub: Option<GitCommand>, ctx: &ExecContext<'_>) -> CommandResult {
    let Some(sub) = sub else {
        return CommandResult::line("usage: git <status|log|add|commit|diff>");
    };

    match sub {
        GitCommand::Status => CommandResult::output(to_lines(&ctx.scripts.git_status)),
        GitCommand::Log => CommandResult::output(ctx.scripts.git_log(ctx.now)),
        GitCommand::Add => CommandResult::line("Added files to staging area"),
        GitCommand::Commit(message) => CommandResult::output(vec![
            format!(
                "[{} abc123d] {}",
                ctx.config.branch,
                message.as_deref().unwrap_or("Update terminal")
            ),
            " 1 file changed, 42 insertions(+)".to_string(),
        ]),
        GitCommand::Diff => CommandResult::output(to_lines(&ctx.scripts.git_diff)),
        GitCommand::Unknown(name) => CommandResult::line(format!(
            "git: '{}' is not a git command. See 'git help'.",
            name
        )),
    }
}

/// Execute `npm` subcommands (non-streaming variants).
fn execute_npm(sub: Option<NpmCommand>, scripts: &Scripts) -> CommandResult {
    let Some(sub) = sub else {
        return CommandResult::line("usage: npm <list|install|start|test>");
    };

    match sub {
        NpmCommand::List => CommandResult::output(to_lines(&scripts.npm_list)),
        NpmCommand::Install => CommandResult::output(to_lines(&scripts.npm_install)),
        NpmCommand::Start => CommandResult::output(to_lines(&scripts.npm_start)),
        NpmCommand::Test => CommandResult::output(to_lines(&scripts.npm_test)),
        NpmCommand::Unknown(name) => CommandResult::line(format!(
            "npm: '{}' is not a recognized npm command",
            name
        )),
    }
}

/// Execute `curl` with canned responses.
fn execute_curl(url: Option<String>) -> CommandResult {
    let Some(url) = url else {
        return CommandResult::line("curl: try 'curl --help' for more information");
    };

    if url == "https://api.github.com/user" {
        CommandResult::line(r#"{"login": "warpdev", "name": "Warp Terminal", "followers": 42}"#)
    } else if url.contains("google.com") {
        CommandResult::line(
            "<html><head><title>Google</title></head><body>Welcome to Google</body></html>",
        )
    } else if url.contains("example.com") {
        CommandResult::line("Example Domain response")
    } else {
        let body = serde_json::json!({ "message": format!("Hello from {}", url) });
        CommandResult::output(vec![
            "HTTP/2 200".to_string(),
            "Content-Type: application/json".to_string(),
            body.to_string(),
        ])
    }
}

/// Execute `which` against the binaries listed in the filesystem.
fn execute_which(name: Option<String>, fs: &VirtualFs) -> CommandResult {
    let Some(name) = name else {
        return CommandResult::line("which: missing argument");
    };

    let found = fs
        .list_entries(BIN_DIR)
        .iter()
        .any(|e| !e.is_dir && e.name == name);
    if found {
        CommandResult::line(VirtualFs::join_path(BIN_DIR, &name))
    } else {
        CommandResult::line(format!("{} not found", name))
    }
}

/// Acknowledge a file management command without touching the filesystem.
fn execute_file_op(op: FileOp, args: &[String]) -> CommandResult {
    match (op, args) {
        (FileOp::Mkdir, [dir, ..]) => CommandResult::line(format!("Created directory: {}", dir)),
        (FileOp::Mkdir, []) => CommandResult::line("mkdir: missing operand"),
        (FileOp::Touch, [file, ..]) => CommandResult::line(format!("Created file: {}", file)),
        (FileOp::Touch, []) => CommandResult::line("touch: missing file operand"),
        (FileOp::Rm, [file, ..]) => CommandResult::line(format!("Removed: {}", file)),
        (FileOp::Rm, []) => CommandResult::line("rm: missing operand"),
        (FileOp::Cp, [src, dest, ..]) => {
            CommandResult::line(format!("Copied {} to {}", src, dest))
        }
        (FileOp::Cp, _) => CommandResult::line("cp: missing file operand"),
        (FileOp::Mv, [src, dest, ..]) => CommandResult::line(format!("Moved {} to {}", src, dest)),
        (FileOp::Mv, _) => CommandResult::line("mv: missing file operand"),
    }
}

/// Execute `history` command.
fn execute_history(history: &[String]) -> CommandResult {
    if history.is_empty() {
        return CommandResult::line("No command history");
    }
    CommandResult::output(
        history
            .iter()
            .enumerate()
            .map(|(i, cmd)| format!("{}  {}", i + 1, cmd))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FS_MANIFEST;
    use crate::core::commands::Effect;
    use chrono::TimeZone;

    struct Fixture {
        fs: VirtualFs,
        scripts: Scripts,
        config: TerminalConfig,
        history: Vec<String>,
        now: DateTime<Local>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                fs: VirtualFs::from_toml(FS_MANIFEST).unwrap(),
                scripts: Scripts::default(),
                config: TerminalConfig::default(),
                history: Vec::new(),
                now: Local.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap(),
            }
        }

        fn run_in(&self, cwd: &str, line: &str) -> CommandResult {
            let mut words = line.split_whitespace().map(str::to_string);
            let name = words.next().unwrap();
            let args: Vec<String> = words.collect();
            let ctx = ExecContext {
                fs: &self.fs,
                scripts: &self.scripts,
                config: &self.config,
                cwd,
                history: &self.history,
                now: &self.now,
            };
            execute_command(Command::parse(&name, &args), &ctx)
        }

        fn run(&self, line: &str) -> CommandResult {
            self.run_in("/home/kyle/warp", line)
        }
    }

    // =========================================================================
    // Filesystem commands
    // =========================================================================

    #[test]
    fn test_ls_default_hides_dotfiles() {
        let fx = Fixture::new();
        let out = fx.run_in("/home/kyle", "ls").output;
        assert_eq!(out[0], "warp/");
        assert!(out.contains(&"README.md".to_string()));
        assert!(!out.iter().any(|l| l.starts_with('.')));

        let all = fx.run_in("/home/kyle", "ls -a").output;
        assert!(all.contains(&".bashrc".to_string()));
        assert_eq!(all.len(), 11);
    }

    #[test]
    fn test_ls_long() {
        let fx = Fixture::new();
        let out = fx.run_in("/etc", "ls -l").output;
        assert_eq!(out.len(), 4);
        assert!(out[0].starts_with("-rw-r--r-- 1 kyle kyle "));
        assert!(out[0].ends_with(" 3/7/2025 hosts"));

        let dirs = fx.run_in("/", "ls -l").output;
        assert_eq!(dirs[0], "drwxr-xr-x 1 kyle kyle     4096 3/7/2025 home/");
    }

    #[test]
    fn test_ls_unpopulated_and_missing() {
        let fx = Fixture::new();
        assert_eq!(fx.run_in("/home/kyle", "ls Documents").output, vec![""]);
        assert_eq!(
            fx.run("ls nope").output,
            vec!["ls: cannot access 'nope': No such file or directory"]
        );
        assert_eq!(fx.run("ls README.md").output, vec!["README.md"]);
    }

    #[test]
    fn test_cd() {
        let fx = Fixture::new();
        assert_eq!(
            fx.run("cd app").effect,
            Effect::ChangeDir("/home/kyle/warp/app".into())
        );
        assert_eq!(fx.run("cd ..").effect, Effect::ChangeDir("/home/kyle".into()));
        assert_eq!(fx.run_in("/", "cd ..").effect, Effect::ChangeDir("/".into()));
        assert_eq!(fx.run("cd").output, vec!["cd: missing operand"]);
        assert_eq!(
            fx.run("cd README.md").output,
            vec!["cd: not a directory: README.md"]
        );
        let missing = fx.run("cd nowhere");
        assert_eq!(missing.effect, Effect::None);
        assert_eq!(missing.output, vec!["cd: no such file or directory: nowhere"]);
    }

    #[test]
    fn test_cat() {
        let fx = Fixture::new();
        assert_eq!(fx.run("cat").output, vec!["cat: missing file operand"]);
        assert_eq!(
            fx.run("cat app").output,
            vec!["cat: /home/kyle/warp/app: Is a directory"]
        );
        assert_eq!(
            fx.run("cat nope.txt").output,
            vec!["cat: /home/kyle/warp/nope.txt: No such file or directory"]
        );

        let entry = fx.fs.resolve_entry("/etc/hosts").unwrap();
        assert_eq!(fx.run("cat /etc/hosts").output.join("\n"), entry.text());
        assert!(fx.run("cat app/utils.rs").output.is_empty());
    }

    #[test]
    fn test_head_tail() {
        let fx = Fixture::new();
        let readme = fx.fs.resolve_entry("/home/kyle/README.md").unwrap().text();
        let lines: Vec<&str> = readme.split('\n').collect();

        assert_eq!(fx.run_in("/home/kyle", "head README.md 3").output, lines[..3]);
        assert_eq!(
            fx.run_in("/home/kyle", "tail README.md -n2").output,
            lines[lines.len() - 2..]
        );
        assert_eq!(fx.run("head").output, vec!["head: missing file operand"]);
        assert_eq!(
            fx.run("tail app").output,
            vec!["tail: error reading '/home/kyle/warp/app': Is a directory"]
        );
        assert_eq!(
            fx.run("head x").output,
            vec!["head: cannot open '/home/kyle/warp/x' for reading: No such file or directory"]
        );
    }

    #[test]
    fn test_grep_and_wc() {
        let fx = Fixture::new();
        assert_eq!(fx.run("grep fn").output, vec!["grep: missing arguments"]);
        let hits = fx.run("grep 127.0.0.1 /etc/hosts").output;
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|l| l.contains("127.0.0.1")));

        let wc = fx.run("wc /etc/hosts").output;
        assert_eq!(wc.len(), 1);
        assert!(wc[0].ends_with(" /etc/hosts"));
        assert_eq!(fx.run("wc").output, vec!["wc: missing file operand"]);
    }

    // =========================================================================
    // Scripted commands
    // =========================================================================

    #[test]
    fn test_git() {
        let fx = Fixture::new();
        assert_eq!(fx.run("git status").output[0], "On branch main");
        assert_eq!(
            fx.run("git push").output,
            vec!["git: 'push' is not a git command. See 'git help'."]
        );
        assert_eq!(
            fx.run("git commit -m wip").output[0],
            "[main abc123d] wip"
        );
        assert_eq!(
            fx.run("git commit").output[0],
            "[main abc123d] Update terminal"
        );
        assert!(fx.run("git log").output.iter().any(|l| l == "Date:   3/7/2025, 12:00:00 PM"));
    }

    #[test]
    fn test_npm_sync_variants() {
        let fx = Fixture::new();
        assert_eq!(fx.run("npm install").output[0], "npm install completed");
        assert_eq!(fx.run("npm ls").output.len(), 5);
        assert_eq!(
            fx.run("npm run").output,
            vec!["npm: 'run' is not a recognized npm command"]
        );
    }

    #[test]
    fn test_curl() {
        let fx = Fixture::new();
        assert_eq!(
            fx.run("curl").output,
            vec!["curl: try 'curl --help' for more information"]
        );
        assert_eq!(
            fx.run("curl https://kyos.dev").output,
            vec![
                "HTTP/2 200",
                "Content-Type: application/json",
                r#"{"message":"Hello from https://kyos.dev"}"#,
            ]
        );
        assert!(fx.run("curl https://google.com").output[0].contains("Google"));
    }

    #[test]
    fn test_system_commands() {
        let fx = Fixture::new();
        assert_eq!(fx.run("whoami").output, vec!["kyle"]);
        assert_eq!(fx.run("uname").output, vec!["Linux"]);
        assert!(fx.run("uname -a").output[0].contains("warp-terminal"));
        assert_eq!(fx.run("pwd").output, vec!["/home/kyle/warp"]);
        assert_eq!(fx.run("echo hi   there").output, vec!["hi there"]);
        assert_eq!(fx.run("date").output, vec!["3/7/2025, 12:00:00 PM"]);
        assert_eq!(fx.run("ps").output.len(), 4);
        assert_eq!(fx.run("clear").effect, Effect::ClearBlocks);
    }

    #[test]
    fn test_which() {
        let fx = Fixture::new();
        assert_eq!(fx.run("which cargo").output, vec!["/usr/bin/cargo"]);
        assert_eq!(fx.run("which vim").output, vec!["vim not found"]);
        assert_eq!(fx.run("which").output, vec!["which: missing argument"]);
    }

    #[test]
    fn test_file_ops() {
        let fx = Fixture::new();
        assert_eq!(fx.run("mkdir x").output, vec!["Created directory: x"]);
        assert_eq!(fx.run("touch").output, vec!["touch: missing file operand"]);
        assert_eq!(fx.run("cp a").output, vec!["cp: missing file operand"]);
        assert_eq!(fx.run("mv a b").output, vec!["Moved a to b"]);
        assert_eq!(fx.run("rm a").output, vec!["Removed: a"]);
    }

    #[test]
    fn test_help_and_unknown() {
        let fx = Fixture::new();
        assert_eq!(fx.run("help").output[0], "Available commands:");
        assert_eq!(
            fx.run("help ls").output,
            vec!["ls [-a] [-l] [path] - List directory contents"]
        );
        assert_eq!(
            fx.run("help vim").output,
            vec!["help: no help topics match 'vim'"]
        );
        assert_eq!(
            fx.run("vim").output,
            vec!["bash: vim: command not found"]
        );
    }

    #[test]
    fn test_history_listing() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run("history").output, vec!["No command history"]);
        fx.history = vec!["ls".into(), "pwd".into()];
        assert_eq!(fx.run("history").output, vec!["1  ls", "2  pwd"]);
    }
}
