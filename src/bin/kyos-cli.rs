//! Line-oriented REPL over the terminal interpreter.
//!
//! Reads command lines from stdin and prints each block's output. Streaming
//! commands reveal their transcript line by line with blocking sleeps.

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::fs;
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;
    use std::thread;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use clap::Parser;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    use kyos_term::config::{APP_NAME, APP_VERSION, TerminalConfig};
    use kyos_term::core::{Evaluation, Interpreter, Session, StreamEvent, StreamTask};
    use kyos_term::models::BlockId;
    use kyos_term::utils::{format_duration, format_prompt};

    #[derive(Parser, Debug)]
    #[command(name = "kyos-cli")]
    #[command(about = "Run the Warp terminal simulator on stdin/stdout", long_about = None)]
    #[command(version)]
    pub struct Args {
        /// TOML file with terminal settings
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Starting working directory
        #[arg(long, value_name = "PATH")]
        cwd: Option<String>,

        /// Print streamed transcripts all at once
        #[arg(long)]
        no_stream: bool,

        /// Delay between two streamed lines, in milliseconds
        #[arg(long, value_name = "MS")]
        tick_ms: Option<u32>,

        /// Dump the session's blocks as JSON on exit
        #[arg(long)]
        json: bool,

        /// Log level used when RUST_LOG is not set
        #[arg(long, value_name = "LEVEL", default_value = "warn")]
        log_level: String,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        init_tracing(&args.log_level)?;

        let config = load_config(&args)?;
        let interpreter = Interpreter::embedded(config).context("failed to start interpreter")?;
        let mut session = interpreter.session();
        tracing::info!(cwd = session.cwd(), "session started");

        let stdin = io::stdin();
        let mut out = io::stdout().lock();
        writeln!(out, "{} {} (type 'help', 'exit' to quit)", APP_NAME, APP_VERSION)?;

        loop {
            write!(out, "\n{}\n$ ", header(&interpreter, &session, None))?;
            out.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            if matches!(line.trim(), "exit" | "quit") {
                break;
            }

            match interpreter.evaluate(&line, &mut session) {
                Evaluation::Noop | Evaluation::Queued => {}
                Evaluation::Cleared => write!(out, "\x1b[2J\x1b[H")?,
                Evaluation::Immediate(id) => print_block(&mut out, &session, id)?,
                Evaluation::Streaming(task) => {
                    run_stream(&mut out, &interpreter, &mut session, task)?
                }
            }
        }

        if args.json {
            let blocks: Vec<_> = session.blocks().collect();
            serde_json::to_writer_pretty(&mut out, &blocks).context("failed to write blocks")?;
            writeln!(out)?;
        }
        Ok(())
    }

    // =========================================================================
    // Setup
    // =========================================================================

    fn init_tracing(level: &str) -> Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(format!("kyos_term={level},kyos_cli={level}")))
            .with_context(|| format!("invalid log level '{}'", level))?;

        let subscriber = FmtSubscriber::builder()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .context("failed to install tracing subscriber")
    }

    fn load_config(args: &Args) -> Result<TerminalConfig> {
        let mut config = match &args.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                TerminalConfig::from_toml(&text)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => TerminalConfig::default(),
        };

        if let Some(cwd) = &args.cwd {
            config.initial_cwd = cwd.clone();
        }
        if args.no_stream {
            config.streaming = false;
        }
        if let Some(ms) = args.tick_ms {
            config.stream_interval_ms = ms;
        }
        Ok(config)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn header(interpreter: &Interpreter, session: &Session, duration_ms: Option<f64>) -> String {
        format_prompt(
            session.cwd(),
            interpreter.fs().home(),
            &interpreter.config().branch,
            duration_ms,
        )
    }

    fn print_block(out: &mut impl Write, session: &Session, id: BlockId) -> Result<()> {
        let Some(block) = session.block(id) else {
            return Ok(());
        };
        for line in &block.output {
            writeln!(out, "{}", line)?;
        }
        if let Some(ms) = block.duration_ms {
            writeln!(out, "{}", format_duration(ms))?;
        }
        Ok(())
    }

    /// Reveal a stream, then any stream a queued line starts after it.
    fn run_stream(
        out: &mut impl Write,
        interpreter: &Interpreter,
        session: &mut Session,
        task: StreamTask,
    ) -> Result<()> {
        let mut current = Some(task);
        while let Some(mut task) = current.take() {
            let interval = Duration::from_millis(task.interval_ms().into());
            let block = task.block();

            while let Some(event) = task.tick() {
                if let StreamEvent::Revealed { chunk, .. } = &event {
                    writeln!(out, "{}", chunk)?;
                    out.flush()?;
                }
                if let Some(next) = interpreter.on_stream_event(session, event) {
                    current = Some(next);
                }
                if task.needs_delay() {
                    thread::sleep(interval);
                }
            }

            if let Some(ms) = session.block(block).and_then(|b| b.duration_ms) {
                writeln!(out, "{}", format_duration(ms))?;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_flags_override_config() {
            let args = Args::parse_from(["kyos-cli", "--no-stream", "--tick-ms", "5", "--cwd", "/"]);
            let config = load_config(&args).unwrap();
            assert!(!config.streaming);
            assert_eq!(config.stream_interval_ms, 5);
            assert_eq!(config.initial_cwd, "/");
            assert_eq!(config.user, "kyle");
        }

        #[test]
        fn test_missing_config_file() {
            let args = Args::parse_from(["kyos-cli", "--config", "/nonexistent/kyos.toml"]);
            let err = load_config(&args).unwrap_err();
            assert!(err.to_string().contains("/nonexistent/kyos.toml"));
        }

        #[test]
        fn test_print_block() {
            let interpreter = Interpreter::embedded(TerminalConfig::default()).unwrap();
            let mut session = interpreter.session();
            let Evaluation::Immediate(id) = interpreter.evaluate("pwd", &mut session) else {
                panic!("expected a block");
            };

            let mut out = Vec::new();
            print_block(&mut out, &session, id).unwrap();
            let text = String::from_utf8(out).unwrap();
            assert!(text.starts_with("/home/kyle/warp\n("));
        }

        #[test]
        fn test_stream_prints_every_line() {
            let config = TerminalConfig {
                stream_interval_ms: 0,
                ..TerminalConfig::default()
            };
            let interpreter = Interpreter::embedded(config).unwrap();
            let mut session = interpreter.session();
            let Evaluation::Streaming(task) = interpreter.evaluate("npm test", &mut session) else {
                panic!("expected a stream");
            };

            let mut out = Vec::new();
            run_stream(&mut out, &interpreter, &mut session, task).unwrap();
            let text = String::from_utf8(out).unwrap();
            assert_eq!(text.lines().count(), 23 + 1);
            assert!(!session.is_streaming());
        }
    }
}
