//! The command interpreter.
//!
//! [`Interpreter`] owns the immutable world (filesystem, transcripts,
//! configuration); each terminal window owns a [`Session`] that the
//! interpreter evaluates input lines against.

use crate::config::{FS_MANIFEST, TerminalConfig};
use crate::core::commands::{Command, Effect, ExecContext, execute_command};
use crate::core::error::ConfigError;
use crate::core::parser::{HistoryEvent, ParsedCommand};
use crate::core::scripts::{Scripts, StreamTrigger};
use crate::core::session::{InFlight, Session};
use crate::core::stream::{StreamEvent, StreamTask};
use crate::core::VirtualFs;
use crate::models::{BlockId, CommandBlock};
use crate::utils::{elapsed_ms, local_now, now_ms};

/// Outcome of submitting one input line.
#[derive(Debug)]
pub enum Evaluation {
    /// Blank input; nothing happened.
    Noop,
    /// A stream is in flight; the line runs once it completes.
    Queued,
    /// The screen was cleared; no block was added.
    Cleared,
    /// A finished block was appended.
    Immediate(BlockId),
    /// A streaming block was appended; drive the task to fill it.
    Streaming(StreamTask),
}

/// Evaluates command lines against the scripted world.
#[derive(Clone, Debug)]
pub struct Interpreter {
    fs: VirtualFs,
    scripts: Scripts,
    config: TerminalConfig,
}

impl Interpreter {
    /// Build an interpreter, checking the config against the filesystem.
    pub fn new(
        fs: VirtualFs,
        scripts: Scripts,
        config: TerminalConfig,
    ) -> Result<Self, ConfigError> {
        if config.max_blocks == 0 {
            return Err(ConfigError::ZeroBlockCapacity);
        }
        if !fs.is_directory(&config.initial_cwd) {
            return Err(ConfigError::InvalidCwd(config.initial_cwd));
        }
        Ok(Self {
            fs,
            scripts,
            config,
        })
    }

    /// Interpreter over the bundled filesystem and transcripts.
    pub fn embedded(config: TerminalConfig) -> Result<Self, ConfigError> {
        let fs = VirtualFs::from_toml(FS_MANIFEST)?;
        Self::new(fs, Scripts::default(), config)
    }

    pub fn fs(&self) -> &VirtualFs {
        &self.fs
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// A fresh session in the configured starting directory.
    pub fn session(&self) -> Session {
        Session::new(self.config.initial_cwd.clone(), self.config.max_blocks)
    }

    /// Submit one input line.
    pub fn evaluate(&self, raw: &str, session: &mut Session) -> Evaluation {
        let line = raw.trim();
        if line.is_empty() {
            return Evaluation::Noop;
        }
        session.reset_cursor();

        if session.is_streaming() {
            tracing::debug!(command = line, "stream in flight, queueing");
            session.enqueue(line.to_string());
            return Evaluation::Queued;
        }

        self.run_line(line, session)
    }

    /// Apply a stream event to the session.
    ///
    /// Returns the next task when a queued line starts another stream.
    pub fn on_stream_event(&self, session: &mut Session, event: StreamEvent) -> Option<StreamTask> {
        match event {
            StreamEvent::Revealed { block, chunk, .. } => {
                match session.block_mut(block) {
                    Some(target) => {
                        let partial = target.partial.get_or_insert_with(String::new);
                        partial.push_str(&chunk);
                        partial.push('\n');
                    }
                    None => tracing::warn!(%block, "reveal for unknown block ignored"),
                }
                None
            }
            StreamEvent::Completed { block, lines } => {
                let Some(in_flight) = session.finish_stream(block) else {
                    tracing::warn!(%block, "completion for a block not in flight ignored");
                    return None;
                };

                let duration = elapsed_ms(in_flight.started_ms);
                if let Some(target) = session.block_mut(block) {
                    target.streaming = false;
                    target.output = lines;
                    target.duration_ms = Some(duration);
                    target.partial = None;
                }
                session.record_history(&in_flight.command);
                tracing::debug!(%block, command = %in_flight.command, duration_ms = duration, "stream complete");

                self.drain_queue(session)
            }
        }
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    fn run_line(&self, line: &str, session: &mut Session) -> Evaluation {
        let line = match HistoryEvent::parse(line) {
            Some(event) => match event.resolve(session.history()) {
                Ok(recalled) => recalled,
                Err(message) => {
                    let block = CommandBlock::completed(session.cwd(), line, vec![message], 0.0);
                    return Evaluation::Immediate(session.push_block(block));
                }
            },
            None => line.to_string(),
        };

        let Some(parsed) = ParsedCommand::parse(&line) else {
            return Evaluation::Noop;
        };

        if self.config.streaming
            && let Some(trigger) = StreamTrigger::detect(&parsed.name, &parsed.args)
        {
            return Evaluation::Streaming(self.start_stream(line, &trigger, session));
        }

        let start = now_ms();
        let now = local_now();
        let cwd = session.cwd().to_string();
        let result = {
            let ctx = ExecContext {
                fs: &self.fs,
                scripts: &self.scripts,
                config: &self.config,
                cwd: &cwd,
                history: session.history(),
                now: &now,
            };
            execute_command(Command::parse(&parsed.name, &parsed.args), &ctx)
        };
        let duration = elapsed_ms(start);
        tracing::debug!(command = %parsed.name, duration_ms = duration, "command executed");

        session.record_history(&line);

        match result.effect {
            Effect::ClearBlocks => {
                session.clear_blocks();
                Evaluation::Cleared
            }
            effect => {
                let block = CommandBlock::completed(cwd, line, result.output, duration);
                let id = session.push_block(block);
                if let Effect::ChangeDir(path) = effect {
                    session.set_cwd(path);
                }
                Evaluation::Immediate(id)
            }
        }
    }

    fn start_stream(&self, line: String, trigger: &StreamTrigger, session: &mut Session) -> StreamTask {
        let lines = self.scripts.stream_lines(trigger, &local_now());
        let block = session.push_block(CommandBlock::streaming(session.cwd(), line.as_str()));
        tracing::debug!(%block, command = %line, lines = lines.len(), "stream started");

        session.begin_stream(InFlight {
            block,
            command: line,
            started_ms: now_ms(),
        });
        StreamTask::new(block, lines, self.config.stream_interval_ms)
    }

    /// Run queued lines until one of them starts a stream.
    fn drain_queue(&self, session: &mut Session) -> Option<StreamTask> {
        while let Some(line) = session.dequeue() {
            if let Evaluation::Streaming(task) = self.run_line(&line, session) {
                return Some(task);
            }
        }
        None
    }
}
