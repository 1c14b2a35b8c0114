//! Root application module.
//!
//! Contains the main App component and the AppContext shared by the
//! terminal window components.

use leptos::prelude::*;

use crate::components::Shell;
use crate::config::TerminalConfig;
use crate::core::{CancelToken, Interpreter, Session};
use crate::utils::format_prompt;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// The interpreter is immutable once built and lives in a [`StoredValue`];
/// everything a command can change lives in the [`Session`] signal.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos handles, which are
/// cheap to copy (they're just pointers to the underlying reactive state).
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Session state of this window (cwd, history, blocks).
    pub session: RwSignal<Session>,
    /// Filesystem, transcripts and configuration.
    pub interpreter: StoredValue<Interpreter>,
    /// Cancellation handle of the stream currently being driven.
    pub stream: StoredValue<Option<CancelToken>>,
}

impl AppContext {
    /// Creates a context with a fresh session in the configured directory.
    pub fn new(interpreter: Interpreter) -> Self {
        let session = interpreter.session();
        Self {
            session: RwSignal::new(session),
            interpreter: StoredValue::new(interpreter),
            stream: StoredValue::new(None),
        }
    }

    /// Prompt header of the input line (e.g. `~/warp git:(main)`).
    pub fn prompt(&self) -> String {
        let cwd = self.session.with(|s| s.cwd().to_string());
        self.interpreter
            .with_value(|interp| format_prompt(&cwd, interp.fs().home(), &interp.config().branch, None))
    }

    /// Stop the stream in flight, if any.
    pub fn cancel_stream(&self) {
        if let Some(Some(token)) = self.stream.try_get_value() {
            token.cancel();
        }
    }
}

/// Root application component.
///
/// Builds the interpreter over the bundled filesystem and provides the
/// [`AppContext`]. A configuration that fails validation renders an error
/// screen instead of the terminal.
#[component]
pub fn App() -> impl IntoView {
    match Interpreter::embedded(TerminalConfig::default()) {
        Ok(interpreter) => {
            provide_context(AppContext::new(interpreter));
            view! { <Shell /> }.into_any()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to build interpreter");
            #[cfg(target_arch = "wasm32")]
            web_sys::console::error_1(&format!("Terminal failed to start: {}", e).into());
            view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100%;
                    padding: 2rem;
                    background: #1e1e1e;
                    color: #d4d4d4;
                    font-family: 'SF Mono', Menlo, monospace;
                ">
                    <h1 style="color: #f14c4c; margin-bottom: 1rem;">
                        "Terminal failed to start"
                    </h1>
                    <pre style="color: #a0a0a0;">{e.to_string()}</pre>
                </div>
            }
            .into_any()
        }
    }
}
