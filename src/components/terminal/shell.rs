//! Warp window body.
//!
//! Renders the block list, the active prompt with its input line, and the
//! footer. Streaming commands are driven here on `spawn_local`, one
//! `gloo-timers` delay per revealed line.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

use super::{Block, Input};
use crate::app::AppContext;
use crate::config::APP_NAME;
use crate::core::{
    Evaluation, HistoryDirection, HistoryRecall, StreamTask, autocomplete, drive, get_hint,
};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/terminal/shell.module.css");

// ============================================================================
// Streaming
// ============================================================================

/// Drive a stream task against the window's session.
///
/// Events are applied with `try_update`, so a closed window stops the task
/// instead of touching a disposed signal. A queued line that starts another
/// stream is driven next.
fn spawn_stream(ctx: AppContext, task: StreamTask) {
    ctx.stream.set_value(Some(task.cancel_token()));

    wasm_bindgen_futures::spawn_local(async move {
        let mut next = None;
        drive(task, TimeoutFuture::new, |event| {
            let applied = ctx
                .interpreter
                .try_with_value(|interp| {
                    ctx.session
                        .try_update(|session| interp.on_stream_event(session, event))
                })
                .flatten();
            match applied {
                Some(follow) => {
                    if follow.is_some() {
                        next = follow;
                    }
                    true
                }
                None => {
                    #[cfg(target_arch = "wasm32")]
                    web_sys::console::warn_1(&"Window closed, stopping stream".into());
                    false
                }
            }
        })
        .await;

        match next {
            Some(task) => spawn_stream(ctx, task),
            None => {
                ctx.stream.try_set_value(None);
            }
        }
    });
}

// ============================================================================
// Shell Component
// ============================================================================

#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let output_ref = NodeRef::<leptos::html::Div>::new();

    on_cleanup(move || ctx.cancel_stream());

    // Auto-scroll to the newest block whenever the session changes
    Effect::new(move || {
        ctx.session.track();
        if let Some(el) = output_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let prompt = Signal::derive(move || ctx.prompt());
    let block_ids = move || ctx.session.with(|s| s.blocks().map(|b| b.id).collect::<Vec<_>>());
    let block_count = move || ctx.session.with(|s| s.block_count());
    let streaming = move || ctx.session.with(|s| s.is_streaming());

    let on_submit = create_submit_callback(ctx);
    let on_history_nav = Callback::new(move |direction: HistoryDirection| {
        ctx.session
            .try_update(|s| s.navigate_history(direction))
            .unwrap_or(HistoryRecall::Unchanged)
    });
    let on_autocomplete = Callback::new(|input: String| autocomplete(&input));
    let on_get_hint = Callback::new(|input: String| get_hint(&input));

    view! {
        <div class=css::container on:click=move |_| dom::focus_terminal_input()>
            <div node_ref=output_ref class=css::output>
                <For
                    each=block_ids
                    key=|id| *id
                    children=|id| view! { <Block id=id /> }
                />
            </div>

            <div class=css::inputArea>
                <Input
                    prompt=prompt
                    on_submit=on_submit
                    on_history_nav=on_history_nav
                    on_autocomplete=on_autocomplete
                    on_get_hint=on_get_hint
                />
            </div>

            <div class=css::footer>
                <span class=css::footerItem>{APP_NAME}</span>
                <span class=css::footerItem>
                    {move || match block_count() {
                        1 => "1 block".to_string(),
                        n => format!("{} blocks", n),
                    }}
                </span>
                <Show when=streaming fallback=|| ()>
                    <span class=css::streamingBadge>"running"</span>
                </Show>
            </div>
        </div>
    }
}

// ============================================================================
// Callback Factories
// ============================================================================

fn create_submit_callback(ctx: AppContext) -> Callback<String> {
    Callback::new(move |input: String| {
        let evaluation = ctx
            .interpreter
            .try_with_value(|interp| ctx.session.try_update(|s| interp.evaluate(&input, s)))
            .flatten();

        if let Some(Evaluation::Streaming(task)) = evaluation {
            spawn_stream(ctx, task);
        }
    })
}

