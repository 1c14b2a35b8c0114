//! Terminal input line with history recall, tab completion, and ghost text hints.

use leptos::{ev, prelude::*};
use wasm_bindgen::JsCast;

use crate::config::INPUT_PLACEHOLDER;
use crate::core::{AutocompleteResult, HistoryDirection, HistoryRecall};

stylance::import_crate_style!(css, "src/components/terminal/input.module.css");

#[component]
pub fn Input(
    #[prop(into)] prompt: Signal<String>,
    on_submit: Callback<String>,
    on_history_nav: Callback<HistoryDirection, HistoryRecall>,
    on_autocomplete: Callback<String, AutocompleteResult>,
    on_get_hint: Callback<String, Option<String>>,
) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let (input_value, set_input_value) = signal(String::new());
    let hint = RwSignal::new(None::<String>);

    // Focus input on mount
    Effect::new(move || {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
        }
    });

    let move_cursor_to_end = move || {
        if let Some(input) = input_ref.get() {
            let len = input.value().len() as u32;
            let _ = input.set_selection_range(len, len);
        }
    };

    let recall = move |direction: HistoryDirection| {
        hint.set(None);
        match on_history_nav.run(direction) {
            HistoryRecall::Recall(line) => {
                set_input_value.set(line);
                move_cursor_to_end();
            }
            HistoryRecall::ClearInput => set_input_value.set(String::new()),
            HistoryRecall::Unchanged => {}
        }
    };

    // Accept the ghost hint when the caret sits at the end of the input
    let accept_hint = move |value: &str| -> Option<String> {
        let input = input_ref.get()?;
        let pos = input.selection_start().ok().flatten().unwrap_or(0) as usize;
        if pos != value.len() {
            return None;
        }
        let suffix = hint.get()?;
        hint.set(None);
        Some(format!("{}{}", value, suffix))
    };

    let handle_keydown = move |ev: ev::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            hint.set(None);
            on_submit.run(input_value.get());
            set_input_value.set(String::new());
        }
        "ArrowUp" => {
            ev.prevent_default();
            recall(HistoryDirection::Up);
        }
        "ArrowDown" => {
            ev.prevent_default();
            recall(HistoryDirection::Down);
        }
        "Tab" => {
            ev.prevent_default();
            if let AutocompleteResult::Single(completed) = on_autocomplete.run(input_value.get()) {
                hint.set(None);
                set_input_value.set(completed);
                move_cursor_to_end();
            }
        }
        "ArrowRight" => {
            if let Some(completed) = accept_hint(&input_value.get()) {
                ev.prevent_default();
                set_input_value.set(completed);
                move_cursor_to_end();
            }
        }
        "c" if ev.ctrl_key() => {
            hint.set(None);
            set_input_value.set(String::new());
        }
        "l" if ev.ctrl_key() => {
            ev.prevent_default();
            on_submit.run("clear".to_string());
        }
        "Escape" => hint.set(None),
        _ => {}
    };

    let handle_input = move |ev: ev::Event| {
        let Some(target) = ev.target() else { return };
        let input = target.unchecked_into::<web_sys::HtmlInputElement>();
        let value = input.value();
        set_input_value.set(value.clone());

        if value.is_empty() {
            hint.set(None);
        } else {
            hint.set(on_get_hint.run(value));
        }
    };

    view! {
        <div class=css::inputWrapper>
            <div class=css::header>{prompt}</div>
            <div class=css::line>
                <span class=css::separator>"$ "</span>
                <div class=css::field>
                    // Ghost text overlay (shows input value + hint)
                    <div class=css::ghostOverlay>
                        <span class=css::ghostText>{move || input_value.get()}</span>
                        <span class=css::ghostHint>{move || hint.get().unwrap_or_default()}</span>
                    </div>
                    <input
                        node_ref=input_ref
                        type="text"
                        class=css::input
                        data-terminal-input=""
                        placeholder=INPUT_PLACEHOLDER
                        autocomplete="off"
                        spellcheck="false"
                        prop:value=input_value
                        on:input=handle_input
                        on:keydown=handle_keydown
                    />
                </div>
            </div>
        </div>
    }
}
