use leptos::prelude::*;

use crate::app::AppContext;
use crate::models::{BlockId, CommandBlock, LineStyle};
use crate::utils::{dom, format_prompt};

stylance::import_crate_style!(css, "src/components/terminal/block.module.css");

/// Get CSS class for a LineStyle
fn style_class(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Plain => css::textFg,
        LineStyle::Modified => css::textRed,
        LineStyle::Deleted => css::textDarkRed,
        LineStyle::Added | LineStyle::Branch => css::textGreen,
        LineStyle::Markdown => css::textBlue,
        LineStyle::Script => css::textCyan,
        LineStyle::Asset => css::textPurple,
        LineStyle::Commit | LineStyle::Section => css::textYellow,
        LineStyle::Hint | LineStyle::Meta => css::textDim,
    }
}

fn line_class(line: &str) -> String {
    let style = LineStyle::classify(line);
    if style.is_emphasized() {
        format!("{} {} {}", css::line, style_class(style), css::fontBold)
    } else {
        format!("{} {}", css::line, style_class(style))
    }
}

/// One command block, looked up by ID so streamed output re-renders in place.
#[component]
pub fn Block(id: BlockId) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    // Finished blocks are immutable: keep the value and stop tracking the session
    let block = Memo::new_owning(move |prev: Option<Option<CommandBlock>>| match prev {
        Some(Some(done)) if !done.streaming => (Some(done), false),
        _ => (ctx.session.with(|s| s.block(id).cloned()), true),
    });
    let (home, branch) = ctx.interpreter.with_value(|interp| {
        (interp.fs().home().to_string(), interp.config().branch.clone())
    });

    move || {
        block
            .get()
            .map(|block| render_block(block, &home, &branch))
    }
}

fn render_block(block: CommandBlock, home: &str, branch: &str) -> impl IntoView + use<> {
    let prompt = format_prompt(&block.cwd, home, branch, block.duration_ms);
    let copy_text = block.output_text();

    let body = if block.streaming {
        view! {
            <pre class=css::partial>
                {block.partial.unwrap_or_default()}
                <span class=css::cursor></span>
            </pre>
        }
        .into_any()
    } else {
        block
            .output
            .into_iter()
            .map(|line| {
                let class = line_class(&line);
                view! { <div class=class>{line}</div> }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class=css::block data-block-id=block.id.to_string()>
            <div class=css::header>
                <span class=css::prompt>{prompt}</span>
                <button
                    class=css::copy
                    on:click=move |_| {
                        dom::copy_to_clipboard(&copy_text);
                    }
                >
                    "Copy Output"
                </button>
            </div>
            <div class=css::command>
                <span class=css::caret>"$ "</span>
                {block.command}
            </div>
            <div class=css::output>{body}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_class() {
        let plain = line_class("hello");
        assert!(plain.starts_with(css::line));
        assert!(plain.contains(css::textFg));

        let modified = line_class("    modified:   package.json");
        assert!(modified.contains(css::textRed));
    }
}
