use crate::language::Language;
use crate::ui::state::UiState;
use std::fmt::Write;

const INPUT_PLACEHOLDER: &str = "Enter text to translate...";
const OUTPUT_PLACEHOLDER: &str = "Translation will appear here...";

fn control(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("({label})")
    }
}

fn pane(out: &mut String, text: &str, placeholder: &str) {
    if text.is_empty() {
        let _ = writeln!(out, "  {placeholder}");
    } else {
        for line in text.split('\n') {
            let _ = writeln!(out, "  {line}");
        }
    }
}

/// Plain-text rendering of the form. Disabled controls are shown in
/// parentheses, enabled ones in brackets.
pub fn render(state: &UiState, api_url: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "From: {}  <->  To: {}",
        state.source_language(),
        state.target_language()
    );

    let _ = writeln!(out, "-- Input ({} characters)", state.char_count());
    pane(&mut out, state.input_text(), INPUT_PLACEHOLDER);

    let _ = writeln!(out, "-- Translation");
    pane(&mut out, state.output_text(), OUTPUT_PLACEHOLDER);

    let translate_label = if state.is_loading() {
        "Translating..."
    } else {
        "Translate"
    };
    let mut controls = vec![
        control(translate_label, state.can_submit()),
        control("Test API", state.can_run_test()),
        control("Clear", true),
    ];
    if state.can_copy() {
        controls.push(control("Copy", true));
    }
    let _ = writeln!(out, "{}", controls.join(" "));

    if let Some(error) = state.error() {
        let _ = writeln!(out, "Error: {error}");
    }

    let _ = write!(out, "API URL: {api_url}");
    out
}

/// Numbered language list for the `:langs` command.
pub fn render_languages(current_source: Language, current_target: Language) -> String {
    Language::ALL
        .iter()
        .enumerate()
        .map(|(i, lang)| {
            let marker = match (*lang == current_source, *lang == current_target) {
                (true, _) => " (from)",
                (_, true) => " (to)",
                _ => "",
            };
            format!("{:>2}. {lang}{marker}", i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
