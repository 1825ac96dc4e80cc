//! AsciiDoc rendering of documented entries

use crate::model::{Entry, InstrumentKind, KeyGroup};

const HEADING_PREFIX: &str = "==== ";
const DYNAMIC_NAME_SENTENCE: &str =
    " - since it contains `%s`, the name is dynamic and will be resolved at runtime.";

/// Section title derived from an entry identifier.
///
/// `HTTP_CLIENT` and `HTTP_CLIENT_SPAN` both become `Http Client Span`.
pub fn title(identifier: &str, kind: InstrumentKind) -> String {
    let spaced = identifier.replace('_', " ");
    let mut tokens: Vec<&str> = spaced.split(' ').collect();
    // Trailing separators add no words
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }
    let title = tokens
        .into_iter()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    let word = kind.title_word();
    if title.to_lowercase().ends_with(&word.to_lowercase()) {
        title
    } else {
        format!("{} {}", title, word)
    }
}

fn capitalize(token: &str) -> String {
    let lower = token.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders one entry as a self-contained block without a trailing newline
pub fn render(entry: &Entry) -> String {
    let kind = entry.kind();
    let mut blocks = vec![
        format!("{}{}", HEADING_PREFIX, title(entry.identifier(), kind)),
        format!("> {}", entry.description()),
        name_line(entry),
        format!(
            "Fully qualified name of the enclosing class `{}`",
            entry.enclosing_type()
        ),
    ];

    if let Some(overrides) = entry.overrides_default_from() {
        blocks.push(format!(
            "NOTE: Overrides the default {} `{}` from `{}`.",
            kind, overrides.identifier, overrides.enclosing_type
        ));
    }

    if let Some(prefix) = entry.prefix() {
        blocks.push(format!(
            "IMPORTANT: All tags and event names must be prefixed with `{}` prefix!",
            prefix
        ));
    }

    for (caption, group) in entry.tag_keys().groups() {
        if !group.is_empty() {
            blocks.push(table(caption, group));
        }
    }

    if !entry.events().is_empty() {
        blocks.push(table("Event Values", entry.events()));
    }

    blocks.join("\n\n")
}

fn name_line(entry: &Entry) -> String {
    let label = match entry.kind() {
        InstrumentKind::Span => "Span name",
        InstrumentKind::Meter => "Metric name",
    };
    let mut line = format!("**{}** `{}`", label, entry.display_name());
    if entry.has_dynamic_name() {
        line.push_str(DYNAMIC_NAME_SENTENCE);
    } else {
        line.push('.');
    }

    let meter = entry.meter();
    if let Some(meter_type) = &meter.meter_type {
        line.push_str(&format!(" *Type* `{}`.", meter_type));
    }
    if let Some(base_unit) = &meter.base_unit {
        line.push_str(&format!(" *Base unit* `{}`.", base_unit));
    }
    line
}

fn table(caption: &str, keys: &KeyGroup) -> String {
    let rows = keys
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    format!(".{}\n|===\n|Name | Description\n{}\n|===", caption, rows)
}
