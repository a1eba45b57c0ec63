//! Card rendering for normalized results.

use std::fmt::Write as _;

use serde_json::Value;

use crate::domain::{FieldKind, ResultContract};

/// Render `value` as text cards, one per contract field, in contract order.
///
/// `value` is expected to conform to `contract`; missing or mistyped fields
/// render from the field fallback.
pub fn render_cards(contract: &ResultContract, value: &Value) -> String {
    let mut out = String::new();
    write_fields(&mut out, contract, value, 0);
    out
}

fn write_fields(out: &mut String, contract: &ResultContract, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    for (index, field) in contract.fields().iter().enumerate() {
        if depth == 0 && index > 0 {
            out.push('\n');
        }
        let fallback = field.fallback();
        let field_value = value.get(field.name()).unwrap_or(&fallback);
        let title = humanize(field.name());

        match field.kind() {
            FieldKind::Text { .. } => {
                let text = field_value.as_str().unwrap_or_default();
                if depth == 0 {
                    write_heading(out, &indent, &title, depth);
                    let _ = writeln!(out, "{}", text);
                } else {
                    let _ = writeln!(out, "{}{}: {}", indent, title, text);
                }
            }
            FieldKind::TextList { .. } => {
                write_heading(out, &indent, &title, depth);
                let items = field_value.as_array().map(Vec::as_slice).unwrap_or_default();
                for (n, item) in items.iter().enumerate() {
                    let _ = writeln!(out, "{}{}. {}", indent, n + 1, item.as_str().unwrap_or_default());
                }
            }
            FieldKind::Record(nested) => {
                write_heading(out, &indent, &title, depth);
                write_fields(out, nested, field_value, depth + 1);
            }
        }
    }
}

fn write_heading(out: &mut String, indent: &str, title: &str, depth: usize) {
    if depth == 0 {
        let _ = writeln!(out, "{}\n{}", title, "-".repeat(title.len()));
    } else {
        let _ = writeln!(out, "{}{}:", indent, title);
    }
}

const ACRONYMS: &[&str] = &["cta", "seo", "faq"];

/// Turn a camelCase or snake_case field name into a card title.
///
/// Known acronyms are upper-cased (`cta` -> `CTA`).
pub fn humanize(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in name.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.push(ch);
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            if ACRONYMS.contains(&word.to_lowercase().as_str()) {
                return word.to_uppercase();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
