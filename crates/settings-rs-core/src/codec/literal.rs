//! Structured-literal codec.
//!
//! The format is a `return <literal>;` document whose literal is JSON5.
//! Only literal syntax is understood, and nothing in the file is ever
//! evaluated:
//!
//! ```text
//! // line and /* block */ comments are allowed
//! return {
//!     "app": {
//!         "name": "demo",
//!         "ports": [80, 443],
//!         "ratio": 0.5,
//!         "debug": false,
//!         "owner": null,
//!     },
//! };
//! ```
//!
//! Floats always carry a `.` or exponent so they stay distinct from integers;
//! `NaN`, `Infinity`, and `-Infinity` spell the non-finite values. Trailing
//! commas, unquoted keys, and single-quoted strings are accepted on input.

use super::{Codec, Format};
use crate::{SettingsError, SettingsTree, Value};
use std::fmt::Write as _;

const HEADER: &str = "// settings literal: parsed as data, never executed";
const RETURN_KEYWORD: &str = "return";
const INDENT: &str = "    ";

/// `return { ... };` literal documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralCodec;

impl Codec for LiteralCodec {
    fn format(&self) -> Format {
        Format::Structured
    }

    fn encode(&self, tree: &SettingsTree) -> Result<String, SettingsError> {
        let mut out = String::with_capacity(64);
        out.push_str(HEADER);
        out.push('\n');
        out.push_str(RETURN_KEYWORD);
        out.push(' ');
        write_map(&mut out, tree, 0);
        out.push_str(";\n");
        Ok(out)
    }

    fn decode(&self, contents: &str) -> Result<Value, SettingsError> {
        Ok(json5::from_str(&unwrap_document(contents))?)
    }
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Integer(number) => {
            let _ = write!(out, "{number}");
        }
        Value::Float(number) => write_float(out, *number),
        Value::String(text) => write_string(out, text),
        Value::List(items) => write_list(out, items, depth),
        Value::Map(map) => write_map(out, map, depth),
    }
}

fn write_map(out: &mut String, map: &SettingsTree, depth: usize) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for (key, value) in map {
        push_indent(out, depth + 1);
        write_string(out, key);
        out.push_str(": ");
        write_value(out, value, depth + 1);
        out.push_str(",\n");
    }
    push_indent(out, depth);
    out.push('}');
}

fn write_list(out: &mut String, items: &[Value], depth: usize) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push_str("[\n");
    for item in items {
        push_indent(out, depth + 1);
        write_value(out, item, depth + 1);
        out.push_str(",\n");
    }
    push_indent(out, depth);
    out.push(']');
}

fn write_float(out: &mut String, number: f64) {
    if number.is_nan() {
        out.push_str("NaN");
    } else if number.is_infinite() {
        out.push_str(if number > 0.0 { "Infinity" } else { "-Infinity" });
    } else {
        // Debug keeps a trailing `.0` on whole numbers.
        let _ = write!(out, "{number:?}");
    }
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(ch));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Blank out the `return` keyword and the trailing `;` so the positions
/// reported by the JSON5 parser still point into the original document.
fn unwrap_document(contents: &str) -> String {
    let mut body = contents.to_string();
    let start = leading_trivia_len(contents);
    let has_keyword = contents[start..]
        .strip_prefix(RETURN_KEYWORD)
        .is_some_and(|after| !after.starts_with(|ch: char| ch.is_alphanumeric() || ch == '_'));
    if has_keyword {
        body.replace_range(
            start..start + RETURN_KEYWORD.len(),
            &" ".repeat(RETURN_KEYWORD.len()),
        );
    }
    let end = body.trim_end().len();
    if body[..end].ends_with(';') {
        body.replace_range(end - 1..end, " ");
    }
    body
}

/// Length of the whitespace and comments before the first token.
fn leading_trivia_len(contents: &str) -> usize {
    let mut rest = contents;
    loop {
        let trimmed = rest.trim_start();
        if let Some(comment) = trimmed.strip_prefix("//") {
            rest = comment.find('\n').map_or("", |end| &comment[end..]);
        } else if let Some(end) = trimmed
            .strip_prefix("/*")
            .and_then(|comment| comment.find("*/"))
        {
            rest = &trimmed[end + 4..];
        } else {
            return contents.len() - trimmed.len();
        }
    }
}
