//! Purpose: Render the pretty summary with optional ANSI colorization for terminals.
//! Exports: colorize_json.
//! Role: Small, pure formatter used by the stdout emission path.
//! Invariants: When color is disabled, output equals serde_json pretty output with the same indent.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use serde_json::{Map, Value};

// Conservative 8/16-color palette for broad terminal compatibility.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";
const COLOR_PUNCT: &str = "39";

struct Style<'a> {
    indent: &'a str,
    use_color: bool,
}

pub fn colorize_json(value: &Value, indent: &str, use_color: bool) -> String {
    let style = Style { indent, use_color };
    let mut out = String::new();
    style.write_value(value, 0, &mut out);
    out
}

impl Style<'_> {
    fn write_value(&self, value: &Value, depth: usize, out: &mut String) {
        match value {
            Value::Null => self.push_colored("null", COLOR_NULL, out),
            Value::Bool(val) => {
                let text = if *val { "true" } else { "false" };
                self.push_colored(text, COLOR_BOOL, out);
            }
            Value::Number(num) => self.push_colored(&num.to_string(), COLOR_NUMBER, out),
            Value::String(text) => self.push_colored(&encode_str(text), COLOR_STRING, out),
            Value::Array(items) => self.write_array(items, depth, out),
            Value::Object(map) => self.write_object(map, depth, out),
        }
    }

    fn write_array(&self, items: &[Value], depth: usize, out: &mut String) {
        if items.is_empty() {
            self.push_colored("[]", COLOR_PUNCT, out);
            return;
        }
        self.push_colored("[", COLOR_PUNCT, out);
        out.push('\n');
        for (idx, item) in items.iter().enumerate() {
            self.push_indent(depth + 1, out);
            self.write_value(item, depth + 1, out);
            if idx + 1 < items.len() {
                self.push_colored(",", COLOR_PUNCT, out);
            }
            out.push('\n');
        }
        self.push_indent(depth, out);
        self.push_colored("]", COLOR_PUNCT, out);
    }

    fn write_object(&self, map: &Map<String, Value>, depth: usize, out: &mut String) {
        if map.is_empty() {
            self.push_colored("{}", COLOR_PUNCT, out);
            return;
        }
        self.push_colored("{", COLOR_PUNCT, out);
        out.push('\n');
        let len = map.len();
        for (idx, (key, value)) in map.iter().enumerate() {
            self.push_indent(depth + 1, out);
            self.push_colored(&encode_str(key), COLOR_KEY, out);
            self.push_colored(":", COLOR_PUNCT, out);
            out.push(' ');
            self.write_value(value, depth + 1, out);
            if idx + 1 < len {
                self.push_colored(",", COLOR_PUNCT, out);
            }
            out.push('\n');
        }
        self.push_indent(depth, out);
        self.push_colored("}", COLOR_PUNCT, out);
    }

    fn push_indent(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str(self.indent);
        }
    }

    fn push_colored(&self, text: &str, color: &str, out: &mut String) {
        if !self.use_color {
            out.push_str(text);
            return;
        }
        out.push_str("\u{1b}[");
        out.push_str(color);
        out.push('m');
        out.push_str(text);
        out.push_str("\u{1b}[0m");
    }
}

fn encode_str(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}
