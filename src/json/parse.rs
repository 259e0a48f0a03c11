//! Purpose: Provide the runtime JSON decode entrypoint and parse-failure categories.
//! Exports: `from_slice`, `ParseFailureCategory`, `categorize_error`, `categorize_message`, `hint_for_error`.
//! Role: Parser boundary so report loading never calls serde_json ad hoc.
//! Invariants: Category labels are stable; callers may surface them to users.
//! Invariants: Hints carry category and context only, never input payload bytes.
//! Notes: Error mapping onto the crate error model is done by callsites.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Truncated,
    NumericRange,
    Utf8,
    DepthLimit,
    Unknown,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Truncated => "truncated",
            ParseFailureCategory::NumericRange => "numeric-range",
            ParseFailureCategory::Utf8 => "utf8",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::Unknown => "unknown",
        }
    }
}

pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(input)
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match categorize_message(&err.to_string()) {
        ParseFailureCategory::Unknown => match err.classify() {
            Category::Eof => ParseFailureCategory::Truncated,
            Category::Syntax => ParseFailureCategory::Syntax,
            Category::Io | Category::Data => ParseFailureCategory::Unknown,
        },
        category => category,
    }
}

pub fn categorize_message(message: &str) -> ParseFailureCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("recursion limit") {
        ParseFailureCategory::DepthLimit
    } else if lower.contains("number out of range") {
        ParseFailureCategory::NumericRange
    } else if lower.contains("unicode") || lower.contains("utf-8") || lower.contains("utf8") {
        ParseFailureCategory::Utf8
    } else {
        ParseFailureCategory::Unknown
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    let category = categorize_error(err);
    let advice = match category {
        ParseFailureCategory::Truncated => "the report ends early; was the benchmark run interrupted?",
        ParseFailureCategory::DepthLimit => "the report nests deeper than the parser allows",
        ParseFailureCategory::NumericRange => "a number does not fit in a 64-bit float",
        ParseFailureCategory::Utf8 => "the report is not valid UTF-8",
        ParseFailureCategory::Syntax | ParseFailureCategory::Unknown => {
            "check the report is a complete JSON document"
        }
    };
    format!(
        "Report is not valid JSON ({advice}). parse category: {}; context: {context}",
        category.label()
    )
}
