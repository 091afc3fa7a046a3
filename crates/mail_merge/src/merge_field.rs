//! `{{field}}` tokens in template text

use crate::PlaceholderValues;
use regex_lite::{Captures, Regex};
use std::sync::OnceLock;

fn token_pattern() -> Option<&'static Regex> {
    static TOKEN: OnceLock<Option<Regex>> = OnceLock::new();
    TOKEN
        .get_or_init(|| Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").ok())
        .as_ref()
}

/// Replace every known token in `text`. Unknown tokens stay as written.
pub fn substitute(text: &str, values: &PlaceholderValues) -> String {
    let Some(re) = token_pattern() else {
        return text.to_string();
    };
    re.replace_all(text, |caps: &Captures<'_>| match values.get(&caps[1]) {
        Some(value) => value.to_string(),
        None => caps[0].to_string(),
    })
    .into_owned()
}

/// Field names of every token in `text`, in order of appearance
pub fn placeholder_names(text: &str) -> Vec<String> {
    let Some(re) = token_pattern() else {
        return Vec::new();
    };
    re.captures_iter(text).map(|caps| caps[1].to_string()).collect()
}
