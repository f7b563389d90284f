use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// Matches {{name}}, {name} and [name]; the double-brace form is tried first.
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([^}]+)\}\}|\{([^}]+)\}|\[([^\]]+)\]").expect("valid variable regex")
});

/// How many of a prompt's placeholders have been mapped to an input.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VariableStatus {
    /// The prompt has no placeholders.
    None,
    Unmapped,
    Partial,
    Mapped,
}

/// Returns the distinct placeholder names in `text`, in first-seen order.
pub fn detect_variables(text: &str) -> Vec<String> {
    VARIABLE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
        .unique()
        .map(str::to_string)
        .collect()
}

/// Compares detected placeholders against the names mapped so far.
pub fn variable_status(variables: &[String], mapped: &[String]) -> VariableStatus {
    if variables.is_empty() {
        return VariableStatus::None;
    }
    let mapped_count = variables.iter().filter(|v| mapped.contains(v)).count();
    match mapped_count {
        0 => VariableStatus::Unmapped,
        n if n == variables.len() => VariableStatus::Mapped,
        _ => VariableStatus::Partial,
    }
}
