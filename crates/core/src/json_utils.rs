//! JSON recovery for model output.
//!
//! Model output is not guaranteed to be clean JSON: models prepend reasoning,
//! wrap answers in markdown fences, or emit Python-style single quotes. The
//! functions here recover the `{"locations": [...]}` payload from such output
//! without ever failing — malformed output degrades to an empty list.

use std::sync::LazyLock;

use regex::Regex;

/// Non-greedy brace-delimited substrings. Sufficient for the flat
/// `{"locations": [...]}` object the extraction prompt demands.
static BRACE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*?\}").unwrap_or_else(|e| panic!("invalid regex: {e}")));

/// Strip markdown code block wrappers from JSON content.
///
/// Handles `` ```json ... ``` ``, `` ``` ... ``` ``, and other language identifiers.
#[must_use]
pub fn strip_markdown_json(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.starts_with("```") && trimmed.ends_with("```") {
        let without_prefix = trimmed.strip_prefix("```").unwrap_or(trimmed);
        let without_suffix = without_prefix.strip_suffix("```").unwrap_or(without_prefix);
        return without_suffix
            .split_once('\n')
            .map_or_else(|| without_suffix.trim(), |(_, rest)| rest.trim());
    }
    trimmed
}

/// Recover the extracted location names from raw model output.
///
/// Scans for brace-delimited substrings and takes the last one (models tend
/// to prepend reasoning before the final answer), then tries a strict JSON
/// parse followed by a repair pass (single quotes → double quotes, newlines
/// stripped). Output with no braces, unparseable JSON, or the wrong shape
/// yields an empty list — a formatting slip from the model is "no places
/// found", never an error.
#[must_use]
pub fn recover_locations(raw: &str) -> Vec<String> {
    let cleaned = strip_markdown_json(raw);
    let Some(block) = BRACE_BLOCK.find_iter(cleaned).last() else {
        return Vec::new();
    };
    let json_str = block.as_str();

    let parsed = serde_json::from_str::<serde_json::Value>(json_str).or_else(|_| {
        let repaired = json_str.replace('\'', "\"").replace('\n', "");
        serde_json::from_str::<serde_json::Value>(repaired.trim())
    });

    let value = match parsed {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "model output not recoverable as JSON, defaulting to empty");
            return Vec::new();
        },
    };

    let Some(locations) = value.as_object().and_then(|map| map.get("locations")) else {
        tracing::debug!("model output missing 'locations' key, defaulting to empty");
        return Vec::new();
    };

    locations
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
