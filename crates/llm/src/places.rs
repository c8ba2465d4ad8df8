//! Place-name extraction: structured `{"locations": [...]}` output.

use placelore_core::json_utils::recover_locations;

use crate::client::{GenerationClient, GenerationOptions};
use crate::error::GenerationError;

const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are a precise information extraction assistant.
Your task is to extract location names mentioned in the text.
Follow these rules strictly:
- Only include complete location names (e.g., "Palace of Versailles", not "Palace of").
- Do not include partial, cut-off, or single generic words like "Palace", "Temple", or "Mount".
- Each location must be a proper noun (historical or geographical name).
- Return results ONLY as a valid JSON object of strings, with no explanation or extra text.
{"locations": ["Location1", "Location2", "Location3"]}

If no valid location names are found, return {"locations": []}."#;

fn extraction_user_prompt(text: &str) -> String {
    format!(
        "Extract all complete location names mentioned in the text below.\n\n\
         TEXT:\n{text}\n\n\
         OUTPUT:"
    )
}

impl GenerationClient {
    /// Extract complete proper-noun location names from `text`.
    ///
    /// The model's raw output goes through the JSON recovery pass: malformed
    /// output degrades to an empty list rather than an error, because the
    /// generation itself succeeded.
    ///
    /// # Errors
    /// Only engine failures from [`GenerationClient::chat`]; never parse
    /// failures.
    pub async fn extract_places(&self, text: &str) -> Result<Vec<String>, GenerationError> {
        let user = extraction_user_prompt(text);
        let output =
            self.chat(EXTRACTION_SYSTEM_PROMPT, &user, GenerationOptions::extraction()).await?;
        Ok(recover_locations(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_text() {
        let prompt = extraction_user_prompt("Versailles was built in 1661");
        assert!(prompt.contains("TEXT:\nVersailles was built in 1661"));
        assert!(prompt.ends_with("OUTPUT:"));
    }

    #[test]
    fn test_system_prompt_demands_json_shape() {
        assert!(EXTRACTION_SYSTEM_PROMPT.contains(r#"{"locations": []}"#));
        assert!(EXTRACTION_SYSTEM_PROMPT.contains("proper noun"));
    }
}
