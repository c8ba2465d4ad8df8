//! History synthesis: one grounded paragraph per place.

use crate::client::{GenerationClient, GenerationOptions};
use crate::error::GenerationError;

fn history_system_prompt(location: &str, context: &str) -> String {
    format!(
        "You are a historian assistant. You will produce exactly one paragraph. \
         You must use only the information in the CONTEXT below and must not add any external knowledge.\n\n\
         CONTEXT:\n{context}\n\n\
         WRITING INSTRUCTIONS:\n\
         - Write a concise history of {location} in one paragraph.\n\
         - Use ONLY the given context.\n\
         - Do NOT invent or assume any details.\n\
         - Output ONLY the paragraph, no extra commentary."
    )
}

impl GenerationClient {
    /// Synthesize a one-paragraph history of `location`, grounded strictly
    /// in `context` (the raw search results, embedded verbatim).
    ///
    /// # Errors
    /// [`GenerationError::EmptyOutput`] if the engine produced nothing after
    /// stripping; otherwise any engine failure from [`GenerationClient::chat`].
    pub async fn write_history(
        &self,
        location: &str,
        context: &str,
    ) -> Result<String, GenerationError> {
        let system = history_system_prompt(location, context);
        let output = self.chat(&system, "Answer:", GenerationOptions::prose()).await?;
        let history = output.trim();
        if history.is_empty() {
            return Err(GenerationError::EmptyOutput);
        }
        Ok(history.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_context_and_location() {
        let prompt = history_system_prompt("Paris", "[{\"content\":\"snippet\"}]");
        assert!(prompt.contains("CONTEXT:\n[{\"content\":\"snippet\"}]"));
        assert!(prompt.contains("concise history of Paris"));
        assert!(prompt.contains("no extra commentary"));
    }
}
