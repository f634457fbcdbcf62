//! The generative oracle behind the reveal.
//!
//! The oracle produces the two artifacts shown on the reveal screen: the
//! birthday message and the artwork. Both prompts are fixed thematic
//! briefs; callers pass no input. The trait exists so the state machine
//! can be driven by a scripted stand-in in tests.

use async_trait::async_trait;
use gemini::Gemini;
use serde_json::json;
use thiserror::Error;

use crate::content::{BirthdayContent, GeneratedImage};

const TEXT_MODEL: &str = "gemini-2.5-flash";
const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

const MESSAGE_PROMPT: &str = include_str!("prompts/message.txt");
const ARTWORK_PROMPT: &str = include_str!("prompts/artwork.txt");

/// Errors from the oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Gemini API error: {0}")]
    Api(#[from] gemini::Error),

    #[error("message payload was not the expected JSON shape: {0}")]
    MalformedContent(#[from] serde_json::Error),

    #[error("message response contained no text")]
    EmptyContent,

    #[error("image response contained no inline image data")]
    MissingImage,
}

/// A source of generated birthday artifacts.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Generate the personalized birthday message.
    async fn birthday_message(&self) -> Result<BirthdayContent, OracleError>;

    /// Generate the artwork.
    async fn artwork(&self) -> Result<GeneratedImage, OracleError>;
}

/// Run both generations concurrently and join them.
///
/// Succeeds only if both calls succeed within this invocation. The first
/// failure wins; the other in-flight call is dropped and its eventual
/// result discarded, so no partial pair can ever escape.
pub async fn conjure(
    oracle: &dyn Oracle,
) -> Result<(BirthdayContent, GeneratedImage), OracleError> {
    tokio::try_join!(oracle.birthday_message(), oracle.artwork())
}

/// The real oracle, backed by the Gemini API.
pub struct GeminiOracle {
    client: Gemini,
}

impl GeminiOracle {
    /// Create an oracle around an already-configured client.
    pub fn new(client: Gemini) -> Self {
        Self { client }
    }

    /// Create an oracle from the GEMINI_API_KEY environment variable.
    pub fn from_env() -> Result<Self, gemini::Error> {
        Ok(Self::new(Gemini::from_env()?))
    }
}

#[async_trait]
impl Oracle for GeminiOracle {
    async fn birthday_message(&self) -> Result<BirthdayContent, OracleError> {
        let request = gemini::Request::text(MESSAGE_PROMPT)
            .with_model(TEXT_MODEL)
            .with_json_schema(message_schema());

        let response = self.client.generate(request).await?;
        parse_message(&response.text())
    }

    async fn artwork(&self) -> Result<GeneratedImage, OracleError> {
        let request = gemini::Request::text(ARTWORK_PROMPT).with_model(IMAGE_MODEL);

        let response = self.client.generate(request).await?;
        let (media_type, data) = response.inline_data().ok_or(OracleError::MissingImage)?;

        Ok(GeneratedImage {
            media_type: media_type.to_string(),
            data: data.to_string(),
        })
    }
}

/// Parse the structured message payload.
///
/// Missing or malformed JSON is a failure, never a partial success.
fn parse_message(text: &str) -> Result<BirthdayContent, OracleError> {
    if text.trim().is_empty() {
        return Err(OracleError::EmptyContent);
    }
    Ok(serde_json::from_str(text)?)
}

fn message_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "Um título estilo anime/RPG (ex: A Invocadora da Luz Eterna)"
            },
            "message": {
                "type": "STRING",
                "description": "A mensagem principal misturando carinho e referências de Dandadan."
            },
            "poem": {
                "type": "STRING",
                "description": "Um haiku ou poema curto sobre espíritos e mármore."
            }
        },
        "required": ["title", "message", "poem"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_happy_path() {
        let content =
            parse_message(r#"{"title": "t", "message": "m", "poem": "p"}"#).unwrap();
        assert_eq!(content.title, "t");
        assert_eq!(content.message, "m");
        assert_eq!(content.poem, "p");
    }

    #[test]
    fn test_parse_message_empty_is_failure() {
        assert!(matches!(parse_message("  "), Err(OracleError::EmptyContent)));
    }

    #[test]
    fn test_parse_message_incomplete_is_failure() {
        let result = parse_message(r#"{"title": "t"}"#);
        assert!(matches!(result, Err(OracleError::MalformedContent(_))));
    }

    #[test]
    fn test_message_schema_requires_all_fields() {
        let schema = message_schema();
        let required = schema["required"].as_array().unwrap();
        for field in ["title", "message", "poem"] {
            assert!(required.iter().any(|v| v == field), "missing {field}");
            assert_eq!(schema["properties"][field]["type"], "STRING");
        }
    }

    #[test]
    fn test_prompts_are_nonempty() {
        assert!(MESSAGE_PROMPT.contains("JSON"));
        assert!(!ARTWORK_PROMPT.trim().is_empty());
    }
}
