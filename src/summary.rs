//! Summary request and result types shared by the agent, the HTTP layer and the client.

use serde::{Deserialize, Serialize};

/// Default lower bound of the requested summary length, in characters
pub const DEFAULT_MIN_LENGTH: u32 = 200;

/// Default upper bound of the requested summary length, in characters
pub const DEFAULT_MAX_LENGTH: u32 = 500;

/// Output language of a summary.
///
/// Only `"id"` selects Indonesian; any other code falls back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    Indonesian,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Indonesian => "id",
            Language::English => "en",
        }
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::from(code.as_str())
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        match code {
            "id" => Language::Indonesian,
            _ => Language::English,
        }
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

/// Body of `POST /api/ai/summarize` as it arrives on the wire.
///
/// Every field is optional here; [`SummaryRequest::from_body`] applies defaults
/// and rejects bodies without usable text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

/// A validated summarization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    /// Descriptive text about the book
    pub text: String,
    /// Lower bound of the summary length, in characters
    pub min_length: u32,
    /// Upper bound of the summary length, in characters
    pub max_length: u32,
    /// Output language
    pub language: Language,
}

impl SummaryRequest {
    /// Create a request with default length band and language
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            language: Language::default(),
        }
    }

    pub fn with_length(mut self, min_length: u32, max_length: u32) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Build a request from a wire body, filling in defaults for omitted fields.
    ///
    /// Text presence is checked later by the agent so that a blank body and a
    /// blank programmatic request fail the same way.
    pub fn from_body(body: SummarizeBody) -> Self {
        Self {
            text: body.text.unwrap_or_default(),
            min_length: body.min_length.unwrap_or(DEFAULT_MIN_LENGTH),
            max_length: body.max_length.unwrap_or(DEFAULT_MAX_LENGTH),
            language: body.language.unwrap_or_default(),
        }
    }

    pub fn to_body(&self) -> SummarizeBody {
        SummarizeBody {
            text: Some(self.text.clone()),
            min_length: Some(self.min_length),
            max_length: Some(self.max_length),
            language: Some(self.language),
        }
    }
}

/// A generated summary and the model that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Trimmed summary text
    pub text: String,
    /// Identifier of the model that answered
    pub model: String,
    /// Length of `text` in UTF-16 code units
    pub length: usize,
}

impl Summary {
    pub fn new(text: String, model: String) -> Self {
        let length = text.encode_utf16().count();
        Self {
            text,
            model,
            length,
        }
    }
}

/// Success body of `POST /api/ai/summarize`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub success: bool,
    pub summary: String,
    pub model: String,
    pub length: usize,
}

impl From<Summary> for SummaryResponse {
    fn from(summary: Summary) -> Self {
        Self {
            success: true,
            summary: summary.text,
            model: summary.model,
            length: summary.length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_empty_body() {
        let body: SummarizeBody = serde_json::from_str(r#"{"text":"A wizard boy"}"#).unwrap();
        let request = SummaryRequest::from_body(body);

        assert_eq!(request.min_length, 200);
        assert_eq!(request.max_length, 500);
        assert_eq!(request.language, Language::Indonesian);
    }

    #[test]
    fn test_explicit_fields_pass_through() {
        let body: SummarizeBody = serde_json::from_str(
            r#"{"text":"A wizard boy","minLength":50,"maxLength":100,"language":"en"}"#,
        )
        .unwrap();
        let request = SummaryRequest::from_body(body);

        assert_eq!(request.min_length, 50);
        assert_eq!(request.max_length, 100);
        assert_eq!(request.language, Language::English);
    }

    #[test]
    fn test_unknown_language_code_means_english() {
        assert_eq!(Language::from("fr"), Language::English);
        assert_eq!(Language::from("ID"), Language::English);
        assert_eq!(Language::from("id"), Language::Indonesian);
    }

    #[test]
    fn test_length_counts_utf16_units() {
        let summary = Summary::new("née 😀".to_string(), "m".to_string());
        assert_eq!(summary.length, 6);
    }
}
