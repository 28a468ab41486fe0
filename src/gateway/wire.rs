//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Requests carry one or more [`Content`] blocks whose parts are either
//! text or inline binary data; responses come back as candidates whose
//! parts are inspected through the typed [`PartPayload`] view.

use std::collections::BTreeMap;

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Top-level body for a `generateContent` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Ordered message contents.
    pub contents: Vec<Content>,
    /// Optional generation parameters and output-shape constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Creates a single-shot request from one ordered list of parts.
    pub fn single_shot(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { parts }],
            generation_config: None,
        }
    }

    /// Attaches a generation config to the request.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// A message content block holding ordered parts.
#[derive(Debug, Serialize)]
pub struct Content {
    /// Ordered request parts.
    pub parts: Vec<Part>,
}

/// A request part - either text or inline binary data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    /// Plain text part.
    Text {
        /// The text content.
        text: String,
    },
    /// Inline binary part.
    Inline {
        /// The embedded payload.
        inline_data: InlineData,
    },
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates an inline binary part, base64-encoding the raw bytes.
    pub fn inline_image(data: &[u8], mime_type: impl Into<String>) -> Self {
        Self::Inline {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: base64::engine::general_purpose::STANDARD.encode(data),
            },
        }
    }
}

/// Base64-encoded binary data tagged with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the embedded payload.
    pub mime_type: String,
    /// Base64-encoded payload bytes.
    pub data: String,
}

/// Generation parameters recognized by the gateway.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature; higher values favor variety over determinism.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Forces the output MIME type, e.g. `application/json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Output-shape constraint biasing generation toward a parseable structure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Schema>,
}

/// JSON type tag used inside an output-shape constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    /// A JSON string.
    String,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

/// Output-shape constraint for structured generation.
///
/// Advisory to the gateway's generation process; the crate-side validator
/// is the serde decode of the target record type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// JSON type of this node.
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Human-readable description of the intended content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Element shape for array nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Field shapes for object nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    /// Mandatory field names for object nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl Schema {
    /// A string field with a content description.
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            schema_type: SchemaType::String,
            description: Some(description.into()),
            items: None,
            properties: None,
            required: None,
        }
    }

    /// An array-of-string field with a content description.
    pub fn string_array(description: impl Into<String>) -> Self {
        Self {
            schema_type: SchemaType::Array,
            description: Some(description.into()),
            items: Some(Box::new(Self {
                schema_type: SchemaType::String,
                description: None,
                items: None,
                properties: None,
                required: None,
            })),
            properties: None,
            required: None,
        }
    }

    /// An object with the given named fields, all of them required.
    pub fn object(fields: Vec<(&str, Schema)>) -> Self {
        let properties: BTreeMap<String, Schema> = fields
            .into_iter()
            .map(|(name, schema)| (name.to_string(), schema))
            .collect();
        let required = properties.keys().cloned().collect();
        Self {
            schema_type: SchemaType::Object,
            description: None,
            items: None,
            properties: Some(properties),
            required: Some(required),
        }
    }
}

/// Response body of a `generateContent` call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate completions, usually exactly one.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Feedback on the prompt itself, present when it was blocked.
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's text parts.
    ///
    /// Returns `None` when there is no candidate, no content, or no text
    /// part at all.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let joined: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

/// One candidate completion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The candidate's content, absent when generation was cut short.
    #[serde(default)]
    pub content: Option<ResponseContent>,
    /// Why generation stopped, e.g. `STOP` or a safety reason.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Prompt-level feedback returned alongside an HTTP 200.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Block reason code, present when the prompt was rejected.
    #[serde(default)]
    pub block_reason: Option<String>,
    /// Human-readable block explanation.
    #[serde(default)]
    pub block_reason_message: Option<String>,
}

/// Content block of a response candidate.
#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    /// Ordered response parts.
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A raw response part; at most one of the fields is populated in practice.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    /// Text payload, if this is a text part.
    #[serde(default)]
    pub text: Option<String>,
    /// Inline binary payload, if this is a binary part.
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

impl ResponsePart {
    /// Converts the raw part into its typed payload.
    ///
    /// A part carrying both fields resolves to the binary payload. Parts
    /// carrying neither (e.g. pure thought parts) resolve to `None`.
    pub fn into_payload(self) -> Option<PartPayload> {
        if let Some(inline) = self.inline_data {
            return Some(PartPayload::InlineBinary {
                mime_type: inline.mime_type,
                data: inline.data,
            });
        }
        self.text.map(PartPayload::Text)
    }
}

/// Typed view of a response part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartPayload {
    /// A text part.
    Text(String),
    /// An inline binary part, still base64-encoded.
    InlineBinary {
        /// MIME type reported by the gateway.
        mime_type: String,
        /// Base64-encoded payload bytes.
        data: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_part_serialization() {
        let part = Part::text("hello");
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value, json!({"text": "hello"}));
    }

    #[test]
    fn test_inline_part_serialization() {
        let part = Part::inline_image(b"abc", "image/png");
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value["inline_data"]["mimeType"], "image/png");
        assert_eq!(value["inline_data"]["data"], "YWJj");
    }

    #[test]
    fn test_request_serialization_uses_camel_case() {
        let request = GenerateContentRequest::single_shot(vec![Part::text("hi")]).with_config(
            GenerationConfig {
                temperature: Some(0.7),
                response_mime_type: Some("application/json".into()),
                response_schema: None,
            },
        );
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("generationConfig").is_some());
        assert!(value.get("generation_config").is_none());
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_config_omits_unset_fields() {
        let request = GenerateContentRequest::single_shot(vec![Part::text("hi")]);
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_schema_serialization() {
        let schema = Schema::object(vec![
            ("titles", Schema::string_array("5 titles")),
            ("shortTitle", Schema::string("1 short title")),
        ]);
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value["type"], "OBJECT");
        assert_eq!(value["properties"]["titles"]["type"], "ARRAY");
        assert_eq!(value["properties"]["titles"]["items"]["type"], "STRING");
        assert_eq!(value["properties"]["shortTitle"]["type"], "STRING");

        let required = value["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
        assert!(required.contains(&json!("titles")));
        assert!(required.contains(&json!("shortTitle")));
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": {
                            "mimeType": "image/png",
                            "data": "iVBORw0KGgo="
                        }
                    }]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.candidates.len(), 1);
        assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));

        let content = resp.candidates[0].content.as_ref().unwrap();
        let inline = content.parts[0].inline_data.as_ref().unwrap();
        assert_eq!(inline.mime_type, "image/png");
    }

    #[test]
    fn test_text_joins_parts_of_first_candidate() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "{\"a\":"}, {"text": "1}"}]
                }
            }]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_text_absent_without_text_parts() {
        let no_candidates: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(no_candidates.text().is_none());

        let binary_only: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": "aGk="}}]}}]}"#,
        )
        .unwrap();
        assert!(binary_only.text().is_none());
    }

    #[test]
    fn test_payload_conversion() {
        let text = ResponsePart {
            text: Some("hi".into()),
            inline_data: None,
        };
        assert_eq!(text.into_payload(), Some(PartPayload::Text("hi".into())));

        let binary = ResponsePart {
            text: None,
            inline_data: Some(InlineData {
                mime_type: "image/png".into(),
                data: "aGk=".into(),
            }),
        };
        assert_eq!(
            binary.into_payload(),
            Some(PartPayload::InlineBinary {
                mime_type: "image/png".into(),
                data: "aGk=".into(),
            })
        );

        let empty = ResponsePart {
            text: None,
            inline_data: None,
        };
        assert!(empty.into_payload().is_none());
    }

    #[test]
    fn test_payload_prefers_binary_over_text() {
        let both = ResponsePart {
            text: Some("caption".into()),
            inline_data: Some(InlineData {
                mime_type: "image/png".into(),
                data: "aGk=".into(),
            }),
        };
        assert!(matches!(
            both.into_payload(),
            Some(PartPayload::InlineBinary { .. })
        ));
    }

    #[test]
    fn test_prompt_feedback_deserialization() {
        let json = r#"{
            "candidates": [],
            "promptFeedback": {
                "blockReason": "SAFETY",
                "blockReasonMessage": "Prompt was blocked due to safety"
            }
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let feedback = resp.prompt_feedback.unwrap();
        assert_eq!(feedback.block_reason.as_deref(), Some("SAFETY"));
    }
}
