//! Type conversions between Taleweaver and Gemini formats.

use crate::gemini::{
    GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse,
};
use taleweaver_core::{GenerateRequest, GenerateResponse, Output, Role, TokenUsageData};
use taleweaver_error::{GeminiError, GeminiErrorKind};

/// Converts a Taleweaver request to the Gemini wire format.
///
/// System messages are merged into `systemInstruction`; assistant turns use
/// Gemini's "model" role.
pub fn to_gemini_request(req: &GenerateRequest) -> Result<GeminiRequest, GeminiError> {
    let mut contents = Vec::new();
    let mut system_parts = Vec::new();

    for msg in req.messages() {
        let parts: Vec<GeminiPart> = msg
            .content()
            .iter()
            .map(|input| GeminiPart::text(input.as_text()))
            .collect();

        let role = match msg.role() {
            Role::System => {
                system_parts.extend(parts);
                continue;
            }
            Role::User => "user",
            Role::Assistant => "model",
        };

        contents.push(GeminiContent {
            role: Some(role.to_string()),
            parts,
        });
    }

    let mut builder = GeminiRequest::builder();
    builder.contents(contents);

    if !system_parts.is_empty() {
        builder.system_instruction(GeminiContent {
            role: None,
            parts: system_parts,
        });
    }

    if req.max_tokens().is_some() || req.temperature().is_some() {
        builder.generation_config(GeminiGenerationConfig {
            max_output_tokens: *req.max_tokens(),
            temperature: *req.temperature(),
        });
    }

    builder.build().map_err(|e| {
        GeminiError::new(GeminiErrorKind::ResponseParsing(format!(
            "Failed to build request: {}",
            e
        )))
    })
}

/// Converts a Gemini response to a Taleweaver response.
///
/// Text parts of the first candidate are concatenated. A blocked prompt or
/// a candidate without any non-blank text is an error.
pub fn from_gemini_response(response: &GeminiResponse) -> Result<GenerateResponse, GeminiError> {
    let block_reason = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.clone());

    let Some(candidate) = response.candidates.first() else {
        return Err(match block_reason {
            Some(reason) => GeminiError::new(GeminiErrorKind::Blocked(reason)),
            None => GeminiError::new(GeminiErrorKind::EmptyResponse),
        });
    };

    let text: String = candidate
        .content
        .as_ref()
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(match candidate.finish_reason.as_deref() {
            Some("SAFETY") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                GeminiError::new(GeminiErrorKind::Blocked(
                    candidate.finish_reason.clone().unwrap_or_default(),
                ))
            }
            _ => GeminiError::new(GeminiErrorKind::EmptyResponse),
        });
    }

    let usage = response.usage_metadata.as_ref().map(|u| {
        let input = u.prompt_token_count.unwrap_or(0);
        let output = u.candidates_token_count.unwrap_or(0);
        TokenUsageData::new(input, output, u.total_token_count.unwrap_or(input + output))
    });

    GenerateResponse::builder()
        .outputs(vec![Output::Text(text)])
        .usage(usage)
        .build()
        .map_err(|e| {
            GeminiError::new(GeminiErrorKind::ResponseParsing(format!(
                "Failed to build response: {}",
                e
            )))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use taleweaver_core::Message;

    fn response(json: serde_json::Value) -> GeminiResponse {
        serde_json::from_value(json).expect("valid response json")
    }

    #[test]
    fn test_system_messages_become_system_instruction() {
        let req = GenerateRequest::builder()
            .messages(vec![
                Message::system("You are a storyteller."),
                Message::user("a lonely lighthouse keeper"),
            ])
            .build()
            .expect("valid request");

        let gemini = to_gemini_request(&req).expect("converts");
        assert_eq!(gemini.contents().len(), 1);
        assert_eq!(gemini.contents()[0].role.as_deref(), Some("user"));
        let system = gemini.system_instruction().as_ref().expect("system set");
        assert_eq!(
            system.parts[0].text.as_deref(),
            Some("You are a storyteller.")
        );
        assert!(gemini.generation_config().is_none());
    }

    #[test]
    fn test_generation_config_serializes_camel_case() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::user("hi")])
            .max_tokens(Some(300))
            .build()
            .expect("valid request");

        let body = serde_json::to_value(to_gemini_request(&req).expect("converts"))
            .expect("serializes");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 300);
        assert!(body["generationConfig"].get("temperature").is_none());
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_first_candidate_parts_are_concatenated() {
        let parsed = from_gemini_response(&response(serde_json::json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "The keeper "}, {"text": "lit the lamp."}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 6, "totalTokenCount": 16}
        })))
        .expect("parses");

        assert_eq!(parsed.joined_text(), "The keeper lit the lamp.");
        assert_eq!(parsed.usage().map(|u| *u.total_tokens()), Some(16));
    }

    #[test]
    fn test_blocked_prompt_is_reported() {
        let err = from_gemini_response(&response(serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .unwrap_err();
        assert_eq!(err.kind, GeminiErrorKind::Blocked("SAFETY".to_string()));
    }

    #[test]
    fn test_blank_candidate_is_empty_response() {
        let err = from_gemini_response(&response(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "   "}]}, "finishReason": "STOP"}]
        })))
        .unwrap_err();
        assert_eq!(err.kind, GeminiErrorKind::EmptyResponse);
    }
}
