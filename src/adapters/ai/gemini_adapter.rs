//! Gemini `generateContent` adapter for competitor analysis.
//!
//! Implements `AiPort`: one search-grounded, schema-constrained request per
//! analysis, code-fence stripping, JSON parsing and citation extraction.
//!
//! Differences from OpenAI-style chat APIs that matter here:
//! - Auth via `?key=API_KEY` query parameter
//! - System instruction is a top-level `systemInstruction` field
//! - Web citations arrive in `candidates[0].groundingMetadata.groundingChunks`

use super::prompts::{SYSTEM_INSTRUCTION, response_schema, user_prompt};
use crate::domain::{AnalysisReport, DomainError, Source};
use crate::ports::AiPort;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Title given to a citation the service returned without one.
pub const SOURCE_TITLE_PLACEHOLDER: &str = "Source";

/// Gemini REST adapter.
///
/// The API key is optional at construction so a missing credential surfaces
/// as a failed analysis rather than a startup abort.
pub struct GeminiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter.
    ///
    /// # Arguments
    /// * `api_url` - API base (e.g., "https://generativelanguage.googleapis.com/v1beta")
    /// * `api_key` - API key; `None` makes every call fail with `DomainError::Config`
    /// * `model` - Model name (e.g., "gemini-3-pro-preview")
    /// * `request_timeout` / `connect_timeout` - transport limits; there are no retries
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: String,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(brands: &[String]) -> GenerateRequest {
        GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![TextPart {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![TextPart {
                    text: user_prompt(brands),
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }

    /// Turn a decoded response into a report: join text parts, strip fences,
    /// parse, attach grounding citations.
    pub fn parse_response(response: GenerateResponse) -> Result<AnalysisReport, DomainError> {
        let candidate = response.candidates.into_iter().next();

        let raw_text: String = candidate
            .as_ref()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if raw_text.trim().is_empty() {
            warn!("AI returned an empty response");
            return Err(DomainError::EmptyResponse);
        }

        let clean_json = strip_code_fence(&raw_text);
        let mut report: AnalysisReport = serde_json::from_str(&clean_json).map_err(|e| {
            warn!(error = %e, json = %clean_json.chars().take(200).collect::<String>(), "JSON parse failed");
            DomainError::Parse(e.to_string())
        })?;

        report.sources = candidate
            .and_then(|c| c.grounding_metadata)
            .map(extract_sources)
            .unwrap_or_default();

        Ok(report)
    }
}

/// Strip Markdown code fences (```` ```json ```` or bare ```` ``` ````).
///
/// Leading and trailing fences are removed independently, so a reply that only
/// closes a fence still parses. Stripping twice equals stripping once.
pub fn strip_code_fence(raw_text: &str) -> String {
    let mut text = raw_text.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest);
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim().to_string()
}

/// Web citations from grounding chunks. Chunks without a web entry or URI are skipped.
fn extract_sources(metadata: GroundingMetadata) -> Vec<Source> {
    metadata
        .grounding_chunks
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| {
            let uri = web.uri.filter(|u| !u.is_empty())?;
            let title = web
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| SOURCE_TITLE_PLACEHOLDER.to_string());
            Some(Source { title, uri })
        })
        .collect()
}

/// `generateContent` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    tools: Vec<Tool>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

/// Serializes to `{}`; its presence enables search grounding.
#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

/// `generateContent` response (only the fields we read).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GroundingMetadata {
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[async_trait::async_trait]
impl AiPort for GeminiAdapter {
    async fn analyze_competitors(&self, brands: &[String]) -> Result<AnalysisReport, DomainError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            DomainError::Config(
                "API key is not set (COMPETE_API_KEY, GEMINI_API_KEY or API_KEY)".to_string(),
            )
        })?;

        info!(
            brands = brands.len(),
            model = %self.model,
            "sending competitor analysis request"
        );

        let request = Self::build_request(brands);

        let response = self
            .client
            .post(self.endpoint_url())
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::Transport(format!("request timed out: {}", e))
                } else {
                    DomainError::Transport(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "AI API returned error");
            return Err(DomainError::Api {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("failed to read response body: {}", e)))?;
        debug!(body_len = body.len(), "received AI response");

        let decoded: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| DomainError::Parse(format!("invalid response envelope: {}", e)))?;

        let report = Self::parse_response(decoded)?;

        info!(
            competitors = report.competitors.len(),
            dimensions = report.strategic_comparison.len(),
            sources = report.sources.len(),
            "AI analysis complete"
        );

        Ok(report)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
