//! Gemini generateContent client and the text-model seam.
//!
//! The gateway only needs "prompt in, text out"; `TextModel` is the seam so
//! tests can substitute a scripted model for the HTTP client.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::time::Duration;
use ureq::Agent;

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One structured request to the text-generation capability.
pub struct GenerationRequest {
    /// Fixed role/style directive for the advisory intent.
    pub system_instruction: &'static str,
    /// The assembled user prompt.
    pub contents: String,
    pub temperature: f64,
}

/// String-in, string-out text generation. Implementations may fail; the
/// gateway above this seam is what absorbs failures.
pub trait TextModel {
    fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Blocking HTTP client for the Gemini generateContent endpoint.
pub struct GeminiClient {
    agent: Agent,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();
        Self {
            agent,
            api_url: DEFAULT_API_URL.to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Build a client from the environment: `GEMINI_API_KEY` (or the
    /// `api_key` file under the user config dir) plus an optional
    /// `WINBUSTER_API_URL` endpoint override.
    pub fn from_env() -> Result<Self> {
        let mut client = Self::new(resolve_api_key()?);
        if let Ok(url) = env::var("WINBUSTER_API_URL") {
            client.api_url = url;
        }
        Ok(client)
    }
}

impl TextModel for GeminiClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_url, self.model
        );
        let body = GenerateContentRequest {
            system_instruction: WireContent {
                parts: vec![WirePart {
                    text: request.system_instruction.to_string(),
                }],
            },
            contents: vec![WireContent {
                parts: vec![WirePart {
                    text: request.contents.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        };

        let mut response = self
            .agent
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .send_json(&body)
            .context("send generateContent request")?;
        let parsed: GenerateContentResponse = response
            .body_mut()
            .read_json()
            .context("parse generateContent response")?;

        let text = parsed.text();
        if text.is_empty() {
            return Err(anyhow!("generateContent response contained no text"));
        }
        tracing::info!(
            model = %self.model,
            prompt_bytes = request.contents.len(),
            response_bytes = text.len(),
            "generateContent complete"
        );
        Ok(text)
    }
}

/// API key from `GEMINI_API_KEY`, falling back to the user config file.
fn resolve_api_key() -> Result<String> {
    if let Ok(key) = env::var("GEMINI_API_KEY") {
        if !key.trim().is_empty() {
            return Ok(key.trim().to_string());
        }
    }
    let path = dirs::config_dir()
        .map(|dir| dir.join("winbuster").join("api_key"))
        .ok_or_else(|| anyhow!("no config directory available"))?;
    let key = fs::read_to_string(&path).with_context(|| {
        format!(
            "read API key: set GEMINI_API_KEY or create {}",
            path.display()
        )
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("API key file {} is empty", path.display()));
    }
    Ok(key.to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: WireContent,
    contents: Vec<WireContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct WireContent {
    parts: Vec<WirePart>,
}

#[derive(Serialize)]
struct WirePart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        let Some(candidate) = self.candidates.first() else {
            return String::new();
        };
        candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect()
    }
}

#[derive(Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}
