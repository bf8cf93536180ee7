use super::parse::parse_action_items;
use super::{Extract, ExtractError};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the concatenated text of the first candidate.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, ExtractError> {
        let body = serde_json::json!({
            "contents": [
                { "role": "user", "parts": [ { "text": prompt } ] }
            ]
        });

        let resp = self
            .http
            .post(format!("{}/{}:generateContent", API_BASE, self.model))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ExtractError::Status { status, body });
        }

        let api_resp: serde_json::Value = resp.json().await?;
        response_text(&api_resp).ok_or(ExtractError::EmptyResponse)
    }
}

impl Extract for GeminiClient {
    async fn extract(
        &self,
        instructions: &str,
        transcript: &str,
    ) -> Result<Vec<String>, ExtractError> {
        let prompt = build_prompt(instructions, transcript);
        let text = self.generate_text(&prompt).await.inspect_err(|e| {
            log::error!("Error generating action items: {}", e);
        })?;
        log::debug!("Raw response text: {}", text);
        Ok(parse_action_items(&text))
    }
}

pub fn build_prompt(instructions: &str, transcript: &str) -> String {
    let mut prompt = String::from(instructions.trim_end());
    prompt.push_str("\n\n");
    prompt.push_str(
        "Example format: [\"John will send the quarterly report by Friday\", \
         \"Schedule follow-up meeting with client\", \
         \"Review budget proposal and provide feedback\"]\n\n",
    );
    prompt.push_str("Meeting transcript:\n");
    prompt.push_str(transcript);
    prompt.push_str("\n\nReturn only the JSON array, no additional text or formatting:");
    prompt
}

/// Text of the first candidate, with all its text parts joined.
fn response_text(api_resp: &serde_json::Value) -> Option<String> {
    let parts = api_resp["candidates"]
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|candidate| candidate["content"]["parts"].as_array())?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    if text.is_empty() { None } else { Some(text) }
}

/// Verify a credential with a minimal request.
pub async fn test_api_key(api_key: &str, model: &str) -> Result<String, String> {
    let client = GeminiClient::new(api_key).with_model(model);
    match client.generate_text("Reply with OK").await {
        Ok(_) => Ok("API key valid".to_string()),
        Err(ExtractError::Status { status, .. })
            if status == reqwest::StatusCode::BAD_REQUEST
                || status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN =>
        {
            Err("Invalid API key".to_string())
        }
        Err(e) => Err(e.to_string()),
    }
}
