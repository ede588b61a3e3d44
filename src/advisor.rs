use crate::i18n::Language;
use crate::models::{AnalysisResult, SleepSession};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use thiserror::Error;
use tracing::{debug, warn};

/// How many of the most recent sessions the advisory prompt covers.
pub const RECENT_WINDOW: usize = 7;

const API_KEY_ENV: &str = "GEMINI_API_KEY";
const MODEL_ENV: &str = "GEMINI_MODEL";
const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the generative-AI coach panel. Every failure path collapses to
/// a localized fallback result; callers never see an error from here.
#[derive(Clone)]
pub struct Advisor {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Debug, Error)]
enum AdvisorError {
    #[error("{API_KEY_ENV} is not set")]
    MissingKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service answered {0}")]
    Status(reqwest::StatusCode),
    #[error("no text candidate in reply")]
    EmptyReply,
    #[error("reply is not the expected JSON: {0}")]
    BadPayload(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl Advisor {
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    /// Reads `GEMINI_API_KEY`, `GEMINI_MODEL` and `GEMINI_BASE_URL`. A
    /// missing key means every analysis serves the fallback.
    pub fn from_env() -> Self {
        Self::new(
            env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()),
            env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        )
    }

    /// Asks the model for a weekly summary, recommendations and a 1-100
    /// score over the given recent window.
    pub async fn analyze(&self, sessions: &[SleepSession], lang: Language) -> AnalysisResult {
        match self.request_analysis(sessions, lang).await {
            Ok(result) => result,
            Err(err) => {
                warn!("advisory request failed, serving fallback: {err}");
                AnalysisResult::fallback(lang)
            }
        }
    }

    async fn request_analysis(
        &self,
        sessions: &[SleepSession],
        lang: Language,
    ) -> Result<AnalysisResult, AdvisorError> {
        let api_key = self.api_key.as_deref().ok_or(AdvisorError::MissingKey)?;
        let url = format!(
            "{}/models/{}:generateContent?key={api_key}",
            self.base_url, self.model
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(sessions, lang),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        debug!(model = %self.model, sessions = sessions.len(), "requesting sleep analysis");
        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status));
        }

        let payload: GenerateResponse = response.json().await?;
        let text = payload
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(AdvisorError::EmptyReply)?;

        Ok(serde_json::from_str(&text)?)
    }
}

fn build_prompt(sessions: &[SleepSession], lang: Language) -> String {
    let rows: Vec<serde_json::Value> = sessions
        .iter()
        .map(|session| {
            let duration_hours =
                (session.wake_time - session.bed_time).num_milliseconds() as f64 / 3_600_000.0;
            json!({
                "date": session.date,
                "duration": duration_hours,
                "quality": session.quality,
                "notes": session.notes,
            })
        })
        .collect();

    format!(
        "Analyze the following sleep data JSON. The user wants insights on their sleep health.\n\
         Language: {}.\n\n\
         Data:\n{}\n\n\
         Provide:\n\
         1. A short summary of their week.\n\
         2. 3 actionable recommendations to improve sleep.\n\
         3. An overall sleep health score from 1-100 based on consistency and duration.",
        lang.prompt_name(),
        serde_json::Value::Array(rows),
    )
}

fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } },
            "score": { "type": "NUMBER" }
        },
        "required": ["summary", "recommendations", "score"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use chrono::NaiveDate;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn advisor_for(server: &MockServer) -> Advisor {
        Advisor::new(
            Some("test-key".to_string()),
            DEFAULT_MODEL.to_string(),
            server.uri(),
        )
    }

    fn sample_sessions() -> Vec<SleepSession> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        vec![SleepSession {
            id: "s-1".to_string(),
            date,
            bed_time: date.pred_opt().unwrap().and_hms_opt(23, 0, 0).unwrap(),
            wake_time: date.and_hms_opt(6, 30, 0).unwrap(),
            quality: 8,
            mood: Mood::Rested,
            notes: "Read a book before bed.".to_string(),
        }]
    }

    #[tokio::test]
    async fn analyze_parses_a_structured_reply() {
        let server = MockServer::start().await;
        let reply = json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "text": "{\"summary\":\"A steady week.\",\"recommendations\":[\"Keep the same bedtime\"],\"score\":82}"
                    }]
                }
            }]
        });
        Mock::given(method("POST"))
            .and(path(format!("/models/{DEFAULT_MODEL}:generateContent")))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .expect(1)
            .mount(&server)
            .await;

        let result = advisor_for(&server)
            .analyze(&sample_sessions(), Language::En)
            .await;
        assert_eq!(result.summary, "A steady week.");
        assert_eq!(result.recommendations, vec!["Keep the same bedtime"]);
        assert_eq!(result.score, 82.0);
    }

    #[tokio::test]
    async fn analyze_falls_back_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = advisor_for(&server)
            .analyze(&sample_sessions(), Language::En)
            .await;
        assert_eq!(result, AnalysisResult::fallback(Language::En));
    }

    #[tokio::test]
    async fn analyze_falls_back_on_a_reply_that_is_not_the_schema() {
        let server = MockServer::start().await;
        let reply = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "sorry, no JSON today" }] }
            }]
        });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .mount(&server)
            .await;

        let result = advisor_for(&server)
            .analyze(&sample_sessions(), Language::En)
            .await;
        assert_eq!(result.score, 0.0);
        assert!(result.recommendations.is_empty());
    }

    #[tokio::test]
    async fn analyze_falls_back_on_an_empty_candidate_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let result = advisor_for(&server)
            .analyze(&sample_sessions(), Language::En)
            .await;
        assert_eq!(result, AnalysisResult::fallback(Language::En));
    }

    #[tokio::test]
    async fn missing_api_key_sends_nothing_and_falls_back_localized() {
        let advisor = Advisor::new(None, DEFAULT_MODEL.to_string(), DEFAULT_BASE_URL.to_string());
        let result = advisor.analyze(&sample_sessions(), Language::Ar).await;
        assert_eq!(result.summary, Language::Ar.strings().analysis_fallback);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn prompt_names_the_language_and_carries_the_rows() {
        let prompt = build_prompt(&sample_sessions(), Language::Ar);
        assert!(prompt.contains("Language: Arabic."));
        assert!(prompt.contains("\"quality\":8"));
        assert!(prompt.contains("2024-01-02"));
    }
}
