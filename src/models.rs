use crate::i18n::Language;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Rested,
    Tired,
    Groggy,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSession {
    pub id: String,
    pub date: NaiveDate,
    pub bed_time: NaiveDateTime,
    pub wake_time: NaiveDateTime,
    pub quality: u8,
    pub mood: Mood,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionLog {
    pub sessions: Vec<SleepSession>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedPoint {
    pub label: String,
    pub duration_hours: f64,
    pub quality: u8,
    pub bedtime_offset_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregateStats {
    pub avg_duration_hours: f64,
    pub avg_quality: f64,
    pub consistency_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub score: f64,
}

impl AnalysisResult {
    pub fn fallback(lang: Language) -> Self {
        Self {
            summary: lang.strings().analysis_fallback.to_string(),
            recommendations: Vec::new(),
            score: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisState {
    #[default]
    NotStarted,
    InFlight,
    Resolved {
        result: AnalysisResult,
    },
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct NewSessionRequest {
    pub bed_time: String,
    pub wake_time: String,
    pub quality: u8,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub user: Option<User>,
    pub language: Language,
    pub rtl: bool,
    pub form_open: bool,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub points: Vec<DerivedPoint>,
    pub stats: AggregateStats,
}
