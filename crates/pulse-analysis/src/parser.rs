//! Parsing of raw model output into analysis fields.
//!
//! Two response shapes are understood:
//!
//! - a JSON object with `summary`, `key_points`, `sentiment`,
//!   `customer_satisfaction`, `topics_discussed`, `action_items`,
//!   `risk_level` and an optional `appointment_details`;
//! - labeled text with `Sentiment Score:`, `Key Points:`,
//!   `Customer Satisfaction:` and `Appointment Details:` lines.
//!
//! Both report sentiment on the signed `[-1, 1]` scale.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use pulse_core::adapters::satisfaction_from_label;
use pulse_core::entities::{CallAnalysis, SENTIMENT_MAX, SENTIMENT_MIN};
use pulse_core::enums::{CustomerSatisfaction, RiskLevel};
use pulse_core::errors::CoreError;
use regex::Regex;
use serde::Deserialize;

use crate::error::AnalysisError;

/// Analysis fields extracted from one model response, not yet tied to a lead.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAnalysis {
    pub sentiment_score: f64,
    pub key_points: Vec<String>,
    pub customer_satisfaction: CustomerSatisfaction,
    pub appointment_details: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub summary: Option<String>,
    pub topics_discussed: Vec<String>,
    pub action_items: Vec<String>,
}

impl ParsedAnalysis {
    /// Attach identity and timestamp, producing a validated [`CallAnalysis`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the result fails validation.
    pub fn into_call_analysis(
        self,
        id: impl Into<String>,
        lead_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<CallAnalysis, CoreError> {
        let analysis = CallAnalysis {
            id: id.into(),
            lead_id: lead_id.into(),
            sentiment_score: self.sentiment_score,
            key_points: self.key_points,
            customer_satisfaction: self.customer_satisfaction,
            appointment_details: self.appointment_details,
            risk_level: self.risk_level,
            summary: self.summary,
            topics_discussed: self.topics_discussed,
            action_items: self.action_items,
            created_at,
        };
        analysis.validate()?;
        Ok(analysis)
    }
}

#[derive(Debug, Deserialize)]
struct StructuredResponse {
    summary: String,
    key_points: Vec<String>,
    sentiment: f64,
    customer_satisfaction: CustomerSatisfaction,
    topics_discussed: Vec<String>,
    action_items: Vec<String>,
    risk_level: RiskLevel,
    #[serde(default)]
    appointment_details: Option<String>,
}

/// Parse a JSON object response.
///
/// # Errors
///
/// Returns `AnalysisError::Parse` when the text is not a JSON object of the
/// expected shape or the sentiment is outside `[-1, 1]`.
pub fn parse_structured_response(raw: &str) -> Result<ParsedAnalysis, AnalysisError> {
    let response: StructuredResponse =
        serde_json::from_str(raw.trim()).map_err(|e| AnalysisError::Parse(e.to_string()))?;
    check_sentiment(response.sentiment)?;

    Ok(ParsedAnalysis {
        sentiment_score: response.sentiment,
        key_points: clean_lines(response.key_points.iter().map(String::as_str)),
        customer_satisfaction: response.customer_satisfaction,
        appointment_details: response
            .appointment_details
            .as_deref()
            .and_then(appointment),
        risk_level: Some(response.risk_level),
        summary: Some(response.summary.trim().to_string()).filter(|s| !s.is_empty()),
        topics_discussed: clean_lines(response.topics_discussed.iter().map(String::as_str)),
        action_items: clean_lines(response.action_items.iter().map(String::as_str)),
    })
}

struct LabelPatterns {
    sentiment: Regex,
    key_points: Regex,
    satisfaction: Regex,
    appointment: Regex,
}

fn label_patterns() -> Result<&'static LabelPatterns, AnalysisError> {
    static PATTERNS: OnceLock<Result<LabelPatterns, regex::Error>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            Ok(LabelPatterns {
                sentiment: Regex::new(r"(?i)Sentiment Score:\s*(-?\d+(?:\.\d+)?)")?,
                key_points: Regex::new(r"(?is)Key Points:(.*?)(?:\r?\n[ \t]*\r?\n|\z)")?,
                satisfaction: Regex::new(r"(?i)Customer Satisfaction:[ \t]*(.*)")?,
                appointment: Regex::new(r"(?i)Appointment Details:[ \t]*(.*)")?,
            })
        })
        .as_ref()
        .map_err(|e| AnalysisError::Parse(format!("label pattern failed to compile: {e}")))
}

/// Parse a labeled-text response.
///
/// Missing labels fall back to sentiment `0`, no key points, `neutral`
/// satisfaction and no appointment. Text carrying none of the labels is
/// rejected so the caller can ask again.
///
/// # Errors
///
/// Returns `AnalysisError::Parse` when no label is present or the sentiment
/// is outside `[-1, 1]`.
pub fn parse_labeled_text(raw: &str) -> Result<ParsedAnalysis, AnalysisError> {
    let patterns = label_patterns()?;

    let sentiment = patterns.sentiment.captures(raw).map(|c| c[1].to_string());
    let key_points = patterns.key_points.captures(raw).map(|c| c[1].to_string());
    let satisfaction = patterns
        .satisfaction
        .captures(raw)
        .map(|c| c[1].trim().to_string());
    let appointment_text = patterns.appointment.captures(raw).map(|c| c[1].to_string());

    if sentiment.is_none()
        && key_points.is_none()
        && satisfaction.is_none()
        && appointment_text.is_none()
    {
        return Err(AnalysisError::Parse(
            "response contains no recognizable analysis fields".into(),
        ));
    }

    let sentiment_score = match sentiment {
        Some(text) => text
            .parse::<f64>()
            .map_err(|e| AnalysisError::Parse(format!("bad sentiment score {text:?}: {e}")))?,
        None => 0.0,
    };
    check_sentiment(sentiment_score)?;

    Ok(ParsedAnalysis {
        sentiment_score,
        key_points: key_points
            .map(|block| clean_lines(block.lines()))
            .unwrap_or_default(),
        customer_satisfaction: satisfaction
            .as_deref()
            .map_or(CustomerSatisfaction::Neutral, satisfaction_from_label),
        appointment_details: appointment_text.as_deref().and_then(appointment),
        risk_level: None,
        summary: None,
        topics_discussed: Vec::new(),
        action_items: Vec::new(),
    })
}

/// Parse either response shape. Text that looks like a JSON object must
/// parse as one; anything else is read as labeled text.
///
/// # Errors
///
/// As [`parse_structured_response`] or [`parse_labeled_text`].
pub fn parse_response(raw: &str) -> Result<ParsedAnalysis, AnalysisError> {
    if raw.trim_start().starts_with('{') {
        parse_structured_response(raw)
    } else {
        parse_labeled_text(raw)
    }
}

fn check_sentiment(score: f64) -> Result<(), AnalysisError> {
    if score.is_finite() && (SENTIMENT_MIN..=SENTIMENT_MAX).contains(&score) {
        Ok(())
    } else {
        Err(AnalysisError::Parse(format!(
            "sentiment must be within [{SENTIMENT_MIN}, {SENTIMENT_MAX}], got {score}"
        )))
    }
}

/// Trim list items, drop bullet markers and blank entries.
fn clean_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    lines
        .map(|line| line.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize appointment text; placeholders such as "none" mean no appointment.
fn appointment(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let placeholder = matches!(
        trimmed.to_ascii_lowercase().as_str(),
        "" | "none" | "n/a" | "na" | "no appointment details" | "no appointment"
    );
    (!placeholder).then(|| trimmed.to_string())
}
