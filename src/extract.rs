//! Recovers an [`AnalysisResult`] from free-form model output.
//!
//! Models wrap JSON in markdown fences, prepend chatter, or skip JSON entirely.
//! Extraction runs in stages that each return `Option`, and the caller always
//! gets a structurally complete result back.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::AnalysisResult;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid analysis JSON: {0}")] Json(#[from] serde_json::Error),
}

/// Where the JSON candidate was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    Fenced(&'a str),
    Braced(&'a str),
    Raw(&'a str),
}

impl<'a> Candidate<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            Candidate::Fenced(_) => "fenced",
            Candidate::Braced(_) => "braced",
            Candidate::Raw(_) => "raw",
        }
    }

    pub fn text(&self) -> &'a str {
        match *self {
            Candidate::Fenced(s) | Candidate::Braced(s) | Candidate::Raw(s) => s,
        }
    }
}

fn fence_regex() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| Regex::new(r"(?s)```(?:json)?[ \t]*\r?\n(.*?)\r?\n[ \t]*```").ok())
        .as_ref()
}

fn brace_regex() -> Option<&'static Regex> {
    static BRACE: OnceLock<Option<Regex>> = OnceLock::new();
    BRACE.get_or_init(|| Regex::new(r"(?s)\{.*\}").ok()).as_ref()
}

/// Body of the first fenced code block.
pub fn fenced_block(content: &str) -> Option<&str> {
    fence_regex()?
        .captures(content)?
        .get(1)
        .map(|m| m.as_str())
}

/// Text from the first `{` through the last `}`.
pub fn braced_object(content: &str) -> Option<&str> {
    brace_regex()?.find(content).map(|m| m.as_str())
}

/// Fenced block, then braced object. Raw text is the last resort and is not listed.
pub fn candidates(content: &str) -> impl Iterator<Item = Candidate<'_>> {
    [
        fenced_block(content).map(Candidate::Fenced),
        braced_object(content).map(Candidate::Braced),
    ]
    .into_iter()
    .flatten()
}

pub fn locate_json(content: &str) -> Candidate<'_> {
    candidates(content)
        .next()
        .unwrap_or(Candidate::Raw(content.trim()))
}

/// The first candidate that parses wins. When none does, the whole trimmed
/// reply is parsed and its error returned.
pub fn parse_analysis(content: &str) -> Result<AnalysisResult, ParseError> {
    for candidate in candidates(content) {
        if let Ok(parsed) = serde_json::from_str(candidate.text()) {
            info!("🧩 Parsed analysis from {} candidate", candidate.kind());
            return Ok(parsed);
        }
    }
    let parsed = serde_json::from_str(content.trim())?;
    info!("🧩 Parsed analysis from raw reply");
    Ok(parsed)
}

/// Parses the model reply, falling back to [`AnalysisResult::fallback`] on any failure.
pub fn analysis_from_reply(content: &str) -> AnalysisResult {
    match parse_analysis(content) {
        Ok(result) => result,
        Err(e) => {
            warn!("⚠️ Failed to parse AI response as JSON: {}", e);
            AnalysisResult::fallback(content)
        }
    }
}
