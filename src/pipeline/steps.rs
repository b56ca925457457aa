//! Pipeline Steps
//!
//! The 14 ordered steps of a brand kit build and the status state machine
//! every step record follows:
//!
//! ```text
//! PENDING ──► IN_PROGRESS ──► COMPLETED
//!    │             ├────────► FAILED ──(retry)──► IN_PROGRESS
//!    │             └────────► SKIPPED
//!    └────────────────────────► SKIPPED
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{BrandError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStep {
    FetchWebsite,
    ExtractColors,
    ExtractFonts,
    ExtractLogos,
    ExtractContent,
    GeneratePalette,
    GenerateGradients,
    GenerateTypography,
    GenerateButtons,
    GenerateHeroes,
    AnalyzePersonality,
    GenerateVoice,
    GenerateTokens,
    CompileKit,
}

impl PipelineStep {
    pub const ALL: [PipelineStep; 14] = [
        Self::FetchWebsite,
        Self::ExtractColors,
        Self::ExtractFonts,
        Self::ExtractLogos,
        Self::ExtractContent,
        Self::GeneratePalette,
        Self::GenerateGradients,
        Self::GenerateTypography,
        Self::GenerateButtons,
        Self::GenerateHeroes,
        Self::AnalyzePersonality,
        Self::GenerateVoice,
        Self::GenerateTokens,
        Self::CompileKit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchWebsite => "FETCH_WEBSITE",
            Self::ExtractColors => "EXTRACT_COLORS",
            Self::ExtractFonts => "EXTRACT_FONTS",
            Self::ExtractLogos => "EXTRACT_LOGOS",
            Self::ExtractContent => "EXTRACT_CONTENT",
            Self::GeneratePalette => "GENERATE_PALETTE",
            Self::GenerateGradients => "GENERATE_GRADIENTS",
            Self::GenerateTypography => "GENERATE_TYPOGRAPHY",
            Self::GenerateButtons => "GENERATE_BUTTONS",
            Self::GenerateHeroes => "GENERATE_HEROES",
            Self::AnalyzePersonality => "ANALYZE_PERSONALITY",
            Self::GenerateVoice => "GENERATE_VOICE",
            Self::GenerateTokens => "GENERATE_TOKENS",
            Self::CompileKit => "COMPILE_KIT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.as_str() == s)
    }

    /// Zero-based position in the build
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
    Skipped,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            "FAILED" => Some(Self::Failed),
            "SKIPPED" => Some(Self::Skipped),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }

    pub fn can_transition_to(&self, next: StepStatus) -> bool {
        use StepStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress)
                | (Pending, Skipped)
                | (InProgress, Completed)
                | (InProgress, Failed)
                | (InProgress, Skipped)
                | (Failed, InProgress)
        )
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub step: PipelineStep,
    pub status: StepStatus,
    pub retry_count: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub input: Option<Value>,
    pub output: Option<Value>,
    pub error: Option<String>,
}

impl StepRecord {
    pub fn new(step: PipelineStep) -> Self {
        Self {
            step,
            status: StepStatus::Pending,
            retry_count: 0,
            started_at: None,
            finished_at: None,
            input: None,
            output: None,
            error: None,
        }
    }

    fn transition(&mut self, next: StepStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(BrandError::InvalidStepTransition {
                step: self.step.to_string(),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Enter IN_PROGRESS; starting again after a failure counts as a retry
    pub fn start(&mut self, input: Option<Value>) -> Result<()> {
        let retrying = self.status == StepStatus::Failed;
        self.transition(StepStatus::InProgress)?;
        if retrying {
            self.retry_count += 1;
            self.error = None;
        }
        self.started_at = Some(Utc::now());
        self.finished_at = None;
        self.input = input;
        Ok(())
    }

    pub fn complete(&mut self, output: Value) -> Result<()> {
        self.transition(StepStatus::Completed)?;
        self.finished_at = Some(Utc::now());
        self.output = Some(output);
        Ok(())
    }

    pub fn fail(&mut self, error: impl Into<String>) -> Result<()> {
        self.transition(StepStatus::Failed)?;
        self.finished_at = Some(Utc::now());
        self.error = Some(error.into());
        Ok(())
    }

    pub fn skip(&mut self, reason: impl Into<String>) -> Result<()> {
        self.transition(StepStatus::Skipped)?;
        let now = Utc::now();
        self.started_at.get_or_insert(now);
        self.finished_at = Some(now);
        self.output = Some(serde_json::json!({ "reason": reason.into() }));
        Ok(())
    }

    pub fn duration_ms(&self) -> Option<i64> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some((end - start).num_milliseconds()),
            _ => None,
        }
    }
}
