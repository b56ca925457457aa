//! Brand Kit Builder
//!
//! Runs extraction and every derivation stage in pipeline order, recording
//! each stage's input and output through a `JobTracker`. Only a failed page
//! fetch ends the build early; every later stage has a default.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{info, instrument};
use url::Url;

use super::extract::{BrandExtractor, ExtractionSummary};
use super::steps::{PipelineStep, StepRecord};
use super::tracker::JobTracker;
use crate::buttons::{ButtonStyle, generate_button_styles};
use crate::config::{PaletteConfig, TypographyConfig};
use crate::gradients::build_gradients;
use crate::palette::{ColorHarmony, ColorPalette, build_color_palette_with, generate_harmonies};
use crate::personality::{PersonalityProfile, analyze_personality, create_analyzer};
use crate::storage::{JobStatus, MemoryStepStore, SharedStepStore};
use crate::tokens::{DesignTokens, generate_tokens};
use crate::types::{ExtractedContent, Gradient, Logo, Result};
use crate::typography::{Typography, build_typography_with};
use crate::voice::{VoiceGuidelines, generate_voice};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandKit {
    pub job_id: String,
    pub url: String,
    pub name: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub palette: ColorPalette,
    pub harmonies: Vec<ColorHarmony>,
    pub gradients: Vec<Gradient>,
    pub typography: Typography,
    pub buttons: Vec<ButtonStyle>,
    pub logos: Vec<Logo>,
    pub content: ExtractedContent,
    pub personality: PersonalityProfile,
    pub voice: VoiceGuidelines,
    pub tokens: DesignTokens,
    pub extraction: ExtractionSummary,
    pub steps: Vec<StepRecord>,
}

pub struct BrandKitBuilder {
    extractor: BrandExtractor,
    store: SharedStepStore,
    palette: PaletteConfig,
    typography: TypographyConfig,
}

impl BrandKitBuilder {
    /// Builder tracking steps in memory
    pub fn new(extractor: BrandExtractor) -> Self {
        Self {
            extractor,
            store: Arc::new(MemoryStepStore::new()),
            palette: PaletteConfig::default(),
            typography: TypographyConfig::default(),
        }
    }

    pub fn with_store(mut self, store: SharedStepStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_palette_config(mut self, palette: PaletteConfig) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_typography_config(mut self, typography: TypographyConfig) -> Self {
        self.typography = typography;
        self
    }

    #[instrument(skip_all, fields(url = %url))]
    pub async fn build(&self, url: &Url) -> Result<BrandKit> {
        let mut tracker = JobTracker::start(url.as_str(), self.store.clone());
        info!("Building brand kit (job {})", tracker.job_id());

        tracker.begin(PipelineStep::FetchWebsite, Some(json!({ "url": url.as_str() })))?;
        let report = match self.extractor.extract(url).await {
            Ok(report) => report,
            Err(e) => {
                let message = e.to_string();
                tracker.fail(PipelineStep::FetchWebsite, &message)?;
                tracker.finish(JobStatus::Failed, Some(&message));
                return Err(e);
            }
        };
        let summary = report.summary();
        tracker.complete(PipelineStep::FetchWebsite, serde_json::to_value(&summary)?)?;

        let extracted = report.result;
        tracker.record_completed(
            PipelineStep::ExtractColors,
            None,
            json!({ "colors": extracted.colors, "gradients": extracted.gradients }),
        )?;
        tracker.record_completed(
            PipelineStep::ExtractFonts,
            None,
            json!({ "fonts": extracted.fonts }),
        )?;
        tracker.record_completed(
            PipelineStep::ExtractLogos,
            None,
            json!({ "logos": extracted.logos }),
        )?;
        tracker.record_completed(
            PipelineStep::ExtractContent,
            None,
            serde_json::to_value(&extracted.content)?,
        )?;

        tracker.begin(
            PipelineStep::GeneratePalette,
            Some(json!({ "colors": extracted.colors })),
        )?;
        let palette = build_color_palette_with(&extracted.colors, &self.palette);
        let harmonies = generate_harmonies(&palette.primary.base);
        tracker.complete(PipelineStep::GeneratePalette, serde_json::to_value(&palette)?)?;

        tracker.begin(
            PipelineStep::GenerateGradients,
            Some(json!({ "extracted": extracted.gradients.len() })),
        )?;
        let gradients = build_gradients(&extracted.gradients, &palette);
        tracker.complete(PipelineStep::GenerateGradients, serde_json::to_value(&gradients)?)?;

        tracker.begin(
            PipelineStep::GenerateTypography,
            Some(json!({ "fonts": extracted.fonts })),
        )?;
        let typography = build_typography_with(&extracted.fonts, &self.typography);
        tracker.complete(PipelineStep::GenerateTypography, serde_json::to_value(&typography)?)?;

        let buttons = generate_button_styles(&palette);
        tracker.record_completed(
            PipelineStep::GenerateButtons,
            None,
            serde_json::to_value(&buttons)?,
        )?;

        tracker.skip(PipelineStep::GenerateHeroes, "hero image rendering is not supported")?;

        let analyzer = create_analyzer(
            self.extractor.provider().cloned(),
            self.extractor.retry(),
            self.extractor.timeouts().llm_request,
        );
        tracker.begin(
            PipelineStep::AnalyzePersonality,
            Some(json!({ "analyzer": analyzer.name() })),
        )?;
        let personality = analyze_personality(analyzer.as_ref(), &extracted.content).await;
        tracker.complete(PipelineStep::AnalyzePersonality, serde_json::to_value(&personality)?)?;

        let voice = generate_voice(&personality);
        tracker.record_completed(PipelineStep::GenerateVoice, None, serde_json::to_value(&voice)?)?;

        let tokens = generate_tokens(&palette, &typography, &gradients);
        tracker.record_completed(
            PipelineStep::GenerateTokens,
            None,
            json!({ "count": tokens.len() }),
        )?;

        tracker.record_completed(
            PipelineStep::CompileKit,
            None,
            json!({
                "jobId": tracker.job_id(),
                "colors": extracted.colors.len(),
                "fonts": extracted.fonts.len(),
                "gradients": gradients.len(),
                "tokens": tokens.len(),
            }),
        )?;
        tracker.finish(JobStatus::Completed, None);

        info!(
            "Brand kit ready: primary {}, headlines {}, archetype {}",
            palette.primary.base.hex(),
            typography.fonts.headlines.family,
            personality.archetype
        );

        Ok(BrandKit {
            job_id: tracker.job_id().to_string(),
            url: url.to_string(),
            name: extracted.content.brand_name(),
            generated_at: Utc::now(),
            palette,
            harmonies,
            gradients,
            typography,
            buttons,
            logos: extracted.logos,
            content: extracted.content,
            personality,
            voice,
            tokens,
            extraction: summary,
            steps: tracker.records().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RetryPolicy;
    use crate::collector::Collector;
    use crate::collector::fetch::testing::FakeFetcher;
    use crate::config::FetchConfig;
    use crate::pipeline::StepStatus;
    use crate::storage::{MemoryStepStore, StepStore};
    use crate::types::BrandError;

    const PAGE: &str = r##"<html lang="en"><head>
        <title>Trailhead | Outdoor gear</title>
        <meta name="description" content="Explore the wild with gear built for adventure.">
        <style>
          body { font-family: "Work Sans", sans-serif; color: #1e3a8a; }
          h1 { font-family: "Playfair Display", serif; }
          .cta { background: #f65625; } .nav { color: #028393; }
          .hero { background: linear-gradient(to right, #1e3a8a, #028393); }
        </style></head>
        <body><h1>Discover your next adventure</h1>
        <p>Explore trails, journey further and discover freedom outdoors.</p></body></html>"##;

    fn builder(store: Arc<MemoryStepStore>) -> BrandKitBuilder {
        let fetcher = Arc::new(FakeFetcher::new().with_page("https://trail.test/", PAGE));
        let extractor = BrandExtractor::new(
            Collector::new(fetcher, &FetchConfig::default()),
            None,
            None,
        )
        .with_retry(RetryPolicy::none());
        BrandKitBuilder::new(extractor).with_store(store)
    }

    #[tokio::test]
    async fn test_build_without_model() {
        let store = Arc::new(MemoryStepStore::new());
        let kit = builder(store.clone())
            .build(&Url::parse("https://trail.test/").unwrap())
            .await
            .unwrap();

        assert_eq!(kit.name.as_deref(), Some("Trailhead"));
        assert_eq!(kit.palette.primary.base.hex(), "#1e3a8a");
        assert_eq!(kit.typography.fonts.headlines.family, "Playfair Display");
        assert_eq!(kit.typography.fonts.subheadings.family, "Work Sans");
        assert_eq!(kit.typography.fonts.body.family, "PT Sans");
        assert_eq!(kit.gradients[0].id, "gradient-1");
        assert_eq!(kit.personality.analyzer, "keyword");
        assert!(!kit.tokens.is_empty());

        assert_eq!(kit.steps.len(), 14);
        for record in &kit.steps {
            let expected = if record.step == PipelineStep::GenerateHeroes {
                StepStatus::Skipped
            } else {
                StepStatus::Completed
            };
            assert_eq!(record.status, expected, "{}", record.step);
        }

        let job = store.load_job(&kit.job_id).unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Completed);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_fatal() {
        let err = builder(Arc::new(MemoryStepStore::new()))
            .build(&Url::parse("https://gone.test/").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, BrandError::Fetch { .. }));
    }
}
