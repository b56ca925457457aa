//! Brand Asset Extraction
//!
//! `extract_brand_assets(url)` is the one entry point the rest of the build
//! consumes:
//!
//! 1. Page collection and screenshot capture run concurrently
//! 2. If the collector under-delivers and a model is configured, the
//!    screenshot and then the harvested CSS are interpreted
//! 3. All sources are fused by precedence into one `ExtractionResult`
//!
//! Only the page fetch can fail the extraction.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::ai::{ImageInput, RetryPolicy, SharedProvider, TimeoutConfig, with_timeout};
use crate::collector::{CollectedPage, Collector, HttpFetcher, PageFetcher};
use crate::config::Config;
use crate::fusion::{Contribution, SourceSignals, fuse};
use crate::interpret::{
    SharedScreenshotProvider, interpret_css, interpret_screenshot, needs_interpretation,
};
use crate::types::{ExtractionResult, Result};

/// Extraction result plus what it took to produce it
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub result: ExtractionResult,
    pub page: CollectedPage,
    pub contributions: Vec<Contribution>,
    pub interpreted: bool,
    pub screenshot_captured: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSummary {
    pub stylesheets_loaded: usize,
    pub fallback_parses: usize,
    pub interpreted: bool,
    pub screenshot_captured: bool,
    pub contributions: Vec<Contribution>,
}

impl ExtractionReport {
    pub fn summary(&self) -> ExtractionSummary {
        ExtractionSummary {
            stylesheets_loaded: self.page.stylesheets_loaded,
            fallback_parses: self.page.fallback_parses,
            interpreted: self.interpreted,
            screenshot_captured: self.screenshot_captured,
            contributions: self.contributions.clone(),
        }
    }
}

pub struct BrandExtractor {
    collector: Collector,
    provider: Option<SharedProvider>,
    screenshots: Option<SharedScreenshotProvider>,
    retry: RetryPolicy,
    timeouts: TimeoutConfig,
}

impl BrandExtractor {
    pub fn new(
        collector: Collector,
        provider: Option<SharedProvider>,
        screenshots: Option<SharedScreenshotProvider>,
    ) -> Self {
        Self {
            collector,
            provider,
            screenshots,
            retry: RetryPolicy::default(),
            timeouts: TimeoutConfig::default(),
        }
    }

    /// HTTP collector plus whichever optional providers have credentials
    pub fn from_config(
        config: &Config,
        provider: Option<SharedProvider>,
        screenshots: Option<SharedScreenshotProvider>,
    ) -> Result<Self> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&config.fetch)?);
        Ok(Self::new(Collector::new(fetcher, &config.fetch), provider, screenshots)
            .with_timeouts(TimeoutConfig::from_config(config)))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn provider(&self) -> Option<&SharedProvider> {
        self.provider.as_ref()
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    pub fn timeouts(&self) -> TimeoutConfig {
        self.timeouts
    }

    pub async fn extract_brand_assets(&self, url: &Url) -> Result<ExtractionResult> {
        Ok(self.extract(url).await?.result)
    }

    #[instrument(skip_all, fields(url = %url))]
    pub async fn extract(&self, url: &Url) -> Result<ExtractionReport> {
        let (page, screenshot) = tokio::join!(
            with_timeout(self.timeouts.page, self.collector.collect(url), "page fetch"),
            self.capture(url),
        );
        let page = page?;
        let collected = page.to_extraction();
        let screenshot_captured = screenshot.is_some();

        let mut sources = vec![SourceSignals::from(&page)];
        let mut interpreted = false;

        match &self.provider {
            Some(provider) if needs_interpretation(&collected) => {
                info!(
                    "Collector found {} colors and {} fonts; interpreting",
                    collected.colors.len(),
                    collected.fonts.len()
                );
                interpreted = true;

                if let Some(image) = &screenshot {
                    let vision = interpret_screenshot(
                        provider.as_ref(),
                        image,
                        url,
                        self.retry,
                        self.timeouts.llm_request,
                    )
                    .await;
                    if !vision.is_empty() {
                        sources.push(SourceSignals::from(vision));
                    }
                }

                let css = interpret_css(
                    provider.as_ref(),
                    &page.raw,
                    &page.content,
                    self.retry,
                    self.timeouts.llm_request,
                )
                .await;
                if !css.is_empty() {
                    sources.push(SourceSignals::from(css));
                }
            }
            Some(_) => debug!("Collector output sufficient; skipping interpretation"),
            None => debug!("No model configured; using collector output only"),
        }

        let fused = fuse(sources);
        let result = ExtractionResult {
            colors: fused.colors,
            gradients: fused.gradients,
            fonts: fused.fonts,
            logos: collected.logos,
            content: collected.content,
        };
        info!(
            "Extracted {} colors, {} fonts, {} gradients, {} logos",
            result.colors.len(),
            result.fonts.len(),
            result.gradients.len(),
            result.logos.len()
        );

        Ok(ExtractionReport {
            result,
            page,
            contributions: fused.contributions,
            interpreted,
            screenshot_captured,
        })
    }

    /// Screenshot for the vision pass; only attempted when a vision-capable
    /// model could use it. Failures mean "no screenshot".
    async fn capture(&self, url: &Url) -> Option<ImageInput> {
        let screenshots = self.screenshots.as_ref()?;
        if !self.provider.as_ref().is_some_and(|p| p.supports_vision()) {
            return None;
        }

        match with_timeout(self.timeouts.screenshot, screenshots.capture(url), "screenshot").await {
            Ok(image) => {
                debug!("Captured {} byte screenshot via {}", image.bytes.len(), screenshots.name());
                Some(image)
            }
            Err(e) => {
                warn!("Screenshot unavailable: {}", e);
                None
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testing::FixedScreenshots;
    use super::*;
    use crate::collector::fetch::testing::FakeFetcher;
    use crate::config::FetchConfig;
    use crate::fusion::SignalSource;
    use crate::interpret::testing::ScriptedProvider;
    use crate::types::BrandError;

    const RICH: &str = r##"<html><head><title>Acme</title>
        <style>
          :root { --brand-primary: #1e3a8a; }
          h1 { font-family: "Merriweather", serif; color: #1e3a8a; }
          .a { color: #028393; } .b { background: #f65625; }
        </style></head><body><p>Hi</p></body></html>"##;

    const THIN: &str = r##"<html><head><style>
          .a { color: #1e3a8a; background: #ffffff; }
        </style></head><body></body></html>"##;

    fn extractor(
        page: &str,
        provider: Option<Arc<ScriptedProvider>>,
        screenshots: Option<Arc<FixedScreenshots>>,
    ) -> BrandExtractor {
        let fetcher = Arc::new(FakeFetcher::new().with_page("https://brand.test/", page));
        let collector = Collector::new(fetcher, &FetchConfig::default());
        BrandExtractor::new(
            collector,
            provider.map(|p| p as SharedProvider),
            screenshots.map(|s| s as SharedScreenshotProvider),
        )
        .with_retry(RetryPolicy::none())
    }

    fn url() -> Url {
        Url::parse("https://brand.test/").unwrap()
    }

    #[tokio::test]
    async fn test_sufficient_collector_skips_model() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let report = extractor(RICH, Some(provider.clone()), None)
            .extract(&url())
            .await
            .unwrap();

        assert!(!report.interpreted);
        assert_eq!(provider.call_count(), 0);
        assert_eq!(report.result.colors, vec!["#1e3a8a", "#028393", "#f65625"]);
        assert_eq!(report.result.fonts[0].family, "Merriweather");
    }

    #[tokio::test]
    async fn test_thin_page_without_model_uses_collector() {
        let result = extractor(THIN, None, None)
            .extract_brand_assets(&url())
            .await
            .unwrap();
        assert_eq!(result.colors, vec!["#1e3a8a"]);
        assert!(result.fonts.is_empty());
    }

    #[tokio::test]
    async fn test_thin_page_fills_gaps_from_vision_then_css() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(json!({
                "colors": ["#f65625", "#028393"],
                "fonts": [],
                "gradients": [],
                "description": "orange hero"
            })),
            Ok(json!({"colors": ["#7c3aed"], "fonts": ["Inter"]})),
        ]));
        let screenshots = Arc::new(FixedScreenshots::new(vec![1, 2, 3]));
        let report = extractor(THIN, Some(provider.clone()), Some(screenshots.clone()))
            .extract(&url())
            .await
            .unwrap();

        assert!(report.interpreted);
        assert!(report.screenshot_captured);
        assert_eq!(provider.call_count(), 2);
        assert_eq!(screenshots.capture_count(), 1);

        // vision first, collector fills to three
        assert_eq!(report.result.colors, vec!["#f65625", "#028393", "#1e3a8a"]);
        assert_eq!(report.result.fonts[0].family, "Inter");
        assert_eq!(report.contributions[0].source, SignalSource::Vision);
    }

    #[tokio::test]
    async fn test_screenshot_failure_is_silent() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(BrandError::LlmApi(
            "down".to_string(),
        ))]));
        let screenshots = Arc::new(FixedScreenshots::new(Vec::new()));
        let report = extractor(THIN, Some(provider.clone()), Some(screenshots))
            .extract(&url())
            .await
            .unwrap();

        assert!(!report.screenshot_captured);
        // only the CSS pass reached the model, and it failed
        assert_eq!(provider.call_count(), 1);
        assert_eq!(report.result.colors, vec!["#1e3a8a"]);
    }

    #[tokio::test]
    async fn test_missing_page_is_fatal() {
        let err = extractor(RICH, None, None)
            .extract(&Url::parse("https://other.test/").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, BrandError::Fetch { .. }));
    }
}
