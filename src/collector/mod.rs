//! CSS/HTML Collector
//!
//! Static collection strategy: fetch the page, gather its CSS sources in
//! document order and harvest raw signals.
//!
//! 1. Fetch HTML (failure is fatal for the build)
//! 2. Inline `style=""` attributes, then `<style>` blocks
//! 3. Up to `max_stylesheets` linked sheets, fetched concurrently; each
//!    fetch failure or timeout is logged and skipped
//! 4. Google Fonts links and `theme-color` meta feed the same accumulator

pub mod css;
pub mod derive;
pub mod fetch;
pub mod google_fonts;
pub mod html;

pub use css::{BlockKind, FontEntry, RawCssData, RuleBlock, harvest_css, harvest_inline_style};
pub use derive::{dedupe_hex, derive_colors, derive_fonts, derive_gradients, is_denied_color};
pub use fetch::{HttpFetcher, PageFetcher, normalize_url};
pub use google_fonts::{is_google_fonts_url, parse_google_fonts_url};
pub use html::{HtmlScan, scan_html};

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::ai::with_timeout;
use crate::config::FetchConfig;
use crate::types::{ExtractedContent, ExtractionResult, Logo, Result};

/// Everything one page yields before interpretation
#[derive(Debug, Clone, Default)]
pub struct CollectedPage {
    pub url: Option<Url>,
    pub raw: RawCssData,
    pub logos: Vec<Logo>,
    pub content: ExtractedContent,
    /// Stylesheets that were fetched and harvested
    pub stylesheets_loaded: usize,
    /// CSS sources that needed the regex fallback
    pub fallback_parses: usize,
}

impl CollectedPage {
    /// Collector-only extraction result
    pub fn to_extraction(&self) -> ExtractionResult {
        ExtractionResult {
            colors: derive_colors(&self.raw),
            gradients: derive_gradients(&self.raw),
            fonts: derive_fonts(&self.raw),
            logos: self.logos.clone(),
            content: self.content.clone(),
        }
    }
}

pub struct Collector {
    fetcher: Arc<dyn PageFetcher>,
    max_stylesheets: usize,
    stylesheet_timeout: Duration,
}

impl Collector {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &FetchConfig) -> Self {
        Self {
            fetcher,
            max_stylesheets: config.max_stylesheets,
            stylesheet_timeout: Duration::from_secs(config.stylesheet_timeout_secs),
        }
    }

    /// Fetch and harvest one page
    #[instrument(skip_all, fields(url = %url))]
    pub async fn collect(&self, url: &Url) -> Result<CollectedPage> {
        let html = self.fetcher.fetch_text(url).await?;
        let scan = scan_html(&html, url)?;
        debug!(
            "HTML scanned: {} inline styles, {} style blocks, {} stylesheet links",
            scan.inline_styles.len(),
            scan.style_blocks.len(),
            scan.stylesheet_links.len()
        );

        let mut page = CollectedPage {
            url: Some(url.clone()),
            logos: scan.logos,
            content: scan.content,
            ..Default::default()
        };

        for color in &scan.theme_colors {
            page.raw.add_color(color);
        }
        for link in &scan.google_font_links {
            for font in parse_google_fonts_url(link) {
                page.raw.add_font(&font.family, &font.variants, font.source);
            }
        }

        for style in &scan.inline_styles {
            if !harvest_inline_style(style, &mut page.raw) {
                page.fallback_parses += 1;
            }
        }
        for (i, block) in scan.style_blocks.iter().enumerate() {
            if !harvest_css(block, &format!("<style> #{}", i + 1), &mut page.raw) {
                page.fallback_parses += 1;
            }
        }

        for (link, css) in self.fetch_stylesheets(&scan.stylesheet_links).await {
            if !harvest_css(&css, link.as_str(), &mut page.raw) {
                page.fallback_parses += 1;
            }
            page.stylesheets_loaded += 1;
        }

        info!(
            "Collected {} colors, {} gradients, {} fonts from {} stylesheets",
            page.raw.colors().len(),
            page.raw.gradients().len(),
            page.raw.fonts().len(),
            page.stylesheets_loaded
        );

        Ok(page)
    }

    /// Fetch linked sheets concurrently, keeping link order. Failed and
    /// timed-out fetches are dropped.
    async fn fetch_stylesheets(&self, links: &[Url]) -> Vec<(Url, String)> {
        let fetches = links.iter().take(self.max_stylesheets).map(|link| async move {
            let result = with_timeout(
                self.stylesheet_timeout,
                self.fetcher.fetch_text(link),
                "stylesheet fetch",
            )
            .await;
            (link, result)
        });

        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|(link, result)| match result {
                Ok(css) => Some((link.clone(), css)),
                Err(e) => {
                    warn!("Skipping stylesheet {}: {}", link, e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fetch::testing::FakeFetcher;
    use super::*;
    use crate::types::{BrandError, FontSource};

    const PAGE: &str = r##"<html><head>
        <meta name="theme-color" content="#1e3a8a">
        <link rel="stylesheet" href="/a.css">
        <link rel="stylesheet" href="/missing.css">
        <link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Merriweather:wght@400;700">
        <style>.x { color: #028393; font-family: "Work Sans", sans-serif; }</style>
        </head><body><div style="background: #ffffff; color: #f65625">Hi</div></body></html>"##;

    fn fetcher() -> Arc<FakeFetcher> {
        Arc::new(
            FakeFetcher::new()
                .with_page("https://brand.test/", PAGE)
                .with_page(
                    "https://brand.test/a.css",
                    ".btn { background: linear-gradient(45deg, #028393, #1e3a8a); border-color: #7c3aed; }",
                ),
        )
    }

    #[tokio::test]
    async fn test_collect_orders_sources() {
        let collector = Collector::new(fetcher(), &FetchConfig::default());
        let url = Url::parse("https://brand.test/").unwrap();
        let page = collector.collect(&url).await.unwrap();

        assert_eq!(page.stylesheets_loaded, 1);
        let result = page.to_extraction();
        assert_eq!(result.colors, vec!["#1e3a8a", "#f65625", "#028393", "#7c3aed"]);
        assert_eq!(result.gradients.len(), 1);
        assert_eq!(result.gradients[0].angle, Some(45.0));
        assert_eq!(result.fonts[0].family, "Merriweather");
        assert_eq!(result.fonts[0].source, Some(FontSource::GoogleFonts));
        assert_eq!(result.fonts[1].family, "Work Sans");
    }

    #[tokio::test]
    async fn test_page_fetch_failure_is_fatal() {
        let collector = Collector::new(fetcher(), &FetchConfig::default());
        let url = Url::parse("https://elsewhere.test/").unwrap();
        let err = collector.collect(&url).await.unwrap_err();
        assert!(matches!(err, BrandError::Fetch { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stylesheet_is_dropped() {
        let config = FetchConfig::default();
        let fake = Arc::new(
            FakeFetcher::new()
                .with_page(
                    "https://slow.test/",
                    r#"<html><head>
                    <link rel="stylesheet" href="/fast.css">
                    <link rel="stylesheet" href="/slow.css">
                    </head></html>"#,
                )
                .with_page("https://slow.test/fast.css", ".a { color: #028393; }")
                .with_slow_page(
                    "https://slow.test/slow.css",
                    ".b { color: #f65625; }",
                    Duration::from_secs(config.stylesheet_timeout_secs + 50),
                ),
        );
        let collector = Collector::new(fake, &config);
        let page = collector
            .collect(&Url::parse("https://slow.test/").unwrap())
            .await
            .unwrap();

        assert_eq!(page.stylesheets_loaded, 1);
        assert_eq!(page.to_extraction().colors, vec!["#028393"]);
    }

    #[tokio::test]
    async fn test_stylesheet_cap() {
        let links: String = (0..8)
            .map(|i| format!("<link rel=\"stylesheet\" href=\"/s{}.css\">", i))
            .collect();
        let fake = Arc::new(FakeFetcher::new().with_page(
            "https://cap.test/",
            &format!("<html><head>{}</head></html>", links),
        ));
        let collector = Collector::new(fake.clone(), &FetchConfig::default());
        collector
            .collect(&Url::parse("https://cap.test/").unwrap())
            .await
            .unwrap();

        // page + five stylesheets
        assert_eq!(fake.requested.lock().unwrap().len(), 6);
    }
}
