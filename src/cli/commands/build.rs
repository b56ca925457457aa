//! Build Command
//!
//! Generate a brand kit for one page.
//!
//! Usage:
//!   brandkit build <url> [-f json|yaml] [-o FILE] [--no-ai] [--db FILE]

use std::path::PathBuf;
use std::sync::Arc;

use crate::ai::create_provider;
use crate::cli::ui::{Output, OutputFormat, emit, render};
use crate::collector::normalize_url;
use crate::config::{Config, ConfigLoader};
use crate::interpret::create_screenshot_provider;
use crate::pipeline::{BrandExtractor, BrandKit, BrandKitBuilder, StepStatus};
use crate::storage::{Database, MemoryStepStore, SharedStepStore};
use crate::types::Result;

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub url: String,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub no_ai: bool,
    pub db: Option<PathBuf>,
}

fn step_store(config: &Config, db: Option<PathBuf>) -> Result<SharedStepStore> {
    match db.or_else(|| config.storage.database_path.clone()) {
        Some(path) => {
            let database = Database::open(&path)?;
            database.initialize()?;
            tracing::debug!("Tracking steps in {}", path.display());
            Ok(Arc::new(database))
        }
        None => Ok(Arc::new(MemoryStepStore::new())),
    }
}

pub async fn run(options: BuildOptions) -> Result<()> {
    let config = ConfigLoader::load()?;
    let url = normalize_url(&options.url)?;

    let (provider, screenshots) = if options.no_ai {
        (None, None)
    } else {
        (
            create_provider(&config.llm)?,
            create_screenshot_provider(&config.screenshot)?,
        )
    };
    if provider.is_none() && !options.no_ai {
        tracing::info!("No LLM credential configured; running without model assistance");
    }

    let extractor = BrandExtractor::from_config(&config, provider, screenshots)?;
    let builder = BrandKitBuilder::new(extractor)
        .with_store(step_store(&config, options.db)?)
        .with_palette_config(config.palette)
        .with_typography_config(config.typography.clone());

    let kit = builder.build(&url).await?;

    match render(&kit, options.format)? {
        Some(content) => emit(&content, options.output.as_deref())?,
        None => print_summary(&kit),
    }
    Ok(())
}

fn print_summary(kit: &BrandKit) {
    let out = Output::new();
    out.header(&format!(
        "Brand kit: {}",
        kit.name.as_deref().unwrap_or(kit.url.as_str())
    ));

    out.section("Colors");
    out.color("primary", &kit.palette.primary.base);
    out.color("secondary", &kit.palette.secondary.base);
    out.color("accent", &kit.palette.accent.base);
    let neutrals: Vec<&str> = kit.palette.neutral.iter().map(|c| c.hex()).collect();
    out.field("neutral", &neutrals.join(" "));

    out.section("Typography");
    let fonts = &kit.typography.fonts;
    out.field("headlines", &fonts.headlines.family);
    out.field("subheadings", &fonts.subheadings.family);
    out.field("body", &fonts.body.family);
    out.field("code", &fonts.code.family);

    out.section("Voice");
    out.field("archetype", &kit.personality.archetype.to_string());
    out.field("tone", &kit.voice.tone.join(", "));

    out.section("Build");
    out.field("job", &kit.job_id);
    out.field("gradients", &kit.gradients.len().to_string());
    out.field("tokens", &kit.tokens.len().to_string());
    out.field(
        "model",
        if kit.extraction.interpreted { "used" } else { "not needed" },
    );

    let skipped = kit
        .steps
        .iter()
        .filter(|s| s.status == StepStatus::Skipped)
        .count();
    println!();
    out.success(&format!(
        "{} steps completed, {} skipped",
        kit.steps.len() - skipped,
        skipped
    ));
}
