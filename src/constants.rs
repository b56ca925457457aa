//! Global Constants
//!
//! Centralized constants for extraction limits, fusion thresholds and
//! derivation tables. Tunable values are mirrored in `config` so they can be
//! overridden per project.

/// HTTP/Network constants
pub mod network {
    /// Desktop browser User-Agent sent with every page and stylesheet fetch
    pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

    /// Page navigation timeout (seconds)
    pub const PAGE_TIMEOUT_SECS: u64 = 30;

    /// Per-stylesheet fetch timeout (seconds)
    pub const STYLESHEET_TIMEOUT_SECS: u64 = 10;

    /// Screenshot capture timeout (seconds)
    pub const SCREENSHOT_TIMEOUT_SECS: u64 = 30;

    /// LLM request timeout (seconds)
    pub const LLM_TIMEOUT_SECS: u64 = 60;

    /// Maximum retries for LLM requests
    pub const MAX_LLM_RETRIES: usize = 2;

    /// Base delay for LLM retry backoff (milliseconds)
    pub const RETRY_BASE_DELAY_MS: u64 = 500;
}

/// Collector limits
pub mod collector {
    /// External stylesheets fetched per page
    pub const MAX_STYLESHEETS: usize = 5;

    /// Colors surfaced by the collector
    pub const MAX_COLORS: usize = 20;

    /// Fonts surfaced by the collector
    pub const MAX_FONTS: usize = 10;

    /// Logos surfaced by the collector
    pub const MAX_LOGOS: usize = 10;

    /// Headings, paragraphs and labels kept in extracted content
    pub const MAX_CONTENT_ITEMS: usize = 20;

    /// Minimum paragraph length kept in extracted content
    pub const MIN_PARAGRAPH_CHARS: usize = 40;

    /// Non-brand defaults removed from the color list (long and short forms)
    pub const COLOR_DENYLIST: &[&str] = &[
        "#000000", "#ffffff", "#333333", "#666666", "#999999", "#cccccc", "#000", "#fff",
        "#333", "#666", "#999", "#ccc",
    ];

    /// System and generic font families that never identify a brand
    pub const FONT_DENYLIST: &[&str] = &[
        "serif",
        "sans-serif",
        "monospace",
        "cursive",
        "fantasy",
        "system-ui",
        "ui-serif",
        "ui-sans-serif",
        "ui-monospace",
        "ui-rounded",
        "-apple-system",
        "blinkmacsystemfont",
        "segoe ui",
        "segoe ui emoji",
        "segoe ui symbol",
        "apple color emoji",
        "noto color emoji",
        "arial",
        "helvetica",
        "helvetica neue",
        "times",
        "times new roman",
        "courier",
        "courier new",
        "verdana",
        "tahoma",
        "inherit",
        "initial",
        "unset",
        "revert",
    ];
}

/// Interpreter constants
pub mod interpret {
    /// Collected colors below this count escalate to the interpreter
    pub const MIN_COLLECTED_COLORS: usize = 3;

    /// Raw color tokens included in the CSS summary prompt
    pub const PROMPT_MAX_COLORS: usize = 30;

    /// Font names included in the CSS summary prompt
    pub const PROMPT_MAX_FONTS: usize = 10;

    /// Brand-relevant custom properties included in the prompt
    pub const PROMPT_MAX_VARIABLES: usize = 40;

    /// Maximum characters of page description included in the prompt
    pub const PROMPT_MAX_DESCRIPTION_CHARS: usize = 500;

    /// Custom property name fragments that suggest brand relevance
    pub const BRAND_VARIABLE_HINTS: &[&str] = &["color", "primary", "secondary", "brand", "accent"];
}

/// Fusion sufficiency thresholds
pub mod fusion {
    /// Accepted colors at or above this count stop gap-filling
    pub const COLOR_SUFFICIENCY: usize = 3;

    /// Accepted fonts at or above this count stop gap-filling
    pub const FONT_SUFFICIENCY: usize = 1;
}

/// Color derivation constants
pub mod palette {
    /// Colors at or below this lightness are treated as text/background
    pub const MIN_ROLE_LIGHTNESS: u8 = 10;

    /// Colors at or above this lightness are treated as text/background
    pub const MAX_ROLE_LIGHTNESS: u8 = 90;

    /// Colors at or above this saturation rank ahead of muted ones
    pub const CHROMATIC_SATURATION: u8 = 20;

    /// ΔE below which two colors share a cluster
    pub const CLUSTER_THRESHOLD: f64 = 25.0;

    /// Minimum ΔE between secondary and primary
    pub const SECONDARY_DISTANCE: f64 = 30.0;

    /// Minimum ΔE between accent and primary
    pub const ACCENT_PRIMARY_DISTANCE: f64 = 40.0;

    /// Minimum ΔE between accent and secondary
    pub const ACCENT_SECONDARY_DISTANCE: f64 = 30.0;

    /// Saturation used for the neutral scale
    pub const NEUTRAL_SATURATION: f64 = 5.0;

    /// Fallback role colors
    pub const DEFAULT_PRIMARY: &str = "#1e3a5f";
    pub const DEFAULT_SECONDARY: &str = "#0d9488";
    pub const DEFAULT_ACCENT: &str = "#ff6f61";

    /// Utility colors (peach, light blue, slate)
    pub const UTILITY: &[(&str, &str)] = &[
        ("#fdba8c", "Peach"),
        ("#bae6fd", "Light Blue"),
        ("#64748b", "Slate"),
    ];

    /// Semantic colors
    pub const SUCCESS: &str = "#16a34a";
    pub const ERROR: &str = "#dc2626";
    pub const WARNING: &str = "#f59e0b";
    pub const INFO: &str = "#2563eb";

    /// WCAG thresholds
    pub const WCAG_AA: f64 = 4.5;
    pub const WCAG_AA_LARGE: f64 = 3.0;
    pub const WCAG_AAA: f64 = 7.0;
}

/// Typography defaults
pub mod typography {
    pub const DEFAULT_HEADLINES: &str = "Palatino Linotype";
    pub const DEFAULT_SUBHEADINGS: &str = "Montserrat";
    pub const DEFAULT_BODY: &str = "PT Sans";
    pub const DEFAULT_CODE: &str = "IBM Plex Mono";

    /// Default base size for the modular scale (px)
    pub const DEFAULT_BASE_SIZE: f64 = 16.0;

    /// Default modular scale ratio key
    pub const DEFAULT_RATIO: &str = "major-third";
}
