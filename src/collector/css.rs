//! CSS Signal Harvesting
//!
//! Each CSS source is parsed with tree-sitter into rule blocks. A source the
//! grammar rejects is re-read with a regex block scanner that produces the
//! same `RuleBlock` shape, so both paths feed one harvesting routine.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use tree_sitter::Node;

use crate::types::{
    BrandError, FontSource, Result, clean_font_family, extract_color_tokens, find_gradients,
    normalize_weight,
};

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid comment regex"));

/// Innermost `prelude { body }` pairs
static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^{}]*)\{([^{}]*)\}").expect("valid block regex"));

// =============================================================================
// Raw CSS Data
// =============================================================================

/// A font family seen in CSS, with every weight declared alongside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    pub family: String,
    pub weights: Vec<String>,
    pub source: Option<FontSource>,
}

/// Candidate signals accumulated across every CSS source of one page.
///
/// Insertion order is preserved everywhere: earlier sources (inline styles,
/// then `<style>` blocks, then linked sheets) rank as more prominent.
#[derive(Debug, Clone, Default)]
pub struct RawCssData {
    colors: Vec<String>,
    color_set: HashSet<String>,
    gradients: Vec<String>,
    gradient_set: HashSet<String>,
    fonts: Vec<FontEntry>,
    font_index: HashMap<String, usize>,
    css_variables: Vec<(String, String)>,
    variable_index: HashMap<String, usize>,
}

impl RawCssData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw color tokens in first-seen order
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn gradients(&self) -> &[String] {
        &self.gradients
    }

    pub fn fonts(&self) -> &[FontEntry] {
        &self.fonts
    }

    /// Custom properties in first-declared order; a redeclaration updates
    /// the value in place
    pub fn css_variables(&self) -> &[(String, String)] {
        &self.css_variables
    }

    pub fn css_variable(&self, name: &str) -> Option<&str> {
        self.variable_index
            .get(name)
            .map(|&i| self.css_variables[i].1.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.gradients.is_empty()
            && self.fonts.is_empty()
            && self.css_variables.is_empty()
    }

    pub fn add_color(&mut self, token: &str) {
        let token = token.trim().to_string();
        if !token.is_empty() && self.color_set.insert(token.to_lowercase()) {
            self.colors.push(token);
        }
    }

    pub fn add_gradient(&mut self, css: &str) {
        let css = css.trim().to_string();
        if self.gradient_set.insert(css.clone()) {
            self.gradients.push(css);
        }
    }

    /// Record a family; weights merge into an existing entry, and the first
    /// recorded source is kept
    pub fn add_font(&mut self, family: &str, weights: &[String], source: Option<FontSource>) {
        let key = family.trim().to_lowercase();
        if key.is_empty() {
            return;
        }

        let index = match self.font_index.get(&key) {
            Some(&i) => i,
            None => {
                self.fonts.push(FontEntry {
                    family: family.trim().to_string(),
                    weights: Vec::new(),
                    source,
                });
                self.font_index.insert(key, self.fonts.len() - 1);
                self.fonts.len() - 1
            }
        };

        let entry = &mut self.fonts[index];
        if entry.source.is_none() {
            entry.source = source;
        }
        for weight in weights {
            if !entry.weights.contains(weight) {
                entry.weights.push(weight.clone());
            }
        }
    }

    pub fn set_variable(&mut self, name: &str, value: &str) {
        match self.variable_index.get(name) {
            Some(&i) => self.css_variables[i].1 = value.to_string(),
            None => {
                self.css_variables.push((name.to_string(), value.to_string()));
                self.variable_index
                    .insert(name.to_string(), self.css_variables.len() - 1);
            }
        }
    }
}

// =============================================================================
// Rule Blocks
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Ordinary style rule (also keyframe and nested rules)
    Style,
    /// `@font-face`
    FontFace,
}

/// Declarations of one `{ ... }` block, property names lowercased and values
/// stripped of `!important`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBlock {
    pub kind: BlockKind,
    pub declarations: Vec<(String, String)>,
}

impl RuleBlock {
    fn value_of(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }
}

fn clean_value(raw: &str) -> String {
    let value = raw.trim().trim_end_matches(';').trim();
    // ASCII lowering keeps byte offsets valid for slicing `value`
    let lower = value.to_ascii_lowercase();
    match lower.rfind("!important") {
        Some(pos) => value[..pos].trim().to_string(),
        None => value.to_string(),
    }
}

// =============================================================================
// Strict Parse (tree-sitter)
// =============================================================================

fn create_css_parser() -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_css::LANGUAGE.into())
        .map_err(|e| BrandError::Parse {
            source_name: "css".to_string(),
            message: format!("Failed to set CSS language: {}", e),
        })?;
    Ok(parser)
}

/// Parse a stylesheet into rule blocks. Any syntax error fails the whole
/// source so the caller can fall back.
pub fn parse_rule_blocks(css: &str, source_name: &str) -> Result<Vec<RuleBlock>> {
    let mut parser = create_css_parser()?;
    let tree = parser.parse(css, None).ok_or_else(|| BrandError::Parse {
        source_name: source_name.to_string(),
        message: "Parser produced no tree".to_string(),
    })?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(BrandError::Parse {
            source_name: source_name.to_string(),
            message: format!(
                "Syntax error near line {}",
                first_error_row(root).map_or(0, |row| row + 1)
            ),
        });
    }

    let mut blocks = Vec::new();
    visit(root, css.as_bytes(), &mut blocks);
    Ok(blocks)
}

fn first_error_row(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row);
    }
    let mut cursor = node.walk();
    node.children(&mut cursor).find_map(first_error_row)
}

fn visit(node: Node, source: &[u8], blocks: &mut Vec<RuleBlock>) {
    let kind = match node.kind() {
        "rule_set" | "keyframe_block" => Some(BlockKind::Style),
        "at_rule" if at_keyword(node, source).eq_ignore_ascii_case("@font-face") => {
            Some(BlockKind::FontFace)
        }
        _ => None,
    };

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "block" {
            if let Some(kind) = kind {
                blocks.push(RuleBlock {
                    kind,
                    declarations: declarations(child, source),
                });
            }
            // Nested rules and @media / @supports bodies
            let mut inner = child.walk();
            for grandchild in child.children(&mut inner) {
                if grandchild.kind() != "declaration" {
                    visit(grandchild, source, blocks);
                }
            }
        } else {
            visit(child, source, blocks);
        }
    }
}

fn at_keyword<'a>(node: Node, source: &'a [u8]) -> &'a str {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .find(|c| c.kind() == "at_keyword")
        .and_then(|c| c.utf8_text(source).ok())
        .unwrap_or("")
}

fn declarations(block: Node, source: &[u8]) -> Vec<(String, String)> {
    let mut cursor = block.walk();
    block
        .children(&mut cursor)
        .filter(|c| c.kind() == "declaration")
        .filter_map(|decl| {
            let mut inner = decl.walk();
            let children: Vec<Node> = decl.children(&mut inner).collect();
            let name = children
                .iter()
                .find(|c| c.kind() == "property_name")?
                .utf8_text(source)
                .ok()?;
            // Value is everything between the colon and the end of the node
            let colon = children.iter().find(|c| c.kind() == ":")?;
            let raw = std::str::from_utf8(&source[colon.end_byte()..decl.end_byte()]).ok()?;
            Some((name.trim().to_lowercase(), clean_value(raw)))
        })
        .collect()
}

// =============================================================================
// Fallback Parse (regex)
// =============================================================================

/// Lenient reading of a stylesheet the grammar rejected
pub fn scan_rule_blocks(css: &str) -> Vec<RuleBlock> {
    let css = COMMENT_RE.replace_all(css, "");

    BLOCK_RE
        .captures_iter(&css)
        .map(|caps| {
            let prelude = caps[1].trim().to_lowercase();
            let kind = if prelude.ends_with("@font-face") {
                BlockKind::FontFace
            } else {
                BlockKind::Style
            };
            let declarations = caps[2]
                .split(';')
                .filter_map(|decl| {
                    let (name, value) = decl.split_once(':')?;
                    let name = name.trim().to_lowercase();
                    if name.is_empty() {
                        return None;
                    }
                    Some((name, clean_value(value)))
                })
                .collect();
            RuleBlock { kind, declarations }
        })
        .collect()
}

// =============================================================================
// Harvest
// =============================================================================

fn is_color_property(property: &str) -> bool {
    matches!(
        property,
        "color" | "background" | "background-color" | "border-color" | "fill" | "stroke"
    ) || (property.starts_with("border-") && property.ends_with("-color"))
}

fn is_color_variable(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("color") || lower.contains("bg") || lower.contains("background")
}

/// Parse one CSS source and fold its signals into `raw`. Returns whether the
/// strict parse succeeded.
pub fn harvest_css(css: &str, source_name: &str, raw: &mut RawCssData) -> bool {
    let (blocks, strict) = match parse_rule_blocks(css, source_name) {
        Ok(blocks) => (blocks, true),
        Err(e) => {
            debug!("Falling back to regex scan for {}: {}", source_name, e);
            (scan_rule_blocks(css), false)
        }
    };

    for block in &blocks {
        harvest_block(block, raw);
    }
    strict
}

/// Harvest an inline `style=""` attribute
pub fn harvest_inline_style(style: &str, raw: &mut RawCssData) -> bool {
    harvest_css(&format!("x{{{}}}", style), "inline style", raw)
}

fn harvest_block(block: &RuleBlock, raw: &mut RawCssData) {
    if block.kind == BlockKind::FontFace {
        if let Some(family) = block.value_of("font-family").and_then(clean_font_family) {
            let weights = block.value_of("font-weight").map(normalize_weight).unwrap_or_default();
            raw.add_font(&family, &weights, Some(FontSource::FontFace));
        }
        return;
    }

    for (property, value) in &block.declarations {
        if property.starts_with("--") {
            raw.set_variable(property, value);
            if is_color_variable(property) {
                for token in extract_color_tokens(value) {
                    raw.add_color(&token);
                }
            }
            continue;
        }

        if is_color_property(property) {
            for token in extract_color_tokens(value) {
                raw.add_color(&token);
            }
        }

        if property == "background" || property == "background-image" {
            for gradient in find_gradients(value) {
                raw.add_gradient(&gradient);
            }
        }

        if property == "font-family"
            && let Some(family) = clean_font_family(value)
        {
            let weights = block.value_of("font-weight").map(normalize_weight).unwrap_or_default();
            raw.add_font(&family, &weights, Some(FontSource::Stylesheet));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_parse_collects_rules_and_media() {
        let css = r#"
            .hero { color: #1e3a8a; background: linear-gradient(to right, #1e3a8a, #028393); }
            @media (min-width: 768px) {
                .cta { background-color: rgb(246, 86, 37) !important; }
            }
        "#;
        let blocks = parse_rule_blocks(css, "test.css").unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].declarations[0], ("color".to_string(), "#1e3a8a".to_string()));
        assert_eq!(
            blocks[1].declarations[0],
            ("background-color".to_string(), "rgb(246, 86, 37)".to_string())
        );
    }

    #[test]
    fn test_font_face_block() {
        let css = "@font-face { font-family: 'Brand Sans'; font-weight: 700; }";
        let blocks = parse_rule_blocks(css, "fonts.css").unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::FontFace);
    }

    #[test]
    fn test_harvest_signals() {
        let mut raw = RawCssData::new();
        let css = r#"
            :root { --brand-color: #028393; --spacing: 4px; }
            body { font-family: "Inter", sans-serif; font-weight: 400; color: #1e3a8a; }
            h1 { font-family: Inter; font-weight: bold; }
            .btn { border-top-color: hsl(14, 92%, 56%); fill: #f65625; }
            .banner { background-image: radial-gradient(circle, #fff, #028393); }
        "#;
        assert!(harvest_css(css, "test.css", &mut raw));

        assert_eq!(raw.colors(), &["#028393", "#1e3a8a", "hsl(14, 92%, 56%)", "#f65625"]);
        assert_eq!(raw.gradients(), &["radial-gradient(circle, #fff, #028393)"]);
        assert_eq!(raw.fonts().len(), 1);
        assert_eq!(raw.fonts()[0].family, "Inter");
        assert_eq!(raw.fonts()[0].weights, vec!["400", "700"]);
        assert_eq!(raw.css_variable("--spacing"), Some("4px"));
    }

    #[test]
    fn test_broken_css_falls_back_to_regex() {
        let mut raw = RawCssData::new();
        let css = ".a { color: #123456; } .b { color: ; : } .c { background-color: #abcdef }}";
        assert!(!harvest_css(css, "broken.css", &mut raw));
        assert!(raw.colors().contains(&"#123456".to_string()));
        assert!(raw.colors().contains(&"#abcdef".to_string()));
    }

    #[test]
    fn test_regex_scan_font_face() {
        let blocks = scan_rule_blocks("/* x */ @font-face { font-family: Brand; font-weight: 300 }");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::FontFace);
        assert_eq!(blocks[0].value_of("font-weight"), Some("300"));
    }

    #[test]
    fn test_inline_style() {
        let mut raw = RawCssData::new();
        harvest_inline_style("color: #ff0066; font-family: 'Lora', serif", &mut raw);
        assert_eq!(raw.colors(), &["#ff0066"]);
        assert_eq!(raw.fonts()[0].family, "Lora");
    }

    #[test]
    fn test_important_after_non_ascii_value() {
        // Kelvin sign and dotted capital I change length under Unicode lowering
        let kelvin = ".a { content: \"\u{212A}\u{212A}€\" !important; color: #1e3a8a; }";
        let dotted = format!(".b {{ content: \"{}\" !IMPORTANT; color: #028393; }}", "İ".repeat(12));

        let mut raw = RawCssData::new();
        harvest_css(kelvin, "kelvin.css", &mut raw);
        harvest_css(&dotted, "dotted.css", &mut raw);
        harvest_inline_style("content: \"€€\" !important; color: #f65625", &mut raw);
        assert_eq!(raw.colors(), &["#1e3a8a", "#028393", "#f65625"]);

        assert_eq!(clean_value("\"\u{212A}€\" !important;"), "\"\u{212A}€\"");
        assert_eq!(clean_value("\"İİ\""), "\"İİ\"");
    }

    #[test]
    fn test_variables_redeclared_in_place() {
        let mut raw = RawCssData::new();
        raw.set_variable("--a", "1");
        raw.set_variable("--b", "2");
        raw.set_variable("--a", "3");
        assert_eq!(
            raw.css_variables(),
            &[("--a".to_string(), "3".to_string()), ("--b".to_string(), "2".to_string())]
        );
    }
}
