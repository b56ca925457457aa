//! HTML Scanning
//!
//! One tree-sitter pass over the page collects everything the later stages
//! read from markup: CSS sources in document order, Google Fonts links,
//! `theme-color`, logo candidates and the page's textual content.

use std::collections::HashSet;

use tree_sitter::Node;
use url::Url;

use super::google_fonts::is_google_fonts_url;
use crate::constants::collector::{MAX_CONTENT_ITEMS, MAX_LOGOS, MIN_PARAGRAPH_CHARS};
use crate::types::{BrandError, ExtractedContent, Logo, LogoKind, Result};

/// Longest nav/button label kept
const MAX_LABEL_CHARS: usize = 60;

#[derive(Debug, Clone, Default)]
pub struct HtmlScan {
    /// `style=""` attribute values in document order
    pub inline_styles: Vec<String>,
    /// `<style>` element bodies in document order
    pub style_blocks: Vec<String>,
    /// Absolute `<link rel=stylesheet>` URLs, Google Fonts excluded
    pub stylesheet_links: Vec<Url>,
    pub google_font_links: Vec<Url>,
    /// `<meta name="theme-color">` values
    pub theme_colors: Vec<String>,
    pub logos: Vec<Logo>,
    pub content: ExtractedContent,
}

fn create_html_parser() -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_html::LANGUAGE.into())
        .map_err(|e| BrandError::Parse {
            source_name: "html".to_string(),
            message: format!("Failed to set HTML language: {}", e),
        })?;
    Ok(parser)
}

/// Scan a page. The HTML grammar recovers from malformed markup, so only a
/// parser setup failure is an error.
pub fn scan_html(html: &str, page_url: &Url) -> Result<HtmlScan> {
    let mut parser = create_html_parser()?;
    let tree = parser.parse(html, None).ok_or_else(|| BrandError::Parse {
        source_name: page_url.to_string(),
        message: "Parser produced no tree".to_string(),
    })?;

    let mut scanner = Scanner {
        source: html.as_bytes(),
        base: page_url.clone(),
        scan: HtmlScan::default(),
        og_description: None,
        og_title: None,
        seen_urls: HashSet::new(),
        seen_labels: HashSet::new(),
    };
    scanner.visit(tree.root_node(), Context::default());
    Ok(scanner.finish())
}

#[derive(Debug, Clone, Copy, Default)]
struct Context {
    in_nav: bool,
    in_logo: bool,
}

struct Scanner<'a> {
    source: &'a [u8],
    base: Url,
    scan: HtmlScan,
    og_description: Option<String>,
    og_title: Option<String>,
    seen_urls: HashSet<String>,
    seen_labels: HashSet<String>,
}

struct Tag {
    name: String,
    attributes: Vec<(String, String)>,
}

impl Tag {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn mentions_logo(&self) -> bool {
        ["class", "id", "alt", "src", "aria-label"]
            .iter()
            .filter_map(|name| self.attr(name))
            .any(|value| value.to_lowercase().contains("logo"))
    }
}

impl<'a> Scanner<'a> {
    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn visit(&mut self, node: Node, ctx: Context) {
        match node.kind() {
            "element" => self.visit_element(node, ctx),
            "style_element" => {
                if let Some(body) = child_of_kind(node, "raw_text") {
                    let css = self.text(body).trim();
                    if !css.is_empty() {
                        self.scan.style_blocks.push(css.to_string());
                    }
                }
            }
            "script_element" | "comment" => {}
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.visit(child, ctx);
                }
            }
        }
    }

    fn visit_element(&mut self, node: Node, ctx: Context) {
        let Some(tag_node) = child_of_kind(node, "start_tag")
            .or_else(|| child_of_kind(node, "self_closing_tag"))
        else {
            return;
        };
        let tag = self.read_tag(tag_node);

        if let Some(style) = tag.attr("style")
            && !style.trim().is_empty()
        {
            self.scan.inline_styles.push(style.to_string());
        }

        match tag.name.as_str() {
            "html" => {
                if let Some(lang) = tag.attr("lang") {
                    self.scan.content.language = Some(lang.trim().to_string());
                }
            }
            "title" => {
                if self.scan.content.title.is_none() {
                    let title = self.inner_text(node);
                    if !title.is_empty() {
                        self.scan.content.title = Some(title);
                    }
                }
            }
            "meta" => self.visit_meta(&tag),
            "link" => self.visit_link(&tag),
            "img" => {
                if tag.mentions_logo() || ctx.in_logo {
                    let src = tag.attr("src").or_else(|| tag.attr("data-src"));
                    if let Some(url) = src.and_then(|s| self.resolve(s)) {
                        let alt = tag.attr("alt").map(str::to_string);
                        self.push_logo(url.to_string(), LogoKind::Image, alt);
                    }
                }
            }
            "svg" => {
                if tag.mentions_logo() || ctx.in_logo {
                    let markup = self.text(node).trim().to_string();
                    let label = tag.attr("aria-label").map(str::to_string);
                    self.push_logo(markup, LogoKind::InlineSvg, label);
                }
                return;
            }
            "h1" | "h2" | "h3" => {
                let heading = self.inner_text(node);
                if !heading.is_empty() && self.scan.content.headings.len() < MAX_CONTENT_ITEMS {
                    self.scan.content.headings.push(heading);
                }
            }
            "p" => {
                let paragraph = self.inner_text(node);
                if paragraph.chars().count() >= MIN_PARAGRAPH_CHARS
                    && self.scan.content.paragraphs.len() < MAX_CONTENT_ITEMS
                {
                    self.scan.content.paragraphs.push(paragraph);
                }
            }
            "button" => self.push_label(node),
            "a" if ctx.in_nav => self.push_label(node),
            _ => {}
        }

        let child_ctx = Context {
            in_nav: ctx.in_nav || tag.name == "nav",
            in_logo: ctx.in_logo || (tag.name != "img" && tag.mentions_logo()),
        };
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.id() != tag_node.id() {
                self.visit(child, child_ctx);
            }
        }
    }

    fn visit_meta(&mut self, tag: &Tag) {
        let Some(content) = tag.attr("content").map(str::trim).filter(|c| !c.is_empty()) else {
            return;
        };
        let key = tag
            .attr("name")
            .or_else(|| tag.attr("property"))
            .unwrap_or("")
            .to_lowercase();

        match key.as_str() {
            "description" => self.scan.content.description = Some(content.to_string()),
            "og:description" => self.og_description = Some(content.to_string()),
            "og:title" => self.og_title = Some(content.to_string()),
            "og:site_name" => self.scan.content.site_name = Some(content.to_string()),
            "application-name" if self.scan.content.site_name.is_none() => {
                self.scan.content.site_name = Some(content.to_string())
            }
            "keywords" => {
                self.scan.content.keywords = content
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "theme-color" => self.scan.theme_colors.push(content.to_string()),
            "og:image" => {
                if let Some(url) = self.resolve(content) {
                    self.push_logo(url.to_string(), LogoKind::OpenGraph, None);
                }
            }
            _ => {}
        }
    }

    fn visit_link(&mut self, tag: &Tag) {
        let Some(href) = tag.attr("href") else {
            return;
        };
        let rel = tag.attr("rel").unwrap_or("").to_lowercase();
        let rels: Vec<&str> = rel.split_whitespace().collect();
        let Some(url) = self.resolve(href) else {
            return;
        };

        // Any rel counts for Google Fonts (preload, stylesheet); a bare
        // preconnect origin names no families
        if is_google_fonts_url(&url) {
            if url.query().is_some() && !self.scan.google_font_links.contains(&url) {
                self.scan.google_font_links.push(url);
            }
        } else if rels.contains(&"stylesheet") {
            if !self.scan.stylesheet_links.contains(&url) {
                self.scan.stylesheet_links.push(url);
            }
        } else if rels
            .iter()
            .any(|r| r.starts_with("apple-touch-icon") || *r == "mask-icon")
        {
            self.push_logo(url.to_string(), LogoKind::TouchIcon, None);
        } else if rels.contains(&"icon") {
            self.push_logo(url.to_string(), LogoKind::Favicon, None);
        }
    }

    fn read_tag(&self, tag_node: Node) -> Tag {
        let mut name = String::new();
        let mut attributes = Vec::new();

        let mut cursor = tag_node.walk();
        for child in tag_node.children(&mut cursor) {
            match child.kind() {
                "tag_name" => name = self.text(child).to_lowercase(),
                "attribute" => {
                    let Some(attr_name) = child_of_kind(child, "attribute_name") else {
                        continue;
                    };
                    let value = child_of_kind(child, "attribute_value")
                        .or_else(|| {
                            child_of_kind(child, "quoted_attribute_value")
                                .and_then(|q| child_of_kind(q, "attribute_value"))
                        })
                        .map(|v| decode_entities(self.text(v)))
                        .unwrap_or_default();
                    attributes.push((self.text(attr_name).to_lowercase(), value));
                }
                _ => {}
            }
        }

        Tag { name, attributes }
    }

    /// Visible text below `node`, whitespace collapsed
    fn inner_text(&self, node: Node) -> String {
        let mut parts = Vec::new();
        self.collect_text(node, &mut parts);
        parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collect_text(&self, node: Node, parts: &mut Vec<String>) {
        match node.kind() {
            "text" => parts.push(self.text(node).to_string()),
            "entity" => parts.push(decode_entities(self.text(node))),
            "script_element" | "style_element" | "comment" | "start_tag" | "end_tag" => {}
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.collect_text(child, parts);
                }
            }
        }
    }

    fn push_label(&mut self, node: Node) {
        let label = self.inner_text(node);
        if label.is_empty()
            || label.chars().count() > MAX_LABEL_CHARS
            || self.scan.content.labels.len() >= MAX_CONTENT_ITEMS
        {
            return;
        }
        if self.seen_labels.insert(label.to_lowercase()) {
            self.scan.content.labels.push(label);
        }
    }

    fn push_logo(&mut self, url: String, kind: LogoKind, alt: Option<String>) {
        if url.is_empty() || !self.seen_urls.insert(url.clone()) {
            return;
        }
        let alt = alt.filter(|a| !a.trim().is_empty());
        self.scan.logos.push(Logo { url, kind, alt });
    }

    fn resolve(&self, href: &str) -> Option<Url> {
        let url = self.base.join(href.trim()).ok()?;
        matches!(url.scheme(), "http" | "https" | "data").then_some(url)
    }

    fn finish(mut self) -> HtmlScan {
        if self.scan.content.description.is_none() {
            self.scan.content.description = self.og_description.take();
        }
        if self.scan.content.title.is_none() {
            self.scan.content.title = self.og_title.take();
        }
        self.scan.logos.sort_by_key(|logo| logo.kind);
        self.scan.logos.truncate(MAX_LOGOS);
        self.scan
    }
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

/// Decode the character references that matter for URLs and copy text
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').filter(|&end| end <= 10).and_then(|end| {
            let entity = &tail[1..end];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, end))
        });

        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Acme Rockets | Launch faster</title>
  <meta name="description" content="Reusable rockets for everyone.">
  <meta property="og:site_name" content="Acme">
  <meta property="og:image" content="/og.png">
  <meta name="theme-color" content="#1e3a8a">
  <meta name="keywords" content="rockets, launch, space">
  <link rel="icon" href="/favicon.ico">
  <link rel="apple-touch-icon" href="/touch.png">
  <link rel="stylesheet" href="/css/app.css">
  <link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Inter:wght@400;700&amp;display=swap">
  <style>.hero { color: #028393; }</style>
</head>
<body>
  <header class="site-logo"><a href="/"><svg viewBox="0 0 10 10"><path d="M0 0h10v10z"/></svg></a></header>
  <nav><a href="/pricing">Pricing</a><a href="/about">About &amp; team</a></nav>
  <h1 style="color: #f65625">Launch <em>faster</em></h1>
  <p>Short.</p>
  <p>Our reusable boosters land themselves so your payload costs less every time.</p>
  <img src="/img/acme-logo.svg" alt="Acme logo">
  <button>Get started</button>
  <script>var x = "<p>ignored paragraph that is long enough to be counted</p>";</script>
</body>
</html>"##;

    fn scan() -> HtmlScan {
        scan_html(PAGE, &Url::parse("https://acme.test/home").unwrap()).unwrap()
    }

    #[test]
    fn test_css_sources() {
        let scan = scan();
        assert_eq!(scan.inline_styles, vec!["color: #f65625"]);
        assert_eq!(scan.style_blocks, vec![".hero { color: #028393; }"]);
        assert_eq!(scan.stylesheet_links.len(), 1);
        assert_eq!(scan.stylesheet_links[0].as_str(), "https://acme.test/css/app.css");
        assert_eq!(scan.google_font_links.len(), 1);
        assert!(scan.google_font_links[0].as_str().contains("display=swap"));
        assert_eq!(scan.theme_colors, vec!["#1e3a8a"]);
    }

    #[test]
    fn test_content() {
        let content = scan().content;
        assert_eq!(content.title.as_deref(), Some("Acme Rockets | Launch faster"));
        assert_eq!(content.description.as_deref(), Some("Reusable rockets for everyone."));
        assert_eq!(content.site_name.as_deref(), Some("Acme"));
        assert_eq!(content.language.as_deref(), Some("en"));
        assert_eq!(content.keywords, vec!["rockets", "launch", "space"]);
        assert_eq!(content.headings, vec!["Launch faster"]);
        assert_eq!(content.paragraphs.len(), 1);
        assert_eq!(content.labels, vec!["Pricing", "About & team", "Get started"]);
    }

    #[test]
    fn test_logos_ordered_by_kind() {
        let logos = scan().logos;
        let kinds: Vec<LogoKind> = logos.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LogoKind::InlineSvg,
                LogoKind::Image,
                LogoKind::TouchIcon,
                LogoKind::OpenGraph,
                LogoKind::Favicon
            ]
        );
        assert_eq!(logos[1].url, "https://acme.test/img/acme-logo.svg");
        assert_eq!(logos[1].alt.as_deref(), Some("Acme logo"));
        assert!(logos[0].url.starts_with("<svg"));
    }

    #[test]
    fn test_google_fonts_from_any_link_rel() {
        let html = r#"<html><head>
            <link rel="preconnect" href="https://fonts.googleapis.com">
            <link rel="preload" as="style" href="https://fonts.googleapis.com/css2?family=Inter:wght@400;700">
            <link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Inter:wght@400;700">
            </head></html>"#;
        let scan = scan_html(html, &Url::parse("https://fonts.test/").unwrap()).unwrap();
        assert_eq!(scan.google_font_links.len(), 1);
        assert!(scan.google_font_links[0].as_str().contains("family=Inter"));
        assert!(scan.stylesheet_links.is_empty());
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b &#39;c&#x27; &unknown; &"), "a & b 'c' &unknown; &");
    }
}
