//! Prompt Builder
//!
//! Sectioned prompt construction shared by CSS interpretation, screenshot
//! analysis and personality analysis. Every prompt ends with an explicit
//! JSON contract so responses can go through the same repair path.

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Role definition with expertise area
    Role { expertise: String, task: String },
    /// Numbered objectives
    Objectives(Vec<String>),
    /// Bulleted list under a header; omitted when empty
    List { header: String, items: Vec<String> },
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// JSON shape the model must return
    Output(String),
}

#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, expertise: &str, task: &str) -> Self {
        self.sections.push(PromptSection::Role {
            expertise: expertise.to_string(),
            task: task.to_string(),
        });
        self
    }

    pub fn objectives(mut self, objectives: &[&str]) -> Self {
        self.sections.push(PromptSection::Objectives(
            objectives.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub fn list(mut self, header: &str, items: Vec<String>) -> Self {
        self.sections.push(PromptSection::List {
            header: header.to_string(),
            items,
        });
        self
    }

    pub fn text(mut self, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: None,
            content: content.to_string(),
        });
        self
    }

    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    /// Add optional text under a header, skipped when `None` or blank
    pub fn optional_section(self, header: &str, content: Option<&str>) -> Self {
        match content.map(str::trim) {
            Some(c) if !c.is_empty() => self.section(header, c),
            _ => self,
        }
    }

    pub fn output(mut self, json_shape: &str) -> Self {
        self.sections.push(PromptSection::Output(json_shape.to_string()));
        self
    }

    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role { expertise, task } => {
                    prompt.push_str("<ROLE>\n");
                    prompt.push_str(&format!(
                        "You are an expert {} specializing in {}.\n",
                        expertise, task
                    ));
                    prompt.push_str("</ROLE>\n\n");
                }
                PromptSection::Objectives(objectives) => {
                    prompt.push_str("<OBJECTIVES>\n");
                    for (i, obj) in objectives.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, obj));
                    }
                    prompt.push_str("</OBJECTIVES>\n\n");
                }
                PromptSection::List { header, items } => {
                    if items.is_empty() {
                        continue;
                    }
                    prompt.push_str(&format!("# {}\n\n", header));
                    for item in items {
                        prompt.push_str(&format!("- {}\n", item));
                    }
                    prompt.push('\n');
                }
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("# {}\n\n", h));
                    }
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Output(shape) => {
                    prompt.push_str("<OUTPUT>\n");
                    prompt.push_str("Respond ONLY with valid JSON of this shape, no explanation:\n");
                    prompt.push_str(&shape);
                    prompt.push_str("\n</OUTPUT>\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_prompt() {
        let prompt = PromptBuilder::new()
            .role("brand designer", "color systems")
            .objectives(&["Pick brand colors", "Name them"])
            .build();

        assert!(prompt.contains("<ROLE>"));
        assert!(prompt.contains("brand designer"));
        assert!(prompt.contains("1. Pick brand colors"));
        assert!(prompt.contains("2. Name them"));
    }

    #[test]
    fn test_empty_list_skipped() {
        let prompt = PromptBuilder::new()
            .list("Colors", vec![])
            .list("Fonts", vec!["Inter".to_string()])
            .build();

        assert!(!prompt.contains("# Colors"));
        assert!(prompt.contains("# Fonts\n\n- Inter"));
    }

    #[test]
    fn test_optional_section() {
        let prompt = PromptBuilder::new()
            .optional_section("Title", Some("Acme"))
            .optional_section("Description", None)
            .optional_section("Keywords", Some("  "))
            .build();

        assert_eq!(prompt, "# Title\n\nAcme");
    }

    #[test]
    fn test_output_contract() {
        let prompt = PromptBuilder::new().output(r#"{"colors": []}"#).build();
        assert!(prompt.contains("valid JSON"));
        assert!(prompt.ends_with("</OUTPUT>"));
    }
}
