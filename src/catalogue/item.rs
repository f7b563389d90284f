use crate::config::EngineConfig;
use crate::graph::{NodeKind, NodePayload, NodeSpec};
use serde::{Deserialize, Serialize};

/// Descriptor of something that can be dropped on the canvas.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_realtime: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Prompt,
    DataSource,
}

impl From<ItemKind> for NodeKind {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Prompt => NodeKind::Prompt,
            ItemKind::DataSource => NodeKind::DataSource,
        }
    }
}

impl CatalogueItem {
    /// Builds the node spec for a drop: default position, kind-dependent size.
    ///
    /// A prompt node shows the item's description when it has one, otherwise
    /// the full prompt text.
    pub fn to_node_spec(&self, config: &EngineConfig) -> NodeSpec {
        let content = if self.description.is_empty() {
            self.content.clone()
        } else {
            self.description.clone()
        };

        let (size, payload) = match self.kind {
            ItemKind::Prompt => (config.prompt_size, NodePayload::prompt(content)),
            ItemKind::DataSource => (
                config.data_source_size,
                NodePayload::DataSource {
                    fields: self.fields.clone(),
                    webhook_url: self.webhook_url.clone(),
                    is_realtime: self.is_realtime,
                    brand_color: self.brand_color.clone(),
                    icon: self.icon.clone(),
                },
            ),
        };

        NodeSpec {
            title: self.title.clone(),
            category: self.category.clone(),
            position: config.default_position,
            size,
            item_id: Some(self.id.clone()),
            payload,
        }
    }

    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [&self.title, &self.description, &self.content]
            .iter()
            .any(|text| text.to_lowercase().contains(&term))
    }
}

/// Builds a prompt item from a `(title, content)` row of the prompt list.
///
/// The category is guessed from keywords in the title and a leading
/// "Act as a/an" is dropped from the displayed title.
pub fn prompt_from_row(index: usize, title: &str, content: &str) -> CatalogueItem {
    let title = if title.trim().is_empty() {
        format!("Prompt {}", index + 1)
    } else {
        title.trim().to_string()
    };

    CatalogueItem {
        id: (index + 1).to_string(),
        kind: ItemKind::Prompt,
        category: categorize(&title).to_string(),
        title: strip_act_as(&title).to_string(),
        description: summarize(content, 100),
        content: content.to_string(),
        fields: Vec::new(),
        brand_color: None,
        icon: None,
        is_realtime: false,
        webhook_url: None,
    }
}

const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Development", &["developer", "code", "programming"]),
    ("Writing", &["writer", "content", "essay"]),
    ("Education", &["teacher", "tutor", "explain"]),
    ("Business", &["business", "consultant", "analyst"]),
    ("Creative", &["creative", "artist", "design"]),
];

fn categorize(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or("General", |(category, _)| *category)
}

fn strip_act_as(title: &str) -> &str {
    let lower = title.to_lowercase();
    for prefix in ["act as an ", "act as a ", "act as "] {
        if lower.starts_with(prefix) {
            return title.get(prefix.len()..).unwrap_or(title);
        }
    }
    title
}

fn summarize(content: &str, max_chars: usize) -> String {
    if content.chars().count() > max_chars {
        let head: String = content.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_categorized_by_title() {
        assert_eq!(prompt_from_row(0, "Act as a Python Developer", "").category, "Development");
        assert_eq!(prompt_from_row(0, "Essay Writer", "").category, "Writing");
        assert_eq!(prompt_from_row(0, "Math Tutor", "").category, "Education");
        assert_eq!(prompt_from_row(0, "Linux Terminal", "").category, "General");
    }

    #[test]
    fn act_as_prefix_is_stripped() {
        assert_eq!(prompt_from_row(0, "Act as an Interviewer", "").title, "Interviewer");
        assert_eq!(prompt_from_row(0, "act as a Poet", "").title, "Poet");
        assert_eq!(prompt_from_row(0, "Storyteller", "").title, "Storyteller");
    }

    #[test]
    fn blank_title_gets_a_numbered_name() {
        let item = prompt_from_row(4, "  ", "text");
        assert_eq!(item.title, "Prompt 5");
        assert_eq!(item.id, "5");
    }

    #[test]
    fn long_content_is_summarized() {
        let content = "x".repeat(150);
        let item = prompt_from_row(0, "Long", &content);
        assert_eq!(item.description.len(), 103);
        assert!(item.description.ends_with("..."));
        assert_eq!(item.content.len(), 150);
    }

    #[test]
    fn data_source_drop_uses_data_source_size() {
        let config = EngineConfig::default();
        let item = CatalogueItem {
            id: "csv-upload".to_string(),
            kind: ItemKind::DataSource,
            title: "CSV Upload".to_string(),
            category: "File".to_string(),
            description: String::new(),
            content: String::new(),
            fields: vec!["Row Count".to_string()],
            brand_color: Some("#10B981".to_string()),
            icon: Some("file-text".to_string()),
            is_realtime: false,
            webhook_url: None,
        };
        let spec = item.to_node_spec(&config);
        assert_eq!(spec.size, config.data_source_size);
        assert_eq!(spec.position, config.default_position);
        assert_eq!(spec.payload.kind(), NodeKind::DataSource);
    }
}
