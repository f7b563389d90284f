use super::item::{CatalogueItem, ItemKind};

struct DataSourceSeed {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    description: &'static str,
    icon: &'static str,
    brand_color: &'static str,
    fields: &'static [&'static str],
    webhook_url: Option<&'static str>,
}

const DATA_SOURCES: &[DataSourceSeed] = &[
    DataSourceSeed {
        id: "clay-table",
        title: "Clay Table",
        category: "Clay",
        description: "Import enriched company data from Clay tables",
        icon: "database",
        brand_color: "#FF6B35",
        fields: &["Company Name", "Industry", "Employee Count", "Website", "Revenue"],
        webhook_url: None,
    },
    DataSourceSeed {
        id: "hubspot-contacts",
        title: "HubSpot Contacts",
        category: "HubSpot",
        description: "Sync contacts and deals from HubSpot CRM",
        icon: "users",
        brand_color: "#FF7A59",
        fields: &["Contact Name", "Email", "Company", "Deal Stage", "Last Activity"],
        webhook_url: None,
    },
    DataSourceSeed {
        id: "salesforce-leads",
        title: "Salesforce Leads",
        category: "Salesforce",
        description: "Import leads and opportunities from Salesforce",
        icon: "briefcase",
        brand_color: "#00A1E0",
        fields: &["Lead Name", "Company", "Status", "Source", "Score"],
        webhook_url: None,
    },
    DataSourceSeed {
        id: "webhook-trigger",
        title: "Webhook Trigger",
        category: "Real-time",
        description: "Receive real-time data via webhook endpoints",
        icon: "zap",
        brand_color: "#8B5CF6",
        fields: &["Dynamic Payload", "Timestamp", "Source IP", "Event Type"],
        webhook_url: Some("https://api.promptflow.com/webhook/abc123"),
    },
    DataSourceSeed {
        id: "csv-upload",
        title: "CSV Upload",
        category: "File",
        description: "Upload and process CSV data files",
        icon: "file-text",
        brand_color: "#10B981",
        fields: &["Dynamic Headers", "Row Count", "File Size", "Upload Date"],
        webhook_url: None,
    },
];

pub(super) fn data_sources() -> Vec<CatalogueItem> {
    DATA_SOURCES
        .iter()
        .map(|seed| CatalogueItem {
            id: seed.id.to_string(),
            kind: ItemKind::DataSource,
            title: seed.title.to_string(),
            category: seed.category.to_string(),
            description: seed.description.to_string(),
            content: String::new(),
            fields: seed.fields.iter().map(|f| f.to_string()).collect(),
            brand_color: Some(seed.brand_color.to_string()),
            icon: Some(seed.icon.to_string()),
            // Only webhook sources push data as it arrives.
            is_realtime: seed.webhook_url.is_some(),
            webhook_url: seed.webhook_url.map(str::to_string),
        })
        .collect()
}

struct PromptSeed {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    description: &'static str,
    content: &'static str,
}

// Shown when the prompt source cannot be loaded.
const FALLBACK_PROMPTS: &[PromptSeed] = &[
    PromptSeed {
        id: "1",
        title: "Linux Terminal",
        category: "Development",
        description: "Act as a linux terminal and execute commands",
        content: "I want you to act as a linux terminal. I will type commands and you will reply with what the terminal should show.",
    },
    PromptSeed {
        id: "2",
        title: "English Translator",
        category: "Language",
        description: "Translate and improve English text",
        content: "I want you to act as an English translator, spelling corrector and improver.",
    },
];

pub(super) fn fallback_prompts() -> Vec<CatalogueItem> {
    FALLBACK_PROMPTS
        .iter()
        .map(|seed| CatalogueItem {
            id: seed.id.to_string(),
            kind: ItemKind::Prompt,
            title: seed.title.to_string(),
            category: seed.category.to_string(),
            description: seed.description.to_string(),
            content: seed.content.to_string(),
            fields: Vec::new(),
            brand_color: None,
            icon: None,
            is_realtime: false,
            webhook_url: None,
        })
        .collect()
}
