use rust_embed::RustEmbed;
use serde::Serialize;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct TemplateAssets;

/// A canned meeting transcript the user can fill in and submit.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

pub const TEMPLATES: &[Template] = &[
    Template {
        id: "weekly-standup",
        title: "Weekly Team Standup",
        description: "Template for regular team standup meetings",
        category: "Team Meetings",
    },
    Template {
        id: "project-kickoff",
        title: "Project Kickoff Meeting",
        description: "Comprehensive template for starting new projects",
        category: "Project Management",
    },
    Template {
        id: "client-meeting",
        title: "Client Meeting",
        description: "Professional template for client interactions",
        category: "Client Relations",
    },
    Template {
        id: "quarterly-review",
        title: "Quarterly Business Review",
        description: "Strategic planning and performance review template",
        category: "Strategic Planning",
    },
];

impl Template {
    pub fn find(id: &str) -> Option<&'static Template> {
        TEMPLATES.iter().find(|t| t.id == id)
    }

    /// Transcript text for this template, trailing newline stripped.
    pub fn content(&self) -> String {
        TemplateAssets::get(&format!("{}.txt", self.id))
            .map(|file| String::from_utf8_lossy(&file.data).trim_end().to_string())
            .unwrap_or_default()
    }
}

/// Categories in the order they first appear.
pub fn categories() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for t in TEMPLATES {
        if !out.contains(&t.category) {
            out.push(t.category);
        }
    }
    out
}

pub fn by_category(category: &str) -> Vec<&'static Template> {
    TEMPLATES.iter().filter(|t| t.category == category).collect()
}
