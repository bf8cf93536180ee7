use meeting_insight::core::template::{Template, by_category, categories};

pub fn templates_view() -> String {
    let mut out = String::from("Meeting templates\n");
    for category in categories() {
        out.push_str(&format!("\n{}\n", category));
        for template in by_category(category) {
            out.push_str(&format!(
                "  {:<18} {}\n  {:<18} {}\n",
                template.id, template.title, "", template.description
            ));
        }
    }
    out.push_str("\nUse `meeting-insight extract --template <id>` to submit one.\n");
    out
}

pub fn template_view(template: &Template) -> String {
    format!(
        "{} ({})\n{}\n\n{}\n",
        template.title,
        template.category,
        template.description,
        template.content()
    )
}
