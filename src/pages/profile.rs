use meeting_insight::core::preferences::Preferences;

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

pub fn profile_view(prefs: &Preferences, key_source: Option<&str>) -> String {
    let mut out = String::from("Profile\n\n");
    out.push_str(&format!("name             {}\n", prefs.name));
    out.push_str(&format!("email            {}\n", prefs.email));
    out.push_str(&format!("theme            {}\n", prefs.theme.as_keyword()));
    out.push_str(&format!("api-key          {}\n", prefs.masked_api_key()));
    out.push_str(&format!(
        "active key       {}\n",
        key_source.unwrap_or("none configured")
    ));

    out.push_str("\nNotifications\n");
    out.push_str(&format!(
        "task-completion  {}\n",
        on_off(prefs.notifications.task_completion)
    ));
    out.push_str(&format!(
        "daily-reminders  {}\n",
        on_off(prefs.notifications.daily_reminders)
    ));
    out.push_str(&format!(
        "weekly-reports   {}\n",
        on_off(prefs.notifications.weekly_reports)
    ));

    out.push_str("\nExtraction prompt\n");
    out.push_str(prefs.prompt());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_masked() {
        let mut prefs = Preferences::default();
        prefs.gemini_api_key = "abcdefgh1234".into();
        let view = profile_view(&prefs, Some("environment"));
        assert!(view.contains("********1234"));
        assert!(!view.contains("abcdefgh"));
        assert!(view.contains("environment"));
    }
}
