use serde::{Deserialize, Serialize};

/// Instruction text sent ahead of every transcript unless the user overrides it.
pub const DEFAULT_PROMPT: &str = "Analyze the following meeting transcript \
and extract actionable tasks. \n\
Return ONLY a JSON array of strings, where each string is a specific, actionable task.\n\
Each task should be clear, concise, and include who should do it if mentioned.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Notifications {
    pub task_completion: bool,
    pub daily_reminders: bool,
    pub weekly_reports: bool,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            task_completion: true,
            daily_reminders: false,
            weekly_reports: true,
        }
    }
}

/// User-level settings stored under their own key.
///
/// Every field has a default so partially written records load cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub name: String,
    pub email: String,
    pub notifications: Notifications,
    pub gemini_api_key: String,
    pub theme: Theme,
    pub default_prompt: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            notifications: Notifications::default(),
            gemini_api_key: String::new(),
            theme: Theme::default(),
            default_prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl Preferences {
    /// Instructions for the extraction prompt, falling back to the default when blank.
    pub fn prompt(&self) -> &str {
        if self.default_prompt.trim().is_empty() {
            DEFAULT_PROMPT
        } else {
            &self.default_prompt
        }
    }

    /// The stored key with all but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.gemini_api_key.chars().collect();
        if chars.is_empty() {
            return String::new();
        }
        let keep = chars.len().min(4);
        let hidden = chars.len() - keep;
        let tail: String = chars[hidden..].iter().collect();
        format!("{}{}", "*".repeat(hidden), tail)
    }

    /// Apply a single `field=value` style update. Returns an error message for
    /// unknown fields or invalid values.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), String> {
        let parse_bool = |v: &str| -> Result<bool, String> {
            match v {
                "true" | "on" | "yes" => Ok(true),
                "false" | "off" | "no" => Ok(false),
                _ => Err(format!("Expected true/false, got {:?}", v)),
            }
        };
        match field {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "api-key" | "gemini-api-key" => self.gemini_api_key = value.to_string(),
            "theme" => {
                self.theme = Theme::from_keyword(value)
                    .ok_or_else(|| format!("Unknown theme {:?}", value))?
            }
            "prompt" | "default-prompt" => self.default_prompt = value.to_string(),
            "task-completion" => self.notifications.task_completion = parse_bool(value)?,
            "daily-reminders" => self.notifications.daily_reminders = parse_bool(value)?,
            "weekly-reports" => self.notifications.weekly_reports = parse_bool(value)?,
            _ => return Err(format!("Unknown preference {:?}", field)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_record_merges_over_defaults() {
        let raw = r#"{"name":"Ada","notifications":{"dailyReminders":true}}"#;
        let prefs: Preferences = serde_json::from_str(raw).unwrap();
        assert_eq!(prefs.name, "Ada");
        assert!(prefs.notifications.daily_reminders);
        assert!(prefs.notifications.task_completion);
        assert_eq!(prefs.theme, Theme::System);
        assert_eq!(prefs.prompt(), DEFAULT_PROMPT);
    }

    #[test]
    fn blank_prompt_falls_back() {
        let prefs = Preferences {
            default_prompt: "   ".into(),
            ..Preferences::default()
        };
        assert_eq!(prefs.prompt(), DEFAULT_PROMPT);
    }

    #[test]
    fn masks_key() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.masked_api_key(), "");
        prefs.gemini_api_key = "abcdef123".into();
        assert_eq!(prefs.masked_api_key(), "*****f123");
        prefs.gemini_api_key = "ab".into();
        assert_eq!(prefs.masked_api_key(), "ab");
    }

    #[test]
    fn set_field_validates() {
        let mut prefs = Preferences::default();
        prefs.set_field("theme", "dark").unwrap();
        prefs.set_field("weekly-reports", "off").unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
        assert!(!prefs.notifications.weekly_reports);
        assert!(prefs.set_field("theme", "neon").is_err());
        assert!(prefs.set_field("colour", "red").is_err());
    }
}
