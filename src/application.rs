use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use chrono::{Local, Utc};
use thiserror::Error;

use meeting_insight::ai::gemini::{GeminiClient, test_api_key};
use meeting_insight::ai::{Extract, ExtractError, TranscriptError, keyring, validate_transcript};
use meeting_insight::config::{self, AppConfig, ConfigError};
use meeting_insight::core::action_item::{ActionItem, StatusFilter};
use meeting_insight::core::task_list::TaskList;
use meeting_insight::core::template::Template;
use meeting_insight::store::backup::{export_backup_json, import_backup};
use meeting_insight::store::{LocalStore, StoreError};
use meeting_insight::views::TimeRange;
use meeting_insight::views::analytics::analytics_report;
use meeting_insight::views::dashboard::{DashboardExport, DashboardSummary};
use meeting_insight::views::history::{HistoryQuery, filter_history, group_sessions};

use crate::components::task_row::short_id;
use crate::message::{Command, KeyAction, ProfileAction};
use crate::pages;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error("Failed to generate action items: {0}")]
    Extract(#[from] ExtractError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> AppError {
    move |source| AppError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Find the item an id or unique id prefix refers to.
pub fn resolve_id(items: &[ActionItem], needle: &str) -> Result<String, AppError> {
    if let Some(item) = items.iter().find(|i| i.id == needle) {
        return Ok(item.id.clone());
    }
    let matches: Vec<&ActionItem> = items.iter().filter(|i| i.id.starts_with(needle)).collect();
    match matches.as_slice() {
        [] => Err(AppError::Usage(format!("No action item matches {:?}", needle))),
        [only] => Ok(only.id.clone()),
        _ => Err(AppError::Usage(format!(
            "{:?} matches {} action items, use a longer prefix",
            needle,
            matches.len()
        ))),
    }
}

/// Where an export goes: the given file, or a default name inside the given directory.
fn export_target(path: &Path, default_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(default_name)
    } else {
        path.to_path_buf()
    }
}

pub struct App {
    config: AppConfig,
    store: LocalStore,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let store = LocalStore::new(config.data_directory.clone());
        Self { config, store }
    }

    pub async fn run(&self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Serve { listen } => self.serve(listen).await,
            Command::Extract {
                text,
                file,
                template,
            } => self.extract(text, file, template).await,
            Command::List => {
                let list = TaskList::load(self.store.clone());
                println!("{}", pages::home::home_view(list.items()));
                Ok(())
            }
            Command::Toggle { id } => self.toggle(&id),
            Command::Delete { id } => self.delete(&id),
            Command::Dashboard { range, export } => self.dashboard(range, export.as_deref()),
            Command::Analytics { range } => {
                let items = self.store.load_items();
                let report = analytics_report(&items, range, Utc::now(), &Local);
                println!("{}", pages::analytics::analytics_view(&report));
                Ok(())
            }
            Command::History {
                search,
                status,
                session,
                export,
            } => {
                let query = HistoryQuery {
                    session,
                    search,
                    status: StatusFilter::from_keyword(&status).unwrap_or_default(),
                };
                self.history(&query, export.as_deref())
            }
            Command::Templates { id } => {
                match id {
                    Some(id) => {
                        let template = Template::find(&id)
                            .ok_or_else(|| AppError::Usage(format!("Unknown template {:?}", id)))?;
                        println!("{}", pages::templates::template_view(template));
                    }
                    None => println!("{}", pages::templates::templates_view()),
                }
                Ok(())
            }
            Command::Profile { action } => self.profile(action).await,
            Command::Export { path } => {
                let json = export_backup_json(&self.store, Utc::now())?;
                let target = export_target(
                    &path,
                    &format!("meeting-insight-backup-{}.json", Local::now().format("%Y-%m-%d")),
                );
                std::fs::write(&target, json).map_err(io_error(&target))?;
                println!("Backup written to {}", target.display());
                Ok(())
            }
            Command::Import { path } => {
                let content = std::fs::read_to_string(&path).map_err(io_error(&path))?;
                let summary = import_backup(&self.store, &content)?;
                match summary.items {
                    Some(n) => println!("Imported {} action items", n),
                    None => println!("Backup has no action items, list left unchanged"),
                }
                if summary.preferences {
                    println!("Imported preferences");
                }
                Ok(())
            }
            Command::Clear { yes } => {
                if !yes {
                    return Err(AppError::Usage(
                        "This deletes all action items and preferences. \
                         Re-run with --yes to confirm."
                            .to_string(),
                    ));
                }
                self.store.clear()?;
                log::info!("Cleared all data in {}", self.store.root().display());
                println!("All data cleared");
                Ok(())
            }
            Command::Key { action } => match action {
                KeyAction::Set { key } => {
                    let key = key.trim();
                    if key.is_empty() {
                        return Err(AppError::Usage("API key is empty".to_string()));
                    }
                    match test_api_key(key, &self.config.model).await {
                        Ok(msg) => println!("{}", msg),
                        Err(e) => log::warn!("Storing key that failed verification: {}", e),
                    }
                    keyring::store_api_key(key).await.map_err(AppError::Usage)?;
                    println!("API key stored in the system keyring");
                    Ok(())
                }
                KeyAction::Clear => {
                    keyring::delete_api_key().await.map_err(AppError::Usage)?;
                    println!("API key removed from the system keyring");
                    Ok(())
                }
            },
        }
    }

    /// Where the active credential comes from. The key saved in the profile is
    /// only ever displayed, never used.
    async fn key_source(&self) -> Option<&'static str> {
        if config::api_key_from_env().is_some() {
            return Some("environment");
        }
        if let Ok(Some(_)) = keyring::load_api_key().await {
            return Some("system keyring");
        }
        None
    }

    /// Client for the environment or keyring credential; fails when neither is set.
    async fn client(&self) -> Result<GeminiClient, AppError> {
        let key = config::resolve_api_key().await?;
        Ok(GeminiClient::new(key).with_model(&self.config.model))
    }

    async fn serve(&self, listen: Option<String>) -> Result<(), AppError> {
        let listen = listen.unwrap_or_else(|| self.config.listen.clone());
        let addr: SocketAddr = listen
            .parse()
            .map_err(|e| AppError::Usage(format!("Invalid listen address {:?}: {}", listen, e)))?;
        let client = self.client().await?;
        log::info!("Using model {}", client.model());
        meeting_insight::server::serve(addr, client, self.store.clone())
            .await
            .map_err(AppError::Serve)
    }

    async fn extract(
        &self,
        text: Option<String>,
        file: Option<PathBuf>,
        template: Option<String>,
    ) -> Result<(), AppError> {
        let transcript = match (text, file, template) {
            (Some(text), _, _) => text,
            (_, Some(path), _) => std::fs::read_to_string(&path).map_err(io_error(&path))?,
            (_, _, Some(id)) => Template::find(&id)
                .map(Template::content)
                .ok_or_else(|| AppError::Usage(format!("Unknown template {:?}", id)))?,
            (None, None, None) => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(io_error(Path::new("<stdin>")))?;
                buf
            }
        };

        validate_transcript(&transcript)?;
        let client = self.client().await?;
        let added = self.extract_with(&client, &transcript).await?;
        println!("{}", pages::home::extracted_view(&added));
        Ok(())
    }

    /// Validate, extract with the current profile prompt, and put the new items
    /// at the front of the list. Returns the added items.
    async fn extract_with<E: Extract>(
        &self,
        extractor: &E,
        transcript: &str,
    ) -> Result<Vec<ActionItem>, AppError> {
        validate_transcript(transcript)?;
        let prefs = self.store.load_preferences();
        log::info!("Extracting action items from a {} character transcript", transcript.len());
        let texts = extractor.extract(prefs.prompt(), transcript).await?;

        let mut list = TaskList::load(self.store.clone());
        Ok(list.add_batch(&texts, Utc::now())?.to_vec())
    }

    fn toggle(&self, needle: &str) -> Result<(), AppError> {
        let mut list = TaskList::load(self.store.clone());
        let id = resolve_id(list.items(), needle)?;
        if let Some(completed) = list.toggle(&id)? {
            println!(
                "{} marked {}",
                short_id(&id),
                if completed { "completed" } else { "pending" }
            );
        }
        Ok(())
    }

    fn delete(&self, needle: &str) -> Result<(), AppError> {
        let mut list = TaskList::load(self.store.clone());
        let id = resolve_id(list.items(), needle)?;
        if let Some(item) = list.remove(&id)? {
            println!("Deleted \"{}\"", item.text);
        }
        Ok(())
    }

    fn dashboard(&self, range: TimeRange, export: Option<&Path>) -> Result<(), AppError> {
        let items = self.store.load_items();
        let now = Utc::now();
        let summary = DashboardSummary::new(&items, range, now);
        println!("{}", pages::dashboard::dashboard_view(&summary));

        if let Some(path) = export {
            let export = DashboardExport::new(&items, range, now);
            let target = export_target(path, &export.file_name(range));
            let json = serde_json::to_string_pretty(&export).map_err(StoreError::from)?;
            std::fs::write(&target, json).map_err(io_error(&target))?;
            println!("Dashboard exported to {}", target.display());
        }
        Ok(())
    }

    fn history(&self, query: &HistoryQuery, export: Option<&Path>) -> Result<(), AppError> {
        let items = self.store.load_items();
        let sessions = group_sessions(&items, &Local);
        let matches = filter_history(&items, &sessions, query);
        println!("{}", pages::history::history_view(&sessions, &matches, query));

        if let (Some(path), Some(id)) = (export, query.session.as_deref()) {
            let session = sessions
                .iter()
                .find(|s| s.id == id)
                .ok_or_else(|| AppError::Usage(format!("No session on {}", id)))?;
            let target = export_target(path, &session.export_file_name());
            let json = serde_json::to_string_pretty(&session.export()).map_err(StoreError::from)?;
            std::fs::write(&target, json).map_err(io_error(&target))?;
            println!("Session exported to {}", target.display());
        }
        Ok(())
    }

    async fn profile(&self, action: Option<ProfileAction>) -> Result<(), AppError> {
        let mut prefs = self.store.load_preferences();
        if let Some(ProfileAction::Set { field, value }) = action {
            prefs.set_field(&field, &value).map_err(AppError::Usage)?;
            self.store.save_preferences(&prefs)?;
            println!("Updated {}", field);
        }
        let source = self.key_source().await;
        println!("{}", pages::profile::profile_view(&prefs, source));
        Ok(())
    }
}
