use clap::Parser;

mod application;
mod components;
mod message;
mod pages;

use meeting_insight::config::{APP_NAME, AppConfig};

use application::App;
use message::Cli;

/// Library and binary share this target prefix.
const LOG_TARGET: &str = "meeting_insight";

fn init_logging(journal: bool) -> Result<(), Box<dyn std::error::Error>> {
    if journal {
        // `journalctl --user -t meeting-insight -f`
        // Our crate at info (debug when toggled), everything else at warn.
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                if metadata.target().starts_with(LOG_TARGET) {
                    let max = if meeting_insight::debug_logging() {
                        log::LevelFilter::Debug
                    } else {
                        log::LevelFilter::Info
                    };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        let journal = systemd_journal_logger::JournalLog::new()?
            .with_syslog_identifier(APP_NAME.to_string());
        log::set_boxed_logger(Box::new(FilteredJournal { inner: journal }))?;
        // Global max must be Debug so our debug logs can pass through when toggled
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        let own = if meeting_insight::debug_logging() {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .filter_module(LOG_TARGET, own)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(dir) = cli.data_dir.clone() {
        config.data_directory = dir;
    }
    meeting_insight::set_debug_logging(config.debug_logging || cli.debug);

    init_logging(cli.journal)?;
    log::debug!("Data directory: {}", config.data_directory.display());

    let app = App::new(config);
    if let Err(e) = app.run(cli.command).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
