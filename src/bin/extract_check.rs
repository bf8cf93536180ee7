//! Verify the configured Gemini key and run one extraction against a bundled
//! template, without touching the stored action items.

use meeting_insight::ai::Extract;
use meeting_insight::ai::gemini::{GeminiClient, test_api_key};
use meeting_insight::config::AppConfig;
use meeting_insight::core::preferences::DEFAULT_PROMPT;
use meeting_insight::core::template::TEMPLATES;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            println!("Config error: {}", e);
            return;
        }
    };

    println!("=== Gemini extraction check ===\n");
    println!("Model: {}", config.model);

    let key = match meeting_insight::config::resolve_api_key().await {
        Ok(k) => k,
        Err(e) => {
            println!("  {}", e);
            return;
        }
    };

    match test_api_key(&key, &config.model).await {
        Ok(msg) => println!("  {}", msg),
        Err(e) => {
            println!("  Key check failed: {}", e);
            return;
        }
    }

    let client = GeminiClient::new(key).with_model(&config.model);
    for template in TEMPLATES {
        println!("\n--- {} ---", template.title);
        match client.extract(DEFAULT_PROMPT, &template.content()).await {
            Ok(items) if items.is_empty() => println!("  (no action items)"),
            Ok(items) => {
                for item in items {
                    println!("  - {}", item);
                }
            }
            Err(e) => println!("  Error: {}", e),
        }
    }
}
