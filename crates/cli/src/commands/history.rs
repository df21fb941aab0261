//! `authproof history` — List stored conversations.

use authproof_config::AppConfig;
use authproof_core::store::ConversationStore;
use authproof_store::FileStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = FileStore::open(config.store_path());

    let summaries = store.list().await?;
    if summaries.is_empty() {
        println!("  No stored conversations.");
        return Ok(());
    }

    println!();
    for summary in summaries {
        println!(
            "  {}  {:>3} messages  {}  {}",
            summary.updated_at.format("%Y-%m-%d %H:%M"),
            summary.message_count,
            summary.id,
            summary.title.as_deref().unwrap_or("(untitled)"),
        );
    }
    println!();

    Ok(())
}
