//! `authproof chat` — Interactive or single-message chat mode.

use std::io::Write as _;
use std::sync::Arc;

use authproof_agent::{AgentEvent, AgentRunner, ChannelSink, PersistingSink};
use authproof_config::AppConfig;
use authproof_core::agent::AgentConfig;
use authproof_core::message::Conversation;
use authproof_core::provider::Provider;
use authproof_core::store::ConversationStore;
use authproof_providers::OpenAiCompatProvider;
use authproof_store::{FileStore, InMemoryStore};
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for an API key early — give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    DEEPSEEK_API_KEY=sk-...    (recommended)");
        eprintln!("    AUTHPROOF_API_KEY=sk-...   (generic)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!(
            "    {}",
            AppConfig::config_dir().join("config.toml").display()
        );
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let api_key = config.api_key.clone().unwrap_or_default();
    let provider: Arc<dyn Provider> = Arc::new(OpenAiCompatProvider::new(
        "deepseek",
        &config.base_url,
        api_key,
    )?);
    let tools = Arc::new(authproof_tools::default_registry());
    let runner = AgentRunner::new(
        provider,
        tools,
        AgentConfig {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_rounds: config.agent.max_rounds,
        },
    );

    let store: Arc<dyn ConversationStore> = match config.store.backend.as_str() {
        "memory" => Arc::new(InMemoryStore::new()),
        _ => Arc::new(FileStore::open(config.store_path())),
    };

    let mut conversation = Conversation::new();

    if let Some(msg) = message {
        // Single message mode
        chat_once(&runner, &store, &mut conversation, &msg).await?;
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  AuthProof — device authorization test assistant");
    println!();
    println!("  Model:  {}", config.model);
    println!("  Store:  {}", store.name());
    println!("  Tools:  {}", authproof_tools::default_registry().names().join(", "));
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            prompt()?;
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        chat_once(&runner, &store, &mut conversation, line).await?;
        prompt()?;
    }

    Ok(())
}

/// Run one turn, rendering events as they arrive, then persist.
async fn chat_once(
    runner: &AgentRunner,
    store: &Arc<dyn ConversationStore>,
    conversation: &mut Conversation,
    message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (channel, mut rx) = ChannelSink::pair();
    let sink = PersistingSink::new(channel, store.clone());

    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            render(&event);
        }
    });

    runner.run(conversation, message, &sink).await;
    sink.finish(conversation).await?;

    drop(sink); // closes the channel so the printer drains and exits
    printer.await?;
    Ok(())
}

fn render(event: &AgentEvent) {
    match event {
        AgentEvent::ToolCall {
            tool_name,
            parameters,
        } => {
            println!("  [tool] {tool_name} {parameters}");
        }
        AgentEvent::AssistantMessage { content, .. } => {
            println!();
            for line in content.lines() {
                println!("  Assistant > {line}");
            }
            println!();
        }
        AgentEvent::Error { message } => {
            eprintln!("  [error] {message}");
        }
        AgentEvent::Complete => {}
    }
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}
