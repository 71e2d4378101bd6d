use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use git::{GitCommitter, VersionControl};
use notes::NoteStore;
use server::RpcServer;
use tools::{ToolContext, ToolRegistry};

mod config;
mod git;
mod notes;
mod server;
mod tools;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    // stdout carries RPC responses; env_logger writes to stderr
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config::defaults::LOG_FILTER),
    )
    .init();

    log::info!("Notes backend v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let notes_store = Arc::new(NoteStore::new(&config.notes_dir));
    if let Err(e) = notes_store.ensure_store() {
        log::error!("Failed to initialize notes directory: {}", e);
        std::process::exit(1);
    }
    log::info!("[NOTES] Using notes directory {}", config.notes_dir.display());

    let mut context = ToolContext::new(notes_store);
    if config.git_enabled {
        let git = GitCommitter::new(&config.notes_dir, config.commit_template.clone());
        if !git.is_repository().await {
            log::warn!(
                "[GIT] {} is not a git repository; notes will not be committed",
                config.notes_dir.display()
            );
        }
        context = context.with_version_control(Arc::new(git));
    } else {
        log::info!("[GIT] Disabled");
    }

    let registry = ToolRegistry::with_builtin_tools();
    log::info!("[RPC] Serving {} tools on stdio", registry.list().len());

    let server = RpcServer::new(registry, context);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    server.serve(stdin, tokio::io::stdout()).await
}
