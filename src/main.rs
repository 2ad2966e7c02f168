// flashroll station binary
// Thin command-line harness over the core library for local smoke runs;
// the real station UI talks to the same services.

use flashroll::store::RollFilter;
use flashroll::{
    DesignService, DocumentStore, FileBackend, FolderService, HistoryService, StorageBackend,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flashroll=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting flashroll station");

    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("flashroll");
    let backend = Arc::new(FileBackend::new(data_dir));
    if let Err(e) = backend.initialize() {
        eprintln!("failed to initialize storage: {}", e);
        std::process::exit(1);
    }

    let store = DocumentStore::new(backend.clone() as Arc<dyn StorageBackend>);
    store.initialize();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("roll");

    match command {
        "folders" => {
            for folder in FolderService::new(store).list() {
                println!("{:>13}  {}", folder.id, folder.name);
            }
        }
        "designs" => {
            for entry in DesignService::new(store).list_all(RollFilter::All) {
                let marker = if entry.is_available == 1 { " " } else { "x" };
                println!("{} {:>13}  {}", marker, entry.design.id, entry.design.name);
            }
        }
        "roll" => match DesignService::new(store).roll() {
            Some(design) => println!("Rolled: {} ({})", design.name, design.id),
            None => println!("No designs available"),
        },
        "choose" => match args.get(1).and_then(|raw| raw.parse::<i64>().ok()) {
            Some(id) => {
                DesignService::new(store).choose(id);
                println!("Chosen: {}", id);
            }
            None => eprintln!("usage: flashroll choose <design-id>"),
        },
        "history" => {
            for item in HistoryService::new(store).list_recent() {
                println!("{:>13}  {}  {}", item.chosen_at, item.design_id, item.name);
            }
        }
        "reset-session" => {
            DesignService::new(store).reset_pool();
            println!("Session pool reset");
        }
        "reset-all" => {
            DesignService::new(store).reset_all_globally_used();
            println!("All designs available again");
        }
        other => {
            eprintln!("unknown command: {}", other);
            eprintln!(
                "usage: flashroll [folders|designs|roll|choose <id>|history|reset-session|reset-all]"
            );
            std::process::exit(2);
        }
    }
}
