mod api;
mod models;
pub mod session;
mod storage;
pub mod user_models;

use api::{build_router, AppState};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use storage::{UploadCatalog, CATALOG_FILE};

#[derive(Parser)]
#[command(name = "server")]
#[command(about = "Student study-resource sharing service", long_about = None)]
struct Args {
    #[arg(long, default_value = "0.0.0.0:3000", help = "Address to bind the HTTP server to")]
    bind: String,

    #[arg(long, default_value = CATALOG_FILE, help = "Path of the catalog storage file")]
    data_file: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let catalog =
        Arc::new(UploadCatalog::open(&args.data_file).expect("Failed to initialize catalog"));

    let app = build_router(AppState { catalog });

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .expect("Failed to bind address");

    println!("🚀 Smart Notes service running on http://{}", args.bind);
    println!("📋 Endpoints:");
    println!("   POST   /uploads                - Share a new resource");
    println!("   GET    /uploads                - Search resources");
    println!("   PUT    /uploads/:id            - Edit a resource");
    println!("   DELETE /uploads/:id            - Remove a resource");
    println!("   GET    /uploaders/:id/uploads  - Resources by uploader");
    println!("   GET    /stats                  - Catalog statistics");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
