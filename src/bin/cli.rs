use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use prettytable::{Cell, Row, Table};
use reqwest;
use serde::{Deserialize, Serialize};

const API_URL: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(name = "smartnotes")]
#[command(about = "A CLI tool for browsing shared study resources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Search the shared resource catalog")]
    Search {
        #[arg(short, long, help = "Free-text query over titles and descriptions")]
        query: Option<String>,

        #[arg(short, long, help = "Category, e.g. Notes or 'Study Materials'")]
        category: Option<String>,

        #[arg(short, long, help = "Department, e.g. CSE")]
        department: Option<String>,

        #[arg(short = 'x', long, help = "Custom department text, with -d Others")]
        custom_department: Option<String>,
    },

    #[command(about = "Share a new resource")]
    Add {
        #[arg(short, long, help = "Resource title")]
        title: String,

        #[arg(short, long, help = "Short description")]
        description: String,

        #[arg(short, long, help = "Category, e.g. Notes or 'Study Materials'")]
        category: String,

        #[arg(short = 'p', long, help = "Department, e.g. CSE")]
        department: String,

        #[arg(short = 'x', long, help = "Custom department, when department is Others")]
        custom_department: Option<String>,

        #[arg(long, help = "Uploader ID")]
        uploader_id: String,

        #[arg(long, help = "Uploader display name")]
        uploader_name: String,

        #[arg(long, help = "Uploader email")]
        uploader_email: String,
    },

    #[command(about = "List a single uploader's resources")]
    Mine {
        #[arg(short, long, help = "Uploader ID")]
        uploader: String,
    },

    #[command(about = "Remove a resource")]
    Delete {
        #[arg(short, long, help = "Resource ID")]
        id: String,
    },

    #[command(about = "Show catalog statistics")]
    Stats,
}

#[derive(Debug, Serialize)]
struct CreateUploadRequest {
    title: String,
    description: String,
    category: String,
    department: String,
    custom_department: Option<String>,
    uploader_id: String,
    uploader_name: String,
    uploader_email: String,
}

#[derive(Debug, Deserialize)]
struct Upload {
    id: String,
    title: String,
    category: String,
    department: String,
    custom_department: Option<String>,
    uploader_name: String,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct UploadListResponse {
    uploads: Vec<Upload>,
}

#[derive(Debug, Deserialize)]
struct CatalogStats {
    total_uploads: usize,
    contributors: usize,
    categories_in_use: usize,
    uploaded_this_week: usize,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            query,
            category,
            department,
            custom_department,
        } => search(query, category, department, custom_department).await,
        Commands::Add {
            title,
            description,
            category,
            department,
            custom_department,
            uploader_id,
            uploader_name,
            uploader_email,
        } => {
            add(
                title,
                description,
                category,
                department,
                custom_department,
                uploader_id,
                uploader_name,
                uploader_email,
            )
            .await
        }
        Commands::Mine { uploader } => mine(uploader).await,
        Commands::Delete { id } => delete(id).await,
        Commands::Stats => stats().await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn search(
    query: Option<String>,
    category: Option<String>,
    department: Option<String>,
    custom_department: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let mut params: Vec<(&str, String)> = Vec::new();
    if let Some(query) = query {
        params.push(("query", query));
    }
    if let Some(category) = category {
        params.push(("category", category));
    }
    if let Some(department) = department {
        params.push(("department", department));
    }
    if let Some(custom_department) = custom_department {
        params.push(("custom_department", custom_department));
    }

    let response = client
        .get(format!("{}/uploads", API_URL))
        .query(&params)
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(format!("Failed to search resources: {}", error_text).into());
    }

    let result: UploadListResponse = response.json().await?;
    print_uploads(&result.uploads)
}

async fn add(
    title: String,
    description: String,
    category: String,
    department: String,
    custom_department: Option<String>,
    uploader_id: String,
    uploader_name: String,
    uploader_email: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let payload = CreateUploadRequest {
        title,
        description,
        category,
        department,
        custom_department,
        uploader_id,
        uploader_name,
        uploader_email,
    };

    let response = client
        .post(format!("{}/uploads", API_URL))
        .json(&payload)
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(format!("Failed to share resource: {}", error_text).into());
    }

    let created: Upload = response.json().await?;

    println!("✅ Resource shared successfully!");
    println!("   Title: {}", created.title);
    println!("   Category: {}", created.category);
    println!("   ID: {}", created.id);

    Ok(())
}

async fn mine(uploader: String) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/uploaders/{}/uploads", API_URL, uploader))
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(format!("Failed to fetch uploads: {}", error_text).into());
    }

    let result: UploadListResponse = response.json().await?;
    print_uploads(&result.uploads)
}

async fn delete(id: String) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("{}/uploads/{}", API_URL, id))
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(format!("Failed to delete resource: {}", error_text).into());
    }

    println!("🗑️  Resource {} removed.", id);

    Ok(())
}

async fn stats() -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/stats", API_URL)).send().await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(format!("Failed to fetch stats: {}", error_text).into());
    }

    let stats: CatalogStats = response.json().await?;

    println!("\n📊 Catalog Statistics\n");
    println!("   📄 Total resources: {}", stats.total_uploads);
    println!("   👥 Contributors: {}", stats.contributors);
    println!("   🗂️  Categories in use: {}", stats.categories_in_use);
    println!("   📅 Shared this week: {}", stats.uploaded_this_week);
    println!();

    Ok(())
}

fn print_uploads(uploads: &[Upload]) -> Result<(), Box<dyn std::error::Error>> {
    if uploads.is_empty() {
        println!("📭 No resources found.");
        return Ok(());
    }

    println!("\n📚 Shared Resources ({})\n", uploads.len());

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("ID"),
        Cell::new("Title"),
        Cell::new("Category"),
        Cell::new("Department"),
        Cell::new("Uploader"),
        Cell::new("Shared"),
    ]));

    for upload in uploads {
        let created: DateTime<Utc> = upload.created_at.parse()?;
        let local_time = created.with_timezone(&Local);

        let department = match &upload.custom_department {
            Some(custom) if upload.department == "Others" => {
                format!("Others ({})", custom)
            }
            _ => upload.department.clone(),
        };

        table.add_row(Row::new(vec![
            Cell::new(upload.id.get(..8).unwrap_or(&upload.id)),
            Cell::new(&upload.title),
            Cell::new(&upload.category),
            Cell::new(&department),
            Cell::new(&upload.uploader_name),
            Cell::new(&local_time.format("%Y-%m-%d %H:%M").to_string()),
        ]));
    }

    table.printstd();
    println!();

    Ok(())
}
