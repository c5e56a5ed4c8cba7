use anyhow::{bail, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod models {
    include!("../models.rs");
}

mod user_models {
    include!("../user_models.rs");
}

mod session {
    include!("../session.rs");
}

mod storage {
    include!("../storage.rs");
}

use models::{Category, CreateUploadRequest, Department, UpdateUploadRequest, Upload};
use session::{SessionStore, SESSION_FILE};
use storage::{UploadCatalog, CATALOG_FILE};
use user_models::{
    department_from_email, User, UserDepartment, UserProfile, ADMIN_DEPARTMENT, ADMIN_EMAIL,
    ADMIN_PASSWORD, ADMIN_USERNAME,
};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Smart Notes student portal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Sign in with your student profile")]
    Login {
        #[arg(short, long, help = "Display name")]
        name: String,

        #[arg(short, long, help = "Email address")]
        email: String,

        #[arg(short, long, help = "Avatar URL")]
        avatar: Option<String>,

        #[arg(short, long, help = "Department (derived from institutional email when omitted)")]
        department: Option<UserDepartment>,

        #[arg(short = 'c', long, help = "Custom department, when department is Others")]
        custom_department: Option<String>,
    },

    #[command(about = "Sign in as the administrator")]
    LoginAdmin {
        #[arg(short, long, help = "Admin username")]
        username: String,

        #[arg(short, long, help = "Admin password")]
        password: String,
    },

    #[command(about = "Log out of the portal")]
    Logout,

    #[command(about = "Show the current user")]
    Whoami,

    #[command(about = "Share a study resource")]
    Upload {
        #[arg(short, long, help = "Resource title")]
        title: String,

        #[arg(short, long, help = "Short description")]
        description: String,

        #[arg(short, long, help = "Notes, Assignments, Projects, Study Materials, Video or Others")]
        category: Category,

        #[arg(short = 'p', long, help = "CSE, ECE, EEE, MECH, CIVIL, AGRI, IT, BIOTECH or Others")]
        department: Department,

        #[arg(short = 'x', long, help = "Custom department, when department is Others")]
        custom_department: Option<String>,

        #[arg(short, long, help = "Path of a file to reference")]
        file: Option<PathBuf>,
    },

    #[command(about = "List your uploads")]
    Mine,

    #[command(about = "Search the shared catalog")]
    Search {
        #[arg(short, long, default_value = "", help = "Free-text query")]
        query: String,

        #[arg(short, long, help = "Category filter")]
        category: Option<Category>,

        #[arg(short = 'p', long, help = "Department filter")]
        department: Option<Department>,

        #[arg(short = 'x', long, help = "Custom department text, with -p Others")]
        custom_department: Option<String>,
    },

    #[command(about = "Edit one of your uploads")]
    Edit {
        #[arg(short, long, help = "Upload ID")]
        id: String,

        #[arg(short, long, help = "New title")]
        title: Option<String>,

        #[arg(short, long, help = "New description")]
        description: Option<String>,

        #[arg(short, long, help = "New category")]
        category: Option<Category>,

        #[arg(short = 'p', long, help = "New department")]
        department: Option<Department>,

        #[arg(short = 'x', long, help = "New custom department")]
        custom_department: Option<String>,
    },

    #[command(about = "Delete one of your uploads")]
    Delete {
        #[arg(short, long, help = "Upload ID")]
        id: String,
    },

    #[command(about = "Review all uploads (admin only)")]
    Review,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_command(cli.command).await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_command(command: Commands) -> Result<()> {
    let mut session = SessionStore::restore(SESSION_FILE)?;
    let catalog = UploadCatalog::open(CATALOG_FILE)?;

    match command {
        Commands::Login {
            name,
            email,
            avatar,
            department,
            custom_department,
        } => {
            login(&mut session, name, email, avatar, department, custom_department)?;
        }
        Commands::LoginAdmin { username, password } => {
            login_admin(&mut session, username, password)?;
        }
        Commands::Logout => {
            session.logout()?;
            println!("✅ Logged out successfully!");
        }
        Commands::Whoami => {
            whoami(&session);
        }
        Commands::Upload {
            title,
            description,
            category,
            department,
            custom_department,
            file,
        } => {
            let user = require_login(&session)?;
            share_upload(
                &catalog,
                user,
                title,
                description,
                category,
                department,
                custom_department,
                file,
            )
            .await?;
        }
        Commands::Mine => {
            let user = require_login(&session)?;
            list_mine(&catalog, user).await?;
        }
        Commands::Search {
            query,
            category,
            department,
            custom_department,
        } => {
            search_catalog(&catalog, query, category, department, custom_department).await?;
        }
        Commands::Edit {
            id,
            title,
            description,
            category,
            department,
            custom_department,
        } => {
            let user = require_login(&session)?;
            edit_upload(
                &catalog,
                user,
                id,
                title,
                description,
                category,
                department,
                custom_department,
            )
            .await?;
        }
        Commands::Delete { id } => {
            let user = require_login(&session)?;
            delete_upload(&catalog, user, id).await?;
        }
        Commands::Review => {
            let user = require_login(&session)?;
            review(&catalog, user).await?;
        }
    }

    Ok(())
}

fn require_login(session: &SessionStore) -> Result<&User> {
    session.current().ok_or_else(|| {
        anyhow::anyhow!("You must be logged in. Use: portal login -n <name> -e <email>")
    })
}

fn login(
    session: &mut SessionStore,
    name: String,
    email: String,
    avatar: Option<String>,
    department: Option<UserDepartment>,
    custom_department: Option<String>,
) -> Result<()> {
    if name.is_empty() {
        bail!("Name cannot be empty");
    }

    if email.is_empty() {
        bail!("Email cannot be empty");
    }

    let department = department.unwrap_or_else(|| department_from_email(&email));

    let profile = UserProfile {
        name,
        email,
        avatar: avatar.unwrap_or_default(),
        department,
        custom_department,
    };

    session.login(profile)?;

    if let Some(user) = session.current() {
        println!("✅ Login successful!");
        println!("👤 Welcome, {}!", user.name);
        println!("🏫 Department: {}", user.department);
        println!("🆔 User ID: {}", user.id);
    }

    Ok(())
}

fn login_admin(session: &mut SessionStore, username: String, password: String) -> Result<()> {
    if username != ADMIN_USERNAME || password != ADMIN_PASSWORD {
        bail!("Invalid username or password");
    }

    let profile = UserProfile {
        name: "Administrator".to_string(),
        email: ADMIN_EMAIL.to_string(),
        avatar: String::new(),
        department: UserDepartment::Custom(ADMIN_DEPARTMENT.to_string()),
        custom_department: None,
    };

    session.login(profile)?;

    println!("✅ Welcome Admin 👋");
    println!("💡 Use 'portal review' to monitor uploads across the platform");

    Ok(())
}

fn whoami(session: &SessionStore) {
    if let Some(user) = session.current() {
        println!("👤 Logged in as: {}", user.name);
        println!("📧 Email: {}", user.email);
        println!("🏫 Department: {}", user.department);
        println!("🆔 User ID: {}", user.id);
        if user.is_admin() {
            println!("🛡️  Administrator account");
        }
    } else {
        println!("❌ Not logged in");
        println!("💡 Use 'portal login -n <name> -e <email>' to log in");
    }
}

async fn share_upload(
    catalog: &UploadCatalog,
    user: &User,
    title: String,
    description: String,
    category: Category,
    department: Department,
    custom_department: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let (file_url, file_name, file_type) = match file {
        Some(path) => {
            if !path.exists() {
                bail!("File not found: {}", path.display());
            }

            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();
            let mime = file_type_for(&path).to_string();

            (Some(path.display().to_string()), Some(name), Some(mime))
        }
        None => (None, None, None),
    };

    // Custom text only means anything under the Others department.
    let custom_department = if department == Department::Others {
        custom_department
    } else {
        None
    };

    let draft = CreateUploadRequest {
        title,
        description,
        category,
        department,
        custom_department,
        file_url,
        file_name,
        file_type,
        uploader_id: user.id.clone(),
        uploader_name: user.name.clone(),
        uploader_email: user.email.clone(),
    };

    let upload = catalog.add(draft).await?;

    println!("✅ Resource shared successfully!");
    println!("📄 Title: {}", upload.title);
    println!("🗂️  Category: {}", upload.category);
    println!("🆔 ID: {}", upload.id);
    if let Some(file_name) = &upload.file_name {
        println!("📎 File: {}", file_name);
    }
    println!("\n💡 Use 'portal mine' to see all your uploads");

    Ok(())
}

async fn list_mine(catalog: &UploadCatalog, user: &User) -> Result<()> {
    let mut uploads = catalog.get_by_uploader(&user.id).await?;
    uploads.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if uploads.is_empty() {
        println!("📭 No uploads yet.");
        println!("💡 Use 'portal upload' to share your first resource");
        return Ok(());
    }

    println!("📚 Your uploads ({}):\n", uploads.len());
    print_uploads(&uploads, false);

    Ok(())
}

async fn search_catalog(
    catalog: &UploadCatalog,
    query: String,
    category: Option<Category>,
    department: Option<Department>,
    custom_department: Option<String>,
) -> Result<()> {
    let mut uploads = catalog
        .search(&query, category, department, custom_department.as_deref())
        .await?;
    uploads.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if uploads.is_empty() {
        println!("📭 No resources found.");
        println!("💡 Try adjusting your search criteria");
        return Ok(());
    }

    println!("📚 Shared resources ({}):\n", uploads.len());
    print_uploads(&uploads, true);

    Ok(())
}

async fn edit_upload(
    catalog: &UploadCatalog,
    user: &User,
    id: String,
    title: Option<String>,
    description: Option<String>,
    category: Option<Category>,
    department: Option<Department>,
    custom_department: Option<String>,
) -> Result<()> {
    let uploads = catalog.all().await?;
    let existing = uploads
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| anyhow::anyhow!("No upload found with ID: {}", id))?;

    if existing.uploader_id != user.id && !user.is_admin() {
        bail!("You can only edit your own uploads");
    }

    let patch = UpdateUploadRequest {
        title,
        description,
        category,
        department,
        custom_department,
        ..Default::default()
    };

    catalog.update(&id, patch).await?;

    println!("✅ Upload '{}' updated!", existing.title);

    Ok(())
}

async fn delete_upload(catalog: &UploadCatalog, user: &User, id: String) -> Result<()> {
    let uploads = catalog.all().await?;
    let existing = uploads
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| anyhow::anyhow!("No upload found with ID: {}", id))?;

    if existing.uploader_id != user.id && !user.is_admin() {
        bail!("You can only delete your own uploads");
    }

    catalog.delete(&id).await?;

    println!("🗑️  Upload '{}' deleted.", existing.title);

    Ok(())
}

async fn review(catalog: &UploadCatalog, user: &User) -> Result<()> {
    if !user.is_admin() {
        bail!("Access denied: admin privileges required");
    }

    let stats = catalog.stats().await?;

    println!("📊 Platform overview");
    println!("   📄 Total uploads: {}", stats.total_uploads);
    println!("   👥 Contributors: {}", stats.contributors);
    println!("   🗂️  Categories in use: {}", stats.categories_in_use);
    println!("   📅 Shared this week: {}", stats.uploaded_this_week);
    println!();

    let mut uploads = catalog.all().await?;
    uploads.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if uploads.is_empty() {
        println!("📭 No uploads found.");
        return Ok(());
    }

    println!("📚 All uploaded resources ({}):\n", uploads.len());
    print_uploads(&uploads, true);

    Ok(())
}

fn print_uploads(uploads: &[Upload], show_uploader: bool) {
    for (i, upload) in uploads.iter().enumerate() {
        println!("{}. 📄 {} [{}]", i + 1, upload.title, upload.category);
        println!("   🆔 ID: {}", upload.id);

        match &upload.custom_department {
            Some(custom) if upload.department == Department::Others => {
                println!("   🏫 Department: Others ({})", custom);
            }
            _ => println!("   🏫 Department: {}", upload.department),
        }

        if show_uploader {
            println!(
                "   👤 Uploader: {} <{}>",
                upload.uploader_name, upload.uploader_email
            );
        }
        if let Some(file_name) = &upload.file_name {
            println!("   📎 File: {}", file_name);
        }
        println!(
            "   ⏰ Shared: {}",
            upload
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
        );
        println!();
    }
}

fn file_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some("mp4") => "video/mp4",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
