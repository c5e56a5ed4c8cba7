use crate::models::{
    CatalogStats, Category, CreateUploadRequest, Department, UpdateUploadRequest, Upload,
};
use anyhow::{Context, Result};
use chrono::{Duration, TimeZone, Utc};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tokio::sync::RwLock;

pub const CATALOG_FILE: &str = "uploads.json";

/// The authoritative collection of shared resources. Every mutation
/// rewrites the whole storage file; the last writer wins.
pub struct UploadCatalog {
    path: PathBuf,
    uploads: RwLock<Vec<Upload>>,
}

impl UploadCatalog {
    /// Loads the persisted catalog, or starts a fresh one from the demo
    /// records. Seeding stays in memory; nothing reaches disk until the
    /// first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let uploads = if path.exists() {
            let data = fs::read_to_string(&path)
                .context("Failed to read catalog file")?;
            serde_json::from_str(&data)
                .context("Failed to parse catalog file")?
        } else {
            demo_uploads()
        };

        Ok(Self {
            path,
            uploads: RwLock::new(uploads),
        })
    }

    pub async fn add(&self, draft: CreateUploadRequest) -> Result<Upload> {
        let upload = Upload::new(draft);
        let mut uploads = self.uploads.write().await;
        uploads.push(upload.clone());
        self.save_to_disk(&uploads)?;
        Ok(upload)
    }

    /// Merges the patch over the matching record and bumps its update
    /// timestamp. An unknown id changes nothing.
    pub async fn update(&self, id: &str, patch: UpdateUploadRequest) -> Result<()> {
        let mut uploads = self.uploads.write().await;

        if let Some(upload) = uploads.iter_mut().find(|u| u.id == id) {
            upload.apply(patch);
            self.save_to_disk(&uploads)?;
        }

        Ok(())
    }

    /// Removes the matching record. Deleting an unknown id is a no-op.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut uploads = self.uploads.write().await;

        if uploads.iter().any(|u| u.id == id) {
            uploads.retain(|u| u.id != id);
            self.save_to_disk(&uploads)?;
        }

        Ok(())
    }

    /// All records attributed to one uploader, in storage order; callers
    /// sort.
    pub async fn get_by_uploader(&self, uploader_id: &str) -> Result<Vec<Upload>> {
        let uploads = self.uploads.read().await;
        Ok(uploads
            .iter()
            .filter(|u| u.uploader_id == uploader_id)
            .cloned()
            .collect())
    }

    /// Conjunctive filter: free-text match on title/description, exact
    /// category, and exact department. Department "Others" combined with a
    /// non-empty custom text narrows to records whose custom department
    /// contains the text; with an empty text it matches every "Others"
    /// record.
    pub async fn search(
        &self,
        query: &str,
        category: Option<Category>,
        department: Option<Department>,
        custom_department: Option<&str>,
    ) -> Result<Vec<Upload>> {
        let uploads = self.uploads.read().await;
        let needle = query.to_lowercase();
        let custom_needle = custom_department
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);

        Ok(uploads
            .iter()
            .filter(|u| {
                let matches_query = needle.is_empty()
                    || u.title.to_lowercase().contains(&needle)
                    || u.description.to_lowercase().contains(&needle);

                let matches_category = category.map_or(true, |c| u.category == c);

                let matches_department = match (department, &custom_needle) {
                    (None, _) => true,
                    (Some(Department::Others), Some(text)) => {
                        u.department == Department::Others
                            && u.custom_department
                                .as_ref()
                                .map_or(false, |cd| cd.to_lowercase().contains(text))
                    }
                    (Some(d), _) => u.department == d,
                };

                matches_query && matches_category && matches_department
            })
            .cloned()
            .collect())
    }

    pub async fn all(&self) -> Result<Vec<Upload>> {
        let uploads = self.uploads.read().await;
        Ok(uploads.clone())
    }

    pub async fn stats(&self) -> Result<CatalogStats> {
        let uploads = self.uploads.read().await;
        let week_ago = Utc::now() - Duration::days(7);
        let contributors: HashSet<&str> =
            uploads.iter().map(|u| u.uploader_id.as_str()).collect();
        let categories: HashSet<Category> = uploads.iter().map(|u| u.category).collect();

        Ok(CatalogStats {
            total_uploads: uploads.len(),
            contributors: contributors.len(),
            categories_in_use: categories.len(),
            uploaded_this_week: uploads
                .iter()
                .filter(|u| u.created_at >= week_ago)
                .count(),
        })
    }

    fn save_to_disk(&self, uploads: &[Upload]) -> Result<()> {
        let json = serde_json::to_string_pretty(uploads)
            .context("Failed to serialize uploads")?;
        fs::write(&self.path, json)
            .context("Failed to write catalog file")?;
        Ok(())
    }
}

/// The records a brand-new installation starts with.
fn demo_uploads() -> Vec<Upload> {
    let day1 = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
    let day2 = Utc.with_ymd_and_hms(2024, 1, 14, 0, 0, 0).unwrap();
    let day3 = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();
    let day4 = Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap();

    vec![
        Upload {
            id: "1".to_string(),
            title: "Data Structures and Algorithms Notes".to_string(),
            description: "Comprehensive notes covering arrays, linked lists, trees, and graphs."
                .to_string(),
            category: Category::Notes,
            department: Department::Cse,
            custom_department: None,
            file_url: Some("https://www.mta.ca/~rrosebru/oldcourse/263114/Dsa.pdf".to_string()),
            file_name: Some("DSA_Notes.pdf".to_string()),
            file_type: Some("application/pdf".to_string()),
            uploader_id: "demo-user-1".to_string(),
            uploader_name: "John Doe".to_string(),
            uploader_email: "john.doe@student.edu".to_string(),
            created_at: day1,
            updated_at: day1,
        },
        Upload {
            id: "2".to_string(),
            title: "Circuit Analysis Assignment".to_string(),
            description: "Assignment on AC and DC circuit analysis with solved examples."
                .to_string(),
            category: Category::Assignments,
            department: Department::Ece,
            custom_department: None,
            file_url: Some(
                "https://fatsup.files.wordpress.com/2016/10/linear-circuit-analysis-assignmetn-1.pdf"
                    .to_string(),
            ),
            file_name: Some("Circuit_Analysis.pdf".to_string()),
            file_type: Some("application/pdf".to_string()),
            uploader_id: "demo-user-2".to_string(),
            uploader_name: "Jane Smith".to_string(),
            uploader_email: "jane.smith@student.edu".to_string(),
            created_at: day2,
            updated_at: day2,
        },
        Upload {
            id: "3".to_string(),
            title: "Machine Learning Project Guide".to_string(),
            description: "End-to-end ML project workflow using Python.".to_string(),
            category: Category::Projects,
            department: Department::It,
            custom_department: None,
            file_url: Some(
                "https://amideastonline.org/pluginfile.php/66145/mod_folder/content/0/ML02.pdf"
                    .to_string(),
            ),
            file_name: Some("ML_Project.pdf".to_string()),
            file_type: Some("application/pdf".to_string()),
            uploader_id: "demo-user-3".to_string(),
            uploader_name: "Mike Johnson".to_string(),
            uploader_email: "mike.johnson@student.edu".to_string(),
            created_at: day3,
            updated_at: day3,
        },
        Upload {
            id: "4".to_string(),
            title: "Biotechnology Lab Manual".to_string(),
            description: "Lab manual for biotech experiments including protocols.".to_string(),
            category: Category::StudyMaterials,
            department: Department::Biotech,
            custom_department: None,
            file_url: Some(
                "https://www.rose-hulman.edu/~brandt/publications/472B_Lab_Manual_2ndEd.pdf"
                    .to_string(),
            ),
            file_name: Some("Biotech_Lab_Manual.pdf".to_string()),
            file_type: Some("application/pdf".to_string()),
            uploader_id: "demo-user-4".to_string(),
            uploader_name: "Sarah Wilson".to_string(),
            uploader_email: "sarah.wilson@student.edu".to_string(),
            created_at: day4,
            updated_at: day4,
        },
    ]
}
