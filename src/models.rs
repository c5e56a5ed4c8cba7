use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Notes,
    Assignments,
    Projects,
    #[serde(rename = "Study Materials")]
    StudyMaterials,
    Video,
    Others,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Notes => "Notes",
            Category::Assignments => "Assignments",
            Category::Projects => "Projects",
            Category::StudyMaterials => "Study Materials",
            Category::Video => "Video",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "notes" => Ok(Category::Notes),
            "assignments" => Ok(Category::Assignments),
            "projects" => Ok(Category::Projects),
            "study materials" | "study-materials" => Ok(Category::StudyMaterials),
            "video" => Ok(Category::Video),
            "others" => Ok(Category::Others),
            other => bail!("Unknown category: {}", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "CSE")]
    Cse,
    #[serde(rename = "ECE")]
    Ece,
    #[serde(rename = "EEE")]
    Eee,
    #[serde(rename = "MECH")]
    Mech,
    #[serde(rename = "CIVIL")]
    Civil,
    #[serde(rename = "AGRI")]
    Agri,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "BIOTECH")]
    Biotech,
    Others,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Cse => "CSE",
            Department::Ece => "ECE",
            Department::Eee => "EEE",
            Department::Mech => "MECH",
            Department::Civil => "CIVIL",
            Department::Agri => "AGRI",
            Department::It => "IT",
            Department::Biotech => "BIOTECH",
            Department::Others => "Others",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cse" => Ok(Department::Cse),
            "ece" => Ok(Department::Ece),
            "eee" => Ok(Department::Eee),
            "mech" => Ok(Department::Mech),
            "civil" => Ok(Department::Civil),
            "agri" => Ok(Department::Agri),
            "it" => Ok(Department::It),
            "biotech" => Ok(Department::Biotech),
            "others" => Ok(Department::Others),
            other => bail!("Unknown department: {}", other),
        }
    }
}

/// A shared study resource. The uploader fields are a snapshot of the
/// session user at creation time, not a live reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upload {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub department: Department,
    pub custom_department: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub uploader_id: String,
    pub uploader_name: String,
    pub uploader_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Upload {
    pub fn new(draft: CreateUploadRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            department: draft.department,
            custom_department: draft.custom_department,
            file_url: draft.file_url,
            file_name: draft.file_name,
            file_type: draft.file_type,
            uploader_id: draft.uploader_id,
            uploader_name: draft.uploader_name,
            uploader_email: draft.uploader_email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the set fields of a patch over this record and refreshes the
    /// update timestamp.
    pub fn apply(&mut self, patch: UpdateUploadRequest) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
        if let Some(custom_department) = patch.custom_department {
            self.custom_department = Some(custom_department);
        }
        if let Some(file_url) = patch.file_url {
            self.file_url = Some(file_url);
        }
        if let Some(file_name) = patch.file_name {
            self.file_name = Some(file_name);
        }
        if let Some(file_type) = patch.file_type {
            self.file_type = Some(file_type);
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUploadRequest {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub department: Department,
    pub custom_department: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub uploader_id: String,
    pub uploader_name: String,
    pub uploader_email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUploadRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub department: Option<Department>,
    pub custom_department: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    pub category: Option<Category>,
    pub department: Option<Department>,
    pub custom_department: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadListResponse {
    pub uploads: Vec<Upload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_uploads: usize,
    pub contributors: usize,
    pub categories_in_use: usize,
    pub uploaded_this_week: usize,
}
