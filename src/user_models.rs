use crate::models::Department;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_EMAIL: &str = "admin@smartnotes.edu";
pub const ADMIN_DEPARTMENT: &str = "ADMIN";

/// A user's department is either one of the listed codes or free text
/// (e.g. "ADMIN", "AI&DS"). On the wire both forms are a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserDepartment {
    Listed(Department),
    Custom(String),
}

impl UserDepartment {
    pub fn as_str(&self) -> &str {
        match self {
            UserDepartment::Listed(department) => department.as_str(),
            UserDepartment::Custom(text) => text,
        }
    }
}

impl fmt::Display for UserDepartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Department> for UserDepartment {
    fn from(department: Department) -> Self {
        UserDepartment::Listed(department)
    }
}

impl FromStr for UserDepartment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<Department>() {
            Ok(department) => UserDepartment::Listed(department),
            Err(_) => UserDepartment::Custom(s.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub department: UserDepartment,
    pub custom_department: Option<String>,
}

impl User {
    /// Every call mints a fresh id, so logging in twice with the same
    /// profile yields two distinct users.
    pub fn new(profile: UserProfile) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: profile.name,
            email: profile.email,
            avatar: profile.avatar,
            department: profile.department,
            custom_department: profile.custom_department,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.email == ADMIN_EMAIL || self.department.as_str() == ADMIN_DEPARTMENT
    }
}

/// Login input: a user minus the id the store assigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub department: UserDepartment,
    pub custom_department: Option<String>,
}

/// Derives the department from institutional addresses shaped like
/// `name.cs23@bitsathy.ac.in`: a dot, a 2-3 letter department code, a
/// two-digit batch year, then the campus domain. Anything else maps to
/// Others.
pub fn department_from_email(email: &str) -> UserDepartment {
    let code = email
        .strip_suffix("@bitsathy.ac.in")
        .and_then(|local| local.rsplit_once('.'))
        .and_then(|(_, tail)| batch_code(tail));

    match code.map(|c| c.to_lowercase()).as_deref() {
        Some("cs") => UserDepartment::Listed(Department::Cse),
        Some("ec") => UserDepartment::Listed(Department::Ece),
        Some("ee") => UserDepartment::Listed(Department::Eee),
        Some("me") => UserDepartment::Listed(Department::Mech),
        Some("ce") => UserDepartment::Listed(Department::Civil),
        Some("ag") => UserDepartment::Listed(Department::Agri),
        Some("it") => UserDepartment::Listed(Department::It),
        Some("bt") => UserDepartment::Listed(Department::Biotech),
        Some("ai") => UserDepartment::Custom("AI&DS".to_string()),
        _ => UserDepartment::Listed(Department::Others),
    }
}

/// Splits a local-part tail like "cs23" into its letter code, requiring
/// 2-3 letters followed by exactly two digits.
fn batch_code(tail: &str) -> Option<&str> {
    let split = tail.find(|c: char| c.is_ascii_digit())?;
    let (code, digits) = tail.split_at(split);
    if (2..=3).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphabetic())
        && digits.len() == 2
        && digits.chars().all(|c| c.is_ascii_digit())
    {
        Some(code)
    } else {
        None
    }
}
