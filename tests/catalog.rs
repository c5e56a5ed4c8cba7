#![allow(dead_code)]

mod models {
    include!("../src/models.rs");
}

mod storage {
    include!("../src/storage.rs");
}

use models::{Category, CreateUploadRequest, Department, UpdateUploadRequest};
use std::path::PathBuf;
use storage::UploadCatalog;
use tokio::time::{sleep, Duration};

fn catalog_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("uploads.json")
}

fn empty_catalog(dir: &tempfile::TempDir) -> UploadCatalog {
    let path = catalog_path(dir);
    std::fs::write(&path, "[]").unwrap();
    UploadCatalog::open(&path).unwrap()
}

fn draft(
    title: &str,
    description: &str,
    category: Category,
    department: Department,
    uploader_id: &str,
) -> CreateUploadRequest {
    CreateUploadRequest {
        title: title.to_string(),
        description: description.to_string(),
        category,
        department,
        custom_department: None,
        file_url: None,
        file_name: None,
        file_type: None,
        uploader_id: uploader_id.to_string(),
        uploader_name: "Test User".to_string(),
        uploader_email: "test.user@student.edu".to_string(),
    }
}

#[tokio::test]
async fn seeds_demo_records_when_no_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = catalog_path(&dir);

    let catalog = UploadCatalog::open(&path).unwrap();
    let uploads = catalog.all().await.unwrap();

    assert_eq!(uploads.len(), 4);
    // Seeding is in-memory only; the file appears on the first mutation.
    assert!(!path.exists());
}

#[tokio::test]
async fn first_mutation_persists_seeds_and_new_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = catalog_path(&dir);

    let catalog = UploadCatalog::open(&path).unwrap();
    catalog
        .add(draft(
            "Operating Systems Notes",
            "Scheduling and memory management.",
            Category::Notes,
            Department::Cse,
            "user-1",
        ))
        .await
        .unwrap();

    assert!(path.exists());

    let reopened = UploadCatalog::open(&path).unwrap();
    assert_eq!(
        reopened.all().await.unwrap(),
        catalog.all().await.unwrap()
    );
    assert_eq!(reopened.all().await.unwrap().len(), 5);
}

#[tokio::test]
async fn add_assigns_id_and_equal_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = empty_catalog(&dir);

    let upload = catalog
        .add(draft(
            "Thermodynamics Cheat Sheet",
            "Key formulas for the first law.",
            Category::StudyMaterials,
            Department::Mech,
            "user-7",
        ))
        .await
        .unwrap();

    assert!(!upload.id.is_empty());
    assert_eq!(upload.created_at, upload.updated_at);

    let mine = catalog.get_by_uploader("user-7").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, upload.id);
}

#[tokio::test]
async fn update_merges_fields_and_advances_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = empty_catalog(&dir);

    let original = catalog
        .add(draft(
            "Signals Assignment",
            "Fourier series exercises.",
            Category::Assignments,
            Department::Ece,
            "user-2",
        ))
        .await
        .unwrap();

    sleep(Duration::from_millis(10)).await;

    catalog
        .update(
            &original.id,
            UpdateUploadRequest {
                title: Some("Signals Assignment (revised)".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let uploads = catalog.get_by_uploader("user-2").await.unwrap();
    let updated = uploads.iter().find(|u| u.id == original.id).unwrap();

    assert_eq!(updated.title, "Signals Assignment (revised)");
    assert_eq!(updated.description, original.description);
    assert_eq!(updated.category, original.category);
    assert_eq!(updated.department, original.department);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);
}

#[tokio::test]
async fn update_unknown_id_leaves_catalog_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = empty_catalog(&dir);

    catalog
        .add(draft(
            "Compiler Design Notes",
            "Parsing and code generation.",
            Category::Notes,
            Department::Cse,
            "user-3",
        ))
        .await
        .unwrap();

    let before = catalog.all().await.unwrap();

    catalog
        .update(
            "no-such-id",
            UpdateUploadRequest {
                title: Some("Should not apply".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(catalog.all().await.unwrap(), before);
}

#[tokio::test]
async fn delete_removes_only_the_matching_record() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = empty_catalog(&dir);

    let first = catalog
        .add(draft(
            "Soil Mechanics Notes",
            "Consolidation and shear strength.",
            Category::Notes,
            Department::Civil,
            "user-4",
        ))
        .await
        .unwrap();
    let second = catalog
        .add(draft(
            "Surveying Lab Record",
            "Levelling exercises.",
            Category::StudyMaterials,
            Department::Civil,
            "user-4",
        ))
        .await
        .unwrap();

    catalog.delete(&first.id).await.unwrap();

    let mine = catalog.get_by_uploader("user-4").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, second.id);
}

#[tokio::test]
async fn delete_unknown_id_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = empty_catalog(&dir);

    catalog
        .add(draft(
            "Irrigation Engineering Notes",
            "Canal design basics.",
            Category::Notes,
            Department::Agri,
            "user-5",
        ))
        .await
        .unwrap();

    let before = catalog.all().await.unwrap();
    catalog.delete("no-such-id").await.unwrap();
    assert_eq!(catalog.all().await.unwrap(), before);
}

#[tokio::test]
async fn round_trip_preserves_records_and_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let path = catalog_path(&dir);
    let catalog = empty_catalog(&dir);

    catalog
        .add(draft(
            "Genetics Notes",
            "Mendelian inheritance summary.",
            Category::Notes,
            Department::Biotech,
            "user-6",
        ))
        .await
        .unwrap();

    let mut custom = draft(
        "Naval Architecture Primer",
        "Hull stability fundamentals.",
        Category::StudyMaterials,
        Department::Others,
        "user-6",
    );
    custom.custom_department = Some("Marine Engineering".to_string());
    custom.file_url = Some("/tmp/naval.pdf".to_string());
    custom.file_name = Some("naval.pdf".to_string());
    custom.file_type = Some("application/pdf".to_string());
    catalog.add(custom).await.unwrap();

    let reopened = UploadCatalog::open(&path).unwrap();
    assert_eq!(
        reopened.all().await.unwrap(),
        catalog.all().await.unwrap()
    );
}

#[tokio::test]
async fn malformed_catalog_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = catalog_path(&dir);
    std::fs::write(&path, "this is not json").unwrap();

    assert!(UploadCatalog::open(&path).is_err());
}

#[tokio::test]
async fn stats_count_distinct_contributors_and_categories() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = empty_catalog(&dir);

    catalog
        .add(draft(
            "DBMS Notes",
            "Normalization walkthrough.",
            Category::Notes,
            Department::It,
            "user-a",
        ))
        .await
        .unwrap();
    catalog
        .add(draft(
            "DBMS Assignment",
            "ER modelling exercise.",
            Category::Assignments,
            Department::It,
            "user-a",
        ))
        .await
        .unwrap();
    catalog
        .add(draft(
            "Networks Notes",
            "TCP congestion control.",
            Category::Notes,
            Department::Cse,
            "user-b",
        ))
        .await
        .unwrap();

    let stats = catalog.stats().await.unwrap();
    assert_eq!(stats.total_uploads, 3);
    assert_eq!(stats.contributors, 2);
    assert_eq!(stats.categories_in_use, 2);
    assert_eq!(stats.uploaded_this_week, 3);
}
