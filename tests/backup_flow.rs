use cat_disk_backup::{BackupError, BackupRecord, BackupRequest, CatBackup, Settings};
use mockito::{Matcher, Server, ServerGuard};
use std::path::Path;
use tempfile::tempdir;

const RESOURCES: &str = "/v1/disk/resources";
const IMAGE: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg-payload";

fn settings(cats: &Server, disk: &Server, record_path: &Path) -> Settings {
    Settings {
        cats_base_url: cats.url(),
        disk_api_url: format!("{}{}", disk.url(), RESOURCES),
        auth_scheme: "OAuth".into(),
        record_path: record_path.to_path_buf(),
    }
}

fn load_record(path: &Path) -> BackupRecord {
    let raw = std::fs::read_to_string(path).unwrap();
    let mut doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    serde_json::from_value(doc["backup_info"].take()).unwrap()
}

fn request() -> BackupRequest {
    BackupRequest::new("hello", "group", "secret").unwrap()
}

/// Disk mocks for a successful folder + upload round.
fn mock_disk(disk: &mut ServerGuard, folder_status: usize) -> Vec<mockito::Mock> {
    let folder = disk
        .mock("PUT", RESOURCES)
        .match_query(Matcher::UrlEncoded("path".into(), "group".into()))
        .with_status(folder_status)
        .create();
    let link = disk
        .mock("GET", "/v1/disk/resources/upload")
        .match_query(Matcher::UrlEncoded("path".into(), "group/hello.jpg".into()))
        .with_body(format!(r#"{{"href":"{}/put-here"}}"#, disk.url()))
        .create();
    let put = disk
        .mock("PUT", "/put-here")
        .match_body(Matcher::Any)
        .with_status(201)
        .create();
    let meta = disk
        .mock("GET", RESOURCES)
        .match_query(Matcher::UrlEncoded("path".into(), "group/hello.jpg".into()))
        .with_body(format!(
            r#"{{"name":"hello.jpg","path":"disk:/group/hello.jpg","size":{}}}"#,
            IMAGE.len()
        ))
        .create();
    vec![folder, link, put, meta]
}

#[test]
fn successful_run_writes_one_record_with_uploaded_size() {
    let mut cats = Server::new();
    let mut disk = Server::new();
    let image = cats
        .mock("GET", "/cat/says/hello")
        .with_body(IMAGE)
        .create();
    let disk_mocks = mock_disk(&mut disk, 201);

    let dir = tempdir().unwrap();
    let record_path = dir.path().join("backup_info.json");
    let backup = CatBackup::new(&settings(&cats, &disk, &record_path), "secret").unwrap();

    let record = backup.run(&request()).unwrap();

    image.assert();
    for m in &disk_mocks {
        m.assert();
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    let saved = load_record(&record_path);
    assert_eq!(saved, record);
    assert_eq!(saved.text, "hello");
    assert_eq!(saved.group_name, "group");
    assert_eq!(saved.files.len(), 1);
    assert_eq!(saved.files[0].size, IMAGE.len() as u64);
    assert_eq!(saved.files[0].file_name, "hello.jpg");
}

#[test]
fn existing_folder_does_not_stop_the_run() {
    let mut cats = Server::new();
    let mut disk = Server::new();
    let _image = cats
        .mock("GET", "/cat/says/hello")
        .with_body(IMAGE)
        .create();
    let _disk_mocks = mock_disk(&mut disk, 409);

    let dir = tempdir().unwrap();
    let record_path = dir.path().join("backup_info.json");
    let backup = CatBackup::new(&settings(&cats, &disk, &record_path), "secret").unwrap();

    backup.run(&request()).unwrap();
    assert!(record_path.exists());
}

#[test]
fn failed_image_fetch_uploads_nothing() {
    let mut cats = Server::new();
    let mut disk = Server::new();
    let _image = cats
        .mock("GET", "/cat/says/hello")
        .with_status(404)
        .create();
    let folder = disk
        .mock("PUT", RESOURCES)
        .match_query(Matcher::Any)
        .with_status(201)
        .create();
    let upload = disk
        .mock("GET", "/v1/disk/resources/upload")
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    let dir = tempdir().unwrap();
    let record_path = dir.path().join("backup_info.json");
    let backup = CatBackup::new(&settings(&cats, &disk, &record_path), "secret").unwrap();

    let err = backup.run(&request()).unwrap_err();

    assert!(matches!(err, BackupError::UnexpectedStatus { step: "image fetch", .. }));
    folder.assert();
    upload.assert();
    assert!(!record_path.exists());
}

#[test]
fn folder_failure_stops_before_fetching_the_image() {
    let mut cats = Server::new();
    let mut disk = Server::new();
    let image = cats.mock("GET", Matcher::Any).expect(0).create();
    let _folder = disk
        .mock("PUT", RESOURCES)
        .match_query(Matcher::Any)
        .with_status(401)
        .create();

    let dir = tempdir().unwrap();
    let record_path = dir.path().join("backup_info.json");
    let backup = CatBackup::new(&settings(&cats, &disk, &record_path), "secret").unwrap();

    assert!(backup.run(&request()).is_err());
    image.assert();
    assert!(!record_path.exists());
}

#[test]
fn blank_request_makes_no_network_calls() {
    let mut cats = Server::new();
    let mut disk = Server::new();
    let cat_calls = cats.mock("GET", Matcher::Any).expect(0).create();
    let disk_puts = disk.mock("PUT", Matcher::Any).expect(0).create();
    let disk_gets = disk.mock("GET", Matcher::Any).expect(0).create();

    let dir = tempdir().unwrap();
    let record_path = dir.path().join("backup_info.json");
    let backup = CatBackup::new(&settings(&cats, &disk, &record_path), "secret").unwrap();
    let blank = BackupRequest {
        text: "hello".into(),
        group_name: "  ".into(),
        token: "secret".into(),
    };

    let err = backup.run(&blank).unwrap_err();

    assert!(matches!(err, BackupError::InvalidInput(_)));
    cat_calls.assert();
    disk_puts.assert();
    disk_gets.assert();
    assert!(!record_path.exists());
}
