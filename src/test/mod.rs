use std::fs::{remove_dir_all, remove_file};
use std::path::Path;

use rocket::http::Header;

use crate::guard::IDENTITY_HEADER;
use crate::model::repository::{FileRecord, Folder};
use crate::repository::{file_repository, folder_repository, initialize_db, open_connection, user_repository};
use crate::storage::upload_dir;

mod api_handler_tests;
mod file_handler_tests;

/// the account every handler test acts as
pub static USER: &str = "user";
/// a second account, used to make sure nobody can see anyone else's things
pub static OTHER_USER: &str = "other-user";

/// the identity header for `user_id`, as the identity provider would send it
pub fn identity(user_id: &str) -> Header<'static> {
    Header::new(IDENTITY_HEADER, user_id.to_string())
}

/// removes this thread's database and uploads, then creates a fresh database
pub fn init_db_folder() {
    cleanup();
    initialize_db().unwrap();
}

/// removes this thread's database file and uploaded files
pub fn cleanup() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    let uploads = upload_dir();
    let uploads = Path::new(uploads.as_str());
    if uploads.exists() {
        remove_dir_all(uploads).unwrap_or(());
    }
}

pub fn create_account_db_entry(id: &str, storage_limit: u64) {
    let connection = open_connection();
    user_repository::create_user(id, storage_limit, &connection).unwrap();
    connection.close().unwrap();
}

/// sets the account's cached usage directly, without touching any files
pub fn set_storage_used_db(id: &str, used: u64) {
    let connection = open_connection();
    user_repository::set_storage_used(id, used, &connection).unwrap();
    connection.close().unwrap();
}

pub fn get_storage_used_db(id: &str) -> u64 {
    let connection = open_connection();
    let used = user_repository::get_user(id, &connection).unwrap().storage_used;
    connection.close().unwrap();
    used
}

pub fn create_folder_db_entry(user_id: &str, name: &str, parent_id: Option<u32>) -> u32 {
    let connection = open_connection();
    let id = folder_repository::create_folder(&Folder::new(user_id, name, parent_id), &connection)
        .unwrap()
        .id
        .unwrap();
    connection.close().unwrap();
    id
}

/// creates a file record without any bytes in storage, and without touching the ledger
pub fn create_file_db_entry(user_id: &str, name: &str, size: u64, parent_id: Option<u32>) -> u32 {
    let connection = open_connection();
    let record = FileRecord::new_upload(user_id, name, &format!("{user_id}/{name}"), size, parent_id);
    let id = file_repository::create_file(&record, &connection).unwrap();
    connection.close().unwrap();
    id
}

pub fn get_file_db_entry_any_state(id: u32) -> FileRecord {
    let connection = open_connection();
    let file = connection
        .query_row(
            "select id, userId, name, storageKey, fileType, fileSize, uploadedOn, lastModified, parentId, version, isDeleted, deletedOn from Files where id = ?1",
            [id],
            file_repository::map_file,
        )
        .unwrap();
    connection.close().unwrap();
    file
}

/// a multipart body with one `files` part per entry and an optional `folderId` part
pub fn multipart_body(files: &[(&str, &str)], folder_id: Option<&str>) -> String {
    let mut body = String::new();
    for (name, contents) in files {
        body.push_str(&format!(
            "--BOUNDARY\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\nContent-Type: text/plain\r\n\r\n{contents}\r\n"
        ));
    }
    if let Some(id) = folder_id {
        body.push_str(&format!(
            "--BOUNDARY\r\nContent-Disposition: form-data; name=\"folderId\"\r\n\r\n{id}\r\n"
        ));
    }
    body.push_str("--BOUNDARY--");
    body
}

pub fn multipart_header() -> Header<'static> {
    Header::new("Content-Type", "multipart/form-data; boundary=BOUNDARY")
}

pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().to_string()
}
