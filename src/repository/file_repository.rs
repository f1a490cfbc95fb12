use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::model::repository::FileRecord;
use crate::repository::in_clause;

/// saves a record of the passed file and returns its new id.
/// This does not check the parent folder, so that must be done before this is called
pub fn create_file(file: &FileRecord, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/file/create_file.sql"))?;
    let id = pst.insert(params![
        file.user_id,
        file.name,
        file.storage_key,
        file.file_type,
        file.size,
        file.uploaded_on,
        file.parent_id
    ])?;
    Ok(id as u32)
}

/// retrieves the non-deleted file with the passed id, but only if it belongs to `user_id`
pub fn get_file(id: u32, user_id: &str, con: &Connection) -> Result<FileRecord, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/file/get_file_by_id.sql"))?;
    pst.query_row(params![id, user_id], map_file)
}

/// retrieves the non-deleted file with the passed id regardless of who owns it.
/// Only shared downloads should use this
pub fn get_file_any_owner(id: u32, con: &Connection) -> Result<FileRecord, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/get_file_by_id_any_owner.sql"
    ))?;
    pst.query_row([id], map_file)
}

/// returns the newest-first non-deleted files directly inside the passed folder.
/// `None` means the root folder, and only matches files with no parent
pub fn get_child_files(
    user_id: &str,
    parent_id: Option<u32>,
    limit: u32,
    con: &Connection,
) -> Result<Vec<FileRecord>, rusqlite::Error> {
    let mut pst = if parent_id.is_some() {
        con.prepare(include_str!(
            "../assets/queries/file/get_child_files_with_id.sql"
        ))?
    } else {
        con.prepare(include_str!(
            "../assets/queries/file/get_child_files_without_id.sql"
        ))?
    };
    let mapped = match parent_id {
        Some(id) => pst.query_map(params![user_id, id, limit], map_file)?,
        None => pst.query_map(params![user_id, limit], map_file)?,
    };
    let mut files: Vec<FileRecord> = Vec::new();
    for file in mapped {
        files.push(file?);
    }
    Ok(files)
}

/// the newest `limit` non-deleted files across every folder the user has
pub fn get_recent_files(
    user_id: &str,
    limit: u32,
    con: &Connection,
) -> Result<Vec<FileRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/file/get_recent_files.sql"))?;
    let rows = pst.query_map(params![user_id, limit], map_file)?;
    let mut files: Vec<FileRecord> = Vec::new();
    for file in rows {
        files.push(file?);
    }
    Ok(files)
}

pub fn count_files(user_id: &str, con: &Connection) -> Result<u64, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/file/count_files.sql"),
        [user_id],
        |row| row.get(0),
    )
}

/// the total size in bytes of every non-deleted file the user owns
pub fn sum_file_sizes(user_id: &str, con: &Connection) -> Result<u64, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/file/sum_file_sizes.sql"),
        [user_id],
        |row| row.get(0),
    )
}

/// marks the file deleted. Returns `false` if nothing matched (already deleted, missing, or not the user's)
pub fn soft_delete_file(
    id: u32,
    user_id: &str,
    deleted_on: NaiveDateTime,
    con: &Connection,
) -> Result<bool, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/file/soft_delete_file.sql"))?;
    let changed = pst.execute(params![id, user_id, deleted_on])?;
    Ok(changed > 0)
}

/// the total size of non-deleted files directly inside any of the passed folders
pub fn sum_file_sizes_in_folders(
    folder_ids: &[u32],
    user_id: &str,
    con: &Connection,
) -> Result<u64, rusqlite::Error> {
    if folder_ids.is_empty() {
        return Ok(0);
    }
    let query = format!(
        include_str!("../assets/queries/file/sum_file_sizes_in_folders.sql"),
        in_clause(folder_ids)
    );
    con.query_row(query.as_str(), [user_id], |row| row.get(0))
}

/// marks every non-deleted file directly inside any of the passed folders as deleted,
/// and returns how many files were marked
pub fn soft_delete_files_in_folders(
    folder_ids: &[u32],
    user_id: &str,
    deleted_on: NaiveDateTime,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    if folder_ids.is_empty() {
        return Ok(0);
    }
    let query = format!(
        include_str!("../assets/queries/file/soft_delete_files_in_folders.sql"),
        in_clause(folder_ids)
    );
    con.execute(query.as_str(), params![user_id, deleted_on])
}

pub fn map_file(row: &rusqlite::Row) -> Result<FileRecord, rusqlite::Error> {
    Ok(FileRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        storage_key: row.get(3)?,
        file_type: row.get(4)?,
        size: row.get(5)?,
        uploaded_on: row.get(6)?,
        last_modified: row.get(7)?,
        parent_id: row.get(8)?,
        version: row.get(9)?,
        is_deleted: row.get(10)?,
        deleted_on: row.get(11)?,
    })
}
