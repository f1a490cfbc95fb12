use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::model::repository;
use crate::repository::in_clause;

/// retrieves the non-deleted folder with the passed id, but only if it belongs to `user_id`
pub fn get_by_id(
    id: u32,
    user_id: &str,
    con: &Connection,
) -> Result<repository::Folder, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_folder_by_id.sql"
    ))?;
    pst.query_row(params![id, user_id], map_folder)
}

/// creates a folder record in the database.
/// This does not do any checks on folder parent id or any other data,
/// and that must be done before this function is called
pub fn create_folder(
    folder: &repository::Folder,
    con: &Connection,
) -> Result<repository::Folder, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/folder/create_folder.sql"))?;
    let folder_id = pst.insert(params![
        folder.user_id,
        folder.name,
        folder.parent_id,
        folder.created_on
    ])? as u32;
    Ok(repository::Folder {
        id: Some(folder_id),
        ..folder.clone()
    })
}

pub fn count_folders(user_id: &str, con: &Connection) -> Result<u64, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/folder/count_folders.sql"),
        [user_id],
        |row| row.get(0),
    )
}

/// returns the id of the passed folder and the ids of every non-deleted folder beneath it, at any depth.
/// Empty if the folder isn't a live folder owned by `user_id`
pub fn get_subtree_folder_ids(
    id: u32,
    user_id: &str,
    con: &Connection,
) -> Result<Vec<u32>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_child_folder_ids_recursive.sql"
    ))?;
    let rows = pst.query_map(params![id, user_id], |row| row.get(0))?;
    let mut ids = Vec::<u32>::new();
    for folder_id in rows {
        ids.push(folder_id?);
    }
    Ok(ids)
}

/// marks every passed folder as deleted, and returns how many were marked
pub fn soft_delete_folders(
    ids: &[u32],
    user_id: &str,
    deleted_on: NaiveDateTime,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    if ids.is_empty() {
        return Ok(0);
    }
    let query = format!(
        include_str!("../assets/queries/folder/soft_delete_folders.sql"),
        in_clause(ids)
    );
    con.execute(query.as_str(), params![user_id, deleted_on])
}

fn map_folder(row: &rusqlite::Row) -> Result<repository::Folder, rusqlite::Error> {
    Ok(repository::Folder {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        parent_id: row.get(3)?,
        created_on: row.get(4)?,
        is_deleted: row.get(5)?,
        deleted_on: row.get(6)?,
    })
}
