use rusqlite::{params, Connection};

use crate::model::repository::UserAccount;

/// creates a new account with no storage used. This does not check if the account already exists,
/// so the caller must check that themselves
pub fn create_user(
    id: &str,
    storage_limit: u64,
    con: &Connection,
) -> Result<UserAccount, rusqlite::Error> {
    let created_on = chrono::offset::Local::now().naive_local();
    let mut pst = con.prepare(include_str!("../assets/queries/user/create_user.sql"))?;
    pst.execute(params![id, storage_limit, created_on])?;
    Ok(UserAccount {
        id: id.to_string(),
        storage_limit,
        storage_used: 0,
        created_on,
    })
}

pub fn get_user(id: &str, con: &Connection) -> Result<UserAccount, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/get_user_by_id.sql"))?;
    pst.query_row([id], map_user)
}

/// overwrites the stored usage for the user
pub fn set_storage_used(id: &str, used: u64, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/set_storage_used.sql"))?;
    pst.execute(params![id, used])?;
    Ok(())
}

/// adds `bytes` to the stored usage. The arithmetic happens in sqlite so there's no read-modify-write window
pub fn add_storage_used(id: &str, bytes: u64, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/add_storage_used.sql"))?;
    pst.execute(params![id, bytes])?;
    Ok(())
}

/// subtracts `bytes` from the stored usage, never going below 0
pub fn subtract_storage_used(
    id: &str,
    bytes: u64,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/user/subtract_storage_used.sql"
    ))?;
    pst.execute(params![id, bytes])?;
    Ok(())
}

fn map_user(row: &rusqlite::Row) -> Result<UserAccount, rusqlite::Error> {
    Ok(UserAccount {
        id: row.get(0)?,
        storage_limit: row.get(1)?,
        storage_used: row.get(2)?,
        created_on: row.get(3)?,
    })
}
