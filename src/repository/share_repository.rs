use std::backtrace::Backtrace;

use rusqlite::{params, Connection};

use crate::model::repository::Share;

/// saves the passed share. The caller must make sure the file exists and belongs to them
pub fn create_share(share: &Share, con: &Connection) -> Result<Share, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/share/create_share.sql"))?;
    let id = pst.insert(params![
        share.file_id,
        share.token,
        share.password_hash,
        share.expires_on,
        share.created_on
    ])? as u32;
    Ok(Share {
        id: Some(id),
        ..share.clone()
    })
}

/// searches for a share with the passed token.
///
/// if `None` is returned, that means there was no match
pub fn get_share_by_token(token: &str, con: &Connection) -> Result<Option<Share>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/share/get_share_by_token.sql"
    ))?;
    match pst.query_row([token], map_share) {
        Ok(share) => Ok(Some(share)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => {
            log::error!(
                "Failed to get share by token, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(e)
        }
    }
}

pub fn get_shares_for_file(file_id: u32, con: &Connection) -> Result<Vec<Share>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/share/get_shares_for_file.sql"
    ))?;
    let rows = pst.query_map([file_id], map_share)?;
    let mut shares: Vec<Share> = Vec::new();
    for share in rows {
        shares.push(share?);
    }
    Ok(shares)
}

pub fn increment_download_count(id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/share/increment_download_count.sql"
    ))?;
    pst.execute([id])?;
    Ok(())
}

fn map_share(row: &rusqlite::Row) -> Result<Share, rusqlite::Error> {
    Ok(Share {
        id: row.get(0)?,
        file_id: row.get(1)?,
        token: row.get(2)?,
        password_hash: row.get(3)?,
        expires_on: row.get(4)?,
        created_on: row.get(5)?,
        download_count: row.get(6)?,
    })
}
