use std::backtrace::Backtrace;
use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, Result};

pub mod file_repository;
pub mod folder_repository;
pub mod metadata_repository;
pub mod share_repository;
pub mod user_repository;

/// the schema version `init.sql` creates
const SCHEMA_VERSION: u64 = 1;

/// creates a new connection and returns it, but panics if the connection could not be created
#[cfg(not(test))]
pub fn open_connection() -> Connection {
    use crate::config::DRIVE_CONFIG;

    open_connection_at(&DRIVE_CONFIG.database.location)
}

#[cfg(test)]
pub fn open_connection() -> Connection {
    let db_name = format!("{}.sqlite", crate::test::current_thread_name());
    open_connection_at(&db_name)
}

fn open_connection_at(location: &str) -> Connection {
    let con = match Connection::open_with_flags(Path::new(location), OpenFlags::default()) {
        Ok(con) => con,
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    };
    if let Err(e) = con.busy_timeout(busy_timeout()) {
        log::warn!("Failed to set busy timeout on database connection: {e:?}");
    }
    con
}

#[cfg(not(test))]
fn busy_timeout() -> Duration {
    Duration::from_millis(crate::config::DRIVE_CONFIG.database.busy_timeout_millis)
}

#[cfg(test)]
fn busy_timeout() -> Duration {
    Duration::from_millis(5_000)
}

/// closes the passed connection, logging instead of panicking if sqlite refuses to let go of it
pub fn close_connection(con: Connection) {
    if let Err((_, e)) = con.close() {
        log::error!(
            "Failed to close database connection: {e:?}\n{}",
            Backtrace::force_capture()
        );
    }
}

/// runs init.sql on the database
fn create_db(con: &Connection) -> Result<()> {
    con.execute_batch(include_str!("../assets/init.sql"))
}

/// handles checking if the database exists and is up to the correct version.
/// If not, it creates the tables
pub fn initialize_db() -> Result<()> {
    let con = open_connection();
    let table_version = match metadata_repository::get_schema_version(&con) {
        Ok(version) => version,
        Err(_) => {
            // tables haven't been created yet
            log::info!("No database found, creating tables...");
            create_db(&con)?;
            SCHEMA_VERSION
        }
    };
    if table_version < SCHEMA_VERSION {
        log::warn!("Database is at version {table_version}, but {SCHEMA_VERSION} is expected");
    }
    close_connection(con);
    Ok(())
}

/// builds the `in (...)` body for queries that operate on a list of ids
pub(crate) fn in_clause(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<String>>()
        .join(",")
}
