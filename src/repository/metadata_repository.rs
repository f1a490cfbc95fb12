use rusqlite::Connection;

/// reads the schema version recorded by `init.sql`. Unparseable values are treated as version 0
pub fn get_schema_version(con: &Connection) -> Result<u64, rusqlite::Error> {
    let raw: String = con.query_row(
        include_str!("../assets/queries/metadata/get_database_version.sql"),
        [],
        |row| row.get(0),
    )?;
    Ok(raw.trim().parse::<u64>().unwrap_or_default())
}
