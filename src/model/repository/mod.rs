use chrono::NaiveDateTime;

/// represents a row in the Users table. Accounts are created by the identity provider through
/// the provisioning endpoint, and only the ledger ever changes [`UserAccount::storage_used`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct UserAccount {
    /// the id handed to us by the identity provider
    pub id: String,
    /// in bytes
    pub storage_limit: u64,
    /// in bytes. Cached sum of the sizes of every non-deleted file this user owns
    pub storage_used: u64,
    pub created_on: NaiveDateTime,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FileRecord {
    /// the id, will only be populated when pulled from the database
    pub id: Option<u32>,
    /// the id of the account that owns this file
    pub user_id: String,
    /// the display name of the file, as it was uploaded
    pub name: String,
    /// where the storage backend keeps the bytes for this file
    pub storage_key: String,
    /// the extension of the file without the leading `.`, may be empty
    pub file_type: String,
    pub size: u64,
    pub uploaded_on: NaiveDateTime,
    pub last_modified: Option<NaiveDateTime>,
    /// will be None if in the root folder
    pub parent_id: Option<u32>,
    /// always 1 until files can be revised
    pub version: u32,
    pub is_deleted: bool,
    pub deleted_on: Option<NaiveDateTime>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Folder {
    /// cannot be changed, and only retrieved from the database
    pub id: Option<u32>,
    pub user_id: String,
    pub name: String,
    /// may be `None` to represent it being a top-level folder
    pub parent_id: Option<u32>,
    pub created_on: NaiveDateTime,
    pub is_deleted: bool,
    pub deleted_on: Option<NaiveDateTime>,
}

/// a public link to a single file. Anyone holding the token can download the file
/// while the share is unexpired and the file is not deleted
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Share {
    pub id: Option<u32>,
    pub file_id: u32,
    pub token: String,
    /// hex sha256 of `<token>:<password>`, `None` if the share has no password
    pub password_hash: Option<String>,
    pub expires_on: Option<NaiveDateTime>,
    pub created_on: NaiveDateTime,
    pub download_count: u32,
}

impl FileRecord {
    /// builds a record for a freshly stored upload that hasn't been saved to the database yet
    pub fn new_upload(
        user_id: &str,
        name: &str,
        storage_key: &str,
        size: u64,
        parent_id: Option<u32>,
    ) -> FileRecord {
        FileRecord {
            id: None,
            user_id: user_id.to_string(),
            name: name.to_string(),
            storage_key: storage_key.to_string(),
            file_type: file_extension(name),
            size,
            uploaded_on: chrono::offset::Local::now().naive_local(),
            last_modified: None,
            parent_id,
            version: 1,
            is_deleted: false,
            deleted_on: None,
        }
    }
}

impl Folder {
    pub fn new(user_id: &str, name: &str, parent_id: Option<u32>) -> Folder {
        Folder {
            id: None,
            user_id: user_id.to_string(),
            name: name.to_string(),
            parent_id,
            created_on: chrono::offset::Local::now().naive_local(),
            is_deleted: false,
            deleted_on: None,
        }
    }
}

impl Share {
    /// `true` if the share has an expiration date that is at or before `now`
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        matches!(self.expires_on, Some(expires) if expires <= now)
    }
}

/// returns everything after the last `.` in the passed name, or an empty string if there isn't one.
/// dot-files like `.bashrc` have no extension
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(index) => name[index + 1..].to_string(),
    }
}
