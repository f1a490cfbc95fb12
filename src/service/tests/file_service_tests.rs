use std::io::{self, Read};

use crate::storage::{upload_dir, DiskStorage, StorageBackend};

/// writes to disk like normal, except for keys ending in `fail_on`
struct FailingStorage {
    disk: DiskStorage,
    fail_on: &'static str,
}

impl FailingStorage {
    fn new(fail_on: &'static str) -> FailingStorage {
        FailingStorage {
            disk: DiskStorage::new(&upload_dir()),
            fail_on,
        }
    }
}

impl StorageBackend for FailingStorage {
    fn write(&self, key: &str, contents: &mut dyn Read) -> io::Result<u64> {
        if key.ends_with(self.fail_on) {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.disk.write(key, contents)
    }

    fn read(&self, key: &str) -> io::Result<Vec<u8>> {
        self.disk.read(key)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.disk.remove(key)
    }
}

/// stands in for another upload committing while this one's bytes are being written
struct ConcurrentUploadStorage {
    disk: DiskStorage,
    user_id: &'static str,
    used_after_write: u64,
}

impl StorageBackend for ConcurrentUploadStorage {
    fn write(&self, key: &str, contents: &mut dyn Read) -> io::Result<u64> {
        crate::test::set_storage_used_db(self.user_id, self.used_after_write);
        self.disk.write(key, contents)
    }

    fn read(&self, key: &str) -> io::Result<Vec<u8>> {
        self.disk.read(key)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.disk.remove(key)
    }
}

fn disk() -> DiskStorage {
    DiskStorage::new(&upload_dir())
}

mod upload_files_tests {
    use super::*;
    use crate::model::error::file_errors::UploadFileError;
    use crate::model::request::file_requests::UploadedFile;
    use crate::service::file_service::{list_files, upload_files};
    use crate::test::*;

    #[test]
    fn upload_stores_bytes_and_updates_usage() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let storage = disk();
        let outcome = upload_files(
            USER,
            None,
            vec![UploadedFile::new("test.txt", &[7u8; 400])],
            &storage,
            false,
        )
        .unwrap();
        assert_eq!(1, outcome.uploaded.len());
        assert_eq!(None, outcome.failed);
        let record = &outcome.uploaded[0];
        assert_eq!(Some(1), record.id);
        assert_eq!("test.txt", record.name);
        assert_eq!("txt", record.file_type);
        assert_eq!(400, record.size);
        assert_eq!(vec![7u8; 400], storage.read(&record.storage_key).unwrap());
        assert_eq!(400, get_storage_used_db(USER));
        cleanup();
    }

    #[test]
    fn upload_skips_empty_files() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let outcome = upload_files(
            USER,
            None,
            vec![
                UploadedFile::new("empty.txt", b""),
                UploadedFile::new("full.txt", b"hi"),
            ],
            &disk(),
            false,
        )
        .unwrap();
        assert_eq!(vec!["empty.txt".to_string()], outcome.skipped);
        assert_eq!(1, outcome.uploaded.len());
        assert_eq!(2, get_storage_used_db(USER));
        cleanup();
    }

    #[test]
    fn upload_into_missing_folder_writes_nothing() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let res = upload_files(
            USER,
            Some(12),
            vec![UploadedFile::new("test.txt", b"hi")],
            &disk(),
            false,
        );
        assert_eq!(Err(UploadFileError::ParentFolderNotFound), res);
        assert_eq!(0, get_storage_used_db(USER));
        cleanup();
    }

    #[test]
    fn upload_into_someone_elses_folder_is_not_found() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        create_account_db_entry(OTHER_USER, 1000);
        let theirs = create_folder_db_entry(OTHER_USER, "theirs", None);
        let res = upload_files(
            USER,
            Some(theirs),
            vec![UploadedFile::new("test.txt", b"hi")],
            &disk(),
            false,
        );
        assert_eq!(Err(UploadFileError::ParentFolderNotFound), res);
        cleanup();
    }

    #[test]
    fn backend_failure_mid_batch_keeps_earlier_files() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let storage = FailingStorage::new("_second.txt");
        let outcome = upload_files(
            USER,
            None,
            vec![
                UploadedFile::new("first.txt", b"12345"),
                UploadedFile::new("second.txt", b"678"),
                UploadedFile::new("third.txt", b"9"),
            ],
            &storage,
            false,
        )
        .unwrap();
        assert_eq!(1, outcome.uploaded.len());
        assert_eq!("first.txt", outcome.uploaded[0].name);
        let failed = outcome.failed.unwrap();
        assert_eq!("second.txt", failed.name);
        assert_eq!(UploadFileError::StorageIo, failed.reason);
        // nothing after the failure was attempted
        let listed = list_files(USER, None, 50).unwrap();
        assert_eq!(1, listed.len());
        assert_eq!(5, get_storage_used_db(USER));
        cleanup();
    }

    #[test]
    fn invalid_name_fails_the_item() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let outcome = upload_files(
            USER,
            None,
            vec![UploadedFile::new("../", b"hi")],
            &disk(),
            false,
        )
        .unwrap();
        assert_eq!(UploadFileError::InvalidName, outcome.failed.unwrap().reason);
        assert_eq!(0, get_storage_used_db(USER));
        cleanup();
    }

    #[test]
    fn quota_is_advisory_when_not_enforced() {
        init_db_folder();
        create_account_db_entry(USER, 10);
        let outcome = upload_files(
            USER,
            None,
            vec![UploadedFile::new("big.txt", &[1u8; 50])],
            &disk(),
            false,
        )
        .unwrap();
        assert_eq!(1, outcome.uploaded.len());
        assert_eq!(50, get_storage_used_db(USER));
        cleanup();
    }

    #[test]
    fn enforced_quota_stops_the_batch() {
        init_db_folder();
        create_account_db_entry(USER, 10);
        let outcome = upload_files(
            USER,
            None,
            vec![
                UploadedFile::new("fits.txt", &[1u8; 10]),
                UploadedFile::new("too_big.txt", &[1u8; 1]),
            ],
            &disk(),
            true,
        )
        .unwrap();
        assert_eq!(1, outcome.uploaded.len());
        let failed = outcome.failed.unwrap();
        assert_eq!("too_big.txt", failed.name);
        assert_eq!(UploadFileError::QuotaExceeded, failed.reason);
        assert_eq!(10, get_storage_used_db(USER));
        cleanup();
    }

    #[test]
    fn enforced_quota_rechecked_when_recording() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        set_storage_used_db(USER, 600);
        let storage = ConcurrentUploadStorage {
            disk: disk(),
            user_id: USER,
            used_after_write: 700,
        };
        let outcome = upload_files(
            USER,
            None,
            vec![UploadedFile::new("late.txt", &[1u8; 400])],
            &storage,
            true,
        )
        .unwrap();
        assert!(outcome.uploaded.is_empty());
        assert_eq!(UploadFileError::QuotaExceeded, outcome.failed.unwrap().reason);
        assert_eq!(700, get_storage_used_db(USER));
        assert!(list_files(USER, None, 50).unwrap().is_empty());
        let leftover = std::fs::read_dir(format!("{}/{USER}", upload_dir()))
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(0, leftover);
        cleanup();
    }
}

mod list_files_tests {
    use super::*;
    use crate::model::request::file_requests::UploadedFile;
    use crate::service::file_service::{list_files, upload_files};
    use crate::test::*;

    #[test]
    fn root_listing_excludes_files_in_folders() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let folder = create_folder_db_entry(USER, "Photos", None);
        create_file_db_entry(USER, "root.txt", 1, None);
        create_file_db_entry(USER, "nested.txt", 1, Some(folder));
        let root = list_files(USER, None, 50).unwrap();
        assert_eq!(1, root.len());
        assert_eq!("root.txt", root[0].name);
        assert!(root.iter().all(|f| f.parent_id.is_none()));
        let photos = list_files(USER, Some(folder), 50).unwrap();
        assert_eq!(1, photos.len());
        assert_eq!("nested.txt", photos[0].name);
        cleanup();
    }

    #[test]
    fn listing_is_newest_first_and_limited() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        upload_files(
            USER,
            None,
            vec![
                UploadedFile::new("a.txt", b"a"),
                UploadedFile::new("b.txt", b"b"),
                UploadedFile::new("c.txt", b"c"),
            ],
            &disk(),
            false,
        )
        .unwrap();
        let listed = list_files(USER, None, 2).unwrap();
        let names: Vec<&str> = listed.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(vec!["c.txt", "b.txt"], names);
        cleanup();
    }

    #[test]
    fn listing_only_shows_own_files() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        create_account_db_entry(OTHER_USER, 1000);
        create_file_db_entry(OTHER_USER, "theirs.txt", 1, None);
        assert!(list_files(USER, None, 50).unwrap().is_empty());
        cleanup();
    }
}

mod download_file_tests {
    use super::*;
    use crate::model::error::file_errors::DownloadFileError;
    use crate::model::request::file_requests::UploadedFile;
    use crate::service::file_service::{delete_file, download_file, upload_files};
    use crate::test::*;

    #[test]
    fn download_returns_name_and_bytes() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let storage = disk();
        upload_files(USER, None, vec![UploadedFile::new("test.txt", b"hello")], &storage, false)
            .unwrap();
        let (record, contents) = download_file(USER, 1, &storage).unwrap();
        assert_eq!("test.txt", record.name);
        assert_eq!(b"hello".to_vec(), contents);
        cleanup();
    }

    #[test]
    fn download_someone_elses_file_is_not_found() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        create_account_db_entry(OTHER_USER, 1000);
        let storage = disk();
        upload_files(OTHER_USER, None, vec![UploadedFile::new("test.txt", b"hi")], &storage, false)
            .unwrap();
        assert_eq!(
            Err(DownloadFileError::NotFound),
            download_file(USER, 1, &storage)
        );
        cleanup();
    }

    #[test]
    fn download_deleted_file_is_not_found() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let storage = disk();
        upload_files(USER, None, vec![UploadedFile::new("test.txt", b"hi")], &storage, false)
            .unwrap();
        delete_file(USER, 1).unwrap();
        assert_eq!(
            Err(DownloadFileError::NotFound),
            download_file(USER, 1, &storage)
        );
        cleanup();
    }

    #[test]
    fn download_with_missing_bytes_is_not_found() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let id = create_file_db_entry(USER, "ghost.txt", 3, None);
        assert_eq!(
            Err(DownloadFileError::NotFound),
            download_file(USER, id, &disk())
        );
        cleanup();
    }
}

mod delete_file_tests {
    use super::*;
    use crate::model::error::file_errors::DeleteFileError;
    use crate::model::request::file_requests::UploadedFile;
    use crate::service::file_service::{delete_file, list_files, upload_files};
    use crate::test::*;

    #[test]
    fn delete_soft_deletes_and_frees_space() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let storage = disk();
        let outcome = upload_files(
            USER,
            None,
            vec![UploadedFile::new("test.txt", &[0u8; 400])],
            &storage,
            false,
        )
        .unwrap();
        delete_file(USER, 1).unwrap();
        assert_eq!(0, get_storage_used_db(USER));
        let record = get_file_db_entry_any_state(1);
        assert!(record.is_deleted);
        assert!(record.deleted_on.is_some());
        // bytes stay in the backend
        assert!(storage.read(&outcome.uploaded[0].storage_key).is_ok());
        assert!(list_files(USER, None, 50).unwrap().is_empty());
        cleanup();
    }

    #[test]
    fn delete_nonexistent_file_changes_nothing() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        create_account_db_entry(OTHER_USER, 1000);
        set_storage_used_db(USER, 10);
        set_storage_used_db(OTHER_USER, 20);
        assert_eq!(Err(DeleteFileError::NotFound), delete_file(USER, 99));
        assert_eq!(10, get_storage_used_db(USER));
        assert_eq!(20, get_storage_used_db(OTHER_USER));
        cleanup();
    }

    #[test]
    fn delete_twice_is_not_found() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        upload_files(USER, None, vec![UploadedFile::new("test.txt", b"abc")], &disk(), false)
            .unwrap();
        delete_file(USER, 1).unwrap();
        assert_eq!(Err(DeleteFileError::NotFound), delete_file(USER, 1));
        assert_eq!(0, get_storage_used_db(USER));
        cleanup();
    }

    #[test]
    fn delete_someone_elses_file_is_not_found() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        create_account_db_entry(OTHER_USER, 1000);
        upload_files(OTHER_USER, None, vec![UploadedFile::new("test.txt", b"abc")], &disk(), false)
            .unwrap();
        assert_eq!(Err(DeleteFileError::NotFound), delete_file(USER, 1));
        assert_eq!(3, get_storage_used_db(OTHER_USER));
        assert!(!get_file_db_entry_any_state(1).is_deleted);
        cleanup();
    }
}
