use rocket::http::Status;
use rocket::local::blocking::Client;

use crate::model::response::file_responses::{FileSummaryResponse, UploadFilesBody};
use crate::model::response::{BasicMessage, DeleteResult};
use crate::rocket;
use crate::test::*;

fn client() -> Client {
    Client::tracked(rocket()).unwrap()
}

mod upload_files_tests {
    use super::*;

    #[test]
    fn upload_without_identity() {
        init_db_folder();
        let client = client();
        let res = client
            .post(uri!("/files"))
            .header(multipart_header())
            .body(multipart_body(&[("test.txt", "hi")], None))
            .dispatch();
        assert_eq!(Status::Unauthorized, res.status());
        cleanup();
    }

    #[test]
    fn upload_reports_totals() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        create_folder_db_entry(USER, "Photos", None);
        let client = client();
        let res = client
            .post(uri!("/files"))
            .header(identity(USER))
            .header(multipart_header())
            .body(multipart_body(&[("a.txt", "hello"), ("empty.txt", "")], Some("0")))
            .dispatch();
        assert_eq!(Status::Created, res.status());
        let body: UploadFilesBody = res.into_json().unwrap();
        assert!(body.success);
        assert_eq!(1, body.uploaded.len());
        assert_eq!("a.txt", body.uploaded[0].name);
        assert_eq!("txt", body.uploaded[0].file_type);
        assert_eq!(5, body.uploaded[0].size);
        assert_eq!(None, body.uploaded[0].folder_id);
        assert_eq!(vec!["empty.txt".to_string()], body.skipped);
        assert_eq!(None, body.failed);
        assert_eq!(1, body.total_files);
        assert_eq!(1, body.total_folders);
        assert_eq!(5, body.storage_used);
        assert_eq!(1000, body.storage_limit);
        assert_eq!(0.5, body.storage_used_percentage);
        cleanup();
    }

    #[test]
    fn upload_larger_than_rocket_default_limit() {
        init_db_folder();
        create_account_db_entry(USER, 2_000_000);
        let client = client();
        let contents = "a".repeat(1_500_000);
        let res = client
            .post(uri!("/files"))
            .header(identity(USER))
            .header(multipart_header())
            .body(multipart_body(&[("big.txt", &contents)], None))
            .dispatch();
        assert_eq!(Status::Created, res.status());
        let body: UploadFilesBody = res.into_json().unwrap();
        assert_eq!(1_500_000, body.uploaded[0].size);
        assert_eq!(1_500_000, get_storage_used_db(USER));
        cleanup();
    }

    #[test]
    fn upload_into_folder() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let folder = create_folder_db_entry(USER, "Photos", None);
        let client = client();
        let res = client
            .post(uri!("/files"))
            .header(identity(USER))
            .header(multipart_header())
            .body(multipart_body(&[("cat.png", "meow")], Some(&folder.to_string())))
            .dispatch();
        assert_eq!(Status::Created, res.status());
        let body: UploadFilesBody = res.into_json().unwrap();
        assert_eq!(Some(folder), body.uploaded[0].folder_id);
        cleanup();
    }

    #[test]
    fn upload_into_missing_folder() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let client = client();
        let res = client
            .post(uri!("/files"))
            .header(identity(USER))
            .header(multipart_header())
            .body(multipart_body(&[("test.txt", "hi")], Some("3")))
            .dispatch();
        assert_eq!(Status::NotFound, res.status());
        assert_eq!(0, get_storage_used_db(USER));
        cleanup();
    }

    #[test]
    fn upload_bad_folder_id() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let client = client();
        let res = client
            .post(uri!("/files"))
            .header(identity(USER))
            .header(multipart_header())
            .body(multipart_body(&[("test.txt", "hi")], Some("abc")))
            .dispatch();
        assert_eq!(Status::BadRequest, res.status());
        let body: BasicMessage = res.into_json().unwrap();
        assert_eq!("abc is not a valid folder id", body.message);
        cleanup();
    }

    #[test]
    fn upload_invalid_name_reports_failure() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let client = client();
        let res = client
            .post(uri!("/files"))
            .header(identity(USER))
            .header(multipart_header())
            .body(multipart_body(&[("good.txt", "hi"), ("..", "bad"), ("never.txt", "x")], None))
            .dispatch();
        assert_eq!(Status::InternalServerError, res.status());
        let body: UploadFilesBody = res.into_json().unwrap();
        assert!(!body.success);
        assert_eq!(1, body.uploaded.len());
        let failed = body.failed.unwrap();
        assert_eq!("..", failed.name);
        assert_eq!("The file name is not valid", failed.message);
        assert_eq!(2, body.storage_used);
        cleanup();
    }
}

mod list_files_tests {
    use super::*;

    #[test]
    fn list_root_files() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let folder = create_folder_db_entry(USER, "Photos", None);
        create_file_db_entry(USER, "root.txt", 3, None);
        create_file_db_entry(USER, "nested.txt", 4, Some(folder));
        let client = client();
        let res = client.get(uri!("/files")).header(identity(USER)).dispatch();
        assert_eq!(Status::Ok, res.status());
        let body: Vec<FileSummaryResponse> = res.into_json().unwrap();
        assert_eq!(1, body.len());
        assert_eq!("root.txt", body[0].name);
        assert_eq!(3, body[0].size);
        // %Y-%m-%d %H:%M:%S
        assert_eq!(19, body[0].uploaded_on.len());
        cleanup();
    }

    #[test]
    fn list_folder_files_with_limit() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let folder = create_folder_db_entry(USER, "Photos", None);
        create_file_db_entry(USER, "a.png", 1, Some(folder));
        create_file_db_entry(USER, "b.png", 1, Some(folder));
        let client = client();
        let res = client
            .get(format!("/files?folderId={folder}&limit=1"))
            .header(identity(USER))
            .dispatch();
        assert_eq!(Status::Ok, res.status());
        let body: Vec<FileSummaryResponse> = res.into_json().unwrap();
        assert_eq!(1, body.len());
        assert_eq!("b.png", body[0].name);
        cleanup();
    }

    #[test]
    fn list_without_identity() {
        init_db_folder();
        let client = client();
        let res = client.get(uri!("/files")).dispatch();
        assert_eq!(Status::Unauthorized, res.status());
        cleanup();
    }
}

mod download_file_tests {
    use super::*;

    #[test]
    fn download_file_contents() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let client = client();
        client
            .post(uri!("/files"))
            .header(identity(USER))
            .header(multipart_header())
            .body(multipart_body(&[("notes.txt", "remember")], None))
            .dispatch();
        let res = client
            .get(uri!("/files/1/contents"))
            .header(identity(USER))
            .dispatch();
        assert_eq!(Status::Ok, res.status());
        assert_eq!(
            Some("attachment; filename=\"notes.txt\""),
            res.headers().get_one("Content-Disposition")
        );
        assert_eq!("remember", res.into_string().unwrap());
        cleanup();
    }

    #[test]
    fn download_someone_elses_file() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        create_account_db_entry(OTHER_USER, 1000);
        let client = client();
        client
            .post(uri!("/files"))
            .header(identity(OTHER_USER))
            .header(multipart_header())
            .body(multipart_body(&[("secret.txt", "shh")], None))
            .dispatch();
        let res = client
            .get(uri!("/files/1/contents"))
            .header(identity(USER))
            .dispatch();
        assert_eq!(Status::NotFound, res.status());
        cleanup();
    }
}

mod delete_file_tests {
    use super::*;

    #[test]
    fn delete_file_frees_space() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let client = client();
        client
            .post(uri!("/files"))
            .header(identity(USER))
            .header(multipart_header())
            .body(multipart_body(&[("a.txt", "1234")], None))
            .dispatch();
        assert_eq!(4, get_storage_used_db(USER));
        let res = client
            .delete(uri!("/files/1"))
            .header(identity(USER))
            .dispatch();
        assert_eq!(Status::Ok, res.status());
        let body: DeleteResult = res.into_json().unwrap();
        assert!(body.success);
        assert_eq!(None, body.message);
        assert_eq!(0, get_storage_used_db(USER));
        cleanup();
    }

    #[test]
    fn delete_missing_file() {
        init_db_folder();
        create_account_db_entry(USER, 1000);
        let client = client();
        let res = client
            .delete(uri!("/files/42"))
            .header(identity(USER))
            .dispatch();
        assert_eq!(Status::Ok, res.status());
        let body: DeleteResult = res.into_json().unwrap();
        assert!(!body.success);
        assert_eq!(Some("File not found".to_string()), body.message);
        cleanup();
    }
}
