use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;

use crate::model::response::api_responses::AccountResponse;
use crate::model::response::BasicMessage;
use crate::rocket;
use crate::test::*;

fn client() -> Client {
    Client::tracked(rocket()).unwrap()
}

#[test]
fn create_account_with_limit() {
    init_db_folder();
    let client = client();
    let res = client
        .post(uri!("/api/accounts"))
        .header(ContentType::JSON)
        .body(r#"{"id":"new-user","storageLimit":2048}"#)
        .dispatch();
    assert_eq!(Status::Created, res.status());
    let body: AccountResponse = res.into_json().unwrap();
    assert_eq!("new-user", body.id);
    assert_eq!(2048, body.storage_limit);
    assert_eq!(0, body.storage_used);
    cleanup();
}

#[test]
fn create_account_uses_default_limit() {
    init_db_folder();
    let client = client();
    let res = client
        .post(uri!("/api/accounts"))
        .header(ContentType::JSON)
        .body(r#"{"id":"new-user"}"#)
        .dispatch();
    assert_eq!(Status::Created, res.status());
    let body: AccountResponse = res.into_json().unwrap();
    assert_eq!(crate::config::DRIVE_CONFIG.quota.default_limit, body.storage_limit);
    cleanup();
}

#[test]
fn create_account_twice_conflicts() {
    init_db_folder();
    create_account_db_entry(USER, 10);
    let client = client();
    let res = client
        .post(uri!("/api/accounts"))
        .header(ContentType::JSON)
        .body(format!(r#"{{"id":"{USER}"}}"#))
        .dispatch();
    assert_eq!(Status::Conflict, res.status());
    cleanup();
}

#[test]
fn create_account_blank_id() {
    init_db_folder();
    let client = client();
    let res = client
        .post(uri!("/api/accounts"))
        .header(ContentType::JSON)
        .body(r#"{"id":"  "}"#)
        .dispatch();
    assert_eq!(Status::BadRequest, res.status());
    let body: BasicMessage = res.into_json().unwrap();
    assert_eq!("An account id is required.", body.message);
    cleanup();
}
