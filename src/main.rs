#[macro_use]
extern crate rocket;

use rocket::data::{ByteUnit, Limits};
use rocket::serde::json::Json;
use rocket::{Build, Config, Rocket};

use handler::{
    api_handler::{api_version, create_account},
    dashboard_handler::{get_dashboard, reconcile_storage},
    file_handler::{delete_file, download_file, list_files, upload_files},
    folder_handler::{create_folder, delete_folder},
    share_handler::{create_share, download_shared, list_shares},
};

use crate::config::DRIVE_CONFIG;
use crate::model::response::BasicMessage;
use crate::repository::initialize_db;
use crate::storage::DiskStorage;

mod config;
mod guard;
mod handler;
mod ledger;
mod model;
mod quota;
mod repository;
mod service;
mod storage;
#[cfg(test)]
mod test;

#[launch]
fn rocket() -> Rocket<Build> {
    #[cfg(not(test))]
    setup_logger();
    if let Err(e) = initialize_db() {
        panic!("Failed to initialize the database: {e:?}");
    }
    let upload_dir = storage::upload_dir();
    log::info!("Storing uploaded files in {upload_dir}");
    let limits = upload_limits(DRIVE_CONFIG.storage.max_upload_bytes);
    rocket::custom(Config::figment().merge(("limits", limits)))
        .register("/", catchers![payload_too_large])
        .manage(DiskStorage::new(&upload_dir))
        .mount("/api", routes![api_version, create_account])
        .mount(
            "/files",
            routes![upload_files, list_files, download_file, delete_file],
        )
        .mount("/folders", routes![create_folder, delete_folder])
        .mount("/dashboard", routes![get_dashboard, reconcile_storage])
        .mount(
            "/shares",
            routes![create_share, list_shares, download_shared],
        )
}

/// raises rocket's form limits so a whole upload batch fits
fn upload_limits(max_upload_bytes: u64) -> Limits {
    let max = ByteUnit::from(max_upload_bytes);
    Limits::default().limit("file", max).limit("data-form", max)
}

#[catch(413)]
fn payload_too_large() -> Json<BasicMessage> {
    let max = DRIVE_CONFIG.storage.max_upload_bytes;
    BasicMessage::new(&format!("The upload is larger than the {max} byte limit."))
}

/// logs to stdout, and to the configured log file if there is one
#[cfg(not(test))]
fn setup_logger() {
    let log_config = &DRIVE_CONFIG.log;
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::offset::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log_config.level_filter())
        // rocket logs every request on its own
        .level_for("rocket", log::LevelFilter::Warn)
        .chain(std::io::stdout());
    if let Some(path) = &log_config.file {
        match fern::log_file(path) {
            Ok(file) => dispatch = dispatch.chain(file),
            Err(e) => eprintln!("Failed to open log file {path}, logging to stdout only: {e:?}"),
        }
    }
    if let Err(e) = dispatch.apply() {
        eprintln!("Failed to set up logging: {e:?}");
    }
}
