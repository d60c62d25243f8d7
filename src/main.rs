#[macro_use]
extern crate rocket;

mod api;
mod auth;
mod backend;
mod catalog;
mod config;
mod error;
mod models;
mod telemetry;
#[cfg(test)]
mod test;
mod validation;
mod views;

use api::{
    api_create_achievement, api_create_theme, api_delete_achievement, api_delete_student,
    api_delete_theme, api_get_achievement_catalog, api_get_achievements, api_get_student,
    api_get_students, api_get_theme, api_get_themes, api_logout, api_set_student_verified,
    api_update_achievement, api_update_theme, health,
};
use auth::{forbidden_api, unauthorized_api};
use backend::Backend;
use config::Config;
use rocket::{Build, Rocket};
use telemetry::{TelemetryFairing, init_tracing};
use tracing::info;

#[launch]
async fn rocket() -> _ {
    init_tracing();

    let config = Config::from_env().expect("Invalid configuration");

    let backend = Backend::new(&config).expect("Failed to construct backend client");

    init_rocket(backend)
}

pub fn init_rocket(backend: Backend) -> Rocket<Build> {
    info!("Starting admin console");

    rocket::build()
        .manage(backend)
        .mount(
            "/api",
            routes![
                api_logout,
                api_get_students,
                api_get_student,
                api_set_student_verified,
                api_delete_student,
                api_get_achievements,
                api_get_achievement_catalog,
                api_create_achievement,
                api_update_achievement,
                api_delete_achievement,
                api_get_themes,
                api_get_theme,
                api_create_theme,
                api_update_theme,
                api_delete_theme,
            ],
        )
        .register("/api", catchers![unauthorized_api, forbidden_api])
        .mount("/api", routes![health])
        .attach(TelemetryFairing)
}
