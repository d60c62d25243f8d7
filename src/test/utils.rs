use rocket::local::asynchronous::Client;

use crate::backend::Backend;
use crate::config::Config;
use crate::init_rocket;

/// Points at a port nothing listens on: guard checks that reach the network
/// fail fast, which the gate treats as a denial.
pub fn test_config() -> Config {
    Config {
        backend_url: "http://127.0.0.1:9".to_string(),
        backend_anon_key: "test-anon-key".to_string(),
    }
}

pub fn test_backend() -> Backend {
    Backend::new(&test_config()).expect("test backend")
}

pub async fn setup_test_client() -> Client {
    Client::tracked(init_rocket(test_backend()))
        .await
        .expect("valid rocket instance")
}
