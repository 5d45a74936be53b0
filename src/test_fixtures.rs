use rstest::*;
use testcontainers_modules::{
    mongo::Mongo,
    testcontainers::{ContainerAsync, runners::AsyncRunner},
};

use crate::config::TestDbConfig;
use crate::connection::TestDb;

/// A store reachable for one test, with a database name no other test uses
pub struct TestStore {
    pub uri: String,
    _container: Option<ContainerAsync<Mongo>>,
}

/// An initialized `TestDb` together with the store it is connected to
pub struct ConnectedDb {
    pub db: TestDb,
    pub store: TestStore,
}

impl ConnectedDb {
    /// Drop the test database and close the connection
    pub async fn teardown(mut self) {
        crate::fixtures::flush_database(&self.db)
            .await
            .expect("Failed to flush test database");
        self.db.close().await.expect("Failed to close test database");
    }
}

/// Test fixture that provides a MongoDB store
///
/// Uses `MONGO_TEST__BASE_URI` when configured, otherwise starts a
/// disposable container. Resolves to `None`, after printing a skip
/// notice to stderr, when neither is available.
#[fixture]
pub async fn test_store() -> Option<TestStore> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let config = TestDbConfig::load().expect("Failed to load test configuration");

    if let Some(base_uri) = &config.base_uri {
        return Some(TestStore {
            uri: config.unique_database_uri(base_uri),
            _container: None,
        });
    }

    let container = match Mongo::default().start().await {
        Ok(container) => container,
        Err(e) => {
            eprintln!(
                "Skipping store test: MONGO_TEST__BASE_URI unset and MongoDB container unavailable ({e})"
            );
            return None;
        }
    };

    let port = container
        .get_host_port_ipv4(27017)
        .await
        .expect("Failed to get MongoDB port");
    let base_uri = format!("mongodb://127.0.0.1:{port}");

    Some(TestStore {
        uri: config.unique_database_uri(&base_uri),
        _container: Some(container),
    })
}

/// Test fixture that provides an initialized `TestDb` on a fresh database
#[fixture]
pub async fn test_db(#[future] test_store: Option<TestStore>) -> Option<ConnectedDb> {
    let store = test_store.await?;

    let mut db = TestDb::new();
    db.initialize(&store.uri)
        .await
        .expect("Failed to initialize test database");

    Some(ConnectedDb { db, store })
}
