//! Common test utilities

use anyhow::Result;
use mongo_test_suite::TestDbConfig;
use testcontainers_modules::{
    mongo::Mongo,
    testcontainers::{ContainerAsync, runners::AsyncRunner},
};

/// A MongoDB store for one test file plus the URI of a fresh database on it
pub struct TestContext {
    pub uri: String,
    _container: Option<ContainerAsync<Mongo>>,
}

impl TestContext {
    /// Use `MONGO_TEST__BASE_URI` when set, otherwise start a container
    pub async fn start() -> Result<Self> {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let config = TestDbConfig::load()?;
        if let Some(base_uri) = &config.base_uri {
            return Ok(TestContext {
                uri: config.unique_database_uri(base_uri),
                _container: None,
            });
        }

        let container = Mongo::default().start().await?;
        let port = container.get_host_port_ipv4(27017).await?;

        Ok(TestContext {
            uri: config.unique_database_uri(&format!("mongodb://127.0.0.1:{port}")),
            _container: Some(container),
        })
    }
}
