use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Config file merged over the defaults when present in the working directory
pub const CONFIG_FILE: &str = "mongo-test.toml";

/// Prefix of environment overrides, e.g. `MONGO_TEST__BASE_URI`
pub const ENV_PREFIX: &str = "MONGO_TEST__";

/// Settings for the test harness connection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestDbConfig {
    /// Store to run against, without a database path
    pub base_uri: Option<String>,
    /// Prefix for generated database names
    pub database_prefix: String,
    /// How long the driver waits for a usable server before failing an operation
    #[serde(with = "humantime_serde")]
    pub server_selection_timeout: Duration,
}

impl Default for TestDbConfig {
    fn default() -> Self {
        Self {
            base_uri: None,
            database_prefix: String::from("mongo-test-suite-db"),
            server_selection_timeout: Duration::from_secs(10),
        }
    }
}

impl TestDbConfig {
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config = Figment::from(Serialized::defaults(TestDbConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;

        Ok(config)
    }

    /// Database name unique to this call: `<prefix>-<7 hex chars>`
    pub fn unique_database_name(&self) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}", self.database_prefix, &suffix[..7])
    }

    /// Replace the path of `base_uri` with a fresh database name
    /// Query options on `base_uri` are preserved
    pub fn unique_database_uri(&self, base_uri: &str) -> String {
        let (location, query) = match base_uri.split_once('?') {
            Some((location, query)) => (location, Some(query)),
            None => (base_uri, None),
        };

        let authority_start = location.find("://").map_or(0, |pos| pos + 3);
        let host_end = location[authority_start..]
            .find('/')
            .map_or(location.len(), |pos| authority_start + pos);

        let mut uri = format!("{}/{}", &location[..host_end], self.unique_database_name());
        if let Some(query) = query {
            uri.push('?');
            uri.push_str(query);
        }
        uri
    }
}
