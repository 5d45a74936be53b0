//! Connection lifecycle for the test database
//!
//! A `TestDb` starts Uninitialized, becomes Initialized on the first
//! successful `initialize`, and ends Closed. There is no way back from
//! Closed; a new run constructs a new value.

use std::time::Duration;

use mongodb::{
    Client, Database,
    bson::doc,
    options::{Acknowledgment, ClientOptions, WriteConcern},
};
use tracing::{debug, info, warn};

use crate::config::TestDbConfig;
use crate::error::{Result, TestDbError};

/// Observable state of a `TestDb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Closed,
}

#[derive(Debug)]
struct Connection {
    uri: String,
    client: Client,
    database: Database,
}

#[derive(Debug)]
enum State {
    Uninitialized,
    Initialized(Connection),
    Closed,
}

/// Shared connection to the test database
///
/// Fixture operations borrow it immutably and may run concurrently.
/// `initialize` and `close` need exclusive access.
#[derive(Debug)]
pub struct TestDb {
    state: State,
    server_selection_timeout: Option<Duration>,
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDb {
    /// Create an uninitialized handle using the driver's default timeouts
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
            server_selection_timeout: None,
        }
    }

    /// Create an uninitialized handle that applies the connection settings from `config`
    pub fn with_config(config: &TestDbConfig) -> Self {
        Self {
            state: State::Uninitialized,
            server_selection_timeout: Some(config.server_selection_timeout),
        }
    }

    /// Connect to the database named in `uri`
    ///
    /// Once initialized, further calls return immediately and keep the
    /// first connection, even when `uri` differs from the original.
    /// On failure the handle stays Uninitialized.
    pub async fn initialize(&mut self, uri: &str) -> Result<()> {
        match &self.state {
            State::Initialized(connection) if connection.uri == uri => {
                debug!(
                    database = %connection.database.name(),
                    "test database already initialized"
                );
                return Ok(());
            }
            State::Initialized(connection) => {
                warn!(
                    current = %masked_uri(&connection.uri),
                    ignored = %masked_uri(uri),
                    "test database already initialized with a different URI, keeping it"
                );
                return Ok(());
            }
            State::Closed => return Err(TestDbError::Closed),
            State::Uninitialized => {}
        }

        let mut options = ClientOptions::parse(uri).await?;
        let database_name = options
            .default_database
            .clone()
            .ok_or_else(|| TestDbError::NoDatabaseName(masked_uri(uri)))?;

        // Writes resolve only after the primary has journaled them
        options.write_concern = Some(
            WriteConcern::builder()
                .w(Acknowledgment::Nodes(1))
                .journal(true)
                .build(),
        );
        if let Some(timeout) = self.server_selection_timeout {
            options.server_selection_timeout = Some(timeout);
        }

        let client = Client::with_options(options)?;
        let database = client.database(&database_name);

        // The driver connects lazily; ping so an unreachable store fails here
        database.run_command(doc! { "ping": 1 }).await?;

        info!(
            uri = %masked_uri(uri),
            database = %database_name,
            "connected to test database"
        );

        self.state = State::Initialized(Connection {
            uri: uri.to_string(),
            client,
            database,
        });

        Ok(())
    }

    /// Get the selected test database
    pub fn database(&self) -> Result<&Database> {
        self.connection().map(|connection| &connection.database)
    }

    /// Get the client behind the test database
    pub fn client(&self) -> Result<&Client> {
        self.connection().map(|connection| &connection.client)
    }

    /// Get the name of the selected test database
    pub fn database_name(&self) -> Result<&str> {
        self.database().map(Database::name)
    }

    /// Report which lifecycle state the handle is in
    pub fn lifecycle(&self) -> Lifecycle {
        match self.state {
            State::Uninitialized => Lifecycle::Uninitialized,
            State::Initialized(_) => Lifecycle::Initialized,
            State::Closed => Lifecycle::Closed,
        }
    }

    /// Shut the connection down
    ///
    /// Closing twice is a no-op. Closing a handle that was never
    /// initialized fails with `NotInitialized`.
    pub async fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Initialized(Connection {
                uri,
                client,
                database,
            }) => {
                drop(database);
                client.shutdown().await;
                info!(uri = %masked_uri(&uri), "closed test database connection");
                Ok(())
            }
            State::Closed => Ok(()),
            State::Uninitialized => {
                self.state = State::Uninitialized;
                Err(TestDbError::NotInitialized)
            }
        }
    }

    fn connection(&self) -> Result<&Connection> {
        match &self.state {
            State::Initialized(connection) => Ok(connection),
            State::Uninitialized => Err(TestDbError::NotInitialized),
            State::Closed => Err(TestDbError::Closed),
        }
    }
}

/// Mask credentials in a connection string for logging
pub(crate) fn masked_uri(uri: &str) -> String {
    let authority_start = uri.find("://").map_or(0, |pos| pos + 3);
    let authority_end = uri[authority_start..]
        .find(['/', '?'])
        .map_or(uri.len(), |pos| authority_start + pos);

    match uri[authority_start..authority_end].rfind('@') {
        Some(at) => format!(
            "{}*****:*****@{}",
            &uri[..authority_start],
            &uri[authority_start + at + 1..]
        ),
        None => uri.to_string(),
    }
}
