use crate::{
    Event, Fault, MemoryTransport, Readiness,
    state::{MemoryState, lock, normalize},
};
use std::sync::{Arc, Mutex};
use ydb_adapter_core::{ConnectOptions, Driver, Result, ResultSet};

/// Driver keeping everything in process.
///
/// Clones share the same state, keep one around to script responses, inject
/// faults and inspect the [`Event`] journal while a connection uses another.
#[derive(Clone, Default)]
pub struct MemoryDriver {
    pub(crate) state: Arc<Mutex<MemoryState>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_readiness(self, readiness: Readiness) -> Self {
        lock(&self.state).readiness = readiness;
        self
    }

    pub fn with_server_version(self, major: u32, minor: u32) -> Self {
        lock(&self.state).server_version = Some((major, minor));
        self
    }

    /// Statement `sql` will return `result_sets` instead of being evaluated.
    pub fn respond(&self, sql: &str, result_sets: Vec<ResultSet>) -> &Self {
        lock(&self.state)
            .responses
            .insert(normalize(sql).to_owned(), result_sets);
        self
    }

    /// The operation will fail with `message` until the faults are cleared.
    pub fn inject(&self, fault: Fault, message: impl Into<String>) -> &Self {
        let fault = match fault {
            Fault::Statement(sql) => Fault::Statement(normalize(&sql).to_owned()),
            fault => fault,
        };
        lock(&self.state).faults.insert(fault, message.into());
        self
    }

    pub fn clear_faults(&self) {
        lock(&self.state).faults.clear();
    }

    pub fn events(&self) -> Vec<Event> {
        lock(&self.state).events.clone()
    }

    /// Transactions began and neither committed nor rolled back.
    pub fn open_transaction_count(&self) -> usize {
        lock(&self.state).open_transactions.len()
    }
}

impl Driver for MemoryDriver {
    type Transport = MemoryTransport;

    const NAME: &'static str = "memory";

    async fn open(&self, options: &ConnectOptions) -> Result<MemoryTransport> {
        let mut state = lock(&self.state);
        state.check(&Fault::Open)?;
        log::debug!("Memory transport for `{}`", options.database);
        state.events.push(Event::Opened {
            endpoint: options.endpoint.clone(),
            database: options.database.clone(),
        });
        Ok(MemoryTransport::new(self.state.clone()))
    }
}
