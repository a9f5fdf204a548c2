use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use ydb_adapter_core::{Error, IsolationMode, Result, ResultSet};

/// Something the memory driver did, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Opened { endpoint: String, database: String },
    Ready,
    SessionCreated(u64),
    Began {
        session: u64,
        transaction: u64,
        mode: IsolationMode,
    },
    Prepared { session: u64, sql: String },
    Executed {
        transaction: u64,
        sql: String,
        commit: bool,
    },
    ExecutedOnce { session: u64, sql: String },
    Committed(u64),
    RolledBack(u64),
    SessionClosed(u64),
    Closed,
}

/// How the transport behaves while the caller waits for it to get ready.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Readiness {
    #[default]
    Ready,
    After(Duration),
    Never,
    Fail(String),
}

/// Operation that can be made to fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fault {
    Open,
    CreateSession,
    Begin,
    /// Preparing or running the statement with this exact text.
    Statement(String),
    Commit,
    Rollback,
    CloseSession,
    CloseTransport,
}

#[derive(Default)]
pub(crate) struct MemoryState {
    pub(crate) readiness: Readiness,
    pub(crate) server_version: Option<(u32, u32)>,
    pub(crate) responses: HashMap<String, Vec<ResultSet>>,
    pub(crate) faults: HashMap<Fault, String>,
    pub(crate) events: Vec<Event>,
    pub(crate) open_transactions: HashSet<u64>,
    next_id: u64,
}

impl MemoryState {
    pub(crate) fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub(crate) fn check(&self, fault: &Fault) -> Result<()> {
        match self.faults.get(fault) {
            Some(message) => Err(Error::msg(message.clone())),
            None => Ok(()),
        }
    }
}

pub(crate) fn lock(state: &Mutex<MemoryState>) -> MutexGuard<'_, MemoryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Statement text as used for lookups: trimmed, without the final semicolons.
pub(crate) fn normalize(sql: &str) -> &str {
    sql.trim().trim_end_matches(';').trim_end()
}
