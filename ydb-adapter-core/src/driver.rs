use crate::{ConnectOptions, ResultSet, Result, Value};
use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
    future::Future,
};

/// Named statement parameters, keys include the `$` sigil.
pub type Params = BTreeMap<String, Value>;

/// Transaction mode requested from the server.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum IsolationMode {
    #[default]
    SerializableReadWrite,
}

impl Display for IsolationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IsolationMode::SerializableReadWrite => "SerializableReadWrite",
        })
    }
}

/// Entry point of a driver: produces transports for a database.
pub trait Driver {
    type Transport: Transport;

    /// Scheme like name used in logs and messages.
    const NAME: &'static str;

    /// Create the transport handle. It does not need to be ready yet, the
    /// caller waits for readiness with [`Transport::wait_ready`].
    fn open(&self, options: &ConnectOptions) -> impl Future<Output = Result<Self::Transport>>;
}

/// Live link to the database cluster.
pub trait Transport {
    type Session: DriverSession;

    /// Resolves once the transport can serve requests. Callers bound the wait.
    fn wait_ready(&mut self) -> impl Future<Output = Result<()>>;

    fn create_session(&mut self) -> impl Future<Output = Result<Self::Session>>;

    /// `(major, minor)` version of the server, when known.
    fn server_version(&self) -> Option<(u32, u32)> {
        None
    }

    fn close(&mut self) -> impl Future<Output = Result<()>>;
}

/// Server side execution context bound to one transport.
pub trait DriverSession {
    /// Statement prepared against this session.
    type Prepared: Display;
    /// Handle of a transaction began on this session.
    type Transaction: Display;

    fn prepare(&mut self, sql: &str) -> impl Future<Output = Result<Self::Prepared>>;

    fn begin(&mut self, mode: IsolationMode) -> impl Future<Output = Result<Self::Transaction>>;

    /// Runs a prepared statement inside `transaction`, committing it right
    /// after when `commit` is true.
    fn execute(
        &mut self,
        transaction: &mut Self::Transaction,
        query: &Self::Prepared,
        params: &Params,
        commit: bool,
    ) -> impl Future<Output = Result<Vec<ResultSet>>>;

    fn commit(&mut self, transaction: Self::Transaction) -> impl Future<Output = Result<()>>;

    fn rollback(&mut self, transaction: Self::Transaction) -> impl Future<Output = Result<()>>;

    /// Runs a single statement in its own implicitly committed transaction.
    fn execute_once(&mut self, sql: &str) -> impl Future<Output = Result<Vec<ResultSet>>>;

    fn close(&mut self) -> impl Future<Output = Result<()>>;
}

pub type TransportOf<D> = <D as Driver>::Transport;
pub type SessionOf<D> = <TransportOf<D> as Transport>::Session;
pub type TransactionOf<D> = <SessionOf<D> as DriverSession>::Transaction;
