use ydb_adapter_core::{
    DriverSession, Driver, IsolationMode, Params, Result, ResultSet, SessionOf, TransactionOf,
    translate, truncate_long,
};

/// Statement used to check that a connection still works.
pub const PROBE_QUERY: &str = "SELECT 1";

/// Driver session together with the transaction currently open on it.
///
/// At most one transaction is open at any time: it is began lazily by the
/// first statement and stays open until [`Session::commit`] or
/// [`Session::rollback`]. The session belongs to a single caller, sharing it
/// across threads is not supported.
pub struct Session<D: Driver> {
    session: SessionOf<D>,
    transaction: Option<TransactionOf<D>>,
}

impl<D: Driver> Session<D> {
    pub(crate) fn new(session: SessionOf<D>) -> Self {
        Self {
            session,
            transaction: None,
        }
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Runs the statement inside the open transaction, beginning one first if
    /// needed. The transaction is never committed here and stays open when the
    /// statement fails.
    pub(crate) async fn execute(&mut self, sql: &str, params: &Params) -> Result<Vec<ResultSet>> {
        let transaction = match self.transaction.take() {
            Some(transaction) => transaction,
            None => {
                let transaction = self
                    .session
                    .begin(IsolationMode::SerializableReadWrite)
                    .await
                    .map_err(|e| translate(e, "While beginning a transaction"))?;
                log::debug!(
                    "Began {} transaction {}",
                    IsolationMode::SerializableReadWrite,
                    transaction
                );
                transaction
            }
        };
        let transaction = self.transaction.insert(transaction);
        let context = || format!("While executing the query:\n{}", truncate_long!(sql));
        let prepared = self
            .session
            .prepare(sql)
            .await
            .map_err(|e| translate(e, context()))?;
        log::debug!("Executing {} in transaction {}", prepared, transaction);
        self.session
            .execute(transaction, &prepared, params, false)
            .await
            .map_err(|e| translate(e, context()))
    }

    pub(crate) async fn commit(&mut self) -> Result<()> {
        let Some(transaction) = self.transaction.take() else {
            return Ok(());
        };
        log::debug!("Committing transaction {}", transaction);
        let context = format!("While committing the transaction {}", transaction);
        self.session
            .commit(transaction)
            .await
            .map_err(|e| translate(e, context))
    }

    pub(crate) async fn rollback(&mut self) -> Result<()> {
        let Some(transaction) = self.transaction.take() else {
            return Ok(());
        };
        log::debug!("Rolling back transaction {}", transaction);
        let context = format!("While rolling back the transaction {}", transaction);
        self.session
            .rollback(transaction)
            .await
            .map_err(|e| translate(e, context))
    }

    /// Runs [`PROBE_QUERY`] outside of the open transaction.
    pub(crate) async fn probe(&mut self) -> Result<()> {
        self.session
            .execute_once(PROBE_QUERY)
            .await
            .map(|_| ())
            .map_err(|e| translate(e, "While probing the session"))
    }

    /// Rolls back the open transaction, if any, then releases the driver session.
    pub(crate) async fn close(&mut self) -> Result<()> {
        if let Err(e) = self.rollback().await {
            log::warn!("{:#}", e);
        }
        log::debug!("Closing the session");
        self.session
            .close()
            .await
            .map_err(|e| translate(e, "While closing the session"))
    }
}
