use crate::{
    Event, Fault, Statement,
    state::{MemoryState, lock, normalize},
};
use std::{
    fmt::{self, Display, Formatter},
    sync::{Arc, Mutex},
};
use ydb_adapter_core::{
    DriverSession, Error, IsolationMode, Params, Result, ResultSet, interface_closed,
    truncate_long,
};

/// Statement checked by [`MemorySession::prepare`].
///
/// Statements with a scripted response are not parsed, the response is looked
/// up when executing.
#[derive(Debug, Clone)]
pub struct MemoryPrepared {
    pub sql: String,
    statements: Option<Vec<Statement>>,
}

impl Display for MemoryPrepared {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))
    }
}

#[derive(Debug)]
pub struct MemoryTransaction {
    pub id: u64,
    pub mode: IsolationMode,
}

impl Display for MemoryTransaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "tx-{}", self.id)
    }
}

pub struct MemorySession {
    id: u64,
    state: Arc<Mutex<MemoryState>>,
    transactions: Vec<u64>,
    closed: bool,
}

impl MemorySession {
    pub(crate) fn new(id: u64, state: Arc<Mutex<MemoryState>>) -> Self {
        Self {
            id,
            state,
            transactions: Vec::new(),
            closed: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(interface_closed("session"));
        }
        Ok(())
    }

    fn finish(&mut self, state: &mut MemoryState, transaction: u64) {
        state.open_transactions.remove(&transaction);
        self.transactions.retain(|v| *v != transaction);
    }

    fn run(
        state: &MemoryState,
        sql: &str,
        statements: Option<&[Statement]>,
        params: &Params,
    ) -> Result<Vec<ResultSet>> {
        state.check(&Fault::Statement(sql.to_owned()))?;
        let Some(statements) = statements else {
            return state
                .responses
                .get(sql)
                .cloned()
                .ok_or_else(|| Error::msg(format!("No response for `{}`", truncate_long!(sql))));
        };
        let mut result = Vec::new();
        for statement in statements {
            if let Some(result_set) = statement.evaluate(params)? {
                result.push(result_set);
            }
        }
        Ok(result)
    }
}

impl DriverSession for MemorySession {
    type Prepared = MemoryPrepared;
    type Transaction = MemoryTransaction;

    async fn prepare(&mut self, sql: &str) -> Result<MemoryPrepared> {
        self.ensure_open()?;
        let sql = normalize(sql).to_owned();
        let mut state = lock(&self.state);
        state.check(&Fault::Statement(sql.clone()))?;
        let statements = if state.responses.contains_key(&sql) {
            None
        } else {
            Some(Statement::parse_script(&sql)?)
        };
        state.events.push(Event::Prepared {
            session: self.id,
            sql: sql.clone(),
        });
        Ok(MemoryPrepared { sql, statements })
    }

    async fn begin(&mut self, mode: IsolationMode) -> Result<MemoryTransaction> {
        self.ensure_open()?;
        let mut state = lock(&self.state);
        state.check(&Fault::Begin)?;
        let id = state.next_id();
        state.open_transactions.insert(id);
        state.events.push(Event::Began {
            session: self.id,
            transaction: id,
            mode,
        });
        self.transactions.push(id);
        Ok(MemoryTransaction { id, mode })
    }

    async fn execute(
        &mut self,
        transaction: &mut MemoryTransaction,
        query: &MemoryPrepared,
        params: &Params,
        commit: bool,
    ) -> Result<Vec<ResultSet>> {
        self.ensure_open()?;
        let state = self.state.clone();
        let mut state = lock(&state);
        if !state.open_transactions.contains(&transaction.id) {
            return Err(Error::msg(format!("Transaction {} is not open", transaction)));
        }
        let result = Self::run(&state, &query.sql, query.statements.as_deref(), params)?;
        state.events.push(Event::Executed {
            transaction: transaction.id,
            sql: query.sql.clone(),
            commit,
        });
        if commit {
            state.check(&Fault::Commit)?;
            self.finish(&mut state, transaction.id);
            state.events.push(Event::Committed(transaction.id));
        }
        Ok(result)
    }

    async fn commit(&mut self, transaction: MemoryTransaction) -> Result<()> {
        self.ensure_open()?;
        let state = self.state.clone();
        let mut state = lock(&state);
        state.check(&Fault::Commit)?;
        if !state.open_transactions.contains(&transaction.id) {
            return Err(Error::msg(format!("Transaction {} is not open", transaction)));
        }
        self.finish(&mut state, transaction.id);
        state.events.push(Event::Committed(transaction.id));
        Ok(())
    }

    async fn rollback(&mut self, transaction: MemoryTransaction) -> Result<()> {
        self.ensure_open()?;
        let state = self.state.clone();
        let mut state = lock(&state);
        state.check(&Fault::Rollback)?;
        self.finish(&mut state, transaction.id);
        state.events.push(Event::RolledBack(transaction.id));
        Ok(())
    }

    async fn execute_once(&mut self, sql: &str) -> Result<Vec<ResultSet>> {
        self.ensure_open()?;
        let sql = normalize(sql);
        let mut state = lock(&self.state);
        let statements = if state.responses.contains_key(sql) {
            None
        } else {
            Some(Statement::parse_script(sql)?)
        };
        let result = Self::run(&state, sql, statements.as_deref(), &Params::new())?;
        state.events.push(Event::ExecutedOnce {
            session: self.id,
            sql: sql.to_owned(),
        });
        Ok(result)
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let mut state = lock(&self.state);
        for transaction in self.transactions.drain(..) {
            log::warn!("Session {} closed with transaction tx-{} still open", self.id, transaction);
            state.open_transactions.remove(&transaction);
        }
        state.events.push(Event::SessionClosed(self.id));
        state.check(&Fault::CloseSession)
    }
}
