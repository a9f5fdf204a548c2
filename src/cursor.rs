use crate::Connection;
use ydb_adapter_core::{
    ColumnDescription, Driver, Params, Result, ResultSet, Row, interface_closed,
};

/// Rows returned by [`Cursor::fetch_many`] when no size is given.
pub const DEFAULT_FETCH_SIZE: usize = 1;

/// Observable state of a [`Cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No statement executed yet.
    Idle,
    /// A statement is in flight. A cursor stays here when the execution future
    /// is dropped before completion.
    Executing,
    /// The last statement succeeded, its rows can be fetched.
    HasResults,
    /// The last statement failed. The cursor can execute again.
    Failed,
    Closed,
}

enum Phase {
    Idle,
    Executing,
    HasResults(Buffered),
    Failed,
    Closed,
}

struct Buffered {
    result_sets: Vec<ResultSet>,
    description: Option<Box<[ColumnDescription]>>,
    row_count: Option<usize>,
}

/// Per statement handle over the connection.
///
/// Statements run inside the transaction of the connection session, began on
/// the first `execute` and ended only by [`Connection::commit`] or
/// [`Connection::rollback`]. Rows are buffered and fetched in the order the
/// statement produced them, each row is returned once.
pub struct Cursor<'c, D: Driver> {
    connection: &'c mut Connection<D>,
    phase: Phase,
    statement: Option<String>,
}

impl<'c, D: Driver> Cursor<'c, D> {
    pub(crate) fn new(connection: &'c mut Connection<D>) -> Self {
        Self {
            connection,
            phase: Phase::Idle,
            statement: None,
        }
    }

    /// The connection this cursor runs on, used to commit or roll back.
    pub fn connection(&mut self) -> &mut Connection<D> {
        &mut *self.connection
    }

    pub fn state(&self) -> CursorState {
        match self.phase {
            Phase::Idle => CursorState::Idle,
            Phase::Executing => CursorState::Executing,
            Phase::HasResults(..) => CursorState::HasResults,
            Phase::Failed => CursorState::Failed,
            Phase::Closed => CursorState::Closed,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.phase, Phase::Closed)
    }

    /// Text of the last statement passed to [`Cursor::execute`].
    pub fn statement(&self) -> Option<&str> {
        self.statement.as_deref()
    }

    /// Columns of the first result set of the last successful statement.
    ///
    /// Only the names are populated.
    pub fn description(&self) -> Option<&[ColumnDescription]> {
        match &self.phase {
            Phase::HasResults(buffered) => buffered.description.as_deref(),
            _ => None,
        }
    }

    /// Rows the first result set of the last successful statement held.
    pub fn row_count(&self) -> Option<usize> {
        match &self.phase {
            Phase::HasResults(buffered) => buffered.row_count,
            _ => None,
        }
    }

    /// Number of result sets the last successful statement produced.
    pub fn result_set_count(&self) -> usize {
        match &self.phase {
            Phase::HasResults(buffered) => buffered.result_sets.len(),
            _ => 0,
        }
    }

    /// Executes the statement, beginning a serializable read-write
    /// transaction first when none is open. The transaction is left open.
    ///
    /// Any previously buffered rows are discarded. On failure the cursor
    /// moves to [`CursorState::Failed`] and the transaction stays open.
    pub async fn execute(&mut self, sql: &str, params: &Params) -> Result<()> {
        if self.is_closed() {
            let error = interface_closed("cursor");
            log::error!("{:#}", error);
            return Err(error);
        }
        self.phase = Phase::Executing;
        self.statement = Some(sql.to_owned());
        let result = match self.connection.session().await {
            Ok(session) => session.execute(sql, params).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(result_sets) => {
                let first = result_sets.first();
                self.phase = Phase::HasResults(Buffered {
                    description: first.map(|v| {
                        v.columns
                            .iter()
                            .map(ColumnDescription::from_column)
                            .collect()
                    }),
                    row_count: first.map(ResultSet::remaining),
                    result_sets,
                });
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Failed;
                log::error!("{:#}", e);
                Err(e)
            }
        }
    }

    fn current(&mut self) -> Result<Option<&mut ResultSet>> {
        match &mut self.phase {
            Phase::Closed => {
                let error = interface_closed("cursor");
                log::error!("{:#}", error);
                Err(error)
            }
            Phase::HasResults(buffered) => Ok(buffered.result_sets.first_mut()),
            Phase::Idle | Phase::Executing | Phase::Failed => Ok(None),
        }
    }

    /// Next row, `None` once the rows are exhausted or when nothing was executed.
    pub fn fetch_one(&mut self) -> Result<Option<Row>> {
        Ok(self.current()?.and_then(ResultSet::take_one))
    }

    /// Up to `size` rows (default [`DEFAULT_FETCH_SIZE`]), fewer when not enough remain.
    pub fn fetch_many(&mut self, size: Option<usize>) -> Result<Vec<Row>> {
        let size = size.unwrap_or(DEFAULT_FETCH_SIZE);
        Ok(self
            .current()?
            .map(|result_set| result_set.take(size))
            .unwrap_or_default())
    }

    /// All the remaining rows.
    pub fn fetch_all(&mut self) -> Result<Vec<Row>> {
        Ok(self
            .current()?
            .map(ResultSet::take_all)
            .unwrap_or_default())
    }

    /// Discards the buffered rows. Any further operation fails, closing again is a no-op.
    pub fn close(&mut self) {
        self.phase = Phase::Closed;
        self.statement = None;
    }
}
