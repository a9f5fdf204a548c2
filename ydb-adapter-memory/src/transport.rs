use crate::{
    Event, Fault, MemorySession, Readiness,
    state::{MemoryState, lock},
};
use std::{
    future,
    sync::{Arc, Mutex},
};
use ydb_adapter_core::{Error, Result, Transport, interface_closed};

pub struct MemoryTransport {
    state: Arc<Mutex<MemoryState>>,
    closed: bool,
}

impl MemoryTransport {
    pub(crate) fn new(state: Arc<Mutex<MemoryState>>) -> Self {
        Self {
            state,
            closed: false,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(interface_closed("transport"));
        }
        Ok(())
    }
}

impl Transport for MemoryTransport {
    type Session = MemorySession;

    async fn wait_ready(&mut self) -> Result<()> {
        self.ensure_open()?;
        let readiness = lock(&self.state).readiness.clone();
        match readiness {
            Readiness::Ready => {}
            Readiness::After(delay) => tokio::time::sleep(delay).await,
            Readiness::Never => future::pending::<()>().await,
            Readiness::Fail(message) => return Err(Error::msg(message)),
        }
        lock(&self.state).events.push(Event::Ready);
        Ok(())
    }

    async fn create_session(&mut self) -> Result<MemorySession> {
        self.ensure_open()?;
        let mut state = lock(&self.state);
        state.check(&Fault::CreateSession)?;
        let id = state.next_id();
        state.events.push(Event::SessionCreated(id));
        Ok(MemorySession::new(id, self.state.clone()))
    }

    fn server_version(&self) -> Option<(u32, u32)> {
        lock(&self.state).server_version
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let mut state = lock(&self.state);
        state.events.push(Event::Closed);
        state.check(&Fault::CloseTransport)
    }
}
