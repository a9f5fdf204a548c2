use crate::{Cursor, Features, Session};
use tokio::time::timeout;
use ydb_adapter_core::{
    ConnectOptions, Driver, Error, ErrorKind, Result, Transport, TransportOf, interface_closed,
    translate,
};

/// Link to one database: the driver transport, the lazily created session and
/// through it the transaction statements run in.
///
/// Once closed a connection is not reusable, open a new one instead.
pub struct Connection<D: Driver> {
    options: ConnectOptions,
    transport: Option<TransportOf<D>>,
    session: Option<Session<D>>,
}

impl<D: Driver> Connection<D> {
    /// Opens the transport and waits until it is ready, for at most
    /// `options.connect_timeout`.
    pub async fn open(driver: &D, options: ConnectOptions) -> Result<Self> {
        log::debug!(
            "Opening a {} connection to `{}`, database `{}`",
            D::NAME,
            options.endpoint,
            options.database
        );
        let context = || format!("While connecting to `{}`", options.endpoint);
        let mut transport = driver
            .open(&options)
            .await
            .map_err(|e| translate(e, context()))
            .inspect_err(|e| log::error!("{:#}", e))?;
        let error = match timeout(options.connect_timeout, transport.wait_ready()).await {
            Ok(Ok(())) => {
                return Ok(Self {
                    options,
                    transport: Some(transport),
                    session: None,
                });
            }
            Ok(Err(e)) => translate(e, context()),
            Err(..) => Error::new(ErrorKind::ConnectionTimeout(options.connect_timeout))
                .context(context()),
        };
        log::error!("{:#}", error);
        if let Err(e) = transport.close().await {
            log::warn!("While releasing the transport that did not get ready: {:#}", e);
        }
        Err(error)
    }

    /// Parses the connection url (see [`ConnectOptions::from_url`]) and opens the connection.
    pub async fn connect(driver: &D, url: &str) -> Result<Self> {
        let options = ConnectOptions::from_url(url)?;
        Self::open(driver, options).await
    }

    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_none()
    }

    pub fn in_transaction(&self) -> bool {
        self.session.as_ref().is_some_and(Session::in_transaction)
    }

    pub fn features(&self) -> Features {
        Features::for_server(self.transport.as_ref().and_then(Transport::server_version))
    }

    pub fn cursor(&mut self) -> Cursor<'_, D> {
        Cursor::new(self)
    }

    /// Current session, created on first use.
    pub(crate) async fn session(&mut self) -> Result<&mut Session<D>> {
        let Some(transport) = self.transport.as_mut() else {
            return Err(interface_closed("connection"));
        };
        let session = match self.session.take() {
            Some(session) => session,
            None => {
                let session = transport
                    .create_session()
                    .await
                    .map_err(|e| translate(e, "While creating a session"))?;
                log::debug!("Created a session on `{}`", self.options.database);
                Session::new(session)
            }
        };
        Ok(self.session.insert(session))
    }

    /// Commits the open transaction, if any.
    pub async fn commit(&mut self) -> Result<()> {
        if self.is_closed() {
            let error = interface_closed("connection");
            log::error!("{:#}", error);
            return Err(error);
        }
        match self.session.as_mut() {
            Some(session) => session
                .commit()
                .await
                .inspect_err(|e| log::error!("{:#}", e)),
            None => Ok(()),
        }
    }

    /// Rolls back the open transaction, if any.
    pub async fn rollback(&mut self) -> Result<()> {
        if self.is_closed() {
            let error = interface_closed("connection");
            log::error!("{:#}", error);
            return Err(error);
        }
        match self.session.as_mut() {
            Some(session) => session
                .rollback()
                .await
                .inspect_err(|e| log::error!("{:#}", e)),
            None => Ok(()),
        }
    }

    /// Probes the connection with a trivial statement.
    ///
    /// This is the only operation that does not surface errors: any failure
    /// just makes the connection not usable.
    pub async fn is_usable(&mut self) -> bool {
        let result = match self.session().await {
            Ok(session) => session.probe().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("The connection is not usable: {:#}", e);
                false
            }
        }
    }

    /// Releases the session, then the transport. Closing twice is a no-op.
    pub async fn close(&mut self) {
        if let Some(mut session) = self.session.take()
            && let Err(e) = session.close().await
        {
            log::warn!("{:#}", e);
        }
        if let Some(mut transport) = self.transport.take() {
            log::debug!("Closing the {} transport", D::NAME);
            if let Err(e) = transport.close().await {
                log::warn!(
                    "{:#}",
                    translate(e, "While closing the transport")
                );
            }
        }
    }
}
