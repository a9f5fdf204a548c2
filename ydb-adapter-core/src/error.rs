use crate::Error;
use std::time::Duration;

/// Category of the errors surfaced by the adapter.
///
/// The kind travels inside an [`Error`], either as the root error or as the
/// context wrapped around a driver error. Use [`ErrorKind::of`] to recover it,
/// the original driver error stays reachable through `source()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// The transport did not become ready within the bound.
    #[error("The transport did not become ready within {0:?}")]
    ConnectionTimeout(Duration),
    /// Operation attempted on a closed cursor or connection.
    #[error("Cannot operate on a closed {0}")]
    InterfaceClosed(&'static str),
    /// Any transport or driver failure.
    #[error("{0}")]
    Database(String),
    /// Unsupported setting.
    #[error("{0}")]
    Configuration(String),
}

impl ErrorKind {
    pub fn of(error: &Error) -> Option<&ErrorKind> {
        error.downcast_ref::<ErrorKind>()
    }

    pub fn is_interface_closed(error: &Error) -> bool {
        matches!(Self::of(error), Some(ErrorKind::InterfaceClosed(..)))
    }

    pub fn is_database(error: &Error) -> bool {
        matches!(Self::of(error), Some(ErrorKind::Database(..)))
    }
}

/// Wraps a driver error into a database error, the original one is kept as the cause.
pub fn translate(error: Error, context: impl Into<String>) -> Error {
    error.context(ErrorKind::Database(context.into()))
}

pub fn interface_closed(what: &'static str) -> Error {
    Error::new(ErrorKind::InterfaceClosed(what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translated_keeps_cause() {
        let error = translate(Error::msg("socket reset"), "While executing the query");
        assert!(ErrorKind::is_database(&error));
        assert_eq!(error.to_string(), "While executing the query");
        assert_eq!(error.root_cause().to_string(), "socket reset");
        assert_eq!(
            format!("{:#}", error),
            "While executing the query: socket reset"
        );
    }

    #[test]
    fn closed() {
        let error = interface_closed("cursor");
        assert!(ErrorKind::is_interface_closed(&error));
        assert!(!ErrorKind::is_database(&error));
        assert_eq!(error.to_string(), "Cannot operate on a closed cursor");
    }

    #[test]
    fn messages() {
        assert_eq!(
            ErrorKind::ConnectionTimeout(Duration::from_secs(5)).to_string(),
            "The transport did not become ready within 5s"
        );
        assert_eq!(
            ErrorKind::Configuration("No collations".into()).to_string(),
            "No collations"
        );
    }
}
