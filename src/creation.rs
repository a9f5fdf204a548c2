use ydb_adapter_core::{Error, ErrorKind, Result};

/// Quotes an identifier, embedded quotes are doubled.
pub fn quote_name(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Settings for the database created to run tests against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationSettings {
    /// Explicit name, otherwise derived from the main database.
    pub name: Option<String>,
    pub collation: Option<String>,
}

impl CreationSettings {
    /// Suffix appended to `CREATE TABLE` statements.
    ///
    /// Collations cannot be chosen at creation time, requesting one is a
    /// configuration error.
    pub fn table_creation_suffix(&self) -> Result<&'static str> {
        if let Some(collation) = &self.collation {
            let error = Error::new(ErrorKind::Configuration(format!(
                "YDB does not support the collation setting at database creation time (requested `{}`)",
                collation
            )));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok("")
    }

    /// Name of the test database: `/local/app` becomes `/local/test_app`.
    pub fn test_database_name(&self, database: &str) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let database = database.trim_end_matches('/');
        match database.rsplit_once('/') {
            Some((parent, name)) => format!("{}/test_{}", parent, name),
            None => format!("test_{}", database),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting() {
        assert_eq!(quote_name("orders"), "\"orders\"");
        assert_eq!(quote_name("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn collation_is_rejected() {
        let settings = CreationSettings {
            collation: Some("utf8_general_ci".into()),
            ..Default::default()
        };
        let error = settings.table_creation_suffix().unwrap_err();
        assert!(matches!(
            ErrorKind::of(&error),
            Some(ErrorKind::Configuration(..))
        ));
        assert_eq!(CreationSettings::default().table_creation_suffix().unwrap(), "");
    }

    #[test]
    fn test_name() {
        let settings = CreationSettings::default();
        assert_eq!(settings.test_database_name("/local/app"), "/local/test_app");
        assert_eq!(settings.test_database_name("/local/"), "/test_local");
        assert_eq!(settings.test_database_name("app"), "test_app");
        let settings = CreationSettings {
            name: Some("/local/custom".into()),
            ..Default::default()
        };
        assert_eq!(settings.test_database_name("/local/app"), "/local/custom");
    }
}
