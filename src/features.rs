/// Capabilities of the backend, as consumed by object mappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub uses_savepoints: bool,
    pub supports_transactions: bool,
    pub can_return_rows_from_bulk_insert: bool,
    pub has_select_for_update: bool,
    pub has_select_for_update_nowait: bool,
    pub supports_tablespaces: bool,
    /// Parameters are bound by name (`$name`).
    pub supports_paramstyle_named: bool,
    pub supports_sequence_reset: bool,
    pub supports_json_field: bool,
    pub supports_index_on_text_field: bool,
    pub supports_atomic_references_rename: bool,
    pub can_introspect_foreign_keys: bool,
    pub supports_timezones: bool,
    pub requires_literal_defaults: bool,
    pub can_clone_databases: bool,
    pub supports_temporal_subtraction: bool,
}

impl Features {
    pub const DEFAULT: Features = Features {
        uses_savepoints: true,
        supports_transactions: true,
        can_return_rows_from_bulk_insert: true,
        has_select_for_update: true,
        has_select_for_update_nowait: false,
        supports_tablespaces: true,
        supports_paramstyle_named: true,
        supports_sequence_reset: false,
        supports_json_field: true,
        supports_index_on_text_field: true,
        supports_atomic_references_rename: false,
        can_introspect_foreign_keys: true,
        supports_timezones: false,
        requires_literal_defaults: false,
        can_clone_databases: true,
        supports_temporal_subtraction: true,
    };

    /// Oldest server version offering interactive transactions.
    pub const MIN_TRANSACTIONAL_VERSION: (u32, u32) = (2, 0);

    /// Features of a server of the given version. An unknown version is
    /// assumed to be recent.
    pub fn for_server(version: Option<(u32, u32)>) -> Self {
        Self {
            supports_transactions: version.is_none_or(|v| v >= Self::MIN_TRANSACTIONAL_VERSION),
            ..Self::DEFAULT
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::Features;

    #[test]
    fn transactions_by_version() {
        assert!(Features::for_server(None).supports_transactions);
        assert!(Features::for_server(Some((2, 0))).supports_transactions);
        assert!(Features::for_server(Some((23, 3))).supports_transactions);
        assert!(!Features::for_server(Some((1, 9))).supports_transactions);
        assert_eq!(
            Features::for_server(Some((1, 0))),
            Features {
                supports_transactions: false,
                ..Default::default()
            }
        );
    }
}
