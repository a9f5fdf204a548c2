#[cfg(test)]
mod tests {
    use ydb_adapter::{ConnectOptions, Connection};
    use ydb_adapter_memory::MemoryDriver;
    use ydb_adapter_tests::{execute_tests, init_logs};

    #[tokio::test]
    async fn memory() {
        init_logs();
        let driver = MemoryDriver::new();
        let connection = Connection::open(
            &driver,
            ConnectOptions::new("grpc://localhost:2136", "/local"),
        )
        .await
        .expect("Could not open the connection");
        execute_tests(connection).await;
        assert_eq!(
            driver.open_transaction_count(),
            0,
            "Every transaction must be ended"
        );
    }

    #[tokio::test]
    async fn memory_from_url() {
        init_logs();
        let driver = MemoryDriver::new().with_server_version(24, 1);
        let connection =
            Connection::connect(&driver, "ydb://localhost:2136/local?connect_timeout=2")
                .await
                .expect("Could not connect");
        assert_eq!(connection.options().database, "/local");
        execute_tests(connection).await;
    }
}
