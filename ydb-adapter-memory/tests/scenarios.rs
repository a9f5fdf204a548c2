#[cfg(test)]
mod tests {
    use indoc::indoc;
    use std::time::Duration;
    use ydb_adapter::{
        Column, ConnectOptions, Connection, CursorState, ErrorKind, IsolationMode, ResultSet, Row,
        Value, params,
    };
    use ydb_adapter_memory::{Event, Fault, MemoryDriver, Readiness};
    use ydb_adapter_tests::{init_logs, silent_logs};

    fn options() -> ConnectOptions {
        ConnectOptions::new("grpc://localhost:2136", "/local")
    }

    async fn open(driver: &MemoryDriver) -> Connection<MemoryDriver> {
        Connection::open(driver, options())
            .await
            .expect("Could not open the connection")
    }

    #[tokio::test]
    async fn lazy_serializable_transaction() {
        init_logs();
        let driver = MemoryDriver::new();
        let mut connection = open(&driver).await;
        assert_eq!(driver.events(), [
            Event::Opened {
                endpoint: "grpc://localhost:2136".into(),
                database: "/local".into(),
            },
            Event::Ready,
        ]);
        let mut cursor = connection.cursor();
        cursor
            .execute("SELECT 1", &params!())
            .await
            .expect("Could not execute");
        assert_eq!(&driver.events()[2..], [
            Event::SessionCreated(1),
            Event::Began {
                session: 1,
                transaction: 2,
                mode: IsolationMode::SerializableReadWrite,
            },
            Event::Prepared {
                session: 1,
                sql: "SELECT 1".into(),
            },
            Event::Executed {
                transaction: 2,
                sql: "SELECT 1".into(),
                commit: false,
            },
        ]);
        cursor
            .execute("SELECT 2", &params!())
            .await
            .expect("Could not execute");
        assert_eq!(
            driver
                .events()
                .iter()
                .filter(|v| matches!(v, Event::Began { .. }))
                .count(),
            1,
            "The second statement reuses the transaction"
        );
        cursor
            .connection()
            .commit()
            .await
            .expect("Could not commit");
        assert_eq!(driver.events().last(), Some(&Event::Committed(2)));
        assert_eq!(driver.open_transaction_count(), 0);
    }

    #[tokio::test]
    async fn failed_statement_keeps_transaction() {
        init_logs();
        let driver = MemoryDriver::new();
        driver.inject(Fault::Statement("SELECT 2".into()), "socket reset");
        let mut connection = open(&driver).await;
        let mut cursor = connection.cursor();
        cursor
            .execute("SELECT 1", &params!())
            .await
            .expect("Could not execute");
        silent_logs! {
            let error = cursor
                .execute("SELECT 2;", &params!())
                .await
                .expect_err("The statement must fail");
            assert!(ErrorKind::is_database(&error));
            assert_eq!(
                format!("{:#}", error),
                "While executing the query:\nSELECT 2;: socket reset"
            );
        }
        assert_eq!(cursor.state(), CursorState::Failed);
        assert!(cursor.connection().in_transaction());
        assert_eq!(driver.open_transaction_count(), 1);

        cursor
            .connection()
            .rollback()
            .await
            .expect("Could not roll back");
        assert_eq!(driver.open_transaction_count(), 0);
        assert!(driver.events().contains(&Event::RolledBack(2)));

        cursor
            .execute("SELECT 1", &params!())
            .await
            .expect("Could not execute after the rollback");
        assert!(driver.events().contains(&Event::Began {
            session: 1,
            transaction: 3,
            mode: IsolationMode::SerializableReadWrite,
        }));
        cursor
            .connection()
            .rollback()
            .await
            .expect("Could not roll back");
    }

    #[tokio::test]
    async fn open_timeout() {
        init_logs();
        let driver = MemoryDriver::new().with_readiness(Readiness::Never);
        let timeout = Duration::from_millis(50);
        silent_logs! {
            let error = Connection::open(&driver, options().with_connect_timeout(timeout))
                .await
                .err()
                .expect("The connection must time out");
            assert_eq!(
                ErrorKind::of(&error),
                Some(&ErrorKind::ConnectionTimeout(timeout))
            );
            assert!(format!("{:#}", error).starts_with("While connecting to `grpc://localhost:2136`"));
        }
        assert_eq!(
            driver.events().last(),
            Some(&Event::Closed),
            "The transport is released"
        );
    }

    #[tokio::test]
    async fn slow_but_in_time() {
        init_logs();
        let driver = MemoryDriver::new().with_readiness(Readiness::After(Duration::from_millis(10)));
        let mut connection =
            Connection::open(&driver, options().with_connect_timeout(Duration::from_secs(2)))
                .await
                .expect("The transport gets ready in time");
        assert!(connection.is_usable().await);
        connection.close().await;
    }

    #[tokio::test]
    async fn open_failures() {
        init_logs();
        silent_logs! {
            let driver = MemoryDriver::new().with_readiness(Readiness::Fail("discovery failed".into()));
            let error = Connection::open(&driver, options())
                .await
                .err()
                .expect("The readiness check fails");
            assert!(ErrorKind::is_database(&error));
            assert!(format!("{:#}", error).ends_with("discovery failed"));

            let driver = MemoryDriver::new();
            driver.inject(Fault::Open, "no route to host");
            let error = Connection::open(&driver, options())
                .await
                .err()
                .expect("Opening fails");
            assert!(ErrorKind::is_database(&error));
            assert!(driver.events().is_empty());

            assert!(
                Connection::connect(&driver, "postgres://localhost/local")
                    .await
                    .is_err()
            );
        }
    }

    #[tokio::test]
    async fn usability() {
        init_logs();
        let driver = MemoryDriver::new();
        let mut connection = open(&driver).await;
        assert!(connection.is_usable().await);
        assert!(driver.events().contains(&Event::ExecutedOnce {
            session: 1,
            sql: "SELECT 1".into(),
        }));
        assert!(!connection.in_transaction(), "Probing never begins a transaction");

        driver.inject(Fault::Statement("SELECT 1".into()), "session expired");
        silent_logs! {
            assert!(!connection.is_usable().await);
        }
        driver.clear_faults();
        assert!(connection.is_usable().await);

        connection.close().await;
        silent_logs! {
            assert!(!connection.is_usable().await);
        }
    }

    #[tokio::test]
    async fn close() {
        init_logs();
        let driver = MemoryDriver::new();
        let mut connection = open(&driver).await;
        connection
            .cursor()
            .execute("SELECT 1", &params!())
            .await
            .expect("Could not execute");
        assert_eq!(driver.open_transaction_count(), 1);

        connection.close().await;
        assert!(connection.is_closed());
        assert_eq!(driver.open_transaction_count(), 0);
        assert_eq!(&driver.events()[driver.events().len() - 3..], [
            Event::RolledBack(2),
            Event::SessionClosed(1),
            Event::Closed,
        ]);
        connection.close().await;
        assert_eq!(
            driver
                .events()
                .iter()
                .filter(|v| **v == Event::Closed)
                .count(),
            1,
            "Closing twice is a no-op"
        );

        silent_logs! {
            assert!(ErrorKind::is_interface_closed(
                &connection.commit().await.expect_err("Closed")
            ));
            assert!(ErrorKind::is_interface_closed(
                &connection.rollback().await.expect_err("Closed")
            ));
            let mut cursor = connection.cursor();
            let error = cursor
                .execute("SELECT 1", &params!())
                .await
                .expect_err("Closed");
            assert!(ErrorKind::is_interface_closed(&error));
            assert_eq!(cursor.state(), CursorState::Failed);
        }
    }

    #[tokio::test]
    async fn close_swallows_errors() {
        init_logs();
        let driver = MemoryDriver::new();
        let mut connection = open(&driver).await;
        assert!(connection.is_usable().await);
        driver
            .inject(Fault::CloseSession, "session already gone")
            .inject(Fault::CloseTransport, "channel closed");
        silent_logs! {
            connection.close().await;
        }
        assert!(connection.is_closed());
        assert_eq!(driver.events().last(), Some(&Event::Closed));
    }

    #[tokio::test]
    async fn lifecycle_failures() {
        init_logs();
        let driver = MemoryDriver::new();
        let mut connection = open(&driver).await;

        driver.inject(Fault::CreateSession, "resource exhausted");
        silent_logs! {
            let error = connection
                .cursor()
                .execute("SELECT 1", &params!())
                .await
                .expect_err("The session cannot be created");
            assert!(ErrorKind::is_database(&error));
        }
        driver.clear_faults();

        driver.inject(Fault::Begin, "overloaded");
        silent_logs! {
            let error = connection
                .cursor()
                .execute("SELECT 1", &params!())
                .await
                .expect_err("The transaction cannot begin");
            assert!(ErrorKind::is_database(&error));
        }
        assert!(!connection.in_transaction());
        driver.clear_faults();

        connection
            .cursor()
            .execute("SELECT 1", &params!())
            .await
            .expect("Could not execute");
        driver.inject(Fault::Commit, "transaction locks invalidated");
        silent_logs! {
            let error = connection.commit().await.expect_err("The commit fails");
            assert!(ErrorKind::is_database(&error));
        }
        assert!(
            !connection.in_transaction(),
            "A failed commit still ends the transaction"
        );
        driver.clear_faults();
        connection.close().await;
    }

    #[tokio::test]
    async fn features() {
        init_logs();
        let driver = MemoryDriver::new();
        let connection = open(&driver).await;
        assert!(connection.features().supports_transactions);
        assert!(connection.features().uses_savepoints);
        assert!(!connection.features().supports_timezones);

        let driver = MemoryDriver::new().with_server_version(1, 9);
        let connection = open(&driver).await;
        assert!(!connection.features().supports_transactions);

        let driver = MemoryDriver::new().with_server_version(24, 3);
        let connection = open(&driver).await;
        assert!(connection.features().supports_transactions);
    }

    #[tokio::test]
    async fn statements_without_rows() {
        init_logs();
        let driver = MemoryDriver::new();
        let mut connection = open(&driver).await;
        let mut cursor = connection.cursor();
        cursor
            .execute(
                indoc! {"
                    CREATE TABLE users (
                        id Uint64,
                        name Utf8,
                        PRIMARY KEY (id)
                    );
                "},
                &params!(),
            )
            .await
            .expect("Could not create the table");
        assert_eq!(cursor.state(), CursorState::HasResults);
        assert_eq!(cursor.result_set_count(), 0);
        assert_eq!(cursor.description(), None);
        assert_eq!(cursor.row_count(), None);
        assert!(cursor.fetch_one().expect("Could not fetch").is_none());
        assert!(cursor.fetch_all().expect("Could not fetch").is_empty());
        cursor
            .connection()
            .rollback()
            .await
            .expect("Could not roll back");
    }

    #[tokio::test]
    async fn scripted_response() {
        init_logs();
        let driver = MemoryDriver::new();
        let query = "SELECT id, name FROM users ORDER BY id";
        driver.respond(
            query,
            vec![ResultSet::new(
                [Column::new("id", "Uint64"), Column::new("name", "Optional<Utf8>")],
                [
                    Box::new([Value::Uint64(Some(1)), Value::Utf8(Some("Alice".into()))]) as Row,
                    Box::new([Value::Uint64(Some(2)), Value::Utf8(None)]) as Row,
                ],
            )],
        );
        let mut connection = open(&driver).await;
        let mut cursor = connection.cursor();
        cursor
            .execute(query, &params!())
            .await
            .expect("Could not execute");
        assert_eq!(cursor.row_count(), Some(2));
        let description = cursor.description().expect("Expected a description");
        assert_eq!(description[0].name, "id");
        assert_eq!(description[1].name, "name");
        let rows = cursor.fetch_all().expect("Could not fetch");
        assert_eq!(rows[1][1], Value::Utf8(None));
        assert!(rows[1][1].is_null());
        cursor
            .connection()
            .rollback()
            .await
            .expect("Could not roll back");
    }

    #[tokio::test]
    async fn missing_parameter() {
        init_logs();
        let driver = MemoryDriver::new();
        let mut connection = open(&driver).await;
        let mut cursor = connection.cursor();
        silent_logs! {
            let error = cursor
                .execute("SELECT $id", &params!())
                .await
                .expect_err("The parameter is missing");
            assert!(ErrorKind::is_database(&error));
        }
        cursor
            .execute("SELECT $id", &params! { "$id" => 5_i32 })
            .await
            .expect("Could not execute with the parameter");
        let row = cursor
            .fetch_one()
            .expect("Could not fetch")
            .expect("Expected a row");
        assert_eq!(row[0], Value::Int32(Some(5)));
        assert_eq!(cursor.description().expect("Described")[0].name, "column0");
        cursor
            .connection()
            .rollback()
            .await
            .expect("Could not roll back");
    }
}
