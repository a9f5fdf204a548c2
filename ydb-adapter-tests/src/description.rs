use ydb_adapter::{Connection, CursorState, Driver, params};

pub async fn description<D: Driver>(connection: &mut Connection<D>) {
    let mut cursor = connection.cursor();
    cursor
        .execute("SELECT 1 AS id, 'Alice'u AS name, true AS active", &params!())
        .await
        .expect("Could not select the named columns");
    let description = cursor.description().expect("A select must have a description");
    assert_eq!(
        description
            .iter()
            .map(|v| v.name.as_str())
            .collect::<Vec<_>>(),
        ["id", "name", "active"]
    );
    assert!(
        description
            .iter()
            .all(|v| v.type_code.is_none() && v.precision.is_none() && v.null_ok.is_none()),
        "Only the column names are described"
    );

    let error = cursor
        .execute("SELECT * FROM `/this/table/does/not/exist`", &params!())
        .await
        .expect_err("Selecting from a missing table must fail");
    assert_eq!(cursor.state(), CursorState::Failed);
    assert_eq!(cursor.description(), None);
    assert_eq!(cursor.row_count(), None);
    assert!(
        format!("{:#}", error).starts_with("While executing the query:"),
        "Unexpected error: {:#}",
        error
    );
    assert!(cursor.fetch_one().expect("Could not fetch").is_none());
    assert!(
        cursor.connection().in_transaction(),
        "A failed statement leaves the transaction open"
    );
    cursor
        .connection()
        .rollback()
        .await
        .expect("Could not roll back after the failed statement");
    assert!(!cursor.connection().in_transaction());

    cursor
        .execute("SELECT 2 AS id", &params!())
        .await
        .expect("A cursor must execute again after a failure");
    assert_eq!(cursor.state(), CursorState::HasResults);
    cursor
        .connection()
        .rollback()
        .await
        .expect("Could not roll back");
}
