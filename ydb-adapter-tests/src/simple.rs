use ydb_adapter::{AsValue, Connection, CursorState, Driver, params};

pub async fn simple<D: Driver>(connection: &mut Connection<D>) {
    let mut cursor = connection.cursor();
    assert_eq!(cursor.state(), CursorState::Idle);
    assert!(
        cursor
            .fetch_one()
            .expect("Fetching from an idle cursor must not fail")
            .is_none()
    );
    assert_eq!(cursor.description(), None);

    cursor
        .execute("SELECT 1", &params!())
        .await
        .expect("Could not execute SELECT 1");
    assert_eq!(cursor.state(), CursorState::HasResults);
    assert_eq!(cursor.statement(), Some("SELECT 1"));
    assert_eq!(cursor.row_count(), Some(1));
    let row = cursor
        .fetch_one()
        .expect("Could not fetch the row")
        .expect("SELECT 1 must return one row");
    assert_eq!(row.len(), 1);
    assert_eq!(
        i32::try_from_value(row[0].clone()).expect("The value must be an integer"),
        1
    );
    assert!(
        cursor
            .fetch_one()
            .expect("Could not fetch after the last row")
            .is_none(),
        "Rows are returned only once"
    );
    assert!(cursor.fetch_all().expect("Could not fetch all").is_empty());
    assert!(cursor.connection().in_transaction());
    cursor
        .connection()
        .rollback()
        .await
        .expect("Could not roll back");
    assert!(!connection.in_transaction());
}
