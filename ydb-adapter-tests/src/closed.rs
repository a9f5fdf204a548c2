use ydb_adapter::{Connection, CursorState, Driver, ErrorKind, params};

pub async fn closed_cursor<D: Driver>(connection: &mut Connection<D>) {
    let mut cursor = connection.cursor();
    cursor
        .execute("SELECT 1", &params!())
        .await
        .expect("Could not execute SELECT 1");
    cursor.close();
    assert!(cursor.is_closed());
    assert_eq!(cursor.state(), CursorState::Closed);
    assert_eq!(cursor.statement(), None);
    cursor.close();
    assert!(cursor.is_closed(), "Closing twice is allowed");

    let error = cursor
        .fetch_one()
        .expect_err("Fetching from a closed cursor must fail");
    assert!(ErrorKind::is_interface_closed(&error));
    assert!(ErrorKind::is_interface_closed(
        &cursor.fetch_many(None).expect_err("Closed cursor")
    ));
    assert!(ErrorKind::is_interface_closed(
        &cursor.fetch_all().expect_err("Closed cursor")
    ));
    let error = cursor
        .execute("SELECT 1", &params!())
        .await
        .expect_err("Executing on a closed cursor must fail");
    assert!(ErrorKind::is_interface_closed(&error));
    assert_eq!(cursor.state(), CursorState::Closed);

    // The connection is still fine
    cursor
        .connection()
        .rollback()
        .await
        .expect("Could not roll back");
    let mut cursor = connection.cursor();
    cursor
        .execute("SELECT 1", &params!())
        .await
        .expect("A new cursor must work");
    cursor
        .connection()
        .rollback()
        .await
        .expect("Could not roll back");
}
