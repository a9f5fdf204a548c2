use ydb_adapter::{Connection, Driver, params};

pub async fn transaction<D: Driver>(connection: &mut Connection<D>) {
    assert!(!connection.in_transaction());
    connection
        .commit()
        .await
        .expect("Committing without a transaction is a no-op");
    connection
        .rollback()
        .await
        .expect("Rolling back without a transaction is a no-op");

    let mut cursor = connection.cursor();
    cursor
        .execute("SELECT 1", &params!())
        .await
        .expect("Could not execute the first statement");
    assert!(cursor.connection().in_transaction());
    cursor
        .execute("SELECT 2", &params!())
        .await
        .expect("Could not execute the second statement");
    assert!(
        cursor.connection().in_transaction(),
        "Executing never commits the transaction"
    );
    cursor
        .connection()
        .commit()
        .await
        .expect("Could not commit");
    assert!(!cursor.connection().in_transaction());
    cursor
        .connection()
        .commit()
        .await
        .expect("Committing twice is a no-op");

    cursor
        .execute("SELECT 3", &params!())
        .await
        .expect("Could not execute after the commit");
    assert!(
        cursor.connection().in_transaction(),
        "The next statement begins a new transaction"
    );
    cursor
        .connection()
        .rollback()
        .await
        .expect("Could not roll back");
    assert!(!connection.in_transaction());
}
