use ydb_adapter::{Connection, Driver, params};

pub async fn probe<D: Driver>(connection: &mut Connection<D>) {
    assert!(connection.is_usable().await);
    let mut cursor = connection.cursor();
    cursor
        .execute("SELECT 1", &params!())
        .await
        .expect("Could not execute SELECT 1");
    assert!(cursor.connection().is_usable().await);
    assert!(
        cursor.connection().in_transaction(),
        "Probing leaves the open transaction alone"
    );
    cursor
        .connection()
        .rollback()
        .await
        .expect("Could not roll back");
}
