use ydb_adapter::{AsValue, Connection, Driver, params};

pub async fn multiple<D: Driver>(connection: &mut Connection<D>) {
    let mut cursor = connection.cursor();
    cursor
        .execute(
            "SELECT 1 AS a UNION ALL SELECT 2 AS a; SELECT 'second'u AS b;",
            &params!(),
        )
        .await
        .expect("Could not execute two statements");
    assert_eq!(cursor.result_set_count(), 2);
    assert_eq!(cursor.row_count(), Some(2));
    let names = cursor
        .description()
        .expect("Expected a description")
        .iter()
        .map(|v| v.name.clone())
        .collect::<Vec<_>>();
    assert_eq!(names, ["a"], "The description follows the first result set");
    let rows = cursor.fetch_all().expect("Could not fetch");
    assert_eq!(
        rows.into_iter()
            .map(|row| i32::try_from_value(row[0].clone()).expect("Expected an integer"))
            .collect::<Vec<_>>(),
        [1, 2]
    );
    cursor
        .connection()
        .rollback()
        .await
        .expect("Could not roll back");
}
