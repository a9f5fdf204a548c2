use ydb_adapter::{AsValue, Connection, Driver, Value, params};

pub async fn params<D: Driver>(connection: &mut Connection<D>) {
    let mut cursor = connection.cursor();
    cursor
        .execute(
            "DECLARE $id AS Uint64; DECLARE $name AS Utf8; DECLARE $score AS Double;\n\
             SELECT $id AS id, $name AS name, $score AS score",
            &params! {
                "$id" => 42_u64,
                "$name" => "Zoë",
                "$score" => 7.25_f64,
            },
        )
        .await
        .expect("Could not select the parameters");
    let row = cursor
        .fetch_one()
        .expect("Could not fetch")
        .expect("Expected one row");
    assert_eq!(row[0], Value::Uint64(Some(42)));
    assert_eq!(
        String::try_from_value(row[1].clone()).expect("The name must be a string"),
        "Zoë"
    );
    assert_eq!(
        f64::try_from_value(row[2].clone()).expect("The score must be a double"),
        7.25
    );
    cursor
        .connection()
        .rollback()
        .await
        .expect("Could not roll back");
}
