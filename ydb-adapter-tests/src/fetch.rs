use ydb_adapter::{AsValue, Connection, Driver, Row, params};

const FIVE_ROWS: &str = "SELECT 1 AS id UNION ALL SELECT 2 AS id UNION ALL SELECT 3 AS id \
    UNION ALL SELECT 4 AS id UNION ALL SELECT 5 AS id";

fn ids(rows: &[Row]) -> Vec<i32> {
    rows.iter()
        .map(|row| i32::try_from_value(row[0].clone()).expect("The id must be an integer"))
        .collect()
}

pub async fn fetch<D: Driver>(connection: &mut Connection<D>) {
    let mut cursor = connection.cursor();
    cursor
        .execute(FIVE_ROWS, &params!())
        .await
        .expect("Could not select five rows");
    assert_eq!(cursor.row_count(), Some(5));

    assert!(
        cursor
            .fetch_many(Some(0))
            .expect("Could not fetch zero rows")
            .is_empty()
    );
    let rows = cursor.fetch_many(None).expect("Could not fetch one row");
    assert_eq!(ids(&rows), [1], "Fetching zero rows consumes nothing");
    let rows = cursor.fetch_many(Some(2)).expect("Could not fetch two rows");
    assert_eq!(ids(&rows), [2, 3]);
    let rows = cursor.fetch_all().expect("Could not fetch the remaining rows");
    assert_eq!(ids(&rows), [4, 5]);
    assert!(cursor.fetch_many(Some(3)).expect("Could not fetch").is_empty());
    assert!(cursor.fetch_one().expect("Could not fetch").is_none());

    // A new statement replaces whatever was left
    cursor
        .execute(FIVE_ROWS, &params!())
        .await
        .expect("Could not select five rows again");
    let rows = cursor.fetch_many(Some(2)).expect("Could not fetch two rows");
    assert_eq!(ids(&rows), [1, 2]);
    cursor
        .execute("SELECT 10 AS id", &params!())
        .await
        .expect("Could not select one row");
    let rows = cursor.fetch_many(Some(100)).expect("Could not fetch");
    assert_eq!(ids(&rows), [10], "Fetching more rows than available never pads");

    // Many small fetches cover every row exactly once
    cursor
        .execute(FIVE_ROWS, &params!())
        .await
        .expect("Could not select five rows");
    let mut total = Vec::new();
    loop {
        let rows = cursor.fetch_many(Some(2)).expect("Could not fetch");
        if rows.is_empty() {
            break;
        }
        total.extend(ids(&rows));
    }
    assert_eq!(total, [1, 2, 3, 4, 5]);

    cursor
        .connection()
        .rollback()
        .await
        .expect("Could not roll back");
}
