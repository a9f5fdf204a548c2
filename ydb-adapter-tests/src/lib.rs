mod closed;
mod description;
mod fetch;
#[cfg(not(feature = "disable-multiple-statements"))]
mod multiple;
mod params;
mod probe;
mod simple;
#[cfg(not(feature = "disable-transactions"))]
mod transaction;

use crate::{
    closed::closed_cursor, description::description, fetch::fetch, params::params, probe::probe,
    simple::simple,
};
use log::LevelFilter;
#[cfg(not(feature = "disable-multiple-statements"))]
use multiple::multiple;
use std::env;
#[cfg(not(feature = "disable-transactions"))]
use transaction::transaction;
use ydb_adapter::{Connection, Driver};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Runs the common checks against an open connection, then closes it.
pub async fn execute_tests<D: Driver>(mut connection: Connection<D>) {
    simple(&mut connection).await;
    fetch(&mut connection).await;
    description(&mut connection).await;
    params(&mut connection).await;
    closed_cursor(&mut connection).await;
    #[cfg(not(feature = "disable-transactions"))]
    transaction(&mut connection).await;
    #[cfg(not(feature = "disable-multiple-statements"))]
    multiple(&mut connection).await;
    probe(&mut connection).await;
    connection.close().await;
    assert!(connection.is_closed());
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
