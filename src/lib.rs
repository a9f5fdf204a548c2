mod connection;
mod creation;
mod cursor;
mod features;
mod session;

pub use connection::*;
pub use creation::*;
pub use cursor::*;
pub use features::*;
pub use session::*;
pub use ydb_adapter_core::*;

/// Builds the named parameters of a statement.
///
/// ```rust
/// use ydb_adapter::{Value, params};
/// let params = params! { "$id" => 42_u64, "$name" => "Alice" };
/// assert_eq!(params["$id"], Value::Uint64(Some(42)));
/// assert!(params! {}.is_empty());
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $(params.insert(::std::string::String::from($name), $crate::AsValue::as_value($value));)+
        params
    }};
}
