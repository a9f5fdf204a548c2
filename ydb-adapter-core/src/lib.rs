mod as_value;
mod column_type;
mod driver;
mod error;
mod options;
mod result_set;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use column_type::*;
pub use driver::*;
pub use error::*;
pub use options::*;
pub use result_set::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
