mod driver;
mod session;
mod state;
mod statement;
mod transport;

pub use driver::*;
pub use session::*;
pub use state::*;
pub use statement::*;
pub use transport::*;
