pub mod params;
pub mod session;

pub use params::CreateParams;
pub use session::{DbSession, DbWriteSession};
