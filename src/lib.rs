pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod types;

pub use db::SchoolStorage;
pub use error::{Entity, SchoolError};
pub use router::{SchoolState, school_router};
