pub mod db;
pub mod models;
pub mod pages;
pub mod schema;
pub mod words;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
