//! Persistence layer: connection management and schema migrations.

pub mod db;
pub mod migrations;

pub use db::Storage;
