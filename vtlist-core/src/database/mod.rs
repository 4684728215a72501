//! Repository ports and the PostgreSQL adapters behind them.

pub mod infrastructure;
pub mod ports;
pub mod postgres;

pub use postgres::PostgresDatabase;
