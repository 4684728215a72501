//! PostgreSQL-backed repository implementations.

pub mod catalog;
pub mod favorites;
pub mod follows;
pub mod karaokes;
pub mod listeners;
pub mod movies;
pub mod vtubers;
