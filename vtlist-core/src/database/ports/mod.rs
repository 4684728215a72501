//! Repository ports (interfaces) grouped by concern. Interactors depend on
//! these traits only; implementations live under
//! `database::infrastructure::postgres`.

pub mod catalog;
pub mod content;
pub mod favorites;
pub mod follows;
pub mod listeners;
