pub mod catalog;
pub mod content;
pub mod extract;
pub mod favorites;
pub mod follows;
