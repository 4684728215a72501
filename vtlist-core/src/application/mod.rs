//! Use cases. Each interactor depends on repository ports only, so the HTTP
//! layer and the tests can wire in whichever adapters they need.

pub mod catalog;
pub mod content;
pub mod favorites;
pub mod follows;
pub mod listeners;
pub mod unit_of_work;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{CatalogInteractor, Contents};
pub use content::ContentInteractor;
pub use favorites::{FavoriteInteractor, TopPage};
pub use follows::FollowInteractor;
pub use listeners::ListenerInteractor;
pub use unit_of_work::{AppUnitOfWork, AppUnitOfWorkBuilder};
