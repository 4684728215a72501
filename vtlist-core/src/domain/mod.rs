pub mod authz;
pub mod credentials;
pub mod favorite;
pub mod partial;

pub use authz::can_modify;
pub use partial::{Partial, Warning, WarningLog};
