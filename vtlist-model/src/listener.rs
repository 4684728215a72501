use crate::ids::ListenerId;

/// Public view of a listener account. Credentials never leave the core crate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Listener {
    pub listener_id: ListenerId,
    pub listener_name: String,
}
