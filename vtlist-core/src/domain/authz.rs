//! Ownership-based write authorization.

use vtlist_model::{ContentRecord, ListenerId};

/// Whether `requester` may modify or delete the record captured in
/// `snapshot`. Only the listener stamped as inputter qualifies; records with
/// no inputter are read-only for everyone.
///
/// `snapshot` must be the stored record, never the request body.
pub fn can_modify<E: ContentRecord>(requester: ListenerId, snapshot: &E) -> bool {
    snapshot.inputter() == Some(requester)
}
