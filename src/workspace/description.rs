//! `(object, description_type, descriptor)` triples.

use crate::slipnet::SlipId;
use crate::workspace::ObjectId;

/// a description is always attached to exactly one object; the
/// owning object's id is carried here rather than navigated back from the
/// object so a `Vec<Description>` can be filtered without borrowing the
/// object arena at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Description {
    pub object: ObjectId,
    pub description_type: SlipId,
    pub descriptor: SlipId,
}

impl Description {
    pub fn new(object: ObjectId, description_type: SlipId, descriptor: SlipId) -> Self {
        Self { object, description_type, descriptor }
    }
}
