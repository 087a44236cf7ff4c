//! Stable-index handles into the workspace arenas.

/// which of the three workspace strings an id or operation refers to.
/// `Modified` only ever hosts Letters plus the bonds/descriptions needed to
/// diff against `Initial` when building the Rule -- it never receives
/// groups, correspondences, or codelet attention of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringSlot {
    Initial,
    Modified,
    Target,
}

/// index into a `WorkspaceString`'s object arena (letters and groups share
/// one arena so a group's parent/child references stay simple indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// index into a `WorkspaceString`'s built-bond arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BondId(pub usize);

/// index into a `WorkspaceString`'s built-group arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

/// index into the workspace-level correspondence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorrespondenceId(pub usize);
