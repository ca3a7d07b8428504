//! Access control - ownership is the only axis.

/// The operation a requester wants to perform on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Modify,
    Delete,
}

/// Decide whether `requester` may perform `operation` on a post owned by
/// `author_id`.
///
/// Reads are public: individual posts are publicly linkable, so the detail
/// view carries no ownership check (the private listing restricts by author
/// at the query level instead). Modify and delete require a resolved
/// identity matching the post's author. There is no role hierarchy and no
/// admin override.
pub fn can_access(
    requester: Option<&str>,
    author_id: Option<&str>,
    operation: Operation,
) -> bool {
    match operation {
        Operation::Read => true,
        Operation::Modify | Operation::Delete => match (requester, author_id) {
            (Some(requester), Some(author)) => requester == author,
            _ => false,
        },
    }
}
