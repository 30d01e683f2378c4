use std::panic::Location;

use thiserror::Error;


/// The name of the error category shared by every [`Error`] in this crate.
pub const ERROR_CATEGORY: &str = "tethered::DataStructures";

/// Result type returned by the fallible operations of this crate.
pub type Result<T> = std::result::Result<T, Error>;


/// The container that an [`ErrorKind::EmptyStructure`] error was reported by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Structure {
    BinaryTree,
    SkipList,
    SinglyLinkedList,
    DoublyLinkedList,
}

impl Structure {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BinaryTree       => "binary tree",
            Self::SkipList         => "skip list",
            Self::SinglyLinkedList => "singly linked list",
            Self::DoublyLinkedList => "doubly linked list",
        }
    }
}

/// One of the two child slots of a binary tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left  => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left  => "left",
            Self::Right => "right",
        }
    }
}

/// What went wrong. Every kind is a caller-induced precondition violation; none are transient.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An unclassified error.
    #[error("generic error")]
    Generic,
    /// A root or head node was requested from an empty container.
    #[error("{} is empty", .0.name())]
    EmptyStructure(Structure),
    /// A rotation was requested on a node lacking the child on the given side.
    ///
    /// A left rotation requires a right child, and a right rotation requires a left child.
    #[error("{} child node does not exist", .0.name())]
    MissingChild(Side),
    /// A node handle was used after its node was removed from the container.
    #[error("node handle does not refer to a live node")]
    StaleHandle,
}

impl ErrorKind {
    /// The numeric code of this kind within [`ERROR_CATEGORY`].
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Generic                   => -1,
            Self::EmptyStructure(_)         => -2,
            Self::MissingChild(Side::Right) => -3,
            Self::MissingChild(Side::Left)  => -4,
            Self::StaleHandle               => -5,
        }
    }
}

/// The error returned by fallible operations of this crate.
///
/// Alongside its [`ErrorKind`], an `Error` records where in the caller's code the failing
/// operation was invoked.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} (at {location})")]
pub struct Error {
    kind:     ErrorKind,
    location: &'static Location<'static>,
}

impl Error {
    /// Create an error located at the caller (or at the outermost `#[track_caller]` function in
    /// the call chain).
    #[track_caller]
    #[inline]
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: Location::caller(),
        }
    }

    #[track_caller]
    #[inline]
    #[must_use]
    pub(crate) fn empty(structure: Structure) -> Self {
        Self::new(ErrorKind::EmptyStructure(structure))
    }

    #[track_caller]
    #[inline]
    #[must_use]
    pub(crate) fn stale_handle() -> Self {
        Self::new(ErrorKind::StaleHandle)
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.kind.code()
    }

    #[inline]
    #[must_use]
    pub const fn category(&self) -> &'static str {
        ERROR_CATEGORY
    }

    /// The human-readable message of this error, without its source location.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    #[inline]
    #[must_use]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl From<ErrorKind> for Error {
    #[track_caller]
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn codes_are_distinct() {
        let kinds = [
            ErrorKind::Generic,
            ErrorKind::EmptyStructure(Structure::BinaryTree),
            ErrorKind::MissingChild(Side::Right),
            ErrorKind::MissingChild(Side::Left),
            ErrorKind::StaleHandle,
        ];

        for (i, lhs) in kinds.iter().enumerate() {
            for rhs in &kinds[i + 1..] {
                assert_ne!(lhs.code(), rhs.code(), "{lhs:?} and {rhs:?} share a code");
            }
        }
    }

    #[test]
    fn messages() {
        assert_eq!(
            ErrorKind::EmptyStructure(Structure::BinaryTree).to_string(),
            "binary tree is empty",
        );
        assert_eq!(
            ErrorKind::MissingChild(Side::Right).to_string(),
            "right child node does not exist",
        );
    }

    #[test]
    fn location_is_the_caller() {
        let line = line!() + 1;
        let err = Error::new(ErrorKind::Generic);

        assert_eq!(err.location().file(), file!());
        assert_eq!(err.location().line(), line);
        assert_eq!(err.category(), ERROR_CATEGORY);
        assert!(err.to_string().starts_with("generic error (at "));
        assert_eq!(err.message(), "generic error");
    }
}
