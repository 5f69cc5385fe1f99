use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A half-open interval `left..right` of slice indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// First index covered by the span
    pub left: usize,
    /// One past the last index covered by the span
    pub right: usize,
}

impl Span {
    /// Create a span over `left..right`
    pub fn new(left: usize, right: usize) -> Self {
        debug_assert!(left <= right, "span {left}..{right} is inverted");
        Self { left, right }
    }

    /// Create a span of `len` elements starting at `left`
    pub fn with_len(left: usize, len: usize) -> Self {
        Self::new(left, left + len)
    }

    /// Number of indices covered
    pub fn len(&self) -> usize {
        self.right - self.left
    }

    pub fn is_empty(&self) -> bool {
        self.left == self.right
    }

    /// The span as a `Range`, for slicing
    pub fn range(&self) -> Range<usize> {
        self.left..self.right
    }

    /// Join two adjacent spans, `a` on the left.
    pub fn join(a: Self, b: Self) -> Self {
        debug_assert_eq!(a.right, b.left, "spans {a} and {b} are not adjacent");
        Self::new(a.left, b.right)
    }

    /// Split into `left..mid` and `mid..right`
    pub fn split_at(&self, mid: usize) -> (Self, Self) {
        debug_assert!(self.left <= mid && mid <= self.right);
        (Self::new(self.left, mid), Self::new(mid, self.right))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.left, self.right)
    }
}

/// How the elements of a run are ordered before formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunKind {
    /// Each element is not less than its predecessor
    NonDescending,
    /// Each element is strictly less than its predecessor
    Descending,
    /// No usable order; needs a full sort
    Unsorted,
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunKind::NonDescending => write!(f, "non-descending"),
            RunKind::Descending => write!(f, "descending"),
            RunKind::Unsorted => write!(f, "unsorted"),
        }
    }
}

/// A span tagged with the order found in it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedRun {
    pub span: Span,
    pub kind: RunKind,
}

impl TypedRun {
    pub fn new(left: usize, right: usize, kind: RunKind) -> Self {
        Self {
            span: Span::new(left, right),
            kind,
        }
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}
