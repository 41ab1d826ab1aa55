//! The construction target and its canonical form.

use geo_kernel::canon::{canon_circle, canon_line, canon_point, CanonCircle, CanonLine, CanonPoint};
use geo_kernel::geometry::{Circle, Line, Point};
use geo_kernel::state::{Figure, FigureKind};

use crate::error::SearchError;

/// The literal geometric definition the search is trying to produce.
///
/// Canonicalized once at construction time, so the goal test always compares
/// canonical-to-canonical regardless of whether the caller pre-normalized
/// (canonicalizing an already-canonical value is idempotent).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Point(CanonPoint),
    Line(CanonLine),
    Circle(CanonCircle),
}

impl Target {
    #[must_use]
    pub fn point(p: Point) -> Self {
        Self::Point(canon_point(p))
    }

    #[must_use]
    pub fn line(l: Line) -> Self {
        Self::Line(canon_line(l))
    }

    #[must_use]
    pub fn circle(c: Circle) -> Self {
        Self::Circle(canon_circle(c))
    }

    /// Parse a raw `(kind, coefficients)` pair as supplied by an
    /// unmarshaller: `point` takes `(x, y)`, `line` takes `(A, B, C)`,
    /// `circle` takes `(cx, cy, r_sq)`. Any other `kind` is rejected here —
    /// this is the engine's only structural error (see the `UnsupportedTarget`
    /// variant of [`SearchError`]).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedTarget`] for any unrecognized `kind`.
    pub fn from_kind_and_data(kind: &str, data: [f64; 3]) -> Result<Self, SearchError> {
        match kind {
            "point" => Ok(Self::point(Point::new(data[0], data[1]))),
            "line" => Ok(Self::line(Line { a: data[0], b: data[1], c: data[2] })),
            "circle" => Ok(Self::circle(Circle { cx: data[0], cy: data[1], r_sq: data[2] })),
            other => Err(SearchError::UnsupportedTarget {
                detail: format!("unrecognized target kind: {other}"),
            }),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FigureKind {
        match self {
            Self::Point(_) => FigureKind::Point,
            Self::Line(_) => FigureKind::Line,
            Self::Circle(_) => FigureKind::Circle,
        }
    }

    /// Whether a newly produced figure matches this target canonically.
    #[must_use]
    pub fn matches(&self, figure: Figure) -> bool {
        match (self, figure) {
            (Self::Point(t), Figure::Point(p)) => *t == canon_point(p),
            (Self::Line(t), Figure::Line(l)) => *t == canon_line(l),
            (Self::Circle(t), Figure::Circle(c)) => *t == canon_circle(c),
            _ => false,
        }
    }
}
