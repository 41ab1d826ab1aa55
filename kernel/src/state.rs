//! The figure/state/step data model shared by every search-layer module.
//!
//! A [`State`] is three type-partitioned, persistently-shared maps plus
//! three next-id counters. Successors extend a state by cloning only the
//! map for the type they touch (`Rc::make_mut`), so sibling expansions of
//! the same parent never copy the other two maps.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::canon::{canon_circle, canon_line, canon_point, CanonCircle, CanonLine, CanonPoint, StateCanonical};
use crate::geometry::{Circle, Line, Point};
use crate::hash::{canonical_hash, ContentHash, DOMAIN_STATE_FINGERPRINT};

/// The three figure kinds, also used as the single-letter id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureKind {
    Point,
    Line,
    Circle,
}

impl FigureKind {
    #[must_use]
    pub fn prefix(self) -> char {
        match self {
            Self::Point => 'p',
            Self::Line => 'l',
            Self::Circle => 'c',
        }
    }
}

/// A figure identifier: a type tag plus an ordinal, unique within a state
/// for its type (e.g. `p7`, `l3`). Ids carry no meaning across states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct FigureId {
    pub kind: FigureKind,
    pub ordinal: u64,
}

impl FigureId {
    #[must_use]
    pub fn new(kind: FigureKind, ordinal: u64) -> Self {
        Self { kind, ordinal }
    }
}

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.ordinal)
    }
}

/// Error returned when a string does not match the `<letter><digits>` id
/// pattern understood by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureIdParseError(pub String);

impl fmt::Display for FigureIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a valid figure id: {}", self.0)
    }
}

impl std::error::Error for FigureIdParseError {}

impl FromStr for FigureId {
    type Err = FigureIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let prefix = chars.next().ok_or_else(|| FigureIdParseError(s.to_string()))?;
        let rest = chars.as_str();
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FigureIdParseError(s.to_string()));
        }
        let kind = match prefix {
            'p' => FigureKind::Point,
            'l' => FigureKind::Line,
            'c' => FigureKind::Circle,
            _ => return Err(FigureIdParseError(s.to_string())),
        };
        let ordinal: u64 = rest.parse().map_err(|_| FigureIdParseError(s.to_string()))?;
        Ok(Self { kind, ordinal })
    }
}

impl From<FigureId> for String {
    fn from(id: FigureId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for FigureId {
    type Error = FigureIdParseError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A geometric figure: one of point, line, circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Figure {
    Point(Point),
    Line(Line),
    Circle(Circle),
}

impl Figure {
    #[must_use]
    pub fn kind(&self) -> FigureKind {
        match self {
            Self::Point(_) => FigureKind::Point,
            Self::Line(_) => FigureKind::Line,
            Self::Circle(_) => FigureKind::Circle,
        }
    }

    #[must_use]
    pub fn as_point(&self) -> Option<Point> {
        match self {
            Self::Point(p) => Some(*p),
            _ => None,
        }
    }
}

/// The construction operation that produced a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Operation {
    Line,
    Circle,
    Intersection,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "Line"),
            Self::Circle => write!(f, "Circle"),
            Self::Intersection => write!(f, "Intersection"),
        }
    }
}

/// One construction step: an operation applied to ordered input figures,
/// producing a single new figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub operation: Operation,
    pub inputs: Vec<FigureId>,
    pub output: FigureId,
}

type FigureMap = Rc<BTreeMap<u64, Figure>>;

/// The complete set of figures constructible so far, partitioned by type,
/// plus the next free ordinal for each type.
#[derive(Debug, Clone)]
pub struct State {
    points: FigureMap,
    lines: FigureMap,
    circles: FigureMap,
    next_point_id: u64,
    next_line_id: u64,
    next_circle_id: u64,
}

impl State {
    /// Build an empty state.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            points: Rc::new(BTreeMap::new()),
            lines: Rc::new(BTreeMap::new()),
            circles: Rc::new(BTreeMap::new()),
            next_point_id: 1,
            next_line_id: 1,
            next_circle_id: 1,
        }
    }

    /// Build a state from caller-supplied figures, deriving each type's
    /// next-id counter as `max(parsed ordinal) + 1`, or `1` if none parsed.
    /// Figures are inserted under their parsed ordinal (ids not matching the
    /// expected prefix for their type are coerced to the type's own prefix
    /// for internal bookkeeping but keep their original ordinal).
    #[must_use]
    pub fn from_initial(points: Vec<(FigureId, Point)>, lines: Vec<(FigureId, Line)>, circles: Vec<(FigureId, Circle)>) -> Self {
        let mut point_map = BTreeMap::new();
        let mut max_point = 0u64;
        for (id, p) in points {
            max_point = max_point.max(id.ordinal);
            point_map.insert(id.ordinal, Figure::Point(p));
        }

        let mut line_map = BTreeMap::new();
        let mut max_line = 0u64;
        for (id, l) in lines {
            max_line = max_line.max(id.ordinal);
            line_map.insert(id.ordinal, Figure::Line(l));
        }

        let mut circle_map = BTreeMap::new();
        let mut max_circle = 0u64;
        for (id, c) in circles {
            max_circle = max_circle.max(id.ordinal);
            circle_map.insert(id.ordinal, Figure::Circle(c));
        }

        Self {
            points: Rc::new(point_map),
            lines: Rc::new(line_map),
            circles: Rc::new(circle_map),
            next_point_id: max_point + 1,
            next_line_id: max_line + 1,
            next_circle_id: max_circle + 1,
        }
    }

    #[must_use]
    pub fn points(&self) -> &BTreeMap<u64, Figure> {
        &self.points
    }

    #[must_use]
    pub fn lines(&self) -> &BTreeMap<u64, Figure> {
        &self.lines
    }

    #[must_use]
    pub fn circles(&self) -> &BTreeMap<u64, Figure> {
        &self.circles
    }

    #[must_use]
    pub fn get(&self, id: FigureId) -> Option<Figure> {
        let map = match id.kind {
            FigureKind::Point => &self.points,
            FigureKind::Line => &self.lines,
            FigureKind::Circle => &self.circles,
        };
        map.get(&id.ordinal).copied()
    }

    #[must_use]
    pub fn next_id(&self, kind: FigureKind) -> u64 {
        match kind {
            FigureKind::Point => self.next_point_id,
            FigureKind::Line => self.next_line_id,
            FigureKind::Circle => self.next_circle_id,
        }
    }

    /// Whether a figure canonically equal to `candidate` already exists
    /// among figures of its own type.
    #[must_use]
    pub fn contains_canonical(&self, candidate: Figure) -> bool {
        match candidate {
            Figure::Point(p) => {
                let target = canon_point(p);
                self.points.values().any(|f| matches!(f, Figure::Point(q) if canon_point(*q) == target))
            }
            Figure::Line(l) => {
                let target = canon_line(l);
                self.lines.values().any(|f| matches!(f, Figure::Line(m) if canon_line(*m) == target))
            }
            Figure::Circle(c) => {
                let target = canon_circle(c);
                self.circles.values().any(|f| matches!(f, Figure::Circle(d) if canon_circle(*d) == target))
            }
        }
    }

    /// Insert a new figure, allocating the next ordinal for its type and
    /// advancing that type's counter. Returns the assigned id. Caller must
    /// have already checked [`Self::contains_canonical`].
    #[must_use]
    pub fn insert_new(&mut self, figure: Figure) -> FigureId {
        let kind = figure.kind();
        let ordinal = self.next_id(kind);
        match kind {
            FigureKind::Point => {
                Rc::make_mut(&mut self.points).insert(ordinal, figure);
                self.next_point_id += 1;
            }
            FigureKind::Line => {
                Rc::make_mut(&mut self.lines).insert(ordinal, figure);
                self.next_line_id += 1;
            }
            FigureKind::Circle => {
                Rc::make_mut(&mut self.circles).insert(ordinal, figure);
                self.next_circle_id += 1;
            }
        }
        FigureId::new(kind, ordinal)
    }

    /// The canonical form of this entire state (see [`crate::canon`]).
    #[must_use]
    pub fn canonical(&self) -> StateCanonical {
        let points: Vec<CanonPoint> = self
            .points
            .values()
            .filter_map(Figure::as_point)
            .map(canon_point)
            .collect();
        let lines: Vec<CanonLine> = self
            .lines
            .values()
            .map(|f| match f {
                Figure::Line(l) => canon_line(*l),
                _ => unreachable!("lines map holds only Figure::Line"),
            })
            .collect();
        let circles: Vec<CanonCircle> = self
            .circles
            .values()
            .map(|f| match f {
                Figure::Circle(c) => canon_circle(*c),
                _ => unreachable!("circles map holds only Figure::Circle"),
            })
            .collect();
        StateCanonical::new(points, lines, circles)
    }

    /// The domain-separated content hash of this state's canonical bytes:
    /// the visited-set and open-set dedup key.
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        canonical_hash(DOMAIN_STATE_FINGERPRINT, &self.canonical().to_bytes())
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }
}
