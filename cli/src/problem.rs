//! JSON problem ingestion: the "unmarshaller" role assigned outside the
//! core. Validates figure-id references and builds a `State` + `Target`
//! the engine can consume directly.

use std::collections::BTreeMap;
use std::str::FromStr;

use geo_kernel::canon::canon_point;
use geo_kernel::geometry::{Circle, Line, Point};
use geo_kernel::state::{FigureId, FigureKind, State};
use geo_search::target::Target;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("failed to read problem input: {0}")]
    Io(#[from] std::io::Error),

    #[error("problem input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{referencing}' references undefined point id '{missing}'")]
    InvalidReference { referencing: String, missing: String },

    #[error("points '{first}' and '{second}' are canonically identical; duplicate knowns are rejected")]
    DuplicatePoint { first: String, second: String },

    #[error(transparent)]
    Target(#[from] geo_search::error::SearchError),
}

#[derive(Debug, Deserialize)]
pub struct ProblemFile {
    #[serde(default)]
    points: BTreeMap<String, [f64; 2]>,
    #[serde(default)]
    lines: BTreeMap<String, LineSpec>,
    #[serde(default)]
    circles: BTreeMap<String, CircleSpec>,
    target: TargetSpec,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LineSpec {
    Coefficients([f64; 3]),
    Through { through: (String, String) },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CircleSpec {
    Coefficients([f64; 3]),
    CenterThrough { center: String, through: String },
}

#[derive(Debug, Deserialize)]
struct TargetSpec {
    #[serde(rename = "type")]
    kind: String,
    data: [f64; 3],
}

/// The parsed problem: an initial state ready for `solve`, plus its target.
pub struct Problem {
    pub state: State,
    pub target: Target,
}

/// Parse a caller-supplied figure id. An id not matching the
/// `<letter><digits>` pattern is accepted rather than rejected — it is
/// assigned ordinal `0`, which can never exceed another figure's parsed
/// ordinal of its type, so it contributes nothing to that type's next-id
/// counter (`State::from_initial` derives the counter as `max(ordinal) + 1`).
fn parse_id(kind: FigureKind, raw: &str) -> FigureId {
    FigureId::from_str(raw).unwrap_or(FigureId::new(kind, 0))
}

impl ProblemFile {
    /// Resolve id references and build a [`Problem`].
    pub fn into_problem(self) -> Result<Problem, ProblemError> {
        let mut point_values: BTreeMap<String, Point> = BTreeMap::new();
        let mut points = Vec::with_capacity(self.points.len());
        for (raw_id, [x, y]) in &self.points {
            let id = parse_id(FigureKind::Point, raw_id);
            let p = Point::new(*x, *y);
            for (other_id, other_p) in &point_values {
                if canon_point(p) == canon_point(*other_p) {
                    return Err(ProblemError::DuplicatePoint {
                        first: other_id.clone(),
                        second: raw_id.clone(),
                    });
                }
            }
            point_values.insert(raw_id.clone(), p);
            points.push((id, p));
        }

        let lookup = |referencing: &str, point_id: &str| -> Result<Point, ProblemError> {
            point_values
                .get(point_id)
                .copied()
                .ok_or_else(|| ProblemError::InvalidReference {
                    referencing: referencing.to_string(),
                    missing: point_id.to_string(),
                })
        };

        let mut lines = Vec::with_capacity(self.lines.len());
        for (raw_id, spec) in &self.lines {
            let id = parse_id(FigureKind::Line, raw_id);
            let line = match spec {
                LineSpec::Coefficients([a, b, c]) => Line { a: *a, b: *b, c: *c },
                LineSpec::Through { through: (p1, p2) } => {
                    geo_kernel::geometry::construct_line(lookup(raw_id, p1)?, lookup(raw_id, p2)?)
                }
            };
            lines.push((id, line));
        }

        let mut circles = Vec::with_capacity(self.circles.len());
        for (raw_id, spec) in &self.circles {
            let id = parse_id(FigureKind::Circle, raw_id);
            let circle = match spec {
                CircleSpec::Coefficients([cx, cy, r_sq]) => Circle { cx: *cx, cy: *cy, r_sq: *r_sq },
                CircleSpec::CenterThrough { center, through } => {
                    geo_kernel::geometry::construct_circle(lookup(raw_id, center)?, lookup(raw_id, through)?)
                }
            };
            circles.push((id, circle));
        }

        let state = State::from_initial(points, lines, circles);
        let target = Target::from_kind_and_data(&self.target.kind, self.target.data)?;

        Ok(Problem { state, target })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_form_parses_directly() {
        let raw = r#"{
            "points": {"p1": [0.0, 0.0], "p2": [2.0, 0.0]},
            "lines": {"l1": [1.0, 0.0, -1.0]},
            "target": {"type": "point", "data": [1.0, 0.0]}
        }"#;
        let file: ProblemFile = serde_json::from_str(raw).unwrap();
        let problem = file.into_problem().unwrap();
        assert_eq!(problem.state.point_count(), 2);
        assert_eq!(problem.state.line_count(), 1);
    }

    #[test]
    fn through_form_resolves_point_references() {
        let raw = r#"{
            "points": {"p1": [0.0, 0.0], "p2": [2.0, 0.0]},
            "lines": {"l1": {"through": ["p1", "p2"]}},
            "target": {"type": "line", "data": [0.0, 1.0, 0.0]}
        }"#;
        let file: ProblemFile = serde_json::from_str(raw).unwrap();
        let problem = file.into_problem().unwrap();
        assert_eq!(problem.state.line_count(), 1);
    }

    #[test]
    fn unknown_point_reference_is_rejected() {
        let raw = r#"{
            "points": {"p1": [0.0, 0.0]},
            "lines": {"l1": {"through": ["p1", "p99"]}},
            "target": {"type": "point", "data": [0.0, 0.0]}
        }"#;
        let file: ProblemFile = serde_json::from_str(raw).unwrap();
        let err = file.into_problem().unwrap_err();
        assert!(matches!(err, ProblemError::InvalidReference { .. }));
    }

    #[test]
    fn duplicate_points_are_rejected() {
        let raw = r#"{
            "points": {"p1": [0.0, 0.0], "p2": [0.0, 0.0]},
            "target": {"type": "point", "data": [0.0, 0.0]}
        }"#;
        let file: ProblemFile = serde_json::from_str(raw).unwrap();
        let err = file.into_problem().unwrap_err();
        assert!(matches!(err, ProblemError::DuplicatePoint { .. }));
    }

    #[test]
    fn malformed_id_is_accepted_and_does_not_advance_the_counter() {
        let raw = r#"{
            "points": {"not-an-id": [5.0, 5.0], "p1": [0.0, 0.0]},
            "target": {"type": "point", "data": [0.0, 0.0]}
        }"#;
        let file: ProblemFile = serde_json::from_str(raw).unwrap();
        let problem = file.into_problem().unwrap();
        assert_eq!(problem.state.point_count(), 2);
        assert_eq!(problem.state.next_id(FigureKind::Point), 2);
    }

    #[test]
    fn unsupported_target_kind_is_rejected() {
        let raw = r#"{
            "points": {"p1": [0.0, 0.0]},
            "target": {"type": "ellipse", "data": [0.0, 0.0, 0.0]}
        }"#;
        let file: ProblemFile = serde_json::from_str(raw).unwrap();
        let err = file.into_problem().unwrap_err();
        assert!(matches!(err, ProblemError::Target(_)));
    }
}
