use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{unary_union, Area, BooleanOps, Coord, LineString, MultiPolygon, Polygon, Validation};
use thiserror::Error;
use tracing::{debug, warn};

/// Relative area change tolerated before a repair is reported as lossy.
pub const DEFAULT_AREA_TOLERANCE: f64 = 1e-6;

/// Data-quality problems noticed while repairing. Never fatal: the repaired
/// geometry is always used.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepairWarning {
    #[error("geometry still invalid after repair: {reason}")]
    StillInvalid { reason: String },
    #[error("repair changed area from {before} to {after}")]
    AreaDrift { before: f64, after: f64 },
}

/// Output of a repair: the geometry to use, plus anything worth logging.
#[derive(Debug, Clone)]
pub struct Repaired {
    pub geometry: MultiPolygon<f64>,
    pub warnings: Vec<RepairWarning>,
}

impl Repaired {
    fn untouched(geometry: MultiPolygon<f64>) -> Self {
        Self { geometry, warnings: Vec::new() }
    }
}

/// Re-derive a valid decomposition of a single polygon.
///
/// Every ring is rebuilt on its own into the area it encloses, then the holes
/// are subtracted from the shell. A hole outside its shell removes nothing and
/// overlapping holes remove their union.
fn rebuild(polygon: &Polygon<f64>) -> MultiPolygon<f64> {
    let shell = fill_ring(polygon.exterior());
    if polygon.interiors().is_empty() {
        return shell;
    }

    let holes = polygon.interiors().iter()
        .flat_map(|hole| fill_ring(hole).0)
        .collect::<Vec<_>>();
    shell.difference(&unary_union(&holes))
}

/// Everything a ring encloses: its simple loops, unioned. A region the ring
/// winds around twice stays covered instead of cancelling out.
fn fill_ring(ring: &LineString<f64>) -> MultiPolygon<f64> {
    unary_union(&simple_loops(ring))
}

/// Split a closed ring into simple loops at its self-intersections.
///
/// The ring is first noded: every crossing or touching point is inserted into
/// each segment it lies on. Walking the noded ring, a vertex that repeats an
/// earlier one closes a loop, which is cut off and emitted. Loops without area
/// (spikes, doubled-back edges) are dropped.
fn simple_loops(ring: &LineString<f64>) -> Vec<Polygon<f64>> {
    let segments = ring.lines().collect::<Vec<_>>();

    let mut splits = vec![Vec::<Coord<f64>>::new(); segments.len()];
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let points = match line_intersection(segments[i], segments[j]) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => vec![intersection],
                Some(LineIntersection::Collinear { intersection }) => vec![intersection.start, intersection.end],
                None => continue,
            };
            splits[i].extend_from_slice(&points);
            splits[j].extend(points);
        }
    }

    let mut noded = Vec::with_capacity(segments.len() * 2 + 1);
    for (segment, mut points) in segments.iter().zip(splits) {
        let start = segment.start;
        points.sort_by(|a, b| sq_dist(start, *a).total_cmp(&sq_dist(start, *b)));
        noded.push(start);
        noded.extend(points.into_iter().filter(|&p| p != segment.start && p != segment.end));
    }
    if let Some(&first) = noded.first() {
        noded.push(first);
    }
    noded.dedup();

    let mut stack = Vec::<Coord<f64>>::with_capacity(noded.len());
    let mut loops = Vec::new();
    for c in noded {
        if let Some(pos) = stack.iter().rposition(|&p| p == c) {
            let mut closed = stack.split_off(pos);
            closed.push(c);
            let candidate = Polygon::new(LineString(closed), vec![]);
            if candidate.unsigned_area() > 0.0 {
                loops.push(candidate);
            }
        }
        stack.push(c);
    }
    loops
}

#[inline]
fn sq_dist(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (b.x - a.x).powi(2) + (b.y - a.y).powi(2)
}

/// Repair a single, possibly self-intersecting polygon.
pub fn repair_polygon(polygon: &Polygon<f64>, area_tolerance: f64) -> Repaired {
    if polygon.is_valid() {
        return Repaired::untouched(MultiPolygon::new(vec![polygon.clone()]));
    }
    let geometry = rebuild(polygon);
    finish(polygon.unsigned_area(), geometry, area_tolerance)
}

/// Repair a polygon or multi-polygon so that it passes validation.
///
/// Valid input is returned unchanged, so repair is idempotent. Components are
/// rebuilt one at a time and then unioned, which keeps overlapping components
/// from cancelling each other out.
pub fn repair(multi: &MultiPolygon<f64>, area_tolerance: f64) -> Repaired {
    if multi.is_valid() {
        return Repaired::untouched(multi.clone());
    }

    let pieces = multi.0.iter()
        .flat_map(|polygon| {
            if polygon.is_valid() { vec![polygon.clone()] } else { rebuild(polygon).0 }
        })
        .collect::<Vec<_>>();
    let geometry = unary_union(&pieces);

    let before = multi.0.iter().map(|p| p.unsigned_area()).sum::<f64>();
    finish(before, geometry, area_tolerance)
}

fn finish(before: f64, geometry: MultiPolygon<f64>, area_tolerance: f64) -> Repaired {
    let mut warnings = Vec::new();

    if let Err(err) = geometry.check_validation() {
        warnings.push(RepairWarning::StillInvalid { reason: err.to_string() });
    }

    // Self-intersecting rings have a meaningless signed-area input, so drift
    // here usually means "the input was a bow-tie", not "area was lost".
    let after = geometry.unsigned_area();
    let scale = before.max(after);
    if scale > 0.0 && (after - before).abs() > area_tolerance * scale {
        warnings.push(RepairWarning::AreaDrift { before, after });
    }

    for warning in &warnings {
        warn!(%warning, "geometry repair");
    }
    debug!(components = geometry.0.len(), area = after, "repaired geometry");

    Repaired { geometry, warnings }
}
