//! Ring classification: flattened SVG rings to polygons with holes.
//!
//! SVG fill rules already decided what is solid; by the time rings reach this
//! module we only need the topology. Containment parity does that without
//! caring how the author wound anything: a ring inside an even number of
//! other rings is an outer boundary, inside an odd number it is a hole of
//! the innermost outer around it.

use kurbo::Point;

/// Rings enclosing less area than this are dropped before classification.
const AREA_EPS: f64 = 1e-9;

/// One solid region: an outer boundary plus zero or more holes.
///
/// Orientation is normalized: `outer` is CCW, `holes` are CW (model space is
/// Y-up). Downstream tessellation and wall generation rely on this.
#[derive(Clone, Debug)]
pub(crate) struct Polygon {
    pub outer: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

/// Twice the signed area of a ring (shoelace). Positive means CCW in Y-up.
pub(crate) fn signed_area(ring: &[Point]) -> f64 {
    let mut acc = 0.0;
    let n = ring.len();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        acc += a.x * b.y - b.x * a.y;
    }
    acc * 0.5
}

pub(crate) fn is_ccw(ring: &[Point]) -> bool {
    signed_area(ring) > 0.0
}

/// Even-odd raycast. Points exactly on an edge resolve arbitrarily, which is
/// acceptable here: representative points come from *other* rings' vertices.
pub(crate) fn point_in_ring(p: Point, ring: &[Point]) -> bool {
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_int = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_int {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Group rings into polygons-with-holes by containment parity.
///
/// Near-zero-area rings are dropped first. Each surviving ring's first vertex
/// is tested against every other ring; even containment depth makes it an
/// outer, odd makes it a hole of the deepest containing outer. Output order
/// follows input order of the outer rings.
pub(crate) fn classify_rings(rings: Vec<Vec<Point>>) -> Vec<Polygon> {
    let rings: Vec<Vec<Point>> = rings
        .into_iter()
        .filter(|r| r.len() >= 3 && signed_area(r).abs() > AREA_EPS)
        .collect();

    let depth: Vec<usize> = (0..rings.len())
        .map(|i| {
            (0..rings.len())
                .filter(|&j| j != i && point_in_ring(rings[i][0], &rings[j]))
                .count()
        })
        .collect();

    let mut polys: Vec<Polygon> = Vec::new();
    let mut poly_of_ring: Vec<Option<usize>> = vec![None; rings.len()];

    for i in 0..rings.len() {
        if depth[i] % 2 == 0 {
            let mut outer = rings[i].clone();
            if !is_ccw(&outer) {
                outer.reverse();
            }
            poly_of_ring[i] = Some(polys.len());
            polys.push(Polygon {
                outer,
                holes: Vec::new(),
            });
        }
    }

    for i in 0..rings.len() {
        if depth[i] % 2 == 1 {
            let parent = (0..rings.len())
                .filter(|&j| j != i && depth[j] % 2 == 0 && point_in_ring(rings[i][0], &rings[j]))
                .max_by_key(|&j| depth[j]);
            // A hole that self-intersected its way out of every outer is dropped.
            if let Some(pi) = parent.and_then(|j| poly_of_ring[j]) {
                let mut hole = rings[i].clone();
                if is_ccw(&hole) {
                    hole.reverse();
                }
                polys[pi].holes.push(hole);
            }
        }
    }

    polys
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;
