//! SVG parsing and path flattening.
//!
//! Every filled path in the document becomes one [`ExtractedShape`]: a set of
//! closed polygonal rings in model space plus the path's own fill color (when
//! it carries a solid one). Strokes, gradients-as-geometry, images, and
//! filters are ignored; text is outlined by the parser and extracted like any
//! other path.

use kurbo::{BezPath, PathEl, Point};

use crate::foundation::{
    color::Color,
    error::{RelievoError, RelievoResult},
};

/// Curve subdivision tolerance in SVG user units.
const FLATTEN_TOLERANCE: f64 = 0.1;

/// One filled SVG path, flattened to closed polygonal rings.
///
/// Rings are in model space: group and path transforms are baked in and the
/// Y axis points up (SVG's Y-down is flipped at extraction time). Ring
/// orientation is as-authored; see `geometry::shape` for normalization.
#[derive(Clone, Debug)]
pub(crate) struct ExtractedShape {
    pub rings: Vec<Vec<Point>>,
    pub fill: Option<Color>,
}

/// Parse SVG bytes and flatten every filled path into polygonal rings.
///
/// Paths without a fill contribute nothing. A document with no filled paths
/// yields an empty vec, which is not an error. Unparseable input is.
pub(crate) fn extract_shapes(data: &[u8]) -> RelievoResult<Vec<ExtractedShape>> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let opts = usvg::Options {
        fontdb: std::sync::Arc::new(db),
        ..Default::default()
    };

    let tree = usvg::Tree::from_data(data, &opts)
        .map_err(|e| RelievoError::svg(format!("parse svg tree: {e}")))?;

    let mut out = Vec::new();
    collect_group(tree.root(), &mut out);
    Ok(out)
}

fn collect_group(group: &usvg::Group, out: &mut Vec<ExtractedShape>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => collect_group(g.as_ref(), out),
            usvg::Node::Path(p) => {
                if let Some(shape) = extract_path(p.as_ref()) {
                    out.push(shape);
                }
            }
            usvg::Node::Text(t) => collect_group(t.flattened(), out),
            usvg::Node::Image(_) => {}
        }
    }
}

fn extract_path(path: &usvg::Path) -> Option<ExtractedShape> {
    let fill = path.fill()?;

    // Solid colors override the material albedo; gradients and patterns
    // fall back to it.
    let color = match fill.paint() {
        usvg::Paint::Color(c) => {
            let mut col = Color::from_srgb8(c.red, c.green, c.blue, 255);
            col.a = fill.opacity().get();
            Some(col)
        }
        _ => None,
    };

    let bez = to_bez_path(path.data(), path.abs_transform());
    let rings = flatten_to_rings(&bez);
    if rings.is_empty() {
        return None;
    }

    Some(ExtractedShape { rings, fill: color })
}

/// Convert a parsed path to a `BezPath`, baking in the absolute transform and
/// flipping Y so model space is Y-up.
fn to_bez_path(path: &usvg::tiny_skia_path::Path, t: usvg::Transform) -> BezPath {
    use usvg::tiny_skia_path::PathSegment;

    let tp = |p: usvg::tiny_skia_path::Point| -> Point {
        let x = t.sx * p.x + t.kx * p.y + t.tx;
        let y = t.ky * p.x + t.sy * p.y + t.ty;
        Point::new(f64::from(x), f64::from(-y))
    };

    let mut bez = BezPath::new();
    for seg in path.segments() {
        match seg {
            PathSegment::MoveTo(p) => bez.move_to(tp(p)),
            PathSegment::LineTo(p) => bez.line_to(tp(p)),
            PathSegment::QuadTo(p1, p) => bez.quad_to(tp(p1), tp(p)),
            PathSegment::CubicTo(p1, p2, p) => bez.curve_to(tp(p1), tp(p2), tp(p)),
            PathSegment::Close => bez.close_path(),
        }
    }
    bez
}

/// Flatten curves into line segments and split the path into rings.
///
/// Unterminated subpaths are treated as closed: a fill always implies a
/// closed region. Rings that collapse below three distinct points are
/// dropped here rather than poisoning tessellation later.
fn flatten_to_rings(bez: &BezPath) -> Vec<Vec<Point>> {
    let mut rings: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    kurbo::flatten(bez.iter(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            flush_ring(&mut rings, std::mem::take(&mut current));
            current.push(p);
        }
        PathEl::LineTo(p) => {
            if current.last() != Some(&p) {
                current.push(p);
            }
        }
        PathEl::ClosePath => {
            flush_ring(&mut rings, std::mem::take(&mut current));
        }
        // flatten() only emits lines.
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    flush_ring(&mut rings, current);

    rings
}

fn flush_ring(rings: &mut Vec<Vec<Point>>, mut ring: Vec<Point>) {
    // Drop the explicit closing repeat if present.
    while ring.len() > 1 && ring.last() == ring.first() {
        ring.pop();
    }
    if ring.len() >= 3 {
        rings.push(ring);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/extract.rs"]
mod tests;
