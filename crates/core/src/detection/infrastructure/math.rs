//! Geometry helpers for region similarity.
//!
//! Axis-aligned box IoU plus Sutherland-Hodgman clipping for the IoU of two
//! convex polygons (rotated rectangles).

pub type Point = (f64, f64);

/// IoU between two bounding boxes represented as `[x1, y1, x2, y2]`.
pub fn bbox_iou(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }

    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    inter / (area_a + area_b - inter)
}

/// Shoelace area; positive for counter-clockwise winding in a y-up frame.
fn signed_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let (x1, y1) = polygon[i];
            let (x2, y2) = polygon[(i + 1) % n];
            x1 * y2 - x2 * y1
        })
        .sum();
    twice / 2.0
}

pub fn polygon_area(polygon: &[Point]) -> f64 {
    signed_area(polygon).abs()
}

/// Which side of the directed line `a -> b` the point `p` lies on.
fn side(a: Point, b: Point, p: Point) -> f64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

fn line_intersection(p: Point, q: Point, a: Point, b: Point) -> Point {
    let dp = side(a, b, p);
    let dq = side(a, b, q);
    let t = dp / (dp - dq);
    (p.0 + t * (q.0 - p.0), p.1 + t * (q.1 - p.1))
}

/// Clips `subject` against the convex polygon `clip` (Sutherland-Hodgman).
///
/// Either winding order is accepted for `clip`. Returns an empty polygon when
/// the two do not intersect or `clip` has no area.
pub fn clip_convex(subject: &[Point], clip: &[Point]) -> Vec<Point> {
    let clip_area = signed_area(clip);
    if clip_area == 0.0 {
        return Vec::new();
    }
    let orientation = clip_area.signum();

    let mut output = subject.to_vec();
    for i in 0..clip.len() {
        if output.is_empty() {
            break;
        }
        let a = clip[i];
        let b = clip[(i + 1) % clip.len()];
        let inside = |p: Point| orientation * side(a, b, p) >= 0.0;

        let input = std::mem::take(&mut output);
        for j in 0..input.len() {
            let current = input[j];
            let previous = input[(j + input.len() - 1) % input.len()];
            match (inside(previous), inside(current)) {
                (true, true) => output.push(current),
                (true, false) => output.push(line_intersection(previous, current, a, b)),
                (false, true) => {
                    output.push(line_intersection(previous, current, a, b));
                    output.push(current);
                }
                (false, false) => {}
            }
        }
    }
    output
}

/// IoU of two convex polygons.
pub fn convex_iou(a: &[Point], b: &[Point]) -> f64 {
    let inter = polygon_area(&clip_convex(a, b));
    if inter == 0.0 {
        return 0.0;
    }
    let union = polygon_area(a) + polygon_area(b) - inter;
    if union <= 0.0 {
        return 0.0;
    }
    (inter / union).clamp(0.0, 1.0)
}
