//! Geometry connecting offset edges of a stroke: line intersection, joints and caps
use crate::{EndCapStyle, JointStyle, PI, PathSink, Point, Scalar};

/// Default miter limit as a multiple of stroke thickness
///
/// Miter tip can extend beyond the end of the offset edge by at most
/// `MITER_LIMIT * thickness`, otherwise joint is beveled.
pub const MITER_LIMIT: Scalar = 3.0;

/// Angular step (in radians) used to approximate round joints with lines
pub const ROUND_JOINT_STEP: Scalar = 0.1;

/// Cubic tangent scales approximating quarter circle in round caps
const ROUND_CAP_INNER: Scalar = 0.55;
const ROUND_CAP_OUTER: Scalar = 0.45;

/// Offset of the left side of a directed line with the specified width
///
/// With `y` axis pointing down left side is obtained by rotating direction by -90
/// degrees. Returns `None` for zero length direction.
pub fn left_normal(direction: Point, width: Scalar) -> Option<Point> {
    let length = direction.length();
    if length == 0.0 {
        None
    } else {
        Some((width / length) * direction.normal())
    }
}

/// Result of intersecting two lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Intersection point or fallback point for parallel lines
    pub point: Point,
    /// Squared distance from the end of the first line to the intersection,
    /// negative if intersection is located before the end of the first line.
    pub overshoot: Scalar,
    /// Whether intersection lies on both line segments
    pub within_segments: bool,
}

impl Intersection {
    fn new(point: Point, p1: Point, p2: Point, within_segments: bool) -> Self {
        let beyond = point - p2;
        let mut overshoot = beyond.length_squared();
        if beyond.dot(p2 - p1) < 0.0 {
            overshoot = -overshoot;
        }
        Self {
            point,
            overshoot,
            within_segments,
        }
    }
}

/// Intersect line `p1 -> p2` with line `p3 -> p4`
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Intersection {
    if p2 == p3 {
        return Intersection {
            point: p2,
            overshoot: 0.0,
            within_segments: true,
        };
    }
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let divisor = d1.cross(d2);
    if divisor == 0.0 {
        let degenerate = d1 == Point::new(0.0, 0.0) || d2 == Point::new(0.0, 0.0);
        if !degenerate {
            let (dx1, dy1) = (d1.x(), d1.y());
            let (dx2, dy2) = (d2.x(), d2.y());
            let aligned = if dy1 == 0.0 && dy2 != 0.0 {
                let t = (p1.y() - p3.y()) / dy2;
                Some((Point::new(p3.x() + t * dx2, p1.y()), t))
            } else if dy2 == 0.0 && dy1 != 0.0 {
                let t = (p3.y() - p1.y()) / dy1;
                Some((Point::new(p1.x() + t * dx1, p3.y()), t))
            } else if dx1 == 0.0 && dx2 != 0.0 {
                let t = (p1.x() - p3.x()) / dx2;
                Some((Point::new(p1.x(), p3.y() + t * dy2), t))
            } else if dx2 == 0.0 && dx1 != 0.0 {
                let t = (p3.x() - p1.x()) / dx1;
                Some((Point::new(p3.x(), p1.y() + t * dy1), t))
            } else {
                None
            };
            if let Some((point, t)) = aligned {
                return Intersection::new(point, p1, p2, (0.0..=1.0).contains(&t));
            }
        }
        return Intersection {
            point: p2.lerp(p3, 0.5),
            overshoot: 0.0,
            within_segments: false,
        };
    }
    let offset = p1 - p3;
    let t1 = d2.cross(offset) / divisor;
    let t2 = d1.cross(offset) / divisor;
    let point = p1 + t1 * d1;
    let within = (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2);
    Intersection::new(point, p1, p2, within)
}

/// Connect end of the edge `e1_start -> e1_end` with the start of the edge
/// `e2_start -> e2_end`, assuming current position of the sink is `e1_start`.
///
/// `pivot` is the point on the stroked line the edges are offset from, it is
/// used as a center of round joints.
#[allow(clippy::too_many_arguments)]
pub fn add_joint<S: PathSink + ?Sized>(
    sink: &mut S,
    joint: JointStyle,
    max_miter_overshoot: Scalar,
    width: Scalar,
    e1_start: Point,
    e1_end: Point,
    e2_start: Point,
    e2_end: Point,
    pivot: Point,
) {
    if joint == JointStyle::Bevel || e1_start == e1_end || e2_start == e2_end {
        sink.line_to(e1_end);
        sink.line_to(e2_start);
        return;
    }
    let intersection = line_intersection(e1_start, e1_end, e2_start, e2_end);
    if intersection.within_segments {
        sink.line_to(intersection.point);
        return;
    }
    // bevel has already been handled
    if joint == JointStyle::Round {
        sink.line_to(e1_end);
        add_arc(sink, pivot, width, e1_end, e2_start);
        sink.line_to(e2_start);
    } else if intersection.overshoot > 0.0 && intersection.overshoot < max_miter_overshoot {
        sink.line_to(intersection.point);
    } else {
        sink.line_to(e1_end);
        sink.line_to(e2_start);
    }
}

/// Approximate circular arc around `center` from `from` to `to` with lines
///
/// Arc always takes the shorter way around, half turn goes in the direction of
/// decreasing angle. End points are not emitted.
fn add_arc<S: PathSink + ?Sized>(
    sink: &mut S,
    center: Point,
    radius: Scalar,
    from: Point,
    to: Point,
) {
    let angle_from = (from - center).angle();
    let angle_to = (to - center).angle();
    let mut delta = (angle_to - angle_from) % (2.0 * PI);
    if delta >= PI {
        delta -= 2.0 * PI;
    } else if delta < -PI {
        delta += 2.0 * PI;
    }
    let step = ROUND_JOINT_STEP.copysign(delta);
    let mut index = 1.0;
    while index * ROUND_JOINT_STEP < delta.abs() {
        let (sin, cos) = (angle_from + index * step).sin_cos();
        sink.line_to(center + radius * Point::new(sin, cos));
        index += 1.0;
    }
}

/// Add cap closing across from `p1` to `p2`, assuming current position is `p1`
///
/// Cap bulges to the left of `p1 -> p2` direction by `width`.
pub fn add_cap<S: PathSink + ?Sized>(
    sink: &mut S,
    cap: EndCapStyle,
    p1: Point,
    p2: Point,
    width: Scalar,
) {
    let (offset1, offset2) = match left_normal(p2 - p1, width) {
        Some(normal) => (p1 + normal, p2 + normal),
        None => (p1, p1),
    };
    match cap {
        EndCapStyle::Butt => sink.line_to(p2),
        EndCapStyle::Square => {
            sink.line_to(offset1);
            sink.line_to(offset2);
            sink.line_to(p2);
        }
        EndCapStyle::Round => {
            let mid = offset1.lerp(offset2, 0.5);
            sink.cubic_to(
                p1.lerp(offset1, ROUND_CAP_INNER),
                offset1.lerp(mid, ROUND_CAP_OUTER),
                mid,
            );
            sink.cubic_to(
                mid.lerp(offset2, ROUND_CAP_INNER),
                offset2.lerp(p2, ROUND_CAP_OUTER),
                p2,
            );
        }
    }
}
