//! Vector path stroking library: converts paths into fillable outlines of their strokes.
//!
//! Main features:
//!  - Stroking with miter, round and bevel joints and butt, square and round caps
//!  - Dashing with arbitrary on/off patterns
//!  - SVG path parsing and generation
//!
//! ```
//! use pathstroke::{EndCapStyle, JointStyle, Path, StrokeStyle};
//!
//! let path: Path = "M0,0 L100,0 L100,100".parse()?;
//! let style = StrokeStyle::new(10.0, JointStyle::Round, EndCapStyle::Square);
//! let outline = path.stroke(style);
//! assert!(outline.contains((100.0, 50.0), pathstroke::DEFAULT_FLATNESS));
//! assert_eq!(outline.subpaths().len(), 1);
//! # Ok::<(), pathstroke::Error>(())
//! ```

mod curve;
mod dash;
mod error;
mod flatten;
mod geometry;
mod joint;
mod path;
mod stroke;
mod utils;

pub use curve::{Cubic, Curve, Line, Quad, Segment};
pub use dash::DashPattern;
pub use error::Error;
pub use flatten::{FlatSegment, PathFlattenIter};
pub use geometry::{BBox, EPSILON, PI, Point, Scalar, Transform, scalar_fmt};
pub use joint::{
    Intersection, MITER_LIMIT, ROUND_JOINT_STEP, add_cap, add_joint, left_normal,
    line_intersection,
};
pub use path::{DEFAULT_FLATNESS, FillRule, Path, PathBuilder, PathSink, SubPath};
pub use stroke::{EndCapStyle, JointStyle, StrokeConfig, StrokeStyle, Stroker};
