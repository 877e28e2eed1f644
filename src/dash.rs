//! Splitting of paths into dashes
use crate::{Error, FlatSegment, Line, PathSink, Point, Scalar};

/// Pieces of dashes shorter than this are not drawn
const MIN_DASH_LENGTH: Scalar = 1e-9;

/// Validated dash pattern
///
/// Lengths are used cyclically, lengths with even index are "on" (drawn) and
/// lengths with odd index are "off" (gaps).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Scalar>", into = "Vec<Scalar>")
)]
pub struct DashPattern {
    lengths: Vec<Scalar>,
}

impl DashPattern {
    /// Create dash pattern from on/off lengths
    ///
    /// Pattern must be non-empty, contain even number of lengths and every length
    /// must be a finite positive number.
    pub fn new(lengths: &[Scalar]) -> Result<Self, Error> {
        if lengths.is_empty() {
            return Err(Error::EmptyDashPattern);
        }
        if lengths.len() % 2 != 0 {
            return Err(Error::OddDashCount(lengths.len()));
        }
        if let Some((index, length)) = lengths
            .iter()
            .enumerate()
            .find(|(_, length)| !(length.is_finite() && **length > 0.0))
        {
            return Err(Error::InvalidDashLength {
                index,
                length: *length,
            });
        }
        Ok(Self {
            lengths: lengths.to_vec(),
        })
    }

    pub fn lengths(&self) -> &[Scalar] {
        &self.lengths
    }

    /// Total length of one repetition of the pattern
    pub fn period(&self) -> Scalar {
        self.lengths.iter().sum()
    }

    /// Write "on" parts of the flattened segments into the sink
    ///
    /// Each dash becomes a separate open sub-path. Pattern position runs continuously
    /// over the whole path, a dash crossing a sub-path boundary is split in two.
    /// Returns number of emitted dashes.
    pub fn dash_segments<S, I>(&self, sink: &mut S, segments: I) -> usize
    where
        S: PathSink + ?Sized,
        I: IntoIterator<Item = FlatSegment>,
    {
        let mut state = DashState::new(self);
        for segment in segments {
            if segment.subpath_index == 0 {
                state.lift();
            }
            state.walk(sink, segment.line);
        }
        state.dashes
    }
}

impl TryFrom<Vec<Scalar>> for DashPattern {
    type Error = Error;

    fn try_from(lengths: Vec<Scalar>) -> Result<Self, Self::Error> {
        Self::new(&lengths)
    }
}

impl From<DashPattern> for Vec<Scalar> {
    fn from(pattern: DashPattern) -> Self {
        pattern.lengths
    }
}

/// Position inside of the dash pattern
struct DashState<'a> {
    lengths: &'a [Scalar],
    index: usize,
    // length left in the current dash entry
    remaining: Scalar,
    // current sub-path of the sink has a started dash
    pen_down: bool,
    dashes: usize,
}

impl<'a> DashState<'a> {
    fn new(pattern: &'a DashPattern) -> Self {
        Self {
            lengths: &pattern.lengths,
            index: 0,
            remaining: pattern.lengths[0],
            pen_down: false,
            dashes: 0,
        }
    }

    /// Stop current dash without changing pattern position
    fn lift(&mut self) {
        self.pen_down = false;
    }

    fn is_on(&self) -> bool {
        self.index % 2 == 0
    }

    fn advance(&mut self) {
        self.index = (self.index + 1) % self.lengths.len();
        self.remaining = self.lengths[self.index];
    }

    /// Walk along the line cutting it according to the pattern
    fn walk<S: PathSink + ?Sized>(&mut self, sink: &mut S, line: Line) {
        let Line([p0, p1]) = line;
        let length = line.length();
        let at = |offset: Scalar| {
            if length > 0.0 {
                p0.lerp(p1, offset / length)
            } else {
                p0
            }
        };
        let mut offset = 0.0;
        loop {
            if length - offset > self.remaining {
                let start = offset;
                offset += self.remaining;
                if self.is_on() {
                    self.draw(sink, at(start), at(offset), self.remaining);
                    self.pen_down = false;
                }
                self.advance();
            } else {
                let left = length - offset;
                self.remaining -= left;
                if self.is_on() {
                    self.draw(sink, at(offset), p1, left);
                }
                break;
            }
        }
    }

    /// Draw piece of the current dash, dash is started lazily so rounding
    /// leftovers at the ends of lines never produce empty dashes
    fn draw<S: PathSink + ?Sized>(
        &mut self,
        sink: &mut S,
        from: Point,
        to: Point,
        length: Scalar,
    ) {
        if !self.pen_down {
            if length <= MIN_DASH_LENGTH {
                return;
            }
            sink.move_to(from);
            self.pen_down = true;
            self.dashes += 1;
        }
        sink.line_to(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DEFAULT_FLATNESS, EndCapStyle, JointStyle, Path, PathBuilder, StrokeStyle, Stroker,
        Transform, assert_approx_eq,
    };

    fn dashes(path: &str, pattern: &[Scalar]) -> Result<Path, Error> {
        let path: Path = path.parse()?;
        let pattern = DashPattern::new(pattern)?;
        let mut builder = PathBuilder::new();
        pattern.dash_segments(
            &mut builder,
            path.flatten(Transform::identity(), DEFAULT_FLATNESS, false),
        );
        Ok(builder.build())
    }

    fn subpath_length(path: &Path, index: usize) -> Scalar {
        path.subpaths()[index]
            .segments()
            .iter()
            .map(|segment| match segment {
                crate::Segment::Line(line) => line.length(),
                _ => panic!("dashes only contain lines"),
            })
            .sum()
    }

    #[test]
    fn test_dash_pattern() {
        assert!(matches!(DashPattern::new(&[]), Err(Error::EmptyDashPattern)));
        assert!(matches!(
            DashPattern::new(&[1.0, 2.0, 3.0]),
            Err(Error::OddDashCount(3))
        ));
        assert!(matches!(
            DashPattern::new(&[1.0, 0.0]),
            Err(Error::InvalidDashLength { index: 1, .. })
        ));
        assert!(matches!(
            DashPattern::new(&[-1.0, 1.0]),
            Err(Error::InvalidDashLength { index: 0, .. })
        ));
        assert!(matches!(
            DashPattern::new(&[1.0, Scalar::NAN]),
            Err(Error::InvalidDashLength { index: 1, .. })
        ));
        assert!(matches!(
            DashPattern::new(&[1.0, Scalar::INFINITY]),
            Err(Error::InvalidDashLength { index: 1, .. })
        ));
        let pattern = DashPattern::new(&[3.0, 1.0, 0.5, 1.5]).unwrap();
        assert_eq!(pattern.lengths(), &[3.0, 1.0, 0.5, 1.5]);
        assert_eq!(pattern.period(), 6.0);
    }

    #[test]
    fn test_dash_line() -> Result<(), Error> {
        // N repetitions of the pattern produce exactly N dashes
        let path = dashes("M0,0 L30,0", &[4.0, 2.0])?;
        assert_eq!(path.subpaths().len(), 5);
        for index in 0..5 {
            assert_approx_eq!(subpath_length(&path, index), 4.0, 1e-9);
            let start = path.subpaths()[index].start();
            assert_approx_eq!(start.x(), 6.0 * index as Scalar, 1e-9);
            assert!(!path.subpaths()[index].closed());
        }

        // last dash is truncated by the end of the path
        let path = dashes("M0,0 L9,0", &[4.0, 2.0])?;
        assert_eq!(path.subpaths().len(), 2);
        assert_approx_eq!(subpath_length(&path, 1), 3.0, 1e-9);
        Ok(())
    }

    #[test]
    fn test_dash_exact_periods() -> Result<(), Error> {
        // rounding at the end of the path must not start an extra empty dash
        for (on, off, count) in [(0.3, 0.7, 50), (1.1, 2.2, 30), (0.1, 0.2, 100)] {
            let length = (on + off) * count as Scalar;
            let source = format!("M0,0 L{},0", length);
            let path = dashes(&source, &[on, off])?;
            assert_eq!(path.subpaths().len(), count, "pattern [{}, {}]", on, off);
            for index in 0..count {
                assert_approx_eq!(subpath_length(&path, index), on, 1e-9);
            }
        }

        let source: Path = "M0,0 L50,0".parse()?;
        let style = StrokeStyle::new(0.2, JointStyle::Miter, EndCapStyle::Square);
        let path = source.dash(style, &[0.3, 0.7])?;
        assert_eq!(path.subpaths().len(), 50);
        assert!(!path.contains((50.05, 0.0), DEFAULT_FLATNESS));
        assert!(path.contains((49.05, 0.0), DEFAULT_FLATNESS));
        Ok(())
    }

    #[test]
    fn test_dash_corners() -> Result<(), Error> {
        // dash continues around the corner without breaking
        let path = dashes("M0,0 L3,0 L3,10", &[5.0, 1.0])?;
        assert_eq!(path.subpaths()[0].segments().len(), 2);
        assert_approx_eq!(subpath_length(&path, 0), 5.0, 1e-9);
        assert_eq!(path.subpaths()[0].end(), crate::Point::new(3.0, 2.0));
        // 13 units long: on 0..5, off 5..6, on 6..11, off 11..12, on 12..13
        assert_eq!(path.subpaths().len(), 3);
        assert_approx_eq!(subpath_length(&path, 2), 1.0, 1e-9);
        Ok(())
    }

    #[test]
    fn test_dash_subpaths() -> Result<(), Error> {
        // pattern position carries over to the next sub-path, but dash is split
        let path = dashes("M0,0 L5,0 M0,10 L5,10", &[3.0, 1.0])?;
        assert_eq!(path.subpaths().len(), 4);
        assert_eq!(path.subpaths()[1].end(), crate::Point::new(5.0, 0.0));
        assert_approx_eq!(subpath_length(&path, 1), 1.0, 1e-9);
        assert_eq!(path.subpaths()[2].start(), crate::Point::new(0.0, 10.0));
        assert_approx_eq!(subpath_length(&path, 2), 2.0, 1e-9);
        assert_eq!(path.subpaths()[3].start(), crate::Point::new(3.0, 10.0));

        // closed sub-paths are dashed along the closing line
        let path = dashes("M0,0 L10,0 L10,10 L0,10 Z", &[25.0, 5.0])?;
        assert_eq!(path.subpaths().len(), 2);
        assert_eq!(path.subpaths()[0].end(), crate::Point::new(5.0, 10.0));
        assert_eq!(path.subpaths()[1].start(), crate::Point::new(0.0, 10.0));
        assert_eq!(path.subpaths()[1].end(), crate::Point::new(0.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_dash_stroke() -> Result<(), Error> {
        let style = StrokeStyle::new(2.0, JointStyle::Miter, EndCapStyle::Butt);
        let source: Path = "M0,0 L30,0".parse()?;
        let path = source.dash(style, &[4.0, 2.0])?;
        assert_eq!(path.subpaths().len(), 5);
        assert!(path.subpaths().iter().all(|subpath| subpath.closed()));
        assert!(path.contains((1.0, 0.5), DEFAULT_FLATNESS));
        assert!(!path.contains((5.0, 0.5), DEFAULT_FLATNESS));
        assert!(path.contains((7.0, -0.5), DEFAULT_FLATNESS));

        // invalid pattern is reported even if nothing would be drawn
        let result = source.dash(style.with_thickness(0.0), &[4.0]);
        assert!(matches!(result, Err(Error::OddDashCount(1))));
        assert!(source.dash(style.with_thickness(0.0), &[4.0, 2.0])?.is_empty());

        // in place dashing
        let pattern = DashPattern::new(&[4.0, 2.0])?;
        let mut inplace = source.clone();
        Stroker::new(style).dash_in_place(&mut inplace, &pattern, Transform::identity());
        assert_eq!(inplace, path);
        Ok(())
    }
}
