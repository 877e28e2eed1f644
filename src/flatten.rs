//! Conversion of paths into sequences of straight line segments
use crate::{Cubic, Curve, Line, Path, Quad, Scalar, Segment, SubPath, Transform};

/// Curves are not subdivided deeper than this (at most `2^16` lines per curve)
const MAX_SUBDIVISION_DEPTH: usize = 16;

/// Straight line produced by flattening a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatSegment {
    /// Flattened line in the transformed coordinates
    pub line: Line,
    /// Position of the line within its sub-path, `0` starts a new sub-path
    pub subpath_index: usize,
    /// Last line of a closed sub-path, its end coincides with the sub-path start
    pub closes_subpath: bool,
}

/// Iterator over flattened lines of the path
///
/// Lines of each sub-path are produced in order, and sub-paths are produced in order.
/// Closed sub-paths get an implicit closing line only when their end differs from
/// their start.
pub struct PathFlattenIter<'a> {
    path: &'a Path,
    transform: Transform,
    flatness: Scalar,
    close: bool,
    subpath: usize,
    stack: Vec<(Result<Cubic, Quad>, usize)>,
    lines: Vec<FlatSegment>,
    line: usize,
}

impl<'a> PathFlattenIter<'a> {
    pub(crate) fn new(path: &'a Path, transform: Transform, flatness: Scalar, close: bool) -> Self {
        Self {
            path,
            transform,
            flatness: 16.0 * flatness * flatness,
            close,
            subpath: 0,
            stack: Default::default(),
            lines: Default::default(),
            line: 0,
        }
    }

    /// Subdivide curves on the stack until they are flat enough
    fn flatten_stack(&mut self) {
        while let Some((curve, depth)) = self.stack.pop() {
            let flat = depth >= MAX_SUBDIVISION_DEPTH;
            match curve {
                Ok(cubic) => {
                    if flat || cubic.flatness() < self.flatness {
                        self.push_line(Line::new(cubic.start(), cubic.end()));
                        continue;
                    }
                    let (c0, c1) = cubic.split();
                    self.stack.push((Ok(c1), depth + 1));
                    self.stack.push((Ok(c0), depth + 1));
                }
                Err(quad) => {
                    if flat || quad.flatness() < self.flatness {
                        self.push_line(Line::new(quad.start(), quad.end()));
                        continue;
                    }
                    let (q0, q1) = quad.split();
                    self.stack.push((Err(q1), depth + 1));
                    self.stack.push((Err(q0), depth + 1));
                }
            }
        }
    }

    fn push_line(&mut self, line: Line) {
        self.lines.push(FlatSegment {
            line,
            subpath_index: self.lines.len(),
            closes_subpath: false,
        });
    }

    /// Flatten whole sub-path into the lines buffer
    fn flatten_subpath(&mut self, subpath: &SubPath) {
        self.lines.clear();
        self.line = 0;
        for segment in subpath.segments() {
            match segment.transform(self.transform) {
                Segment::Line(line) => self.push_line(line),
                Segment::Quad(quad) => {
                    self.stack.push((Err(quad), 0));
                    self.flatten_stack();
                }
                Segment::Cubic(cubic) => {
                    self.stack.push((Ok(cubic), 0));
                    self.flatten_stack();
                }
            }
        }
        if subpath.closed() || self.close {
            let start = self.transform.apply(subpath.start());
            let end = self.transform.apply(subpath.end());
            if !end.is_close_to(start) {
                self.push_line(Line::new(end, start));
            }
            if let Some(last) = self.lines.last_mut() {
                last.closes_subpath = true;
            }
        }
    }
}

impl Iterator for PathFlattenIter<'_> {
    type Item = FlatSegment;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.lines.get(self.line) {
                self.line += 1;
                return Some(*line);
            }
            let path = self.path;
            let subpath = path.subpaths().get(self.subpath)?;
            self.flatten_subpath(subpath);
            self.subpath += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_FLATNESS, Error, Point, assert_approx_eq};

    #[test]
    fn test_flatten_lines() -> Result<(), Error> {
        let path: Path = "M0,0 L10,0 L10,10 Z M20,0 L30,0 M40,0 L50,0 L40,0 Z".parse()?;
        let lines: Vec<_> = path
            .flatten(Transform::identity(), DEFAULT_FLATNESS, false)
            .collect();
        assert_eq!(lines.len(), 6);

        // implicit closing line
        assert_eq!(lines[2].line, Line::new((10.0, 10.0), (0.0, 0.0)));
        assert!(lines[2].closes_subpath);
        assert!(!lines[1].closes_subpath);

        // open sub-path
        assert_eq!(lines[2].subpath_index, 2);
        assert_eq!(lines[3].subpath_index, 0);
        assert!(!lines[3].closes_subpath);

        // closed sub-path ending at its start does not get an extra line
        assert_eq!(lines[4].subpath_index, 0);
        assert_eq!(lines[5].subpath_index, 1);
        assert_eq!(lines[5].line, Line::new((50.0, 0.0), (40.0, 0.0)));
        assert!(lines[5].closes_subpath);

        // forced closing
        let count = path
            .flatten(Transform::identity(), DEFAULT_FLATNESS, true)
            .count();
        assert_eq!(count, 7);
        Ok(())
    }

    #[test]
    fn test_flatten_curves() -> Result<(), Error> {
        let path: Path = "M0,0 C0,50 100,50 100,0 Q50,-60 0,0".parse()?;
        let tr = Transform::identity().translate(10.0, 5.0);
        let lines: Vec<_> = path.flatten(tr, DEFAULT_FLATNESS, false).collect();
        assert!(lines.len() > 10);

        // lines are connected
        for pair in lines.windows(2) {
            assert!(pair[0].line.end().is_close_to(pair[1].line.start()));
        }
        assert_eq!(lines[0].line.start(), Point::new(10.0, 5.0));
        let last = lines[lines.len() - 1];
        assert_approx_eq!(last.line.end().x(), 10.0, 1e-9);
        assert_approx_eq!(last.line.end().y(), 5.0, 1e-9);

        // coarser tolerance produces fewer lines
        let coarse = path.flatten(tr, 1.0, false).count();
        assert!(coarse < lines.len());

        // all points are within the tolerance of the curve
        let cubic = Cubic::new((10.0, 5.0), (10.0, 55.0), (110.0, 55.0), (110.0, 5.0));
        let max_y = cubic.at(0.5).y();
        for segment in lines.iter() {
            assert!(segment.line.end().y() <= max_y + DEFAULT_FLATNESS);
        }
        Ok(())
    }

    #[test]
    fn test_flatten_degenerate() -> Result<(), Error> {
        // lone dot survives flattening
        let path: Path = "M5,5 L5,5".parse()?;
        let lines: Vec<_> = path
            .flatten(Transform::identity(), DEFAULT_FLATNESS, false)
            .collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line.length(), 0.0);

        // curve with non-finite coordinates terminates
        let path = Path::builder()
            .move_to((0.0, 0.0))
            .cubic_to((Scalar::NAN, 0.0), (1.0, 1.0), (2.0, 0.0))
            .build();
        let count = path
            .flatten(Transform::identity(), DEFAULT_FLATNESS, false)
            .count();
        assert_eq!(count, 1 << MAX_SUBDIVISION_DEPTH);
        Ok(())
    }
}
