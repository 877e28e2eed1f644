use crate::{
    BBox, Cubic, Curve, DashPattern, Error, Line, PathFlattenIter, Point, Quad, Scalar, Segment,
    StrokeStyle, Stroker, Transform,
};
use std::{
    fmt,
    io::{Read, Write},
    str::FromStr,
};

/// flatness of 0.05px gives good accuracy tradeoff
pub const DEFAULT_FLATNESS: Scalar = 0.05;

/// Append-only receiver of path construction commands.
///
/// Stroking and dashing only ever write through this interface and never read the
/// produced geometry back.
pub trait PathSink {
    /// Start new sub-path at the specified point
    fn move_to(&mut self, p: Point);

    /// Add line from the current position
    fn line_to(&mut self, p: Point);

    /// Add quadratic bezier curve from the current position
    fn quad_to(&mut self, p1: Point, p2: Point);

    /// Add cubic bezier curve from the current position
    fn cubic_to(&mut self, p1: Point, p2: Point, p3: Point);

    /// Close current sub-path
    fn close(&mut self);
}

impl<S: PathSink + ?Sized> PathSink for &mut S {
    fn move_to(&mut self, p: Point) {
        (**self).move_to(p)
    }

    fn line_to(&mut self, p: Point) {
        (**self).line_to(p)
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        (**self).quad_to(p1, p2)
    }

    fn cubic_to(&mut self, p1: Point, p2: Point, p3: Point) {
        (**self).cubic_to(p1, p2, p3)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Non-empty collections of segments where end of each segments conisides with the start of the next one.
#[derive(Clone, PartialEq)]
pub struct SubPath {
    /// List of segments representing SubPath
    segments: Vec<Segment>,
    /// Whether SubPath contains an implicit line segment connecting start and the end of it.
    closed: bool,
}

impl fmt::Debug for SubPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments.iter() {
            writeln!(f, "{:?}", segment)?;
        }
        if self.closed {
            writeln!(f, "Close")?;
        } else {
            writeln!(f, "End")?
        }
        Ok(())
    }
}

impl SubPath {
    pub fn new(segments: Vec<Segment>, closed: bool) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments, closed })
        }
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn first(&self) -> Segment {
        *self.segments.first().expect("SubPath is never empty")
    }

    pub fn last(&self) -> Segment {
        *self.segments.last().expect("SubPath is never empty")
    }

    pub fn start(&self) -> Point {
        self.first().start()
    }

    pub fn end(&self) -> Point {
        self.last().end()
    }

    /// Apply transformation to the sub-path in place
    pub fn transform(&mut self, tr: Transform) {
        for segment in self.segments.iter_mut() {
            *segment = segment.transform(tr);
        }
    }

    pub fn bbox(&self, init: Option<BBox>, tr: Transform) -> BBox {
        self.segments
            .iter()
            .fold(init, |bbox, seg| Some(seg.transform(tr).bbox(bbox)))
            .expect("SubPath is never empty")
    }

    pub fn reverse(&self) -> Self {
        Self {
            segments: self.segments.iter().rev().map(|s| s.reverse()).collect(),
            closed: self.closed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Collection of the SubPath treated as a signle unit
#[derive(Clone, PartialEq, Default)]
pub struct Path {
    subpaths: Vec<SubPath>,
    fill_rule: FillRule,
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.subpaths.is_empty() {
            write!(f, "Empty")?;
        } else {
            for subpath in self.subpaths.iter() {
                subpath.fmt(f)?
            }
        }
        Ok(())
    }
}

impl Path {
    /// Create path from the list of subpaths
    pub fn new(subpaths: Vec<SubPath>) -> Self {
        Self {
            subpaths,
            fill_rule: FillRule::default(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Remove all subpaths
    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    /// Fill rule used to determine the inside of the path
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn set_fill_rule(&mut self, fill_rule: FillRule) {
        self.fill_rule = fill_rule;
    }

    /// Convenience method to create `PathBuilder`
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// Apply transformation to the path in place
    pub fn transform(&mut self, tr: Transform) {
        for subpath in self.subpaths.iter_mut() {
            subpath.transform(tr);
        }
    }

    pub fn segments_count(&self) -> usize {
        self.subpaths
            .iter()
            .fold(0usize, |acc, subpath| acc + subpath.segments().len())
    }

    /// Bounding box of the path after provided transformation is applied.
    pub fn bbox(&self, tr: Transform) -> Option<BBox> {
        self.subpaths
            .iter()
            .fold(None, |bbox, subpath| Some(subpath.bbox(bbox, tr)))
    }

    /// Reverse order and direction of all segments
    pub fn reverse(&self) -> Self {
        Self {
            subpaths: self.subpaths.iter().map(|s| s.reverse()).collect(),
            fill_rule: self.fill_rule,
        }
    }

    /// Convert path to an iterator over flattened line segments
    ///
    /// `close` forces every sub-path to be closed, which is what filling needs.
    pub fn flatten(&self, tr: Transform, flatness: Scalar, close: bool) -> PathFlattenIter<'_> {
        PathFlattenIter::new(self, tr, flatness, close)
    }

    /// Determine if the point is inside of the filled path according to its fill rule
    pub fn contains(&self, point: impl Into<Point>, flatness: Scalar) -> bool {
        let point = point.into();
        let mut winding = 0i32;
        for segment in self.flatten(Transform::identity(), flatness, true) {
            let Line([p0, p1]) = segment.line;
            let side = (p1 - p0).cross(point - p0);
            if p0.y() <= point.y() {
                if p1.y() > point.y() && side > 0.0 {
                    winding += 1;
                }
            } else if p1.y() <= point.y() && side < 0.0 {
                winding -= 1;
            }
        }
        match self.fill_rule {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }

    /// Stroke path with default accuracy
    ///
    /// Outline is constructed by offsetting flattened path by `thickness / 2` on
    /// both sides and connecting offsets with joints and caps.
    pub fn stroke(&self, style: StrokeStyle) -> Path {
        Stroker::new(style).stroke(self, Transform::identity())
    }

    /// Split path into dashes and stroke the result with default accuracy
    pub fn dash(&self, style: StrokeStyle, dashes: &[Scalar]) -> Result<Path, Error> {
        let pattern = DashPattern::new(dashes)?;
        Ok(Stroker::new(style).dash(self, &pattern, Transform::identity()))
    }

    /// Save path in SVG path format.
    pub fn save(&self, mut out: impl Write) -> std::io::Result<()> {
        write!(out, "{}", self)
    }

    /// Convert path to SVG path representation
    pub fn to_svg_path(&self) -> String {
        self.to_string()
    }

    /// Load path from SVG path representation
    pub fn load(mut input: impl Read) -> Result<Self, Error> {
        let mut buffer = Vec::new();
        input.read_to_end(&mut buffer)?;
        let mut builder = PathBuilder::new();
        PathParser::new(&buffer).parse(&mut builder)?;
        Ok(builder.build())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        for subpath in self.subpaths.iter() {
            write!(out, "M{:?}", subpath.start())?;
            let mut segment_type: Option<u8> = None;
            for segment in subpath.segments().iter() {
                match segment {
                    Segment::Line(line) => {
                        if segment_type.replace(b'L') != Some(b'L') {
                            out.write_str(" L")?;
                        }
                        write!(out, " {:?}", line.end())?;
                    }
                    Segment::Quad(quad) => {
                        let [_, p1, p2] = quad.points();
                        if segment_type.replace(b'Q') != Some(b'Q') {
                            out.write_str(" Q")?;
                        }
                        write!(out, " {:?} {:?}", p1, p2)?;
                    }
                    Segment::Cubic(cubic) => {
                        let [_, p1, p2, p3] = cubic.points();
                        if segment_type.replace(b'C') != Some(b'C') {
                            out.write_str(" C")?;
                        }
                        write!(out, " {:?} {:?} {:?}", p1, p2, p3)?;
                    }
                }
            }
            if subpath.closed() {
                out.write_str(" Z")?;
            }
            out.write_str(" ")?;
        }
        Ok(())
    }
}

impl IntoIterator for Path {
    type Item = SubPath;
    type IntoIter = <Vec<SubPath> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.subpaths.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a SubPath;
    type IntoIter = <&'a Vec<SubPath> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.subpaths.iter()
    }
}

impl Extend<SubPath> for Path {
    fn extend<T: IntoIterator<Item = SubPath>>(&mut self, iter: T) {
        self.subpaths.extend(iter)
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(text: &str) -> Result<Path, Self::Err> {
        let mut builder = PathBuilder::new();
        PathParser::new(text.as_bytes()).parse(&mut builder)?;
        Ok(builder.build())
    }
}

/// Path builder similar to Canvas/Cairo interface.
#[derive(Clone, Default)]
pub struct PathBuilder {
    position: Point,
    start: Point,
    subpath: Vec<Segment>,
    subpaths: Vec<SubPath>,
    fill_rule: FillRule,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build path
    pub fn build(&mut self) -> Path {
        let PathBuilder {
            subpath,
            mut subpaths,
            fill_rule,
            ..
        } = std::mem::take(self);
        subpaths.extend(SubPath::new(subpath, false));
        Path {
            subpaths,
            fill_rule,
        }
    }

    /// Fill rule of the path that is going to be built
    pub fn fill_rule(&mut self, fill_rule: FillRule) -> &mut Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Move current position, ending current subpath
    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let subpath = std::mem::take(&mut self.subpath);
        self.subpaths.extend(SubPath::new(subpath, false));
        self.position = p.into();
        self.start = self.position;
        self
    }

    /// Close current subpath
    pub fn close(&mut self) -> &mut Self {
        let subpath = std::mem::take(&mut self.subpath);
        self.subpaths.extend(SubPath::new(subpath, true));
        self.position = self.start;
        self
    }

    /// Add line from the current position to the specified point
    ///
    /// Zero length line is only recorded when it is the first segment of the
    /// sub-path, so a lone dot survives and can be stroked with caps.
    pub fn line_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let p = p.into();
        if self.subpath.is_empty() || !self.position.is_close_to(p) {
            let line = Line::new(self.position, p);
            self.position = line.end();
            self.subpath.push(line.into());
        }
        self
    }

    /// Add quadratic bezier curve
    pub fn quad_to(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) -> &mut Self {
        let quad = Quad::new(self.position, p1, p2);
        self.position = quad.end();
        self.subpath.push(quad.into());
        self
    }

    /// Add smooth quadratic bezier curve
    pub fn quad_smooth_to(&mut self, p2: impl Into<Point>) -> &mut Self {
        let p1 = match self.subpath.last() {
            Some(Segment::Quad(quad)) => quad.smooth(),
            _ => self.position,
        };
        self.quad_to(p1, p2)
    }

    /// Add cubic beizer curve
    pub fn cubic_to(
        &mut self,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> &mut Self {
        let cubic = Cubic::new(self.position, p1, p2, p3);
        self.position = cubic.end();
        self.subpath.push(cubic.into());
        self
    }

    /// Add smooth cubic bezier curve
    pub fn cubic_smooth_to(&mut self, p2: impl Into<Point>, p3: impl Into<Point>) -> &mut Self {
        let p1 = match self.subpath.last() {
            Some(Segment::Cubic(cubic)) => cubic.smooth(),
            _ => self.position,
        };
        self.cubic_to(p1, p2, p3)
    }

    /// Add circle with the center at current position and provided radius.
    ///
    /// Current position is not changed after invocation.
    pub fn circle(&mut self, radius: Scalar) -> &mut Self {
        // https://stackoverflow.com/questions/1734745/how-to-create-circle-with-b%C3%A9zier-curves
        // (4/3)*tan(pi/8) = 4*(sqrt(2)-1)/3 = 0.5522847498307935
        let offset = 0.5522847498307935 * radius;
        let x_offset = Point::new(offset, 0.0);
        let y_offset = Point::new(0.0, offset);
        let center = self.position();
        let p0 = center - Point::new(radius, 0.0);
        let p1 = center - Point::new(0.0, radius);
        let p2 = center + Point::new(radius, 0.0);
        let p3 = center + Point::new(0.0, radius);

        self.move_to(p0)
            .cubic_to(p0 - y_offset, p1 - x_offset, p1)
            .cubic_to(p1 + x_offset, p2 - y_offset, p2)
            .cubic_to(p2 + y_offset, p3 + x_offset, p3)
            .cubic_to(p3 - x_offset, p0 + y_offset, p0)
            .close()
            .move_to(center)
    }

    /// Current possition of the builder
    pub fn position(&self) -> Point {
        self.position
    }
}

impl PathSink for PathBuilder {
    fn move_to(&mut self, p: Point) {
        PathBuilder::move_to(self, p);
    }

    fn line_to(&mut self, p: Point) {
        PathBuilder::line_to(self, p);
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        PathBuilder::quad_to(self, p1, p2);
    }

    fn cubic_to(&mut self, p1: Point, p2: Point, p3: Point) {
        PathBuilder::cubic_to(self, p1, p2, p3);
    }

    fn close(&mut self) {
        PathBuilder::close(self);
    }
}

/// Parser of the SVG path data (`d` attribute)
#[derive(Debug)]
struct PathParser<'a> {
    // text containing unparsed path
    text: &'a [u8],
    // current offset in the text
    offset: usize,
    // command repeated when coordinates follow without a command letter
    prev_cmd: Option<u8>,
}

impl<'a> PathParser<'a> {
    fn new(text: &'a [u8]) -> PathParser<'a> {
        Self {
            text,
            offset: 0,
            prev_cmd: None,
        }
    }

    /// Error construction helper
    fn error<S: Into<String>>(&self, reason: S) -> Error {
        Error::ParseError {
            offset: self.offset,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.get(self.offset).copied()
    }

    /// Consume insignificant separators
    fn skip_separators(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n' | b',') = self.peek() {
            self.offset += 1;
        }
    }

    /// Consume sequence of digits, returns true if at least one digit was found
    fn skip_digits(&mut self) -> bool {
        let start = self.offset;
        while let Some(b'0'..=b'9') = self.peek() {
            self.offset += 1;
        }
        self.offset > start
    }

    /// Consume `+|-` sign
    fn skip_sign(&mut self) {
        if let Some(b'-' | b'+') = self.peek() {
            self.offset += 1;
        }
    }

    /// Parse single scalar
    fn parse_scalar(&mut self) -> Result<Scalar, Error> {
        self.skip_separators();
        let start = self.offset;
        self.skip_sign();
        let whole = self.skip_digits();
        let fraction = if self.peek() == Some(b'.') {
            self.offset += 1;
            self.skip_digits()
        } else {
            false
        };
        if !whole && !fraction {
            return Err(self.error("failed to parse scalar"));
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.offset += 1;
            self.skip_sign();
            if !self.skip_digits() {
                return Err(self.error("failed to parse scalar exponent"));
            }
        }
        std::str::from_utf8(&self.text[start..self.offset])
            .ok()
            .and_then(|scalar| scalar.parse().ok())
            .ok_or_else(|| self.error("failed to parse scalar"))
    }

    /// Parse pair of scalars and convert it to a point
    fn parse_point(&mut self, origin: Option<Point>) -> Result<Point, Error> {
        let x = self.parse_scalar()?;
        let y = self.parse_scalar()?;
        let point = Point::new(x, y);
        Ok(match origin {
            Some(origin) => origin + point,
            None => point,
        })
    }

    /// Parse SVG command, or repeat previous one if coordinates follow
    fn parse_cmd(&mut self) -> Result<u8, Error> {
        let cmd = self.peek().ok_or_else(|| self.error("unexpected end of input"))?;
        match cmd {
            b'M' | b'm' | b'L' | b'l' | b'V' | b'v' | b'H' | b'h' | b'C' | b'c' | b'S' | b's'
            | b'Q' | b'q' | b'T' | b't' | b'Z' | b'z' => {
                self.offset += 1;
                self.prev_cmd = match cmd {
                    b'M' => Some(b'L'),
                    b'm' => Some(b'l'),
                    b'Z' | b'z' => None,
                    _ => Some(cmd),
                };
                Ok(cmd)
            }
            _ => self
                .prev_cmd
                .ok_or_else(|| self.error("failed to parse path command")),
        }
    }

    /// Parse SVG path and apply changes to the path builder.
    fn parse(mut self, builder: &mut PathBuilder) -> Result<(), Error> {
        loop {
            self.skip_separators();
            if self.peek().is_none() {
                break;
            }
            let cmd = self.parse_cmd()?;
            let position = builder.position();
            let origin = cmd.is_ascii_lowercase().then_some(position);
            match cmd.to_ascii_uppercase() {
                b'M' => {
                    builder.move_to(self.parse_point(origin)?);
                }
                b'L' => {
                    builder.line_to(self.parse_point(origin)?);
                }
                b'H' => {
                    let x = self.parse_scalar()?;
                    let x = origin.map_or(x, |origin| origin.x() + x);
                    builder.line_to((x, position.y()));
                }
                b'V' => {
                    let y = self.parse_scalar()?;
                    let y = origin.map_or(y, |origin| origin.y() + y);
                    builder.line_to((position.x(), y));
                }
                b'Q' => {
                    let p1 = self.parse_point(origin)?;
                    let p2 = self.parse_point(origin)?;
                    builder.quad_to(p1, p2);
                }
                b'T' => {
                    builder.quad_smooth_to(self.parse_point(origin)?);
                }
                b'C' => {
                    let p1 = self.parse_point(origin)?;
                    let p2 = self.parse_point(origin)?;
                    let p3 = self.parse_point(origin)?;
                    builder.cubic_to(p1, p2, p3);
                }
                b'S' => {
                    let p2 = self.parse_point(origin)?;
                    let p3 = self.parse_point(origin)?;
                    builder.cubic_smooth_to(p2, p3);
                }
                b'Z' => {
                    builder.close();
                }
                _ => return Err(self.error("unsupported path command")),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    pub(crate) const SQUIRREL: &str = r#"
    M12 1C9.79 1 8 2.31 8 3.92c0 1.94.5 3.03 0 6.08 0-4.5-2.77-6.34-4-6.34.05-.5-.48
    -.66-.48-.66s-.22.11-.3.34c-.27-.31-.56-.27-.56-.27l-.13.58S.7 4.29 .68 6.87c.2.33
    1.53.6 2.47.43.89.05.67.79.47.99C2.78 9.13 2 8 1 8S0 9 1 9s1 1 3 1c-3.09 1.2 0 4 0 4
    H3c-1 0-1 1-1 1h6c3 0 5-1 5-3.47 0-.85-.43-1.79 -1-2.53-1.11-1.46.23-2.68 1-2
    .77.68 3 1 3-2 0-2.21-1.79-4-4-4z
    "#;

    #[test]
    fn test_bbox() -> Result<(), Error> {
        let path: Path = SQUIRREL.parse()?;
        let bbox = path.bbox(Transform::identity()).unwrap();
        assert_approx_eq!(bbox.x(), 0.25, 1e-6);
        assert_approx_eq!(bbox.y(), 1.0, 1e-9);
        assert_approx_eq!(bbox.width(), 15.75, 1e-6);
        assert_approx_eq!(bbox.height(), 14.0, 1e-9);
        Ok(())
    }

    #[test]
    fn test_path_parse() -> Result<(), Error> {
        let path: Path = " M0,0L1-1L1,0ZL0,1 h1 v-1e0z m2 2 .5.5".parse()?;
        let reference = Path::new(vec![
            SubPath::new(
                vec![
                    Line::new((0.0, 0.0), (1.0, -1.0)).into(),
                    Line::new((1.0, -1.0), (1.0, 0.0)).into(),
                ],
                true,
            )
            .unwrap(),
            SubPath::new(
                vec![
                    Line::new((0.0, 0.0), (0.0, 1.0)).into(),
                    Line::new((0.0, 1.0), (1.0, 1.0)).into(),
                    Line::new((1.0, 1.0), (1.0, 0.0)).into(),
                ],
                true,
            )
            .unwrap(),
            SubPath::new(vec![Line::new((2.0, 2.0), (2.5, 2.5)).into()], false).unwrap(),
        ]);
        assert_eq!(format!("{:?}", path), format!("{:?}", reference));

        let path: Path = "M1 1 Q2 2 3 1 T5 1 C6 0 7 0 8 1 s2 1 2 0".parse()?;
        let segments = path.subpaths()[0].segments();
        assert_eq!(segments.len(), 4);
        assert_eq!(
            segments[1],
            Segment::from(Quad::new((3.0, 1.0), (4.0, 0.0), (5.0, 1.0)))
        );
        assert_eq!(
            segments[3],
            Segment::from(Cubic::new((8.0, 1.0), (9.0, 2.0), (10.0, 2.0), (10.0, 1.0)))
        );

        assert!(matches!(
            "M0 0 L1".parse::<Path>(),
            Err(Error::ParseError { .. })
        ));
        assert!(matches!("X1 2".parse::<Path>(), Err(Error::ParseError { .. })));
        Ok(())
    }

    #[test]
    fn test_save_load() -> Result<(), Error> {
        let path: Path = SQUIRREL.parse()?;
        let mut path_save = Vec::new();
        path.save(&mut path_save)?;
        let path_load = Path::load(std::io::Cursor::new(path_save))?;
        assert_eq!(format!("{:?}", path), format!("{:?}", path_load));

        let path: Path = "M0 0 L10 0 10 2.5Z".parse()?;
        assert_eq!(path.to_svg_path(), "M0,0 L 10,0 10,2.5 Z ");
        Ok(())
    }

    #[test]
    fn test_builder() {
        let path = Path::builder()
            .move_to((1.0, 1.0))
            .line_to((1.0, 1.0))
            .line_to((2.0, 1.0))
            .line_to((2.0, 1.0))
            .close()
            .line_to((1.0, 3.0))
            .build();
        assert_eq!(path.subpaths().len(), 2);
        // first zero length line is kept, repeated point is not
        assert_eq!(path.subpaths()[0].segments().len(), 2);
        assert!(path.subpaths()[0].closed());
        // close returns to the start of the sub-path
        assert_eq!(path.subpaths()[1].start(), Point::new(1.0, 1.0));
        assert_eq!(path.fill_rule(), FillRule::NonZero);

        let circle = Path::builder().move_to((5.0, 5.0)).circle(2.0).build();
        let bbox = circle.bbox(Transform::identity()).unwrap();
        assert_approx_eq!(bbox.x(), 3.0, 1e-9);
        assert_approx_eq!(bbox.width(), 4.0, 1e-9);
    }

    #[test]
    fn test_contains() -> Result<(), Error> {
        // outer and inner boxes with the same orientation
        let mut path: Path = "M0,0 h90 v90 h-90z M20,20 h50 v50 h-50z".parse()?;
        assert!(path.contains((45.0, 45.0), DEFAULT_FLATNESS));
        assert!(path.contains((10.0, 45.0), DEFAULT_FLATNESS));
        assert!(!path.contains((100.0, 45.0), DEFAULT_FLATNESS));
        path.set_fill_rule(FillRule::EvenOdd);
        assert!(!path.contains((45.0, 45.0), DEFAULT_FLATNESS));
        assert!(path.contains((10.0, 45.0), DEFAULT_FLATNESS));

        // open sub-paths are filled as if closed
        let path: Path = "M0,0 L10,0 L10,10".parse()?;
        assert!(path.contains((8.0, 2.0), DEFAULT_FLATNESS));
        assert!(!path.contains((2.0, 8.0), DEFAULT_FLATNESS));
        Ok(())
    }
}
