//! Conversion of a path into the outline of its stroke
use crate::{
    DEFAULT_FLATNESS, DashPattern, FlatSegment, Line, MITER_LIMIT, Path, PathBuilder, PathSink,
    Point, Scalar, Transform, add_cap, add_joint, left_normal,
};

/// Shape used to connect two consecutive segments of the stroked path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum JointStyle {
    /// Outer edges are extended until they meet
    #[default]
    Miter,
    /// Circular arc around the connection point
    Round,
    /// Outer edges are connected with a straight line
    Bevel,
}

/// Shape of the ends of open sub-paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EndCapStyle {
    /// Stroke ends exactly at the end point
    #[default]
    Butt,
    /// Stroke extends half thickness beyond the end point
    Square,
    /// Half circle centered at the end point
    Round,
}

/// Stroke style
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StrokeStyle {
    /// Width of the stroke
    thickness: Scalar,
    /// How to join offset segments
    joint: JointStyle,
    /// How to join offset segments at the ends of the path
    cap: EndCapStyle,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            joint: JointStyle::default(),
            cap: EndCapStyle::default(),
        }
    }
}

impl StrokeStyle {
    pub fn new(thickness: Scalar, joint: JointStyle, cap: EndCapStyle) -> Self {
        Self {
            thickness,
            joint,
            cap,
        }
    }

    pub fn thickness(&self) -> Scalar {
        self.thickness
    }

    pub fn joint(&self) -> JointStyle {
        self.joint
    }

    pub fn cap(&self) -> EndCapStyle {
        self.cap
    }

    pub fn with_thickness(self, thickness: Scalar) -> Self {
        Self { thickness, ..self }
    }

    pub fn with_joint(self, joint: JointStyle) -> Self {
        Self { joint, ..self }
    }

    pub fn with_cap(self, cap: EndCapStyle) -> Self {
        Self { cap, ..self }
    }
}

/// Complete stroke configuration, as loaded from JSON
///
/// ```json
/// {"thickness": 2.0, "joint": "round", "cap": "square", "dash": [4, 2], "accuracy": 2}
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StrokeConfig {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub style: StrokeStyle,
    pub dash: Option<DashPattern>,
    pub accuracy: Scalar,
    pub miter_limit: Scalar,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            style: StrokeStyle::default(),
            dash: None,
            accuracy: 1.0,
            miter_limit: MITER_LIMIT,
        }
    }
}

impl StrokeConfig {
    /// Load configuration from JSON
    #[cfg(feature = "serde")]
    pub fn from_json(input: impl std::io::Read) -> Result<Self, crate::Error> {
        Ok(serde_json::from_reader(input)?)
    }

    /// Stroker configured with style, accuracy and miter limit
    pub fn stroker(&self) -> Stroker {
        Stroker::new(self.style)
            .with_accuracy(self.accuracy)
            .with_miter_limit(self.miter_limit)
    }

    /// Stroke the path, dashing it first if dash pattern is configured
    pub fn apply(&self, source: &Path, tr: Transform) -> Path {
        let stroker = self.stroker();
        match &self.dash {
            Some(pattern) => stroker.dash(source, pattern, tr),
            None => stroker.stroke(source, tr),
        }
    }
}

/// Stroke outline generator
///
/// `accuracy` controls flattening, higher values produce finer outlines of curves
/// and keep shorter segments. Miter limit is a multiple of thickness, joints with
/// miter extending further than that are beveled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroker {
    style: StrokeStyle,
    accuracy: Scalar,
    miter_limit: Scalar,
}

impl Stroker {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            accuracy: 1.0,
            miter_limit: MITER_LIMIT,
        }
    }

    pub fn with_accuracy(self, accuracy: Scalar) -> Self {
        let accuracy = if accuracy.is_finite() && accuracy > 0.0 {
            accuracy
        } else {
            tracing::warn!("[stroke:accuracy] invalid accuracy {}, using 1.0", accuracy);
            1.0
        };
        Self { accuracy, ..self }
    }

    pub fn with_miter_limit(self, miter_limit: Scalar) -> Self {
        let miter_limit = if miter_limit.is_finite() && miter_limit >= 0.0 {
            miter_limit
        } else {
            tracing::warn!(
                "[stroke:miter_limit] invalid miter limit {}, using {}",
                miter_limit,
                MITER_LIMIT
            );
            MITER_LIMIT
        };
        Self {
            miter_limit,
            ..self
        }
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn accuracy(&self) -> Scalar {
        self.accuracy
    }

    pub fn miter_limit(&self) -> Scalar {
        self.miter_limit
    }

    /// Flatness used to convert curves to lines
    fn flatness(&self) -> Scalar {
        DEFAULT_FLATNESS / self.accuracy
    }

    /// Stroke path after applying transformation to it
    pub fn stroke(&self, source: &Path, tr: Transform) -> Path {
        let mut builder = PathBuilder::new();
        self.stroke_into(&mut builder, source, tr);
        builder.build()
    }

    /// Replace path with its stroke
    pub fn stroke_in_place(&self, path: &mut Path, tr: Transform) {
        let source = std::mem::take(path);
        *path = self.stroke(&source, tr);
    }

    /// Write stroke outline of the path into the sink
    ///
    /// Nothing is written if thickness is not positive.
    pub fn stroke_into<S: PathSink + ?Sized>(&self, sink: &mut S, source: &Path, tr: Transform) {
        if self.style.thickness <= 0.0 {
            return;
        }
        tracing::debug_span!("[stroke]").in_scope(|| {
            let segments = source.flatten(tr, self.flatness(), false);
            let count = self.stroke_segments(sink, segments);
            tracing::debug!("[stroke:subpaths] {}", count);
        })
    }

    /// Stroke dashed path after applying transformation to it
    pub fn dash(&self, source: &Path, pattern: &DashPattern, tr: Transform) -> Path {
        let mut builder = PathBuilder::new();
        self.dash_into(&mut builder, source, pattern, tr);
        builder.build()
    }

    /// Replace path with the stroke of its dashed version
    pub fn dash_in_place(&self, path: &mut Path, pattern: &DashPattern, tr: Transform) {
        let source = std::mem::take(path);
        *path = self.dash(&source, pattern, tr);
    }

    /// Split path into dashes and write stroke outline of the dashes into the sink
    pub fn dash_into<S: PathSink + ?Sized>(
        &self,
        sink: &mut S,
        source: &Path,
        pattern: &DashPattern,
        tr: Transform,
    ) {
        if self.style.thickness <= 0.0 {
            return;
        }
        tracing::debug_span!("[dash]").in_scope(|| {
            let mut dashes = PathBuilder::new();
            pattern.dash_segments(&mut dashes, source.flatten(tr, self.flatness(), false));
            let dashes = dashes.build();
            tracing::debug!("[dash:dashes] {}", dashes.subpaths().len());
            self.stroke_into(sink, &dashes, Transform::identity());
        })
    }

    /// Stroke stream of flattened segments, returns number of stroked sub-paths
    fn stroke_segments<S, I>(&self, sink: &mut S, segments: I) -> usize
    where
        S: PathSink + ?Sized,
        I: IntoIterator<Item = FlatSegment>,
    {
        let thickness = self.style.thickness;
        let miter = self.miter_limit * thickness;
        let mut assembler = SubPathAssembler {
            sink,
            sections: Vec::with_capacity(512),
            joint: self.style.joint,
            cap: self.style.cap,
            width: thickness / 2.0,
            max_miter_overshoot: miter * miter,
            min_length_squared: 2.0 / (self.accuracy * self.accuracy),
            start: Point::default(),
            pending: false,
            count: 0,
        };
        for segment in segments {
            assembler.push(segment);
        }
        assembler.flush(false);
        assembler.count
    }
}

/// Flattened segment together with its offsets on both sides
#[derive(Debug, Clone, Copy)]
struct LineSection {
    start: Point,
    end: Point,
    // left side, directed from start to end
    l1: Point,
    l2: Point,
    // right side, directed from end to start
    r1: Point,
    r2: Point,
}

impl LineSection {
    fn new(start: Point, end: Point, width: Scalar) -> Self {
        // zero length segment is offset as if it was directed along x axis
        let normal = left_normal(end - start, width).unwrap_or(Point::new(0.0, -width));
        Self {
            start,
            end,
            l1: start + normal,
            l2: end + normal,
            r1: end - normal,
            r2: start - normal,
        }
    }
}

/// Collects offset sections of a sub-path and emits its outline once the
/// sub-path is complete.
struct SubPathAssembler<'a, S: ?Sized> {
    sink: &'a mut S,
    sections: Vec<LineSection>,
    joint: JointStyle,
    cap: EndCapStyle,
    width: Scalar,
    max_miter_overshoot: Scalar,
    min_length_squared: Scalar,
    // start of the next section, short segments are merged into it
    start: Point,
    // open sub-path has received segments but has not been emitted yet
    pending: bool,
    count: usize,
}

impl<S: PathSink + ?Sized> SubPathAssembler<'_, S> {
    fn push(&mut self, segment: FlatSegment) {
        let Line([p0, p1]) = segment.line;
        if segment.subpath_index == 0 {
            self.flush(false);
            self.start = p0;
            self.pending = true;
        }
        let length_squared = (p1 - self.start).length_squared();
        if segment.closes_subpath || length_squared > self.min_length_squared {
            self.sections
                .push(LineSection::new(self.start, p1, self.width));
            if segment.closes_subpath {
                self.flush(true);
            } else {
                self.start = p1;
            }
        }
    }

    fn flush(&mut self, closed: bool) {
        if self.pending && self.sections.is_empty() {
            // all segments were merged, keep a mark at the start
            self.sections
                .push(LineSection::new(self.start, self.start, self.width));
        }
        self.pending = false;
        if self.sections.is_empty() {
            return;
        }
        tracing::trace!(
            "[stroke:subpath] sections: {} closed: {}",
            self.sections.len(),
            closed
        );
        self.emit(closed);
        self.sections.clear();
        self.count += 1;
    }

    /// Join offset edges `e1` and `e2` around pivot
    fn joint(&mut self, e1: (Point, Point), e2: (Point, Point), pivot: Point) {
        add_joint(
            &mut *self.sink,
            self.joint,
            self.max_miter_overshoot,
            self.width,
            e1.0,
            e1.1,
            e2.0,
            e2.1,
            pivot,
        );
    }

    /// Emit outline of the collected sections
    ///
    /// Closed sub-path produces two closed outlines: left offsets in order and right
    /// offsets in reverse. Open sub-path produces single outline walking forward on the
    /// left side and backward on the right side, connected by caps.
    fn emit(&mut self, closed: bool) {
        let (first, last) = match (self.sections.first(), self.sections.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return,
        };

        if closed {
            self.sink.move_to(first.l1);
        } else {
            self.sink.move_to(first.r2);
            add_cap(&mut *self.sink, self.cap, first.r2, first.l1, self.width);
        }

        let mut prev = first;
        for index in 1..self.sections.len() {
            let section = self.sections[index];
            self.joint((prev.l1, prev.l2), (section.l1, section.l2), section.start);
            prev = section;
        }

        if closed {
            self.joint((last.l1, last.l2), (first.l1, first.l2), first.start);
            self.sink.close();
            self.sink.move_to(last.r1);
        } else {
            self.sink.line_to(last.l2);
            add_cap(&mut *self.sink, self.cap, last.l2, last.r1, self.width);
        }

        let mut prev = last;
        for index in (0..self.sections.len() - 1).rev() {
            let section = self.sections[index];
            self.joint((prev.r1, prev.r2), (section.r1, section.r2), section.end);
            prev = section;
        }

        if closed {
            self.joint((prev.r1, prev.r2), (last.r1, last.r2), last.end);
        } else {
            self.sink.line_to(prev.r2);
        }
        self.sink.close();
    }
}
