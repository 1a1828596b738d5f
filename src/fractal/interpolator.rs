use serde::{Deserialize, Serialize};

use crate::display::{Canvas, Paint};
use crate::geometry::{Triangle, Vec2};

/// How a finished batch is rasterized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStyle {
    /// Filled triangles; holes are punched in black
    #[default]
    Solid,
    /// Triangle edges only, everything in ink
    Outline,
}

/// Triangles animated during one step, with per-vertex edge directions.
///
/// `vertices[i].vN + t * directions[i][N]` traces edge N of triangle i as t
/// goes from 0 to 1.
#[derive(Debug, Clone)]
pub struct AnimationBatch {
    vertices: Vec<Triangle>,
    directions: Vec<[Vec2; 3]>,
    paint: Paint,
}

impl AnimationBatch {
    pub fn new(paint: Paint) -> Self {
        Self {
            vertices: Vec::new(),
            directions: Vec::new(),
            paint,
        }
    }

    pub fn push(&mut self, triangle: Triangle) {
        self.directions.push(triangle.edge_vectors());
        self.vertices.push(triangle);
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.directions.clear();
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.vertices
    }

    pub fn paint(&self) -> Paint {
        self.paint
    }

    pub fn set_paint(&mut self, paint: Paint) {
        self.paint = paint;
    }

    /// (vertex, direction) pairs of every triangle
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.vertices
            .iter()
            .zip(&self.directions)
            .flat_map(|(tri, dirs)| tri.vertices().into_iter().zip(*dirs))
    }
}

/// What a call to [`Interpolator::advance`] drew
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Growing edges drawn at parameter `t`
    Lines { t: f32 },
    /// t passed 1.0: the batch was rasterized and emptied
    Complete { rasterized: usize },
}

/// Advances the normalized time of the current batch, one frame per call
#[derive(Debug, Clone)]
pub struct Interpolator {
    batch: AnimationBatch,
    t: f32,
    step: f32,
    style: FillStyle,
}

impl Interpolator {
    pub fn new(step: f32, style: FillStyle) -> Self {
        Self {
            batch: AnimationBatch::new(Paint::Ink),
            t: 0.0,
            step,
            style,
        }
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn style(&self) -> FillStyle {
        self.style
    }

    pub fn batch(&self) -> &AnimationBatch {
        &self.batch
    }

    pub fn batch_mut(&mut self) -> &mut AnimationBatch {
        &mut self.batch
    }

    /// Paint for batches of center triangles (the holes)
    pub fn hole_paint(&self) -> Paint {
        match self.style {
            FillStyle::Solid => Paint::Background,
            FillStyle::Outline => Paint::Ink,
        }
    }

    /// Start over with `triangle` as the only batch member, drawn in ink
    pub fn restart(&mut self, triangle: Triangle) {
        self.t = 0.0;
        self.batch.clear();
        self.batch.set_paint(Paint::Ink);
        self.batch.push(triangle);
    }

    /// Drop the batch without drawing it
    pub fn discard(&mut self) {
        self.t = 0.0;
        self.batch.clear();
    }

    /// Draw one frame of the batch.
    ///
    /// While t <= 1 every edge is drawn from its vertex to `vertex + t * dir`
    /// and t moves forward one step. The first call that finds t > 1
    /// rasterizes the batch, empties it and rewinds t to 0.
    pub fn advance(&mut self, canvas: &mut impl Canvas) -> Frame {
        if self.t <= 1.0 {
            let t = self.t;
            self.draw_lines(canvas, t);
            self.t += self.step;
            Frame::Lines { t }
        } else {
            self.t = 0.0;
            let rasterized = self.rasterize(canvas);
            self.batch.clear();
            Frame::Complete { rasterized }
        }
    }

    fn draw_lines(&self, canvas: &mut impl Canvas, t: f32) {
        let paint = self.batch.paint();
        for (vertex, direction) in self.batch.segments() {
            canvas.draw_line(vertex, vertex.along(direction, t), paint);
        }
    }

    fn rasterize(&self, canvas: &mut impl Canvas) -> usize {
        let paint = self.batch.paint();
        for tri in self.batch.triangles() {
            match self.style {
                FillStyle::Solid => canvas.fill_triangle(tri.v1, tri.v2, tri.v3, paint),
                FillStyle::Outline => {
                    for (vertex, edge) in tri.vertices().into_iter().zip(tri.edge_vectors()) {
                        canvas.draw_line(vertex, vertex + edge, paint);
                    }
                },
            }
        }
        self.batch.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractal::testing::RecordingCanvas;

    fn tri() -> Triangle {
        Triangle::new(Vec2::new(50.0, 10.0), Vec2::new(10.0, 80.0), Vec2::new(90.0, 80.0))
    }

    /// Number of line frames before t first exceeds 1.0
    fn line_frames(step: f32) -> usize {
        let mut t = 0.0f32;
        let mut frames = 0;
        while t <= 1.0 {
            frames += 1;
            t += step;
        }
        frames
    }

    #[test]
    fn test_segments_follow_edges() {
        let mut batch = AnimationBatch::new(Paint::Ink);
        batch.push(tri());
        let segments: Vec<(Vec2, Vec2)> = batch.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], (tri().v1, tri().v2 - tri().v1));
        assert_eq!(segments[1], (tri().v2, tri().v3 - tri().v2));
        assert_eq!(segments[2], (tri().v3, tri().v1 - tri().v3));
    }

    #[test]
    fn test_lines_grow_with_t() {
        let mut interp = Interpolator::new(0.25, FillStyle::Solid);
        interp.restart(tri());
        let mut canvas = RecordingCanvas::new(100, 100);

        assert_eq!(interp.advance(&mut canvas), Frame::Lines { t: 0.0 });
        assert_eq!(interp.advance(&mut canvas), Frame::Lines { t: 0.25 });
        assert_eq!(canvas.lines.len(), 6);

        // Second frame: first edge reaches a quarter of the way to v2
        let (start, end, paint) = canvas.lines[3];
        assert_eq!(start, tri().v1);
        assert!(end.approx_eq(&Vec2::new(40.0, 27.5), 1e-4));
        assert_eq!(paint, Paint::Ink);
    }

    #[test]
    fn test_exactly_one_completion_per_cycle() {
        let step = 0.03;
        let mut interp = Interpolator::new(step, FillStyle::Solid);
        interp.restart(tri());
        let mut canvas = RecordingCanvas::new(100, 100);

        let expected = line_frames(step);
        assert!(expected >= 34 && expected <= 35);
        for frame in 0..expected {
            assert!(
                matches!(interp.advance(&mut canvas), Frame::Lines { .. }),
                "frame {} completed early",
                frame
            );
        }
        assert!(canvas.fills.is_empty());

        assert_eq!(interp.advance(&mut canvas), Frame::Complete { rasterized: 1 });
        assert_eq!(canvas.fills.len(), 1);
        assert_eq!(canvas.fills[0], (tri(), Paint::Ink));
        assert_eq!(interp.t(), 0.0);
        assert!(interp.batch().is_empty());
    }

    #[test]
    fn test_fill_uses_center_geometry_not_endpoints() {
        let mut interp = Interpolator::new(0.6, FillStyle::Solid);
        interp.restart(tri());
        interp.batch_mut().set_paint(Paint::Background);
        let mut canvas = RecordingCanvas::new(100, 100);
        // t = 0.0, 0.6, then 1.2 > 1 completes
        interp.advance(&mut canvas);
        interp.advance(&mut canvas);
        assert_eq!(interp.advance(&mut canvas), Frame::Complete { rasterized: 1 });
        assert_eq!(canvas.fills, vec![(tri(), Paint::Background)]);
    }

    #[test]
    fn test_outline_style_draws_edges() {
        let mut interp = Interpolator::new(2.0, FillStyle::Outline);
        interp.restart(tri());
        let mut canvas = RecordingCanvas::new(100, 100);
        interp.advance(&mut canvas);
        canvas.reset_log();

        assert_eq!(interp.advance(&mut canvas), Frame::Complete { rasterized: 1 });
        assert!(canvas.fills.is_empty());
        assert_eq!(canvas.lines.len(), 3);
        assert_eq!(canvas.lines[1].0, tri().v2);
        assert!(canvas.lines[1].1.approx_eq(&tri().v3, 1e-4));
        assert_eq!(interp.hole_paint(), Paint::Ink);
    }

    #[test]
    fn test_empty_batch_completes_without_draws() {
        let mut interp = Interpolator::new(2.0, FillStyle::Solid);
        let mut canvas = RecordingCanvas::new(10, 10);
        interp.advance(&mut canvas);
        assert_eq!(interp.advance(&mut canvas), Frame::Complete { rasterized: 0 });
        assert_eq!(canvas.draw_calls(), 0);
    }
}
