use crate::geometry::{PointF, RectF};
use raqote::{Path, PathBuilder, Winding};

/// Arcs reaching further than this from the origin are left out when the path
/// is handed to the rasterizer.
const MAX_COORDINATE: f32 = 1_048_576.0;

/// An arc along the circle inscribed in `oval`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcSegment {
    pub oval: RectF,
    pub start_deg: f32,
    /// Signed sweep. Positive values run clockwise on screen.
    pub sweep_deg: f32,
}

impl ArcSegment {
    pub fn start(&self) -> PointF {
        self.oval.point_at(self.start_deg)
    }

    pub fn end(&self) -> PointF {
        self.oval.point_at(self.start_deg + self.sweep_deg)
    }

    /// Center and signed radius. Ovals are always square, a negative width
    /// mirrors the arc through its center.
    fn circle(&self) -> (PointF, f32) {
        (self.oval.center(), self.oval.width() / 2.0)
    }

    fn is_drawable(&self) -> bool {
        let (center, radius) = self.circle();
        center.is_finite()
            && radius.is_finite()
            && self.start_deg.is_finite()
            && self.sweep_deg.is_finite()
            && center.x.abs() + radius.abs() <= MAX_COORDINATE
            && center.y.abs() + radius.abs() <= MAX_COORDINATE
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Segment {
    Arc(ArcSegment),
    Close,
}

/// A vector path built from arcs, in the manner of an `arcTo` drawing API:
/// the first arc of a contour starts it, later arcs are joined to the current
/// point with a straight line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathSpec {
    segments: Vec<Segment>,
}

impl PathSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc_to(&mut self, oval: RectF, start_deg: f32, sweep_deg: f32) -> &mut Self {
        self.segments.push(Segment::Arc(ArcSegment {
            oval,
            start_deg,
            sweep_deg,
        }));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(Segment::Close);
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn arcs(&self) -> impl Iterator<Item = &ArcSegment> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Arc(arc) => Some(arc),
            Segment::Close => None,
        })
    }

    /// Builds the raqote path filled with the non-zero winding rule. Arcs with
    /// non-finite or far out of range geometry are skipped, sweeps are limited
    /// to one full turn.
    pub fn to_path(&self) -> Path {
        let mut builder = PathBuilder::new();
        let mut open = false;

        for segment in &self.segments {
            match segment {
                Segment::Arc(arc) if arc.is_drawable() => {
                    let (center, radius) = arc.circle();
                    let start = arc.start_deg.to_radians();
                    if !open {
                        let (sin, cos) = start.sin_cos();
                        builder.move_to(center.x + radius * cos, center.y + radius * sin);
                        open = true;
                    }
                    // `arc` draws a line from the current point to its start.
                    builder.arc(
                        center.x,
                        center.y,
                        radius,
                        start,
                        arc.sweep_deg.clamp(-360.0, 360.0).to_radians(),
                    );
                }
                Segment::Arc(_) => {}
                Segment::Close => {
                    if open {
                        builder.close();
                        open = false;
                    }
                }
            }
        }

        let mut path = builder.finish();
        path.winding = Winding::NonZero;
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raqote::PathOp;

    fn assert_near(actual: PointF, expected: PointF) {
        assert!(
            (actual.x - expected.x).abs() < 1e-3 && (actual.y - expected.y).abs() < 1e-3,
            "expected {expected:?}, got {actual:?}"
        );
    }

    /// Every point the path visits, in order.
    fn points(path: &Path) -> Vec<PointF> {
        path.ops
            .iter()
            .filter_map(|op| match op {
                PathOp::MoveTo(p) | PathOp::LineTo(p) => Some(PointF::new(p.x, p.y)),
                PathOp::QuadTo(_, p) | PathOp::CubicTo(_, _, p) => Some(PointF::new(p.x, p.y)),
                PathOp::Close => None,
            })
            .collect()
    }

    fn move_count(path: &Path) -> usize {
        path.ops
            .iter()
            .filter(|op| matches!(op, PathOp::MoveTo(_)))
            .count()
    }

    #[test]
    fn arc_end_points() {
        let arc = ArcSegment {
            oval: RectF::square(100.0),
            start_deg: 0.0,
            sweep_deg: 90.0,
        };
        assert_near(arc.start(), PointF::new(100.0, 50.0));
        assert_near(arc.end(), PointF::new(50.0, 100.0));
    }

    #[test]
    fn negative_sweep_runs_counter_clockwise() {
        let arc = ArcSegment {
            oval: RectF::square(100.0),
            start_deg: 0.0,
            sweep_deg: -90.0,
        };
        assert_near(arc.end(), PointF::new(50.0, 0.0));

        let mut path = PathSpec::new();
        path.arc_to(arc.oval, arc.start_deg, arc.sweep_deg);
        let points = points(&path.to_path());
        assert_near(points[0], PointF::new(100.0, 50.0));
        assert_near(*points.last().unwrap(), PointF::new(50.0, 0.0));
        assert!(points.iter().all(|p| p.y <= 50.0 + 1e-3));
    }

    #[test]
    fn consecutive_arcs_share_one_contour() {
        let mut path = PathSpec::new();
        path.arc_to(RectF::square(100.0), 0.0, 90.0)
            .arc_to(RectF::new(25.0, 25.0, 75.0, 75.0), 90.0, -90.0)
            .close();
        assert_eq!(path.arcs().count(), 2);

        let raster = path.to_path();
        assert_eq!(move_count(&raster), 1);
        assert!(matches!(raster.ops.last(), Some(PathOp::Close)));
        assert!(matches!(raster.winding, Winding::NonZero));

        let points = points(&raster);
        assert_near(points[0], PointF::new(100.0, 50.0));
        // The second arc is joined to the end of the first one.
        assert!(points.iter().any(|p| (p.x - 50.0).abs() < 1e-3 && (p.y - 75.0).abs() < 1e-3));
        assert_near(*points.last().unwrap(), PointF::new(75.0, 50.0));
    }

    #[test]
    fn close_starts_a_new_contour() {
        let mut path = PathSpec::new();
        path.arc_to(RectF::square(100.0), 0.0, 180.0)
            .close()
            .arc_to(RectF::square(10.0), 0.0, 180.0)
            .close();

        assert_eq!(move_count(&path.to_path()), 2);
    }

    #[test]
    fn zero_sweep_only_moves() {
        let mut path = PathSpec::new();
        path.arc_to(RectF::square(100.0), 45.0, 0.0);
        let points = points(&path.to_path());

        assert!(!points.is_empty());
        assert!(points.iter().all(|p| (p.x - points[0].x).abs() < 1e-3 && (p.y - points[0].y).abs() < 1e-3));
    }

    #[test]
    fn unusable_arcs_are_skipped() {
        let mut path = PathSpec::new();
        path.arc_to(RectF::square(f32::NAN), 0.0, 90.0)
            .arc_to(RectF::square(100.0), f32::INFINITY, 10.0)
            .arc_to(RectF::square(1e30), 0.0, 90.0)
            .close();

        assert!(path.to_path().ops.is_empty());
    }

    #[test]
    fn skipped_arcs_do_not_break_the_contour() {
        let mut path = PathSpec::new();
        path.arc_to(RectF::square(f32::NAN), 0.0, 90.0)
            .arc_to(RectF::square(100.0), 90.0, 90.0)
            .close();

        let raster = path.to_path();
        assert_eq!(move_count(&raster), 1);
        assert_near(points(&raster)[0], PointF::new(50.0, 100.0));
    }
}
