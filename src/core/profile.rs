//! Rounded-rectangle outline of the card, centred on the origin.
//!
//! Corners are single-control-point quadratic curves whose control point is the corner
//! of the unrounded rectangle, so each curve leaves one edge tangentially and enters the
//! next. The segment order is fixed: preview and manifest must describe the same shape.

use crate::domain::model::{clamp_fillet_radius, Point2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line {
        from: Point2,
        to: Point2,
    },
    Quadratic {
        from: Point2,
        control: Point2,
        to: Point2,
    },
}

impl Segment {
    pub fn start(&self) -> Point2 {
        match *self {
            Segment::Line { from, .. } | Segment::Quadratic { from, .. } => from,
        }
    }

    pub fn end(&self) -> Point2 {
        match *self {
            Segment::Line { to, .. } | Segment::Quadratic { to, .. } => to,
        }
    }

    pub fn is_curve(&self) -> bool {
        matches!(self, Segment::Quadratic { .. })
    }

    pub fn point_at(&self, t: f64) -> Point2 {
        match *self {
            Segment::Line { from, to } => Point2::new(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            ),
            Segment::Quadratic { from, control, to } => {
                let u = 1.0 - t;
                Point2::new(
                    u * u * from.x + 2.0 * u * t * control.x + t * t * to.x,
                    u * u * from.y + 2.0 * u * t * control.y + t * t * to.y,
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub width: f64,
    pub height: f64,
    /// Radius after clamping.
    pub radius: f64,
    pub segments: Vec<Segment>,
}

impl Profile {
    pub fn is_closed(&self) -> bool {
        let connected = self
            .segments
            .windows(2)
            .all(|pair| pair[0].end() == pair[1].start());
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => connected && last.end() == first.start(),
            _ => false,
        }
    }

    /// Sample the outline as a closed polyline (first point not repeated). Every
    /// segment contributes its start point; curves add `curve_segments - 1` interior
    /// samples.
    pub fn flatten(&self, curve_segments: usize) -> Vec<Point2> {
        let steps = curve_segments.max(1);
        let mut points = Vec::new();
        for segment in &self.segments {
            points.push(segment.start());
            if segment.is_curve() {
                points.extend((1..steps).map(|i| segment.point_at(i as f64 / steps as f64)));
            }
        }
        points.dedup();
        points
    }
}

pub struct ProfileBuilder;

impl ProfileBuilder {
    pub fn build(width: f64, height: f64, radius: f64) -> Profile {
        let r = clamp_fillet_radius(radius, width, height);
        let x = -width / 2.0;
        let y = -height / 2.0;
        let p = Point2::new;

        let segments = if r <= 0.0 {
            let corners = [
                p(x, y),
                p(x + width, y),
                p(x + width, y + height),
                p(x, y + height),
            ];
            (0..4)
                .map(|i| Segment::Line {
                    from: corners[i],
                    to: corners[(i + 1) % 4],
                })
                .collect()
        } else {
            let (right, top) = (x + width, y + height);
            vec![
                Segment::Line {
                    from: p(x + r, y),
                    to: p(right - r, y),
                },
                Segment::Quadratic {
                    from: p(right - r, y),
                    control: p(right, y),
                    to: p(right, y + r),
                },
                Segment::Line {
                    from: p(right, y + r),
                    to: p(right, top - r),
                },
                Segment::Quadratic {
                    from: p(right, top - r),
                    control: p(right, top),
                    to: p(right - r, top),
                },
                Segment::Line {
                    from: p(right - r, top),
                    to: p(x + r, top),
                },
                Segment::Quadratic {
                    from: p(x + r, top),
                    control: p(x, top),
                    to: p(x, top - r),
                },
                Segment::Line {
                    from: p(x, top - r),
                    to: p(x, y + r),
                },
                Segment::Quadratic {
                    from: p(x, y + r),
                    control: p(x, y),
                    to: p(x + r, y),
                },
            ]
        };

        tracing::trace!(width, height, radius = r, segments = segments.len(), "built card profile");

        Profile {
            width,
            height,
            radius: r,
            segments,
        }
    }
}
