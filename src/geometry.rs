//! Pure ring geometry: bounding ovals, cap positions and the progress
//! division angle.
//!
//! Angles are in degrees. 0° points along +x and angles grow clockwise on
//! screen, because y grows downwards.

/// A point in surface coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis aligned rectangle, used as the bounding box of an oval.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// `[0, 0, size, size]`
    pub const fn square(size: f32) -> Self {
        Self::new(0.0, 0.0, size, size)
    }

    /// Square of side `side` centered on `center`.
    pub fn centered(center: PointF, side: f32) -> Self {
        let half = side / 2.0;
        Self::new(
            center.x - half,
            center.y - half,
            center.x + half,
            center.y + half,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> PointF {
        PointF::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Shrinks the rectangle by `amount` on every side. A negative amount
    /// grows it. Nothing stops the result from inverting.
    #[must_use]
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    /// The point at `angle_deg` on the oval inscribed in this rectangle.
    pub fn point_at(&self, angle_deg: f32) -> PointF {
        let center = self.center();
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        PointF::new(
            center.x + self.width() / 2.0 * cos,
            center.y + self.height() / 2.0 * sin,
        )
    }
}

/// The two bounding boxes of the ring.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Ovals {
    /// Outer edge of the ring.
    pub outer: RectF,
    /// Inner edge of the ring, `outer` inset by the thickness.
    pub inner: RectF,
}

/// Computes the outer and inner ovals of a ring drawn into a `size` square.
pub fn layout(size: f32, thickness: f32) -> Ovals {
    let outer = RectF::square(size);
    Ovals {
        outer,
        inner: outer.inset(thickness),
    }
}

/// Offset from the ring center of the point at `angle_deg` on a circle of
/// `center_radius`.
pub fn cap_center_at(angle_deg: f32, center_radius: f32) -> PointF {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    PointF::new(center_radius * cos, center_radius * sin)
}

/// Bounding box of the rounded cap at `angle_deg` for a ring inscribed in
/// `outer`. The cap is a `thickness` wide square centered on the ring's
/// centerline.
pub fn cap_oval_in(outer: &RectF, thickness: f32, angle_deg: f32) -> RectF {
    let half = thickness / 2.0;
    let center = outer.center();
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let cap_center = PointF::new(
        center.x + (outer.width() / 2.0 - half) * cos,
        center.y + (outer.height() / 2.0 - half) * sin,
    );
    RectF::centered(cap_center, thickness)
}

/// Cap bounding box for a ring drawn into a `size` square.
pub fn cap_oval(size: f32, thickness: f32, angle_deg: f32) -> RectF {
    cap_oval_in(&RectF::square(size), thickness, angle_deg)
}

/// Angle swept by the progress part of an `arc_len_deg` ring.
///
/// Progress is clamped to `0..=100`; NaN counts as no progress.
pub fn division_angle(progress: f32, arc_len_deg: f32) -> f32 {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    };
    arc_len_deg * progress / 100.0
}
