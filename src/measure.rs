use embedded_graphics::geometry::Size;

/// Sizing constraint the host places on one dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The dimension must be exactly this size.
    Exactly(u32),
    /// The dimension may be at most this size.
    AtMost(u32),
    /// No constraint.
    Unspecified,
}

impl MeasureSpec {
    /// Reconciles the size a widget would like with this constraint.
    pub fn resolve(self, desired: u32) -> u32 {
        match self {
            MeasureSpec::Exactly(size) => size,
            MeasureSpec::AtMost(size) => desired.min(size),
            MeasureSpec::Unspecified => desired,
        }
    }
}

/// Resolves the square the tracer occupies. The intrinsic size is
/// `2 * radius + 2 * padding`; a negative intrinsic size counts as zero.
pub fn measure(width: MeasureSpec, height: MeasureSpec, radius: i32, padding: u32) -> Size {
    let desired = (2 * i64::from(radius) + 2 * i64::from(padding)).clamp(0, i64::from(u32::MAX));
    let desired = desired as u32;

    let side = width.resolve(desired).min(height.resolve(desired));
    Size::new(side, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MeasureSpec::Exactly(300), 1000, 300)]
    #[case(MeasureSpec::Exactly(300), 10, 300)]
    #[case(MeasureSpec::AtMost(300), 1000, 300)]
    #[case(MeasureSpec::AtMost(300), 10, 10)]
    #[case(MeasureSpec::Unspecified, 1000, 1000)]
    fn resolves_like_a_layout_pass(
        #[case] spec: MeasureSpec,
        #[case] desired: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(spec.resolve(desired), expected);
    }

    #[rstest]
    #[case(MeasureSpec::AtMost(240), MeasureSpec::AtMost(320), 500, 0, 240)]
    #[case(MeasureSpec::Exactly(640), MeasureSpec::Exactly(480), 500, 0, 480)]
    #[case(MeasureSpec::Unspecified, MeasureSpec::Unspecified, 500, 0, 1000)]
    #[case(MeasureSpec::Unspecified, MeasureSpec::AtMost(2000), 100, 8, 216)]
    #[case(MeasureSpec::Exactly(50), MeasureSpec::Unspecified, 500, 0, 50)]
    #[case(MeasureSpec::Unspecified, MeasureSpec::Unspecified, -20, 0, 0)]
    #[case(MeasureSpec::Unspecified, MeasureSpec::Unspecified, -20, 30, 20)]
    #[case(MeasureSpec::Unspecified, MeasureSpec::Unspecified, i32::MAX, u32::MAX, u32::MAX)]
    fn result_is_always_square(
        #[case] width: MeasureSpec,
        #[case] height: MeasureSpec,
        #[case] radius: i32,
        #[case] padding: u32,
        #[case] expected: u32,
    ) {
        let size = measure(width, height, radius, padding);
        assert_eq!(size.width, size.height);
        assert_eq!(size.width, expected);
    }
}
