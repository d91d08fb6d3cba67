/// A position or extent on the screen grid, in cells.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vec2u {
    pub x: usize,
    pub y: usize,
}

impl Vec2u {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn saturating_area(&self) -> usize {
        self.x.saturating_mul(self.y)
    }
}

/// A rectangular region of the screen grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds2u {
    pub pos: Vec2u,
    pub size: Vec2u,
}

impl Bounds2u {
    pub const ZERO: Self = Self {
        pos: Vec2u::ZERO,
        size: Vec2u::ZERO,
    };

    pub fn is_empty(&self) -> bool {
        self.size.saturating_area() == 0
    }
}

pub trait ToU16Clamp
where
    Self: TryInto<u16>,
{
    /// This is used to get rid of the `clippy::cast_possible_truncation`
    /// lint error, as `Self` may have more bits than `u16`. When that happens,
    /// then we clamp the value to `u16::MAX`
    fn to_u16_clamp(self) -> u16 {
        self.try_into().unwrap_or(u16::MAX)
    }
}

impl ToU16Clamp for u64 {}
impl ToU16Clamp for usize {}

/// Clamp `value` into `0..=max`, where a signed `delta` is applied to
/// `origin` first. Used for cursor arithmetic, where requests of any
/// magnitude must land inside the valid range.
pub fn offset_clamp(origin: usize, delta: isize, max: usize) -> usize {
    let moved = if delta.is_negative() {
        origin.saturating_sub(delta.unsigned_abs())
    } else {
        origin.saturating_add(delta.unsigned_abs())
    };

    moved.min(max)
}
