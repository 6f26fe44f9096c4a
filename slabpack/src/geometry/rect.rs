use crate::geometry::Dims;
use crate::util::FPA;

///Axis-aligned rectangle, y grows downwards from the top-left corner of a slab
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    /// Rectangle with its top-left corner at (`x`, `y`) and the given dimensions.
    pub fn from_origin(x: f64, y: f64, dims: Dims) -> Self {
        Rect {
            x_min: x,
            y_min: y,
            x_max: x + dims.width,
            y_max: y + dims.height,
        }
    }

    /// Rectangle spanning [0, width] x [0, height].
    pub fn from_dims(dims: Dims) -> Self {
        Rect::from_origin(0.0, 0.0, dims)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn dims(&self) -> Dims {
        Dims::new(self.width(), self.height())
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True if `other` lies entirely within `self`. Touching edges count as inside.
    pub fn contains(&self, other: &Rect) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
    }

    /// Same as [`Rect::contains`], but tolerant to floating point noise.
    pub fn almost_contains(&self, other: &Rect) -> bool {
        FPA(self.x_min) <= FPA(other.x_min)
            && FPA(self.y_min) <= FPA(other.y_min)
            && FPA(self.x_max) >= FPA(other.x_max)
            && FPA(self.y_max) >= FPA(other.y_max)
    }

    /// True if `self` and `other` keep at least `clearance` between each other,
    /// either along the x-axis or along the y-axis.
    /// With a clearance of zero, rectangles sharing an edge are separated.
    #[inline(always)]
    pub fn is_separated_from(&self, other: &Rect, clearance: f64) -> bool {
        self.x_max + clearance <= other.x_min
            || self.x_min >= other.x_max + clearance
            || self.y_max + clearance <= other.y_min
            || self.y_min >= other.y_max + clearance
    }

    /// Same as [`Rect::is_separated_from`], but tolerant to floating point noise.
    pub fn almost_separated_from(&self, other: &Rect, clearance: f64) -> bool {
        FPA(self.x_max + clearance) <= FPA(other.x_min)
            || FPA(self.x_min) >= FPA(other.x_max + clearance)
            || FPA(self.y_max + clearance) <= FPA(other.y_min)
            || FPA(self.y_min) >= FPA(other.y_max + clearance)
    }

    /// Returns the largest rectangle that is contained in both `a` and `b`.
    pub fn intersection(a: Rect, b: Rect) -> Option<Rect> {
        let x_min = f64::max(a.x_min, b.x_min);
        let y_min = f64::max(a.y_min, b.y_min);
        let x_max = f64::min(a.x_max, b.x_max);
        let y_max = f64::min(a.y_max, b.y_max);
        if x_min < x_max && y_min < y_max {
            Some(Rect {
                x_min,
                y_min,
                x_max,
                y_max,
            })
        } else {
            None
        }
    }

    /// Returns a new rectangle expanded by `dx` in both x-directions and by `dy` in both y-directions.
    /// If the new rectangle is invalid (x_min >= x_max or y_min >= y_max), returns None.
    pub fn resize_by(mut self, dx: f64, dy: f64) -> Option<Self> {
        self.x_min -= dx;
        self.y_min -= dy;
        self.x_max += dx;
        self.y_max += dy;

        if self.x_min < self.x_max && self.y_min < self.y_max {
            Some(self)
        } else {
            //resizing would lead to invalid rectangle
            None
        }
    }
}
