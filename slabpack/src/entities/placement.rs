use crate::entities::Piece;
use crate::geometry::{Dims, Orientation, Rect};

/// A [`Piece`] bound to a slab at a specific position.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub piece: Piece,
    /// Index of the slab within its [`PackingResult`](crate::entities::PackingResult)
    pub slab_idx: usize,
    /// Offset of the top-left corner of the footprint within the slab
    pub x: f64,
    pub y: f64,
    /// If true, the footprint is (depth, width) instead of (width, depth)
    pub rotated: bool,
}

impl Placement {
    pub fn new(piece: Piece, slab_idx: usize, x: f64, y: f64, orientation: Orientation) -> Self {
        Placement {
            piece,
            slab_idx,
            x,
            y,
            rotated: orientation.is_rotated(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        match self.rotated {
            true => Orientation::Rotated,
            false => Orientation::Natural,
        }
    }

    /// Dimensions of the piece as it lies on the slab
    pub fn footprint_dims(&self) -> Dims {
        self.piece.dims.oriented(self.orientation())
    }

    /// Area the piece occupies on the slab
    pub fn footprint(&self) -> Rect {
        Rect::from_origin(self.x, self.y, self.footprint_dims())
    }

    pub fn area(&self) -> f64 {
        self.footprint_dims().area()
    }
}
