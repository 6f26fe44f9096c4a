use crate::entities::{Piece, Placement};
use crate::geometry::{Dims, Orientation, Rect};

/// A stock sheet and the pieces placed on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Slab {
    /// Position of the slab within its run
    pub idx: usize,
    pub dims: Dims,
    /// Placements in the order they were made
    pub placements: Vec<Placement>,
}

impl Slab {
    pub fn new(idx: usize, dims: Dims) -> Self {
        Slab {
            idx,
            dims,
            placements: vec![],
        }
    }

    pub fn bbox(&self) -> Rect {
        Rect::from_dims(self.dims)
    }

    /// True if a piece with `footprint` lies within the slab and keeps at least `kerf` away from every placed piece.
    pub fn admits(&self, footprint: &Rect, kerf: f64) -> bool {
        self.bbox().contains(footprint)
            && self
                .placements
                .iter()
                .all(|p| footprint.is_separated_from(&p.footprint(), kerf))
    }

    /// Places a piece on the slab. Feasibility is the caller's concern, see [`Slab::admits`].
    pub fn place(&mut self, piece: Piece, x: f64, y: f64, orientation: Orientation) -> &Placement {
        let placement = Placement::new(piece, self.idx, x, y, orientation);
        self.placements.push(placement);
        self.placements.last().expect("placement was just pushed")
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn area(&self) -> f64 {
        self.dims.area()
    }

    /// Sum of the footprint areas of all placed pieces
    pub fn used_area(&self) -> f64 {
        self.placements.iter().map(|p| p.area()).sum()
    }

    /// Percentage of the slab covered by pieces
    pub fn efficiency(&self) -> f64 {
        self.used_area() / self.area() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PieceId;
    use float_cmp::approx_eq;

    fn piece(product_idx: usize, w: f64, h: f64) -> Piece {
        Piece::new(PieceId::new(product_idx, 0), Dims::new(w, h))
    }

    #[test]
    fn admits_respects_bounds_and_kerf() {
        let mut slab = Slab::new(0, Dims::new(126.0, 63.0));
        slab.place(piece(0, 24.0, 36.0), 0.0, 0.0, Orientation::Natural);

        let next_to = Rect::from_origin(24.0, 0.0, Dims::new(24.0, 36.0));
        assert!(slab.admits(&next_to, 0.0));
        assert!(!slab.admits(&next_to, 0.125));

        let with_gap = Rect::from_origin(24.125, 0.0, Dims::new(24.0, 36.0));
        assert!(slab.admits(&with_gap, 0.125));

        let sticking_out = Rect::from_origin(110.0, 0.0, Dims::new(24.0, 36.0));
        assert!(!slab.admits(&sticking_out, 0.0));
    }

    #[test]
    fn efficiency_uses_rotated_footprints() {
        let mut slab = Slab::new(0, Dims::new(100.0, 50.0));
        let p = slab.place(piece(0, 10.0, 50.0), 0.0, 0.0, Orientation::Rotated);
        assert_eq!(p.footprint_dims(), Dims::new(50.0, 10.0));
        assert!(p.rotated);
        slab.place(piece(1, 25.0, 20.0), 0.0, 10.0, Orientation::Natural);
        assert!(approx_eq!(f64, slab.used_area(), 1000.0));
        assert!(approx_eq!(f64, slab.efficiency(), 20.0));
    }
}
