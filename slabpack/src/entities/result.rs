use std::collections::BTreeMap;

use crate::entities::{Placement, Slab};
use crate::geometry::Dims;

/// Outcome of a packing run: the slabs of one stock size, in creation order.
/// Slabs are never modified after the run that produced them has completed.
#[derive(Clone, Debug, PartialEq)]
pub struct PackingResult {
    pub slab_dims: Dims,
    pub kerf: f64,
    pub slabs: Vec<Slab>,
}

impl PackingResult {
    pub fn new(slab_dims: Dims, kerf: f64, slabs: Vec<Slab>) -> Self {
        PackingResult {
            slab_dims,
            kerf,
            slabs,
        }
    }

    pub fn empty(slab_dims: Dims, kerf: f64) -> Self {
        PackingResult::new(slab_dims, kerf, vec![])
    }

    /// Number of slabs holding at least one piece
    pub fn total_slabs(&self) -> usize {
        self.slabs.iter().filter(|s| !s.is_empty()).count()
    }

    /// Unweighted mean of the per-slab efficiencies, 0.0 if no slab is used
    pub fn average_efficiency(&self) -> f64 {
        let used = self.slabs.iter().filter(|s| !s.is_empty());
        match self.total_slabs() {
            0 => 0.0,
            n => used.map(|s| s.efficiency()).sum::<f64>() / n as f64,
        }
    }

    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.slabs.iter().flat_map(|s| s.placements.iter())
    }

    pub fn n_placements(&self) -> usize {
        self.slabs.iter().map(|s| s.placements.len()).sum()
    }

    /// Sum of the footprint areas of all placed pieces
    pub fn placed_area(&self) -> f64 {
        self.slabs.iter().map(|s| s.used_area()).sum()
    }

    /// Placed area and piece count for every originating product
    pub fn placed_area_by_product(&self) -> BTreeMap<usize, (f64, usize)> {
        let mut per_product = BTreeMap::new();
        for p in self.placements() {
            let entry = per_product.entry(p.piece.id.product_idx).or_insert((0.0, 0));
            entry.0 += p.area();
            entry.1 += 1;
        }
        per_product
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Piece, PieceId};
    use crate::geometry::Orientation;
    use float_cmp::approx_eq;

    #[test]
    fn empty_result_reports_zero_efficiency() {
        let result = PackingResult::empty(Dims::new(126.0, 63.0), 0.0);
        assert_eq!(result.total_slabs(), 0);
        assert_eq!(result.average_efficiency(), 0.0);
        assert!(result.placed_area_by_product().is_empty());
    }

    #[test]
    fn aggregates_over_slabs() {
        let dims = Dims::new(100.0, 100.0);
        let mut s0 = Slab::new(0, dims);
        s0.place(Piece::new(PieceId::new(0, 0), Dims::new(50.0, 100.0)), 0.0, 0.0, Orientation::Natural);
        s0.place(Piece::new(PieceId::new(1, 0), Dims::new(10.0, 10.0)), 50.0, 0.0, Orientation::Natural);
        let mut s1 = Slab::new(1, dims);
        s1.place(Piece::new(PieceId::new(0, 1), Dims::new(50.0, 100.0)), 0.0, 0.0, Orientation::Rotated);

        let result = PackingResult::new(dims, 0.0, vec![s0, s1]);
        assert_eq!(result.total_slabs(), 2);
        assert_eq!(result.n_placements(), 3);
        assert!(approx_eq!(f64, result.average_efficiency(), (51.0 + 50.0) / 2.0));

        let per_product = result.placed_area_by_product();
        assert_eq!(per_product[&0], (10_000.0, 2));
        assert_eq!(per_product[&1], (100.0, 1));
    }
}
