use anyhow::{Result, ensure};

use crate::entities::Piece;
use crate::geometry::Dims;

/// Pieces to be packed onto slabs of a single stock size.
#[derive(Debug, Clone)]
pub struct PackInstance {
    /// Dimensions of every slab of this stock
    pub slab_dims: Dims,
    /// Mandatory clearance between adjacent pieces, 0.0 disables it
    pub kerf: f64,
    pub pieces: Vec<Piece>,
}

impl PackInstance {
    /// Creates a new instance, verifying that every piece can be placed on an empty slab.
    pub fn try_new(slab_dims: Dims, kerf: f64, pieces: Vec<Piece>) -> Result<Self> {
        let slab_dims = Dims::try_new(slab_dims.width, slab_dims.height)?;
        ensure!(
            kerf.is_finite() && kerf >= 0.0,
            "kerf should be a non-negative number, got {kerf}"
        );
        for piece in &pieces {
            ensure!(
                Dims::try_new(piece.dims.width, piece.dims.height).is_ok(),
                "piece {} has invalid dimensions: {}",
                piece.id,
                piece.dims
            );
            ensure!(
                piece.dims.fits_within_any_orientation(slab_dims),
                "piece {} ({}) does not fit on a {} slab in any orientation",
                piece.id,
                piece.dims,
                slab_dims
            );
        }

        Ok(Self {
            slab_dims,
            kerf,
            pieces,
        })
    }

    pub fn n_pieces(&self) -> usize {
        self.pieces.len()
    }

    /// Sum of the areas of all pieces
    pub fn piece_area(&self) -> f64 {
        self.pieces.iter().map(|p| p.area()).sum()
    }

    /// Lower bound on the number of slabs required, based on area alone
    pub fn area_lower_bound(&self) -> usize {
        (self.piece_area() / self.slab_dims.area()).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PieceId;

    #[test]
    fn unfittable_piece_is_rejected() {
        let slab = Dims::new(126.0, 63.0);
        let pieces = vec![Piece::new(PieceId::new(0, 0), Dims::new(200.0, 200.0))];
        let err = PackInstance::try_new(slab, 0.0, pieces).unwrap_err();
        assert!(err.to_string().contains("does not fit"));
    }

    #[test]
    fn piece_fitting_only_rotated_is_accepted() {
        let slab = Dims::new(126.0, 63.0);
        let pieces = vec![Piece::new(PieceId::new(0, 0), Dims::new(30.0, 72.0))];
        assert!(PackInstance::try_new(slab, 0.125, pieces).is_ok());
    }

    #[test]
    fn negative_kerf_is_rejected() {
        assert!(PackInstance::try_new(Dims::new(126.0, 63.0), -0.1, vec![]).is_err());
        assert!(PackInstance::try_new(Dims::new(0.0, 63.0), 0.0, vec![]).is_err());
    }

    #[test]
    fn area_lower_bound_rounds_up() {
        let pieces = (0..3)
            .map(|i| Piece::new(PieceId::new(0, i), Dims::new(50.0, 50.0)))
            .collect();
        let instance = PackInstance::try_new(Dims::new(100.0, 50.0), 0.0, pieces).unwrap();
        assert_eq!(instance.area_lower_bound(), 2);
        assert_eq!(instance.n_pieces(), 3);
    }
}
