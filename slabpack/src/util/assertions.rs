use itertools::Itertools;
use log::error;

use crate::entities::{PackInstance, PackingResult, PieceId, Slab};
use crate::geometry::Rect;

//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks and tests

/// Every placement lies entirely within the bounds of its slab.
pub fn placements_within_slab(slab: &Slab) -> bool {
    let bbox = slab.bbox();
    slab.placements.iter().all(|p| {
        let inside = bbox.almost_contains(&p.footprint());
        if !inside {
            error!(
                "piece {} at ({}, {}) exceeds slab {} bounds {}",
                p.piece.id, p.x, p.y, slab.idx, slab.dims
            );
        }
        inside
    })
}

/// No two placements on the slab come closer to each other than `kerf`.
pub fn placements_separated(slab: &Slab, kerf: f64) -> bool {
    slab.placements
        .iter()
        .tuple_combinations()
        .all(|(a, b)| {
            let separated = a.footprint().almost_separated_from(&b.footprint(), kerf);
            if !separated {
                error!(
                    "pieces {} and {} on slab {} are within kerf {kerf}, overlap: {:?}",
                    a.piece.id,
                    b.piece.id,
                    slab.idx,
                    Rect::intersection(a.footprint(), b.footprint())
                );
            }
            separated
        })
}

/// Every placement refers to the slab it is stored in.
pub fn slab_indices_consistent(result: &PackingResult) -> bool {
    result.slabs.iter().enumerate().all(|(i, slab)| {
        slab.idx == i && slab.placements.iter().all(|p| p.slab_idx == i)
    })
}

/// The placed pieces are exactly the pieces of the instance: none lost, none duplicated.
pub fn all_pieces_placed_once(instance: &PackInstance, result: &PackingResult) -> bool {
    let expected = instance.pieces.iter().map(|p| p.id).sorted().collect_vec();
    let placed: Vec<PieceId> = result.placements().map(|p| p.piece.id).sorted().collect_vec();
    if expected != placed {
        error!(
            "placed pieces do not match the instance: {} expected, {} placed",
            expected.len(),
            placed.len()
        );
        return false;
    }
    true
}

/// All invariants of a [`PackingResult`] with respect to the instance it was generated from.
pub fn result_is_valid(instance: &PackInstance, result: &PackingResult) -> bool {
    result.slab_dims == instance.slab_dims
        && slab_indices_consistent(result)
        && result.slabs.iter().all(|s| s.dims == instance.slab_dims)
        && result.slabs.iter().all(placements_within_slab)
        && result
            .slabs
            .iter()
            .all(|s| placements_separated(s, instance.kerf))
        && result.slabs.iter().all(|s| !s.is_empty())
        && all_pieces_placed_once(instance, result)
}
