use std::cmp::Reverse;
use std::iter;

use itertools::Itertools;
use log::trace;
use ordered_float::NotNan;

use slabpack::entities::{Piece, Slab};
use slabpack::geometry::{Orientation, Rect};

use crate::config::SlabFitConfig;
use crate::opt::waste::WasteScore;

/// A feasible position for a piece on a slab.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub x: f64,
    pub y: f64,
    pub orientation: Orientation,
    pub waste: WasteScore,
}

/// Positions worth trying on a slab: its origin, and for every placed piece the points
/// directly to its right and directly below it, one kerf away.
pub fn anchors(slab: &Slab, kerf: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
    let neighbours = slab.placements.iter().flat_map(move |p| {
        let fp = p.footprint();
        [(fp.x_max + kerf, fp.y_min), (fp.x_min, fp.y_max + kerf)]
    });
    iter::once((0.0, 0.0)).chain(neighbours)
}

/// Search the slab for a valid placement of the piece, with minimal waste.
/// Among equally scored candidates, the first one generated wins.
pub fn search(
    slab: &Slab,
    piece: &Piece,
    kerf: f64,
    config: &SlabFitConfig,
    eval_counter: &mut usize,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for (x, y) in anchors(slab, kerf) {
        for &orientation in piece.dims.orientations() {
            *eval_counter += 1;
            let footprint = Rect::from_origin(x, y, piece.dims.oriented(orientation));
            if !slab.admits(&footprint, kerf) {
                continue;
            }
            let waste = WasteScore::new(&footprint, slab.dims, config);
            let improves = match &best {
                Some(b) => waste < b.waste,
                None => true,
            };
            if improves {
                trace!(
                    "[SEARCH] piece {} on slab {}: better candidate at ({x}, {y}) {orientation:?}, waste {:.3}",
                    piece.id,
                    slab.idx,
                    waste.value()
                );
                best = Some(Candidate {
                    x,
                    y,
                    orientation,
                    waste,
                });
            }
        }
    }

    best
}

/// Order in which pieces are placed: by priority first, larger pieces first within the same priority.
/// The order of the input is kept for pieces with equal priority and area.
pub fn placement_order(pieces: &[Piece]) -> Vec<&Piece> {
    pieces
        .iter()
        .sorted_by_key(|p| {
            let area = NotNan::new(p.area()).expect("piece area is NaN");
            (p.priority, Reverse(area))
        })
        .collect_vec()
}
