use std::time::Instant;

use log::{debug, info};
use thousands::Separable;

use slabpack::entities::{PackInstance, PackingResult, Piece, Slab};
use slabpack::geometry::{Orientation, Rect};
use slabpack::util::assertions;

use crate::config::SlabFitConfig;
use crate::opt::search::{Candidate, placement_order, search};
use crate::opt::waste::WasteScore;

/// Greedy packer placing pieces one by one onto the first slab that admits them,
/// opening a new slab whenever none of the existing ones does.
pub struct SlabPacker<'a> {
    pub instance: &'a PackInstance,
    pub config: SlabFitConfig,
    slabs: Vec<Slab>,
    /// Number of (anchor, orientation) combinations evaluated
    pub eval_counter: usize,
}

impl<'a> SlabPacker<'a> {
    pub fn new(instance: &'a PackInstance, config: SlabFitConfig) -> Self {
        Self {
            instance,
            config,
            slabs: vec![],
            eval_counter: 0,
        }
    }

    pub fn solve(mut self) -> PackingResult {
        let start = Instant::now();
        let instance = self.instance;
        let n_pieces = instance.n_pieces();

        for (i, piece) in placement_order(&instance.pieces).into_iter().enumerate() {
            let (slab_idx, candidate) = match self.search_slabs(piece) {
                Some(found) => found,
                None => self.open_slab(piece),
            };
            let slab = &mut self.slabs[slab_idx];
            slab.place(piece.clone(), candidate.x, candidate.y, candidate.orientation);
            debug!(
                "[PACK] placing piece {}/{} ({}, {}) at ({:.3}, {:.3}){} on slab {}",
                i + 1,
                n_pieces,
                piece.id,
                piece.dims,
                candidate.x,
                candidate.y,
                if candidate.orientation.is_rotated() { " rotated" } else { "" },
                slab_idx
            );
        }

        let result = PackingResult::new(instance.slab_dims, instance.kerf, self.slabs);

        debug_assert!(assertions::result_is_valid(instance, &result));

        info!(
            "[PACK] packed {} pieces onto {} slabs in {:.3}ms ({} candidates evaluated)",
            result.n_placements(),
            result.total_slabs(),
            start.elapsed().as_secs_f64() * 1000.0,
            self.eval_counter.separate_with_commas()
        );
        info!(
            "[PACK] average slab efficiency {:.3}% (area lower bound: {} slabs)",
            result.average_efficiency(),
            instance.area_lower_bound()
        );

        result
    }

    /// Sequential search over the existing slabs until one admits the piece
    fn search_slabs(&mut self, piece: &Piece) -> Option<(usize, Candidate)> {
        let kerf = self.instance.kerf;
        for slab in self.slabs.iter() {
            if let Some(candidate) = search(slab, piece, kerf, &self.config, &mut self.eval_counter) {
                return Some((slab.idx, candidate));
            }
        }
        None
    }

    /// Opens a new slab for the piece, which goes to its origin.
    /// The piece is only rotated if it does not fit the slab as specified.
    fn open_slab(&mut self, piece: &Piece) -> (usize, Candidate) {
        let slab = Slab::new(self.slabs.len(), self.instance.slab_dims);
        let orientation = match piece.dims.fits_within(slab.dims) {
            true => Orientation::Natural,
            false => Orientation::Rotated,
        };
        let footprint = Rect::from_origin(0.0, 0.0, piece.dims.oriented(orientation));
        debug_assert!(slab.admits(&footprint, self.instance.kerf));
        let candidate = Candidate {
            x: 0.0,
            y: 0.0,
            orientation,
            waste: WasteScore::new(&footprint, slab.dims, &self.config),
        };
        self.eval_counter += 1;
        debug!("[PACK] opening slab {} for piece {}", slab.idx, piece.id);
        self.slabs.push(slab);
        (self.slabs.len() - 1, candidate)
    }
}

/// Packs all pieces of the instance onto as few slabs as the greedy heuristic manages.
/// Pure with respect to its inputs: the same instance and config always yield the same result.
pub fn pack_pieces(instance: &PackInstance, config: &SlabFitConfig) -> PackingResult {
    SlabPacker::new(instance, *config).solve()
}
