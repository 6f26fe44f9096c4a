//! Capacity of a slab for a single piece size.
//!
//! Every [`ShelfStrategy`] tiles the slab with shelves (rows or columns) of identical pieces and
//! reports how many pieces it managed to fit. The capacity is the best count over all strategies,
//! evaluated for both ways the slab can be loaded. This does not guarantee the geometric optimum,
//! but it is deterministic and its cost only depends on the slab/piece size ratio.

use slabpack::geometry::Dims;

/// Shelf-based ways of tiling a slab with copies of one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShelfStrategy {
    /// Whole slab tiled with pieces in their natural orientation
    UniformNatural,
    /// Whole slab tiled with rotated pieces
    UniformRotated,
    /// Rows of natural pieces from the top, remaining height filled with rows of rotated pieces
    RowsNaturalFirst,
    /// Rows of rotated pieces from the top, remaining height filled with rows of natural pieces
    RowsRotatedFirst,
    /// Columns of natural pieces from the left, remaining width filled with columns of rotated pieces
    ColumnsNaturalFirst,
    /// Columns of rotated pieces from the left, remaining width filled with columns of natural pieces
    ColumnsRotatedFirst,
}

impl ShelfStrategy {
    pub const ALL: [ShelfStrategy; 6] = [
        ShelfStrategy::UniformNatural,
        ShelfStrategy::UniformRotated,
        ShelfStrategy::RowsNaturalFirst,
        ShelfStrategy::RowsRotatedFirst,
        ShelfStrategy::ColumnsNaturalFirst,
        ShelfStrategy::ColumnsRotatedFirst,
    ];

    /// Number of `piece`s this strategy fits on a `slab` loaded exactly as given.
    pub fn count(self, piece: Dims, slab: Dims, kerf: f64) -> usize {
        let natural = piece;
        let rotated = piece.rotated();
        match self {
            ShelfStrategy::UniformNatural => grid(natural, slab, kerf),
            ShelfStrategy::UniformRotated => grid(rotated, slab, kerf),
            ShelfStrategy::RowsNaturalFirst => best_row_split(natural, rotated, slab, kerf),
            ShelfStrategy::RowsRotatedFirst => best_row_split(rotated, natural, slab, kerf),
            // columns are rows on the transposed slab
            ShelfStrategy::ColumnsNaturalFirst => {
                best_row_split(natural.rotated(), rotated.rotated(), slab.rotated(), kerf)
            }
            ShelfStrategy::ColumnsRotatedFirst => {
                best_row_split(rotated.rotated(), natural.rotated(), slab.rotated(), kerf)
            }
        }
    }
}

/// The best strategy found for a piece/slab pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapacityReport {
    /// Maximum number of pieces per slab
    pub capacity: usize,
    pub strategy: ShelfStrategy,
    /// True if the winning layout loads the slab with its width and height swapped
    pub slab_rotated: bool,
}

/// Maximum number of `piece_w` x `piece_h` pieces that fit on one `slab_w` x `slab_h` slab,
/// keeping `kerf` between adjacent pieces.
/// Returns 0 if the piece does not fit the slab in any orientation.
pub fn max_pieces_per_slab(piece_w: f64, piece_h: f64, slab_w: f64, slab_h: f64, kerf: f64) -> usize {
    best_strategy(Dims::new(piece_w, piece_h), Dims::new(slab_w, slab_h), kerf).capacity
}

/// Evaluates all strategies against both slab orientations and returns the best one.
/// Ties are resolved in favour of the first strategy in [`ShelfStrategy::ALL`], slab as given first.
pub fn best_strategy(piece: Dims, slab: Dims, kerf: f64) -> CapacityReport {
    let mut best = CapacityReport {
        capacity: 0,
        strategy: ShelfStrategy::UniformNatural,
        slab_rotated: false,
    };
    for slab_rotated in [false, true] {
        let oriented_slab = match slab_rotated {
            true => slab.rotated(),
            false => slab,
        };
        for strategy in ShelfStrategy::ALL {
            let capacity = strategy.count(piece, oriented_slab, kerf);
            if capacity > best.capacity {
                best = CapacityReport {
                    capacity,
                    strategy,
                    slab_rotated,
                };
            }
        }
    }
    best
}

/// Number of slabs needed for `quantity` pieces at `capacity` pieces per slab.
/// None if no piece fits on a slab.
pub fn slabs_needed(quantity: usize, capacity: usize) -> Option<usize> {
    match capacity {
        0 => None,
        _ => Some(quantity.div_ceil(capacity)),
    }
}

/// Number of pieces of length `piece_len` that fit along `length`, with `kerf` between each pair.
fn fit(length: f64, piece_len: f64, kerf: f64) -> usize {
    if length < piece_len {
        return 0;
    }
    ((length + kerf) / (piece_len + kerf)).floor() as usize
}

/// Length occupied by `n` consecutive pieces of length `piece_len`.
fn span(n: usize, piece_len: f64, kerf: f64) -> f64 {
    match n {
        0 => 0.0,
        _ => n as f64 * piece_len + (n - 1) as f64 * kerf,
    }
}

/// Whole slab tiled with `piece` in a single orientation.
fn grid(piece: Dims, slab: Dims, kerf: f64) -> usize {
    fit(slab.width, piece.width, kerf) * fit(slab.height, piece.height, kerf)
}

/// Sweeps the number of `first` rows from the top of the slab, filling the remaining height with `fill` rows.
fn best_row_split(first: Dims, fill: Dims, slab: Dims, kerf: f64) -> usize {
    let first_per_row = fit(slab.width, first.width, kerf);
    let fill_per_row = fit(slab.width, fill.width, kerf);
    let max_first_rows = fit(slab.height, first.height, kerf);

    (0..=max_first_rows)
        .map(|n_rows| {
            let used = match n_rows {
                0 => 0.0,
                // a cut separates both blocks
                _ => span(n_rows, first.height, kerf) + kerf,
            };
            let fill_rows = fit(slab.height - used, fill.height, kerf);
            n_rows * first_per_row + fill_rows * fill_per_row
        })
        .max()
        .unwrap_or(0)
}
