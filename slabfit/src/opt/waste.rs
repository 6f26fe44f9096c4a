use ordered_float::NotNan;

use slabpack::geometry::{Dims, Rect};

use crate::config::SlabFitConfig;

/// The waste score the packer assigns to a candidate placement, lower is better.
/// Every leftover strip to the right of or below the footprint that is too narrow to be useful is penalized,
/// the distance from the slab's origin (x + y) breaks ties in favour of compact layouts.
#[derive(PartialEq, PartialOrd, Copy, Clone, Debug, Eq, Ord)]
pub struct WasteScore(NotNan<f64>);

impl WasteScore {
    pub fn new(footprint: &Rect, slab: Dims, config: &SlabFitConfig) -> Self {
        let right_strip = slab.width - footprint.x_max;
        let bottom_strip = slab.height - footprint.y_max;

        let penalty = |strip: f64| match strip > 0.0 && strip < config.min_useful_strip {
            true => config.narrow_strip_penalty,
            false => 0.0,
        };

        let score = penalty(right_strip) + penalty(bottom_strip) + footprint.x_min + footprint.y_min;
        WasteScore(NotNan::new(score).expect("waste score is NaN"))
    }

    pub fn value(&self) -> f64 {
        self.0.into_inner()
    }
}
