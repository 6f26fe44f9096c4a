use serde::{Deserialize, Serialize};

use slabpack::io::svg::SvgDrawOptions;

/// Configuration for capacity calculation, packing and quoting
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SlabFitConfig {
    /// Width of the saw blade in inches
    pub kerf_width: f64,
    /// If false, pieces may be placed edge-to-edge regardless of `kerf_width`
    pub include_kerf: bool,
    /// Leftover strips narrower than this (in inches) are considered waste by the packer
    pub min_useful_strip: f64,
    /// Waste score added for every leftover strip narrower than `min_useful_strip`
    pub narrow_strip_penalty: f64,
    /// Percentage added to the material cost of uniform estimates
    #[serde(default = "default_buffer")]
    pub material_buffer: f64,
    /// Percentage added to the material cost of combined packings to cover breakage
    pub breakage_buffer: f64,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

fn default_buffer() -> f64 {
    10.0
}

impl SlabFitConfig {
    /// The clearance to keep between adjacent pieces
    pub fn kerf(&self) -> f64 {
        match self.include_kerf {
            true => self.kerf_width,
            false => 0.0,
        }
    }

    pub fn without_kerf(self) -> Self {
        Self {
            include_kerf: false,
            ..self
        }
    }
}

impl Default for SlabFitConfig {
    fn default() -> Self {
        Self {
            kerf_width: 0.125,
            include_kerf: true,
            min_useful_strip: 12.0,
            narrow_strip_penalty: 100.0,
            material_buffer: default_buffer(),
            breakage_buffer: 10.0,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
