use serde::{Deserialize, Serialize};

/// A quoting job: products to be cut and the stocks they are cut from.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtJob {
    /// The name of the job
    pub name: String,
    /// Products in the order they were entered, their position is their product index
    pub products: Vec<ExtProduct>,
    /// Stock materials that products can refer to
    pub stocks: Vec<ExtStock>,
}

/// External representation of a product: `quantity` identical rectangular pieces cut from one stock.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtProduct {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
    /// Width of a piece in inches
    pub width: f64,
    /// Depth of a piece in inches
    pub depth: f64,
    /// Number of pieces, one if not specified
    #[serde(default = "default_quantity")]
    pub quantity: u64,
    /// Placement priority label ("high", "normal" or "low"), normal if not specified or not recognized
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub edge_detail: Option<String>,
    /// Identifier of the [`ExtStock`] the product is cut from
    pub stock: String,
}

fn default_quantity() -> u64 {
    1
}

/// External representation of a stock material, all slabs of a stock share the same size.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtStock {
    /// Unique identifier of the stock
    pub id: String,
    /// Width of a slab in inches
    pub width: f64,
    /// Height of a slab in inches
    pub height: f64,
    /// Price of a single slab
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slab_cost: Option<f64>,
}

/// External representation of a [`Placement`](crate::entities::Placement).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacement {
    pub product_idx: usize,
    pub copy_idx: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
    /// Placement priority label of the originating product
    pub priority: String,
    /// Top-left corner of the footprint
    pub x: f64,
    pub y: f64,
    /// Width of the footprint, after rotation
    pub width: f64,
    /// Height of the footprint, after rotation
    pub height: f64,
    pub rotated: bool,
}

/// External representation of a [`Slab`](crate::entities::Slab).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSlab {
    pub index: usize,
    /// Percentage of the slab area covered by pieces
    pub efficiency: f64,
    pub placements: Vec<ExtPlacement>,
}

/// External representation of a [`PackingResult`](crate::entities::PackingResult).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPackingResult {
    pub slab_width: f64,
    pub slab_height: f64,
    pub kerf: f64,
    pub total_slabs: usize,
    pub average_efficiency: f64,
    pub slabs: Vec<ExtSlab>,
}
