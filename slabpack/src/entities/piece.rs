use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::geometry::Dims;

/// One rectangular cut required by an order.
/// A product with a quantity of `n` is materialized into `n` pieces.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub id: PieceId,
    /// Nominal (width, depth) before any rotation
    pub dims: Dims,
    pub label: Option<String>,
    pub edge_detail: Option<String>,
    /// Only used to order the pieces before placement
    pub priority: Priority,
}

impl Piece {
    pub fn new(id: PieceId, dims: Dims) -> Self {
        Piece {
            id,
            dims,
            label: None,
            edge_detail: None,
            priority: Priority::Normal,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_edge_detail(mut self, edge_detail: impl Into<String>) -> Self {
        self.edge_detail = Some(edge_detail.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn area(&self) -> f64 {
        self.dims.area()
    }

    /// Label to show in layouts and logs, falls back on the product index.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => format!("{label} #{}", self.id.copy_idx + 1),
            None => format!("Type {} #{}", self.id.product_idx + 1, self.id.copy_idx + 1),
        }
    }
}

/// Identifies a piece by the product it originates from and its copy index within that product's quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId {
    pub product_idx: usize,
    pub copy_idx: usize,
}

impl PieceId {
    pub fn new(product_idx: usize, copy_idx: usize) -> Self {
        PieceId {
            product_idx,
            copy_idx,
        }
    }
}

impl Display for PieceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.product_idx, self.copy_idx)
    }
}

/// Placement priority of a piece, `High` pieces are placed first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }

    /// Parses a priority label, anything unrecognized is treated as [`Priority::Normal`].
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "normal" => Ok(Priority::Normal),
            "low" => Ok(Priority::Low),
            _ => Err(anyhow::anyhow!("unknown priority: {s}")),
        }
    }
}
