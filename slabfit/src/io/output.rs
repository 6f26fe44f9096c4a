use serde::{Deserialize, Serialize};

use slabpack::io::export::export_result;
use slabpack::io::ext_repr::{ExtJob, ExtPackingResult};

use crate::config::SlabFitConfig;
use crate::quote::{GroupQuote, ProductAllocation, UniformEstimate};

#[derive(Serialize, Deserialize, Clone)]
pub struct UniformOutput {
    #[serde(flatten)]
    pub job: ExtJob,
    pub estimates: Vec<ExtEstimate>,
    pub config: SlabFitConfig,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct CombinedOutput {
    #[serde(flatten)]
    pub job: ExtJob,
    pub groups: Vec<ExtGroupQuote>,
    pub config: SlabFitConfig,
}

/// Estimate of a single product, or the reason it could not be made
#[derive(Serialize, Deserialize, Clone)]
pub struct ExtEstimate {
    pub product_idx: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub estimate: Option<UniformEstimate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// Packing of all products of a stock, or the reason it could not be made
#[derive(Serialize, Deserialize, Clone)]
pub struct ExtGroupQuote {
    pub stock: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<ExtPackingResult>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub allocations: Vec<ProductAllocation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ExtEstimate {
    pub fn new(product_idx: usize, estimate: &anyhow::Result<UniformEstimate>) -> Self {
        match estimate {
            Ok(e) => ExtEstimate {
                product_idx,
                estimate: Some(e.clone()),
                error: None,
            },
            Err(e) => ExtEstimate {
                product_idx,
                estimate: None,
                error: Some(format!("{e:#}")),
            },
        }
    }
}

impl ExtGroupQuote {
    pub fn new(stock: &str, quote: &anyhow::Result<GroupQuote>) -> Self {
        match quote {
            Ok(q) => ExtGroupQuote {
                stock: stock.to_owned(),
                result: Some(export_result(&q.result)),
                allocations: q.allocations.clone(),
                error: None,
            },
            Err(e) => ExtGroupQuote {
                stock: stock.to_owned(),
                result: None,
                allocations: vec![],
                error: Some(format!("{e:#}")),
            },
        }
    }
}
