//! Slab requirements of the products of a job, either per product or combined per stock.

use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use slabpack::entities::PackingResult;
use slabpack::geometry::Dims;
use slabpack::io::ext_repr::{ExtJob, ExtProduct, ExtStock};
use slabpack::io::import;

use crate::capacity::{self, CapacityReport};
use crate::config::SlabFitConfig;
use crate::opt::packer::pack_pieces;

const SQ_INCHES_PER_SQ_FOOT: f64 = 144.0;

/// Slab requirements of a single product packed on its own slabs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UniformEstimate {
    pub product_idx: usize,
    pub slab_width: f64,
    pub slab_height: f64,
    /// Maximum number of pieces per slab
    pub pieces_per_slab: usize,
    pub slabs_needed: usize,
    /// Total piece area in square feet
    pub usable_area_sqft: f64,
    /// Piece area over the area of all slabs needed, as a percentage
    pub efficiency: f64,
    /// Cost of the slabs including the breakage buffer, if the stock has a slab cost
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub material_cost: Option<f64>,
}

/// Share of a combined packing run attributed to one originating product.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProductAllocation {
    pub product_idx: usize,
    pub n_pieces: usize,
    /// Footprint area of the product's pieces in square inches
    pub placed_area: f64,
    /// Placed area in square feet
    pub usable_area_sqft: f64,
    /// Fraction of all placed area belonging to this product
    pub area_ratio: f64,
    /// Fractional number of slabs attributed to this product
    pub effective_slabs: f64,
    /// Placed area over the area of the attributed slabs, as a percentage
    pub efficiency: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub material_cost: Option<f64>,
}

/// Products sharing a stock, packed together.
#[derive(Clone, Debug)]
pub struct GroupQuote {
    pub stock_id: String,
    pub result: PackingResult,
    pub allocations: Vec<ProductAllocation>,
}

/// Cost of `n_slabs` slabs, inflated by `buffer` percent
fn material_cost(slab_cost: Option<f64>, n_slabs: f64, buffer: f64) -> Option<f64> {
    slab_cost.map(|cost| cost * (1.0 + buffer / 100.0) * n_slabs)
}

fn find_stock<'a>(job: &'a ExtJob, stock_id: &str) -> Result<&'a ExtStock> {
    job.stocks
        .iter()
        .find(|s| s.id == stock_id)
        .ok_or_else(|| anyhow!("stock {stock_id} not found"))
}

/// Estimates the slabs needed for a product on its own, using the shelf capacity calculator.
pub fn estimate_uniform(
    product_idx: usize,
    product: &ExtProduct,
    stock: &ExtStock,
    config: &SlabFitConfig,
) -> Result<UniformEstimate> {
    let pieces = import::import_product(product_idx, product)?;
    let slab_dims = import::import_stock(stock)?;
    let piece_dims = Dims::new(product.width, product.depth);

    let CapacityReport {
        capacity,
        strategy,
        slab_rotated,
    } = capacity::best_strategy(piece_dims, slab_dims, config.kerf());

    let slabs_needed = capacity::slabs_needed(pieces.len(), capacity).with_context(|| {
        format!(
            "product {product_idx} ({piece_dims}) does not fit stock {} ({slab_dims})",
            stock.id
        )
    })?;

    info!(
        "[QUOTE] product {product_idx}: {capacity} pieces per slab ({strategy:?}{}), {slabs_needed} slabs for {} pieces",
        if slab_rotated { ", slab turned" } else { "" },
        pieces.len()
    );

    let used_area = pieces.iter().map(|p| p.area()).sum::<f64>();
    let efficiency = used_area / (slabs_needed as f64 * slab_dims.area()) * 100.0;

    Ok(UniformEstimate {
        product_idx,
        slab_width: slab_dims.width,
        slab_height: slab_dims.height,
        pieces_per_slab: capacity,
        slabs_needed,
        usable_area_sqft: used_area / SQ_INCHES_PER_SQ_FOOT,
        efficiency,
        material_cost: material_cost(stock.slab_cost, slabs_needed as f64, config.material_buffer),
    })
}

/// Estimates every product of the job on its own.
pub fn estimate_all_uniform(job: &ExtJob, config: &SlabFitConfig) -> Vec<Result<UniformEstimate>> {
    job.products
        .iter()
        .enumerate()
        .map(|(idx, product)| {
            let stock = find_stock(job, &product.stock)
                .with_context(|| format!("product {idx} refers to an unknown stock"))?;
            estimate_uniform(idx, product, stock, config)
        })
        .collect()
}

/// Indices of the products of each stock, stocks in order of first appearance.
pub fn group_by_stock(products: &[ExtProduct]) -> Vec<(String, Vec<usize>)> {
    let mut groups: Vec<(String, Vec<usize>)> = vec![];
    for (idx, product) in products.iter().enumerate() {
        match groups.iter_mut().find(|(stock, _)| *stock == product.stock) {
            Some((_, members)) => members.push(idx),
            None => groups.push((product.stock.clone(), vec![idx])),
        }
    }
    groups
}

/// Attributes the slabs of a packing run to the originating products, proportional to their placed area.
pub fn allocate(
    result: &PackingResult,
    slab_cost: Option<f64>,
    config: &SlabFitConfig,
) -> Vec<ProductAllocation> {
    let total_area = result.placed_area();
    let total_slabs = result.total_slabs() as f64;
    let slab_area = result.slab_dims.area();

    result
        .placed_area_by_product()
        .into_iter()
        .map(|(product_idx, (placed_area, n_pieces))| {
            let area_ratio = match total_area > 0.0 {
                true => placed_area / total_area,
                false => 0.0,
            };
            let effective_slabs = total_slabs * area_ratio;
            let efficiency = match effective_slabs > 0.0 {
                true => placed_area / (effective_slabs * slab_area) * 100.0,
                false => 0.0,
            };
            ProductAllocation {
                product_idx,
                n_pieces,
                placed_area,
                usable_area_sqft: placed_area / SQ_INCHES_PER_SQ_FOOT,
                area_ratio,
                effective_slabs,
                efficiency,
                material_cost: material_cost(slab_cost, effective_slabs, config.breakage_buffer),
            }
        })
        .collect()
}

fn quote_group(
    job: &ExtJob,
    stock_id: &str,
    product_idxs: &[usize],
    config: &SlabFitConfig,
) -> Result<GroupQuote> {
    let stock = find_stock(job, stock_id)?;
    let products = product_idxs.iter().map(|&idx| (idx, &job.products[idx]));
    let instance = import::import_instance(stock, products, config.kerf())?;
    let result = pack_pieces(&instance, config);
    let allocations = allocate(&result, stock.slab_cost, config);

    Ok(GroupQuote {
        stock_id: stock_id.to_owned(),
        result,
        allocations,
    })
}

/// Packs the products of each stock together on shared slabs.
/// Stocks are independent of each other and processed in parallel, the output keeps the order of [`group_by_stock`].
pub fn optimize_together(job: &ExtJob, config: &SlabFitConfig) -> Vec<(String, Result<GroupQuote>)> {
    group_by_stock(&job.products)
        .into_par_iter()
        .map(|(stock_id, product_idxs)| {
            let quote = quote_group(job, &stock_id, &product_idxs, config);
            if let Err(e) = &quote {
                warn!("[QUOTE] stock {stock_id} could not be packed: {e:#}");
            }
            (stock_id, quote)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn product(stock: &str, width: f64, depth: f64, quantity: u64) -> ExtProduct {
        ExtProduct {
            label: None,
            width,
            depth,
            quantity,
            priority: None,
            edge_detail: None,
            stock: stock.into(),
        }
    }

    fn job(products: Vec<ExtProduct>) -> ExtJob {
        ExtJob {
            name: "test".into(),
            products,
            stocks: vec![
                ExtStock {
                    id: "quartz".into(),
                    width: 126.0,
                    height: 63.0,
                    slab_cost: Some(1000.0),
                },
                ExtStock {
                    id: "granite".into(),
                    width: 120.0,
                    height: 60.0,
                    slab_cost: None,
                },
            ],
        }
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let products = vec![
            product("granite", 24.0, 24.0, 1),
            product("quartz", 24.0, 24.0, 1),
            product("granite", 12.0, 48.0, 1),
        ];
        assert_eq!(
            group_by_stock(&products),
            vec![("granite".to_string(), vec![0, 2]), ("quartz".to_string(), vec![1])]
        );
    }

    #[test]
    fn uniform_estimate_for_single_piece() {
        let job = job(vec![product("quartz", 24.0, 24.0, 1)]);
        let config = SlabFitConfig::default().without_kerf();
        let estimate = estimate_uniform(0, &job.products[0], &job.stocks[0], &config).unwrap();
        assert!(estimate.pieces_per_slab >= 1);
        assert_eq!(estimate.slabs_needed, 1);
        assert!(approx_eq!(f64, estimate.usable_area_sqft, 4.0));
        assert!(approx_eq!(f64, estimate.material_cost.unwrap(), 1100.0));
    }

    #[test]
    fn unfittable_product_is_an_error_not_a_panic() {
        let job = job(vec![product("quartz", 200.0, 200.0, 1), product("marble", 10.0, 10.0, 1)]);
        let estimates = estimate_all_uniform(&job, &SlabFitConfig::default());
        assert!(estimates[0].as_ref().unwrap_err().to_string().contains("does not fit"));
        assert!(estimates[1].is_err());
    }

    #[test]
    fn combined_groups_report_errors_per_stock() {
        let job = job(vec![
            product("quartz", 24.0, 24.0, 4),
            product("marble", 24.0, 24.0, 1),
            product("granite", 200.0, 10.0, 1),
        ]);
        let quotes = optimize_together(&job, &SlabFitConfig::default());
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].0, "quartz");
        assert_eq!(quotes[0].1.as_ref().unwrap().result.n_placements(), 4);
        assert!(quotes[1].1.is_err());
        assert!(quotes[2].1.is_err());
    }

    #[test]
    fn allocation_is_proportional_to_area() {
        let job = job(vec![product("quartz", 24.0, 24.0, 3), product("quartz", 12.0, 24.0, 2)]);
        let config = SlabFitConfig::default();
        let quotes = optimize_together(&job, &config);
        let quote = quotes[0].1.as_ref().unwrap();
        assert_eq!(quote.result.total_slabs(), 1);

        let allocations = &quote.allocations;
        assert_eq!(allocations.len(), 2);
        assert_eq!(allocations[0].n_pieces, 3);
        assert!(approx_eq!(f64, allocations[0].area_ratio, 0.75));
        assert!(approx_eq!(f64, allocations[1].effective_slabs, 0.25));
        let total_cost: f64 = allocations.iter().filter_map(|a| a.material_cost).sum();
        assert!(approx_eq!(f64, total_cost, 1100.0, epsilon = 1e-9));
    }

    #[test]
    fn allocation_reports_area_and_efficiency_per_product() {
        let job = job(vec![product("quartz", 24.0, 24.0, 3), product("quartz", 12.0, 24.0, 2)]);
        let quotes = optimize_together(&job, &SlabFitConfig::default());
        let quote = quotes[0].1.as_ref().unwrap();
        let slab_efficiency = quote.result.slabs[0].efficiency();

        let allocations = &quote.allocations;
        assert!(approx_eq!(f64, allocations[0].usable_area_sqft, 12.0));
        assert!(approx_eq!(f64, allocations[1].usable_area_sqft, 4.0));
        // area shares of a single slab are all as efficient as the slab itself
        for a in allocations {
            assert!(approx_eq!(f64, a.efficiency, slab_efficiency, epsilon = 1e-9));
        }
    }

    #[test]
    fn uniform_and_combined_costs_use_their_own_buffer() {
        let job = job(vec![product("quartz", 24.0, 24.0, 1)]);
        let config = SlabFitConfig {
            material_buffer: 20.0,
            breakage_buffer: 0.0,
            ..SlabFitConfig::default()
        };

        let estimate = estimate_uniform(0, &job.products[0], &job.stocks[0], &config).unwrap();
        assert!(approx_eq!(f64, estimate.material_cost.unwrap(), 1200.0, epsilon = 1e-9));

        let quotes = optimize_together(&job, &config);
        let allocation = &quotes[0].1.as_ref().unwrap().allocations[0];
        assert!(approx_eq!(f64, allocation.material_cost.unwrap(), 1000.0, epsilon = 1e-9));
    }
}
