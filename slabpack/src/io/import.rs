use anyhow::{Context, Result, ensure};
use itertools::Itertools;

use crate::entities::{PackInstance, Piece, PieceId, Priority};
use crate::geometry::Dims;
use crate::io::ext_repr::{ExtProduct, ExtStock};

/// Imports the slab size of a stock
pub fn import_stock(ext_stock: &ExtStock) -> Result<Dims> {
    Dims::try_new(ext_stock.width, ext_stock.height)
        .with_context(|| format!("invalid slab size for stock {}", ext_stock.id))
}

/// Expands a product into one [`Piece`] per unit of quantity
pub fn import_product(product_idx: usize, ext_product: &ExtProduct) -> Result<Vec<Piece>> {
    let dims = Dims::try_new(ext_product.width, ext_product.depth)
        .with_context(|| format!("invalid dimensions for product {product_idx}"))?;
    ensure!(
        ext_product.quantity > 0,
        "product {product_idx} should have a quantity of at least 1"
    );
    let priority = ext_product
        .priority
        .as_deref()
        .map(Priority::from_label)
        .unwrap_or_default();

    let pieces = (0..ext_product.quantity as usize)
        .map(|copy_idx| {
            let piece = Piece::new(PieceId::new(product_idx, copy_idx), dims).with_priority(priority);
            let piece = match &ext_product.label {
                Some(label) => piece.with_label(label.clone()),
                None => piece,
            };
            match &ext_product.edge_detail {
                Some(edge) => piece.with_edge_detail(edge.clone()),
                None => piece,
            }
        })
        .collect_vec();

    Ok(pieces)
}

/// Imports a set of products cut from the same stock into a [`PackInstance`].
/// Products are given together with their index in the job.
pub fn import_instance<'a>(
    ext_stock: &ExtStock,
    products: impl IntoIterator<Item = (usize, &'a ExtProduct)>,
    kerf: f64,
) -> Result<PackInstance> {
    let slab_dims = import_stock(ext_stock)?;
    let mut pieces = vec![];
    for (product_idx, ext_product) in products {
        ensure!(
            ext_product.stock == ext_stock.id,
            "product {product_idx} is cut from stock {}, not {}",
            ext_product.stock,
            ext_stock.id
        );
        pieces.extend(import_product(product_idx, ext_product)?);
    }
    PackInstance::try_new(slab_dims, kerf, pieces)
        .with_context(|| format!("products do not fit stock {}", ext_stock.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(width: f64, depth: f64, quantity: u64) -> ExtProduct {
        ExtProduct {
            label: Some("Vanity".into()),
            width,
            depth,
            quantity,
            priority: Some("high".into()),
            edge_detail: None,
            stock: "quartz".into(),
        }
    }

    fn stock() -> ExtStock {
        ExtStock {
            id: "quartz".into(),
            width: 126.0,
            height: 63.0,
            slab_cost: Some(1200.0),
        }
    }

    #[test]
    fn quantity_is_expanded_into_pieces() {
        let pieces = import_product(3, &product(24.0, 36.0, 4)).unwrap();
        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().enumerate().all(|(i, p)| p.id == PieceId::new(3, i)));
        assert!(pieces.iter().all(|p| p.priority == Priority::High));
        assert_eq!(pieces[0].label.as_deref(), Some("Vanity"));
    }

    #[test]
    fn invalid_products_are_rejected() {
        assert!(import_product(0, &product(0.0, 36.0, 1)).is_err());
        assert!(import_product(0, &product(24.0, 36.0, 0)).is_err());
    }

    #[test]
    fn instance_collects_all_products() {
        let products = [product(24.0, 36.0, 2), product(12.0, 48.0, 3)];
        let instance = import_instance(&stock(), products.iter().enumerate(), 0.125).unwrap();
        assert_eq!(instance.n_pieces(), 5);
        assert_eq!(instance.slab_dims, Dims::new(126.0, 63.0));
    }

    #[test]
    fn oversized_product_fails_import() {
        let products = [product(200.0, 200.0, 1)];
        assert!(import_instance(&stock(), products.iter().enumerate(), 0.0).is_err());
    }
}
