#[cfg(test)]
mod tests {
    use std::path::Path;

    use test_case::test_case;

    use slabfit::capacity::{max_pieces_per_slab, slabs_needed};
    use slabfit::config::SlabFitConfig;
    use slabfit::io;
    use slabfit::opt::packer::pack_pieces;
    use slabfit::quote::{estimate_all_uniform, optimize_together};
    use slabpack::entities::{PackInstance, Piece, PieceId};
    use slabpack::geometry::Dims;
    use slabpack::io::export::export_result;
    use slabpack::util::assertions;

    const SLAB: (f64, f64) = (126.0, 63.0);

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn product_pieces(product_idx: usize, qty: usize, w: f64, h: f64) -> Vec<Piece> {
        (0..qty)
            .map(|c| Piece::new(PieceId::new(product_idx, c), Dims::new(w, h)))
            .collect()
    }

    #[test_case(24.0, 36.0, 0.0, 8; "upright and rotated rows")]
    #[test_case(30.0, 72.0, 0.125, 2; "rotated only")]
    #[test_case(200.0, 200.0, 0.0, 0; "larger than slab")]
    #[test_case(24.0, 24.0, 0.0, 10; "square")]
    #[test_case(126.0, 63.0, 0.125, 1; "exact slab size")]
    #[test_case(63.0, 126.0, 0.125, 1; "exact slab size rotated")]
    fn capacity(piece_w: f64, piece_h: f64, kerf: f64, expected: usize) {
        assert_eq!(max_pieces_per_slab(piece_w, piece_h, SLAB.0, SLAB.1, kerf), expected);
    }

    #[test]
    fn capacity_beats_uniform_grids() {
        // a single orientation grid fits at most 6 pieces of 24x36
        let capacity = max_pieces_per_slab(24.0, 36.0, SLAB.0, SLAB.1, 0.0);
        assert!(capacity >= 6);
    }

    #[test]
    fn capacity_ignores_slab_orientation() {
        for (w, h) in [(24.0, 36.0), (30.0, 72.0), (17.5, 40.0), (12.0, 48.0)] {
            assert_eq!(
                max_pieces_per_slab(w, h, SLAB.0, SLAB.1, 0.125),
                max_pieces_per_slab(w, h, SLAB.1, SLAB.0, 0.125)
            );
            assert_eq!(
                max_pieces_per_slab(w, h, SLAB.0, SLAB.1, 0.125),
                max_pieces_per_slab(h, w, SLAB.0, SLAB.1, 0.125)
            );
        }
    }

    #[test]
    fn kerf_never_increases_capacity() {
        let kerfs = [0.0, 0.0625, 0.125, 0.25, 0.5, 1.0];
        for w in [6.0, 12.0, 17.5, 24.0, 30.0, 41.0] {
            for h in [4.0, 15.0, 25.5, 36.0, 48.0, 62.0] {
                let capacities: Vec<usize> = kerfs
                    .iter()
                    .map(|&k| max_pieces_per_slab(w, h, SLAB.0, SLAB.1, k))
                    .collect();
                assert!(
                    capacities.windows(2).all(|c| c[0] >= c[1]),
                    "{w}x{h}: {capacities:?}"
                );
            }
        }
    }

    #[test_case(1, 10, Some(1))]
    #[test_case(10, 10, Some(1))]
    #[test_case(11, 10, Some(2))]
    #[test_case(25, 6, Some(5))]
    #[test_case(4, 0, None)]
    fn ceiling_division(quantity: usize, capacity: usize, expected: Option<usize>) {
        assert_eq!(slabs_needed(quantity, capacity), expected);
    }

    #[test]
    fn single_piece_needs_single_slab() {
        let capacity = max_pieces_per_slab(24.0, 24.0, SLAB.0, SLAB.1, 0.0);
        assert!(capacity >= 1);
        assert_eq!(slabs_needed(1, capacity), Some(1));
    }

    #[test_case(0.0; "no kerf")]
    #[test_case(0.125; "eighth inch kerf")]
    #[test_case(0.5; "half inch kerf")]
    fn packs_mixed_products(kerf: f64) {
        init_logger();
        let mut pieces = product_pieces(0, 20, 24.0, 24.0);
        pieces.extend(product_pieces(1, 10, 12.0, 48.0));
        let instance = PackInstance::try_new(Dims::new(SLAB.0, SLAB.1), kerf, pieces).unwrap();

        let config = SlabFitConfig {
            kerf_width: kerf,
            ..SlabFitConfig::default()
        };
        let result = pack_pieces(&instance, &config);

        assert_eq!(result.n_placements(), 30);
        assert!(result.total_slabs() >= instance.area_lower_bound());
        assert!(result.total_slabs() >= 1);
        assert!(result.slabs.iter().all(|s| (0.0..=100.0).contains(&s.efficiency())));
        assert!(assertions::result_is_valid(&instance, &result));

        let ext = export_result(&result);
        assert_eq!(ext.total_slabs, result.total_slabs());
        assert_eq!(ext.slabs.iter().map(|s| s.placements.len()).sum::<usize>(), 30);
    }

    #[test]
    fn packing_is_deterministic() {
        let mut pieces = product_pieces(0, 7, 37.0, 22.0);
        pieces.extend(product_pieces(1, 5, 30.0, 15.0));
        pieces.extend(product_pieces(2, 3, 72.0, 25.5));
        let instance = PackInstance::try_new(Dims::new(SLAB.0, SLAB.1), 0.125, pieces).unwrap();
        let config = SlabFitConfig::default();

        let first = pack_pieces(&instance, &config);
        let second = pack_pieces(&instance, &config);
        assert_eq!(first, second);
        assert!(assertions::result_is_valid(&instance, &first));
    }

    #[test]
    fn unfittable_piece_is_rejected_before_packing() {
        let pieces = product_pieces(0, 1, 200.0, 200.0);
        let err = PackInstance::try_new(Dims::new(SLAB.0, SLAB.1), 0.0, pieces).unwrap_err();
        assert!(format!("{err:#}").contains("does not fit"));
    }

    #[test]
    fn quotes_sample_job() {
        init_logger();
        let job = io::read_job(Path::new("../assets/kitchen.json")).unwrap();
        let config = SlabFitConfig::default();

        let estimates = estimate_all_uniform(&job, &config);
        assert_eq!(estimates.len(), job.products.len());
        for (product, estimate) in job.products.iter().zip(estimates.iter()) {
            match product.width > 120.0 {
                // the bar top is longer than a carrara slab
                true => assert!(estimate.is_err()),
                false => {
                    let estimate = estimate.as_ref().unwrap();
                    assert!(estimate.slabs_needed >= 1);
                    assert!(estimate.efficiency > 0.0 && estimate.efficiency <= 100.0);
                }
            }
        }

        let quotes = optimize_together(&job, &config);
        assert_eq!(quotes.len(), 2);

        let (stock, calacatta) = &quotes[0];
        assert_eq!(stock, "calacatta");
        let calacatta = calacatta.as_ref().unwrap();
        assert_eq!(calacatta.result.n_placements(), 7);
        let ratio_sum: f64 = calacatta.allocations.iter().map(|a| a.area_ratio).sum();
        assert!((ratio_sum - 1.0).abs() < 1e-9);

        let (stock, carrara) = &quotes[1];
        assert_eq!(stock, "carrara");
        assert!(carrara.is_err());
    }
}
