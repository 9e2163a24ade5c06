use proptest::prelude::*;
use raster_chart::core::{ScaleParams, compute_parameters, inverse_transform, transform};
use raster_chart::interaction::find_nearest;

proptest! {
    #[test]
    fn autoscale_non_negative_values_keep_zero_offset(
        values in prop::collection::vec(0.0f64..1_000_000.0, 1..64)
    ) {
        let params = compute_parameters(&values).expect("non-empty");
        let max = values.iter().copied().fold(0.0, f64::max);
        prop_assert_eq!(params.offset, 0.0);
        prop_assert_eq!(params.span, max);
    }

    #[test]
    fn autoscale_span_covers_both_extremes(
        values in prop::collection::vec(-1_000_000.0f64..1_000_000.0, 1..64)
    ) {
        let params = compute_parameters(&values).expect("non-empty");
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        prop_assert!(params.offset <= 0.0);
        prop_assert_eq!(params.offset, min.min(0.0));
        for value in &values {
            // Every value lands inside [offset, offset + span].
            prop_assert!(*value >= params.offset);
            prop_assert!(*value <= params.offset + params.span + 1e-9);
        }
    }

    #[test]
    fn horizontal_transform_round_trips_at_unit_vertical_ratio(
        x in -1_000_000.0f64..1_000_000.0,
        ratio_x in prop_oneof![Just(0.5f64), Just(1.0f64), Just(2.0f64), Just(4.0f64)],
        height in 1.0f64..4096.0
    ) {
        let (sx, sy) = transform(x, 0.0, ratio_x, 1.0, 0.0, height);
        let (rx, ry) = inverse_transform(sx, sy, ratio_x, 1.0, 0.0, height);
        prop_assert_eq!(rx, x);
        prop_assert_eq!(ry, 0.0);
    }

    #[test]
    fn nearest_sample_matches_brute_force_first_minimum(
        mut xs in prop::collection::vec(-1_000.0f64..1_000.0, 1..128),
        target in -100_000.0f64..100_000.0,
        ratio_x in 0.01f64..50.0
    ) {
        xs.sort_by(f64::total_cmp);
        let params = ScaleParams {
            ratio_x,
            ratio_y: 1.0,
            y_offset: 0.0,
            height: 380.0,
            margin: 50.0,
        };
        let nearest = find_nearest(&xs, &params, target).expect("non-empty");

        let distances: Vec<f64> = xs
            .iter()
            .map(|x| (ratio_x * x + 50.0 - target).abs())
            .collect();
        let best = distances.iter().copied().fold(f64::INFINITY, f64::min);
        let first_best = distances
            .iter()
            .position(|distance| *distance == best)
            .expect("minimum exists");
        prop_assert_eq!(nearest.index, first_best);
    }
}
