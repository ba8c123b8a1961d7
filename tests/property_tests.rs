use chart_compute::core::{
    DataPoint, Dataset, LinearScale, Rect, TreemapItem, bounds_of_values, layout_treemap,
};
use chart_compute::interaction::{InteractionConfig, InteractionState};
use chart_compute::realtime::RealtimeBuffer;
use proptest::prelude::*;

proptest! {
    #[test]
    fn bounds_min_never_exceeds_max(
        values in proptest::collection::vec(prop_oneof![
            -1e9f64..1e9,
            Just(f64::NAN),
            Just(f64::INFINITY),
        ], 0..64)
    ) {
        let bounds = bounds_of_values(values.iter().copied());
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        prop_assert_eq!(bounds.has_valid, !finite.is_empty());
        if bounds.has_valid {
            prop_assert!(bounds.min <= bounds.max);
            prop_assert!(finite.iter().all(|v| *v >= bounds.min && *v <= bounds.max));
        }
    }

    #[test]
    fn linear_scale_maps_domain_ends_to_range_ends(
        domain_min in -10_000.0f64..10_000.0,
        span in 0.001f64..10_000.0,
        range_start in -2_000.0f64..2_000.0,
        range_length in -2_000.0f64..2_000.0
    ) {
        let scale = LinearScale::new(domain_min, domain_min + span, range_start, range_length);
        let tolerance = 1e-6 * (1.0 + range_length.abs() + range_start.abs());

        prop_assert!((scale.map(domain_min) - range_start).abs() <= tolerance);
        prop_assert!((scale.map(domain_min + span) - (range_start + range_length)).abs() <= tolerance);
    }

    #[test]
    fn treemap_leaves_tile_bounds_without_overlap(
        weights in proptest::collection::vec(0.5f64..500.0, 1..24),
        width in 10.0f64..2_000.0,
        height in 10.0f64..2_000.0
    ) {
        let items: Vec<TreemapItem> = weights
            .iter()
            .enumerate()
            .map(|(index, weight)| TreemapItem::leaf(format!("leaf-{index}"), *weight))
            .collect();
        let bounds = Rect::new(5.0, 5.0, width, height);
        let layout = layout_treemap(&items, bounds);
        let leaves: Vec<Rect> = layout.leaves().map(|leaf| leaf.rect()).collect();

        prop_assert_eq!(leaves.len(), weights.len());
        let area: f64 = leaves.iter().map(|rect| rect.area()).sum();
        prop_assert!((area - bounds.area()).abs() <= bounds.area() * 1e-9);
        for (i, a) in leaves.iter().enumerate() {
            prop_assert!(a.x >= bounds.x - 1e-6 && a.right() <= bounds.right() + 1e-6);
            prop_assert!(a.y >= bounds.y - 1e-6 && a.bottom() <= bounds.bottom() + 1e-6);
            for b in &leaves[i + 1..] {
                prop_assert!(!a.overlaps(*b, 1e-6), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn zoom_keeps_anchor_stationary(
        factors in proptest::collection::vec(0.2f64..5.0, 1..8),
        center_x in 0.0f64..1_200.0,
        center_y in 0.0f64..800.0
    ) {
        let config = InteractionConfig::default();
        let mut state = InteractionState::default();

        for factor in factors {
            let before = state.view_transform().invert(center_x, center_y);
            state.zoom_at(center_x, center_y, factor, &config);
            let after = state.view_transform().invert(center_x, center_y);

            prop_assert!(state.zoom_level() >= config.zoom_min);
            prop_assert!(state.zoom_level() <= config.zoom_max);
            prop_assert!((before.0 - after.0).abs() <= 1e-6 * (1.0 + before.0.abs()));
            prop_assert!((before.1 - after.1).abs() <= 1e-6 * (1.0 + before.1.abs()));
        }
    }

    #[test]
    fn retention_never_exceeds_cap(
        initial in 0usize..50,
        pushed in 0usize..200,
        cap in 1usize..64
    ) {
        let seed: Vec<f64> = (0..initial).map(|i| i as f64).collect();
        let mut datasets = vec![Dataset::from_values("live", &seed)];
        let mut buffer = RealtimeBuffer::new(cap);
        for i in 0..pushed {
            buffer.push(0, DataPoint::new(format!("p{i}"), i as f64));
        }
        let report = buffer.flush_into(&mut datasets);

        prop_assert_eq!(report.appended, pushed);
        if pushed > 0 {
            prop_assert!(datasets[0].len() <= cap);
            prop_assert_eq!(datasets[0].len(), (initial + pushed).min(cap));
            prop_assert_eq!(report.dropped, (initial + pushed).saturating_sub(cap));
            prop_assert_eq!(
                datasets[0].data.last().map(|point| point.value),
                Some((pushed - 1) as f64)
            );
        } else {
            prop_assert_eq!(datasets[0].len(), initial);
        }
    }
}
