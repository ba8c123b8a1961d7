use approx::{assert_abs_diff_eq, assert_relative_eq};
use chart_compute::core::{
    ChartScale, Dataset, LinearScale, Padding, ViewTransform, Viewport, bounds_of_values,
};

fn sample_scale() -> ChartScale {
    let datasets = vec![Dataset::from_values("sales", &[10.0, 20.0, 30.0, 50.0])];
    ChartScale::from_datasets(&datasets, Viewport::new(800, 600), Padding::uniform(40.0))
        .expect("scale for valid data")
}

#[test]
fn first_and_last_points_touch_plot_edges() {
    let scale = sample_scale();
    assert_eq!(scale.inner_width, 720.0);
    assert_eq!(scale.inner_height, 520.0);
    assert_eq!(scale.x(0, 4), 40.0);
    assert_eq!(scale.x(3, 4), 760.0);
}

#[test]
fn single_point_sits_on_horizontal_midpoint() {
    let scale = sample_scale();
    assert_eq!(scale.x(0, 1), 400.0);
}

#[test]
fn y_axis_maps_max_to_top_and_min_to_bottom() {
    let scale = sample_scale();
    assert_eq!(scale.min, 10.0);
    assert_eq!(scale.max, 50.0);
    assert_eq!(scale.range, 40.0);
    assert_relative_eq!(scale.y(50.0), 40.0);
    assert_relative_eq!(scale.y(10.0), 560.0);
    assert_relative_eq!(scale.y(30.0), 300.0);
}

#[test]
fn zero_span_data_does_not_divide_by_zero() {
    let datasets = vec![Dataset::from_values("flat", &[7.0, 7.0, 7.0])];
    let scale = ChartScale::from_datasets(&datasets, Viewport::new(400, 300), Padding::uniform(0.0))
        .expect("scale for flat data");

    assert_eq!(scale.range, 0.0);
    let y = scale.y(7.0);
    assert!(y.is_finite());
    assert_eq!(y, 300.0);
}

#[test]
fn no_valid_data_yields_no_scale() {
    let datasets = vec![Dataset::from_values("gaps", &[f64::NAN])];
    assert!(ChartScale::from_datasets(&datasets, Viewport::new(400, 300), Padding::default()).is_none());
    assert!(ChartScale::from_bounds(bounds_of_values([1.0]), Viewport::new(0, 300), Padding::default()).is_none());
}

#[test]
fn oversized_padding_clamps_inner_area_to_zero() {
    let datasets = vec![Dataset::from_values("sales", &[1.0, 2.0])];
    let scale = ChartScale::from_datasets(&datasets, Viewport::new(50, 50), Padding::uniform(40.0))
        .expect("scale");
    assert_eq!(scale.inner_width, 0.0);
    assert_eq!(scale.inner_height, 0.0);
}

#[test]
fn bar_scale_includes_zero_baseline() {
    let datasets = vec![Dataset::from_values("sales", &[10.0, 20.0])];
    let scale = ChartScale::for_bars(&datasets, Viewport::new(400, 300), Padding::uniform(0.0), false)
        .expect("bar scale");
    assert_eq!(scale.min, 0.0);
    assert_eq!(scale.max, 20.0);
}

#[test]
fn stacked_bar_scale_covers_category_totals() {
    let datasets = vec![
        Dataset::from_values("a", &[10.0, -5.0]),
        Dataset::from_values("b", &[15.0, -7.0]),
        Dataset::from_values("hidden", &[1_000.0, 0.0]).with_visible(false),
    ];
    let scale = ChartScale::for_bars(&datasets, Viewport::new(400, 300), Padding::uniform(0.0), true)
        .expect("stacked scale");
    assert_eq!(scale.max, 25.0);
    assert_eq!(scale.min, -12.0);
}

#[test]
fn view_transform_is_applied_on_projection() {
    let view = ViewTransform {
        zoom: 2.0,
        pan_x: -100.0,
        pan_y: 10.0,
    };
    let scale = sample_scale().with_view(view);
    let (x, y) = scale.project(0, 4, 50.0);
    assert_relative_eq!(x, 40.0 * 2.0 - 100.0);
    assert_relative_eq!(y, 40.0 * 2.0 + 10.0);
}

#[test]
fn linear_scale_round_trips() {
    let scale = LinearScale::new(-20.0, 80.0, 10.0, 500.0);
    let original = 42.5;
    let recovered = scale.invert(scale.map(original));
    assert_abs_diff_eq!(recovered, original, epsilon = 1e-9);
    assert_eq!(scale.range(), (10.0, 510.0));
    assert_eq!(scale.domain(), (-20.0, 80.0));
}
