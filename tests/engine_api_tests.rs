use std::rc::Rc;

use approx::assert_abs_diff_eq;
use chart_compute::ChartError;
use chart_compute::api::{ChartEngine, ChartEngineConfig, EngineSnapshot, SnapshotEnvelope};
use chart_compute::core::{ChartKind, Dataset, Padding, Rect, Viewport};
use chart_compute::interaction::PointRef;
use chart_compute::render::NullRenderer;

fn engine(kind: ChartKind, datasets: Vec<Dataset>) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, 400)).with_chart_kind(kind);
    ChartEngine::with_datasets(NullRenderer::default(), config, datasets).expect("engine init")
}

fn three_series() -> Vec<Dataset> {
    vec![
        Dataset::from_values("a", &[1.0, 4.0, 2.0, 5.0, 3.0]),
        Dataset::from_values("b", &[2.0, 3.0, 6.0, 1.0, 4.0]),
        Dataset::from_values("hidden", &[9.0, 9.0, 9.0, 9.0, 9.0]).with_visible(false),
    ]
}

#[test]
fn line_render_emits_one_path_per_visible_dataset() {
    let mut engine = engine(ChartKind::Line, three_series());
    engine.render().expect("render");

    let renderer = engine.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_series_count, 2);
    assert_eq!(renderer.last_point_count, 10);
    assert_eq!(renderer.last_bar_count, 0);
}

#[test]
fn bar_render_emits_one_bar_per_visible_point() {
    let mut engine = engine(ChartKind::Bar, three_series());
    engine.render().expect("render");
    assert_eq!(engine.renderer().last_bar_count, 10);
    assert_eq!(engine.renderer().last_series_count, 0);
}

#[test]
fn pie_render_slices_focused_dataset() {
    let mut engine = engine(
        ChartKind::Pie,
        vec![
            Dataset::from_values("share", &[1.0, 2.0, 3.0, 4.0]),
            Dataset::from_values("other", &[5.0, 5.0]),
        ],
    );
    engine.render().expect("render");
    assert_eq!(engine.renderer().last_slice_count, 4);

    engine.set_focused_dataset(1).expect("focus");
    engine.render().expect("render");
    assert_eq!(engine.renderer().last_slice_count, 2);
    assert_eq!(engine.renderer().frames_rendered, 2);
}

#[test]
fn donut_without_ratio_uses_default_hole() {
    let mut engine = engine(ChartKind::Donut, vec![Dataset::from_values("share", &[1.0, 1.0])]);
    let pie = engine.pie_layout(0).expect("pie layout");
    let geometry = pie.geometry.expect("geometry");
    assert_abs_diff_eq!(geometry.inner_radius, geometry.outer_radius * 0.5, epsilon = 1e-9);
}

#[test]
fn treemap_render_counts_leaves() {
    let mut engine = engine(ChartKind::Treemap, three_series());
    engine.render().expect("render");
    assert_eq!(engine.renderer().last_leaf_count, 10);

    let first = engine.treemap_layout();
    let second = engine.treemap_layout();
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(first.roots.len(), 2);
}

#[test]
fn plot_rect_is_viewport_minus_padding() {
    let mut engine = engine(ChartKind::Line, three_series());
    assert_eq!(engine.plot_rect(), Rect::new(40.0, 40.0, 720.0, 320.0));

    engine
        .set_padding(Padding::new(10.0, 20.0, 30.0, 40.0))
        .expect("padding");
    assert_eq!(engine.plot_rect(), Rect::new(40.0, 10.0, 740.0, 360.0));
}

#[test]
fn dataset_indices_are_checked() {
    let mut engine = engine(ChartKind::Line, three_series());
    let err = engine.pie_layout(3).expect_err("out of range");
    assert!(matches!(err, ChartError::DatasetIndexOutOfRange { index: 3, len: 3 }));

    let err = engine.visible_points(7).expect_err("out of range");
    assert!(matches!(err, ChartError::DatasetIndexOutOfRange { index: 7, .. }));
}

#[test]
fn set_dataset_visible_changes_rendered_series() {
    let mut engine = engine(ChartKind::Line, three_series());
    engine.set_dataset_visible(2, true).expect("show");
    assert_eq!(engine.series_paths().len(), 3);

    let err = engine.set_dataset_visible(5, true).expect_err("out of range");
    assert!(matches!(err, ChartError::DatasetIndexOutOfRange { .. }));
}

#[test]
fn visible_points_follow_zoom() {
    let values: Vec<f64> = (0..11_i32).map(f64::from).collect();
    let mut engine = engine(ChartKind::Line, vec![Dataset::from_values("ramp", &values)]);
    assert_eq!(engine.visible_points(0).expect("points").len(), 11);

    assert!(engine.zoom_at(40.0, 200.0, 2.0));
    let visible = engine.visible_points(0).expect("points");
    assert_eq!(visible.len(), 6);
    assert_eq!(visible[0].value, 0.0);
    assert_eq!(visible[5].value, 5.0);

    engine.reset_view();
    assert_eq!(engine.visible_points(0).expect("points").len(), 11);
}

#[test]
fn scale_carries_view_transform() {
    let mut engine = engine(ChartKind::Line, three_series());
    let base = engine.base_scale().expect("base scale");
    assert!(base.view.is_identity());

    engine.pan_by(15.0, -5.0);
    let scale = engine.scale().expect("scale");
    assert_eq!(scale.view.pan_x, 15.0);
    assert_eq!(scale.view.pan_y, -5.0);
    assert_eq!((scale.min, scale.max), (1.0, 6.0));
}

#[test]
fn empty_engine_renders_an_empty_frame() {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(100, 100)),
    )
    .expect("engine init");
    assert!(engine.scale().is_none());
    engine.render().expect("render");
    assert_eq!(engine.renderer().last_series_count, 0);
}

#[test]
fn snapshot_round_trips_through_envelope() {
    let mut engine = engine(ChartKind::Line, three_series());
    engine.pan_by(12.5, 0.0);
    engine.toggle_selection(PointRef::new(0, 2));
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.dataset_lengths.get("b"), Some(&5));
    assert!(snapshot.analytics.is_none());

    let json = engine.snapshot_envelope_json_pretty().expect("envelope json");
    assert!(json.contains("\"schema_version\": 1"));
    assert!(json.contains("\"chart_kind\": \"line\""));
    assert!(json.contains("\"has_analytics\": false"));
    let restored = EngineSnapshot::from_envelope_json_str(&json).expect("parse envelope");
    assert_eq!(restored, snapshot);
    assert!(restored.interaction.is_selected(PointRef::new(0, 2)));
}

#[test]
fn envelope_flags_follow_snapshot() {
    let mut engine = engine(ChartKind::Bar, three_series());
    engine.analytics();
    let envelope = SnapshotEnvelope::new(engine.snapshot());
    assert_eq!(envelope.chart_kind, ChartKind::Bar);
    assert!(envelope.has_analytics);
}

#[test]
fn bare_snapshot_json_is_rejected() {
    let engine = engine(ChartKind::Line, three_series());
    let bare = engine.snapshot_json_pretty().expect("bare json");
    let err = EngineSnapshot::from_envelope_json_str(&bare).expect_err("bare snapshot");
    assert!(matches!(err, ChartError::InvalidData(message) if message.contains("envelope")));
}

#[test]
fn snapshot_rejects_unknown_schema_version() {
    let engine = engine(ChartKind::Line, three_series());
    let json = engine
        .snapshot_envelope_json_pretty()
        .expect("envelope json")
        .replacen("\"schema_version\": 1", "\"schema_version\": 9", 1);

    let err = EngineSnapshot::from_envelope_json_str(&json).expect_err("unsupported version");
    assert!(matches!(err, ChartError::InvalidData(message) if message.contains("schema version")));
}

#[test]
fn envelope_chart_kind_must_match_snapshot() {
    let engine = engine(ChartKind::Line, three_series());
    let json = engine
        .snapshot_envelope_json_pretty()
        .expect("envelope json")
        .replacen("\"chart_kind\": \"line\"", "\"chart_kind\": \"pie\"", 1);

    let err = EngineSnapshot::from_envelope_json_str(&json).expect_err("kind mismatch");
    assert!(matches!(err, ChartError::InvalidData(message) if message.contains("chart kind")));
}

#[test]
fn bar_layout_is_reused_until_data_changes() {
    let mut engine = engine(ChartKind::Bar, three_series());
    let first = engine.bar_layout();
    let second = engine.bar_layout();
    assert!(Rc::ptr_eq(&first, &second));

    engine.datasets_mut()[0].data[0].value = 7.0;
    let edited = engine.bar_layout();
    assert!(!Rc::ptr_eq(&first, &edited));
    assert_eq!(edited.len(), first.len());
    let bar = edited
        .iter()
        .find(|bar| bar.dataset_index == 0 && bar.point_index == 0)
        .expect("first bar");
    assert_eq!(bar.value, 7.0);
    assert!(Rc::ptr_eq(&edited, &engine.bar_layout()));
}

#[test]
fn layout_caches_drop_on_viewport_padding_and_config() {
    let mut engine = engine(ChartKind::Bar, three_series());
    let bars = engine.bar_layout();

    engine.set_viewport(Viewport::new(800, 400)).expect("same viewport");
    assert!(Rc::ptr_eq(&bars, &engine.bar_layout()));

    engine.set_viewport(Viewport::new(600, 300)).expect("viewport");
    let resized = engine.bar_layout();
    assert!(!Rc::ptr_eq(&bars, &resized));

    engine
        .set_padding(Padding::new(0.0, 0.0, 0.0, 0.0))
        .expect("padding");
    let padded = engine.bar_layout();
    assert!(!Rc::ptr_eq(&resized, &padded));

    let mut config = engine.config().clone();
    config.bar.stacked = true;
    engine.set_config(config).expect("config");
    assert!(!Rc::ptr_eq(&padded, &engine.bar_layout()));
}

#[test]
fn pie_layout_is_cached_per_dataset() {
    let mut engine = engine(ChartKind::Pie, three_series());
    let first = engine.pie_layout(0).expect("pie 0");
    assert!(Rc::ptr_eq(&first, &engine.pie_layout(0).expect("pie 0")));

    let other = engine.pie_layout(1).expect("pie 1");
    assert_eq!(other.slices.len(), 5);
    assert_eq!(other.total, 16.0);
    let again = engine.pie_layout(0).expect("pie 0");
    assert!(!Rc::ptr_eq(&first, &again));
    assert_eq!(*first, *again);

    engine.datasets_mut()[0].data[1].value = 40.0;
    let edited = engine.pie_layout(0).expect("pie 0");
    assert!(!Rc::ptr_eq(&again, &edited));
    assert_eq!(edited.total, 51.0);
}

#[test]
fn donut_switch_recomputes_pie_geometry() {
    let mut engine = engine(ChartKind::Pie, three_series());
    let pie = engine.pie_layout(0).expect("pie");
    assert_eq!(pie.geometry.expect("geometry").inner_radius, 0.0);

    engine.set_chart_kind(ChartKind::Donut);
    let donut = engine.pie_layout(0).expect("donut");
    let geometry = donut.geometry.expect("geometry");
    assert!(geometry.inner_radius > 0.0);
}

#[test]
fn series_paths_follow_view_and_data() {
    let mut engine = engine(ChartKind::Line, three_series());
    let first = engine.series_paths();
    assert!(Rc::ptr_eq(&first, &engine.series_paths()));

    assert!(engine.pan_by(10.0, 0.0));
    let panned = engine.series_paths();
    assert!(!Rc::ptr_eq(&first, &panned));
    assert_eq!(panned[0].points[0].0, first[0].points[0].0 + 10.0);

    engine.datasets_mut()[1].data[4].value = 0.5;
    let edited = engine.series_paths();
    assert!(!Rc::ptr_eq(&panned, &edited));
}

#[test]
fn chart_kind_switch_rebuilds_scale() {
    let mut engine = engine(ChartKind::Line, three_series());
    assert_eq!(engine.base_scale().expect("line scale").min, 1.0);

    engine.set_chart_kind(ChartKind::Bar);
    assert_eq!(engine.base_scale().expect("bar scale").min, 0.0);
}
