use approx::assert_abs_diff_eq;
use chart_compute::ChartError;
use chart_compute::api::{ChartEngine, ChartEngineConfig};
use chart_compute::core::{BarLayoutConfig, ChartKind, Padding, PieLayoutConfig, Viewport};
use chart_compute::interaction::InteractionConfig;
use chart_compute::realtime::RealtimeConfig;
use chart_compute::render::NullRenderer;

fn base_config() -> ChartEngineConfig {
    ChartEngineConfig::new(Viewport::new(800, 600))
}

fn init_error(config: ChartEngineConfig) -> ChartError {
    match ChartEngine::new(NullRenderer::default(), config) {
        Ok(_) => panic!("config should be rejected"),
        Err(err) => err,
    }
}

#[test]
fn viewport_only_json_uses_defaults() {
    let config = ChartEngineConfig::from_json_str(r#"{ "viewport": { "width": 320, "height": 200 } }"#)
        .expect("parse config");

    assert_eq!(config.viewport, Viewport::new(320, 200));
    assert_eq!(config.padding, Padding::uniform(40.0));
    assert_eq!(config.chart_kind, ChartKind::Line);
    assert_eq!(config.realtime, RealtimeConfig::default());
    assert_eq!(config.realtime.max_data_points, 1_000);
    assert_eq!(config.interaction.zoom_min, 0.1);
    assert_eq!(config.analytics.anomaly_threshold, 2.5);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = ChartEngineConfig::from_json_str(
        r#"{
            "viewport": { "width": 320, "height": 200 },
            "chart_kind": "treemap",
            "realtime": { "max_data_points": 50 },
            "interaction": { "zoom_max": 4.0 }
        }"#,
    )
    .expect("parse config");

    assert_eq!(config.chart_kind, ChartKind::Treemap);
    assert_eq!(config.realtime.max_data_points, 50);
    assert_eq!(config.realtime.update_interval_ms, 1_000);
    assert_eq!(config.interaction.zoom_max, 4.0);
    assert!(config.interaction.pan_enabled);
}

#[test]
fn unknown_chart_kind_is_invalid_config() {
    let err = ChartEngineConfig::from_json_str(
        r#"{ "viewport": { "width": 10, "height": 10 }, "chart_kind": "radar" }"#,
    )
    .expect_err("unknown kind");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = ChartEngineConfig::from_json_str("{").expect_err("malformed json");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn json_round_trip_preserves_config() {
    let config = base_config()
        .with_chart_kind(ChartKind::Donut)
        .with_padding(Padding::new(10.0, 20.0, 30.0, 40.0))
        .with_pie(PieLayoutConfig::donut(0.6));

    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored.chart_kind, ChartKind::Donut);
    assert_eq!(restored.padding, Padding::new(10.0, 20.0, 30.0, 40.0));
    assert_eq!(restored.viewport, config.viewport);
    assert_abs_diff_eq!(restored.pie.inner_radius_ratio, 0.6, epsilon = 1e-12);
    assert_eq!(restored.realtime, config.realtime);
}

#[test]
fn zero_sized_viewport_is_rejected() {
    let err = init_error(ChartEngineConfig::new(Viewport::new(0, 100)));
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, height: 100 }));
}

#[test]
fn zoom_range_must_contain_identity() {
    let err = init_error(base_config().with_interaction(InteractionConfig {
        zoom_min: 2.0,
        zoom_max: 5.0,
        ..InteractionConfig::default()
    }));
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = init_error(base_config().with_interaction(InteractionConfig {
        zoom_min: 3.0,
        zoom_max: 2.0,
        ..InteractionConfig::default()
    }));
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn layout_ranges_are_validated() {
    let err = init_error(base_config().with_bar(BarLayoutConfig {
        group_padding: 1.0,
        ..BarLayoutConfig::default()
    }));
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = init_error(base_config().with_pie(PieLayoutConfig {
        inner_radius_ratio: 1.0,
        ..PieLayoutConfig::default()
    }));
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = init_error(base_config().with_padding(Padding::new(-1.0, 0.0, 0.0, 0.0)));
    assert!(matches!(err, ChartError::InvalidConfig(message) if message.contains("padding.top")));
}

#[test]
fn realtime_limits_are_validated() {
    let err = init_error(base_config().with_realtime(RealtimeConfig {
        max_data_points: 0,
        ..RealtimeConfig::default()
    }));
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = init_error(base_config().with_realtime(RealtimeConfig {
        render_max_points: Some(0),
        ..RealtimeConfig::default()
    }));
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn set_config_validates_before_applying() {
    let mut engine = ChartEngine::new(NullRenderer::default(), base_config()).expect("engine init");
    let mut bad = base_config();
    bad.viewport = Viewport::new(100, 0);

    let err = engine.set_config(bad).expect_err("invalid viewport");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
    assert_eq!(engine.config().viewport, Viewport::new(800, 600));

    engine
        .set_config(base_config().with_chart_kind(ChartKind::Bar))
        .expect("valid config");
    assert_eq!(engine.config().chart_kind, ChartKind::Bar);
}
