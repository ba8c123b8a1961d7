use std::f64::consts::TAU;

use crate::analytics::AnalyticsConfig;
use crate::core::{BarLayoutConfig, Padding, PieLayoutConfig, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionConfig;
use crate::realtime::RealtimeConfig;

use super::ChartEngineConfig;

pub(super) fn validate_engine_config(config: &ChartEngineConfig) -> ChartResult<()> {
    validate_viewport(config.viewport)?;
    validate_padding(config.padding)?;
    validate_bar_config(config.bar)?;
    validate_pie_config(config.pie)?;
    validate_interaction_config(config.interaction)?;
    validate_realtime_config(config.realtime)?;
    validate_analytics_config(&config.analytics)
}

pub(super) fn validate_viewport(viewport: Viewport) -> ChartResult<()> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

pub(super) fn validate_dataset_index(index: usize, len: usize) -> ChartResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(ChartError::DatasetIndexOutOfRange { index, len })
    }
}

fn invalid(message: &str) -> ChartError {
    ChartError::InvalidConfig(message.to_owned())
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

pub(super) fn validate_padding(padding: Padding) -> ChartResult<()> {
    for (name, value) in [
        ("top", padding.top),
        ("right", padding.right),
        ("bottom", padding.bottom),
        ("left", padding.left),
    ] {
        if !non_negative(value) {
            return Err(ChartError::InvalidConfig(format!(
                "padding.{name} must be finite and >= 0"
            )));
        }
    }
    Ok(())
}

pub(super) fn validate_bar_config(config: BarLayoutConfig) -> ChartResult<()> {
    if !non_negative(config.group_padding) || config.group_padding >= 1.0 {
        return Err(invalid("bar.group_padding must be in [0, 1)"));
    }
    if !non_negative(config.bar_padding) {
        return Err(invalid("bar.bar_padding must be finite and >= 0"));
    }
    if !non_negative(config.min_bar_height) {
        return Err(invalid("bar.min_bar_height must be finite and >= 0"));
    }
    if let Some(max) = config.max_bar_width {
        if !max.is_finite() || max <= 0.0 {
            return Err(invalid("bar.max_bar_width must be finite and > 0"));
        }
    }
    Ok(())
}

pub(super) fn validate_pie_config(config: PieLayoutConfig) -> ChartResult<()> {
    if !non_negative(config.pad_angle) || config.pad_angle >= TAU {
        return Err(invalid("pie.pad_angle must be in [0, 2π)"));
    }
    if !config.start_angle.is_finite() {
        return Err(invalid("pie.start_angle must be finite"));
    }
    if !non_negative(config.inner_radius_ratio) || config.inner_radius_ratio >= 1.0 {
        return Err(invalid("pie.inner_radius_ratio must be in [0, 1)"));
    }
    Ok(())
}

pub(super) fn validate_interaction_config(config: InteractionConfig) -> ChartResult<()> {
    if !config.zoom_min.is_finite() || config.zoom_min <= 0.0 {
        return Err(invalid("interaction.zoom_min must be finite and > 0"));
    }
    if !config.zoom_max.is_finite() || config.zoom_max < config.zoom_min {
        return Err(invalid("interaction.zoom_max must be finite and >= zoom_min"));
    }
    if !(config.zoom_min..=config.zoom_max).contains(&1.0) {
        return Err(invalid("interaction zoom range must contain 1.0"));
    }
    if !non_negative(config.wheel_sensitivity) {
        return Err(invalid("interaction.wheel_sensitivity must be finite and >= 0"));
    }
    if !non_negative(config.touch_pan_damping) {
        return Err(invalid("interaction.touch_pan_damping must be finite and >= 0"));
    }
    if !non_negative(config.touch_jitter_px) {
        return Err(invalid("interaction.touch_jitter_px must be finite and >= 0"));
    }
    Ok(())
}

pub(super) fn validate_realtime_config(config: RealtimeConfig) -> ChartResult<()> {
    if config.max_data_points == 0 {
        return Err(invalid("realtime.max_data_points must be > 0"));
    }
    if config.update_interval_ms == 0 {
        return Err(invalid("realtime.update_interval_ms must be > 0"));
    }
    if config.render_max_points == Some(0) {
        return Err(invalid("realtime.render_max_points must be > 0 when set"));
    }
    Ok(())
}

pub(super) fn validate_analytics_config(config: &AnalyticsConfig) -> ChartResult<()> {
    if !config.anomaly_threshold.is_finite() || config.anomaly_threshold <= 0.0 {
        return Err(invalid("analytics.anomaly_threshold must be finite and > 0"));
    }
    if !non_negative(config.strong_correlation_threshold)
        || config.strong_correlation_threshold > 1.0
    {
        return Err(invalid(
            "analytics.strong_correlation_threshold must be in [0, 1]",
        ));
    }
    Ok(())
}
