use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsResult;
use crate::core::{ChartKind, ChartScale, Dataset, Padding, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::ChartEngine;
use super::layout_controller::base_scale_for;

/// Version written into every [`SnapshotEnvelope`].
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub padding: Padding,
    pub chart_kind: ChartKind,
    pub datasets: Vec<Dataset>,
    /// Point count per dataset label.
    pub dataset_lengths: IndexMap<String, usize>,
    pub scale: Option<ChartScale>,
    pub interaction: InteractionState,
    pub pending_realtime_points: usize,
    /// Present only when analytics were computed for exactly this data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AnalyticsResult>,
}

/// Versioned wrapper persisted around an [`EngineSnapshot`].
///
/// `chart_kind` and `has_analytics` are repeated outside the snapshot so
/// fixture tooling can filter files without decoding datasets; they must
/// agree with the embedded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    pub schema_version: u32,
    pub chart_kind: ChartKind,
    pub has_analytics: bool,
    pub snapshot: EngineSnapshot,
}

impl SnapshotEnvelope {
    #[must_use]
    pub fn new(snapshot: EngineSnapshot) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            chart_kind: snapshot.chart_kind,
            has_analytics: snapshot.analytics.is_some(),
            snapshot,
        }
    }

    fn validate(&self) -> ChartResult<()> {
        if self.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                self.schema_version
            )));
        }
        if self.chart_kind != self.snapshot.chart_kind {
            return Err(ChartError::InvalidData(format!(
                "envelope chart kind {:?} disagrees with snapshot chart kind {:?}",
                self.chart_kind, self.snapshot.chart_kind
            )));
        }
        if self.has_analytics != self.snapshot.analytics.is_some() {
            return Err(ChartError::InvalidData(
                "envelope analytics flag disagrees with snapshot".to_owned(),
            ));
        }
        Ok(())
    }
}

impl EngineSnapshot {
    /// Pretty JSON of the versioned envelope around this snapshot.
    pub fn to_envelope_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&SnapshotEnvelope::new(self.clone()))
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot envelope: {e}")))
    }

    /// Parses a [`SnapshotEnvelope`]; bare snapshots are rejected.
    pub fn from_envelope_json_str(input: &str) -> ChartResult<Self> {
        let envelope: SnapshotEnvelope = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse snapshot envelope: {e}")))?;
        envelope.validate()?;
        Ok(envelope.snapshot)
    }
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            viewport: self.core.config.viewport,
            padding: self.core.config.padding,
            chart_kind: self.core.config.chart_kind,
            datasets: self.core.datasets.clone(),
            dataset_lengths: self
                .core
                .datasets
                .iter()
                .map(|dataset| (dataset.label.clone(), dataset.len()))
                .collect(),
            scale: base_scale_for(&self.core.datasets, &self.core.config)
                .map(|scale| scale.with_view(self.core.interaction.view_transform())),
            interaction: self.core.interaction.clone(),
            pending_realtime_points: self.core.realtime.pending_len(),
            analytics: self
                .cached_analytics()
                .map(|result| result.as_ref().clone()),
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn snapshot_envelope_json_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_envelope_json_pretty()
    }
}
