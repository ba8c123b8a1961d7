pub mod bar_layout;
pub mod bounds;
pub mod pie_layout;
pub mod primitives;
pub mod scale;
pub mod treemap;
pub mod types;
pub mod windowing;

pub use bar_layout::{BarGeometry, BarLayoutConfig, BarOrientation, layout_bars};
pub use bounds::{Bounds, bounds_of_values, compute_bounds, compute_datasets_bounds};
pub use pie_layout::{PieGeometry, PieLayout, PieLayoutConfig, PieSlice, layout_pie};
pub use scale::{ChartScale, LinearScale, ViewTransform, category_count};
pub use treemap::{
    TreemapItem, TreemapLayout, TreemapNode, layout_treemap, squarify, treemap_items_from_datasets,
};
pub use types::{ChartKind, DataPoint, Dataset, Padding, Rect, Viewport};
pub use windowing::{decimate, decimation_step, points_in_index_window};
