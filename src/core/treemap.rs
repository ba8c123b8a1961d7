//! Squarified treemap layout (Bruls, Huizing, van Wijk).
//!
//! The input hierarchy is flattened into an arena and laid out with an
//! explicit work stack, so hierarchy depth never translates into call depth.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Dataset, Rect};

/// Caller-supplied hierarchy node. Leaves carry weights; internal nodes are
/// weighted by the sum of their children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapItem {
    pub id: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub children: Vec<TreemapItem>,
}

impl TreemapItem {
    #[must_use]
    pub fn leaf(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(id: impl Into<String>, children: Vec<TreemapItem>) -> Self {
        Self {
            id: id.into(),
            value: 0.0,
            children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapNode {
    pub id: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub depth: usize,
    /// Arena indices of the children.
    pub children: Vec<usize>,
    pub parent: Option<usize>,
}

impl TreemapNode {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TreemapLayout {
    pub bounds: Rect,
    pub nodes: Vec<TreemapNode>,
    pub roots: Vec<usize>,
}

impl TreemapLayout {
    pub fn leaves(&self) -> impl Iterator<Item = &TreemapNode> {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    #[must_use]
    pub fn node(&self, index: usize) -> Option<&TreemapNode> {
        self.nodes.get(index)
    }

    /// Deepest node whose rectangle contains the position.
    #[must_use]
    pub fn node_at(&self, x: f64, y: f64) -> Option<&TreemapNode> {
        let contains = |node: &&TreemapNode| {
            x >= node.x && x < node.x + node.width && y >= node.y && y < node.y + node.height
        };
        let mut current = self
            .roots
            .iter()
            .map(|&index| &self.nodes[index])
            .find(contains)?;
        while let Some(child) = current
            .children
            .iter()
            .map(|&index| &self.nodes[index])
            .find(contains)
        {
            current = child;
        }
        Some(current)
    }
}

/// Lays out a forest of items into `bounds`.
///
/// Leaves with non-positive or non-finite weights are dropped.
#[must_use]
pub fn layout_treemap(items: &[TreemapItem], bounds: Rect) -> TreemapLayout {
    let mut layout = build_arena(items, bounds);

    let mut work: Vec<(Vec<usize>, Rect)> = vec![(layout.roots.clone(), bounds)];
    while let Some((mut siblings, rect)) = work.pop() {
        siblings.sort_by_key(|&index| std::cmp::Reverse(OrderedFloat(layout.nodes[index].value)));
        let weights: Vec<f64> = siblings
            .iter()
            .map(|&index| layout.nodes[index].value)
            .collect();
        let rects = squarify(&weights, rect);
        for (&index, child_rect) in siblings.iter().zip(rects) {
            let node = &mut layout.nodes[index];
            node.set_rect(child_rect);
            if !node.children.is_empty() {
                work.push((node.children.clone(), child_rect));
            }
        }
    }

    layout
}

/// Two-level hierarchy: one group per visible dataset, one leaf per point.
#[must_use]
pub fn treemap_items_from_datasets(datasets: &[Dataset]) -> Vec<TreemapItem> {
    datasets
        .iter()
        .filter(|dataset| dataset.is_visible())
        .map(|dataset| {
            TreemapItem::group(
                dataset.label.clone(),
                dataset
                    .data
                    .iter()
                    .map(|point| TreemapItem::leaf(point.label.clone(), point.value))
                    .collect(),
            )
        })
        .collect()
}

fn build_arena(items: &[TreemapItem], bounds: Rect) -> TreemapLayout {
    let mut layout = TreemapLayout {
        bounds,
        nodes: Vec::new(),
        roots: Vec::new(),
    };

    // Pre-order: a parent's index is always lower than its children's.
    let mut stack: Vec<(&TreemapItem, Option<usize>, usize)> =
        items.iter().rev().map(|item| (item, None, 0)).collect();
    while let Some((item, parent, depth)) = stack.pop() {
        let is_leaf = item.children.is_empty();
        if is_leaf && !(item.value.is_finite() && item.value > 0.0) {
            continue;
        }
        let index = layout.nodes.len();
        layout.nodes.push(TreemapNode {
            id: item.id.clone(),
            value: if is_leaf { item.value } else { 0.0 },
            x: bounds.x,
            y: bounds.y,
            width: 0.0,
            height: 0.0,
            depth,
            children: Vec::new(),
            parent,
        });
        match parent {
            Some(parent) => layout.nodes[parent].children.push(index),
            None => layout.roots.push(index),
        }
        for child in item.children.iter().rev() {
            stack.push((child, Some(index), depth + 1));
        }
    }

    for index in (0..layout.nodes.len()).rev() {
        if let Some(parent) = layout.nodes[index].parent {
            let value = layout.nodes[index].value;
            layout.nodes[parent].value += value;
        }
    }

    layout
}

/// Worst aspect ratio of a row with total area `sum`, extreme member areas
/// `max`/`min`, laid against a side of length `side`.
fn worst_ratio(sum: f64, max: f64, min: f64, side: f64) -> f64 {
    let side_sq = side * side;
    let sum_sq = sum * sum;
    (side_sq * max / sum_sq).max(sum_sq / (side_sq * min))
}

/// Partitions `rect` into one rectangle per weight, in input order.
///
/// Weights are expected in descending order for the squarified result; zero,
/// negative or non-finite weights get a zero-size rectangle at the origin of
/// `rect`, as does everything when `rect` has no area.
#[must_use]
pub fn squarify(weights: &[f64], rect: Rect) -> Vec<Rect> {
    let mut out = vec![Rect::new(rect.x, rect.y, 0.0, 0.0); weights.len()];
    let valid = |weight: f64| weight.is_finite() && weight > 0.0;
    let total: f64 = weights.iter().copied().filter(|&w| valid(w)).sum();
    if !rect.is_finite() || rect.area() <= 0.0 || !total.is_finite() || total <= 0.0 {
        return out;
    }

    let scale = rect.area() / total;
    let areas: Vec<f64> = weights
        .iter()
        .map(|&weight| if valid(weight) { weight * scale } else { 0.0 })
        .collect();
    let order: Vec<usize> = (0..areas.len()).filter(|&index| areas[index] > 0.0).collect();

    let mut remaining = rect;
    let mut row_start = 0;
    while row_start < order.len() {
        let side = remaining.width.min(remaining.height);
        let first = areas[order[row_start]];
        let (mut row_sum, mut row_max, mut row_min) = (first, first, first);
        let mut current_worst = worst_ratio(row_sum, row_max, row_min, side);
        let mut row_end = row_start + 1;

        while row_end < order.len() {
            let candidate = areas[order[row_end]];
            let next_worst = worst_ratio(
                row_sum + candidate,
                row_max.max(candidate),
                row_min.min(candidate),
                side,
            );
            if next_worst > current_worst {
                break;
            }
            row_sum += candidate;
            row_max = row_max.max(candidate);
            row_min = row_min.min(candidate);
            current_worst = next_worst;
            row_end += 1;
        }

        let is_last_row = row_end == order.len();
        remaining = place_row(
            &order[row_start..row_end],
            &areas,
            row_sum,
            remaining,
            is_last_row,
            &mut out,
        );
        row_start = row_end;
    }

    out
}

/// Lays one row against the shorter side of `remaining` and returns the
/// rectangle left over.
fn place_row(
    row: &[usize],
    areas: &[f64],
    row_sum: f64,
    remaining: Rect,
    is_last_row: bool,
    out: &mut [Rect],
) -> Rect {
    let vertical_strip = remaining.width >= remaining.height;
    let (along, across) = if vertical_strip {
        (remaining.height, remaining.width)
    } else {
        (remaining.width, remaining.height)
    };
    let thickness = if is_last_row {
        across
    } else if along > 0.0 {
        (row_sum / along).min(across)
    } else {
        0.0
    };

    let mut cursor = 0.0;
    for (position, &index) in row.iter().enumerate() {
        let length = if position + 1 == row.len() {
            along - cursor
        } else if thickness > 0.0 {
            areas[index] / thickness
        } else {
            0.0
        };
        out[index] = if vertical_strip {
            Rect::new(remaining.x, remaining.y + cursor, thickness, length)
        } else {
            Rect::new(remaining.x + cursor, remaining.y, length, thickness)
        };
        cursor += length;
    }

    if vertical_strip {
        Rect::new(
            remaining.x + thickness,
            remaining.y,
            (remaining.width - thickness).max(0.0),
            remaining.height,
        )
    } else {
        Rect::new(
            remaining.x,
            remaining.y + thickness,
            remaining.width,
            (remaining.height - thickness).max(0.0),
        )
    }
}
