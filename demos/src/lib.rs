// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the quadtree demos: configuration, logging setup, and a
//! text renderer that stands in for a window.

use std::fmt::Write as _;
use std::path::Path;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_quadtree::{Node, QuadTree, QuadTreeConfig, Visitor};

/// File the demos read their settings from, if present.
pub const CONFIG_FILE: &str = "quadtree-demo.toml";

/// Settings for the host loops.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// World width.
    pub width: f64,
    /// World height.
    pub height: f64,
    /// Number of boxes to spawn.
    pub objects: u32,
    /// Side length of each box.
    pub object_size: f64,
    /// Number of simulated frames.
    pub ticks: u32,
    /// Render the tree every this many frames (0 disables).
    pub dump_every: u32,
    /// Seed for box placement and motion.
    pub seed: u64,
    /// Tree tuning.
    pub tree: QuadTreeConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            objects: 400,
            object_size: 5.0,
            ticks: 120,
            dump_every: 60,
            seed: 0x5EED,
            tree: QuadTreeConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Load settings from [`CONFIG_FILE`] or fall back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load settings from `path` or fall back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config: Self = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            info!("No {} found, using defaults", path.display());
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject worlds that cannot hold a single object.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.object_size.is_nan() || self.object_size <= 0.0 {
            anyhow::bail!("object_size must be positive, got {}", self.object_size);
        }
        if self.object_size >= self.width || self.object_size >= self.height {
            anyhow::bail!(
                "object_size {} does not fit a {}x{} world",
                self.object_size,
                self.width,
                self.height
            );
        }
        Ok(())
    }
}

/// Install a `tracing` subscriber honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Renders a tree into a character grid.
///
/// Region outlines are drawn with `+`, `-` and `|`; nodes held in leaves as
/// `#` and boundary crossers as `@`.
#[derive(Debug)]
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    origin: Point,
    scale_x: f64,
    scale_y: f64,
    cells: Vec<u8>,
}

impl AsciiCanvas {
    /// A canvas of `cols` x `rows` characters covering `world`.
    pub fn new(world: Rect, cols: usize, rows: usize) -> Self {
        let cols = cols.max(2);
        let rows = rows.max(2);
        Self {
            cols,
            rows,
            origin: world.origin(),
            scale_x: (cols - 1) as f64 / world.width(),
            scale_y: (rows - 1) as f64 / world.height(),
            cells: vec![b' '; cols * rows],
        }
    }

    /// Draw `tree` and return the rendered text.
    pub fn render(mut self, tree: &QuadTree) -> String {
        tree.visit(&mut self);
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols) {
            let _ = writeln!(out, "{}", String::from_utf8_lossy(row).trim_end());
        }
        out
    }

    fn cell(&self, x: f64, y: f64) -> (usize, usize) {
        let col = ((x - self.origin.x) * self.scale_x)
            .round()
            .clamp(0.0, (self.cols - 1) as f64) as usize;
        let row = ((y - self.origin.y) * self.scale_y)
            .round()
            .clamp(0.0, (self.rows - 1) as f64) as usize;
        (col, row)
    }

    fn put(&mut self, col: usize, row: usize, ch: u8) {
        let cell = &mut self.cells[row * self.cols + col];
        // Nodes win over outlines; corners win over edges.
        let rank = |c: u8| match c {
            b'#' | b'@' => 3,
            b'+' => 2,
            b'-' | b'|' => 1,
            _ => 0,
        };
        if rank(ch) >= rank(*cell) {
            *cell = ch;
        }
    }

    fn outline(&mut self, rect: Rect) {
        let (c0, r0) = self.cell(rect.x0, rect.y0);
        let (c1, r1) = self.cell(rect.x1, rect.y1);
        for col in c0..=c1 {
            self.put(col, r0, b'-');
            self.put(col, r1, b'-');
        }
        for row in r0..=r1 {
            self.put(c0, row, b'|');
            self.put(c1, row, b'|');
        }
        for (col, row) in [(c0, r0), (c1, r0), (c0, r1), (c1, r1)] {
            self.put(col, row, b'+');
        }
    }
}

impl Visitor for AsciiCanvas {
    fn level(&mut self, level: &QuadTree) {
        self.outline(level.region().to_rect());
    }

    fn node(&mut self, _level: &QuadTree, node: &Node, crosser: bool) {
        let center = node.aabb.center();
        let (col, row) = self.cell(center.x, center.y);
        self.put(col, row, if crosser { b'@' } else { b'#' });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_quadtree::Aabb;

    #[test]
    fn config_parses_partial_toml() {
        let config: DemoConfig = toml::from_str(
            r#"
            objects = 10
            [tree]
            max_capacity = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.objects, 10);
        assert_eq!(config.tree.max_capacity, 8);
        assert_eq!(config.width, 800.0);
    }

    #[test]
    fn config_rejects_oversized_objects() {
        let config: DemoConfig = toml::from_str("width = 10.0\nobject_size = 10.0").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("does not fit"));

        let config: DemoConfig = toml::from_str("object_size = 0.0").unwrap();
        assert!(config.validate().is_err());
        assert!(DemoConfig::default().validate().is_ok());
    }

    #[test]
    fn canvas_marks_crossers() {
        let mut tree = QuadTree::new(Aabb::from_xywh(0.0, 0.0, 100.0, 100.0));
        for (i, x) in [5.0, 15.0, 60.0, 70.0, 80.0].into_iter().enumerate() {
            assert!(tree.insert(Node::new(i as u32, Aabb::from_xywh(x, 5.0, 1.0, 1.0))));
        }
        assert!(tree.insert(Node::new(9, Aabb::from_xywh(45.0, 45.0, 10.0, 10.0))));
        let text = AsciiCanvas::new(tree.region().to_rect(), 21, 11).render(&tree);
        assert_eq!(text.matches('@').count(), 1);
        assert!(text.contains('#'));
        assert_eq!(text.lines().count(), 11);
    }
}
