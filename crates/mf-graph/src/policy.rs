//! Placement and connection policies applied by the graph.

use mf_core::Position;
use serde::{Deserialize, Serialize};

/// Rules checked by `connect` before an edge is committed.
///
/// Self-loops are always rejected. Longer cycles are allowed unless
/// `allow_cycles` is turned off, since decision steps commonly loop back
/// to an earlier action for another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectPolicy {
    pub allow_cycles: bool,
}

impl Default for ConnectPolicy {
    fn default() -> Self {
        Self { allow_cycles: true }
    }
}

/// Default placement of freshly added nodes: a left-to-right grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    pub origin: Position,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub columns: u32,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            origin: Position::new(80.0, 80.0),
            spacing_x: 220.0,
            spacing_y: 140.0,
            columns: 4,
        }
    }
}

impl LayoutPolicy {
    /// Position of the `slot`-th placed node.
    pub fn slot(&self, slot: u32) -> Position {
        let columns = self.columns.max(1);
        let col = slot % columns;
        let row = slot / columns;
        self.origin.translated(
            f64::from(col) * self.spacing_x,
            f64::from(row) * self.spacing_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_wrap_after_columns() {
        let layout = LayoutPolicy::default();
        assert_eq!(layout.slot(0), Position::new(80.0, 80.0));
        assert_eq!(layout.slot(1), Position::new(300.0, 80.0));
        assert_eq!(layout.slot(4), Position::new(80.0, 220.0));
    }

    #[test]
    fn zero_columns_behaves_as_one() {
        let layout = LayoutPolicy {
            columns: 0,
            ..LayoutPolicy::default()
        };
        assert_eq!(layout.slot(2), Position::new(80.0, 360.0));
    }
}
