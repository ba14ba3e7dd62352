//! Cost and duration estimate shown before a mission is handed off.
//! Linear in node count.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Estimator {
    pub seconds_per_node: f64,
    pub cost_per_node: f64,
}

impl Default for Estimator {
    fn default() -> Self {
        Self {
            seconds_per_node: 30.0,
            cost_per_node: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub estimated_seconds: f64,
    pub estimated_cost: f64,
}

impl Estimator {
    pub fn estimate(&self, node_count: usize) -> Estimate {
        let n = node_count as f64;
        Estimate {
            estimated_seconds: n * self.seconds_per_node,
            estimated_cost: n * self.cost_per_node,
        }
    }
}

/// Estimate with the default constants.
pub fn estimate(node_count: usize) -> Estimate {
    Estimator::default().estimate(node_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_in_node_count() {
        assert_eq!(
            estimate(0),
            Estimate {
                estimated_seconds: 0.0,
                estimated_cost: 0.0
            }
        );
        let four = estimate(4);
        assert_eq!(four.estimated_seconds, 120.0);
        assert_eq!(four.estimated_cost, 1.0);
        assert_eq!(estimate(4), four);
    }

    #[test]
    fn custom_constants() {
        let estimator = Estimator {
            seconds_per_node: 5.0,
            cost_per_node: 2.0,
        };
        let e = estimator.estimate(3);
        assert_eq!(e.estimated_seconds, 15.0);
        assert_eq!(e.estimated_cost, 6.0);
    }
}
