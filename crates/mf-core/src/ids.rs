use core::fmt;
use core::num::NonZeroU32;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Compact, stable identifier for a node in a mission graph.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<NodeId>` to be pointer-optimized
///
/// Rendered as `n<ordinal>` (ordinal = index + 1), which is also the
/// serialized form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(NonZeroU32);

impl NodeId {
    const PREFIX: &'static str = "n";

    /// Largest 0-based index that still has an ordinal.
    pub const MAX_INDEX: u32 = u32::MAX - 1;

    /// Create an id from a 0-based index by storing index+1.
    ///
    /// Returns `None` past [`Self::MAX_INDEX`].
    pub fn try_from_index(index: u32) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroU32::new).map(Self)
    }

    /// Like [`Self::try_from_index`] for indexes known to be in range;
    /// out-of-range indexes clamp to the last id. Allocation goes through
    /// `try_from_index`.
    pub fn from_index(index: u32) -> Self {
        Self::try_from_index(index).unwrap_or(Self(NonZeroU32::MAX))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// The 1-based ordinal shown in the rendered id.
    pub fn ordinal(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for NodeId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(Self::PREFIX).ok_or_else(|| CoreError::InvalidId {
            id: s.to_string(),
            reason: "node ids start with 'n'",
        })?;
        let ordinal: u32 = digits.parse().map_err(|_| CoreError::InvalidId {
            id: s.to_string(),
            reason: "node id suffix must be a positive integer",
        })?;
        NonZeroU32::new(ordinal)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidId {
                id: s.to_string(),
                reason: "node id ordinals start at 1",
            })
    }
}

impl TryFrom<String> for NodeId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

/// Identifier of a saved template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(Uuid);

impl TemplateId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TemplateId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| CoreError::InvalidId {
            id: s.to_string(),
            reason: "template ids are UUIDs",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_round_trip_index() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let id = NodeId::from_index(i);
            assert_eq!(id.index(), i);
            assert_eq!(id.ordinal(), i + 1);
        }
    }

    #[test]
    fn try_from_index_stops_at_last_ordinal() {
        let last = NodeId::try_from_index(NodeId::MAX_INDEX).unwrap();
        assert_eq!(last.ordinal(), u32::MAX);
        assert_eq!(last.to_string(), "n4294967295");
        assert_eq!(NodeId::try_from_index(u32::MAX), None);
    }

    #[test]
    fn option_node_id_is_small() {
        assert_eq!(
            core::mem::size_of::<NodeId>(),
            core::mem::size_of::<Option<NodeId>>()
        );
    }

    #[test]
    fn node_id_text_form() {
        let id = NodeId::from_index(6);
        assert_eq!(id.to_string(), "n7");
        assert_eq!("n7".parse::<NodeId>().unwrap(), id);
        assert!("n0".parse::<NodeId>().is_err());
        assert!("x7".parse::<NodeId>().is_err());
        assert!("n".parse::<NodeId>().is_err());
    }

    #[test]
    fn node_id_serializes_as_string() {
        let id = NodeId::from_index(2);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"n3\"");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<NodeId>("\"bogus\"").is_err());
    }

    #[test]
    fn template_ids_are_distinct() {
        let a = TemplateId::new();
        let b = TemplateId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string().parse::<TemplateId>().unwrap(), a);
    }
}
