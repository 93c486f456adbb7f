use std::collections::BTreeMap;

use crate::error::{FrameError, Result};
use crate::message_ids::CATALOGUE;
use crate::payload::MAX_PAYLOAD_LEN;

/// What to do when a message id has no configured capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownIdPolicy {
    /// Use the maximum payload size (255).
    #[default]
    DefaultToMaximum,
    /// Fail with [`FrameError::UnknownMessageId`].
    Reject,
}

/// Which frame bytes the checksum covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumCoverage {
    /// Every byte from the start marker through the end of the payload.
    #[default]
    IncludeMarker,
    /// Everything after the start marker through the end of the payload.
    ExcludeMarker,
}

/// Explicit message-id to payload-capacity map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityTable {
    entries: BTreeMap<u32, u8>,
}

impl CapacityTable {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every message in [`crate::message_ids::CATALOGUE`].
    pub fn common() -> Self {
        CATALOGUE
            .iter()
            .map(|&(id, _, capacity)| (id, capacity))
            .collect()
    }

    /// Set the capacity for `id`, returning the previous value.
    pub fn insert(&mut self, id: u32, capacity: u8) -> Option<u8> {
        self.entries.insert(id, capacity)
    }

    pub fn get(&self, id: u32) -> Option<u8> {
        self.entries.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.entries.iter().map(|(&id, &capacity)| (id, capacity))
    }
}

impl FromIterator<(u32, u8)> for CapacityTable {
    fn from_iter<I: IntoIterator<Item = (u32, u8)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(u32, u8)> for CapacityTable {
    fn extend<I: IntoIterator<Item = (u32, u8)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

/// Configuration for building frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameConfig {
    /// Payload capacity per message id. Default: the common catalogue.
    pub capacities: CapacityTable,
    /// Policy for ids missing from `capacities`. Default: maximum capacity.
    pub unknown_ids: UnknownIdPolicy,
    /// Checksum coverage. Default: marker included.
    pub coverage: ChecksumCoverage,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            capacities: CapacityTable::common(),
            unknown_ids: UnknownIdPolicy::default(),
            coverage: ChecksumCoverage::default(),
        }
    }
}

impl FrameConfig {
    /// Resolve the payload capacity for a frame.
    ///
    /// An explicit capacity always wins; otherwise the table is consulted and
    /// the unknown-id policy decides.
    pub fn resolve_capacity(&self, message_id: u32, explicit: Option<u8>) -> Result<u8> {
        if let Some(capacity) = explicit {
            return Ok(capacity);
        }
        if let Some(capacity) = self.capacities.get(message_id) {
            return Ok(capacity);
        }
        match self.unknown_ids {
            UnknownIdPolicy::DefaultToMaximum => {
                tracing::warn!(
                    message_id,
                    capacity = MAX_PAYLOAD_LEN,
                    "no capacity configured for message id, using maximum"
                );
                Ok(MAX_PAYLOAD_LEN as u8)
            }
            UnknownIdPolicy::Reject => Err(FrameError::UnknownMessageId(message_id)),
        }
    }
}
