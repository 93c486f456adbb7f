use crate::config::FrameConfig;
use crate::error::Result;
use crate::frame::Frame;
use crate::header::HeaderFields;

/// Builds frames with their header pre-written and capacity resolved.
#[derive(Debug, Clone, Default)]
pub struct FrameFactory {
    config: FrameConfig,
}

impl FrameFactory {
    /// Create a factory with default configuration.
    pub fn new() -> Self {
        Self::with_config(FrameConfig::default())
    }

    /// Create a factory with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self { config }
    }

    /// Current factory configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Build a frame from individual header fields.
    ///
    /// `capacity` overrides the capacity table when given.
    pub fn create(
        &self,
        marker: u8,
        sequence: u8,
        system_id: u8,
        component_id: u8,
        message_id: u32,
        capacity: Option<u8>,
    ) -> Result<Frame> {
        self.build(
            HeaderFields::new(marker, sequence, system_id, component_id, message_id),
            capacity,
        )
    }

    /// Build a frame from header fields. The declared payload length in
    /// `fields` is replaced by the resolved capacity.
    pub fn build(&self, fields: HeaderFields, capacity: Option<u8>) -> Result<Frame> {
        fields.validate()?;
        let capacity = self.config.resolve_capacity(fields.message_id, capacity)?;
        let fields = HeaderFields {
            payload_len: capacity,
            ..fields
        };
        Frame::with_header(fields, self.config.coverage)
    }
}
