use std::collections::BTreeMap;

use mavframe_frame::{Frame, FrameFactory, ProtocolVersion};
use serde::Serialize;

use crate::component::Component;
use crate::config::SystemConfig;
use crate::error::{Result, SystemError};

/// Highest component id.
pub const MAX_COMPONENT_ID: u8 = 255;

/// Id used when a caller does not pick a system id.
pub const DEFAULT_SYSTEM_ID: u8 = 1;

/// Component registered on every new system.
pub const DEFAULT_COMPONENT_ID: u8 = 1;

/// An originating system: issues component ids and sequence numbers and
/// builds frames stamped with them.
///
/// Sequence numbers cycle through 1..=255 and never take the value 0.
#[derive(Debug, Clone)]
pub struct System {
    version: ProtocolVersion,
    id: u8,
    name: String,
    components: BTreeMap<u8, Component>,
    sequence: u8,
    factory: FrameFactory,
    max_components: usize,
}

/// Serializable snapshot of a system's addressing state.
#[derive(Debug, Clone, Serialize)]
pub struct SystemSummary {
    pub id: u8,
    pub name: String,
    pub marker: u8,
    pub sequence: u8,
    pub components: Vec<Component>,
}

impl System {
    /// Create a system with default config and one default component.
    pub fn new(version: ProtocolVersion, id: u8, name: impl Into<String>) -> Self {
        Self::with_config(version, id, name, SystemConfig::default())
    }

    /// Create a system with explicit config and one default component.
    pub fn with_config(
        version: ProtocolVersion,
        id: u8,
        name: impl Into<String>,
        config: SystemConfig,
    ) -> Self {
        let mut components = BTreeMap::new();
        components.insert(
            DEFAULT_COMPONENT_ID,
            Component::default_for(DEFAULT_COMPONENT_ID),
        );
        Self {
            version,
            id,
            name: name.into(),
            components,
            sequence: 0,
            factory: FrameFactory::with_config(config.frame),
            max_components: config.max_components.clamp(1, usize::from(MAX_COMPONENT_ID)),
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Start marker stamped on every frame.
    pub fn marker(&self) -> u8 {
        self.version.marker()
    }

    /// Last issued sequence number, 0 before the first frame.
    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    pub fn factory(&self) -> &FrameFactory {
        &self.factory
    }

    /// Register a default-named component under the lowest free id.
    pub fn push_default_component(&mut self) -> Result<u8> {
        let id = self.next_free_id()?;
        self.components.insert(id, Component::default_for(id));
        Ok(id)
    }

    /// Register a named component under the lowest free id.
    pub fn push_component(&mut self, name: impl Into<String>) -> Result<u8> {
        let id = self.next_free_id()?;
        self.components.insert(id, Component::new(id, name));
        Ok(id)
    }

    /// Register a component at its own id, replacing any component there.
    pub fn place_component(&mut self, component: Component) -> Result<Option<Component>> {
        if component.id == 0 {
            return Err(SystemError::InvalidComponentId(component.id));
        }
        if !self.components.contains_key(&component.id)
            && self.components.len() >= self.max_components
        {
            return Err(SystemError::ComponentTableFull(self.components.len()));
        }
        Ok(self.components.insert(component.id, component))
    }

    pub fn component(&self, id: u8) -> Option<&Component> {
        self.components.get(&id)
    }

    /// Linear search by name.
    pub fn component_by_name(&self, name: &str) -> Option<&Component> {
        self.components.values().find(|c| c.name == name)
    }

    /// Registered components, ordered by id.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Issue the next sequence number.
    pub fn next_sequence(&mut self) -> u8 {
        self.sequence = following(self.sequence);
        tracing::debug!(system_id = self.id, sequence = self.sequence, "issued sequence");
        self.sequence
    }

    /// Build a frame for a registered component. The capacity comes from the
    /// configured table unless given explicitly.
    ///
    /// The sequence number is only consumed if the frame is built.
    pub fn create_frame(
        &mut self,
        component_id: u8,
        message_id: u32,
        capacity: Option<u8>,
    ) -> Result<Frame> {
        if !self.components.contains_key(&component_id) {
            return Err(SystemError::UnknownComponent(component_id));
        }
        let sequence = following(self.sequence);
        let frame = self.factory.create(
            self.marker(),
            sequence,
            self.id,
            component_id,
            message_id,
            capacity,
        )?;
        self.sequence = sequence;
        tracing::debug!(
            system_id = self.id,
            component_id,
            message_id,
            sequence,
            capacity = frame.capacity(),
            "created frame"
        );
        Ok(frame)
    }

    /// Build a frame with the table capacity for `message_id`.
    pub fn create_default_frame(&mut self, component_id: u8, message_id: u32) -> Result<Frame> {
        self.create_frame(component_id, message_id, None)
    }

    pub fn summary(&self) -> SystemSummary {
        SystemSummary {
            id: self.id,
            name: self.name.clone(),
            marker: self.marker(),
            sequence: self.sequence,
            components: self.components.values().cloned().collect(),
        }
    }

    fn next_free_id(&self) -> Result<u8> {
        if self.components.len() >= self.max_components {
            return Err(SystemError::ComponentTableFull(self.components.len()));
        }
        (1..=MAX_COMPONENT_ID)
            .find(|id| !self.components.contains_key(id))
            .ok_or(SystemError::ComponentTableFull(self.components.len()))
    }
}

fn following(sequence: u8) -> u8 {
    sequence % 255 + 1
}
