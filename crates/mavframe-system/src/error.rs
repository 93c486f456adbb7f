use mavframe_frame::FrameError;

/// Errors raised by the addressing registry.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// Frame construction failed.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// No component with this id is registered on the system.
    #[error("no component registered with id {0}")]
    UnknownComponent(u8),

    /// Component id 0 is reserved.
    #[error("invalid component id {0} (valid range 1-255)")]
    InvalidComponentId(u8),

    /// Every component id is taken, or the configured limit was reached.
    #[error("component table full ({0} components)")]
    ComponentTableFull(usize),

    /// A capacity table could not be loaded.
    #[error("failed to load capacity table: {0}")]
    LoadFailed(String),

    /// A capacity table is not valid JSON.
    #[error("capacity table is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SystemError>;
