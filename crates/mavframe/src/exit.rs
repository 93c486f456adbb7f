use std::fmt;
use std::io;

use mavframe_frame::FrameError;
use mavframe_system::SystemError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => USAGE,
        io::ErrorKind::BrokenPipe => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
        FrameError::CapacityExceeded { .. }
        | FrameError::OutOfBounds { .. }
        | FrameError::Incomplete { .. }
        | FrameError::UnknownMessageId(_)
        | FrameError::InvalidMarker(_)
        | FrameError::LengthMismatch { .. }
        | FrameError::MessageIdOutOfRange(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn system_error(context: &str, err: SystemError) -> CliError {
    match err {
        SystemError::Frame(err) => frame_error(context, err),
        SystemError::UnknownComponent(_)
        | SystemError::InvalidComponentId(_)
        | SystemError::ComponentTableFull(_) => CliError::usage(format!("{context}: {err}")),
        SystemError::LoadFailed(_) | SystemError::InvalidJson(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_errors_are_data_invalid() {
        let err = frame_error(
            "append failed",
            FrameError::CapacityExceeded {
                requested: 4,
                remaining: 1,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("append failed: "));
    }

    #[test]
    fn nested_frame_errors_map_through_system() {
        let err = system_error("build failed", SystemError::Frame(FrameError::InvalidMarker(1)));
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn component_errors_are_usage() {
        let err = system_error("build failed", SystemError::UnknownComponent(9));
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn missing_file_is_usage() {
        let err = io_error("read", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.code, USAGE);
    }
}
