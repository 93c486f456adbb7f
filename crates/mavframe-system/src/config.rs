use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use mavframe_frame::{CapacityTable, FrameConfig, MAX_MESSAGE_ID};

use crate::error::{Result, SystemError};

/// Maximum bytes accepted from a capacity table file.
pub const MAX_CAPACITY_FILE_SIZE: usize = 256 * 1024;

/// Controls how a [`crate::System`] builds frames and registers components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    /// Frame construction settings shared by every frame the system creates.
    pub frame: FrameConfig,
    /// Maximum number of registered components (at most 255).
    pub max_components: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            frame: FrameConfig::default(),
            max_components: 255,
        }
    }
}

/// Parse a capacity table from a JSON object of `"<message id>": <capacity>`.
pub fn parse_capacity_table(json: &str) -> Result<CapacityTable> {
    let raw: BTreeMap<String, u8> = serde_json::from_str(json)?;
    let mut table = CapacityTable::empty();
    for (key, capacity) in raw {
        let id: u32 = key
            .trim()
            .parse()
            .map_err(|_| SystemError::LoadFailed(format!("invalid message id: {key:?}")))?;
        if id > MAX_MESSAGE_ID {
            return Err(SystemError::LoadFailed(format!(
                "message id {id} does not fit in 24 bits"
            )));
        }
        table.insert(id, capacity);
    }
    Ok(table)
}

/// Load a capacity table from a JSON file.
pub fn load_capacity_table(path: &Path) -> Result<CapacityTable> {
    let file = std::fs::File::open(path)
        .map_err(|err| SystemError::LoadFailed(format!("{}: {err}", path.display())))?;

    let read_limit = u64::try_from(MAX_CAPACITY_FILE_SIZE.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| SystemError::LoadFailed(format!("{}: {err}", path.display())))?;
    if content.len() > MAX_CAPACITY_FILE_SIZE {
        return Err(SystemError::LoadFailed(format!(
            "capacity table too large: {}",
            path.display()
        )));
    }

    let table = parse_capacity_table(&content)?;
    tracing::debug!(path = %path.display(), entries = table.len(), "loaded capacity table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_id_keyed_object() {
        let table = parse_capacity_table(r#"{"0": 9, "1": 43, "70000": 12}"#).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), Some(9));
        assert_eq!(table.get(70_000), Some(12));
    }

    #[test]
    fn rejects_non_numeric_keys() {
        let err = parse_capacity_table(r#"{"heartbeat": 9}"#).unwrap_err();
        assert!(matches!(err, SystemError::LoadFailed(_)));
    }

    #[test]
    fn rejects_wide_ids() {
        let err = parse_capacity_table(r#"{"16777216": 9}"#).unwrap_err();
        assert!(matches!(err, SystemError::LoadFailed(_)));
    }

    #[test]
    fn rejects_capacity_above_maximum() {
        let err = parse_capacity_table(r#"{"0": 300}"#).unwrap_err();
        assert!(matches!(err, SystemError::InvalidJson(_)));
    }

    #[test]
    fn load_missing_file_fails() {
        let err = load_capacity_table(Path::new("/nonexistent/capacities.json")).unwrap_err();
        assert!(matches!(err, SystemError::LoadFailed(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = std::env::temp_dir().join(format!("mavframe-capacities-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("capacities.json");
        std::fs::write(&path, r#"{"42": 18}"#).unwrap();

        let table = load_capacity_table(&path).unwrap();
        assert_eq!(table.get(42), Some(18));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
