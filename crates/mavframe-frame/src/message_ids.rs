//! Message ids of the common telemetry set and their payload capacities.
//!
//! Capacities are the full (non-truncated) payload sizes in bytes.

pub const HEARTBEAT: u32 = 0;
pub const SYS_STATUS: u32 = 1;
pub const SYSTEM_TIME: u32 = 2;
pub const PING: u32 = 4;
pub const CHANGE_OPERATOR_CONTROL: u32 = 5;
pub const CHANGE_OPERATOR_CONTROL_ACK: u32 = 6;
pub const AUTH_KEY: u32 = 7;
pub const LINK_NODE_STATUS: u32 = 8;
pub const SET_MODE: u32 = 11;
pub const PARAM_REQUEST_READ: u32 = 20;
pub const PARAM_REQUEST_LIST: u32 = 21;
pub const PARAM_VALUE: u32 = 22;
pub const PARAM_SET: u32 = 23;
pub const GPS_RAW_INT: u32 = 24;
pub const GPS_STATUS: u32 = 25;
pub const SCALED_IMU: u32 = 26;
pub const RAW_IMU: u32 = 27;
pub const RAW_PRESSURE: u32 = 28;
pub const SCALED_PRESSURE: u32 = 29;
pub const ATTITUDE: u32 = 30;
pub const ATTITUDE_QUATERNION: u32 = 31;
pub const LOCAL_POSITION_NED: u32 = 32;
pub const GLOBAL_POSITION_INT: u32 = 33;
pub const RC_CHANNELS_SCALED: u32 = 34;
pub const RC_CHANNELS_RAW: u32 = 35;
pub const SERVO_OUTPUT_RAW: u32 = 36;
pub const MISSION_REQUEST_PARTIAL_LIST: u32 = 37;
pub const MISSION_WRITE_PARTIAL_LIST: u32 = 38;
pub const MISSION_ITEM: u32 = 39;
pub const MISSION_REQUEST: u32 = 40;
pub const MISSION_SET_CURRENT: u32 = 41;
pub const MISSION_CURRENT: u32 = 42;
pub const MISSION_REQUEST_LIST: u32 = 43;
pub const MISSION_COUNT: u32 = 44;
pub const MISSION_CLEAR_ALL: u32 = 45;
pub const MISSION_ITEM_REACHED: u32 = 46;
pub const MISSION_ACK: u32 = 47;
pub const SET_GPS_GLOBAL_ORIGIN: u32 = 48;
pub const GPS_GLOBAL_ORIGIN: u32 = 49;
pub const PARAM_MAP_RC: u32 = 50;
pub const MISSION_REQUEST_INT: u32 = 51;
pub const SAFETY_SET_ALLOWED_AREA: u32 = 54;
pub const SAFETY_ALLOWED_AREA: u32 = 55;
pub const ATTITUDE_QUATERNION_COV: u32 = 61;
pub const NAV_CONTROLLER_OUTPUT: u32 = 62;
pub const GLOBAL_POSITION_INT_COV: u32 = 63;

/// `(id, name, capacity)` for every catalogued message, ordered by id.
pub const CATALOGUE: &[(u32, &str, u8)] = &[
    (HEARTBEAT, "HEARTBEAT", 9),
    (SYS_STATUS, "SYS_STATUS", 43),
    (SYSTEM_TIME, "SYSTEM_TIME", 12),
    (PING, "PING", 14),
    (CHANGE_OPERATOR_CONTROL, "CHANGE_OPERATOR_CONTROL", 29),
    (CHANGE_OPERATOR_CONTROL_ACK, "CHANGE_OPERATOR_CONTROL_ACK", 33),
    (AUTH_KEY, "AUTH_KEY", 32),
    (LINK_NODE_STATUS, "LINK_NODE_STATUS", 36),
    (SET_MODE, "SET_MODE", 6),
    (PARAM_REQUEST_READ, "PARAM_REQUEST_READ", 20),
    (PARAM_REQUEST_LIST, "PARAM_REQUEST_LIST", 2),
    (PARAM_VALUE, "PARAM_VALUE", 25),
    (PARAM_SET, "PARAM_SET", 23),
    (GPS_RAW_INT, "GPS_RAW_INT", 54),
    (GPS_STATUS, "GPS_STATUS", 101),
    (SCALED_IMU, "SCALED_IMU", 22),
    (RAW_IMU, "RAW_IMU", 24),
    (RAW_PRESSURE, "RAW_PRESSURE", 16),
    (SCALED_PRESSURE, "SCALED_PRESSURE", 22),
    (ATTITUDE, "ATTITUDE", 28),
    (ATTITUDE_QUATERNION, "ATTITUDE_QUATERNION", 48),
    (LOCAL_POSITION_NED, "LOCAL_POSITION_NED", 32),
    (GLOBAL_POSITION_INT, "GLOBAL_POSITION_INT", 28),
    (RC_CHANNELS_SCALED, "RC_CHANNELS_SCALED", 23),
    (RC_CHANNELS_RAW, "RC_CHANNELS_RAW", 22),
    (SERVO_OUTPUT_RAW, "SERVO_OUTPUT_RAW", 37),
    (MISSION_REQUEST_PARTIAL_LIST, "MISSION_REQUEST_PARTIAL_LIST", 7),
    (MISSION_WRITE_PARTIAL_LIST, "MISSION_WRITE_PARTIAL_LIST", 7),
    (MISSION_ITEM, "MISSION_ITEM", 38),
    (MISSION_REQUEST, "MISSION_REQUEST", 5),
    (MISSION_SET_CURRENT, "MISSION_SET_CURRENT", 4),
    (MISSION_CURRENT, "MISSION_CURRENT", 18),
    (MISSION_REQUEST_LIST, "MISSION_REQUEST_LIST", 3),
    (MISSION_COUNT, "MISSION_COUNT", 9),
    (MISSION_CLEAR_ALL, "MISSION_CLEAR_ALL", 3),
    (MISSION_ITEM_REACHED, "MISSION_ITEM_REACHED", 2),
    (MISSION_ACK, "MISSION_ACK", 8),
    (SET_GPS_GLOBAL_ORIGIN, "SET_GPS_GLOBAL_ORIGIN", 21),
    (GPS_GLOBAL_ORIGIN, "GPS_GLOBAL_ORIGIN", 20),
    (PARAM_MAP_RC, "PARAM_MAP_RC", 37),
    (MISSION_REQUEST_INT, "MISSION_REQUEST_INT", 5),
    (SAFETY_SET_ALLOWED_AREA, "SAFETY_SET_ALLOWED_AREA", 27),
    (SAFETY_ALLOWED_AREA, "SAFETY_ALLOWED_AREA", 25),
    (ATTITUDE_QUATERNION_COV, "ATTITUDE_QUATERNION_COV", 84),
    (NAV_CONTROLLER_OUTPUT, "NAV_CONTROLLER_OUTPUT", 26),
    (GLOBAL_POSITION_INT_COV, "GLOBAL_POSITION_INT_COV", 36),
];

/// Returns the name of a catalogued message id.
pub fn message_name(id: u32) -> Option<&'static str> {
    CATALOGUE
        .iter()
        .find(|(entry, _, _)| *entry == id)
        .map(|(_, name, _)| *name)
}

/// Returns the payload capacity of a catalogued message id.
pub fn payload_capacity(id: u32) -> Option<u8> {
    CATALOGUE
        .iter()
        .find(|(entry, _, _)| *entry == id)
        .map(|(_, _, capacity)| *capacity)
}
