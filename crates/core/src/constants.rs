//! Constants used throughout the chatlens core crate.

/// Tag key written by [`crate::display::StampAdapter`] when no key is configured.
pub const DEFAULT_STAMP_KEY: &str = "owner";

/// Environment variable naming the YAML config file. Read once by the binary at startup.
pub const CONFIG_ENV_VAR: &str = "CHATLENS_CONFIG";

/// Serialisation of an item tag that the display adapter removed entirely.
pub const EMPTY_TAG: &str = "{}";
