//! Configuration constants for photos app services

/// Application metadata
pub mod app {
    /// Application name (used for the data directory, etc.)
    pub const NAME: &str = "photos";
}

/// Persistence-related configuration
pub mod storage {
    /// JSON favorites file
    pub const FAVORITES_FILE: &str = "favorites.json";

    /// SQLite favorites database
    pub const FAVORITES_DB: &str = "favorites.db";

    /// Settings file
    pub const SETTINGS_FILE: &str = "settings.json";

    /// Favorites file format version for migrations
    pub const FAVORITES_VERSION: u32 = 1;

    /// Settings file format version for migrations
    pub const SETTINGS_VERSION: u32 = 1;

    /// SQLite schema version
    pub const SCHEMA_VERSION: i32 = 1;
}

/// Controller configuration
pub mod controller {
    /// Capacity of the command channel
    pub const COMMAND_QUEUE: usize = 64;
}
