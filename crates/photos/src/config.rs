//! Configuration constants for the photos core

/// Paging defaults shared by every list screen
pub mod paging {
    /// Photos requested per page when the caller does not choose
    pub const DEFAULT_PER_PAGE: u32 = 10;

    /// First page number (pages are 1-based, like the photo-stock APIs)
    pub const FIRST_PAGE: u32 = 1;
}

/// Layout of the photo list
pub mod layout {
    /// Columns in list mode
    pub const SPAN_COUNT_LIST: u32 = 1;

    /// Columns in grid mode
    pub const SPAN_COUNT_GRID: u32 = 2;
}
