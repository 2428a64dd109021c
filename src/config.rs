//! Graph-wide configuration.
//!
//! The defaults reproduce the classic antenna map format: `.` marks an empty
//! cell and every other character is a frequency label.

/// Character that marks an empty grid cell by default.
pub const DEFAULT_EMPTY_MARKER: char = '.';

/// Options shared by the graph and the grid loader.
///
/// # Examples
///
/// ```rust
/// use antennagraph::GraphConfig;
///
/// let config = GraphConfig::default();
/// assert_eq!(config.empty_marker, '.');
/// assert!(config.reserve_vertex_capacity.is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
    /// Grid character that produces no vertex when loading a map.
    pub empty_marker: char,

    /// Optional pre-allocation hint for the vertex arena.
    ///
    /// Not a limit: the arena grows past it when needed.
    pub reserve_vertex_capacity: Option<usize>,
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_empty_marker(mut self, marker: char) -> Self {
        self.empty_marker = marker;
        self
    }

    pub fn with_vertex_capacity(mut self, capacity: usize) -> Self {
        self.reserve_vertex_capacity = Some(capacity);
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            empty_marker: DEFAULT_EMPTY_MARKER,
            reserve_vertex_capacity: None,
        }
    }
}
