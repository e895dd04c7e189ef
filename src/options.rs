//! Configuration options for extraction runs.
//!
//! The `Options` struct carries the traversal and output budgets. The
//! defaults are the engine's contractual limits; tests shrink them to
//! exercise cap behavior without building huge fixtures.

/// Configuration options for an extraction run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use pagesift::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     max_output_chars: 5_000,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of nodes one walk will visit.
    ///
    /// Every node popped from the traversal stack counts against this
    /// budget, including nodes later rejected by the visibility filter.
    ///
    /// Default: `1500`
    pub max_visited_nodes: usize,

    /// Character cap applied to serialized output (content Markdown and the
    /// interactive text form). Exceeding output is cut at this many
    /// characters and a truncation marker is appended.
    ///
    /// Default: `30000`
    pub max_output_chars: usize,

    /// Minimum cleaned text length; shorter paragraph, container, and leaf
    /// text is not emitted.
    ///
    /// Default: `5`
    pub min_text_len: usize,

    /// Character cap for captured control values (textarea contents).
    ///
    /// Default: `200`
    pub max_value_len: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_visited_nodes: 1500,
            max_output_chars: 30_000,
            min_text_len: 5,
            max_value_len: 200,
        }
    }
}
