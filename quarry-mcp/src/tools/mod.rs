//! Tool implementations for the quarry MCP server.
//!
//! Each tool is a free function over the shared `RetrievalService`, kept
//! separate from the rmcp wiring so behavior is testable without a
//! transport. Tools return `Err(message)` for caller mistakes (bad filter,
//! unreadable file) and format everything else as markdown.

pub mod files;
pub mod reindex;
pub mod search;

use quarry_chunk::Category;

/// Display form for category section headings.
pub(crate) fn title(category: Category) -> &'static str {
    match category {
        Category::Documentation => "Documentation",
        Category::Code => "Code",
        Category::Schema => "Schema",
        Category::Config => "Config",
    }
}
