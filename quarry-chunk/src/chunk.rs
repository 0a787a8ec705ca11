//! Line-oriented chunking with a trailing overlap window.
//!
//! Files are split into newline-delimited lines which are accumulated into a
//! buffer until adding the next line would push the cumulative character count
//! over `chunk_size`. The buffer is then emitted as a [`Chunk`] and the next
//! buffer is seeded with a suffix of the just-emitted lines whose total length
//! stays within `chunk_overlap`, preserving original order. Character counts
//! cover line content only; the joining newlines are not charged against the
//! budget. A single line longer than `chunk_size` is emitted unsplit.
//!
//! Each chunk carries the owning file's path, [`Category`] and detected
//! language, a deterministic blake3 id of its content, and one extracted
//! metadata line (a heading for documentation, a declaration signature for
//! code).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content classification for indexed files.
///
/// Categories are a closed set validated when configuration is loaded, so a
/// typo in a pattern group or a search filter fails early instead of silently
/// matching nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Documentation,
    Code,
    Schema,
    Config,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Documentation,
        Category::Code,
        Category::Schema,
        Category::Config,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Documentation => "documentation",
            Category::Code => "code",
            Category::Schema => "schema",
            Category::Config => "config",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for category names outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}' (expected one of: all, documentation, code, schema, config)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "documentation" => Ok(Category::Documentation),
            "code" => Ok(Category::Code),
            "schema" => Ok(Category::Schema),
            "config" => Ok(Category::Config),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Parse a filter value where `"all"` means no filter.
///
/// Returns `Ok(None)` for the wildcard and `Ok(Some(..))` for a concrete
/// category; anything else is rejected so filter typos surface to the caller.
pub fn parse_filter(s: &str) -> Result<Option<Category>, UnknownCategory> {
    if s == "all" {
        return Ok(None);
    }
    s.parse().map(Some)
}

/// A bounded, possibly-overlapping slice of a file's text. The unit of
/// embedding and retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// The slice's text.
    pub content: String,
    /// Root-relative path of the owning file.
    pub file_path: String,
    /// Category inherited from the owning file.
    pub category: Category,
    /// Language inherited from the owning file (empty if unknown).
    pub language: String,
    /// Hex blake3 hash of `content`; stable across rebuilds when the content
    /// is unchanged.
    pub id: String,
    /// A single extracted heading or declaration line, or empty.
    pub metadata: String,
}

/// Derive a display language from a file extension.
///
/// Returns an empty string for unknown extensions.
pub fn detect_language(file_path: &str) -> String {
    let ext = match file_path.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => return String::new(),
    };
    match ext {
        "ts" | "tsx" => "typescript",
        "js" | "jsx" => "javascript",
        "py" => "python",
        "rs" => "rust",
        "md" => "markdown",
        "json" => "json",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "prisma" => "prisma",
        _ => "",
    }
    .to_string()
}

/// Declaration markers that qualify a code line as chunk metadata.
const CODE_MARKERS: &[&str] = &[
    "export const",
    "export function",
    "class ",
    "pub fn ",
    "pub struct ",
    "def ",
];

/// Splits file content into overlapping [`Chunk`]s.
#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Chunker {
    /// Create a chunker with the given size and overlap budgets (characters).
    ///
    /// The overlap is held strictly below `chunk_size` so the buffer always
    /// shrinks when a chunk is emitted; configuration validation warns when
    /// it has to clamp.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size.saturating_sub(1)),
        }
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split `content` into ordered chunks for the given file.
    ///
    /// An empty file yields no chunks; a file whose content fits in
    /// `chunk_size` yields exactly one chunk equal to the whole content.
    pub fn chunk(&self, content: &str, file_path: &str, category: Category) -> Vec<Chunk> {
        if content.is_empty() {
            return Vec::new();
        }

        let language = detect_language(file_path);
        let mut chunks = Vec::new();
        let mut buffer: Vec<&str> = Vec::new();
        let mut buffer_len = 0usize;

        for line in content.split('\n') {
            let line_len = line.chars().count();
            if buffer_len + line_len > self.chunk_size && !buffer.is_empty() {
                chunks.push(self.finish_chunk(&buffer, file_path, category, &language));

                // Seed the next buffer with a trailing overlap window: walk
                // backward until the next (earlier) line would exceed the
                // overlap budget, keeping original order.
                let mut overlap_start = buffer.len();
                let mut overlap_len = 0usize;
                for (idx, prev) in buffer.iter().enumerate().rev() {
                    let prev_len = prev.chars().count();
                    if overlap_len + prev_len > self.chunk_overlap {
                        break;
                    }
                    overlap_len += prev_len;
                    overlap_start = idx;
                }
                buffer.drain(..overlap_start);
                buffer_len = overlap_len;
            }
            buffer.push(line);
            buffer_len += line_len;
        }

        if !buffer.is_empty() {
            chunks.push(self.finish_chunk(&buffer, file_path, category, &language));
        }

        chunks
    }

    fn finish_chunk(
        &self,
        lines: &[&str],
        file_path: &str,
        category: Category,
        language: &str,
    ) -> Chunk {
        let content = lines.join("\n");
        let id = hex::encode(blake3::hash(content.as_bytes()).as_bytes());
        let metadata = extract_metadata(&content, category);
        Chunk {
            content,
            file_path: file_path.to_string(),
            category,
            language: language.to_string(),
            id,
            metadata,
        }
    }
}

/// Pull one representative line out of a chunk.
///
/// Code chunks yield the first declaration-looking line among the first ten;
/// documentation chunks yield the first `#`-heading among the first five.
/// Everything else gets an empty string.
fn extract_metadata(content: &str, category: Category) -> String {
    match category {
        Category::Code => content
            .lines()
            .take(10)
            .find(|line| CODE_MARKERS.iter().any(|m| line.contains(m)))
            .map(|line| line.trim().to_string())
            .unwrap_or_default(),
        Category::Documentation => content
            .lines()
            .take(5)
            .find(|line| line.starts_with('#'))
            .map(|line| line.trim().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(chunk: &Chunk) -> Vec<&str> {
        chunk.content.split('\n').collect()
    }

    #[test]
    fn empty_file_yields_no_chunks() {
        let chunker = Chunker::new(100, 10);
        assert!(chunker.chunk("", "docs/a.md", Category::Documentation).is_empty());
    }

    #[test]
    fn short_file_yields_single_chunk() {
        let chunker = Chunker::new(1000, 100);
        let content = "# Title\n\nA short document.";
        let chunks = chunker.chunk(content, "docs/a.md", Category::Documentation);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, content);
        assert_eq!(chunks[0].file_path, "docs/a.md");
        assert_eq!(chunks[0].language, "markdown");
    }

    #[test]
    fn zero_overlap_chunks_share_no_lines() {
        let chunker = Chunker::new(40, 0);
        let content = (0..20)
            .map(|i| format!("line number {i:04}"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = chunker.chunk(&content, "src/a.py", Category::Code);
        assert!(chunks.len() > 1);

        // With no overlap, concatenating the chunks' lines reconstructs the
        // original file exactly.
        let reconstructed: Vec<&str> = chunks.iter().flat_map(lines_of).collect();
        let original: Vec<&str> = content.split('\n').collect();
        assert_eq!(reconstructed, original);
    }

    #[test]
    fn overlap_window_is_a_bounded_suffix_of_previous_chunk() {
        let overlap = 40;
        let chunker = Chunker::new(100, overlap);
        let content = (0..30)
            .map(|i| format!("row {i:03} with some padding"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = chunker.chunk(&content, "src/a.py", Category::Code);
        assert!(chunks.len() > 1);

        for pair in chunks.windows(2) {
            let prev = lines_of(&pair[0]);
            let next = lines_of(&pair[1]);
            // Longest suffix of `prev` that `next` begins with.
            let shared = (0..prev.len())
                .find(|&start| next.starts_with(&prev[start..]))
                .map(|start| prev.len() - start)
                .unwrap_or(0);
            let shared_len: usize = next[..shared].iter().map(|l| l.chars().count()).sum();
            assert!(
                shared_len <= overlap,
                "overlap {shared_len} exceeds budget {overlap}"
            );
        }
    }

    #[test]
    fn overlapping_chunks_reconstruct_original_lines() {
        let chunker = Chunker::new(80, 25);
        let original: Vec<String> = (0..25).map(|i| format!("content line {i:02}")).collect();
        let content = original.join("\n");
        let chunks = chunker.chunk(&content, "notes.txt", Category::Config);

        // Drop each chunk's overlap prefix, then concatenation must equal the
        // original line sequence.
        let mut reconstructed: Vec<String> = Vec::new();
        for chunk in &chunks {
            let lines = lines_of(chunk);
            let skip = (0..=lines.len())
                .rev()
                .find(|&n| {
                    n <= reconstructed.len()
                        && reconstructed[reconstructed.len() - n..]
                            .iter()
                            .map(String::as_str)
                            .eq(lines[..n].iter().copied())
                })
                .unwrap_or(0);
            reconstructed.extend(lines[skip..].iter().map(|l| l.to_string()));
        }
        assert_eq!(reconstructed, original);
    }

    #[test]
    fn oversized_single_line_is_not_truncated() {
        let chunker = Chunker::new(10, 2);
        let long_line = "x".repeat(50);
        let chunks = chunker.chunk(&long_line, "data.json", Category::Schema);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, long_line);
    }

    #[test]
    fn overlap_is_clamped_below_chunk_size() {
        let chunker = Chunker::new(30, 30);
        assert_eq!(chunker.chunk_overlap(), 29);
        // Must still terminate and make progress.
        let content = (0..40)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = chunker.chunk(&content, "a.txt", Category::Config);
        assert!(chunks.len() > 1);
    }

    #[test]
    fn documentation_metadata_is_first_heading() {
        let chunker = Chunker::new(1000, 0);
        let content = "intro text\n## Setup\nmore text";
        let chunks = chunker.chunk(content, "docs/setup.md", Category::Documentation);
        assert_eq!(chunks[0].metadata, "## Setup");
    }

    #[test]
    fn code_metadata_is_first_declaration() {
        let chunker = Chunker::new(1000, 0);
        let content = "import fs from 'fs';\nexport const loadConfig = () => {};\n";
        let chunks = chunker.chunk(content, "src/config.ts", Category::Code);
        assert_eq!(chunks[0].metadata, "export const loadConfig = () => {};");

        let rust = "use std::fmt;\n\npub struct Widget {\n    id: u64,\n}\n";
        let chunks = chunker.chunk(rust, "src/widget.rs", Category::Code);
        assert_eq!(chunks[0].metadata, "pub struct Widget {");
    }

    #[test]
    fn metadata_empty_for_other_categories() {
        let chunker = Chunker::new(1000, 0);
        let chunks = chunker.chunk("# not a heading here", "app.yml", Category::Config);
        assert_eq!(chunks[0].metadata, "");
    }

    #[test]
    fn chunk_ids_are_deterministic_for_same_content() {
        let chunker = Chunker::new(1000, 0);
        let a = chunker.chunk("same text", "a.md", Category::Documentation);
        let b = chunker.chunk("same text", "b.md", Category::Documentation);
        assert_eq!(a[0].id, b[0].id);
        assert_eq!(a[0].id.len(), 64);
    }

    #[test]
    fn filter_parsing() {
        assert_eq!(parse_filter("all").unwrap(), None);
        assert_eq!(parse_filter("code").unwrap(), Some(Category::Code));
        assert!(parse_filter("kode").is_err());
    }

    #[test]
    fn language_detection() {
        assert_eq!(detect_language("src/app.tsx"), "typescript");
        assert_eq!(detect_language("schema.prisma"), "prisma");
        assert_eq!(detect_language("Makefile"), "");
        assert_eq!(detect_language("deep/path/mod.rs"), "rust");
    }
}
