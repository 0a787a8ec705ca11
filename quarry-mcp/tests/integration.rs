//! Tool-level integration tests over a real temporary project tree.
//!
//! These exercise the tool functions directly rather than the stdio
//! transport, using the deterministic stub embedding provider so no model
//! files are needed.

use quarry_chunk::Category;
use quarry_embed::StubEmbeddingProvider;
use quarry_mcp::ServerConfig;
use quarry_mcp::tools::files::{FileContextRequest, ListFilesRequest};
use quarry_mcp::tools::search::SearchRequest;
use quarry_mcp::tools::{files, reindex, search};
use quarry_retriever::{IndexConfig, RetrievalService};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

async fn indexed_service(dir: &TempDir) -> RetrievalService {
    let config = IndexConfig::new(dir.path())
        .with_patterns(Category::Documentation, &["docs/**/*.md"])
        .with_patterns(Category::Code, &["src/**/*.rs"]);
    let service = RetrievalService::new(config, Arc::new(StubEmbeddingProvider::new()));
    service.index_all().await.unwrap();
    service
}

#[tokio::test]
async fn search_formats_ranked_markdown_results() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "docs/sync.md",
        "# Calendar Sync\nreservation calendar synchronization details",
    );
    write(dir.path(), "src/other.rs", "pub fn unrelated() {}\n");
    let service = indexed_service(&dir).await;

    let response = search::search_codebase(
        &service,
        SearchRequest {
            query: "reservation calendar synchronization".to_string(),
            filter_type: None,
            max_results: None,
        },
    )
    .await
    .unwrap();

    assert!(response.starts_with("# Search Results: 'reservation calendar synchronization'"));
    assert!(response.contains("## 1. docs/sync.md"));
    assert!(response.contains("**Type**: documentation"));
    assert!(response.contains("```markdown"));
}

#[tokio::test]
async fn search_with_no_matches_says_so() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "docs/a.md", "# A\nsomething entirely different");
    let service = indexed_service(&dir).await;

    let response = search::search_codebase(
        &service,
        SearchRequest {
            query: "zzyzx qwfp".to_string(),
            filter_type: None,
            max_results: Some(3),
        },
    )
    .await
    .unwrap();
    assert_eq!(response, "No results found for: 'zzyzx qwfp'");
}

#[tokio::test]
async fn invalid_filter_is_rejected_with_valid_values() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "docs/a.md", "# A");
    let service = indexed_service(&dir).await;

    let err = search::search_codebase(
        &service,
        SearchRequest {
            query: "anything".to_string(),
            filter_type: Some("kode".to_string()),
            max_results: None,
        },
    )
    .await
    .unwrap_err();
    assert!(err.contains("unknown category 'kode'"));
    assert!(err.contains("documentation"));
}

#[tokio::test]
async fn file_context_returns_content_or_not_found() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "docs/a.md", "# A\nbody text");
    let service = indexed_service(&dir).await;

    let found = files::get_file_context(
        &service,
        FileContextRequest {
            file_path: "docs/a.md".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(found.starts_with("# docs/a.md\n\n```markdown\n# A\nbody text\n```"));

    let missing = files::get_file_context(
        &service,
        FileContextRequest {
            file_path: "docs/missing.md".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(missing, "File not found: docs/missing.md");
}

#[tokio::test]
async fn listing_groups_by_category() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "docs/a.md", "# A");
    write(dir.path(), "docs/b.md", "# B");
    write(dir.path(), "src/main.rs", "fn main() {}");
    let service = indexed_service(&dir).await;

    let response = files::list_indexed_files(&service, ListFilesRequest { filter_type: None })
        .await
        .unwrap();
    assert!(response.starts_with("# Indexed Files (3)"));
    assert!(response.contains("## Documentation (2)"));
    assert!(response.contains("## Code (1)"));
    assert!(response.contains("- `docs/a.md`"));

    let docs_only = files::list_indexed_files(
        &service,
        ListFilesRequest {
            filter_type: Some("documentation".to_string()),
        },
    )
    .await
    .unwrap();
    assert!(docs_only.starts_with("# Indexed Files (2)"));
    assert!(!docs_only.contains("## Code"));
}

#[tokio::test]
async fn reindex_reports_counts_and_picks_up_new_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "docs/a.md", "# A\nalpha");
    let service = indexed_service(&dir).await;

    write(dir.path(), "docs/b.md", "# B\nbeta");
    let response = reindex::reindex(&service).await.unwrap();
    assert!(response.starts_with("# Reindex Complete"));
    assert!(response.contains("**Files**: 2"));
    assert!(response.contains("**Chunks**: 2"));

    let listing = files::list_indexed_files(&service, ListFilesRequest { filter_type: None })
        .await
        .unwrap();
    assert!(listing.contains("- `docs/b.md`"));
}

#[test]
fn server_config_default_points_at_local_json() {
    let config = ServerConfig::default();
    assert_eq!(
        config.config_path,
        std::path::PathBuf::from("./quarry.json")
    );
}
