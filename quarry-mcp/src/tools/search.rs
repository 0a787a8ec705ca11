use quarry_chunk::parse_filter;
use quarry_retriever::RetrievalService;
use rmcp::schemars;
use serde::Deserialize;
use tracing::info;

const DEFAULT_MAX_RESULTS: u32 = 5;
const MAX_RESULTS_CAP: u32 = 10;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    #[schemars(description = "Natural language search query")]
    pub query: String,
    #[schemars(
        description = "Category filter: all, documentation, code, schema, or config (default all)"
    )]
    pub filter_type: Option<String>,
    #[schemars(description = "Maximum number of results, 1 to 10 (default 5)")]
    pub max_results: Option<u32>,
}

pub async fn search_codebase(
    service: &RetrievalService,
    request: SearchRequest,
) -> Result<String, String> {
    info!(
        "Processing search: query='{}', filter={:?}, max_results={:?}",
        request.query, request.filter_type, request.max_results
    );

    let filter = match request.filter_type.as_deref() {
        Some(raw) => parse_filter(raw).map_err(|e| e.to_string())?,
        None => None,
    };
    let max_results = request
        .max_results
        .unwrap_or(DEFAULT_MAX_RESULTS)
        .clamp(1, MAX_RESULTS_CAP) as usize;

    let results = service
        .search(&request.query, max_results, filter)
        .await
        .map_err(|e| format!("Search failed: {e:#}"))?;

    if results.is_empty() {
        return Ok(format!("No results found for: '{}'", request.query));
    }

    let mut response = format!("# Search Results: '{}'\n\n", request.query);
    for (i, result) in results.iter().enumerate() {
        response.push_str(&format!(
            "## {}. {}\n**Type**: {} | **Score**: {:.2}%\n\n```{}\n{}\n```\n\n---\n\n",
            i + 1,
            result.chunk.file_path,
            result.chunk.category,
            result.score * 100.0,
            result.chunk.language,
            result.chunk.content
        ));
    }
    Ok(response)
}
