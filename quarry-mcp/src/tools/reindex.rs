use quarry_retriever::RetrievalService;
use tracing::info;

pub async fn reindex(service: &RetrievalService) -> Result<String, String> {
    info!("Processing reindex request");

    let stats = service
        .reindex()
        .await
        .map_err(|e| format!("Reindex failed: {e:#}"))?;

    let mut response = format!(
        "# Reindex Complete\n\n**Files**: {}\n**Chunks**: {}\n",
        stats.files_indexed, stats.chunks_created
    );
    if !stats.skipped.is_empty() {
        response.push_str(&format!("**Skipped**: {}\n", stats.skipped.len()));
        for skipped in &stats.skipped {
            response.push_str(&format!("- `{}`: {}\n", skipped.path, skipped.reason));
        }
    }
    Ok(response)
}
