use crate::tools::title;
use quarry_chunk::parse_filter;
use quarry_retriever::{FileRecord, RetrievalService};
use rmcp::schemars;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FileContextRequest {
    #[schemars(description = "File path relative to the project root")]
    pub file_path: String,
}

pub async fn get_file_context(
    service: &RetrievalService,
    request: FileContextRequest,
) -> Result<String, String> {
    info!("Processing file context request: {}", request.file_path);

    let context = service
        .file_context(&request.file_path)
        .await
        .map_err(|e| format!("Failed to read {}: {e:#}", request.file_path))?;

    match context {
        Some(context) => Ok(format!(
            "# {}\n\n```{}\n{}\n```",
            context.path, context.language, context.content
        )),
        None => Ok(format!("File not found: {}", request.file_path)),
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFilesRequest {
    #[schemars(
        description = "Category filter: all, documentation, code, schema, or config (default all)"
    )]
    pub filter_type: Option<String>,
}

pub async fn list_indexed_files(
    service: &RetrievalService,
    request: ListFilesRequest,
) -> Result<String, String> {
    info!("Processing file listing: filter={:?}", request.filter_type);

    let filter = match request.filter_type.as_deref() {
        Some(raw) => parse_filter(raw).map_err(|e| e.to_string())?,
        None => None,
    };

    let files = service.list_indexed_files(filter).await;
    let mut response = format!("# Indexed Files ({})\n\n", files.len());

    let mut by_category: BTreeMap<_, Vec<&FileRecord>> = BTreeMap::new();
    for record in &files {
        by_category.entry(record.category).or_default().push(record);
    }
    for (category, records) in by_category {
        response.push_str(&format!("## {} ({})\n", title(category), records.len()));
        for record in records {
            response.push_str(&format!("- `{}`\n", record.path));
        }
    }
    Ok(response)
}
