// src/routes/binary.rs
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::AppState;
use crate::elf::{AnalyzeError, ElfAnalyzer, extract_strings, strings_output_path};

/// Upload extensions accepted by the analysis service.
const ALLOWED_EXTENSIONS: &[&str] = &["exe", "elf"];

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_name: String,
    pub size_bytes: usize,
    pub path: String,
}

/// Raw output of an ad-hoc tool invocation.
#[derive(Debug, Serialize)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    pub filename: String,
}

type RouteError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: &str, message: String) -> RouteError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
}

fn internal_error(error: &str, message: String) -> RouteError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
}

fn analyze_error_response(e: AnalyzeError) -> RouteError {
    match e {
        AnalyzeError::NotElf { .. } => bad_request("not_elf", e.to_string()),
        AnalyzeError::ToolMissing(_) => internal_error("tool_missing", e.to_string()),
        AnalyzeError::Io(_) => internal_error("io_error", e.to_string()),
    }
}

/// Uploaded filenames become filesystem paths under the upload directory,
/// so anything path-shaped is rejected outright.
fn sanitize_filename(name: &str) -> Result<&str, RouteError> {
    if name.is_empty() {
        return Err(bad_request("missing_filename", "No filename provided".to_string()));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(bad_request(
            "invalid_filename",
            format!("Filename '{name}' contains path components"),
        ));
    }
    Ok(name)
}

/// Resolve a previously uploaded file, rejecting traversal and absences.
fn resolve_upload(state: &AppState, filename: &str) -> Result<PathBuf, RouteError> {
    let filename = sanitize_filename(filename)?;
    let path = state.config.upload_dir.join(filename);
    if !path.exists() {
        return Err(bad_request(
            "file_not_found",
            format!("No uploaded file named '{filename}'"),
        ));
    }
    Ok(path)
}

// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "elfscout",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// POST /binary/upload - store a binary for later analysis
pub async fn upload_binary(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, RouteError> {
    let mut file_name = String::new();
    let mut contents = vec![];

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request("multipart_error", format!("Failed to parse multipart form: {e}")))?
    {
        if let Some(name) = field.file_name().map(|s| s.to_string()) {
            file_name = name;
        }
        contents = field
            .bytes()
            .await
            .map_err(|e| bad_request("read_error", format!("Failed to read file contents: {e}")))?
            .to_vec();
    }

    let file_name = sanitize_filename(&file_name)?.to_string();
    if contents.is_empty() {
        return Err(bad_request(
            "empty_file",
            "No file content provided".to_string(),
        ));
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(bad_request(
            "invalid_extension",
            format!(
                "Extension '{extension}' is not allowed (expected one of {ALLOWED_EXTENSIONS:?})"
            ),
        ));
    }

    let path = state.config.upload_dir.join(&file_name);
    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| internal_error("io_error", format!("Failed to create upload dir: {e}")))?;
    tokio::fs::write(&path, &contents)
        .await
        .map_err(|e| internal_error("io_error", format!("Failed to store upload: {e}")))?;

    tracing::info!("stored upload '{}' ({} bytes)", file_name, contents.len());
    Ok(Json(UploadResponse {
        file_name,
        size_bytes: contents.len(),
        path: path.to_string_lossy().into_owned(),
    }))
}

// GET /binary/analyze?filename= - full analysis of an uploaded file
pub async fn analyze_binary(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Json<crate::elf::AnalysisResult>, RouteError> {
    let path = resolve_upload(&state, &query.filename)?;
    let analyzer = ElfAnalyzer::new(&state.config, &path);
    let result = analyzer
        .analyze_with_strings()
        .await
        .map_err(analyze_error_response)?;
    Ok(Json(result))
}

/// Invoke one tool with stdout/stderr captured separately, for the ad-hoc
/// endpoints that front the raw tool output.
async fn run_tool(program: &str, args: &[&str]) -> ToolOutput {
    match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
    {
        Ok(output) => ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            error: if output.status.success() {
                None
            } else {
                Some(format!("{program} exited with {}", output.status))
            },
        },
        Err(e) => ToolOutput {
            stdout: String::new(),
            stderr: String::new(),
            error: Some(format!("failed to run {program}: {e}")),
        },
    }
}

// GET /binary/checksec?filename= - raw mitigation-checker output
pub async fn checksec_binary(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Json<ToolOutput>, RouteError> {
    let path = resolve_upload(&state, &query.filename)?;
    let arg = format!("--file={}", path.to_string_lossy());
    Ok(Json(run_tool(&state.config.checksec_bin, &[arg.as_str()]).await))
}

// GET /binary/strings?filename= - run extraction, persist, return contents
pub async fn strings_binary(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Json<ToolOutput>, RouteError> {
    let path = resolve_upload(&state, &query.filename)?;
    let saved = extract_strings(&state.config.strings_bin, &path, &state.config.logs_dir)
        .await
        .map_err(analyze_error_response)?;
    let contents = tokio::fs::read_to_string(&saved)
        .await
        .map_err(|e| internal_error("io_error", format!("Failed to read strings file: {e}")))?;
    Ok(Json(ToolOutput {
        stdout: contents.trim().to_string(),
        stderr: String::new(),
        error: None,
    }))
}

// GET /binary/strings/saved?filename= - return a previously persisted artifact
pub async fn read_saved_strings(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Json<ToolOutput>, RouteError> {
    let filename = sanitize_filename(&query.filename)?;
    let saved = strings_output_path(&state.config.logs_dir, std::path::Path::new(filename));
    if !saved.exists() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "not_found".to_string(),
                message: format!("No strings artifact for '{filename}'"),
            }),
        ));
    }
    let contents = tokio::fs::read_to_string(&saved)
        .await
        .map_err(|e| internal_error("io_error", format!("Failed to read strings file: {e}")))?;
    Ok(Json(ToolOutput {
        stdout: contents.trim().to_string(),
        stderr: String::new(),
        error: None,
    }))
}
