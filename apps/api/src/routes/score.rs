use std::io::Write;
use std::path::Path;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::scoring::engine::ScoreReport;
use crate::state::AppState;

const SUPPORTED_EXTENSIONS: [&str; 2] = [".pdf", ".docx"];

/// An uploaded file held in memory until it is persisted for extraction.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
struct ScoreUploads {
    resume: Option<Upload>,
    jd: Option<Upload>,
}

/// POST /api/score
pub async fn handle_score(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScoreReport>, AppError> {
    info!("Received ATS score request");
    let uploads = read_uploads(multipart).await?;

    let (resume, jd) = match (uploads.resume, uploads.jd) {
        (Some(resume), Some(jd)) => (resume, jd),
        _ => {
            return Err(AppError::Validation(
                "Resume and Job Description files are required".to_string(),
            ))
        }
    };
    info!("Resume file: {}", resume.file_name);
    info!("JD file: {}", jd.file_name);

    if !is_supported(&resume.file_name) || !is_supported(&jd.file_name) {
        return Err(AppError::Validation(
            "Only PDF and DOCX files are supported".to_string(),
        ));
    }

    let engine = state.engine.clone();
    let outcome = tokio::task::spawn_blocking(move || -> Result<ScoreReport, AppError> {
        let resume_file = persist(&resume)?;
        let jd_file = persist(&jd)?;

        let mut rng = rand::thread_rng();
        let result = engine.score_files(resume_file.path(), jd_file.path(), &mut rng);

        remove_temp(resume_file);
        remove_temp(jd_file);
        Ok(result?)
    })
    .await;

    match outcome {
        Ok(report) => {
            let report = report?;
            info!(
                "Scored resume {:.1} against JD (field: {})",
                report.score, report.primary_field
            );
            Ok(Json(report))
        }
        Err(join_err) => Err(AppError::Scoring(format!(
            "scoring task did not complete: {join_err}"
        ))),
    }
}

async fn read_uploads(mut multipart: Multipart) -> Result<ScoreUploads, AppError> {
    let mut uploads = ScoreUploads::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let slot = match field.name() {
            Some("resume") => &mut uploads.resume,
            Some("jd") => &mut uploads.jd,
            _ => continue,
        };
        let Some(file_name) = field.file_name().map(String::from) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        *slot = Some(Upload { file_name, bytes });
    }
    Ok(uploads)
}

/// Case-insensitive `.pdf` / `.docx` suffix check on the client-supplied name.
pub fn is_supported(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Writes the upload to a named temp file carrying the original extension.
/// The file is deleted when the handle drops.
fn persist(upload: &Upload) -> Result<NamedTempFile, AppError> {
    let suffix = Path::new(&upload.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    let mut file = tempfile::Builder::new()
        .prefix("atscore-")
        .suffix(&suffix)
        .tempfile()
        .context("Failed to create temporary file")?;
    file.write_all(&upload.bytes)
        .context("Failed to write upload to temporary file")?;
    file.flush().context("Failed to flush temporary file")?;
    info!(
        "Saved {} to temporary file: {}",
        upload.file_name,
        file.path().display()
    );
    Ok(file)
}

fn remove_temp(file: NamedTempFile) {
    let path = file.path().display().to_string();
    if let Err(e) = file.close() {
        warn!("Error removing temporary file {path}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions_case_insensitive() {
        assert!(is_supported("resume.pdf"));
        assert!(is_supported("Resume.PDF"));
        assert!(is_supported("jd.DocX"));
        assert!(!is_supported("resume.doc"));
        assert!(!is_supported("resume.txt"));
        assert!(!is_supported("pdf"));
    }

    #[test]
    fn test_persist_keeps_lowercased_extension() {
        let upload = Upload {
            file_name: "My Resume.PDF".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        };
        let file = persist(&upload).unwrap();
        assert_eq!(
            file.path().extension().and_then(|e| e.to_str()),
            Some("pdf")
        );
        assert_eq!(std::fs::read(file.path()).unwrap(), b"%PDF-1.4");

        let path = file.path().to_path_buf();
        remove_temp(file);
        assert!(!path.exists());
    }
}
