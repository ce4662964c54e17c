//! Client for the question generation service.
//!
//! `POST /get_questions` takes a multipart form with the quiz subject, the
//! number of questions wanted and a notes file, and answers with a JSON list
//! of question objects.

use anyhow::{bail, Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Generation can take a while on large notes
const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Study notes uploaded alongside the request.
#[derive(Debug, Clone, PartialEq)]
pub struct NotesFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl NotesFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read notes from disk, keeping the file name for the upload.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read notes from {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "notes".to_string());
        Ok(Self { file_name, bytes })
    }
}

#[derive(Clone, Debug)]
pub struct QuizGenerator {
    client: Client,
    base_url: String,
}

impl QuizGenerator {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(GENERATION_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Ask the service for `num_questions` questions about `subject`.
    pub async fn generate(
        &self,
        subject: &str,
        num_questions: u32,
        notes: NotesFile,
    ) -> Result<Vec<Value>> {
        let url = format!("{}/get_questions", self.base_url);
        debug!("POST {} ({} bytes of notes)", url, notes.bytes.len());

        let form = Form::new()
            .text("subject", subject.to_string())
            .text("num_ques", num_questions.to_string())
            .part("notes", Part::bytes(notes.bytes).file_name(notes.file_name));

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("Question service unreachable")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Question service returned {}", status);
        }

        let body: Value = response
            .json()
            .await
            .context("Question service returned invalid JSON")?;
        let questions = extract_questions(body)?;
        info!("Generated {} questions for {}", questions.len(), subject);
        Ok(questions)
    }
}

/// Accept either a bare array or `{ "questions": [...] }`.
fn extract_questions(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("questions") {
            Some(Value::Array(items)) => Ok(items),
            _ => bail!("Question service response has no question list"),
        },
        other => bail!("Unexpected question service response: {}", other),
    }
}
