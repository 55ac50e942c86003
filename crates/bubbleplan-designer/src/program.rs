//! Boundary to the external program-generation service.
//!
//! The service turns a free-text architectural brief into
//! `{ projectName, spaces: [{ name, area, zone, description? }] }`. Only
//! transport failures are retried; a response that fails validation is
//! rejected as a whole and the document is left untouched.

use std::time::Duration;

use async_trait::async_trait;
use bubbleplan_core::{side_from_area, ProgramError};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::document::Document;
use crate::model::{Space, SpaceId};

/// One space proposed by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSpace {
    pub name: String,
    pub area: f64,
    pub zone: String,
    pub description: Option<String>,
}

/// A validated program.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramResponse {
    pub project_name: String,
    pub spaces: Vec<ProgramSpace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProgram {
    #[serde(default)]
    project_name: Option<String>,
    spaces: Vec<Value>,
}

fn schema(index: usize, reason: impl Into<String>) -> ProgramError {
    ProgramError::Schema {
        index,
        reason: reason.into(),
    }
}

fn parse_space(index: usize, value: &Value) -> Result<ProgramSpace, ProgramError> {
    let obj = value.as_object().ok_or_else(|| schema(index, "not an object"))?;
    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let name = text("name").ok_or_else(|| schema(index, "missing name"))?;
    let zone = text("zone").ok_or_else(|| schema(index, "missing zone"))?;
    let area = match obj.get("area") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| schema(index, "missing or non-numeric area"))?;
    if !(area.is_finite() && area > 0.0) {
        return Err(schema(index, format!("area must be positive, got {}", area)));
    }
    Ok(ProgramSpace {
        name,
        area,
        zone,
        description: text("description"),
    })
}

/// Strips a surrounding Markdown code fence, which chat-style services
/// often add around JSON.
fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parses and validates a service response.
pub fn parse_program_response(text: &str) -> Result<ProgramResponse, ProgramError> {
    let raw: RawProgram = serde_json::from_str(strip_fence(text)).map_err(|e| ProgramError::Malformed {
        reason: e.to_string(),
    })?;
    if raw.spaces.is_empty() {
        return Err(ProgramError::Empty);
    }
    let spaces = raw
        .spaces
        .iter()
        .enumerate()
        .map(|(i, v)| parse_space(i, v))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ProgramResponse {
        project_name: raw.project_name.unwrap_or_default().trim().to_string(),
        spaces,
    })
}

/// The external text-to-program collaborator.
#[async_trait]
pub trait ProgramService: Send + Sync {
    /// Whether a credential is configured.
    fn has_credential(&self) -> bool {
        true
    }

    /// Sends the brief and returns the raw response body.
    async fn generate(&self, brief: &str) -> Result<String, ProgramError>;
}

/// Bounded retry with linear backoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Requests a program, retrying transport failures only.
pub async fn request_program(
    service: &dyn ProgramService,
    brief: &str,
    policy: RetryPolicy,
) -> Result<ProgramResponse, ProgramError> {
    if brief.trim().is_empty() {
        return Err(ProgramError::EmptyRequest);
    }
    if !service.has_credential() {
        return Err(ProgramError::MissingCredential);
    }

    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match service.generate(brief).await {
            Ok(body) => return parse_program_response(&body),
            Err(err) if err.is_retryable() && attempt < attempts => {
                warn!("Program request attempt {}/{} failed: {}", attempt, attempts, err);
                tokio::time::sleep(policy.backoff * attempt).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Adds every proposed space to the inventory as an unplaced square.
///
/// The whole batch is validated before anything is inserted.
pub fn apply_program(doc: &mut Document, program: &ProgramResponse) -> Result<Vec<SpaceId>, ProgramError> {
    if program.spaces.is_empty() {
        return Err(ProgramError::Empty);
    }
    if let Some((index, space)) = program
        .spaces
        .iter()
        .enumerate()
        .find(|(_, s)| !(s.area.is_finite() && s.area > 0.0) || s.name.trim().is_empty())
    {
        return Err(schema(index, format!("invalid entry '{}'", space.name)));
    }

    let ppm = doc.pixels_per_meter();
    let mut ids = Vec::with_capacity(program.spaces.len());
    for p in &program.spaces {
        let mut space = Space::new(p.name.clone(), p.area, p.zone.clone(), ppm);
        space.description = p.description.clone();
        let side = side_from_area(p.area, ppm);
        space.width = side;
        space.height = side;
        // v4 ids are unique.
        if let Ok(id) = doc.insert_space(space) {
            ids.push(id);
        }
    }

    if !program.project_name.is_empty() {
        doc.project_name = program.project_name.clone();
    }
    info!("Applied program with {} space(s)", ids.len());
    Ok(ids)
}
