//! HTTP API Client
//!
//! Functions for communicating with the Gradeflow REST API. Authenticated
//! calls carry the session's bearer token; failures resolve to the backend's
//! error message when one can be decoded.

use gloo_net::http::{Request, RequestBuilder, Response};

use crate::state::global::{
    ClassAnalytics, Evaluation, HealthSnapshot, Rubric, Session, StudentAnalytics, Submission,
    User,
};

/// Default API base URL (same-origin deployment)
pub const DEFAULT_API_BASE: &str = "/api";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("gradeflow_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item("gradeflow_api_url", url);
        }
    }
}

fn with_bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {}", token))
}

// ============ Response Types ============

/// Error body shape. Most routes answer with `error`; the auth middleware
/// answers with `message`.
#[derive(Debug, serde::Deserialize)]
struct ApiError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Extract a human-readable message from a non-2xx response
async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ApiError>().await {
        Ok(body) => body
            .error
            .or(body.message)
            .unwrap_or_else(|| format!("Request failed with status {}", status)),
        Err(_) => format!("Request failed with status {}", status),
    }
}

#[derive(Debug, serde::Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
}

#[derive(Debug, serde::Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    message: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct UploadResponse {
    pub submission_id: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, serde::Deserialize)]
struct SubmissionListResponse {
    submissions: Vec<Submission>,
}

#[derive(Debug, serde::Deserialize)]
struct EvaluationListResponse {
    evaluations: Vec<Evaluation>,
}

#[derive(Debug, serde::Deserialize)]
struct RubricListResponse {
    rubrics: Vec<Rubric>,
}

/// Fields collected by the registration form
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub institution: String,
}

// ============ API Functions ============

/// Authenticate and build a session from the token + user the backend returns
pub async fn login(email: &str, password: &str) -> Result<Session, String> {
    #[derive(serde::Serialize)]
    struct LoginRequest {
        email: String,
        password: String,
    }

    let api_base = get_api_base();

    let response = Request::post(&format!("{}/auth/login", api_base))
        .json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: LoginResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(Session {
        token: result.token,
        user: result.user,
    })
}

/// Create an account. Returns the backend's confirmation message; the caller
/// still has to log in afterwards.
pub async fn register(request: &RegisterRequest) -> Result<String, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/auth/register", api_base))
        .json(request)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: RegisterResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.message)
}

/// Upload an answer sheet as multipart form data (file + optional question
/// text and assignment id, already appended by the caller).
pub async fn upload_submission(
    token: &str,
    form: web_sys::FormData,
) -> Result<UploadResponse, String> {
    let api_base = get_api_base();

    let response = with_bearer(Request::post(&format!("{}/upload", api_base)), token)
        .body(form)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the caller's submissions
pub async fn fetch_submissions(token: &str) -> Result<Vec<Submission>, String> {
    let api_base = get_api_base();

    let response = with_bearer(Request::get(&format!("{}/submissions", api_base)), token)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: SubmissionListResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.submissions)
}

/// Fetch evaluations, newest first, optionally capped
pub async fn fetch_evaluations(
    token: &str,
    limit: Option<u32>,
) -> Result<Vec<Evaluation>, String> {
    let api_base = get_api_base();

    let url = match limit {
        Some(limit) => format!("{}/evaluations?limit={}", api_base, limit),
        None => format!("{}/evaluations", api_base),
    };

    let response = with_bearer(Request::get(&url), token)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: EvaluationListResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.evaluations)
}

/// Fetch the rubrics visible to the caller
pub async fn fetch_rubrics(token: &str) -> Result<Vec<Rubric>, String> {
    let api_base = get_api_base();

    let response = with_bearer(Request::get(&format!("{}/rubrics", api_base)), token)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: RubricListResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.rubrics)
}

/// Check backend health (open endpoint, no token)
pub async fn fetch_health() -> Result<HealthSnapshot, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/health", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch analytics for a single student
pub async fn fetch_student_analytics(
    token: &str,
    student_id: &str,
) -> Result<StudentAnalytics, String> {
    let api_base = get_api_base();

    let response = with_bearer(
        Request::get(&format!("{}/analytics/student/{}", api_base, student_id)),
        token,
    )
    .send()
    .await
    .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch class-wide analytics (teacher role)
pub async fn fetch_class_analytics(token: &str) -> Result<ClassAnalytics, String> {
    let api_base = get_api_base();

    let response = with_bearer(
        Request::get(&format!("{}/analytics/class", api_base)),
        token,
    )
    .send()
    .await
    .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_prefers_error_over_message() {
        let body: ApiError =
            serde_json::from_str(r#"{"error": "Invalid credentials", "message": "nope"}"#)
                .unwrap();
        assert_eq!(
            body.error.or(body.message).as_deref(),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn test_error_body_falls_back_to_message() {
        let body: ApiError = serde_json::from_str(r#"{"message": "Token is missing"}"#).unwrap();
        assert_eq!(
            body.error.or(body.message).as_deref(),
            Some("Token is missing")
        );
    }

    #[test]
    fn test_evaluation_list_decodes_sparse_records() {
        let body: EvaluationListResponse = serde_json::from_str(
            r#"{"evaluations": [{"_id": "e1", "percentage": 82.5}, {}], "count": 2}"#,
        )
        .unwrap();
        assert_eq!(body.evaluations.len(), 2);
        assert_eq!(body.evaluations[0].id, "e1");
        assert_eq!(body.evaluations[1].percentage, 0.0);
        assert_eq!(body.evaluations[1].max_possible_score, 100.0);
    }
}
