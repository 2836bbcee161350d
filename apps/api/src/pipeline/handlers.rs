//! HTTP handler for the draft endpoint. Field aliasing and flag coercion for
//! the widget's loose request shapes live here; the pipeline never sees raw
//! JSON.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::category::resolve_category;
use crate::errors::AppError;
use crate::pipeline::{generate_review, DraftRequest};
use crate::state::AppState;

/// Inbound body. Every field is optional on the wire; validation happens in
/// the handler so missing fields produce our error shape, not a serde 422.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftApiRequest {
    pub employee: String,
    pub business_type: String,
    pub service_notes: String,
    pub no_name: Option<Value>,
    pub business: String,
    pub business_name: String,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub review: String,
}

/// Accepts true, "true", "1", and 1 for the noName flag; deployed widgets
/// have sent all four shapes over time.
fn truthy_flag(value: &Option<Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            let s = s.trim().to_ascii_lowercase();
            s == "true" || s == "1"
        }
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    }
}

/// POST /api/v1/draft
///
/// The pipeline is total (fallback templates guarantee a review), so the only
/// error responses here are the missing-employee 400 and the
/// missing-credential 500.
pub async fn handle_draft(
    State(state): State<AppState>,
    body: Option<Json<DraftApiRequest>>,
) -> Result<Json<DraftResponse>, AppError> {
    // An unparseable or absent body is treated as empty; validation below
    // owns the error shape instead of axum's plain-text rejection.
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let employee = body.employee.trim().to_string();
    if employee.is_empty() {
        return Err(AppError::MissingEmployee);
    }

    let provider = state
        .provider
        .clone()
        .ok_or(AppError::MissingCredential("OPENAI_API_KEY_REAL"))?;

    // businessName supersedes the older business field when both arrive.
    let business_name = if body.business_name.trim().is_empty() {
        body.business.as_str()
    } else {
        body.business_name.as_str()
    };
    let category = resolve_category(&body.business_type, business_name, &body.service_notes);
    let suppress_name = truthy_flag(&body.no_name);

    info!(
        "draft request: category={} suppress_name={suppress_name}",
        category.as_str()
    );

    let request = DraftRequest {
        employee,
        category,
        notes: body.service_notes.trim().to_string(),
        suppress_name,
    };
    let review = generate_review(provider.as_ref(), &request).await;

    Ok(Json(DraftResponse { review }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_flag_shapes() {
        assert!(truthy_flag(&Some(Value::Bool(true))));
        assert!(truthy_flag(&Some(Value::String("true".to_string()))));
        assert!(truthy_flag(&Some(Value::String(" 1 ".to_string()))));
        assert!(truthy_flag(&Some(Value::Number(1.into()))));

        assert!(!truthy_flag(&None));
        assert!(!truthy_flag(&Some(Value::Bool(false))));
        assert!(!truthy_flag(&Some(Value::String("false".to_string()))));
        assert!(!truthy_flag(&Some(Value::String("yes".to_string()))));
        assert!(!truthy_flag(&Some(Value::Number(0.into()))));
    }

    #[test]
    fn test_request_deserializes_camel_case_with_defaults() {
        let body: DraftApiRequest = serde_json::from_str(
            r#"{"employee":"Maria","businessType":"nails","serviceNotes":"gel refill","noName":"1"}"#,
        )
        .unwrap();
        assert_eq!(body.employee, "Maria");
        assert_eq!(body.business_type, "nails");
        assert_eq!(body.service_notes, "gel refill");
        assert!(truthy_flag(&body.no_name));
        assert!(body.business_name.is_empty());
    }

    #[test]
    fn test_request_tolerates_empty_body() {
        let body: DraftApiRequest = serde_json::from_str("{}").unwrap();
        assert!(body.employee.is_empty());
        assert!(!truthy_flag(&body.no_name));
    }

    #[tokio::test]
    async fn test_missing_employee_rejected_before_provider_check() {
        let state = AppState { provider: None };
        let body = DraftApiRequest {
            employee: "   ".to_string(),
            ..Default::default()
        };
        let result = handle_draft(State(state), Some(Json(body))).await;
        assert!(matches!(result, Err(AppError::MissingEmployee)));
    }

    #[tokio::test]
    async fn test_absent_body_treated_as_missing_employee() {
        let state = AppState { provider: None };
        let result = handle_draft(State(state), None).await;
        assert!(matches!(result, Err(AppError::MissingEmployee)));
    }

    #[tokio::test]
    async fn test_missing_credential_returns_error() {
        let state = AppState { provider: None };
        let body = DraftApiRequest {
            employee: "Maria".to_string(),
            ..Default::default()
        };
        let result = handle_draft(State(state), Some(Json(body))).await;
        assert!(matches!(
            result,
            Err(AppError::MissingCredential("OPENAI_API_KEY_REAL"))
        ));
    }
}
