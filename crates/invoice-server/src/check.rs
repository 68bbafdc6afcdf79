//! Offline runs of the submission pipeline against JSON files.
//!
//! `check-invoice` and `check-client` apply the same validation and
//! normalization as the HTTP endpoints but stop before the invoicing API.

use std::fs;
use std::path::{Path, PathBuf};

use invoice_model::fields::CSRF_TOKEN;
use invoice_model::{ErrorResponse, Payload, payload_from_value};
use invoice_normalize::{normalize_and_validate_invoice, normalize_client, route_invoice};
use invoice_schema::SchemaSet;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// The input file could not be used at all.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of one offline check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckReport {
    /// The payload that would be sent to the invoicing API.
    Accepted {
        #[serde(skip_serializing_if = "Option::is_none")]
        route: Option<&'static str>,
        payload: Payload,
    },
    /// The error body the gateway would answer with.
    Rejected { error: ErrorResponse },
}

impl CheckReport {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    fn rejected(error: ErrorResponse) -> Self {
        Self::Rejected { error }
    }
}

/// Validates and normalizes an invoice file.
pub fn check_invoice(path: &Path, schemas: &SchemaSet) -> Result<CheckReport, CheckError> {
    let value = read_json(path)?;
    Ok(check_invoice_value(value, schemas))
}

pub fn check_invoice_value(value: Value, schemas: &SchemaSet) -> CheckReport {
    let raw = match payload_from_value(value) {
        Ok(raw) => raw,
        Err(err) => return CheckReport::rejected(ErrorResponse::message(err.user_message())),
    };
    match normalize_and_validate_invoice(&raw, schemas) {
        Ok(invoice) => {
            let route = route_invoice(invoice);
            CheckReport::Accepted {
                route: Some(route.label()),
                payload: route.into_payload().into_inner(),
            }
        }
        Err(error) => CheckReport::rejected(error.to_response()),
    }
}

/// Validates and normalizes a client file.
pub fn check_client(path: &Path, schemas: &SchemaSet) -> Result<CheckReport, CheckError> {
    let value = read_json(path)?;
    Ok(check_client_value(value, schemas))
}

pub fn check_client_value(value: Value, schemas: &SchemaSet) -> CheckReport {
    let mut raw = match payload_from_value(value) {
        Ok(raw) => raw,
        Err(err) => return CheckReport::rejected(ErrorResponse::message(err.user_message())),
    };
    raw.remove(CSRF_TOKEN);

    if let Some(error) = schemas.client.first_error(&Value::Object(raw.clone())) {
        return CheckReport::rejected(error.to_response());
    }
    match normalize_client(&raw) {
        Ok(client) => CheckReport::Accepted {
            route: None,
            payload: client.into_inner(),
        },
        Err(err) => CheckReport::rejected(ErrorResponse::message(err.user_message())),
    }
}

fn read_json(path: &Path) -> Result<Value, CheckError> {
    let content = fs::read_to_string(path).map_err(|source| CheckError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CheckError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn schemas() -> SchemaSet {
        SchemaSet::embedded().unwrap()
    }

    #[test]
    fn test_recurring_invoice_report() {
        let report = check_invoice_value(
            json!({
                "client_id": 3,
                "recurring": "monthly",
                "email_invoice": true,
                "csrf_token": "abc",
                "invoice_items": [{"qty": 1, "cost": 10}]
            }),
            &schemas(),
        );
        assert!(report.is_accepted());
        insta::assert_json_snapshot!(report, @r#"
        {
          "status": "accepted",
          "route": "recurring",
          "payload": {
            "client_id": 3,
            "invoice_items": [
              {
                "cost": 10,
                "qty": 1
              }
            ],
            "recurring": "monthly"
          }
        }
        "#);
    }

    #[test]
    fn test_rejected_invoice_report() {
        let report = check_invoice_value(json!({"client_id": 3}), &schemas());
        assert!(!report.is_accepted());
        insta::assert_json_snapshot!(report, @r#"
        {
          "status": "rejected",
          "error": {
            "message": "\"invoice_items\" is a required property",
            "path": []
          }
        }
        "#);
    }

    #[test]
    fn test_client_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"email": "ana@example.com", "first_name": "Ana", "last_name": "Ruiz", "csrf_token": "t"}}"#
        )
        .unwrap();

        let report = check_client(file.path(), &schemas()).unwrap();
        let CheckReport::Accepted { route, payload } = report else {
            panic!("expected accepted report");
        };
        assert_eq!(route, None);
        assert_eq!(payload["name"], json!("Ana Ruiz"));
        assert_eq!(payload["contact"]["email"], json!("ana@example.com"));
        assert!(!payload.contains_key("csrf_token"));
    }

    #[test]
    fn test_client_schema_violation() {
        let report = check_client_value(
            json!({"email": "not-an-email", "first_name": "Ana", "last_name": "Ruiz"}),
            &schemas(),
        );
        let CheckReport::Rejected { error } = report else {
            panic!("expected rejected report");
        };
        assert_eq!(error.path.unwrap().to_string(), "email");
    }

    #[test]
    fn test_unparseable_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = check_invoice(file.path(), &schemas()).unwrap_err();
        assert!(matches!(err, CheckError::Parse { .. }));
    }

    #[test]
    fn test_non_object_body() {
        let report = check_invoice_value(json!([1, 2]), &schemas());
        assert_eq!(
            report,
            CheckReport::Rejected {
                error: ErrorResponse::message("The request body must be a JSON object.")
            }
        );
    }
}
