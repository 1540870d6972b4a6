//! Shared building blocks for the site workspace: response envelope types
//! and logging initialization.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn envelope_omits_empty_fields() {
        let v = serde_json::to_value(types::ApiResponse::ok(5)).unwrap();
        assert_eq!(v, serde_json::json!({"success": true, "data": 5}));

        let v = serde_json::to_value(types::ApiResponse::<()>::err("nope")).unwrap();
        assert_eq!(v, serde_json::json!({"success": false, "error": "nope"}));
    }

    #[test]
    fn invalid_envelope_carries_field_messages() {
        let mut errors = types::FieldErrors::new();
        errors.entry("name".into()).or_default().push("Name is required".into());
        let v = serde_json::to_value(types::ApiResponse::<()>::invalid(errors)).unwrap();
        assert_eq!(v["error"], "Validation failed");
        assert_eq!(v["errors"]["name"][0], "Name is required");
    }
}
