use std::fmt;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserName;

/// A single rejected field: where it is and what is wrong with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every violation found in one request body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", summary(.0))]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldViolation::new(field, message)])
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.0
    }
}

fn summary(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Signup body after validation and normalization.
#[derive(Debug)]
pub struct SignupInput {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: Password,
    pub role: Role,
}

impl SignupInput {
    /// Validate an arbitrary JSON body against the signup schema.
    ///
    /// Every field is checked so the caller gets the full list of
    /// violations, ordered name, email, password, role. A missing `role`
    /// means [`Role::User`]; unknown fields are ignored.
    pub fn validate(raw: &Value) -> Result<Self, ValidationErrors> {
        let Some(object) = raw.as_object() else {
            return Err(ValidationErrors::single(
                "",
                format!("Expected object, received {}", JsonType(raw)),
            ));
        };

        let mut violations = Vec::new();

        let name = required(object, "name", &mut violations, |s| {
            UserName::new(s.to_string())
        });
        let email = required(object, "email", &mut violations, EmailAddress::new);
        let password = required(object, "password", &mut violations, |s| {
            Password::new(s.to_string())
        });
        let role = if object.contains_key("role") {
            required(object, "role", &mut violations, str::parse::<Role>)
        } else {
            Some(Role::default())
        };

        match (name, email, password, role) {
            (Some(name), Some(email), Some(password), Some(role)) => Ok(Self {
                name,
                email,
                password,
                role,
            }),
            _ => Err(ValidationErrors(violations)),
        }
    }

    pub fn into_command(self) -> CreateUserCommand {
        CreateUserCommand::new(self.name, self.email, self.password, self.role)
    }
}

fn required<T, E>(
    object: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Option<T>
where
    E: fmt::Display,
{
    let message = match object.get(field) {
        None => "Required".to_string(),
        Some(Value::String(s)) => match parse(s) {
            Ok(value) => return Some(value),
            Err(e) => e.to_string(),
        },
        Some(other) => format!("Expected string, received {}", JsonType(other)),
    };

    violations.push(FieldViolation::new(field, message));
    None
}

struct JsonType<'a>(&'a Value);

impl fmt::Display for JsonType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(errors: &ValidationErrors) -> Vec<&str> {
        errors
            .violations()
            .iter()
            .map(|v| v.field.as_str())
            .collect()
    }

    #[test]
    fn test_valid_input_is_normalized() {
        let input = SignupInput::validate(&json!({
            "name": "Jo",
            "email": "  JO@EXAMPLE.com ",
            "password": "secret1",
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(input.name.as_str(), "Jo");
        assert_eq!(input.email.as_str(), "jo@example.com");
        assert_eq!(input.password.expose(), "secret1");
        assert_eq!(input.role, Role::Admin);
    }

    #[test]
    fn test_role_defaults_to_user() {
        let input = SignupInput::validate(&json!({
            "name": "Jo",
            "email": "jo@example.com",
            "password": "secret1"
        }))
        .unwrap();

        assert_eq!(input.role, Role::User);
    }

    #[test]
    fn test_reports_each_violated_field() {
        let errors = SignupInput::validate(&json!({
            "name": "A",
            "email": "a@b.com",
            "password": "x"
        }))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["name", "password"]);
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = SignupInput::validate(&json!({})).unwrap_err();

        assert_eq!(fields(&errors), vec!["name", "email", "password"]);
        assert!(errors.violations().iter().all(|v| v.message == "Required"));
    }

    #[test]
    fn test_wrong_types() {
        let errors = SignupInput::validate(&json!({
            "name": 42,
            "email": null,
            "password": ["secret1"],
            "role": true
        }))
        .unwrap_err();

        assert_eq!(
            errors.into_violations(),
            vec![
                FieldViolation::new("name", "Expected string, received number"),
                FieldViolation::new("email", "Expected string, received null"),
                FieldViolation::new("password", "Expected string, received array"),
                FieldViolation::new("role", "Expected string, received boolean"),
            ]
        );
    }

    #[test]
    fn test_unknown_role() {
        let errors = SignupInput::validate(&json!({
            "name": "Jo",
            "email": "jo@example.com",
            "password": "secret1",
            "role": "root"
        }))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["role"]);
    }

    #[test]
    fn test_invalid_email() {
        let errors = SignupInput::validate(&json!({
            "name": "Jo",
            "email": "not-an-email",
            "password": "secret1"
        }))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["email"]);
    }

    #[test]
    fn test_non_object_body() {
        let errors = SignupInput::validate(&json!(["Jo"])).unwrap_err();

        assert_eq!(
            errors.into_violations(),
            vec![FieldViolation::new("", "Expected object, received array")]
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let input = SignupInput::validate(&json!({
            "name": "Jo",
            "email": "jo@example.com",
            "password": "secret1",
            "password_hash": "$argon2id$forged"
        }));

        assert!(input.is_ok());
    }
}
