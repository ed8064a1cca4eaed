//! Input of the provisioning entry point and its validation.

use crate::config::ProvisioningConfig;
use crate::model::{parse_email, ClientId, Metadata, PlanTier, UnknownPlan};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the caller sends to provision a tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionRequest {
    pub client_id: Option<ClientId>,
    /// Owner email; matched case-insensitively against existing identities.
    pub email: String,
    /// Falls back to the client record's business name when blank.
    pub business_name: Option<String>,
    pub owner_name: Option<String>,
    pub phone: Option<String>,
    /// Falls back to the configured default vertical when blank.
    pub vertical: String,
    pub plan: String,
    pub branch_count: Option<u32>,
    pub subscription_id: Option<String>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Unsupported vertical: {0}")]
    UnsupportedVertical(String),

    #[error(transparent)]
    UnknownPlan(#[from] UnknownPlan),
}

/// A request that passed validation, with every field normalized once.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub client_id: ClientId,
    /// Lower-cased.
    pub email: String,
    pub business_name: Option<String>,
    pub owner_name: String,
    pub phone: Option<String>,
    pub vertical: String,
    pub plan: PlanTier,
    /// At least 1.
    pub branch_count: u32,
    pub subscription_id: Option<String>,
    pub metadata: Metadata,
}

impl ProvisionRequest {
    pub fn validate(self, config: &ProvisioningConfig) -> Result<ValidatedRequest, ValidationError> {
        let client_id = self
            .client_id
            .ok_or(ValidationError::MissingField("client_id"))?;

        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        let Some((local, domain)) = parse_email(&self.email) else {
            return Err(ValidationError::InvalidEmail(self.email.trim().to_lowercase()));
        };
        let email = format!("{local}@{domain}");

        let vertical = match self.vertical.trim().to_lowercase() {
            blank if blank.is_empty() => config.default_vertical.clone(),
            vertical => vertical,
        };
        if !config.supports_vertical(&vertical) {
            return Err(ValidationError::UnsupportedVertical(vertical));
        }

        if self.plan.trim().is_empty() {
            return Err(ValidationError::MissingField("plan"));
        }
        let plan: PlanTier = self.plan.parse()?;

        Ok(ValidatedRequest {
            client_id,
            email,
            business_name: non_blank(self.business_name),
            owner_name: non_blank(self.owner_name).unwrap_or(local),
            phone: non_blank(self.phone),
            vertical,
            plan,
            branch_count: self.branch_count.unwrap_or(1).max(1),
            subscription_id: non_blank(self.subscription_id),
            metadata: self.metadata,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProvisionRequest {
        ProvisionRequest {
            client_id: Some(ClientId(1)),
            email: "  Dra.Lopez@Example.COM ".into(),
            business_name: Some("Clínica Dental Sonrisa".into()),
            vertical: "Dental".into(),
            plan: "growth".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalizes_fields() {
        let valid = request().validate(&ProvisioningConfig::default()).unwrap();
        assert_eq!(valid.email, "dra.lopez@example.com");
        assert_eq!(valid.vertical, "dental");
        assert_eq!(valid.plan, PlanTier::Growth);
        assert_eq!(valid.branch_count, 1);
        assert_eq!(valid.owner_name, "dra.lopez");
    }

    #[test]
    fn test_required_fields() {
        let config = ProvisioningConfig::default();

        let no_client = ProvisionRequest { client_id: None, ..request() };
        assert_eq!(
            no_client.validate(&config).unwrap_err(),
            ValidationError::MissingField("client_id")
        );

        let no_email = ProvisionRequest { email: "   ".into(), ..request() };
        assert_eq!(
            no_email.validate(&config).unwrap_err(),
            ValidationError::MissingField("email")
        );

        let bad_email = ProvisionRequest { email: "lopez".into(), ..request() };
        assert!(matches!(
            bad_email.validate(&config),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_rejects_email_the_identity_store_would_reject() {
        let config = ProvisioningConfig::default();
        let undotted = ProvisionRequest { email: "Owner@Localhost".into(), ..request() };
        assert_eq!(
            undotted.validate(&config).unwrap_err(),
            ValidationError::InvalidEmail("owner@localhost".into())
        );
    }

    #[test]
    fn test_rejects_unsupported_vertical_and_plan() {
        let config = ProvisioningConfig::default();

        let bakery = ProvisionRequest { vertical: "bakery".into(), ..request() };
        assert_eq!(
            bakery.validate(&config).unwrap_err(),
            ValidationError::UnsupportedVertical("bakery".into())
        );

        let platinum = ProvisionRequest { plan: "platinum".into(), ..request() };
        assert!(matches!(
            platinum.validate(&config),
            Err(ValidationError::UnknownPlan(_))
        ));
    }

    #[test]
    fn test_blank_vertical_uses_default() {
        let blank = ProvisionRequest { vertical: String::new(), ..request() };
        let valid = blank.validate(&ProvisioningConfig::default()).unwrap();
        assert_eq!(valid.vertical, "dental");
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: ProvisionRequest = serde_json::from_value(serde_json::json!({
            "client_id": 4,
            "email": "hola@elfaro.mx",
            "vertical": "restaurant",
            "plan": "essentials",
            "branch_count": 3
        }))
        .unwrap();
        assert_eq!(request.client_id, Some(ClientId(4)));
        assert_eq!(request.branch_count, Some(3));
        assert!(request.metadata.is_empty());
    }
}
