use serde::{Deserialize, Serialize};
use validator::Validate;

use acct_core::domain::{TokenPair, User, UserDetails};

/// Body of `POST /signup` and `POST /signin`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 32))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TokensRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Body of `PUT /details`
///
/// `name` and `website` may be left out, which clears them.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DetailsRequest {
    #[serde(default)]
    #[validate(length(max = 40))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(url)]
    pub website: Option<String>,
}

impl From<DetailsRequest> for UserDetails {
    fn from(request: DetailsRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            website: request.website.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokensResponse {
    pub tokens: TokenPair,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub image_url: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        let ok = CredentialsRequest {
            email: "alice@example.com".to_string(),
            password: "correct-horse".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = CredentialsRequest {
            password: "short".to_string(),
            ..ok.clone()
        };
        assert!(short.validate().is_err());

        let long = CredentialsRequest {
            password: "x".repeat(33),
            ..ok.clone()
        };
        assert!(long.validate().is_err());

        let bad_email = CredentialsRequest {
            email: "not-an-email".to_string(),
            ..ok
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_details_validation() {
        let request: DetailsRequest = serde_json::from_value(serde_json::json!({
            "email": "alice@example.com"
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let details = UserDetails::from(request);
        assert_eq!(details.name, "");
        assert_eq!(details.website, "");

        let bad_site: DetailsRequest = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "email": "alice@example.com",
            "website": "not a url"
        }))
        .unwrap();
        assert!(bad_site.validate().is_err());

        let long_name: DetailsRequest = serde_json::from_value(serde_json::json!({
            "name": "a".repeat(41),
            "email": "alice@example.com"
        }))
        .unwrap();
        assert!(long_name.validate().is_err());
    }
}
