//! Tests for the claims codec and the token service


use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::repositories::MockTokenRepository;
use crate::services::token::{SigningKeys, TokenService, TokenServiceConfig};

pub(super) const TEST_PRIVATE_KEY: &str = include_str!("../../../../keys/test_private_key.pem");
pub(super) const TEST_PUBLIC_KEY: &str = include_str!("../../../../keys/test_public_key.pem");
pub(super) const TEST_REFRESH_SECRET: &str = "test-refresh-secret";

pub(super) fn test_keys() -> SigningKeys {
    SigningKeys::from_pem_strings(TEST_PRIVATE_KEY, TEST_PUBLIC_KEY, TEST_REFRESH_SECRET)
        .expect("test keys should load")
}

pub(super) fn test_service() -> (TokenService<MockTokenRepository>, Arc<MockTokenRepository>) {
    let repository = Arc::new(MockTokenRepository::new());
    let service = TokenService::new(repository.clone(), test_keys(), TokenServiceConfig::default());
    (service, repository)
}

pub(super) fn sample_user() -> User {
    let mut user = User::new("alice@example.com", "$2b$04$not-a-real-hash");
    user.name = "Alice".to_string();
    user.image_url = "https://images.test/profile/abc".to_string();
    user.website = "https://alice.dev".to_string();
    user
}
