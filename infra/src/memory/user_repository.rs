//! In-memory user repository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use acct_core::context::RequestContext;
use acct_core::domain::entities::user::User;
use acct_core::errors::DomainError;
use acct_core::repositories::UserRepository;

/// Users keyed by id, with the same unique-email rule as the `users` table
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn ensure_email_free(users: &HashMap<Uuid, User>, user: &User) -> Result<(), DomainError> {
    if users
        .values()
        .any(|u| u.uid != user.uid && u.email == user.email)
    {
        return Err(DomainError::conflict("email", user.email.clone()));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, ctx: &RequestContext, uid: Uuid) -> Result<User, DomainError> {
        ctx.check()?;
        self.users
            .read()
            .await
            .get(&uid)
            .cloned()
            .ok_or_else(|| DomainError::not_found("uid", uid.to_string()))
    }

    async fn find_by_email(&self, ctx: &RequestContext, email: &str) -> Result<User, DomainError> {
        ctx.check()?;
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| DomainError::not_found("email", email))
    }

    async fn create(&self, ctx: &RequestContext, user: &User) -> Result<User, DomainError> {
        ctx.check()?;
        let mut users = self.users.write().await;
        ensure_email_free(&users, user)?;
        if users.contains_key(&user.uid) {
            return Err(DomainError::conflict("uid", user.uid.to_string()));
        }
        users.insert(user.uid, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, ctx: &RequestContext, user: &User) -> Result<User, DomainError> {
        ctx.check()?;
        let mut users = self.users.write().await;
        ensure_email_free(&users, user)?;

        let stored = users
            .get_mut(&user.uid)
            .ok_or_else(|| DomainError::not_found("uid", user.uid.to_string()))?;
        stored.name = user.name.clone();
        stored.email = user.email.clone();
        stored.website = user.website.clone();
        Ok(stored.clone())
    }

    async fn update_image(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        image_url: &str,
    ) -> Result<User, DomainError> {
        ctx.check()?;
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(&uid)
            .ok_or_else(|| DomainError::not_found("uid", uid.to_string()))?;
        stored.image_url = image_url.to_string();
        Ok(stored.clone())
    }
}
