//! Mock implementation of UserRepository for testing

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::UserRepository;

/// Mock user repository for testing
#[derive(Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    failure: Arc<RwLock<Option<DomainError>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user directly, bypassing `create`
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.uid, user);
    }

    /// Make every subsequent call fail with `error`
    pub async fn fail_with(&self, error: DomainError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn get(&self, uid: Uuid) -> Option<User> {
        self.users.read().await.get(&uid).cloned()
    }

    async fn injected(&self, ctx: &RequestContext) -> Result<(), DomainError> {
        ctx.check()?;
        match self.failure.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn email_taken(users: &HashMap<Uuid, User>, email: &str, except: Uuid) -> bool {
    users.values().any(|u| u.email == email && u.uid != except)
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, ctx: &RequestContext, uid: Uuid) -> Result<User, DomainError> {
        self.injected(ctx).await?;
        self.users
            .read()
            .await
            .get(&uid)
            .cloned()
            .ok_or_else(|| DomainError::not_found("uid", uid.to_string()))
    }

    async fn find_by_email(&self, ctx: &RequestContext, email: &str) -> Result<User, DomainError> {
        self.injected(ctx).await?;
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| DomainError::not_found("email", email))
    }

    async fn create(&self, ctx: &RequestContext, user: &User) -> Result<User, DomainError> {
        self.injected(ctx).await?;
        let mut users = self.users.write().await;
        if email_taken(&users, &user.email, user.uid) {
            return Err(DomainError::conflict("email", user.email.clone()));
        }
        users.insert(user.uid, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, ctx: &RequestContext, user: &User) -> Result<User, DomainError> {
        self.injected(ctx).await?;
        let mut users = self.users.write().await;
        if email_taken(&users, &user.email, user.uid) {
            return Err(DomainError::conflict("email", user.email.clone()));
        }
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
        self.injected(ctx).await?;
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(&uid)
            .ok_or_else(|| DomainError::not_found("uid", uid.to_string()))?;
        stored.image_url = image_url.to_string();
        Ok(stored.clone())
    }
}
