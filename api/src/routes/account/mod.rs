//! Account route handlers
//!
//! - Sign-up, sign-in and token rotation (public)
//! - Sign-out, profile read/update and profile image (identity token required)

pub mod details;
pub mod image;
pub mod me;
pub mod signin;
pub mod signout;
pub mod signup;
pub mod tokens;

use std::sync::Arc;

use acct_core::repositories::{ImageRepository, TokenRepository, UserRepository};
use acct_core::services::{AccountService, TokenService};

/// Services shared by all account handlers
pub struct AppState<U, T, I>
where
    U: UserRepository,
    T: TokenRepository,
    I: ImageRepository,
{
    pub account_service: Arc<AccountService<U, I>>,
    pub token_service: Arc<TokenService<T>>,
    /// Upper bound for profile image uploads
    pub max_body_bytes: usize,
}

impl<U, T, I> AppState<U, T, I>
where
    U: UserRepository,
    T: TokenRepository,
    I: ImageRepository,
{
    pub fn new(
        account_service: AccountService<U, I>,
        token_service: TokenService<T>,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            account_service: Arc::new(account_service),
            token_service: Arc::new(token_service),
            max_body_bytes,
        }
    }
}
