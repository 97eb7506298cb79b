use uuid::Uuid;

use crate::model::{Acknowledgement, User, UserUpdate};
use crate::{ApiClient, ApiRequest, Result};

/// User account administration.
#[async_trait::async_trait]
pub trait UserApi: Send + Sync {
    /// Lists all users (admin).
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn user(&self, id: Uuid) -> Result<User>;

    /// Updates the authenticated user's own account.
    async fn update_me(&self, update: &UserUpdate) -> Result<User>;

    /// Updates another user's account (admin).
    async fn update_user(&self, id: Uuid, update: &UserUpdate) -> Result<User>;

    async fn delete_user(&self, id: Uuid) -> Result<Acknowledgement>;
}

#[async_trait::async_trait]
impl UserApi for ApiClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.fetch(ApiRequest::get("users")).await
    }

    async fn user(&self, id: Uuid) -> Result<User> {
        self.fetch(ApiRequest::get(format!("users/{id}"))).await
    }

    async fn update_me(&self, update: &UserUpdate) -> Result<User> {
        self.fetch(ApiRequest::put("users/me").with_json(update)?).await
    }

    async fn update_user(&self, id: Uuid, update: &UserUpdate) -> Result<User> {
        self.fetch(ApiRequest::put(format!("users/{id}")).with_json(update)?).await
    }

    async fn delete_user(&self, id: Uuid) -> Result<Acknowledgement> {
        self.fetch(ApiRequest::delete(format!("users/{id}"))).await
    }
}
