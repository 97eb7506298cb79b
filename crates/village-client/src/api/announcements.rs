use uuid::Uuid;

use crate::model::{Acknowledgement, Announcement, AnnouncementDraft};
use crate::{ApiClient, ApiRequest, Result};

/// Public announcements.
#[async_trait::async_trait]
pub trait AnnouncementApi: Send + Sync {
    async fn list_announcements(&self) -> Result<Vec<Announcement>>;

    async fn announcement(&self, id: Uuid) -> Result<Announcement>;

    async fn create_announcement(&self, draft: &AnnouncementDraft) -> Result<Announcement>;

    async fn update_announcement(
        &self,
        id: Uuid,
        draft: &AnnouncementDraft,
    ) -> Result<Announcement>;

    async fn delete_announcement(&self, id: Uuid) -> Result<Acknowledgement>;
}

#[async_trait::async_trait]
impl AnnouncementApi for ApiClient {
    async fn list_announcements(&self) -> Result<Vec<Announcement>> {
        self.fetch(ApiRequest::get("announcements")).await
    }

    async fn announcement(&self, id: Uuid) -> Result<Announcement> {
        self.fetch(ApiRequest::get(format!("announcements/{id}"))).await
    }

    async fn create_announcement(&self, draft: &AnnouncementDraft) -> Result<Announcement> {
        self.fetch(ApiRequest::post("announcements").with_json(draft)?).await
    }

    async fn update_announcement(
        &self,
        id: Uuid,
        draft: &AnnouncementDraft,
    ) -> Result<Announcement> {
        self.fetch(ApiRequest::put(format!("announcements/{id}")).with_json(draft)?).await
    }

    async fn delete_announcement(&self, id: Uuid) -> Result<Acknowledgement> {
        self.fetch(ApiRequest::delete(format!("announcements/{id}"))).await
    }
}
