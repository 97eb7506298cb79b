use uuid::Uuid;

use crate::model::{Acknowledgement, NewRecurrence, Recurrence, RecurrenceUpdate};
use crate::{ApiClient, ApiRequest, Result};

/// Recurrence schedules for repeating events.
#[async_trait::async_trait]
pub trait RecurrenceApi: Send + Sync {
    async fn list_recurrences(&self) -> Result<Vec<Recurrence>>;

    async fn recurrence(&self, id: Uuid) -> Result<Recurrence>;

    async fn create_recurrence(&self, recurrence: &NewRecurrence) -> Result<Recurrence>;

    async fn update_recurrence(&self, id: Uuid, update: &RecurrenceUpdate) -> Result<Recurrence>;

    async fn delete_recurrence(&self, id: Uuid) -> Result<Acknowledgement>;
}

#[async_trait::async_trait]
impl RecurrenceApi for ApiClient {
    async fn list_recurrences(&self) -> Result<Vec<Recurrence>> {
        self.fetch(ApiRequest::get("recurrences")).await
    }

    async fn recurrence(&self, id: Uuid) -> Result<Recurrence> {
        self.fetch(ApiRequest::get(format!("recurrences/{id}"))).await
    }

    async fn create_recurrence(&self, recurrence: &NewRecurrence) -> Result<Recurrence> {
        self.fetch(ApiRequest::post("recurrences").with_json(recurrence)?).await
    }

    async fn update_recurrence(&self, id: Uuid, update: &RecurrenceUpdate) -> Result<Recurrence> {
        self.fetch(ApiRequest::put(format!("recurrences/{id}")).with_json(update)?).await
    }

    async fn delete_recurrence(&self, id: Uuid) -> Result<Acknowledgement> {
        self.fetch(ApiRequest::delete(format!("recurrences/{id}"))).await
    }
}
