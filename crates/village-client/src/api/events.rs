use uuid::Uuid;

use crate::model::{Event, EventQuery, EventUpdate, NewEvent};
use crate::{ApiClient, ApiRequest, Result};

/// Event listing and administration.
#[async_trait::async_trait]
pub trait EventApi: Send + Sync {
    /// Lists events, optionally filtered by search text or to upcoming ones.
    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>>;

    async fn event(&self, id: Uuid) -> Result<Event>;

    async fn create_event(&self, event: &NewEvent) -> Result<Event>;

    async fn update_event(&self, id: Uuid, update: &EventUpdate) -> Result<Event>;

    /// Deletes an event, returning it as it was before deletion.
    async fn delete_event(&self, id: Uuid) -> Result<Event>;
}

#[async_trait::async_trait]
impl EventApi for ApiClient {
    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>> {
        self.fetch(ApiRequest::get("events").with_query(query)?).await
    }

    async fn event(&self, id: Uuid) -> Result<Event> {
        self.fetch(ApiRequest::get(format!("events/{id}"))).await
    }

    async fn create_event(&self, event: &NewEvent) -> Result<Event> {
        self.fetch(ApiRequest::post("events").with_json(event)?).await
    }

    async fn update_event(&self, id: Uuid, update: &EventUpdate) -> Result<Event> {
        self.fetch(ApiRequest::put(format!("events/{id}")).with_json(update)?).await
    }

    async fn delete_event(&self, id: Uuid) -> Result<Event> {
        self.fetch(ApiRequest::delete(format!("events/{id}"))).await
    }
}
