use uuid::Uuid;

use crate::model::{Acknowledgement, AdminRegistration, NewParticipant, Participant, Registration};
use crate::{ApiClient, ApiRequest, Result};

/// Event registration and participant management.
#[async_trait::async_trait]
pub trait ParticipantApi: Send + Sync {
    /// Lists the participants of an event.
    async fn event_participants(&self, event_id: Uuid) -> Result<Vec<Participant>>;

    /// Adds a participant record directly (admin).
    async fn add_participant(&self, participant: &NewParticipant) -> Result<Participant>;

    /// Deletes a participant record by its own id (admin).
    async fn delete_participant(&self, id: Uuid) -> Result<()>;

    /// Registers the authenticated user for an event.
    async fn register(&self, event_id: Uuid) -> Result<Registration>;

    /// Registers someone else for an event (admin).
    async fn register_by_admin(
        &self,
        event_id: Uuid,
        registration: &AdminRegistration,
    ) -> Result<Participant>;

    /// Withdraws the authenticated user from an event.
    async fn unregister(&self, event_id: Uuid) -> Result<Acknowledgement>;

    /// Removes a user from an event (admin).
    async fn remove_participant(&self, event_id: Uuid, user_id: Uuid) -> Result<Acknowledgement>;
}

#[async_trait::async_trait]
impl ParticipantApi for ApiClient {
    async fn event_participants(&self, event_id: Uuid) -> Result<Vec<Participant>> {
        self.fetch(ApiRequest::get(format!("participants/{event_id}"))).await
    }

    async fn add_participant(&self, participant: &NewParticipant) -> Result<Participant> {
        self.fetch(ApiRequest::post("participants").with_json(participant)?).await
    }

    async fn delete_participant(&self, id: Uuid) -> Result<()> {
        // The backend answers with an empty (`null`) body.
        self.send_checked(ApiRequest::delete(format!("participants/{id}"))).await
            .map(|_| ())
    }

    async fn register(&self, event_id: Uuid) -> Result<Registration> {
        self.fetch(ApiRequest::post(format!("events/{event_id}/register"))).await
    }

    async fn register_by_admin(
        &self,
        event_id: Uuid,
        registration: &AdminRegistration,
    ) -> Result<Participant> {
        let request =
            ApiRequest::post(format!("events/{event_id}/register-admin")).with_json(registration)?;
        self.fetch(request).await
    }

    async fn unregister(&self, event_id: Uuid) -> Result<Acknowledgement> {
        self.fetch(ApiRequest::delete(format!("events/{event_id}/unregister"))).await
    }

    async fn remove_participant(&self, event_id: Uuid, user_id: Uuid) -> Result<Acknowledgement> {
        let request = ApiRequest::delete(format!("events/{event_id}/participants/{user_id}"));
        self.fetch(request).await
    }
}
