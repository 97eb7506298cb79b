use uuid::Uuid;

use crate::model::{Acknowledgement, NewRole, Participant, Role, RoleUpdate};
use crate::{ApiClient, ApiRequest, Result};

/// Per-event roles and their assignment to participants.
#[async_trait::async_trait]
pub trait RoleApi: Send + Sync {
    /// Lists the roles defined for an event.
    async fn event_roles(&self, event_id: Uuid) -> Result<Vec<Role>>;

    async fn role(&self, id: Uuid) -> Result<Role>;

    async fn create_role(&self, role: &NewRole) -> Result<Role>;

    async fn update_role(&self, id: Uuid, update: &RoleUpdate) -> Result<Role>;

    async fn delete_role(&self, id: Uuid) -> Result<Acknowledgement>;

    /// Gives a participant a role, returning the updated participant.
    async fn assign_role(&self, participant_id: Uuid, role_id: Uuid) -> Result<Participant>;

    /// Removes a participant's role, returning the updated participant.
    async fn unassign_role(&self, participant_id: Uuid) -> Result<Participant>;
}

#[async_trait::async_trait]
impl RoleApi for ApiClient {
    async fn event_roles(&self, event_id: Uuid) -> Result<Vec<Role>> {
        self.fetch(ApiRequest::get(format!("roles/{event_id}"))).await
    }

    async fn role(&self, id: Uuid) -> Result<Role> {
        self.fetch(ApiRequest::get(format!("roles/detail/{id}"))).await
    }

    async fn create_role(&self, role: &NewRole) -> Result<Role> {
        self.fetch(ApiRequest::post("roles").with_json(role)?).await
    }

    async fn update_role(&self, id: Uuid, update: &RoleUpdate) -> Result<Role> {
        self.fetch(ApiRequest::put(format!("roles/{id}")).with_json(update)?).await
    }

    async fn delete_role(&self, id: Uuid) -> Result<Acknowledgement> {
        self.fetch(ApiRequest::delete(format!("roles/{id}"))).await
    }

    async fn assign_role(&self, participant_id: Uuid, role_id: Uuid) -> Result<Participant> {
        let request = ApiRequest::put(format!(
            "participants/{participant_id}/assign-role/{role_id}"
        ));
        self.fetch(request).await
    }

    async fn unassign_role(&self, participant_id: Uuid) -> Result<Participant> {
        let request = ApiRequest::put(format!("participants/{participant_id}/unassign-role"));
        self.fetch(request).await
    }
}
