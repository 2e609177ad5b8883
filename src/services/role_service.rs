use crate::data::models::manager_request::{ManagerRequest, NewManagerRequest, RequestStatus};
use crate::data::models::user::{Role, RoleAssignment};
use crate::data::repos::traits::stores::{RequestStore, UserStore};
use crate::services::errors::RoleServiceError;
use std::str::FromStr;
use std::sync::Arc;

/// Route-level decision for the manager/admin surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Role grants access.
    Allow,
    /// No identity; redirect to the management sign-in surface.
    SignInRequired,
    /// A manager request is pending review; show the waiting state.
    AwaitingReview,
    /// The latest request was rejected; show the rejection notice.
    RequestRejected,
    /// Plain student with no outstanding request; offer the application.
    ApplicationRequired,
}

#[derive(Clone)]
pub struct RoleService {
    users: Arc<dyn UserStore>,
    requests: Arc<dyn RequestStore>,
}

impl RoleService {
    pub fn new(users: Arc<dyn UserStore>, requests: Arc<dyn RequestStore>) -> Self {
        RoleService { users, requests }
    }

    /// The stored role, or the student default when no row exists.
    pub async fn role_of(&self, user_id: i32) -> Result<Role, RoleServiceError> {
        Ok(self.users.role_of(user_id).await?.unwrap_or(Role::Student))
    }

    /// Direct role mutation. Admin only, and never on one's own identity;
    /// the target's role is untouched on failure.
    pub async fn set_role(
        &self,
        actor_id: i32,
        target_id: i32,
        role: Role,
    ) -> Result<(), RoleServiceError> {
        if actor_id == target_id {
            return Err(RoleServiceError::Forbidden);
        }
        if !self.role_of(actor_id).await?.is_admin() {
            return Err(RoleServiceError::Forbidden);
        }

        self.users.set_role(target_id, role).await?;
        tracing::info!(target_id, role = role.as_str(), "role assignment updated");
        Ok(())
    }

    /// Submits a manager application. At most one pending request per
    /// identity; a duplicate submission is rejected, not absorbed.
    pub async fn submit_request(
        &self,
        user_id: i32,
        name: &str,
        email: &str,
    ) -> Result<ManagerRequest, RoleServiceError> {
        if let Some(latest) = self.requests.find_latest_by_user(user_id).await? {
            if latest.status == RequestStatus::Pending.as_str() {
                return Err(RoleServiceError::DuplicateRequest);
            }
        }

        let request = self
            .requests
            .insert_request(NewManagerRequest {
                user_id,
                name: name.to_string(),
                email: email.to_string(),
                status: RequestStatus::Pending.as_str().to_string(),
            })
            .await?;

        Ok(request)
    }

    /// Approves a pending request and elevates the requester to manager.
    /// An already-reviewed request is returned unchanged; approval is
    /// never applied twice.
    pub async fn approve_request(
        &self,
        admin_id: i32,
        request_id: i32,
    ) -> Result<ManagerRequest, RoleServiceError> {
        let request = self.reviewable(admin_id, request_id).await?;

        if request.status != RequestStatus::Pending.as_str() {
            return Ok(request);
        }

        let reviewed = self
            .requests
            .set_review(
                request_id,
                RequestStatus::Approved.as_str(),
                admin_id,
                chrono::Utc::now().naive_utc(),
            )
            .await?
            .ok_or(RoleServiceError::RequestNotFound)?;

        self.users.set_role(request.user_id, Role::Manager).await?;
        tracing::info!(request_id, user_id = request.user_id, "manager request approved");

        Ok(reviewed)
    }

    /// Rejects a pending request; the requester's role is unchanged.
    pub async fn reject_request(
        &self,
        admin_id: i32,
        request_id: i32,
    ) -> Result<ManagerRequest, RoleServiceError> {
        let request = self.reviewable(admin_id, request_id).await?;

        if request.status != RequestStatus::Pending.as_str() {
            return Ok(request);
        }

        let reviewed = self
            .requests
            .set_review(
                request_id,
                RequestStatus::Rejected.as_str(),
                admin_id,
                chrono::Utc::now().naive_utc(),
            )
            .await?
            .ok_or(RoleServiceError::RequestNotFound)?;

        tracing::info!(request_id, user_id = request.user_id, "manager request rejected");

        Ok(reviewed)
    }

    pub async fn pending_requests(
        &self,
        admin_id: i32,
    ) -> Result<Vec<ManagerRequest>, RoleServiceError> {
        if !self.role_of(admin_id).await?.is_admin() {
            return Err(RoleServiceError::Forbidden);
        }
        Ok(self.requests.list_pending().await?)
    }

    pub async fn list_assignments(
        &self,
        admin_id: i32,
    ) -> Result<Vec<RoleAssignment>, RoleServiceError> {
        if !self.role_of(admin_id).await?.is_admin() {
            return Err(RoleServiceError::Forbidden);
        }
        Ok(self.users.list_assignments().await?)
    }

    /// Decides what the manager/admin surfaces show for an identity.
    pub async fn manager_gate(
        &self,
        identity: Option<i32>,
    ) -> Result<GateDecision, RoleServiceError> {
        let Some(user_id) = identity else {
            return Ok(GateDecision::SignInRequired);
        };

        if self.role_of(user_id).await?.can_manage() {
            return Ok(GateDecision::Allow);
        }

        let latest = self.requests.find_latest_by_user(user_id).await?;
        let decision = match latest
            .and_then(|r| RequestStatus::from_str(&r.status).ok())
        {
            Some(RequestStatus::Pending) => GateDecision::AwaitingReview,
            Some(RequestStatus::Rejected) => GateDecision::RequestRejected,
            Some(RequestStatus::Approved) | None => GateDecision::ApplicationRequired,
        };

        Ok(decision)
    }

    async fn reviewable(
        &self,
        admin_id: i32,
        request_id: i32,
    ) -> Result<ManagerRequest, RoleServiceError> {
        if !self.role_of(admin_id).await?.is_admin() {
            return Err(RoleServiceError::Forbidden);
        }

        self.requests
            .get_by_id(request_id)
            .await?
            .ok_or(RoleServiceError::RequestNotFound)
    }
}
