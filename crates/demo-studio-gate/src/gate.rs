//! The workflow gate
//!
//! Every operation follows the same pipeline: role check, entity lookup,
//! state precondition, then a single write through the repository. Nothing
//! is written unless all checks pass, and entities are re-fetched by identity
//! on every call rather than held between calls.

use std::sync::Arc;

use demo_studio_registry::{CloneRequest, InMemoryStudioStore, StudioRepository, TemplateFilter};
use demo_studio_types::{
    AnalyticsSnapshot, ChatGptAppRecord, Clock, DemoId, DemoInstance, DemoStatus, GrantId,
    GuestAccessGrant, Role, SystemClock, Template, TemplateId, TemplateStatus,
};
use tracing::{debug, info};

use crate::config::StudioConfig;
use crate::error::{EntityKind, GateError, Result, Violation};
use crate::links::{LinkFormatter, ShareLinks};
use crate::operation::Operation;

/// Authorization and lifecycle gate over a studio repository.
///
/// Mutating operations take `&mut self`, so one gate value runs at most one
/// read-check-write sequence at a time. Hosts sharing a gate across threads
/// wrap it in a mutex.
pub struct WorkflowGate {
    repository: Arc<dyn StudioRepository>,
    clock: Arc<dyn Clock>,
    links: LinkFormatter,
}

impl WorkflowGate {
    /// Create a gate over `repository` using the wall clock
    pub fn new(repository: Arc<dyn StudioRepository>, config: &StudioConfig) -> Self {
        Self {
            repository,
            clock: Arc::new(SystemClock),
            links: LinkFormatter::new(config.links.base_url.clone()),
        }
    }

    /// Gate over a fresh in-memory store with default configuration
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStudioStore::new()), &StudioConfig::default())
    }

    /// Replace the clock used to stamp clones
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Repository this gate writes through
    pub fn repository(&self) -> &Arc<dyn StudioRepository> {
        &self.repository
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    /// Store a template as given. Developer or admin.
    pub fn create_template(&mut self, template: Template, actor: Role) -> Result<Template> {
        authorize(Operation::CreateTemplate, actor)?;

        self.repository.upsert_template(template.clone())?;

        info!(
            template_id = %template.id,
            status = %template.status,
            role = %actor,
            "Template created"
        );
        Ok(template)
    }

    /// Move a template to approved. Developer or admin.
    pub fn approve_template(&mut self, template_id: &TemplateId, actor: Role) -> Result<Template> {
        authorize(Operation::ApproveTemplate, actor)?;

        let mut template = self.require_template(template_id)?;
        template.status = TemplateStatus::Approved;
        self.repository.upsert_template(template.clone())?;

        info!(template_id = %template.id, role = %actor, "Template approved");
        Ok(template)
    }

    /// Catalogue query. Open to everyone.
    pub fn list_templates(&self, filter: &TemplateFilter) -> Result<Vec<Template>> {
        let templates = self.repository.list_templates_filtered(filter)?;
        debug!(count = templates.len(), "Templates listed");
        Ok(templates)
    }

    // ------------------------------------------------------------------
    // Demos
    // ------------------------------------------------------------------

    /// Store a new draft demo on a non-draft template and seed its
    /// analytics. Sales, sales engineer or admin.
    ///
    /// The demo's identity must be unused; an existing demo is never
    /// replaced.
    pub fn create_demo(&mut self, mut demo: DemoInstance, actor: Role) -> Result<DemoInstance> {
        authorize(Operation::CreateDemo, actor)?;

        let template = self.require_template(&demo.template_id)?;
        if !template.status.is_bindable() {
            return Err(GateError::Validation {
                operation: Operation::CreateDemo,
                violation: Violation::TemplateNotApproved {
                    template_id: template.id,
                    status: template.status,
                },
            });
        }
        if self.repository.get_demo(&demo.id)?.is_some() {
            return Err(already_exists(Operation::CreateDemo, EntityKind::Demo, demo.id));
        }

        demo.status = DemoStatus::Draft;
        let demo = self.repository.create_demo(demo)?;

        info!(
            demo_id = %demo.id,
            template_id = %demo.template_id,
            role = %actor,
            "Demo created"
        );
        Ok(demo)
    }

    /// Copy an existing demo into a fresh draft. Sales, sales engineer or
    /// admin.
    pub fn clone_demo(
        &mut self,
        source: &DemoId,
        new_name: impl Into<String>,
        owner_email: impl Into<String>,
        actor: Role,
    ) -> Result<DemoInstance> {
        authorize(Operation::CloneDemo, actor)?;

        let request = CloneRequest::new_at(new_name, owner_email, self.clock.now());
        let clone = self.repository.clone_demo(source, request)?;

        info!(
            demo_id = %clone.id,
            source_id = %source,
            role = %actor,
            "Demo cloned"
        );
        Ok(clone)
    }

    /// Move a demo to published. Sales engineer or admin.
    pub fn publish_demo(&mut self, demo_id: &DemoId, actor: Role) -> Result<DemoInstance> {
        authorize(Operation::PublishDemo, actor)?;

        let mut demo = self.require_demo(demo_id)?;
        demo.status = DemoStatus::Published;
        self.repository.upsert_demo(demo.clone())?;

        info!(demo_id = %demo.id, role = %actor, "Demo published");
        Ok(demo)
    }

    /// Share links for a published demo. Open to everyone.
    pub fn share_links(&self, demo_id: &DemoId) -> Result<ShareLinks> {
        let demo = self.require_demo(demo_id)?;
        require_published(Operation::ShareLinks, &demo)?;

        debug!(demo_id = %demo.id, "Share links issued");
        Ok(self.links.links_for(&demo.id))
    }

    /// Analytics snapshot for a demo. Open to everyone.
    pub fn analytics(&self, demo_id: &DemoId) -> Result<AnalyticsSnapshot> {
        let demo = self.require_demo(demo_id)?;

        // Snapshots are seeded with the demo; a gap means it was stored
        // directly through the repository.
        let snapshot = self
            .repository
            .get_analytics(&demo.id)?
            .unwrap_or_else(|| AnalyticsSnapshot::empty(demo.id));
        Ok(snapshot)
    }

    // ------------------------------------------------------------------
    // Guest access
    // ------------------------------------------------------------------

    /// Issue a grant against a published demo. Sales, sales engineer or
    /// admin. Re-issuing a stored grant identity fails, so revocation
    /// stays terminal.
    pub fn create_guest_grant(
        &mut self,
        grant: GuestAccessGrant,
        actor: Role,
    ) -> Result<GuestAccessGrant> {
        authorize(Operation::CreateGuestGrant, actor)?;

        let demo = self.require_demo(&grant.demo_id)?;
        require_published(Operation::CreateGuestGrant, &demo)?;
        if self.repository.get_grant(&grant.id)?.is_some() {
            return Err(already_exists(Operation::CreateGuestGrant, EntityKind::Grant, grant.id));
        }

        self.repository.upsert_grant(grant.clone())?;

        info!(
            grant_id = %grant.id,
            demo_id = %grant.demo_id,
            access_mode = %grant.access_mode,
            expires_at = %grant.expires_at,
            role = %actor,
            "Guest grant created"
        );
        Ok(grant)
    }

    /// Revoke a grant. Revoking an already revoked grant returns it
    /// unchanged. Sales engineer or admin.
    pub fn revoke_guest_grant(
        &mut self,
        grant_id: &GrantId,
        actor: Role,
    ) -> Result<GuestAccessGrant> {
        authorize(Operation::RevokeGuestGrant, actor)?;

        let mut grant = self
            .repository
            .get_grant(grant_id)?
            .ok_or_else(|| GateError::not_found(EntityKind::Grant, grant_id))?;

        if grant.revoked {
            debug!(grant_id = %grant.id, "Guest grant already revoked");
            return Ok(grant);
        }

        grant.revoked = true;
        self.repository.upsert_grant(grant.clone())?;

        info!(grant_id = %grant.id, role = %actor, "Guest grant revoked");
        Ok(grant)
    }

    // ------------------------------------------------------------------
    // Assistant apps
    // ------------------------------------------------------------------

    /// Store an app registration as given. Sales engineer or admin.
    pub fn register_chatgpt_app(
        &mut self,
        record: ChatGptAppRecord,
        actor: Role,
    ) -> Result<ChatGptAppRecord> {
        authorize(Operation::RegisterChatGptApp, actor)?;

        self.repository.upsert_app(record.clone())?;

        info!(app_id = %record.id, role = %actor, "ChatGPT app registered");
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    fn require_template(&self, id: &TemplateId) -> Result<Template> {
        self.repository
            .get_template(id)?
            .ok_or_else(|| GateError::not_found(EntityKind::Template, id))
    }

    fn require_demo(&self, id: &DemoId) -> Result<DemoInstance> {
        self.repository
            .get_demo(id)?
            .ok_or_else(|| GateError::not_found(EntityKind::Demo, id))
    }
}

impl std::fmt::Debug for WorkflowGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowGate")
            .field("clock", &self.clock)
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

fn authorize(operation: Operation, actor: Role) -> Result<()> {
    match operation.required_roles() {
        Some(required) if !required.contains(actor) => Err(GateError::PermissionDenied {
            operation,
            required,
            actor,
        }),
        _ => Ok(()),
    }
}

fn already_exists(
    operation: Operation,
    entity: EntityKind,
    id: impl std::fmt::Display,
) -> GateError {
    GateError::Validation {
        operation,
        violation: Violation::AlreadyExists {
            entity,
            id: id.to_string(),
        },
    }
}

fn require_published(operation: Operation, demo: &DemoInstance) -> Result<()> {
    if demo.is_published() {
        Ok(())
    } else {
        Err(GateError::Validation {
            operation,
            violation: Violation::DemoNotPublished {
                demo_id: demo.id,
                status: demo.status,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::{TimeZone, Utc};
    use demo_studio_types::{
        AccessMode, BrandingPackage, DataBinding, DemoType, FixedClock, FlowConfig,
    };

    fn template(status: TemplateStatus) -> Template {
        Template::new(
            "Generic Web Chat",
            "Branded chat",
            DemoType::GeneralWebChat,
            semver::Version::new(1, 0, 0),
        )
        .with_status(status)
    }

    fn demo_for(template: &Template) -> DemoInstance {
        DemoInstance::new(
            "Fabrikam Chat",
            "se@company.com",
            template.id,
            template.version.clone(),
            BrandingPackage::new("Fabrikam", "#0078D4", "Fabrikam Assistant", "Welcome"),
            DataBinding::new(["fabrikam-index"]),
            FlowConfig::new("basic"),
        )
    }

    fn published_demo(gate: &mut WorkflowGate) -> DemoInstance {
        let template = gate
            .create_template(template(TemplateStatus::Approved), Role::Developer)
            .unwrap();
        let demo = gate.create_demo(demo_for(&template), Role::Sales).unwrap();
        gate.publish_demo(&demo.id, Role::SalesEngineer).unwrap()
    }

    #[test]
    fn test_create_template_keeps_given_status() {
        let mut gate = WorkflowGate::in_memory();
        let stored = gate
            .create_template(template(TemplateStatus::Published), Role::Admin)
            .unwrap();
        let fetched = gate.repository().get_template(&stored.id).unwrap().unwrap();
        assert_eq!(fetched.status, TemplateStatus::Published);
    }

    #[test]
    fn test_approve_template() {
        let mut gate = WorkflowGate::in_memory();
        let draft = gate
            .create_template(template(TemplateStatus::Draft), Role::Developer)
            .unwrap();

        let approved = gate.approve_template(&draft.id, Role::Admin).unwrap();
        assert_eq!(approved.status, TemplateStatus::Approved);
        assert_eq!(
            gate.repository().get_template(&draft.id).unwrap().unwrap().status,
            TemplateStatus::Approved
        );
    }

    #[test]
    fn test_approve_checks_role_before_existence() {
        let mut gate = WorkflowGate::in_memory();
        let err = gate
            .approve_template(&TemplateId::generate(), Role::Sales)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);

        let err = gate
            .approve_template(&TemplateId::generate(), Role::Developer)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_create_demo_on_missing_template_is_not_found() {
        let mut gate = WorkflowGate::in_memory();
        let orphan = demo_for(&template(TemplateStatus::Approved));
        let err = gate.create_demo(orphan, Role::Sales).unwrap_err();
        assert!(matches!(
            err,
            GateError::NotFound {
                entity: EntityKind::Template,
                ..
            }
        ));
        assert!(gate.repository().list_demos().unwrap().is_empty());
    }

    #[test]
    fn test_create_demo_forces_draft_and_seeds_analytics() {
        let mut gate = WorkflowGate::in_memory();
        let template = gate
            .create_template(template(TemplateStatus::Approved), Role::Developer)
            .unwrap();

        let sneaky = demo_for(&template).with_status(DemoStatus::Published);
        let demo = gate.create_demo(sneaky, Role::SalesEngineer).unwrap();

        assert_eq!(demo.status, DemoStatus::Draft);
        assert!(gate.analytics(&demo.id).unwrap().is_empty());
    }

    #[test]
    fn test_share_links_require_published_demo() {
        let mut gate = WorkflowGate::in_memory();
        let template = gate
            .create_template(template(TemplateStatus::Approved), Role::Developer)
            .unwrap();
        let demo = gate.create_demo(demo_for(&template), Role::Sales).unwrap();

        let err = gate.share_links(&demo.id).unwrap_err();
        assert!(matches!(
            err,
            GateError::Validation {
                violation: Violation::DemoNotPublished { .. },
                ..
            }
        ));

        let err = gate.share_links(&DemoId::generate()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_clone_demo_uses_clock() {
        let at = Utc.with_ymd_and_hms(2025, 4, 1, 15, 0, 0).unwrap();
        let mut gate = WorkflowGate::in_memory().with_clock(Arc::new(FixedClock::new(at)));
        let source = published_demo(&mut gate);

        let clone = gate
            .clone_demo(&source.id, "Fabrikam Chat (EU)", "rep@company.com", Role::Sales)
            .unwrap();

        assert_ne!(clone.id, source.id);
        assert_eq!(clone.created_at, at);
        assert_eq!(clone.status, DemoStatus::Draft);
        assert_eq!(clone.flow_config, source.flow_config);
        assert!(gate.analytics(&clone.id).is_ok());
    }

    #[test]
    fn test_clone_missing_demo() {
        let mut gate = WorkflowGate::in_memory();
        let err = gate
            .clone_demo(&DemoId::generate(), "copy", "rep@company.com", Role::Admin)
            .unwrap_err();
        assert!(matches!(
            err,
            GateError::NotFound {
                entity: EntityKind::Demo,
                ..
            }
        ));

        let err = gate
            .clone_demo(&DemoId::generate(), "copy", "rep@company.com", Role::Developer)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let mut gate = WorkflowGate::in_memory();
        let demo = published_demo(&mut gate);
        let grant = gate
            .create_guest_grant(GuestAccessGrant::new(demo.id, AccessMode::InviteOnly), Role::Sales)
            .unwrap();

        let first = gate.revoke_guest_grant(&grant.id, Role::Admin).unwrap();
        let second = gate.revoke_guest_grant(&grant.id, Role::SalesEngineer).unwrap();
        assert!(first.revoked);
        assert_eq!(first, second);
    }

    #[test]
    fn test_recreating_published_demo_is_rejected() {
        let mut gate = WorkflowGate::in_memory();
        let demo = published_demo(&mut gate);
        let mut snapshot = AnalyticsSnapshot::empty(demo.id);
        snapshot.sessions = 4;
        gate.repository().upsert_analytics(snapshot.clone()).unwrap();

        let template = gate.repository().get_template(&demo.template_id).unwrap().unwrap();
        let err = gate
            .create_demo(demo_for(&template).with_id(demo.id), Role::Sales)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("validation failed for create_demo: demo {} already exists", demo.id)
        );

        let stored = gate.repository().get_demo(&demo.id).unwrap().unwrap();
        assert_eq!(stored.status, DemoStatus::Published);
        assert_eq!(gate.analytics(&demo.id).unwrap(), snapshot);
    }

    #[test]
    fn test_reissuing_revoked_grant_is_rejected() {
        let mut gate = WorkflowGate::in_memory();
        let demo = published_demo(&mut gate);
        let grant = gate
            .create_guest_grant(GuestAccessGrant::new(demo.id, AccessMode::TokenLink), Role::Sales)
            .unwrap();
        gate.revoke_guest_grant(&grant.id, Role::Admin).unwrap();

        let err = gate
            .create_guest_grant(
                GuestAccessGrant::new(demo.id, AccessMode::TokenLink).with_id(grant.id),
                Role::Admin,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            GateError::Validation {
                operation: Operation::CreateGuestGrant,
                violation: Violation::AlreadyExists {
                    entity: EntityKind::Grant,
                    ..
                },
            }
        ));

        let stored = gate.repository().get_grant(&grant.id).unwrap().unwrap();
        assert!(stored.revoked);
    }

    #[test]
    fn test_revoke_unknown_grant() {
        let mut gate = WorkflowGate::in_memory();
        let err = gate
            .revoke_guest_grant(&GrantId::generate(), Role::Admin)
            .unwrap_err();
        assert!(matches!(
            err,
            GateError::NotFound {
                entity: EntityKind::Grant,
                ..
            }
        ));
    }

    #[test]
    fn test_register_chatgpt_app() {
        let mut gate = WorkflowGate::in_memory();
        let record = ChatGptAppRecord::new(
            "Contract Copilot",
            "Clause lookup",
            "https://chatgpt.com/g/contract-copilot",
            "Paste a clause",
            "Lead with risk scoring",
            "se@company.com",
        )
        .with_tags(["legal"]);

        let err = gate
            .register_chatgpt_app(record.clone(), Role::Sales)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);

        let stored = gate
            .register_chatgpt_app(record.clone(), Role::SalesEngineer)
            .unwrap();
        assert_eq!(stored, record);
        assert_eq!(gate.repository().get_app(&record.id).unwrap(), Some(record));
    }

    #[test]
    fn test_list_templates_through_gate() {
        let mut gate = WorkflowGate::in_memory();
        gate.create_template(template(TemplateStatus::Draft), Role::Developer)
            .unwrap();
        gate.create_template(template(TemplateStatus::Approved), Role::Developer)
            .unwrap();

        assert_eq!(gate.list_templates(&TemplateFilter::all()).unwrap().len(), 2);
        assert_eq!(
            gate.list_templates(&TemplateFilter::approved()).unwrap().len(),
            1
        );
    }
}
