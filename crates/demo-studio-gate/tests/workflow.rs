//! End-to-end lifecycle tests: template to demo to share links and guest access.

use std::sync::Arc;

use demo_studio_gate::{ErrorKind, GateError, StudioConfig, Violation, WorkflowGate};
use demo_studio_registry::{DemoRegistry, GrantRegistry, InMemoryStudioStore};
use demo_studio_types::{
    AccessMode, BrandingPackage, DataBinding, DemoInstance, DemoStatus, DemoType, FlowConfig,
    GuestAccessGrant, Role, Template, TemplateStatus,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn document_qa_template() -> Template {
    Template::new(
        "Document Q&A Starter",
        "RAG chat template",
        DemoType::DocumentQa,
        semver::Version::new(1, 0, 0),
    )
    .with_channels(["web", "teams", "sharepoint"])
    .with_industry_tags(["general"])
    .with_flows(["qna", "summarize"])
    .with_sample_dataset("contracts-demo")
}

fn contoso_demo(template: &Template) -> DemoInstance {
    DemoInstance::new(
        "Contoso Contract Demo",
        "rep@company.com",
        template.id,
        template.version.clone(),
        BrandingPackage::new(
            "Contoso",
            "#004578",
            "Contoso AI Contract Assistant",
            "Ask about your contract risks",
        ),
        DataBinding::new(["contracts-demo"])
            .with_connector_refs(["sharepoint:contracts"])
            .with_metadata_schema("contract"),
        FlowConfig::new("basic")
            .with_presets(["compare", "summarize"])
            .with_parameter("temperature", json!(0.2)),
    )
}

fn fabrikam_demo(template: &Template) -> DemoInstance {
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

// ---------------------------------------------------------------------------
// Tests: Full lifecycles
// ---------------------------------------------------------------------------

#[test]
fn template_to_published_demo_to_share_links() {
    init_tracing();
    let mut gate = WorkflowGate::in_memory();

    let template = gate
        .create_template(document_qa_template(), Role::Developer)
        .unwrap();
    assert_eq!(template.status, TemplateStatus::Draft);
    gate.approve_template(&template.id, Role::Developer).unwrap();

    let demo = gate
        .create_demo(contoso_demo(&template), Role::Sales)
        .unwrap();
    assert_eq!(demo.status, DemoStatus::Draft);

    let published = gate.publish_demo(&demo.id, Role::SalesEngineer).unwrap();
    assert_eq!(published.status, DemoStatus::Published);

    let links = gate.share_links(&demo.id).unwrap().to_map();
    assert!(links.contains_key("web_url"));
    assert!(links.contains_key("teams_embed"));
    assert!(links.contains_key("sharepoint_embed"));
    assert!(links["teams_embed"].contains("channel=teams"));
    assert!(links["teams_embed"].contains(&demo.id.to_string()));
    assert!(links["sharepoint_embed"].contains(&demo.id.to_string()));
}

#[test]
fn guest_grant_has_safe_defaults_and_can_be_revoked() {
    init_tracing();
    let store = Arc::new(InMemoryStudioStore::new());
    let mut gate = WorkflowGate::new(store.clone(), &StudioConfig::default());

    let template = gate
        .create_template(
            Template::new(
                "Generic Web Chat",
                "Branded chat",
                DemoType::GeneralWebChat,
                semver::Version::new(1, 0, 0),
            )
            .with_status(TemplateStatus::Approved),
            Role::Developer,
        )
        .unwrap();

    let demo = gate
        .create_demo(fabrikam_demo(&template), Role::Sales)
        .unwrap();
    gate.publish_demo(&demo.id, Role::SalesEngineer).unwrap();

    let grant = gate
        .create_guest_grant(
            GuestAccessGrant::new(demo.id, AccessMode::TokenLink)
                .with_allowed_domains(["fabrikam.com"]),
            Role::Sales,
        )
        .unwrap();
    assert!(grant.safe_mode.enabled);
    assert!(!grant.safe_mode.exports_enabled);
    assert!(!grant.revoked);

    let revoked = gate
        .revoke_guest_grant(&grant.id, Role::SalesEngineer)
        .unwrap();
    assert!(revoked.revoked);

    // Observable through a fresh lookup
    let stored = store.get_grant(&grant.id).unwrap().unwrap();
    assert!(stored.revoked);
    assert_eq!(stored.allowed_domains, vec!["fabrikam.com".to_string()]);
}

#[test]
fn cloned_demo_must_be_published_before_sharing() {
    let mut gate = WorkflowGate::in_memory();
    let template = gate
        .create_template(
            document_qa_template().with_status(TemplateStatus::Approved),
            Role::Admin,
        )
        .unwrap();
    let demo = gate.create_demo(contoso_demo(&template), Role::Admin).unwrap();
    gate.publish_demo(&demo.id, Role::Admin).unwrap();

    let clone = gate
        .clone_demo(&demo.id, "Contoso EU", "eu-rep@company.com", Role::SalesEngineer)
        .unwrap();
    assert_eq!(clone.status, DemoStatus::Draft);
    assert_eq!(clone.branding, demo.branding);

    let err = gate.share_links(&clone.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    gate.publish_demo(&clone.id, Role::SalesEngineer).unwrap();
    let links = gate.share_links(&clone.id).unwrap();
    assert!(links.web_url.ends_with(&clone.id.to_string()));
}

// ---------------------------------------------------------------------------
// Tests: Error classification
// ---------------------------------------------------------------------------

#[test]
fn publish_unknown_demo_is_not_found_even_for_admin() {
    let mut gate = WorkflowGate::in_memory();
    let err = gate
        .publish_demo(&demo_studio_types::DemoId::generate(), Role::Admin)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn permission_is_checked_before_existence() {
    let mut gate = WorkflowGate::in_memory();
    let err = gate
        .publish_demo(&demo_studio_types::DemoId::generate(), Role::Sales)
        .unwrap_err();
    match err {
        GateError::PermissionDenied {
            required, actor, ..
        } => {
            assert_eq!(actor, Role::Sales);
            assert_eq!(required.0, vec![Role::SalesEngineer, Role::Admin]);
        }
        other => panic!("expected permission error, got {other:?}"),
    }
}

#[test]
fn grant_against_draft_demo_fails_for_every_allowed_role() {
    let store = Arc::new(InMemoryStudioStore::new());
    let mut gate = WorkflowGate::new(store.clone(), &StudioConfig::default());
    let template = gate
        .create_template(
            document_qa_template().with_status(TemplateStatus::Approved),
            Role::Developer,
        )
        .unwrap();
    let demo = gate.create_demo(contoso_demo(&template), Role::Sales).unwrap();

    for role in [Role::Sales, Role::SalesEngineer, Role::Admin] {
        let err = gate
            .create_guest_grant(GuestAccessGrant::new(demo.id, AccessMode::InviteOnly), role)
            .unwrap_err();
        assert!(
            matches!(
                err,
                GateError::Validation {
                    violation: Violation::DemoNotPublished { .. },
                    ..
                }
            ),
            "role {role} got {err:?}"
        );
    }

    assert!(store.list_grants_for_demo(&demo.id).unwrap().is_empty());
}

#[test]
fn failed_operations_write_nothing() {
    let store = Arc::new(InMemoryStudioStore::new());
    let mut gate = WorkflowGate::new(store.clone(), &StudioConfig::default());

    let draft = gate
        .create_template(document_qa_template(), Role::Developer)
        .unwrap();
    let err = gate
        .create_demo(contoso_demo(&draft), Role::Sales)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert!(store.list_demos().unwrap().is_empty());
}

#[test]
fn share_links_follow_configured_base_url() {
    let mut config = StudioConfig::default();
    config.links.base_url = "https://demos.contoso.test/".to_string();
    let mut gate = WorkflowGate::new(Arc::new(InMemoryStudioStore::new()), &config);

    let template = gate
        .create_template(
            document_qa_template().with_status(TemplateStatus::Published),
            Role::Developer,
        )
        .unwrap();
    let demo = gate.create_demo(contoso_demo(&template), Role::Sales).unwrap();
    gate.publish_demo(&demo.id, Role::Admin).unwrap();

    let links = gate.share_links(&demo.id).unwrap();
    assert_eq!(
        links.web_url,
        format!("https://demos.contoso.test/d/{}", demo.id)
    );
    assert_eq!(
        links.sharepoint_embed,
        format!(
            "https://demos.contoso.test/embed?demoId={}&channel=sharepoint",
            demo.id
        )
    );
}
