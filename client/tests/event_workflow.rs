//! Event-creation workflow tests over the in-memory backend.

#![allow(clippy::unwrap_used)]

use gatherly_client::{
    AdminProvisioner, BannerUpload, ClientSession, CompensationOutcome, CreateEventError,
    EventDraft, EventStep, Sponsor, mocks::MemoryProfileStore,
};
use gatherly_platform::{Account, PlatformConfig};
use gatherly_testing::{FailOp, MemoryBackend};

type TestSession =
    ClientSession<MemoryBackend, MemoryBackend, MemoryBackend, MemoryProfileStore, MemoryBackend>;

fn test_config() -> PlatformConfig {
    PlatformConfig::new(
        MemoryBackend::ENDPOINT.to_string(),
        MemoryBackend::PROJECT_ID.to_string(),
    )
    .with_database_id("db".to_string())
    .with_events_collection_id("events".to_string())
    .with_banner_bucket_id("banners".to_string())
    .with_app_url("https://app.example.com".to_string())
}

fn build_session(backend: &MemoryBackend) -> (TestSession, MemoryProfileStore) {
    let profiles = MemoryProfileStore::new();
    let session = ClientSession::new(
        test_config(),
        backend.clone(),
        backend.clone(),
        backend.clone(),
        profiles.clone(),
        AdminProvisioner::new(backend.clone()),
    );
    (session, profiles)
}

fn owner_account() -> Account {
    Account {
        id: "owner-1".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        email_verification: true,
        registration: None,
    }
}

async fn signed_in_session(backend: &MemoryBackend) -> TestSession {
    backend.force_login(owner_account()).unwrap();
    let (mut session, _profiles) = build_session(backend);
    session.fetch_current_user().await.unwrap();
    session
}

fn draft() -> EventDraft {
    EventDraft {
        name: "RustConf".to_string(),
        description: "A conference about Rust".to_string(),
        hostname: "Ada".to_string(),
        date: "2026-09-12".to_string(),
        email: "ada@example.com".to_string(),
        city: "Portland".to_string(),
        kind: "conference".to_string(),
        attendees: 300,
        price: 99.0,
        ..EventDraft::default()
    }
}

fn sponsors() -> Vec<Sponsor> {
    vec![
        Sponsor {
            id: 1,
            name: "Ferrous Widgets".to_string(),
            url: "https://ferrous.example.com".to_string(),
        },
        Sponsor {
            id: 2,
            name: "Crab Cloud".to_string(),
            url: "https://crab.example.com".to_string(),
        },
    ]
}

fn banner() -> BannerUpload {
    BannerUpload::new("banner.png", vec![0x89, 0x50, 0x4e, 0x47])
}

#[tokio::test]
async fn successful_creation_provisions_document_and_both_collections() {
    let backend = MemoryBackend::new();
    let session = signed_in_session(&backend).await;

    let record = session
        .create_event(&draft(), banner(), &sponsors())
        .await
        .unwrap();

    // Exactly one event document, one reg_<id> and one spon_<id> collection.
    assert_eq!(backend.document_count("events").unwrap(), 1);
    assert_eq!(record.registrations_collection_id, format!("reg_{}", record.event_id));
    assert_eq!(record.sponsors_collection_id, format!("spon_{}", record.event_id));
    assert!(backend.collection(&record.registrations_collection_id).unwrap().is_some());
    assert!(backend.collection(&record.sponsors_collection_id).unwrap().is_some());

    // Sponsor rows match the supplied list exactly.
    assert_eq!(
        backend.document_count(&record.sponsors_collection_id).unwrap(),
        sponsors().len()
    );

    // The stored document carries the derived banner URL and creator.
    let documents = backend.documents_in("events").unwrap();
    let document = &documents[0];
    let expected_url = format!(
        "{}/storage/buckets/banners/files/{}/view?project={}&mode=admin",
        MemoryBackend::ENDPOINT,
        record.banner_file_id,
        MemoryBackend::PROJECT_ID,
    );
    assert_eq!(document.data["url"].as_str(), Some(expected_url.as_str()));
    assert_eq!(record.banner_url, expected_url);
    assert_eq!(document.data["created"].as_str(), Some("owner-1"));
    assert_eq!(document.data["eventname"].as_str(), Some("RustConf"));
    assert!(document.data["registrations"].as_array().unwrap().is_empty());

    assert_eq!(backend.file_count().unwrap(), 1);
}

#[tokio::test]
async fn creator_falls_back_to_persisted_mirror() {
    use chrono::Utc;
    use gatherly_client::{CurrentUser, ProfileStore};

    let backend = MemoryBackend::new();
    let (session, profiles) = build_session(&backend);

    // No in-memory user; only the persisted mirror knows who is signed in.
    profiles
        .save(&CurrentUser {
            user_id: "owner-2".to_string(),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            email_verified: true,
            fetched_at: Utc::now(),
        })
        .unwrap();

    let record = session
        .create_event(&draft(), banner(), &sponsors())
        .await
        .unwrap();
    assert_eq!(record.created_by, "owner-2");

    let documents = backend.documents_in("events").unwrap();
    assert_eq!(documents[0].data["created"].as_str(), Some("owner-2"));
}

#[tokio::test]
async fn unauthenticated_creation_touches_nothing() {
    let backend = MemoryBackend::new();
    let (session, _profiles) = build_session(&backend);

    let error = session
        .create_event(&draft(), banner(), &sponsors())
        .await
        .unwrap_err();

    assert!(matches!(error, CreateEventError::NotAuthenticated));
    assert_eq!(backend.file_count().unwrap(), 0);
    assert_eq!(backend.document_count("events").unwrap(), 0);
}

#[tokio::test]
async fn document_write_failure_compensates_the_banner() {
    let backend = MemoryBackend::new();
    let session = signed_in_session(&backend).await;

    backend.fail_next(FailOp::CreateDocument);
    let error = session
        .create_event(&draft(), banner(), &sponsors())
        .await
        .unwrap_err();

    assert_eq!(error.step(), Some(EventStep::WriteDocument));
    match &error {
        CreateEventError::Failed { compensation, .. } => {
            assert_eq!(compensation.len(), 1);
            assert!(matches!(
                compensation[0],
                CompensationOutcome::BannerDeleted { .. }
            ));
        }
        CreateEventError::NotAuthenticated => unreachable!("wrong variant"),
    }

    // Nothing survives the unwind, and no sub-collection was ever created.
    assert_eq!(backend.file_count().unwrap(), 0);
    assert_eq!(backend.document_count("events").unwrap(), 0);
    assert_eq!(backend.collection_count().unwrap(), 0);
}

#[tokio::test]
async fn registration_provisioning_failure_unwinds_document_then_banner() {
    let backend = MemoryBackend::new();
    let session = signed_in_session(&backend).await;

    backend.fail_next(FailOp::CreateCollection);
    let error = session
        .create_event(&draft(), banner(), &sponsors())
        .await
        .unwrap_err();

    assert_eq!(error.step(), Some(EventStep::ProvisionRegistrations));
    match &error {
        CreateEventError::Failed { compensation, .. } => {
            assert_eq!(compensation.len(), 2);
            assert!(matches!(
                compensation[0],
                CompensationOutcome::DocumentDeleted { .. }
            ));
            assert!(matches!(
                compensation[1],
                CompensationOutcome::BannerDeleted { .. }
            ));
        }
        CreateEventError::NotAuthenticated => unreachable!("wrong variant"),
    }
    assert!(error.orphans().is_empty());

    assert_eq!(backend.document_count("events").unwrap(), 0);
    assert_eq!(backend.file_count().unwrap(), 0);
    assert_eq!(backend.collection_count().unwrap(), 0);
}

#[tokio::test]
async fn sponsor_seed_failure_reports_the_sponsor_step() {
    let backend = MemoryBackend::new();
    let session = signed_in_session(&backend).await;

    // The event document is the first document write; the first sponsor
    // seed row is the second.
    backend.fail_after(FailOp::CreateDocument, 1);
    let error = session
        .create_event(&draft(), banner(), &sponsors())
        .await
        .unwrap_err();

    assert_eq!(error.step(), Some(EventStep::ProvisionSponsors));
    // The document and banner were unwound even though provisioning had
    // partially committed.
    assert_eq!(backend.document_count("events").unwrap(), 0);
    assert_eq!(backend.file_count().unwrap(), 0);
}

#[tokio::test]
async fn failed_compensation_reports_the_orphaned_document() {
    let backend = MemoryBackend::new();
    let session = signed_in_session(&backend).await;

    backend.fail_next(FailOp::CreateCollection);
    backend.fail_next(FailOp::DeleteDocument);
    let error = session
        .create_event(&draft(), banner(), &sponsors())
        .await
        .unwrap_err();

    assert_eq!(error.step(), Some(EventStep::ProvisionRegistrations));
    let orphans = error.orphans();
    assert_eq!(orphans.len(), 1);
    assert!(matches!(
        orphans[0],
        CompensationOutcome::DocumentOrphaned { .. }
    ));

    // The document really is still there; the banner compensation worked.
    assert_eq!(backend.document_count("events").unwrap(), 1);
    assert_eq!(backend.file_count().unwrap(), 0);
}
