//! Tests for the add / upload / list / download flows against an in-memory store.

mod mocks;

use contacts_xml::error::{ServiceError, StoreError};
use contacts_xml::{
    AddContactOutcome, ContactField, ContactService, ContactServiceImpl, ContactValidator,
    MetricsTracker, RawContact, RejectionKind, UploadOutcome, ValidationResult,
};
use mocks::MockDocumentStore;
use std::sync::Arc;

const VALID_DOCUMENT: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
    <contacts><contact><first_name>иван</first_name><last_name>иванов</last_name>\
    <email>ivan@example.com</email><phone>+7 900 123 45 67</phone></contact></contacts>";

fn service_with(store: &MockDocumentStore, max_upload_bytes: usize) -> ContactServiceImpl {
    ContactServiceImpl::new(
        Arc::new(store.clone()),
        ContactValidator::default(),
        max_upload_bytes,
        MetricsTracker::new(),
    )
}

fn service(store: &MockDocumentStore) -> ContactServiceImpl {
    service_with(store, 1024 * 1024)
}

fn raw_contact(email: &str) -> RawContact {
    RawContact::new()
        .with(ContactField::FirstName, "мария")
        .with(ContactField::LastName, "сидорова")
        .with(ContactField::Email, email)
        .with(ContactField::Phone, "89005556677")
}

#[tokio::test]
async fn test_add_contact_writes_canonical_document() {
    let store = MockDocumentStore::new();
    let service = service(&store);

    let outcome = service
        .add_contact(raw_contact("maria@example.com"))
        .await
        .unwrap();

    let stored = match outcome {
        AddContactOutcome::Saved(stored) => stored,
        other => panic!("Expected saved contact, got: {:?}", other),
    };
    assert!(stored.file_name.ends_with(".xml"));
    assert_eq!(stored.contacts[0].first_name.as_str(), "Мария");

    let bytes = store.get(&stored.file_name).unwrap();
    let xml = String::from_utf8(bytes).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?><contacts><contact>"));
    assert!(xml.contains("<first_name>Мария</first_name>"));
    assert_eq!(store.get_call_count("write"), 1);
}

#[tokio::test]
async fn test_add_contact_rejection_touches_nothing() {
    let store = MockDocumentStore::new();
    let service = service(&store);

    let outcome = service.add_contact(raw_contact("nope")).await.unwrap();

    match outcome {
        AddContactOutcome::Rejected(errors) => {
            assert_eq!(errors.fields(), vec![ContactField::Email]);
        }
        other => panic!("Expected rejection, got: {:?}", other),
    }
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_add_contact_each_file_name_unique() {
    let store = MockDocumentStore::new();
    let service = service(&store);

    for _ in 0..3 {
        service
            .add_contact(raw_contact("maria@example.com"))
            .await
            .unwrap();
    }
    assert_eq!(store.names().len(), 3);
}

#[tokio::test]
async fn test_upload_valid_document_is_staged_then_promoted() {
    let store = MockDocumentStore::new();
    let service = service(&store);

    let outcome = service
        .upload_document(VALID_DOCUMENT.as_bytes().to_vec())
        .await
        .unwrap();

    let stored = match outcome {
        UploadOutcome::Accepted(stored) => stored,
        other => panic!("Expected accepted upload, got: {:?}", other),
    };
    assert_eq!(stored.contacts.len(), 1);
    assert_eq!(stored.contacts[0].phone.as_str(), "89001234567");

    // Uploaded bytes are kept verbatim; only the file name is new.
    assert_eq!(store.names(), vec![stored.file_name.clone()]);
    assert_eq!(
        store.get(&stored.file_name).unwrap(),
        VALID_DOCUMENT.as_bytes()
    );
    assert_eq!(store.get_call_count("write"), 1);
    assert_eq!(store.get_call_count("rename"), 1);
}

#[tokio::test]
async fn test_invalid_upload_never_reaches_store() {
    let store = MockDocumentStore::new();
    let service = service(&store);

    let outcome = service
        .upload_document("<contacts><contact><first_name>Иван</first_name></contact></contacts>".as_bytes().to_vec())
        .await
        .unwrap();

    match outcome {
        UploadOutcome::Rejected(rejection) => {
            assert_eq!(rejection.kind(), RejectionKind::StructuralError);
            assert_eq!(rejection.contact_index(), Some(1));
        }
        other => panic!("Expected rejection, got: {:?}", other),
    }
    assert_eq!(store.total_calls(), 0);
    assert!(store.names().is_empty());
}

#[tokio::test]
async fn test_failed_promotion_removes_staged_upload() {
    let store = MockDocumentStore::new();
    store.fail_on("rename");
    let service = service(&store);

    let result = service
        .upload_document(VALID_DOCUMENT.as_bytes().to_vec())
        .await;

    assert!(matches!(result, Err(ServiceError::Store(StoreError::Io(_)))));
    assert_eq!(store.get_call_count("delete"), 1);
    assert!(store.names().is_empty());
}

#[tokio::test]
async fn test_failed_write_is_reported() {
    let store = MockDocumentStore::new();
    store.fail_on("write");
    let service = service(&store);

    let result = service.add_contact(raw_contact("maria@example.com")).await;
    assert!(matches!(result, Err(ServiceError::Store(StoreError::Io(_)))));

    let result = service
        .upload_document(VALID_DOCUMENT.as_bytes().to_vec())
        .await;
    assert!(result.is_err());
    assert_eq!(store.get_call_count("rename"), 0);
    assert!(store.names().is_empty());
}

#[tokio::test]
async fn test_upload_size_limit() {
    let store = MockDocumentStore::new();
    let service = service_with(&store, 16);

    let result = service
        .upload_document(VALID_DOCUMENT.as_bytes().to_vec())
        .await;

    match result {
        Err(ServiceError::UploadTooLarge { size, limit }) => {
            assert_eq!(size, VALID_DOCUMENT.len());
            assert_eq!(limit, 16);
        }
        other => panic!("Expected UploadTooLarge, got: {:?}", other),
    }
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_list_reports_valid_and_invalid_files() {
    let store = MockDocumentStore::new();
    store.insert("b.xml", VALID_DOCUMENT);
    store.insert("a.xml", "<contacts></contacts>");
    store.insert("c.xml", "<contacts><contact>");
    store.insert("d.upload", VALID_DOCUMENT);
    let service = service(&store);

    let listings = service.list_documents().await.unwrap();

    let names: Vec<_> = listings.iter().map(|l| l.file_name.as_str()).collect();
    assert_eq!(names, vec!["a.xml", "b.xml", "c.xml"]);

    assert_eq!(listings[0].error.as_deref(), Some("no contact element found"));
    assert!(listings[0].contacts.is_empty());

    assert_eq!(listings[1].error, None);
    assert_eq!(listings[1].contacts[0].first_name.as_str(), "Иван");

    assert!(listings[2]
        .error
        .as_deref()
        .unwrap()
        .starts_with("malformed XML: "));
}

#[tokio::test]
async fn test_list_empty_store() {
    let store = MockDocumentStore::new();
    let service = service(&store);

    assert!(service.list_documents().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_propagates_storage_failure() {
    let store = MockDocumentStore::new();
    store.insert("a.xml", VALID_DOCUMENT);
    store.fail_on("read");
    let service = service(&store);

    assert!(service.list_documents().await.is_err());
}

#[tokio::test]
async fn test_download() {
    let store = MockDocumentStore::new();
    store.insert("a.xml", VALID_DOCUMENT);
    let service = service(&store);

    let text = service.download_document("a.xml").await.unwrap();
    assert_eq!(text, VALID_DOCUMENT);

    for missing in ["b.xml", "a.txt", "../a.xml", "d.upload"] {
        let err = service.download_document(missing).await.unwrap_err();
        assert!(err.is_not_found(), "{} should be not found", missing);
    }
}

#[tokio::test]
async fn test_download_non_utf8_is_reported_not_altered() {
    let store = MockDocumentStore::new();
    store.insert("latin1.xml", b"<contacts>\xC0\xE1</contacts>".to_vec());
    let service = service(&store);

    match service.download_document("latin1.xml").await {
        Err(ServiceError::NotUtf8 { file_name }) => assert_eq!(file_name, "latin1.xml"),
        other => panic!("Expected NotUtf8, got: {:?}", other),
    }

    // The listing reports the same file as malformed instead of failing.
    let listings = service.list_documents().await.unwrap();
    assert!(listings[0]
        .error
        .as_deref()
        .unwrap()
        .starts_with("malformed XML: invalid UTF-8"));
}

#[tokio::test]
async fn test_validate_only_does_not_store() {
    let store = MockDocumentStore::new();
    let service = service(&store);

    let result = service.validate_document(VALID_DOCUMENT.as_bytes());
    assert!(matches!(result, ValidationResult::Valid(ref c) if c.len() == 1));
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_metrics_follow_outcomes() {
    let store = MockDocumentStore::new();
    let metrics = MetricsTracker::new();
    let service = ContactServiceImpl::new(
        Arc::new(store.clone()),
        ContactValidator::default(),
        1024,
        metrics.clone(),
    );

    service
        .upload_document(VALID_DOCUMENT.as_bytes().to_vec())
        .await
        .unwrap();
    service
        .upload_document(b"<contacts/>".to_vec())
        .await
        .unwrap();

    assert_eq!(metrics.documents_validated_total(), 2);
    assert_eq!(metrics.documents_accepted_total(), 1);
    assert_eq!(metrics.rejections_total(RejectionKind::StructuralError), 1);
    assert_eq!(metrics.contacts_stored_total(), 1);
}
