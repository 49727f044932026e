use super::common::*;
use crate::intake::domain::{DocumentId, UploadedFile};
use crate::intake::store::{ApplicantDocumentStore, StoreError};

#[test]
fn add_applicant_appends_and_selects_new_entry() {
    let mut store = store_with(&["Alice"]);
    let before = store.applicants().len();

    let bob = store.add_applicant("Bob").expect("valid name");

    assert_eq!(store.applicants().len(), before + 1);
    assert_eq!(store.cursor(), Some(1));
    assert_eq!(store.current_applicant(), Some(&bob));
    assert!(
        store.documents_for(&bob.id).is_none(),
        "no document map entry until a document is added"
    );
}

#[test]
fn add_applicant_rejects_blank_names() {
    let mut store = store_with(&["Alice"]);

    for name in ["", "   ", "\t\n"] {
        match store.add_applicant(name) {
            Err(StoreError::Validation { field }) => assert_eq!(field, "applicant name"),
            other => panic!("expected validation error for {name:?}, got {other:?}"),
        }
    }

    assert_eq!(store.applicants().len(), 1);
    assert_eq!(store.cursor(), Some(0));
}

#[test]
fn add_applicant_keeps_name_verbatim() {
    let mut store = ApplicantDocumentStore::new();
    let applicant = store.add_applicant("  Alice ").expect("valid name");
    assert_eq!(applicant.name, "  Alice ");
}

#[test]
fn ids_are_never_reused_after_deletion() {
    let mut store = store_with(&["Alice"]);
    let first = store.current_applicant().expect("selected").id.clone();
    let first_doc = document_named(&mut store, "ID Card");

    store.delete_applicant().expect("delete succeeds");
    let second = store.add_applicant("Alice").expect("valid name");
    let second_doc = document_named(&mut store, "ID Card");

    assert_ne!(first, second.id);
    assert_ne!(first_doc, second_doc);
}

#[test]
fn rapid_additions_produce_distinct_ids() {
    let mut store = ApplicantDocumentStore::new();
    let mut ids = std::collections::HashSet::new();
    for index in 0..200 {
        let applicant = store
            .add_applicant(format!("Applicant {index}"))
            .expect("valid name");
        assert!(ids.insert(applicant.id));
    }
}

#[test]
fn delete_applicant_requires_selection() {
    let mut store = ApplicantDocumentStore::new();
    assert_eq!(store.delete_applicant(), Err(StoreError::NoSelection));
    assert_eq!(store.cursor(), None);
}

#[test]
fn delete_applicant_cascades_and_resets_cursor_to_first() {
    let mut store = store_with(&["Alice", "Bob", "Carol"]);
    let alice_id = store.applicants()[0].id.clone();

    store.select_previous();
    assert_eq!(store.cursor(), Some(1));
    let bob_id = store.current_applicant().expect("bob selected").id.clone();
    document_named(&mut store, "Lease");

    store.select_previous();
    let alice_doc = document_named(&mut store, "Passport");

    store.select_next();
    let removed = store.delete_applicant().expect("delete bob");

    assert_eq!(removed.id, bob_id);
    assert!(store.documents_for(&bob_id).is_none());
    assert_eq!(store.cursor(), Some(0));
    assert_eq!(store.current_applicant().map(|a| a.id.clone()), Some(alice_id.clone()));

    let alice_docs = store.documents_for(&alice_id).expect("alice keeps documents");
    assert_eq!(alice_docs.len(), 1);
    assert_eq!(alice_docs[0].id, alice_doc);
}

#[test]
fn delete_last_applicant_clears_selection() {
    let mut store = store_with(&["Alice"]);
    store.delete_applicant().expect("delete succeeds");

    assert!(store.applicants().is_empty());
    assert_eq!(store.cursor(), None);
    assert!(store.current_applicant().is_none());
    assert!(store.documents_for_current().is_empty());
}

#[test]
fn add_document_requires_selection_before_validation() {
    let mut store = ApplicantDocumentStore::new();
    assert_eq!(store.add_document(""), Err(StoreError::NoSelection));
    assert_eq!(store.add_document("ID Card"), Err(StoreError::NoSelection));
}

#[test]
fn add_document_rejects_blank_names() {
    let mut store = store_with(&["Alice"]);
    assert_eq!(
        store.add_document("  "),
        Err(StoreError::Validation {
            field: "document name"
        })
    );
    assert!(store.documents_for_current().is_empty());
    let alice = store.current_applicant().expect("selected").id.clone();
    assert!(store.documents_for(&alice).is_none());
}

#[test]
fn documents_are_scoped_to_their_applicant() {
    let mut store = store_with(&["Alice", "Bob"]);
    let bob_doc = document_named(&mut store, "Pay Stub");

    store.select_previous();
    assert!(store.documents_for_current().is_empty());

    let err = store
        .add_files(&bob_doc, vec![scan("stub.pdf")])
        .expect_err("bob's document is not reachable from alice");
    assert_eq!(
        err,
        StoreError::NotFound {
            document_id: bob_doc.clone()
        }
    );
    assert!(store.delete_document(&bob_doc).is_err());

    store.select_next();
    assert_eq!(store.documents_for_current().len(), 1);
    assert!(store.documents_for_current()[0].files.is_empty());
}

#[test]
fn delete_document_removes_only_the_target() {
    let mut store = store_with(&["Alice"]);
    let id_card = document_named(&mut store, "ID Card");
    let lease = document_named(&mut store, "Lease");

    let removed = store.delete_document(&id_card).expect("delete succeeds");

    assert_eq!(removed.name, "ID Card");
    let remaining: Vec<_> = store.documents_for_current().iter().map(|d| &d.id).collect();
    assert_eq!(remaining, vec![&lease]);
}

#[test]
fn delete_document_keeps_empty_map_entry() {
    let mut store = store_with(&["Alice"]);
    let id_card = document_named(&mut store, "ID Card");
    store.delete_document(&id_card).expect("delete succeeds");

    let alice = store.current_applicant().expect("selected").id.clone();
    assert_eq!(store.documents_for(&alice).map(<[_]>::len), Some(0));
}

#[test]
fn delete_document_reports_unknown_ids() {
    let mut store = store_with(&["Alice"]);
    document_named(&mut store, "ID Card");
    let missing = DocumentId("document-999999".to_string());

    assert_eq!(
        store.delete_document(&missing),
        Err(StoreError::NotFound {
            document_id: missing.clone()
        })
    );
    assert_eq!(store.documents_for_current().len(), 1);
}

#[test]
fn add_files_appends_in_arrival_order_without_dedup() {
    let mut store = store_with(&["Alice"]);
    let doc = document_named(&mut store, "Bank Statements");

    store
        .add_files(&doc, vec![scan("march.pdf"), scan("april.pdf")])
        .expect("first batch");
    let total = store
        .add_files(&doc, vec![scan("march.pdf")])
        .expect("second batch");

    assert_eq!(total, 3);
    let names: Vec<_> = store.documents_for_current()[0]
        .files
        .iter()
        .map(|file| file.name.as_str())
        .collect();
    assert_eq!(names, vec!["march.pdf", "april.pdf", "march.pdf"]);
}

#[test]
fn add_files_with_empty_batch_is_a_no_op() {
    let mut store = store_with(&["Alice"]);
    let doc = document_named(&mut store, "ID Card");
    let total = store
        .add_files(&doc, Vec::<UploadedFile>::new())
        .expect("empty batch accepted");
    assert_eq!(total, 0);
}

#[test]
fn remove_file_by_position() {
    let mut store = store_with(&["Alice"]);
    let doc = document_named(&mut store, "ID Card");
    store
        .add_files(&doc, vec![scan("front.png"), scan("back.png"), scan("selfie.png")])
        .expect("batch added");

    let removed = store.remove_file(&doc, 1).expect("index in range");

    assert_eq!(removed.name, "back.png");
    let names: Vec<_> = store.documents_for_current()[0]
        .files
        .iter()
        .map(|file| file.name.clone())
        .collect();
    assert_eq!(names, vec!["front.png", "selfie.png"]);
}

#[test]
fn remove_file_out_of_range_leaves_files_untouched() {
    let mut store = store_with(&["Alice"]);
    let doc = document_named(&mut store, "ID Card");
    store
        .add_files(&doc, vec![scan("front.png")])
        .expect("batch added");
    let before = store.documents_for_current()[0].files.clone();

    for index in [1, 7, usize::MAX] {
        assert_eq!(
            store.remove_file(&doc, index),
            Err(StoreError::Index {
                document_id: doc.clone(),
                index,
                len: 1,
            })
        );
    }

    assert_eq!(store.documents_for_current()[0].files, before);
}

#[test]
fn navigation_saturates_at_both_ends() {
    let mut store = store_with(&["Alice", "Bob", "Carol"]);
    assert_eq!(store.cursor(), Some(2));
    assert!(!store.can_select_next());

    assert_eq!(store.select_next(), Some(2));
    assert_eq!(store.select_previous(), Some(1));
    assert_eq!(store.select_previous(), Some(0));
    assert!(!store.can_select_previous());
    assert_eq!(store.select_previous(), Some(0));
    assert_eq!(store.select_next(), Some(1));
}

#[test]
fn navigation_on_empty_store_is_a_no_op() {
    let mut store = ApplicantDocumentStore::new();
    assert_eq!(store.select_next(), None);
    assert_eq!(store.select_previous(), None);
    assert!(store.current_applicant().is_none());
}

#[test]
fn caseworker_walkthrough() {
    let mut store = ApplicantDocumentStore::new();
    store.add_applicant("Alice").expect("alice");
    store.add_applicant("Bob").expect("bob");
    assert_eq!(store.cursor(), Some(1));
    assert_eq!(store.current_applicant().map(|a| a.name.as_str()), Some("Bob"));

    store.select_previous();
    assert_eq!(store.cursor(), Some(0));
    let alice_id = store.current_applicant().expect("alice").id.clone();

    let doc = store.add_document("ID Card").expect("document").id;
    let documents = store.documents_for_current();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].name, "ID Card");
    assert!(documents[0].files.is_empty());

    let total = store
        .add_files(&doc, vec![UploadedFile::new("scan.png", "handle-h")])
        .expect("files");
    assert_eq!(total, 1);

    store.delete_applicant().expect("delete alice");
    let names: Vec<_> = store.applicants().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Bob"]);
    assert_eq!(store.cursor(), Some(0));
    assert!(store.documents_for(&alice_id).is_none());
}
