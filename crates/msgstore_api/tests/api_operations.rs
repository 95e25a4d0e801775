use msgstore_api::{ApiError, ApiResponse, Message, MessageApi, MessagePayload};
use std::collections::HashSet;

#[test]
fn add_get_list_roundtrip() {
    let api = MessageApi::open_in_memory().unwrap();

    let first = api
        .add_message(MessagePayload::new("one", "body", "u1"))
        .unwrap();
    let second = api
        .add_message(MessagePayload::new("two", "body", "u2"))
        .unwrap();
    assert_ne!(first.id, second.id);

    assert_eq!(api.get_message(&first.id).unwrap(), first);

    let ids = api
        .get_messages()
        .unwrap()
        .into_iter()
        .map(|message| message.id)
        .collect::<HashSet<_>>();
    assert_eq!(ids, HashSet::from([first.id, second.id]));
}

#[test]
fn update_and_delete_report_operation_specific_not_found() {
    let api = MessageApi::open_in_memory().unwrap();

    let update_err = api
        .update_message("missing", MessagePayload::default())
        .unwrap_err();
    assert_eq!(
        update_err,
        ApiError::NotFound("couldn't update a message with id=missing. message not found".into())
    );

    let delete_err = api.delete_message("missing").unwrap_err();
    assert_eq!(
        delete_err,
        ApiError::NotFound("couldn't delete a message with id=missing. message not found".into())
    );
}

#[test]
fn delete_returns_last_value_and_removes_it() {
    let api = MessageApi::open_in_memory().unwrap();
    let created = api
        .add_message(MessagePayload::new("bye", "b", "u"))
        .unwrap();

    let removed = api.delete_message(&created.id).unwrap();
    assert_eq!(removed, created);

    assert!(matches!(
        api.get_message(&created.id),
        Err(ApiError::NotFound(message)) if message.contains(&created.id)
    ));
    assert!(api.get_messages().unwrap().is_empty());
}

#[test]
fn store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api.sqlite3");

    let created = {
        let api = MessageApi::open(&path).unwrap();
        api.add_message(MessagePayload::new("kept", "b", "u"))
            .unwrap()
    };

    let reopened = MessageApi::open(&path).unwrap();
    assert_eq!(reopened.get_message(&created.id).unwrap(), created);
}

#[test]
fn opening_unusable_path_reports_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("store.sqlite3");

    let err = MessageApi::open(&path).err().expect("open should fail");
    assert!(matches!(err, ApiError::Storage(_)));
}

#[test]
fn response_envelope_serializes_ok_and_err_tags() {
    let api = MessageApi::open_in_memory().unwrap();
    let created = api
        .add_message(MessagePayload::new("t", "b", "u"))
        .unwrap();

    let ok: ApiResponse<Message> = api.get_message(&created.id).into();
    let json = serde_json::to_value(&ok).unwrap();
    assert_eq!(json["Ok"]["id"], created.id.as_str());
    assert_eq!(json["Ok"]["attachmentURL"], "u");
    assert!(json["Ok"]["updatedAt"].is_null());

    let err: ApiResponse<Message> = api.get_message("nope").into();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["Err"]["NotFound"], "the message with id=nope not found");
}
