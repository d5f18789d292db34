use super::*;

#[test]
fn string_ids_reject_empty_values() {
    assert!(NodeId::new("").is_none());
    assert!(ColumnName::new(String::new()).is_none());
    assert_eq!(OwnerLogin::new("sidtech-solutions").unwrap().as_str(), "sidtech-solutions");
}

#[test]
fn string_ids_refuse_to_deserialize_empty_strings() {
    let err = serde_json::from_str::<NodeId>("\"\"").unwrap_err();
    assert!(err.to_string().contains("NodeId must not be empty"));

    let id: NodeId = serde_json::from_str("\"PR_kwDOA1\"").unwrap();
    assert_eq!(id.as_str(), "PR_kwDOA1");
}

#[test]
fn u64_ids_serialize_as_plain_integers() {
    let json = serde_json::to_string(&ColumnId::new(367)).unwrap();
    assert_eq!(json, "367");

    let back: PullRequestId = serde_json::from_str("1296269").unwrap();
    assert_eq!(back.as_u64(), 1_296_269);
}

#[test]
fn invocation_ids_are_unique() {
    assert_ne!(InvocationId::new_random(), InvocationId::new_random());
}
