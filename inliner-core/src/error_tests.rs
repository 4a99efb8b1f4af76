use super::*;

#[test]
fn test_unconvertible_display() {
    let err = Error::UnconvertibleValue("{1, 2}".to_string());
    assert_eq!(err.to_string(), "No converter for {1, 2}");
    assert!(err.is_unconvertible());
}

#[test]
fn test_missing_node_display() {
    let err = Error::MissingNode(NodeId::new(7).unwrap());
    assert_eq!(err.to_string(), "Node n7 does not exist in graph");
    assert!(!err.is_unconvertible());
}

#[test]
fn test_other_is_transparent() {
    let err: Error = anyhow::anyhow!("collaborator failed").into();
    assert_eq!(err.to_string(), "collaborator failed");
}
