use super::*;

#[test]
fn rejects_short_password() {
    let err = check_password_policy("Ab1").unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::InvalidArgument);
    assert!(err.to_string().contains("length of 8 characters"));
}

#[test]
fn rejects_missing_uppercase() {
    let err = check_password_policy("lowercase1").unwrap_err();
    assert!(err.to_string().contains("uppercase"));
}

#[test]
fn rejects_missing_digit() {
    let err = check_password_policy("NoDigitsHere").unwrap_err();
    assert!(err.to_string().contains("digit"));
}

#[test]
fn accepts_compliant_password() {
    assert!(check_password_policy("f0cKt3Rf$").is_ok());
}

#[test]
fn hash_then_verify_round_trips() {
    let hash = hash_password("f0cKt3Rf$", 4).expect("hashing succeeds");
    assert!(verify_password("f0cKt3Rf$", &hash).expect("verify succeeds"));
    assert!(!verify_password("wrong", &hash).expect("verify succeeds"));
}

#[test]
fn empty_password_rejected_for_too_short() {
    let err = check_password_policy("").unwrap_err();
    assert!(err.to_string().contains("length of 8 characters"));
}
