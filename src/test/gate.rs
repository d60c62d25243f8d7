use crate::auth::admits;

#[test]
fn test_gate_admits_only_an_explicit_true_flag() {
    assert!(admits(Some(true)));
    assert!(!admits(Some(false)));
    assert!(!admits(None));
}
