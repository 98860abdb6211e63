use agam_core::{parse_user_id, Session, VaultType};
use proptest::prelude::*;

#[test]
fn vault_type_rejects_case_variants() {
    assert!("Images".parse::<VaultType>().is_err());
    assert!(" images".parse::<VaultType>().is_err());
}

proptest! {
    #[test]
    fn stored_user_id_reads_back(value in any::<i64>()) {
        prop_assert_eq!(parse_user_id(&value.to_string()), Some(value));
    }

    #[test]
    fn non_numeric_user_id_is_absent(raw in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
        prop_assert_eq!(parse_user_id(&raw), None);
    }

    #[test]
    fn authenticated_iff_both_present(token in proptest::option::of("[a-z0-9]{1,16}"), user_id in proptest::option::of(any::<i64>())) {
        let session = Session { token: token.clone(), user_id, bootstrapped: true };
        prop_assert_eq!(session.is_authenticated(), token.is_some() && user_id.is_some());
    }
}
