//! Property-based tests for the audit log.
//!
//! Invariants tested:
//! - per-user pages only ever contain that user's entries
//! - `total` equals the number of entries the user actually owns
//! - ids handed out are gap-free
//! - every entry links to the hash of the one before it

use crate::common::{create_funded_user, create_test_record, setup_test_env};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_user_pages_are_filtered(
        owners in prop::collection::vec(0usize..3, 1..20),
        start in 0u32..25,
        limit in 0u32..25,
    ) {
        let ctx = setup_test_env();
        let users = [
            create_funded_user(&ctx),
            create_funded_user(&ctx),
            create_funded_user(&ctx),
        ];

        for (n, who) in owners.iter().enumerate() {
            create_test_record(&ctx, &users[*who], n as u64, "h", "other", 0);
        }
        prop_assert_eq!(ctx.client.audit_count(), owners.len() as u64);

        for (idx, user) in users.iter().enumerate() {
            let expected_total = owners.iter().filter(|o| **o == idx).count() as u32;
            let page = ctx.client.get_audit_for_user(user, &start, &limit);

            prop_assert_eq!(page.total, expected_total);
            let expected_len = expected_total.saturating_sub(start).min(limit);
            prop_assert_eq!(page.entries.len(), expected_len);
            for entry in page.entries.iter() {
                prop_assert_eq!(&entry.user, user);
            }
        }

        for id in 0..owners.len() as u64 {
            prop_assert_eq!(ctx.client.get_audit_entry(&id).unwrap().id, id);
        }
        prop_assert!(ctx.client.verify_audit_chain(&0, &(owners.len() as u32)));
    }
}
