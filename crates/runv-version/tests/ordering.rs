use proptest::prelude::*;
use runv_version::{VersionName, compare_versions};
use std::cmp::Ordering;

proptest! {
    #[test]
    fn numeric_versions_order_by_value(a in 0u64..100_000, b in 0u64..100_000, minor in 0u64..50) {
        let left = format!("{a}.{minor}");
        let right = format!("{b}.{minor}");
        prop_assert_eq!(compare_versions(&left, &right), a.cmp(&b));
    }

    #[test]
    fn ordering_is_antisymmetric(a in "[0-9a-z.-]{1,12}", b in "[0-9a-z.-]{1,12}") {
        prop_assert_eq!(compare_versions(&a, &b), compare_versions(&b, &a).reverse());
    }

    #[test]
    fn equal_only_when_identical(a in "[0-9a-z.-]{1,12}", b in "[0-9a-z.-]{1,12}") {
        prop_assert_eq!(compare_versions(&a, &b) == Ordering::Equal, a == b);
    }

    #[test]
    fn sorting_is_stable_under_shuffle(mut names in proptest::collection::vec("[0-9]{1,3}(\\.[0-9]{1,3}){0,2}", 1..20)) {
        let mut expected: Vec<VersionName> = names.iter().map(|n| VersionName::new(n.clone()).unwrap()).collect();
        expected.sort();
        names.reverse();
        let mut actual: Vec<VersionName> = names.iter().map(|n| VersionName::new(n.clone()).unwrap()).collect();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }
}
