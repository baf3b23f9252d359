use compound_key_map_test_utils::{
    serde_utils::assert_serialize_roundtrip, test_entry::TestEntry,
};
use test_strategy::proptest;

#[proptest]
fn proptest_serialize_roundtrip(entries: Vec<TestEntry>) {
    assert_serialize_roundtrip(entries);
}

#[test]
fn duplicate_reports_both_values() {
    assert_serialize_roundtrip(vec![
        TestEntry::new(1, -1, "first"),
        TestEntry::new(-1, 1, "other"),
        TestEntry::new(1, -1, "second"),
    ]);
}
