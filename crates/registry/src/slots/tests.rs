use proptest::prelude::*;

use super::SlotTable;
use crate::SlotRef;

crate::define_ref! {
	struct TestRef; capacity = 4;
}

#[test]
fn new_table_is_empty() {
	let table: SlotTable<&str, TestRef> = SlotTable::new();
	assert_eq!(table.capacity(), 4);
	assert!(table.is_empty());
	assert!(TestRef::all().all(|r| !table.occupied(r)));
	assert_eq!(table.first_free(), Some(TestRef::from_raw(0)));
}

#[test]
fn set_overwrites_without_double_counting() {
	let mut table: SlotTable<&str, TestRef> = SlotTable::new();
	let r = TestRef::from_raw(2);

	assert_eq!(table.set(r, "old").map(|v| *v), Ok("old"));
	assert_eq!(table.set(r, "new").map(|v| *v), Ok("new"));

	assert_eq!(table.len(), 1);
	assert_eq!(table.get(r), Some(&"new"));
}

#[test]
fn invalid_reference_never_touches_storage() {
	let mut table: SlotTable<&str, TestRef> = SlotTable::new();

	assert_eq!(table.set(TestRef::INVALID, "lost"), Err("lost"));
	assert_eq!(table.get(TestRef::INVALID), None);
	assert_eq!(table.clear(TestRef::INVALID), None);
	assert!(!table.occupied(TestRef::INVALID));
	assert!(table.is_empty());
}

#[test]
fn first_free_reports_exhaustion() {
	let mut table: SlotTable<u8, TestRef> = SlotTable::new();
	for r in TestRef::all() {
		table.set(r, r.raw() as u8).expect("valid reference");
	}
	assert_eq!(table.first_free(), None);

	table.clear(TestRef::from_raw(1));
	assert_eq!(table.first_free(), Some(TestRef::from_raw(1)));
}

#[test]
fn clear_all_drops_everything() {
	let mut table: SlotTable<String, TestRef> = SlotTable::new();
	table.set(TestRef::from_raw(0), "a".into()).expect("valid reference");
	table.set(TestRef::from_raw(3), "d".into()).expect("valid reference");

	table.clear_all();

	assert!(table.is_empty());
	assert_eq!(table.iter().count(), 0);
}

#[test]
fn iter_yields_ascending_references() {
	let mut table: SlotTable<char, TestRef> = SlotTable::new();
	table.set(TestRef::from_raw(3), 'd').expect("valid reference");
	table.set(TestRef::from_raw(1), 'b').expect("valid reference");

	let seen: Vec<_> = table.iter().map(|(r, v)| (r.raw(), *v)).collect();
	assert_eq!(seen, vec![(1, 'b'), (3, 'd')]);
}

#[derive(Debug, Clone)]
enum Op {
	Set(u32, u8),
	Clear(u32),
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		(0u32..6, any::<u8>()).prop_map(|(r, v)| Op::Set(r, v)),
		(0u32..6).prop_map(Op::Clear),
	]
}

proptest! {
	#[test]
	fn occupancy_matches_model(ops in prop::collection::vec(op(), 0..64)) {
		let mut table: SlotTable<u8, TestRef> = SlotTable::new();
		let mut model: [Option<u8>; 4] = [None; 4];

		for op in ops {
			match op {
				Op::Set(raw, v) => {
					let stored = table.set(TestRef::from_raw(raw), v).is_ok();
					prop_assert_eq!(stored, (raw as usize) < 4);
					if let Some(slot) = model.get_mut(raw as usize) {
						*slot = Some(v);
					}
				}
				Op::Clear(raw) => {
					let taken = table.clear(TestRef::from_raw(raw));
					let expected = model.get_mut(raw as usize).and_then(Option::take);
					prop_assert_eq!(taken, expected);
				}
			}
		}

		for r in TestRef::all() {
			prop_assert_eq!(table.get(r).copied(), model[r.raw() as usize]);
		}
		prop_assert_eq!(table.len(), model.iter().filter(|s| s.is_some()).count());
		prop_assert_eq!(
			table.first_free().map(SlotRef::raw),
			model.iter().position(Option::is_none).map(|i| i as u32)
		);
	}
}
