use bytebag::{Bag, BagError, CursorState};
use proptest::prelude::*;

fn items_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..48), 0..64)
}

fn full_traversal(bag: &mut Bag) -> Vec<Vec<u8>> {
    let mut items = Vec::new();
    let mut item = bag.next(true);
    while let Some(bytes) = item {
        items.push(bytes);
        item = bag.next(false);
    }
    items
}

proptest! {
    #[test]
    fn size_matches_add_count(items in items_strategy()) {
        let mut bag = Bag::new();
        for (i, item) in items.iter().enumerate() {
            bag.add(item);
            prop_assert_eq!(bag.len(), i + 1);
            prop_assert_eq!(bag.is_empty(), bag.len() == 0);
        }
        prop_assert_eq!(bag.len(), items.len());
        prop_assert_eq!(bag.is_empty(), items.is_empty());
    }

    #[test]
    fn traversal_yields_inserted_multiset(items in items_strategy()) {
        let mut bag = Bag::new();
        bag.extend(items.iter().map(Vec::as_slice));

        let mut yielded = full_traversal(&mut bag);
        prop_assert_eq!(yielded.len(), items.len(), "one item per add");
        prop_assert_eq!(bag.next(false), None, "absent after the last item");

        let mut expected = items.clone();
        expected.sort();
        yielded.sort();
        prop_assert_eq!(yielded, expected);
    }

    #[test]
    fn traversals_are_reproducible(items in items_strategy(), passes in 1usize..4) {
        let mut bag: Bag = items.iter().map(Vec::as_slice).collect();
        let first = full_traversal(&mut bag);

        for _ in 0..passes {
            let again = full_traversal(&mut bag);
            prop_assert_eq!(&again, &first);
        }
        let borrowed: Vec<Vec<u8>> = bag.iter().map(<[u8]>::to_vec).collect();
        prop_assert_eq!(borrowed, first);
    }

    #[test]
    fn mutating_inputs_and_outputs_leaves_bag_intact(items in items_strategy()) {
        let mut inputs = items.clone();
        let mut bag = Bag::new();
        for input in &inputs {
            bag.add(input);
        }
        for input in &mut inputs {
            input.iter_mut().for_each(|b| *b = b.wrapping_add(1));
        }

        let mut outputs = full_traversal(&mut bag);
        for output in &mut outputs {
            output.reverse();
            output.push(0);
        }

        let mut again = full_traversal(&mut bag);
        let mut expected = items;
        expected.sort();
        again.sort();
        prop_assert_eq!(again, expected);
    }

    #[test]
    fn checked_traversal_agrees_with_plain(items in items_strategy()) {
        let mut bag: Bag = items.iter().map(Vec::as_slice).collect();
        let plain = full_traversal(&mut bag);

        let mut checked = Vec::new();
        let mut item = bag.try_next(true).map_err(|e| TestCaseError::fail(e.to_string()))?;
        while let Some(bytes) = item {
            checked.push(bytes);
            item = bag.try_next(false).map_err(|e| TestCaseError::fail(e.to_string()))?;
        }
        prop_assert_eq!(checked, plain);

        let state = bag.cursor_state();
        if items.is_empty() {
            prop_assert_eq!(state, CursorState::Uninitialized);
        } else {
            prop_assert_eq!(state, CursorState::Exhausted);
        }
    }

    #[test]
    fn any_add_after_reset_is_reported(items in items_strategy(), extra in proptest::collection::vec(any::<u8>(), 0..8)) {
        let mut bag: Bag = items.iter().map(Vec::as_slice).collect();

        prop_assert!(bag.try_next(true).is_ok());
        bag.add(&extra);
        let is_modification = matches!(
            bag.try_next(false),
            Err(BagError::ConcurrentModification { .. })
        );
        prop_assert!(is_modification);
    }

    #[test]
    fn destroy_releases_all_items(items in items_strategy()) {
        let bytes: usize = items.iter().map(Vec::len).sum();
        let bag: Bag = items.iter().map(Vec::as_slice).collect();

        let released = bag.destroy();
        prop_assert_eq!(released.nodes, items.len());
        prop_assert_eq!(released.bytes, bytes);
    }
}
