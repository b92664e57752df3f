use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

type Model = BTreeMap<Vec<u8>, usize>;

fn validate_set(set: &RadixSet) {
    let issues = set.verify_integrity();
    assert!(issues.is_empty(), "integrity issues: {issues:?}");
}

/// Every stored string with its multiplicity, via a structural walk.
fn contents(set: &RadixSet) -> Model {
    fn walk(node: &Node, path: &mut Vec<u8>, out: &mut Model) {
        if node.is_terminal() {
            out.insert(path.clone(), node.count());
        }
        for (label, child) in node.edges() {
            path.extend_from_slice(label);
            walk(child, path, out);
            path.truncate(path.len() - label.len());
        }
    }

    let mut out = Model::new();
    walk(set.root(), &mut Vec::new(), &mut out);
    out
}

fn model_remove(m: &mut Model, key: &[u8]) -> bool {
    match m.get_mut(key) {
        Some(n) => {
            *n -= 1;
            if *n == 0 {
                m.remove(key);
            }
            true
        }
        None => false,
    }
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A tiny alphabet so keys collide, share prefixes and force splits.
    prop::collection::vec(prop::sample::select(b"abc".to_vec()), 0..=6)
}

fn search_strategy() -> impl Strategy<Value = SearchStrategy> {
    prop_oneof![
        Just(SearchStrategy::Scan),
        Just(SearchStrategy::Probe),
        Just(SearchStrategy::Adaptive),
    ]
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 5)]
    Insert(#[proptest(strategy = "key_strategy()")] Vec<u8>),
    #[proptest(weight = 3)]
    Remove(#[proptest(strategy = "key_strategy()")] Vec<u8>),
    #[proptest(weight = 2)]
    Contains(
        #[proptest(strategy = "key_strategy()")] Vec<u8>,
        #[proptest(strategy = "0usize..4")] usize,
    ),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(any::<Op>(), 0..=400)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(search in search_strategy(), ops in ops_strategy()) {
        let mut set = RadixSet::with_config(Config::default().with_search(search));
        let mut m = Model::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let node_count = set.insert(&key).count();
                    let n = m.entry(key).or_default();
                    *n += 1;
                    prop_assert_eq!(node_count, *n);
                }
                Op::Remove(key) => {
                    let before = set.clone();
                    let removed = set.remove(&key);
                    prop_assert_eq!(removed.is_removed(), model_remove(&mut m, &key));
                    if !removed.is_removed() {
                        prop_assert_eq!(&set, &before);
                    }
                }
                Op::Contains(key, n) => {
                    let expected = m.get(&key).copied().unwrap_or(0);
                    prop_assert_eq!(set.multiplicity(&key), expected);
                    prop_assert_eq!(set.contains(&key), expected >= 1);
                    prop_assert_eq!(set.contains_at_least(&key, n), expected >= n);
                }
            }

            prop_assert_eq!(set.len(), m.values().sum::<usize>());
        }

        validate_set(&set);
        prop_assert_eq!(contents(&set), m);
    }

    #[test]
    fn prop_strategies_agree(ops in ops_strategy()) {
        let mut scan = RadixSet::with_config(Config::default().with_search(SearchStrategy::Scan));
        let mut probe = RadixSet::with_config(Config::default().with_search(SearchStrategy::Probe));
        let mut adaptive = RadixSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let a = scan.insert(&key).count();
                    let b = probe.insert(&key).count();
                    let c = adaptive.insert(&key).count();
                    prop_assert_eq!(a, b);
                    prop_assert_eq!(a, c);
                }
                Op::Remove(key) => {
                    let a = scan.remove(&key);
                    prop_assert_eq!(a, probe.remove(&key));
                    prop_assert_eq!(a, adaptive.remove(&key));
                }
                Op::Contains(key, n) => {
                    let a = scan.contains_at_least(&key, n);
                    prop_assert_eq!(a, probe.contains_at_least(&key, n));
                    prop_assert_eq!(a, adaptive.contains_at_least(&key, n));
                }
            }
        }

        // Same operations, same tree.
        prop_assert_eq!(&scan.root, &probe.root);
        prop_assert_eq!(&scan.root, &adaptive.root);
    }

    #[test]
    fn prop_merge_matches_reinsertion(
        left in prop::collection::vec(key_strategy(), 0..=60),
        right in prop::collection::vec(key_strategy(), 0..=60),
        removals in prop::collection::vec(key_strategy(), 0..=30),
    ) {
        let mut a: RadixSet = left.iter().collect();
        let mut b: RadixSet = right.iter().collect();
        for key in &removals {
            b.remove(key);
        }

        let mut expected = a.clone();
        for (key, n) in contents(&b) {
            for _ in 0..n {
                expected.insert(&key);
            }
        }

        a.merge(b);
        validate_set(&a);
        prop_assert_eq!(a.len(), expected.len());
        prop_assert_eq!(contents(&a), contents(&expected));
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

fn small_keys() -> Vec<Vec<u8>> {
    vec![
        b"".to_vec(),
        b"a".to_vec(),
        b"ab".to_vec(),
        b"abc".to_vec(),
        b"abd".to_vec(),
        b"b".to_vec(),
        b"ba".to_vec(),
    ]
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = small_keys();
    let mut reference: Option<RadixSet> = None;

    for_each_permutation(&keys, |perm| {
        let set: RadixSet = perm.iter().collect();
        validate_set(&set);
        for key in &keys {
            assert!(set.contains(key), "missing {key:?}");
        }
        assert!(!set.contains(b"abcd"));
        assert!(!set.contains(b"c"));

        // The compressed shape does not depend on insertion order.
        let first = reference.get_or_insert_with(|| set.clone());
        assert_eq!(first, &set);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = small_keys();
    let base: RadixSet = keys.iter().collect();

    for_each_permutation(&keys, |perm| {
        let mut set = base.clone();
        let mut m: Model = keys.iter().map(|k| (k.clone(), 1)).collect();

        for k in perm {
            assert_eq!(set.remove(&k).is_removed(), model_remove(&mut m, &k));
            assert_eq!(set.len(), m.len());
            validate_set(&set);
            assert_eq!(contents(&set), m);
        }
        assert!(set.is_empty());
        assert!(set.root().is_empty());
    });
}

#[test]
fn exhaustive_merge_split_points() {
    let keys = small_keys();
    // Every way of dividing the keys between two sets.
    for mask in 0u32..(1u32 << keys.len()) {
        let (left, right): (Vec<_>, Vec<_>) = keys
            .iter()
            .enumerate()
            .partition(|(i, _)| (mask >> *i) & 1 == 1);
        let mut a: RadixSet = left.into_iter().map(|(_, k)| k).collect();
        let b: RadixSet = right.into_iter().map(|(_, k)| k).collect();
        a.merge(b);

        validate_set(&a);
        let expected: Model = keys.iter().map(|k| (k.clone(), 1)).collect();
        assert_eq!(contents(&a), expected, "mask {mask:#b}");
    }
}
