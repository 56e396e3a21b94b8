//! Property tests comparing the containers against std reference models.

use crate::hash::hash_int;
use crate::{Bitmap, HashTable, List};
use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone)]
enum ListOp {
    PushFront(i32),
    PushBack(i32),
    PopFront,
    PopBack,
    Insert(usize, i32),
    Remove(usize),
    Reverse,
}

fn list_ops() -> impl Strategy<Value = Vec<ListOp>> {
    prop::collection::vec(
        prop_oneof![
            any::<i32>().prop_map(ListOp::PushFront),
            any::<i32>().prop_map(ListOp::PushBack),
            Just(ListOp::PopFront),
            Just(ListOp::PopBack),
            (0..40usize, any::<i32>()).prop_map(|(i, v)| ListOp::Insert(i, v)),
            (0..40usize).prop_map(ListOp::Remove),
            Just(ListOp::Reverse),
        ],
        0..200,
    )
}

fn int_table() -> HashTable<i32> {
    HashTable::new(|v: &i32| hash_int(*v), |a: &i32, b: &i32| a == b)
}

proptest! {
    #[test]
    fn prop_list_matches_deque(ops in list_ops()) {
        let mut list = List::new();
        let mut model = VecDeque::new();
        for op in ops {
            match op {
                ListOp::PushFront(v) => {
                    list.push_front(v);
                    model.push_front(v);
                }
                ListOp::PushBack(v) => {
                    list.push_back(v);
                    model.push_back(v);
                }
                ListOp::PopFront => {
                    prop_assert_eq!(list.pop_front().ok(), model.pop_front());
                }
                ListOp::PopBack => {
                    prop_assert_eq!(list.pop_back().ok(), model.pop_back());
                }
                ListOp::Insert(i, v) => {
                    let pos = list.nth(i).unwrap_or_else(|| list.end());
                    list.insert_before(pos, v).unwrap();
                    model.insert(i.min(model.len()), v);
                }
                ListOp::Remove(i) => match list.nth(i) {
                    Some(id) => {
                        let (v, _) = list.remove(id).unwrap();
                        prop_assert_eq!(Some(v), model.remove(i));
                    }
                    None => {
                        prop_assert!(i >= model.len());
                    }
                },
                ListOp::Reverse => {
                    list.reverse();
                    model.make_contiguous().reverse();
                }
            }
            prop_assert_eq!(list.size(), model.len());
        }
        let forward: Vec<i32> = list.iter().copied().collect();
        let backward: Vec<i32> = list.iter().rev().copied().collect();
        prop_assert_eq!(&forward, &model.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(backward, model.iter().rev().copied().collect::<Vec<_>>());
    }

    #[test]
    fn prop_splice_moves_range(
        dst in prop::collection::vec(any::<i32>(), 0..20),
        src in prop::collection::vec(any::<i32>(), 0..20),
        pos in 0..21usize,
        a in 0..21usize,
        b in 0..21usize,
    ) {
        let pos = pos.min(dst.len());
        let (first, last) = (a.min(b).min(src.len()), a.max(b).min(src.len()));

        let mut dst_list: List<i32> = dst.iter().copied().collect();
        let mut src_list: List<i32> = src.iter().copied().collect();
        let before = dst_list.nth(pos).unwrap_or_else(|| dst_list.end());
        let f = src_list.nth(first).unwrap_or_else(|| src_list.end());
        let l = src_list.nth(last).unwrap_or_else(|| src_list.end());
        let moved = dst_list.splice_from(before, &mut src_list, f, l).unwrap();
        prop_assert_eq!(moved.len(), last - first);

        let mut expect_dst = dst.clone();
        let expect_src: Vec<i32> = src[..first].iter().chain(&src[last..]).copied().collect();
        expect_dst.splice(pos..pos, src[first..last].iter().copied());
        prop_assert_eq!(dst_list.iter().copied().collect::<Vec<_>>(), expect_dst);
        prop_assert_eq!(src_list.iter().copied().collect::<Vec<_>>(), expect_src);
    }

    #[test]
    fn prop_sort_is_stable(keys in prop::collection::vec(0..8i32, 0..100)) {
        let tagged: Vec<(i32, usize)> = keys.iter().copied().zip(0..).collect();
        let mut list: List<(i32, usize)> = tagged.iter().copied().collect();
        list.sort(|a, b| a.0 < b.0);

        let mut expect = tagged.clone();
        expect.sort_by_key(|&(k, _)| k);
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), expect);
    }

    #[test]
    fn prop_insert_ordered_keeps_order(keys in prop::collection::vec(0..8i32, 0..100)) {
        let mut list = List::new();
        for (tag, k) in keys.iter().copied().enumerate() {
            list.insert_ordered((k, tag), |a: &(i32, usize), b: &(i32, usize)| a.0 < b.0);
        }
        let mut expect: Vec<(i32, usize)> = keys.iter().copied().zip(0..).collect();
        expect.sort_by_key(|&(k, _)| k);
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), expect);
    }

    #[test]
    fn prop_hash_matches_set(
        inserts in prop::collection::vec(-50..50i32, 0..300),
        deletes in prop::collection::vec(-50..50i32, 0..100),
    ) {
        let mut table = int_table();
        let mut model = HashSet::new();
        for v in &inserts {
            prop_assert_eq!(table.insert(*v).is_some(), !model.insert(*v));
            prop_assert!(table.size() <= table.bucket_count());
        }
        for v in &deletes {
            prop_assert_eq!(table.delete(v), model.take(v));
        }
        prop_assert_eq!(table.size(), model.len());
        for v in -50..50 {
            prop_assert_eq!(table.find(&v).is_some(), model.contains(&v));
        }
        let mut seen: Vec<i32> = table.iter().copied().collect();
        seen.sort();
        let mut expect: Vec<i32> = model.into_iter().collect();
        expect.sort();
        prop_assert_eq!(seen, expect);
    }

    #[test]
    fn prop_rehash_keeps_elements(values in prop::collection::hash_set(any::<i32>(), 0..500)) {
        let mut table = int_table();
        let initial = table.bucket_count();
        for v in &values {
            table.insert(*v);
        }
        if values.len() > initial {
            prop_assert!(table.bucket_count() > initial);
        }
        for v in &values {
            prop_assert_eq!(table.find(v), Some(v));
        }
        prop_assert_eq!(table.size(), values.len());
    }

    #[test]
    fn prop_bitmap_matches_bools(
        len in 0..300usize,
        ops in prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 0..100),
    ) {
        let mut bmp = Bitmap::create(len).unwrap();
        let mut model = vec![false; len];
        if len > 0 {
            for (idx, value) in ops {
                let i = idx.index(len);
                bmp.set(i, value).unwrap();
                model[i] = value;
            }
        }
        for (i, &bit) in model.iter().enumerate() {
            prop_assert_eq!(bmp.test(i).unwrap(), bit);
        }
        prop_assert_eq!(bmp.count(0, len, true).unwrap(), model.iter().filter(|b| **b).count());
        prop_assert_eq!(bmp.scan(0, len, true).unwrap(), model.iter().position(|b| *b));
        prop_assert!(bmp.test(len).is_err());
    }

    #[test]
    fn prop_expand_keeps_prefix(
        bits in prop::collection::vec(any::<bool>(), 0..200),
        extra in 0..200usize,
    ) {
        let mut bmp = Bitmap::create(bits.len()).unwrap();
        for (i, &b) in bits.iter().enumerate() {
            bmp.set(i, b).unwrap();
        }
        bmp.expand(bits.len() + extra).unwrap();
        prop_assert_eq!(bmp.size(), bits.len() + extra);
        for (i, &b) in bits.iter().enumerate() {
            prop_assert_eq!(bmp.test(i).unwrap(), b);
        }
        prop_assert!(bmp.none(bits.len(), extra).unwrap());
    }
}
