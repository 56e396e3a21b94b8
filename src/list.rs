//! Doubly-linked list whose nodes live in an arena owned by the list.
//!
//! Every list carries two sentinel nodes, a head and a tail, so that each real
//! element always has a defined predecessor and successor. Elements are
//! addressed through [`ElemId`] handles instead of pointers; a handle stays
//! valid until its element is removed from the list.
//!
//! ```
//! use container_shell::List;
//!
//! let mut list = List::new();
//! list.push_back(3);
//! list.push_back(1);
//! list.push_back(2);
//! list.sort(|a, b| a < b);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! ```

use crate::error::{ContainerError, Result};
use rand::Rng;

/// Handle to an element linked into a [`List`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElemId(usize);

const HEAD: ElemId = ElemId(0);
const TAIL: ElemId = ElemId(1);

#[derive(Debug)]
struct Node<T> {
    prev: ElemId,
    next: ElemId,
    /// `None` for the sentinels and for vacant slots.
    value: Option<T>,
}

impl<T> Node<T> {
    fn sentinel(prev: ElemId, next: ElemId) -> Self {
        Self {
            prev,
            next,
            value: None,
        }
    }
}

/// Ordered sequence of `T` threaded through arena nodes.
#[derive(Debug)]
pub struct List<T> {
    nodes: Vec<Node<T>>,
    vacant: Vec<usize>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> List<T> {
    /// Creates an empty list: just the two sentinels pointing at each other.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel(HEAD, TAIL), Node::sentinel(HEAD, TAIL)],
            vacant: Vec::new(),
        }
    }

    /// Handle of the first element, or [`end`](Self::end) when empty.
    pub fn begin(&self) -> ElemId {
        self.nodes[HEAD.0].next
    }

    /// The tail sentinel. Valid as an insertion position, never carries a value.
    pub fn end(&self) -> ElemId {
        TAIL
    }

    /// Successor of a linked element (possibly `end()`).
    pub fn next(&self, id: ElemId) -> Option<ElemId> {
        self.is_linked(id).then(|| self.nodes[id.0].next)
    }

    /// Predecessor of a linked element or of `end()`; `None` at the front.
    pub fn prev(&self, id: ElemId) -> Option<ElemId> {
        if id != TAIL && !self.is_linked(id) {
            return None;
        }
        let prev = self.nodes[id.0].prev;
        (prev != HEAD).then_some(prev)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[HEAD.0].next == TAIL
    }

    /// Number of elements. Derived by walking the links, so O(n).
    pub fn size(&self) -> usize {
        self.ids().count()
    }

    pub fn get(&self, id: ElemId) -> Option<&T> {
        if id.0 < 2 {
            return None;
        }
        self.nodes.get(id.0).and_then(|n| n.value.as_ref())
    }

    pub fn get_mut(&mut self, id: ElemId) -> Option<&mut T> {
        if id.0 < 2 {
            return None;
        }
        self.nodes.get_mut(id.0).and_then(|n| n.value.as_mut())
    }

    pub fn push_front(&mut self, elem: T) -> ElemId {
        let id = self.alloc(elem);
        self.link_before(self.begin(), id);
        id
    }

    pub fn push_back(&mut self, elem: T) -> ElemId {
        let id = self.alloc(elem);
        self.link_before(TAIL, id);
        id
    }

    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(ContainerError::EmptyCollection);
        }
        self.remove(self.begin()).map(|(elem, _)| elem)
    }

    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(ContainerError::EmptyCollection);
        }
        let last = self.nodes[TAIL.0].prev;
        self.remove(last).map(|(elem, _)| elem)
    }

    pub fn front(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(ContainerError::EmptyCollection);
        }
        Ok(self.payload(self.begin()))
    }

    pub fn back(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(ContainerError::EmptyCollection);
        }
        Ok(self.payload(self.nodes[TAIL.0].prev))
    }

    /// Links `elem` immediately before `position`, which is either a linked
    /// element or `end()`.
    pub fn insert_before(&mut self, position: ElemId, elem: T) -> Result<ElemId> {
        if !self.is_position(position) {
            return Err(ContainerError::StaleHandle);
        }
        let id = self.alloc(elem);
        self.link_before(position, id);
        Ok(id)
    }

    /// Inserts `elem` before the first element that is strictly greater than
    /// it, so elements with equal keys keep their insertion order.
    pub fn insert_ordered<F>(&mut self, elem: T, mut less: F) -> ElemId
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut pos = self.begin();
        while pos != TAIL && !less(&elem, self.payload(pos)) {
            pos = self.nodes[pos.0].next;
        }
        let id = self.alloc(elem);
        self.link_before(pos, id);
        id
    }

    /// Unlinks `id` and returns its value together with the handle of the
    /// element that followed it.
    pub fn remove(&mut self, id: ElemId) -> Result<(T, ElemId)> {
        if !self.is_linked(id) {
            return Err(ContainerError::StaleHandle);
        }
        let next = self.unlink(id);
        Ok((self.release(id), next))
    }

    /// Handle of the element at `index`, counting from zero.
    pub fn nth(&self, index: usize) -> Option<ElemId> {
        self.ids().nth(index)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD.0] = Node::sentinel(HEAD, TAIL);
        self.nodes[TAIL.0] = Node::sentinel(HEAD, TAIL);
        self.vacant.clear();
    }

    pub fn reverse(&mut self) {
        if self.is_empty() {
            return;
        }
        let first = self.begin();
        let last = self.nodes[TAIL.0].prev;
        let mut cur = first;
        while cur != TAIL {
            let node = &mut self.nodes[cur.0];
            let next = node.next;
            std::mem::swap(&mut node.prev, &mut node.next);
            cur = next;
        }
        self.nodes[HEAD.0].next = last;
        self.nodes[TAIL.0].prev = first;
        self.nodes[first.0].next = TAIL;
        self.nodes[last.0].prev = HEAD;
    }

    /// Fisher-Yates shuffle of the element order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<ElemId> = self.ids().collect();
        for j in (1..order.len()).rev() {
            let k = rng.gen_range(0..=j);
            order.swap(j, k);
        }
        self.nodes[HEAD.0].next = TAIL;
        self.nodes[TAIL.0].prev = HEAD;
        for id in order {
            self.link_before(TAIL, id);
        }
    }

    /// Stable natural merge sort. Only links move; values stay in their nodes,
    /// so outstanding handles keep pointing at the same values.
    pub fn sort<F>(&mut self, mut less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        loop {
            let mut runs = 0;
            let mut a0 = self.begin();
            while a0 != TAIL {
                runs += 1;
                let a1b0 = self.end_of_run(a0, &mut less);
                if a1b0 == TAIL {
                    break;
                }
                let b1 = self.end_of_run(a1b0, &mut less);
                self.merge_runs(a0, a1b0, b1, &mut less);
                a0 = b1;
            }
            if runs <= 1 {
                break;
            }
        }
    }

    /// First element past the non-decreasing run that starts at `start`.
    fn end_of_run<F>(&self, start: ElemId, less: &mut F) -> ElemId
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut cur = start;
        loop {
            let next = self.nodes[cur.0].next;
            if next == TAIL || less(self.payload(next), self.payload(cur)) {
                return next;
            }
            cur = next;
        }
    }

    /// Merges `[a0, a1b0)` with `[a1b0, b1)`, taking from the left run on ties.
    fn merge_runs<F>(&mut self, mut a0: ElemId, mut a1b0: ElemId, b1: ElemId, less: &mut F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        while a0 != a1b0 && a1b0 != b1 {
            if !less(self.payload(a1b0), self.payload(a0)) {
                a0 = self.nodes[a0.0].next;
            } else {
                let moved = a1b0;
                a1b0 = self.nodes[a1b0.0].next;
                self.splice_links(a0, moved, a1b0);
            }
        }
    }

    /// Last maximal element: ties resolve towards the back.
    pub fn max<F>(&self, mut less: F) -> Option<ElemId>
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.ids().reduce(|best, e| {
            if less(self.payload(e), self.payload(best)) {
                best
            } else {
                e
            }
        })
    }

    /// First minimal element: ties resolve towards the front.
    pub fn min<F>(&self, mut less: F) -> Option<ElemId>
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.ids().reduce(|best, e| {
            if less(self.payload(e), self.payload(best)) {
                e
            } else {
                best
            }
        })
    }

    /// Moves `[first, last)` of this list to just before `before`.
    pub fn splice(&mut self, before: ElemId, first: ElemId, last: ElemId) -> Result<()> {
        if !self.is_position(before) || !self.is_position(first) || !self.is_position(last) {
            return Err(ContainerError::StaleHandle);
        }
        let range = self.range_ids(first, last)?;
        if range.contains(&before) {
            return Err(ContainerError::InvalidRange);
        }
        self.splice_links(before, first, last);
        Ok(())
    }

    /// Moves `[first, last)` out of `src` to just before `before` in this list.
    ///
    /// The moved values get new handles in this list; they are returned in
    /// order. Handles into `src` for the moved range become stale.
    pub fn splice_from(
        &mut self,
        before: ElemId,
        src: &mut List<T>,
        first: ElemId,
        last: ElemId,
    ) -> Result<Vec<ElemId>> {
        if !self.is_position(before) || !src.is_position(first) || !src.is_position(last) {
            return Err(ContainerError::StaleHandle);
        }
        let range = src.range_ids(first, last)?;
        let mut moved = Vec::with_capacity(range.len());
        for id in range {
            let (elem, _) = src.remove(id)?;
            let new_id = self.alloc(elem);
            self.link_before(before, new_id);
            moved.push(new_id);
        }
        Ok(moved)
    }

    /// Exchanges the values of two elements without relinking either.
    pub fn swap_values(&mut self, a: ElemId, b: ElemId) -> Result<()> {
        if !self.is_linked(a) || !self.is_linked(b) {
            return Err(ContainerError::StaleHandle);
        }
        if a != b {
            let va = self.nodes[a.0].value.take();
            let vb = self.nodes[b.0].value.take();
            self.nodes[a.0].value = vb;
            self.nodes[b.0].value = va;
        }
        Ok(())
    }

    /// Collapses every run of adjacent equal elements to its first element.
    ///
    /// The removed elements are appended, in order, to `duplicates` when given
    /// and dropped otherwise. Only adjacent runs are considered, so the list
    /// should be sorted first for a global dedup.
    pub fn unique<F>(&mut self, mut duplicates: Option<&mut List<T>>, mut equal: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        if self.is_empty() {
            return;
        }
        let mut kept = self.begin();
        loop {
            let next = self.nodes[kept.0].next;
            if next == TAIL {
                break;
            }
            if equal(self.payload(kept), self.payload(next)) {
                self.unlink(next);
                let elem = self.release(next);
                if let Some(dups) = duplicates.as_deref_mut() {
                    dups.push_back(elem);
                }
            } else {
                kept = next;
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.begin(),
            back: self.nodes[TAIL.0].prev,
            done: self.is_empty(),
        }
    }

    /// Handles of all elements, front to back.
    pub fn ids(&self) -> impl Iterator<Item = ElemId> + '_ {
        std::iter::successors(Some(self.begin()), |id| Some(self.nodes[id.0].next))
            .take_while(|id| *id != TAIL)
    }

    fn is_linked(&self, id: ElemId) -> bool {
        self.get(id).is_some()
    }

    fn is_position(&self, id: ElemId) -> bool {
        id == TAIL || self.is_linked(id)
    }

    /// Handles in `[first, last)`, or `InvalidRange` if `last` does not follow
    /// `first`.
    fn range_ids(&self, first: ElemId, last: ElemId) -> Result<Vec<ElemId>> {
        let mut ids = Vec::new();
        let mut cur = first;
        while cur != last {
            if cur == TAIL {
                return Err(ContainerError::InvalidRange);
            }
            ids.push(cur);
            cur = self.nodes[cur.0].next;
        }
        Ok(ids)
    }

    fn payload(&self, id: ElemId) -> &T {
        self.nodes[id.0]
            .value
            .as_ref()
            .expect("linked node always carries a value")
    }

    fn alloc(&mut self, elem: T) -> ElemId {
        let node = Node {
            prev: HEAD,
            next: TAIL,
            value: Some(elem),
        };
        match self.vacant.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                ElemId(slot)
            }
            None => {
                self.nodes.push(node);
                ElemId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: ElemId) -> T {
        self.vacant.push(id.0);
        self.nodes[id.0]
            .value
            .take()
            .expect("released node always carries a value")
    }

    fn link_before(&mut self, before: ElemId, id: ElemId) {
        let prev = self.nodes[before.0].prev;
        self.nodes[id.0].prev = prev;
        self.nodes[id.0].next = before;
        self.nodes[prev.0].next = id;
        self.nodes[before.0].prev = id;
    }

    /// Returns the successor of the unlinked node.
    fn unlink(&mut self, id: ElemId) -> ElemId {
        let Node { prev, next, .. } = self.nodes[id.0];
        self.nodes[prev.0].next = next;
        self.nodes[next.0].prev = prev;
        next
    }

    /// Relinks the chain `[first, last)` before `before`. Callers guarantee the
    /// range is well formed and `before` lies outside it.
    fn splice_links(&mut self, before: ElemId, first: ElemId, last: ElemId) {
        if first == last {
            return;
        }
        let last_incl = self.nodes[last.0].prev;
        let outer_prev = self.nodes[first.0].prev;
        self.nodes[outer_prev.0].next = last;
        self.nodes[last.0].prev = outer_prev;

        let prev = self.nodes[before.0].prev;
        self.nodes[prev.0].next = first;
        self.nodes[first.0].prev = prev;
        self.nodes[last_incl.0].next = before;
        self.nodes[before.0].prev = last_incl;
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push_back(elem);
        }
    }
}

/// Borrowing iterator over a [`List`], front to back.
pub struct Iter<'a, T> {
    list: &'a List<T>,
    front: ElemId,
    back: ElemId,
    done: bool,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let id = self.front;
        if id == self.back {
            self.done = true;
        } else {
            self.front = self.list.nodes[id.0].next;
        }
        Some(self.list.payload(id))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let id = self.back;
        if id == self.front {
            self.done = true;
        } else {
            self.back = self.list.nodes[id.0].prev;
        }
        Some(self.list.payload(id))
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn values(list: &List<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    fn check_links<T>(list: &List<T>) {
        let mut prev = HEAD;
        let mut cur = list.nodes[HEAD.0].next;
        while cur != TAIL {
            assert_eq!(list.nodes[cur.0].prev, prev, "prev(next(n)) == n");
            prev = cur;
            cur = list.nodes[cur.0].next;
        }
        assert_eq!(list.nodes[TAIL.0].prev, prev);
    }

    #[test]
    fn new_list_is_empty() {
        let list: List<i32> = List::new();
        assert!(list.is_empty());
        assert_eq!(list.size(), 0);
        assert_eq!(list.begin(), list.end());
        assert_eq!(list.front(), Err(ContainerError::EmptyCollection));
        assert_eq!(list.back(), Err(ContainerError::EmptyCollection));
    }

    #[test]
    fn push_and_pop_both_ends() {
        let mut list = List::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_eq!(list.front(), Ok(&1));
        assert_eq!(list.back(), Ok(&3));

        assert_eq!(list.pop_front(), Ok(1));
        assert_eq!(list.pop_back(), Ok(3));
        assert_eq!(list.pop_back(), Ok(2));
        assert_eq!(list.pop_front(), Err(ContainerError::EmptyCollection));
        check_links(&list);
    }

    #[test]
    fn remove_returns_successor() {
        let mut list = List::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        let (value, next) = list.remove(b).unwrap();
        assert_eq!(value, 2);
        assert_eq!(next, c);
        assert_eq!(list.remove(b), Err(ContainerError::StaleHandle));

        let (_, next) = list.remove(c).unwrap();
        assert_eq!(next, list.end());
        assert_eq!(values(&list), vec![1]);
        assert_eq!(list.get(a), Some(&1));
    }

    #[test]
    fn vacant_slots_are_reused() {
        let mut list = List::new();
        let a = list.push_back(1);
        list.remove(a).unwrap();
        let b = list.push_back(2);
        assert_eq!(a, b);
        assert_eq!(list.nodes.len(), 3);
    }

    #[test]
    fn insert_before_end_appends() {
        let mut list: List<i32> = [1, 2].into_iter().collect();
        list.insert_before(list.end(), 3).unwrap();
        let second = list.nth(1).unwrap();
        list.insert_before(second, 9).unwrap();
        assert_eq!(values(&list), vec![1, 9, 2, 3]);
        check_links(&list);
    }

    #[test]
    fn insert_ordered_is_stable() {
        let mut list: List<(i32, char)> = List::new();
        for item in [(2, 'a'), (1, 'b'), (2, 'c'), (0, 'd'), (2, 'e')] {
            list.insert_ordered(item, |x, y| x.0 < y.0);
        }
        let got: Vec<_> = list.iter().copied().collect();
        assert_eq!(got, vec![(0, 'd'), (1, 'b'), (2, 'a'), (2, 'c'), (2, 'e')]);
    }

    #[test]
    fn nth_past_end_is_none() {
        let list: List<i32> = [5, 6].into_iter().collect();
        assert_eq!(list.nth(1).and_then(|id| list.get(id)), Some(&6));
        assert_eq!(list.nth(2), None);
    }

    #[test]
    fn reverse_in_place() {
        let mut list: List<i32> = (1..=5).collect();
        list.reverse();
        assert_eq!(values(&list), vec![5, 4, 3, 2, 1]);
        check_links(&list);

        let mut single: List<i32> = [7].into_iter().collect();
        single.reverse();
        assert_eq!(values(&single), vec![7]);
    }

    #[test]
    fn sort_is_stable_and_keeps_handles() {
        let mut list: List<(i32, usize)> = [(3, 0), (1, 1), (2, 2), (1, 3), (3, 4), (0, 5)]
            .into_iter()
            .collect();
        let handle = list.nth(0).unwrap();
        list.sort(|a, b| a.0 < b.0);
        let got: Vec<_> = list.iter().copied().collect();
        assert_eq!(got, vec![(0, 5), (1, 1), (1, 3), (2, 2), (3, 0), (3, 4)]);
        assert_eq!(list.get(handle), Some(&(3, 0)));
        check_links(&list);
    }

    #[test]
    fn max_takes_last_and_min_takes_first() {
        let list: List<(i32, char)> = [(1, 'a'), (5, 'b'), (1, 'c'), (5, 'd')]
            .into_iter()
            .collect();
        let less = |x: &(i32, char), y: &(i32, char)| x.0 < y.0;
        assert_eq!(list.max(less).and_then(|id| list.get(id)), Some(&(5, 'd')));
        assert_eq!(list.min(less).and_then(|id| list.get(id)), Some(&(1, 'a')));

        let empty: List<(i32, char)> = List::new();
        assert_eq!(empty.max(less), None);
    }

    #[test]
    fn splice_within_list() {
        let mut list: List<i32> = (0..6).collect();
        let first = list.nth(3).unwrap();
        let last = list.nth(5).unwrap();
        list.splice(list.begin(), first, last).unwrap();
        assert_eq!(values(&list), vec![3, 4, 0, 1, 2, 5]);
        check_links(&list);

        let a = list.nth(1).unwrap();
        let b = list.nth(3).unwrap();
        let inside = list.nth(2).unwrap();
        assert_eq!(list.splice(inside, a, b), Err(ContainerError::InvalidRange));
        assert_eq!(list.splice(a, b, a), Err(ContainerError::InvalidRange));
        list.splice(list.end(), a, a).unwrap();
        assert_eq!(values(&list), vec![3, 4, 0, 1, 2, 5]);
    }

    #[test]
    fn splice_from_other_list() {
        let mut dst: List<i32> = [10, 20].into_iter().collect();
        let mut src: List<i32> = (1..=5).collect();
        let first = src.nth(1).unwrap();
        let last = src.end();
        let before = dst.nth(1).unwrap();
        let moved = dst.splice_from(before, &mut src, first, last).unwrap();

        assert_eq!(moved.len(), 4);
        assert_eq!(values(&dst), vec![10, 2, 3, 4, 5, 20]);
        assert_eq!(values(&src), vec![1]);
        assert_eq!(dst.get(moved[0]), Some(&2));
        check_links(&dst);
        check_links(&src);
    }

    #[test]
    fn swap_values_keeps_positions() {
        let mut list: List<i32> = [1, 2, 3].into_iter().collect();
        let a = list.nth(0).unwrap();
        let c = list.nth(2).unwrap();
        list.swap_values(a, c).unwrap();
        assert_eq!(values(&list), vec![3, 2, 1]);
        assert_eq!(list.nth(0), Some(a));
        list.swap_values(a, a).unwrap();
        assert_eq!(values(&list), vec![3, 2, 1]);
    }

    #[test]
    fn unique_moves_duplicates() {
        let mut list: List<i32> = [1, 1, 2, 3, 3, 3, 1].into_iter().collect();
        let mut dups = List::new();
        list.unique(Some(&mut dups), |a, b| a == b);
        assert_eq!(values(&list), vec![1, 2, 3, 1]);
        assert_eq!(values(&dups), vec![1, 3, 3]);

        let mut plain: List<i32> = [4, 4, 4].into_iter().collect();
        plain.unique(None, |a, b| a == b);
        assert_eq!(values(&plain), vec![4]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut list: List<i32> = (0..50).collect();
        let mut rng = StdRng::seed_from_u64(7);
        list.shuffle(&mut rng);
        let mut got = values(&list);
        assert_ne!(got, (0..50).collect::<Vec<_>>());
        got.sort();
        assert_eq!(got, (0..50).collect::<Vec<_>>());
        check_links(&list);
    }

    #[test]
    fn iter_from_both_ends() {
        let list: List<i32> = (1..=4).collect();
        let mut it = list.iter();
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next_back(), Some(&3));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn navigation_and_clear() {
        let mut list: List<i32> = [1, 2].into_iter().collect();
        let a = list.begin();
        let b = list.next(a).unwrap();
        assert_eq!(list.next(b), Some(list.end()));
        assert_eq!(list.prev(b), Some(a));
        assert_eq!(list.prev(a), None);
        assert_eq!(list.prev(list.end()), Some(b));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.get(a), None);
    }
}
