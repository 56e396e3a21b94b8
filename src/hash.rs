//! Open-chaining hash table with [`List`] buckets.
//!
//! The hash and equality callbacks are fixed when the table is created. The
//! bucket count is always a power of two and doubles as soon as the number of
//! elements exceeds it, so chains stay short on average.

use crate::list::List;

const INITIAL_BUCKETS: usize = 4;

const FNV_32_BASIS: u32 = 2_166_136_261;
const FNV_32_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1 hash of `bytes`.
pub fn hash_bytes(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(FNV_32_BASIS, |h, &b| h.wrapping_mul(FNV_32_PRIME) ^ u32::from(b))
}

/// Default hash for integer keys: FNV-1 over the little-endian bytes.
pub fn hash_int(value: i32) -> u32 {
    hash_bytes(&value.to_le_bytes())
}

/// Multiplicative alternative to [`hash_int`].
pub fn hash_int_alt(value: i32) -> u32 {
    let u = value as u32;
    u.wrapping_mul(2_654_435_761) ^ (u >> 16)
}

type HashFn<T> = Box<dyn Fn(&T) -> u32>;
type EqualFn<T> = Box<dyn Fn(&T, &T) -> bool>;

/// Hash table over caller-defined elements.
pub struct HashTable<T> {
    buckets: Vec<List<T>>,
    count: usize,
    hash: HashFn<T>,
    equal: EqualFn<T>,
}

impl<T> HashTable<T> {
    /// Creates an empty table with a small power-of-two bucket array.
    pub fn new<H, E>(hash: H, equal: E) -> Self
    where
        H: Fn(&T) -> u32 + 'static,
        E: Fn(&T, &T) -> bool + 'static,
    {
        Self {
            buckets: empty_buckets(INITIAL_BUCKETS),
            count: 0,
            hash: Box::new(hash),
            equal: Box::new(equal),
        }
    }

    pub fn size(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Inserts `elem` unless an equal element is already present.
    ///
    /// On a clash the new element is dropped and the resident one returned.
    pub fn insert(&mut self, elem: T) -> Option<&T> {
        let bucket = self.bucket_of(&elem);
        if let Some(id) = self.find_in(bucket, &elem) {
            return self.buckets[bucket].get(id);
        }
        self.buckets[bucket].push_back(elem);
        self.count += 1;
        self.grow_if_needed();
        None
    }

    /// Inserts `elem`, displacing and returning an equal element if present.
    pub fn replace(&mut self, elem: T) -> Option<T> {
        let bucket = self.bucket_of(&elem);
        let old = match self.find_in(bucket, &elem) {
            Some(id) => {
                self.count -= 1;
                self.buckets[bucket].remove(id).ok().map(|(old, _)| old)
            }
            None => None,
        };
        self.buckets[bucket].push_back(elem);
        self.count += 1;
        self.grow_if_needed();
        old
    }

    pub fn find(&self, key: &T) -> Option<&T> {
        let bucket = self.bucket_of(key);
        self.find_in(bucket, key)
            .and_then(|id| self.buckets[bucket].get(id))
    }

    /// Mutable access to the element equal to `key`. The caller must not change
    /// the fields the hash is computed from.
    pub fn find_mut(&mut self, key: &T) -> Option<&mut T> {
        let bucket = self.bucket_of(key);
        let id = self.find_in(bucket, key)?;
        self.buckets[bucket].get_mut(id)
    }

    /// Unlinks the element equal to `key` and hands it back.
    pub fn delete(&mut self, key: &T) -> Option<T> {
        let bucket = self.bucket_of(key);
        let id = self.find_in(bucket, key)?;
        let (elem, _) = self.buckets[bucket].remove(id).ok()?;
        self.count -= 1;
        Some(elem)
    }

    /// Removes every element, keeping the bucket array.
    pub fn clear(&mut self) {
        self.clear_with(drop);
    }

    /// Removes every element, passing each one to `destructor`.
    pub fn clear_with<D: FnMut(T)>(&mut self, mut destructor: D) {
        for bucket in &mut self.buckets {
            while let Ok(elem) = bucket.pop_front() {
                destructor(elem);
            }
        }
        self.count = 0;
    }

    /// Consumes the table, passing each element to `destructor`.
    pub fn destroy<D: FnMut(T)>(mut self, destructor: D) {
        self.clear_with(destructor);
    }

    /// Calls `f` once per element: buckets in index order, chains in insertion
    /// order. `f` must not change the key fields of the element.
    pub fn apply<F: FnMut(&mut T)>(&mut self, mut f: F) {
        for bucket in &mut self.buckets {
            let ids: Vec<_> = bucket.ids().collect();
            for id in ids {
                if let Some(elem) = bucket.get_mut(id) {
                    f(elem);
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.iter().flat_map(|bucket| bucket.iter())
    }

    fn bucket_of(&self, elem: &T) -> usize {
        (self.hash)(elem) as usize & (self.buckets.len() - 1)
    }

    fn find_in(&self, bucket: usize, key: &T) -> Option<crate::list::ElemId> {
        let chain = &self.buckets[bucket];
        chain
            .ids()
            .find(|id| chain.get(*id).is_some_and(|elem| (self.equal)(elem, key)))
    }

    fn grow_if_needed(&mut self) {
        if self.count > self.buckets.len() {
            self.rehash(self.buckets.len() * 2);
        }
    }

    /// Moves every element into a fresh bucket array of `bucket_count` chains.
    fn rehash(&mut self, bucket_count: usize) {
        debug_assert!(bucket_count.is_power_of_two());
        log::debug!(
            "rehashing {} elements: {} -> {} buckets",
            self.count,
            self.buckets.len(),
            bucket_count
        );
        let old = std::mem::replace(&mut self.buckets, empty_buckets(bucket_count));
        let mask = bucket_count - 1;
        for mut chain in old {
            while let Ok(elem) = chain.pop_front() {
                let bucket = (self.hash)(&elem) as usize & mask;
                self.buckets[bucket].push_back(elem);
            }
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for HashTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashTable")
            .field("count", &self.count)
            .field("buckets", &self.buckets.len())
            .finish()
    }
}

fn empty_buckets<T>(count: usize) -> Vec<List<T>> {
    (0..count).map(|_| List::new()).collect()
}
