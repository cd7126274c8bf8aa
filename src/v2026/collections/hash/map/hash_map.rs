use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, Hasher};
use std::mem::{self, MaybeUninit};
use std::ops::Index;

use super::metadata::{SlotMetadata, SlotState};
use super::{Iter, IterMut, Keys, Values, ValuesMut};
use crate::v2026::collections::hash::SimpleHashBuilder;
use crate::v2026::error::{KeyMissing, internal_failure};
use crate::v2026::ptr::UniqueArray;
use crate::v2026::sum::Optional;
use crate::v2026::util::extension::ResultExtension;

/// The table size of a new HashMap, as a power of two.
pub const INITIAL_SIZE_LOG2: u32 = 4;

const MAX_LOAD_NUMERATOR: usize = 7;
const MAX_LOAD_DENOMINATOR: usize = 10;

/// A map of keys to values, stored in an open-addressed table with linear probing.
///
/// Each slot has one byte of metadata holding its state (empty, live or tombstone) and six bits of
/// the key's hash, which are compared before the keys themselves. Keys and values live in
/// separate parallel arrays. The table size is always a power of two and the load, counting
/// tombstones, never exceeds 7/10.
///
/// Every HashMap mixes a salt of its own into each hash, so two maps with the same contents will
/// usually iterate in different orders. Nothing should depend on iteration order.
///
/// It is a logic error for keys in a HashMap to be manipulated in a way that changes their hash.
/// Because of this, HashMap's API prevents mutable access to its keys.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the HashMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`*, `O(n)`** |
/// | `lookup` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `clear` | `O(n)` |
///
/// \* Collisions and tombstones lengthen the probe, but the load limit keeps probes short.
///
/// \** When the load limit would be exceeded, `insert` reallocates the table and re-inserts every
/// live entry.
pub struct HashMap<K: Hash + Eq, V, B: BuildHasher = SimpleHashBuilder> {
    pub(crate) metadata: UniqueArray<SlotMetadata>,
    pub(crate) keys: UniqueArray<MaybeUninit<K>>,
    pub(crate) values: UniqueArray<MaybeUninit<V>>,
    pub(crate) len: usize,
    pub(crate) tombstones: usize,
    pub(crate) size_log2: u32,
    pub(crate) salt: usize,
    pub(crate) hasher: B,
}

impl<K: Hash + Eq, V, B: BuildHasher + Default> HashMap<K, V, B> {
    /// Creates an empty HashMap with a table of 16 slots and the default value for `B`.
    pub fn new() -> HashMap<K, V, B> {
        HashMap::with_hasher(B::default())
    }

    /// Creates an empty HashMap whose table can hold `cap` entries without growing.
    pub fn with_cap(cap: usize) -> HashMap<K, V, B> {
        HashMap::with_cap_and_hasher(cap, B::default())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashMap<K, V, B> {
    /// Creates an empty HashMap with a table of 16 slots and the provided `hasher`.
    pub fn with_hasher(hasher: B) -> HashMap<K, V, B> {
        HashMap::with_size_log2(INITIAL_SIZE_LOG2, hasher)
    }

    /// Creates an empty HashMap whose table can hold `cap` entries without growing, using the
    /// provided `hasher`.
    pub fn with_cap_and_hasher(cap: usize, hasher: B) -> HashMap<K, V, B> {
        let mut size_log2 = INITIAL_SIZE_LOG2;
        while !fits_load(cap, 1 << size_log2) {
            size_log2 += 1;
        }
        HashMap::with_size_log2(size_log2, hasher)
    }

    fn with_size_log2(size_log2: u32, hasher: B) -> HashMap<K, V, B> {
        let size = 1_usize << size_log2;
        let metadata = UniqueArray::repeat_default(size);
        // The address of the live metadata block identifies this instance. rebuild keeps it
        // current.
        let salt = metadata.as_ptr() as usize;
        HashMap {
            metadata,
            keys: UniqueArray::<K>::new_uninit(size),
            values: UniqueArray::<V>::new_uninit(size),
            len: 0,
            tombstones: 0,
            size_log2,
            salt,
            hasher,
        }
    }

    /// Returns the number of entries in the HashMap.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the HashMap contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the table, always a power of two.
    pub const fn cap(&self) -> usize {
        1 << self.size_log2
    }

    /// Inserts the provided `key`-`value` pair and returns a reference to the stored value. If the
    /// key was already present its value is overwritten and the key is left unchanged.
    ///
    /// If the new entry would push the load past 7/10, the table is rebuilt first: doubled if the
    /// live entries need the room, otherwise rehashed at the same size to clear tombstones.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::hash::HashMap;
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// *map.insert("a", 1) += 10;
    /// map.insert("a", 5);
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.at("a"), Ok(&5));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> &mut V {
        let hash = self.hash_key(&key);

        if let Some(index) = self.find_index(hash, &key) {
            // SAFETY: find_index only returns live slots.
            let slot = unsafe { self.values[index].assume_init_mut() };
            *slot = value;
            return slot;
        }

        self.make_room_for_one();
        let index = self.insert_new(hash, key, value);
        // SAFETY: insert_new has just written the slot.
        unsafe { self.values[index].assume_init_mut() }
    }

    /// Returns a reference to the value associated with `key`, or Empty if there is none.
    pub fn lookup<Q>(&self, key: &Q) -> Optional<&V>
    where
        // Q is a borrowed form of K, for which hashing and equality carry over the borrow.
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.find_index(self.hash_key(key), key) {
            // SAFETY: find_index only returns live slots.
            Some(index) => Optional::Value(unsafe { self.values[index].assume_init_ref() }),
            None => Optional::Empty,
        }
    }

    /// Returns a mutable reference to the value associated with `key`, or Empty if there is none.
    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Optional<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.find_index(self.hash_key(key), key) {
            // SAFETY: find_index only returns live slots.
            Some(index) => Optional::Value(unsafe { self.values[index].assume_init_mut() }),
            None => Optional::Empty,
        }
    }

    /// Returns the key-value pair stored for `key`, or Empty if there is none.
    pub fn lookup_entry<Q>(&self, key: &Q) -> Optional<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.find_index(self.hash_key(key), key) {
            // SAFETY: find_index only returns live slots.
            Some(index) => Optional::Value(unsafe {
                (self.keys[index].assume_init_ref(), self.values[index].assume_init_ref())
            }),
            None => Optional::Empty,
        }
    }

    /// Returns a reference to the value associated with `key`.
    ///
    /// # Errors
    /// Returns [`KeyMissing`] if the map has no entry for `key`.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, KeyMissing>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup(key).into_option().ok_or(KeyMissing)
    }

    /// Returns a mutable reference to the value associated with `key`.
    ///
    /// # Errors
    /// Returns [`KeyMissing`] if the map has no entry for `key`.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, KeyMissing>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup_mut(key).into_option().ok_or(KeyMissing)
    }

    /// Returns true if the map has an entry for `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_index(self.hash_key(key), key).is_some()
    }

    /// Returns the value for `key`, inserting the default value first if there is none.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::hash::HashMap;
    /// let mut counts: HashMap<char, usize> = HashMap::new();
    /// for c in "abca".chars() {
    ///     *counts.entry_or_default(c) += 1;
    /// }
    /// assert_eq!(counts.at(&'a'), Ok(&2));
    /// ```
    pub fn entry_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let hash = self.hash_key(&key);
        let index = match self.find_index(hash, &key) {
            Some(index) => index,
            None => {
                self.make_room_for_one();
                self.insert_new(hash, key, V::default())
            },
        };
        // SAFETY: The slot is either an existing live one or was just written.
        unsafe { self.values[index].assume_init_mut() }
    }

    /// Removes the entry for `key`, returning the key and value if there was one.
    ///
    /// The vacated slot becomes empty if both of its neighbors are empty, otherwise it becomes a
    /// tombstone so that probes passing through it still reach later entries.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Optional<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(index) = self.find_index(self.hash_key(key), key) else {
            return Optional::Empty;
        };

        let mask = self.cap() - 1;
        let previous = self.metadata[(index + mask) & mask];
        let next = self.metadata[(index + 1) & mask];
        if previous.is_empty() && next.is_empty() {
            self.metadata[index] = SlotMetadata::EMPTY;
        } else {
            self.metadata[index] = SlotMetadata::TOMBSTONE;
            self.tombstones += 1;
        }
        self.len -= 1;

        // SAFETY: The slot was live and has just been marked as not live, so these values are read
        // exactly once.
        unsafe {
            Optional::Value((
                self.keys[index].assume_init_read(),
                self.values[index].assume_init_read(),
            ))
        }
    }

    /// Removes the entry for `key`, returning the value if there was one.
    pub fn remove<Q>(&mut self, key: &Q) -> Optional<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Drops every entry and marks every slot empty. The table keeps its size.
    pub fn clear(&mut self) {
        self.drop_entries();
        self.metadata.fill(SlotMetadata::EMPTY);
        self.len = 0;
        self.tombstones = 0;
    }

    /// Grows the table if needed so that `extra` more entries fit without another rebuild.
    pub fn reserve(&mut self, extra: usize) {
        let required = self.len.checked_add(extra).expect("Capacity overflow!");
        let mut size_log2 = self.size_log2;
        while !fits_load(required + self.tombstones, 1 << size_log2) {
            size_log2 += 1;
        }
        if size_log2 != self.size_log2 {
            self.rebuild(size_log2);
        }
    }

    /// Returns an iterator over all key-value pairs, as references.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all key-value pairs, with mutable references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all keys, as references.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Returns an iterator over all values, as references.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Returns an iterator over all values, as mutable references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.iter_mut())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashMap<K, V, B> {
    pub(crate) fn hash_key<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        let mut state = self.hasher.build_hasher();
        state.write_usize(self.salt);
        key.hash(&mut state);
        state.finish()
    }

    /// Folds the whole hash into a slot index by xor-ing it together `size_log2` bits at a time.
    pub(crate) const fn hash_to_slot(&self, mut hash: u64) -> usize {
        let mask = (1_u64 << self.size_log2) - 1;
        let mut slot = 0;
        while hash != 0 {
            slot ^= hash & mask;
            hash >>= self.size_log2;
        }
        slot as usize
    }

    /// Finds the live slot holding `key`, probing from its ideal slot until an empty slot ends the
    /// chain.
    pub(crate) fn find_index<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mask = self.cap() - 1;
        let mut index = self.hash_to_slot(hash);

        // The load limit guarantees an empty slot, the bound only stops a corrupted table.
        for _ in 0..self.cap() {
            let slot = self.metadata[index];
            match slot.state() {
                SlotState::Empty => return None,
                SlotState::Tombstone => {},
                SlotState::HasValue => {
                    // SAFETY: Live slots hold initialized keys.
                    if slot.bloom_matches(hash)
                        && unsafe { self.keys[index].assume_init_ref() }.borrow() == key
                    {
                        return Some(index);
                    }
                },
            }
            index = (index + 1) & mask;
        }
        None
    }

    /// Writes a key known to be absent into the first free slot of its probe chain and returns
    /// the slot index. The caller must have made room with `make_room_for_one`.
    pub(crate) fn insert_new(&mut self, hash: u64, key: K, value: V) -> usize {
        let mask = self.cap() - 1;
        let mut index = self.hash_to_slot(hash);

        for _ in 0..self.cap() {
            match self.metadata[index].state() {
                SlotState::HasValue => index = (index + 1) & mask,
                state => {
                    if state == SlotState::Tombstone {
                        self.tombstones -= 1;
                    }
                    self.keys[index].write(key);
                    self.values[index].write(value);
                    self.metadata[index] = SlotMetadata::occupied(hash);
                    self.len += 1;
                    return index;
                },
            }
        }
        internal_failure("hash table has no free slot")
    }

    /// Rebuilds the table if one more entry would exceed the load limit.
    pub(crate) fn make_room_for_one(&mut self) {
        if fits_load(self.len + self.tombstones + 1, self.cap()) {
            return;
        }

        if fits_load(self.len + 1, self.cap()) {
            self.rebuild(self.size_log2);
        } else {
            self.rebuild(self.size_log2 + 1);
        }
    }

    /// Moves every live entry into a fresh table of `1 << size_log2` slots, dropping all
    /// tombstones. The salt moves to the new metadata block, since the old one is freed and may
    /// be handed to another map.
    fn rebuild(&mut self, size_log2: u32) {
        tracing::trace!(
            old_size = self.cap(),
            new_size = 1_usize << size_log2,
            len = self.len,
            tombstones = self.tombstones,
            "rebuilding hash table"
        );

        let size = 1_usize << size_log2;
        let old_metadata = mem::replace(&mut self.metadata, UniqueArray::repeat_default(size));
        self.salt = self.metadata.as_ptr() as usize;
        let old_keys = mem::replace(&mut self.keys, UniqueArray::<K>::new_uninit(size));
        let old_values = mem::replace(&mut self.values, UniqueArray::<V>::new_uninit(size));
        self.size_log2 = size_log2;
        self.len = 0;
        self.tombstones = 0;

        for (index, slot) in old_metadata.iter().enumerate() {
            if slot.is_live() {
                // SAFETY: Live slots are initialized, and the old arrays are dropped as
                // MaybeUninit afterwards so each entry is moved out exactly once.
                let (key, value) = unsafe {
                    (old_keys[index].assume_init_read(), old_values[index].assume_init_read())
                };
                let hash = self.hash_key(&key);
                self.insert_new(hash, key, value);
            }
        }
    }

    fn drop_entries(&mut self) {
        for (index, slot) in self.metadata.iter().enumerate() {
            if slot.is_live() {
                // SAFETY: Live slots are initialized. The caller resets the metadata afterwards.
                unsafe {
                    self.keys[index].assume_init_drop();
                    self.values[index].assume_init_drop();
                }
            }
        }
    }
}

const fn fits_load(entries: usize, size: usize) -> bool {
    entries * MAX_LOAD_DENOMINATOR <= size * MAX_LOAD_NUMERATOR
}

impl<K: Hash + Eq, V, B: BuildHasher> Drop for HashMap<K, V, B> {
    fn drop(&mut self) {
        self.drop_entries();
    }
}

impl<K: Hash + Eq, V, B: BuildHasher + Default> Default for HashMap<K, V, B> {
    fn default() -> Self {
        HashMap::new()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, B: BuildHasher + Clone> Clone for HashMap<K, V, B> {
    fn clone(&self) -> Self {
        // The clone has its own salt, so every entry is hashed again rather than copied slot for
        // slot.
        let mut map = HashMap::with_size_log2(self.size_log2, self.hasher.clone());
        for (key, value) in self.iter() {
            let hash = map.hash_key(key);
            map.insert_new(hash, key.clone(), value.clone());
        }
        map
    }
}

impl<K: Hash + Eq, V: PartialEq, B: BuildHasher> PartialEq for HashMap<K, V, B> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.iter().all(|(key, value)| other.lookup(key) == Optional::Value(value))
    }
}

impl<K: Hash + Eq, V: Eq, B: BuildHasher> Eq for HashMap<K, V, B> {}

impl<K: Hash + Eq, V, B: BuildHasher> Extend<(K, V)> for HashMap<K, V, B> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq, V, B: BuildHasher + Default> FromIterator<(K, V)> for HashMap<K, V, B> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = HashMap::with_cap(iter.size_hint().0);
        map.extend(iter);
        map
    }
}

impl<K, Q, V, B> Index<&Q> for HashMap<K, V, B>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    B: BuildHasher,
{
    type Output = V;

    /// # Panics
    /// Panics if the map has no entry for `key`.
    #[track_caller]
    fn index(&self, key: &Q) -> &Self::Output {
        self.at(key).throw()
    }
}

impl<K: Hash + Eq + Debug, V: Debug, B: BuildHasher> Debug for HashMap<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq + Display, V: Display, B: BuildHasher> Display for HashMap<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
