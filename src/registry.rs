use crate::bitmap::Bitmap;
use crate::hash::HashTable;
use crate::list::List;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Default number of named slots.
pub const SLOT_COUNT: usize = 10;

/// A container held by a registry slot.
pub enum Instance {
    List(List<i32>),
    Hash(HashTable<i32>),
    Bitmap(Bitmap),
}

/// Which container type a slot holds (or should hold).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    List,
    Hash,
    Bitmap,
}

impl Instance {
    pub fn kind(&self) -> Kind {
        match self {
            Instance::List(_) => Kind::List,
            Instance::Hash(_) => Kind::Hash,
            Instance::Bitmap(_) => Kind::Bitmap,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::List => "list",
            Kind::Hash => "hashtable",
            Kind::Bitmap => "bitmap",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("instance name {0:?} contains no slot number")]
    NoIndex(String),

    #[error("slot {index} out of range (0..{slots})")]
    SlotOutOfRange { index: usize, slots: usize },

    #[error("no instance named {0:?}")]
    Empty(String),

    #[error("{name:?} is a {found}, expected a {expected}")]
    WrongKind {
        name: String,
        expected: Kind,
        found: Kind,
    },
}

/// Either one list (both names resolve to the same slot) or two distinct ones.
pub enum ListPair<'a> {
    Same(&'a mut List<i32>),
    Distinct(&'a mut List<i32>, &'a mut List<i32>),
}

/// Named container slots. A slot is selected by the number embedded in an
/// instance name, so `list0`, `l0` and `0` all address slot 0.
pub struct Registry {
    slots: Vec<Option<Instance>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(SLOT_COUNT)
    }
}

fn digits() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("valid digit pattern"))
}

impl Registry {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: (0..slot_count).map(|_| None).collect(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Resolves an instance name to its slot number.
    pub fn slot_index(&self, name: &str) -> Result<usize, RegistryError> {
        let number = digits()
            .find(name)
            .ok_or_else(|| RegistryError::NoIndex(name.to_string()))?;
        // a digit run too long for usize names a slot past any table
        let index = number.as_str().parse::<usize>().unwrap_or(usize::MAX);
        if index >= self.slots.len() {
            return Err(RegistryError::SlotOutOfRange {
                index,
                slots: self.slots.len(),
            });
        }
        Ok(index)
    }

    /// Stores `instance` under `name`, returning whatever the slot held before.
    pub fn create(
        &mut self,
        name: &str,
        instance: Instance,
    ) -> Result<Option<Instance>, RegistryError> {
        let index = self.slot_index(name)?;
        log::debug!("creating {} in slot {index}", instance.kind());
        let previous = self.slots[index].replace(instance);
        if let Some(old) = &previous {
            log::warn!("slot {index} already held a {}; replacing it", old.kind());
        }
        Ok(previous)
    }

    pub fn delete(&mut self, name: &str) -> Result<Option<Instance>, RegistryError> {
        let index = self.slot_index(name)?;
        let removed = self.slots[index].take();
        if let Some(instance) = &removed {
            log::debug!("deleted {} from slot {index}", instance.kind());
        }
        Ok(removed)
    }

    pub fn get(&self, name: &str) -> Result<&Instance, RegistryError> {
        let index = self.slot_index(name)?;
        self.slots[index]
            .as_ref()
            .ok_or_else(|| RegistryError::Empty(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Instance, RegistryError> {
        let index = self.slot_index(name)?;
        self.slots[index]
            .as_mut()
            .ok_or_else(|| RegistryError::Empty(name.to_string()))
    }

    pub fn list_mut(&mut self, name: &str) -> Result<&mut List<i32>, RegistryError> {
        match self.get_mut(name)? {
            Instance::List(list) => Ok(list),
            other => Err(wrong_kind(name, Kind::List, other)),
        }
    }

    pub fn hash_mut(&mut self, name: &str) -> Result<&mut HashTable<i32>, RegistryError> {
        match self.get_mut(name)? {
            Instance::Hash(table) => Ok(table),
            other => Err(wrong_kind(name, Kind::Hash, other)),
        }
    }

    pub fn bitmap_mut(&mut self, name: &str) -> Result<&mut Bitmap, RegistryError> {
        match self.get_mut(name)? {
            Instance::Bitmap(bmp) => Ok(bmp),
            other => Err(wrong_kind(name, Kind::Bitmap, other)),
        }
    }

    /// Mutable access to two lists at once, for splicing and dedup.
    pub fn lists_pair_mut(
        &mut self,
        first: &str,
        second: &str,
    ) -> Result<ListPair<'_>, RegistryError> {
        let a = self.slot_index(first)?;
        let b = self.slot_index(second)?;
        self.list_mut(first)?;
        self.list_mut(second)?;

        if a == b {
            return self.list_mut(first).map(ListPair::Same);
        }
        let (low, high) = self.slots.split_at_mut(a.max(b));
        let (lo_slot, hi_slot) = (&mut low[a.min(b)], &mut high[0]);
        match (lo_slot, hi_slot) {
            (Some(Instance::List(lo)), Some(Instance::List(hi))) => Ok(if a < b {
                ListPair::Distinct(lo, hi)
            } else {
                ListPair::Distinct(hi, lo)
            }),
            _ => Err(RegistryError::Empty(first.to_string())),
        }
    }
}

fn wrong_kind(name: &str, expected: Kind, found: &Instance) -> RegistryError {
    RegistryError::WrongKind {
        name: name.to_string(),
        expected,
        found: found.kind(),
    }
}
