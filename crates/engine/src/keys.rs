//! Synthetic key allocation
//!
//! CSS tables are joined on small integer ids (chanid, inid, wfid, evid,
//! orid, arid) that do not exist in the source graph. Each export run owns
//! one `KeyAllocator`; every sequence starts at its configured base and
//! hands out strictly increasing values. `KeyMap` records the source id →
//! allocated key mapping so dependent tables reuse the key instead of
//! recomputing it.

use crate::config::ConfigError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Key sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// SITECHAN channel id
    Chanid,
    /// INSTRUMENT instrument id
    Inid,
    /// WFDISC waveform id
    Wfid,
    /// EVENT event id
    Evid,
    /// ORIGIN origin id
    Orid,
    /// ARRIVAL arrival id
    Arid,
}

impl KeyKind {
    /// Every key sequence
    pub const ALL: [KeyKind; 6] = [
        KeyKind::Chanid,
        KeyKind::Inid,
        KeyKind::Wfid,
        KeyKind::Evid,
        KeyKind::Orid,
        KeyKind::Arid,
    ];

    /// Column name of the key
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Chanid => "chanid",
            KeyKind::Inid => "inid",
            KeyKind::Wfid => "wfid",
            KeyKind::Evid => "evid",
            KeyKind::Orid => "orid",
            KeyKind::Arid => "arid",
        }
    }

    fn index(&self) -> usize {
        match self {
            KeyKind::Chanid => 0,
            KeyKind::Inid => 1,
            KeyKind::Wfid => 2,
            KeyKind::Evid => 3,
            KeyKind::Orid => 4,
            KeyKind::Arid => 5,
        }
    }
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First value of each key sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBases {
    /// SITECHAN chanid base
    pub chanid: u64,
    /// INSTRUMENT inid base
    pub inid: u64,
    /// WFDISC wfid base
    pub wfid: u64,
    /// EVENT evid base
    pub evid: u64,
    /// ORIGIN orid base
    pub orid: u64,
    /// ARRIVAL arid base
    pub arid: u64,
}

impl Default for KeyBases {
    fn default() -> Self {
        KeyBases {
            chanid: 1000,
            inid: 2000,
            wfid: 3000,
            evid: 4000,
            orid: 5000,
            arid: 6000,
        }
    }
}

impl KeyBases {
    /// Base of one sequence
    pub fn base(&self, kind: KeyKind) -> u64 {
        match kind {
            KeyKind::Chanid => self.chanid,
            KeyKind::Inid => self.inid,
            KeyKind::Wfid => self.wfid,
            KeyKind::Evid => self.evid,
            KeyKind::Orid => self.orid,
            KeyKind::Arid => self.arid,
        }
    }

    /// Keys must be positive; `-1` and `0` are read as absent by legacy tools
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in KeyKind::ALL {
            if self.base(kind) == 0 {
                return Err(ConfigError::Invalid(format!(
                    "keys.{} must be greater than zero",
                    kind
                )));
            }
        }
        Ok(())
    }
}

/// Per-run key counters
#[derive(Debug, Clone)]
pub struct KeyAllocator {
    next: [u64; 6],
}

impl KeyAllocator {
    /// Allocator starting every sequence at its base
    pub fn new(bases: KeyBases) -> Self {
        let mut next = [0; 6];
        for kind in KeyKind::ALL {
            next[kind.index()] = bases.base(kind);
        }
        KeyAllocator { next }
    }

    /// Next key of a sequence
    pub fn allocate(&mut self, kind: KeyKind) -> u64 {
        let slot = &mut self.next[kind.index()];
        let key = *slot;
        *slot += 1;
        key
    }

    /// Key the next `allocate(kind)` will return
    pub fn peek(&self, kind: KeyKind) -> u64 {
        self.next[kind.index()]
    }
}

impl Default for KeyAllocator {
    fn default() -> Self {
        KeyAllocator::new(KeyBases::default())
    }
}

/// Source id → allocated key, for one key sequence
#[derive(Debug, Clone)]
pub struct KeyMap {
    kind: KeyKind,
    keys: HashMap<Uuid, u64>,
}

impl KeyMap {
    /// Empty map for a sequence
    pub fn new(kind: KeyKind) -> Self {
        KeyMap {
            kind,
            keys: HashMap::new(),
        }
    }

    /// Key sequence this map draws from
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Key of `id`, allocating one on first sight
    pub fn assign(&mut self, id: Uuid, alloc: &mut KeyAllocator) -> u64 {
        let kind = self.kind;
        *self.keys.entry(id).or_insert_with(|| alloc.allocate(kind))
    }

    /// Key already assigned to `id`
    pub fn get(&self, id: &Uuid) -> Option<u64> {
        self.keys.get(id).copied()
    }

    /// Number of assigned keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing has been assigned
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Allocator shared between threads running emitters side by side
#[derive(Debug, Clone, Default)]
pub struct SharedKeyAllocator {
    inner: Arc<Mutex<KeyAllocator>>,
}

impl SharedKeyAllocator {
    /// Wrap an allocator
    pub fn new(alloc: KeyAllocator) -> Self {
        SharedKeyAllocator {
            inner: Arc::new(Mutex::new(alloc)),
        }
    }

    /// Next key of a sequence
    pub fn allocate(&self, kind: KeyKind) -> u64 {
        self.inner.lock().allocate(kind)
    }

    /// Run `f` with exclusive access, e.g. to fill a `KeyMap` atomically
    pub fn with<R>(&self, f: impl FnOnce(&mut KeyAllocator) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
