//! Most-recent AI interaction per molecule.
//!
//! The AI gateway writes here after every successful molecule-scoped ask;
//! the report endpoints read the latest entry back for the "Recent AI
//! Interaction" section.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use lru::LruCache;
use serde::{Deserialize, Serialize};

/// Default number of molecules remembered before the least recently used
/// entry is evicted.
pub const DEFAULT_STORE_CAPACITY: usize = 256;

/// Sentinel the front-end sends as `current_molecule` when nothing is selected.
const NO_MOLECULE: &str = "None";

// ── Key ───────────────────────────────────────────────────────────────────────

/// Canonical molecule key: `"<name> (<formula>)"`, or just `"<name>"` when
/// the formula is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoleculeKey(String);

impl MoleculeKey {
    /// Build the key from the report-side name/formula pair.
    pub fn new(name: &str, formula: &str) -> Self {
        let name = name.trim();
        let formula = formula.trim();
        if formula.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{} ({})", name, formula))
        }
    }

    /// Build the key from the `current_molecule` field of an ask request,
    /// which the front-end formats as `"<name> (<formula>)"`. The pair is
    /// split and rebuilt through [`MoleculeKey::new`] so stray spacing or an
    /// empty `()` still lands on the report-side key.
    /// Returns `None` when no molecule is selected.
    pub fn from_current(current_molecule: &str) -> Option<Self> {
        let trimmed = current_molecule.trim();
        if trimmed.is_empty() || trimmed == NO_MOLECULE {
            return None;
        }
        let (name, formula) = trimmed
            .strip_suffix(')')
            .and_then(|rest| rest.rsplit_once('('))
            .filter(|(name, _)| !name.trim().is_empty())
            .unwrap_or((trimmed, ""));
        Some(Self::new(name, formula))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MoleculeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Interaction ───────────────────────────────────────────────────────────────

/// One recorded question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub molecule_key: MoleculeKey,
    pub question: String,
    pub answer: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

impl Interaction {
    /// Stamp a new interaction with the current time.
    pub fn now(molecule_key: MoleculeKey, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            molecule_key,
            question: question.into(),
            answer: answer.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Bounded, thread-safe map from molecule key to its latest interaction.
/// Writes overwrite; once full, the least recently used key is evicted.
pub struct InteractionStore {
    inner: Mutex<LruCache<MoleculeKey, Interaction>>,
}

impl InteractionStore {
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { inner: Mutex::new(LruCache::new(cap)) }
    }

    /// Unconditional overwrite.
    pub fn put(&self, key: MoleculeKey, interaction: Interaction) {
        let evicted = self.lock().push(key.clone(), interaction);
        if let Some((old_key, _)) = evicted {
            if old_key != key {
                tracing::debug!(evicted = %old_key, "interaction store full, evicted oldest entry");
            }
        }
    }

    pub fn get(&self, key: &MoleculeKey) -> Option<Interaction> {
        self.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    // A poisoned lock only means another request panicked mid-insert; the
    // cache itself is still a valid map.
    fn lock(&self) -> MutexGuard<'_, LruCache<MoleculeKey, Interaction>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InteractionStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_CAPACITY)
    }
}
