//! Faster maps and sets for hot lookup paths, keyed with `ahash`.

use indexmap::IndexMap as IM;
use indexmap::IndexSet as IS;

pub type IndexMap<K, V> = IM<K, V, ahash::RandomState>;
pub type IndexSet<T> = IS<T, ahash::RandomState>;
pub type HashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
pub type HashSet<T> = std::collections::HashSet<T, ahash::RandomState>;
