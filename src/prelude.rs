pub use crate::builder::{Engine, PolicyConfig};
pub use crate::ds::{FreqChain, GhostList, IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, KeyError};
pub use crate::key::{CacheKey, KeyBuilder};
pub use crate::traits::{CacheEngine, CacheStats, Capacity};
