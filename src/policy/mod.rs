//! Replacement-policy engines.
//!
//! Each module implements one eviction policy behind the shared
//! [`CacheEngine`](crate::traits::CacheEngine) contract.
//!
//! | Policy | Module | Eviction basis |
//! |--------|--------|----------------|
//! | FIFO | `fifo` | Oldest insertion |
//! | LIFO | `lifo` | Newest insertion |
//! | LRU | `lru` | Least recent access |
//! | MRU | `mru` | Most recent access |
//! | NMRU | `nmru` | Random, sparing the most recent |
//! | RR | `rr` | Uniform random |
//! | Static | `unbounded` | Never evicts |
//! | LFU | `lfu` | Lowest access frequency |
//! | MFU | `mfu` | Highest access frequency |
//! | SLRU | `slru` | Probationary arrival order |
//! | 2Q (simple) | `two_q` | Secondary arrival / primary recency |
//! | 2Q (full) | `two_q_full` | Arrival order with ghost reinstatement |
//! | MQ | `mq` | Multi-level recency + frequency + aging |
//! | TLRU | `tlru` | Recency + expiry deadlines |

pub mod fifo;
pub mod lfu;
pub mod lifo;
pub mod lru;
pub mod mfu;
pub mod mq;
pub mod mru;
pub mod nmru;
pub mod rr;
pub mod slru;
pub mod tlru;
pub mod two_q;
pub mod two_q_full;
pub mod unbounded;
