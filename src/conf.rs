//! Settings and logging

pub use therapist_index_conf::*;
