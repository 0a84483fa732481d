pub(crate) mod arena;
pub(crate) mod chain_table;
pub(crate) mod comparer;
pub(crate) mod fmt_utils;
pub(crate) mod hash_builder;
pub(crate) mod primes;
