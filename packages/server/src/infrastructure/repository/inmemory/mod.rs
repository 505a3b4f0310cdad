//! インメモリ実装

pub mod player;

pub use player::InMemoryPlayerRepository;
