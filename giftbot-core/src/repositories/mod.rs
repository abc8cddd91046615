// File: giftbot-core/src/repositories/mod.rs

pub mod postgres;

pub use postgres::player::PlayerRepository;
