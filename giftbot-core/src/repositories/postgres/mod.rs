pub mod player;

pub use player::PlayerRepository;
