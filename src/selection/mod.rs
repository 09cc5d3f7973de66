pub mod roulette;

pub use roulette::{weighted_pick, RouletteWheelSelection};
