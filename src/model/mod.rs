pub mod battlefield;
pub mod character;
pub mod decision;
pub mod factory;
pub mod game_state;
pub mod settings;
pub mod strategy;
