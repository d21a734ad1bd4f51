pub mod config;
pub mod controller;
pub mod fps;
pub mod game;
pub mod layout;
pub mod logging;
pub mod spin;
pub mod timer;

pub use controller::{
    AppController,
    AppSnapshot,
};
pub use game::{
    CHAMBER_COUNT,
    Chamber,
    FireOutcome,
    GameState,
    Phase,
};
