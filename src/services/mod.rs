pub mod generator;
pub mod io;
pub mod sequencer;
