pub mod entry;
pub mod level_spec;
pub mod save_packet;
