pub mod date_keys;
pub mod duration;
