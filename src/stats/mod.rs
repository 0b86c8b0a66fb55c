pub mod compare;
pub mod daily;
pub mod day_split;
pub mod intervals;
pub mod rollup;
