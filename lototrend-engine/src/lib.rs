pub mod export;
pub mod miss;
pub mod params;
pub mod stats;
pub mod tails;
pub mod tier;
