pub mod delivery;
pub mod generator;
pub mod log;
pub mod records;
pub mod status;
pub mod weekly;
