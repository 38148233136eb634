pub mod matches;
pub mod names;
pub mod shots;
pub mod summary;
