pub mod interner;
pub mod inverted;
