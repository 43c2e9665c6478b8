pub mod limit;
pub mod parse;
pub mod stage;
