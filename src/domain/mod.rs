pub mod candidate;
pub mod result;
