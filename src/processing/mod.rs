pub mod classify;
pub mod combine;
pub mod embedding;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod scoring;
