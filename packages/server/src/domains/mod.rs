pub mod classification;
pub mod conversation;
pub mod prediction;
pub mod verification;
