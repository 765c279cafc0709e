pub mod call;
pub mod transcript;
