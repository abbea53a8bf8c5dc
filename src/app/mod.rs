pub mod export;
pub mod session;
