pub mod executor;
pub mod statements;
