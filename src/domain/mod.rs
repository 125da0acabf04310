pub mod errors;
pub mod ports;
pub mod requests;
pub mod row;
