pub mod service;
pub mod session;
pub mod trace;
pub mod wire;
