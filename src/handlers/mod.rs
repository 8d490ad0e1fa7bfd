//! Route handlers.

pub mod delay;
pub mod echo;
pub mod service_info;
pub mod status;
pub mod views;
