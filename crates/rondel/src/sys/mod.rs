pub mod icons;
pub mod runtime;
pub mod server;
