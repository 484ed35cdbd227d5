// monitoring/mod.rs
pub mod admin_cli;
