//! CLI command implementations

pub mod activity;
pub mod badges;
pub mod check;
pub mod init;
pub mod streak;
pub mod validate;
