//! Data models for the Tempus server

pub mod area;
pub mod attendance;
pub mod employee;
pub mod property;
pub mod schedule;
pub mod user;
