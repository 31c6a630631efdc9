//! Commands

pub mod update;
