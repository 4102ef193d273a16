pub mod config;
pub mod events;
pub mod gui;
pub mod schedule;
pub mod sys;
