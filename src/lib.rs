pub mod config;
pub mod logger;
pub mod searchad;
pub mod web;
