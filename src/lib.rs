pub mod api;
pub mod auth;
pub mod config;
pub mod geometry;
pub mod models;
pub mod services;
