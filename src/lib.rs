// Desired-state model and validation
pub mod light;

// Bridge gateway trait and Hue CLIP v2 adapter
pub mod bridge;

// Single-light controller (resolve + update)
pub mod controller;

// HTTP API
pub mod api;

// Configuration
pub mod config;
