/// Environment-backed runtime configuration
pub mod app;

/// Database connection and table creation
pub mod database;

/// Seed data loading from seed.toml
pub mod seed;
