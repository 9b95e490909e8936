// ABOUTME: Environment variable name constants and their development defaults
// ABOUTME: Centralized definitions of all environment variable names used across Tickbox

// Database Configuration
pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_USERNAME: &str = "DB_USERNAME";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_DATABASE: &str = "DB_DATABASE";
pub const DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub const DATABASE_URL: &str = "DATABASE_URL"; // Overrides the DB_* variables

// CORS Configuration
pub const CORS_ORIGINS: &str = "CORS_ORIGINS";

// Listener Configuration
pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";

// Development defaults
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USERNAME: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "matkhau";
pub const DEFAULT_DB_DATABASE: &str = "icloud_db";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
