/// Database layer for TaskTrack
///
/// # Modules
///
/// - `pool`: SQLite connection pool management with health checks
/// - `migrations`: Database migration runner
pub mod migrations;
pub mod pool;
