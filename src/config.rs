use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Careline";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info,careline=debug"
}

/// Get the application data directory
/// ~/Careline/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Careline")
}

/// Optional user-supplied knowledge base file. When present, it replaces
/// the built-in symptom category table.
pub fn knowledge_override_path() -> PathBuf {
    app_data_dir().join("knowledge.json")
}
