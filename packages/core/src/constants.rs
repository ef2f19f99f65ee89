use std::env;
use std::path::PathBuf;

/// Setting catalog names the dashboard surfaces, looked up by name rather
/// than by numeric id so reordering the catalog cannot break the view.
pub const SETTING_PRIORITY: &str = "priority";
pub const SETTING_INTENTION: &str = "intention";
pub const SETTING_NOTES_REMINDERS: &str = "notes_reminders";

/// The three catalog entries composited into the dashboard view.
pub const DASHBOARD_SETTINGS: [&str; 3] = [
    SETTING_PRIORITY,
    SETTING_INTENTION,
    SETTING_NOTES_REMINDERS,
];

/// Get the path to the Gameplan directory (~/.gameplan)
pub fn gameplan_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".gameplan")
    } else {
        // Fall back to dirs crate for normal usage
        dirs::home_dir()
            .expect("Unable to get home directory")
            .join(".gameplan")
    }
}
