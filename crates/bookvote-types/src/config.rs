use std::{fs, path::PathBuf};

fn ensure_dir(dir: PathBuf) -> String {
    if !fs::exists(&dir).expect("Failed to check if data directory exists") {
        fs::create_dir_all(&dir).expect("Failed to create data directory");
    } else if !dir.is_dir() {
        panic!("Data directory is not a directory",)
    }

    dir.to_string_lossy().to_string()
}

/// Server data directory (database), system default like ~/.local/share/bookvote
pub fn default_data_dir() -> String {
    let dir = dirs::data_dir()
        .map(|p| p.join("bookvote"))
        .unwrap_or_else(|| PathBuf::from("bookvote"));
    ensure_dir(dir)
}

/// Client directory (persisted client id), system default like ~/.config/bookvote-client
pub fn default_client_dir() -> String {
    let dir = dirs::config_dir()
        .map(|p| p.join("bookvote-client"))
        .unwrap_or_else(|| PathBuf::from("bookvote-client"));
    ensure_dir(dir)
}
