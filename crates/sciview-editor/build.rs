// Keep in sync with:
// - crates/sciview-editor/src/lib.rs (generate_handler![...])
// - crates/sciview-editor/permissions/default.toml (default permission set)
const COMMANDS: &[&str] = &[
    "open_document",
    "close_document",
    "load_document",
    "refresh_document",
    "get_settings",
    "update_settings",
    "watch_document",
    "unwatch_document",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS)
        .try_build()
        .expect("failed to build tauri plugin permissions");
}
