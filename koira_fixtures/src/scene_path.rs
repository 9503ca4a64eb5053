/// Folder every persisted scene asset lives under.
pub const ASSET_ROOT: &str = "Assets/";

/// File extension of persisted scene assets.
pub const SCENE_EXTENSION: &str = ".unity";

/// Canonical asset path for a raw scene identifier.
///
/// Blank input means "do not persist" and maps to `None`. Anything else is
/// prefixed with [`ASSET_ROOT`] and suffixed with [`SCENE_EXTENSION`], each
/// exactly once. Intermediate segments are taken as-is; an input that is
/// nothing but the extension still gets the prefix.
pub fn canonical_scene_path(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    let mut path = raw.to_string();
    if !path.starts_with(ASSET_ROOT) {
        path.insert_str(0, ASSET_ROOT);
    }
    if !path.ends_with(SCENE_EXTENSION) {
        path.push_str(SCENE_EXTENSION);
    }
    Some(path)
}

/// File-name component of a canonical scene path.
pub(crate) fn scene_file_name(path: &str) -> &str {
    path.rfind('/').map_or(path, |slash| &path[slash + 1..])
}
