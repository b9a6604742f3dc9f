use std::path::Path;

use crate::config::SIDECAR_FILE_NAME;

const JPEG_EXTS: [&str; 2] = ["jpg", "jpeg"];

pub fn is_jpeg(path: &Path) -> bool {
    let ext = path_ext_lower(path);
    JPEG_EXTS.iter().any(|allowed| *allowed == ext)
}

pub fn is_sidecar(name: &str) -> bool {
    name.eq_ignore_ascii_case(SIDECAR_FILE_NAME)
}

fn path_ext_lower(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}
