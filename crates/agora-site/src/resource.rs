//! Request path and upload classification.

use std::path::Path;

/// Extensions served straight from disk, never by the forum engine.
const STATIC_EXTENSIONS: &[&str] = &[
    "axd", "ashx", "bmp", "css", "gif", "htm", "html", "ico", "jpeg", "jpg", "js", "png", "rar",
    "zip",
];

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".gif", ".bmp", ".png"];

/// Whether a request path targets a static resource.
///
/// Only the path is inspected; a query string must be stripped first.
///
/// ```
/// use agora_site::is_static_resource;
///
/// assert!(is_static_resource("/themes/metro/style.CSS"));
/// assert!(!is_static_resource("/cat/general"));
/// ```
pub fn is_static_resource(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            STATIC_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Whether a file name looks like an image upload.
///
/// Matches anywhere in the name, so `photo.jpg.txt` counts as an image.
pub fn file_is_image(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}
