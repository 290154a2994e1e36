//! File naming for the downloadable question list.

pub const DOWNLOAD_SUFFIX: &str = "_Interview_Questions.md";
pub const DOWNLOAD_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

const FALLBACK_NAME: &str = "candidate";

/// `{candidate_name}_Interview_Questions.md`, with path separators, control
/// characters and `< > : " | ? *` replaced by `_`. Spaces are kept.
pub fn download_filename(candidate_name: &str) -> String {
    let sanitized: String = candidate_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let stem = if sanitized.is_empty() {
        FALLBACK_NAME
    } else {
        sanitized.as_str()
    };
    format!("{stem}{DOWNLOAD_SUFFIX}")
}

/// `Content-Disposition` value with an ASCII fallback and an RFC 5987 UTF-8 form.
pub fn content_disposition(candidate_name: &str) -> String {
    let filename = download_filename(candidate_name);
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        urlencoding::encode(&filename)
    )
}
