//! Path normalization and segment matching.

use std::collections::BTreeMap;

/// Named values captured from `:param` segments.
pub type Params = BTreeMap<String, String>;

/// Normalize a path: leading slash, no empty segments, no trailing slash.
///
/// `""` and `"/"` both normalize to `"/"`.
pub fn normalize(path: &str) -> String {
    let segments = segments(path);
    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}

/// Resolve `path` against `base`. Absolute paths replace the base.
pub fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        normalize(path)
    } else {
        normalize(&format!("{base}/{path}"))
    }
}

/// Split a path into its non-empty segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Whether any segment of the path is a `:param`.
pub fn is_parameterized(path: &str) -> bool {
    segments(path).iter().any(|s| s.starts_with(':'))
}

/// Match `pattern` as a segment prefix of `path`, capturing parameters.
///
/// Pattern: `["compute", ":id"]`
/// Path: `["compute", "vm-1", "disks"]`
/// Result: `Some({"id": "vm-1"})`
pub fn match_prefix(pattern: &[&str], path: &[&str]) -> Option<Params> {
    if pattern.len() > path.len() {
        return None;
    }

    let mut params = Params::new();

    for (pat, actual) in pattern.iter().zip(path.iter()) {
        if let Some(param_name) = pat.strip_prefix(':') {
            params.insert(param_name.to_string(), (*actual).to_string());
        } else if pat != actual {
            return None;
        }
    }

    Some(params)
}
