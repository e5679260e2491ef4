//! Claim URI helpers (normalization, web paths, share links)

const SCHEME: &str = "lbry://";

/// Prefix the `lbry://` scheme when missing. Empty input stays empty.
pub fn normalize(uri: &str) -> String {
    if uri.is_empty() || uri.starts_with(SCHEME) {
        uri.to_string()
    } else {
        format!("{}{}", SCHEME, uri)
    }
}

/// Convert a claim URI into an in-app navigation path
///
/// `lbry://@chan#ab/name#cd` becomes `/@chan:ab/name:cd`.
pub fn format_for_web(uri: &str) -> String {
    let bare = uri.strip_prefix(SCHEME).unwrap_or(uri);
    format!("/{}", bare.replace('#', ":"))
}

/// Build a public link for a claim's permanent URL
pub fn share_link(base_url: &str, permanent_url: &str) -> String {
    let path = format_for_web(permanent_url);
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_scheme_once() {
        assert_eq!(normalize("@chan#1"), "lbry://@chan#1");
        assert_eq!(normalize("lbry://@chan#1"), "lbry://@chan#1");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn web_paths_use_colons() {
        assert_eq!(format_for_web("lbry://@chan#ab/name#cd"), "/@chan:ab/name:cd");
        assert_eq!(format_for_web("name"), "/name");
    }

    #[test]
    fn share_link_joins_base_and_path() {
        assert_eq!(
            share_link("https://open.lbry.com/", "lbry://@chan#ab/doc#cd"),
            "https://open.lbry.com/@chan:ab/doc:cd"
        );
    }
}
