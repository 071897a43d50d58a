/// Derive a URL-safe slug from a page title.
///
/// ASCII letters and digits are kept (lowercased); every other run of
/// characters becomes a single `-`. A title with no ASCII letters or
/// digits yields an empty slug, which the store replaces with one made
/// from the page id.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Lowercase ASCII letters, digits and single inner dashes
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Summer Sale 2024!"), "summer-sale-2024");
        assert_eq!(slugify("  --Hello,   World--  "), "hello-world");
        assert_eq!(slugify("Café crème"), "caf-cr-me");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("about-us"));
        assert!(is_valid_slug("2024"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("About"));
        assert!(!is_valid_slug("-about"));
        assert!(!is_valid_slug("about--us"));
        assert!(!is_valid_slug("about/us"));
    }

    #[test]
    fn test_slugify_output_is_valid() {
        for title in ["A", "Hello World", "x--y", "Ünïcode tïtle 9"] {
            let slug = slugify(title);
            assert!(is_valid_slug(&slug), "{:?} -> {:?}", title, slug);
        }
    }
}
