use hashblog_shared::Tag;

/// Fixed tag palette. Reordering it recolors every tag on the site.
pub const TAG_PALETTE: [&str; 10] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
    "#6366f1", "#84cc16",
];

/// Color for a tag name: a 31-multiplier hash over UTF-16 units with 32-bit
/// wrapping, absolute value modulo the palette length.
pub fn tag_color(name: &str) -> &'static str {
    let hash = name.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    let index = hash.unsigned_abs() as usize % TAG_PALETTE.len();
    TAG_PALETTE[index]
}

/// Lowercase, whitespace runs to `-`, drop anything outside `[a-z0-9_-]`.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            slug.push(ch);
        }
    }
    slug
}

/// `my-great-post` -> `My Great Post`.
pub fn titleize(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build a tag, preferring the upstream slug when it is non-empty.
pub fn build_tag(name: &str, slug: Option<&str>) -> Tag {
    let name = name.trim();
    let slug = slug
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| slugify(name));
    Tag {
        name: name.to_string(),
        slug,
        color: tag_color(name).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_tag, slugify, tag_color, titleize, TAG_PALETTE};

    #[test]
    fn tag_color_is_stable_per_name() {
        assert_eq!(tag_color("Rust"), tag_color("Rust"));
        assert!(TAG_PALETTE.contains(&tag_color("JavaScript")));
        // "a" hashes to 97.
        assert_eq!(tag_color("a"), TAG_PALETTE[97 % TAG_PALETTE.len()]);
    }

    #[test]
    fn tag_color_handles_long_names_without_overflow() {
        let name = "x".repeat(10_000);
        assert!(TAG_PALETTE.contains(&tag_color(&name)));
    }

    #[test]
    fn slugify_strips_and_hyphenates() {
        assert_eq!(slugify("React"), "react");
        assert_eq!(slugify("  Web   Dev "), "web-dev");
        assert_eq!(slugify("C# Tips!"), "c-tips");
        assert_eq!(slugify("node_js"), "node_js");
    }

    #[test]
    fn titleize_capitalizes_words() {
        assert_eq!(titleize("my-great-post"), "My Great Post");
        assert_eq!(titleize("--edge__case-"), "Edge Case");
    }

    #[test]
    fn build_tag_falls_back_to_slugified_name() {
        let tag = build_tag("React", None);
        assert_eq!(tag.slug, "react");
        let tag = build_tag("React", Some("  "));
        assert_eq!(tag.slug, "react");
        let tag = build_tag("React", Some("reactjs"));
        assert_eq!(tag.slug, "reactjs");
        assert_eq!(tag.color, tag_color("React"));
    }
}
