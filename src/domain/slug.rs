//! Slug derivation for category names.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. Derivation folds Latin diacritics to their
//! base letters so names such as "Calças" produce URL-safe slugs.

/// Derive a URL-safe slug from a display name.
///
/// Lowercases the input, folds diacritics, drops punctuation, and collapses
/// whitespace, hyphen, and underscore runs into single hyphens.
///
/// # Examples
/// ```
/// use storefront_backend::domain::slug::slugify;
///
/// assert_eq!(slugify("Calças Jeans"), "calcas-jeans");
/// assert_eq!(slugify("  Promoção -- Verão!  "), "promocao-verao");
/// ```
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.trim().to_lowercase().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
            continue;
        }
        let folded = if ch.is_ascii() {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                push_folded(&mut out, ch, &mut pending_separator);
            }
            // Other ASCII punctuation is dropped without acting as a separator.
            continue;
        } else {
            fold_diacritic(ch)
        };
        for ch in folded.chars() {
            push_folded(&mut out, ch, &mut pending_separator);
        }
    }
    out
}

fn push_folded(out: &mut String, ch: char, pending_separator: &mut bool) {
    if *pending_separator && !out.is_empty() {
        out.push('-');
    }
    *pending_separator = false;
    out.push(ch);
}

/// Return `true` when `value` is a valid slug.
#[cfg(test)]
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
        && !value.starts_with('-')
        && !value.ends_with('-')
}

/// Fold a Latin accented character onto its ASCII base.
///
/// Covers the accented letters seen in Portuguese catalogue names; other
/// non-ASCII characters are dropped.
fn fold_diacritic(ch: char) -> &'static str {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'í' | 'ì' | 'î' | 'ï' => "i",
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => "o",
        'ú' | 'ù' | 'û' | 'ü' => "u",
        'ç' => "c",
        'ñ' => "n",
        'ý' | 'ÿ' => "y",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        _ => "",
    }
}
