use once_cell::sync::Lazy;
use regex::Regex;

static EMPTY_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*#+[ \t]*$").expect("valid empty heading regex"));
static GLUED_HASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)#+([^#\s])").expect("valid glued hash regex"));
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+(.+?)[ \t#]*$").expect("valid heading regex"));
static UNDERSCORE_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__([^_\n]+?)__").expect("valid bold regex"));
static STAR_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)\*[ \t]+").expect("valid bullet regex"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!?\[([^\]\n]*)\]\([^)\n]*\)").expect("valid link regex"));
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*```[^\n]*\n?").expect("valid fence regex"));

/// Rewrites generated text so it only carries `### heading` and `**bold**` markers.
/// Anything else (italics, links, code, unclosed bold) is reduced to plain text.
pub fn normalize_markup(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = CODE_FENCE.replace_all(&text, "");
    let text = EMPTY_HEADING.replace_all(&text, "");
    let text = GLUED_HASHES.replace_all(&text, "$1$2");
    let text = HEADING.replace_all(&text, "### $1");
    let text = UNDERSCORE_BOLD.replace_all(&text, "**$1**");
    let text = STAR_BULLET.replace_all(&text, "$1- ");
    let text = LINK.replace_all(&text, "$1");
    let text = text.replace('`', "").replace("__", "");

    text.lines()
        .map(balance_bold)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Keeps `**` pairs closed within a line and drops single-star emphasis.
fn balance_bold(line: &str) -> String {
    let parts = line
        .split("**")
        .map(|part| part.replace('*', ""))
        .collect::<Vec<_>>();
    let kept_markers = (parts.len() - 1) / 2 * 2;

    let mut balanced = String::with_capacity(line.len());
    for (index, part) in parts.iter().enumerate() {
        if index > 0 && index <= kept_markers {
            balanced.push_str("**");
        }
        balanced.push_str(part);
    }
    balanced
}

pub fn uses_only_supported_markers(text: &str) -> bool {
    text.lines().all(|line| {
        let trimmed = line.trim_start();
        let heading_ok = !trimmed.starts_with('#')
            || (trimmed.starts_with("### ") && !trimmed.starts_with("####"));
        let bold_ok = line.matches("**").count() % 2 == 0;
        let stray_star = line.replace("**", "").contains('*');
        heading_ok
            && bold_ok
            && !stray_star
            && !line.contains("__")
            && !line.contains('`')
            && !LINK.is_match(line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_collapse_to_level_three() {
        let text = "# Jour 1: Agadir\n## Jour 2: Tafraout ##\n#### Jour 3";
        assert_eq!(
            normalize_markup(text),
            "### Jour 1: Agadir\n### Jour 2: Tafraout\n### Jour 3"
        );
    }

    #[test]
    fn underscore_bold_becomes_stars() {
        assert_eq!(
            normalize_markup("Dîner au __Le Flore__ ce soir"),
            "Dîner au **Le Flore** ce soir"
        );
    }

    #[test]
    fn star_bullets_become_dashes() {
        let normalized = normalize_markup("* **Matin :** surf\n  * plage");
        assert_eq!(normalized, "- **Matin :** surf\n  - plage");
        assert!(uses_only_supported_markers(&normalized));
    }

    #[test]
    fn detects_unsupported_markers() {
        assert!(!uses_only_supported_markers("## Jour 1"));
        assert!(!uses_only_supported_markers("**ouvert sans fermer"));
        assert!(!uses_only_supported_markers("*Astuce :* réservez tôt"));
        assert!(!uses_only_supported_markers("[Le Flore](https://example.com)"));
        assert!(!uses_only_supported_markers("réservez via `app`"));
        assert!(uses_only_supported_markers("### Jour 1\n**Matin :** plage"));
    }

    #[test]
    fn other_markers_become_plain_text() {
        let raw = "### Jour 1: Plage\n*Astuce :* réservez tôt\n**Matin :\nsurf** au spot\n\
                   [Le Flore](https://example.com) `code`";
        let normalized = normalize_markup(raw);
        assert_eq!(
            normalized,
            "### Jour 1: Plage\nAstuce : réservez tôt\nMatin :\nsurf au spot\nLe Flore code"
        );
        assert!(uses_only_supported_markers(&normalized));
    }

    #[test]
    fn triple_stars_keep_the_bold_pair() {
        assert_eq!(normalize_markup("***Kasbah*** Oufella"), "**Kasbah** Oufella");
    }

    #[test]
    fn code_fences_and_bare_hashes_are_dropped() {
        let normalized = normalize_markup("```markdown\n#Jour 1\n###\n**Soir :** dîner\n```");
        assert_eq!(normalized, "Jour 1\n\n**Soir :** dîner");
        assert!(uses_only_supported_markers(&normalized));
    }

    #[test]
    fn fallback_itinerary_is_already_normalized() {
        let sample = crate::fallback::FALLBACK_ITINERARY;
        assert_eq!(normalize_markup(sample), sample.trim());
    }
}
