/// Cleans up a raw Recreation.gov facility name for display.
///
/// The source data is inconsistently shouty and occasionally tacks on
/// redundant suffixes like `" RENTAL"` or a trailing parenthetical.
/// Applying the function twice yields the same result as applying it once.
pub fn normalize_facility_name(raw: &str) -> String {
    let mut name = strip_redundant_suffixes(raw);
    name = expand_abbreviations(&name);
    // A few names have remaining periods that don't make sense
    name = name.replace(". ", " ");
    if has_no_lowercase(&name) {
        name = title_case(&name);
    }
    fix_mc_names(&name)
}

// `" RENTAL"` suffixes and trailing parentheticals can stack, so peel them
// off until the name is stable
fn strip_redundant_suffixes(raw: &str) -> String {
    let mut name = raw.trim().to_string();
    loop {
        if name.to_uppercase().ends_with(" RENTAL") {
            name.truncate(name.len() - " RENTAL".len());
            name = name.trim_end().to_string();
            continue;
        }
        if name.ends_with(')') {
            if let Some(open) = name.rfind('(') {
                name.truncate(open);
                name = name.trim_end().to_string();
                continue;
            }
        }
        return name;
    }
}

// Whole-word replacements only; "MTN" inside another word is left alone
fn expand_abbreviations(name: &str) -> String {
    name.split_whitespace()
        .map(|word| match word {
            "MTN." | "MTN" => "MOUNTAIN",
            "MT." => "MOUNT",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_no_lowercase(name: &str) -> bool {
    !name.chars().any(char::is_lowercase)
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// Title-casing flattens names like "McDONALD" to "Mcdonald"; restore the
// interior capital
fn fix_mc_names(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            if word.len() > 2 && word.starts_with("Mc") {
                let mut fixed = String::with_capacity(word.len());
                fixed.push_str("Mc");
                let mut rest = word[2..].chars();
                if let Some(third) = rest.next() {
                    fixed.extend(third.to_uppercase());
                }
                fixed.extend(rest);
                fixed
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
