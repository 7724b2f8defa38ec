//! English pluralisation.
//!
//! Rule order matters: whole-word exceptions first, then suffix rules from
//! most to least specific.

/// Options for [`plural`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralOptions {
    /// Prefix the word with the count.
    pub show_number: bool,
    /// Use this form instead of the inflected one.
    pub plural: Option<String>,
}

impl Default for PluralOptions {
    fn default() -> Self {
        Self { show_number: true, plural: None }
    }
}

static IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("louse", "lice"),
    ("ox", "oxen"),
    ("die", "dice"),
    ("quiz", "quizzes"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
    ("appendix", "appendices"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("passerby", "passersby"),
];

static UNCOUNTABLE: &[&str] = &[
    "aircraft",
    "advice",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "information",
    "furniture",
    "luggage",
    "moose",
    "money",
    "news",
    "police",
    "research",
    "rice",
    "series",
    "sheep",
    "software",
    "species",
    "staff",
    "traffic",
];

/// Irregulars that keep their plural inside compounds such as "chairwoman",
/// "grandchild" or "salesperson".
static COMPOUNDING: &[&str] = &["woman", "child", "person", "mouse", "tooth"];

/// Singulars ending in `-us` that take the Latin `-i`.
static LATIN_US: &[&str] =
    &["alumnus", "cactus", "focus", "fungus", "nucleus", "radius", "stimulus", "syllabus"];

/// Singulars ending in `-f`/`-fe` that are not covered by the `lf`/`rf` rule.
static F_TO_VES: &[&str] = &["knife", "leaf", "life", "loaf", "sheaf", "thief", "wife"];

static O_TO_OES: &[&str] = &["echo", "hero", "potato", "tomato", "torpedo", "veto"];

/// Get the form of a word for a number of items.
///
/// `plural(2.0, "mouse", &PluralOptions::default())` → `2 mice`
pub fn plural(count: f64, singular: &str, opts: &PluralOptions) -> String {
    let word = if count == 1.0 {
        singular.to_string()
    } else {
        opts.plural.clone().unwrap_or_else(|| pluralize(singular))
    };

    if opts.show_number { format!("{} {word}", format_count(count)) } else { word }
}

/// The plural form of a singular noun. Only the last word of a phrase is
/// inflected.
pub fn pluralize(singular: &str) -> String {
    let split = singular.rfind(char::is_whitespace).map_or(0, |i| i + 1);
    let (head, word) = singular.split_at(split);
    if word.is_empty() {
        return singular.to_string();
    }

    let lower = word.to_lowercase();
    let inflected = inflect_lowercase(&lower);
    format!("{head}{}", restore_case(word, &inflected))
}

fn inflect_lowercase(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }
    for (singular, plural) in IRREGULAR.iter().filter(|(s, _)| COMPOUNDING.contains(s)) {
        if word.ends_with(singular) {
            return format!("{}{plural}", &word[..word.len() - singular.len()]);
        }
    }

    if LATIN_US.contains(&word) {
        return format!("{}i", &word[..word.len() - 2]);
    }
    if F_TO_VES.contains(&word) || word.ends_with("lf") || word.ends_with("rf") {
        let stem = word.trim_end_matches('e');
        return format!("{}ves", &stem[..stem.len() - 1]);
    }
    if word.ends_with("sis") {
        return format!("{}ses", &word[..word.len() - 3]);
    }
    if O_TO_OES.contains(&word) {
        return format!("{word}es");
    }
    if word.ends_with('y') && word.chars().rev().nth(1).is_some_and(|c| !"aeiou".contains(c)) {
        return format!("{}ies", &word[..word.len() - 1]);
    }
    if ["s", "sh", "ch", "x", "z"].iter().any(|suffix| word.ends_with(suffix)) {
        return format!("{word}es");
    }

    format!("{word}s")
}

/// Apply the casing of `original` to `inflected`.
fn restore_case(original: &str, inflected: &str) -> String {
    if original == original.to_lowercase() {
        return inflected.to_string();
    }
    if original == original.to_uppercase() {
        return inflected.to_uppercase();
    }

    let mut chars = inflected.chars();
    match (original.chars().next(), chars.next()) {
        (Some(first), Some(head)) if first.is_uppercase() => {
            head.to_uppercase().chain(chars).collect()
        }
        _ => inflected.to_string(),
    }
}

/// Whole numbers without a decimal point, like `2` rather than `2.0`.
fn format_count(count: f64) -> String {
    if count.fract() == 0.0 && count.abs() < 1e15 {
        (count as i64).to_string()
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1.0, "mouse", "1 mouse")]
    #[case(2.0, "mouse", "2 mice")]
    #[case(0.0, "week", "0 weeks")]
    #[case(1.0, "week", "1 week")]
    #[case(2.5, "hour", "2.5 hours")]
    #[case(3.0, "person", "3 people")]
    #[case(2.0, "sheep", "2 sheep")]
    fn with_numbers(#[case] count: f64, #[case] singular: &str, #[case] expected: &str) {
        assert_eq!(plural(count, singular, &PluralOptions::default()), expected);
    }

    #[test]
    fn without_number() {
        let opts = PluralOptions { show_number: false, ..PluralOptions::default() };
        assert_eq!(plural(2.0, "mouse", &opts), "mice");
        assert_eq!(plural(1.0, "mouse", &opts), "mouse");
    }

    #[test]
    fn explicit_plural() {
        let opts = PluralOptions { plural: Some("octopodes".to_string()), ..PluralOptions::default() };
        assert_eq!(plural(8.0, "octopus", &opts), "8 octopodes");
        assert_eq!(plural(1.0, "octopus", &opts), "1 octopus");
    }

    #[rstest]
    #[case("box", "boxes")]
    #[case("bus", "buses")]
    #[case("status", "statuses")]
    #[case("church", "churches")]
    #[case("wish", "wishes")]
    #[case("city", "cities")]
    #[case("day", "days")]
    #[case("wolf", "wolves")]
    #[case("knife", "knives")]
    #[case("chief", "chiefs")]
    #[case("analysis", "analyses")]
    #[case("cactus", "cacti")]
    #[case("potato", "potatoes")]
    #[case("photo", "photos")]
    #[case("grandchild", "grandchildren")]
    #[case("chairwoman", "chairwomen")]
    #[case("human", "humans")]
    #[case("birdie", "birdies")]
    #[case("information", "information")]
    #[case("application form", "application forms")]
    fn inflection(#[case] singular: &str, #[case] expected: &str) {
        assert_eq!(pluralize(singular), expected);
    }

    #[rstest]
    #[case("Mouse", "Mice")]
    #[case("MOUSE", "MICE")]
    #[case("Person", "People")]
    fn keeps_case(#[case] singular: &str, #[case] expected: &str) {
        assert_eq!(pluralize(singular), expected);
    }
}
