static SPELLED: [&str; 9] =
    ["first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth"];

/// Convert a number into an ordinal numeral.
///
/// First to ninth are spelled out, after that `10th`, `11th`, `22nd` and so on.
///
/// See <https://www.gov.uk/guidance/style-guide/a-to-z-of-gov-uk-style#ordinal-numbers>
pub fn ordinal(number: i64) -> String {
    if let Some(word) = usize::try_from(number).ok().and_then(|n| SPELLED.get(n.checked_sub(1)?)) {
        return (*word).to_string();
    }

    let n = number.unsigned_abs();
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{number}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "first")]
    #[case(4, "fourth")]
    #[case(9, "ninth")]
    #[case(10, "10th")]
    #[case(11, "11th")]
    #[case(12, "12th")]
    #[case(13, "13th")]
    #[case(21, "21st")]
    #[case(22, "22nd")]
    #[case(23, "23rd")]
    #[case(101, "101st")]
    #[case(111, "111th")]
    #[case(0, "0th")]
    #[case(-2, "-2nd")]
    fn ordinals(#[case] number: i64, #[case] expected: &str) {
        assert_eq!(ordinal(number), expected);
    }
}
