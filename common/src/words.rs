//! Spelling of numbers in English words.

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// Words of numbers below twenty.
const ONES: [&str; 20] = [
    "Zero",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

/// Words of tens, indexed by the tens digit.
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty",
    "Ninety",
];

/// Short scale names of thousand groups, indexed by the group position.
///
/// Covers the whole range of [`Decimal`].
const SCALES: [&str; 10] = [
    "",
    "Thousand",
    "Million",
    "Billion",
    "Trillion",
    "Quadrillion",
    "Quintillion",
    "Sextillion",
    "Septillion",
    "Octillion",
];

/// Spells the provided `value` as a cardinal number in title-cased English
/// words.
///
/// The integer part is spelled in the short scale without conjunctions
/// (`1250` is `One Thousand Two Hundred Fifty`), compound tens are hyphenated
/// (`Thirty-Six`). A non-zero fractional part follows `Point` digit by digit
/// (`0.05` is `Zero Point Zero Five`), while a zero one is omitted.
#[expect(clippy::missing_panics_doc, reason = "infallible")]
#[must_use]
pub fn spell(value: Decimal) -> String {
    let mut words = Vec::new();
    if value.is_sign_negative() && !value.is_zero() {
        words.push("Minus".to_owned());
    }

    let value = value.abs();
    spell_integer(
        value.trunc().to_u128().expect("non-negative integer"),
        &mut words,
    );

    let fraction = value.fract().normalize();
    if !fraction.is_zero() {
        words.push("Point".to_owned());
        words.extend(
            fraction
                .to_string()
                .chars()
                .skip_while(|c| *c != '.')
                .filter_map(|c| c.to_digit(10))
                .map(|d| ONES[d as usize].to_owned()),
        );
    }

    words.join(" ")
}

/// Spells the provided integer `n` into the provided `words`.
fn spell_integer(mut n: u128, words: &mut Vec<String>) {
    if n == 0 {
        words.push(ONES[0].to_owned());
        return;
    }

    let mut groups = Vec::with_capacity(SCALES.len());
    while n > 0 {
        groups.push(usize::try_from(n % 1000).expect("less than 1000"));
        n /= 1000;
    }

    for (scale, group) in groups.into_iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        spell_group(group, words);
        if scale > 0 {
            words.push(SCALES[scale].to_owned());
        }
    }
}

/// Spells the provided `group` of three digits into the provided `words`.
fn spell_group(group: usize, words: &mut Vec<String>) {
    let (hundreds, rest) = (group / 100, group % 100);
    if hundreds > 0 {
        words.push(ONES[hundreds].to_owned());
        words.push("Hundred".to_owned());
    }

    match rest {
        0 => {}
        1..=19 => words.push(ONES[rest].to_owned()),
        _ => {
            let (tens, ones) = (rest / 10, rest % 10);
            words.push(if ones == 0 {
                TENS[tens].to_owned()
            } else {
                format!("{}-{}", TENS[tens], ONES[ones])
            });
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::spell;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn spells_small_numbers() {
        assert_eq!(spell(decimal("0")), "Zero");
        assert_eq!(spell(decimal("7")), "Seven");
        assert_eq!(spell(decimal("15")), "Fifteen");
        assert_eq!(spell(decimal("40")), "Forty");
        assert_eq!(spell(decimal("99")), "Ninety-Nine");
    }

    #[test]
    fn spells_hundreds_and_scales() {
        assert_eq!(spell(decimal("100")), "One Hundred");
        assert_eq!(spell(decimal("736")), "Seven Hundred Thirty-Six");
        assert_eq!(spell(decimal("1000")), "One Thousand");
        assert_eq!(
            spell(decimal("1250")),
            "One Thousand Two Hundred Fifty",
        );
        assert_eq!(spell(decimal("1000001")), "One Million One");
        assert_eq!(
            spell(decimal("2015300")),
            "Two Million Fifteen Thousand Three Hundred",
        );
    }

    #[test]
    fn omits_zero_fraction() {
        assert_eq!(spell(decimal("736.000")), "Seven Hundred Thirty-Six");
        assert_eq!(spell(decimal("1000.0")), "One Thousand");
    }

    #[test]
    fn spells_fraction_digit_by_digit() {
        assert_eq!(
            spell(decimal("736.500")),
            "Seven Hundred Thirty-Six Point Five",
        );
        assert_eq!(spell(decimal("0.05")), "Zero Point Zero Five");
        assert_eq!(spell(decimal("12.125")), "Twelve Point One Two Five");
    }

    #[test]
    fn spells_negative_numbers() {
        assert_eq!(spell(decimal("-12")), "Minus Twelve");
        assert_eq!(spell(decimal("-0.000")), "Zero");
    }

    #[test]
    fn spells_largest_decimal() {
        assert!(spell(Decimal::MAX).starts_with("Seventy-Nine Octillion"));
    }
}
