//! Spelled-out amounts, British-English convention: hyphenated tens, "and"
//! between hundreds and the remainder, thousand groups joined with ", " and
//! a final "and" before a trailing sub-hundred group.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "", "thousand", "million", "billion", "trillion", "quadrillion", "quintillion",
];

fn two_digits(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{}-{}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

fn three_digits(n: u64) -> String {
    match (n / 100, n % 100) {
        (0, rem) => two_digits(rem),
        (hundreds, 0) => format!("{} hundred", ONES[hundreds as usize]),
        (hundreds, rem) => format!("{} hundred and {}", ONES[hundreds as usize], two_digits(rem)),
    }
}

/// Spell out a non-negative integer, e.g. 8380 ->
/// "eight thousand, three hundred and eighty".
pub fn integer_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    // Most significant group first: (value in 1..=999, scale index).
    let mut groups: Vec<(u64, usize)> = Vec::new();
    let mut rest = n;
    let mut scale = 0;
    while rest > 0 {
        let group = rest % 1000;
        if group > 0 {
            groups.push((group, scale));
        }
        rest /= 1000;
        scale += 1;
    }
    groups.reverse();

    let last = groups.len() - 1;
    let mut out = String::new();
    for (i, (value, scale)) in groups.iter().enumerate() {
        if i > 0 {
            // "one thousand and five", but "eight thousand, three hundred ..."
            out.push_str(if i == last && *value < 100 { " and " } else { ", " });
        }
        out.push_str(&three_digits(*value));
        if *scale > 0 {
            out.push(' ');
            out.push_str(SCALES[*scale]);
        }
    }
    out
}

// Amounts are worded up to the trillions; an integer part beyond u64
// saturates instead of wrapping to a silent zero.
fn whole_part(rounded: Decimal) -> u64 {
    rounded.trunc().to_u64().unwrap_or(u64::MAX)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// USD wording: "<dollars> dollar(s) and <cents> cent(s)", rounded half-even
/// to two decimal places, first letter capitalized.
pub fn usd_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let dollars = whole_part(rounded);
    let cents = (rounded.fract() * Decimal::ONE_HUNDRED).to_u64().unwrap_or(0);
    let dollar_noun = if dollars == 1 { "dollar" } else { "dollars" };
    let cent_noun = if cents == 1 { "cent" } else { "cents" };
    capitalize(&format!(
        "{} {} and {} {}",
        integer_words(dollars),
        dollar_noun,
        integer_words(cents),
        cent_noun
    ))
}

/// SAR wording: integer part spelled out, then "point", then each of the two
/// fractional digits spelled individually. 100.00 -> "One hundred point zero
/// zero".
pub fn sar_digitwise(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let whole = whole_part(rounded);
    let frac = (rounded.fract() * Decimal::ONE_HUNDRED).to_u64().unwrap_or(0);
    let digits: Vec<&str> = format!("{:02}", frac)
        .bytes()
        .map(|b| ONES[(b - b'0') as usize])
        .collect();
    capitalize(&format!("{} point {}", integer_words(whole), digits.join(" ")))
}
