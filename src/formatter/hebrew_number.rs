//! Hebrew numerals for day, month and year fields

const TAV: char = '\u{05EA}';
const TET: char = '\u{05D8}';
const YOD: char = '\u{05D9}';
const HE: char = '\u{05D4}';
const VAV: char = '\u{05D5}';
const ZAYIN: char = '\u{05D6}';

/// Letters for 10..=90
const TENS: [char; 9] = [
    YOD, '\u{05DB}', '\u{05DC}', '\u{05DE}', '\u{05E0}', '\u{05E1}', '\u{05E2}', '\u{05E4}', '\u{05E6}',
];

/// Append `number` (1..=999, or a year above 5000) as Hebrew letters with a
/// geresh (single letter) or gershayim (before the last letter)
pub(crate) fn append_hebrew_number(out: &mut String, number: i32) {
    let mut number = if number > 5000 { number - 5000 } else { number };
    let mut letters = String::new();

    let hundreds = number / 100;
    if hundreds > 0 {
        number -= hundreds * 100;
        for _ in 0..hundreds / 4 {
            letters.push(TAV);
        }
        let remains = (hundreds % 4) as u32;
        if remains > 0 {
            letters.extend(char::from_u32(0x05E6 + remains));
        }
    }

    let mut tens = match number / 10 {
        0 => None,
        n => TENS.get(n as usize - 1).copied(),
    };
    let mut units = match number % 10 {
        0 => None,
        n => char::from_u32(0x05D0 + n as u32 - 1),
    };

    // 15 and 16 are written 9+6 and 9+7
    if tens == Some(YOD) && units == Some(HE) {
        tens = Some(TET);
        units = Some(VAV);
    } else if tens == Some(YOD) && units == Some(VAV) {
        tens = Some(TET);
        units = Some(ZAYIN);
    }
    letters.extend(tens);
    letters.extend(units);

    let count = letters.chars().count();
    if count > 1 {
        let split = letters.char_indices().last().map_or(0, |(i, _)| i);
        letters.insert(split, '"');
    } else {
        letters.push('\'');
    }
    out.push_str(&letters);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hebrew(number: i32) -> String {
        let mut out = String::new();
        append_hebrew_number(&mut out, number);
        out
    }

    #[test]
    fn single_letters_take_geresh() {
        assert_eq!(hebrew(1), "א'");
        assert_eq!(hebrew(10), "י'");
        assert_eq!(hebrew(400), "ת'");
    }

    #[test]
    fn fifteen_and_sixteen() {
        assert_eq!(hebrew(15), "ט\"ו");
        assert_eq!(hebrew(16), "ט\"ז");
        assert_eq!(hebrew(17), "י\"ז");
    }

    #[test]
    fn years_drop_the_thousands() {
        assert_eq!(hebrew(5784), "תשפ\"ד");
        assert_eq!(hebrew(5785), "תשפ\"ה");
        assert_eq!(hebrew(5800), "ת\"ת");
    }

    #[test]
    fn days_of_month() {
        assert_eq!(hebrew(29), "כ\"ט");
        assert_eq!(hebrew(30), "ל'");
    }
}
