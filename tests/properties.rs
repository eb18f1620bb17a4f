use culture_format::formatter::{format, format_round_trip};
use culture_format::locale::{RFC1123_PATTERN, ROUND_TRIP_PATTERN};
use culture_format::parser::try_parse;
use culture_format::{DateTimeKind, DateTimeValue, NumberFormatInfo, NumberStyles, ParseResult};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Ticks of 9999-12-31T23:59:59.9999999
const MAX_TICKS: i64 = 3_155_378_975_999_999_999;

proptest! {
    #[test]
    fn integers_round_trip(a in any::<i32>(), b in any::<i64>(), c in any::<u64>(), d in any::<i128>()) {
        let info = NumberFormatInfo::invariant();
        let styles = NumberStyles::INTEGER;
        prop_assert_eq!(try_parse::<i32>(&a.to_string(), styles, info), ParseResult::Ok(a));
        prop_assert_eq!(try_parse::<i64>(&b.to_string(), styles, info), ParseResult::Ok(b));
        prop_assert_eq!(try_parse::<u64>(&c.to_string(), styles, info), ParseResult::Ok(c));
        prop_assert_eq!(try_parse::<i128>(&d.to_string(), styles, info), ParseResult::Ok(d));
    }

    #[test]
    fn general_path_matches_display(value in any::<i64>()) {
        let info = NumberFormatInfo::invariant();
        let text = format!("  {value}  ");
        prop_assert_eq!(try_parse::<i64>(&text, NumberStyles::NUMBER, info), ParseResult::Ok(value));
        prop_assert_eq!(try_parse::<i64>(&text, NumberStyles::ANY, info), ParseResult::Ok(value));
    }

    #[test]
    fn decimals_round_trip(mantissa in any::<i64>(), scale in 0u32..=28) {
        let value = Decimal::new(mantissa, scale);
        let parsed = try_parse::<Decimal>(&value.to_string(), NumberStyles::NUMBER, NumberFormatInfo::invariant());
        let parsed = parsed.ok().unwrap();
        prop_assert_eq!(parsed, value);
        prop_assert_eq!(parsed.scale(), value.scale());
    }

    #[test]
    fn floats_round_trip(value in any::<f64>().prop_filter("finite non-zero", |v| v.is_finite() && *v != 0.0)) {
        let info = NumberFormatInfo::invariant();
        let parsed = try_parse::<f64>(&format!("{value:e}"), NumberStyles::FLOAT, info).ok().unwrap();
        prop_assert_eq!(parsed.to_bits(), value.to_bits());

        let narrow = value as f32;
        if narrow.is_finite() && narrow != 0.0 {
            let parsed = try_parse::<f32>(&format!("{narrow:e}"), NumberStyles::FLOAT, info).ok().unwrap();
            prop_assert_eq!(parsed.to_bits(), narrow.to_bits());
        }
    }

    #[test]
    fn round_trip_pattern_matches_fixed_layout(ticks in 0i64..=MAX_TICKS) {
        let value = DateTimeValue::from_ticks(ticks, DateTimeKind::Unspecified).unwrap();
        let custom = format(&value, Some(ROUND_TRIP_PATTERN), None, None).unwrap();
        prop_assert_eq!(custom, format_round_trip(&value, None));
        prop_assert_eq!(value.ticks(), ticks);
    }

    #[test]
    fn rfc1123_pattern_matches_fixed_layout(ticks in 0i64..=MAX_TICKS) {
        let value = DateTimeValue::from_ticks(ticks, DateTimeKind::Utc).unwrap();
        let custom = format(&value, Some(RFC1123_PATTERN), None, None).unwrap();
        prop_assert_eq!(custom, format(&value, Some("R"), None, None).unwrap());
    }

    #[test]
    fn sortable_matches_chrono(ticks in 0i64..=MAX_TICKS) {
        let value = DateTimeValue::from_ticks(ticks, DateTimeKind::Unspecified).unwrap();
        let ours = format(&value, Some("yyyy-MM-dd HH:mm:ss"), None, None).unwrap();
        prop_assert_eq!(ours, value.naive().format("%Y-%m-%d %H:%M:%S").to_string());
    }
}
