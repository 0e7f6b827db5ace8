use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|; ]"#).expect("valid filename regex"));

const FALLBACK_CITY: &str = "default_city";

/// City name made safe for use inside a file name.
#[must_use]
pub fn safe_city(city: &str) -> String {
    let replaced = UNSAFE_FILENAME_CHARS.replace_all(city, "-");
    let trimmed = replaced.trim_matches('_');
    if trimmed.is_empty() {
        FALLBACK_CITY.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// `<date>_<job>_<city>_Arbeitsagentur_Ausbildungssuche_<time>`, without
/// extension.
#[must_use]
pub fn export_file_stem(now: NaiveDateTime, job_id: i64, city: &str) -> String {
    format!(
        "{}_{job_id}_{}_Arbeitsagentur_Ausbildungssuche_{}",
        now.format("%Y-%m-%d"),
        safe_city(city),
        now.format("%H-%M-%S"),
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn replaces_reserved_characters_and_spaces() {
        assert_eq!(safe_city("Frankfurt am Main"), "Frankfurt-am-Main");
        assert_eq!(safe_city(r#"a\b/c:d*e?f"g<h>i|j;k"#), "a-b-c-d-e-f-g-h-i-j-k");
    }

    #[test]
    fn trims_underscores_and_falls_back_when_empty() {
        assert_eq!(safe_city("__Berlin__"), "Berlin");
        assert_eq!(safe_city("___"), "default_city");
        assert_eq!(safe_city(""), "default_city");
    }

    #[test]
    fn stem_has_date_job_city_and_time() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap();
        assert_eq!(
            export_file_stem(now, 7856, "Halle (Saale)"),
            "2024-03-09_7856_Halle-(Saale)_Arbeitsagentur_Ausbildungssuche_14-05-07"
        );
    }
}
