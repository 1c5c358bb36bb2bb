use crate::error::{
    AdminResult, BadDateTimeFormatterSnafu, InvalidLocaleSnafu, InvalidTimezoneSnafu,
};
use icu::{
    calendar::preferences::CalendarAlgorithm,
    datetime::{
        DateTimeFormatter, DateTimeFormatterPreferences,
        fieldsets::{YMD, YMDT},
        options::{Alignment, TimePrecision},
        preferences::HourCycle,
    },
    locale::{Locale, locale},
    calendar::Iso,
    time::{ZonedDateTime, TimeZoneInfo, zone::models::AtTime},
};
use jiff::{
    Timestamp, Zoned,
    civil::{Date, DateTime},
    tz::TimeZone,
};
use jiff_icu::ConvertFrom;
use snafu::ResultExt;

pub const MISSING_DATE: &str = "---";
pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Copy, Clone, Debug)]
enum DateFormat {
    ///eg `25 Des 2024`
    MediumYMD,
    ///eg `05/03/24 10.00`
    ShortYMDT,
}

#[derive(Debug, Clone)]
pub struct DateDisplay {
    pub timezone: TimeZone,
    pub locale: Locale,
    dtf_prefs: DateTimeFormatterPreferences,
}

pub fn default_locale() -> Locale {
    locale!("id-ID")
}

impl DateDisplay {
    pub fn new(timezone: String, locale: String) -> AdminResult<Self> {
        let timezone = TimeZone::get(&timezone).context(InvalidTimezoneSnafu { tz: timezone })?;
        let locale =
            Locale::try_from_str(&locale).context(InvalidLocaleSnafu { provided: locale })?;

        let display = Self::from_parts(timezone, locale);
        //surface missing locale data at startup rather than on every row
        let epoch = Timestamp::UNIX_EPOCH.to_zoned(display.timezone.clone());
        display.format(&epoch, DateFormat::MediumYMD)?;
        display.format(&epoch, DateFormat::ShortYMDT)?;

        Ok(display)
    }

    pub fn from_parts(timezone: TimeZone, locale: Locale) -> Self {
        let mut dtf_prefs = DateTimeFormatterPreferences::default();
        dtf_prefs.locale_preferences = (&locale).into();
        dtf_prefs.hour_cycle = Some(HourCycle::H23);
        dtf_prefs.calendar_algorithm = Some(CalendarAlgorithm::Gregory);

        Self {
            timezone,
            locale,
            dtf_prefs,
        }
    }

    #[cfg(test)]
    pub fn utc() -> Self {
        Self::from_parts(TimeZone::UTC, default_locale())
    }

    ///backend values are either instants (`...Z`/offset), civil date-times or bare dates
    fn parse(&self, raw: &str) -> Option<Zoned> {
        if let Ok(ts) = raw.parse::<Timestamp>() {
            return Some(ts.to_zoned(self.timezone.clone()));
        }
        if let Ok(dt) = raw.parse::<DateTime>() {
            return dt.to_zoned(self.timezone.clone()).ok();
        }
        raw.parse::<Date>()
            .ok()
            .and_then(|date| date.to_zoned(self.timezone.clone()).ok())
    }

    //formatters aren't `Sync`, so they get built per call
    fn format(&self, zoned: &Zoned, date_format: DateFormat) -> AdminResult<String> {
        let zdt: ZonedDateTime<Iso, TimeZoneInfo<AtTime>> = ZonedDateTime::convert_from(zoned);

        Ok(match date_format {
            DateFormat::MediumYMD => DateTimeFormatter::try_new(self.dtf_prefs, YMD::medium())
                .context(BadDateTimeFormatterSnafu)?
                .format(&zdt)
                .to_string(),
            DateFormat::ShortYMDT => DateTimeFormatter::try_new(self.dtf_prefs, {
                let mut fieldset = YMDT::short();
                fieldset.alignment = Some(Alignment::Column);
                fieldset.time_precision = Some(TimePrecision::Minute);
                fieldset
            })
            .context(BadDateTimeFormatterSnafu)?
            .format(&zdt)
            .to_string(),
        })
    }

    fn display(&self, raw: Option<&str>, date_format: DateFormat) -> String {
        let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
            return MISSING_DATE.to_string();
        };
        let Some(zoned) = self.parse(raw.trim()) else {
            return INVALID_DATE.to_string();
        };

        match self.format(&zoned, date_format) {
            Ok(formatted) => formatted,
            Err(e) => {
                warn!(?e, ?date_format, "Unable to format date, falling back to ISO");
                zoned.date().to_string()
            }
        }
    }

    pub fn short_date(&self, raw: Option<&str>) -> String {
        self.display(raw, DateFormat::MediumYMD)
    }

    pub fn short_date_time(&self, raw: Option<&str>) -> String {
        self.display(raw, DateFormat::ShortYMDT)
    }
}

///Truncates whatever the backend sent to the `YYYY-MM-DD` form a date input wants.
///Instants are taken in UTC; anything unparseable becomes an empty string.
pub fn calendar_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return ts.to_zoned(TimeZone::UTC).date().to_string();
    }
    if let Ok(dt) = raw.parse::<DateTime>() {
        return dt.date().to_string();
    }
    raw.parse::<Date>()
        .map(|date| date.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instants_truncate_to_utc_calendar_date() {
        assert_eq!(calendar_date("2024-03-05T10:00:00Z"), "2024-03-05");
        assert_eq!(calendar_date("2024-03-05T23:30:00-05:00"), "2024-03-06");
        assert_eq!(calendar_date("2024-03-05T10:00:00"), "2024-03-05");
        assert_eq!(calendar_date("2024-03-05"), "2024-03-05");
    }

    #[test]
    fn garbage_truncates_to_empty() {
        assert_eq!(calendar_date("yesterday"), "");
        assert_eq!(calendar_date(""), "");
    }

    #[test]
    fn short_date_handles_missing_and_invalid() {
        let display = DateDisplay::utc();
        assert_eq!(display.short_date(None), MISSING_DATE);
        assert_eq!(display.short_date(Some("  ")), MISSING_DATE);
        assert_eq!(display.short_date(Some("31/31/2024")), INVALID_DATE);
    }

    #[test]
    fn short_date_follows_configured_locale() {
        let indonesian = DateDisplay::new("UTC".into(), "id-ID".into()).unwrap();
        let christmas = indonesian.short_date(Some("2024-12-25T08:00:00Z"));
        assert!(christmas.contains("25"), "{christmas}");
        assert!(christmas.contains("Des"), "{christmas}");
        assert!(christmas.contains("2024"), "{christmas}");

        let british = DateDisplay::new("UTC".into(), "en-GB".into()).unwrap();
        let christmas = british.short_date(Some("2024-12-25T08:00:00Z"));
        assert!(christmas.contains("Dec"), "{christmas}");
        assert!(!christmas.contains("Des"), "{christmas}");
    }

    #[test]
    fn bare_dates_are_shown_as_given() {
        let display = DateDisplay::from_parts(TimeZone::fixed(jiff::tz::offset(-5)), default_locale());
        let shown = display.short_date(Some("2010-06-01"));
        assert!(shown.starts_with('1'), "{shown}");
        assert!(shown.contains("Jun"), "{shown}");
    }

    #[test]
    fn short_date_time_uses_configured_timezone() {
        let jakarta = DateDisplay::from_parts(TimeZone::fixed(jiff::tz::offset(7)), default_locale());
        let utc = DateDisplay::utc();

        let local = jakarta.short_date_time(Some("2024-03-05T10:00:00Z"));
        assert!(local.contains("17"), "{local}");
        assert!(local.contains("24"), "{local}");
        assert_ne!(local, utc.short_date_time(Some("2024-03-05T10:00:00Z")));
        assert_eq!(jakarta.short_date_time(Some("nope")), INVALID_DATE);
    }

    #[test]
    fn unknown_timezone_or_locale_is_an_error() {
        assert!(DateDisplay::new("Mars/Olympus_Mons".into(), "id-ID".into()).is_err());
        assert!(DateDisplay::new("UTC".into(), "not a locale!".into()).is_err());
    }
}
