//! ICS document parsing using the icalendar crate's parser.

use icalendar::parser::{Component, Property, read_calendar, unfold};

use super::component::{RawCalendarComponent, RawProperty};
use crate::error::{FeedError, FeedResult};

/// Parse a feed into its components, in feed order.
///
/// A document that cannot be parsed as a whole yields no components at all;
/// the failure is logged and swallowed.
pub fn parse(raw: &str) -> Vec<RawCalendarComponent> {
    match parse_document(raw) {
        Ok(components) => components,
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed calendar feed");
            Vec::new()
        }
    }
}

/// Parse a feed, reporting why a malformed document was rejected.
pub fn parse_document(raw: &str) -> FeedResult<Vec<RawCalendarComponent>> {
    let content = content_lines(raw);

    if !content
        .lines()
        .any(|line| line.eq_ignore_ascii_case("BEGIN:VCALENDAR"))
    {
        return Err(FeedError::Parse("missing BEGIN:VCALENDAR".into()));
    }

    let calendar = read_calendar(&content).map_err(|e| FeedError::Parse(e.to_string()))?;

    let mut components = Vec::new();
    collect_components(&calendar.components, &mut components);
    Ok(components)
}

/// Flatten top-level components. A nested VCALENDAR wrapper is descended
/// into; sub-components such as VALARM stay attached to their parent and
/// are not emitted.
fn collect_components(components: &[Component<'_>], out: &mut Vec<RawCalendarComponent>) {
    for component in components {
        if component.name.as_ref().eq_ignore_ascii_case("VCALENDAR") {
            collect_components(&component.components, out);
            continue;
        }

        out.push(RawCalendarComponent {
            kind: component.name.as_ref().to_ascii_uppercase(),
            properties: component.properties.iter().map(to_raw_property).collect(),
        });
    }
}

fn to_raw_property(prop: &Property<'_>) -> RawProperty {
    RawProperty {
        name: prop.name.as_ref().to_ascii_uppercase(),
        params: prop
            .params
            .iter()
            .map(|p| {
                (
                    p.key.as_ref().to_ascii_uppercase(),
                    p.val.as_ref().map(|v| v.to_string()).unwrap_or_default(),
                )
            })
            .collect(),
        value: prop.val.to_string(),
    }
}

/// Unfold `raw` and keep only its content lines, each ending in `\n`.
///
/// Feeds served without a charset keep a leading byte-order mark in the
/// response text, which hides the `BEGIN:VCALENDAR` line. Blank lines and
/// trailing whitespace from hand-edited feeds are not content lines, so
/// `read_calendar` never sees them.
fn content_lines(raw: &str) -> String {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut out = String::with_capacity(raw.len());
    for line in unfold(raw).lines().map(str::trim_end) {
        if !line.is_empty() {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//School//Calendar//EN\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/London\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:one@school\r\n\
SUMMARY:Year 7 Parents' \r\n Evening\r\n\
DTSTART;TZID=Europe/London:20250115T180000\r\n\
DTEND;TZID=Europe/London:20250115T200000\r\n\
LOCATION:Main Hall\r\n\
BEGIN:VALARM\r\n\
TRIGGER:-PT30M\r\n\
ACTION:DISPLAY\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
BEGIN:VTODO\r\n\
SUMMARY:Not an event\r\n\
END:VTODO\r\n\
BEGIN:VEVENT\r\n\
UID:two@school\r\n\
SUMMARY:INSET Day\r\n\
DTSTART;VALUE=DATE:20250203\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn test_parse_keeps_feed_order_and_kinds() {
        let components = parse(FEED);
        let kinds: Vec<&str> = components.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, vec!["VTIMEZONE", "VEVENT", "VTODO", "VEVENT"]);
    }

    #[test]
    fn test_parse_unfolds_and_keeps_params() {
        let components = parse(FEED);
        let event = &components[1];

        assert_eq!(
            event.find("SUMMARY").map(|p| p.value.as_str()),
            Some("Year 7 Parents' Evening")
        );
        let dtstart = event.find("DTSTART").expect("Should have DTSTART");
        assert_eq!(dtstart.param("TZID"), Some("Europe/London"));
        assert_eq!(dtstart.value, "20250115T180000");
    }

    #[test]
    fn test_parse_does_not_emit_nested_alarms() {
        let components = parse(FEED);
        assert!(components.iter().all(|c| c.kind != "VALARM"));
    }

    #[test]
    fn test_parse_accepts_lf_only_documents() {
        let feed = "BEGIN:VCALENDAR\nVERSION:2.0\nBEGIN:VEVENT\nSUMMARY:Trip\nDTSTART:20250301\nEND:VEVENT\nEND:VCALENDAR";
        let components = parse(feed);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].find("SUMMARY").map(|p| p.value.as_str()), Some("Trip"));
    }

    #[test]
    fn test_plain_text_yields_nothing() {
        assert!(parse("Service temporarily unavailable").is_empty());
        assert!(parse("").is_empty());
        assert!(parse("<html><body>Not found</body></html>").is_empty());
    }

    #[test]
    fn test_parse_document_reports_reason() {
        let err = parse_document("hello").unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn test_parsing_is_repeatable() {
        assert_eq!(parse(FEED), parse(FEED));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let feed = format!("\u{feff}{FEED}");
        let components = parse(&feed);

        assert_eq!(components.len(), 4);
        assert_eq!(
            components[3].find("SUMMARY").map(|p| p.value.as_str()),
            Some("INSET Day")
        );
    }

    #[test]
    fn test_blank_lines_and_trailing_whitespace() {
        let feed = "BEGIN:VCALENDAR  \r\n\r\nVERSION:2.0\r\n\r\nBEGIN:VEVENT\r\nSUMMARY:Trip\r\n\tto the coast\r\nDTSTART:20250301\r\nEND:VEVENT \r\nEND:VCALENDAR\r\n\r\n";
        let components = parse(feed);

        assert_eq!(components.len(), 1);
        assert_eq!(
            components[0].find("SUMMARY").map(|p| p.value.as_str()),
            Some("Tripto the coast")
        );
    }

    #[test]
    fn test_content_lines() {
        assert_eq!(
            content_lines("\u{feff}A:1\r\n\r\nB:2 \r\n  continued\r\n"),
            "A:1\nB:2  continued\n"
        );
    }
}
