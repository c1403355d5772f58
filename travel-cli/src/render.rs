//! Plain-text panels for the console.
//!
//! Widths are display columns of the unstyled text and only titles are
//! styled, so ANSI codes and wide glyphs never skew the borders.

use crossterm::style::Stylize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use travel_core::{LocationHit, PlaceDetail, WeatherSnapshot};

const MAX_WIDTH: usize = 76;

/// A horizontal rule with a centered caption.
pub fn rule(caption: &str) -> String {
    let side = MAX_WIDTH.saturating_sub(caption.width() + 2) / 2;
    let bar = "─".repeat(side);
    format!("{bar} {} {bar}", caption.bold())
}

/// Box `lines` under `title`, sized to fit the widest line.
pub fn panel(title: &str, title_style: fn(&str) -> String, lines: &[String]) -> String {
    let lines: Vec<String> = lines.iter().flat_map(|l| wrap(l, MAX_WIDTH)).collect();
    let title_width = title.width();
    let inner = lines
        .iter()
        .map(|l| l.width())
        .chain([title_width + 2])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "╭─ {} {}╮\n",
        title_style(title),
        "─".repeat(inner.saturating_sub(title_width + 1))
    ));
    for line in &lines {
        let pad = inner - line.width();
        out.push_str(&format!("│ {line}{} │\n", " ".repeat(pad)));
    }
    out.push_str(&format!("╰{}╯", "─".repeat(inner + 2)));
    out
}

pub fn location(index: usize, hit: &LocationHit) -> String {
    let title = format!("[{index}] {}", hit.name);
    let mut lines = vec![format!("Coordinates: ({}, {})", hit.point.lat, hit.point.lng)];

    let region: Vec<&str> = [&hit.city, &hit.state, &hit.country]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();
    if !region.is_empty() {
        lines.push(region.join(", "));
    }
    lines.push(format!("{} - {} - {}", hit.osm_type, hit.osm_key, hit.osm_value));

    panel(&title, |t: &str| t.green().to_string(), &lines)
}

pub fn weather(snapshot: &WeatherSnapshot) -> String {
    let (main, description) = snapshot.condition();
    let mut lines = vec![
        format!("{main}. {description}"),
        format!("Temperature: {} °C", snapshot.temperature_c()),
        format!("Feels like: {} °C", snapshot.feels_like_c()),
    ];
    if let Some(humidity) = snapshot.main.humidity {
        lines.push(format!("Humidity: {humidity} %"));
    }
    if let Some(at) = snapshot.observed_at() {
        lines.push(format!("Observed: {} UTC", at.format("%H:%M")));
    }

    panel("Weather", |t: &str| t.blue().to_string(), &lines)
}

pub fn place(detail: &PlaceDetail) -> String {
    let (title, style): (&str, fn(&str) -> String) = if detail.name.trim().is_empty() {
        ("???", |t: &str| t.red().to_string())
    } else {
        (detail.name.as_str(), |t: &str| t.green().to_string())
    };

    let address = detail
        .address
        .as_ref()
        .map(|a| a.components().collect::<Vec<_>>().join(", "))
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| "No address provided".to_string());
    let info = detail.description.as_deref().unwrap_or("No info provided");

    let mut lines = vec![
        format!("Rate: {}", detail.rate),
        format!("Address: {address}"),
        format!("Info: {info}"),
        "Tags:".to_string(),
    ];
    lines.extend(detail.tags().map(str::to_string));

    panel(title, style, &lines)
}

/// Greedy word wrap on display columns. Words wider than `width` are split.
fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.width() <= width {
        return vec![line.to_string()];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        for piece in split_wide(word, width) {
            let needed = current.width() + usize::from(!current.is_empty()) + piece.width();
            if needed > width && !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Cut `word` into pieces no wider than `width` columns.
fn split_wide(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut used = 0;
    for c in word.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            used = 0;
        }
        piece.push(c);
        used += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_core::{Address, Point};

    fn plain(s: &str) -> String {
        // Drop CSI sequences so assertions see the visible text.
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn detail() -> PlaceDetail {
        PlaceDetail {
            xid: "N1".into(),
            name: "Museum".into(),
            address: None,
            rate: "3h".into(),
            kinds: "museums,cultural".into(),
            description: None,
        }
    }

    #[test]
    fn panel_lines_share_one_width() {
        let lines = ["short".to_string(), "a longer line".to_string()];
        let out = plain(&panel("T", |t: &str| t.to_string(), &lines));
        let widths: Vec<_> = out.lines().map(|l| l.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{out}");
        assert!(out.starts_with("╭─ T "));
    }

    #[test]
    fn weather_panel_shows_celsius() {
        let snapshot: WeatherSnapshot = serde_json::from_value(serde_json::json!({
            "weather": [{"main": "Clear", "description": "clear sky"}],
            "main": {"temp": 293.0, "feels_like": 292.0}
        }))
        .unwrap();

        let out = plain(&weather(&snapshot));
        assert!(out.contains("Clear. clear sky"));
        assert!(out.contains("Temperature: 20 °C"));
        assert!(out.contains("Feels like: 19 °C"));
        assert!(!out.contains("Humidity"));
    }

    #[test]
    fn location_panel_lists_index_and_classification() {
        let hit = LocationHit {
            name: "Berlin".into(),
            osm_type: "R".into(),
            osm_key: "place".into(),
            osm_value: "city".into(),
            point: Point { lat: 52.52, lng: 13.405 },
            country: Some("Deutschland".into()),
            state: None,
            city: None,
        };

        let out = plain(&location(0, &hit));
        assert!(out.contains("[0] Berlin"));
        assert!(out.contains("Coordinates: (52.52, 13.405)"));
        assert!(out.contains("Deutschland"));
        assert!(out.contains("R - place - city"));
    }

    #[test]
    fn place_panel_uses_placeholders() {
        let mut d = detail();
        d.name = String::new();

        let out = plain(&place(&d));
        assert!(out.contains("???"));
        assert!(out.contains("Address: No address provided"));
        assert!(out.contains("Info: No info provided"));
        assert!(out.contains("│ museums"));
        assert!(out.contains("│ cultural"));
    }

    #[test]
    fn place_panel_joins_address_components() {
        let mut d = detail();
        d.address = Some(Address {
            country: Some("Deutschland".into()),
            road: Some("Pariser Platz".into()),
            ..Address::default()
        });
        d.description = Some("Landmark".into());

        let out = plain(&place(&d));
        assert!(out.contains("Address: Deutschland, Pariser Platz"));
        assert!(out.contains("Info: Landmark"));
    }

    #[test]
    fn wrap_breaks_on_words() {
        let lines = wrap("aaa bbb ccc", 7);
        assert_eq!(lines, ["aaa bbb", "ccc"]);
        assert_eq!(wrap("abcdefghij", 4), ["abcd", "efgh", "ij"]);
        assert_eq!(wrap("fits", 10), ["fits"]);
    }

    #[test]
    fn wide_glyphs_keep_borders_aligned() {
        let mut d = detail();
        d.name = "東京タワー".into();
        d.description = Some("展望台 🗼 から 東京 を 一望".into());

        let out = plain(&place(&d));
        let widths: Vec<_> = out.lines().map(|l| l.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{out}");
    }

    #[test]
    fn wrap_counts_columns_not_chars() {
        // Each ideograph is two columns wide.
        assert_eq!(wrap("東京東京東京", 4), ["東京", "東京", "東京"]);
        assert!(wrap("東京タワー 展望台", 10).iter().all(|l| l.width() <= 10));
    }
}
