use tracing::{debug, warn};

use crate::chart::{Chart, Note, Tier, clamp_time, detect_tier};
use crate::config::defaults;
use crate::error::{Error, Result};

/// Hit-object type bit marking a hold.
const LONG_NOTE_FLAG: u32 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Metadata,
    Difficulty,
    TimingPoints,
    HitObjects,
    Other,
}

impl Section {
    fn from_header(name: &str) -> Self {
        match name {
            "Metadata" => Self::Metadata,
            "Difficulty" => Self::Difficulty,
            "TimingPoints" => Self::TimingPoints,
            "HitObjects" => Self::HitObjects,
            _ => Self::Other,
        }
    }
}

/// A hit-object row before column assignment; `x` needs the final key count.
struct RawObject {
    x: f64,
    time: i64,
    end_time: Option<i64>,
}

/// Parse chart text, detecting the tier from the `Version` name.
pub fn ingest(text: &str) -> Result<Chart> {
    ingest_inner(text, None)
}

/// Parse chart text with a declared tier, skipping name-based detection.
pub fn ingest_with_tier(text: &str, tier: Tier) -> Result<Chart> {
    ingest_inner(text, Some(tier))
}

fn ingest_inner(text: &str, declared: Option<Tier>) -> Result<Chart> {
    let mut section: Option<Section> = None;
    let mut saw_section = false;

    let mut name = String::new();
    let mut hp = defaults::HP;
    let mut od = defaults::OD;
    let mut columns = defaults::COLUMNS;
    let mut bpm: Option<f64> = None;
    let mut objects: Vec<RawObject> = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = Some(Section::from_header(header.trim()));
            saw_section = true;
            continue;
        }

        match section {
            Some(Section::Metadata) => {
                if let Some(("Version", value)) = split_key_value(line) {
                    name = value.to_string();
                }
            }
            Some(Section::Difficulty) => match split_key_value(line) {
                Some(("HPDrainRate", value)) => hp = parse_or(value, defaults::HP, "HPDrainRate"),
                Some(("OverallDifficulty", value)) => {
                    od = parse_or(value, defaults::OD, "OverallDifficulty")
                }
                Some(("CircleSize", value)) => columns = parse_columns(value),
                _ => {}
            },
            Some(Section::TimingPoints) => {
                if bpm.is_none() {
                    bpm = parse_timing_row(line);
                }
            }
            Some(Section::HitObjects) => match parse_hit_object(line) {
                Some(object) => objects.push(object),
                None => {
                    skipped += 1;
                    debug!("Skipping hit object row: {}", line);
                }
            },
            Some(Section::Other) | None => {}
        }
    }

    if !saw_section {
        return Err(Error::MalformedChart(
            "no section headers found".to_string(),
        ));
    }

    let bpm = bpm.unwrap_or_else(|| {
        warn!("No usable timing point, falling back to {} BPM", defaults::BPM);
        defaults::BPM
    });

    let mut notes: Vec<Note> = objects
        .iter()
        .map(|object| {
            let column = column_for(object.x, columns);
            match object.end_time {
                Some(end) => Note::long(0, object.time, column, end),
                None => Note::tap(0, object.time, column),
            }
        })
        .collect();

    // Stable sort keeps encounter order for chords
    notes.sort_by_key(|n| n.time);
    for (index, note) in notes.iter_mut().enumerate() {
        note.id = index as u32;
    }

    let tier = declared.unwrap_or_else(|| detect_tier(&name));

    debug!(
        "Ingested '{}': {} notes ({} skipped), {} keys, {} BPM, tier {}",
        name,
        notes.len(),
        skipped,
        columns,
        bpm,
        tier
    );

    Ok(Chart {
        name,
        notes,
        bpm,
        columns,
        hp,
        od,
        tier,
    })
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    line.split_once(':').map(|(k, v)| (k.trim(), v.trim()))
}

fn parse_or(value: &str, fallback: f64, field: &str) -> f64 {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            warn!("Invalid {} value '{}', using {}", field, value, fallback);
            fallback
        }
    }
}

fn parse_columns(value: &str) -> u8 {
    let raw = parse_or(value, f64::from(defaults::COLUMNS), "CircleSize").floor();
    raw.clamp(
        f64::from(defaults::MIN_COLUMNS),
        f64::from(defaults::MAX_COLUMNS),
    ) as u8
}

/// BPM from a `time,beatLength,...` row, if the beat length is positive.
fn parse_timing_row(line: &str) -> Option<f64> {
    let beat_length: f64 = line.split(',').nth(1)?.trim().parse().ok()?;
    (beat_length > 0.0).then(|| (60_000.0 / beat_length).round())
}

fn parse_hit_object(line: &str) -> Option<RawObject> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 4 {
        return None;
    }

    let x: f64 = fields[0].trim().parse().ok()?;
    let time = parse_ms(fields[2])?;
    let kind: u32 = fields[3].trim().parse().ok()?;

    let end_time = if kind & LONG_NOTE_FLAG != 0 {
        let end = fields
            .get(5)
            .and_then(|extra| extra.split(':').next())
            .and_then(parse_ms);
        if end.is_none() {
            debug!("Long note at {}ms has no end time, treating as tap", time);
        }
        end
    } else {
        None
    };

    Some(RawObject { x, time, end_time })
}

/// Integer milliseconds; fractional values written by some editors are
/// truncated and out-of-range values clamped.
fn parse_ms(field: &str) -> Option<i64> {
    let field = field.trim();
    field
        .parse::<i64>()
        .ok()
        .or_else(|| field.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64))
        .map(clamp_time)
}

fn column_for(x: f64, columns: u8) -> u8 {
    let raw = (x * f64::from(columns) / defaults::PLAYFIELD_WIDTH).floor();
    raw.clamp(0.0, f64::from(columns - 1)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"osu file format v14

[General]
Mode: 3

[Metadata]
Title:Sample
Version:4K Hard

[Difficulty]
HPDrainRate:8
CircleSize:4
OverallDifficulty:7.5

[TimingPoints]
-50,-100,4,2,0,50,0,0
100,333.333333333333,4,2,0,50,1,0
2000,250,4,2,0,50,1,0

[HitObjects]
64,192,500,1,0,0:0:0:0:
192,192,500,1,0,0:0:0:0:
448,192,300,128,0,900:0:0:0:0:
320,192,700,1,0
bad,row
"#;

    #[test]
    fn test_ingest_sample() {
        let chart = ingest(SAMPLE).unwrap();

        assert_eq!(chart.name, "4K Hard");
        assert_eq!(chart.tier, Tier::Hard);
        assert_eq!(chart.columns, 4);
        assert_eq!(chart.bpm, 180.0);
        assert_eq!(chart.hp, 8.0);
        assert_eq!(chart.od, 7.5);
        assert_eq!(chart.notes.len(), 4);
    }

    #[test]
    fn test_ingest_sorts_and_keeps_chord_order() {
        let chart = ingest(SAMPLE).unwrap();
        let layout: Vec<(i64, u8)> = chart.notes.iter().map(|n| (n.time, n.column)).collect();
        assert_eq!(layout, vec![(300, 3), (500, 0), (500, 1), (700, 2)]);

        let ids: Vec<u32> = chart.notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_ingest_long_note() {
        let chart = ingest(SAMPLE).unwrap();
        let hold = chart.notes[0];
        assert!(hold.is_long());
        assert_eq!(hold.end_time, Some(900));
        assert_eq!(hold.length(), 600);
    }

    #[test]
    fn test_ingest_clamps_extreme_times() {
        let text = "[HitObjects]\n\
            0,192,-9223372036854775808,1,0\n\
            128,192,9223372036854775807,1,0\n\
            256,192,0,128,0,1e30:0:0:0:0:\n";
        let chart = ingest(text).unwrap();

        let times: Vec<i64> = chart.notes.iter().map(|n| n.time).collect();
        assert_eq!(times, vec![-defaults::MAX_TIME_MS, 0, defaults::MAX_TIME_MS]);
        assert_eq!(chart.notes[1].end_time, Some(defaults::MAX_TIME_MS));
    }

    #[test]
    fn test_ingest_defaults() {
        let chart = ingest("[HitObjects]\n0,192,100,1,0\n").unwrap();
        assert_eq!(chart.bpm, defaults::BPM);
        assert_eq!(chart.hp, defaults::HP);
        assert_eq!(chart.od, defaults::OD);
        assert_eq!(chart.columns, defaults::COLUMNS);
        assert_eq!(chart.tier, Tier::Normal);
    }

    #[test]
    fn test_ingest_clamps_columns() {
        let chart = ingest("[Difficulty]\nCircleSize:25\n").unwrap();
        assert_eq!(chart.columns, 18);

        let chart = ingest("[Difficulty]\nCircleSize:0.5\n").unwrap();
        assert_eq!(chart.columns, 1);

        let chart = ingest("[Difficulty]\nCircleSize:7.9\n").unwrap();
        assert_eq!(chart.columns, 7);
    }

    #[test]
    fn test_column_from_x_is_clamped() {
        assert_eq!(column_for(0.0, 4), 0);
        assert_eq!(column_for(511.0, 4), 3);
        assert_eq!(column_for(600.0, 4), 3);
        assert_eq!(column_for(-20.0, 7), 0);
        assert_eq!(column_for(256.0, 7), 3);
    }

    #[test]
    fn test_declared_tier_skips_detection() {
        let chart = ingest_with_tier(SAMPLE, Tier::Easy).unwrap();
        assert_eq!(chart.tier, Tier::Easy);
    }

    #[test]
    fn test_text_without_sections_is_malformed() {
        let result = ingest("just some text\nwithout headers");
        assert!(matches!(result, Err(Error::MalformedChart(_))));
    }
}
