//! Readers for survey point text files.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use civil_cad::{geometry::Point3, PointRecord};
use log::{info, warn};

/// Column order of a point file. `P` point number, `N` northing, `E`
/// easting, `Z` elevation, `D` description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFileFormat {
    PNEZD,
    PENZD,
    PNEZ,
    PENZ,
    NEZ,
    ENZ,
    NEZD,
    ENZD,
    /// Comma separated PNEZD with a header row.
    Csv,
}

impl PointFileFormat {
    pub const ALL: [PointFileFormat; 9] = [
        Self::PNEZD,
        Self::PENZD,
        Self::PNEZ,
        Self::PENZ,
        Self::NEZ,
        Self::ENZ,
        Self::NEZD,
        Self::ENZD,
        Self::Csv,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::PNEZD => "pnezd",
            Self::PENZD => "penzd",
            Self::PNEZ => "pnez",
            Self::PENZ => "penz",
            Self::NEZ => "nez",
            Self::ENZ => "enz",
            Self::NEZD => "nezd",
            Self::ENZD => "enzd",
            Self::Csv => "csv",
        }
    }

    fn has_number(self) -> bool {
        matches!(self, Self::PNEZD | Self::PENZD | Self::PNEZ | Self::PENZ | Self::Csv)
    }

    fn has_description(self) -> bool {
        matches!(self, Self::PNEZD | Self::PENZD | Self::NEZD | Self::ENZD | Self::Csv)
    }

    fn easting_first(self) -> bool {
        matches!(self, Self::PENZD | Self::PENZ | Self::ENZ | Self::ENZD)
    }

    fn has_header(self) -> bool {
        self == Self::Csv
    }

    /// Fields needed before the optional description.
    fn min_fields(self) -> usize {
        if self.has_number() {
            4
        } else {
            3
        }
    }
}

impl FromStr for PointFileFormat {
    type Err = String;

    /// Case insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name() == lower)
            .ok_or_else(|| format!("unknown point file format '{s}'"))
    }
}

impl fmt::Display for PointFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_ascii_uppercase())
    }
}

/// A row that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub records: Vec<PointRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn positions(&self) -> Vec<Point3> {
        self.records.iter().map(PointRecord::position).collect()
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

fn parse_coord(field: &str, what: &str) -> Result<f64, String> {
    let value: f64 = field
        .parse()
        .map_err(|_| format!("{what} '{field}' is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{what} '{field}' is not finite"))
    }
}

/// Parses one data row. `fallback_number` names points in formats without a
/// point number column.
fn parse_row(fields: &[&str], format: PointFileFormat, fallback_number: usize) -> Result<PointRecord, String> {
    let needed = format.min_fields();
    if fields.len() < needed {
        return Err(format!("expected at least {needed} fields, found {}", fields.len()));
    }
    let (number, coords) = if format.has_number() {
        (fields[0].to_string(), &fields[1..4])
    } else {
        (fallback_number.to_string(), &fields[0..3])
    };
    let (n, e) = if format.easting_first() {
        (coords[1], coords[0])
    } else {
        (coords[0], coords[1])
    };
    let northing = parse_coord(n, "northing")?;
    let easting = parse_coord(e, "easting")?;
    let elevation = parse_coord(coords[2], "elevation")?;
    let description = if format.has_description() && fields.len() > needed {
        fields[needed..].join(" ")
    } else {
        String::new()
    };
    Ok(PointRecord::new(&number, northing, easting, elevation, &description))
}

/// Parses point file `contents`. Malformed rows are skipped and listed in
/// the report.
pub fn parse_points(contents: &str, format: PointFileFormat) -> ImportReport {
    let mut report = ImportReport::default();
    let mut lines = contents.lines().enumerate();
    if format.has_header() {
        lines.next();
    }
    for (i, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_fields(line);
        match parse_row(&fields, format, report.records.len() + 1) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                warn!("skipping line {}: {reason}", i + 1);
                report.skipped.push(SkippedRow { line: i + 1, reason });
            }
        }
    }
    report
}

/// Reads a survey point file using the specified [`PointFileFormat`].
pub fn read_point_file<P: AsRef<Path>>(path: P, format: PointFileFormat) -> io::Result<ImportReport> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let report = parse_points(&contents, format);
    info!(
        "read {} points from {} ({} rows skipped)",
        report.records.len(),
        path.display(),
        report.skipped.len()
    );
    Ok(report)
}

/// Reads surface sample points from a CSV file with a header row and
/// point number, northing, easting, elevation columns.
pub fn read_surface_file<P: AsRef<Path>>(path: P) -> io::Result<ImportReport> {
    read_point_file(path, PointFileFormat::Csv)
}

/// Writes `records` as a CSV point file readable with
/// [`PointFileFormat::Csv`].
pub fn write_points_csv<P: AsRef<Path>>(path: P, records: &[PointRecord]) -> io::Result<()> {
    let mut out = String::from("Point Number,Northing,Easting,Elevation,Description\n");
    for r in records {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            r.point_number, r.northing, r.easting, r.elevation, r.description
        ));
    }
    fs::write(path, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_pnezd_point_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1,100.0,200.0,50.0,TEST").unwrap();
        let report = read_point_file(file.path(), PointFileFormat::PNEZD).unwrap();
        assert_eq!(report.records.len(), 1);
        let p = &report.records[0];
        assert_eq!(p.point_number, "1");
        assert_eq!(p.position(), Point3::new(200.0, 100.0, 50.0));
        assert_eq!(p.description, "TEST");
    }

    #[test]
    fn whitespace_enz_numbers_rows() {
        let report = parse_points("10 20 1.5\n\n11 21 2.5\n", PointFileFormat::ENZ);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[1].point_number, "2");
        assert_eq!(report.records[1].position(), Point3::new(11.0, 21.0, 2.5));
    }

    #[test]
    fn bad_rows_are_skipped() {
        let text = "Point Number,Northing,Easting,Elevation,Description\n\
                    1,0,0,0,IP\n\
                    2,abc,0,0,BAD\n\
                    3,5,5\n\
                    4,5,5,5,CP\n";
        let report = parse_points(text, PointFileFormat::Csv);
        assert_eq!(report.records.len(), 2);
        assert_eq!(
            report.skipped.iter().map(|s| s.line).collect::<Vec<_>>(),
            vec![3, 4]
        );
        assert!(report.skipped[0].reason.contains("northing"));
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("PENZ".parse::<PointFileFormat>(), Ok(PointFileFormat::PENZ));
        assert_eq!("csv".parse::<PointFileFormat>(), Ok(PointFileFormat::Csv));
        assert!("xyz".parse::<PointFileFormat>().is_err());
    }

    #[test]
    fn written_csv_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.csv");
        let records = vec![
            PointRecord::new("1", 10.0, 20.0, 1.0, "IP"),
            PointRecord::new("2", 11.0, 21.0, 2.0, ""),
        ];
        write_points_csv(&path, &records).unwrap();
        let report = read_surface_file(&path).unwrap();
        assert_eq!(report.records, records);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_point_file(dir.path().join("nope.txt"), PointFileFormat::NEZ).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
