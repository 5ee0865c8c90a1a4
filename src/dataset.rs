use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use fake::Fake;
use fake::faker::address::raw::CityName;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::columns::ColumnId;
use crate::domain::TVError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: String,
    /// Kept as given, parsed only when compared.
    pub registered_date: String,
    pub is_private: bool,
}

/// The value of a row in one column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Integer(u64),
    Text(Cow<'a, str>),
    Bool(bool),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Bool(true) => f.write_str("True"),
            FieldValue::Bool(false) => f.write_str("False"),
        }
    }
}

impl Row {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn value(&self, column: ColumnId) -> FieldValue<'_> {
        match column {
            ColumnId::Id => FieldValue::Integer(self.id),
            ColumnId::FirstName => FieldValue::Text(Cow::Borrowed(&self.first_name)),
            ColumnId::LastName => FieldValue::Text(Cow::Borrowed(&self.last_name)),
            ColumnId::FullName => FieldValue::Text(Cow::Owned(self.full_name())),
            ColumnId::Email => FieldValue::Text(Cow::Borrowed(&self.email)),
            ColumnId::City => FieldValue::Text(Cow::Borrowed(&self.city)),
            ColumnId::RegisteredDate => FieldValue::Text(Cow::Borrowed(&self.registered_date)),
            ColumnId::IsPrivate => FieldValue::Bool(self.is_private),
        }
    }

    /// `None` if the stored date is not in a recognised format.
    pub fn registered_at(&self) -> Option<NaiveDateTime> {
        parse_date(&self.registered_date)
    }
}

fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[derive(Debug)]
enum FileType {
    CSV,
    PARQUET,
    ARROW,
}

// Stored fields in file order: (camelCase, snake_case)
const FIELDS: [(&str, &str); 7] = [
    ("id", "id"),
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("email", "email"),
    ("city", "city"),
    ("registeredDate", "registered_date"),
    ("isPrivate", "is_private"),
];

/// Immutable, ordered rows. Cloning shares the rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    rows: Arc<[Row]>,
}

impl Dataset {
    pub fn from_rows(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows: rows.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in `range`, clamped to the dataset.
    pub fn slice(&self, range: Range<usize>) -> &[Row] {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        &self.rows[start..end]
    }

    /// Deterministic sample people; the same seed always gives the same rows.
    pub fn generate(nrows: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let rows = (1..=nrows as u64)
            .map(|id| {
                let first_name: String = FirstName(EN).fake_with_rng(&mut rng);
                let last_name: String = LastName(EN).fake_with_rng(&mut rng);
                let city: String = CityName(EN).fake_with_rng(&mut rng);
                let email = format!(
                    "{}.{}@example.com",
                    first_name.to_lowercase(),
                    last_name.to_lowercase()
                );
                let registered_date = format!(
                    "{:04}-{:02}-{:02}",
                    rng.random_range(2015..=2024),
                    rng.random_range(1..=12),
                    rng.random_range(1..=28)
                );
                Row {
                    id,
                    first_name,
                    last_name,
                    email,
                    city,
                    registered_date,
                    is_private: rng.random_bool(0.25),
                }
            })
            .collect();
        debug!("Generated {nrows} rows with seed {seed}");
        Self::from_rows(format!("sample-{seed}"), rows)
    }

    pub fn load(path: &Path) -> Result<Self, TVError> {
        let path = Self::check_file(path)?;
        let frame = match Self::detect_file_type(&path)? {
            FileType::CSV => Self::load_csv(&path)?,
            FileType::PARQUET => Self::load_parquet(&path)?,
            FileType::ARROW => Self::load_arrow(&path)?,
        };

        let start_time = Instant::now();
        let df = frame.collect()?;
        let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();

        // Every field is read as strings in its own thread, then parsed row by row.
        let columns: Result<Vec<Vec<String>>, TVError> = FIELDS
            .as_slice()
            .par_iter()
            .map(|field| {
                let name = Self::resolve_column(&names, field)?;
                Self::load_column(&df, name)
            })
            .collect();
        let columns = columns?;

        let rows = (0..df.height())
            .map(|ridx| Self::build_row(&columns, ridx))
            .collect::<Result<Vec<Row>, TVError>>()?;

        info!(
            "Loaded {} rows from {} in {}ms",
            rows.len(),
            path.display(),
            start_time.elapsed().as_millis()
        );
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("???")
            .to_string();
        Ok(Self::from_rows(name, rows))
    }

    fn resolve_column<'a>(names: &'a [String], field: &(&str, &str)) -> Result<&'a str, TVError> {
        let (camel, snake) = *field;
        names
            .iter()
            .find(|n| n.as_str() == camel || n.as_str() == snake)
            .map(String::as_str)
            .ok_or_else(|| TVError::MissingColumn(camel.to_string()))
    }

    fn load_column(df: &DataFrame, col_name: &str) -> Result<Vec<String>, TVError> {
        let col = df.column(col_name)?.cast(&DataType::String)?;
        let series = col.str()?;
        Ok(series
            .into_iter()
            .map(|value| value.map(str::to_string).unwrap_or_default())
            .collect())
    }

    fn build_row(columns: &[Vec<String>], ridx: usize) -> Result<Row, TVError> {
        let cell = |field: usize| columns[field][ridx].as_str();
        let invalid = |field: usize| TVError::InvalidValue {
            column: FIELDS[field].0.to_string(),
            row: ridx,
            value: cell(field).to_string(),
        };

        let id = cell(0).trim().parse::<u64>().map_err(|_| invalid(0))?;
        let is_private = match cell(6).trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" | "" => false,
            _ => return Err(invalid(6)),
        };
        Ok(Row {
            id,
            first_name: cell(1).to_string(),
            last_name: cell(2).to_string(),
            email: cell(3).to_string(),
            city: cell(4).to_string(),
            registered_date: cell(5).to_string(),
            is_private,
        })
    }

    fn check_file(path: &Path) -> Result<PathBuf, TVError> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TVError::FileNotFound,
            ErrorKind::PermissionDenied => TVError::PermissionDenied,
            _ => TVError::IoError(e),
        })?;
        if !metadata.is_file() {
            return Err(TVError::LoadingFailed("Not a file!".into()));
        }
        Ok(path.to_path_buf())
    }

    fn detect_file_type(path: &Path) -> Result<FileType, TVError> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_uppercase())
            .as_deref()
        {
            Some("CSV") => Ok(FileType::CSV),
            Some("PARQUET") | Some("PQ") => Ok(FileType::PARQUET),
            Some("ARROW") | Some("IPC") | Some("FEATHER") => Ok(FileType::ARROW),
            _ => Err(TVError::UnknownFileType),
        }
    }

    fn load_csv(path: &Path) -> Result<LazyFrame, PolarsError> {
        LazyCsvReader::new(PlPath::Local(path.into()))
            .with_has_header(true)
            .finish()
    }

    fn load_parquet(path: &Path) -> Result<LazyFrame, PolarsError> {
        LazyFrame::scan_parquet(PlPath::Local(path.into()), ScanArgsParquet::default())
    }

    fn load_arrow(path: &Path) -> Result<LazyFrame, PolarsError> {
        LazyFrame::scan_ipc(
            PlPath::Local(path.into()),
            polars::io::ipc::IpcScanOptions,
            UnifiedScanArgs::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn person(id: u64, first: &str, last: &str, date: &str) -> Row {
        Row {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            city: "Vienna".to_string(),
            registered_date: date.to_string(),
            is_private: id % 2 == 0,
        }
    }

    #[test]
    fn full_name_joins_first_and_last() {
        let row = person(1, "Ada", "Lovelace", "2020-01-01");
        assert_eq!(row.full_name(), "Ada Lovelace");
        assert_eq!(row.value(ColumnId::FullName).to_string(), "Ada Lovelace");
    }

    #[test]
    fn private_flag_displays_as_title_case() {
        assert_eq!(person(2, "A", "B", "").value(ColumnId::IsPrivate).to_string(), "True");
        assert_eq!(person(3, "A", "B", "").value(ColumnId::IsPrivate).to_string(), "False");
    }

    #[rstest]
    #[case("2020-01-01", Some((2020, 1, 1)))]
    #[case("2019-12-31T23:59:59Z", Some((2019, 12, 31)))]
    #[case("2021-06-15T08:30:00", Some((2021, 6, 15)))]
    #[case("03/04/2018", Some((2018, 3, 4)))]
    #[case("someday", None)]
    fn registered_dates_parse(#[case] raw: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let row = person(1, "A", "B", raw);
        let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(row.registered_at().map(|dt| dt.date()), expected);
    }

    #[test]
    fn slice_is_clamped() {
        let data = Dataset::generate(5, 1);
        assert_eq!(data.slice(0..3).len(), 3);
        assert_eq!(data.slice(3..10).len(), 2);
        assert!(data.slice(8..10).is_empty());
    }

    #[test]
    fn generation_is_deterministic() {
        let a = Dataset::generate(20, 7);
        let b = Dataset::generate(20, 7);
        assert_eq!(a.slice(0..20), b.slice(0..20));
        let ids: Vec<u64> = a.slice(0..20).iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
        assert!(a.slice(0..20).iter().all(|r| r.registered_at().is_some()));
    }

    #[test]
    fn loads_csv_with_either_naming() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "id,first_name,lastName,email,city,registeredDate,is_private").unwrap();
        writeln!(file, "1,Ada,Lovelace,ada@example.com,London,1815-12-10,true").unwrap();
        writeln!(file, "2,Alan,Turing,alan@example.com,Wilmslow,1912-06-23,false").unwrap();
        drop(file);

        let data = Dataset::load(&path).unwrap();
        assert_eq!(data.name(), "people.csv");
        assert_eq!(data.len(), 2);
        let rows = data.slice(0..2);
        assert_eq!(rows[0].full_name(), "Ada Lovelace");
        assert!(rows[0].is_private);
        assert_eq!(rows[1].registered_date, "1912-06-23");
        assert!(!rows[1].is_private);
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.csv");
        fs::write(&path, "id,firstName\n1,Ada\n").unwrap();
        assert!(matches!(
            Dataset::load(&path),
            Err(TVError::MissingColumn(_))
        ));
    }

    #[test]
    fn unknown_extension_and_missing_file() {
        assert!(matches!(
            Dataset::load(Path::new("/definitely/not/here.csv")),
            Err(TVError::FileNotFound)
        ));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, "x").unwrap();
        assert!(matches!(Dataset::load(&path), Err(TVError::UnknownFileType)));
    }
}
