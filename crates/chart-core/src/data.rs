// File: crates/chart-core/src/data.rs
// Summary: CSV data source; header-indexed rows coerced into typed records.

use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::record::{BrandRecord, SizeRecord, TechRecord};

/// Brand counts, relative to the site root.
pub const BRAND_CSV: &str = "data/tvBrandCount.csv";
/// Screen-size counts, relative to the site root.
pub const SIZE_CSV: &str = "data/screenSize.csv";
/// Screen-technology counts and shares, relative to the site root.
pub const TECH_CSV: &str = "data/screenTech.csv";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed CSV in {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}: missing column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{}:{line}: column `{column}` is not a valid number: {value:?}", path.display())]
    InvalidNumber {
        path: PathBuf,
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Anything that yields an ordered sequence of records.
pub trait DataSource {
    type Record;
    fn load(&self) -> Result<Vec<Self::Record>, DataError>;
}

/// A field that failed numeric coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub column: &'static str,
    pub value: String,
}

/// One CSV row with its declared columns resolved by header name.
pub struct Row<'a> {
    record: &'a csv::StringRecord,
    columns: &'a [(&'static str, usize)],
}

impl<'a> Row<'a> {
    /// Trimmed text of the `i`-th declared column.
    pub fn text(&self, i: usize) -> &'a str {
        let (_, ix) = self.columns[i];
        self.record.get(ix).map(str::trim).unwrap_or("")
    }

    /// Non-negative integer; whole-valued decimals such as `12.0` are accepted.
    pub fn count(&self, i: usize) -> Result<u64, FieldError> {
        let raw = self.text(i);
        if let Ok(n) = raw.parse::<u64>() {
            return Ok(n);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(v as u64),
            _ => Err(self.field_error(i)),
        }
    }

    pub fn integer(&self, i: usize) -> Result<u32, FieldError> {
        let n = self.count(i)?;
        u32::try_from(n).map_err(|_| self.field_error(i))
    }

    pub fn number(&self, i: usize) -> Result<f64, FieldError> {
        match self.text(i).parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.field_error(i)),
        }
    }

    fn field_error(&self, i: usize) -> FieldError {
        FieldError { column: self.columns[i].0, value: self.text(i).to_string() }
    }
}

/// Row shape of one CSV file.
pub trait FromRow: Sized {
    /// Header names, in the order `from_row` indexes them.
    const COLUMNS: &'static [&'static str];
    fn from_row(row: &Row<'_>) -> Result<Self, FieldError>;
}

impl FromRow for BrandRecord {
    const COLUMNS: &'static [&'static str] = &["brand", "count"];
    fn from_row(row: &Row<'_>) -> Result<Self, FieldError> {
        Ok(Self { brand: row.text(0).to_string(), count: row.count(1)? })
    }
}

impl FromRow for SizeRecord {
    const COLUMNS: &'static [&'static str] = &["size", "count"];
    fn from_row(row: &Row<'_>) -> Result<Self, FieldError> {
        Ok(Self { size: row.integer(0)?, count: row.count(1)? })
    }
}

impl FromRow for TechRecord {
    const COLUMNS: &'static [&'static str] = &["technology", "count", "percentage"];
    fn from_row(row: &Row<'_>) -> Result<Self, FieldError> {
        Ok(Self { technology: row.text(0).to_string(), count: row.count(1)?, percentage: row.number(2)? })
    }
}

/// Delimited file on disk, decoded into `R` rows.
#[derive(Clone, Debug)]
pub struct CsvSource<R> {
    path: PathBuf,
    delimiter: u8,
    _record: PhantomData<fn() -> R>,
}

impl<R: FromRow> CsvSource<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), delimiter: b',', _record: PhantomData }
    }

    /// `relative` resolved against a site root (e.g. `root/data/screenSize.csv`).
    pub fn under(root: impl AsRef<Path>, relative: &str) -> Self {
        Self::new(root.as_ref().join(relative))
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Decode rows from any reader; `path` is only used for error messages.
    pub fn read_from<Rd: io::Read>(&self, reader: Rd) -> Result<Vec<R>, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .from_reader(reader);
        self.decode(&mut rdr)
    }

    fn decode<Rd: io::Read>(&self, rdr: &mut csv::Reader<Rd>) -> Result<Vec<R>, DataError> {
        let headers = rdr
            .headers()
            .map_err(|source| DataError::Csv { path: self.path.clone(), source })?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect::<Vec<_>>();
        debug!(path = %self.path.display(), ?headers, "csv headers");

        let mut columns = Vec::with_capacity(R::COLUMNS.len());
        for &name in R::COLUMNS {
            let ix = headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DataError::MissingColumn { path: self.path.clone(), column: name })?;
            columns.push((name, ix));
        }

        let mut out = Vec::new();
        for rec in rdr.records() {
            let rec = rec.map_err(|source| DataError::Csv { path: self.path.clone(), source })?;
            let line = rec.position().map(|p| p.line()).unwrap_or(0);
            let row = Row { record: &rec, columns: &columns };
            let value = R::from_row(&row).map_err(|e| DataError::InvalidNumber {
                path: self.path.clone(),
                line,
                column: e.column,
                value: e.value,
            })?;
            out.push(value);
        }
        Ok(out)
    }
}

impl<R: FromRow> DataSource for CsvSource<R> {
    type Record = R;

    fn load(&self) -> Result<Vec<R>, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .map_err(|source| DataError::Open { path: self.path.clone(), source })?;
        let rows = self.decode(&mut rdr)?;
        info!(path = %self.path.display(), rows = rows.len(), "loaded csv");
        Ok(rows)
    }
}
