use crate::models::Candidate;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Columns the roster source must provide
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "person_name",
    "email",
    "followers",
    "platform",
    "category",
    "country",
    "hashtags",
];

/// Errors that can occur while loading the roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Dataset not found at {0}")]
    NotFound(String),

    #[error("Malformed roster: {0}")]
    DataFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable, ordered candidate table
#[derive(Debug, Clone, Default)]
pub struct Roster {
    candidates: Vec<Candidate>,
    source: String,
}

impl Roster {
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            source: "memory".to_string(),
        }
    }

    /// Load and normalize a roster from a CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RosterError::NotFound(path.display().to_string()));
        }

        let file = std::fs::File::open(path)?;
        let mut roster = Self::from_reader(file)?;
        roster.source = path.display().to_string();

        tracing::info!("Loaded {} rows from {}", roster.len(), roster.source);
        Ok(roster)
    }

    /// Parse CSV content with a header row
    ///
    /// Missing text cells become empty strings and `followers` is coerced to a
    /// non-negative integer, with anything unparseable becoming 0.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RosterError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        let mut missing = Vec::new();

        for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS.iter()) {
            match headers.iter().position(|h| h == *column) {
                Some(idx) => *slot = idx,
                None => missing.push(*column),
            }
        }

        if !missing.is_empty() {
            return Err(RosterError::DataFormat(format!(
                "CSV missing columns: {}",
                missing.join(", ")
            )));
        }

        let [name, email, followers, platform, category, country, hashtags] = positions;

        let mut candidates = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let field = |idx: usize| record.get(idx).unwrap_or("").to_string();

            candidates.push(Candidate::new(
                field(name),
                field(email),
                coerce_audience_size(record.get(followers).unwrap_or("")),
                field(platform),
                field(category),
                field(country),
                field(hashtags),
            ));
        }

        Ok(Self {
            candidates,
            source: "reader".to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    /// Where the roster was loaded from
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Coerce a raw `followers` cell into a non-negative count
#[inline]
pub fn coerce_audience_size(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        _ => 0,
    }
}
