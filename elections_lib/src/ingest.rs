//! CSV readers for the ingestion tool's result export and the poll calendar.

use std::io::Read;
use std::path::Path;

use elections_model::types::RawResult;
use tracing::debug;

use crate::config::CalendarRow;

const DEFAULT_CALENDAR: &str = include_str!("../../seed_data/calendar.csv");

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Row numbers count the header as row 1.
    #[error("row {row}: missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },
}

fn open(path: &Path) -> Result<std::fs::File, IngestError> {
    std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn read_results_csv(path: impl AsRef<Path>) -> Result<Vec<RawResult>, IngestError> {
    let path = path.as_ref();
    let results = read_results(open(path)?)?;
    debug!(path = %path.display(), rows = results.len(), "read results csv");
    Ok(results)
}

/// Parses result rows, rejecting any row without an `id` or `statepostal`.
pub fn read_results<R: Read>(reader: R) -> Result<Vec<RawResult>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut results = Vec::new();
    for (index, record) in rdr.deserialize::<RawResult>().enumerate() {
        let result = record?;
        let row = index + 2;
        if result.id.is_empty() {
            return Err(IngestError::MissingField { row, field: "id" });
        }
        if result.statepostal.is_empty() {
            return Err(IngestError::MissingField {
                row,
                field: "statepostal",
            });
        }
        results.push(result);
    }
    Ok(results)
}

pub fn read_calendar_csv(path: impl AsRef<Path>) -> Result<Vec<CalendarRow>, IngestError> {
    read_calendar(open(path.as_ref())?)
}

/// The poll-closing calendar bundled with the crate.
pub fn default_calendar() -> Result<Vec<CalendarRow>, IngestError> {
    read_calendar(DEFAULT_CALENDAR.as_bytes())
}

pub fn read_calendar<R: Read>(reader: R) -> Result<Vec<CalendarRow>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let rows = rdr
        .deserialize::<CalendarRow>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use elections_model::types::Level;

    const HEADER: &str = "id,raceid,officename,level,statepostal,last,party,winner,electwon,votepct,is_ballot_measure\n";

    #[test]
    fn test_read_results() {
        let data = format!(
            "{}{}{}",
            HEADER,
            "1,200,President,state,PA,Trump,GOP,True,20,0.486,False\n",
            "2,200,President,county,PA,Clinton,Dem,,,0.51,\n",
        );
        let results = read_results(data.as_bytes()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].level, Some(Level::State));
        assert_eq!(results[0].winner, Some(true));
        assert_eq!(results[0].electwon, Some(20));
        assert_eq!(results[0].is_ballot_measure, Some(false));
        assert_eq!(results[1].winner, None);
        assert_eq!(results[1].electwon, None);
        assert!(!results[1].raw_winner());
    }

    #[test]
    fn test_missing_statepostal_reports_row() {
        let data = format!(
            "{}{}{}",
            HEADER,
            "1,200,President,state,PA,Trump,GOP,True,20,0.486,False\n",
            "2,200,President,state,,Clinton,Dem,False,0,0.47,False\n",
        );
        match read_results(data.as_bytes()) {
            Err(IngestError::MissingField { row, field }) => {
                assert_eq!(row, 3);
                assert_eq!(field, "statepostal");
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_id_reports_row() {
        let data = format!("{}{}", HEADER, ",200,President,state,PA,Trump,GOP,True,20,0.486,False\n");
        assert!(matches!(
            read_results(data.as_bytes()),
            Err(IngestError::MissingField { row: 2, field: "id" })
        ));
    }

    #[test]
    fn test_read_calendar() {
        let data = "key,time_est,first_results_est\nPA,8:00 PM,8:30 PM\n";
        let rows = read_calendar(data.as_bytes()).unwrap();
        assert_eq!(rows[0].key, "PA");
        assert_eq!(rows[0].first_results_est, "8:30 PM");
    }

    #[test]
    fn test_bundled_calendar_covers_states() {
        let rows = default_calendar().unwrap();
        assert_eq!(rows.len(), 52);
        assert!(rows.iter().any(|r| r.key == "DC"));
    }
}
