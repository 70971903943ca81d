use anyhow::Result;
use elections_lib::bop::{BopParty, ChamberSummary};
use elections_lib::enrich::EnrichedResult;
use elections_lib::types::Chamber;
use elections_lib::{comma_filter, percent_filter, ElectoralCollege};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
pub struct ElectoralRow {
    #[tabled(rename = "Party")]
    #[serde(rename = "Party")]
    party: String,
    #[tabled(rename = "Electoral Votes")]
    #[serde(rename = "Electoral Votes")]
    votes: i64,
}

#[derive(Tabled, Serialize)]
pub struct BopRow {
    #[tabled(rename = "Chamber")]
    #[serde(rename = "Chamber")]
    chamber: String,
    #[tabled(rename = "Party")]
    #[serde(rename = "Party")]
    party: String,
    #[tabled(rename = "Seats")]
    #[serde(rename = "Seats")]
    seats: i64,
    #[tabled(rename = "Pickups")]
    #[serde(rename = "Pickups")]
    pickups: i64,
    #[tabled(rename = "Needed")]
    #[serde(rename = "Needed")]
    needed: i64,
}

#[derive(Tabled, Serialize)]
pub struct RaceRow {
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Race")]
    #[serde(rename = "Race")]
    race: String,
    #[tabled(rename = "Candidate")]
    #[serde(rename = "Candidate")]
    candidate: String,
    #[tabled(rename = "Party")]
    #[serde(rename = "Party")]
    party: String,
    #[tabled(rename = "Votes")]
    #[serde(rename = "Votes")]
    votes: String,
    #[tabled(rename = "Pct")]
    #[serde(rename = "Pct")]
    pct: String,
    #[tabled(rename = "Called")]
    #[serde(rename = "Called")]
    called: String,
}

// -- Row builders --

pub fn build_electoral_rows(college: &ElectoralCollege) -> Vec<ElectoralRow> {
    college
        .totals
        .iter()
        .map(|(party, votes)| ElectoralRow {
            party: party.to_string(),
            votes: *votes,
        })
        .collect()
}

pub fn build_bop_rows(chamber: Chamber, summary: &ChamberSummary) -> Vec<BopRow> {
    BopParty::ALL
        .iter()
        .filter_map(|party| summary.parties.get(party).map(|count| (party, count)))
        .map(|(party, count)| BopRow {
            chamber: chamber.to_string(),
            party: party.to_string(),
            seats: count.seats,
            pickups: count.pickups,
            needed: count.needed,
        })
        .collect()
}

pub fn build_race_rows(results: &[EnrichedResult]) -> Vec<RaceRow> {
    results
        .iter()
        .map(|r| {
            let source = &r.source;
            let called = match (r.npr_winner, r.pickup.map(|p| p.is_pickup())) {
                (true, Some(true)) => "winner (pickup)",
                (true, _) => "winner",
                (false, _) => "",
            };
            RaceRow {
                state: source.statepostal.clone(),
                race: source.raceid.clone().unwrap_or_default(),
                candidate: format!(
                    "{} {}",
                    source.first.as_deref().unwrap_or(""),
                    source.last.as_deref().unwrap_or("")
                )
                .trim()
                .to_string(),
                party: source.party_code().to_string(),
                votes: source.votecount.map(comma_filter).unwrap_or_default(),
                pct: source.votepct.map(percent_filter).unwrap_or_default(),
                called: called.to_string(),
            }
        })
        .collect()
}

// -- Output --

pub fn print_rows<T: Tabled + Serialize>(rows: Vec<T>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elections_lib::bop::BalanceOfPower;
    use elections_lib::electoral::ElectoralVoteTallier;
    use elections_lib::types::{Call, Level, RaceMeta, RawResult, US_SENATE};
    use elections_lib::{Enricher, Projection};

    fn senate_result(id: &str, last: &str, party: &str, winner: bool) -> RawResult {
        RawResult {
            id: id.to_string(),
            raceid: Some("30131".to_string()),
            officename: Some(US_SENATE.to_string()),
            level: Some(Level::State),
            statepostal: "NH".to_string(),
            first: Some("Maggie".to_string()),
            last: Some(last.to_string()),
            party: Some(party.to_string()),
            votecount: Some(354649),
            votepct: Some(0.4801),
            winner: Some(winner),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_electoral_rows_party_order() {
        let college = ElectoralVoteTallier::new().finish();
        let rows = build_electoral_rows(&college);
        let parties: Vec<&str> = rows.iter().map(|r| r.party.as_str()).collect();
        assert_eq!(parties, vec!["Dem", "GOP", "Ind", "Lib", "Grn", "BFA"]);
        assert!(rows.iter().all(|r| r.votes == 0));
    }

    #[test]
    fn test_build_bop_rows_mapping() {
        let prior = [(BopParty::Dem, 34), (BopParty::Gop, 30), (BopParty::Other, 2)]
            .into_iter()
            .collect();
        let summary = BalanceOfPower::new(Chamber::Senate, &prior).summary();
        let rows = build_bop_rows(Chamber::Senate, &summary);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].chamber, "senate");
        assert_eq!(rows[0].party, "Dem");
        assert_eq!(rows[0].seats, 34);
        assert_eq!(rows[0].needed, 17);
    }

    #[test]
    fn test_build_race_rows_formats_votes() {
        let ids = ["1", "2"];
        let calls = ids.iter().map(|id| (id.to_string(), Call::new(*id))).collect();
        let metas = ids
            .iter()
            .map(|id| {
                (
                    id.to_string(),
                    RaceMeta {
                        result_id: id.to_string(),
                        current_party: Some("GOP".to_string()),
                        ..Default::default()
                    },
                )
            })
            .collect();
        let enricher = Enricher::new(calls, metas);
        let results = enricher
            .enrich_all(
                vec![
                    senate_result("1", "Hassan", "Dem", true),
                    senate_result("2", "Ayotte", "GOP", false),
                ],
                Projection::Senate,
            )
            .unwrap();

        let rows = build_race_rows(&results);
        assert_eq!(rows[0].candidate, "Maggie Hassan");
        assert_eq!(rows[0].votes, "354,649");
        assert_eq!(rows[0].pct, "48.0%");
        assert_eq!(rows[0].called, "winner (pickup)");
        assert_eq!(rows[1].called, "");
    }

    #[test]
    fn test_build_race_rows_empty() {
        assert!(build_race_rows(&[]).is_empty());
    }
}
