//! Explicit field projections for published artifacts.

/// Fields every artifact publishes.
const COMMON: &[&str] = &[
    "electtotal",
    "electwon",
    "first",
    "id",
    "last",
    "lastupdated",
    "level",
    "officename",
    "party",
    "precinctsreporting",
    "precinctsreportingpct",
    "precinctstotal",
    "raceid",
    "statename",
    "statepostal",
    "votepct",
    "votecount",
    "winner",
];

const PRESIDENTIAL_STATE: &[&str] = &["reportingunitname"];
const PRESIDENTIAL_COUNTY: &[&str] = &["reportingunitname", "fipscode"];
const GOVERNOR: &[&str] = &["incumbent"];
const SENATE: &[&str] = &["incumbent", "runoff"];
const HOUSE: &[&str] = &["incumbent", "runoff", "seatname", "seatnum"];
const BALLOT_MEASURE: &[&str] = &["seatname", "is_ballot_measure"];

/// Which raw result fields an artifact carries. `Full` publishes every field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    Full,
    PresidentialState,
    PresidentialCounty,
    Governor,
    Senate,
    House,
    BallotMeasure,
}

impl Projection {
    fn extra(&self) -> &'static [&'static str] {
        match self {
            Projection::Full => &[],
            Projection::PresidentialState => PRESIDENTIAL_STATE,
            Projection::PresidentialCounty => PRESIDENTIAL_COUNTY,
            Projection::Governor => GOVERNOR,
            Projection::Senate => SENATE,
            Projection::House => HOUSE,
            Projection::BallotMeasure => BALLOT_MEASURE,
        }
    }

    /// Returns true if `field` is published under this projection.
    pub fn includes(&self, field: &str) -> bool {
        match self {
            Projection::Full => true,
            _ => COMMON.contains(&field) || self.extra().contains(&field),
        }
    }

    /// Keeps only the projected keys of a serialized result, preserving the
    /// record's own field order.
    pub fn apply(
        &self,
        mut fields: serde_json::Map<String, serde_json::Value>,
    ) -> serde_json::Map<String, serde_json::Value> {
        if *self != Projection::Full {
            fields.retain(|key, _| self.includes(key));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn county_projection_adds_fips() {
        assert!(Projection::PresidentialCounty.includes("fipscode"));
        assert!(!Projection::PresidentialState.includes("fipscode"));
        assert!(Projection::PresidentialState.includes("reportingunitname"));
    }

    #[test]
    fn full_projection_keeps_everything() {
        assert!(Projection::Full.includes("polid"));
        assert!(!Projection::Senate.includes("polid"));
    }

    #[test]
    fn apply_preserves_order() {
        let mut fields = serde_json::Map::new();
        fields.insert("id".to_string(), "1".into());
        fields.insert("polid".to_string(), "9".into());
        fields.insert("raceid".to_string(), "7".into());
        let projected = Projection::Governor.apply(fields);
        let keys: Vec<&String> = projected.keys().collect();
        assert_eq!(keys, vec!["id", "raceid"]);
    }
}
