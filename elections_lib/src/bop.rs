//! Chamber balance of power: seats and pickups per party bucket.

use std::collections::BTreeMap;
use std::fmt;

use elections_model::types::Chamber;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::pickup::PickupStatus;

/// Balance-of-power buckets. Every party other than Dem and GOP counts as
/// Other.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BopParty {
    #[serde(rename = "Dem")]
    Dem,
    #[serde(rename = "GOP")]
    Gop,
    #[serde(rename = "Other")]
    Other,
}

impl BopParty {
    pub const ALL: [BopParty; 3] = [BopParty::Dem, BopParty::Gop, BopParty::Other];

    pub fn from_code(code: &str) -> Self {
        match code {
            "Dem" => BopParty::Dem,
            "GOP" => BopParty::Gop,
            _ => BopParty::Other,
        }
    }
}

impl fmt::Display for BopParty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BopParty::Dem => "Dem",
            BopParty::Gop => "GOP",
            BopParty::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PartyCount {
    pub seats: i64,
    pub pickups: i64,
    pub needed: i64,
}

/// One chamber's entry in `top-level-results.json`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ChamberSummary {
    pub total_seats: i64,
    pub majority: i64,
    pub uncalled_races: i64,
    #[serde(flatten)]
    pub parties: BTreeMap<BopParty, PartyCount>,
}

/// Running seat and pickup counts for one chamber.
#[derive(Clone, Debug)]
pub struct BalanceOfPower {
    chamber: Chamber,
    seats: BTreeMap<BopParty, i64>,
    pickups: BTreeMap<BopParty, i64>,
}

impl BalanceOfPower {
    /// Starts from the seats held before any race is called.
    pub fn new(chamber: Chamber, prior: &BTreeMap<BopParty, i64>) -> Self {
        let mut seats: BTreeMap<BopParty, i64> = BopParty::ALL.iter().map(|p| (*p, 0)).collect();
        for (party, held) in prior {
            *seats.entry(*party).or_insert(0) += held;
        }
        Self {
            chamber,
            seats,
            pickups: BopParty::ALL.iter().map(|p| (*p, 0)).collect(),
        }
    }

    pub fn chamber(&self) -> Chamber {
        self.chamber
    }

    /// Records one called seat won by `party_code`. A pickup moves one pickup
    /// from the outgoing party to the winner.
    pub fn record(
        &mut self,
        party_code: &str,
        pickup: PickupStatus,
        current_party: Option<&str>,
    ) -> Result<(), RenderError> {
        if self.called() >= self.chamber.total_seats() {
            return Err(RenderError::SeatOverflow {
                chamber: self.chamber,
            });
        }
        let winner = BopParty::from_code(party_code);
        *self.seats.entry(winner).or_insert(0) += 1;

        if let (true, Some(previous)) = (pickup.is_pickup(), current_party) {
            *self.pickups.entry(winner).or_insert(0) += 1;
            *self.pickups.entry(BopParty::from_code(previous)).or_insert(0) -= 1;
        }
        Ok(())
    }

    fn called(&self) -> i64 {
        self.seats.values().sum()
    }

    pub fn uncalled_races(&self) -> i64 {
        self.chamber.total_seats() - self.called()
    }

    pub fn seats(&self, party: BopParty) -> i64 {
        self.seats.get(&party).copied().unwrap_or(0)
    }

    pub fn pickups(&self, party: BopParty) -> i64 {
        self.pickups.get(&party).copied().unwrap_or(0)
    }

    /// Always zero: every pickup is matched by a loss.
    pub fn pickup_sum(&self) -> i64 {
        self.pickups.values().sum()
    }

    pub fn summary(&self) -> ChamberSummary {
        let majority = self.chamber.majority();
        let parties = BopParty::ALL
            .iter()
            .map(|p| {
                let seats = self.seats(*p);
                (
                    *p,
                    PartyCount {
                        seats,
                        pickups: self.pickups(*p),
                        needed: (majority - seats).max(0),
                    },
                )
            })
            .collect();
        ChamberSummary {
            total_seats: self.chamber.total_seats(),
            majority,
            uncalled_races: self.uncalled_races(),
            parties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn senate_prior() -> BTreeMap<BopParty, i64> {
        [(BopParty::Dem, 34), (BopParty::Gop, 30), (BopParty::Other, 2)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_prior_composition_seeds_seats() {
        let bop = BalanceOfPower::new(Chamber::Senate, &senate_prior());
        let summary = bop.summary();
        assert_eq!(summary.uncalled_races, 34);
        assert_eq!(summary.majority, 51);
        assert_eq!(summary.parties[&BopParty::Dem].needed, 17);
        assert_eq!(summary.parties[&BopParty::Gop].needed, 21);
    }

    #[test]
    fn test_pickups_sum_to_zero() {
        let mut bop = BalanceOfPower::new(Chamber::Senate, &senate_prior());
        let sequence = [
            ("Dem", PickupStatus::Pickup, Some("GOP")),
            ("GOP", PickupStatus::Hold, Some("GOP")),
            ("Ind", PickupStatus::Pickup, Some("Dem")),
            ("GOP", PickupStatus::Pickup, Some("Lib")),
            ("Dem", PickupStatus::Unknown, None),
            ("Grn", PickupStatus::Pickup, Some("Ind")),
        ];
        for (party, status, previous) in sequence {
            bop.record(party, status, previous).unwrap();
            assert_eq!(bop.pickup_sum(), 0);
        }
        assert_eq!(bop.pickups(BopParty::Dem), 0);
        assert_eq!(bop.pickups(BopParty::Gop), 0);
        assert_eq!(bop.seats(BopParty::Dem), 36);
        assert_eq!(bop.seats(BopParty::Other), 4);
        assert_eq!(bop.uncalled_races(), 28);
    }

    #[test]
    fn test_needed_never_negative() {
        let prior = [(BopParty::Gop, 60)].into_iter().collect();
        let summary = BalanceOfPower::new(Chamber::Senate, &prior).summary();
        assert_eq!(summary.parties[&BopParty::Gop].needed, 0);
    }

    #[test]
    fn test_seat_overflow() {
        let prior = [(BopParty::Dem, 100)].into_iter().collect();
        let mut bop = BalanceOfPower::new(Chamber::Senate, &prior);
        let err = bop.record("GOP", PickupStatus::Hold, Some("GOP")).unwrap_err();
        assert!(matches!(err, RenderError::SeatOverflow { chamber: Chamber::Senate }));
    }

    #[test]
    fn test_summary_json_shape() {
        let bop = BalanceOfPower::new(Chamber::House, &BTreeMap::new());
        let json = serde_json::to_value(bop.summary()).unwrap();
        assert_eq!(json["total_seats"], 435);
        assert_eq!(json["majority"], 218);
        assert_eq!(json["uncalled_races"], 435);
        assert_eq!(json["Dem"]["needed"], 218);
        assert_eq!(json["Other"]["seats"], 0);
    }
}
