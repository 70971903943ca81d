//! Seat pickup detection for Senate and House races.

use elections_model::types::{RaceMeta, RawResult};
use serde::{Serialize, Serializer};

/// Whether a called seat changed party. Serialized as `true`, `false` or
/// `null` when the outgoing party is not known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupStatus {
    Pickup,
    Hold,
    Unknown,
}

impl PickupStatus {
    /// `winner` is the resolved winner flag for `result`.
    pub fn detect(result: &RawResult, winner: bool, meta: Option<&RaceMeta>) -> Self {
        let Some(current_party) = meta.and_then(|m| m.current_party.as_deref()) else {
            return PickupStatus::Unknown;
        };
        if winner && result.party_code() != current_party {
            PickupStatus::Pickup
        } else {
            PickupStatus::Hold
        }
    }

    pub fn is_pickup(&self) -> bool {
        matches!(self, PickupStatus::Pickup)
    }

    pub fn as_option(&self) -> Option<bool> {
        match self {
            PickupStatus::Pickup => Some(true),
            PickupStatus::Hold => Some(false),
            PickupStatus::Unknown => None,
        }
    }
}

impl Serialize for PickupStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_option() {
            Some(flag) => serializer.serialize_bool(flag),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn senate(party: &str) -> RawResult {
        RawResult {
            id: "1".to_string(),
            statepostal: "NH".to_string(),
            party: Some(party.to_string()),
            ..Default::default()
        }
    }

    fn meta(current_party: Option<&str>) -> RaceMeta {
        RaceMeta {
            current_party: current_party.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_pickup_requires_winner_and_party_change() {
        let gop = meta(Some("GOP"));
        assert_eq!(PickupStatus::detect(&senate("Dem"), true, Some(&gop)), PickupStatus::Pickup);
        assert_eq!(PickupStatus::detect(&senate("GOP"), true, Some(&gop)), PickupStatus::Hold);
        assert_eq!(PickupStatus::detect(&senate("Dem"), false, Some(&gop)), PickupStatus::Hold);
    }

    #[test]
    fn test_unknown_without_current_party() {
        assert_eq!(PickupStatus::detect(&senate("Dem"), true, None), PickupStatus::Unknown);
        assert_eq!(
            PickupStatus::detect(&senate("Dem"), true, Some(&meta(None))),
            PickupStatus::Unknown
        );
    }

    #[test]
    fn test_serializes_tri_state() {
        let json = serde_json::to_string(&[
            PickupStatus::Pickup,
            PickupStatus::Hold,
            PickupStatus::Unknown,
        ])
        .unwrap();
        assert_eq!(json, "[true,false,null]");
    }
}
