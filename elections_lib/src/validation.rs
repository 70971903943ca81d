use elections_model::types::Chamber;

use crate::error::InvalidInput;

/// Jurisdictions that publish per-state artifacts: the 50 states and DC.
pub const VALID_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// States that award electoral votes by congressional district.
pub const SPLIT_STATES: &[&str] = &["ME", "NE"];

pub fn is_valid_state(code: &str) -> bool {
    VALID_STATES.contains(&code)
}

pub fn is_split_state(code: &str) -> bool {
    SPLIT_STATES.contains(&code)
}

/// Validate a state postal code: trim, uppercase, check against the 50 states + DC.
pub fn validate_state(input: &str) -> Result<String, InvalidInput> {
    let upper = input.trim().to_uppercase();
    if is_valid_state(&upper) {
        Ok(upper)
    } else {
        Err(InvalidInput(format!(
            "unknown state code '{}'. Valid codes: AL, AK, AZ, ... WY, DC (50 states + DC)",
            input
        )))
    }
}

pub fn validate_chamber(input: &str) -> Result<Chamber, InvalidInput> {
    input
        .trim()
        .parse()
        .map_err(|_| InvalidInput(format!("unknown chamber '{}'. Valid values: senate, house", input)))
}

/// Validate a result or race id: non-empty ASCII alphanumerics plus `-` and `_`.
pub fn validate_id(input: &str) -> Result<String, InvalidInput> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InvalidInput("id must not be empty".to_string()));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(InvalidInput(format!(
            "id '{}' contains invalid characters",
            input
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- State validation --

    #[test]
    fn state_valid_lowercase() {
        assert_eq!(validate_state(" pa ").unwrap(), "PA");
    }

    #[test]
    fn state_valid_dc() {
        assert_eq!(validate_state("DC").unwrap(), "DC");
    }

    #[test]
    fn state_national_rollup_rejected() {
        assert!(validate_state("US").is_err());
    }

    #[test]
    fn state_territory_rejected() {
        assert!(validate_state("PR").is_err());
    }

    #[test]
    fn state_table_has_fifty_one_entries() {
        assert_eq!(VALID_STATES.len(), 51);
        assert!(SPLIT_STATES.iter().all(|s| is_valid_state(s)));
    }

    // -- Chamber validation --

    #[test]
    fn chamber_valid() {
        assert_eq!(validate_chamber("Senate").unwrap(), Chamber::Senate);
        assert!(validate_chamber("assembly").is_err());
    }

    // -- Id validation --

    #[test]
    fn id_valid() {
        assert_eq!(validate_id(" 39347-1 ").unwrap(), "39347-1");
    }

    #[test]
    fn id_invalid() {
        assert!(validate_id("").is_err());
        assert!(validate_id("1; DROP TABLE").is_err());
    }
}
