use std::collections::HashMap;

use elections_model::types::{Call, RawResult};

use crate::error::RenderError;

/// The desk's resolved winner: the wire-service flag when the desk accepts
/// it, or a desk override.
pub fn is_winner(result: &RawResult, call: &Call) -> bool {
    call.follows_ap(result) || call.override_winner
}

/// Looks up the call for `result`. Callable results must have one; county and
/// township rows never do.
pub fn call_for<'a>(
    result: &RawResult,
    calls: &'a HashMap<String, Call>,
) -> Result<Option<&'a Call>, RenderError> {
    if !result.is_callable() {
        return Ok(None);
    }
    calls
        .get(&result.id)
        .map(Some)
        .ok_or_else(|| RenderError::MissingCall {
            result_id: result.id.clone(),
        })
}
