//! Response envelope decoding
//!
//! Status 200 decodes into the caller's shape. Anything else must be an
//! error envelope; if it is not, the JSON failure itself is returned so the
//! original problem stays visible.

use easemob_domain::{ApiErrorBody, EasemobError, Result};
use serde::de::DeserializeOwned;

use super::ports::RawResponse;

const SUCCESS_STATUS: u16 = 200;

/// Decode a raw response into `T` or the matching error
///
/// # Errors
/// - `EasemobError::Api` for a non-200 status carrying an error envelope
/// - `EasemobError::Decode` for malformed JSON on either path
pub fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    if response.status != SUCCESS_STATUS {
        return match serde_json::from_slice::<ApiErrorBody>(&response.body) {
            Ok(body) => Err(EasemobError::Api { status: response.status, body }),
            Err(err) => Err(EasemobError::Decode(err)),
        };
    }

    Ok(serde_json::from_slice(&response.body)?)
}
