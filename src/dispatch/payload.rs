//! Payload selection.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::{DispatchError, PayloadOrder};

/// Returns the payload to send for `attempt_index`.
///
/// Sequential order returns `payloads[attempt_index % payloads.len()]`, so
/// a pool shorter than the run repeats in order. Random order draws
/// independently from the thread-local generator on every call.
///
/// # Errors
///
/// Returns [`DispatchError::EmptyPayloadSet`] if `payloads` is empty.
///
/// # Example
///
/// ```
/// use hook_pacer::dispatch::{PayloadOrder, next_payload};
///
/// let pool = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(next_payload(&pool, 3, PayloadOrder::Sequential).unwrap(), "b");
/// ```
pub fn next_payload(
    payloads: &[String],
    attempt_index: u64,
    order: PayloadOrder,
) -> Result<&str, DispatchError> {
    next_payload_with(&mut rand::rng(), payloads, attempt_index, order)
}

/// Like [`next_payload`], drawing random picks from the given generator.
///
/// # Errors
///
/// Returns [`DispatchError::EmptyPayloadSet`] if `payloads` is empty.
pub fn next_payload_with<'a, R: Rng + ?Sized>(
    rng: &mut R,
    payloads: &'a [String],
    attempt_index: u64,
    order: PayloadOrder,
) -> Result<&'a str, DispatchError> {
    if payloads.is_empty() {
        return Err(DispatchError::EmptyPayloadSet);
    }

    let payload = match order {
        PayloadOrder::Sequential => {
            // len() always fits in u64, and the remainder is below len()
            #[allow(clippy::cast_possible_truncation)]
            let slot = (attempt_index % payloads.len() as u64) as usize;
            &payloads[slot]
        }
        PayloadOrder::Random => payloads
            .choose(rng)
            .ok_or(DispatchError::EmptyPayloadSet)?,
    };

    Ok(payload.as_str())
}
