//! Exhaustive pagination over a cursor-based listing operation.
//!
//! The first request is sent exactly as given. While a response carries a
//! `LastEvaluatedKey`, the next request is the initial one with that key
//! attached as `ExclusiveStartKey`. Rounds are strictly sequential since each
//! cursor is only known once the previous page has arrived.
//!
//! There is no round cap and no timeout: a listing whose cursor never clears
//! never finishes. Callers wanting a deadline wrap the returned future.

use std::future::Future;

use dynaparams_model::fragment::EXCLUSIVE_START_KEY;
use dynaparams_model::{Item, PageOutput, ParamValue, RequestFragment};
use tracing::debug;

/// Drive `list` until the listing is exhausted and return every row in
/// arrival order.
///
/// The first error from `list` aborts the loop and is returned unchanged;
/// rows gathered so far are dropped.
pub async fn drive_pagination<F, Fut, E>(mut list: F, initial: RequestFragment) -> Result<Vec<Item>, E>
where
    F: FnMut(RequestFragment) -> Fut,
    Fut: Future<Output = Result<PageOutput, E>>,
{
    let mut rows = Vec::new();
    let mut request = initial.clone();
    let mut page: usize = 0;

    loop {
        let output = list(request).await?;
        page += 1;

        let PageOutput {
            items,
            last_evaluated_key,
        } = output;
        debug!(page, page_items = items.len(), "received page");
        rows.extend(items);

        match last_evaluated_key.filter(|key| !key.is_empty()) {
            Some(cursor) => {
                request = initial
                    .clone()
                    .with(EXCLUSIVE_START_KEY, ParamValue::attributes(cursor));
            }
            None => {
                debug!(pages = page, total_items = rows.len(), "pagination finished");
                return Ok(rows);
            }
        }
    }
}
