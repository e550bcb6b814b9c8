//! Catalog reload handler.

use axum::{extract::State, response::Redirect};
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::state::AppState;

/// "Try Again": start a new catalog fetch and go back to the catalog page.
///
/// While a fetch is outstanding the request is ignored.
#[instrument(skip(state))]
pub async fn retry(State(state): State<AppState>) -> Redirect {
    if state.catalog().start_loading() {
        add_breadcrumb("catalog", "Retried catalog fetch", None);
    } else {
        tracing::debug!("Catalog fetch already in progress");
    }
    Redirect::to("/")
}
