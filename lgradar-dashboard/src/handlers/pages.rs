//! Protected dashboard views
//!
//! Every handler here runs behind the page gate and receives its viewer
//! through [`Authenticated`].

use axum::extract::Query;
use axum::response::Html;
use serde::Deserialize;

use crate::data::search_gazettes;
use crate::extractors::Authenticated;
use crate::htmx::HxRequest;
use crate::views::pages;

/// `?q=` on the gazettes page
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GazetteQuery {
    pub q: String,
}

pub async fn dashboard(Authenticated(viewer): Authenticated) -> Html<String> {
    Html(pages::overview(&viewer))
}

/// Gazette list; htmx searches get only the result list
pub async fn gazettes(
    Authenticated(viewer): Authenticated,
    HxRequest(is_htmx): HxRequest,
    Query(query): Query<GazetteQuery>,
) -> Html<String> {
    let results = search_gazettes(&query.q);
    if is_htmx {
        return Html(pages::gazette_rows(&results));
    }
    Html(pages::gazettes(&viewer, &query.q, &results))
}

pub async fn alerts(Authenticated(viewer): Authenticated) -> Html<String> {
    Html(pages::alerts(&viewer))
}

pub async fn billing(Authenticated(viewer): Authenticated) -> Html<String> {
    Html(pages::billing(&viewer))
}

pub async fn account(Authenticated(viewer): Authenticated) -> Html<String> {
    Html(pages::account(&viewer))
}
