//! The card pipeline.
//!
//! Every card goes through the same three phases: normalize the raw request, fetch and
//! aggregate remote data, render. [`run`] is the only driver of these phases; a failure in
//! any phase is returned unchanged and later phases never run.

mod error;
mod request;
mod type_card;

pub use error::CardError;
pub use request::CardRequest;
pub use type_card::{TypeCard, TypeCardData, TypeProps};

const LOG_TARGET: &str = "      card";

/// A kind of card with a fixed normalize/fetch/render lifecycle.
pub trait Card {
    /// Validated, typed view of a request.
    type Props;

    /// Remote data gathered for one request.
    type Data;

    /// Validate raw parameters. Must not perform any I/O.
    fn normalize(&self, request: &CardRequest) -> Result<Self::Props, CardError>;

    /// Gather and aggregate everything needed to render.
    fn fetch(&self, props: &Self::Props) -> impl Future<Output = Result<Self::Data, CardError>> + Send;

    /// Produce the SVG document. Must be pure.
    fn render(&self, data: &Self::Data, props: &Self::Props) -> String;

    /// Machine-readable form of the data that would be rendered.
    fn to_json(&self, data: &Self::Data, props: &Self::Props) -> serde_json::Value;
}

/// Run a card request end to end, returning the SVG document.
///
/// # Errors
///
/// Returns the first [`CardError`] raised by any phase.
pub async fn run<C: Card>(card: &C, request: &CardRequest) -> Result<String, CardError> {
    let (props, data) = normalize_and_fetch(card, request).await?;
    Ok(card.render(&data, &props))
}

/// Like [`run`], but returns the JSON view of the data instead of rendering it.
///
/// # Errors
///
/// Returns the first [`CardError`] raised by normalization or fetching.
pub async fn run_json<C: Card>(card: &C, request: &CardRequest) -> Result<serde_json::Value, CardError> {
    let (props, data) = normalize_and_fetch(card, request).await?;
    Ok(card.to_json(&data, &props))
}

async fn normalize_and_fetch<C: Card>(card: &C, request: &CardRequest) -> Result<(C::Props, C::Data), CardError> {
    let props = card.normalize(request).inspect_err(|e| {
        log::debug!(target: LOG_TARGET, "Rejected request: {e}");
    })?;

    let data = card.fetch(&props).await.inspect_err(|e| {
        log::debug!(target: LOG_TARGET, "Fetch failed ({}): {e}", e.kind());
    })?;

    Ok((props, data))
}
