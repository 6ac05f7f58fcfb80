//! Transformer port.
//!
//! CSS parsing and selector renaming live outside this crate. The workspace only
//! hands source text to a [`Transformer`] and persists whatever comes back,
//! together with the selector map the transformer maintains.

use crate::error::ApiError;
use indexmap::IndexMap;

/// Original selector -> generated identifier, as stored in `selectorMap.json`.
pub type SelectorMap = IndexMap<String, String>;

pub trait Transformer {
    /// Produce the transformed stylesheet, recording any renamed selectors.
    fn transform_stylesheet(
        &mut self,
        source: &str,
        selectors: &mut SelectorMap,
    ) -> Result<String, ApiError>;

    /// Rewrite markup against the selector map. `None` leaves the file untouched.
    fn rewrite_markup(
        &mut self,
        _source: &str,
        _selectors: &SelectorMap,
    ) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// Identity transformer: stages files unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Transformer for Passthrough {
    fn transform_stylesheet(
        &mut self,
        source: &str,
        _selectors: &mut SelectorMap,
    ) -> Result<String, ApiError> {
        Ok(source.to_string())
    }
}
