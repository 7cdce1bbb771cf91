use crate::error::TranslateError;
use crate::i18n::Language;
use std::future::Future;

/// A translation capability: text in, translated text out, or failure.
///
/// The synchronizer depends only on this trait. HTTP providers live in
/// [`crate::providers`]; tests plug in deterministic fakes.
pub trait Translator {
    /// Translate `text` from the source language into `target`.
    fn translate(
        &self,
        text: &str,
        target: &Language,
    ) -> impl Future<Output = Result<String, TranslateError>> + Send;
}

impl<T: Translator + Sync> Translator for &T {
    fn translate(
        &self,
        text: &str,
        target: &Language,
    ) -> impl Future<Output = Result<String, TranslateError>> + Send {
        (**self).translate(text, target)
    }
}
