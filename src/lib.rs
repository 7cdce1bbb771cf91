//! Regenerate translated locale bundles from the default-language bundle.
//!
//! The locales root holds one directory per language (`i18n/en`, `i18n/fr`,
//! ...). [`sync::LocaleSynchronizer`] reads every JSON resource file of the
//! default language, translates its values through a [`translator::Translator`]
//! and writes the result into each target language directory.

pub mod config;
pub mod error;
pub mod i18n;
pub mod providers;
pub mod resource;
pub mod retry;
pub mod sync;
pub mod translator;
