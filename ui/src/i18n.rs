//! Fluent bundles for the dashboard, embedded at compile time from
//! `i18n/<locale>/decisionmate-ui.ftl`. `en-US` is the fallback; call
//! [`init`] once at startup and look messages up with [`t!`](crate::t).

use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::{langid, LanguageIdentifier};

pub use i18n_embed_fl::fl;

/// `t!("key")` or `t!("key", name = value, ...)` against [`LOADER`].
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

const DOMAIN: &str = "decisionmate-ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let loader = FluentLanguageLoader::new(DOMAIN, langid!("en-US"));
    // Placeables end up in SVG text and PDF exports; no bidi isolation marks.
    loader.set_use_isolating(false);
    loader
});

static INIT: Once = Once::new();

/// Select the best embedded match for the OS or browser locales. Runs once.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!(%err, "locale selection failed; using en-US");
        }
    });
}

/// Switch the sidebar's locale. Unparseable tags are a no-op.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(locale) = tag.parse::<LanguageIdentifier>() else {
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[locale]).map(|_| ())
}

/// Locale directories compiled into the binary, sorted.
pub fn available_languages() -> Vec<String> {
    let mut locales: Vec<String> = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect();
    locales.sort();
    locales.dedup();
    locales
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
