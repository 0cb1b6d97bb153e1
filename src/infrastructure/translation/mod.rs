//! Language detection adapters

mod google_translate;

pub use google_translate::GoogleLanguageDetector;
