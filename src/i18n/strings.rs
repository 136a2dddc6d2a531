/// Strings shown on the generated language selector page.
///
/// The selector is written outside any theme, so it cannot rely on locale
/// bundles; these few labels ship with the binary instead.
#[derive(Debug, Clone)]
pub struct SelectorStrings {
    /// Document title (`<title>`)
    pub title: &'static str,

    /// Main heading of the page
    pub heading: &'static str,

    /// Short prompt asking the visitor to pick a language
    pub prompt: &'static str,
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: SelectorStrings = SelectorStrings {
    title: "Resume - Select Language",
    heading: "Select Language",
    prompt: "Choose a language",
};

// ==================== French Strings ====================

pub const FRENCH_STRINGS: SelectorStrings = SelectorStrings {
    title: "CV - Choix de la langue",
    heading: "Choisissez une langue",
    prompt: "Choisissez une langue",
};

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: SelectorStrings = SelectorStrings {
    title: "Currículum - Seleccione un idioma",
    heading: "Seleccione un idioma",
    prompt: "Seleccione un idioma",
};

// ==================== German Strings ====================

pub const GERMAN_STRINGS: SelectorStrings = SelectorStrings {
    title: "Lebenslauf - Sprache wählen",
    heading: "Sprache wählen",
    prompt: "Wählen Sie eine Sprache",
};
