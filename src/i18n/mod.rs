//! Internationalization (i18n) module.
//!
//! Provides localized strings for CLI help and status output.
//! English is the default language; Spanish is available as an alternative.

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// English (default)
    En,
    /// Spanish
    Es,
}

impl Lang {
    /// Parse a language code string (e.g. "en", "es", "en_US", "es_ES").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.to_lowercase();
        let prefix = normalized.split(['_', '-', '.']).next().unwrap_or("");
        match prefix {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Initialize the global language. Call once at startup.
/// If already initialized, this is a no-op.
pub fn set_lang(lang: Lang) {
    let _ = CURRENT_LANG.set(lang);
}

/// Get the currently configured language (defaults to English).
pub fn lang() -> Lang {
    CURRENT_LANG.get().copied().unwrap_or(Lang::En)
}

/// Detect language from `HTML2EML_LANG`, then `LC_MESSAGES` / `LANG`.
pub fn detect_system_lang() -> Option<Lang> {
    ["HTML2EML_LANG", "LC_MESSAGES", "LANG"]
        .iter()
        .find_map(|var| std::env::var(var).ok().and_then(|v| Lang::from_code(&v)))
}

/// Macro for defining translatable message functions.
/// Each function returns a `&'static str` based on the current language.
macro_rules! msg {
    ($name:ident, $en:expr, $es:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::En => $en,
                Lang::Es => $es,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(
    app_about,
    "html2eml \u{2014} Turn an HTML folder into a self-contained .eml with inline images.",
    "html2eml \u{2014} Convierte una carpeta HTML en un .eml autocontenido con im\u{e1}genes incrustadas."
);
msg!(
    app_long_about,
    "html2eml \u{2014} Turn an HTML folder into a self-contained .eml message.\nLocal <img> sources are replaced with cid: references and the images are\nattached inline. Remote (http) images are left untouched.",
    "html2eml \u{2014} Convierte una carpeta HTML en un mensaje .eml autocontenido.\nLas rutas locales de <img> se sustituyen por referencias cid: y las im\u{e1}genes\nse adjuntan en l\u{ed}nea. Las im\u{e1}genes remotas (http) no se modifican."
);
msg!(
    app_after_help,
    "Copyright (c) 2026 David Carrero Fern\u{e1}ndez-Baillo \u{2014} MIT License",
    "Copyright (c) 2026 David Carrero Fern\u{e1}ndez-Baillo \u{2014} Licencia MIT"
);

// ── CLI help strings ─────────────────────────────────────────────

msg!(
    help_input_arg,
    "Folder containing index.html and its images",
    "Carpeta que contiene index.html y sus im\u{e1}genes"
);
msg!(
    help_output_arg,
    "Path of the .eml file to write (overwritten if it exists)",
    "Ruta del fichero .eml a generar (se sobrescribe si existe)"
);
msg!(
    help_subject,
    "Subject of the generated message",
    "Asunto del mensaje generado"
);
msg!(
    help_no_unsent,
    "Do not add the X-Unsent: 1 draft header",
    "No a\u{f1}adir la cabecera de borrador X-Unsent: 1"
);
msg!(help_output_json, "Output as JSON", "Salida en formato JSON");
msg!(
    help_verbose,
    "Verbose logging (-v info, -vv debug, -vvv trace)",
    "Registro detallado (-v info, -vv debug, -vvv trace)"
);
msg!(
    help_lang,
    "Language (en, es). Defaults to system locale",
    "Idioma (en, es). Por defecto usa el idioma del sistema"
);

// ── Usage ────────────────────────────────────────────────────────

msg!(
    cli_usage,
    "Usage: html2eml <input_folder> <output_file>",
    "Uso: html2eml <carpeta_entrada> <fichero_salida>"
);
msg!(
    cli_example,
    "Example: html2eml mail/newsletter_es output.eml",
    "Ejemplo: html2eml mail/newsletter_es salida.eml"
);

// ── Conversion output ────────────────────────────────────────────

msg!(msg_reading, "Reading", "Leyendo");
msg!(
    msg_eml_generated,
    "EML generated successfully",
    "EML generado correctamente"
);
msg!(msg_inline_images, "Inline images", "Im\u{e1}genes en l\u{ed}nea");
msg!(msg_missing_images, "Missing images", "Im\u{e1}genes ausentes");
msg!(msg_remote_images, "Remote images", "Im\u{e1}genes remotas");
msg!(msg_output_size, "Output size", "Tama\u{f1}o de salida");
msg!(msg_output_file, "Output file", "Fichero de salida");

// ── Errors and warnings ──────────────────────────────────────────

msg!(
    warn_image_not_found,
    "Warning: Image not found",
    "Aviso: Imagen no encontrada"
);
msg!(err_file_not_found, "Error: Cannot find", "Error: No se encuentra");
msg!(
    err_conversion_failed,
    "Error: Conversion failed",
    "Error: La conversi\u{f3}n ha fallado"
);
