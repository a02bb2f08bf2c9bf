//! sanitizer.rs - Markup stripping applied before censoring.
//!
//! The engine only depends on the `Sanitizer` trait. `HtmlSanitizer` is the
//! default: it drops `<script>` blocks and `<!-- -->` comments, removes every
//! other tag and decodes HTML entities so that `b&#97;d` and `<b>b</b>ad` are
//! seen as `bad`.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use strip_ansi_escapes::strip;

/// Turns raw input into the plain text the censor pass works on.
pub trait Sanitizer: Send + Sync + std::fmt::Debug {
    fn sanitize(&self, input: &str) -> String;
}

/// Returns input unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughSanitizer;

impl Sanitizer for PassThroughSanitizer {
    fn sanitize(&self, input: &str) -> String {
        input.to_string()
    }
}

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<script[^>]*>[\s\S]*?</script>").expect("script pattern is valid"));

static MARKUP_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--[\s\S]*?(?:-->|\z)").expect("comment pattern is valid"));

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)</?\w(?:[^"'>]|"[^"]*"|'[^']*')*>"#).expect("tag pattern is valid"));

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|([A-Za-z][A-Za-z0-9]{1,31}));")
        .expect("entity pattern is valid")
});

static NAMED_ENTITIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("amp", "&"), ("lt", "<"), ("gt", ">"), ("quot", "\""), ("apos", "'"),
        ("nbsp", "\u{a0}"), ("shy", "\u{ad}"), ("copy", "©"), ("reg", "®"), ("trade", "™"),
        ("euro", "€"), ("pound", "£"), ("yen", "¥"), ("cent", "¢"), ("curren", "¤"),
        ("sect", "§"), ("para", "¶"), ("deg", "°"), ("micro", "µ"), ("middot", "·"),
        ("hellip", "…"), ("ndash", "–"), ("mdash", "—"), ("lsquo", "‘"), ("rsquo", "’"),
        ("ldquo", "“"), ("rdquo", "”"), ("laquo", "«"), ("raquo", "»"), ("times", "×"),
        ("divide", "÷"), ("plusmn", "±"), ("iexcl", "¡"), ("iquest", "¿"), ("szlig", "ß"),
        ("fnof", "ƒ"), ("part", "∂"), ("sum", "∑"), ("int", "∫"),
        ("Agrave", "À"), ("Aacute", "Á"), ("Acirc", "Â"), ("Atilde", "Ã"), ("Auml", "Ä"), ("Aring", "Å"),
        ("agrave", "à"), ("aacute", "á"), ("acirc", "â"), ("atilde", "ã"), ("auml", "ä"), ("aring", "å"),
        ("Ccedil", "Ç"), ("ccedil", "ç"),
        ("Egrave", "È"), ("Eacute", "É"), ("Ecirc", "Ê"), ("Euml", "Ë"),
        ("egrave", "è"), ("eacute", "é"), ("ecirc", "ê"), ("euml", "ë"),
        ("Igrave", "Ì"), ("Iacute", "Í"), ("Icirc", "Î"), ("Iuml", "Ï"),
        ("igrave", "ì"), ("iacute", "í"), ("icirc", "î"), ("iuml", "ï"),
        ("ETH", "Ð"), ("eth", "ð"), ("THORN", "Þ"), ("thorn", "þ"),
        ("Ntilde", "Ñ"), ("ntilde", "ñ"),
        ("Ograve", "Ò"), ("Oacute", "Ó"), ("Ocirc", "Ô"), ("Otilde", "Õ"), ("Ouml", "Ö"), ("Oslash", "Ø"),
        ("ograve", "ò"), ("oacute", "ó"), ("ocirc", "ô"), ("otilde", "õ"), ("ouml", "ö"), ("oslash", "ø"),
        ("Ugrave", "Ù"), ("Uacute", "Ú"), ("Ucirc", "Û"), ("Uuml", "Ü"),
        ("ugrave", "ù"), ("uacute", "ú"), ("ucirc", "û"), ("uuml", "ü"),
        ("Yacute", "Ý"), ("yacute", "ý"), ("yuml", "ÿ"), ("Yuml", "Ÿ"),
        ("alpha", "α"), ("beta", "β"), ("gamma", "γ"), ("Delta", "Δ"), ("eta", "η"), ("kappa", "κ"),
        ("Lambda", "Λ"), ("lambda", "λ"), ("nu", "ν"), ("Pi", "Π"), ("rho", "ρ"), ("tau", "τ"),
        ("upsilon", "υ"), ("Phi", "Φ"), ("chi", "χ"), ("psi", "ψ"), ("Psi", "Ψ"), ("omega", "ω"),
    ]
    .into_iter()
    .collect()
});

/// Strips scripts, comments and tags, then decodes entities.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlSanitizer {
    /// Also remove ANSI escape sequences before anything else.
    pub strip_ansi: bool,
}

impl HtmlSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ansi_stripping(strip_ansi: bool) -> Self {
        Self { strip_ansi }
    }
}

impl Sanitizer for HtmlSanitizer {
    fn sanitize(&self, input: &str) -> String {
        let text: Cow<'_, str> = if self.strip_ansi {
            let stripped_bytes = strip(input.as_bytes());
            Cow::Owned(String::from_utf8_lossy(&stripped_bytes).into_owned())
        } else {
            Cow::Borrowed(input)
        };

        let without_scripts = SCRIPT_BLOCK.replace_all(&text, "");
        let without_comments = MARKUP_COMMENT.replace_all(&without_scripts, "");
        let without_tags = MARKUP_TAG.replace_all(&without_comments, "");
        let decoded = decode_entities(&without_tags);

        if decoded.len() != input.len() {
            debug!("Sanitizer reduced input from {} to {} bytes.", input.len(), decoded.len());
        }
        decoded.into_owned()
    }
}

/// Decodes named, decimal and hexadecimal character references.
///
/// Unknown names and invalid code points are left as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY.replace_all(text, |caps: &Captures| {
        let decoded = if let Some(dec) = caps.get(1) {
            dec.as_str().parse::<u32>().ok().and_then(char::from_u32).map(String::from)
        } else if let Some(hex) = caps.get(2) {
            u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32).map(String::from)
        } else {
            caps.get(3)
                .and_then(|name| NAMED_ENTITIES.get(name.as_str()))
                .map(|s| s.to_string())
        };
        decoded.unwrap_or_else(|| caps[0].to_string())
    })
}
