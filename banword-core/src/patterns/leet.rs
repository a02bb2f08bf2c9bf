//! leet.rs - The fixed leetspeak substitution table and pattern expansion.
//!
//! License: MIT OR APACHE 2.0

/// Literal renderings accepted for each letter, in the order they are applied.
///
/// Every alternative is matched literally: `a.` is an `a` followed by a dot and
/// `s`'s `$` is a dollar sign. The `d` entry carries `&part;`, whose `p`, `r`
/// and `t` are expanded again when those letters are applied later.
pub const LEET_TABLE: [(char, &[&str]); 26] = [
    ('a', &["a", "a.", "a-", "4", "@", "Á", "á", "À", "Â", "à", "Â", "â", "Ä", "ä", "Ã", "ã", "Å", "å", "α", "Δ", "Λ", "λ"]),
    ('b', &["b", "b.", "b-", "8", "|3", "ß", "Β", "β"]),
    ('c', &["c", "c.", "c-", "Ç", "ç", "¢", "€", "<", "(", "{", "©"]),
    ('d', &["d", "d.", "d-", "&part;", "|)", "Þ", "þ", "Ð", "ð"]),
    ('e', &["e", "e.", "e-", "3", "€", "È", "è", "É", "é", "Ê", "ê", "∑"]),
    ('f', &["f", "f.", "f-", "ƒ"]),
    ('g', &["g", "g.", "g-", "6", "9"]),
    ('h', &["h", "h.", "h-", "Η"]),
    ('i', &["i", "i.", "i-", "!", "|", "][", "]", "1", "∫", "Ì", "Í", "Î", "Ï", "ì", "í", "î", "ï"]),
    ('j', &["j", "j.", "j-"]),
    ('k', &["k", "k.", "k-", "Κ", "κ"]),
    ('l', &["l", "1.", "l-", "!", "|", "][", "]", "£", "∫", "Ì", "Í", "Î", "Ï"]),
    ('m', &["m", "m.", "m-"]),
    ('n', &["n", "n.", "n-", "η", "Ν", "Π"]),
    ('o', &["o", "o.", "o-", "0", "Ο", "ο", "Φ", "¤", "°", "ø"]),
    ('p', &["p", "p.", "p-", "ρ", "Ρ", "¶", "þ"]),
    ('q', &["q", "q.", "q-"]),
    ('r', &["r", "r.", "r-", "®"]),
    ('s', &["s", "s.", "s-", "5", "$", "§"]),
    ('t', &["t", "t.", "t-", "Τ", "τ", "7"]),
    ('u', &["u", "u.", "u-", "υ", "µ"]),
    ('v', &["v", "v.", "v-", "υ", "ν"]),
    ('w', &["w", "w.", "w-", "ω", "ψ", "Ψ"]),
    ('x', &["x", "x.", "x-", "Χ", "χ"]),
    ('y', &["y", "y.", "y-", "¥", "γ", "ÿ", "ý", "Ÿ", "Ý"]),
    ('z', &["z", "z.", "z-", "Ζ"]),
];

/// Regex source for one letter's alternation group.
pub fn group_source(alternatives: &[&str]) -> String {
    let escaped: Vec<String> = alternatives.iter().map(|alt| regex::escape(alt)).collect();
    format!("({})", escaped.join("|"))
}

/// Expands `word` into leetspeak-tolerant regex source.
///
/// The word is escaped first so it matches literally. Each table entry is then
/// applied in turn over the cumulative result, replacing the letter in either
/// ASCII case with its group.
pub fn expand(word: &str) -> String {
    LEET_TABLE.iter().fold(regex::escape(word), |pattern, (letter, alternatives)| {
        replace_letter(&pattern, *letter, &group_source(alternatives))
    })
}

fn replace_letter(source: &str, letter: char, group: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for c in source.chars() {
        if c.to_ascii_lowercase() == letter {
            out.push_str(group);
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn full_match(word: &str) -> Regex {
        Regex::new(&format!("^{}$", expand(word))).unwrap()
    }

    #[test]
    fn test_table_is_a_to_z() {
        let letters: String = LEET_TABLE.iter().map(|(l, _)| *l).collect();
        assert_eq!(letters, "abcdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn test_alternatives_are_literal() {
        let s = full_match("s");
        for variant in ["s", "s.", "s-", "5", "$", "§"] {
            assert!(s.is_match(variant), "'{}' should match", variant);
        }
        assert!(!s.is_match("sx"));
        assert!(!s.is_match(""));
        assert!(full_match("b").is_match("|3"));
        assert!(!full_match("b").is_match("3"));
    }

    #[test]
    fn test_expand_is_ascii_case_insensitive_on_letters() {
        assert_eq!(expand("S"), expand("s"));
    }

    #[test]
    fn test_expand_cascades_into_earlier_groups() {
        let expanded = expand("d");
        assert!(!expanded.contains("part"));
        assert!(expanded.contains(")a("));
        assert!(full_match("d").is_match("&part;"));
        assert!(full_match("d").is_match("&ρa®7;"));
    }

    #[test]
    fn test_expand_escapes_metacharacters() {
        assert_eq!(expand("1+"), r"1\+");
        assert!(full_match("a.").is_match("@."));
        assert!(!full_match("a.").is_match("@x"));
    }

    #[test]
    fn test_every_expansion_compiles() {
        for (letter, _) in LEET_TABLE.iter() {
            let source = expand(&letter.to_string());
            assert!(Regex::new(&source).is_ok(), "group for '{}' failed: {}", letter, source);
        }
    }
}
