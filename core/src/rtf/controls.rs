//! Inventory and removal of RTF control sequences, for looking at what an
//! editor actually put into a file.

use std::collections::BTreeSet;

use crate::errors::RtfError;
use crate::rtf::lexer::Lexer;

/// Every control word, symbol and hex escape used in `rtf`, as written.
pub fn collect_controls(rtf: &str) -> Result<BTreeSet<String>, RtfError> {
    let mut controls = BTreeSet::new();
    for token in Lexer::new(rtf) {
        if let Some(control) = token?.control_text() {
            controls.insert(control);
        }
    }
    Ok(controls)
}

/// Returns `rtf` with every control sequence found in `controls` cut out.
/// Everything else, including group braces, stays verbatim.
pub fn remove_controls(rtf: &str, controls: &BTreeSet<String>) -> Result<String, RtfError> {
    let mut cleaned = String::with_capacity(rtf.len());
    let mut last = 0;

    for spanned in Lexer::new(rtf).spanned() {
        let (token, span) = spanned?;
        let remove = token
            .control_text()
            .is_some_and(|control| controls.contains(&control));
        if remove {
            cleaned.push_str(&rtf[last..span.start]);
            last = span.end;
        }
    }
    cleaned.push_str(&rtf[last..]);

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_controls() {
        let controls = collect_controls(r"{\f0\fs32 \cf2 it\'92s \cf4 ok\~}").unwrap();
        let expected: BTreeSet<String> = [r"\f0", r"\fs32", r"\cf2", r"\'92", r"\cf4", r"\~"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(controls, expected);
    }

    #[test]
    fn test_remove_rtf_controls() {
        let rtf = r"\f0\fs32 \cf2 \cb3 Hello \i world";
        let mut remove = collect_controls(rtf).unwrap();
        remove.remove(r"\cf2");

        assert_eq!(remove_controls(rtf, &remove).unwrap(), r" \cf2  Hello  world");
    }

    #[test]
    fn test_hex_escapes_are_listed_per_byte() {
        let rtf = r"it\'92s\'a0ok\'92";
        let controls = collect_controls(rtf).unwrap();
        assert_eq!(controls.len(), 2);
        assert!(controls.contains(r"\'92") && controls.contains(r"\'a0"));

        let only_quote: BTreeSet<String> = [r"\'92".to_string()].into_iter().collect();
        assert_eq!(remove_controls(rtf, &only_quote).unwrap(), r"its\'a0ok");
    }

    #[test]
    fn test_remove_nothing() {
        let rtf = r"{\cf1 same}";
        assert_eq!(remove_controls(rtf, &BTreeSet::new()).unwrap(), rtf);
    }
}
