//! Brace-balanced block extraction over raw VMF text.
//!
//! VMF is a nested, brace-delimited key/value format. Nothing here builds a
//! grammar for it; blocks are carved out by counting braces and the fields
//! inside are read by keyed lookup (see [`super::fields`]).

use crate::error::{ConvertError, Result};

/// Extract the first brace-delimited block at or after `start`.
///
/// The first `{` opens the block; the `}` that returns the running count to
/// zero closes it. Returns the trimmed text strictly between the braces and
/// the byte offset of the closing brace, or `None` if the text ends before
/// the counts balance.
///
/// Counting is character-level and quote-unaware: a brace inside a quoted
/// value corrupts the count. Real map files do not contain quoted braces.
pub fn extract_block(text: &str, start: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let mut open_count = 0usize;
    let mut close_count = 0usize;
    let mut open_index = None;

    for i in start..bytes.len() {
        match bytes[i] {
            b'{' => {
                if open_index.is_none() {
                    open_index = Some(i);
                }
                open_count += 1;
            }
            b'}' => {
                close_count += 1;
                if open_count == close_count {
                    let open = open_index?;
                    return Some((text[open + 1..i].trim(), i));
                }
            }
            _ => {}
        }
    }

    None
}

/// Lazy iterator over every `<keyword> { "id" "` block in a text, in
/// document order. Document order is the only implicit identity downstream
/// stages rely on, so it is preserved exactly.
pub struct BlockIter<'a> {
    text: &'a str,
    keyword: &'static str,
    pos: usize,
}

impl<'a> BlockIter<'a> {
    pub fn new(text: &'a str, keyword: &'static str) -> Self {
        Self {
            text,
            keyword,
            pos: 0,
        }
    }
}

impl<'a> Iterator for BlockIter<'a> {
    type Item = Result<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let found = self.text[self.pos..].find(self.keyword)?;
            let at = self.pos + found;
            self.pos = at + self.keyword.len();

            // Only a keyword opening a block with an "id" key counts; the
            // same word used as a key or value elsewhere is skipped.
            if !opens_id_block(&self.text[self.pos..]) {
                continue;
            }

            return match extract_block(self.text, at) {
                Some((content, _end)) => Some(Ok(content)),
                None => Some(Err(ConvertError::MalformedBlock {
                    kind: self.keyword,
                    offset: at,
                })),
            };
        }
        None
    }
}

/// Check for `{ "id" "` (whitespace-tolerant) right after a keyword.
fn opens_id_block(rest: &str) -> bool {
    let rest = rest.trim_start();
    let Some(rest) = rest.strip_prefix('{') else {
        return false;
    };
    let rest = rest.trim_start();
    let Some(rest) = rest.strip_prefix("\"id\"") else {
        return false;
    };
    rest.trim_start().starts_with('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_block_simple() {
        let text = r#"solid { "id" "1" }"#;
        let (content, end) = extract_block(text, 0).unwrap();
        assert_eq!(content, r#""id" "1""#);
        assert_eq!(text.as_bytes()[end], b'}');
    }

    #[test]
    fn test_extract_block_nested() {
        let text = "solid\n{\n\"id\" \"2\"\nside\n{\n\"id\" \"7\"\n}\n}";
        let (content, _) = extract_block(text, 0).unwrap();
        assert!(content.starts_with("\"id\" \"2\""));
        assert!(content.ends_with('}'));

        // The nested side block is extractable from the inner content.
        let side_at = content.find("side").unwrap();
        let (side_content, _) = extract_block(content, side_at).unwrap();
        assert_eq!(side_content, "\"id\" \"7\"");
    }

    #[test]
    fn test_extract_block_round_trip() {
        let inner = "\"id\" \"3\"\n\"material\" \"DEV/GRID\"";
        let wrapped = format!("side\n{{\n{}\n}}", inner);
        let (content, end) = extract_block(&wrapped, 0).unwrap();
        assert_eq!(content, inner);
        // Re-wrapping the untrimmed span reproduces the input byte for byte.
        let open = wrapped.find('{').unwrap();
        assert_eq!(&wrapped[..open + 1], "side\n{");
        assert_eq!(end, wrapped.len() - 1);
    }

    #[test]
    fn test_extract_block_unbalanced() {
        assert!(extract_block("solid { \"id\" \"1\" ", 0).is_none());
        assert!(extract_block("no braces at all", 0).is_none());
    }

    #[test]
    fn test_block_iter_document_order() {
        let text = r#"
            solid { "id" "10" }
            entity { "classname" "func_detail" }
            solid { "id" "4" }
        "#;
        let blocks: Vec<_> = BlockIter::new(text, "solid")
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(blocks, vec![r#""id" "10""#, r#""id" "4""#]);
    }

    #[test]
    fn test_block_iter_skips_keyword_as_value() {
        // "solid" used as a key/value pair, not opening a block
        let text = r#"entity { "solid" "6" } solid { "id" "2" }"#;
        let blocks: Vec<_> = BlockIter::new(text, "solid")
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(blocks, vec![r#""id" "2""#]);
    }

    #[test]
    fn test_block_iter_malformed() {
        let text = r#"solid { "id" "1" "#;
        let mut iter = BlockIter::new(text, "solid");
        assert!(matches!(
            iter.next(),
            Some(Err(ConvertError::MalformedBlock { kind: "solid", .. }))
        ));
    }

    #[test]
    fn test_block_iter_restartable() {
        let text = r#"solid { "id" "1" }"#;
        assert_eq!(BlockIter::new(text, "solid").count(), 1);
        assert_eq!(BlockIter::new(text, "solid").count(), 1);
    }
}
