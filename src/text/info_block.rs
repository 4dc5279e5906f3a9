// src/text/info_block.rs
use crate::error::Result;
use crate::metadata::MetadataSink;
use crate::raw_data::FieldReader;
use crate::types::{FileKind, MetaValue};
use crate::utils::{line_tokens, trim_control};
use std::io::{Read, Seek};
use tracing::debug;

/// The info text block: `key : value` lines framed by a heading and a trailer
///
/// ```text
/// *IDENTIFICATION
///   ID        : SPC Setup & Data File
///   Title     : beads
/// *END
/// ```
///
/// The first and last lines are never parsed as pairs, whatever they contain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoBlock {
    /// Raw decoded text
    pub text: String,
    /// Pairs in file order; duplicates are kept here and resolved by the sink
    pub entries: Vec<(String, String)>,
}

impl InfoBlock {
    /// Seek to `offset`, read `length` bytes and parse them
    pub fn read<R: Read + Seek>(fields: &mut FieldReader<'_, R>, offset: u64, length: usize) -> Result<Self> {
        fields.seek(offset)?;
        let text = fields.read_text(length)?;
        let block = Self::parse(text);
        debug!(offset, length, pairs = block.entries.len(), "Parsed info block");
        Ok(block)
    }

    pub fn parse(text: String) -> Self {
        let tokens: Vec<&str> = line_tokens(&text).collect();

        // Fewer than three tokens leaves nothing between heading and trailer.
        let body = match tokens.len() {
            0..=2 => &[][..],
            n => &tokens[1..n - 1],
        };

        let entries = body
            .iter()
            .filter_map(|token| {
                let colon = token.find(':')?;
                let key = trim_control(&token[..colon]);
                let value = trim_control(&token[colon + 1..]);
                Some((key.to_string(), value.to_string()))
            })
            .collect();

        InfoBlock { text, entries }
    }

    /// Last value recorded for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// File kind announced by the `ID` entry
    pub fn file_kind(&self) -> FileKind {
        self.get("ID").map_or(FileKind::Unknown, FileKind::from_identifier)
    }

    /// Write every pair to the sink at top level
    pub fn publish<S: MetadataSink + ?Sized>(&self, sink: &mut S) {
        for (key, value) in &self.entries {
            sink.put(key.clone(), MetaValue::Text(value.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetaTable;
    use crate::types::ByteOrder;
    use std::io::Cursor;

    #[test]
    fn test_heading_and_trailer_are_skipped() {
        let block = InfoBlock::parse("HEADER\nkey1: val1\nkey2: val2\nFOOTER".to_string());
        assert_eq!(
            block.entries,
            vec![
                ("key1".to_string(), "val1".to_string()),
                ("key2".to_string(), "val2".to_string()),
            ]
        );
    }

    #[test]
    fn test_first_and_last_skipped_even_with_colon() {
        let block = InfoBlock::parse("a: 1\nb: 2\nc: 3".to_string());
        assert_eq!(block.entries, vec![("b".to_string(), "2".to_string())]);
    }

    #[test]
    fn test_short_blocks_yield_nothing() {
        assert!(InfoBlock::parse(String::new()).entries.is_empty());
        assert!(InfoBlock::parse("only: line".to_string()).entries.is_empty());
        assert!(InfoBlock::parse("a: 1\nb: 2".to_string()).entries.is_empty());
        assert!(InfoBlock::parse("\n\n\n".to_string()).entries.is_empty());
    }

    #[test]
    fn test_lines_without_colon_are_ignored() {
        let block = InfoBlock::parse("H\nno colon here\n Time : 12:06:32 \nT".to_string());
        assert_eq!(block.entries, vec![("Time".to_string(), "12:06:32".to_string())]);
    }

    #[test]
    fn test_empty_lines_do_not_count() {
        let block = InfoBlock::parse("\n\nH\n\nA: 1\n\nT\n\n".to_string());
        assert_eq!(block.get("A"), Some("1"));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let block = InfoBlock::parse("H\nA: 1\nA: 2\nT".to_string());
        assert_eq!(block.get("A"), Some("2"));

        let mut table = MetaTable::new();
        block.publish(&mut table);
        assert_eq!(table.get_text("A"), Some("2"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_file_kind() {
        let block = InfoBlock::parse(
            "*IDENTIFICATION\n  ID        : SPC Setup & Data File\n  Title     : beads\n*END\n".to_string(),
        );
        assert_eq!(block.file_kind(), FileKind::SetupAndData);
        assert_eq!(block.get("Title"), Some("beads"));
    }

    #[test]
    fn test_read_at_offset() {
        let mut bytes = vec![0u8; 8];
        bytes.extend_from_slice(b"X\nA: 1\nY");
        let mut cursor = Cursor::new(bytes);
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);

        let block = InfoBlock::read(&mut fields, 8, 8).unwrap();
        assert_eq!(block.text, "X\nA: 1\nY");
        assert_eq!(block.get("A"), Some("1"));
    }

    #[test]
    fn test_read_past_end_fails() {
        let mut cursor = Cursor::new(b"X\nA: 1".to_vec());
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);
        assert!(InfoBlock::read(&mut fields, 0, 64).is_err());
    }
}
