// src/text/setup_block.rs
use crate::error::{Result, SdtError};
use crate::metadata::MetadataSink;
use crate::raw_data::FieldReader;
use crate::types::MetaValue;
use crate::utils::{line_tokens, trim_control};
use std::io::{Read, Seek};
use tracing::{debug, trace};

/// Tagged setup parameters that carry image dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionTag {
    ScanX,
    ScanY,
    AdcResolution,
    ScanRx,
    ScanRy,
}

impl DimensionTag {
    /// Scan order; at most one tag is taken per line
    pub const ALL: [DimensionTag; 5] = [
        DimensionTag::ScanX,
        DimensionTag::ScanY,
        DimensionTag::AdcResolution,
        DimensionTag::ScanRx,
        DimensionTag::ScanRy,
    ];

    pub fn marker(&self) -> &'static str {
        match self {
            DimensionTag::ScanX => "#SP [SP_SCAN_X,I,",
            DimensionTag::ScanY => "#SP [SP_SCAN_Y,I,",
            DimensionTag::AdcResolution => "#SP [SP_ADC_RE,I,",
            DimensionTag::ScanRx => "#SP [SP_SCAN_RX,I,",
            DimensionTag::ScanRy => "#SP [SP_SCAN_RY,I,",
        }
    }
}

/// Dimensions found in setup text; unset values stay 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetupDimensions {
    pub width: i32,
    pub height: i32,
    pub time_bins: i32,
    /// Sum of the `SP_SCAN_RX` and `SP_SCAN_RY` values
    pub channels: i32,
}

impl SetupDimensions {
    fn apply(&mut self, tag: DimensionTag, value: i32) {
        match tag {
            DimensionTag::ScanX => self.width = value,
            DimensionTag::ScanY => self.height = value,
            DimensionTag::AdcResolution => self.time_bins = value,
            DimensionTag::ScanRx | DimensionTag::ScanRy => {
                self.channels = self.channels.wrapping_add(value)
            }
        }
    }
}

/// The setup text block
///
/// Lines look like
///
/// ```text
/// #SP [SP_SCAN_X,I,128]
/// #DI [DI_SIMPLE,B,1]
/// #TR1 [T,1,0,1,0,0]
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupBlock {
    /// Raw decoded text
    pub text: String,
    /// Pairs in file order; duplicates are kept here and resolved by the sink
    pub entries: Vec<(String, String)>,
    pub dimensions: SetupDimensions,
}

impl SetupBlock {
    /// Seek to `offset`, read `length` bytes and parse them
    pub fn read<R: Read + Seek>(fields: &mut FieldReader<'_, R>, offset: u64, length: usize) -> Result<Self> {
        fields.seek(offset)?;
        let text = fields.read_text(length)?;
        let block = Self::parse(text)?;
        debug!(
            offset,
            length,
            pairs = block.entries.len(),
            width = block.dimensions.width,
            height = block.dimensions.height,
            time_bins = block.dimensions.time_bins,
            channels = block.dimensions.channels,
            "Parsed setup block"
        );
        Ok(block)
    }

    pub fn parse(text: String) -> Result<Self> {
        let mut entries = Vec::new();
        let mut dimensions = SetupDimensions::default();

        for line in line_tokens(&text) {
            if let Some((key, value)) = extract_pair(line)? {
                entries.push((key.to_string(), value.to_string()));
            }
            if let Some((tag, value)) = scan_dimension_tag(line)? {
                trace!(tag = tag.marker(), value, "Found dimension tag");
                dimensions.apply(tag, value);
            }
        }

        Ok(SetupBlock { text, entries, dimensions })
    }

    /// Last value recorded for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Write every pair to the sink at top level
    pub fn publish<S: MetadataSink + ?Sized>(&self, sink: &mut S) {
        for (key, value) in &self.entries {
            sink.put(key.clone(), MetaValue::Text(value.clone()));
        }
    }
}

fn malformed(line: &str, reason: &'static str) -> SdtError {
    SdtError::MalformedSetupLine {
        line: line.to_string(),
        reason,
    }
}

/// Key/value pair carried by a trimmed setup line, selected by its prefix
///
/// * `#SP`, `#DI`, `#PR`, `#MP`: key runs from after the first `[` to the
///   next comma; value runs from after the last comma up to, not including,
///   the final character.
/// * `#TR`, `#WI`: key is the trimmed text before `[`; value sits between
///   `[` and the first `]`.
/// * Anything else carries no pair.
pub fn extract_pair(line: &str) -> Result<Option<(&str, &str)>> {
    const PARAMETER_PREFIXES: [&str; 4] = ["#SP", "#DI", "#PR", "#MP"];
    const TRACE_PREFIXES: [&str; 2] = ["#TR", "#WI"];

    if PARAMETER_PREFIXES.iter().any(|p| line.starts_with(p)) {
        let open = line.find('[');
        let search_from = open.unwrap_or(0);
        let comma = line[search_from..]
            .find(',')
            .map(|i| i + search_from)
            .ok_or_else(|| malformed(line, "missing ','"))?;
        let key = &line[open.map_or(0, |i| i + 1)..comma];

        // rfind cannot miss once `comma` exists.
        let last_comma = line.rfind(',').unwrap_or(comma);
        let end = line.len() - line.chars().next_back().map_or(0, char::len_utf8);
        if last_comma + 1 > end {
            return Err(malformed(line, "no value after last ','"));
        }
        Ok(Some((key, &line[last_comma + 1..end])))
    } else if TRACE_PREFIXES.iter().any(|p| line.starts_with(p)) {
        let open = line.find('[').ok_or_else(|| malformed(line, "missing '['"))?;
        let close = line.find(']').ok_or_else(|| malformed(line, "missing ']'"))?;
        if close <= open {
            return Err(malformed(line, "']' before '['"));
        }
        Ok(Some((trim_control(&line[..open]), &line[open + 1..close])))
    } else {
        Ok(None)
    }
}

/// First dimension tag found in `line`, with its decimal value
pub fn scan_dimension_tag(line: &str) -> Result<Option<(DimensionTag, i32)>> {
    for tag in DimensionTag::ALL {
        let marker = tag.marker();
        let Some(pos) = line.find(marker) else {
            continue;
        };
        let start = pos + marker.len();
        let end = line[start..]
            .find(']')
            .map(|i| i + start)
            .ok_or_else(|| malformed(line, "missing ']' after dimension tag"))?;
        let text = &line[start..end];
        let value = text.parse::<i32>().map_err(|source| SdtError::InvalidDimension {
            tag: marker,
            text: text.to_string(),
            source,
        })?;
        return Ok(Some((tag, value)));
    }
    Ok(None)
}
