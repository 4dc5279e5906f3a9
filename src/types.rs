// src/types.rs
use std::fmt;

/// Scalar value stored in the metadata table
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Text(String),
}

impl MetaValue {
    /// Integer view of the value, for any of the integer variants
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetaValue::Short(v) => Some(*v as i64),
            MetaValue::Int(v) => Some(*v as i64),
            MetaValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            MetaValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the name of the value kind as a string
    pub fn kind(&self) -> &'static str {
        match self {
            MetaValue::Short(_) => "short",
            MetaValue::Int(_) => "int",
            MetaValue::Long(_) => "long",
            MetaValue::Float(_) => "float",
            MetaValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Short(v) => write!(f, "{}", v),
            MetaValue::Int(v) => write!(f, "{}", v),
            MetaValue::Long(v) => write!(f, "{}", v),
            MetaValue::Float(v) => write!(f, "{}", v),
            MetaValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i16> for MetaValue {
    fn from(v: i16) -> Self {
        MetaValue::Short(v)
    }
}

impl From<i32> for MetaValue {
    fn from(v: i32) -> Self {
        MetaValue::Int(v)
    }
}

// Unsigned 8/16-bit fields are stored widened, like the instrument software does.
impl From<u8> for MetaValue {
    fn from(v: u8) -> Self {
        MetaValue::Int(v as i32)
    }
}

impl From<u16> for MetaValue {
    fn from(v: u16) -> Self {
        MetaValue::Int(v as i32)
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Long(v)
    }
}

impl From<f32> for MetaValue {
    fn from(v: f32) -> Self {
        MetaValue::Float(v)
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::Text(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::Text(v.to_string())
    }
}

/// Byte order of a stream. SPC hardware writes little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    pub fn is_big_endian(&self) -> bool {
        matches!(self, ByteOrder::Big)
    }
}

/// Decoded value of the file header's validity code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderValidity {
    Valid,
    NotValid,
    Unknown(u16),
}

impl HeaderValidity {
    pub const VALID_CODE: u16 = 0x5555;
    pub const NOT_VALID_CODE: u16 = 0x1111;

    pub fn from_code(code: u16) -> Self {
        match code {
            Self::VALID_CODE => HeaderValidity::Valid,
            Self::NOT_VALID_CODE => HeaderValidity::NotValid,
            other => HeaderValidity::Unknown(other),
        }
    }
}

/// Kind of SDT file, as announced by the `ID` entry of the info block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// `.set` files, setup only
    SetupScript,
    /// Normal `.sdt` files, setup and data
    SetupAndData,
    /// Continuous flow mode measurement, data only
    FlowData,
    /// Written by `SPC_save_data_to_sdtfile`, data only
    DllData,
    /// FIFO mode: decay, FCS, FIDA, FILDA and MCS curves per routing channel
    FcsData,
    Unknown,
}

impl FileKind {
    pub const SETUP_IDENTIFIER: &'static str = "SPC Setup Script File";
    pub const DATA_IDENTIFIER: &'static str = "SPC Setup & Data File";
    pub const FLOW_DATA_IDENTIFIER: &'static str = "SPC Flow Data File";
    pub const DLL_DATA_IDENTIFIER: &'static str = "SPC DLL Data File";
    pub const FCS_DATA_IDENTIFIER: &'static str = "SPC FCS Data File";

    pub fn from_identifier(id: &str) -> Self {
        match id.trim() {
            Self::SETUP_IDENTIFIER => FileKind::SetupScript,
            Self::DATA_IDENTIFIER => FileKind::SetupAndData,
            Self::FLOW_DATA_IDENTIFIER => FileKind::FlowData,
            Self::DLL_DATA_IDENTIFIER => FileKind::DllData,
            Self::FCS_DATA_IDENTIFIER => FileKind::FcsData,
            _ => FileKind::Unknown,
        }
    }

    /// Whether the file carries measurement data blocks
    pub fn has_data(&self) -> bool {
        !matches!(self, FileKind::SetupScript | FileKind::Unknown)
    }
}

/// Image dimensions recovered from the setup text and the measurement descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
    pub time_bins: i32,
    pub channels: i32,
    pub timepoints: i32,
}
