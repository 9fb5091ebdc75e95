use base64::{engine::general_purpose::STANDARD, Engine};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Byte,
    Boolean,
    Short,
    UnsignedShort,
    Long,
    UnsignedLong,
    Char,
    CustomLength,
    Unknown(u16),
}

impl FieldType {
    pub fn code(self) -> u16 {
        match self {
            FieldType::Byte => 1,
            FieldType::Boolean => 2,
            FieldType::Short => 3,
            FieldType::UnsignedShort => 4,
            FieldType::Long => 5,
            FieldType::UnsignedLong => 6,
            FieldType::Char => 7,
            FieldType::CustomLength => 20,
            FieldType::Unknown(code) => code,
        }
    }
}

impl From<u16> for FieldType {
    fn from(code: u16) -> Self {
        match code {
            1 => FieldType::Byte,
            2 => FieldType::Boolean,
            3 => FieldType::Short,
            4 => FieldType::UnsignedShort,
            5 => FieldType::Long,
            6 => FieldType::UnsignedLong,
            7 => FieldType::Char,
            20 => FieldType::CustomLength,
            other => FieldType::Unknown(other),
        }
    }
}

/// One framed record as it appears in the dump, padding excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvRecord {
    pub tag: [u8; 4],
    pub field_type: FieldType,
    pub length: u16,
    pub payload: Vec<u8>,
}

impl TlvRecord {
    pub fn padding(&self) -> usize {
        padding_for(self.length)
    }

    /// Record header, payload and zeroed padding in dump layout.
    pub fn encode(&self) -> Vec<u8> {
        use byteorder::{BigEndian, ByteOrder};

        let mut header = [0u8; 8];
        header[..4].copy_from_slice(&self.tag);
        BigEndian::write_u16(&mut header[4..6], self.field_type.code());
        BigEndian::write_u16(&mut header[6..], self.length);

        let mut out = Vec::with_capacity(header.len() + self.payload.len() + self.padding());
        out.extend_from_slice(&header);
        out.extend_from_slice(&self.payload);
        out.resize(out.len() + self.padding(), 0);
        out
    }
}

/// Bytes needed after a payload of `length` bytes to reach 4-byte alignment.
pub fn padding_for(length: u16) -> usize {
    (4 - usize::from(length) % 4) % 4
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(u32),
    Text(String),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<u32> {
        match self {
            FieldValue::Int(value) => Some(*value),
            FieldValue::Bool(value) => Some(u32::from(*value)),
            FieldValue::Text(_) => None,
        }
    }

    /// Loose truthiness: zero, false, `""` and `"0"` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(value) => *value,
            FieldValue::Int(value) => *value != 0,
            FieldValue::Text(text) => !text.is_empty() && text != "0",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedField {
    pub tag: String,
    pub length: u16,
    #[serde(serialize_with = "serialize_raw")]
    pub raw: Option<Vec<u8>>,
    pub value: Option<FieldValue>,
    /// Sparse item counts, attached by heap expansion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<BTreeMap<String, u32>>,
}

impl DecodedField {
    pub fn int(&self) -> Option<u32> {
        self.value.as_ref().and_then(FieldValue::as_int)
    }

    pub fn is_truthy(&self) -> bool {
        self.value.as_ref().is_some_and(FieldValue::is_truthy)
    }
}

fn serialize_raw<S: Serializer>(raw: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
    match raw {
        Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
        None => serializer.serialize_none(),
    }
}

/// Decoded fields keyed by tag, in the order the tags first appeared.
pub type TagMap = IndexMap<String, DecodedField>;
