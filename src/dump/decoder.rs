use byteorder::{BigEndian, ByteOrder};
use tracing::debug;

use super::parsers::{parse_file_header, parse_record};
use super::types::{DecodedField, FieldType, FieldValue, TlvRecord};

/// Walks the records of a dump. Iteration ends at the first record that
/// the remaining input cannot hold.
pub struct Decoder<'a> {
    input: &'a [u8],
}

impl<'a> Decoder<'a> {
    /// Returns `None` when the input is too short for the file header.
    pub fn new(data: &'a [u8]) -> Option<Self> {
        let (input, _) = parse_file_header(data).ok()?;
        Some(Self { input })
    }
}

impl Iterator for Decoder<'_> {
    type Item = TlvRecord;

    fn next(&mut self) -> Option<TlvRecord> {
        if self.input.is_empty() {
            return None;
        }
        match parse_record(self.input) {
            Ok((rest, record)) => {
                self.input = rest;
                Some(record)
            }
            Err(_) => {
                debug!(
                    dropped = self.input.len(),
                    "truncated record at end of dump"
                );
                self.input = &[];
                None
            }
        }
    }
}

pub fn decode_field(record: &TlvRecord) -> DecodedField {
    let payload = record.payload.as_slice();
    let raw = match record.field_type {
        FieldType::CustomLength => {
            let end = usize::from(record.length).min(payload.len());
            Some(payload[..end].to_vec())
        }
        _ => None,
    };

    DecodedField {
        tag: tag_to_string(&record.tag),
        length: record.length,
        raw,
        value: decode_value(record.field_type, record.length, payload),
        counts: None,
    }
}

fn decode_value(field_type: FieldType, length: u16, payload: &[u8]) -> Option<FieldValue> {
    match field_type {
        FieldType::Byte => payload.first().map(|byte| FieldValue::Int(u32::from(*byte))),
        FieldType::Boolean => payload.first().map(|byte| FieldValue::Bool(*byte != 0)),
        FieldType::Short | FieldType::UnsignedShort => payload
            .get(..2)
            .map(|bytes| FieldValue::Int(u32::from(BigEndian::read_u16(bytes)))),
        FieldType::Long | FieldType::UnsignedLong => payload
            .get(..4)
            .map(|bytes| FieldValue::Int(BigEndian::read_u32(bytes))),
        FieldType::Char => {
            // The declared length counts the terminator.
            let end = usize::from(length).saturating_sub(1).min(payload.len());
            Some(FieldValue::Text(sanitize_ascii(&payload[..end])))
        }
        FieldType::CustomLength | FieldType::Unknown(_) => None,
    }
}

/// Replaces every byte outside printable ASCII with `?`.
pub fn sanitize_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&byte| {
            if (0x20..=0x7e).contains(&byte) {
                char::from(byte)
            } else {
                '?'
            }
        })
        .collect()
}

fn tag_to_string(tag: &[u8; 4]) -> String {
    let end = tag
        .iter()
        .rposition(|&byte| byte != 0 && byte != b' ')
        .map_or(0, |index| index + 1);
    sanitize_ascii(&tag[..end])
}
