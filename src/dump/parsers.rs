extern crate nom;

use nom::{bytes::complete::take, number::complete::be_u16, sequence::tuple, IResult};

use super::types::{padding_for, FieldType, TlvRecord};

pub const FILE_HEADER_LENGTH: usize = 4;

pub fn parse_file_header(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take(FILE_HEADER_LENGTH)(input)
}

/// 4-byte tag, big-endian type code, big-endian payload length.
pub fn parse_record_header(input: &[u8]) -> IResult<&[u8], ([u8; 4], u16, u16)> {
    let (input, tag) = take(4usize)(input)?;
    let (input, (field_type, length)) = tuple((be_u16, be_u16))(input)?;
    let mut tag_bytes = [0u8; 4];
    tag_bytes.copy_from_slice(tag);

    Ok((input, (tag_bytes, field_type, length)))
}

/// Padding cut short by the end of the file is accepted.
pub fn skip_padding(input: &[u8], length: u16) -> IResult<&[u8], &[u8]> {
    let padding = padding_for(length).min(input.len());
    take(padding)(input)
}

pub fn parse_record(input: &[u8]) -> IResult<&[u8], TlvRecord> {
    let (input, (tag, field_type, length)) = parse_record_header(input)?;
    let (input, payload) = take(usize::from(length))(input)?;
    let (input, _) = skip_padding(input, length)?;

    Ok((
        input,
        TlvRecord {
            tag,
            field_type: FieldType::from(field_type),
            length,
            payload: payload.to_vec(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_record_header_with_no_error() {
        let input: &[u8] = &[b'D', b'U', b'R', b'A', 0, 6, 0, 4, 0, 0, 1, 44];
        let Ok((rest, (tag, field_type, length))) = parse_record_header(input) else {
            panic!("parse_record_header failed.")
        };
        assert_eq!(&tag, b"DURA");
        assert_eq!(field_type, 6);
        assert_eq!(length, 4);
        assert_eq!(rest, &[0, 0, 1, 44]);
    }

    #[test]
    fn it_parses_record_and_skips_padding() {
        let input: &[u8] = &[
            b'N', b'A', b'M', b'1', 0, 7, 0, 5, b'B', b'o', b'r', b'i', 0, 0, 0, 0, b'X',
        ];
        let Ok((rest, record)) = parse_record(input) else {
            panic!("parse_record failed.")
        };
        assert_eq!(&record.tag, b"NAM1");
        assert_eq!(record.field_type, FieldType::Char);
        assert_eq!(record.payload, b"Bori\0");
        assert_eq!(rest, b"X");
    }

    #[test]
    fn it_accepts_padding_missing_at_end_of_input() {
        let input: &[u8] = &[b'S', b'H', b'R', b'T', 0, 2, 0, 1, 1, 0];
        let Ok((rest, record)) = parse_record(input) else {
            panic!("parse_record failed.")
        };
        assert_eq!(record.payload, vec![1]);
        assert!(rest.is_empty());
    }

    #[test]
    fn it_fails_on_truncated_payload() {
        let input: &[u8] = &[b'T', b'I', b'M', b'E', 0, 6, 0, 4, 0x65];
        assert!(parse_record(input).is_err());
    }

    #[test]
    fn it_fails_on_short_file_header() {
        assert!(parse_file_header(&[1, 2]).is_err());
    }
}
