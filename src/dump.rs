pub mod decoder;
pub mod heap;
pub mod parsers;
pub mod types;

use crate::error::Result;
use decoder::{decode_field, Decoder};
use tracing::{debug, warn};
use types::TagMap;

/// Decodes a whole `stats.dmp` image and expands its heap fields.
pub fn build_tag_map(data: &[u8]) -> Result<TagMap> {
    let mut tags = decode_records(data);
    heap::expand_heaps(&mut tags)?;
    Ok(tags)
}

/// Decodes every record into a [`TagMap`] without heap expansion.
pub fn decode_records(data: &[u8]) -> TagMap {
    let mut tags = TagMap::new();
    let Some(decoder) = Decoder::new(data) else {
        warn!(length = data.len(), "stats dump is shorter than its header");
        return tags;
    };

    for record in decoder {
        // Empty records carry nothing to decode.
        if record.length == 0 {
            continue;
        }
        let field = decode_field(&record);
        debug!(
            tag = %field.tag,
            field_type = record.field_type.code(),
            length = record.length,
            "decoded record"
        );
        tags.insert(field.tag.clone(), field);
    }
    tags
}
