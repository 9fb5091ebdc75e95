use byteorder::{BigEndian, ByteOrder};
use std::collections::BTreeMap;
use tracing::warn;

use super::types::TagMap;
use crate::error::{Error, Result};
use crate::mappings::{category_items, CountableHeap, COUNTABLE_HEAPS};
use crate::stats::types::MAX_PLAYERS;

/// Attaches sparse `counts` to every heap tag present in `tags`.
pub fn expand_heaps(tags: &mut TagMap) -> Result<()> {
    for heap in COUNTABLE_HEAPS.iter() {
        for slot in 0..MAX_PLAYERS {
            let tag = format!("{}{}", heap.code, slot);
            let Some(field) = tags.get_mut(&tag) else {
                continue;
            };
            let Some(raw) = field.raw.as_deref() else {
                continue;
            };
            let counts = expand_counts(heap, &tag, raw)?;
            if !counts.is_empty() {
                field.counts = Some(counts);
            }
        }
    }
    Ok(())
}

/// Reads `raw` as big-endian u32 counters and names each non-zero one.
pub fn expand_counts(heap: &CountableHeap, tag: &str, raw: &[u8]) -> Result<BTreeMap<String, u32>> {
    let words = raw.chunks_exact(4);
    if !words.remainder().is_empty() {
        warn!(
            tag,
            length = raw.len(),
            "heap length is not a multiple of 4, ignoring trailing bytes"
        );
    }

    let category = heap.category();
    let mut counts = BTreeMap::new();
    let mut words = words.enumerate().filter_map(|(index, word)| {
        let count = BigEndian::read_u32(word);
        (count != 0).then_some((index, count))
    });
    let Some(items) = category_items(category) else {
        if words.next().is_some() {
            warn!(
                tag,
                category,
                heap = heap.name,
                "no item table for heap category, leaving counts unnamed"
            );
        }
        return Ok(counts);
    };
    for (index, count) in words {
        let name = items.get(index).ok_or_else(|| Error::HeapIndexOverflow {
            tag: tag.to_string(),
            heap: heap.name,
            category,
            index,
            len: items.len(),
        })?;
        counts.insert((*name).to_string(), count);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::types::DecodedField;
    use crate::mappings::find_heap;

    fn heap_field(tag: &str, raw: Vec<u8>) -> DecodedField {
        DecodedField {
            tag: tag.to_string(),
            length: raw.len() as u16,
            raw: Some(raw),
            value: None,
            counts: None,
        }
    }

    #[test]
    fn it_expands_sparse_counts_from_category_table() {
        let mut tags = TagMap::new();
        tags.insert(String::from("CRA3"), heap_field("CRA3", vec![0, 0, 0, 2, 0, 0, 0, 0]));
        tags.insert(String::from("UNB3"), heap_field("UNB3", vec![0, 0, 0, 2, 0, 0, 0, 0]));
        expand_heaps(&mut tags).unwrap();

        let crates = tags["CRA3"].counts.clone().unwrap();
        assert_eq!(crates, BTreeMap::from([(String::from("Armor"), 2)]));
        let units = tags["UNB3"].counts.clone().unwrap();
        assert_eq!(units, BTreeMap::from([(String::from("AMCV"), 2)]));
    }

    #[test]
    fn it_leaves_all_zero_heaps_without_counts() {
        let mut tags = TagMap::new();
        tags.insert(String::from("INK0"), heap_field("INK0", vec![0; 12]));
        expand_heaps(&mut tags).unwrap();
        assert_eq!(tags["INK0"].counts, None);
    }

    #[test]
    fn it_names_counts_by_position() {
        let heap = find_heap("INB").unwrap();
        let raw = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 1, 0];
        let counts = expand_counts(heap, "INB1", &raw).unwrap();
        assert_eq!(
            counts,
            BTreeMap::from([(String::from("SHK"), 5), (String::from("ENGINEER"), 256)])
        );
    }

    #[test]
    fn it_reports_index_overflow() {
        let heap = find_heap("PLK").unwrap();
        let mut raw = vec![0u8; 12 * 4];
        raw.extend_from_slice(&[0, 0, 0, 1]);
        let Err(error) = expand_counts(heap, "PLK0", &raw) else {
            panic!("expected HeapIndexOverflow");
        };
        assert!(matches!(
            error,
            Error::HeapIndexOverflow { index: 12, len: 12, .. }
        ));
        assert_eq!(
            error.to_string(),
            "heap PLK0 (Planes Killed): count index 12 is beyond the PL table (12 entries)"
        );
    }

    #[test]
    fn it_leaves_counts_empty_for_category_without_table() {
        let heap = find_heap("VSB").unwrap();
        assert!(expand_counts(heap, "VSB0", &[0; 8]).unwrap().is_empty());
        assert!(expand_counts(heap, "VSB0", &[0, 0, 0, 1]).unwrap().is_empty());
    }

    #[test]
    fn it_ignores_trailing_partial_word() {
        let heap = find_heap("CRA").unwrap();
        let counts = expand_counts(heap, "CRA0", &[0, 0, 0, 1, 9, 9]).unwrap();
        assert_eq!(counts, BTreeMap::from([(String::from("Armor"), 1)]));
    }
}
