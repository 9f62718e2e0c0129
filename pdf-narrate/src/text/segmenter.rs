//! Splitting extracted text into normalized units and fixed-size batches.

use super::Batch;

/// Default units per synthesis request. The free VoiceRSS plan caps request
/// size at 100KB; three sentences stay comfortably under it.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Split raw text into normalized units.
///
/// Units are the text split on the literal `". "` delimiter. Empty input
/// yields no units.
pub fn split_units(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(". ").map(normalize_unit).collect()
}

/// Normalize one unit: remove carriage returns and newlines, then remove
/// literal double-space occurrences in a single left-to-right pass (a run of
/// three spaces leaves one behind). Idempotent.
fn normalize_unit(unit: &str) -> String {
    unit.replace('\r', "").replace('\n', "").replace("  ", "")
}

/// Group raw text into ordered batches of `batch_size` units.
///
/// The final batch holds the remainder (one up to `batch_size` units).
/// Indices are 1-based and follow source order.
pub fn segment(raw: &str, batch_size: usize) -> Vec<Batch> {
    let batch_size = batch_size.max(1);
    let units = split_units(raw);

    units
        .chunks(batch_size)
        .enumerate()
        .map(|(i, run)| Batch::new(i + 1, run.to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_segment_scenario() {
        let text = "Hello world. This is a test. Another one. Last sentence.";
        let batches = segment(text, 3);

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].index, 1);
        assert_eq!(
            batches[0].units,
            vec!["Hello world", "This is a test", "Another one"]
        );
        assert_eq!(batches[1].index, 2);
        // No ". " follows the final period, so it stays on the last unit.
        assert_eq!(batches[1].units, vec!["Last sentence."]);
    }

    #[test]
    fn test_empty_text_yields_no_batches() {
        assert!(split_units("").is_empty());
        assert!(segment("", 3).is_empty());
    }

    #[test]
    fn test_normalization_strips_line_breaks() {
        let units = split_units("First\r\nline. Sec\nond");
        assert_eq!(units, vec!["Firstline", "Second"]);
    }

    #[test]
    fn test_normalization_removes_double_spaces_single_pass() {
        // Four spaces vanish entirely, three leave one behind.
        assert_eq!(normalize_unit("a    b"), "ab");
        assert_eq!(normalize_unit("a   b"), "a b");
        assert_eq!(normalize_unit("a  b"), "ab");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for raw in ["a   b", " \r\n x  y ", "plain text", "   "] {
            let once = normalize_unit(raw);
            assert_eq!(normalize_unit(&once), once);
        }
    }

    #[test]
    fn test_exact_multiple_has_no_short_tail() {
        let batches = segment("a. b. c. d. e. f", 3);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].units.len(), 3);
        assert_eq!(batches[1].units.len(), 3);
    }

    #[test]
    fn test_batch_size_one() {
        let batches = segment("a. b. c", 1);
        assert_eq!(batches.len(), 3);
        let indices: Vec<usize> = batches.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_order_preserved_across_batches() {
        let batches = segment("a. b. c. d. e", 2);
        let flattened: Vec<String> = batches.iter().flat_map(|b| b.units.clone()).collect();
        assert_eq!(flattened, vec!["a", "b", "c", "d", "e"]);
    }

    proptest! {
        #[test]
        fn prop_batches_partition_units(
            units in prop::collection::vec("[a-z]{1,12}( [a-z]{1,12}){0,4}", 0..40),
            batch_size in 1usize..6,
        ) {
            let raw = units.join(". ");
            let expected = split_units(&raw);
            let batches = segment(&raw, batch_size);

            let flattened: Vec<String> =
                batches.iter().flat_map(|b| b.units.clone()).collect();
            prop_assert_eq!(flattened, expected);

            for (i, batch) in batches.iter().enumerate() {
                prop_assert_eq!(batch.index, i + 1);
                if i + 1 < batches.len() {
                    prop_assert_eq!(batch.units.len(), batch_size);
                } else {
                    prop_assert!(!batch.units.is_empty());
                    prop_assert!(batch.units.len() <= batch_size);
                }
            }
        }
    }
}
