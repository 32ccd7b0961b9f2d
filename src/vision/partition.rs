//! Per-character box partition
//!
//! Recognizers report one box per line. Each known character gets an equal
//! horizontal slice of that box at full line height.

use super::{filter_known, segment, CharacterRegion, RecognizedRegion};
use crate::dictionary::PhoneticDictionary;
use crate::geometry::PixelRect;

/// Split a line into boxes for its dictionary-known characters.
///
/// Slice `i` of `n` spans `left + i * width / n` to `left + (i + 1) * width / n`,
/// computed in integers so the slices tile the line exactly.
pub fn partition_line(line: &RecognizedRegion, dict: &PhoneticDictionary) -> Vec<CharacterRegion> {
    let known = filter_known(&segment(&line.text), dict);
    let n = known.len() as i64;
    if n == 0 {
        return Vec::new();
    }

    let bounds = line.bounds;
    let left = bounds.left as i64;
    let width = bounds.width() as i64;
    let edge = |i: i64| (left + i * width / n) as i32;

    known
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            let i = i as i64;
            CharacterRegion {
                character: unit.character,
                bounds: PixelRect::new(edge(i), bounds.top, edge(i + 1), bounds.bottom),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> PhoneticDictionary {
        PhoneticDictionary::from_tsv("愛\tㄞˋ\n你\tㄋㄧˇ\n我\tㄨㄛˇ\n")
    }

    #[test]
    fn test_two_known_characters() {
        let line = RecognizedRegion::new("愛你", PixelRect::new(0, 10, 100, 40));
        let regions = partition_line(&line, &dict());

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].character, '愛');
        assert_eq!(regions[0].bounds, PixelRect::new(0, 10, 50, 40));
        assert_eq!(regions[1].character, '你');
        assert_eq!(regions[1].bounds, PixelRect::new(50, 10, 100, 40));
    }

    #[test]
    fn test_slices_tile_line() {
        let line = RecognizedRegion::new("我愛你", PixelRect::new(13, 0, 113, 30));
        let regions = partition_line(&line, &dict());

        assert_eq!(regions.len(), 3);
        assert_eq!(regions.first().unwrap().bounds.left, 13);
        assert_eq!(regions.last().unwrap().bounds.right, 113);
        for pair in regions.windows(2) {
            assert_eq!(pair[0].bounds.right, pair[1].bounds.left);
        }
        let total: i32 = regions.iter().map(|r| r.bounds.width()).sum();
        assert_eq!(total, 100);
        assert!(regions.iter().all(|r| r.bounds.height() == 30));
    }

    #[test]
    fn test_width_counts_only_known() {
        // Unknown characters are dropped before slicing
        let line = RecognizedRegion::new("a愛b你c", PixelRect::new(0, 0, 100, 20));
        let regions = partition_line(&line, &dict());

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].character, '愛');
        assert_eq!(regions[0].bounds, PixelRect::new(0, 0, 50, 20));
        assert_eq!(regions[1].bounds, PixelRect::new(50, 0, 100, 20));
    }

    #[test]
    fn test_no_known_characters() {
        let line = RecognizedRegion::new("hello", PixelRect::new(0, 0, 100, 20));
        assert!(partition_line(&line, &dict()).is_empty());

        let empty = RecognizedRegion::new("", PixelRect::new(0, 0, 100, 20));
        assert!(partition_line(&empty, &dict()).is_empty());
    }
}
