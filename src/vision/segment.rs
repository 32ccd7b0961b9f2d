//! Text segmentation
//!
//! Units are single `char`s. Multi-codepoint graphemes and words are not
//! grouped.

use crate::dictionary::PhoneticDictionary;

/// One segmented unit with its position in the source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub character: char,
    pub index: usize,
}

/// Split text into one unit per character
pub fn segment(text: &str) -> Vec<Unit> {
    text.chars()
        .enumerate()
        .map(|(index, character)| Unit { character, index })
        .collect()
}

/// Keep only units with a dictionary entry, in original order
pub fn filter_known(units: &[Unit], dict: &PhoneticDictionary) -> Vec<Unit> {
    units
        .iter()
        .copied()
        .filter(|unit| dict.contains_key(unit.character))
        .collect()
}

/// Preferred reading of every unit, falling back to the character itself
pub fn readings_for(text: &str, dict: &PhoneticDictionary) -> Vec<(char, String)> {
    segment(text)
        .into_iter()
        .map(|unit| (unit.character, dict.reading_or_self(unit.character)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> PhoneticDictionary {
        PhoneticDictionary::from_tsv("愛\tㄞˋ\n你\tㄋㄧˇ\n")
    }

    #[test]
    fn test_segment_one_unit_per_char() {
        let units = segment("我愛你");
        assert_eq!(units.len(), 3);
        assert_eq!(units[1], Unit { character: '愛', index: 1 });
    }

    #[test]
    fn test_segment_empty() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_filter_known_preserves_order_and_index() {
        let units = segment("我愛,你!");
        let known = filter_known(&units, &dict());

        assert_eq!(
            known,
            vec![
                Unit { character: '愛', index: 1 },
                Unit { character: '你', index: 3 },
            ]
        );
    }

    #[test]
    fn test_filter_known_none() {
        let units = segment("hello");
        assert!(filter_known(&units, &dict()).is_empty());
    }

    #[test]
    fn test_readings_for() {
        let readings = readings_for("愛我", &dict());
        assert_eq!(
            readings,
            vec![('愛', "ㄞˋ".to_string()), ('我', "我".to_string())]
        );
    }
}
