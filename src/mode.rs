//! # Modes and Note Identities
//!
//! Two related ideas live here:
//!
//! - `ModeLabel` - the two key-mode categories ("Major" / "minor") a chord
//!   can be heard in. These drive root selection.
//! - `ModeConstructor` - the scale flavor a chord structure spells itself
//!   through. Each constructor owns a fixed 12-entry identity table mapping a
//!   chromatic offset above the root to a scale degree and a chromatic
//!   alteration count (the "incidental"). The degree is what the speller
//!   uses: degree - 1 is the tone's letter-step distance from the root's
//!   letter.
//!
//! The Major and Minor tables serve double duty as the key-mode identity
//! tables that resolve a root offset into a scale degree + incidental for the
//! roman numeral context.
//!
//! Two tables are deliberately non-scalar: Phrygian carries the
//! augmented-sixth identities at offsets 6 and 10 (its only consumers are the
//! augmented-sixth chords), and Diminished identifies offset 9 as a
//! diminished seventh rather than Locrian's minor seventh.

use serde::{Deserialize, Serialize};

/// Key-mode category: the tonal context a chord is rooted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeLabel {
    Major,
    #[serde(rename = "minor")]
    Minor,
}

impl ModeLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ModeLabel::Major => "Major",
            ModeLabel::Minor => "minor",
        }
    }

    /// Where this mode's tonic sits in a key shape's ascending-fifths degree
    /// list (Lydian, Major, Dominant, Dorian, Minor, Phrygian, Diminished).
    pub fn fifths_index(self) -> usize {
        match self {
            ModeLabel::Major => 1,
            ModeLabel::Minor => 4,
        }
    }

    /// The identity table resolving root offsets in this key mode.
    pub fn identities(self) -> &'static [NoteIdentity; 12] {
        match self {
            ModeLabel::Major => ModeConstructor::Major.identities(),
            ModeLabel::Minor => ModeConstructor::Minor.identities(),
        }
    }
}

/// The scale flavor a chord structure resolves its spelling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeConstructor {
    Major,
    Minor,
    Dominant,
    Lydian,
    Dorian,
    Phrygian,
    Diminished,
    DiminishedMinor,
    AugmentedDominant,
}

/// How a chromatic offset above a reference tone is heard in a mode: which
/// scale degree it belongs to, and how many semitones of chromatic alteration
/// it carries relative to that degree's diatonic pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteIdentity {
    /// Scale degree, 1 through 7.
    pub degree: u8,
    /// Signed chromatic alteration count applied to the diatonic degree.
    pub incidental: i8,
}

const fn id(degree: u8, incidental: i8) -> NoteIdentity {
    NoteIdentity { degree, incidental }
}

impl ModeConstructor {
    /// The 12-entry identity table for this mode, indexed by chromatic
    /// offset 0..=11 above the reference tone.
    pub fn identities(self) -> &'static [NoteIdentity; 12] {
        match self {
            ModeConstructor::Major => const { &[
                id(1, 0),
                id(2, -1),
                id(2, 0),
                id(3, -1),
                id(3, 0),
                id(4, 0),
                id(4, 1),
                id(5, 0),
                id(6, -1),
                id(6, 0),
                id(7, -1),
                id(7, 0),
            ] },
            ModeConstructor::Minor => const { &[
                id(1, 0),
                id(2, -1),
                id(2, 0),
                id(3, 0),
                id(3, 1),
                id(4, 0),
                id(4, 1),
                id(5, 0),
                id(6, 0),
                id(6, 1),
                id(7, 0),
                id(7, 1),
            ] },
            ModeConstructor::Dominant => const { &[
                id(1, 0),
                id(2, -1),
                id(2, 0),
                id(3, -1),
                id(3, 0),
                id(4, 0),
                id(4, 1),
                id(5, 0),
                id(6, -1),
                id(6, 0),
                id(7, 0),
                id(7, 1),
            ] },
            ModeConstructor::Lydian => const { &[
                id(1, 0),
                id(2, -1),
                id(2, 0),
                id(3, -1),
                id(3, 0),
                id(4, -1),
                id(4, 0),
                id(5, 0),
                id(6, -1),
                id(6, 0),
                id(7, -1),
                id(7, 0),
            ] },
            ModeConstructor::Dorian => const { &[
                id(1, 0),
                id(2, -1),
                id(2, 0),
                id(3, 0),
                id(3, 1),
                id(4, 0),
                id(4, 1),
                id(5, 0),
                id(6, -1),
                id(6, 0),
                id(7, 0),
                id(7, 1),
            ] },
            // Augmented-sixth identities at 6 and 10: over an Ab-type root
            // the offsets 6 and 10 spell as raised 4 and raised 6, not as the
            // Phrygian scale's diatonic members.
            ModeConstructor::Phrygian => const { &[
                id(1, 0),
                id(2, 0),
                id(2, 1),
                id(3, 0),
                id(3, 1),
                id(4, 0),
                id(4, 1),
                id(5, 0),
                id(6, 0),
                id(6, 1),
                id(6, 2),
                id(7, 1),
            ] },
            // Offset 9 is the diminished seventh (degree 7), which the
            // fully-diminished templates require.
            ModeConstructor::Diminished => const { &[
                id(1, 0),
                id(2, 0),
                id(2, 1),
                id(3, 0),
                id(3, 1),
                id(4, 0),
                id(5, 0),
                id(5, 1),
                id(6, 0),
                id(7, 0),
                id(7, 1),
                id(7, 2),
            ] },
            ModeConstructor::DiminishedMinor => const { &[
                id(1, 0),
                id(2, -1),
                id(2, 0),
                id(3, 0),
                id(3, 1),
                id(4, 0),
                id(5, 0),
                id(5, 1),
                id(6, 0),
                id(6, 1),
                id(7, 0),
                id(7, 1),
            ] },
            ModeConstructor::AugmentedDominant => const { &[
                id(1, 0),
                id(2, -1),
                id(2, 0),
                id(3, -1),
                id(3, 0),
                id(4, 0),
                id(4, 1),
                id(5, 0),
                id(5, 1),
                id(6, 0),
                id(7, 0),
                id(7, 1),
            ] },
        }
    }
}

/// The tonal context a chord instance was rooted in: key mode, chromatic
/// root offset, the scale degree + incidental that offset resolves to, and
/// the roman numeral describing the chord at that degree.
#[derive(Debug, Clone, Serialize)]
pub struct RomanNumeralContext {
    pub mode: ModeLabel,
    pub root_offset: u8,
    pub degree: u8,
    pub incidental: i8,
    pub numeral: String,
}

const UPPER_NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];
const LOWER_NUMERALS: [&str; 7] = ["i", "ii", "iii", "iv", "v", "vi", "vii"];

/// The bare roman numeral for a scale degree, cased by chord quality
/// (uppercase for major-quality sonorities).
pub fn degree_numeral(degree: u8, major_quality: bool) -> &'static str {
    let index = ((degree - 1) % 7) as usize;
    if major_quality {
        UPPER_NUMERALS[index]
    } else {
        LOWER_NUMERALS[index]
    }
}

/// Text label for a possibly-altered scale degree ("5", "b6", "#4").
pub fn degree_label(degree: u8, incidental: i8) -> String {
    let prefix = match incidental {
        i if i < -1 => "bb",
        -1 => "b",
        0 => "",
        1 => "#",
        _ => "##",
    };
    format!("{}{}", prefix, degree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_identities_match_major_scale() {
        let table = ModeConstructor::Major.identities();
        // Diatonic members carry no incidental
        for (offset, degree) in [(0, 1), (2, 2), (4, 3), (5, 4), (7, 5), (9, 6), (11, 7)] {
            assert_eq!(table[offset as usize], id(degree, 0));
        }
        // Chromatic neighbors resolve to an adjacent degree
        assert_eq!(table[1], id(2, -1)); // flat 2 (Neapolitan root)
        assert_eq!(table[6], id(4, 1)); // raised 4 (applied leading tones)
        assert_eq!(table[10], id(7, -1)); // flat 7 (borrowed subtonic)
    }

    #[test]
    fn test_minor_identities_match_natural_minor() {
        let table = ModeConstructor::Minor.identities();
        for (offset, degree) in [(0, 1), (2, 2), (3, 3), (5, 4), (7, 5), (8, 6), (10, 7)] {
            assert_eq!(table[offset as usize], id(degree, 0));
        }
    }

    #[test]
    fn test_chord_tone_degrees_per_constructor() {
        // Each constructor must identify its chord's template intervals as
        // stacked thirds (degrees 1 3 5 7) so letters never repeat.
        let cases: [(ModeConstructor, &[u8]); 6] = [
            (ModeConstructor::Major, &[0, 4, 7]),
            (ModeConstructor::Minor, &[0, 3, 7]),
            (ModeConstructor::Dominant, &[0, 4, 7, 10]),
            (ModeConstructor::Lydian, &[0, 4, 7, 11]),
            (ModeConstructor::Diminished, &[0, 3, 6, 9]),
            (ModeConstructor::DiminishedMinor, &[0, 3, 6, 10]),
        ];
        for (constructor, template) in cases {
            let table = constructor.identities();
            let degrees: Vec<u8> = template.iter().map(|&t| table[t as usize].degree).collect();
            assert_eq!(
                degrees,
                (0..template.len()).map(|i| (1 + 2 * i) as u8).collect::<Vec<_>>(),
                "{:?} template must stack in thirds",
                constructor
            );
        }
    }

    #[test]
    fn test_phrygian_augmented_sixth_identity() {
        let table = ModeConstructor::Phrygian.identities();
        assert_eq!(table[10].degree, 6); // augmented sixth, not minor seventh
        assert_eq!(table[6].degree, 4); // French sixth's raised fourth
        assert_eq!(table[7].degree, 5); // German sixth's perfect fifth
    }

    #[test]
    fn test_augmented_dominant_raised_fifth() {
        let table = ModeConstructor::AugmentedDominant.identities();
        assert_eq!(table[8], id(5, 1));
    }

    #[test]
    fn test_degree_numeral_casing() {
        assert_eq!(degree_numeral(5, true), "V");
        assert_eq!(degree_numeral(2, false), "ii");
        assert_eq!(degree_numeral(7, false), "vii");
    }

    #[test]
    fn test_degree_label_prefixes() {
        assert_eq!(degree_label(6, -1), "b6");
        assert_eq!(degree_label(4, 1), "#4");
        assert_eq!(degree_label(5, 0), "5");
    }
}
