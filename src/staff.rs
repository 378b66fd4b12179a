//! # Staff Positioning
//!
//! Concrete notes and their placement on a five-line staff. A staff position
//! is an integer counted from the staff's bottom line (position 0): middle C
//! lands at -2 in treble clef and at 10 in bass clef, and each letter step up
//! adds one.
//!
//! `staff_adjust` clamps a whole chord into a clef's legible range with a
//! single whole-octave shift, preserving every letter and accidental. A chord
//! whose own span exceeds the clef's usable range has no defined clamping -
//! one whole-octave shift cannot bring all of its tones inside - and such
//! chords are not produced by the catalog.

use serde::{Deserialize, Serialize};

use crate::pitch::{Accidental, LetterName};

/// One concrete chord tone: a spelled letter with its true alteration, the
/// accidental actually printed (None when the key signature already implies
/// it), and an absolute octave (octave 4 contains middle C).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub letter: LetterName,
    pub accidental: Accidental,
    pub displayed: Option<Accidental>,
    pub octave: i8,
}

impl Note {
    /// Text spelling ("C", "F#", "Bbb") from letter and true accidental.
    pub fn spelling(&self) -> String {
        format!("{}{}", self.letter.as_str(), self.accidental.symbol())
    }
}

/// The two staff contexts chords are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    Treble,
    Bass,
}

/// Inclusive staff-position bounds of a clef's legible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffRange {
    pub lower: i32,
    pub upper: i32,
}

impl Clef {
    pub const ALL: [Clef; 2] = [Clef::Treble, Clef::Bass];

    /// Staff position of middle C (C4) in this clef.
    pub fn middle_c_position(self) -> i32 {
        match self {
            Clef::Treble => -2,
            Clef::Bass => 10,
        }
    }

    /// Legible staff-position range: G3..F6 for treble, B1..F4 for bass.
    pub fn range(self) -> StaffRange {
        match self {
            Clef::Treble => StaffRange {
                lower: -5,
                upper: 15,
            },
            Clef::Bass => StaffRange {
                lower: -5,
                upper: 13,
            },
        }
    }

    /// Octaves a chord's lowest tone may initially be placed in.
    pub fn initial_octaves(self) -> std::ops::RangeInclusive<i8> {
        match self {
            Clef::Treble => 3..=6,
            Clef::Bass => 1..=4,
        }
    }
}

/// Staff position of a letter + octave in a clef: middle C's position, plus
/// seven per octave away from octave 4, plus the letter's distance from C.
pub fn staff_position(letter: LetterName, octave: i8, clef: Clef) -> i32 {
    let octave_displacement = octave as i32 - 4;
    clef.middle_c_position() + 7 * octave_displacement + letter.position() as i32
}

/// The whole-octave shift that brings `positions` inside `range`: zero when
/// already inside, otherwise enough octaves down to pull the top in or up to
/// push the bottom in. Assumes the chord's span fits the range; a wider chord
/// has no defined adjustment.
pub fn required_octave_displacement(positions: &[i32], range: StaffRange) -> i32 {
    let max = positions.iter().copied().max().unwrap_or(0);
    let min = positions.iter().copied().min().unwrap_or(0);
    if max > range.upper {
        (range.upper - max).div_euclid(7)
    } else if min < range.lower {
        (range.lower - min).div_euclid(7) + 1
    } else {
        0
    }
}

/// A new chord with every note transposed by `octaves` whole octaves.
/// Letters and accidentals are untouched.
pub fn octave_transpose(notes: &[Note], octaves: i32) -> Vec<Note> {
    notes
        .iter()
        .map(|note| Note {
            octave: note.octave + octaves as i8,
            ..note.clone()
        })
        .collect()
}

/// Clamp a chord into the clef's legible range with one uniform whole-octave
/// shift.
pub fn staff_adjust(notes: &[Note], clef: Clef) -> Vec<Note> {
    let positions: Vec<i32> = notes
        .iter()
        .map(|note| staff_position(note.letter, note.octave, clef))
        .collect();
    let displacement = required_octave_displacement(&positions, clef.range());
    octave_transpose(notes, displacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(letter: LetterName, octave: i8) -> Note {
        Note {
            letter,
            accidental: Accidental::Natural,
            displayed: None,
            octave,
        }
    }

    #[test]
    fn test_staff_positions_against_known_landmarks() {
        // Middle C
        assert_eq!(staff_position(LetterName::C, 4, Clef::Treble), -2);
        assert_eq!(staff_position(LetterName::C, 4, Clef::Bass), 10);
        // Clef range endpoints
        assert_eq!(staff_position(LetterName::G, 3, Clef::Treble), -5);
        assert_eq!(staff_position(LetterName::F, 6, Clef::Treble), 15);
        assert_eq!(staff_position(LetterName::B, 1, Clef::Bass), -5);
        assert_eq!(staff_position(LetterName::F, 4, Clef::Bass), 13);
    }

    #[test]
    fn test_chord_in_range_not_adjusted() {
        let chord = vec![note(LetterName::C, 4)];
        assert_eq!(staff_adjust(&chord, Clef::Treble), chord);
    }

    #[test]
    fn test_monad_below_range_adjusted_up_in_treble_clef() {
        let chord = vec![note(LetterName::C, 3)];
        let expected = vec![note(LetterName::C, 4)];
        assert_eq!(staff_adjust(&chord, Clef::Treble), expected);
    }

    #[test]
    fn test_monad_below_range_adjusted_up_in_bass_clef() {
        let chord = vec![note(LetterName::C, 1)];
        let expected = vec![note(LetterName::C, 2)];
        assert_eq!(staff_adjust(&chord, Clef::Bass), expected);
    }

    #[test]
    fn test_monad_above_range_adjusted_down_in_treble_clef() {
        let chord = vec![note(LetterName::C, 7)];
        let expected = vec![note(LetterName::C, 6)];
        assert_eq!(staff_adjust(&chord, Clef::Treble), expected);
    }

    #[test]
    fn test_monad_above_range_adjusted_down_in_bass_clef() {
        let chord = vec![note(LetterName::C, 5)];
        let expected = vec![note(LetterName::C, 4)];
        assert_eq!(staff_adjust(&chord, Clef::Bass), expected);
    }

    #[test]
    fn test_triad_above_bass_range_shifts_down_one_octave() {
        // G4 sits at position 14, one above bass clef's F4 ceiling
        let chord = vec![
            note(LetterName::C, 4),
            note(LetterName::E, 4),
            note(LetterName::G, 4),
        ];
        let expected = vec![
            note(LetterName::C, 3),
            note(LetterName::E, 3),
            note(LetterName::G, 3),
        ];
        assert_eq!(staff_adjust(&chord, Clef::Bass), expected);
    }

    #[test]
    fn test_octave_transpose_touches_only_octaves() {
        let chord = vec![
            Note {
                letter: LetterName::E,
                accidental: Accidental::Flat,
                displayed: Some(Accidental::Flat),
                octave: 4,
            },
            note(LetterName::G, 4),
        ];
        let up = octave_transpose(&chord, 2);
        assert_eq!(up[0].letter, LetterName::E);
        assert_eq!(up[0].accidental, Accidental::Flat);
        assert_eq!(up[0].displayed, Some(Accidental::Flat));
        assert_eq!(up[0].octave, 6);
        assert_eq!(up[1].octave, 6);

        let back = octave_transpose(&up, -2);
        assert_eq!(back, chord);
    }

    #[test]
    fn test_displacement_spans_multiple_octaves() {
        // Relative-octave spellings start far below any clef range and must
        // come up in one multi-octave jump.
        let positions = vec![-30, -28, -26];
        assert_eq!(
            required_octave_displacement(&positions, Clef::Treble.range()),
            4
        );
    }
}
