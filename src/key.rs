//! # Key Signature Catalog
//!
//! The 15 key signature shapes (7 flats through 7 sharps), each describing
//! its seven scale degrees in ascending-fifths order. A degree record holds
//! the degree's letter (equivalently, its natural reference pitch), the
//! accidental the signature applies to that letter, and the mode that begins
//! on that degree. Fifths order makes the mode cycle a constant - Lydian,
//! Major, Dominant, Dorian, Minor, Phrygian, Diminished - so the major tonic
//! always sits at index 1 and the relative minor tonic at index 4.
//!
//! Three shapes are enharmonic extremes (Cb, Gb, C#) and are excluded from
//! the 12-member pool random selection draws from.
//!
//! Shapes also answer the question the speller needs: does this signature
//! already imply a given (letter, accidental) pair? If so the accidental is
//! redundant on the staff and is suppressed.

use serde::{Deserialize, Serialize};

use crate::mode::{ModeConstructor, ModeLabel};
use crate::pitch::{Accidental, IndependentPitch, LetterName};

/// The 15 key signature shapes, named by their major key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeySignature {
    CFlat,
    GFlat,
    DFlat,
    AFlat,
    EFlat,
    BFlat,
    F,
    C,
    G,
    D,
    A,
    E,
    B,
    FSharp,
    CSharp,
}

/// One scale degree of a key shape: the letter it sits on, the accidental
/// the signature gives that letter, and the mode built on the degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeRecord {
    pub letter: LetterName,
    pub accidental: Accidental,
    pub mode: ModeConstructor,
}

/// Scale letters in ascending-fifths order all start somewhere in this cycle.
const FIFTHS_LETTER_CYCLE: [LetterName; 7] = [
    LetterName::F,
    LetterName::C,
    LetterName::G,
    LetterName::D,
    LetterName::A,
    LetterName::E,
    LetterName::B,
];

/// Modes on the scale degrees, in the same ascending-fifths order.
const FIFTHS_MODE_CYCLE: [ModeConstructor; 7] = [
    ModeConstructor::Lydian,
    ModeConstructor::Major,
    ModeConstructor::Dominant,
    ModeConstructor::Dorian,
    ModeConstructor::Minor,
    ModeConstructor::Phrygian,
    ModeConstructor::Diminished,
];

impl KeySignature {
    pub const ALL: [KeySignature; 15] = [
        KeySignature::CFlat,
        KeySignature::GFlat,
        KeySignature::DFlat,
        KeySignature::AFlat,
        KeySignature::EFlat,
        KeySignature::BFlat,
        KeySignature::F,
        KeySignature::C,
        KeySignature::G,
        KeySignature::D,
        KeySignature::A,
        KeySignature::E,
        KeySignature::B,
        KeySignature::FSharp,
        KeySignature::CSharp,
    ];

    /// The 12 shapes random selection draws from: everything but the
    /// enharmonic extremes Cb, Gb, and C#.
    pub fn usable() -> &'static [KeySignature; 12] {
        &[
            KeySignature::DFlat,
            KeySignature::AFlat,
            KeySignature::EFlat,
            KeySignature::BFlat,
            KeySignature::F,
            KeySignature::C,
            KeySignature::G,
            KeySignature::D,
            KeySignature::A,
            KeySignature::E,
            KeySignature::B,
            KeySignature::FSharp,
        ]
    }

    /// Signed count on the circle of fifths: negative flats, positive sharps.
    pub fn fifths(self) -> i8 {
        match self {
            KeySignature::CFlat => -7,
            KeySignature::GFlat => -6,
            KeySignature::DFlat => -5,
            KeySignature::AFlat => -4,
            KeySignature::EFlat => -3,
            KeySignature::BFlat => -2,
            KeySignature::F => -1,
            KeySignature::C => 0,
            KeySignature::G => 1,
            KeySignature::D => 2,
            KeySignature::A => 3,
            KeySignature::E => 4,
            KeySignature::B => 5,
            KeySignature::FSharp => 6,
            KeySignature::CSharp => 7,
        }
    }

    /// The VexFlow-style key name the rendering collaborator consumes.
    pub fn vex_signature(self) -> &'static str {
        match self {
            KeySignature::CFlat => "Cb",
            KeySignature::GFlat => "Gb",
            KeySignature::DFlat => "Db",
            KeySignature::AFlat => "Ab",
            KeySignature::EFlat => "Eb",
            KeySignature::BFlat => "Bb",
            KeySignature::F => "F",
            KeySignature::C => "C",
            KeySignature::G => "G",
            KeySignature::D => "D",
            KeySignature::A => "A",
            KeySignature::E => "E",
            KeySignature::B => "B",
            KeySignature::FSharp => "F#",
            KeySignature::CSharp => "C#",
        }
    }

    /// The seven degree records in ascending-fifths order.
    ///
    /// For a signature of `f` fifths, entry `i` sits on letter
    /// `cycle[(f + i) mod 7]` and is sharped once `f + i` walks past B
    /// (flatted while it is still below F).
    pub fn degrees(self) -> [DegreeRecord; 7] {
        let fifths = self.fifths() as i16;
        let mut records = [DegreeRecord {
            letter: LetterName::C,
            accidental: Accidental::Natural,
            mode: ModeConstructor::Major,
        }; 7];
        for (i, record) in records.iter_mut().enumerate() {
            let slot = fifths + i as i16;
            record.letter = FIFTHS_LETTER_CYCLE[slot.rem_euclid(7) as usize];
            record.accidental = if slot >= 7 {
                Accidental::Sharp
            } else if slot < 0 {
                Accidental::Flat
            } else {
                Accidental::Natural
            };
            record.mode = FIFTHS_MODE_CYCLE[i];
        }
        records
    }

    /// The tonic of this shape in the given key mode: its letter and its
    /// concrete pitch class (letter's natural pitch plus the signature's
    /// accidental).
    pub fn tonic(self, mode: ModeLabel) -> (LetterName, IndependentPitch) {
        let record = self.degrees()[mode.fifths_index()];
        let pitch = record
            .letter
            .natural_pitch()
            .offset_by(record.accidental.offset());
        (record.letter, pitch)
    }

    /// `true` when this signature already marks `letter` with exactly
    /// `accidental`, making a printed accidental redundant.
    pub fn implies(self, letter: LetterName, accidental: Accidental) -> bool {
        self.degrees()
            .iter()
            .any(|record| record.letter == letter && record.accidental == accidental)
    }
}
