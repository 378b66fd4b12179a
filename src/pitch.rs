//! # Pitch Space
//!
//! The two cyclic alphabets every other module is built on, plus the
//! five-valued accidental scale that connects them:
//!
//! - `IndependentPitch` - the 12 chromatic pitch classes, named by solfège
//!   syllable so a pitch class carries no spelling. Arithmetic is mod 12.
//! - `LetterName` - the 7 natural note names. Arithmetic is mod 7; stepping
//!   past B is how octave boundaries are detected during spelling.
//! - `Accidental` - double-flat through double-sharp. A spelled note is a
//!   letter plus the signed semitone distance from the letter's natural
//!   pitch class, and that distance must fit in [-2, +2].
//!
//! All wrap-around arithmetic lives here as named operations with explicit
//! range contracts rather than inline `% 12` / `% 7` expressions.

use serde::{Deserialize, Serialize};

/// The seven letter names, ordered by distance from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl LetterName {
    pub const ALL: [LetterName; 7] = [
        LetterName::C,
        LetterName::D,
        LetterName::E,
        LetterName::F,
        LetterName::G,
        LetterName::A,
        LetterName::B,
    ];

    /// 0-based step distance from C (C = 0, D = 1, ... B = 6).
    pub fn position(self) -> u8 {
        match self {
            LetterName::C => 0,
            LetterName::D => 1,
            LetterName::E => 2,
            LetterName::F => 3,
            LetterName::G => 4,
            LetterName::A => 5,
            LetterName::B => 6,
        }
    }

    /// The letter at a given step distance from C, reduced mod 7.
    pub fn from_position(position: u8) -> LetterName {
        Self::ALL[(position % 7) as usize]
    }

    /// Step this letter forward by `steps` letter names, wrapping past B.
    pub fn stepped_by(self, steps: u8) -> LetterName {
        Self::from_position(self.position() + steps % 7)
    }

    /// The pitch class this letter has with no accidental applied.
    pub fn natural_pitch(self) -> IndependentPitch {
        match self {
            LetterName::C => IndependentPitch::Do,
            LetterName::D => IndependentPitch::Re,
            LetterName::E => IndependentPitch::Mi,
            LetterName::F => IndependentPitch::Fa,
            LetterName::G => IndependentPitch::So,
            LetterName::A => IndependentPitch::La,
            LetterName::B => IndependentPitch::Ti,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LetterName::C => "C",
            LetterName::D => "D",
            LetterName::E => "E",
            LetterName::F => "F",
            LetterName::G => "G",
            LetterName::A => "A",
            LetterName::B => "B",
        }
    }
}

/// The 12 chromatic pitch classes, independent of spelling.
///
/// Syllables run chromatically from C: Do Ba Re Na Mi Fa Ve So Pe La Ke Ti.
/// The seven syllables that name natural pitches (Do Re Mi Fa So La Ti) map
/// 1:1 onto the letters C D E F G A B; the five in-between syllables name the
/// black-key pitch classes without committing to a sharp or flat spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndependentPitch {
    Do,
    Ba,
    Re,
    Na,
    Mi,
    Fa,
    Ve,
    So,
    Pe,
    La,
    Ke,
    Ti,
}

impl IndependentPitch {
    pub const ALL: [IndependentPitch; 12] = [
        IndependentPitch::Do,
        IndependentPitch::Ba,
        IndependentPitch::Re,
        IndependentPitch::Na,
        IndependentPitch::Mi,
        IndependentPitch::Fa,
        IndependentPitch::Ve,
        IndependentPitch::So,
        IndependentPitch::Pe,
        IndependentPitch::La,
        IndependentPitch::Ke,
        IndependentPitch::Ti,
    ];

    /// Chromatic index from C (Do = 0 ... Ti = 11).
    pub fn index(self) -> u8 {
        match self {
            IndependentPitch::Do => 0,
            IndependentPitch::Ba => 1,
            IndependentPitch::Re => 2,
            IndependentPitch::Na => 3,
            IndependentPitch::Mi => 4,
            IndependentPitch::Fa => 5,
            IndependentPitch::Ve => 6,
            IndependentPitch::So => 7,
            IndependentPitch::Pe => 8,
            IndependentPitch::La => 9,
            IndependentPitch::Ke => 10,
            IndependentPitch::Ti => 11,
        }
    }

    /// The pitch class at a chromatic index, reduced mod 12.
    pub fn from_index(index: u8) -> IndependentPitch {
        Self::ALL[(index % 12) as usize]
    }

    /// This pitch class displaced by `offset` semitones (offset may be
    /// negative; the result wraps around the 12-cycle).
    pub fn offset_by(self, offset: i8) -> IndependentPitch {
        let index = (self.index() as i8 + offset).rem_euclid(12);
        Self::from_index(index as u8)
    }

    /// Signed circular distance from `other` to `self`, wrapped into
    /// [-6, +6]: the smallest displacement that reaches `self` from `other`.
    pub fn signed_distance(self, other: IndependentPitch) -> i8 {
        let mut distance = self.index() as i8 - other.index() as i8;
        if distance > 6 {
            distance -= 12;
        }
        if distance < -6 {
            distance += 12;
        }
        distance
    }
}

/// The five alteration levels a spelled note may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// Semitone offset from the natural letter (-2 ... +2).
    pub fn offset(self) -> i8 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    /// The accidental for a semitone offset, or `None` outside [-2, +2] -
    /// triple alterations have no legal spelling.
    pub fn from_offset(offset: i8) -> Option<Accidental> {
        match offset {
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    /// This accidental raised or lowered by `by` semitones, if the result is
    /// still representable.
    pub fn shifted(self, by: i8) -> Option<Accidental> {
        Self::from_offset(self.offset() + by)
    }

    /// Text suffix for spellings ("Bb", "F#", "Ebb"); natural is empty.
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        }
    }
}
