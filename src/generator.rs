//! # Chord Generation Pipeline
//!
//! The core of the crate: select a tonal context, concretize and spell the
//! chord, place it on a staff, apply an inversion, and attach the quiz
//! questions. One call builds one immutable `Chord`; a batch is just repeated
//! independent calls.
//!
//! Randomness is always injected - every selection function takes
//! `&mut impl Rng`, so a seeded `StdRng` reproduces a batch exactly.
//!
//! ## Selection order
//!
//! Per chord: key signature, chord family (from the user filter), structure,
//! inversion, key mode, root offset, then the derived roman numeral context.
//! A (structure, mode) pair whose common root-offset list is empty is
//! excluded from the mode draw up front; it can never surface as a failed
//! draw afterwards.
//!
//! ## Spelling
//!
//! Templates are pitch-class offsets from the root. Each tone's letter comes
//! from the structure's mode constructor (degree - 1 letter steps above the
//! root letter), its pitch class from the root's pitch class plus the offset,
//! and its accidental from the signed circular distance between the two -
//! which must land within the five legal alteration levels. A running letter
//! counter bumps the relative octave every time the letter position falls
//! back toward C. Templates spanning more than seven letter steps would need
//! more than this single counter; the catalog contains none.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ChordGenError;
use crate::key::KeySignature;
use crate::mode::{ModeLabel, RomanNumeralContext};
use crate::pitch::{Accidental, IndependentPitch, LetterName};
use crate::question::{self, Question};
use crate::staff::{self, Clef, Note};
use crate::structure::{ChordStructure, ChordType, Inversion};

/// Which chord families a round may draw from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChordTypeFilter {
    pub triads: bool,
    pub sevenths: bool,
    pub chromatic_variations: bool,
    pub mode_mixture: bool,
    pub applied_chords: bool,
}

impl Default for ChordTypeFilter {
    fn default() -> Self {
        Self {
            triads: true,
            sevenths: true,
            chromatic_variations: true,
            mode_mixture: true,
            applied_chords: true,
        }
    }
}

impl ChordTypeFilter {
    /// The families this filter admits, in catalog order.
    pub fn enabled(&self) -> Vec<ChordType> {
        ChordType::ALL
            .into_iter()
            .filter(|chord_type| match chord_type {
                ChordType::Triad => self.triads,
                ChordType::Seventh => self.sevenths,
                ChordType::ChromaticVariation => self.chromatic_variations,
                ChordType::ModeMixture => self.mode_mixture,
                ChordType::AppliedChord => self.applied_chords,
            })
            .collect()
    }
}

/// Whether roots are restricted to the degrees a structure commonly occurs
/// on, or may fall on any degree the structure is valid on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootPool {
    #[default]
    Common,
    Any,
}

/// Caller configuration for a generation round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorOptions {
    pub chord_types: ChordTypeFilter,
    pub root_pool: RootPool,
}

/// A chord's concretized root: its pitch class, spelled letter, and
/// accidental.
#[derive(Debug, Clone, Serialize)]
pub struct RootDescription {
    pub pitch: IndependentPitch,
    pub accidental: Accidental,
    pub letter: LetterName,
}

impl RootDescription {
    /// Text spelling of the root ("G", "F#", "Db").
    pub fn spelling(&self) -> String {
        format!("{}{}", self.letter.as_str(), self.accidental.symbol())
    }
}

/// One fully-built quiz chord: everything the rendering collaborator needs
/// to draw it and the scoring collaborator needs to quiz on it.
#[derive(Debug, Clone, Serialize)]
pub struct Chord {
    pub clef: Clef,
    pub key_signature: KeySignature,
    pub vex_key_signature: &'static str,
    pub mode_label: ModeLabel,
    pub chord_type: ChordType,
    pub structure: ChordStructure,
    pub inversion: Inversion,
    pub inversion_label: &'static str,
    pub root: RootDescription,
    pub context: RomanNumeralContext,
    pub notes: Vec<Note>,
    pub questions: Vec<Question>,
}

/// Build a batch of `num_qs` independent quiz chords.
///
/// This is the library's main entry point. Each chord is one atomic
/// construction; no state is shared between them beyond the RNG.
pub fn generate<R: Rng>(
    num_qs: usize,
    options: &GeneratorOptions,
    rng: &mut R,
) -> Result<Vec<Chord>, ChordGenError> {
    if num_qs == 0 {
        return Err(ChordGenError::InvalidOptions {
            message: "number of questions must be positive".to_string(),
        });
    }
    if options.chord_types.enabled().is_empty() {
        return Err(ChordGenError::InvalidOptions {
            message: "no chord types enabled".to_string(),
        });
    }
    (0..num_qs)
        .map(|_| random_chord_context(rng, options))
        .collect()
}

/// Build one random, correctly spelled chord with its question set.
pub fn random_chord_context<R: Rng>(
    rng: &mut R,
    options: &GeneratorOptions,
) -> Result<Chord, ChordGenError> {
    let key_signature = choose_key_signature(rng)?;
    let chord_type = choose_chord_type(rng, &options.chord_types)?;
    let structure = choose_chord_structure(rng, chord_type)?;
    let inversion = choose_inversion(rng, structure)?;
    let mode_label = choose_mode_label(rng, structure)?;
    let context = random_roman_numeral_context(rng, structure, mode_label, options.root_pool)?;
    let root = concretize_root(key_signature, &context);
    let spelled = spell_chord(structure, &root, key_signature)?;

    let clef = choose_clef(rng)?;
    let initial_octave = choose_initial_octave(rng, clef);
    let placed = staff::staff_adjust(
        &staff::octave_transpose(&spelled, initial_octave as i32),
        clef,
    );
    // Raising rotated tones can push the top past the clef ceiling, so the
    // inverted chord is clamped a second time.
    let notes = staff::staff_adjust(&invert(&placed, inversion.steps()), clef);

    let mut chord = Chord {
        clef,
        key_signature,
        vex_key_signature: key_signature.vex_signature(),
        mode_label,
        chord_type,
        structure,
        inversion,
        inversion_label: inversion.label(structure.template().len()),
        root,
        context,
        notes,
        questions: Vec::new(),
    };
    chord.questions = question::build_questions(&chord, rng);
    Ok(chord)
}

/// A random key signature from the usable 12-member pool.
pub fn choose_key_signature<R: Rng>(rng: &mut R) -> Result<KeySignature, ChordGenError> {
    KeySignature::usable()
        .choose(rng)
        .copied()
        .ok_or_else(|| empty_pool("key signatures"))
}

/// A random chord family from those the user enabled.
pub fn choose_chord_type<R: Rng>(
    rng: &mut R,
    filter: &ChordTypeFilter,
) -> Result<ChordType, ChordGenError> {
    filter
        .enabled()
        .choose(rng)
        .copied()
        .ok_or_else(|| empty_pool("enabled chord types"))
}

/// A random structure from the family's member set.
pub fn choose_chord_structure<R: Rng>(
    rng: &mut R,
    chord_type: ChordType,
) -> Result<ChordStructure, ChordGenError> {
    chord_type
        .structures()
        .choose(rng)
        .copied()
        .ok_or_else(|| empty_pool(chord_type.label()))
}

/// A random inversion from those the structure supports.
pub fn choose_inversion<R: Rng>(
    rng: &mut R,
    structure: ChordStructure,
) -> Result<Inversion, ChordGenError> {
    structure
        .inversions()
        .choose(rng)
        .copied()
        .ok_or_else(|| empty_pool("inversions"))
}

/// A random key mode among those the structure actually occurs in. Modes
/// with an empty common root-offset list never enter the draw.
pub fn choose_mode_label<R: Rng>(
    rng: &mut R,
    structure: ChordStructure,
) -> Result<ModeLabel, ChordGenError> {
    structure
        .mode_labels()
        .choose(rng)
        .copied()
        .ok_or_else(|| ChordGenError::EmptySelection {
            pool: format!("mode labels for {:?}", structure),
        })
}

/// A random clef.
pub fn choose_clef<R: Rng>(rng: &mut R) -> Result<Clef, ChordGenError> {
    Clef::ALL
        .choose(rng)
        .copied()
        .ok_or_else(|| empty_pool("clefs"))
}

fn choose_initial_octave<R: Rng>(rng: &mut R, clef: Clef) -> i8 {
    rng.gen_range(clef.initial_octaves())
}

/// Pick a root offset for the structure in the given mode and derive its
/// roman numeral context from the key mode's identity table.
pub fn random_roman_numeral_context<R: Rng>(
    rng: &mut R,
    structure: ChordStructure,
    mode: ModeLabel,
    pool: RootPool,
) -> Result<RomanNumeralContext, ChordGenError> {
    let offsets = match pool {
        RootPool::Common => structure.common_root_offsets(mode),
        RootPool::Any => structure.possible_root_offsets(mode),
    };
    let root_offset = offsets
        .choose(rng)
        .copied()
        .ok_or_else(|| ChordGenError::EmptySelection {
            pool: format!("root offsets for {:?} in {} mode", structure, mode.as_str()),
        })?;
    let identity = mode.identities()[root_offset as usize];
    Ok(RomanNumeralContext {
        mode,
        root_offset,
        degree: identity.degree,
        incidental: identity.incidental,
        numeral: structure.numeral(identity.degree, identity.incidental),
    })
}

/// Resolve a roman numeral context into a concrete root within a key: the
/// tonic's letter stepped by the degree, the tonic's pitch class displaced by
/// the root offset, and the shape's accidental at that degree shifted by the
/// incidental.
///
/// A shift past a double alteration collapses to natural. That normalization
/// applies to roots only, never to inner chord tones - a known limitation
/// kept from the original behavior.
pub fn concretize_root(key: KeySignature, context: &RomanNumeralContext) -> RootDescription {
    let degrees = key.degrees();
    let tonic_index = context.mode.fifths_index();
    let (tonic_letter, tonic_pitch) = key.tonic(context.mode);

    let letter = tonic_letter.stepped_by(context.degree - 1);
    let pitch = tonic_pitch.offset_by(context.root_offset as i8);

    // Stepping one scale degree moves two slots in fifths order.
    let slot = (tonic_index + (context.degree as usize - 1) * 2) % 7;
    let unaltered = degrees[slot].accidental;
    let accidental = unaltered
        .shifted(context.incidental)
        .unwrap_or(Accidental::Natural);

    RootDescription {
        pitch,
        accidental,
        letter,
    }
}

/// Spell a structure's template above a concretized root: one note per
/// template tone, in root position, with relative octaves starting at 0.
pub fn spell_chord(
    structure: ChordStructure,
    root: &RootDescription,
    key: KeySignature,
) -> Result<Vec<Note>, ChordGenError> {
    let identities = structure.mode_constructor().identities();

    // The sentinel makes the first tone register as a letter-position drop,
    // bumping the displacement from -1 to 0.
    let mut previous_position = u8::MAX;
    let mut octave: i8 = -1;

    let mut notes = Vec::with_capacity(structure.template().len());
    for &interval in structure.template() {
        let identity = identities[interval as usize];
        let letter = root.letter.stepped_by(identity.degree - 1);
        let pitch = root.pitch.offset_by(interval as i8);

        let distance = pitch.signed_distance(letter.natural_pitch());
        let accidental = Accidental::from_offset(distance).ok_or_else(|| {
            ChordGenError::UnspellableTone {
                letter: letter.as_str().to_string(),
                distance,
            }
        })?;

        if letter.position() < previous_position {
            octave += 1;
        }
        previous_position = letter.position();

        let displayed = if key.implies(letter, accidental) {
            None
        } else {
            Some(accidental)
        };

        notes.push(Note {
            letter,
            accidental,
            displayed,
            octave,
        });
    }
    Ok(notes)
}

/// A new note array rotated `steps` times: each step pops the lowest note,
/// raises it an octave, and appends it. Zero steps is root position.
pub fn invert(notes: &[Note], steps: usize) -> Vec<Note> {
    let mut rotated = notes.to_vec();
    for _ in 0..steps {
        let mut head = rotated.remove(0);
        head.octave += 1;
        rotated.push(head);
    }
    rotated
}

fn empty_pool(pool: &str) -> ChordGenError {
    ChordGenError::EmptySelection {
        pool: pool.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn context(
        structure: ChordStructure,
        mode: ModeLabel,
        root_offset: u8,
    ) -> RomanNumeralContext {
        let identity = mode.identities()[root_offset as usize];
        RomanNumeralContext {
            mode,
            root_offset,
            degree: identity.degree,
            incidental: identity.incidental,
            numeral: structure.numeral(identity.degree, identity.incidental),
        }
    }

    #[test]
    fn test_concretize_dominant_root_in_c_major() {
        let ctx = context(ChordStructure::MajorTriad, ModeLabel::Major, 7);
        let root = concretize_root(KeySignature::C, &ctx);
        assert_eq!(root.letter, LetterName::G);
        assert_eq!(root.accidental, Accidental::Natural);
        assert_eq!(root.pitch, IndependentPitch::So);
    }

    #[test]
    fn test_concretize_neapolitan_root_in_c_major() {
        let ctx = context(ChordStructure::NeapolitanSixth, ModeLabel::Major, 1);
        let root = concretize_root(KeySignature::C, &ctx);
        assert_eq!(root.letter, LetterName::D);
        assert_eq!(root.accidental, Accidental::Flat);
        assert_eq!(root.pitch, IndependentPitch::Ba);
        assert_eq!(root.spelling(), "Db");
    }

    #[test]
    fn test_concretize_applied_leading_tone_root() {
        // viio7/V in C major roots on the raised fourth degree, F#
        let ctx = context(ChordStructure::SevenDimSevenOfFive, ModeLabel::Major, 6);
        let root = concretize_root(KeySignature::C, &ctx);
        assert_eq!(root.letter, LetterName::F);
        assert_eq!(root.accidental, Accidental::Sharp);
        assert_eq!(root.pitch, IndependentPitch::Ve);
    }

    #[test]
    fn test_concretize_german_sixth_root_in_a_flat() {
        // bVI of Ab is Fb: the shape's F natural lowered by the incidental
        let ctx = context(ChordStructure::GermanSixth, ModeLabel::Major, 8);
        let root = concretize_root(KeySignature::AFlat, &ctx);
        assert_eq!(root.letter, LetterName::F);
        assert_eq!(root.accidental, Accidental::Flat);
        assert_eq!(root.pitch, IndependentPitch::Mi);
    }

    #[test]
    fn test_spell_tonic_triad_in_c_suppresses_all_accidentals() {
        let ctx = context(ChordStructure::MajorTriad, ModeLabel::Major, 0);
        let root = concretize_root(KeySignature::C, &ctx);
        let notes = spell_chord(ChordStructure::MajorTriad, &root, KeySignature::C).unwrap();

        let letters: Vec<LetterName> = notes.iter().map(|n| n.letter).collect();
        assert_eq!(letters, vec![LetterName::C, LetterName::E, LetterName::G]);
        assert!(notes.iter().all(|n| n.accidental == Accidental::Natural));
        assert!(notes.iter().all(|n| n.displayed.is_none()));
        assert_eq!(
            notes.iter().map(|n| n.octave).collect::<Vec<_>>(),
            vec![0, 0, 0]
        );
    }

    #[test]
    fn test_spell_dominant_in_c_minor_shows_raised_leading_tone() {
        // V in C minor is G-B-D; B natural contradicts the key's Bb and must
        // carry a printed natural sign.
        let ctx = context(ChordStructure::MajorTriad, ModeLabel::Minor, 7);
        let root = concretize_root(KeySignature::EFlat, &ctx);
        assert_eq!(root.spelling(), "G");

        let notes = spell_chord(ChordStructure::MajorTriad, &root, KeySignature::EFlat).unwrap();
        assert_eq!(notes[1].letter, LetterName::B);
        assert_eq!(notes[1].accidental, Accidental::Natural);
        assert_eq!(notes[1].displayed, Some(Accidental::Natural));
        // G and D are already in the key
        assert_eq!(notes[0].displayed, None);
        assert_eq!(notes[2].displayed, None);
    }

    #[test]
    fn test_spell_bumps_octave_at_letter_wraparound() {
        // The major tonic of A minor spells A-C#-E: the C# crosses the
        // letter cycle's top and lands an octave above the root.
        let ctx = context(ChordStructure::TonicMajorInMinor, ModeLabel::Minor, 0);
        let root = concretize_root(KeySignature::C, &ctx);
        assert_eq!(root.spelling(), "A");

        let notes =
            spell_chord(ChordStructure::TonicMajorInMinor, &root, KeySignature::C).unwrap();
        assert_eq!(
            notes.iter().map(|n| n.letter).collect::<Vec<_>>(),
            vec![LetterName::A, LetterName::C, LetterName::E]
        );
        assert_eq!(notes[1].accidental, Accidental::Sharp);
        assert_eq!(notes[1].displayed, Some(Accidental::Sharp));
        assert_eq!(
            notes.iter().map(|n| n.octave).collect::<Vec<_>>(),
            vec![0, 1, 1]
        );
    }

    #[test]
    fn test_spell_borrowed_subdominant_raises_the_sixth() {
        // IV in A minor is the borrowed D-F#-A major triad
        let ctx = context(
            ChordStructure::SubdominantMajorInMinor,
            ModeLabel::Minor,
            5,
        );
        let root = concretize_root(KeySignature::C, &ctx);
        assert_eq!(root.spelling(), "D");
        let notes =
            spell_chord(ChordStructure::SubdominantMajorInMinor, &root, KeySignature::C).unwrap();
        assert_eq!(notes[1].spelling(), "F#");
        assert_eq!(notes[1].displayed, Some(Accidental::Sharp));
    }

    #[test]
    fn test_spell_diminished_seventh_reaches_double_flat() {
        // viio7 in Bb minor (Db shape) roots on Ab; its seventh spells Gbb
        let ctx = context(ChordStructure::FullyDiminishedSeventh, ModeLabel::Minor, 10);
        let root = concretize_root(KeySignature::DFlat, &ctx);
        assert_eq!(root.spelling(), "Ab");

        let notes =
            spell_chord(ChordStructure::FullyDiminishedSeventh, &root, KeySignature::DFlat)
                .unwrap();
        assert_eq!(notes[3].letter, LetterName::G);
        assert_eq!(notes[3].accidental, Accidental::DoubleFlat);
    }

    #[test]
    fn test_invert_shifts_notes() {
        let chord = vec![
            note(LetterName::C, 4),
            note(LetterName::E, 4),
            note(LetterName::G, 4),
        ];
        let inverted = invert(&chord, 2);
        let expected = vec![
            note(LetterName::G, 4),
            note(LetterName::C, 5),
            note(LetterName::E, 5),
        ];
        assert_eq!(inverted, expected);
    }

    #[test]
    fn test_full_rotation_restores_order_an_octave_up() {
        let chord = vec![
            note(LetterName::D, 4),
            note(LetterName::F, 4),
            note(LetterName::A, 4),
        ];
        let rotated = invert(&chord, 3);
        for (original, cycled) in chord.iter().zip(&rotated) {
            assert_eq!(original.letter, cycled.letter);
            assert_eq!(original.accidental, cycled.accidental);
            assert_eq!(cycled.octave, original.octave + 1);
        }
    }

    #[test]
    fn test_root_spelling_matches_first_spelled_tone() {
        for structure in [
            ChordStructure::MajorTriad,
            ChordStructure::NeapolitanSixth,
            ChordStructure::GermanSixth,
            ChordStructure::SevenDimSevenOfFive,
        ] {
            for &mode in &structure.mode_labels() {
                for &offset in structure.common_root_offsets(mode) {
                    let ctx = context(structure, mode, offset);
                    let root = concretize_root(KeySignature::C, &ctx);
                    let notes = spell_chord(structure, &root, KeySignature::C).unwrap();
                    assert_eq!(
                        notes[0].spelling(),
                        root.spelling(),
                        "{:?} root disagrees with its first tone",
                        structure
                    );
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_batch() {
        let options = GeneratorOptions::default();
        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);
        let a = generate(8, &options, &mut first).unwrap();
        let b = generate(8, &options, &mut second).unwrap();
        assert_eq!(format!("{:?}", a), format!("{:?}", b));
    }

    #[test]
    fn test_zero_questions_rejected() {
        let options = GeneratorOptions::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(0, &options, &mut rng).is_err());
    }

    #[test]
    fn test_empty_filter_rejected() {
        let options = GeneratorOptions {
            chord_types: ChordTypeFilter {
                triads: false,
                sevenths: false,
                chromatic_variations: false,
                mode_mixture: false,
                applied_chords: false,
            },
            root_pool: RootPool::Common,
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate(1, &options, &mut rng),
            Err(ChordGenError::InvalidOptions { .. })
        ));
    }

    fn note(letter: LetterName, octave: i8) -> Note {
        Note {
            letter,
            accidental: Accidental::Natural,
            displayed: None,
            octave,
        }
    }
}
