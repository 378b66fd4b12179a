//! # Question Building
//!
//! Derives the quiz question set for a finished chord: prompt, ordering
//! flag, answer key, and a choice set whose entries each carry a stable
//! keyboard shortcut.
//!
//! Not every question applies to every chord. Applied chords skip the role
//! question (their relationship to the key is the whole premise), the
//! augmented sixths have no triad/seventh quality and only one position, and
//! the continuation question only exists where a conventional resolution is
//! defined.
//!
//! Note naming is the one order-sensitive question: its answers are the
//! letters of the final (inverted) note order, lowest to highest, so it stays
//! synchronized with the rendered chord by construction. All other questions
//! are unordered and their choice lists are shuffled.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::generator::Chord;
use crate::mode::{degree_label, ModeLabel};
use crate::pitch::LetterName;
use crate::structure::{ChordStructure, ChordType};

/// The kinds of questions a chord can pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestionKind {
    NoteNames,
    Root,
    Degree,
    Role,
    Numeral,
    Quality,
    Inversion,
    FollowedBy,
}

impl QuestionKind {
    pub fn full_name(self) -> &'static str {
        match self {
            QuestionKind::NoteNames => "Letter Positions",
            QuestionKind::Root => "Root Note",
            QuestionKind::Degree => "Degree",
            QuestionKind::Role => "Role",
            QuestionKind::Numeral => "Numeral",
            QuestionKind::Quality => "Quality",
            QuestionKind::Inversion => "Inversion",
            QuestionKind::FollowedBy => "Followed By",
        }
    }

    /// Short label for per-round stat displays.
    pub fn short_name(self) -> &'static str {
        match self {
            QuestionKind::NoteNames => "Notes",
            QuestionKind::Root => "Root",
            QuestionKind::Degree => "Degree",
            QuestionKind::Role => "Role",
            QuestionKind::Numeral => "Numeral",
            QuestionKind::Quality => "Chord",
            QuestionKind::Inversion => "Inversion",
            QuestionKind::FollowedBy => "Follow",
        }
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            QuestionKind::NoteNames => "LP",
            QuestionKind::Root => "RN",
            QuestionKind::Degree => "Deg",
            QuestionKind::Role => "R",
            QuestionKind::Numeral => "Num",
            QuestionKind::Quality => "Qlt",
            QuestionKind::Inversion => "Inv",
            QuestionKind::FollowedBy => "Fol",
        }
    }

    fn prompt(self, mode: ModeLabel) -> String {
        match self {
            QuestionKind::NoteNames => {
                "Name the letter positions from lowest to highest.".to_string()
            }
            QuestionKind::Root => "What's the root note?".to_string(),
            QuestionKind::Degree => format!(
                "In a {} key, what degree is this chord built on?",
                mode.as_str()
            ),
            QuestionKind::Role => "What is this chord's relationship to the key?".to_string(),
            QuestionKind::Numeral => {
                "Which roman numeral describes this chord's degree and quality?".to_string()
            }
            QuestionKind::Quality => "What's the chord quality?".to_string(),
            QuestionKind::Inversion => "What's the inversion?".to_string(),
            QuestionKind::FollowedBy => {
                "Which chord is most likely to follow this chord?".to_string()
            }
        }
    }
}

/// One answer button: its text and the keyboard shortcut that presses it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub choice: String,
    pub key: char,
}

/// One quiz question over a chord.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub kind: QuestionKind,
    pub prompt: String,
    pub ordered: bool,
    pub answers: Vec<String>,
    pub choices: Vec<Choice>,
}

/// How many distractors accompany the correct answer in the pool-built
/// choice sets.
const DISTRACTOR_COUNT: usize = 3;

/// Build the applicable question set for a finished chord.
pub(crate) fn build_questions<R: Rng>(chord: &Chord, rng: &mut R) -> Vec<Question> {
    let mut questions = vec![
        note_names_question(chord),
        root_question(chord, rng),
        degree_question(chord, rng),
    ];
    if chord.chord_type != ChordType::AppliedChord {
        questions.push(role_question(chord, rng));
    }
    questions.push(numeral_question(chord, rng));
    if let Some(question) = quality_question(chord, rng) {
        questions.push(question);
    }
    if chord.structure.inversions().len() > 1 {
        questions.push(inversion_question(chord, rng));
    }
    if let Some(question) = followed_by_question(chord, rng) {
        questions.push(question);
    }
    questions
}

fn note_names_question(chord: &Chord) -> Question {
    let answers = chord
        .notes
        .iter()
        .map(|note| note.letter.as_str().to_string())
        .collect();
    let choices = LetterName::ALL
        .iter()
        .map(|letter| letter.as_str().to_string())
        .collect();
    Question {
        kind: QuestionKind::NoteNames,
        prompt: QuestionKind::NoteNames.prompt(chord.mode_label),
        ordered: true,
        answers,
        choices: with_shortcuts(choices),
    }
}

fn root_question<R: Rng>(chord: &Chord, rng: &mut R) -> Question {
    // The chord's own tones are the choices; letters never repeat within a
    // chord, so the spellings are already distinct.
    let choices = chord.notes.iter().map(|note| note.spelling()).collect();
    unordered(
        QuestionKind::Root,
        chord,
        chord.root.spelling(),
        choices,
        rng,
    )
}

fn degree_question<R: Rng>(chord: &Chord, rng: &mut R) -> Question {
    let answer = degree_label(chord.context.degree, chord.context.incidental);
    let choices = (1u8..=7)
        .map(|degree| {
            if degree == chord.context.degree {
                answer.clone()
            } else {
                degree.to_string()
            }
        })
        .collect();
    unordered(QuestionKind::Degree, chord, answer, choices, rng)
}

const ROLE_LABELS: [&str; 4] = ["Diatonic", "Mode mixture", "Chromatic", "Applied"];

fn role_question<R: Rng>(chord: &Chord, rng: &mut R) -> Question {
    let answer = match chord.chord_type {
        ChordType::Triad | ChordType::Seventh => "Diatonic",
        ChordType::ModeMixture => "Mode mixture",
        ChordType::ChromaticVariation => "Chromatic",
        ChordType::AppliedChord => "Applied",
    };
    let choices = ROLE_LABELS.iter().map(|label| label.to_string()).collect();
    unordered(
        QuestionKind::Role,
        chord,
        answer.to_string(),
        choices,
        rng,
    )
}

/// Diatonic numeral pools the numeral distractors are drawn from.
fn diatonic_numeral_pool(mode: ModeLabel, seventh: bool) -> [&'static str; 7] {
    match (mode, seventh) {
        (ModeLabel::Major, false) => ["I", "ii", "iii", "IV", "V", "vi", "viio"],
        (ModeLabel::Minor, false) => ["i", "iio", "III", "iv", "V", "VI", "viio"],
        (ModeLabel::Major, true) => ["IM7", "ii7", "iii7", "IVM7", "V7", "vi7", "viiø7"],
        (ModeLabel::Minor, true) => ["i7", "iiø7", "IIIM7", "iv7", "V7", "VIM7", "viio7"],
    }
}

fn numeral_question<R: Rng>(chord: &Chord, rng: &mut R) -> Question {
    let answer = chord.context.numeral.clone();
    let mut pool: Vec<String> = match chord.chord_type {
        ChordType::Triad | ChordType::Seventh => {
            let seventh = chord.structure.template().len() == 4;
            diatonic_numeral_pool(chord.mode_label, seventh)
                .iter()
                .map(|numeral| numeral.to_string())
                .collect()
        }
        // The fixed structures distract with their family siblings.
        _ => chord
            .chord_type
            .structures()
            .iter()
            .map(|structure| structure.display_name().to_string())
            .collect(),
    };
    pool.retain(|candidate| candidate != &answer);
    pool.shuffle(rng);
    pool.truncate(DISTRACTOR_COUNT);
    pool.push(answer.clone());
    unordered(QuestionKind::Numeral, chord, answer, pool, rng)
}

const TRIAD_QUALITIES: [&str; 4] = ["M", "m", "o", "+"];
const SEVENTH_QUALITIES: [&str; 5] = ["7", "M7", "m7", "ø7", "o7"];

fn quality_question<R: Rng>(chord: &Chord, rng: &mut R) -> Option<Question> {
    let answer = chord.structure.quality()?;
    let choices: Vec<String> = if chord.structure.template().len() == 4 {
        SEVENTH_QUALITIES.iter().map(|q| q.to_string()).collect()
    } else {
        TRIAD_QUALITIES.iter().map(|q| q.to_string()).collect()
    };
    Some(unordered(
        QuestionKind::Quality,
        chord,
        answer.to_string(),
        choices,
        rng,
    ))
}

fn inversion_question<R: Rng>(chord: &Chord, rng: &mut R) -> Question {
    let size = chord.structure.template().len();
    let choices = chord
        .structure
        .inversions()
        .iter()
        .map(|inversion| inversion.label(size).to_string())
        .collect();
    unordered(
        QuestionKind::Inversion,
        chord,
        chord.inversion_label.to_string(),
        choices,
        rng,
    )
}

/// The conventional next chord, where one exists: applied chords resolve to
/// their target, the predominant chromatic chords to V, dominant- and
/// leading-tone-function degrees to the tonic, predominant degrees to V.
pub(crate) fn continuation(
    structure: ChordStructure,
    mode: ModeLabel,
    degree: u8,
    incidental: i8,
) -> Option<&'static str> {
    let tonic = match mode {
        ModeLabel::Major => "I",
        ModeLabel::Minor => "i",
    };
    let target = match structure {
        ChordStructure::FiveOfFive
        | ChordStructure::FiveSevenOfFive
        | ChordStructure::SevenDimSevenOfFive => "V",
        ChordStructure::FiveOfSix | ChordStructure::FiveSevenOfSix => "vi",
        ChordStructure::FiveSevenOfMajorFour => "IV",
        ChordStructure::FiveSevenOfMinorFour => "iv",
        ChordStructure::SevenHalfDimSevenOfSeven
        | ChordStructure::FiveOfSevenDim
        | ChordStructure::FiveSevenOfSevenDim => "viio",
        ChordStructure::NeapolitanSixth
        | ChordStructure::ItalianSixth
        | ChordStructure::FrenchSixth
        | ChordStructure::GermanSixth
        | ChordStructure::FlatSixMajorTriad
        | ChordStructure::SubdominantMajorInMinor => "V",
        ChordStructure::FlatSevenMajorTriad => tonic,
        ChordStructure::FlatThreeMajorTriad | ChordStructure::TonicMajorInMinor => return None,
        _ => {
            if incidental != 0 {
                return None;
            }
            match degree {
                5 | 7 => tonic,
                2 | 4 => "V",
                _ => return None,
            }
        }
    };
    Some(target)
}

fn followed_by_question<R: Rng>(chord: &Chord, rng: &mut R) -> Option<Question> {
    let answer = continuation(
        chord.structure,
        chord.mode_label,
        chord.context.degree,
        chord.context.incidental,
    )?
    .to_string();
    let pool = match chord.mode_label {
        ModeLabel::Major => ["I", "ii", "IV", "V", "vi", "viio"],
        ModeLabel::Minor => ["i", "iio", "iv", "V", "VI", "viio"],
    };
    let mut choices: Vec<String> = pool
        .iter()
        .map(|numeral| numeral.to_string())
        .filter(|candidate| candidate != &answer)
        .collect();
    choices.shuffle(rng);
    choices.truncate(DISTRACTOR_COUNT);
    choices.push(answer.clone());
    Some(unordered(
        QuestionKind::FollowedBy,
        chord,
        answer,
        choices,
        rng,
    ))
}

/// Assemble an unordered question: shuffle the choice texts and attach
/// shortcuts.
fn unordered<R: Rng>(
    kind: QuestionKind,
    chord: &Chord,
    answer: String,
    mut choice_texts: Vec<String>,
    rng: &mut R,
) -> Question {
    choice_texts.shuffle(rng);
    Question {
        kind,
        prompt: kind.prompt(chord.mode_label),
        ordered: false,
        answers: vec![answer],
        choices: with_shortcuts(choice_texts),
    }
}

/// Assign each choice a stable, collision-free keyboard shortcut: the first
/// free character of its own text, then a free digit, then a free letter.
fn with_shortcuts(texts: Vec<String>) -> Vec<Choice> {
    let mut used: HashSet<char> = HashSet::new();
    texts
        .into_iter()
        .map(|text| {
            let key = text
                .chars()
                .map(|c| c.to_ascii_lowercase())
                .filter(char::is_ascii_alphanumeric)
                .find(|c| !used.contains(c))
                .or_else(|| ('1'..='9').find(|c| !used.contains(c)))
                .or_else(|| ('a'..='z').find(|c| !used.contains(c)))
                .unwrap_or('?');
            used.insert(key);
            Choice { choice: text, key }
        })
        .collect()
}
