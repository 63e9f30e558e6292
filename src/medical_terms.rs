// src/medical_terms.rs
//
// Static medical terminology: abbreviations, known misspellings, verified
// terms and context enhancements, plus sentence-level phrase improvements.
// Every entry carries its own kind and confidence.

use crate::types::ErrorType;
use crate::types::ErrorType::{Abbreviation, Enhancement, Spelling, Verified};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// One entry of the medical terms table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MedicalTerm {
    pub correct: &'static str,
    pub kind: ErrorType,
    pub confidence: f64,
}

const fn term(correct: &'static str, kind: ErrorType, confidence: f64) -> MedicalTerm {
    MedicalTerm { correct, kind, confidence }
}

/// Keys are lowercase, punctuation-stripped single words or space-joined phrases
pub static MEDICAL_TERMS: &[(&str, MedicalTerm)] = &[
    // Imaging modalities and tracers keep the acronym and add the expansion
    ("fdg", term("FDG (fluorodeoxyglucose)", Abbreviation, 0.9)),
    ("pet", term("PET (positron emission tomography)", Abbreviation, 0.9)),
    ("pet/ct", term("PET/CT (positron emission tomography/computed tomography)", Abbreviation, 0.85)),
    ("ct", term("CT (computed tomography)", Abbreviation, 0.8)),
    ("mri", term("MRI (magnetic resonance imaging)", Abbreviation, 0.8)),
    ("spect", term("SPECT (single-photon emission computed tomography)", Abbreviation, 0.85)),
    ("suv", term("SUV (standardized uptake value)", Abbreviation, 0.85)),
    ("kub", term("KUB (kidneys, ureters, and bladder)", Abbreviation, 0.8)),
    ("ercp", term("ERCP (endoscopic retrograde cholangiopancreatography)", Abbreviation, 0.8)),
    ("mrcp", term("MRCP (magnetic resonance cholangiopancreatography)", Abbreviation, 0.8)),
    ("cxr", term("chest x-ray", Abbreviation, 0.9)),
    ("ekg", term("electrocardiogram", Abbreviation, 0.9)),
    ("ecg", term("electrocardiogram", Abbreviation, 0.9)),
    // Clinical shorthand
    ("pt", term("patient", Abbreviation, 0.9)),
    ("pts", term("patients", Abbreviation, 0.9)),
    ("hx", term("history", Abbreviation, 0.8)),
    ("hpi", term("history of present illness", Abbreviation, 0.8)),
    ("pmh", term("past medical history", Abbreviation, 0.8)),
    ("dx", term("diagnosis", Abbreviation, 0.8)),
    ("ddx", term("differential diagnosis", Abbreviation, 0.8)),
    ("rx", term("prescription", Abbreviation, 0.8)),
    ("tx", term("treatment", Abbreviation, 0.8)),
    ("sx", term("symptoms", Abbreviation, 0.8)),
    ("fx", term("fracture", Abbreviation, 0.8)),
    ("w/o", term("without", Abbreviation, 0.9)),
    ("c/o", term("complains of", Abbreviation, 0.8)),
    ("r/o", term("rule out", Abbreviation, 0.8)),
    ("s/p", term("status post", Abbreviation, 0.8)),
    ("p/w", term("presents with", Abbreviation, 0.8)),
    ("bp", term("blood pressure", Abbreviation, 0.9)),
    ("hr", term("heart rate", Abbreviation, 0.9)),
    ("rr", term("respiratory rate", Abbreviation, 0.9)),
    ("iv", term("intravenous", Abbreviation, 0.9)),
    ("po", term("by mouth", Abbreviation, 0.9)),
    ("bid", term("twice daily", Abbreviation, 0.8)),
    ("tid", term("three times daily", Abbreviation, 0.8)),
    ("qid", term("four times daily", Abbreviation, 0.8)),
    ("prn", term("as needed", Abbreviation, 0.8)),
    // Misspellings the scanner may leave for this pass
    ("pnuemonia", term("pneumonia", Spelling, 0.95)),
    ("fracure", term("fracture", Spelling, 0.95)),
    ("inflamation", term("inflammation", Spelling, 0.95)),
    ("hemorrage", term("hemorrhage", Spelling, 0.95)),
    ("bronchitus", term("bronchitis", Spelling, 0.95)),
    ("arrythmia", term("arrhythmia", Spelling, 0.95)),
    ("menigitis", term("meningitis", Spelling, 0.95)),
    ("radiologic", term("radiological", Spelling, 0.9)),
    ("ultrasond", term("ultrasound", Spelling, 0.95)),
    // Verified terms shield correct vocabulary from the other checks
    ("sepsis", term("sepsis", Verified, 1.0)),
    ("effusion", term("effusion", Verified, 1.0)),
    ("pleural effusion", term("pleural effusion", Verified, 1.0)),
    ("pulmonary", term("pulmonary", Verified, 1.0)),
    ("cardiovascular", term("cardiovascular", Verified, 1.0)),
    ("radiological", term("radiological", Verified, 1.0)),
    ("pneumonia", term("pneumonia", Verified, 1.0)),
    ("atelectasis", term("atelectasis", Verified, 1.0)),
    ("consolidation", term("consolidation", Verified, 1.0)),
    ("metastases", term("metastases", Verified, 1.0)),
    // Context enhancements
    ("small effusion", term("small pleural effusion", Enhancement, 0.7)),
    ("large effusion", term("large pleural effusion", Enhancement, 0.7)),
    ("bilateral effusion", term("bilateral pleural effusion", Enhancement, 0.8)),
    ("bilateral effusions", term("bilateral pleural effusions", Enhancement, 0.8)),
    ("small bilateral effusions", term("small bilateral pleural effusions", Enhancement, 0.75)),
];

static MEDICAL_TERM_INDEX: Lazy<HashMap<&'static str, MedicalTerm>> =
    Lazy::new(|| MEDICAL_TERMS.iter().copied().collect());

/// Every lowercase word that appears in a key or a corrected form
static MEDICAL_VOCABULARY: Lazy<HashSet<String>> = Lazy::new(|| {
    MEDICAL_TERMS
        .iter()
        .filter(|(_, t)| t.kind != Spelling)
        .flat_map(|(key, t)| [*key, t.correct])
        .chain(MEDICAL_TERMS.iter().filter(|(_, t)| t.kind == Spelling).map(|(_, t)| t.correct))
        .flat_map(|s| {
            s.split(|c: char| !c.is_ascii_alphabetic())
                .filter(|w| !w.is_empty())
                .map(|w| w.to_lowercase())
                .collect::<Vec<_>>()
        })
        .collect()
});

/// Sentences that read better in formal report language
static PHRASE_IMPROVEMENTS: &[(&str, &str)] = &[
    ("no acute distress", "patient appears comfortable and in no acute distress"),
    ("unremarkable", "within normal limits"),
    ("wnl", "within normal limits"),
    ("nad", "no acute distress"),
    ("nkda", "no known drug allergies"),
    ("nka", "no known allergies"),
];

/// Exact lookup of a lowercase key
pub fn lookup(key: &str) -> Option<MedicalTerm> {
    MEDICAL_TERM_INDEX.get(key).copied()
}

/// Single-word alphabetic keys in table order, candidates for fuzzy matching
pub fn fuzzy_candidates() -> impl Iterator<Item = (&'static str, MedicalTerm)> {
    MEDICAL_TERMS
        .iter()
        .copied()
        .filter(|(key, _)| key.len() > 3 && key.chars().all(|c| c.is_ascii_alphabetic()))
}

/// True when the word is part of the correct medical vocabulary
pub fn is_medical_vocabulary(word: &str) -> bool {
    MEDICAL_VOCABULARY.contains(&word.to_lowercase())
}

/// Look up a lowercase, trimmed sentence in the phrase-improvement table
pub fn phrase_improvement(sentence: &str) -> Option<&'static str> {
    PHRASE_IMPROVEMENTS
        .iter()
        .find(|(phrase, _)| *phrase == sentence)
        .map(|(_, improved)| *improved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_kinds() {
        let fdg = lookup("fdg").unwrap();
        assert_eq!(fdg.kind, Abbreviation);
        assert_eq!(fdg.correct, "FDG (fluorodeoxyglucose)");

        assert_eq!(lookup("sepsis").unwrap().kind, Verified);
        assert_eq!(lookup("small effusion").unwrap().kind, Enhancement);
        assert!(lookup("bladder").is_none());
    }

    #[test]
    fn test_keys_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for (key, _) in MEDICAL_TERMS {
            assert_eq!(*key, key.to_lowercase());
            assert!(seen.insert(*key), "duplicate key '{}'", key);
        }
    }

    #[test]
    fn test_vocabulary_excludes_misspelled_keys() {
        assert!(is_medical_vocabulary("fluorodeoxyglucose"));
        assert!(is_medical_vocabulary("pneumonia"));
        assert!(is_medical_vocabulary("Effusion"));
        assert!(!is_medical_vocabulary("pnuemonia"));
    }

    #[test]
    fn test_phrase_improvement() {
        assert_eq!(phrase_improvement("unremarkable"), Some("within normal limits"));
        assert_eq!(phrase_improvement("unremarkable study"), None);
    }

    #[test]
    fn test_fuzzy_candidates_are_single_words() {
        assert!(fuzzy_candidates().all(|(k, _)| !k.contains(' ') && !k.contains('/')));
        assert!(fuzzy_candidates().any(|(k, _)| k == "pneumonia"));
    }
}
