// src/misspellings.rs
//
// Fixed misspelling tables: everyday English slips and the medical
// misspellings that keep turning up in dictated radiology reports.
// Lookup is exact on the lowercase word; casing is restored by the caller.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Confidence for a general English misspelling hit
pub const ENGLISH_MISSPELLING_CONFIDENCE: f64 = 0.9;

/// Confidence for a medical misspelling hit
pub const MEDICAL_MISSPELLING_CONFIDENCE: f64 = 0.95;

static ENGLISH_MISSPELLINGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert("recieve", "receive");
    map.insert("recieved", "received");
    map.insert("occured", "occurred");
    map.insert("occurence", "occurrence");
    map.insert("recomend", "recommend");
    map.insert("recomended", "recommended");
    map.insert("seperate", "separate");
    map.insert("seperately", "separately");
    map.insert("definately", "definitely");
    map.insert("furthur", "further");
    map.insert("clarifcation", "clarification");
    map.insert("yaer", "year");
    map.insert("yaers", "years");
    map.insert("monts", "months");
    map.insert("recod", "record");
    map.insert("teh", "the");
    map.insert("adn", "and");
    map.insert("wiht", "with");
    map.insert("becuase", "because");
    map.insert("untill", "until");
    map.insert("begining", "beginning");
    map.insert("accross", "across");
    map.insert("adress", "address");
    map.insert("enviroment", "environment");
    map.insert("neccessary", "necessary");
    map.insert("noticable", "noticeable");
    map.insert("prominant", "prominent");
    map.insert("visulise", "visualise");
    map.insert("expossure", "exposure");
    map.insert("margines", "margins");
    map.insert("complaning", "complaining");
    map.insert("brething", "breathing");
    map.insert("surgeyr", "surgery");

    map
});

static MEDICAL_MISSPELLINGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Respiratory
    map.insert("pnuemonia", "pneumonia");
    map.insert("pnemonia", "pneumonia");
    map.insert("pnuemonic", "pneumonic");
    map.insert("asthama", "asthma");
    map.insert("azthma", "asthma");
    map.insert("bronchitus", "bronchitis");
    map.insert("emphysyma", "emphysema");
    map.insert("emfysema", "emphysema");
    map.insert("pulmonray", "pulmonary");
    map.insert("pulmunary", "pulmonary");
    map.insert("respiritory", "respiratory");
    map.insert("pneumothroax", "pneumothorax");
    map.insert("hemothroax", "hemothorax");
    map.insert("atalectasis", "atelectasis");
    map.insert("brethlessness", "breathlessness");
    map.insert("sputm", "sputum");
    map.insert("tubercolosis", "tuberculosis");

    // Cardiovascular
    map.insert("tachycarida", "tachycardia");
    map.insert("bradycarida", "bradycardia");
    map.insert("arrythmia", "arrhythmia");
    map.insert("myocaridal", "myocardial");
    map.insert("myocardail", "myocardial");
    map.insert("infarcton", "infarction");
    map.insert("ishemia", "ischemia");
    map.insert("cardiomegally", "cardiomegaly");
    map.insert("hypertention", "hypertension");
    map.insert("aneurism", "aneurysm");
    map.insert("thrombosys", "thrombosis");
    map.insert("embolysm", "embolism");

    // Gastrointestinal
    map.insert("diahhrea", "diarrhea");
    map.insert("diarhea", "diarrhea");
    map.insert("nausiated", "nauseated");
    map.insert("vommiting", "vomiting");
    map.insert("abdomenal", "abdominal");
    map.insert("abdomin", "abdomen");
    map.insert("hepatomegally", "hepatomegaly");
    map.insert("splenomegally", "splenomegaly");

    // Musculoskeletal
    map.insert("fracure", "fracture");
    map.insert("arthritus", "arthritis");
    map.insert("osteoarthitus", "osteoarthritis");
    map.insert("rhuematoid", "rheumatoid");
    map.insert("skeletol", "skeletal");
    map.insert("scolliosis", "scoliosis");

    // Neurological
    map.insert("neurologial", "neurological");
    map.insert("cerebal", "cerebral");
    map.insert("menigitis", "meningitis");
    map.insert("eplilepsy", "epilepsy");

    // General clinical
    map.insert("inflamation", "inflammation");
    map.insert("inflamatory", "inflammatory");
    map.insert("hemorrage", "hemorrhage");
    map.insert("hemmorage", "hemorrhage");
    map.insert("hemorage", "hemorrhage");
    map.insert("hemmorhage", "hemorrhage");
    map.insert("antibotic", "antibiotic");
    map.insert("medicaton", "medication");
    map.insert("perscription", "prescription");
    map.insert("prescrition", "prescription");
    map.insert("diabities", "diabetes");
    map.insert("treetment", "treatment");
    map.insert("pateint", "patient");
    map.insert("clincal", "clinical");
    map.insert("examinatoin", "examination");
    map.insert("infectve", "infective");

    // Radiology and anatomy
    map.insert("imageing", "imaging");
    map.insert("ultrasond", "ultrasound");
    map.insert("mamography", "mammography");
    map.insert("laboritory", "laboratory");
    map.insert("shaddow", "shadow");
    map.insert("opasity", "opacity");
    map.insert("opasification", "opacification");
    map.insert("costophranic", "costophrenic");
    map.insert("effuson", "effusion");
    map.insert("efusion", "effusion");
    map.insert("centrall", "central");
    map.insert("thracic", "thoracic");
    map.insert("hylar", "hilar");
    map.insert("laterel", "lateral");
    map.insert("diaphram", "diaphragm");
    map.insert("diafragm", "diaphragm");
    map.insert("fibriosis", "fibrosis");
    map.insert("calcificaiton", "calcification");
    map.insert("bilatteral", "bilateral");

    map
});

/// Look up a lowercase word in the general English table
pub fn english_correction(word: &str) -> Option<&'static str> {
    ENGLISH_MISSPELLINGS.get(word).copied()
}

/// Look up a lowercase word in the medical misspelling table
pub fn medical_correction(word: &str) -> Option<&'static str> {
    MEDICAL_MISSPELLINGS.get(word).copied()
}

/// Every correct form either table can produce
pub fn corrected_forms() -> impl Iterator<Item = &'static str> {
    ENGLISH_MISSPELLINGS
        .values()
        .chain(MEDICAL_MISSPELLINGS.values())
        .copied()
}
