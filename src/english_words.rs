// src/english_words.rs
//
// Sampled English dictionary used by dictionary validation.
// General vocabulary plus the radiology wording that shows up in reports,
// so that valid clinical words are never fuzzy-matched to everyday ones.
// Order matters: fuzzy lookup returns the first minimal-distance entry.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Dictionary words in insertion order
pub static ENGLISH_WORDS: &[&str] = &[
    // Function words and the most frequent vocabulary
    "the", "of", "and", "a", "to", "in", "is", "you", "that", "it",
    "he", "was", "for", "on", "are", "as", "with", "his", "they", "i",
    "at", "be", "this", "have", "from", "or", "one", "had", "by", "word",
    "but", "not", "what", "all", "were", "we", "when", "your", "can", "said",
    "there", "each", "which", "she", "do", "how", "their", "if", "will", "up",
    "other", "about", "out", "many", "then", "them", "these", "some", "her",
    "would", "make", "like", "into", "him", "time", "has", "two", "more", "go",
    "no", "way", "could", "my", "than", "first", "been", "call", "who",
    "its", "find", "long", "down", "day", "did", "get", "come", "made", "may",
    "part", "over", "new", "take", "only", "little", "work", "place",
    "year", "years", "live", "me", "back", "give", "most", "very", "after", "thing",
    "our", "just", "name", "good", "sentence", "man", "think", "say", "great", "where",
    "help", "through", "much", "before", "line", "right", "too", "mean", "old", "any",
    "same", "tell", "follow", "came", "want", "show", "also", "around", "form",
    "three", "small", "set", "put", "end", "why", "again", "turn", "here", "off",
    "went", "number", "men", "every", "found", "still", "between", "should", "home",
    "big", "air", "own", "under", "read", "last", "never", "us", "left", "along",
    "while", "might", "next", "below", "saw", "something", "thought", "both", "few",
    "those", "always", "looked", "large", "often", "together", "asked", "house",
    "going", "important", "until", "keep", "without", "once", "life", "enough",
    "took", "sometimes", "four", "head", "above", "kind", "began", "almost", "page",
    "got", "need", "far", "hand", "hands", "high", "let", "night", "being", "study",
    "second", "book", "carry", "room", "idea", "base", "hear", "cut", "sure",
    "watch", "color", "face", "main", "plain", "usual", "young", "ready", "ever",
    "red", "list", "though", "feel", "talk", "soon", "body", "family", "direct",
    "leave", "measure", "door", "short", "class", "question", "happen", "complete",
    "area", "areas", "half", "order", "south", "problem", "piece", "told", "knew",
    "pass", "since", "top", "whole", "space", "heard", "best", "hour", "better",
    "during", "hundred", "five", "remember", "step", "early", "hold", "ground",
    "interest", "reach", "fast", "table", "less", "morning", "ten", "simple",
    "several", "toward", "against", "pattern", "slow", "center", "central", "person",
    "serve", "appear", "appears", "rule", "pull", "cold", "notice", "unit", "power",
    "fine", "certain", "fall", "lead", "dark", "note", "wait", "plan", "figure",
    "box", "field", "rest", "correct", "able", "done", "drive", "front", "week",
    "final", "gave", "green", "quick", "develop", "warm", "free", "minute", "strong",
    "special", "mind", "behind", "clear", "tail", "produce", "fact", "inch",
    "nothing", "course", "stay", "full", "force", "blue", "object", "decide",
    "surface", "deep", "foot", "system", "busy", "test", "record", "common",
    "possible", "plane", "dry", "ago", "check", "shape", "hot", "miss", "brought",
    "heat", "bring", "yes", "distant", "fill", "among", "drop", "heart", "present",
    "heavy", "position", "arm", "wide", "material", "size", "vary", "speak",
    "weight", "general", "matter", "circle", "pair", "include", "divide", "felt",
    "perhaps", "pick", "sudden", "count", "square", "reason", "length", "represent",
    "subject", "region", "energy", "probable", "cell", "believe", "fraction",
    "sit", "window", "sleep", "prove", "leg", "legs", "exercise", "wall", "walls",
    "catch", "mount", "board", "written", "glass", "edge", "sign", "visit", "past",
    "soft", "bright", "gas", "month", "months", "million", "finish", "hope",
    "strange", "gone", "baby", "eight", "meet", "root", "raise", "solve", "whether",
    "push", "seven", "paragraph", "third", "shall", "held", "describe", "floor",
    "either", "result", "results", "safe", "century", "consider", "type", "bit",
    "copy", "phrase", "silent", "tall", "roll", "temperature", "finger", "value",
    "lie", "natural", "view", "sense", "else", "quite", "broke", "case", "cases",
    "middle", "moment", "scale", "observe", "child", "straight", "nation",
    "dictionary", "speed", "method", "organ", "age", "section", "cloud", "surprise",
    "quiet", "stone", "tiny", "bad", "touch", "grew", "mix", "team", "wire",
    "cost", "lost", "equal", "sent", "choose", "fell", "fit", "flow", "fair",
    "save", "control", "decimal", "gentle", "woman", "practice", "separate",
    "difficult", "doctor", "please", "protect", "whose", "locate", "ring",
    "character", "caught", "period", "indicate", "indicates", "human", "history",
    "effect", "expect", "modern", "element", "hit", "student", "corner", "supply",
    "bone", "bones", "imagine", "provide", "agree", "thus", "capital", "chair",
    "danger", "thick", "process", "operate", "guess", "necessary", "sharp",
    "create", "rather", "compare", "string", "depend", "tube", "famous", "stream",
    "sight", "thin", "chief", "enter", "major", "fresh", "search", "send", "allow",
    "print", "dead", "spot", "suit", "current", "lift", "continue", "block",
    "chart", "sell", "success", "event", "particular", "deal", "term", "terms",
    "opposite", "shoulder", "spread", "arrange", "determine", "level", "levels",
    "chance", "gather", "stretch", "throw", "shine", "property", "column",
    "select", "wrong", "gray", "repeat", "require", "broad", "prepare", "claim",
    "oxygen", "death", "skill", "season", "solution", "thank", "branch", "match",
    "especially", "similar", "guide", "experience", "score", "mass", "card",
    "band", "slip", "evening", "condition", "feed", "tool", "total", "basic",
    "valley", "double", "seat", "arrive", "track", "parent", "division", "sheet",
    "substance", "favor", "connect", "post", "share", "station", "charge",
    "proper", "offer", "segment", "instant", "degree", "reply", "occur", "support",
    "speech", "nature", "range", "motion", "path", "liquid", "meant", "shell",
    "neck", "hello", "well", "call", "small", "still", "ball", "tall", "fill",
    "will", "cross", "loss", "access", "across", "process", "success", "address",
    "stuff", "staff", "off", "effect", "summer", "common", "comment", "current",
    "apply", "happy", "letter", "better", "matter", "feet", "seen", "need", "keen",
    "free", "three", "agree", "good", "look", "book", "room", "soon", "tool",
    "receive", "received", "occurred", "recommend", "recommended", "separately",
    "further", "clarification", "examination", "clinical", "patient", "patients",
    "treatment", "complaining", "breathing", "surgery", "year", "record", "shadow",
    "margins", "margin", "exposure", "prominent", "infective", "visualise",
    "visualize", "visualized", "identify", "identified", "definite", "definitely",
    "necessary", "possibly", "probably", "likely", "unlikely", "consistent",
    "suggest", "suggests", "suggestive", "suspicious", "seen", "noted", "appreciated",
    "demonstrated", "demonstrates", "shows", "showed", "reveals", "revealed",
    "compared", "comparison", "prior", "previous", "interval", "stable", "unchanged",
    "increased", "decreased", "increase", "decrease", "change", "changes", "new",
    "within", "normal", "limits", "without", "evidence", "finding", "findings",
    "impression", "indication", "technique", "conclusion", "observation",
    "report", "reports", "study", "studies", "image", "images", "imaging",
    "series", "view", "views", "contrast", "dose", "scan", "scans",
    "assessment", "feasible", "activity", "uptake", "avid", "focus", "foci",
    "focal", "diffuse", "adjacent", "represent", "represents", "due",

    // Anatomy
    "bladder", "urinary", "kidney", "kidneys", "renal", "liver", "hepatic",
    "spleen", "splenic", "pancreas", "bowel", "colon", "stomach", "abdomen",
    "abdominal", "pelvis", "pelvic", "chest", "thorax", "thoracic", "lung",
    "lungs", "lobe", "lobes", "upper", "lower", "middle", "pleura", "pleural",
    "heart", "cardiac", "aorta", "aortic", "arch", "artery", "arteries",
    "vein", "veins", "vessel", "vessels", "mediastinum", "mediastinal", "hilar",
    "hila", "trachea", "bronchus", "bronchi", "diaphragm", "rib", "ribs",
    "spine", "spinal", "vertebra", "vertebrae", "vertebral", "sternum",
    "clavicle", "scapula", "femur", "tibia", "fibula", "humerus", "radius",
    "ulna", "brain", "skull", "cervical", "lumbar", "sacral", "soft", "tissue",
    "tissues", "wall", "nodes", "node", "nodal", "lymph", "gallbladder",
    "ureter", "ureters", "prostate", "uterus", "ovary", "ovaries", "breast",
    "thyroid", "adrenal", "joint", "joints", "muscle", "muscles", "costophrenic",
    "angle", "angles", "anterior", "posterior", "superior", "inferior", "medial",
    "lateral", "proximal", "distal", "bilateral", "unilateral", "left", "right",

    // Findings and pathology
    "malignancy", "malignant", "benign", "metastases", "metastasis", "metastatic",
    "tumor", "tumour", "lesion", "lesions", "nodule", "nodules", "masses",
    "opacity", "opacities", "opacification", "consolidation", "atelectasis",
    "effusion", "effusions", "pneumonia", "pneumothorax", "hemothorax", "edema",
    "oedema", "fibrosis", "scarring", "calcification", "calcified", "fracture",
    "fractures", "deposit", "deposits", "deposition", "infiltrate", "infiltrates",
    "inflammation", "inflammatory", "infection", "abscess", "cyst", "cysts",
    "hemorrhage", "aneurysm", "thrombosis", "embolism", "stenosis", "obstruction",
    "occlusion", "dilatation", "dilated", "enlarged", "enlargement", "cardiomegaly",
    "hepatomegaly", "splenomegaly", "emphysema", "asthma", "bronchitis",
    "tuberculosis", "arrhythmia", "ischemia", "infarction", "scoliosis",
    "degenerative", "acute", "chronic", "mild", "moderate", "severe", "minimal",
    "extensive", "significant", "suspicious", "locoregional", "photopenic",
    "hypermetabolic", "metabolic", "density", "dense", "lucency", "lucent",
    "attenuation", "enhancing", "enhancement", "sclerotic", "lytic", "mild",
    "sputum", "breathlessness", "diabetes", "hypertension", "pulmonary",
    "cardiovascular", "radiological", "radiology", "measuring", "measures",
    "approximately", "diameter", "width", "height", "unremarkable", "remarkable",
    "distress", "comfortable", "allergies", "known", "drug", "fluid", "fluids",
    "cough", "pain", "sized", "lucencies", "symptoms", "complains", "status",

    // Report adverbs, anatomy and descriptors
    "bilaterally", "unilaterally", "otherwise", "previously", "redemonstrated",
    "evaluation", "correlation", "compatible", "resolved", "persistent",
    "mildly", "moderately", "markedly", "slightly", "partially", "grossly",
    "diffusely", "focally", "superiorly", "inferiorly", "anteriorly", "posteriorly",
    "medially", "laterally", "proximally", "distally", "peripherally", "dependent",
    "aspect", "aspects", "segments", "portion", "regions", "contour", "contours",
    "alignment", "apex", "border", "borders", "hemithorax", "hemidiaphragm",
    "parenchyma", "parenchymal", "interstitial", "airspace", "linear", "patchy",
    "nodular",
];

/// Set view of the dictionary for membership tests
pub static ENGLISH_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_WORDS.iter().copied().collect());

/// Check if a word is in the sampled dictionary (case-insensitive)
pub fn is_english_word(word: &str) -> bool {
    ENGLISH_WORD_SET.contains(word.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_and_clinical_words_present() {
        assert!(is_english_word("the"));
        assert!(is_english_word("THE"));
        assert!(is_english_word("Assessment"));
        assert!(is_english_word("photopenic"));
        assert!(is_english_word("locoregional"));
        assert!(is_english_word("deposits"));
        assert!(is_english_word("Bilaterally"));
        assert!(is_english_word("aspect"));
    }

    #[test]
    fn test_misspellings_absent() {
        assert!(!is_english_word("depositssss"));
        assert!(!is_english_word("recieve"));
        assert!(!is_english_word("pnuemonia"));
    }
}
