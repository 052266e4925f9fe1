//! Abbreviations that do not end a sentence when followed by a period.
//!
//! Entries are lowercase and stored without their final period. Words that
//! double as ordinary English ("sat", "no", "in", "may") are left out so a
//! sentence ending in them still splits.

/// Built-in abbreviations known to the sentence tokenizer.
pub const ABBREVIATIONS: &[&str] = &[
    // Titles and honorifics
    "mr", "mrs", "ms", "dr", "prof", "rev", "fr", "sr", "jr", "messrs", "mmes", "msgr", "esq",
    "capt", "col", "gen", "lt", "maj", "sgt", "cpl", "pvt", "adm", "cmdr", "sen", "gov", "pres",
    // Academic degrees
    "b.a", "b.s", "m.a", "m.s", "m.b.a", "ph.d", "phd", "m.d", "j.d", "ll.b", "ll.m", "ed.d",
    // Latin and scholarly
    "etc", "vs", "e.g", "i.e", "cf", "viz", "ibid", "n.b", "p.s", "al",
    // Time and dates
    "a.m", "p.m", "b.c", "a.d", "c.e", "b.c.e", "jan", "feb", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec", "mon", "tue", "tues", "thu", "thur", "thurs", "fri",
    // Places
    "st", "ave", "blvd", "rd", "apt", "ste", "bldg", "dept", "u.s", "u.k", "u.s.a", "e.u", "n.y",
    "calif",
    // Organizations
    "inc", "corp", "ltd", "llc", "bros", "assn", "intl", "mfg",
    // Units
    "oz", "lb", "lbs", "kg", "mg", "ml", "cm", "mm", "km", "ft", "yd", "mph", "kph", "rpm",
    // References
    "vol", "nos", "pp", "fig", "eq", "approx", "avg", "misc", "ref", "refs", "eds",
];

/// Normalize a word for abbreviation lookup: lowercase, surrounding periods removed.
pub fn normalize(word: &str) -> String {
    word.trim().trim_matches('.').to_lowercase()
}
