/// Known synergy phrases (lowercase) and their short codes.
const SYNERGY_CODES: [(&str, &str); 16] = [
    ("gladiator", "GL"),
    ("howitzer", "HW"),
    ("passing playmaker", "PP"),
    ("speedster", "SP"),
    ("light the lamp", "LL"),
    ("magician", "M"),
    ("thief", "T"),
    ("wingman", "WM"),
    ("shutdown", "SD"),
    ("workhorse", "WH"),
    ("balanced", "BA"),
    ("barrage", "BR"),
    ("distributor", "DB"),
    ("heart and soul", "HS"),
    ("spark", "S"),
    ("swarm", "SW"),
];

/// Looks up the code for a lowercase synergy phrase.
pub fn synergy_code(phrase: &str) -> Option<&'static str> {
    SYNERGY_CODES
        .iter()
        .find(|(name, _)| *name == phrase)
        .map(|(_, code)| *code)
}
