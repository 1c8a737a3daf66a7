//! Artifact names
//!
//! Names come either from a letter-trigram model trained on a small corpus
//! of invented words, or from curated lists picked by whether the artifact
//! is cursed and whether it is a weapon.

use fa_rng::RandomSource;

/// Word-start marker, letters take 1..=26, word-end marker
const START: usize = 0;
const END: usize = 27;
const SYMBOLS: usize = 28;

const MIN_NAME_LEN: usize = 3;
const MAX_NAME_LEN: usize = 12;
const MAX_ATTEMPTS: usize = 100;

const CORPUS: &[&str] = &[
    "aglarond", "aiglos", "amarth", "anduril", "angrist", "angrim", "anguirel", "aranruth",
    "arkenstone", "belegost", "beleriand", "belthronding", "calris", "caradhras", "celebrimbor",
    "colannon", "cuthalion", "dagmor", "doriath", "durin", "earendil", "eluvian", "elendil",
    "eriador", "feanor", "forasgil", "galadhon", "gimlin", "glamdring", "gondolin", "gurthang",
    "hithlain", "isildur", "kharaz", "lothlann", "menelvagor", "mormegil", "nargothrond",
    "narsil", "nimloth", "orcrist", "palantir", "rhudaur", "ringil", "sulimo", "taranath",
    "thalion", "thorongil", "turgon", "ulmiriel", "valandil", "vilya", "zirakzigil",
];

const CURSED_WEAPON_NAMES: &[&str] = &[
    "Bloodthirst", "Gorthaur", "Maeglin", "Grief", "Widowmaker", "Thuringwethil", "Vile Edge",
];
const CURSED_ARMOUR_NAMES: &[&str] = &[
    "Sorrow", "the Ashen Pit", "Ungoliant", "Despair", "the Black Breath", "Woe",
];
const WEAPON_NAMES: &[&str] = &[
    "Starfire", "Dawnbringer", "Heartseeker", "Stormcaller", "Oathkeeper", "Tempest", "Ruin",
];
const ARMOUR_NAMES: &[&str] = &[
    "the Silver Tree", "Hope", "the Morning Star", "Vigilance", "the Westlands", "Eventide",
];

fn symbol(c: char) -> Option<usize> {
    c.is_ascii_lowercase().then(|| (c as u8 - b'a') as usize + 1)
}

fn letter(sym: usize) -> char {
    (b'a' + (sym - 1) as u8) as char
}

/// Letter-trigram model over word starts, letters and word ends
#[derive(Debug, Clone)]
pub struct NameGenerator {
    counts: Vec<[[u16; SYMBOLS]; SYMBOLS]>,
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::train(CORPUS)
    }
}

impl NameGenerator {
    /// Count the trigrams of every word in `corpus`. Characters other than
    /// lowercase ASCII letters are skipped.
    pub fn train(corpus: &[&str]) -> Self {
        let mut counts = vec![[[0u16; SYMBOLS]; SYMBOLS]; SYMBOLS];
        for word in corpus {
            let (mut a, mut b) = (START, START);
            for c in word.chars().filter_map(symbol).chain(std::iter::once(END)) {
                counts[a][b][c] = counts[a][b][c].saturating_add(1);
                a = b;
                b = c;
            }
        }
        Self { counts }
    }

    /// Synthesize a capitalized word, or None if no word of acceptable
    /// length came out within the attempt bound.
    pub fn generate(&self, rng: &mut dyn RandomSource) -> Option<String> {
        (0..MAX_ATTEMPTS).find_map(|_| self.attempt(rng))
    }

    fn attempt(&self, rng: &mut dyn RandomSource) -> Option<String> {
        let (mut a, mut b) = (START, START);
        let mut word = String::new();
        loop {
            let row = &self.counts[a][b];
            let total: i32 = row.iter().map(|&n| n as i32).sum();
            if total == 0 {
                return None;
            }
            let mut roll = rng.randint0(total);
            let mut next = END;
            for (sym, &n) in row.iter().enumerate() {
                if roll < n as i32 {
                    next = sym;
                    break;
                }
                roll -= n as i32;
            }
            if next == END {
                break;
            }
            word.push(letter(next));
            if word.len() > MAX_NAME_LEN {
                return None;
            }
            a = b;
            b = next;
        }
        if word.len() < MIN_NAME_LEN {
            return None;
        }
        let mut chars = word.chars();
        let first = chars.next()?.to_ascii_uppercase();
        Some(std::iter::once(first).chain(chars).collect())
    }

    /// Name an artifact. The more of its potential a design used, the more
    /// likely it gets a synthesized name over a stock one. Weapons are
    /// named in quotes, armour takes "of".
    pub fn name_artifact(
        &self,
        used_percent: i32,
        cursed: bool,
        weapon: bool,
        rng: &mut dyn RandomSource,
    ) -> String {
        let word = if rng.randint0(100) < used_percent.clamp(10, 90) {
            self.generate(rng)
        } else {
            None
        };
        let word = word.unwrap_or_else(|| {
            let list = match (cursed, weapon) {
                (true, true) => CURSED_WEAPON_NAMES,
                (true, false) => CURSED_ARMOUR_NAMES,
                (false, true) => WEAPON_NAMES,
                (false, false) => ARMOUR_NAMES,
            };
            let index = rng.randint0(list.len() as i32) as usize;
            list[index.min(list.len() - 1)].to_string()
        });
        if weapon {
            format!("'{}'", word)
        } else {
            format!("of {}", word)
        }
    }
}
