use lazy_static::lazy_static;
use std::collections::{BTreeMap, HashMap};

// Lemma variants the Danish model leaves behind, merged into one canonical
// form so the topic model sees a single word.
const DEFAULT_PAIRS: &[(&str, &str)] = &[
    ("socialdemokratisk", "socialdemokrati"),
    ("sammenligning", "sammenligne"),
    ("regle", "regler"),
    ("parret", "par"),
    ("orlovsug", "orlov"),
    ("økonom", "økonomi"),
    ("økonomisk", "økonomi"),
    ("økonomii", "økonomi"),
    ("økonomiisk", "økonomi"),
    ("mødre", "mor"),
    ("moder", "mor"),
    ("mødr", "mor"),
    ("mødrene", "mor"),
    ("mødree", "mor"),
    ("mødreene", "mor"),
    ("modell", "model"),
    ("mænds", "mand"),
    ("mændene", "mand"),
    ("kvinder", "kvinde"),
    ("kvinders", "kvinde"),
    ("kvinderne", "kvinde"),
    ("kvind", "kvinde"),
    ("kvinderr", "kvinde"),
    ("kvinderrelig", "kvinde"),
    ("kvinderrer", "kvinde"),
    ("kvinderererererre", "kvinde"),
    ("kvindererererer", "kvinde"),
    ("konsekvense", "konsekvens"),
    ("konkre", "konkret"),
    ("idé", "ide"),
    ("forvej", "forvejen"),
    ("forældr", "forældre"),
    ("famili", "familie"),
    ("familiee", "familie"),
    ("fagbevægelsen", "fagbevægelse"),
    ("fagbevægels", "fagbevægelse"),
    ("fagbevægelsenens", "fagbevægelse"),
    ("fars", "far"),
    ("fædr", "far"),
    ("fædrene", "far"),
    ("fædrenes", "far"),
    ("fædres", "far"),
    ("fader", "far"),
    ("farene", "far"),
    ("farenes", "far"),
    ("fares", "far"),
    ("barselsug", "barselsuge"),
    ("barsle", "barsel"),
    ("barslenn", "barsel"),
    ("barslen", "barsel"),
    ("barselslovgivning", "barselslov"),
    ("barselsorloven", "barselsorlov"),
    ("barselsregler", "barselsregel"),
    ("barselsregle", "barselsregel"),
    ("barselsreglerrr", "barselsregel"),
    ("barselsreglerr", "barselsregel"),
    ("barselsugeee", "barselsuge"),
    ("barselsugee", "barselsuge"),
    ("børn", "barn"),
    ("børnenes", "barn"),
    ("børns", "barn"),
    ("forældree", "forældre"),
    ("konkrett", "konkret"),
    ("ligestillingsminist", "ligestillingsminister"),
    ("ligestillingsordføre", "ligestillingsordfører"),
    ("fagbevægelsenenenenen", "fagbevægelse"),
];

lazy_static! {
    static ref DEFAULT_MAPPING: HashMap<String, String> = DEFAULT_PAIRS
        .iter()
        .map(|(variant, canonical)| (variant.to_string(), canonical.to_string()))
        .collect();
}

/// A surface variant whose canonical form is itself remapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingChain {
    pub variant: String,
    pub canonical: String,
    pub remapped_to: String,
}

/// Many-to-one mapping from lemma variants to their canonical lemma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LemmaMapping {
    map: HashMap<String, String>,
}

impl Default for LemmaMapping {
    fn default() -> Self {
        Self {
            map: DEFAULT_MAPPING.clone(),
        }
    }
}

impl LemmaMapping {
    pub fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Canonical form of `word`, or `word` itself when it is not a known variant.
    pub fn apply<'a>(&'a self, word: &'a str) -> &'a str {
        self.map.get(word).map(String::as_str).unwrap_or(word)
    }

    /// Every entry whose canonical value is also a key mapping to something else.
    /// Applying the mapping once is only a normal form when this is empty.
    pub fn chains(&self) -> Vec<MappingChain> {
        let mut chains: Vec<MappingChain> = self
            .map
            .iter()
            .filter_map(|(variant, canonical)| {
                self.map
                    .get(canonical)
                    .filter(|next| *next != canonical)
                    .map(|next| MappingChain {
                        variant: variant.clone(),
                        canonical: canonical.clone(),
                        remapped_to: next.clone(),
                    })
            })
            .collect();
        chains.sort_by(|a, b| a.variant.cmp(&b.variant));
        chains
    }

    /// Variants grouped under their canonical lemma, for reporting.
    pub fn grouped(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (variant, canonical) in &self.map {
            groups
                .entry(canonical.as_str())
                .or_default()
                .push(variant.as_str());
        }
        for variants in groups.values_mut() {
            variants.sort_unstable();
        }
        groups
    }
}
