//! General named-entity recognition for person, organisation and place names
//!
//! Gazetteer and pattern based: no model files, deterministic output. Tuned
//! for UK CVs. Any other recogniser can take its place behind [`Detector`].

use cvscrub_core::{Category, Error, Result, Span};
use regex::{Match, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::Detector;

/// Title + capitalised words; the title itself is kept
static TITLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Mr|Mrs|Ms|Miss|Mx|Dr|Prof|Sir|Dame|Rev)\.?[ \t]+([A-Z][A-Za-z'-]+(?:[ \t]+[A-Z][A-Za-z'-]+){0,2})\b",
    )
    .unwrap()
});

/// `Forename: John`, `**Full Name:** John Smith`, `First Name      John`
static LABELLED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t>*#-]*(?:Full Name|Candidate Name|First Names?|Forenames?|Given Names?|Middle Names?|Preferred Name|Name)\b(?:[ \t*]*:[ \t*]*|[ \t]{2,}|\t+)([A-Z][A-Za-z'-]+(?:[ \t]+[A-Z][A-Za-z'-]+){0,3})",
    )
    .unwrap()
});

/// A single capitalised word: Smith, McDonald, O'Brien, Smith-Jones
static CAPITALISED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]*(?:['-]?[A-Z][a-z]+)*\b").unwrap());

static ORG_SUFFIXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[A-Z][A-Za-z&'.-]*[ \t]+(?:(?:&|and|of)[ \t]+)?){1,5}(?:Ltd|Limited|PLC|plc|LLP|LLC|Inc|Corp|Corporation|Group|Holdings|Partners|Partnership|Associates|Consulting|Consultancy|Solutions|Services|Systems|Technologies|Bank|Trust|Council|Hospital|Foundation|Agency|University|College|School|Academy)\b\.?",
    )
    .unwrap()
});

static ORG_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:University|College|School|Academy|Bank|Institute)[ \t]+of[ \t]+[A-Z][A-Za-z]+(?:[ \t]+[A-Z][A-Za-z]+)?",
    )
    .unwrap()
});

const FIRST_NAMES: &[&str] = &[
    "adam", "aisha", "alan", "albert", "alex", "alexander", "alice", "alison", "amanda", "amelia",
    "amy", "andrew", "angela", "anna", "anne", "anthony", "arthur", "ava", "barbara", "ben",
    "benjamin", "beth", "brian", "callum", "carl", "caroline", "catherine", "charles", "charlie",
    "charlotte", "chloe", "chris", "christine", "christopher", "claire", "craig", "daniel", "darren",
    "david", "deborah", "dean", "denise", "diane", "dominic", "donna", "dylan", "edward", "eleanor",
    "elizabeth", "ella", "emily", "emma", "ethan", "fiona", "freya", "gary", "gavin", "george",
    "georgia", "gillian", "graham", "hannah", "harry", "harvey", "helen", "henry", "holly", "ian",
    "imran", "isabella", "isla", "jack", "jacob", "james", "jamie", "jane", "jason", "jennifer",
    "jessica", "joanne", "john", "jonathan", "joseph", "joshua", "julie", "karen", "katie", "kelly",
    "kevin", "kieran", "laura", "lauren", "leah", "liam", "lily", "lisa", "logan", "louise",
    "lucy", "luke", "margaret", "maria", "martin", "mary", "matthew", "megan", "michael",
    "michelle", "mohammed", "muhammad", "nathan", "neil", "nicola", "noah", "oliver", "olivia",
    "oscar", "owen", "patricia", "paul", "peter", "phillip", "priya", "rachel", "rebecca",
    "richard", "robert", "ryan", "samantha", "samuel", "sarah", "scott", "sean", "sharon",
    "simon", "sophie", "stephen", "steven", "stuart", "susan", "thomas", "tracey", "wayne",
    "william", "zoe",
];

// Only treated as a name when followed by another capitalised word
const AMBIGUOUS_FIRST_NAMES: &[&str] = &[
    "april", "art", "bill", "faith", "grace", "hope", "joy", "june", "mark", "may", "pat", "rose",
    "will",
];

// Capitalised words that end a name run
const NAME_STOP_WORDS: &[&str] = &[
    "street", "road", "avenue", "lane", "drive", "close", "court", "way", "ltd", "limited",
    "group", "university", "college", "school", "january", "february", "march", "august",
    "september", "october", "november", "december", "monday", "tuesday", "wednesday",
    "thursday", "friday", "saturday", "sunday", "and", "the",
];

const PLACES: &[&str] = &[
    "Aberdeen", "Bath", "Belfast", "Birmingham", "Bradford", "Brighton", "Bristol", "Cambridge",
    "Canterbury", "Cardiff", "Carlisle", "Chelmsford", "Chester", "Coventry", "Derby", "Dundee",
    "Durham", "Edinburgh", "Exeter", "Glasgow", "Gloucester", "Hull", "Inverness", "Ipswich",
    "Leeds", "Leicester", "Lincoln", "Liverpool", "London", "Luton", "Manchester",
    "Milton Keynes", "Newcastle", "Newcastle upon Tyne", "Northampton", "Norwich", "Nottingham",
    "Oxford", "Peterborough", "Plymouth", "Portsmouth", "Preston", "Reading", "Salford",
    "Sheffield", "Southampton", "Stoke-on-Trent", "Sunderland", "Swansea", "Swindon", "Wakefield",
    "Winchester", "Wolverhampton", "Worcester", "York",
    // Counties and regions
    "Berkshire", "Buckinghamshire", "Cheshire", "Cornwall", "Cumbria", "Derbyshire", "Devon",
    "Dorset", "Essex", "Gloucestershire", "Hampshire", "Hertfordshire", "Kent", "Lancashire",
    "Leicestershire", "Lincolnshire", "Merseyside", "Norfolk", "Northumberland",
    "Nottinghamshire", "Oxfordshire", "Shropshire", "Somerset", "Staffordshire", "Suffolk",
    "Surrey", "Sussex", "Warwickshire", "Wiltshire", "Yorkshire",
];

/// Heuristic recogniser for PERSON, ORGANIZATION and LOCATION names
pub struct EntityDetector {
    first_names: HashSet<String>,
    ambiguous: HashSet<&'static str>,
    stop_words: HashSet<&'static str>,
    places: Regex,
    enabled: Vec<Category>,
}

impl EntityDetector {
    pub const CATEGORIES: [Category; 3] =
        [Category::Name, Category::Organization, Category::Location];

    pub fn new() -> Self {
        Self::with_gazetteer(Vec::<String>::new(), Vec::<String>::new())
            .expect("built-in gazetteer forms a valid pattern")
    }

    /// Built-in gazetteers extended with operator-supplied first names and places
    pub fn with_gazetteer<N, P>(first_names: N, places: P) -> Result<Self>
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let first_names = FIRST_NAMES
            .iter()
            .map(|n| n.to_string())
            .chain(
                first_names
                    .into_iter()
                    .map(|n| n.as_ref().trim().to_lowercase()),
            )
            .filter(|n| !n.is_empty())
            .collect();

        let mut places: Vec<String> = PLACES
            .iter()
            .map(|p| p.to_string())
            .chain(places.into_iter().map(|p| p.as_ref().trim().to_string()))
            .filter(|p| !p.is_empty())
            .collect();
        places.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        places.dedup();

        let alternation = places
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let places = Regex::new(&format!(r"\b(?:{})\b", alternation)).map_err(|source| {
            Error::InvalidPattern {
                name: "places".to_string(),
                source,
            }
        })?;

        Ok(Self {
            first_names,
            ambiguous: AMBIGUOUS_FIRST_NAMES.iter().copied().collect(),
            stop_words: NAME_STOP_WORDS.iter().copied().collect(),
            places,
            enabled: Self::CATEGORIES.to_vec(),
        })
    }

    /// Restrict output to the given entity categories
    pub fn only(mut self, categories: &[Category]) -> Self {
        self.enabled = Self::CATEGORIES
            .into_iter()
            .filter(|c| categories.contains(c))
            .collect();
        self
    }

    pub fn detect_names(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();

        for caps in TITLE_NAME.captures_iter(text) {
            if let Some(name) = caps.get(1) {
                spans.push(Span::from_match(Category::Name, name));
            }
        }

        for caps in LABELLED_NAME.captures_iter(text) {
            if let Some(name) = caps.get(1) {
                spans.push(Span::from_match(Category::Name, name));
            }
        }

        for run in capitalised_runs(text) {
            let mut i = 0;
            while i < run.len() {
                let word = run[i].as_str().to_lowercase();
                let has_next = i + 1 < run.len() && !self.ends_name(run[i + 1].as_str());
                let starts_name = self.first_names.contains(&word)
                    || (has_next && self.ambiguous.contains(word.as_str()));

                if !starts_name {
                    i += 1;
                    continue;
                }

                // First name plus up to two following words
                let mut j = i + 1;
                while j < run.len() && j < i + 3 && !self.ends_name(run[j].as_str()) {
                    j += 1;
                }

                let start = run[i].start();
                let end = run[j - 1].end();
                spans.push(Span::new(Category::Name, start, end, &text[start..end]));
                i = j;
            }
        }

        spans
    }

    pub fn detect_organizations(&self, text: &str) -> Vec<Span> {
        ORG_SUFFIXED
            .find_iter(text)
            .chain(ORG_OF.find_iter(text))
            .map(|m| Span::from_match(Category::Organization, m))
            .collect()
    }

    pub fn detect_locations(&self, text: &str) -> Vec<Span> {
        self.places
            .find_iter(text)
            .map(|m| Span::from_match(Category::Location, m))
            .collect()
    }

    fn ends_name(&self, word: &str) -> bool {
        self.stop_words.contains(word.to_lowercase().as_str()) || self.is_place(word)
    }

    fn is_place(&self, word: &str) -> bool {
        self.places
            .find(word)
            .is_some_and(|m| m.start() == 0 && m.end() == word.len())
    }
}

impl Default for EntityDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for EntityDetector {
    fn name(&self) -> &str {
        "entities"
    }

    fn categories(&self) -> &[Category] {
        &self.enabled
    }

    fn detect(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();

        if self.enabled.contains(&Category::Name) {
            spans.extend(self.detect_names(text));
        }
        if self.enabled.contains(&Category::Organization) {
            spans.extend(self.detect_organizations(text));
        }
        if self.enabled.contains(&Category::Location) {
            spans.extend(self.detect_locations(text));
        }

        spans
    }
}

/// Group capitalised words separated only by spaces or tabs
fn capitalised_runs(text: &str) -> Vec<Vec<Match<'_>>> {
    let mut runs: Vec<Vec<Match<'_>>> = Vec::new();

    for word in CAPITALISED_WORD.find_iter(text) {
        if word.as_str().len() < 2 {
            continue;
        }

        let joins_previous = runs
            .last()
            .and_then(|run| run.last())
            .is_some_and(|prev| {
                let gap = &text[prev.end()..word.start()];
                !gap.is_empty() && gap.chars().all(|c| c == ' ' || c == '\t')
            });

        match runs.last_mut() {
            Some(run) if joins_previous => run.push(word),
            _ => runs.push(vec![word]),
        }
    }

    runs
}
