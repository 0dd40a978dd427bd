use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The upstream collections the pipeline knows how to query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataType {
    #[default]
    Meps,
    Meetings,
    AdoptedTexts,
    Documents,
    Questions,
    PlenarySessions,
}

impl DataType {
    /// Path segment appended to the API base URL.
    pub fn path_segment(&self) -> &'static str {
        match self {
            DataType::Meps => "meps",
            DataType::Meetings => "meetings",
            DataType::AdoptedTexts => "adopted-texts",
            DataType::Documents => "documents",
            DataType::Questions => "questions",
            DataType::PlenarySessions => "plenary-sessions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataType::Meps => "MEPs",
            DataType::Meetings => "Meetings",
            DataType::AdoptedTexts => "Adopted Texts",
            DataType::Documents => "Documents",
            DataType::Questions => "Parliamentary Questions",
            DataType::PlenarySessions => "Plenary Sessions",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DataType::Meps => "🏛️",
            DataType::Meetings => "📅",
            DataType::AdoptedTexts => "📜",
            DataType::Documents => "📄",
            DataType::Questions => "❓",
            DataType::PlenarySessions => "🗳️",
        }
    }
}

/// Checked in this order; the first category with a hit wins, `Meps` otherwise.
/// "plenary session" therefore resolves to meetings.
const DATA_TYPE_KEYWORDS: &[(DataType, &[&str])] = &[
    (DataType::Meetings, &["meeting", "réunion", "reunion", "session", "séance", "seance"]),
    (
        DataType::AdoptedTexts,
        &["adopted text", "texts adopted", "texte adopté", "textes adoptés", "resolution", "résolution"],
    ),
    (DataType::Documents, &["document", "report", "rapport"]),
    (DataType::Questions, &["question", "interpellation"]),
    (DataType::PlenarySessions, &["plenary", "plénière", "pleniere"]),
];

/// Member states in lookup order. When a query names several countries the
/// earliest row here wins, regardless of where the names appear in the text.
const COUNTRY_SYNONYMS: &[(&str, &[&str])] = &[
    ("FR", &["france", "français", "française", "french"]),
    ("DE", &["germany", "allemagne", "deutsch", "german", "allemand"]),
    ("IT", &["italy", "italie", "italian", "italiano", "italien"]),
    ("ES", &["spain", "espagne", "spanish", "español", "espagnol"]),
    ("PL", &["poland", "pologne", "polish", "polonais"]),
    ("NL", &["netherlands", "pays-bas", "dutch", "néerlandais"]),
    ("BE", &["belgium", "belgique", "belgian", "belge"]),
    ("AT", &["austria", "autriche", "austrian", "autrichien"]),
    ("PT", &["portugal", "portugais", "portuguese"]),
    ("GR", &["greece", "grèce", "greek", "grec"]),
    ("CZ", &["czech", "tchèque", "czech republic", "czechia"]),
    ("HU", &["hungary", "hongrie", "hungarian", "hongrois"]),
    ("SE", &["sweden", "suède", "swedish", "suédois"]),
    ("DK", &["denmark", "danemark", "danish", "danois"]),
    ("FI", &["finland", "finlande", "finnish", "finlandais"]),
    ("IE", &["ireland", "irlande", "irish", "irlandais"]),
    ("SK", &["slovakia", "slovaquie", "slovak", "slovaque"]),
    ("SI", &["slovenia", "slovénie", "slovenian", "slovène"]),
    ("EE", &["estonia", "estonie", "estonian", "estonien"]),
    ("LV", &["latvia", "lettonie", "latvian", "letton"]),
    ("LT", &["lithuania", "lituanie", "lithuanian", "lituanien"]),
    ("LU", &["luxembourg", "luxembourgeois"]),
    ("MT", &["malta", "malte", "maltese", "maltais"]),
    ("CY", &["cyprus", "chypre", "cypriot", "chypriote"]),
    ("HR", &["croatia", "croatie", "croatian", "croate"]),
    ("BG", &["bulgaria", "bulgarie", "bulgarian", "bulgare"]),
    ("RO", &["romania", "roumanie", "romanian", "roumain"]),
];

/// Structured filters extracted from a free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilters {
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year_after: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year_before: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthYearConstraint {
    After(i32),
    Before(i32),
    In(i32),
}

impl BirthYearConstraint {
    pub fn accepts(&self, year: i32) -> bool {
        match *self {
            BirthYearConstraint::After(bound) => year > bound,
            BirthYearConstraint::Before(bound) => year < bound,
            BirthYearConstraint::In(exact) => year == exact,
        }
    }
}

impl QueryFilters {
    /// True when nothing beyond the default data type was extracted.
    pub fn is_empty(&self) -> bool {
        self.data_type == DataType::Meps
            && self.country.is_none()
            && self.birth_year.is_none()
            && self.birth_year_after.is_none()
            && self.birth_year_before.is_none()
            && self.date.is_none()
    }

    /// Several birth-year patterns can match one query; "after" beats "before" beats "in".
    pub fn birth_constraint(&self) -> Option<BirthYearConstraint> {
        self.birth_year_after
            .map(BirthYearConstraint::After)
            .or(self.birth_year_before.map(BirthYearConstraint::Before))
            .or(self.birth_year.map(BirthYearConstraint::In))
    }
}

pub struct QueryParser {
    born_after: Regex,
    born_before: Regex,
    born_in: Regex,
    date: Regex,
}

impl QueryParser {
    pub fn new() -> Self {
        // The patterns are literals; a failure here is a programming error.
        Self {
            born_after: Regex::new(r"(?:né|born|naissance).*?(?:après|after)\s+(\d{4})")
                .expect("valid born-after pattern"),
            born_before: Regex::new(r"(?:né|born|naissance).*?(?:avant|before)\s+(\d{4})")
                .expect("valid born-before pattern"),
            born_in: Regex::new(r"(?:né|born|naissance).*?(?:en|in)\s+(\d{4})")
                .expect("valid born-in pattern"),
            date: Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})(?:\b|t)").expect("valid date pattern"),
        }
    }

    /// Parse a natural-language question into filters. Never fails: anything
    /// that isn't recognised is simply left out.
    pub fn interpret(&self, query: &str) -> QueryFilters {
        let query_lower = query.to_lowercase();

        let filters = QueryFilters {
            data_type: Self::detect_data_type(&query_lower),
            country: Self::detect_country(&query_lower).map(str::to_string),
            birth_year_after: Self::capture_year(&self.born_after, &query_lower),
            birth_year_before: Self::capture_year(&self.born_before, &query_lower),
            birth_year: Self::capture_year(&self.born_in, &query_lower),
            date: self.extract_date(&query_lower),
        };

        tracing::info!(?filters, "extracted filters");
        filters
    }

    fn detect_data_type(query_lower: &str) -> DataType {
        DATA_TYPE_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| query_lower.contains(k)))
            .map(|(data_type, _)| *data_type)
            .unwrap_or_default()
    }

    fn detect_country(query_lower: &str) -> Option<&'static str> {
        COUNTRY_SYNONYMS
            .iter()
            .find(|(_, names)| names.iter().any(|name| query_lower.contains(name)))
            .map(|(code, _)| *code)
    }

    fn capture_year(pattern: &Regex, query_lower: &str) -> Option<i32> {
        pattern
            .captures(query_lower)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// `YYYY-M-D` is normalised to `YYYY-MM-DD`; impossible dates are dropped.
    /// The input is already lower-cased, so ISO timestamps end the date with `t`.
    fn extract_date(&self, query_lower: &str) -> Option<String> {
        let caps = self.date.captures(query_lower)?;
        let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
        let month = caps.get(2)?.as_str().parse::<u32>().ok()?;
        let day = caps.get(3)?.as_str().parse::<u32>().ok()?;

        NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%Y-%m-%d").to_string())
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_filters() {
        let parser = QueryParser::new();
        let filters = parser.interpret("show me everything");

        assert!(filters.is_empty());
        assert_eq!(filters.data_type, DataType::Meps);
    }

    #[test]
    fn test_german_meps_born_after() {
        let parser = QueryParser::new();
        let filters = parser.interpret("German MEPs born after 1980");

        assert_eq!(filters.data_type, DataType::Meps);
        assert_eq!(filters.country.as_deref(), Some("DE"));
        assert_eq!(filters.birth_year_after, Some(1980));
        assert_eq!(filters.birth_year_before, None);
        assert_eq!(filters.birth_year, None);
    }

    #[test]
    fn test_french_birth_patterns() {
        let parser = QueryParser::new();

        let after = parser.interpret("Députés français nés après 1980");
        assert_eq!(after.country.as_deref(), Some("FR"));
        assert_eq!(after.birth_year_after, Some(1980));
        assert_eq!(after.birth_year_before, None);

        let before = parser.interpret("député né avant 1960");
        assert_eq!(before.birth_year_before, Some(1960));
        assert_eq!(before.birth_year_after, None);
        assert_eq!(before.birth_year, None);

        let exact = parser.interpret("date de naissance en 1975");
        assert_eq!(exact.birth_year, Some(1975));
        assert_eq!(exact.birth_year_after, None);
    }

    #[test]
    fn test_born_in_and_before() {
        let parser = QueryParser::new();

        let exact = parser.interpret("Italian politicians born in 1975");
        assert_eq!(exact.country.as_deref(), Some("IT"));
        assert_eq!(exact.birth_year, Some(1975));
        assert_eq!(exact.birth_year_after, None);
        assert_eq!(exact.birth_year_before, None);

        let before = parser.interpret("Polish MEPs born before 1950");
        assert_eq!(before.country.as_deref(), Some("PL"));
        assert_eq!(before.birth_year_before, Some(1950));
        assert_eq!(before.birth_year, None);
    }

    #[test]
    fn test_country_is_case_insensitive() {
        let parser = QueryParser::new();
        for query in ["SPANISH members", "spanish members", "Members from Spain", "españa? no, español"] {
            assert_eq!(parser.interpret(query).country.as_deref(), Some("ES"), "{}", query);
        }
        assert_eq!(parser.interpret("MEPs from the NETHERLANDS").country.as_deref(), Some("NL"));
        assert_eq!(parser.interpret("eurodéputés roumains").country.as_deref(), Some("RO"));
    }

    #[test]
    fn test_country_table_order_wins_over_text_order() {
        let parser = QueryParser::new();
        // Germany appears first in the text but France is earlier in the table.
        let filters = parser.interpret("German and French MEPs");
        assert_eq!(filters.country.as_deref(), Some("FR"));
    }

    #[test]
    fn test_multiple_birth_patterns_all_recorded() {
        let parser = QueryParser::new();
        let filters = parser.interpret("born after 1970 and born before 1990");

        assert_eq!(filters.birth_year_after, Some(1970));
        assert_eq!(filters.birth_year_before, Some(1990));
        assert_eq!(filters.birth_constraint(), Some(BirthYearConstraint::After(1970)));
    }

    #[test]
    fn test_birth_constraint_precedence() {
        let filters = QueryFilters {
            birth_year: Some(1975),
            birth_year_before: Some(1990),
            ..Default::default()
        };
        assert_eq!(filters.birth_constraint(), Some(BirthYearConstraint::Before(1990)));

        let only_exact = QueryFilters {
            birth_year: Some(1975),
            ..Default::default()
        };
        assert_eq!(only_exact.birth_constraint(), Some(BirthYearConstraint::In(1975)));
        assert_eq!(QueryFilters::default().birth_constraint(), None);
    }

    #[test]
    fn test_birth_constraint_accepts() {
        assert!(BirthYearConstraint::After(1980).accepts(1981));
        assert!(!BirthYearConstraint::After(1980).accepts(1980));
        assert!(BirthYearConstraint::Before(1980).accepts(1979));
        assert!(!BirthYearConstraint::Before(1980).accepts(1985));
        assert!(BirthYearConstraint::In(1980).accepts(1980));
    }

    #[test]
    fn test_data_type_detection() {
        let parser = QueryParser::new();
        let cases = [
            ("upcoming committee meetings", DataType::Meetings),
            ("prochaine réunion", DataType::Meetings),
            ("texts adopted last week", DataType::AdoptedTexts),
            ("latest resolution on climate", DataType::AdoptedTexts),
            ("reports on agriculture", DataType::Documents),
            ("written questions about fisheries", DataType::Questions),
            ("plenary sittings in Strasbourg", DataType::PlenarySessions),
            ("Spanish members", DataType::Meps),
        ];
        for (query, expected) in cases {
            assert_eq!(parser.interpret(query).data_type, expected, "{}", query);
        }
    }

    #[test]
    fn test_meetings_outrank_plenary() {
        let parser = QueryParser::new();
        assert_eq!(parser.interpret("plenary session agenda").data_type, DataType::Meetings);
    }

    #[test]
    fn test_date_is_zero_padded() {
        let parser = QueryParser::new();
        assert_eq!(parser.interpret("meetings on 2024-3-7").date.as_deref(), Some("2024-03-07"));
        assert_eq!(parser.interpret("meetings on 2024-11-21").date.as_deref(), Some("2024-11-21"));
        assert_eq!(parser.interpret("meetings on 2024-13-40").date, None);
        assert_eq!(
            parser.interpret("meetings starting 2024-03-07T10:00").date.as_deref(),
            Some("2024-03-07")
        );
    }

    #[test]
    fn test_filters_serialize_without_absent_keys() {
        let parser = QueryParser::new();
        let value = serde_json::to_value(parser.interpret("German MEPs born after 1980")).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"data_type": "meps", "country": "DE", "birth_year_after": 1980})
        );
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(DataType::Meps.path_segment(), "meps");
        assert_eq!(DataType::AdoptedTexts.path_segment(), "adopted-texts");
        assert_eq!(DataType::PlenarySessions.path_segment(), "plenary-sessions");
    }
}
