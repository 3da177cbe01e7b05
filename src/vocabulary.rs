//! Vocabulary registry — the closed set of supported terminologies and
//! their join specifications.
//!
//! Each vocabulary pairs a main concept table with a Vietnamese translation
//! side-table. The join specification names both files and the translation
//! table's code and text columns. Column names are matched exactly and
//! case-sensitively, including non-ASCII names.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The three supported vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    Snomed,
    Loinc,
    Icd10,
}

/// Selector value outside the supported set. A configuration mismatch
/// between caller and registry, reported loudly instead of degrading to
/// empty results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vocabulary: {0}")]
pub struct UnknownVocabulary(pub String);

/// How a vocabulary's translation table joins against its main table.
#[derive(Debug, Clone, Copy)]
pub struct JoinSpec {
    /// Main concept table file, relative to the data directory.
    pub main_file: &'static str,
    /// Translation side-table file, relative to the data directory.
    pub translation_file: &'static str,
    /// Column in the translation table holding the concept code.
    pub code_column: &'static str,
    /// Column in the translation table holding the Vietnamese text.
    pub text_column: &'static str,
}

impl Vocabulary {
    pub const ALL: [Vocabulary; 3] = [Self::Snomed, Self::Loinc, Self::Icd10];

    /// Stable identifier used in API paths and export filenames.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Snomed => "snomed",
            Self::Loinc => "loinc",
            Self::Icd10 => "icd10",
        }
    }

    /// Human-readable vocabulary name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Snomed => "SNOMED CT",
            Self::Loinc => "LOINC",
            Self::Icd10 => "ICD-10",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Snomed => "Systematized Nomenclature of Medicine Clinical Terms",
            Self::Loinc => "Logical Observation Identifiers Names and Codes",
            Self::Icd10 => "International Classification of Diseases, 10th Revision",
        }
    }

    /// Join specification for this vocabulary. Immutable, defined once.
    pub fn join_spec(&self) -> JoinSpec {
        match self {
            Self::Snomed => JoinSpec {
                main_file: "df_grouped_SNOMED.csv",
                translation_file: "data_snomed_vi.csv",
                code_column: "Code",
                text_column: "concept_name_vi",
            },
            Self::Loinc => JoinSpec {
                main_file: "df_grouped_LOINC.csv",
                translation_file: "tong_hop_loinc_2025-08-20_07-23-07.csv",
                code_column: "LOINC Number",
                text_column: "Long Common Name",
            },
            Self::Icd10 => JoinSpec {
                main_file: "df_grouped_ICD10.csv",
                translation_file: "Danh mục ICD-10 kcb.xlsx",
                code_column: "Code",
                text_column: "Nội dung",
            },
        }
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Vocabulary {
    type Err = UnknownVocabulary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snomed" => Ok(Self::Snomed),
            "loinc" => Ok(Self::Loinc),
            "icd10" => Ok(Self::Icd10),
            other => Err(UnknownVocabulary(other.to_string())),
        }
    }
}
