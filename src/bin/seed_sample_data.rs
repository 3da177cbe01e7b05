//! Writes a small sample dataset into the data directory.
//!
//! Useful for trying the portal without the real UMC exports. The ICD-10
//! translation workbook is an official ministry document distributed
//! separately, so it is not generated here; while it is absent the ICD-10
//! catalog serves with null translations and a translation advisory.

use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use vocab_portal::config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let data_dir = config::data_dir();
    fs::create_dir_all(&data_dir)?;
    tracing::info!(data_dir = %data_dir.display(), "seeding sample vocabulary data");

    write_csv(
        &data_dir.join("df_grouped_SNOMED.csv"),
        &[
            &[
                "concept_id",
                "concept_name",
                "concept_code",
                "domain_id",
                "vocabulary_id",
                "concept_class_id",
                "standard_concept",
            ],
            &[
                "12345",
                "Hypertension",
                "38341003",
                "Condition",
                "SNOMED",
                "Clinical finding",
                "S",
            ],
            &[
                "23456",
                "Diabetes mellitus",
                "73211009",
                "Condition",
                "SNOMED",
                "Clinical finding",
                "S",
            ],
            &[
                "34567",
                "Asthma",
                "195967001",
                "Condition",
                "SNOMED",
                "Clinical finding",
                "S",
            ],
        ],
    )?;

    write_csv(
        &data_dir.join("data_snomed_vi.csv"),
        &[
            &["Code", "concept_name_vi"],
            &["38341003", "Tăng huyết áp"],
            &["73211009", "Đái tháo đường"],
            &["195967001", "Hen suyễn"],
        ],
    )?;

    write_csv(
        &data_dir.join("df_grouped_LOINC.csv"),
        &[
            &[
                "concept_id",
                "concept_name",
                "concept_code",
                "domain_id",
                "vocabulary_id",
                "concept_class_id",
                "standard_concept",
            ],
            &[
                "45678",
                "Hemoglobin",
                "718-7",
                "Measurement",
                "LOINC",
                "Lab Test",
                "S",
            ],
            &[
                "56789",
                "Glucose",
                "2345-7",
                "Measurement",
                "LOINC",
                "Lab Test",
                "S",
            ],
            &[
                "67890",
                "Cholesterol",
                "2093-3",
                "Measurement",
                "LOINC",
                "Lab Test",
                "S",
            ],
        ],
    )?;

    write_csv(
        &data_dir.join("tong_hop_loinc_2025-08-20_07-23-07.csv"),
        &[
            &["LOINC Number", "Long Common Name"],
            &["718-7", "Hemoglobin [Mass/volume] in Blood"],
            &["2345-7", "Glucose [Mass/volume] in Serum or Plasma"],
            &["2093-3", "Cholesterol [Mass/volume] in Serum or Plasma"],
        ],
    )?;

    write_csv(
        &data_dir.join("df_grouped_ICD10.csv"),
        &[
            &[
                "concept_id",
                "concept_name",
                "concept_code",
                "domain_id",
                "vocabulary_id",
                "concept_class_id",
                "standard_concept",
            ],
            &[
                "78901",
                "Essential hypertension",
                "I10",
                "Condition",
                "ICD10CM",
                "3-char nonbill code",
                "S",
            ],
            &[
                "89012",
                "Type 2 diabetes mellitus",
                "E11",
                "Condition",
                "ICD10CM",
                "3-char nonbill code",
                "S",
            ],
            &[
                "90123",
                "Asthma, unspecified",
                "J45.9",
                "Condition",
                "ICD10CM",
                "4-char billing code",
                "S",
            ],
        ],
    )?;

    tracing::info!(
        "sample data ready; supply \"Danh mục ICD-10 kcb.xlsx\" separately for ICD-10 translations"
    );
    Ok(())
}

fn write_csv(path: &Path, rows: &[&[&str]]) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.write_record(*row)?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), "wrote sample file");
    Ok(())
}
