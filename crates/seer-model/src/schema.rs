//! SEER Research Data Record layout, November 2016 submission.
//!
//! Only the fields used by the breast-cancer cohort are described. Spans are
//! 0-indexed half-open byte ranges; the SEER documentation lists 1-indexed
//! positions (e.g. Sex is column 24, span `[23, 24)`).
//! See <https://seer.cancer.gov/data/documentation.html>.

use crate::dictionary::FieldDictionary;
use crate::error::Result;
use crate::field::{CodeTable, FieldSpec, Span};

pub const PATIENT_ID: &str = "Patient ID number";
pub const MARITAL_STATUS: &str = "Marital Status at DX";
pub const SEX: &str = "Sex";
pub const AGE_AT_DIAGNOSIS: &str = "Age at diagnosis";
pub const YEAR_OF_DIAGNOSIS: &str = "Year of diagnosis";
pub const RACE: &str = "Race recode (W,B,AI,API)";
pub const INSURANCE: &str = "Insurance recode";
pub const AJCC_STAGE: &str = "Breast Adjusted AJCC 6th Stage";
pub const ER_STATUS: &str = "ER Status Recode Breast Cancer";
pub const PR_STATUS: &str = "PR Status Recode Breast Cancer";
pub const CAUSE_SPECIFIC_DEATH: &str = "SEER Cause-Specific Death Classification";
pub const SURVIVAL_MONTHS: &str = "Survival months";

const MARITAL_CODES: &[(i64, &str)] = &[
    (1, "Single (never married)"),
    (2, "Married (including common law)"),
    (3, "Separated"),
    (4, "Divorced"),
    (5, "Widowed"),
    (6, "Unmarried or Domestic Partner"),
    (9, "Unknown"),
];

const SEX_CODES: &[(i64, &str)] = &[(1, "male"), (2, "female")];

const RACE_CODES: &[(i64, &str)] = &[
    (1, "White"),
    (2, "Black"),
    (3, "American Indian/Alaska Native"),
    (4, "Asian or Pacific Islander"),
    (7, "Other unspecified"),
    (9, "Unknown"),
];

const INSURANCE_CODES: &[(i64, &str)] = &[
    (1, "Uninsured"),
    (2, "Any Medicaid"),
    (3, "Insured"),
    (4, "Insured/No specifics"),
    (5, "Insurance status unknown"),
    (9, "Not available"),
];

const AJCC_STAGE_CODES: &[(i64, &str)] = &[
    (0, "0"),
    (1, "0a"),
    (2, "0is"),
    (10, "I"),
    (11, "INOS"),
    (12, "IA"),
    (13, "IA1"),
    (14, "IA2"),
    (15, "IB"),
    (16, "IB1"),
    (17, "IB2"),
    (18, "IC"),
    (19, "IS"),
    (20, "IEA"),
    (21, "IEB"),
    (22, "IE"),
    (23, "ISA"),
    (24, "ISB"),
    (30, "II"),
    (31, "IINOS"),
    (32, "IIA"),
    (33, "IIB"),
    (34, "IIC"),
    (35, "IIEA"),
    (36, "IIEB"),
    (37, "IIE"),
    (38, "IISA"),
    (39, "IISB"),
    (40, "IIS"),
    (41, "IIESA"),
    (42, "IIESB"),
    (43, "IIES"),
    (50, "III"),
    (51, "IIINOS"),
    (52, "IIIA"),
    (53, "IIIB"),
    (54, "IIIC"),
    (55, "IIIEA"),
    (56, "IIIEB"),
    (57, "IIIE"),
    (58, "IIISA"),
    (59, "IIISB"),
    (60, "IIIS"),
    (61, "IIIESA"),
    (62, "IIIESB"),
    (63, "IIIES"),
    (70, "IV"),
    (71, "IVNOS"),
    (72, "IVA"),
    (73, "IVB"),
    (74, "IVC"),
    (88, "N/A"),
    (90, "OCCULT"),
    (99, "UNK Stage"),
];

const RECEPTOR_CODES: &[(i64, &str)] = &[
    (1, "Positive"),
    (2, "Negative"),
    (3, "Borderline"),
    (4, "Unknown"),
    (9, "Not 1990+ Breast"),
];

const CAUSE_SPECIFIC_DEATH_CODES: &[(i64, &str)] = &[
    (0, "Alive or dead of other cause"),
    (1, "Dead"),
    (9, "N/A not first tumor"),
];

fn codes(pairs: &[(i64, &str)]) -> CodeTable {
    CodeTable::from_pairs(pairs.iter().copied())
}

/// Build the field dictionary for the November 2016 record layout.
///
/// # Errors
///
/// Only fails if the literal schema above contains a duplicate name.
pub fn seer_nov_2016() -> Result<FieldDictionary> {
    FieldDictionary::new()
        .with_field(FieldSpec::raw(PATIENT_ID, Span::new(0, 8)))?
        .with_field(
            FieldSpec::raw(MARITAL_STATUS, Span::new(18, 19)).with_codes(codes(MARITAL_CODES)),
        )?
        .with_field(FieldSpec::raw(SEX, Span::new(23, 24)).with_codes(codes(SEX_CODES)))?
        .with_field(
            FieldSpec::raw(AGE_AT_DIAGNOSIS, Span::new(24, 27))
                .with_codes(codes(&[(999, "Unknown")])),
        )?
        .with_field(FieldSpec::raw(YEAR_OF_DIAGNOSIS, Span::new(38, 42)))?
        .with_field(FieldSpec::raw(RACE, Span::new(233, 234)).with_codes(codes(RACE_CODES)))?
        .with_field(
            FieldSpec::raw(INSURANCE, Span::new(310, 311)).with_codes(codes(INSURANCE_CODES)),
        )?
        .with_field(
            FieldSpec::raw(AJCC_STAGE, Span::new(329, 331)).with_codes(codes(AJCC_STAGE_CODES)),
        )?
        .with_field(
            FieldSpec::raw(ER_STATUS, Span::new(277, 278)).with_codes(codes(RECEPTOR_CODES)),
        )?
        .with_field(
            FieldSpec::raw(PR_STATUS, Span::new(278, 279)).with_codes(codes(RECEPTOR_CODES)),
        )?
        .with_field(
            FieldSpec::raw(CAUSE_SPECIFIC_DEATH, Span::new(271, 272))
                .with_codes(codes(CAUSE_SPECIFIC_DEATH_CODES)),
        )?
        .with_field(
            FieldSpec::raw(SURVIVAL_MONTHS, Span::new(300, 304))
                .with_codes(codes(&[(9999, "Unknown")])),
        )?
        .with_staging(AJCC_STAGE)
}
