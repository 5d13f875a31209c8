//! Derived variables for the Hsu et al. (2017) breast-cancer stage study.
//!
//! Hsu CD, Wang X, Habif DV, et al. "Breast Cancer Stage Variation and
//! Survival in Association With Insurance Status and Sociodemographic
//! Factors in US Women 18 to 64 Years Old." Cancer, 2017.

use seer_model::schema::{AGE_AT_DIAGNOSIS, AJCC_STAGE, ER_STATUS, MARITAL_STATUS, PR_STATUS};
use seer_model::{AjccStage, CodeTable};

use crate::derive::{CodeCategoryRule, DerivationRule, DerivedVariable, LabelMatcher, MaskRule};
use crate::predicate::{CompareOp, Condition, Mask};

pub const EARLY_LATE_STAGE: &str = "Early Late Stage";
pub const CANCER_STAGE_NUM: &str = "Cancer Stage Num";
pub const HORMONE_RECEPTOR: &str = "Hormone Receptor";
pub const MARITAL_GROUP: &str = "Marital Group";
pub const AGE_GROUP: &str = "Age Group";

const RECEPTOR_POSITIVE: i64 = 1;
const RECEPTOR_NEGATIVE: i64 = 2;
const RECEPTOR_BORDERLINE: i64 = 3;

/// Early stage (I, IIA, IIB, IIIA) versus late stage (IIIB, IIIC, IV).
pub fn early_late_stage() -> DerivedVariable {
    DerivedVariable {
        name: EARLY_LATE_STAGE.to_string(),
        codes: CodeTable::from_pairs([(1, "early"), (2, "late")]),
        rule: DerivationRule::Codes(CodeCategoryRule {
            source: AJCC_STAGE.to_string(),
            groups: vec![
                (1, LabelMatcher::exact(["I", "IIA", "IIB", "IIIA"])),
                (2, LabelMatcher::exact(["IIIB", "IIIC", "IV"])),
            ],
        }),
    }
}

/// Roman numeral stage 1-4 from the AJCC stage group.
pub fn cancer_stage_num() -> DerivedVariable {
    DerivedVariable {
        name: CANCER_STAGE_NUM.to_string(),
        codes: CodeTable::from_pairs([(1, "I"), (2, "II"), (3, "III"), (4, "IV")]),
        rule: DerivationRule::Codes(CodeCategoryRule {
            source: AJCC_STAGE.to_string(),
            groups: [
                AjccStage::StageIV,
                AjccStage::StageIII,
                AjccStage::StageII,
                AjccStage::StageI,
            ]
            .into_iter()
            .filter_map(|stage| {
                stage
                    .numeral()
                    .map(|numeral| (i64::from(numeral), LabelMatcher::Stage(stage)))
            })
            .collect(),
        }),
    }
}

/// Hormone receptor positive when either ER or PR is positive or
/// borderline; negative when both are negative.
pub fn hormone_receptor() -> DerivedVariable {
    let positive = Mask::any([
        Condition::eq(ER_STATUS, RECEPTOR_POSITIVE),
        Condition::eq(PR_STATUS, RECEPTOR_POSITIVE),
        Condition::eq(ER_STATUS, RECEPTOR_BORDERLINE),
        Condition::eq(PR_STATUS, RECEPTOR_BORDERLINE),
    ]);
    let negative = Mask::all([
        Condition::eq(ER_STATUS, RECEPTOR_NEGATIVE),
        Condition::eq(PR_STATUS, RECEPTOR_NEGATIVE),
    ]);
    DerivedVariable {
        name: HORMONE_RECEPTOR.to_string(),
        codes: CodeTable::from_pairs([(1, "positive"), (2, "negative")]),
        rule: DerivationRule::Masks(MaskRule {
            assignments: vec![(1, positive), (2, negative)],
        }),
    }
}

/// Married versus single (never married, separated, divorced, widowed, or
/// unmarried partner). Unknown marital status stays null.
pub fn marital_group() -> DerivedVariable {
    DerivedVariable {
        name: MARITAL_GROUP.to_string(),
        codes: CodeTable::from_pairs([(1, "single"), (2, "married")]),
        rule: DerivationRule::Masks(MaskRule {
            assignments: vec![
                (1, Condition::new(MARITAL_STATUS, CompareOp::Lt, 9).into()),
                (2, Condition::eq(MARITAL_STATUS, 2).into()),
            ],
        }),
    }
}

/// Younger (under 40) versus older (40 and up).
pub fn age_group() -> DerivedVariable {
    DerivedVariable {
        name: AGE_GROUP.to_string(),
        codes: CodeTable::from_pairs([(1, "younger"), (2, "older")]),
        rule: DerivationRule::Masks(MaskRule {
            assignments: vec![
                (1, Condition::new(AGE_AT_DIAGNOSIS, CompareOp::Lt, 40).into()),
                (2, Condition::new(AGE_AT_DIAGNOSIS, CompareOp::Ge, 40).into()),
            ],
        }),
    }
}

/// All derived variables of the study, in the order they are added.
pub fn hsu_2017_derivations() -> Vec<DerivedVariable> {
    vec![
        early_late_stage(),
        cancer_stage_num(),
        hormone_receptor(),
        marital_group(),
        age_group(),
    ]
}
