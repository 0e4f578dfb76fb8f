//! Overall grade aggregation.
//!
//! This module derives the overall letter and GPA from the category grades
//! of a draft. The result is recomputed on demand and never stored on the
//! draft itself.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Grade, GradeSheet, OverallGrade};

/// Minimum GPA for an overall A.
pub const GRADE_A_THRESHOLD: Decimal = Decimal::from_parts(35, 0, 0, false, 1);
/// Minimum GPA for an overall B.
pub const GRADE_B_THRESHOLD: Decimal = Decimal::from_parts(25, 0, 0, false, 1);
/// Minimum GPA for an overall C.
pub const GRADE_C_THRESHOLD: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Maps a GPA to its overall letter using the fixed thresholds.
///
/// # Examples
///
/// ```
/// use plexus_evaluations::calculation::grade_for_gpa;
/// use plexus_evaluations::models::Grade;
/// use rust_decimal::Decimal;
///
/// assert_eq!(grade_for_gpa(Decimal::new(350, 2)), Grade::A);
/// assert_eq!(grade_for_gpa(Decimal::new(349, 2)), Grade::B);
/// assert_eq!(grade_for_gpa(Decimal::new(149, 2)), Grade::D);
/// ```
pub fn grade_for_gpa(gpa: Decimal) -> Grade {
    if gpa >= GRADE_A_THRESHOLD {
        Grade::A
    } else if gpa >= GRADE_B_THRESHOLD {
        Grade::B
    } else if gpa >= GRADE_C_THRESHOLD {
        Grade::C
    } else {
        Grade::D
    }
}

/// Computes the overall grade of a grade sheet.
///
/// Takes the plain arithmetic mean of the points of every provided grade
/// (categories are not weighted, and ungraded categories are ignored),
/// rounds it to two decimal places and maps the rounded value to a letter.
/// Returns `None` when no category has been graded.
///
/// # Examples
///
/// ```
/// use plexus_evaluations::calculation::compute_overall;
/// use plexus_evaluations::models::{Category, Grade, GradeSheet};
/// use rust_decimal::Decimal;
///
/// let mut sheet = GradeSheet::default();
/// sheet.set(Category::Work, Some(Grade::A));
/// sheet.set(Category::Leave, Some(Grade::B));
///
/// let overall = compute_overall(&sheet).unwrap();
/// assert_eq!(overall.gpa, Decimal::new(350, 2));
/// assert_eq!(overall.grade, Grade::A);
/// ```
pub fn compute_overall(grades: &GradeSheet) -> Option<OverallGrade> {
    let (total, count) = grades
        .provided()
        .fold((Decimal::ZERO, 0u32), |(total, count), grade| {
            (total + grade.points(), count + 1)
        });

    if count == 0 {
        return None;
    }

    let gpa = (total / Decimal::from(count))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Some(OverallGrade {
        grade: grade_for_gpa(gpa),
        gpa,
    })
}
