use crate::grade::{Grade, GradeTier, GRADE_MAX, GRADE_MIN};
use crate::journal::{FinalGradeMap, GradeMap};
use serde::Serialize;

/// Linear rescale of a 1..10 grade onto 0..100: 1 -> 0%, 10 -> 100%.
pub fn grade_percent(g: f64) -> f64 {
    (g - GRADE_MIN) / (GRADE_MAX - GRADE_MIN) * 100.0
}

/// Mean of the per-grade percentages, rounded to a whole percent.
/// `None` when no grade in the set is numeric and in range.
pub fn completion_percentage<'a, I>(grades: I) -> Option<u32>
where
    I: IntoIterator<Item = &'a Grade>,
{
    let mut sum = 0.0;
    let mut count: usize = 0;
    for g in grades {
        if let Some(v) = g.numeric() {
            sum += grade_percent(v);
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    Some((sum / count as f64).round() as u32)
}

/// Thresholds are checked top-down; first match wins.
pub fn recommended_grade(percentage: u32) -> &'static str {
    if percentage >= 85 {
        "5"
    } else if percentage >= 65 {
        "4"
    } else if percentage >= 40 {
        "3"
    } else {
        "2"
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCell {
    pub day: String,
    pub grade: String,
    pub tier: Option<GradeTier>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow {
    pub student: String,
    pub cells: Vec<GradeCell>,
    pub percentage: Option<u32>,
    pub percentage_label: String,
    pub recommended_grade: String,
    pub final_grade: String,
}

pub fn student_row(
    student: &str,
    days: &[String],
    grades: &GradeMap,
    final_grades: &FinalGradeMap,
) -> StudentRow {
    let cells: Vec<GradeCell> = days
        .iter()
        .map(|day| {
            let grade = grades.get(student, day).to_string();
            GradeCell {
                day: day.clone(),
                tier: GradeTier::for_text(&grade),
                grade,
            }
        })
        .collect();

    let parsed: Vec<Grade> = cells.iter().map(|c| Grade::parse(&c.grade)).collect();
    for (cell, grade) in cells.iter().zip(&parsed) {
        if let Grade::Invalid(text) = grade {
            tracing::debug!(
                student,
                day = %cell.day,
                text = %text,
                "grade left out of percentage"
            );
        }
    }
    let percentage = completion_percentage(&parsed);

    StudentRow {
        student: student.to_string(),
        cells,
        percentage,
        percentage_label: percentage.map(|p| format!("{p}%")).unwrap_or_default(),
        recommended_grade: percentage
            .map(|p| recommended_grade(p).to_string())
            .unwrap_or_default(),
        final_grade: final_grades.get(student).to_string(),
    }
}
