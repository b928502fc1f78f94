use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{required_str, sheet_mut, to_value};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

// Grade text is stored as sent; the 1..10 bound is only advisory.
fn grades_set(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let student = required_str(req, "student")?;
    let day = required_str(req, "day")?;
    let value = required_str(req, "value")?;
    let s = sheet_mut(state)?;
    s.handle_grade_change(student, day, value)?;
    Ok(json!({ "row": to_value(&s.row(student))? }))
}

fn final_grades_set(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let student = required_str(req, "student")?;
    let value = required_str(req, "value")?;
    let s = sheet_mut(state)?;
    s.handle_final_grade_change(student, value)?;
    Ok(json!({ "row": to_value(&s.row(student))? }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.set" => Some(respond(&req.id, grades_set(state, req))),
        "finalGrades.set" => Some(respond(&req.id, final_grades_set(state, req))),
        _ => None,
    }
}
