use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_gradebookd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn gradebookd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn send_line(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    line: &str,
) -> serde_json::Value {
    writeln!(stdin, "{}", line).expect("write request");
    stdin.flush().expect("flush request");
    let mut out = String::new();
    reader.read_line(&mut out).expect("read response line");
    serde_json::from_str(out.trim()).expect("parse response json")
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    let value = send_line(stdin, reader, &payload.to_string());
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn error_code(v: &serde_json::Value) -> &str {
    assert_eq!(v["ok"], false, "expected failure: {}", v);
    v["error"]["code"].as_str().unwrap_or("")
}

#[test]
fn health_reports_version_without_workspace() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let v = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(v["ok"], true);
    assert_eq!(v["result"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(v["result"]["workspacePath"].is_null());
    let _ = child.kill();
}

#[test]
fn journal_methods_need_a_workspace() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    for (i, (method, params)) in [
        ("journal.get", json!({})),
        ("journal.select", json!({ "className": "1A" })),
        ("config.get", json!({})),
        ("grades.set", json!({ "student": "a", "day": "ПН", "value": "5" })),
        ("finalGrades.set", json!({ "student": "a", "value": "5" })),
        ("students.add", json!({ "name": "a" })),
        ("students.requestDelete", json!({ "name": "a" })),
        ("students.cancelDelete", json!({})),
        ("students.confirmDelete", json!({})),
    ]
    .into_iter()
    .enumerate()
    {
        let v = request(&mut stdin, &mut reader, &i.to_string(), method, params);
        assert_eq!(error_code(&v), "no_workspace", "{method}");
    }
    let _ = child.kill();
}

#[test]
fn malformed_requests_are_answered_and_loop_continues() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let v = send_line(&mut stdin, &mut reader, "{ this is not json");
    assert_eq!(error_code(&v), "bad_json");

    let v = request(&mut stdin, &mut reader, "2", "grades.delete", json!({}));
    assert_eq!(error_code(&v), "not_implemented");

    let v = request(&mut stdin, &mut reader, "3", "workspace.select", json!({}));
    assert_eq!(error_code(&v), "bad_params");

    let v = request(
        &mut stdin,
        &mut reader,
        "4",
        "workspace.select",
        json!({ "inMemory": true }),
    );
    assert_eq!(v["ok"], true);

    let v = request(
        &mut stdin,
        &mut reader,
        "5",
        "grades.set",
        json!({ "student": "Ученик", "day": "ПН" }),
    );
    assert_eq!(error_code(&v), "bad_params");
    assert_eq!(v["error"]["message"], "missing value");

    let v = request(
        &mut stdin,
        &mut reader,
        "6",
        "grades.set",
        json!({ "student": "Ученик", "day": "ПН", "value": 7 }),
    );
    assert_eq!(error_code(&v), "bad_params");

    let v = request(
        &mut stdin,
        &mut reader,
        "7",
        "journal.select",
        json!({ "className": "13Z" }),
    );
    assert_eq!(error_code(&v), "unknown_class");
    assert_eq!(v["error"]["details"]["className"], "13Z");

    let v = request(
        &mut stdin,
        &mut reader,
        "8",
        "journal.select",
        json!({ "subject": "Музыка" }),
    );
    assert_eq!(error_code(&v), "unknown_subject");

    let v = request(
        &mut stdin,
        &mut reader,
        "9",
        "students.requestDelete",
        json!({ "name": "Nobody" }),
    );
    assert_eq!(error_code(&v), "student_not_found");

    let v = request(&mut stdin, &mut reader, "10", "health", json!({}));
    assert_eq!(v["ok"], true);
    let _ = child.kill();
}

#[test]
fn grade_edits_are_stored_verbatim_and_scored_when_valid() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "inMemory": true }),
    );
    let edits = [
        ("ПН", "10"),
        ("ВТ", "10"),
        ("СР", "10"),
        ("ЧТ", "9"),
        ("ПТ", "9"),
        ("СБ", "9"),
    ];
    for (i, (day, value)) in edits.iter().enumerate() {
        let v = request(
            &mut stdin,
            &mut reader,
            &format!("g{i}"),
            "grades.set",
            json!({ "student": "Ученик", "day": day, "value": value }),
        );
        assert_eq!(v["ok"], true);
    }
    let v = request(
        &mut stdin,
        &mut reader,
        "2",
        "grades.set",
        json!({ "student": "Ученик", "day": "ПН", "value": "abc" }),
    );
    let row = &v["result"]["row"];
    assert_eq!(row["cells"][0]["grade"], "abc");
    assert!(row["cells"][0]["tier"].is_null());
    // 10,10,9,9,9 -> (200 + 3 * 88.89) / 5 = 93.33
    assert_eq!(row["percentageLabel"], "93%");
    assert_eq!(row["recommendedGrade"], "5");

    let v = request(
        &mut stdin,
        &mut reader,
        "3",
        "finalGrades.set",
        json!({ "student": "Ученик", "value": "5+" }),
    );
    assert_eq!(v["result"]["row"]["finalGrade"], "5+");
    let _ = child.kill();
}
