//! Whole-screen rendering through ConsoleUi

use college_console::dispatch::testing::RenderHarness;
use college_console::entity::{Course, EntityKind, Record, RecordId, Student};
use college_console::state::{AppState, FormDraft, PendingDelete, View};
use college_console::ui::ConsoleUi;

fn render(state: &AppState) -> String {
    let mut ui = ConsoleUi::new();
    let mut harness = RenderHarness::new(100, 24);
    harness.render_to_string_plain(|frame| ui.render(frame, frame.area(), state))
}

fn jane() -> Student {
    Student {
        id: Some(RecordId::from(1)),
        student_id: "S-ab12cd34".into(),
        name: "Jane Doe".into(),
        major: "CS".into(),
    }
}

fn rust_course() -> Course {
    Course {
        id: Some(RecordId::from(7)),
        course_code: "C-00c0ffee".into(),
        name: "Intro to Rust".into(),
        instructor: "Dr. Smith".into(),
    }
}

#[test]
fn empty_dashboard_shows_zero_counts() {
    let output = render(&AppState::default());

    assert!(output.contains("CMS Dashboard"));
    assert!(output.contains("Total Students: 0"));
    assert!(output.contains("Total Courses: 0"));
    assert!(output.contains("Latest registered student: N/A"));
    assert!(output.contains("Last added course: N/A"));
}

#[test]
fn dashboard_names_first_records() {
    let state = AppState {
        students: vec![jane()],
        courses: vec![rust_course()],
        ..Default::default()
    };
    let output = render(&state);

    assert!(output.contains("Total Students: 1"));
    assert!(output.contains("Latest registered student: Jane Doe"));
    assert!(output.contains("Last added course: Intro to Rust"));
}

#[test]
fn student_list_shows_row_columns() {
    let state = AppState {
        active_view: View::StudentsList,
        students: vec![jane()],
        ..Default::default()
    };
    let output = render(&state);

    assert!(output.contains("S-ab12cd34"));
    assert!(output.contains("Jane Doe"));
    assert!(output.contains("CS"));
    assert!(output.contains("Major"));
}

#[test]
fn empty_course_list_shows_placeholder() {
    let state = AppState {
        active_view: View::CoursesList,
        ..Default::default()
    };
    assert!(render(&state).contains("No courses found."));
}

#[test]
fn list_route_with_edit_target_shows_edit_form() {
    let record = Record::from(jane());
    let state = AppState {
        active_view: View::StudentsList,
        students: vec![jane()],
        form: Some(FormDraft::from_record(&record)),
        edit_target: Some(record),
        ..Default::default()
    };
    let output = render(&state);

    assert!(output.contains("Edit Student"));
    assert!(output.contains("S-ab12cd34"));
    assert!(!output.contains("Students (1)"));
}

#[test]
fn add_route_shows_blank_form() {
    let state = AppState {
        active_view: View::CoursesForm,
        form: Some(FormDraft::blank(EntityKind::Course)),
        ..Default::default()
    };
    let output = render(&state);

    assert!(output.contains("Add New Course"));
    assert!(output.contains("Instructor"));
}

#[test]
fn pending_delete_draws_prompt_over_list() {
    let state = AppState {
        active_view: View::StudentsList,
        students: vec![jane()],
        pending_delete: Some(PendingDelete {
            kind: EntityKind::Student,
            id: RecordId::from(1),
            label: "Jane Doe".into(),
        }),
        ..Default::default()
    };
    let output = render(&state);

    assert!(output.contains("Delete student?"));
    assert!(output.contains("delete"));
}

#[test]
fn notice_is_shown_in_status_bar() {
    let state = AppState {
        notice: Some("Failed to load data: API 500 boom".into()),
        ..Default::default()
    };
    assert!(render(&state).contains("Failed to load data"));
}
