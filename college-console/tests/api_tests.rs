//! ApiClient against a mock REST server

use college_console::api::ApiClient;
use college_console::entity::{Course, CourseFields, Entity, RecordId, Student, StudentFields};
use college_console::error::ApiError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(format!("{}/api", server.uri()));
    (server, client)
}

#[tokio::test]
async fn list_decodes_numeric_and_string_ids() {
    let (server, client) = server().await;
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "studentId": "S-ab12cd34", "name": "Jane Doe", "major": "CS"},
            {"id": "64b7f0", "studentId": "S-00c0ffee", "name": "John Roe", "major": "Math"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let students = client.list::<Student>().await.unwrap();

    assert_eq!(students.len(), 2);
    assert_eq!(students[0].id, Some(RecordId::from(1)));
    assert_eq!(students[0].business_key(), "S-ab12cd34");
    assert_eq!(students[1].id, Some(RecordId::from("64b7f0")));
    assert_eq!(students[1].major, "Math");
}

#[tokio::test]
async fn create_posts_business_fields_as_json() {
    let (server, client) = server().await;
    Mock::given(method("POST"))
        .and(path("/api/students"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "studentId": "S-ab12cd34",
            "name": "Jane Doe",
            "major": "CS"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1, "studentId": "S-ab12cd34", "name": "Jane Doe", "major": "CS"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create::<Student>(&StudentFields {
            student_id: "S-ab12cd34".into(),
            name: "Jane Doe".into(),
            major: "CS".into(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, Some(RecordId::from(1)));
}

#[tokio::test]
async fn update_puts_to_record_path_without_id_in_body() {
    let (server, client) = server().await;
    Mock::given(method("PUT"))
        .and(path("/api/courses/7"))
        .and(body_json(json!({
            "courseCode": "C-00c0ffee",
            "name": "Intro to Rust",
            "instructor": "Dr. Jones"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "courseCode": "C-00c0ffee",
            "name": "Intro to Rust",
            "instructor": "Dr. Jones"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .update::<Course>(
            &RecordId::from(7),
            &CourseFields {
                course_code: "C-00c0ffee".into(),
                name: "Intro to Rust".into(),
                instructor: "Dr. Jones".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.instructor, "Dr. Jones");
}

#[tokio::test]
async fn get_fetches_single_record_with_encoded_id() {
    let (server, client) = server().await;
    Mock::given(method("GET"))
        .and(path("/api/students/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a b", "studentId": "S-1", "name": "Spaced", "major": "Art"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let student = client
        .get::<Student>(&RecordId::from("a b"))
        .await
        .unwrap();
    assert_eq!(student.name, "Spaced");
}

#[tokio::test]
async fn delete_accepts_empty_success_body() {
    let (server, client) = server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/courses/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete::<Course>(&RecordId::from(7)).await.unwrap();
}

#[tokio::test]
async fn non_success_status_is_request_error() {
    let (server, client) = server().await;
    Mock::given(method("POST"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client
        .create::<Student>(&StudentFields {
            student_id: "S-ab12cd34".into(),
            name: "Jane Doe".into(),
            major: "CS".into(),
        })
        .await
        .unwrap_err();

    match err {
        ApiError::Request { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected RequestError, got {other:?}"),
    }
}

#[tokio::test]
async fn not_found_on_delete_is_request_error() {
    let (server, client) = server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/students/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = client
        .delete::<Student>(&RecordId::from(99))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let (server, client) = server().await;
    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list::<Course>().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Reserve a port, then free it so nothing listens there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(format!("http://{addr}/api"));
    let err = client.list::<Student>().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    assert_eq!(err.status(), None);
}
