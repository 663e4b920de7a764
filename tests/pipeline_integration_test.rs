use httpmock::prelude::*;
use syllabus_etl::domain::model::CourseRecord;
use syllabus_etl::{CanvasClient, CliConfig, EtlEngine, LocalStorage, SyllabusPipeline};
use tempfile::TempDir;

fn config_for(server: &MockServer, output_path: &str) -> CliConfig {
    CliConfig {
        base_url: server.base_url(),
        access_token: Some("test-token".to_string()),
        output_path: output_path.to_string(),
        output_file: "syllabi.json".to_string(),
        timeout_secs: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_end_to_end_scrape_writes_grouped_syllabi() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();

    let registry_modules = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/courses/3769/modules")
            .header("Authorization", "Bearer test-token")
            .query_param("per_page", "100");
        then.status(200).json_body(serde_json::json!([
            {
                "id": 1,
                "name": "Spring 2022 Registries",
                "items_url": server.url("/api/v1/courses/3769/modules/1/items")
            },
            {
                "id": 2,
                "name": "Fall 2023 Registries",
                "items_url": server.url("/api/v1/courses/3769/modules/2/items")
            }
        ]));
    });

    let old_term_items = server.mock(|when, then| {
        when.method(GET).path("/api/v1/courses/3769/modules/1/items");
        then.status(200).json_body(serde_json::json!([]));
    });

    let registry_links = server.mock(|when, then| {
        when.method(GET).path("/api/v1/courses/3769/modules/2/items");
        then.status(200).json_body(serde_json::json!([
            {
                "id": 20,
                "type": "ExternalUrl",
                "title": "Computer Science (15XXX)",
                "external_url": server.url("/courses/500")
            },
            {
                "id": 21,
                "type": "ExternalUrl",
                "title": "Shared drive",
                "external_url": "https://drive.example/folder"
            }
        ]));
    });

    let course_modules = server.mock(|when, then| {
        when.method(GET).path("/api/v1/courses/500/modules");
        then.status(200).json_body(serde_json::json!([
            {
                "id": 10,
                "name": "Syllabi A-M",
                "items_url": server.url("/api/v1/courses/500/modules/10/items")
            },
            {
                "id": 11,
                "name": "Syllabi N-Z",
                "items_url": server.url("/api/v1/courses/500/modules/11/items")
            },
            {
                "id": 12,
                "name": "Header only"
            }
        ]));
    });

    let first_page = server.mock(|when, then| {
        when.method(GET).path("/api/v1/courses/500/modules/10/items");
        then.status(200)
            .header(
                "Link",
                format!(
                    "<{}>; rel=\"next\"",
                    server.url("/api/v1/courses/500/modules/10/items/page2")
                ),
            )
            .json_body(serde_json::json!([
                {
                    "id": 100,
                    "type": "File",
                    "title": "15213-A Syllabus.pdf",
                    "html_url": "https://canvas.test/files/1"
                },
                {
                    "id": 101,
                    "type": "Page",
                    "title": "Course Announcements",
                    "html_url": "https://canvas.test/pages/announcements"
                }
            ]));
    });

    let second_page = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/courses/500/modules/10/items/page2");
        then.status(200).json_body(serde_json::json!([
            {
                "id": 102,
                "type": "File",
                "title": "21241.pdf",
                "url": "https://canvas.test/api/v1/files/2",
                "html_url": ""
            }
        ]));
    });

    let failing_module = server.mock(|when, then| {
        when.method(GET).path("/api/v1/courses/500/modules/11/items");
        then.status(500);
    });

    let config = config_for(&server, &output_path);
    let client = CanvasClient::from_config(&config).unwrap();
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = SyllabusPipeline::new(storage, config, client);
    let engine = EtlEngine::new(pipeline);

    let result = engine.run().await.unwrap();
    assert!(result.ends_with("syllabi.json"));

    // Four departments, each with seven in-scope terms.
    registry_modules.assert_hits(28);
    old_term_items.assert_hits(0);
    registry_links.assert_hits(4);
    course_modules.assert_hits(4);
    first_page.assert_hits(4);
    second_page.assert_hits(4);
    failing_module.assert_hits(4);

    let written = std::fs::read(temp_dir.path().join("syllabi.json")).unwrap();
    let records: Vec<CourseRecord> = serde_json::from_slice(&written).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "15213");
    assert_eq!(records[0].syllabi.len(), 1);
    assert_eq!(records[0].syllabi[0].term, "F23");
    assert_eq!(records[0].syllabi[0].section, "A");
    assert_eq!(records[0].syllabi[0].url, "https://canvas.test/files/1");
    assert_eq!(records[1].id, "21241");
    assert_eq!(records[1].syllabi[0].section, "");
    assert_eq!(
        records[1].syllabi[0].url,
        "https://canvas.test/api/v1/files/2"
    );
    assert!(records.iter().all(|r| r.name.is_empty()));
}

#[tokio::test]
async fn test_rejected_token_still_writes_empty_output() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let registry_modules = server.mock(|when, then| {
        when.method(GET).path("/api/v1/courses/3769/modules");
        then.status(401)
            .json_body(serde_json::json!({"errors": [{"message": "Invalid access token."}]}));
    });

    let config = config_for(&server, &output_path);
    let client = CanvasClient::from_config(&config).unwrap();
    let pipeline = SyllabusPipeline::new(LocalStorage::new(output_path.clone()), config, client);

    let result = EtlEngine::new(pipeline).run().await;

    assert!(result.is_ok());
    registry_modules.assert_hits(28);
    let written = std::fs::read_to_string(temp_dir.path().join("syllabi.json")).unwrap();
    assert_eq!(written, "[]");
}

#[tokio::test]
async fn test_custom_registry_course_and_fallback_token() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let registry_modules = server.mock(|when, then| {
        when.method(GET).path("/api/v1/courses/42/modules");
        then.status(200).json_body(serde_json::json!([
            {
                "id": 1,
                "name": "Current registries (F25)",
                "items_url": server.url("/api/v1/courses/42/modules/1/items")
            }
        ]));
    });
    let registry_links = server.mock(|when, then| {
        when.method(GET).path("/api/v1/courses/42/modules/1/items");
        then.status(200).json_body(serde_json::json!([
            {
                "type": "ExternalUrl",
                "title": "Statistics (36XXX)",
                "external_url": server.url("/courses/77/modules")
            }
        ]));
    });
    let course_modules = server.mock(|when, then| {
        when.method(GET).path("/api/v1/courses/77/modules");
        then.status(200).json_body(serde_json::json!([
            {
                "id": 3,
                "name": "Syllabi",
                "items_url": server.url("/api/v1/courses/77/modules/3/items")
            }
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/courses/77/modules/3/items");
        then.status(200).json_body(serde_json::json!([
            {
                "type": "File",
                "title": "36-401 Syllabus.pdf",
                "html_url": "https://canvas.test/files/36401"
            }
        ]));
    });

    let config = CliConfig {
        registry_course_id: 42,
        fallback_module_token: Some("(F25)".to_string()),
        ..config_for(&server, &output_path)
    };
    let client = CanvasClient::from_config(&config).unwrap();
    let pipeline = SyllabusPipeline::new(LocalStorage::new(output_path.clone()), config, client);

    EtlEngine::new(pipeline).run().await.unwrap();

    registry_modules.assert_hits(28);
    registry_links.assert_hits(28);
    course_modules.assert_hits(28);

    let written = std::fs::read(temp_dir.path().join("syllabi.json")).unwrap();
    let records: Vec<CourseRecord> = serde_json::from_slice(&written).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "36401");
    let mut terms: Vec<&str> = records[0].syllabi.iter().map(|s| s.term.as_str()).collect();
    terms.sort_unstable();
    assert_eq!(terms, vec!["F22", "F23", "F24", "S23", "S24", "Su23", "Su24"]);
}
