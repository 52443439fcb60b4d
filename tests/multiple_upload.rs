mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test;

use common::{Part, call_app, content_type, multipart_body, stored_files, test_config};

fn upload_request(body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/uploadmultiple")
        .insert_header((header::CONTENT_TYPE, content_type()))
        .set_payload(body)
}

#[actix_web::test]
async fn test_upload_three_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let body = multipart_body(&[
        Part::file("images", "a.txt", b"first"),
        Part::file("images", "b.txt", b"second"),
        Part::file("images", "c.png", b"third"),
    ]);
    let resp = call_app(&config, upload_request(body)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"File upload successfull");

    let files = stored_files(&config);
    assert_eq!(files.len(), 3);

    let mut contents: Vec<Vec<u8>> = files.iter().map(|f| std::fs::read(f).unwrap()).collect();
    contents.sort();
    assert_eq!(
        contents,
        vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()]
    );
}

#[actix_web::test]
async fn test_text_fields_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let body = multipart_body(&[
        Part::text("description", "holiday pictures"),
        Part::text("images", "not a file"),
        Part::file("images", "a.jpg", b"jpeg bytes"),
        Part::file("images", "", b""),
    ]);
    let resp = call_app(&config, upload_request(body)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let files = stored_files(&config);
    assert_eq!(files.len(), 1);
    assert_eq!(std::fs::read(&files[0]).unwrap(), b"jpeg bytes");
}

#[actix_web::test]
async fn test_oversized_part_stops_batch() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.max_file_size = 8;

    let body = multipart_body(&[
        Part::file("images", "a.txt", b"small"),
        Part::file("images", "b.txt", b"far too large"),
        Part::file("images", "c.txt", b"never"),
    ]);
    let resp = call_app(&config, upload_request(body)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 超限之前的文件保留，之后的文件不再处理
    let files = stored_files(&config);
    assert_eq!(files.len(), 1);
    assert_eq!(std::fs::read(&files[0]).unwrap(), b"small");
}

#[actix_web::test]
async fn test_part_over_request_limit_keeps_earlier_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.max_file_size = 8;
    config.max_request_size = 32;

    let huge = [b'x'; 256];
    let body = multipart_body(&[
        Part::file("images", "a.txt", b"small"),
        Part::file("images", "b.bin", &huge),
    ]);
    let resp = call_app(&config, upload_request(body)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let files = stored_files(&config);
    assert_eq!(files.len(), 1);
    assert_eq!(std::fs::read(&files[0]).unwrap(), b"small");
}

#[actix_web::test]
async fn test_total_request_limit_is_client_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.max_file_size = 16;
    config.max_request_size = 16;

    // 每个部分都不超过单文件上限，但合计超过请求体上限
    let body = multipart_body(&[
        Part::file("images", "a.txt", b"0123456789"),
        Part::file("images", "b.txt", b"0123456789"),
    ]);
    let resp = call_app(&config, upload_request(body)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"request size cannot be bigger than 16 bytes");
    assert!(stored_files(&config).is_empty());
}

#[actix_web::test]
async fn test_rollback_removes_earlier_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.max_file_size = 8;
    config.rollback_on_failure = true;

    let body = multipart_body(&[
        Part::file("images", "a.txt", b"small"),
        Part::file("images", "b.txt", b"tiny"),
        Part::file("images", "c.txt", b"far too large"),
    ]);
    let resp = call_app(&config, upload_request(body)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(stored_files(&config).is_empty());
}

#[actix_web::test]
async fn test_missing_images_field_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let body = multipart_body(&[Part::file("image", "a.txt", b"wrong field")]);
    let resp = call_app(&config, upload_request(body)).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"no file part named \"images\" in form");
    assert!(stored_files(&config).is_empty());
}

#[actix_web::test]
async fn test_only_plain_images_fields_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let body = multipart_body(&[Part::text("images", "just text")]);
    let resp = call_app(&config, upload_request(body)).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(stored_files(&config).is_empty());
}
