use imagegen::{save_image, ImageClient, ImageGenError};
use mockito::Server;

#[tokio::test]
async fn generated_image_lands_in_output_dir() -> Result<(), ImageGenError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/v1beta/models/test-model:generateContent")
        .match_header("authorization", "Bearer from-builder")
        .with_status(200)
        .with_body(r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "iVBORw0KGgo="}}]}}]}"#)
        .create_async()
        .await;

    let client = ImageClient::builder()
        .host(server.url())
        .model("test-model")
        .bearer_auth("from-builder")
        .timeout(10)
        .build()
        .expect("client");
    let image = client.generate("a treasure chest", "1:1", "0.5K").await?;

    let dir = tempfile::tempdir().expect("temp dir");
    let path = save_image(&image, None, dir.path())?;
    assert_eq!(path.parent(), Some(dir.path()));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    assert_eq!(
        std::fs::read(&path).expect("image file"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]
    );
    Ok(())
}
