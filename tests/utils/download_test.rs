use actix_web::{web, App, HttpResponse};
use blog_generator::utils::config::BackgroundConfig;
use blog_generator::utils::download::{BackgroundDownloader, BackgroundImage};
use std::path::PathBuf;

const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00";

fn start_server() -> actix_test::TestServer {
    actix_test::start(|| {
        App::new()
            .route(
                "/bg.gif",
                web::get().to(|| async { HttpResponse::Ok().content_type("image/gif").body(GIF) }),
            )
            .route(
                "/bg",
                web::get()
                    .to(|| async { HttpResponse::Ok().content_type("image/png").body(GIF) }),
            )
            .route(
                "/plain.gif",
                web::get().to(|| async {
                    HttpResponse::Ok().content_type("application/octet-stream").body(GIF)
                }),
            )
    })
}

fn config(url: String, cache_path: PathBuf) -> BackgroundConfig {
    BackgroundConfig { enabled: true, url, cache_path, timeout_secs: 5 }
}

#[actix_web::test]
async fn test_fetch_caches_and_encodes() {
    let srv = start_server();
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("nested").join("background_image.gif");

    let image = BackgroundDownloader::fetch(&config(srv.url("/bg.gif"), cache.clone()))
        .await
        .unwrap();

    assert_eq!(image, BackgroundImage::from_bytes("image/gif", GIF));
    assert_eq!(std::fs::read(&cache).unwrap(), GIF);
}

#[actix_web::test]
async fn test_fetch_prefers_content_type_over_extension() {
    let srv = start_server();
    let dir = tempfile::tempdir().unwrap();

    let image = BackgroundDownloader::fetch(&config(srv.url("/bg"), dir.path().join("bg")))
        .await
        .unwrap();
    assert_eq!(image.mime, "image/png");

    let image =
        BackgroundDownloader::fetch(&config(srv.url("/plain.gif"), dir.path().join("plain")))
            .await
            .unwrap();
    assert_eq!(image.mime, "image/gif");
}

#[actix_web::test]
async fn test_resolve_falls_back_to_cached_copy() {
    let srv = start_server();
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("background_image.gif");
    std::fs::write(&cache, GIF).unwrap();

    let image = BackgroundDownloader::resolve(&config(srv.url("/missing.gif"), cache)).await;
    assert_eq!(image, Some(BackgroundImage::from_bytes("image/gif", GIF)));
}

#[actix_web::test]
async fn test_resolve_without_any_source_is_none() {
    let srv = start_server();
    let dir = tempfile::tempdir().unwrap();

    let image = BackgroundDownloader::resolve(&config(
        srv.url("/missing.gif"),
        dir.path().join("never-written.gif"),
    ))
    .await;
    assert!(image.is_none());
}

#[actix_web::test]
async fn test_disabled_background_is_not_fetched() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("background_image.gif");
    std::fs::write(&cache, GIF).unwrap();

    let mut config = config("http://127.0.0.1:9/bg.gif".to_string(), cache);
    config.enabled = false;
    assert!(BackgroundDownloader::resolve(&config).await.is_none());
}
