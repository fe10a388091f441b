use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;

/// Destination for uploaded blog images. Handlers only ever see the stored
/// file name; where the bytes end up is this trait's business.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn save(&self, field: &str, original_name: &str, body: Bytes)
        -> anyhow::Result<String>;
}

/// Writes uploads into a public directory served by the static file route.
#[derive(Clone)]
pub struct DiskImages {
    dir: PathBuf,
}

impl DiskImages {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ImageStore for DiskImages {
    async fn save(
        &self,
        field: &str,
        original_name: &str,
        body: Bytes,
    ) -> anyhow::Result<String> {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let name = stored_name(field, original_name, millis);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create upload dir {}", self.dir.display()))?;
        let path = self.dir.join(&name);
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;

        Ok(name)
    }
}

/// Namespaces the stored file by field name and upload time so concurrent
/// uploads of the same file cannot collide.
fn stored_name(field: &str, original_name: &str, millis: i128) -> String {
    match Path::new(original_name).extension() {
        Some(ext) => format!("{}_{}.{}", field, millis, ext.to_string_lossy()),
        None => format!("{}_{}", field, millis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_name_keeps_field_and_extension() {
        let name = stored_name("image", "holiday photo.PNG", 1726154695904);
        assert_eq!(name, "image_1726154695904.PNG");
    }

    #[test]
    fn stored_name_without_extension() {
        let name = stored_name("image", "rawfile", 42);
        assert_eq!(name, "image_42");
    }

    #[tokio::test]
    async fn disk_store_writes_the_file() {
        let dir = std::env::temp_dir().join("blog-api-storage-test");
        let store = DiskImages::new(&dir);
        let name = store
            .save("image", "pic.png", Bytes::from_static(b"png-bytes"))
            .await
            .expect("save upload");
        assert!(name.starts_with("image_"));
        assert!(name.ends_with(".png"));
        let written = tokio::fs::read(dir.join(&name)).await.expect("read back");
        assert_eq!(written, b"png-bytes");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
