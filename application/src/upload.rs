//! Component image upload handler.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    extract::{multipart::Field, Multipart, Query},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use service::domain::component::{self, ImagePath};
use tracing as log;

use crate::{config, define_error, Error};

/// Image extensions accepted for upload.
const EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Query parameters of the upload request.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    /// ID of the component the image is uploaded for.
    ///
    /// May be sent as a `componentId` form field instead.
    pub component_id: Option<String>,
}

/// Reply of the upload request.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// Image has been stored.
    Success {
        /// Always `true`.
        success: bool,

        /// Public path of the stored image.
        path: String,
    },

    /// Image has been rejected.
    Failure {
        /// Always `false`.
        success: bool,

        /// Error code.
        code: &'static str,

        /// Error message.
        error: String,
    },
}

impl From<Error> for Reply {
    fn from(e: Error) -> Self {
        Self::Failure {
            success: false,
            code: e.code,
            error: e.message,
        }
    }
}

/// Stores an uploaded component image under the `<id>.<ext>` file name.
///
/// Expects a multipart body with the `image` file field.
pub async fn component_image(
    Extension(config): Extension<Arc<config::Upload>>,
    Query(params): Query<Params>,
    multipart: Multipart,
) -> Response {
    match store(&config, params, multipart).await {
        Ok(path) => Json(Reply::Success {
            success: true,
            path: path.to_string(),
        })
        .into_response(),
        Err(e) => (e.status_code, Json(Reply::from(e))).into_response(),
    }
}

/// Validates the uploaded image and writes it to the upload directory.
async fn store(
    config: &config::Upload,
    params: Params,
    mut multipart: Multipart,
) -> Result<ImagePath, Error> {
    let mut component_id = params.component_id;
    let mut image = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        Error {
            code: "MALFORMED_UPLOAD",
            status_code: e.status(),
            message: e.body_text(),
            backtrace: None,
        }
    })? {
        match field.name() {
            Some("image") => {
                let ext = accepted_extension(&field)
                    .ok_or(UploadError::UnsupportedType)?;
                let bytes = read_limited(field, config.max_size).await?;
                image = Some((ext, bytes));
            }
            Some("componentId") if component_id.is_none() => {
                component_id = field.text().await.ok();
            }
            _ => {}
        }
    }

    let (ext, bytes) = image.ok_or(UploadError::MissingImage)?;
    let id = component_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(UploadError::MissingComponentId)?;
    let id = component::Id::new(id.trim())
        .ok_or(UploadError::InvalidComponentId)?;

    let dir = PathBuf::from(&config.directory);
    write(&dir, &id, ext, &bytes).await.map_err(|e| {
        log::error!("failed to store image of `Component(id: {id})`: {e}");
        Error::internal(&e)
    })?;
    log::info!(
        "stored {} bytes image of `Component(id: {id})` as `{ext}`",
        bytes.len(),
    );

    Ok(ImagePath::with_extension(&id, ext))
}

/// Returns the normalized extension of the uploaded [`Field`], if both its
/// file name and content type denote an accepted image.
fn accepted_extension(field: &Field<'_>) -> Option<&'static str> {
    let ext = field.file_name().and_then(extension_of)?;
    let mime_ok = field.content_type().is_none_or(|mime| {
        mime.strip_prefix("image/")
            .is_some_and(|sub| EXTENSIONS.contains(&sub))
    });
    mime_ok.then_some(ext)
}

/// Extracts an accepted image extension out of the provided file name.
fn extension_of(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    EXTENSIONS.into_iter().find(|e| *e == ext)
}

/// Reads the provided [`Field`] up to `max` bytes.
async fn read_limited(
    mut field: Field<'_>,
    max: usize,
) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|_| Error::from(UploadError::TooLarge))?
    {
        if bytes.len() + chunk.len() > max {
            return Err(UploadError::TooLarge.into());
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Writes the image, removing the ones previously stored for the same
/// component under other extensions.
async fn write(
    dir: &Path,
    id: &component::Id,
    ext: &str,
    bytes: &[u8],
) -> io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    for stale in EXTENSIONS.into_iter().filter(|e| *e != ext) {
        match tokio::fs::remove_file(dir.join(format!("{id}.{stale}"))).await
        {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
            Ok(()) | Err(_) => {}
        }
    }
    tokio::fs::write(dir.join(format!("{id}.{ext}")), bytes).await
}

define_error! {
    enum UploadError {
        #[code = "NO_FILE_UPLOADED"]
        #[status = BAD_REQUEST]
        #[message = "No file uploaded"]
        MissingImage,

        #[code = "COMPONENT_ID_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "Component ID is required"]
        MissingComponentId,

        #[code = "INVALID_COMPONENT_ID"]
        #[status = BAD_REQUEST]
        #[message = "Component ID may only contain letters, digits, `_` \
                     and `-`"]
        InvalidComponentId,

        #[code = "UNSUPPORTED_IMAGE_TYPE"]
        #[status = BAD_REQUEST]
        #[message = "Only image files are allowed (jpeg, jpg, png, gif, \
                     webp)"]
        UnsupportedType,

        #[code = "IMAGE_TOO_LARGE"]
        #[status = PAYLOAD_TOO_LARGE]
        #[message = "Image exceeds the allowed size"]
        TooLarge,
    }
}

#[cfg(test)]
mod spec {
    use service::domain::component;

    use super::{extension_of, write};

    #[test]
    fn accepts_image_extensions_only() {
        assert_eq!(extension_of("photo.JPG"), Some("jpg"));
        assert_eq!(extension_of("a.b.webp"), Some("webp"));
        assert_eq!(extension_of("scan.jpeg"), Some("jpeg"));
        assert_eq!(extension_of("notes.txt"), None);
        assert_eq!(extension_of("png"), None);
    }

    #[tokio::test]
    async fn replaces_image_stored_under_other_extension() {
        let dir = std::env::temp_dir()
            .join(format!("component-images-{}", uuid::Uuid::new_v4()));
        let id = component::Id::new("rcd_1f").unwrap();

        write(&dir, &id, "jpg", b"old").await.unwrap();
        write(&dir, &id, "png", b"new").await.unwrap();

        assert!(!dir.join("rcd_1f.jpg").exists());
        assert_eq!(
            tokio::fs::read(dir.join("rcd_1f.png")).await.unwrap(),
            b"new",
        );

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
