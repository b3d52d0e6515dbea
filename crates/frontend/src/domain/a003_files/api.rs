use contracts::domain::a003_files::aggregate::{FileListResponse, StoredFile, UploadedFile};
use web_sys::FormData;

use crate::shared::http::{self, ApiError, ApiResult};

/// Upload one file as multipart field `file`
pub async fn upload_file(file: &web_sys::File) -> ApiResult<UploadedFile> {
    let form = FormData::new().map_err(|e| ApiError::Encode(format!("{e:?}")))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| ApiError::Encode(format!("{e:?}")))?;
    http::post_multipart("/files/upload", form).await
}

/// Files uploaded by the current user, newest first
pub async fn fetch_files() -> ApiResult<Vec<StoredFile>> {
    let response: FileListResponse = http::get_json("/files").await?;
    Ok(response.files)
}

pub async fn delete_file(id: i64) -> ApiResult<()> {
    http::delete(&format!("/files/{}", id)).await
}
