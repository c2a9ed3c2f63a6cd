use std::path::Path;

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};

use super::TubelyClient;
use crate::domain::ids::VideoId;
use crate::domain::videos::Video;

pub struct ThumbnailsClient<'a> {
    client: &'a TubelyClient,
}

impl<'a> ThumbnailsClient<'a> {
    pub fn new(client: &'a TubelyClient) -> Self {
        Self { client }
    }

    /// Upload `path` as the thumbnail of `video_id`.
    ///
    /// Without an explicit `content_type` the type is guessed from the file extension.
    pub async fn upload(
        &self,
        video_id: VideoId,
        path: &Path,
        content_type: Option<&str>,
    ) -> Result<Video> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;

        let content_type = content_type.map_or_else(
            || {
                mime_guess::from_path(path)
                    .first_or_octet_stream()
                    .to_string()
            },
            str::to_string,
        );

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "thumbnail".to_string());

        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(&content_type)
            .with_context(|| format!("invalid content type: {content_type}"))?;
        let form = Form::new().part("thumbnail", part);

        let url = self
            .client
            .endpoint(&format!("api/videos/{video_id}/thumbnail"))?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .multipart(form)
            .send()
            .await?;
        self.client.handle_response(response).await
    }
}
