use anyhow::Result;

use super::TubelyClient;
use crate::domain::ids::VideoId;
use crate::domain::videos::{NewVideo, Video};

pub struct VideosClient<'a> {
    client: &'a TubelyClient,
}

impl<'a> VideosClient<'a> {
    pub fn new(client: &'a TubelyClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, payload: &NewVideo) -> Result<Video> {
        let url = self.client.endpoint("api/videos")?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .json(payload)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn get(&self, id: VideoId) -> Result<Video> {
        let url = self.client.endpoint(&format!("api/videos/{id}"))?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn list(&self) -> Result<Vec<Video>> {
        let url = self.client.endpoint("api/videos")?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }
}
