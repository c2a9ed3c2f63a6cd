use std::io;

use bytes::BytesMut;
use tempfile::{NamedTempFile, TempPath};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::thumbnails::ThumbnailData;

/// Buffers an incoming part in memory up to `memory_limit` bytes. Once the
/// limit would be exceeded everything received so far moves to a temporary
/// file and the rest of the part is appended there.
#[derive(Debug)]
pub struct SpooledUpload {
    memory_limit: usize,
    buffer: BytesMut,
    spool: Option<Spool>,
}

#[derive(Debug)]
struct Spool {
    file: tokio::fs::File,
    path: TempPath,
    size: u64,
}

impl SpooledUpload {
    pub fn new(memory_limit: usize) -> Self {
        Self {
            memory_limit,
            buffer: BytesMut::new(),
            spool: None,
        }
    }

    pub async fn push(&mut self, chunk: &[u8]) -> io::Result<()> {
        if let Some(spool) = self.spool.as_mut() {
            spool.file.write_all(chunk).await?;
            spool.size += chunk.len() as u64;
            return Ok(());
        }

        if self.buffer.len() + chunk.len() <= self.memory_limit {
            self.buffer.extend_from_slice(chunk);
            return Ok(());
        }

        let (file, path) = NamedTempFile::new()?.into_parts();
        let mut file = tokio::fs::File::from_std(file);
        file.write_all(&self.buffer).await?;
        file.write_all(chunk).await?;

        let size = (self.buffer.len() + chunk.len()) as u64;
        debug!(path = %path.display(), bytes = size, "upload spooled to disk");
        self.buffer = BytesMut::new();
        self.spool = Some(Spool { file, path, size });
        Ok(())
    }

    pub async fn finish(self) -> io::Result<ThumbnailData> {
        match self.spool {
            Some(Spool {
                mut file,
                path,
                size,
            }) => {
                file.flush().await?;
                Ok(ThumbnailData::Spooled { path, size })
            }
            None => Ok(ThumbnailData::Memory(self.buffer.freeze())),
        }
    }
}
