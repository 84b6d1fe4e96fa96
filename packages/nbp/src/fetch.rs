//! Cache-first retrieval of a single publication.

use crate::cache::CacheFile;
use crate::http::Transport;
use crate::location::ResourceLocation;

/// Fetch the raw content of one publication.
///
/// With a cache path, the cache is consulted first and populated after a
/// successful download, so a second call for the same location never hits
/// the network. Without one, the content is downloaded directly.
///
/// Failures are never escalated: a failed download or unreadable cache file
/// yields `None` and the caller moves on to the next candidate.
pub fn fetch_data<T: Transport + ?Sized>(
    transport: &T,
    location: &ResourceLocation,
) -> Option<Vec<u8>> {
    let Some(cache_path) = &location.cache_path else {
        return download(transport, &location.url);
    };

    let cache = CacheFile::new(cache_path);
    if !cache.dir_exists() {
        if let Err(e) = cache.create_dir() {
            tracing::warn!(
                cache_path = %cache_path.display(),
                error = %e,
                "Failed to create cache directory"
            );
        }
    }

    if !cache.file_exists() {
        let bytes = download(transport, &location.url)?;
        if let Err(e) = cache.save(&bytes) {
            // Still usable, just not cached
            tracing::warn!(
                cache_path = %cache_path.display(),
                error = %e,
                "Failed to write cache file"
            );
            return Some(bytes);
        }
    } else {
        tracing::debug!(cache_path = %cache_path.display(), "Cache hit");
    }

    match cache.open() {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(
                cache_path = %cache_path.display(),
                error = %e,
                "Failed to read cache file"
            );
            None
        }
    }
}

/// Single download attempt; any error means "no data at this URL".
fn download<T: Transport + ?Sized>(transport: &T, url: &str) -> Option<Vec<u8>> {
    match transport.get(url) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::debug!(url, error = %e, "No publication at URL");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::build_url;
    use crate::table::TableType;
    use crate::test_support::FakeTransport;
    use tempfile::tempdir;

    #[test]
    fn test_fetch_without_cache() {
        let location = build_url(2012, 1, TableType::A, None);
        let transport = FakeTransport::default().with_page(&location.url, "body");

        assert_eq!(fetch_data(&transport, &location), Some(b"body".to_vec()));
        assert_eq!(fetch_data(&transport, &location), Some(b"body".to_vec()));
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn test_fetch_failure_is_absent() {
        let location = build_url(2012, 1, TableType::A, None);
        let transport = FakeTransport::default();
        assert_eq!(fetch_data(&transport, &location), None);
    }

    #[test]
    fn test_fetch_populates_cache_and_short_circuits() {
        let temp_dir = tempdir().unwrap();
        let location = build_url(2012, 1, TableType::A, Some(temp_dir.path()));
        let transport = FakeTransport::default().with_page(&location.url, "body");

        assert_eq!(fetch_data(&transport, &location), Some(b"body".to_vec()));
        assert_eq!(fetch_data(&transport, &location), Some(b"body".to_vec()));
        assert_eq!(transport.request_count(), 1);

        let cache_path = location.cache_path.unwrap();
        assert_eq!(std::fs::read(cache_path).unwrap(), b"body");
    }

    #[test]
    fn test_fetch_uses_existing_cache_file() {
        let temp_dir = tempdir().unwrap();
        let location = build_url(2012, 1, TableType::A, Some(temp_dir.path()));
        let cache = CacheFile::new(location.cache_path.clone().unwrap());
        cache.create_dir().unwrap();
        cache.save(b"cached").unwrap();

        let transport = FakeTransport::default();
        assert_eq!(fetch_data(&transport, &location), Some(b"cached".to_vec()));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_failed_download_writes_nothing() {
        let temp_dir = tempdir().unwrap();
        let location = build_url(2012, 1, TableType::A, Some(temp_dir.path()));
        let transport = FakeTransport::default();

        assert_eq!(fetch_data(&transport, &location), None);
        assert!(!location.cache_path.unwrap().exists());
        // The directory is still prepared
        assert!(temp_dir.path().join("2012/a").is_dir());
    }
}
