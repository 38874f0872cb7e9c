use log::debug;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

use super::ResultSink;
use crate::core::CrawlResult;

const DEFAULT_OUTPUT_FILE: &str = "product_urls.txt";

/// Appends one product URL per line to a UTF-8 text file.
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> CrawlResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Opens `<host>_product_urls.txt` in the current directory, one file per
    /// crawl session.
    pub fn for_seed(seed_url: &str) -> CrawlResult<Self> {
        let filename = Url::parse(seed_url)
            .ok()
            .and_then(|url| url.host_str().map(|host| format!("{}_{}", host, DEFAULT_OUTPUT_FILE)))
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());
        Self::new(filename)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads back every URL persisted so far, for the status surface.
    pub fn recorded_urls(&self) -> CrawlResult<Vec<String>> {
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(contents.lines().map(|line| line.to_string()).collect())
    }
}

impl ResultSink for FileSink {
    fn record(&self, product_url: &str) -> CrawlResult<()> {
        let mut file = self.file.lock();
        writeln!(file, "{}", product_url)?;
        debug!("Recorded product URL to {}: {}", self.path.display(), product_url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_output_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("shopcrawler_{}_{}", std::process::id(), name))
    }

    #[test]
    fn records_one_url_per_line() {
        let path = temp_output_path("lines.txt");
        let _ = std::fs::remove_file(&path);

        let sink = FileSink::new(&path).unwrap();
        sink.record("https://shop.example.com/p/1").unwrap();
        sink.record("https://shop.example.com/p/2").unwrap();

        assert_eq!(
            sink.recorded_urls().unwrap(),
            vec![
                "https://shop.example.com/p/1",
                "https://shop.example.com/p/2"
            ]
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn seed_host_names_the_output_file() {
        let filename = Url::parse("https://shop.example.com/start")
            .ok()
            .and_then(|url| url.host_str().map(|h| format!("{}_{}", h, DEFAULT_OUTPUT_FILE)))
            .unwrap();
        assert_eq!(filename, "shop.example.com_product_urls.txt");
    }
}
