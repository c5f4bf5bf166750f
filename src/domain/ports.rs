use crate::domain::manifest::Manifest;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Persist `data` under `path` and return where it ended up.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Raw endpoint as configured. `None` means the export cannot run.
    fn service_endpoint(&self) -> Option<&str>;
    fn app_name(&self) -> &str;
    fn output_path(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn display_duration(&self) -> Duration;
    fn extra_headers(&self) -> Vec<(String, String)>;
    fn verify_archive(&self) -> bool;
}

/// The fabrication service that turns a manifest into a printable file.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, manifest: &Manifest) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct QrOptions {
    pub width: u32,
    pub margin: u32,
    pub dark: String,
    pub light: String,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            width: 512,
            margin: 1,
            dark: "#000000".to_string(),
            light: "#FFFFFF".to_string(),
        }
    }
}

/// Square module matrix, row-major, `true` = dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrBitmap {
    size: usize,
    modules: Vec<bool>,
}

impl QrBitmap {
    /// Returns `None` unless `modules` holds exactly `size * size` cells.
    pub fn new(size: usize, modules: Vec<bool>) -> Option<Self> {
        (modules.len() == size * size).then_some(Self { size, modules })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// `None` when `row` or `col` falls outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.modules.get(row * self.size + col).copied()
    }

    pub fn mirrored(&self) -> Self {
        self.remap(|row, col| (row, self.size - 1 - col))
    }

    pub fn rotated_180(&self) -> Self {
        self.remap(|row, col| (self.size - 1 - row, self.size - 1 - col))
    }

    /// Orientation for a code printed on the back face, which is seen through the
    /// opposite normal.
    pub fn oriented_for_back_face(&self) -> Self {
        self.mirrored().rotated_180()
    }

    fn remap(&self, source: impl Fn(usize, usize) -> (usize, usize)) -> Self {
        let n = self.size;
        let modules = (0..n * n)
            .map(|i| {
                let (row, col) = source(i / n, i % n);
                self.modules[row * n + col]
            })
            .collect();
        Self { size: n, modules }
    }
}

/// External QR encoder. The core decides whether and where; never how.
pub trait QrEncoder: Send + Sync {
    fn encode(&self, text: &str, options: &QrOptions) -> Result<QrBitmap>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_face_orientation_flips_rows() {
        // 1 0
        // 1 1
        let bitmap = QrBitmap::new(2, vec![true, false, true, true]).unwrap();
        let oriented = bitmap.oriented_for_back_face();

        // mirror then 180° leaves columns in place and reverses rows
        assert_eq!(oriented.get(0, 0), Some(true));
        assert_eq!(oriented.get(0, 1), Some(true));
        assert_eq!(oriented.get(1, 0), Some(true));
        assert_eq!(oriented.get(1, 1), Some(false));
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let bitmap = QrBitmap::new(2, vec![true, false, true, true]).unwrap();
        assert_eq!(bitmap.get(2, 0), None);
        assert_eq!(bitmap.get(0, 2), None);
        assert_eq!(bitmap.get(1, 1), Some(true));
    }

    #[test]
    fn test_bitmap_rejects_wrong_length() {
        assert!(QrBitmap::new(3, vec![true; 8]).is_none());
    }
}
