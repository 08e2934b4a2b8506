//! # 文件收集器
//!
//! 根据目录和模式收集待处理文件列表。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配（逗号分隔多个模式）
//! - 递归目录搜索
//!
//! ## 依赖关系
//! - 被 `commands/collect.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob::Pattern` 匹配文件名

use crate::error::{MpbSymError, Result};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s)
                    .map_err(|e| MpbSymError::InvalidArgument(format!("pattern '{}': {}", s, e)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件，按路径排序
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();
        files
    }

    /// 检查文件名是否匹配任一模式；未设置模式时全部匹配
    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mpbsym-collector-{}-{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(dir.join("sub")).unwrap();
        for f in [
            "dim2-sg2-dispersion.out",
            "dim2-sg2-symeigs.out",
            "notes.txt",
            "sub/dim2-sg11-1-tm-dispersion.out",
        ] {
            fs::write(dir.join(f), "").unwrap();
        }
        dir
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_collect_flat_and_recursive() {
        let dir = scratch_dir("flat");
        let flat = FileCollector::new(dir.clone())
            .with_pattern("*-dispersion.out")
            .unwrap()
            .collect();
        assert_eq!(names(&flat), vec!["dim2-sg2-dispersion.out"]);

        let deep = FileCollector::new(dir.clone())
            .with_pattern("*-dispersion.out")
            .unwrap()
            .recursive(true)
            .collect();
        assert_eq!(deep.len(), 2);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_multiple_patterns() {
        let dir = scratch_dir("multi");
        let files = FileCollector::new(dir.clone())
            .with_pattern("*-symeigs.out, *.txt")
            .unwrap()
            .collect();
        assert_eq!(names(&files), vec!["dim2-sg2-symeigs.out", "notes.txt"]);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(FileCollector::new(PathBuf::from(".")).with_pattern("[").is_err());
    }

    #[test]
    fn test_missing_input() {
        let files = FileCollector::new(PathBuf::from("/nonexistent/mpbsym")).collect();
        assert!(files.is_empty());
    }
}
