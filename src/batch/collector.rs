//! # 视频文件收集器
//!
//! 在单个目录中（不递归）按扩展名收集待转录的视频。
//!
//! ## 功能
//! - 每个扩展名对应一个 `*.<ext>` glob 模式，大小写敏感，不匹配隐藏文件
//! - 结果按扩展名顺序分组，组内按文件名排序
//! - 输入目录为空时回退到程序所在目录
//!
//! ## 依赖关系
//! - 被 `commands/run.rs`, `commands/list.rs` 调用
//! - 使用 `walkdir` 遍历目录, `glob` 匹配文件名

use crate::models::{InputFile, Layout};

use glob::{MatchOptions, Pattern};
use std::path::PathBuf;
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// 视频收集器
pub struct VideoCollector {
    /// 搜索目录
    dir: PathBuf,
    /// 每个扩展名一个模式，保持配置顺序
    patterns: Vec<Pattern>,
}

impl VideoCollector {
    /// 创建新的收集器（不带任何扩展名）
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            patterns: Vec::new(),
        }
    }

    /// 设置扩展名（不含点），重复项只保留第一次出现
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        let mut seen: Vec<&str> = Vec::new();
        self.patterns = extensions
            .iter()
            .map(|e| e.as_ref())
            .filter(|e| {
                if seen.contains(e) {
                    false
                } else {
                    seen.push(*e);
                    true
                }
            })
            .filter_map(|e| Pattern::new(&format!("*.{}", Pattern::escape(e))).ok())
            .collect();
        self
    }

    /// 收集所有匹配的视频
    pub fn collect(&self) -> Vec<InputFile> {
        if !self.dir.is_dir() {
            return vec![];
        }

        let entries: Vec<(String, PathBuf)> = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| {
                // 非 UTF-8 字节替换后扩展名后缀仍然完整
                let name = e.file_name().to_string_lossy().to_string();
                (name, e.into_path())
            })
            .collect();

        let mut files = Vec::new();
        for pattern in &self.patterns {
            files.extend(
                entries
                    .iter()
                    .filter(|(name, _)| pattern.matches_with(name, MATCH_OPTIONS))
                    .map(|(_, path)| InputFile::new(path.clone())),
            );
        }
        files
    }
}

/// 发现结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// 在输入目录中找到
    Primary(Vec<InputFile>),
    /// 输入目录为空，在程序目录中找到
    Fallback(Vec<InputFile>),
    /// 两处都没有
    Empty,
}

impl Discovery {
    pub fn files(&self) -> &[InputFile] {
        match self {
            Discovery::Primary(files) | Discovery::Fallback(files) => files,
            Discovery::Empty => &[],
        }
    }

    pub fn into_files(self) -> Vec<InputFile> {
        match self {
            Discovery::Primary(files) | Discovery::Fallback(files) => files,
            Discovery::Empty => vec![],
        }
    }
}

/// 先搜索输入目录，为空时回退到程序目录
pub fn discover(layout: &Layout) -> Discovery {
    let primary = VideoCollector::new(&layout.videos_dir)
        .with_extensions(&layout.extensions)
        .collect();
    if !primary.is_empty() {
        return Discovery::Primary(primary);
    }

    let fallback = VideoCollector::new(&layout.base_dir)
        .with_extensions(&layout.extensions)
        .collect();
    if !fallback.is_empty() {
        return Discovery::Fallback(fallback);
    }

    Discovery::Empty
}

/// 去扩展名后重名的输入，按首次出现顺序；这些视频会写入同一个输出目录
pub fn shared_stems(files: &[InputFile]) -> Vec<&str> {
    let mut shared: Vec<&str> = Vec::new();
    for (i, file) in files.iter().enumerate() {
        let stem = file.stem.as_str();
        if !shared.contains(&stem) && files[i + 1..].iter().any(|f| f.stem == stem) {
            shared.push(stem);
        }
    }
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::DEFAULT_EXTENSIONS;

    use std::fs;
    use std::path::Path;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn names(files: &[InputFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_filters_non_video_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.mp4");
        touch(dir.path(), "b.mkv");
        touch(dir.path(), "notes.txt");

        let files = VideoCollector::new(dir.path())
            .with_extensions(&DEFAULT_EXTENSIONS)
            .collect();
        assert_eq!(names(&files), vec!["a.mp4", "b.mkv"]);
    }

    #[test]
    fn test_grouped_by_extension_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.mp4", "a.webm", "m.avi", "b.mp4"] {
            touch(dir.path(), name);
        }

        let files = VideoCollector::new(dir.path())
            .with_extensions(&DEFAULT_EXTENSIONS)
            .collect();
        assert_eq!(names(&files), vec!["b.mp4", "z.mp4", "m.avi", "a.webm"]);
    }

    #[test]
    fn test_case_sensitive_hidden_and_nested() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "upper.MP4");
        touch(dir.path(), ".hidden.mp4");
        fs::create_dir(dir.path().join("folder.mp4")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub"), "nested.mp4");
        touch(dir.path(), "ok.mov");

        let files = VideoCollector::new(dir.path())
            .with_extensions(&DEFAULT_EXTENSIONS)
            .collect();
        assert_eq!(names(&files), vec!["ok.mov"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_are_collected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let raw = OsStr::from_bytes(b"caf\xe9.mp4");
        fs::write(dir.path().join(raw), b"").unwrap();
        touch(dir.path(), "ok.mp4");

        let files = VideoCollector::new(dir.path())
            .with_extensions(&DEFAULT_EXTENSIONS)
            .collect();
        assert_eq!(files.len(), 2);
        // 调用外部工具时使用原始路径
        assert!(files.iter().any(|f| f.path().file_name() == Some(raw)));
    }

    #[test]
    fn test_duplicate_extensions_yield_one_entry() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.mp4");

        let files = VideoCollector::new(dir.path())
            .with_extensions(&["mp4", "mp4"])
            .collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = VideoCollector::new(dir.path().join("nope"))
            .with_extensions(&DEFAULT_EXTENSIONS)
            .collect();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_falls_back_to_base_dir() {
        let base = tempfile::tempdir().unwrap();
        let layout = Layout::new(base.path());
        fs::create_dir(&layout.videos_dir).unwrap();
        touch(base.path(), "side.mkv");

        match discover(&layout) {
            Discovery::Fallback(files) => assert_eq!(names(&files), vec!["side.mkv"]),
            other => panic!("unexpected: {:?}", other),
        }

        touch(&layout.videos_dir, "main.mp4");
        match discover(&layout) {
            Discovery::Primary(files) => assert_eq!(names(&files), vec!["main.mp4"]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_discover_empty() {
        let base = tempfile::tempdir().unwrap();
        let layout = Layout::new(base.path());
        assert_eq!(discover(&layout), Discovery::Empty);
        assert!(discover(&layout).files().is_empty());
    }

    #[test]
    fn test_shared_stems() {
        let files: Vec<InputFile> = ["/v/talk.mp4", "/v/intro.mp4", "/v/talk.mkv", "/v/talk.mov"]
            .iter()
            .map(|p| InputFile::new(*p))
            .collect();
        assert_eq!(shared_stems(&files), vec!["talk"]);
        assert!(shared_stems(&files[..2]).is_empty());
    }
}
