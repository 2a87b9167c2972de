//! # 统一错误处理模块
//!
//! 定义 jcpdskit 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// jcpdskit 统一错误类型
#[derive(Error, Debug)]
pub enum JcpdsError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Missing required field '{field}' in {path}")]
    MissingField { path: String, field: String },

    /// 集合层加载失败，GUI 只需捕获这一种错误
    #[error("Could not load phase file: {path}\nPlease check the JCPDS file format. ({reason})")]
    PhaseLoadError { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 数值错误
    // ─────────────────────────────────────────────────────────────
    #[error("Degenerate unit cell: {reason}")]
    DegenerateCell { reason: String },

    #[error(
        "EOS solver did not converge at P = {pressure} GPa, T = {temperature} K after {iterations} iterations"
    )]
    EosSolverError {
        pressure: f64,
        temperature: f64,
        iterations: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

impl JcpdsError {
    /// 是否属于文件内容问题（格式、缺失字段、退化晶胞），
    /// 这类错误在集合层被转换为 `PhaseLoadError`
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            JcpdsError::ParseError { .. }
                | JcpdsError::MissingField { .. }
                | JcpdsError::DegenerateCell { .. }
                | JcpdsError::EosSolverError { .. }
        )
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, JcpdsError>;
