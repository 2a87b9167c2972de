//! # convert 命令实现
//!
//! 批量把 JCPDS 文件重写为 version 4 关键字格式。
//!
//! ## 功能
//! - 读取 v4 或旧版 v1 文件
//! - 按零压晶胞重新计算 d0 后写出
//! - 单个文件失败只记录，不中断整批
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `batch/` 收集与执行
//! - 使用 `utils/output.rs`

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::convert::ConvertArgs;
use crate::utils::output;

use jcpdskit::error::{JcpdsError, Result};
use jcpdskit::Phase;

use std::fs;
use std::path::Path;

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    output::print_header("Converting to JCPDS version 4");

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        return Err(JcpdsError::NoFilesFound {
            pattern: format!("{} under {}", args.pattern, args.input.display()),
        });
    }

    output::print_info(&format!("Found {} files to convert", files.len()));

    // 创建输出目录
    fs::create_dir_all(&args.output).map_err(|e| JcpdsError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let runner = BatchRunner::new("Converting");
    let result = runner.run(&files, |file| {
        match convert_file(file, &args.output, args.overwrite) {
            Ok(ProcessResult::Skipped(out)) => {
                output::print_skip(&format!("{} exists", out));
                ProcessResult::Skipped(out)
            }
            Ok(status) => status,
            Err(e) => ProcessResult::Failed(file.display().to_string(), e.to_string()),
        }
    });

    output::print_separator();
    output::print_done(&format!(
        "Processed {} file(s): {} converted into '{}' ({} skipped, {} failed)",
        result.total(),
        result.success,
        args.output.display(),
        result.skipped,
        result.failed
    ));

    for (path, err) in result.failures.iter().take(10) {
        output::print_error(&format!("  {}: {}", path, err));
    }
    if result.failures.len() > 10 {
        output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
    }

    Ok(())
}

/// 转换单个文件
fn convert_file(input: &Path, output_dir: &Path, overwrite: bool) -> Result<ProcessResult> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("phase");
    let output_path = output_dir.join(format!("{}.jcpds", stem));

    // 检查是否需要跳过
    if output_path.exists() && !overwrite {
        return Ok(ProcessResult::Skipped(output_path.display().to_string()));
    }

    let mut phase = Phase::from_file(input)?;
    let version = phase.version().to_string();
    phase.save_file(&output_path)?;

    log::info!(
        "{} (v{}) -> {}",
        input.display(),
        version,
        output_path.display()
    );
    Ok(ProcessResult::Success(output_path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_convert_legacy_file() {
        let dir = tempdir().unwrap();
        let input = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("data")
            .join("jcpds")
            .join("zn_legacy.jcpds");

        let status = convert_file(&input, dir.path(), false).unwrap();
        assert!(matches!(status, ProcessResult::Success(_)));

        let converted = Phase::from_file(&dir.path().join("zn_legacy.jcpds")).unwrap();
        assert_eq!(converted.version(), "4");
        assert_eq!(converted.reflections().len(), 8);

        let again = convert_file(&input, dir.path(), false).unwrap();
        assert!(matches!(again, ProcessResult::Skipped(_)));
    }

    #[test]
    fn test_empty_input_is_no_files_found() {
        let input = tempdir().unwrap();
        let out = tempdir().unwrap();
        let args = ConvertArgs {
            input: input.path().to_path_buf(),
            output: out.path().join("converted"),
            pattern: "*.jcpds".to_string(),
            recursive: false,
            overwrite: false,
        };

        let err = execute(args).unwrap_err();
        assert!(matches!(err, JcpdsError::NoFilesFound { .. }));
        assert!(!out.path().join("converted").exists());
    }
}
