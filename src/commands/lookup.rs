//! # lookup 命令实现
//!
//! 在 JCPDS 目录中查询单条衍射线在 P/T 下的 d 间距。
//!
//! ## 依赖关系
//! - 使用 `cli/lookup.rs` 定义的参数
//! - 使用 `jcpdskit::library`

use crate::cli::lookup::LookupArgs;
use crate::utils::output;

use jcpdskit::error::{JcpdsError, Result};
use jcpdskit::library::JcpdsLibrary;

/// 执行 lookup 命令
pub fn execute(args: LookupArgs) -> Result<()> {
    let library = JcpdsLibrary::new(&args.jcpds_path)?;

    match library.lookup_line(&args.query, args.pressure, args.temperature)? {
        Some(d) => {
            output::print_success(&format!(
                "{} at {} GPa, {} K: d = {:.5} Å",
                args.query.trim(),
                args.pressure,
                args.temperature,
                d
            ));
            Ok(())
        }
        None => Err(JcpdsError::InvalidArgument(format!(
            "No reflection matching '{}' in {}",
            args.query.trim(),
            library.dir().display()
        ))),
    }
}
