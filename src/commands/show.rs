//! # show 命令实现
//!
//! 打印物相的晶胞、状态方程参数以及 P/T 下的衍射线表。
//!
//! ## 依赖关系
//! - 使用 `cli/show.rs` 定义的参数
//! - 使用 `utils/output.rs`
//! - 使用 `tabled` 打印表格

use crate::cli::show::ShowArgs;
use crate::utils::output;

use jcpdskit::error::Result;
use jcpdskit::Phase;
use tabled::{Table, Tabled};

/// 衍射线表格行
#[derive(Debug, Clone, Tabled)]
struct ReflectionRow {
    #[tabled(rename = "(hkl)")]
    hkl: String,
    #[tabled(rename = "I")]
    intensity: String,
    #[tabled(rename = "d0 (Å)")]
    d0: String,
    #[tabled(rename = "d (Å)")]
    d: String,
}

/// 执行 show 命令
pub fn execute(args: ShowArgs) -> Result<()> {
    let mut phase = Phase::from_file(&args.file)?;
    phase.compute_d(Some(args.pressure), Some(args.temperature))?;

    output::print_header(&format!("Phase: {}", phase.name()));

    for comment in phase.comments() {
        output::print_info(comment);
    }
    output::print_separator();

    let cell0 = phase.cell0();
    let cell = phase.cell();
    let eos = phase.eos();
    output::print_field("Symmetry", phase.symmetry().as_str());
    output::print_field(
        "Cell (0 GPa)",
        &format!(
            "a = {:.5}  b = {:.5}  c = {:.5}  α = {:.3}  β = {:.3}  γ = {:.3}",
            cell0.a, cell0.b, cell0.c, cell0.alpha, cell0.beta, cell0.gamma
        ),
    );
    output::print_field(
        "Cell (P, T)",
        &format!("a = {:.5}  b = {:.5}  c = {:.5}", cell.a, cell.b, cell.c),
    );
    output::print_field("V0", &format!("{:.4} Å³", phase.v0()));
    output::print_field(
        "V",
        &format!(
            "{:.4} Å³  (V/V0 = {:.5}) at {} GPa, {} K",
            phase.v(),
            phase.v() / phase.v0(),
            phase.pressure(),
            phase.temperature()
        ),
    );
    output::print_field(
        "EOS",
        &format!(
            "K0 = {} GPa, K0' = {}, dK0/dT = {}, dK0'/dT = {}",
            eos.k0, eos.k0p0, eos.dk0dt, eos.dk0pdt
        ),
    );
    if phase.has_thermal_expansion() {
        output::print_field(
            "Thermal",
            &format!("αT = {:e} 1/K, dαT/dT = {:e} 1/K²", eos.alpha_t0, eos.d_alpha_dt),
        );
    }

    let rows: Vec<ReflectionRow> = phase
        .reflections()
        .iter()
        .map(|r| ReflectionRow {
            hkl: format!("({} {} {})", r.h, r.k, r.l),
            intensity: format!("{:.1}", r.intensity),
            d0: format!("{:.4}", r.d0),
            d: format!("{:.4}", r.d),
        })
        .collect();

    if rows.is_empty() {
        output::print_warning("Phase has no reflections");
    } else {
        output::print_header(&format!("{} Reflections", rows.len()));
        println!("{}", Table::new(&rows));
    }

    Ok(())
}
