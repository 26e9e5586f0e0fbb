//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-value`: 运行 animated-value 覆盖率
//! - `preview`: 按 JSON 配置回放一段动画，逐帧打印数值

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use animated_value::{
    AngleConfig, AngleValue, AnimatedValue, Domain, ManualClock, ValueConfig,
};
use clap::{Parser, Subcommand};

/// 回放时的最大帧数
const MAX_PREVIEW_FRAMES: usize = 10_000;

#[derive(Parser)]
#[command(name = "xtask", about = "xtask - 开发辅助工具")]
struct Cli {
    #[command(subcommand)]
    command: Option<Task>,
}

#[derive(Subcommand)]
enum Task {
    /// 运行 fmt、clippy、test 门禁检查
    CheckAll,
    /// 运行 animated-value 覆盖率报告
    CovValue,
    /// 按 JSON 配置回放一段动画
    Preview {
        /// 配置文件路径（ValueConfig / AngleConfig 的 JSON）
        config: PathBuf,
        /// 目标值
        #[arg(long)]
        target: f64,
        /// 每帧推进的时间（毫秒）
        #[arg(long, default_value_t = 16.0)]
        step: f64,
        /// 按角度配置解析
        #[arg(long)]
        angle: bool,
    },
}

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn ensure_cargo_llvm_cov_available() -> anyhow::Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["llvm-cov", "--version"]);
    match cmd.status() {
        Ok(s) if s.success() => Ok(()),
        _ => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Task::CheckAll) => check_all()?,
        Some(Task::CovValue) => {
            ensure_cargo_llvm_cov_available()?;

            let mut cov = Command::new("cargo");
            cov.args(["llvm-cov", "-p", "animated-value", "--all-features", "--html"]);
            run(
                "cargo llvm-cov -p animated-value --all-features --html",
                &mut cov,
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        Some(Task::Preview {
            config,
            target,
            step,
            angle,
        }) => preview(&config, target, step, angle)?,
        None => print_help(),
    }

    Ok(())
}

fn check_all() -> anyhow::Result<()> {
    let mut fmt = Command::new("cargo");
    fmt.args(["fmt", "--all", "--", "--check"]);
    run("cargo fmt --all -- --check", &mut fmt)?;

    let mut clippy = Command::new("cargo");
    clippy.args(["clippy", "--workspace", "--all-targets"]);
    run("cargo clippy --workspace --all-targets", &mut clippy)?;

    let mut test = Command::new("cargo");
    test.args(["test", "--workspace"]);
    run("cargo test --workspace", &mut test)
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-value       运行 animated-value 覆盖率报告
  preview         按 JSON 配置回放一段动画

PREVIEW:
  cargo xtask preview <config.json> --target <value> [--step <ms>] [--angle]

  逐帧打印 current，直到到达 target
"#
    );
}

//=============================================================================
// preview 命令实现
//=============================================================================

fn preview(path: &Path, target: f64, step: f64, angle: bool) -> anyhow::Result<()> {
    if !step.is_finite() || step <= 0.0 {
        anyhow::bail!("--step 必须是正数，实际为 {step}");
    }

    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("无法读取配置 {}: {e}", path.display()))?;

    if angle {
        let value = AngleValue::new_angle(AngleConfig::from_json_str(&text)?)?;
        play(value.with_clock(ManualClock::new()), target, step)
    } else {
        let value = AnimatedValue::new(ValueConfig::from_json_str(&text)?)?;
        play(value.with_clock(ManualClock::new()), target, step)
    }
}

fn play<D: Domain<f64>>(
    mut value: AnimatedValue<f64, D>,
    target: f64,
    step: f64,
) -> anyhow::Result<()> {
    value.set_target(target)?;
    eprintln!(
        "==> {} → {}（钳制后 {}），时长 {}ms",
        value.current(),
        target,
        value.target(),
        value.animation_time()
    );

    let mut elapsed = 0.0;
    for _ in 0..MAX_PREVIEW_FRAMES {
        if !value.advance(step)? {
            break;
        }
        elapsed += step;
        println!("{elapsed:>8.1}ms  {:.6}", value.current());
    }

    if value.is_dirty() {
        anyhow::bail!("{MAX_PREVIEW_FRAMES} 帧内未到达目标");
    }
    Ok(())
}
