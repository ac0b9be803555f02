// ==========================================
// ANS 合规报告 - 命令行入口
// ==========================================
// 用法:
//   ans-report <year> <month> [--db PATH] [--fixtures DIR] [--extracts DIR] [--log-json]
//
// - --db: 配置库 + 监控库 (默认 ANS_REPORT_DB_PATH 或用户数据目录)
// - --fixtures: 数据取自 JSON 夹具目录
// - --extracts: 数据取自 Excel/CSV 抽取目录
// 报告 JSON 输出到 stdout,日志输出到 stderr
// ==========================================

use anyhow::{bail, Context};
use ans_report::config::ConfigManager;
use ans_report::db::{default_db_path, ensure_schema, open_sqlite_connection};
use ans_report::importer::MonitoringStore;
use ans_report::{logging, ReportApi};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const USAGE: &str =
    "用法: ans-report <year> <month> [--db PATH] [--fixtures DIR] [--extracts DIR] [--log-json]";

/// 命令行参数
#[derive(Debug, Default)]
struct CliArgs {
    year: i32,
    month: u32,
    db_path: Option<String>,
    fixtures_dir: Option<PathBuf>,
    extracts_dir: Option<PathBuf>,
    log_json: bool,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> anyhow::Result<CliArgs> {
    let mut positional = Vec::new();
    let mut cli = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => cli.db_path = Some(args.next().context("--db 缺少路径")?),
            "--fixtures" => {
                cli.fixtures_dir = Some(PathBuf::from(args.next().context("--fixtures 缺少目录")?))
            }
            "--extracts" => {
                cli.extracts_dir = Some(PathBuf::from(args.next().context("--extracts 缺少目录")?))
            }
            "--log-json" => cli.log_json = true,
            "-h" | "--help" => bail!("{}", USAGE),
            other if other.starts_with("--") => bail!("未知参数: {}\n{}", other, USAGE),
            _ => positional.push(arg),
        }
    }

    if positional.len() != 2 {
        bail!("{}", USAGE);
    }
    if cli.fixtures_dir.is_some() && cli.extracts_dir.is_some() {
        bail!("--fixtures 与 --extracts 不能同时使用");
    }

    cli.year = positional[0]
        .parse()
        .with_context(|| format!("年份无效: {}", positional[0]))?;
    cli.month = positional[1]
        .parse()
        .with_context(|| format!("月份无效: {}", positional[1]))?;

    Ok(cli)
}

fn main() -> anyhow::Result<()> {
    let cli = parse_args(std::env::args().skip(1))?;

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("{} v{}", ans_report::APP_NAME, ans_report::VERSION);

    let db_path = cli.db_path.clone().unwrap_or_else(default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?;
    ensure_schema(&conn).context("数据库初始化失败")?;
    let conn = Arc::new(Mutex::new(conn));

    let config_reader = Arc::new(ConfigManager::from_connection(conn.clone())?);

    let api = match (&cli.fixtures_dir, &cli.extracts_dir) {
        (Some(dir), _) => ReportApi::with_fixtures(config_reader, dir),
        (None, Some(dir)) => ReportApi::with_spreadsheets(config_reader, dir),
        (None, None) => ReportApi::with_monitoring_store(
            config_reader,
            Arc::new(MonitoringStore::from_connection(conn)),
        ),
    };

    let json = api.generate_report_json(cli.year, cli.month)?;
    println!("{}", json);

    Ok(())
}
