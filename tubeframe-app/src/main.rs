use std::path::PathBuf;

use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use tubeframe_config::{AppConfig, ConfigError};
use tubeframe_frontend::report::{ConsoleReporter, ErrorReporter, TracingReporter};

fn main() {
    let mut args = std::env::args().skip(1);
    let mut config_override: Option<PathBuf> = None;
    let mut output_override: Option<PathBuf> = None;
    let mut show_path: Option<PathBuf> = None;
    let mut console = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--console" => console = true,
            "--config" | "--out" | "--show" => {
                let Some(value) = args.next() else {
                    eprintln!("`{arg}` 需要提供路径参数");
                    std::process::exit(1);
                };
                let value = PathBuf::from(value);
                match arg.as_str() {
                    "--config" => config_override = Some(value),
                    "--out" => output_override = Some(value),
                    _ => show_path = Some(value),
                }
            }
            other => {
                eprintln!("未知参数：{other}");
                std::process::exit(1);
            }
        }
    }

    let mut config = load_configuration(config_override);
    init_logging(&config);
    if let Some(dir) = output_override {
        config.catalog.output_dir = dir;
    }
    info!("启动 tubeframe");

    // `--console` 时错误直接写到标准错误，不经过日志过滤
    let reporter: &dyn ErrorReporter = if console {
        &ConsoleReporter
    } else {
        &TracingReporter
    };
    let result = match show_path {
        Some(path) => tubeframe_frontend::show_profile(&path, reporter),
        None => tubeframe_frontend::run_catalog(&config.catalog, reporter),
    };
    if let Err(err) = result {
        error!(error = %err, "执行失败");
        std::process::exit(1);
    }
}

fn load_configuration(override_path: Option<PathBuf>) -> AppConfig {
    match override_path {
        Some(path) => AppConfig::from_file(&path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "加载指定配置失败，使用默认配置");
            AppConfig::default()
        }),
        None => match AppConfig::discover() {
            Ok(cfg) => cfg,
            Err(err) => {
                match &err {
                    ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => {
                        warn!(
                            path = %path.display(),
                            error = %err,
                            "加载默认配置失败，使用内建默认值"
                        );
                    }
                    ConfigError::Context { .. } => {
                        warn!(error = %err, "加载默认配置失败，使用内建默认值");
                    }
                }
                AppConfig::default()
            }
        },
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_new(config.logging.level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter);
    if subscriber.try_init().is_err() {
        // 已初始化，忽略
    }
}
