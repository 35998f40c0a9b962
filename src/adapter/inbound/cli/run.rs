//! Handler for the `run` command.

use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{output, table};
use crate::adapter::outbound::report::JsonReportFile;
use crate::application::CycleReport;
use crate::config::{Config, ScanPolicy};
use crate::error::Result;
use crate::infrastructure::{build, DataSource, ScanDaemon};

/// Execute the run command.
///
/// The scan policy is read before anything else so a disabled `DRY_RUN`
/// stops the process before any venue is contacted.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let policy = load_policy(args)?;
    let config = load_config(args)?;
    config.init_logging();

    let source = if args.stub {
        DataSource::Stub
    } else {
        DataSource::Live
    };
    print_startup(args, &config, &policy, source);
    info!(
        mode = %policy.mode,
        alert_only = policy.alert_only,
        alert_threshold = %policy.alert_threshold,
        buffer_bps = policy.buffer_bps,
        "arbscan starting (dry run, no orders are ever placed)"
    );

    let report_file = args.output.as_ref().map(JsonReportFile::new);
    let mut daemon = ScanDaemon::new(build(&config, source), policy.clone(), &config.scan);

    if args.once {
        let report = daemon.run_once().await?;
        return emit(&report, &policy, report_file.as_ref());
    }

    daemon
        .run(|report| emit(report, &policy, report_file.as_ref()))
        .await
}

fn load_policy(args: &RunArgs) -> Result<ScanPolicy> {
    let policy = ScanPolicy::from_env()?;
    Ok(match args.mode {
        Some(mode) => policy.with_mode(mode),
        None => policy,
    })
}

fn load_config(args: &RunArgs) -> Result<Config> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    Ok(config)
}

fn emit(report: &CycleReport, policy: &ScanPolicy, file: Option<&JsonReportFile>) -> Result<()> {
    table::print_report(report, policy);
    if let Some(file) = file {
        file.write(report)?;
    }
    Ok(())
}

fn print_startup(args: &RunArgs, config: &Config, policy: &ScanPolicy, source: DataSource) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Mode", policy.mode);
    output::field(
        "Source",
        match source {
            DataSource::Live => "live",
            DataSource::Stub => "stub",
        },
    );
    if source == DataSource::Live {
        output::field("Mappings", config.mappings.path.display());
    }
    output::field("Threshold", policy.alert_threshold);
    output::field("Buffer (bps)", policy.buffer_bps);
    if policy.alert_only {
        output::field("Alert only", "yes");
    }
    if let Some(path) = &args.output {
        output::field("Output", path.display());
    }
    if args.once {
        output::field("Cycles", "once");
    } else {
        output::field("Interval", format!("{}s", config.scan.interval_secs));
    }
}
