use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use tracehawk::cli::{self, Command, StatusOptions, SubmitOptions};
use tracehawk::config::{self, Config};
use tracehawk::dispatch::{self, DispatchOutcome, HttpRequestChannel, RunMode};
use tracehawk::evidence::{Evidence, EvidenceKind};
use tracehawk::jobs::TaskEngine;
use tracehawk::logging;
use tracehawk::placement;
use tracehawk::request;
use tracehawk::status::client::{HttpFunction, StatusClient};
use tracehawk::status::poll::wait_for_completion;
use tracehawk::status::report::format_tasks;
use tracehawk::status::QueryFilter;

fn main() -> Result<()> {
    logging::init_logging();

    let cli_opts = cli::parse();
    let cfg = config::load_config(cli_opts.config_path.as_deref())?;

    let cancel_flag = Arc::new(AtomicBool::new(false));
    {
        let flag = cancel_flag.clone();
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;
    }

    let run_mode = if cli_opts.server {
        RunMode::ServerInline
    } else {
        RunMode::RemoteSubmit
    };

    match cli_opts.command {
        Command::Status(status) => run_status(&cfg, status, &cancel_flag),
        Command::Rawdisk { local_path, submit } => {
            let kind = EvidenceKind::RawDisk { local_path };
            run_submit(&cfg, kind, submit, run_mode, &cancel_flag)
        }
        Command::Directory { local_path, submit } => {
            let kind = EvidenceKind::Directory { local_path };
            run_submit(&cfg, kind, submit, run_mode, &cancel_flag)
        }
        Command::Clouddisk {
            disk_name,
            project,
            zone,
            submit,
        } => {
            let kind = EvidenceKind::CloudDisk {
                disk_name,
                project,
                zone,
            };
            run_submit(&cfg, kind, submit, run_mode, &cancel_flag)
        }
        Command::ClouddiskEmbedded {
            disk_name,
            project,
            zone,
            embedded_path,
            submit,
        } => {
            let kind = EvidenceKind::CloudDiskEmbeddedRaw {
                disk_name,
                project,
                zone,
                embedded_path,
            };
            run_submit(&cfg, kind, submit, run_mode, &cancel_flag)
        }
    }
}

fn run_status(cfg: &Config, opts: StatusOptions, cancel_flag: &AtomicBool) -> Result<()> {
    let filter = QueryFilter::from_flags(
        opts.days_history,
        opts.task_id,
        opts.request_id,
        cfg.days_history,
    );
    let function = HttpFunction::new(&cfg.status_function_url);
    let client = StatusClient::new(&function, cfg);

    let tasks = if opts.wait {
        let interval = Duration::from_secs(opts.poll_interval.unwrap_or(cfg.poll_interval_secs));
        let max_wait = opts.max_wait.map(Duration::from_secs);
        wait_for_completion(&client, &filter, interval, cancel_flag, max_wait)?
    } else {
        client.query(&filter)?
    };

    print!("{}", format_tasks(&tasks, opts.all_fields));
    Ok(())
}

fn run_submit(
    cfg: &Config,
    kind: EvidenceKind,
    opts: SubmitOptions,
    run_mode: RunMode,
    cancel_flag: &AtomicBool,
) -> Result<()> {
    let evidence = Evidence::new(kind, opts.name, opts.source);

    if let Err(err) = placement::validate(&evidence, cfg, opts.force_evidence) {
        error!("placement validation rejected evidence: {err}");
        return Err(err.into());
    }

    let request = request::build_request(vec![evidence]);

    if opts.dump_json {
        println!("{}", request.to_canonical_json()?);
        return Ok(());
    }

    let channel = HttpRequestChannel::new(&cfg.submit_endpoint_url);
    let engine = TaskEngine::with_default_jobs();
    let outcome = dispatch::dispatch(&request, run_mode, &channel, &engine)?;

    if let DispatchOutcome::ExecutedInline { tasks_created } = &outcome {
        info!("inline execution created {tasks_created} task(s)");
    }

    if opts.wait {
        let filter = QueryFilter::Request {
            request_id: request.request_id.clone(),
        };
        let function = HttpFunction::new(&cfg.status_function_url);
        let client = StatusClient::new(&function, cfg);
        let interval = Duration::from_secs(opts.poll_interval.unwrap_or(cfg.poll_interval_secs));
        let max_wait = opts.max_wait.map(Duration::from_secs);
        let tasks = wait_for_completion(&client, &filter, interval, cancel_flag, max_wait)?;
        print!("{}", format_tasks(&tasks, false));
    }

    Ok(())
}
