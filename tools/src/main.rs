//! raidwatch-runner: headless runner for the raider report board engine.
//!
//! Usage:
//!   raidwatch-runner --db board.db                    # stdio command loop
//!   raidwatch-runner --db board.db --listen-port 9900
//!   raidwatch-runner --db board.db --seed-demo 25 --seed 42
//!
//! Commands are line-delimited JSON, one request per line, one JSON
//! response per line: {"ok":true,"data":...} or
//! {"ok":false,"code":...,"status":...,"error":...}.

mod seed;

use anyhow::Result;
use raidwatch_core::{
    comments::{CommentSort, PrevVote, Vote},
    config::EngineConfig,
    engine::ReportEngine,
    error::{EngineError, EngineResult},
    report::{EvidenceFile, NewReport},
    timeseries::Span,
};
use serde_json::json;
use std::env;
use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpListener;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Command {
    SubmitReport {
        tag: String,
        reason: String,
        #[serde(default)]
        comments: Option<String>,
        #[serde(default)]
        reporter_label: Option<String>,
        #[serde(default)]
        evidence: Vec<EvidencePayload>,
    },
    AddComment {
        tag: String,
        body: String,
        #[serde(default)]
        reporter_label: Option<String>,
    },
    Vote {
        comment_id: String,
        vote: Vote,
        #[serde(default)]
        prev_vote: PrevVote,
    },
    Summary {
        slug: String,
    },
    Stats {
        slug: String,
        span: Span,
        #[serde(default)]
        offset: i64,
    },
    Comments {
        slug: String,
        #[serde(default)]
        sort: CommentSort,
        #[serde(default)]
        limit: Option<usize>,
    },
    Leaderboard {
        #[serde(default)]
        limit: Option<usize>,
    },
    Quit,
}

#[derive(serde::Deserialize)]
struct EvidencePayload {
    content_type: String,
    /// Base64-encoded file body.
    data: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match parse_opt(&args, "--config") {
        Some(path) => EngineConfig::load(&path)?,
        None => EngineConfig::default(),
    };
    config.database = parse_arg(&args, "--db", config.database.clone());

    let engine = ReportEngine::open(config)?;

    if let Some(count) = parse_opt(&args, "--seed-demo") {
        let raiders: usize = count.parse().unwrap_or(25);
        let master_seed = parse_arg(&args, "--seed", 42u64);
        let summary = seed::seed_demo(&engine, raiders, master_seed)?;
        println!(
            "seeded {} raiders, {} reports, {} comments (seed {master_seed})",
            summary.raiders, summary.reports, summary.comments
        );
        return Ok(());
    }

    match parse_opt(&args, "--listen-port") {
        Some(port) => serve_tcp(&engine, port.parse()?),
        None => serve_lines(&engine, io::stdin().lock(), io::stdout().lock()),
    }
}

fn serve_tcp(engine: &ReportEngine, port: u16) -> Result<()> {
    let listener = TcpListener::bind(("127.0.0.1", port))?;
    log::info!("listening on 127.0.0.1:{port}");
    for stream in listener.incoming() {
        let stream = stream?;
        let reader = BufReader::new(stream.try_clone()?);
        if let Err(e) = serve_lines(engine, reader, stream) {
            log::warn!("connection closed with error: {e}");
        }
    }
    Ok(())
}

fn serve_lines(engine: &ReportEngine, reader: impl BufRead, mut writer: impl Write) -> Result<()> {
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Command>(line) {
            Ok(Command::Quit) => break,
            Ok(command) => dispatch(engine, command),
            Err(e) => json!({
                "ok": false,
                "code": "bad_request",
                "status": 400,
                "error": e.to_string(),
            }),
        };
        writeln!(writer, "{response}")?;
        writer.flush()?;
    }
    Ok(())
}

fn dispatch(engine: &ReportEngine, command: Command) -> serde_json::Value {
    let result = match command {
        Command::SubmitReport {
            tag,
            reason,
            comments,
            reporter_label,
            evidence,
        } => decode_evidence(evidence).and_then(|files| {
            let record = engine.submit_report(NewReport {
                tag,
                reason,
                comments,
                reporter_label,
                evidence: files,
            })?;
            Ok(serde_json::to_value(record)?)
        }),
        Command::AddComment {
            tag,
            body,
            reporter_label,
        } => engine
            .add_comment(&tag, &body, reporter_label)
            .and_then(|c| Ok(serde_json::to_value(c)?)),
        Command::Vote {
            comment_id,
            vote,
            prev_vote,
        } => engine
            .apply_vote(&comment_id, vote, prev_vote)
            .and_then(|v| Ok(serde_json::to_value(v)?)),
        Command::Summary { slug } => engine
            .summary(&slug)
            .and_then(|s| Ok(serde_json::to_value(s)?)),
        Command::Stats { slug, span, offset } => engine
            .stats(&slug, span, offset)
            .and_then(|t| Ok(serde_json::to_value(t)?)),
        Command::Comments { slug, sort, limit } => engine
            .comments(&slug, sort, limit)
            .and_then(|c| Ok(serde_json::to_value(c)?)),
        Command::Leaderboard { limit } => engine
            .leaderboard(limit)
            .and_then(|b| Ok(serde_json::to_value(b)?)),
        Command::Quit => unreachable!("handled by the read loop"),
    };

    match result {
        Ok(data) => json!({ "ok": true, "data": data }),
        Err(e) => {
            log::warn!("command failed: {e}");
            json!({
                "ok": false,
                "code": e.code(),
                "status": status_for(&e),
                "error": e.to_string(),
            })
        }
    }
}

fn status_for(e: &EngineError) -> u16 {
    match e {
        EngineError::NotFound { .. } => 404,
        EngineError::StoreUnavailable(_) => 503,
        _ if e.is_client_error() => 400,
        _ => 502,
    }
}

fn decode_evidence(payloads: Vec<EvidencePayload>) -> EngineResult<Vec<EvidenceFile>> {
    use base64::Engine as _;
    payloads
        .into_iter()
        .map(|p| {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(p.data.as_bytes())
                .map_err(|e| {
                    EngineError::Validation(format!("evidence is not valid base64: {e}"))
                })?;
            Ok(EvidenceFile {
                bytes,
                content_type: p.content_type,
            })
        })
        .collect()
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_opt(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
