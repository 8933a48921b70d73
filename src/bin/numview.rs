use numview::api::{
    ChartSession, ClientConfig, HttpComputationClient, MethodKind, MethodRequest, MethodResponse,
    ResultSummary,
};
use numview::interaction::ViewportCommand;
use numview::render::NullSurface;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: numview <submit|inspect> --input <path> [--method <name>] [--zoom <factor>] [--anchor <x>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Submit,
    Inspect,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    input: PathBuf,
    method: Option<MethodKind>,
    zoom: Option<f64>,
    anchor: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ChartReport {
    #[serde(flatten)]
    summary: ResultSummary,
    x_domain: (f64, f64),
    y_domain: (f64, f64),
    curves: Vec<String>,
    markers: usize,
    received_at: Option<String>,
}

fn main() {
    let _ = numview::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args(std::env::args().skip(1))?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let config = ClientConfig::from_env().map_err(|err| err.to_string())?;

    let mut session = match args.command {
        CommandKind::Submit => {
            let request = parse_request(&raw, args.method)?;
            let client = HttpComputationClient::new(&config).map_err(|err| err.to_string())?;
            let mut session = ChartSession::from_config(request.kind(), &config);
            session
                .submit(&client, &request)
                .map_err(|err| err.to_string())?;
            session
        }
        CommandKind::Inspect => inspect_session(&raw, args.method, &config)?,
    };

    apply_zoom(&mut session, args.zoom, args.anchor);

    let mut surface = NullSurface::default();
    if session.method().has_chart() {
        session
            .present(&mut surface)
            .map_err(|err| err.to_string())?;
    }

    let report = build_report(&session).ok_or_else(|| "no result to report".to_owned())?;
    let payload = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("failed to serialize json: {err}"))?;
    println!("{payload}");
    Ok(())
}

fn parse_request(raw: &str, method: Option<MethodKind>) -> Result<MethodRequest, String> {
    let request = MethodRequest::from_json_str(raw).map_err(|err| err.to_string())?;
    if let Some(method) = method.filter(|method| *method != request.kind()) {
        return Err(format!(
            "--method {method} does not match request method {}",
            request.kind()
        ));
    }
    Ok(request)
}

/// Decodes a saved response body into a fresh session.
fn inspect_session(
    raw: &str,
    method: Option<MethodKind>,
    config: &ClientConfig,
) -> Result<ChartSession, String> {
    let method = method.ok_or_else(|| "inspect requires --method".to_owned())?;
    let response = MethodResponse::decode(method, raw).map_err(|err| err.to_string())?;
    let mut session = ChartSession::from_config(method, config);
    session
        .apply_response(response)
        .map_err(|err| err.to_string())?;
    Ok(session)
}

fn apply_zoom(session: &mut ChartSession, zoom: Option<f64>, anchor: Option<f64>) {
    if let Some(factor) = zoom {
        session.handle(ViewportCommand::Zoom { factor, anchor });
    }
}

fn build_report(session: &ChartSession) -> Option<ChartReport> {
    let summary = session.last_result()?.summary();
    Some(ChartReport {
        summary,
        x_domain: session.domain(),
        y_domain: session.y_domain(),
        curves: session.plot().curves.keys().cloned().collect(),
        markers: session.plot().markers.len(),
        received_at: session.received_at().map(|at| at.to_rfc3339()),
    })
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let command = match args.next().as_deref() {
        Some("submit") => CommandKind::Submit,
        Some("inspect") => CommandKind::Inspect,
        _ => return Err(USAGE.to_owned()),
    };

    let mut input = None::<PathBuf>;
    let mut method = None::<MethodKind>;
    let mut zoom = None::<f64>;
    let mut anchor = None::<f64>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--method" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --method".to_owned())?;
                method = Some(value.parse::<MethodKind>().map_err(|err| err.to_string())?);
            }
            "--zoom" => zoom = Some(parse_number(&mut args, "--zoom")?),
            "--anchor" => anchor = Some(parse_number(&mut args, "--anchor")?),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    if anchor.is_some() && zoom.is_none() {
        return Err("--anchor requires --zoom".to_owned());
    }

    Ok(CliArgs {
        command,
        input: input.ok_or_else(|| "missing required --input".to_owned())?,
        method,
        zoom,
        anchor,
    })
}

fn parse_number(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<f64, String> {
    let value = args
        .next()
        .ok_or_else(|| format!("missing value for {flag}"))?;
    value
        .parse::<f64>()
        .map_err(|err| format!("invalid value `{value}` for {flag}: {err}"))
}
