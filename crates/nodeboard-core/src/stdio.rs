use crate::config::Config;
use crate::controller::InteractionController;
use crate::error::DriverError;
use crate::protocol::{Call, Request, Response, ResponseResult};
use crate::view::SceneView;
use tokio::io::{stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub requests: u64,
    pub errors: u64,
}

/// Drive a session over the process's stdin/stdout.
pub async fn run_stdio(config: &Config) -> Result<SessionStats, DriverError> {
    let mut controller = InteractionController::new();
    let stats = run_session(&mut controller, BufReader::new(stdin()), stdout(), config).await?;
    info!(
        requests = stats.requests,
        errors = stats.errors,
        nodes = controller.store().node_count(),
        edges = controller.store().edge_count(),
        "session closed"
    );
    Ok(stats)
}

/// Read one request per line, apply it, write one compact response per line.
///
/// Each request is fully handled before the next line is read. Bad requests,
/// including lines that are not UTF-8, get an error response and the session
/// carries on.
pub async fn run_session<R, W>(
    controller: &mut InteractionController,
    mut reader: R,
    mut writer: W,
    config: &Config,
) -> Result<SessionStats, DriverError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = SessionStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => respond(controller, line),
            Err(e) => {
                let error = DriverError::Encoding(e);
                warn!(error = %error, "dropping undecodable request");
                Response::err(None, &error)
            }
        };
        stats.requests += 1;
        if response.error.is_some() {
            stats.errors += 1;
        }

        if config.pretty {
            if let Ok(pretty) = serde_json::to_string_pretty(&response) {
                debug!("response:\n{}", pretty);
            }
        }
        let encoded = serde_json::to_string(&response).map_err(DriverError::Encode)?;

        writer.write_all(encoded.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(stats)
}

/// Handle a single request line.
pub fn respond(controller: &mut InteractionController, line: &str) -> Response {
    let request = match Request::parse(line) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "dropping malformed request");
            return Response::err(None, &e);
        }
    };
    let id = request.id.clone();
    let method = request.method.clone();

    let call = match request.into_call() {
        Ok(call) => call,
        Err(e) => {
            warn!(%method, error = %e, "rejecting request");
            return Response::err(id, &e);
        }
    };

    let result = match call {
        Call::Event(event) => {
            let effect = controller.handle_event(event);
            ResponseResult::Applied {
                effect,
                snapshot: controller.snapshot(),
            }
        }
        Call::Command(command) => {
            let effect = controller.handle_command(command);
            ResponseResult::Applied {
                effect,
                snapshot: controller.snapshot(),
            }
        }
        Call::Snapshot => ResponseResult::Snapshot {
            snapshot: controller.snapshot(),
        },
        Call::View => ResponseResult::View {
            view: SceneView::build(&controller.snapshot(), controller.drafts()),
        },
    };
    debug!(%method, revision = controller.store().revision(), "request applied");
    Response::ok(id, result)
}
