use clap::Parser;
use dotenv::dotenv;
use error_stack::fmt::ColorMode;
use reqwest::Url;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use upload_widget::file::SelectedFile;
use upload_widget::notify::{Notifier, Toast, ToastKind};
use upload_widget::verifier::HttpVerifier;
use upload_widget::{Status, SubmitOutcome, UploadWidget};

/// Verify certification files against the verification service.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON files containing a certificationId
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Verification endpoint to call
    #[arg(
        long,
        env = "CERTS_VERIFY_URL",
        default_value = "http://127.0.0.1:3001/verify-certification"
    )]
    url: Url,

    /// Sent as the apikey and bearer token when set
    #[arg(long, env = "CERTS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        let marker = match toast.kind {
            ToastKind::Success => "✔",
            ToastKind::Error => "✖",
        };
        match toast.description {
            Some(description) => eprintln!("{marker} {}: {description}", toast.title),
            None => eprintln!("{marker} {}", toast.title),
        }
    }
}

fn init_logging() {
    error_stack::Report::set_color_mode(ColorMode::None);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("CERTS_LOG"))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    if let Err(e) = dotenv() {
        warn!("failed to load .env file: {e}");
    }

    let args = Args::parse();

    let mut verifier = HttpVerifier::new(args.url);
    if let Some(api_key) = args.api_key {
        verifier = verifier.with_api_key(api_key);
    }

    let widget = UploadWidget::new(verifier, TerminalNotifier);
    let mut all_verified = true;

    for path in args.files {
        let file = match SelectedFile::from_path(&path).await {
            Ok(file) => file,
            Err(e) => {
                error!("{e:?}");
                all_verified = false;
                continue;
            }
        };

        let outcome = widget.pick_file(file).await;
        println!("{}\n", widget.view().await);

        if outcome != SubmitOutcome::Finished(Status::Verified) {
            all_verified = false;
        }
        widget.reset().await;
    }

    if all_verified {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
