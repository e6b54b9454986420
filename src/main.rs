//! src/main.rs
use sentiment_topk::configuration::get_configuration_with_args;
use sentiment_topk::job::SentimentJob;
use sentiment_topk::telemetry::init_tracing;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing("info") {
        eprintln!("Failed to setup tracing: {e:?}");
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let configuration = match get_configuration_with_args(&args) {
        Ok(configuration) => configuration,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read configuration");
            return ExitCode::FAILURE;
        }
    };

    let job = SentimentJob::new(configuration);
    match job.run().await {
        Ok(report) => {
            for path in &report.top_k.output_files {
                tracing::info!(path = %path.display(), "Wrote output");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(job_id = %job.id(), error = ?e, "Job failed");
            ExitCode::FAILURE
        }
    }
}
