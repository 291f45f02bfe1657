use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    chronicare::init_tracing();

    match chronicare::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
