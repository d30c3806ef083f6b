use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match clinicdb_admin::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("clinicdb-admin: {e}");
            ExitCode::FAILURE
        }
    }
}
